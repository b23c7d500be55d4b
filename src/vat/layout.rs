//! Flat buffer layout.
//!
//! Frames are concatenated in clip order, then frame order within a clip.
//! Each frame occupies `(bone_count + 1) * 16` contiguous floats: one 4×4
//! matrix per bone plus one reserved root/world matrix slot, 16 floats each
//! in the rendering target's convention.

use serde::{Deserialize, Serialize};

use crate::host::BakeClip;

/// Floats in one 4×4 bone matrix.
pub const FLOATS_PER_MATRIX: usize = 16;

/// Texels one matrix spans in the texture encoding (one matrix row per texel).
pub const TEXELS_PER_MATRIX: usize = 4;

/// Shape metadata of a baked VAT: enough to address any `(bone, frame)` slot
/// without the original skeleton or clips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VatShape {
    /// Number of skeleton bones (the buffer reserves one extra matrix slot
    /// per frame on top of this).
    pub bone_count: usize,
    /// Total number of baked frames across all clips.
    pub frame_count: usize,
}

impl VatShape {
    /// Creates a shape for `bone_count` bones over `frame_count` total frames.
    #[must_use]
    pub fn new(bone_count: usize, frame_count: usize) -> Self {
        Self {
            bone_count,
            frame_count,
        }
    }

    /// Derives the shape for baking `clips` against a `bone_count`-bone
    /// skeleton: total frames are summed over the clip list in order.
    #[must_use]
    pub fn from_clips(bone_count: usize, clips: &[BakeClip]) -> Self {
        let frame_count = clips.iter().map(|c| c.frame_count() as usize).sum();
        Self {
            bone_count,
            frame_count,
        }
    }

    /// Floats one frame occupies: `(bone_count + 1) * 16`.
    ///
    /// Shape metadata can arrive from untrusted serialized payloads, so the
    /// arithmetic saturates instead of overflowing: a forged shape that no
    /// real buffer can hold fails length validation rather than panicking.
    #[inline]
    #[must_use]
    pub fn frame_stride(&self) -> usize {
        self.bone_count
            .saturating_add(1)
            .saturating_mul(FLOATS_PER_MATRIX)
    }

    /// Total buffer length in floats: `frame_stride() * frame_count`.
    ///
    /// Saturates for forged shapes, see [`frame_stride`](Self::frame_stride).
    #[inline]
    #[must_use]
    pub fn buffer_len(&self) -> usize {
        self.frame_stride().saturating_mul(self.frame_count)
    }

    /// Width of the texture encoding in texels: `(bone_count + 1) * 4`.
    #[inline]
    #[must_use]
    pub fn texture_width(&self) -> u32 {
        self.bone_count
            .saturating_add(1)
            .saturating_mul(TEXELS_PER_MATRIX) as u32
    }

    /// Height of the texture encoding in texels: one row per frame.
    #[inline]
    #[must_use]
    pub fn texture_height(&self) -> u32 {
        self.frame_count as u32
    }
}

/// Global inclusive frame range `[start, end]` each clip occupies inside the
/// baked buffer, in clip order.
///
/// These are the ranges a per-instance playback encoding points at; a clip's
/// own `[from, to]` indices are local to its source animation and do not
/// survive concatenation.
#[must_use]
pub fn frame_ranges(clips: &[BakeClip]) -> Vec<(u64, u64)> {
    let mut ranges = Vec::with_capacity(clips.len());
    // Concatenated totals can exceed a single clip's u32 range.
    let mut cursor = 0u64;
    for clip in clips {
        let count = u64::from(clip.frame_count());
        ranges.push((cursor, cursor + count - 1));
        cursor += count;
    }
    ranges
}
