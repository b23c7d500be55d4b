//! Frame capture engine.
//!
//! Captures every frame of every clip into one [`VatBuffer`], strictly
//! sequentially: the bone matrix source reflects only the single currently
//! posed frame, so no two captures are ever in flight at once.

use log::{debug, info};

use crate::errors::{Result, VatError};
use crate::host::{BakeClip, BoneMatrixSource, SimulationContext};
use crate::vat::{VatBuffer, VatShape};

/// Step budgets for the cooperative waits inside a bake.
#[derive(Debug, Clone, Copy)]
pub struct CaptureSettings {
    /// Maximum simulation steps a single-frame advance may take to settle.
    pub settle_step_budget: u32,
    /// Maximum steps to wait for the baking context to report ready.
    pub ready_step_budget: u32,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            settle_step_budget: 240,
            ready_step_budget: 1000,
        }
    }
}

/// Bakes every frame of every clip, in clip order, into one buffer.
///
/// For each clip the handle is reset once, then driven to each integer frame
/// of `[from, to]` as a non-looping single-frame playback. The context is
/// stepped (without render side effects) until the handle reports the frame
/// settled; only then is the pose copied into the `(clip, frame offset)`
/// slot, and only then is the clip stopped. Exactly `to - from + 1` frames
/// are captured per clip, strictly increasing, the last one at `to`.
///
/// An empty clip list yields an empty buffer, not an error.
///
/// # Errors
///
/// - [`VatError::FrameNeverSettled`] if a frame advance exhausts the settle
///   budget.
/// - [`VatError::PoseSizeMismatch`] if the source returns a pose that is not
///   `(bone_count + 1) * 16` floats.
pub fn capture_clips(
    ctx: &mut dyn SimulationContext,
    source: &mut dyn BoneMatrixSource,
    clips: &mut [BakeClip],
    settings: &CaptureSettings,
) -> Result<VatBuffer> {
    let shape = VatShape::from_clips(source.bone_count(), clips);
    let mut buffer = VatBuffer::new(shape);

    info!(
        "capturing {} clip(s): {} bones, {} total frames",
        clips.len(),
        shape.bone_count,
        shape.frame_count
    );

    let mut global_frame = 0usize;
    for clip in clips.iter_mut() {
        debug!(
            "capturing clip '{}': frames {}..={}",
            clip.name,
            clip.from(),
            clip.to()
        );
        clip.handle.reset();

        for frame in clip.from()..=clip.to() {
            // Play exactly this one frame, non-looping.
            clip.handle
                .start(false, 1.0, frame as f32, frame as f32, false);

            // The frame advance completes asynchronously inside the host
            // simulation; step until the handle reports it applied.
            let mut steps = 0;
            while !clip.handle.is_settled() {
                if steps >= settings.settle_step_budget {
                    return Err(VatError::FrameNeverSettled {
                        clip: clip.name.clone(),
                        frame,
                        budget: settings.settle_step_budget,
                    });
                }
                ctx.step(false);
                source.refresh();
                steps += 1;
            }

            // The source mutates its pose in place on the next step, so copy
            // it out into the frame slot now.
            source.refresh();
            let pose = source.transform_matrices();
            let stride = shape.frame_stride();
            if pose.len() != stride {
                return Err(VatError::PoseSizeMismatch {
                    expected: stride,
                    actual: pose.len(),
                });
            }
            buffer.frame_slice_mut(global_frame).copy_from_slice(pose);
            global_frame += 1;

            clip.handle.stop();
        }
    }

    Ok(buffer)
}
