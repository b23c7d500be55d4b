//! Per-instance playback encoding.
//!
//! Every mesh instance sharing a baked texture carries exactly four floats:
//! global start frame, global end frame, playback speed in frames per second
//! and a loop-mode flag. The shader combines them with the manager's global
//! time to pick the texture row each instance samples.

/// Floats per instance in the renderer-side attribute buffer.
pub const INSTANCE_STRIDE: usize = 4;

/// Loop behaviour once playback reaches the end frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackLoop {
    /// Hold the end frame.
    Once,
    /// Wrap back to the start frame.
    Loop,
}

impl PlaybackLoop {
    /// Shader-side encoding: `0.0` for once, `1.0` for looping.
    #[must_use]
    pub fn as_flag(self) -> f32 {
        match self {
            Self::Once => 0.0,
            Self::Loop => 1.0,
        }
    }

    /// Decodes the shader-side flag.
    #[must_use]
    pub fn from_flag(flag: f32) -> Self {
        if flag >= 0.5 { Self::Loop } else { Self::Once }
    }
}

/// The 4-scalar playback selection of one instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstancePlayback {
    /// First global frame of the selected clip range.
    pub start_frame: f32,
    /// Last global frame of the selected clip range (inclusive).
    pub end_frame: f32,
    /// Playback speed in frames per second.
    pub speed: f32,
    /// Behaviour at the end frame.
    pub loop_mode: PlaybackLoop,
}

impl InstancePlayback {
    #[must_use]
    pub fn new(start_frame: f32, end_frame: f32, speed: f32, loop_mode: PlaybackLoop) -> Self {
        Self {
            start_frame,
            end_frame,
            speed,
            loop_mode,
        }
    }

    /// Builds an encoding for one entry of
    /// [`frame_ranges`](crate::vat::frame_ranges).
    #[must_use]
    pub fn for_range(range: (u64, u64), speed: f32, loop_mode: PlaybackLoop) -> Self {
        Self {
            start_frame: range.0 as f32,
            end_frame: range.1 as f32,
            speed,
            loop_mode,
        }
    }

    /// The four floats the renderer registers as an instance attribute.
    #[must_use]
    pub fn to_array(self) -> [f32; 4] {
        [
            self.start_frame,
            self.end_frame,
            self.speed,
            self.loop_mode.as_flag(),
        ]
    }
}

/// Flat instance-stride attribute buffer: four floats per instance, ready to
/// hand to the renderer alongside the baked texture.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstanceBuffer {
    data: Vec<f32>,
}

impl InstanceBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one instance, returning its index.
    pub fn push(&mut self, playback: InstancePlayback) -> usize {
        let index = self.len();
        self.data.extend_from_slice(&playback.to_array());
        index
    }

    /// Overwrites the encoding of instance `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn set(&mut self, index: usize, playback: InstancePlayback) {
        let start = index * INSTANCE_STRIDE;
        self.data[start..start + INSTANCE_STRIDE].copy_from_slice(&playback.to_array());
    }

    /// The encoding of instance `index`, if present.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<InstancePlayback> {
        let start = index * INSTANCE_STRIDE;
        let slot = self.data.get(start..start + INSTANCE_STRIDE)?;
        Some(InstancePlayback {
            start_frame: slot[0],
            end_frame: slot[1],
            speed: slot[2],
            loop_mode: PlaybackLoop::from_flag(slot[3]),
        })
    }

    /// Number of instances.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len() / INSTANCE_STRIDE
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The flat float data, `INSTANCE_STRIDE` per instance.
    #[must_use]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Upload-ready byte view for instance-stride registration.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }
}
