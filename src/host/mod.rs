//! Host Engine Interfaces
//!
//! The baking pipeline never talks to a concrete engine. Everything it needs
//! from the hosting renderer — stepping an isolated simulation, reading the
//! current bone matrices, driving a clip to a single frame, locating the
//! skinned mesh inside a loaded asset — comes in through the traits defined
//! here. The hosting application implements them over its own scene graph;
//! the tests implement them over small scripted mocks.
//!
//! All of these are single-threaded, cooperatively stepped interfaces: a
//! capture suspends by stepping the [`SimulationContext`] until the pending
//! frame advance settles, never by running work in parallel.

use crate::errors::{Result, VatError};

/// An isolated simulation context the offline baker steps manually.
///
/// Implementations are expected to skip rendering side effects and
/// frustum/visibility work when `render_side_effects` is false, so stepping
/// is deterministic and cheap.
pub trait SimulationContext {
    /// Advances the simulation by one tick.
    fn step(&mut self, render_side_effects: bool);

    /// Whether the context has finished loading/compiling and poses are valid.
    fn is_ready(&self) -> bool;

    /// Releases everything the context acquired. Called exactly once by the
    /// orchestrator, on success and on failure alike.
    fn dispose(&mut self);
}

/// Access to the world-space bone transform matrices of one skinned mesh.
///
/// The returned pose reflects the skeleton at the instant of the call and is
/// overwritten in place by the next simulation step; callers must copy it out
/// before stepping again.
pub trait BoneMatrixSource {
    /// Number of bones in the skeleton (excluding the reserved root slot).
    fn bone_count(&self) -> usize;

    /// Forces the skeleton to recompute its matrices instead of relying on
    /// cached state. The capture engine calls this after every step.
    fn refresh(&mut self);

    /// The current flat pose: `(bone_count() + 1) * 16` floats, one 4×4
    /// matrix per bone plus one root/world matrix slot.
    fn transform_matrices(&mut self) -> &[f32];
}

/// Drives one animation clip frame by frame.
///
/// The host environment applies a requested frame asynchronously: after
/// [`start`](ClipHandle::start) the pose only reflects the target frame once
/// the simulation has stepped far enough. [`is_settled`](ClipHandle::is_settled)
/// is the polled form of that completion signal; it reports `true` exactly
/// once the single requested frame transition has been fully applied.
pub trait ClipHandle {
    /// Returns the clip to an un-started state.
    fn reset(&mut self);

    /// Begins playback over `[from, to]` frames.
    ///
    /// The capture engine always requests a single frame:
    /// `start(false, 1.0, f, f, false)`.
    fn start(&mut self, looping: bool, speed: f32, from: f32, to: f32, stop_at_end: bool);

    /// Stops playback. Called after every captured frame.
    fn stop(&mut self);

    /// Whether the most recently requested frame has been fully applied.
    fn is_settled(&self) -> bool;
}

/// One animation clip scheduled for baking: a name, an inclusive integer
/// frame range and the handle that drives it.
pub struct BakeClip {
    /// Clip identity, used in diagnostics and errors.
    pub name: String,
    from: u32,
    to: u32,
    /// Driver for this clip inside the baking context.
    pub handle: Box<dyn ClipHandle>,
}

impl std::fmt::Debug for BakeClip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BakeClip")
            .field("name", &self.name)
            .field("from", &self.from)
            .field("to", &self.to)
            .finish_non_exhaustive()
    }
}

impl BakeClip {
    /// Creates a clip over the inclusive frame range `[from, to]`.
    ///
    /// # Errors
    ///
    /// Returns [`VatError::InvalidFrameRange`] if `to < from`, or if the
    /// range spans the full `u32` domain so its frame count would not fit
    /// a `u32`.
    pub fn new(
        name: impl Into<String>,
        from: u32,
        to: u32,
        handle: Box<dyn ClipHandle>,
    ) -> Result<Self> {
        let name = name.into();
        if to < from || to - from == u32::MAX {
            return Err(VatError::InvalidFrameRange { name, from, to });
        }
        Ok(Self {
            name,
            from,
            to,
            handle,
        })
    }

    /// First frame of the clip (inclusive).
    #[inline]
    #[must_use]
    pub fn from(&self) -> u32 {
        self.from
    }

    /// Last frame of the clip (inclusive).
    #[inline]
    #[must_use]
    pub fn to(&self) -> u32 {
        self.to
    }

    /// Number of frames this clip contributes: `to - from + 1`.
    #[inline]
    #[must_use]
    pub fn frame_count(&self) -> u32 {
        self.to - self.from + 1
    }
}

/// A loaded asset the orchestrator can bake.
///
/// The implementation owns the engine-side asset container; `split` hands the
/// baker simultaneous access to the clip list and to the skeleton of the
/// first mesh that has one.
pub trait BakeAsset {
    /// The asset's animation clips, in bake order, together with the bone
    /// matrix source of the first skinned mesh (`None` if the asset has no
    /// mesh with an associated skeleton).
    fn split(&mut self) -> (&mut [BakeClip], Option<&mut dyn BoneMatrixSource>);

    /// Releases the loaded asset. Called exactly once by the orchestrator,
    /// on success and on failure alike.
    fn dispose(&mut self);
}
