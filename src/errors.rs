//! Error Types
//!
//! The main error type [`VatError`] covers all failure modes of the baking
//! pipeline and the codec. All public APIs return [`Result<T>`], an alias for
//! `std::result::Result<T, VatError>`.
//!
//! Two failure families matter to callers:
//!
//! - **Precondition failures** ([`VatError::MissingSkeleton`],
//!   [`VatError::InvalidFrameRange`]) are fatal and reported before any
//!   buffer is allocated.
//! - **Validation failures** ([`VatError::ShapeMismatch`],
//!   [`VatError::PoseSizeMismatch`]) are reported at decode/capture time
//!   instead of silently producing a corrupt texture.
//!
//! Resource-lifecycle misuse (disposing a manager twice, ticking with an
//! undefined delta) is deliberately *not* an error: those are tolerated as
//! no-ops, see [`crate::playback`].

use thiserror::Error;

/// The main error type for the VAT pipeline.
#[derive(Error, Debug)]
pub enum VatError {
    // ========================================================================
    // Precondition failures (fatal, before any capture)
    // ========================================================================
    /// The asset has no mesh with an associated skeleton.
    #[error("No mesh with an associated skeleton was found; baking requires a skinned mesh")]
    MissingSkeleton,

    /// A clip declared an inverted frame range.
    #[error("Clip '{name}' has an invalid frame range: [{from}, {to}]")]
    InvalidFrameRange {
        /// Name of the offending clip
        name: String,
        /// Declared first frame
        from: u32,
        /// Declared last frame
        to: u32,
    },

    // ========================================================================
    // Validation failures (decode / capture time)
    // ========================================================================
    /// Declared shape metadata does not match the supplied buffer length.
    #[error("VAT shape mismatch: shape requires {expected} floats, got {actual}")]
    ShapeMismatch {
        /// Length the declared shape requires
        expected: usize,
        /// Length actually supplied
        actual: usize,
    },

    /// The bone matrix source returned a pose of the wrong length.
    #[error("Pose size mismatch: expected {expected} floats per frame, got {actual}")]
    PoseSizeMismatch {
        /// `(bone_count + 1) * 16`
        expected: usize,
        /// Length actually returned
        actual: usize,
    },

    // ========================================================================
    // Simulation stepping failures
    // ========================================================================
    /// A single-frame advance never reported completion within the step budget.
    #[error("Clip '{clip}' never settled on frame {frame} within {budget} simulation steps")]
    FrameNeverSettled {
        /// Name of the clip being captured
        clip: String,
        /// Frame index that was requested
        frame: u32,
        /// Step budget that was exhausted
        budget: u32,
    },

    /// The baking context never reported ready within the step budget.
    #[error("Simulation context not ready after {budget} steps")]
    ContextNotReady {
        /// Step budget that was exhausted
        budget: u32,
    },

    // ========================================================================
    // Format & parsing failures
    // ========================================================================
    /// Malformed or truncated serialized VAT payload.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Alias for `Result<T, VatError>`.
pub type Result<T> = std::result::Result<T, VatError>;
