#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

//! Offline baking and instanced playback of vertex animation textures (VAT).
//!
//! A VAT flattens every frame of every animation clip of a skinned mesh into
//! one time-indexed buffer of bone transform matrices, so a renderer can pose
//! any number of instances from a single global time value and four
//! per-instance floats, without per-instance bone uploads.
//!
//! The crate is split along the pipeline:
//!
//! - [`host`]: traits the hosting engine implements (simulation stepping,
//!   bone matrix access, clip driving, asset lookup)
//! - [`baking`]: the deterministic frame capture engine and the offline
//!   orchestrator that wraps it in an isolated context
//! - [`vat`]: the buffer layout, the lossless texture encoding and the
//!   self-describing JSON form
//! - [`playback`]: the texture-owning manager, the render-loop tick
//!   subscription and the 4-float per-instance encoding

pub mod baking;
pub mod errors;
pub mod host;
pub mod playback;
pub mod vat;

pub use baking::{CaptureSettings, bake_asset, capture_clips};
pub use errors::{Result, VatError};
pub use host::{BakeAsset, BakeClip, BoneMatrixSource, ClipHandle, SimulationContext};
pub use playback::{
    InstanceBuffer, InstancePlayback, PlaybackLoop, TickKey, TickObservers, VatManager, VatSource,
    create_vat,
};
pub use vat::{VatBuffer, VatShape, VatTexture, deserialize_vat, frame_ranges, serialize_vat};
