//! Offline Baking Pipeline
//!
//! [`capture`] is the frame capture engine: it drives each clip to every
//! integer frame of its range in strict sequence and copies the settled bone
//! matrices into the flat buffer. [`orchestrator`] wraps it for whole assets:
//! wait for the isolated context to become ready, locate the skinned mesh,
//! run the capture, tear everything down.

pub mod capture;
pub mod orchestrator;

pub use capture::{CaptureSettings, capture_clips};
pub use orchestrator::bake_asset;
