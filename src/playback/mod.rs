//! Playback Surface
//!
//! What a renderer consumes after baking: the texture-owning [`VatManager`]
//! with its monotonically advancing time, the render-loop tick subscription
//! registry ([`TickObservers`]), the 4-float per-instance encoding
//! ([`InstancePlayback`] / [`InstanceBuffer`]) and the tagged
//! animation-source variant ([`VatSource`]) that resolves any of the four
//! input kinds into a texture-backed manager.

pub mod instance;
pub mod manager;
pub mod observers;
pub mod source;

pub use instance::{INSTANCE_STRIDE, InstanceBuffer, InstancePlayback, PlaybackLoop};
pub use manager::VatManager;
pub use observers::{TickKey, TickObservers};
pub use source::{VatSource, create_vat};
