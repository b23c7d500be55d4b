//! Animation source resolution.
//!
//! A manager can be fed from four kinds of input: a serialized JSON payload,
//! a raw baked buffer, a pre-built texture, or a clip list that still needs
//! baking. [`VatSource`] models them as a tagged variant with one arm per
//! kind; [`create_vat`] resolves any of them into a texture-backed
//! [`VatManager`] subscribed to the render loop.

use crate::baking::{CaptureSettings, capture_clips};
use crate::errors::{Result, VatError};
use crate::host::{BakeClip, BoneMatrixSource, SimulationContext};
use crate::playback::manager::VatManager;
use crate::playback::observers::TickObservers;
use crate::vat::{VatBuffer, VatTexture, deserialize_vat};

/// One of the four animation-source kinds a manager can be built from.
pub enum VatSource {
    /// A self-describing JSON payload, as produced by
    /// [`serialize_vat`](crate::vat::serialize_vat).
    Serialized(String),
    /// An already-baked flat buffer.
    Buffer(VatBuffer),
    /// A pre-built texture, used as-is.
    Texture(VatTexture),
    /// Clips still to be baked inside the caller's simulation context.
    Clips(Vec<BakeClip>),
}

/// Resolves `source` into a [`VatManager`] bound to a baked texture.
///
/// The `skeleton` is only consulted by the [`VatSource::Clips`] arm; passing
/// `None` there is a precondition failure, the other arms ignore it.
///
/// # Errors
///
/// - [`VatError::MissingSkeleton`] for a clip bake without a skeleton.
/// - Any decode failure from [`deserialize_vat`] for the serialized arm.
/// - Any capture failure from [`capture_clips`] for the clips arm.
pub fn create_vat(
    source: VatSource,
    ctx: &mut dyn SimulationContext,
    skeleton: Option<&mut dyn BoneMatrixSource>,
    observers: &mut TickObservers,
    settings: &CaptureSettings,
) -> Result<VatManager> {
    let texture = match source {
        VatSource::Texture(texture) => texture,
        VatSource::Serialized(text) => VatTexture::from_buffer(&deserialize_vat(&text)?),
        VatSource::Buffer(buffer) => VatTexture::from_buffer(&buffer),
        VatSource::Clips(mut clips) => {
            let skeleton = skeleton.ok_or(VatError::MissingSkeleton)?;
            let buffer = capture_clips(ctx, skeleton, &mut clips, settings)?;
            VatTexture::from_buffer(&buffer)
        }
    };

    Ok(VatManager::new(texture, observers))
}
