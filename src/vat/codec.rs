//! Self-describing JSON form of a baked VAT.
//!
//! The payload carries the shape metadata and the flat float data, enough to
//! reconstruct the buffer out of process without the original asset. Floats
//! are written as shortest round-trip decimal text, so serialization is
//! bit-exact for every finite value.

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::vat::buffer::VatBuffer;
use crate::vat::layout::VatShape;

#[derive(Serialize, Deserialize)]
struct VatPayload {
    bone_count: usize,
    frame_count: usize,
    vertex_data: Vec<f32>,
}

/// Serializes a baked buffer to its JSON form.
pub fn serialize_vat(buffer: &VatBuffer) -> Result<String> {
    let shape = buffer.shape();
    let payload = VatPayload {
        bone_count: shape.bone_count,
        frame_count: shape.frame_count,
        vertex_data: buffer.data().to_vec(),
    };
    Ok(serde_json::to_string(&payload)?)
}

/// Reconstructs a baked buffer from its JSON form.
///
/// # Errors
///
/// Returns [`VatError::Json`](crate::errors::VatError::Json) for malformed or
/// truncated input, and
/// [`VatError::ShapeMismatch`](crate::errors::VatError::ShapeMismatch) if the
/// declared bone/frame counts are inconsistent with the payload length.
pub fn deserialize_vat(text: &str) -> Result<VatBuffer> {
    let payload: VatPayload = serde_json::from_str(text)?;
    let shape = VatShape::new(payload.bone_count, payload.frame_count);
    VatBuffer::from_vec(shape, payload.vertex_data)
}
