//! CPU-side VAT buffer.

use glam::Mat4;

use crate::errors::{Result, VatError};
use crate::vat::layout::{FLOATS_PER_MATRIX, VatShape};

/// A baked VAT: the flat float sequence described by [`VatShape`].
///
/// The buffer length is exactly `shape.buffer_len()` at all times; no frame
/// is skipped or duplicated. Construction either zero-fills
/// ([`VatBuffer::new`]) or validates a caller-supplied vector
/// ([`VatBuffer::from_vec`]).
#[derive(Debug, Clone, PartialEq)]
pub struct VatBuffer {
    shape: VatShape,
    data: Vec<f32>,
}

impl VatBuffer {
    /// Allocates a zero-filled buffer for `shape`.
    #[must_use]
    pub fn new(shape: VatShape) -> Self {
        Self {
            shape,
            data: vec![0.0; shape.buffer_len()],
        }
    }

    /// Wraps an existing float vector, validating it against `shape`.
    ///
    /// # Errors
    ///
    /// Returns [`VatError::ShapeMismatch`] if `data.len()` is not exactly
    /// `shape.buffer_len()`.
    pub fn from_vec(shape: VatShape, data: Vec<f32>) -> Result<Self> {
        let expected = shape.buffer_len();
        if data.len() != expected {
            return Err(VatError::ShapeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    /// Shape metadata of this buffer.
    #[inline]
    #[must_use]
    pub fn shape(&self) -> VatShape {
        self.shape
    }

    /// The flat float data, frame-major.
    #[inline]
    #[must_use]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Consumes the buffer, returning its float vector.
    #[must_use]
    pub fn into_data(self) -> Vec<f32> {
        self.data
    }

    /// The floats of one frame: `(bone_count + 1)` matrices, 16 floats each.
    #[must_use]
    pub fn frame_slice(&self, frame: usize) -> &[f32] {
        let stride = self.shape.frame_stride();
        &self.data[frame * stride..(frame + 1) * stride]
    }

    /// Mutable view of one frame's floats.
    pub fn frame_slice_mut(&mut self, frame: usize) -> &mut [f32] {
        let stride = self.shape.frame_stride();
        &mut self.data[frame * stride..(frame + 1) * stride]
    }

    /// The matrix of `bone` at `frame` as a [`Mat4`].
    ///
    /// `bone == bone_count` addresses the reserved root/world slot.
    #[must_use]
    pub fn bone_matrix(&self, frame: usize, bone: usize) -> Mat4 {
        let start = frame * self.shape.frame_stride() + bone * FLOATS_PER_MATRIX;
        Mat4::from_cols_slice(&self.data[start..start + FLOATS_PER_MATRIX])
    }

    /// Upload-ready byte view of the float data.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }
}
