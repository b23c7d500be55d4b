//! Lossless texture encoding of a VAT buffer.

use uuid::Uuid;

use crate::errors::Result;
use crate::vat::buffer::VatBuffer;
use crate::vat::layout::VatShape;

/// A VAT buffer packed into a 2-D pixel grid.
///
/// Each texel stores 4 floats — one matrix row — so a row of the texture is
/// one baked frame: `(bone_count + 1) * 4` texels wide, `frame_count` texels
/// high. The packing is a pure reshape of the flat buffer; no float is
/// altered, compressed or reordered, so [`VatTexture::to_buffer`] is an exact
/// inverse of [`VatTexture::from_buffer`].
///
/// The texture holds no reference to the skeleton or mesh it was baked from.
/// Upload is the host renderer's job; [`VatTexture::as_bytes`] is the
/// upload-ready view (4 × f32 per texel, tightly packed rows).
#[derive(Debug, Clone)]
pub struct VatTexture {
    /// Stable identity, for resource tracking in the host renderer.
    pub id: Uuid,
    /// Debug label.
    pub name: String,
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl VatTexture {
    /// Packs a baked buffer into its texture encoding.
    pub fn from_buffer(buffer: &VatBuffer) -> Self {
        let shape = buffer.shape();
        Self {
            id: Uuid::new_v4(),
            name: format!(
                "VatTexture_{}x{}",
                shape.texture_width(),
                shape.texture_height()
            ),
            width: shape.texture_width(),
            height: shape.texture_height(),
            data: buffer.data().to_vec(),
        }
    }

    /// Texture width in texels.
    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Texture height in texels (one row per frame).
    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The raw float data, row-major.
    #[inline]
    #[must_use]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// The floats of one texture row, i.e. one baked frame.
    #[must_use]
    pub fn row(&self, frame: usize) -> &[f32] {
        let stride = self.width as usize * 4;
        &self.data[frame * stride..(frame + 1) * stride]
    }

    /// Reconstructs the flat buffer this texture was packed from.
    ///
    /// # Errors
    ///
    /// Returns a shape validation error if `bone_count` is inconsistent with
    /// the texture dimensions.
    pub fn to_buffer(&self, bone_count: usize) -> Result<VatBuffer> {
        let shape = VatShape::new(bone_count, self.height as usize);
        VatBuffer::from_vec(shape, self.data.clone())
    }

    /// Upload-ready byte view (tightly packed `Rgba32Float` texels).
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }
}
