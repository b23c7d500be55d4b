//! VAT Data Model
//!
//! The flat memory layout of captured bone matrices ([`layout`]), the CPU
//! buffer that carries them ([`buffer`]), the lossless pixel-grid encoding a
//! renderer samples ([`texture`]) and the self-describing JSON form used for
//! out-of-process storage ([`codec`]).
//!
//! Once baked, none of these hold any back-reference to the skeleton or mesh
//! that produced them; a buffer or texture is fully self-contained and
//! transferable.

pub mod buffer;
pub mod codec;
pub mod layout;
pub mod texture;

pub use buffer::VatBuffer;
pub use codec::{deserialize_vat, serialize_vat};
pub use layout::{FLOATS_PER_MATRIX, TEXELS_PER_MATRIX, VatShape, frame_ranges};
pub use texture::VatTexture;
