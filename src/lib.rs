#![forbid(unsafe_code)]

pub mod atlas;
pub mod decode;
pub mod error;
pub mod packer;
pub mod pixels;
pub mod region;

pub use atlas::{Atlas, SpriteInfo};
pub use decode::{decode_image, decode_image_file};
pub use error::{PackError, PackResult};
pub use packer::{AtlasPacker, SPRITE_PADDING, SheetConfig};
pub use pixels::{PixelBuffer, Rgba8, TRANSPARENT};
pub use region::{Rect, format_signature};
