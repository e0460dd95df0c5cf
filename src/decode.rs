use std::path::Path;

use anyhow::Context;

use crate::{
    error::{PackError, PackResult},
    pixels::PixelBuffer,
};

/// Decode encoded image bytes (PNG, JPEG, ...) into a straight-alpha RGBA8 buffer.
pub fn decode_image(bytes: &[u8]) -> PackResult<PixelBuffer> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| PackError::decode(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    PixelBuffer::from_raw(width, height, rgba.into_raw())
}

/// Read and decode a sprite image file.
///
/// A missing or unreadable file surfaces here as a `Decode` error, matching
/// the contract that path registration never touches the filesystem.
pub fn decode_image_file(path: &Path) -> PackResult<PixelBuffer> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("read sprite file '{}'", path.display()))
        .map_err(|e| PackError::decode(format!("{e:#}")))?;
    decode_image(&bytes)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn encode_png(width: u32, height: u32, rgba: Vec<u8>) -> Vec<u8> {
        let img = image::RgbaImage::from_raw(width, height, rgba).unwrap();
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn decode_png_preserves_dimensions_and_straight_alpha() {
        let png = encode_png(1, 1, vec![100, 50, 200, 128]);
        let buf = decode_image(&png).unwrap();
        assert_eq!(buf.width(), 1);
        assert_eq!(buf.height(), 1);
        assert_eq!(buf.pixel(0, 0), [100, 50, 200, 128]);
    }

    #[test]
    fn decode_garbage_is_decode_error() {
        let err = decode_image(b"not an image").unwrap_err();
        assert!(matches!(err, PackError::Decode(_)));
    }

    #[test]
    fn decode_missing_file_is_decode_error() {
        let err = decode_image_file(Path::new("/nonexistent/sprite.png")).unwrap_err();
        assert!(matches!(err, PackError::Decode(_)));
        assert!(err.to_string().contains("sprite.png"));
    }
}
