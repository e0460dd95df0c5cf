use crate::error::{PackError, PackResult};

/// Straight-alpha RGBA8 pixel.
pub type Rgba8 = [u8; 4];

/// Fully transparent black.
pub const TRANSPARENT: Rgba8 = [0, 0, 0, 0];

#[derive(Clone, Debug, PartialEq, Eq)]
/// Mutable 2D RGBA8 image, row-major, top-left origin, tightly packed.
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a buffer filled with fully transparent pixels.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; width as usize * height as usize * 4],
        }
    }

    /// Wrap an existing RGBA8 byte vector; `data.len()` must be `width * height * 4`.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> PackResult<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(PackError::validation(format!(
                "pixel buffer length {} does not match {width}x{height} rgba8 ({expected} bytes)",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel area in pixels squared. Zero-size buffers are legal and have area 0.
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Raw RGBA8 bytes, row-major from the top-left.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Read the pixel at `(x, y)`. Panics when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba8 {
        let i = self.offset(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    /// Overwrite the pixel at `(x, y)`, alpha included. Panics when out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, px: Rgba8) {
        let i = self.offset(x, y);
        self.data[i..i + 4].copy_from_slice(&px);
    }

    /// Copy every pixel of `src` into `self` with `src`'s top-left at `(x, y)`.
    ///
    /// Rows are copied as contiguous byte runs; values (alpha included) land
    /// bit-identical to a per-pixel copy, with no blending. Zero-size sources
    /// are a no-op. Fails when the destination footprint exceeds bounds.
    pub fn blit_from(&mut self, src: &PixelBuffer, x: u32, y: u32) -> PackResult<()> {
        if src.width == 0 || src.height == 0 {
            return Ok(());
        }
        if u64::from(x) + u64::from(src.width) > u64::from(self.width)
            || u64::from(y) + u64::from(src.height) > u64::from(self.height)
        {
            return Err(PackError::validation(format!(
                "blit of {}x{} at ({x},{y}) exceeds {}x{} destination",
                src.width, src.height, self.width, self.height
            )));
        }

        let row_bytes = src.width as usize * 4;
        for row in 0..src.height {
            let s = row as usize * row_bytes;
            let d = self.offset(x, y + row);
            self.data[d..d + row_bytes].copy_from_slice(&src.data[s..s + row_bytes]);
        }
        Ok(())
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        (y as usize * self.width as usize + x as usize) * 4
    }
}
