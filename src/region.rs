use xxhash_rust::xxh3::Xxh3;

/// Sprite sub-rectangle in sheet-normalized coordinates.
///
/// After placement every field lies in `[0, 1]` with `x + width <= 1` and
/// `y + height <= 1`. Origin is the sheet's top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Half-open containment test: the right and bottom edges are exclusive.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }

    /// Stable identity signature of the rectangle's geometry.
    ///
    /// Hashes the exact bit patterns of the four coordinates, so two rects
    /// compare equal under `==` exactly when their signatures match (modulo
    /// `-0.0`/`0.0` and NaN payloads, which never occur for placed regions).
    pub fn signature(&self) -> u64 {
        let mut h = Xxh3::new();
        h.update(&self.x.to_bits().to_le_bytes());
        h.update(&self.y.to_bits().to_le_bytes());
        h.update(&self.width.to_bits().to_le_bytes());
        h.update(&self.height.to_bits().to_le_bytes());
        h.digest()
    }
}

/// Render a signature the way debug overlays display it.
pub fn format_signature(sig: u64) -> String {
    format!("{sig:016x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(0.25, 0.25, 0.5, 0.5);
        assert!(r.contains(0.25, 0.25));
        assert!(r.contains(0.5, 0.5));
        assert!(!r.contains(0.75, 0.5));
        assert!(!r.contains(0.5, 0.75));
        assert!(!r.contains(0.1, 0.5));
    }

    #[test]
    fn zero_area_rect_contains_nothing() {
        let r = Rect::new(0.5, 0.5, 0.0, 0.0);
        assert!(!r.contains(0.5, 0.5));
    }

    #[test]
    fn signature_is_deterministic_and_discriminating() {
        let a = Rect::new(0.1, 0.2, 0.3, 0.4);
        let b = Rect::new(0.1, 0.2, 0.3, 0.4);
        let c = Rect::new(0.1, 0.2, 0.3, 0.5);
        assert_eq!(a.signature(), b.signature());
        assert_ne!(a.signature(), c.signature());
    }

    #[test]
    fn format_signature_is_fixed_width_hex() {
        let s = format_signature(0xabc);
        assert_eq!(s.len(), 16);
        assert_eq!(s, "0000000000000abc");
    }
}
