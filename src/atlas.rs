use std::sync::Arc;

use crate::{pixels::PixelBuffer, region::Rect};

#[derive(Clone, Debug)]
/// One placed sprite: its name, normalized region, and the source pixels it
/// was copied from. The source buffer is shared, not owned, so cache hits can
/// point several sprites at the same decode result.
pub struct SpriteInfo {
    pub name: String,
    pub region: Rect,
    pub source: Arc<PixelBuffer>,
}

/// Finished atlas: the packed sheet plus the placement of every sprite in it.
///
/// The host rendering system uploads `sheet()` as a texture; sampling a
/// sprite means sampling the sheet through its `Rect`.
#[derive(Clone, Debug)]
pub struct Atlas {
    name: String,
    sheet: PixelBuffer,
    sprites: Vec<SpriteInfo>,
}

impl Atlas {
    pub(crate) fn from_parts(name: String, sheet: PixelBuffer, sprites: Vec<SpriteInfo>) -> Self {
        Self {
            name,
            sheet,
            sprites,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The packed sheet buffer, transparent wherever no sprite landed.
    pub fn sheet(&self) -> &PixelBuffer {
        &self.sheet
    }

    /// All placements in the order they were packed.
    pub fn sprites(&self) -> &[SpriteInfo] {
        &self.sprites
    }

    /// Normalized region for a sprite name, or `None` when absent.
    ///
    /// Duplicate names are allowed at packing time; lookup is
    /// last-write-wins, so the most recently packed entry shadows earlier
    /// ones.
    pub fn query(&self, name: &str) -> Option<Rect> {
        self.sprites
            .iter()
            .rev()
            .find(|s| s.name == name)
            .map(|s| s.region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sprite(name: &str, x: f32) -> SpriteInfo {
        SpriteInfo {
            name: name.to_string(),
            region: Rect::new(x, 0.0, 0.1, 0.1),
            source: Arc::new(PixelBuffer::new(1, 1)),
        }
    }

    #[test]
    fn query_finds_registered_sprite() {
        let atlas = Atlas::from_parts(
            "test".to_string(),
            PixelBuffer::new(8, 8),
            vec![sprite("a", 0.25)],
        );
        assert_eq!(atlas.query("a").unwrap().x, 0.25);
        assert!(atlas.query("missing").is_none());
    }

    #[test]
    fn duplicate_names_resolve_last_write_wins() {
        let atlas = Atlas::from_parts(
            "test".to_string(),
            PixelBuffer::new(8, 8),
            vec![sprite("a", 0.1), sprite("a", 0.7)],
        );
        assert_eq!(atlas.query("a").unwrap().x, 0.7);
        assert_eq!(atlas.sprites().len(), 2);
    }
}
