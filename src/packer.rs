use std::{collections::HashMap, path::PathBuf, sync::Arc};

use crate::{
    atlas::{Atlas, SpriteInfo},
    decode::decode_image_file,
    error::{PackError, PackResult},
    pixels::PixelBuffer,
    region::Rect,
};

/// Margin in pixels between any two packed sprites, horizontally and
/// vertically. Prevents bilinear-filter bleed when the sheet is sampled.
pub const SPRITE_PADDING: u32 = 2;

/// Dimensions of the output sheet, fixed at atlas-creation time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SheetConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            width: 2048,
            height: 2048,
        }
    }
}

#[derive(Clone, Debug)]
struct CacheEntry {
    buffer: Arc<PixelBuffer>,
    region: Rect,
}

/// Shelf-packing texture atlas builder.
///
/// Sprites are registered up front (`add_sprite` / `add_sprite_path`), then
/// `generate_atlas` packs them all into one sheet. Raw-buffer sprites are
/// placed largest-area-first; path sprites follow in insertion order and are
/// deduplicated by path, so registering the same file twice decodes it once
/// and reuses its region.
pub struct AtlasPacker {
    config: SheetConfig,
    raw_sprites: Vec<(String, PixelBuffer)>,
    path_sprites: Vec<(String, PathBuf)>,
    // Never evicted; grows with the number of distinct paths packed over the
    // packer's lifetime.
    sprite_cache: HashMap<PathBuf, CacheEntry>,
}

impl Default for AtlasPacker {
    fn default() -> Self {
        Self::new(SheetConfig::default())
    }
}

impl AtlasPacker {
    pub fn new(config: SheetConfig) -> Self {
        Self {
            config,
            raw_sprites: Vec::new(),
            path_sprites: Vec::new(),
            sprite_cache: HashMap::new(),
        }
    }

    /// Queue an in-memory sprite. No validation; a zero-size buffer packs
    /// into a zero-area region.
    pub fn add_sprite(&mut self, name: impl Into<String>, buffer: PixelBuffer) {
        self.raw_sprites.push((name.into(), buffer));
    }

    /// Queue a sprite to be decoded from an image file. The file is not
    /// touched until `generate_atlas`; a missing file surfaces there as a
    /// decode error.
    pub fn add_sprite_path(&mut self, name: impl Into<String>, path: impl Into<PathBuf>) {
        self.path_sprites.push((name.into(), path.into()));
    }

    /// Pack every queued sprite into a fresh sheet.
    ///
    /// Both request queues are consumed whether packing succeeds or fails;
    /// the path cache survives across calls on the same packer. Any error
    /// means no atlas was produced — there is no partial result.
    #[tracing::instrument(skip(self))]
    pub fn generate_atlas(&mut self, atlas_name: &str) -> PackResult<Atlas> {
        if self.config.width == 0 || self.config.height == 0 {
            return Err(PackError::validation(format!(
                "sheet dimensions must be non-zero, got {}x{}",
                self.config.width, self.config.height
            )));
        }

        let mut raw = std::mem::take(&mut self.raw_sprites);
        let path = std::mem::take(&mut self.path_sprites);

        // Largest-area-first reduces shelf fragmentation. The sort is stable,
        // so equal-area sprites keep their registration order.
        raw.sort_by_key(|(_, buffer)| std::cmp::Reverse(buffer.area()));

        let mut sheet = PixelBuffer::new(self.config.width, self.config.height);
        let mut sprites = Vec::with_capacity(raw.len() + path.len());
        let mut cursor = ShelfCursor::new();

        for (name, buffer) in raw {
            let buffer = Arc::new(buffer);
            place_sprite(
                &self.config,
                &mut sheet,
                &mut cursor,
                &mut sprites,
                name,
                buffer,
            )?;
        }

        for (name, source_path) in path {
            if let Some(cached) = self.sprite_cache.get(&source_path) {
                tracing::warn!(
                    sprite = %name,
                    path = %source_path.display(),
                    "sprite path already packed, reusing cached copy"
                );
                sprites.push(SpriteInfo {
                    name,
                    region: cached.region,
                    source: Arc::clone(&cached.buffer),
                });
                continue;
            }

            let buffer = Arc::new(decode_image_file(&source_path)?);
            let region = place_sprite(
                &self.config,
                &mut sheet,
                &mut cursor,
                &mut sprites,
                name,
                Arc::clone(&buffer),
            )?;
            self.sprite_cache
                .insert(source_path, CacheEntry { buffer, region });
        }

        Ok(Atlas::from_parts(atlas_name.to_string(), sheet, sprites))
    }
}

/// Blit one sprite at the cursor, register its normalized region, and advance
/// the shelf cursor past it.
fn place_sprite(
    config: &SheetConfig,
    sheet: &mut PixelBuffer,
    cursor: &mut ShelfCursor,
    sprites: &mut Vec<SpriteInfo>,
    name: String,
    buffer: Arc<PixelBuffer>,
) -> PackResult<Rect> {
    let (x, y) = cursor.slot(&name, buffer.width(), buffer.height(), config)?;
    sheet.blit_from(&buffer, x, y)?;

    let sheet_w = config.width as f32;
    let sheet_h = config.height as f32;
    let region = Rect::new(
        x as f32 / sheet_w,
        y as f32 / sheet_h,
        buffer.width() as f32 / sheet_w,
        buffer.height() as f32 / sheet_h,
    );
    tracing::debug!(sprite = %name, x, y, "placed sprite");

    cursor.advance(buffer.width(), buffer.height());
    sprites.push(SpriteInfo {
        name,
        region,
        source: buffer,
    });
    Ok(region)
}

/// Greedy shelf cursor: sprites fill the current row left to right; when a
/// sprite would cross the right edge the cursor drops below the tallest
/// sprite of the row and starts a new shelf.
struct ShelfCursor {
    x: u32,
    y: u32,
    max_row_height: u32,
}

impl ShelfCursor {
    fn new() -> Self {
        Self {
            x: SPRITE_PADDING,
            y: SPRITE_PADDING,
            max_row_height: 0,
        }
    }

    /// Resolve the placement slot for a `width` x `height` sprite, wrapping
    /// to a new shelf when the current row is full.
    fn slot(
        &mut self,
        name: &str,
        width: u32,
        height: u32,
        config: &SheetConfig,
    ) -> PackResult<(u32, u32)> {
        if u64::from(self.x) + u64::from(width) >= u64::from(config.width) {
            self.x = 0;
            self.y += self.max_row_height + SPRITE_PADDING;
            self.max_row_height = 0;

            if self.y >= config.height {
                return Err(PackError::capacity_exceeded(format!(
                    "no room for sprite '{name}' ({width}x{height}) in {}x{} sheet",
                    config.width, config.height
                )));
            }
        }

        // Sprites that fit the shelf test but would still hang past the sheet
        // edge (wider than the sheet, or taller than the remaining height)
        // must not be written out of bounds.
        if u64::from(self.x) + u64::from(width) > u64::from(config.width)
            || u64::from(self.y) + u64::from(height) > u64::from(config.height)
        {
            return Err(PackError::capacity_exceeded(format!(
                "sprite '{name}' ({width}x{height}) does not fit at ({}, {}) in {}x{} sheet",
                self.x, self.y, config.width, config.height
            )));
        }

        Ok((self.x, self.y))
    }

    fn advance(&mut self, width: u32, height: u32) {
        self.x += width + SPRITE_PADDING;
        self.max_row_height = self.max_row_height.max(height);
    }
}
