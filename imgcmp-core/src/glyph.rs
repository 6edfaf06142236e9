//! Glyph atlas layout.
//!
//! The atlas is a grid of square cells, `glyphs_per_row` wide, holding the
//! code points 32..=255 in order. Each glyph has its own advance width;
//! the cell height is the line height.

use crate::error::CoreError;

/// One glyph's place in the atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphRecord {
    pub index: u32,
    pub column: u32,
    pub row: u32,
    pub advance: u32,
}

/// Normalized texture rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvRect {
    pub u0: f32,
    pub v0: f32,
    pub u1: f32,
    pub v1: f32,
}

/// Glyph records for one string, in order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextLayout {
    pub glyphs: Vec<GlyphRecord>,
    pub width: u32,
    pub height: u32,
}

impl TextLayout {
    /// Pen x position of each glyph.
    pub fn offsets(&self) -> impl Iterator<Item = u32> + '_ {
        self.glyphs.iter().scan(0u32, |pen, g| {
            let x = *pen;
            *pen += g.advance;
            Some(x)
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphAtlasLayout {
    glyphs_per_row: u32,
    cell_size: u32,
    atlas_width: u32,
    atlas_height: u32,
}

impl GlyphAtlasLayout {
    pub const FIRST_CODE_POINT: u32 = 32;

    /// Advance width in atlas pixels for code points 32..=255.
    #[rustfmt::skip]
    pub const ADVANCE_WIDTHS: [u32; 224] = [
        // 32..=47   space ! " # $ % & ' ( ) * + , - . /
        19, 24, 35, 47, 47, 75, 86, 19, 31, 31, 31, 47, 26, 38, 26, 35,
        // 48..=63   0-9 : ; < = > ?
        47, 47, 47, 47, 47, 47, 47, 47, 47, 47, 26, 26, 47, 47, 47, 36,
        // 64..=79   @ A-O
        75, 68, 65, 71, 79, 65, 59, 79, 82, 39, 34, 70, 62, 93, 76, 81,
        // 80..=95   P-Z [ \ ] ^ _
        60, 82, 69, 54, 69, 69, 64, 99, 65, 58, 66, 33, 35, 33, 47, 47,
        // 96..=111  ` a-o
        22, 43, 49, 41, 51, 42, 31, 47, 53, 27, 25, 49, 27, 77, 53, 49,
        // 112..=127 p-z { | } ~ DEL
        51, 50, 34, 36, 32, 51, 45, 64, 40, 42, 43, 33, 33, 33, 47, 47,
        // 128..=143
        47, 47, 19, 47, 38, 94, 47, 47, 29, 109, 54, 25, 109, 47, 66, 47,
        // 144..=159
        47, 19, 19, 38, 38, 32, 47, 94, 32, 86, 36, 25, 71, 47, 43, 58,
        // 160..=175
        19, 24, 47, 47, 47, 47, 33, 51, 34, 78, 34, 41, 47, 38, 53, 28,
        // 176..=191
        30, 47, 34, 34, 22, 51, 54, 26, 25, 34, 37, 41, 75, 75, 75, 34,
        // 192..=207
        68, 68, 68, 68, 68, 68, 90, 71, 65, 65, 65, 65, 39, 39, 39, 39,
        // 208..=223
        79, 76, 81, 81, 81, 81, 81, 47, 81, 69, 69, 69, 69, 58, 61, 54,
        // 224..=239
        43, 43, 43, 43, 43, 43, 64, 41, 42, 42, 42, 42, 27, 27, 27, 27,
        // 240..=255
        48, 53, 49, 49, 49, 49, 49, 47, 49, 51, 51, 51, 51, 42, 51, 42,
    ];

    /// Builds the layout for an atlas of the given pixel size.
    pub fn new(atlas_width: u32, atlas_height: u32, glyphs_per_row: u32) -> Result<Self, CoreError> {
        if glyphs_per_row == 0 {
            return Err(CoreError::InvalidAtlas("glyphs per row must be positive".into()));
        }
        let cell_size = atlas_width / glyphs_per_row;
        if cell_size == 0 || atlas_height < cell_size {
            return Err(CoreError::InvalidAtlas(format!(
                "{atlas_width}x{atlas_height} atlas cannot hold {glyphs_per_row} glyphs per row"
            )));
        }
        Ok(Self {
            glyphs_per_row,
            cell_size,
            atlas_width,
            atlas_height,
        })
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn glyphs_per_row(&self) -> u32 {
        self.glyphs_per_row
    }

    pub fn atlas_size(&self) -> (u32, u32) {
        (self.atlas_width, self.atlas_height)
    }

    /// Number of full glyph rows the atlas image holds.
    pub fn rows(&self) -> u32 {
        self.atlas_height / self.cell_size
    }

    /// Looks up one character.
    pub fn glyph(&self, ch: char) -> Result<GlyphRecord, CoreError> {
        let index = (ch as u32)
            .checked_sub(Self::FIRST_CODE_POINT)
            .filter(|&i| (i as usize) < Self::ADVANCE_WIDTHS.len())
            .ok_or(CoreError::UnsupportedCharacter { ch })?;

        let row = index / self.glyphs_per_row;
        if row >= self.rows() {
            return Err(CoreError::GlyphOutsideAtlas {
                row,
                rows: self.rows(),
            });
        }

        Ok(GlyphRecord {
            index,
            column: index % self.glyphs_per_row,
            row,
            advance: Self::ADVANCE_WIDTHS[index as usize],
        })
    }

    /// Lays out a whole string. Fails on the first unsupported character.
    pub fn layout(&self, text: &str) -> Result<TextLayout, CoreError> {
        let glyphs = text
            .chars()
            .map(|ch| self.glyph(ch))
            .collect::<Result<Vec<_>, _>>()?;
        let width = glyphs.iter().map(|g| g.advance).sum();

        Ok(TextLayout {
            glyphs,
            width,
            height: self.cell_size,
        })
    }

    /// Texture rectangle covering the glyph's advance width and full cell height.
    pub fn uv_rect(&self, glyph: &GlyphRecord) -> UvRect {
        let w = self.atlas_width as f32;
        let h = self.atlas_height as f32;
        let cell = self.cell_size as f32;
        let u0 = glyph.column as f32 * cell / w;
        let v0 = glyph.row as f32 * cell / h;
        UvRect {
            u0,
            v0,
            u1: u0 + glyph.advance as f32 / w,
            v1: v0 + cell / h,
        }
    }
}
