// imgcmp-core/tests/glyph_tests.rs
//
// Integration tests for the glyph atlas layout.
//   GlyphAtlasLayout::new: cell size, invalid atlases
//   glyph(): index/column/row, bounds checks
//   layout(): string width, offsets
//   uv_rect(): atlas texture rectangles

use imgcmp_core::glyph::GlyphAtlasLayout;
use imgcmp_core::CoreError;

/// A 2048px square atlas: 16 glyphs per row in 128px cells.
fn atlas() -> GlyphAtlasLayout {
    GlyphAtlasLayout::new(2048, 2048, 16).expect("valid atlas")
}

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-6
}

// ════════════════════════════════════════════════════════════════════
// Construction
// ════════════════════════════════════════════════════════════════════

#[test]
fn test_cell_size_is_width_over_glyphs_per_row() {
    let layout = atlas();
    assert_eq!(layout.cell_size(), 128);
    assert_eq!(layout.rows(), 16);
}

#[test]
fn test_zero_glyphs_per_row_rejected() {
    assert!(matches!(
        GlyphAtlasLayout::new(256, 256, 0),
        Err(CoreError::InvalidAtlas(_))
    ));
}

#[test]
fn test_atlas_narrower_than_one_cell_per_glyph_rejected() {
    assert!(GlyphAtlasLayout::new(8, 8, 16).is_err());
}

#[test]
fn test_advance_table_covers_latin1() {
    assert_eq!(GlyphAtlasLayout::ADVANCE_WIDTHS.len(), 224);
    assert_eq!(GlyphAtlasLayout::FIRST_CODE_POINT, 32);
    assert_eq!(GlyphAtlasLayout::ADVANCE_WIDTHS[0], 19); // space
    assert_eq!(GlyphAtlasLayout::ADVANCE_WIDTHS[223], 42); // ÿ
}

// ════════════════════════════════════════════════════════════════════
// Glyph lookup
// ════════════════════════════════════════════════════════════════════

#[test]
fn test_space_is_first_cell() {
    let g = atlas().glyph(' ').unwrap();
    assert_eq!((g.index, g.column, g.row, g.advance), (0, 0, 0, 19));
}

#[test]
fn test_capital_a_position() {
    // 'A' = 65 → index 33 → column 1, row 2.
    let g = atlas().glyph('A').unwrap();
    assert_eq!((g.index, g.column, g.row), (33, 1, 2));
    assert_eq!(g.advance, 68);
}

#[test]
fn test_last_latin1_glyph() {
    let g = atlas().glyph('ÿ').unwrap();
    assert_eq!((g.index, g.column, g.row), (223, 15, 13));
}

#[test]
fn test_control_characters_rejected() {
    assert!(matches!(
        atlas().glyph('\n'),
        Err(CoreError::UnsupportedCharacter { ch: '\n' })
    ));
}

#[test]
fn test_characters_past_table_rejected() {
    assert!(matches!(
        atlas().glyph('€'),
        Err(CoreError::UnsupportedCharacter { .. })
    ));
}

#[test]
fn test_glyph_below_short_atlas_rejected() {
    // Only two rows of cells: indices ≥ 32 fall outside.
    let short = GlyphAtlasLayout::new(256, 32, 16).unwrap();
    assert!(short.glyph('!').is_ok());
    assert!(matches!(
        short.glyph('A'),
        Err(CoreError::GlyphOutsideAtlas { row: 2, rows: 2 })
    ));
}

// ════════════════════════════════════════════════════════════════════
// String layout
// ════════════════════════════════════════════════════════════════════

#[test]
fn test_layout_ab_width() {
    let text = atlas().layout("AB").unwrap();
    assert_eq!(text.width, 68 + 65);
    assert_eq!(text.height, 128);
    assert_eq!(text.glyphs.len(), 2);
}

#[test]
fn test_layout_offsets_accumulate() {
    let text = atlas().layout("AB!").unwrap();
    let offsets: Vec<u32> = text.offsets().collect();
    assert_eq!(offsets, vec![0, 68, 133]);
}

#[test]
fn test_empty_string_layout() {
    let text = atlas().layout("").unwrap();
    assert_eq!(text.width, 0);
    assert!(text.glyphs.is_empty());
}

#[test]
fn test_layout_fails_on_any_bad_char() {
    assert!(atlas().layout("ok\tno").is_err());
}

// ════════════════════════════════════════════════════════════════════
// UV rectangles
// ════════════════════════════════════════════════════════════════════

#[test]
fn test_uv_rect_for_capital_a() {
    let layout = atlas();
    let g = layout.glyph('A').unwrap();
    let uv = layout.uv_rect(&g);
    assert!(approx_eq(uv.u0, 128.0 / 2048.0));
    assert!(approx_eq(uv.u1, (128.0 + 68.0) / 2048.0));
    assert!(approx_eq(uv.v0, 256.0 / 2048.0));
    assert!(approx_eq(uv.v1, 384.0 / 2048.0));
}
