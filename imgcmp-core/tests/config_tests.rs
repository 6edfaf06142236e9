// imgcmp-core/tests/config_tests.rs
//
// Integration tests for ViewerConfig.
//   defaults: every documented default value
//   from_json_str(): partial overrides, invalid JSON
//   load(): missing file, real file

use std::io::Write;

use imgcmp_core::config::FontConfig;
use imgcmp_core::{CoreError, ViewerConfig};

// ════════════════════════════════════════════════════════════════════
// Defaults
// ════════════════════════════════════════════════════════════════════

#[test]
fn test_defaults() {
    let c = ViewerConfig::default();
    assert_eq!((c.window.width, c.window.height), (1024, 768));
    assert_eq!(c.clear_color, [0.0, 0.0, 0.0, 1.0]);
    assert_eq!(c.grid.dark, [0.4, 0.4, 0.4, 1.0]);
    assert_eq!(c.grid.light, [0.9, 0.9, 0.9, 1.0]);
    assert_eq!(c.grid.block_size, 8.0);
    assert!(c.help.visible);
    assert_eq!(c.help.color, [0.0, 0.0, 1.0, 1.0]);
    assert_eq!(c.help.background, [0.5, 0.5, 0.5, 0.5]);
    assert_eq!((c.help.left, c.help.top, c.help.line_spacing), (20.0, 100.0, 128.0));
    assert_eq!(c.help.scale, 0.5);
    assert_eq!(c.font.atlas, None);
    assert_eq!(c.font.glyphs_per_row, 16);
    assert_eq!(FontConfig::DEFAULT_ATLAS, "Font.png");
    assert_eq!(c.blend_step, 0.05);
}

// ════════════════════════════════════════════════════════════════════
// JSON parsing
// ════════════════════════════════════════════════════════════════════

#[test]
fn test_empty_object_gives_defaults() {
    assert_eq!(ViewerConfig::from_json_str("{}").unwrap(), ViewerConfig::default());
}

#[test]
fn test_partial_override_keeps_other_defaults() {
    let c = ViewerConfig::from_json_str(
        r#"{ "window": { "width": 640 }, "help": { "visible": false }, "blend_step": 0.1 }"#,
    )
    .unwrap();
    assert_eq!(c.window.width, 640);
    assert_eq!(c.window.height, 768);
    assert!(!c.help.visible);
    assert_eq!(c.help.scale, 0.5);
    assert_eq!(c.blend_step, 0.1);
}

#[test]
fn test_font_atlas_path() {
    let c = ViewerConfig::from_json_str(r#"{ "font": { "atlas": "/opt/fonts/atlas.png" } }"#).unwrap();
    assert_eq!(
        c.font.atlas.as_deref(),
        Some(std::path::Path::new("/opt/fonts/atlas.png"))
    );
}

#[test]
fn test_invalid_json_is_an_error() {
    assert!(matches!(
        ViewerConfig::from_json_str("{ window: }"),
        Err(CoreError::ConfigParse(_))
    ));
    assert!(ViewerConfig::from_json_str(r#"{ "blend_step": "fast" }"#).is_err());
}

// ════════════════════════════════════════════════════════════════════
// Loading from disk
// ════════════════════════════════════════════════════════════════════

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let c = ViewerConfig::load(&dir.path().join("nope.json")).unwrap();
    assert_eq!(c, ViewerConfig::default());
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "clear_color": [0.1, 0.2, 0.3, 1.0] }}"#).unwrap();
    let c = ViewerConfig::load(file.path()).unwrap();
    assert_eq!(c.clear_color, [0.1, 0.2, 0.3, 1.0]);
}

#[test]
fn test_directory_is_not_a_config() {
    let dir = tempfile::tempdir().unwrap();
    assert!(ViewerConfig::load(dir.path()).is_err());
}
