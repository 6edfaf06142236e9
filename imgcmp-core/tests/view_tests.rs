// imgcmp-core/tests/view_tests.rs
//
// Integration tests for ViewState.
//   coordinate conversion: window → framebuffer → texture and back
//   zoom_in_at/zoom_out_at: cursor-anchored zoom, limits
//   zoom_in/zoom_out: keyboard zoom
//   pan_by: drag pan
//   set_blend/nudge_blend: clamping
//   reset / model_view

use imgcmp_core::view::{MAX_ZOOM, MIN_ZOOM};
use imgcmp_core::{Affine2, ViewState};

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

fn view(pan_x: f32, pan_y: f32, zoom: f32) -> ViewState {
    ViewState {
        pan_x,
        pan_y,
        zoom,
        ..ViewState::default()
    }
}

// ════════════════════════════════════════════════════════════════════
// Defaults
// ════════════════════════════════════════════════════════════════════

#[test]
fn test_initial_state() {
    let v = ViewState::new();
    assert_eq!(v.zoom, 1.0);
    assert_eq!((v.pan_x, v.pan_y), (0.0, 0.0));
    assert_eq!(v.blend, 1.0);
    assert_eq!(v.device_pixel_scale, 1.0);
}

// ════════════════════════════════════════════════════════════════════
// Coordinate conversion
// ════════════════════════════════════════════════════════════════════

#[test]
fn test_window_to_framebuffer_uses_device_pixel_scale() {
    let mut v = ViewState::new();
    v.set_device_pixel_scale(2.0);
    assert_eq!(v.window_to_framebuffer(10.0, 15.5), (20.0, 31.0));
}

#[test]
fn test_device_pixel_scale_rejects_nonsense() {
    let mut v = ViewState::new();
    v.set_device_pixel_scale(0.0);
    v.set_device_pixel_scale(-1.0);
    v.set_device_pixel_scale(f32::NAN);
    assert_eq!(v.device_pixel_scale, 1.0);
}

#[test]
fn test_texture_framebuffer_round_trip() {
    for v in [view(0.0, 0.0, 1.0), view(-37.5, 12.25, 4.0), view(100.0, -3.0, 0.125)] {
        for (x, y) in [(0.0, 0.0), (17.0, 42.0), (-5.5, 1000.0)] {
            let (fx, fy) = v.texture_to_framebuffer(x, y);
            let (tx, ty) = v.framebuffer_to_texture(fx, fy);
            assert!(approx_eq(tx, x) && approx_eq(ty, y), "{v:?} ({x}, {y})");
        }
    }
}

#[test]
fn test_framebuffer_to_texture_formula() {
    let v = view(10.0, -4.0, 2.0);
    assert_eq!(v.framebuffer_to_texture(100.0, 50.0), (40.0, 29.0));
}

// ════════════════════════════════════════════════════════════════════
// Zoom about the cursor
// ════════════════════════════════════════════════════════════════════

#[test]
fn test_zoom_in_keeps_point_under_cursor() {
    let mut v = ViewState::new();
    let before = v.framebuffer_to_texture(100.0, 50.0);
    assert!(v.zoom_in_at(100.0, 50.0));
    let after = v.framebuffer_to_texture(100.0, 50.0);

    assert_eq!(v.zoom, 2.0);
    assert!(approx_eq(before.0, after.0) && approx_eq(before.1, after.1));
}

#[test]
fn test_zoom_out_keeps_point_under_cursor() {
    let mut v = view(-20.0, 7.0, 4.0);
    let before = v.framebuffer_to_texture(321.0, 123.0);
    assert!(v.zoom_out_at(321.0, 123.0));
    let after = v.framebuffer_to_texture(321.0, 123.0);

    assert_eq!(v.zoom, 2.0);
    assert!(approx_eq(before.0, after.0) && approx_eq(before.1, after.1));
}

#[test]
fn test_zoom_sequence_keeps_point_fixed() {
    let mut v = ViewState::new();
    let cursor = (640.0, 360.0);
    let anchor = v.framebuffer_to_texture(cursor.0, cursor.1);
    v.zoom_in_at(cursor.0, cursor.1);
    v.zoom_in_at(cursor.0, cursor.1);
    v.zoom_out_at(cursor.0, cursor.1);
    v.zoom_in_at(cursor.0, cursor.1);
    let now = v.framebuffer_to_texture(cursor.0, cursor.1);
    assert_eq!(v.zoom, 4.0);
    assert!(approx_eq(anchor.0, now.0) && approx_eq(anchor.1, now.1));
}

#[test]
fn test_zoom_stops_at_limits_without_panning() {
    let mut v = view(3.0, 4.0, MAX_ZOOM);
    assert!(!v.zoom_in_at(50.0, 50.0));
    assert_eq!((v.pan_x, v.pan_y, v.zoom), (3.0, 4.0, MAX_ZOOM));

    let mut v = view(3.0, 4.0, MIN_ZOOM);
    assert!(!v.zoom_out_at(50.0, 50.0));
    assert_eq!((v.pan_x, v.pan_y, v.zoom), (3.0, 4.0, MIN_ZOOM));
}

#[test]
fn test_keyboard_zoom_does_not_pan() {
    let mut v = view(5.0, 6.0, 1.0);
    assert!(v.zoom_in());
    assert_eq!(v.zoom, 2.0);
    assert!(v.zoom_out());
    assert!(v.zoom_out());
    assert_eq!(v.zoom, 0.5);
    assert_eq!((v.pan_x, v.pan_y), (5.0, 6.0));
}

// ════════════════════════════════════════════════════════════════════
// Pan
// ════════════════════════════════════════════════════════════════════

#[test]
fn test_pan_delta_is_divided_by_zoom() {
    let mut v = view(0.0, 0.0, 4.0);
    v.pan_by(40.0, -8.0);
    assert_eq!((v.pan_x, v.pan_y), (10.0, -2.0));
}

// ════════════════════════════════════════════════════════════════════
// Blend
// ════════════════════════════════════════════════════════════════════

#[test]
fn test_blend_nudge_clamps_high() {
    let mut v = ViewState::new();
    v.set_blend(0.98);
    v.nudge_blend(0.05);
    assert_eq!(v.blend, 1.0);
}

#[test]
fn test_blend_nudge_clamps_low() {
    let mut v = ViewState::new();
    v.set_blend(0.02);
    v.nudge_blend(-0.05);
    assert_eq!(v.blend, 0.0);
}

#[test]
fn test_blend_nudge_in_range() {
    let mut v = ViewState::new();
    v.set_blend(0.5);
    v.nudge_blend(-0.05);
    assert!(approx_eq(v.blend, 0.45));
}

#[test]
fn test_blend_nan_becomes_zero() {
    let mut v = ViewState::new();
    v.set_blend(f32::NAN);
    assert_eq!(v.blend, 0.0);
}

// ════════════════════════════════════════════════════════════════════
// Reset / model view
// ════════════════════════════════════════════════════════════════════

#[test]
fn test_reset_restores_defaults_but_keeps_scale() {
    let mut v = view(12.0, -9.0, 8.0);
    v.set_device_pixel_scale(2.0);
    v.set_blend(0.3);
    v.reset();
    assert_eq!((v.pan_x, v.pan_y, v.zoom, v.blend), (0.0, 0.0, 1.0, 1.0));
    assert_eq!(v.device_pixel_scale, 2.0);
}

#[test]
fn test_model_view_matches_texture_to_framebuffer() {
    let v = view(-30.0, 12.0, 2.0);
    let viewport = Affine2::viewport(800.0, 600.0);
    let model_view = v.model_view(&viewport);

    let (fx, fy) = v.texture_to_framebuffer(50.0, 60.0);
    let expected = viewport.apply(fx, fy);
    let actual = model_view.apply(50.0, 60.0);
    assert!(approx_eq(actual.0, expected.0) && approx_eq(actual.1, expected.1));
}
