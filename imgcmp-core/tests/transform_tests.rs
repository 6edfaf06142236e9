// imgcmp-core/tests/transform_tests.rs
//
// Integration tests for the 2D affine transform.
// Tests all public API surface of transform.rs:
//   Affine2::identity / new: constructors
//   translate / scale: local-space composition
//   concat: order of application
//   viewport: framebuffer → clip space
//   to_upload_matrix: column-major 4×4 layout

use imgcmp_core::Affine2;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

fn point_eq(p: (f32, f32), q: (f32, f32)) -> bool {
    approx_eq(p.0, q.0) && approx_eq(p.1, q.1)
}

// ════════════════════════════════════════════════════════════════════
// Constructors
// ════════════════════════════════════════════════════════════════════

#[test]
fn test_identity_leaves_points_alone() {
    let m = Affine2::identity();
    assert_eq!(m.apply(3.0, -7.5), (3.0, -7.5));
    assert_eq!(Affine2::default(), m);
}

// ════════════════════════════════════════════════════════════════════
// Translate / Scale
// ════════════════════════════════════════════════════════════════════

#[test]
fn test_translate_on_identity() {
    let m = Affine2::identity().translate(5.0, -2.0);
    assert_eq!(m.apply(1.0, 1.0), (6.0, -1.0));
}

#[test]
fn test_translate_is_scaled_by_existing_linear_part() {
    let m = Affine2::identity().scale(2.0, 3.0).translate(1.0, 1.0);
    // The offset is applied before the scale.
    assert_eq!(m.e, 2.0);
    assert_eq!(m.f, 3.0);
    assert_eq!(m.apply(0.0, 0.0), (2.0, 3.0));
}

#[test]
fn test_scale_touches_only_linear_part() {
    let m = Affine2::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0).scale(2.0, 10.0);
    assert_eq!(m, Affine2::new(2.0, 4.0, 30.0, 40.0, 5.0, 6.0));
}

// ════════════════════════════════════════════════════════════════════
// Concat
// ════════════════════════════════════════════════════════════════════

#[test]
fn test_concat_applies_self_first() {
    let scale = Affine2::identity().scale(2.0, 2.0);
    let shift = Affine2::identity().translate(10.0, 0.0);

    let scale_then_shift = scale.concat(&shift);
    let shift_then_scale = shift.concat(&scale);

    assert!(point_eq(scale_then_shift.apply(1.0, 1.0), (12.0, 2.0)));
    assert!(point_eq(shift_then_scale.apply(1.0, 1.0), (22.0, 2.0)));
}

#[test]
fn test_concat_matches_sequential_application() {
    let m1 = Affine2::new(0.5, 0.25, -1.0, 2.0, 3.0, -4.0);
    let m2 = Affine2::new(2.0, -1.0, 0.5, 1.5, -6.0, 7.0);
    let (x, y) = m1.apply(1.25, -3.5);
    assert!(point_eq(m1.concat(&m2).apply(1.25, -3.5), m2.apply(x, y)));
}

#[test]
fn test_concat_is_associative() {
    let a = Affine2::identity().scale(2.0, 3.0).translate(1.0, -1.0);
    let b = Affine2::new(0.0, 1.0, -1.0, 0.0, 4.0, 5.0);
    let c = Affine2::identity().translate(-3.0, 0.5).scale(0.5, 0.25);
    let left = a.concat(&b).concat(&c);
    let right = a.concat(&b.concat(&c));
    assert!(point_eq(left.apply(7.0, 9.0), right.apply(7.0, 9.0)));
}

#[test]
fn test_translate_equals_concat_with_translation_first() {
    let base = Affine2::new(2.0, 0.5, -0.5, 3.0, 1.0, 1.0);
    let via_translate = base.translate(4.0, -2.0);
    let via_concat = Affine2::identity().translate(4.0, -2.0).concat(&base);
    assert!(point_eq(via_translate.apply(1.0, 2.0), via_concat.apply(1.0, 2.0)));
}

// ════════════════════════════════════════════════════════════════════
// Viewport
// ════════════════════════════════════════════════════════════════════

#[test]
fn test_viewport_maps_corners_to_clip_space() {
    let m = Affine2::viewport(800.0, 600.0);
    assert!(point_eq(m.apply(0.0, 0.0), (-1.0, 1.0)));
    assert!(point_eq(m.apply(800.0, 600.0), (1.0, -1.0)));
    assert!(point_eq(m.apply(400.0, 300.0), (0.0, 0.0)));
}

// ════════════════════════════════════════════════════════════════════
// Upload matrix
// ════════════════════════════════════════════════════════════════════

#[test]
fn test_upload_matrix_layout() {
    let m = Affine2::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
    assert_eq!(
        m.to_upload_matrix(),
        [
            1.0, 2.0, 0.0, 0.0, //
            3.0, 4.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            5.0, 6.0, 0.0, 1.0,
        ]
    );
}

#[test]
fn test_upload_matrix_transforms_like_apply() {
    let m = Affine2::viewport(640.0, 480.0).scale(4.0, 4.0).translate(-10.0, 20.0);
    let mat = m.to_upload_matrix();
    let (x, y) = (33.0, 44.0);
    // Column-major multiply of (x, y, 0, 1).
    let cx = mat[0] * x + mat[4] * y + mat[12];
    let cy = mat[1] * x + mat[5] * y + mat[13];
    assert!(point_eq((cx, cy), m.apply(x, y)));
}
