// imgcmp-core/tests/blend_tests.rs
//
// Integration tests for the blend mode selector.
//   select(): segment boundaries, renormalization, totality
//   DiffVariant: index/label tables

use imgcmp_core::blend::select;
use imgcmp_core::DiffVariant;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

// ════════════════════════════════════════════════════════════════════
// Segment boundaries
// ════════════════════════════════════════════════════════════════════

#[test]
fn test_zero_selects_highlight_a() {
    let s = select(0.0);
    assert_eq!(s.variant, DiffVariant::HighlightA);
    assert_eq!(s.value, 0.0);
}

#[test]
fn test_just_below_quarter_stays_in_first_segment() {
    let s = select(0.2499);
    assert_eq!(s.variant, DiffVariant::HighlightA);
    assert!(approx_eq(s.value, 0.9996));
}

#[test]
fn test_quarter_starts_second_segment() {
    let s = select(0.25);
    assert_eq!(s.variant, DiffVariant::AToDistance);
    assert_eq!(s.value, 0.0);
}

#[test]
fn test_half_starts_third_segment() {
    let s = select(0.5);
    assert_eq!(s.variant, DiffVariant::DistanceToB);
    assert_eq!(s.value, 0.0);
}

#[test]
fn test_three_quarters_starts_last_segment() {
    let s = select(0.75);
    assert_eq!(s.variant, DiffVariant::HighlightB);
    assert_eq!(s.value, 0.0);
}

#[test]
fn test_one_is_inside_last_segment() {
    let s = select(1.0);
    assert_eq!(s.variant, DiffVariant::HighlightB);
    assert_eq!(s.value, 1.0);
}

#[test]
fn test_renormalized_value_in_unit_range() {
    for i in 0..=1000 {
        let s = select(i as f32 / 1000.0);
        assert!((0.0..=1.0).contains(&s.value), "blend {} → {}", i as f32 / 1000.0, s.value);
    }
}

#[test]
fn test_midpoints() {
    assert!(approx_eq(select(0.125).value, 0.5));
    assert!(approx_eq(select(0.375).value, 0.5));
    assert!(approx_eq(select(0.625).value, 0.5));
    assert!(approx_eq(select(0.875).value, 0.5));
}

// ════════════════════════════════════════════════════════════════════
// Out-of-range input
// ════════════════════════════════════════════════════════════════════

#[test]
fn test_out_of_range_is_clamped() {
    assert_eq!(select(-3.0), select(0.0));
    assert_eq!(select(7.5), select(1.0));
    assert_eq!(select(f32::NAN), select(0.0));
}

// ════════════════════════════════════════════════════════════════════
// DiffVariant
// ════════════════════════════════════════════════════════════════════

#[test]
fn test_variant_indices_follow_all_order() {
    for (i, variant) in DiffVariant::ALL.iter().enumerate() {
        assert_eq!(variant.index(), i);
    }
}

#[test]
fn test_variant_labels_are_distinct() {
    let mut labels: Vec<_> = DiffVariant::ALL.iter().map(|v| v.label()).collect();
    labels.sort();
    labels.dedup();
    assert_eq!(labels.len(), 4);
}
