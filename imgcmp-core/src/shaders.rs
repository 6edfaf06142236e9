//! Program sources.
//!
//! All programs share one vertex stage (`quad.wgsl`) and one uniform block
//! (`common.wgsl`). Fragment stages differ per pass.

use crate::blend::DiffVariant;
use crate::gpu::ProgramSource;

// ── Uniform names ──
pub const MODELVIEW: &str = "modelview";
pub const COLOR: &str = "color";
pub const BACKGROUND: &str = "background";
pub const GRID: &str = "grid";
pub const BLEND: &str = "blend";

// ── Sampler names ──
pub const IMAGE_A: &str = "image_a";
pub const IMAGE_B: &str = "image_b";
pub const GLYPHS: &str = "glyphs";

/// Vertex attributes, bound to locations 0 and 1 in this order.
pub const ATTRIBUTES: &[&str] = &["position", "uvs"];

const VERTEX: &str = concat!(include_str!("shaders/common.wgsl"), include_str!("shaders/quad.wgsl"));

const GRID_FRAGMENT: &str = concat!(include_str!("shaders/common.wgsl"), include_str!("shaders/grid.wgsl"));
const SINGLE_FRAGMENT: &str = concat!(include_str!("shaders/common.wgsl"), include_str!("shaders/single.wgsl"));
const TEXT_FRAGMENT: &str = concat!(include_str!("shaders/common.wgsl"), include_str!("shaders/text.wgsl"));

const DIFF_HIGHLIGHT_A: &str = concat!(
    include_str!("shaders/common.wgsl"),
    include_str!("shaders/diff_common.wgsl"),
    include_str!("shaders/diff_highlight_a.wgsl")
);
const DIFF_A_TO_DISTANCE: &str = concat!(
    include_str!("shaders/common.wgsl"),
    include_str!("shaders/diff_common.wgsl"),
    include_str!("shaders/diff_a_to_distance.wgsl")
);
const DIFF_DISTANCE_TO_B: &str = concat!(
    include_str!("shaders/common.wgsl"),
    include_str!("shaders/diff_common.wgsl"),
    include_str!("shaders/diff_distance_to_b.wgsl")
);
const DIFF_HIGHLIGHT_B: &str = concat!(
    include_str!("shaders/common.wgsl"),
    include_str!("shaders/diff_common.wgsl"),
    include_str!("shaders/diff_highlight_b.wgsl")
);

pub fn grid() -> ProgramSource<'static> {
    ProgramSource {
        label: "grid",
        vertex: VERTEX,
        fragment: GRID_FRAGMENT,
        attributes: ATTRIBUTES,
        samplers: &[],
    }
}

/// Texture × opacity, for single-image mode.
pub fn single() -> ProgramSource<'static> {
    ProgramSource {
        label: "single",
        vertex: VERTEX,
        fragment: SINGLE_FRAGMENT,
        attributes: ATTRIBUTES,
        samplers: &[IMAGE_A],
    }
}

pub fn text() -> ProgramSource<'static> {
    ProgramSource {
        label: "text",
        vertex: VERTEX,
        fragment: TEXT_FRAGMENT,
        attributes: ATTRIBUTES,
        samplers: &[GLYPHS],
    }
}

pub fn diff(variant: DiffVariant) -> ProgramSource<'static> {
    let fragment = match variant {
        DiffVariant::HighlightA => DIFF_HIGHLIGHT_A,
        DiffVariant::AToDistance => DIFF_A_TO_DISTANCE,
        DiffVariant::DistanceToB => DIFF_DISTANCE_TO_B,
        DiffVariant::HighlightB => DIFF_HIGHLIGHT_B,
    };
    ProgramSource {
        label: variant.label(),
        vertex: VERTEX,
        fragment,
        attributes: ATTRIBUTES,
        samplers: &[IMAGE_A, IMAGE_B],
    }
}
