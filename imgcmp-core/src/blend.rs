//! Blend mode selection.
//!
//! Diff mode sweeps a single blend scalar across four fragment programs.
//! The unit interval splits into four equal segments; each picks one
//! program and is renormalized back to [0, 1] for that program's mix.
//!
//!   [0.00, 0.25)  HighlightA: A fading into a red highlight of differences
//!   [0.25, 0.50)  AToDistance: highlighted A fading into a distance heat map
//!   [0.50, 0.75)  DistanceToB: heat map fading into highlighted B
//!   [0.75, 1.00]  HighlightB: highlighted B fading into plain B

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiffVariant {
    HighlightA,
    AToDistance,
    DistanceToB,
    HighlightB,
}

impl DiffVariant {
    pub const ALL: [DiffVariant; 4] = [
        DiffVariant::HighlightA,
        DiffVariant::AToDistance,
        DiffVariant::DistanceToB,
        DiffVariant::HighlightB,
    ];

    /// Position in [`DiffVariant::ALL`]; used to index program tables.
    pub fn index(self) -> usize {
        match self {
            DiffVariant::HighlightA => 0,
            DiffVariant::AToDistance => 1,
            DiffVariant::DistanceToB => 2,
            DiffVariant::HighlightB => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DiffVariant::HighlightA => "diff-highlight-a",
            DiffVariant::AToDistance => "diff-a-to-distance",
            DiffVariant::DistanceToB => "diff-distance-to-b",
            DiffVariant::HighlightB => "diff-highlight-b",
        }
    }
}

/// Chosen program plus its renormalized mix value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendSelection {
    pub variant: DiffVariant,
    pub value: f32,
}

/// Maps a blend scalar to a diff variant. Total: out-of-range input is
/// clamped and NaN is treated as 0.
pub fn select(blend: f32) -> BlendSelection {
    let v = if blend.is_nan() { 0.0 } else { blend.clamp(0.0, 1.0) };

    let (variant, value) = if v < 0.25 {
        (DiffVariant::HighlightA, v * 4.0)
    } else if v < 0.5 {
        (DiffVariant::AToDistance, v * 4.0 - 1.0)
    } else if v < 0.75 {
        (DiffVariant::DistanceToB, v * 4.0 - 2.0)
    } else {
        (DiffVariant::HighlightB, v * 4.0 - 3.0)
    };

    BlendSelection { variant, value }
}
