//! Error types for the core library.
//!
//! `GpuError` covers everything a backend can report. `CoreError` wraps it
//! together with decode, layout and configuration failures.

use std::path::PathBuf;

use thiserror::Error;

/// Failures reported by a [`crate::gpu::GpuBackend`].
#[derive(Debug, Error)]
pub enum GpuError {
    #[error("failed to compile {stage} shader for program `{label}`:\n{log}")]
    Compile {
        label: String,
        stage: &'static str,
        log: String,
    },

    #[error("failed to link program `{label}`: {reason}")]
    Link { label: String, reason: String },

    #[error("program `{label}` failed validation: {reason}")]
    Validation { label: String, reason: String },

    #[error("unknown {kind} handle {id}")]
    UnknownHandle { kind: &'static str, id: u32 },

    #[error("texture upload failed: {0}")]
    Texture(String),

    #[error("buffer creation failed: {0}")]
    Buffer(String),

    #[error("draw failed: {0}")]
    Draw(String),
}

/// Everything else that can go wrong in the core.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Gpu(#[from] GpuError),

    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("unsupported stride: {stride} bytes per row for a {width}px wide image ({bytes_per_pixel} bytes per pixel)")]
    UnsupportedStride {
        stride: usize,
        width: u32,
        bytes_per_pixel: usize,
    },

    #[error("pixel data holds {actual} bytes, expected {expected}")]
    PixelDataSize { expected: usize, actual: usize },

    #[error("character {ch:?} has no glyph in the atlas")]
    UnsupportedCharacter { ch: char },

    #[error("glyph row {row} lies outside a {rows}-row atlas")]
    GlyphOutsideAtlas { row: u32, rows: u32 },

    #[error("invalid glyph atlas: {0}")]
    InvalidAtlas(String),

    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    ConfigParse(#[from] serde_json::Error),
}
