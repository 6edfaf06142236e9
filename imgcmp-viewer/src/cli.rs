//! Command line parsing.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::source::ImageSource;

/// Compare two images (or view one) with pan, zoom and a blended diff.
#[derive(Debug, Clone, Parser)]
#[command(name = "imgcmp", version, about)]
pub struct Cli {
    /// Image to view; give a second one to compare. Paths or http(s) URLs.
    #[arg(value_name = "IMAGE", required = true, num_args = 1..=2)]
    pub images: Vec<String>,

    /// More log output (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Glyph atlas for the help overlay.
    #[arg(long, value_name = "PATH")]
    pub font: Option<PathBuf>,

    /// Config file (JSON). Defaults to the user config directory.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn sources(&self) -> Vec<ImageSource> {
        self.images.iter().map(|arg| ImageSource::parse(arg)).collect()
    }

    pub fn is_diff(&self) -> bool {
        self.images.len() == 2
    }
}
