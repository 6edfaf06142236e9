use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use clap::error::ErrorKind;
use imgcmp_core::config::FontConfig;
use imgcmp_core::{ImagePair, PixelBuffer, ViewerConfig};

use imgcmp_viewer::cli::Cli;
use imgcmp_viewer::shell;
use imgcmp_viewer::source::{Fetcher, ImageSource};
use imgcmp_viewer::util;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    util::init_tracing(cli.verbose);
    util::install_panic_hook();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("imgcmp: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    tracing::info!("imgcmp v{} starting", env!("CARGO_PKG_VERSION"));

    let config = load_config(cli.config.as_deref())?;
    let images = load_images(&cli.sources())?;
    let font_atlas = load_font_atlas(cli.font.as_deref(), &config.font)?;

    shell::run(images, font_atlas, config)
}

fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    directories::ProjectDirs::from("", "", "imgcmp").map(|dirs| dirs.config_dir().join("config.json"))
}

fn load_config(explicit: Option<&Path>) -> anyhow::Result<ViewerConfig> {
    let Some(path) = config_path(explicit) else {
        tracing::debug!("no config directory, using defaults");
        return Ok(ViewerConfig::default());
    };
    if explicit.is_some() && !path.exists() {
        anyhow::bail!("config file {} does not exist", path.display());
    }
    ViewerConfig::load(&path).with_context(|| format!("invalid config file {}", path.display()))
}

fn load_images(sources: &[ImageSource]) -> anyhow::Result<ImagePair> {
    let fetcher = Fetcher::new();
    let mut decoded = sources
        .iter()
        .map(|source| source.load(&fetcher))
        .collect::<anyhow::Result<Vec<PixelBuffer>>>()?
        .into_iter();

    let a = decoded.next().context("no image given")?;
    let pair = match decoded.next() {
        Some(b) => ImagePair::diff(a, b),
        None => ImagePair::single(a),
    };

    let (width, height) = pair.a.dimensions();
    if pair.dimensions_match() {
        tracing::info!("image dimensions: {}x{}", width, height);
    } else {
        tracing::warn!("image dimensions differ!");
    }
    Ok(pair)
}

/// `--font` wins over the config file, which wins over the default path.
/// Only a failure on the default path is tolerated.
fn load_font_atlas(cli_font: Option<&Path>, font: &FontConfig) -> anyhow::Result<Option<PixelBuffer>> {
    let explicit = cli_font.or(font.atlas.as_deref());
    let path = explicit.unwrap_or(Path::new(FontConfig::DEFAULT_ATLAS));

    let loaded = std::fs::read(path)
        .with_context(|| format!("failed to read font atlas {}", path.display()))
        .and_then(|bytes| {
            PixelBuffer::decode_gray(&bytes)
                .with_context(|| format!("failed to decode font atlas {}", path.display()))
        });

    match loaded {
        Ok(atlas) => Ok(Some(atlas)),
        Err(e) if explicit.is_none() => {
            tracing::warn!("{:#}; help overlay disabled", e);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
