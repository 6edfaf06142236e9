//! Where image bytes come from: a local path or an http(s) URL.
//!
//! Remote images are fetched once at startup on a current-thread tokio
//! runtime, before the window exists.

use std::path::PathBuf;

use anyhow::Context;
use imgcmp_core::PixelBuffer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    File(PathBuf),
    Url(String),
}

impl ImageSource {
    pub fn parse(arg: &str) -> Self {
        let lower = arg.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            ImageSource::Url(arg.to_string())
        } else {
            ImageSource::File(PathBuf::from(arg))
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, ImageSource::Url(_))
    }

    /// Reads the raw encoded bytes.
    pub fn read(&self, fetcher: &Fetcher) -> anyhow::Result<Vec<u8>> {
        match self {
            ImageSource::File(path) => {
                std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
            }
            ImageSource::Url(url) => fetcher.fetch(url),
        }
    }

    /// Reads and decodes to RGBA8.
    pub fn load(&self, fetcher: &Fetcher) -> anyhow::Result<PixelBuffer> {
        let bytes = self.read(fetcher)?;
        let pixels = PixelBuffer::decode_rgba(&bytes)
            .with_context(|| format!("failed to decode {self}"))?;
        tracing::debug!(source = %self, width = pixels.width(), height = pixels.height(), "image loaded");
        Ok(pixels)
    }
}

impl std::fmt::Display for ImageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageSource::File(path) => write!(f, "{}", path.display()),
            ImageSource::Url(url) => f.write_str(url),
        }
    }
}

/// Blocking HTTP fetches for startup. The runtime is only built when a
/// remote source is actually read.
#[derive(Default)]
pub struct Fetcher {
    runtime: std::cell::OnceCell<tokio::runtime::Runtime>,
}

impl Fetcher {
    pub fn new() -> Self {
        Self::default()
    }

    fn runtime(&self) -> anyhow::Result<&tokio::runtime::Runtime> {
        if let Some(rt) = self.runtime.get() {
            return Ok(rt);
        }
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("failed to start the fetch runtime")?;
        Ok(self.runtime.get_or_init(|| rt))
    }

    pub fn fetch(&self, url: &str) -> anyhow::Result<Vec<u8>> {
        let rt = self.runtime()?;
        tracing::info!(%url, "fetching image");
        rt.block_on(fetch_bytes(url))
            .with_context(|| format!("failed to fetch {url}"))
    }
}

async fn fetch_bytes(url: &str) -> anyhow::Result<Vec<u8>> {
    let response = reqwest::get(url).await?.error_for_status()?;
    let bytes = response.bytes().await?;
    Ok(bytes.to_vec())
}
