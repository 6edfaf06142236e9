//! Decoded pixel buffers and the image pair being compared.

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 8-bit RGBA, non-premultiplied.
    Rgba8,
    /// 8-bit single channel (glyph atlases).
    Gray8,
}

impl PixelFormat {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Rgba8 => 4,
            PixelFormat::Gray8 => 1,
        }
    }
}

/// Tightly packed pixel rows, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    stride: usize,
    format: PixelFormat,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wraps raw pixel rows. Padded rows are rejected.
    pub fn new(
        width: u32,
        height: u32,
        stride: usize,
        format: PixelFormat,
        data: Vec<u8>,
    ) -> Result<Self, CoreError> {
        let bytes_per_pixel = format.bytes_per_pixel();
        if stride != width as usize * bytes_per_pixel {
            return Err(CoreError::UnsupportedStride {
                stride,
                width,
                bytes_per_pixel,
            });
        }
        let expected = stride * height as usize;
        if data.len() != expected {
            return Err(CoreError::PixelDataSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            stride,
            format,
            data,
        })
    }

    /// Decodes any supported image format into RGBA8.
    pub fn decode_rgba(bytes: &[u8]) -> Result<Self, CoreError> {
        let rgba = image::load_from_memory(bytes)?.into_rgba8();
        let (width, height) = rgba.dimensions();
        Self::new(width, height, width as usize * 4, PixelFormat::Rgba8, rgba.into_raw())
    }

    /// Decodes any supported image format into 8-bit gray.
    pub fn decode_gray(bytes: &[u8]) -> Result<Self, CoreError> {
        let gray = image::load_from_memory(bytes)?.into_luma8();
        let (width, height) = gray.dimensions();
        Self::new(width, height, width as usize, PixelFormat::Gray8, gray.into_raw())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// RGBA of the pixel at integer coordinates. Gray pixels are expanded.
    pub fn rgba_at(&self, x: i64, y: i64) -> Option<[u8; 4]> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        let bpp = self.format.bytes_per_pixel();
        let at = y as usize * self.stride + x as usize * bpp;
        match self.format {
            PixelFormat::Rgba8 => {
                let px = &self.data[at..at + 4];
                Some([px[0], px[1], px[2], px[3]])
            }
            PixelFormat::Gray8 => {
                let g = self.data[at];
                Some([g, g, g, 255])
            }
        }
    }
}

/// Result of probing the displayed image under the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Probe {
    pub x: i64,
    pub y: i64,
    /// `None` when the point lies outside the image.
    pub rgba: Option<[u8; 4]>,
    /// Which image was sampled: 'A' or 'B'.
    pub source: char,
}

/// Image A plus an optional image B. Having B means diff mode.
#[derive(Debug, Clone)]
pub struct ImagePair {
    pub a: PixelBuffer,
    pub b: Option<PixelBuffer>,
}

impl ImagePair {
    pub fn single(a: PixelBuffer) -> Self {
        Self { a, b: None }
    }

    pub fn diff(a: PixelBuffer, b: PixelBuffer) -> Self {
        Self { a, b: Some(b) }
    }

    pub fn is_diff(&self) -> bool {
        self.b.is_some()
    }

    /// True for a single image, or when both images share dimensions.
    pub fn dimensions_match(&self) -> bool {
        self.b
            .as_ref()
            .is_none_or(|b| b.dimensions() == self.a.dimensions())
    }

    /// Samples the image currently on screen at texture coordinates.
    ///
    /// Coordinates round to the nearest pixel with `floor(x + 0.5)`. In diff
    /// mode, blend 0 shows A and anything else samples B.
    pub fn probe(&self, tex_x: f32, tex_y: f32, blend: f32) -> Probe {
        let x = (tex_x + 0.5).floor() as i64;
        let y = (tex_y + 0.5).floor() as i64;

        let (image, source) = match &self.b {
            Some(b) if blend != 0.0 => (b, 'B'),
            _ => (&self.a, 'A'),
        };

        Probe {
            x,
            y,
            rgba: image.rgba_at(x, y),
            source,
        }
    }
}
