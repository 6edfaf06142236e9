//! Pan/zoom/blend view state and the coordinate model.
//!
//! Three spaces are in play:
//!   window: logical pixels reported by the windowing system
//!   framebuffer: physical pixels (window × device pixel scale)
//!   texture: image pixels, origin at the image's top-left corner
//!
//! Pan lives in texture space, so `framebuffer = (texture + pan) · zoom`.

use crate::transform::Affine2;

/// Smallest zoom factor reachable through zoom steps (1/256).
pub const MIN_ZOOM: f32 = 1.0 / 256.0;
/// Largest zoom factor reachable through zoom steps.
pub const MAX_ZOOM: f32 = 256.0;

/// Owned view state, mutated only by input handling and read every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    pub pan_x: f32,
    pub pan_y: f32,
    pub zoom: f32,
    pub device_pixel_scale: f32,
    pub blend: f32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            pan_x: 0.0,
            pan_y: 0.0,
            zoom: 1.0,
            device_pixel_scale: 1.0,
            blend: 1.0,
        }
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Coordinate conversion ────────────────────────────────────

    pub fn window_to_framebuffer(&self, x: f32, y: f32) -> (f32, f32) {
        (x * self.device_pixel_scale, y * self.device_pixel_scale)
    }

    pub fn framebuffer_to_texture(&self, x: f32, y: f32) -> (f32, f32) {
        (x / self.zoom - self.pan_x, y / self.zoom - self.pan_y)
    }

    pub fn texture_to_framebuffer(&self, x: f32, y: f32) -> (f32, f32) {
        ((x + self.pan_x) * self.zoom, (y + self.pan_y) * self.zoom)
    }

    /// Updates the device pixel scale. Non-positive or non-finite values are ignored.
    pub fn set_device_pixel_scale(&mut self, scale: f32) {
        if scale.is_finite() && scale > 0.0 {
            self.device_pixel_scale = scale;
        }
    }

    // ── Zoom ─────────────────────────────────────────────────────

    /// Doubles zoom, keeping the texture point under `(fx, fy)` fixed.
    /// Returns false when the zoom limit was reached and nothing changed.
    pub fn zoom_in_at(&mut self, fx: f32, fy: f32) -> bool {
        let next = self.zoom * 2.0;
        if next > MAX_ZOOM {
            return false;
        }
        self.zoom = next;
        self.pan_x -= fx / self.zoom;
        self.pan_y -= fy / self.zoom;
        true
    }

    /// Halves zoom, keeping the texture point under `(fx, fy)` fixed.
    pub fn zoom_out_at(&mut self, fx: f32, fy: f32) -> bool {
        let next = self.zoom / 2.0;
        if next < MIN_ZOOM {
            return false;
        }
        self.pan_x += fx / self.zoom;
        self.pan_y += fy / self.zoom;
        self.zoom = next;
        true
    }

    /// Doubles zoom about the framebuffer origin.
    pub fn zoom_in(&mut self) -> bool {
        if self.zoom * 2.0 > MAX_ZOOM {
            return false;
        }
        self.zoom *= 2.0;
        true
    }

    /// Halves zoom about the framebuffer origin.
    pub fn zoom_out(&mut self) -> bool {
        if self.zoom / 2.0 < MIN_ZOOM {
            return false;
        }
        self.zoom /= 2.0;
        true
    }

    // ── Pan ──────────────────────────────────────────────────────

    /// Applies a framebuffer-space drag delta.
    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        self.pan_x += dx / self.zoom;
        self.pan_y += dy / self.zoom;
    }

    // ── Blend ────────────────────────────────────────────────────

    pub fn set_blend(&mut self, blend: f32) {
        self.blend = if blend.is_nan() { 0.0 } else { blend.clamp(0.0, 1.0) };
    }

    pub fn nudge_blend(&mut self, delta: f32) {
        self.set_blend(self.blend + delta);
    }

    // ── Reset ────────────────────────────────────────────────────

    /// Restores zoom 1, pan 0 and blend 1. The device pixel scale is kept.
    pub fn reset(&mut self) {
        self.pan_x = 0.0;
        self.pan_y = 0.0;
        self.zoom = 1.0;
        self.blend = 1.0;
    }

    // ── Transforms ───────────────────────────────────────────────

    /// Texture space → clip space, given the framebuffer viewport transform.
    pub fn model_view(&self, viewport: &Affine2) -> Affine2 {
        viewport
            .scale(self.zoom, self.zoom)
            .translate(self.pan_x, self.pan_y)
    }
}
