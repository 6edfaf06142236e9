//! 2D affine transforms.
//!
//! Stored as six scalars in the row-vector layout the shaders consume:
//!
//! ```text
//! x' = a·x + c·y + e
//! y' = b·x + d·y + f
//! ```
//!
//! `translate` and `scale` apply in the transform's local space, so
//! `base.scale(z, z).translate(px, py)` first offsets a point by `(px, py)`,
//! then zooms it, then hands it to `base`.

/// Immutable 2D affine transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine2 {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Default for Affine2 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Affine2 {
    pub const fn new(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Self { a, b, c, d, e, f }
    }

    pub const fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    /// Maps framebuffer pixels (origin top-left, y down) to clip space.
    pub fn viewport(width: f32, height: f32) -> Self {
        Self::identity()
            .translate(-1.0, 1.0)
            .scale(2.0 / width, -2.0 / height)
    }

    /// Returns the transform that applies `self` first, then `then`.
    pub fn concat(&self, then: &Affine2) -> Self {
        Self {
            a: self.a * then.a + self.b * then.c,
            b: self.a * then.b + self.b * then.d,
            c: self.c * then.a + self.d * then.c,
            d: self.c * then.b + self.d * then.d,
            e: self.e * then.a + self.f * then.c + then.e,
            f: self.e * then.b + self.f * then.d + then.f,
        }
    }

    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self {
            e: self.e + dx * self.a + dy * self.c,
            f: self.f + dx * self.b + dy * self.d,
            ..*self
        }
    }

    pub fn scale(&self, sx: f32, sy: f32) -> Self {
        Self {
            a: self.a * sx,
            b: self.b * sx,
            c: self.c * sy,
            d: self.d * sy,
            ..*self
        }
    }

    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    /// Column-major 4×4 matrix for uniform upload.
    pub fn to_upload_matrix(&self) -> [f32; 16] {
        [
            self.a, self.b, 0.0, 0.0, //
            self.c, self.d, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            self.e, self.f, 0.0, 1.0,
        ]
    }
}
