//! 2D affine transform applied to a view on top of its frame.
//!
//! The transition decorations only ever translate, but the full matrix is
//! stored so a view's transform snapshots and interpolates as one value.
//!
//! ```text
//! | a  c  tx |
//! | b  d  ty |
//! | 0  0  1  |
//! ```

use serde::{Deserialize, Serialize};

use super::interpolate::Interpolate;

/// A 2D affine transformation matrix (bottom row implicit).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform2D {
    /// Scale X (matrix element a)
    pub a: f32,
    /// Skew Y (matrix element b)
    pub b: f32,
    /// Skew X (matrix element c)
    pub c: f32,
    /// Scale Y (matrix element d)
    pub d: f32,
    /// Translate X
    pub tx: f32,
    /// Translate Y
    pub ty: f32,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform2D {
    /// Create an identity transform (no change).
    pub const fn identity() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            tx: 0.0,
            ty: 0.0,
        }
    }

    /// Create a translation transform.
    pub const fn translate(tx: f32, ty: f32) -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            tx,
            ty,
        }
    }

}

impl Interpolate for Transform2D {
    /// Component-wise interpolation. Exact for pure translations.
    fn interpolate(&self, to: &Self, t: f32) -> Self {
        Self {
            a: self.a.interpolate(&to.a, t),
            b: self.b.interpolate(&to.b, t),
            c: self.c.interpolate(&to.c, t),
            d: self.d.interpolate(&to.d, t),
            tx: self.tx.interpolate(&to.tx, t),
            ty: self.ty.interpolate(&to.ty, t),
        }
    }
}
