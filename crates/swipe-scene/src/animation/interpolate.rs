//! Interpolation system for animatable values.
//!
//! The property animator captures a view's properties before and after the
//! strategy's `animate` step and blends between them with this trait.

use super::types::{Color, Rect};
use crate::view::ViewProps;

/// Trait for types that can be interpolated between two values.
pub trait Interpolate: Sized {
    /// Interpolate between self and another value.
    ///
    /// When t = 0.0, returns self.
    /// When t = 1.0, returns to.
    fn interpolate(&self, to: &Self, t: f32) -> Self;
}

#[inline]
fn lerp_f32(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

impl Interpolate for f32 {
    fn interpolate(&self, to: &Self, t: f32) -> Self {
        lerp_f32(*self, *to, t)
    }
}

impl Interpolate for Color {
    /// Per-component interpolation, alpha included.
    fn interpolate(&self, to: &Self, t: f32) -> Self {
        Self {
            r: lerp_f32(self.r, to.r, t),
            g: lerp_f32(self.g, to.g, t),
            b: lerp_f32(self.b, to.b, t),
            a: lerp_f32(self.a, to.a, t),
        }
    }
}

impl Interpolate for Rect {
    fn interpolate(&self, to: &Self, t: f32) -> Self {
        Self {
            x: lerp_f32(self.x, to.x, t),
            y: lerp_f32(self.y, to.y, t),
            w: lerp_f32(self.w, to.w, t),
            h: lerp_f32(self.h, to.h, t),
        }
    }
}

impl Interpolate for ViewProps {
    fn interpolate(&self, to: &Self, t: f32) -> Self {
        // Exact endpoints keep the captured values bit-for-bit.
        if t <= 0.0 {
            return *self;
        }
        if t >= 1.0 {
            return *to;
        }
        Self {
            frame: self.frame.interpolate(&to.frame, t),
            alpha: self.alpha.interpolate(&to.alpha, t),
            transform: self.transform.interpolate(&to.transform, t),
            background: self.background.interpolate(&to.background, t),
        }
    }
}
