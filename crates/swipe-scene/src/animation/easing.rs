//! Timing curves for the commit animation.
//!
//! The named curves are the usual platform presets; the transition driver
//! defaults to `EaseOut`.
//!
//! ```
//! use swipe_scene::animation::easing::EasingFunction;
//!
//! let curve = EasingFunction::from_name("ease_out").unwrap_or_default();
//! assert!(curve.evaluate(0.5) > 0.5);
//! ```

use serde::{Deserialize, Serialize};

/// Maps linear progress in [0, 1] to eased progress.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EasingFunction {
    Linear,
    /// (0.25, 0.1) (0.25, 1.0)
    Ease,
    /// (0.42, 0.0) (1.0, 1.0)
    EaseIn,
    /// (0.0, 0.0) (0.58, 1.0)
    #[default]
    EaseOut,
    /// (0.42, 0.0) (0.58, 1.0)
    EaseInOut,
}

impl EasingFunction {
    /// Eased value at `t` (clamped).
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::Ease => cubic_bezier(0.25, 0.1, 0.25, 1.0, t),
            Self::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, t),
            Self::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, t),
            Self::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
        }
    }

    /// Look up a named curve (`"linear"`, `"ease"`, `"ease_in"`, `"ease_out"`,
    /// `"ease_in_out"`). Dashes are accepted in place of underscores.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "linear" => Some(Self::Linear),
            "ease" => Some(Self::Ease),
            "ease_in" => Some(Self::EaseIn),
            "ease_out" => Some(Self::EaseOut),
            "ease_in_out" => Some(Self::EaseInOut),
            _ => None,
        }
    }
}

/// Timing curve from (0, 0) to (1, 1) with two control points, kept in
/// polynomial form: `x(t) = ((ax·t + bx)·t + cx)·t`, same for y.
#[derive(Debug, Clone, Copy)]
struct UnitBezier {
    ax: f32,
    bx: f32,
    cx: f32,
    ay: f32,
    by: f32,
    cy: f32,
}

impl UnitBezier {
    fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        let cx = 3.0 * x1;
        let bx = 3.0 * (x2 - x1) - cx;
        let cy = 3.0 * y1;
        let by = 3.0 * (y2 - y1) - cy;
        Self {
            ax: 1.0 - cx - bx,
            bx,
            cx,
            ay: 1.0 - cy - by,
            by,
            cy,
        }
    }

    fn x_at(&self, t: f32) -> f32 {
        ((self.ax * t + self.bx) * t + self.cx) * t
    }

    fn y_at(&self, t: f32) -> f32 {
        ((self.ay * t + self.by) * t + self.cy) * t
    }

    fn dx_at(&self, t: f32) -> f32 {
        (3.0 * self.ax * t + 2.0 * self.bx) * t + self.cx
    }

    /// Curve parameter whose x equals `x`. Newton first; bisection when the
    /// slope flattens out.
    fn solve_t(&self, x: f32) -> f32 {
        let mut t = x;
        for _ in 0..8 {
            let err = self.x_at(t) - x;
            if err.abs() < SOLVE_EPSILON {
                return t;
            }
            let slope = self.dx_at(t);
            if slope.abs() < 1e-6 {
                break;
            }
            t = (t - err / slope).clamp(0.0, 1.0);
        }

        let (mut lo, mut hi) = (0.0f32, 1.0f32);
        t = x;
        for _ in 0..32 {
            let value = self.x_at(t);
            if (value - x).abs() < SOLVE_EPSILON {
                break;
            }
            if value < x {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) * 0.5;
        }
        t
    }
}

const SOLVE_EPSILON: f32 = 1e-6;

fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, progress: f32) -> f32 {
    if progress <= 0.0 {
        return 0.0;
    }
    if progress >= 1.0 {
        return 1.0;
    }
    let curve = UnitBezier::new(x1, y1, x2, y2);
    curve.y_at(curve.solve_t(progress))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_linear() {
        let ease = EasingFunction::Linear;
        assert!(approx_eq(ease.evaluate(0.25), 0.25));
        assert_eq!(ease.evaluate(0.5), 0.5);
    }

    #[test]
    fn test_straight_bezier_is_linear() {
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            assert!(approx_eq(cubic_bezier(1.0 / 3.0, 1.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0, t), t));
        }
    }

    #[test]
    fn test_ease_out() {
        let ease = EasingFunction::EaseOut;
        assert!(approx_eq(ease.evaluate(0.0), 0.0));
        assert!(approx_eq(ease.evaluate(1.0), 1.0));

        // Faster at start, slower at end
        let early = ease.evaluate(0.25);
        let mid = ease.evaluate(0.5);
        assert!(early > 0.25);
        assert!(mid > 0.5);
    }

    #[test]
    fn test_ease_in() {
        let ease = EasingFunction::EaseIn;
        assert!(ease.evaluate(0.25) < 0.25);
        assert!(ease.evaluate(0.5) < 0.5);
    }

    #[test]
    fn test_ease_in_out_symmetry() {
        let ease = EasingFunction::EaseInOut;
        let a = ease.evaluate(0.3);
        let b = ease.evaluate(0.7);
        assert!(approx_eq(a + b, 1.0), "expected symmetry, got {} + {}", a, b);
    }

    #[test]
    fn test_monotonic() {
        for ease in [
            EasingFunction::Ease,
            EasingFunction::EaseIn,
            EasingFunction::EaseOut,
            EasingFunction::EaseInOut,
        ] {
            let mut prev = 0.0;
            for i in 1..=20 {
                let v = ease.evaluate(i as f32 / 20.0);
                assert!(v >= prev - EPSILON, "{:?} not monotonic at step {}", ease, i);
                prev = v;
            }
        }
    }

    #[test]
    fn test_input_clamped() {
        let ease = EasingFunction::EaseOut;
        assert!(approx_eq(ease.evaluate(-1.0), 0.0));
        assert!(approx_eq(ease.evaluate(2.0), 1.0));
    }

    #[test]
    fn test_from_name() {
        assert_eq!(EasingFunction::from_name("ease_out"), Some(EasingFunction::EaseOut));
        assert_eq!(EasingFunction::from_name("Ease-In-Out"), Some(EasingFunction::EaseInOut));
        assert_eq!(EasingFunction::from_name("linear"), Some(EasingFunction::Linear));
        assert_eq!(EasingFunction::from_name("bounce"), None);
    }
}
