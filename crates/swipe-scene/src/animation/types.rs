//! Core animation types and data structures.
//!
//! This module defines the fundamental types for the transition engine:
//! - `AnimationId`: Unique identifier for a transition attempt
//! - `TransitionDirection`: Sign of the horizontal displacement
//! - `AnimationPhase`: Lifecycle of the transition driver
//! - `AnimationState`: State of a single property animator
//! - `Point`, `Rect`, `Color`: Plain geometry and color values

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for a transition instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnimationId(pub u64);

impl AnimationId {
    /// Generate a new unique animation ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for AnimationId {
    fn default() -> Self {
        Self::new()
    }
}

/// Direction of a screen transition.
///
/// The direction is the sign of the horizontal displacement applied to the
/// outgoing screen. A right-to-left swipe (negative velocity) moves content
/// toward -x and is therefore `Backward`; it reveals the right-hand page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionDirection {
    /// Outgoing screen moves toward +x.
    #[default]
    Forward,
    /// Outgoing screen moves toward -x.
    Backward,
}

impl TransitionDirection {
    /// Direction recorded for a swipe with the given horizontal velocity.
    pub fn from_velocity(velocity_x: f32) -> Self {
        if velocity_x < 0.0 {
            Self::Backward
        } else {
            Self::Forward
        }
    }

    /// Sign of the displacement: `1.0` for `Forward`, `-1.0` for `Backward`.
    pub fn sign(self) -> f32 {
        match self {
            Self::Forward => 1.0,
            Self::Backward => -1.0,
        }
    }
}

/// Lifecycle of the transition driver.
///
/// Transitions move `Idle → Preparing → InFlight → Finalizing → Idle`.
/// A new transition is only accepted while `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationPhase {
    /// No transition is running.
    #[default]
    Idle,
    /// Hierarchy and start state are being set up.
    Preparing,
    /// The commit animation is running or being scrubbed.
    InFlight,
    /// Views are being detached and decoration settled.
    Finalizing,
}

impl AnimationPhase {
    /// Returns true when a new transition must be rejected.
    pub fn is_busy(self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Current state of a property animator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationState {
    /// Animator is advancing (or being scrubbed).
    #[default]
    Running,
    /// Animator reached its end values.
    Finished,
    /// Animator was stopped and jumped back to its start values.
    Cancelled,
}

/// A point or vector in container coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rect at the origin with the given size.
    pub fn from_size(w: f32, h: f32) -> Self {
        Self { x: 0.0, y: 0.0, w, h }
    }

    /// Same size, origin moved by `(dx, dy)`.
    pub fn offset_by(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Same size, origin reset to zero.
    pub fn bounds(&self) -> Self {
        Self::from_size(self.w, self.h)
    }
}

/// RGBA color with straight (non-premultiplied) alpha.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const CLEAR: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_array(rgba: [f32; 4]) -> Self {
        Self::rgba(rgba[0], rgba[1], rgba[2], rgba[3])
    }

    /// Same color with a different alpha component.
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}
