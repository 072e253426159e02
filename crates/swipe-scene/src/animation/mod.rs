//! Interactive screen transitions.
//!
//! This module provides:
//! - **Geometry**: start and end frames for both screens of a transition
//! - **Strategies**: how screens are stacked, moved and decorated
//! - **Driver**: runs one commit animation at a time and settles it once
//! - **Interactive controller**: scrubs a frozen animation and plays it out
//! - **Gesture adapter**: edge-pan samples to controller calls
//!
//! # Architecture
//!
//! ```text
//! SwipeInteractor (gesture phases, thresholds)
//!   └── PercentDrivenInteractiveTransition (progress, display link)
//!         └── AnimatedTransitioning (phase guard, clock, events)
//!               ├── TransitionAnimation (overlap / navigation)
//!               └── PropertyAnimator (snapshot interpolation)
//! ```

pub mod animator;
pub mod clock;
pub mod context;
pub mod driver;
pub mod easing;
pub mod events;
pub mod geometry;
pub mod gesture;
pub mod interactive;
pub mod interpolate;
pub mod progress;
pub mod strategy;
pub mod transform;
pub mod types;

pub use animator::PropertyAnimator;
pub use clock::{AnimationClock, DisplayLink};
pub use context::TransitionContext;
pub use driver::{AnimatedTransitioning, DEFAULT_TRANSITION_DURATION};
pub use easing::EasingFunction;
pub use events::{EventQueue, TransitionEvent};
pub use geometry::{frames, TransitionFrames};
pub use gesture::{
    EdgePanRecognizer, GesturePhase, GestureSample, GestureThresholds, InteractionState, ScreenEdge,
    SwipeInteractor, TransitionHost,
};
pub use interactive::PercentDrivenInteractiveTransition;
pub use interpolate::Interpolate;
pub use progress::{AnimationProgress, PlaybackTarget, ProgressStep};
pub use strategy::{DecorationState, NavigationAnimation, OverlapAnimation, TransitionAnimation};
pub use transform::Transform2D;
pub use types::{AnimationId, AnimationPhase, AnimationState, Color, Point, Rect, TransitionDirection};
