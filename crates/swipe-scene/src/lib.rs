//! Swipeable two-page navigation with interactive, cancelable transitions.

pub mod animation;
pub mod error;
pub mod navigation;
pub mod view;

pub use animation::{
    AnimatedTransitioning, GesturePhase, GestureSample, PercentDrivenInteractiveTransition, Point, Rect,
    SwipeInteractor, TransitionContext, TransitionDirection, TransitionEvent, TransitionHost,
};
pub use error::{NavigationError, TransitionError};
pub use navigation::{PageStack, SwipeNavigator};
pub use view::{ViewId, ViewProps, ViewTree};
