//! Error types for the transition engine and navigator.

use thiserror::Error;

use crate::animation::types::AnimationId;
use crate::view::ViewId;

/// Result type for transition operations.
pub type Result<T> = std::result::Result<T, TransitionError>;

/// Reasons a transition did not start. Every one of them resolves to a
/// non-completed transition; none leaves the driver outside `Idle`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransitionError {
    /// Another transition is still in flight.
    #[error("transition already in flight")]
    Conflict,

    /// A screen or the container is not part of the view tree.
    #[error("view {0:?} is not in the view tree")]
    MissingView(ViewId),

    /// The ambient clock is frozen by another interactive transition.
    #[error("animation clock is held by transition {0:?}")]
    ClockBusy(AnimationId),

    /// An interactive operation arrived with no transition running.
    #[error("no interactive transition is active")]
    NoActiveTransition,
}

/// Errors raised by the navigation container.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NavigationError {
    /// `set_pages` needs exactly two pages.
    #[error("expected {expected} pages, got {actual}")]
    PageCount { expected: usize, actual: usize },

    /// A page handed to the navigator is not part of its view tree.
    #[error("page {0:?} is not in the view tree")]
    UnknownPage(ViewId),

    /// Both page slots name the same view.
    #[error("page {0:?} given for both slots")]
    DuplicatePage(ViewId),

    /// The view is one of the navigator's own layers, contains one, or lives
    /// inside the background, tint or indicator layer.
    #[error("view {0:?} belongs to the navigator hierarchy")]
    ReservedView(ViewId),

    /// The page could not be attached to the content container.
    #[error("page {0:?} cannot be attached to the content container")]
    Unattachable(ViewId),

    /// Requested page index does not exist.
    #[error("page index {0} out of range")]
    PageIndex(usize),

    #[error(transparent)]
    Transition(#[from] TransitionError),
}
