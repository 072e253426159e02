//! Transition lifecycle events.
//!
//! The driver pushes a `Started` event for every transition it accepts and
//! exactly one `Settled` event for every transition it is asked to run,
//! including rejected ones. Owners poll the queue after feeding input or
//! advancing a frame.
//!
//! # Usage
//!
//! ```ignore
//! navigator.handle_pan(sample);
//! navigator.advance(1.0 / 60.0);
//!
//! for event in driver.drain_events() {
//!     if let TransitionEvent::Settled { from, to, completed, .. } = event {
//!         host.on_transition_settled(from, to, completed, &mut tree);
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::types::{AnimationId, TransitionDirection};
use crate::view::ViewId;

/// Event emitted when a transition changes state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransitionEvent {
    /// The driver accepted the transition and started its animation.
    Started {
        transition_id: AnimationId,
        from: ViewId,
        to: ViewId,
        direction: TransitionDirection,
        interactive: bool,
    },
    /// The transition is over. `completed` is false for cancelled and
    /// rejected attempts.
    Settled {
        transition_id: AnimationId,
        from: ViewId,
        to: ViewId,
        completed: bool,
    },
}

impl TransitionEvent {
    /// Get the transition ID for this event.
    pub fn transition_id(&self) -> AnimationId {
        match self {
            Self::Started { transition_id, .. } | Self::Settled { transition_id, .. } => {
                *transition_id
            }
        }
    }

    /// Outgoing and incoming screens.
    pub fn views(&self) -> (ViewId, ViewId) {
        match self {
            Self::Started { from, to, .. } | Self::Settled { from, to, .. } => (*from, *to),
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Settled { .. })
    }

    /// `Some(completed)` for settle events.
    pub fn completed(&self) -> Option<bool> {
        match self {
            Self::Settled { completed, .. } => Some(*completed),
            Self::Started { .. } => None,
        }
    }
}

/// Queue for collecting transition events between polls.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<TransitionEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: TransitionEvent) {
        self.events.push_back(event);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn pop(&mut self) -> Option<TransitionEvent> {
        self.events.pop_front()
    }

    /// Drain all events from the queue, returning an iterator.
    pub fn drain(&mut self) -> impl Iterator<Item = TransitionEvent> + '_ {
        self.events.drain(..)
    }
}
