//! Animated transition driver.
//!
//! Owns one commit animation at a time. Running a transition:
//!
//! ```text
//! Idle ──run──► Preparing ──► InFlight ──(natural end | forced stop)──► Finalizing ──► Idle
//!  ▲                                                                              │
//!  └──────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A request that arrives outside `Idle` is rejected on the spot: the new
//! context settles as not completed and the transition in flight is left
//! alone. Finalization runs exactly once per accepted transition, whichever
//! of the natural end or the forced stop gets there first.

use tracing::{debug, warn};

use super::animator::PropertyAnimator;
use super::clock::AnimationClock;
use super::context::TransitionContext;
use super::easing::EasingFunction;
use super::events::{EventQueue, TransitionEvent};
use super::strategy::TransitionAnimation;
use super::types::{AnimationId, AnimationPhase};
use crate::error::{Result, TransitionError};
use crate::view::ViewTree;

/// Default length of the commit animation, in seconds.
pub const DEFAULT_TRANSITION_DURATION: f64 = 0.33;

#[derive(Debug)]
struct ActiveTransition {
    context: TransitionContext,
    animator: PropertyAnimator,
}

/// Runs a transition's commit animation with a pluggable strategy.
#[derive(Debug)]
pub struct AnimatedTransitioning {
    duration: f64,
    easing: EasingFunction,
    animation: Box<dyn TransitionAnimation>,
    phase: AnimationPhase,
    active: Option<ActiveTransition>,
    clock: AnimationClock,
    events: EventQueue,
}

impl AnimatedTransitioning {
    pub fn new(duration: f64, animation: Box<dyn TransitionAnimation>) -> Self {
        Self {
            duration: duration.max(0.0),
            easing: EasingFunction::EaseOut,
            animation,
            phase: AnimationPhase::Idle,
            active: None,
            clock: AnimationClock::new(),
            events: EventQueue::new(),
        }
    }

    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    /// Swap the strategy used by the next transition.
    pub fn set_animation(&mut self, animation: Box<dyn TransitionAnimation>) {
        self.animation = animation;
    }

    pub fn animation(&self) -> &dyn TransitionAnimation {
        self.animation.as_ref()
    }

    /// Length of the commit animation for `context`; zero when the
    /// transition is not animated.
    pub fn transition_duration(&self, context: &TransitionContext) -> f64 {
        if context.is_animated() {
            self.duration
        } else {
            0.0
        }
    }

    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    pub fn is_in_flight(&self) -> bool {
        self.phase == AnimationPhase::InFlight
    }

    pub fn context(&self) -> Option<&TransitionContext> {
        self.active.as_ref().map(|a| &a.context)
    }

    pub(crate) fn context_mut(&mut self) -> Option<&mut TransitionContext> {
        self.active.as_mut().map(|a| &mut a.context)
    }

    /// Local time of the running commit animation, in seconds.
    pub fn elapsed(&self) -> Option<f64> {
        self.active.as_ref().map(|a| a.animator.elapsed())
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut AnimationClock {
        &mut self.clock
    }

    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<TransitionEvent> {
        self.events.drain().collect()
    }

    /// Start `context`'s transition.
    ///
    /// Rejected requests settle immediately as not completed and return the
    /// reason. A zero-length transition settles before this returns.
    pub fn run(
        &mut self,
        context: TransitionContext,
        tree: &mut ViewTree,
    ) -> Result<AnimationId> {
        if self.phase.is_busy() {
            warn!(transition = context.id().0, phase = ?self.phase, "rejecting transition: another one is in flight");
            self.reject(&context);
            return Err(TransitionError::Conflict);
        }
        for view in [context.from_view(), context.to_view(), context.container()] {
            if !tree.contains(view) {
                warn!(transition = context.id().0, view = view.0, "rejecting transition: missing view");
                self.reject(&context);
                return Err(TransitionError::MissingView(view));
            }
        }

        let id = context.id();
        self.phase = AnimationPhase::Preparing;

        let (from, to, container) = (context.from_view(), context.to_view(), context.container());
        tree.end_editing(from);
        self.animation.setup_hierarchy(tree, &context);
        if let Some(bounds) = tree.bounds(container) {
            tree.set_frame(to, bounds);
        }
        self.animation.prepare(tree, &context);

        let before = tree.snapshot();
        self.animation.animate(tree, &context);
        let after = tree.snapshot();
        let mut animator = PropertyAnimator::capture(
            &before,
            &after,
            self.transition_duration(&context),
            self.easing,
        );

        debug!(
            transition = id.0,
            direction = ?context.direction(),
            interactive = context.is_interactive(),
            duration = animator.duration(),
            "transition started"
        );
        self.events.push(TransitionEvent::Started {
            transition_id: id,
            from,
            to,
            direction: context.direction(),
            interactive: context.is_interactive(),
        });

        self.phase = AnimationPhase::InFlight;
        let done = animator.start(tree);
        self.active = Some(ActiveTransition { context, animator });
        if done {
            self.finished_transition(tree);
        }
        Ok(id)
    }

    /// Natural playback. Does nothing while the clock is frozen.
    pub fn tick(&mut self, dt: f64, tree: &mut ViewTree) {
        if self.phase != AnimationPhase::InFlight || self.clock.is_frozen() {
            return;
        }
        let reached_end = match self.active.as_mut() {
            Some(active) => active.animator.advance(dt, tree),
            None => false,
        };
        if reached_end {
            self.finished_transition(tree);
        }
    }

    /// Scrub the frozen animation to `offset` seconds.
    pub fn set_time_offset(&mut self, offset: f64, tree: &mut ViewTree) {
        self.clock.set_time_offset(offset);
        if let Some(active) = self.active.as_mut() {
            active.animator.seek(offset, tree);
        }
    }

    /// Continue natural playback from `offset` seconds, so the animation
    /// picks up where the scrubbed state left it.
    pub fn rebase(&mut self, offset: f64, tree: &mut ViewTree) {
        if let Some(active) = self.active.as_mut() {
            active.animator.seek(offset, tree);
        }
    }

    /// Called once the owner has decided the outcome. A non-completed
    /// transition is stopped, jumped back to its start state and finalized
    /// right away; a completed one is left to finish naturally.
    pub fn animation_ended(&mut self, completed: bool, tree: &mut ViewTree) {
        if completed || self.phase != AnimationPhase::InFlight {
            return;
        }
        if let Some(active) = self.active.as_mut() {
            active.context.cancel_interactive();
            active.animator.stop_at_start(tree);
        }
        self.finished_transition(tree);
    }

    fn finished_transition(&mut self, tree: &mut ViewTree) {
        let Some(active) = self.active.take() else {
            return;
        };
        self.phase = AnimationPhase::Finalizing;

        let context = active.context;
        let completed = !context.was_cancelled();
        if completed {
            tree.remove_from_superview(context.from_view());
        } else {
            tree.remove_from_superview(context.to_view());
        }
        self.animation.finalize(tree, &context, completed);

        debug!(transition = context.id().0, completed, "transition settled");
        self.events.push(TransitionEvent::Settled {
            transition_id: context.id(),
            from: context.from_view(),
            to: context.to_view(),
            completed,
        });
        self.phase = AnimationPhase::Idle;
    }

    /// Settle a context that never ran.
    pub(crate) fn reject(&mut self, context: &TransitionContext) {
        self.events.push(TransitionEvent::Settled {
            transition_id: context.id(),
            from: context.from_view(),
            to: context.to_view(),
            completed: false,
        });
    }
}
