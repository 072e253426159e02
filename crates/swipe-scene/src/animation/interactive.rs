//! Percent-driven interactive transitions.
//!
//! The controller freezes the driver's clock before the commit animation
//! starts, then scrubs it with [`update`](PercentDrivenInteractiveTransition::update).
//! When the gesture ends, [`finish`](PercentDrivenInteractiveTransition::finish)
//! or [`cancel`](PercentDrivenInteractiveTransition::cancel) plays progress
//! toward one end of the timeline on the display link. Once it gets there
//! the clock is released, exactly once, and the driver is told the outcome.

use tracing::{debug, trace, warn};

use super::clock::DisplayLink;
use super::context::TransitionContext;
use super::driver::AnimatedTransitioning;
use super::events::TransitionEvent;
use super::progress::{AnimationProgress, PlaybackTarget, ProgressStep};
use super::types::AnimationId;
use crate::error::{Result, TransitionError};
use crate::view::ViewTree;

/// Scrubbable wrapper around [`AnimatedTransitioning`].
#[derive(Debug)]
pub struct PercentDrivenInteractiveTransition {
    driver: AnimatedTransitioning,
    transition: Option<AnimationId>,
    progress: AnimationProgress,
    display_link: DisplayLink,
    completion_speed: f64,
}

impl PercentDrivenInteractiveTransition {
    pub fn new(driver: AnimatedTransitioning) -> Self {
        Self {
            driver,
            transition: None,
            progress: AnimationProgress::default(),
            display_link: DisplayLink::default(),
            completion_speed: 1.0,
        }
    }

    pub fn with_frame_interval(mut self, frame_interval: f64) -> Self {
        self.display_link = DisplayLink::new(frame_interval);
        self
    }

    /// Playback rate for cancel/finish. Non-positive values fall back to 1.
    pub fn with_completion_speed(mut self, speed: f64) -> Self {
        self.set_completion_speed(speed);
        self
    }

    pub fn set_completion_speed(&mut self, speed: f64) {
        self.completion_speed = if speed > 0.0 && speed.is_finite() { speed } else { 1.0 };
    }

    pub fn completion_speed(&self) -> f64 {
        self.completion_speed
    }

    pub fn driver(&self) -> &AnimatedTransitioning {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut AnimatedTransitioning {
        &mut self.driver
    }

    /// True from `begin` until the transition settles.
    pub fn is_active(&self) -> bool {
        self.transition.is_some()
    }

    pub fn transition_id(&self) -> Option<AnimationId> {
        self.transition
    }

    pub fn is_playing_back(&self) -> bool {
        self.display_link.is_running()
    }

    /// Fraction last applied, in [0, 1].
    pub fn percent_complete(&self) -> f64 {
        if self.transition.is_some() {
            self.progress.fraction()
        } else {
            0.0
        }
    }

    /// Seconds into the commit animation the transition is paused at.
    pub fn time_offset(&self) -> f64 {
        self.progress.offset()
    }

    pub fn duration(&self) -> f64 {
        self.progress.duration()
    }

    /// Freeze the clock and start `context` under it.
    ///
    /// A zero-length transition settles before this returns and leaves the
    /// controller inactive.
    pub fn begin(&mut self, context: TransitionContext, tree: &mut ViewTree) -> Result<AnimationId> {
        let context = context.with_interactive(true);
        let id = context.id();

        if self.transition.is_some() {
            warn!(transition = id.0, "interactive transition already active");
            self.driver.reject(&context);
            return Err(TransitionError::Conflict);
        }
        if let Err(e) = self.driver.clock_mut().freeze(id) {
            warn!(transition = id.0, error = %e, "cannot freeze animation clock");
            self.driver.reject(&context);
            return Err(e);
        }

        let duration = self.driver.transition_duration(&context);
        match self.driver.run(context, tree) {
            Ok(id) if self.driver.is_in_flight() => {
                debug!(transition = id.0, duration, "interactive transition began");
                self.transition = Some(id);
                self.progress = AnimationProgress::new(duration);
                Ok(id)
            }
            Ok(id) => {
                // Settled synchronously
                self.driver.clock_mut().release(id);
                Ok(id)
            }
            Err(e) => {
                self.driver.clock_mut().release(id);
                Err(e)
            }
        }
    }

    /// Scrub to `fraction` (clamped to [0, 1]). Ignored once cancel/finish
    /// playback has started.
    pub fn update(&mut self, fraction: f64, tree: &mut ViewTree) {
        if self.transition.is_none() || self.progress.is_playing() {
            return;
        }
        let offset = self.progress.set_progress(fraction);
        trace!(fraction, offset, "interactive update");
        self.driver.set_time_offset(offset, tree);
        let percent = self.progress.fraction() as f32;
        if let Some(ctx) = self.driver.context_mut() {
            ctx.update_interactive(percent);
        }
    }

    /// Play back to the start and settle as not completed.
    pub fn cancel(&mut self, tree: &mut ViewTree) -> Result<()> {
        self.settle_toward(PlaybackTarget::Start, tree)
    }

    /// Play forward to the end and settle as completed.
    pub fn finish(&mut self, tree: &mut ViewTree) -> Result<()> {
        self.settle_toward(PlaybackTarget::End, tree)
    }

    fn settle_toward(&mut self, target: PlaybackTarget, tree: &mut ViewTree) -> Result<()> {
        if self.transition.is_none() {
            return Err(TransitionError::NoActiveTransition);
        }
        if self.progress.is_playing() {
            // Already heading to an end; the first decision stands.
            return Ok(());
        }
        if let Some(ctx) = self.driver.context_mut() {
            match target {
                PlaybackTarget::Start => ctx.cancel_interactive(),
                PlaybackTarget::End => ctx.finish_interactive(),
            }
        }
        debug!(?target, offset = self.progress.offset(), "interactive playback");

        if self.progress.duration() <= 0.0 {
            self.transition_finished(target, tree);
            return Ok(());
        }
        self.progress.play_toward(target, self.completion_speed);
        self.display_link.start();
        Ok(())
    }

    /// Feed `dt` seconds of wall time: steps cancel/finish playback once per
    /// display link frame, then advances any natural playback in the driver.
    pub fn tick(&mut self, dt: f64, tree: &mut ViewTree) {
        let frames = self.display_link.advance(dt);
        let step = self.display_link.frame_interval();
        for _ in 0..frames {
            match self.progress.step(step) {
                ProgressStep::Moved(offset) => self.driver.set_time_offset(offset, tree),
                ProgressStep::Reached(target) => {
                    self.transition_finished(target, tree);
                    break;
                }
                ProgressStep::Idle => break,
            }
        }
        self.driver.tick(dt, tree);
    }

    fn transition_finished(&mut self, target: PlaybackTarget, tree: &mut ViewTree) {
        self.display_link.invalidate();
        let Some(id) = self.transition.take() else {
            return;
        };
        let paused = self.driver.clock_mut().release(id).unwrap_or(self.progress.offset());
        let completed = target == PlaybackTarget::End;
        debug!(transition = id.0, completed, paused, "interactive playback reached end");
        if completed {
            self.driver.rebase(paused, tree);
        }
        self.driver.animation_ended(completed, tree);
    }

    pub fn drain_events(&mut self) -> Vec<TransitionEvent> {
        self.driver.drain_events()
    }
}
