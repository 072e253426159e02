//! Property animator for the commit animation.
//!
//! Built from two snapshots of the view tree, taken before and after a
//! strategy writes its end values. Every view whose properties differ gets a
//! track; the animator blends each track by the eased fraction of its local
//! time.

use super::easing::EasingFunction;
use super::interpolate::Interpolate;
use super::types::AnimationState;
use crate::view::{ViewId, ViewProps, ViewTree};

#[derive(Debug, Clone, PartialEq)]
struct PropertyTrack {
    view: ViewId,
    from: ViewProps,
    to: ViewProps,
}

/// Time-based interpolation of view properties between two snapshots.
#[derive(Debug, Clone)]
pub struct PropertyAnimator {
    tracks: Vec<PropertyTrack>,
    /// Seconds.
    duration: f64,
    /// Seconds of local time, in [0, duration].
    elapsed: f64,
    easing: EasingFunction,
    state: AnimationState,
}

impl PropertyAnimator {
    /// Create an animator from before/after snapshots (indexed by view id).
    pub fn capture(before: &[ViewProps], after: &[ViewProps], duration: f64, easing: EasingFunction) -> Self {
        let tracks = before
            .iter()
            .zip(after.iter())
            .enumerate()
            .filter(|(_, (from, to))| from != to)
            .map(|(index, (from, to))| PropertyTrack {
                view: ViewId(index as u32),
                from: *from,
                to: *to,
            })
            .collect();

        Self {
            tracks,
            duration: duration.max(0.0),
            elapsed: 0.0,
            easing,
            state: AnimationState::Running,
        }
    }

    /// Views this animator moves.
    pub fn animated_views(&self) -> impl Iterator<Item = ViewId> + '_ {
        self.tracks.iter().map(|t| t.view)
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == AnimationState::Running
    }

    /// Linear fraction of local time, in [0, 1]. A zero-length animator is
    /// always complete.
    pub fn fraction_complete(&self) -> f32 {
        if self.duration > 0.0 {
            (self.elapsed / self.duration).clamp(0.0, 1.0) as f32
        } else {
            1.0
        }
    }

    /// Apply the start values. A zero-length animator jumps straight to its
    /// end values and finishes; the return value says whether it did.
    pub fn start(&mut self, tree: &mut ViewTree) -> bool {
        self.elapsed = 0.0;
        if self.duration <= 0.0 {
            self.finish_at_end(tree);
            return true;
        }
        self.apply(tree);
        false
    }

    /// Move local time to `time` (clamped) and apply. Never finishes the
    /// animator.
    pub fn seek(&mut self, time: f64, tree: &mut ViewTree) {
        if !self.is_running() {
            return;
        }
        self.elapsed = time.clamp(0.0, self.duration);
        self.apply(tree);
    }

    /// Advance local time by `dt` seconds. Returns true on the call that
    /// reaches the end.
    pub fn advance(&mut self, dt: f64, tree: &mut ViewTree) -> bool {
        if !self.is_running() {
            return false;
        }
        self.elapsed += dt.max(0.0);
        if self.elapsed >= self.duration {
            self.finish_at_end(tree);
            true
        } else {
            self.apply(tree);
            false
        }
    }

    /// Stop where we are and jump back to the start values.
    pub fn stop_at_start(&mut self, tree: &mut ViewTree) {
        self.elapsed = 0.0;
        for track in &self.tracks {
            tree.apply_props(track.view, track.from);
        }
        self.state = AnimationState::Cancelled;
    }

    /// Stop and jump to the end values.
    pub fn finish_at_end(&mut self, tree: &mut ViewTree) {
        self.elapsed = self.duration;
        for track in &self.tracks {
            tree.apply_props(track.view, track.to);
        }
        self.state = AnimationState::Finished;
    }

    fn apply(&self, tree: &mut ViewTree) {
        let eased = self.easing.evaluate(self.fraction_complete());
        for track in &self.tracks {
            tree.apply_props(track.view, track.from.interpolate(&track.to, eased));
        }
    }
}
