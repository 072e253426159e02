//! Scrubbable progress over a transition's duration.
//!
//! Replaces "set the layer's time offset" with an explicit value: progress
//! is either set directly from a fraction, or played toward one end at a
//! given rate, one step per frame.

/// End of the timeline playback heads toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackTarget {
    /// Offset 0: the transition is being cancelled.
    Start,
    /// Offset = duration: the transition is being finished.
    End,
}

/// Outcome of one playback step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProgressStep {
    /// Still inside the timeline; the new offset.
    Moved(f64),
    /// The step would leave the timeline. The offset is left where it was.
    Reached(PlaybackTarget),
    /// No playback is active.
    Idle,
}

/// Time offset within `[0, duration]`.
#[derive(Debug, Clone, Default)]
pub struct AnimationProgress {
    duration: f64,
    offset: f64,
    playback: Option<(PlaybackTarget, f64)>,
}

impl AnimationProgress {
    pub fn new(duration: f64) -> Self {
        Self {
            duration: duration.max(0.0),
            offset: 0.0,
            playback: None,
        }
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Offset as a fraction of the duration. Zero duration reads as done.
    pub fn fraction(&self) -> f64 {
        if self.duration > 0.0 {
            self.offset / self.duration
        } else {
            1.0
        }
    }

    /// Scrub to `fraction` (clamped to [0, 1]). Returns the new offset.
    pub fn set_progress(&mut self, fraction: f64) -> f64 {
        let fraction = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
        self.offset = fraction * self.duration;
        self.offset
    }

    /// Start playing toward `target` at `rate` (timeline seconds per second).
    pub fn play_toward(&mut self, target: PlaybackTarget, rate: f64) {
        self.playback = Some((target, rate.abs()));
    }

    pub fn playback_target(&self) -> Option<PlaybackTarget> {
        self.playback.map(|(target, _)| target)
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_some()
    }

    /// Advance playback by one frame of `dt` seconds.
    pub fn step(&mut self, dt: f64) -> ProgressStep {
        let Some((target, rate)) = self.playback else {
            return ProgressStep::Idle;
        };
        let tick = dt * rate;
        let next = match target {
            PlaybackTarget::Start => self.offset - tick,
            PlaybackTarget::End => self.offset + tick,
        };
        if next < 0.0 || next > self.duration || self.duration <= 0.0 {
            self.playback = None;
            ProgressStep::Reached(target)
        } else {
            self.offset = next;
            ProgressStep::Moved(next)
        }
    }
}
