//! Ambient animation clock and the per-frame ticker.
//!
//! `AnimationClock` is the render clock of the surface that hosts a
//! transition. While it is frozen, the driver's commit animation does not
//! advance on its own; the interactive controller scrubs it through the
//! clock's time offset instead. At most one interactive transition owns the
//! frozen clock, and every freeze is paired with a release.
//!
//! `DisplayLink` fires once per frame interval while running. Owners feed it
//! elapsed time and step their playback for each frame it reports.

use super::types::AnimationId;
use crate::error::{Result, TransitionError};

/// Render clock shared by the container surface.
#[derive(Debug, Default)]
pub struct AnimationClock {
    owner: Option<AnimationId>,
    /// Seconds of local animation time while frozen.
    time_offset: f64,
}

impl AnimationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop global time for `owner`. The time offset starts at zero.
    pub fn freeze(&mut self, owner: AnimationId) -> Result<()> {
        match self.owner {
            Some(current) if current != owner => Err(TransitionError::ClockBusy(current)),
            _ => {
                self.owner = Some(owner);
                self.time_offset = 0.0;
                Ok(())
            }
        }
    }

    /// Let time run again. Returns the offset the clock was paused at, or
    /// `None` if `owner` does not hold the clock.
    pub fn release(&mut self, owner: AnimationId) -> Option<f64> {
        if self.owner != Some(owner) {
            return None;
        }
        self.owner = None;
        let paused = self.time_offset;
        self.time_offset = 0.0;
        Some(paused)
    }

    pub fn is_frozen(&self) -> bool {
        self.owner.is_some()
    }

    pub fn owner(&self) -> Option<AnimationId> {
        self.owner
    }

    pub fn time_offset(&self) -> f64 {
        self.time_offset
    }

    /// Only meaningful while frozen; ignored otherwise.
    pub fn set_time_offset(&mut self, offset: f64) {
        if self.is_frozen() {
            self.time_offset = offset.max(0.0);
        }
    }
}

/// Fixed-interval frame ticker.
#[derive(Debug, Clone)]
pub struct DisplayLink {
    /// Seconds between frames.
    frame_interval: f64,
    accumulated: f64,
    running: bool,
}

impl DisplayLink {
    pub fn new(frame_interval: f64) -> Self {
        Self {
            frame_interval: if frame_interval > 0.0 { frame_interval } else { 1.0 / 60.0 },
            accumulated: 0.0,
            running: false,
        }
    }

    pub fn frame_interval(&self) -> f64 {
        self.frame_interval
    }

    pub fn start(&mut self) {
        self.running = true;
        self.accumulated = 0.0;
    }

    /// Stop firing. Safe to call when already stopped.
    pub fn invalidate(&mut self) {
        self.running = false;
        self.accumulated = 0.0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Feed `dt` seconds of wall time; returns the number of frames due.
    pub fn advance(&mut self, dt: f64) -> u32 {
        if !self.running || dt <= 0.0 {
            return 0;
        }
        self.accumulated += dt;
        // Tolerate rounding when dt is exactly one interval.
        let frames = ((self.accumulated + 1e-9) / self.frame_interval).floor();
        self.accumulated = (self.accumulated - frames * self.frame_interval).max(0.0);
        frames as u32
    }
}

impl Default for DisplayLink {
    fn default() -> Self {
        Self::new(1.0 / 60.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_freeze_and_release_pair() {
        let mut clock = AnimationClock::new();
        let id = AnimationId(1);

        clock.freeze(id).unwrap();
        assert!(clock.is_frozen());
        clock.set_time_offset(0.2);
        assert_eq!(clock.time_offset(), 0.2);

        assert_eq!(clock.release(id), Some(0.2));
        assert!(!clock.is_frozen());
        assert_eq!(clock.time_offset(), 0.0);
    }

    #[test]
    fn test_freeze_exclusive() {
        let mut clock = AnimationClock::new();
        clock.freeze(AnimationId(1)).unwrap();
        assert_eq!(
            clock.freeze(AnimationId(2)),
            Err(TransitionError::ClockBusy(AnimationId(1)))
        );
        // Wrong owner cannot release
        assert_eq!(clock.release(AnimationId(2)), None);
        assert!(clock.is_frozen());
    }

    #[test]
    fn test_offset_ignored_when_running() {
        let mut clock = AnimationClock::new();
        clock.set_time_offset(1.0);
        assert_eq!(clock.time_offset(), 0.0);
    }

    #[test]
    fn test_display_link_frames() {
        let mut link = DisplayLink::new(1.0 / 60.0);
        assert_eq!(link.advance(1.0 / 60.0), 0, "not started");

        link.start();
        assert_eq!(link.advance(1.0 / 60.0), 1);
        assert_eq!(link.advance(1.0 / 120.0), 0);
        assert_eq!(link.advance(1.0 / 120.0), 1);
        assert_eq!(link.advance(3.0 / 60.0), 3);

        link.invalidate();
        assert!(!link.is_running());
        assert_eq!(link.advance(1.0), 0);
    }

    #[test]
    fn test_display_link_rejects_bad_interval() {
        let link = DisplayLink::new(0.0);
        assert!(link.frame_interval() > 0.0);
    }
}
