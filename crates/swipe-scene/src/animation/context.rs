//! Per-transition context handed to the driver.

use super::geometry::TransitionFrames;
use super::types::{AnimationId, Rect, TransitionDirection};
use crate::view::ViewId;

/// Describes one transition attempt: which screen leaves, which one arrives,
/// where they live, and how the attempt ended.
///
/// Created per attempt and moved into the driver, which owns it until the
/// transition settles.
#[derive(Debug, Clone)]
pub struct TransitionContext {
    id: AnimationId,
    from: ViewId,
    to: ViewId,
    container: ViewId,
    direction: TransitionDirection,
    frames: TransitionFrames,
    animated: bool,
    interactive: bool,
    cancelled: bool,
    percent_complete: f32,
}

impl TransitionContext {
    pub fn new(
        from: ViewId,
        to: ViewId,
        container: ViewId,
        container_bounds: Rect,
        direction: TransitionDirection,
    ) -> Self {
        Self {
            id: AnimationId::new(),
            from,
            to,
            container,
            direction,
            frames: TransitionFrames::new(direction, container_bounds),
            animated: true,
            interactive: false,
            cancelled: false,
            percent_complete: 0.0,
        }
    }

    pub fn with_animated(mut self, animated: bool) -> Self {
        self.animated = animated;
        self
    }

    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    pub fn id(&self) -> AnimationId {
        self.id
    }

    /// Outgoing screen.
    pub fn from_view(&self) -> ViewId {
        self.from
    }

    /// Incoming screen.
    pub fn to_view(&self) -> ViewId {
        self.to
    }

    pub fn container(&self) -> ViewId {
        self.container
    }

    pub fn direction(&self) -> TransitionDirection {
        self.direction
    }

    pub fn frames(&self) -> &TransitionFrames {
        &self.frames
    }

    pub fn container_bounds(&self) -> Rect {
        self.frames.outgoing_start
    }

    pub fn is_animated(&self) -> bool {
        self.animated
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn was_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Last fraction applied by the interactive controller.
    pub fn percent_complete(&self) -> f32 {
        self.percent_complete
    }

    pub fn initial_frame(&self, view: ViewId) -> Option<Rect> {
        if view == self.from {
            Some(self.frames.outgoing_start)
        } else if view == self.to {
            Some(self.frames.incoming_start)
        } else {
            None
        }
    }

    pub fn final_frame(&self, view: ViewId) -> Option<Rect> {
        if view == self.from {
            Some(self.frames.outgoing_end)
        } else if view == self.to {
            Some(self.frames.incoming_end)
        } else {
            None
        }
    }

    pub(crate) fn update_interactive(&mut self, percent: f32) {
        self.percent_complete = percent;
    }

    pub(crate) fn finish_interactive(&mut self) {
        self.cancelled = false;
    }

    pub(crate) fn cancel_interactive(&mut self) {
        self.cancelled = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let ctx = TransitionContext::new(
            ViewId(1),
            ViewId(2),
            ViewId(0),
            Rect::from_size(400.0, 800.0),
            TransitionDirection::Backward,
        );
        assert!(ctx.is_animated());
        assert!(!ctx.is_interactive());
        assert!(!ctx.was_cancelled());
        assert_eq!(ctx.container_bounds(), Rect::from_size(400.0, 800.0));
    }

    #[test]
    fn test_initial_and_final_frames() {
        let ctx = TransitionContext::new(
            ViewId(1),
            ViewId(2),
            ViewId(0),
            Rect::from_size(400.0, 800.0),
            TransitionDirection::Backward,
        );
        assert_eq!(ctx.initial_frame(ViewId(1)), Some(Rect::from_size(400.0, 800.0)));
        assert_eq!(ctx.final_frame(ViewId(1)).map(|r| r.x), Some(-400.0));
        assert_eq!(ctx.initial_frame(ViewId(2)).map(|r| r.x), Some(400.0));
        assert_eq!(ctx.final_frame(ViewId(2)).map(|r| r.x), Some(0.0));
        assert_eq!(ctx.initial_frame(ViewId(7)), None);
    }

    #[test]
    fn test_cancel_and_finish_flags() {
        let mut ctx = TransitionContext::new(
            ViewId(1),
            ViewId(2),
            ViewId(0),
            Rect::from_size(400.0, 800.0),
            TransitionDirection::Forward,
        )
        .with_interactive(true);

        ctx.cancel_interactive();
        assert!(ctx.was_cancelled());
        ctx.finish_interactive();
        assert!(!ctx.was_cancelled());
    }

    #[test]
    fn test_ids_are_unique_per_attempt() {
        let bounds = Rect::from_size(1.0, 1.0);
        let a = TransitionContext::new(ViewId(1), ViewId(2), ViewId(0), bounds, TransitionDirection::Forward);
        let b = TransitionContext::new(ViewId(1), ViewId(2), ViewId(0), bounds, TransitionDirection::Forward);
        assert_ne!(a.id(), b.id());
    }
}
