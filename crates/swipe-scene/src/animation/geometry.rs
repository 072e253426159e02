//! Start and end frames of the two screens taking part in a transition.

use serde::{Deserialize, Serialize};

use super::types::{Rect, TransitionDirection};

/// Initial and final rectangles of the outgoing and incoming screens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionFrames {
    pub outgoing_start: Rect,
    pub outgoing_end: Rect,
    pub incoming_start: Rect,
    pub incoming_end: Rect,
}

impl TransitionFrames {
    /// Frames for a transition in `direction` inside a container with the
    /// given bounds.
    ///
    /// The outgoing screen travels one container width in the direction's
    /// sign; the incoming screen starts one width away on the other side.
    pub fn new(direction: TransitionDirection, bounds: Rect) -> Self {
        let travel = bounds.w * direction.sign();
        Self {
            outgoing_start: bounds,
            outgoing_end: bounds.offset_by(travel, 0.0),
            incoming_start: bounds.offset_by(-travel, 0.0),
            incoming_end: bounds,
        }
    }

    /// Horizontal distance travelled by either screen.
    pub fn travel_distance(&self) -> f32 {
        self.outgoing_end.x - self.outgoing_start.x
    }
}

/// Shorthand for [`TransitionFrames::new`].
pub fn frames(direction: TransitionDirection, bounds: Rect) -> TransitionFrames {
    TransitionFrames::new(direction, bounds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backward_frames() {
        let bounds = Rect::from_size(400.0, 800.0);
        let f = frames(TransitionDirection::Backward, bounds);

        assert_eq!(f.outgoing_start, bounds);
        assert_eq!(f.outgoing_end, Rect::new(-400.0, 0.0, 400.0, 800.0));
        assert_eq!(f.incoming_start, Rect::new(400.0, 0.0, 400.0, 800.0));
        assert_eq!(f.incoming_end, bounds);
        assert_eq!(f.travel_distance(), -400.0);
    }

    #[test]
    fn test_forward_frames() {
        let bounds = Rect::from_size(400.0, 800.0);
        let f = frames(TransitionDirection::Forward, bounds);

        assert_eq!(f.outgoing_end, Rect::new(400.0, 0.0, 400.0, 800.0));
        assert_eq!(f.incoming_start, Rect::new(-400.0, 0.0, 400.0, 800.0));
        assert_eq!(f.travel_distance(), 400.0);
    }

    #[test]
    fn test_directions_mirror_each_other() {
        let bounds = Rect::from_size(320.0, 640.0);
        let fwd = frames(TransitionDirection::Forward, bounds);
        let back = frames(TransitionDirection::Backward, bounds);
        assert_eq!(fwd.outgoing_end, back.incoming_start);
        assert_eq!(fwd.incoming_start, back.outgoing_end);
    }
}
