//! Edge-pan gesture to transition progress.
//!
//! One gesture lifecycle runs `Began → Changed* → Ended | Cancelled`. On
//! `Began` the adapter records the swipe direction and asks the host whether
//! a transition may start; a refusal mutes the rest of that gesture.
//! `Changed` samples map horizontal travel to a completion fraction. On
//! release the adapter either finishes or cancels, letting a fast flick in
//! the swipe direction finish a transition that has not crossed the
//! distance threshold.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::context::TransitionContext;
use super::events::TransitionEvent;
use super::interactive::PercentDrivenInteractiveTransition;
use super::types::{Point, TransitionDirection};
use crate::view::{ViewId, ViewTree};

/// Release speed above which a swipe completes regardless of distance.
pub const VELOCITY_FOR_COMPLETE: f32 = 200.0;
/// Fraction past which a released swipe completes.
pub const COMPLETION_THRESHOLD: f32 = 0.5;
/// Upper bound on the fraction forwarded to the controller.
pub const MAX_FRACTION: f32 = 0.99;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GesturePhase {
    Began,
    Changed,
    Ended,
    Cancelled,
}

/// One sample from a pan recognizer. `translation` is measured from where
/// the gesture began; `velocity` is in points per second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureSample {
    pub translation: Point,
    pub velocity: Point,
    pub phase: GesturePhase,
}

impl GestureSample {
    pub fn began(velocity: Point) -> Self {
        Self {
            translation: Point::default(),
            velocity,
            phase: GesturePhase::Began,
        }
    }

    pub fn changed(translation: Point, velocity: Point) -> Self {
        Self {
            translation,
            velocity,
            phase: GesturePhase::Changed,
        }
    }

    pub fn ended(translation: Point, velocity: Point) -> Self {
        Self {
            translation,
            velocity,
            phase: GesturePhase::Ended,
        }
    }

    pub fn cancelled(translation: Point) -> Self {
        Self {
            translation,
            velocity: Point::default(),
            phase: GesturePhase::Cancelled,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenEdge {
    Left,
    Right,
}

/// Screen-edge pan recognizer. Samples are dropped while disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgePanRecognizer {
    pub edge: ScreenEdge,
    pub enabled: bool,
}

impl EdgePanRecognizer {
    pub fn new(edge: ScreenEdge) -> Self {
        Self { edge, enabled: true }
    }
}

/// State of the current gesture. Reset on every `Began`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InteractionState {
    pub in_progress: bool,
    pub should_complete: bool,
    pub direction: TransitionDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureThresholds {
    pub velocity_for_complete: f32,
    pub completion_threshold: f32,
    pub max_fraction: f32,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            velocity_for_complete: VELOCITY_FOR_COMPLETE,
            completion_threshold: COMPLETION_THRESHOLD,
            max_fraction: MAX_FRACTION,
        }
    }
}

/// The navigation layer the adapter drives transitions for.
pub trait TransitionHost {
    /// Whether a screen exists to move to in `direction`.
    fn may_begin_transition(&self, direction: TransitionDirection) -> bool;

    /// Context for a transition in `direction`, if one can be built.
    fn transition_context(&self, direction: TransitionDirection, tree: &ViewTree) -> Option<TransitionContext>;

    /// Called exactly once per attempted transition.
    fn on_transition_settled(&mut self, from: ViewId, to: ViewId, completed: bool, tree: &mut ViewTree);
}

/// Turns edge-pan samples into interactive controller calls.
#[derive(Debug)]
pub struct SwipeInteractor {
    controller: PercentDrivenInteractiveTransition,
    recognizer: Option<EdgePanRecognizer>,
    state: InteractionState,
    thresholds: GestureThresholds,
    screen_width: f32,
}

impl SwipeInteractor {
    pub fn new(controller: PercentDrivenInteractiveTransition, screen_width: f32) -> Self {
        Self {
            controller,
            recognizer: None,
            state: InteractionState::default(),
            thresholds: GestureThresholds::default(),
            screen_width,
        }
    }

    pub fn with_thresholds(mut self, thresholds: GestureThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn controller(&self) -> &PercentDrivenInteractiveTransition {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut PercentDrivenInteractiveTransition {
        &mut self.controller
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn thresholds(&self) -> GestureThresholds {
        self.thresholds
    }

    pub fn recognizer(&self) -> Option<EdgePanRecognizer> {
        self.recognizer
    }

    pub fn set_screen_width(&mut self, width: f32) {
        self.screen_width = width;
    }

    /// Attach the recognizer to `edge`, replacing any previous one.
    pub fn wire_to(&mut self, edge: ScreenEdge) {
        debug!("edge pan recognizer wired to {:?} edge", edge);
        self.recognizer = Some(EdgePanRecognizer::new(edge));
    }

    /// True while a transition is running, interactively or not.
    pub fn is_transitioning(&self) -> bool {
        self.controller.is_active() || self.controller.driver().phase().is_busy()
    }

    /// Fraction of horizontal travel across the screen, clamped to
    /// `[0, max_fraction]`.
    pub fn fraction_for(&self, translation_x: f32) -> f32 {
        if self.screen_width <= 0.0 {
            return 0.0;
        }
        (translation_x.abs() / self.screen_width).clamp(0.0, self.thresholds.max_fraction)
    }

    /// Feed one gesture sample. Returns the settle events dispatched to the
    /// host while handling it.
    pub fn handle_pan<H: TransitionHost>(
        &mut self,
        sample: GestureSample,
        tree: &mut ViewTree,
        host: &mut H,
    ) -> Vec<TransitionEvent> {
        match self.recognizer {
            Some(r) if r.enabled => {}
            _ => return Vec::new(),
        }

        match sample.phase {
            GesturePhase::Began => self.began(sample, tree, host),
            GesturePhase::Changed => {
                if self.state.in_progress {
                    let fraction = self.fraction_for(sample.translation.x);
                    self.state.should_complete = fraction > self.thresholds.completion_threshold;
                    self.controller.update(fraction as f64, tree);
                }
            }
            GesturePhase::Ended | GesturePhase::Cancelled => {
                if self.state.in_progress {
                    self.released(sample, tree);
                }
            }
        }
        self.dispatch(tree, host)
    }

    fn began<H: TransitionHost>(&mut self, sample: GestureSample, tree: &mut ViewTree, host: &mut H) {
        let direction = TransitionDirection::from_velocity(sample.velocity.x);
        self.state = InteractionState {
            in_progress: false,
            should_complete: false,
            direction,
        };

        if self.is_transitioning() {
            debug!("pan began while a transition is running; ignoring gesture");
            return;
        }
        if !host.may_begin_transition(direction) {
            debug!("host refused {:?} transition", direction);
            return;
        }
        let Some(context) = host.transition_context(direction, tree) else {
            warn!("host allowed {:?} transition but built no context", direction);
            return;
        };
        match self.controller.begin(context, tree) {
            Ok(_) => self.state.in_progress = self.controller.is_active(),
            Err(e) => warn!("interactive transition did not start: {}", e),
        }
    }

    fn released(&mut self, sample: GestureSample, tree: &mut ViewTree) {
        self.state.in_progress = false;

        if !self.state.should_complete {
            let along_swipe = sample.velocity.x * self.state.direction.sign();
            if along_swipe > self.thresholds.velocity_for_complete {
                self.state.should_complete = true;
            }
        }

        let result = if sample.phase == GesturePhase::Cancelled || !self.state.should_complete {
            self.controller.cancel(tree)
        } else {
            if let Some(r) = self.recognizer.as_mut() {
                r.enabled = false;
            }
            self.controller.finish(tree)
        };
        if let Err(e) = result {
            warn!("gesture release ignored: {}", e);
        }
    }

    /// Advance playback by `dt` seconds and dispatch any settle events.
    pub fn tick<H: TransitionHost>(&mut self, dt: f64, tree: &mut ViewTree, host: &mut H) -> Vec<TransitionEvent> {
        self.controller.tick(dt, tree);
        self.dispatch(tree, host)
    }

    /// Run a non-interactive transition in `direction`.
    pub fn run<H: TransitionHost>(
        &mut self,
        direction: TransitionDirection,
        animated: bool,
        tree: &mut ViewTree,
        host: &mut H,
    ) -> Vec<TransitionEvent> {
        if !self.is_transitioning() && host.may_begin_transition(direction) {
            if let Some(context) = host.transition_context(direction, tree) {
                let context = context.with_animated(animated);
                if let Err(e) = self.controller.driver_mut().run(context, tree) {
                    warn!("transition did not start: {}", e);
                }
            }
        }
        self.dispatch(tree, host)
    }

    fn dispatch<H: TransitionHost>(&mut self, tree: &mut ViewTree, host: &mut H) -> Vec<TransitionEvent> {
        let events = self.controller.drain_events();
        for event in &events {
            if let TransitionEvent::Settled { from, to, completed, .. } = *event {
                info!("transition settled: {:?} -> {:?}, completed = {}", from, to, completed);
                host.on_transition_settled(from, to, completed, tree);
            }
        }
        // Recognition resumes once the finishing transition is over.
        if !self.is_transitioning() {
            if let Some(r) = self.recognizer.as_mut() {
                r.enabled = true;
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::driver::AnimatedTransitioning;
    use crate::animation::strategy::OverlapAnimation;
    use crate::animation::types::Rect;

    const FRAME: f64 = 1.0 / 60.0;

    struct TestHost {
        left: ViewId,
        right: ViewId,
        container: ViewId,
        allow: bool,
        settled: Vec<(ViewId, ViewId, bool)>,
    }

    impl TransitionHost for TestHost {
        fn may_begin_transition(&self, direction: TransitionDirection) -> bool {
            self.allow && direction == TransitionDirection::Backward
        }

        fn transition_context(&self, direction: TransitionDirection, tree: &ViewTree) -> Option<TransitionContext> {
            let bounds = tree.bounds(self.container)?;
            Some(TransitionContext::new(self.left, self.right, self.container, bounds, direction))
        }

        fn on_transition_settled(&mut self, from: ViewId, to: ViewId, completed: bool, _tree: &mut ViewTree) {
            self.settled.push((from, to, completed));
        }
    }

    fn setup(allow: bool) -> (ViewTree, TestHost, SwipeInteractor) {
        let mut tree = ViewTree::new();
        let bounds = Rect::from_size(400.0, 800.0);
        let container = tree.create_view("content", bounds);
        let left = tree.create_view("left", bounds);
        let right = tree.create_view("right", bounds);
        tree.add_subview(container, left);

        let driver = AnimatedTransitioning::new(0.33, Box::new(OverlapAnimation));
        let mut interactor = SwipeInteractor::new(PercentDrivenInteractiveTransition::new(driver), 400.0);
        interactor.wire_to(ScreenEdge::Right);
        let host = TestHost {
            left,
            right,
            container,
            allow,
            settled: Vec::new(),
        };
        (tree, host, interactor)
    }

    fn settle(interactor: &mut SwipeInteractor, tree: &mut ViewTree, host: &mut TestHost) {
        for _ in 0..600 {
            if !interactor.is_transitioning() {
                return;
            }
            interactor.tick(FRAME, tree, host);
        }
        panic!("transition never settled");
    }

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_began_records_direction() {
        let (mut tree, mut host, mut i) = setup(true);
        i.handle_pan(GestureSample::began(Point::new(-300.0, 0.0)), &mut tree, &mut host);
        assert_eq!(i.state().direction, TransitionDirection::Backward);
        assert!(i.state().in_progress);
    }

    #[test]
    fn test_changed_sets_fraction_and_threshold() {
        let (mut tree, mut host, mut i) = setup(true);
        i.handle_pan(GestureSample::began(Point::new(-300.0, 0.0)), &mut tree, &mut host);

        i.handle_pan(GestureSample::changed(Point::new(-100.0, 0.0), Point::default()), &mut tree, &mut host);
        assert!(approx_eq(i.controller().percent_complete() as f32, 0.25));
        assert!(!i.state().should_complete);

        i.handle_pan(GestureSample::changed(Point::new(-250.0, 0.0), Point::default()), &mut tree, &mut host);
        assert!(approx_eq(i.controller().percent_complete() as f32, 0.625));
        assert!(i.state().should_complete);
    }

    #[test]
    fn test_fraction_clamped_below_one() {
        let (_, _, i) = setup(true);
        assert!(approx_eq(i.fraction_for(-1000.0), MAX_FRACTION));
        assert!(approx_eq(i.fraction_for(200.0), 0.5));
    }

    #[test]
    fn test_velocity_override_finishes() {
        let (mut tree, mut host, mut i) = setup(true);
        i.handle_pan(GestureSample::began(Point::new(-300.0, 0.0)), &mut tree, &mut host);
        i.handle_pan(GestureSample::changed(Point::new(-40.0, 0.0), Point::default()), &mut tree, &mut host);
        i.handle_pan(GestureSample::ended(Point::new(-40.0, 0.0), Point::new(-450.0, 0.0)), &mut tree, &mut host);

        assert!(i.state().should_complete);
        assert!(!i.recognizer().map(|r| r.enabled).unwrap_or(true));
        settle(&mut i, &mut tree, &mut host);
        assert_eq!(host.settled, vec![(host.left, host.right, true)]);
        assert!(i.recognizer().map(|r| r.enabled).unwrap_or(false));
    }

    #[test]
    fn test_velocity_against_swipe_does_not_override() {
        let (mut tree, mut host, mut i) = setup(true);
        i.handle_pan(GestureSample::began(Point::new(-300.0, 0.0)), &mut tree, &mut host);
        i.handle_pan(GestureSample::changed(Point::new(-40.0, 0.0), Point::default()), &mut tree, &mut host);
        i.handle_pan(GestureSample::ended(Point::new(-40.0, 0.0), Point::new(450.0, 0.0)), &mut tree, &mut host);

        settle(&mut i, &mut tree, &mut host);
        assert_eq!(host.settled, vec![(host.left, host.right, false)]);
    }

    #[test]
    fn test_cancelled_phase_always_cancels() {
        let (mut tree, mut host, mut i) = setup(true);
        i.handle_pan(GestureSample::began(Point::new(-300.0, 0.0)), &mut tree, &mut host);
        i.handle_pan(GestureSample::changed(Point::new(-300.0, 0.0), Point::default()), &mut tree, &mut host);
        i.handle_pan(GestureSample::cancelled(Point::new(-300.0, 0.0)), &mut tree, &mut host);

        settle(&mut i, &mut tree, &mut host);
        assert_eq!(host.settled, vec![(host.left, host.right, false)]);
        assert_eq!(tree.superview(host.right), None);
    }

    #[test]
    fn test_host_denial_mutes_gesture() {
        let (mut tree, mut host, mut i) = setup(false);
        i.handle_pan(GestureSample::began(Point::new(-300.0, 0.0)), &mut tree, &mut host);
        assert!(!i.state().in_progress);

        i.handle_pan(GestureSample::changed(Point::new(-300.0, 0.0), Point::default()), &mut tree, &mut host);
        i.handle_pan(GestureSample::ended(Point::new(-300.0, 0.0), Point::new(-900.0, 0.0)), &mut tree, &mut host);
        assert!(!i.is_transitioning());
        assert!(host.settled.is_empty());
        assert!(!i.controller().driver().clock().is_frozen());
    }

    #[test]
    fn test_disabled_recognizer_drops_samples() {
        let (mut tree, mut host, mut i) = setup(true);
        i.recognizer = Some(EdgePanRecognizer {
            edge: ScreenEdge::Right,
            enabled: false,
        });
        i.handle_pan(GestureSample::began(Point::new(-300.0, 0.0)), &mut tree, &mut host);
        assert!(!i.state().in_progress);
        assert!(!i.is_transitioning());
    }

    #[test]
    fn test_zero_width_screen() {
        let (_, _, mut i) = setup(true);
        i.set_screen_width(0.0);
        assert_eq!(i.fraction_for(-120.0), 0.0);
    }

    #[test]
    fn test_sample_serde() {
        let sample = GestureSample::ended(Point::new(-10.0, 0.0), Point::new(-50.0, 2.0));
        let json = serde_json::to_string(&sample).unwrap();
        assert!(json.contains("\"ended\""));
        let back: GestureSample = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample);
    }
}
