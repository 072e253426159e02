//! Two-page swipe navigator.
//!
//! This module provides:
//! - `PageStack`: which page is on top, and the [`TransitionHost`] decisions
//!   built on that
//! - `SwipeNavigator`: the root view hierarchy (background, tint, content,
//!   indicator) plus the gesture adapter that moves between the two pages
//!
//! The navigator is driven from outside: feed it pan samples with
//! [`SwipeNavigator::handle_pan`] and wall time with
//! [`SwipeNavigator::advance`].

use swipe_config::{SwipeConfig, TransitionStyle};

use crate::animation::driver::AnimatedTransitioning;
use crate::animation::easing::EasingFunction;
use crate::animation::gesture::{
    EdgePanRecognizer, GestureSample, GestureThresholds, ScreenEdge, SwipeInteractor, TransitionHost,
};
use crate::animation::interactive::PercentDrivenInteractiveTransition;
use crate::animation::strategy::{NavigationAnimation, OverlapAnimation, TransitionAnimation};
use crate::animation::types::{Color, Rect, TransitionDirection};
use crate::animation::{context::TransitionContext, events::TransitionEvent};
use crate::error::{NavigationError, TransitionError};
use crate::view::{ViewId, ViewTree};

/// Number of pages the navigator switches between.
pub const PAGE_COUNT: usize = 2;

/// Top-page bookkeeping for the content container.
#[derive(Debug, Clone)]
pub struct PageStack {
    content: ViewId,
    pages: Option<[ViewId; PAGE_COUNT]>,
    top: Option<usize>,
}

impl PageStack {
    pub fn new(content: ViewId) -> Self {
        Self {
            content,
            pages: None,
            top: None,
        }
    }

    pub fn content(&self) -> ViewId {
        self.content
    }

    pub fn pages(&self) -> Option<[ViewId; PAGE_COUNT]> {
        self.pages
    }

    pub fn page(&self, index: usize) -> Option<ViewId> {
        self.pages.and_then(|p| p.get(index).copied())
    }

    pub fn index_of(&self, view: ViewId) -> Option<usize> {
        self.pages.and_then(|p| p.iter().position(|&v| v == view))
    }

    pub fn top_index(&self) -> Option<usize> {
        self.top
    }

    pub fn top_page(&self) -> Option<ViewId> {
        self.top.and_then(|i| self.page(i))
    }

    /// Edge the recognizer should listen on: the one leading to the other page.
    pub fn edge(&self) -> Option<ScreenEdge> {
        match self.top? {
            0 => Some(ScreenEdge::Right),
            _ => Some(ScreenEdge::Left),
        }
    }

    /// Replace both pages. The left page becomes the top page. Returns false,
    /// leaving no pages installed, if the left page cannot be attached.
    pub fn set_pages(&mut self, left: ViewId, right: ViewId, tree: &mut ViewTree) -> bool {
        if let Some(top) = self.top_page() {
            tree.remove_from_superview(top);
        }
        self.pages = Some([left, right]);
        self.top = None;
        if !self.add_page(0, tree) {
            self.pages = None;
            return false;
        }
        true
    }

    /// Attach page `index` to the content container at full bounds and make
    /// it the top page. The top page is unchanged if the attach fails.
    pub fn add_page(&mut self, index: usize, tree: &mut ViewTree) -> bool {
        let Some(page) = self.page(index) else {
            return false;
        };
        if !tree.add_subview(self.content, page) {
            return false;
        }
        if let Some(bounds) = tree.bounds(self.content) {
            tree.set_frame(page, bounds);
        }
        self.top = Some(index);
        true
    }

    pub fn remove_page(&mut self, index: usize, tree: &mut ViewTree) {
        if let Some(page) = self.page(index) {
            tree.remove_from_superview(page);
        }
    }

    /// Page a swipe in `direction` leads to.
    pub fn target_index(direction: TransitionDirection) -> usize {
        match direction {
            TransitionDirection::Backward => 1,
            TransitionDirection::Forward => 0,
        }
    }
}

impl TransitionHost for PageStack {
    fn may_begin_transition(&self, direction: TransitionDirection) -> bool {
        match self.top {
            Some(top) if self.pages.is_some() => Self::target_index(direction) != top,
            _ => false,
        }
    }

    fn transition_context(&self, direction: TransitionDirection, tree: &ViewTree) -> Option<TransitionContext> {
        let from = self.top_page()?;
        let to = self.page(Self::target_index(direction))?;
        let bounds = tree.bounds(self.content)?;
        Some(TransitionContext::new(from, to, self.content, bounds, direction))
    }

    fn on_transition_settled(&mut self, from: ViewId, to: ViewId, completed: bool, tree: &mut ViewTree) {
        if !completed {
            return;
        }
        let (Some(from_index), Some(to_index)) = (self.index_of(from), self.index_of(to)) else {
            log::warn!("settled transition {:?} -> {:?} does not involve known pages", from, to);
            return;
        };
        self.remove_page(from_index, tree);
        if !self.add_page(to_index, tree) {
            log::warn!("page {} could not be attached to the content container", to_index);
            return;
        }
        log::info!("top page is now {}", to_index);
    }
}

/// Root of the swipeable interface.
#[derive(Debug)]
pub struct SwipeNavigator {
    tree: ViewTree,
    bounds: Rect,
    root: ViewId,
    background_container: ViewId,
    tint_view: ViewId,
    content: ViewId,
    indicator: ViewId,
    background: Option<ViewId>,
    pages: PageStack,
    interactor: SwipeInteractor,
    animated: bool,
}

impl SwipeNavigator {
    pub fn new(bounds: Rect, config: &SwipeConfig) -> Self {
        let bounds = bounds.bounds();
        let mut tree = ViewTree::new();

        let root = tree.create_view("root", bounds);
        let background_container = tree.create_view("background", bounds);
        let tint_view = tree.create_view("tint", bounds);
        let content = tree.create_view("content", bounds);

        let ind = &config.indicator;
        let indicator = tree.create_view(
            "indicator",
            Rect::new(
                bounds.w - ind.x_shift - ind.width,
                (bounds.h - ind.height) / 2.0,
                ind.width,
                ind.height,
            ),
        );

        let tint = Color::from_array(config.background.tint);
        let indicator_color = Color::from_array(ind.color);
        tree.set_background(tint_view, tint);
        tree.set_alpha(tint_view, 0.0);
        tree.set_background(indicator, indicator_color);

        for layer in [background_container, tint_view, content, indicator] {
            tree.add_subview(root, layer);
        }

        let animation: Box<dyn TransitionAnimation> = match config.transition.style {
            TransitionStyle::Overlap => Box::new(OverlapAnimation),
            TransitionStyle::Navigation => Box::new(NavigationAnimation::new(
                tint_view,
                indicator,
                tint,
                indicator_color,
                ind.x_shift,
                ind.width,
            )),
        };
        let easing = EasingFunction::from_name(&config.transition.easing).unwrap_or_else(|| {
            log::warn!("unknown easing '{}', using ease_out", config.transition.easing);
            EasingFunction::EaseOut
        });

        let driver = AnimatedTransitioning::new(config.transition.duration_secs, animation).with_easing(easing);
        let controller = PercentDrivenInteractiveTransition::new(driver)
            .with_frame_interval(config.playback.frame_interval_secs)
            .with_completion_speed(config.playback.completion_speed);
        let interactor = SwipeInteractor::new(controller, bounds.w).with_thresholds(GestureThresholds {
            velocity_for_complete: config.gesture.velocity_for_complete,
            completion_threshold: config.gesture.completion_threshold,
            max_fraction: config.gesture.max_fraction,
        });

        log::debug!(
            "navigator created: {}x{}, style {:?}, duration {}s",
            bounds.w,
            bounds.h,
            config.transition.style,
            config.transition.duration_secs
        );

        Self {
            tree,
            bounds,
            root,
            background_container,
            tint_view,
            content,
            indicator,
            background: None,
            pages: PageStack::new(content),
            interactor,
            animated: config.transition.animated,
        }
    }

    /// Install the left and right pages. The left page is shown first.
    pub fn set_pages(&mut self, pages: &[ViewId]) -> Result<(), NavigationError> {
        let [left, right] = pages else {
            return Err(NavigationError::PageCount {
                expected: PAGE_COUNT,
                actual: pages.len(),
            });
        };
        for &page in pages {
            if !self.tree.contains(page) {
                return Err(NavigationError::UnknownPage(page));
            }
            if self.is_reserved(page) {
                return Err(NavigationError::ReservedView(page));
            }
        }
        if left == right {
            return Err(NavigationError::DuplicatePage(*left));
        }
        if self.is_transitioning() {
            return Err(TransitionError::Conflict.into());
        }
        if !self.pages.set_pages(*left, *right, &mut self.tree) {
            return Err(NavigationError::Unattachable(*left));
        }
        self.sync_recognizer();
        log::info!("pages installed: left {:?}, right {:?}", left, right);
        Ok(())
    }

    // A page may not contain one of the navigator's own layers, nor sit
    // inside a layer other than the content container.
    fn is_reserved(&self, page: ViewId) -> bool {
        let layers = [self.root, self.background_container, self.tint_view, self.content, self.indicator];
        if layers.iter().any(|&layer| self.tree.is_descendant(layer, page)) {
            return true;
        }
        [self.background_container, self.tint_view, self.indicator]
            .iter()
            .any(|&layer| self.tree.is_descendant(page, layer))
    }

    /// Install the background view behind the pages. Only the first call has
    /// an effect; returns whether it did.
    pub fn set_background(&mut self, view: ViewId) -> bool {
        if self.background.is_some() || !self.tree.contains(view) {
            return false;
        }
        self.tree.set_frame(view, self.bounds);
        self.tree.add_subview(self.background_container, view);
        self.background = Some(view);
        true
    }

    /// Move to page `index` without a gesture.
    ///
    /// Showing the page already on top is a no-op, but only while nothing is
    /// in flight. The transition animates only if both `animated` and the
    /// configured default allow it.
    pub fn show_page(&mut self, index: usize, animated: bool) -> Result<Vec<TransitionEvent>, NavigationError> {
        if index >= PAGE_COUNT {
            return Err(NavigationError::PageIndex(index));
        }
        let Some(top) = self.pages.top_index() else {
            return Err(NavigationError::PageCount {
                expected: PAGE_COUNT,
                actual: 0,
            });
        };
        if self.is_transitioning() {
            return Err(TransitionError::Conflict.into());
        }
        if index == top {
            return Ok(Vec::new());
        }

        let direction = if index > top {
            TransitionDirection::Backward
        } else {
            TransitionDirection::Forward
        };
        let events = self
            .interactor
            .run(direction, animated && self.animated, &mut self.tree, &mut self.pages);
        self.sync_recognizer();
        Ok(events)
    }

    /// Feed one edge-pan sample.
    pub fn handle_pan(&mut self, sample: GestureSample) -> Vec<TransitionEvent> {
        let events = self.interactor.handle_pan(sample, &mut self.tree, &mut self.pages);
        self.sync_recognizer();
        events
    }

    /// Per-frame entry point: advance playback by `dt` seconds.
    pub fn advance(&mut self, dt: f64) -> Vec<TransitionEvent> {
        let events = self.interactor.tick(dt, &mut self.tree, &mut self.pages);
        self.sync_recognizer();
        events
    }

    // The recognizer follows the top page once nothing is in flight.
    fn sync_recognizer(&mut self) {
        if self.interactor.is_transitioning() {
            return;
        }
        let Some(edge) = self.pages.edge() else {
            return;
        };
        if self.interactor.recognizer().map(|r| r.edge) != Some(edge) {
            self.interactor.wire_to(edge);
        }
    }

    pub fn may_begin_transition(&self, direction: TransitionDirection) -> bool {
        !self.is_transitioning() && self.pages.may_begin_transition(direction)
    }

    pub fn is_transitioning(&self) -> bool {
        self.interactor.is_transitioning()
    }

    /// Fraction of the interactive transition applied so far.
    pub fn percent_complete(&self) -> f64 {
        self.interactor.controller().percent_complete()
    }

    pub fn set_completion_speed(&mut self, speed: f64) {
        self.interactor.controller_mut().set_completion_speed(speed);
    }

    pub fn completion_speed(&self) -> f64 {
        self.interactor.controller().completion_speed()
    }

    pub fn tree(&self) -> &ViewTree {
        &self.tree
    }

    /// Mutable access for creating page content.
    pub fn tree_mut(&mut self) -> &mut ViewTree {
        &mut self.tree
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn root(&self) -> ViewId {
        self.root
    }

    pub fn background_container(&self) -> ViewId {
        self.background_container
    }

    pub fn background(&self) -> Option<ViewId> {
        self.background
    }

    pub fn tint_view(&self) -> ViewId {
        self.tint_view
    }

    pub fn content(&self) -> ViewId {
        self.content
    }

    pub fn indicator(&self) -> ViewId {
        self.indicator
    }

    pub fn top_index(&self) -> Option<usize> {
        self.pages.top_index()
    }

    pub fn top_page(&self) -> Option<ViewId> {
        self.pages.top_page()
    }

    pub fn recognizer(&self) -> Option<EdgePanRecognizer> {
        self.interactor.recognizer()
    }

    pub fn interactor(&self) -> &SwipeInteractor {
        &self.interactor
    }
}

static_assertions::assert_impl_all!(SwipeNavigator: Send);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::transform::Transform2D;
    use crate::animation::types::Point;

    const FRAME: f64 = 1.0 / 60.0;

    fn navigator() -> (SwipeNavigator, ViewId, ViewId) {
        let mut nav = SwipeNavigator::new(Rect::from_size(400.0, 800.0), &SwipeConfig::default());
        let left = nav.tree_mut().create_view("left page", Rect::default());
        let right = nav.tree_mut().create_view("right page", Rect::default());
        nav.set_pages(&[left, right]).unwrap();
        (nav, left, right)
    }

    fn run_until_idle(nav: &mut SwipeNavigator) -> Vec<TransitionEvent> {
        let mut events = Vec::new();
        for _ in 0..600 {
            if !nav.is_transitioning() {
                return events;
            }
            events.extend(nav.advance(FRAME));
        }
        panic!("transition never settled");
    }

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_layers_in_order() {
        let (nav, _, _) = navigator();
        let tree = nav.tree();
        assert_eq!(
            tree.subviews(nav.root()),
            &[nav.background_container(), nav.tint_view(), nav.content(), nav.indicator()]
        );
        assert_eq!(tree.alpha(nav.tint_view()), Some(0.0));
        assert_eq!(tree.frame(nav.indicator()), Some(Rect::new(376.0, 375.0, 4.0, 50.0)));
        assert_eq!(tree.background(nav.indicator()), Some(Color::WHITE));
    }

    #[test]
    fn test_set_pages_requires_two() {
        let mut nav = SwipeNavigator::new(Rect::from_size(400.0, 800.0), &SwipeConfig::default());
        let a = nav.tree_mut().create_view("a", Rect::default());
        assert_eq!(
            nav.set_pages(&[a]),
            Err(NavigationError::PageCount { expected: 2, actual: 1 })
        );
        assert_eq!(
            nav.set_pages(&[a, a, a]),
            Err(NavigationError::PageCount { expected: 2, actual: 3 })
        );
        assert_eq!(nav.set_pages(&[a, ViewId(500)]), Err(NavigationError::UnknownPage(ViewId(500))));
        assert_eq!(nav.top_index(), None);
    }

    #[test]
    fn test_set_pages_rejects_same_view_twice() {
        let mut nav = SwipeNavigator::new(Rect::from_size(400.0, 800.0), &SwipeConfig::default());
        let a = nav.tree_mut().create_view("a", Rect::default());
        assert_eq!(nav.set_pages(&[a, a]), Err(NavigationError::DuplicatePage(a)));
        assert_eq!(nav.top_index(), None);
        assert!(nav.tree().subviews(nav.content()).is_empty());

        let (mut nav, left, right) = navigator();
        assert_eq!(nav.set_pages(&[left, left]), Err(NavigationError::DuplicatePage(left)));
        assert_eq!(nav.top_page(), Some(left));

        // A cancelled swipe still has two distinct pages to restore
        nav.handle_pan(GestureSample::began(Point::new(-300.0, 0.0)));
        nav.handle_pan(GestureSample::changed(Point::new(-80.0, 0.0), Point::new(-100.0, 0.0)));
        nav.handle_pan(GestureSample::ended(Point::new(-80.0, 0.0), Point::new(-100.0, 0.0)));
        run_until_idle(&mut nav);
        assert_eq!(nav.tree().subviews(nav.content()), &[left]);
        assert_eq!(nav.tree().superview(right), None);
    }

    #[test]
    fn test_set_pages_rejects_navigator_layers() {
        let mut nav = SwipeNavigator::new(Rect::from_size(400.0, 800.0), &SwipeConfig::default());
        let page = nav.tree_mut().create_view("page", Rect::default());
        let layers = [
            nav.root(),
            nav.background_container(),
            nav.tint_view(),
            nav.content(),
            nav.indicator(),
        ];
        for layer in layers {
            assert_eq!(nav.set_pages(&[layer, page]), Err(NavigationError::ReservedView(layer)));
            assert_eq!(nav.set_pages(&[page, layer]), Err(NavigationError::ReservedView(layer)));
        }

        // Wrapping the root would make the content container its own ancestor
        let wrapper = nav.tree_mut().create_view("wrapper", Rect::default());
        let root = nav.root();
        assert!(nav.tree_mut().add_subview(wrapper, root));
        assert_eq!(nav.set_pages(&[wrapper, page]), Err(NavigationError::ReservedView(wrapper)));

        let camera = nav.tree_mut().create_view("camera", Rect::default());
        assert!(nav.set_background(camera));
        assert_eq!(nav.set_pages(&[page, camera]), Err(NavigationError::ReservedView(camera)));

        assert_eq!(nav.top_index(), None);
        assert!(nav.tree().subviews(nav.content()).is_empty());
        assert_eq!(
            nav.tree().subviews(nav.root()),
            &[nav.background_container(), nav.tint_view(), nav.content(), nav.indicator()]
        );
    }

    #[test]
    fn test_add_page_reports_failed_attach() {
        let mut tree = ViewTree::new();
        let content = tree.create_view("content", Rect::from_size(400.0, 800.0));
        let page = tree.create_view("page", Rect::default());
        assert!(tree.add_subview(page, content));

        let mut stack = PageStack::new(content);
        assert!(!stack.set_pages(page, content, &mut tree));
        assert_eq!(stack.top_index(), None);
        assert_eq!(stack.pages(), None);
        assert!(!stack.add_page(0, &mut tree));
    }

    #[test]
    fn test_left_page_on_top_after_set_pages() {
        let (nav, left, _) = navigator();
        assert_eq!(nav.top_index(), Some(0));
        assert_eq!(nav.top_page(), Some(left));
        assert_eq!(nav.tree().subviews(nav.content()), &[left]);
        assert_eq!(nav.tree().frame(left), Some(Rect::from_size(400.0, 800.0)));
        assert_eq!(nav.recognizer().map(|r| r.edge), Some(ScreenEdge::Right));
    }

    #[test]
    fn test_set_background_first_call_only() {
        let (mut nav, _, _) = navigator();
        let camera = nav.tree_mut().create_view("camera", Rect::default());
        let other = nav.tree_mut().create_view("other", Rect::default());

        assert!(nav.set_background(camera));
        assert!(!nav.set_background(other));
        assert_eq!(nav.background(), Some(camera));
        assert_eq!(nav.tree().subviews(nav.background_container()), &[camera]);
    }

    #[test]
    fn test_may_begin_transition() {
        let (nav, _, _) = navigator();
        assert!(nav.may_begin_transition(TransitionDirection::Backward));
        assert!(!nav.may_begin_transition(TransitionDirection::Forward));

        let empty = SwipeNavigator::new(Rect::from_size(400.0, 800.0), &SwipeConfig::default());
        assert!(!empty.may_begin_transition(TransitionDirection::Backward));
    }

    #[test]
    fn test_show_page_without_animation() {
        let (mut nav, left, right) = navigator();
        let events = nav.show_page(1, false).unwrap();
        assert_eq!(events.iter().filter_map(|e| e.completed()).collect::<Vec<_>>(), vec![true]);

        assert_eq!(nav.top_index(), Some(1));
        assert_eq!(nav.tree().subviews(nav.content()), &[right]);
        assert_eq!(nav.tree().superview(left), None);
        assert_eq!(nav.recognizer().map(|r| r.edge), Some(ScreenEdge::Left));

        // Decoration rests on the right page
        assert_eq!(nav.tree().alpha(nav.tint_view()), Some(1.0));
        let travel = nav.tree().transform(nav.indicator()).unwrap();
        assert!(approx_eq(travel.tx, -400.0 + 2.0 * 20.0 + 4.0));
    }

    #[test]
    fn test_show_page_animated_and_back() {
        let (mut nav, left, right) = navigator();
        assert!(nav.show_page(1, true).unwrap().iter().all(|e| !e.is_settled()));
        assert!(nav.is_transitioning());

        let events = run_until_idle(&mut nav);
        assert_eq!(events.iter().filter(|e| e.is_settled()).count(), 1);
        assert_eq!(nav.top_page(), Some(right));

        nav.show_page(0, true).unwrap();
        run_until_idle(&mut nav);
        assert_eq!(nav.top_page(), Some(left));
        assert_eq!(nav.tree().frame(left), Some(Rect::from_size(400.0, 800.0)));
        assert_eq!(nav.tree().alpha(nav.tint_view()), Some(0.0));
        assert_eq!(nav.tree().transform(nav.indicator()), Some(Transform2D::identity()));
    }

    #[test]
    fn test_show_current_page_is_noop() {
        let (mut nav, _, _) = navigator();
        assert!(nav.show_page(0, true).unwrap().is_empty());
        assert!(!nav.is_transitioning());
        assert_eq!(nav.show_page(2, true), Err(NavigationError::PageIndex(2)));
    }

    #[test]
    fn test_show_page_while_transitioning() {
        let (mut nav, _, _) = navigator();
        nav.show_page(1, true).unwrap();
        assert_eq!(
            nav.show_page(0, true),
            Err(NavigationError::Transition(TransitionError::Conflict))
        );
    }

    #[test]
    fn test_show_current_page_during_gesture_conflicts() {
        let (mut nav, left, _) = navigator();
        nav.handle_pan(GestureSample::began(Point::new(-300.0, 0.0)));
        assert!(nav.is_transitioning());
        assert_eq!(
            nav.show_page(0, false),
            Err(NavigationError::Transition(TransitionError::Conflict))
        );
        assert_eq!(nav.top_page(), Some(left));
    }

    #[test]
    fn test_overlap_style_leaves_decoration_alone() {
        let mut config = SwipeConfig::default();
        config.transition.style = TransitionStyle::Overlap;
        let mut nav = SwipeNavigator::new(Rect::from_size(400.0, 800.0), &config);
        let left = nav.tree_mut().create_view("left", Rect::default());
        let right = nav.tree_mut().create_view("right", Rect::default());
        nav.set_pages(&[left, right]).unwrap();

        nav.show_page(1, false).unwrap();
        assert_eq!(nav.top_page(), Some(right));
        assert_eq!(nav.tree().alpha(nav.tint_view()), Some(0.0));
    }

    #[test]
    fn test_completion_speed_from_config() {
        let mut config = SwipeConfig::default();
        config.playback.completion_speed = 2.0;
        let mut nav = SwipeNavigator::new(Rect::from_size(400.0, 800.0), &config);
        assert_eq!(nav.completion_speed(), 2.0);
        nav.set_completion_speed(-1.0);
        assert_eq!(nav.completion_speed(), 1.0);
    }
}
