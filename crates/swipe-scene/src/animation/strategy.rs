//! Animation strategies for a screen transition.
//!
//! A strategy decides how the two screens are stacked, where they start,
//! where they end, and what happens to any decoration around them. The
//! driver calls the four operations in order:
//!
//! ```text
//! setup_hierarchy → prepare → animate → finalize(completed)
//! ```
//!
//! `animate` only writes end values. The driver captures the tree before and
//! after it and interpolates between the two, so strategies never deal with
//! time.
//!
//! Two strategies ship here:
//! - [`OverlapAnimation`]: the moving screen slides over the one underneath.
//! - [`NavigationAnimation`]: the same slide, plus a background tint that
//!   fades in and a side indicator that travels across and changes color.

use std::fmt::Debug;

use super::context::TransitionContext;
use super::transform::Transform2D;
use super::types::{Color, TransitionDirection};
use crate::view::{ViewId, ViewTree};

/// Operations a transition style provides to the driver.
pub trait TransitionAnimation: Debug + Send {
    /// Insert both screens into the container. The screen that moves during
    /// the animation ends up on top.
    fn setup_hierarchy(&self, tree: &mut ViewTree, ctx: &TransitionContext);

    /// Put the screens and decoration into their start state.
    fn prepare(&self, tree: &mut ViewTree, ctx: &TransitionContext);

    /// Write the end state. Interpolated by the driver.
    fn animate(&self, tree: &mut ViewTree, ctx: &TransitionContext);

    /// Settle state once the transition is over. Idempotent.
    fn finalize(&self, tree: &mut ViewTree, ctx: &TransitionContext, completed: bool);
}

/// Slide-over transition without decoration.
///
/// `Backward`: the incoming screen slides in from the trailing side over the
/// outgoing one. `Forward`: the outgoing screen slides off toward +x,
/// revealing the incoming screen in place underneath.
#[derive(Debug, Clone, Copy, Default)]
pub struct OverlapAnimation;

impl TransitionAnimation for OverlapAnimation {
    fn setup_hierarchy(&self, tree: &mut ViewTree, ctx: &TransitionContext) {
        let container = ctx.container();
        match ctx.direction() {
            TransitionDirection::Backward => {
                tree.add_subview(container, ctx.from_view());
                tree.add_subview(container, ctx.to_view());
            }
            TransitionDirection::Forward => {
                tree.add_subview(container, ctx.to_view());
                tree.add_subview(container, ctx.from_view());
            }
        }
    }

    fn prepare(&self, tree: &mut ViewTree, ctx: &TransitionContext) {
        if ctx.direction() == TransitionDirection::Backward {
            tree.set_frame(ctx.to_view(), ctx.frames().incoming_start);
        }
    }

    fn animate(&self, tree: &mut ViewTree, ctx: &TransitionContext) {
        match ctx.direction() {
            TransitionDirection::Backward => {
                tree.set_frame(ctx.to_view(), ctx.frames().incoming_end);
            }
            TransitionDirection::Forward => {
                tree.set_frame(ctx.from_view(), ctx.frames().outgoing_end);
            }
        }
    }

    fn finalize(&self, tree: &mut ViewTree, ctx: &TransitionContext, completed: bool) {
        if !completed {
            tree.set_frame(ctx.from_view(), ctx.frames().outgoing_start);
        }
    }
}

/// Decoration values driven by [`NavigationAnimation`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecorationState {
    pub tint_alpha: f32,
    pub indicator_transform: Transform2D,
    pub indicator_color: Color,
}

/// Slide-over transition that also drives the background tint and the side
/// indicator.
///
/// Decoration has one rest state per page: on the left page the tint is
/// hidden and the indicator sits at its own position in its base color; on
/// the right page the tint is fully shown and the indicator has travelled to
/// the opposite edge in the opaque tint color.
#[derive(Debug, Clone)]
pub struct NavigationAnimation {
    slide: OverlapAnimation,
    tint_view: ViewId,
    indicator: ViewId,
    tint: Color,
    indicator_color: Color,
    indicator_shift: f32,
    indicator_width: f32,
}

impl NavigationAnimation {
    pub fn new(
        tint_view: ViewId,
        indicator: ViewId,
        tint: Color,
        indicator_color: Color,
        indicator_shift: f32,
        indicator_width: f32,
    ) -> Self {
        Self {
            slide: OverlapAnimation,
            tint_view,
            indicator,
            tint,
            indicator_color,
            indicator_shift,
            indicator_width,
        }
    }

    /// Translation that carries the indicator from the trailing edge to the
    /// same inset from the leading edge.
    pub fn indicator_travel(&self, container_width: f32) -> Transform2D {
        Transform2D::translate(
            -container_width + self.indicator_shift * 2.0 + self.indicator_width,
            0.0,
        )
    }

    /// Rest state for the page that is visible.
    pub fn resting(&self, right_page_visible: bool, container_width: f32) -> DecorationState {
        if right_page_visible {
            DecorationState {
                tint_alpha: 1.0,
                indicator_transform: self.indicator_travel(container_width),
                indicator_color: self.tint.with_alpha(1.0),
            }
        } else {
            DecorationState {
                tint_alpha: 0.0,
                indicator_transform: Transform2D::identity(),
                indicator_color: self.indicator_color,
            }
        }
    }

    /// Current decoration values read back from the tree.
    pub fn decoration(&self, tree: &ViewTree) -> DecorationState {
        DecorationState {
            tint_alpha: tree.alpha(self.tint_view).unwrap_or(0.0),
            indicator_transform: tree.transform(self.indicator).unwrap_or_default(),
            indicator_color: tree.background(self.indicator).unwrap_or(Color::CLEAR),
        }
    }

    pub fn apply_decoration(&self, tree: &mut ViewTree, state: DecorationState) {
        tree.set_alpha(self.tint_view, state.tint_alpha);
        tree.set_transform(self.indicator, state.indicator_transform);
        tree.set_background(self.indicator, state.indicator_color);
    }

    // A Backward transition leaves the left page and lands on the right one.
    fn from_is_right(ctx: &TransitionContext) -> bool {
        ctx.direction() == TransitionDirection::Forward
    }

    fn settle(&self, tree: &mut ViewTree, ctx: &TransitionContext, right_page_visible: bool) {
        let state = self.resting(right_page_visible, ctx.container_bounds().w);
        self.apply_decoration(tree, state);
    }
}

impl TransitionAnimation for NavigationAnimation {
    fn setup_hierarchy(&self, tree: &mut ViewTree, ctx: &TransitionContext) {
        self.slide.setup_hierarchy(tree, ctx);
    }

    fn prepare(&self, tree: &mut ViewTree, ctx: &TransitionContext) {
        self.slide.prepare(tree, ctx);
        self.settle(tree, ctx, Self::from_is_right(ctx));
    }

    fn animate(&self, tree: &mut ViewTree, ctx: &TransitionContext) {
        self.slide.animate(tree, ctx);
        self.settle(tree, ctx, !Self::from_is_right(ctx));
    }

    fn finalize(&self, tree: &mut ViewTree, ctx: &TransitionContext, completed: bool) {
        self.slide.finalize(tree, ctx, completed);
        let from_is_right = Self::from_is_right(ctx);
        let visible_is_right = if completed { !from_is_right } else { from_is_right };
        self.settle(tree, ctx, visible_is_right);
    }
}
