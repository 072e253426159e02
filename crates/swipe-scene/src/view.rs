//! Retained view tree standing in for platform views.
//!
//! Views live in an arena and are addressed by copyable [`ViewId`] handles.
//! A view is never freed: detaching it from its parent only removes it from
//! the hierarchy, the same way a page stays alive while it is off screen.
//!
//! Each view carries the handful of properties a screen transition touches:
//! frame, alpha, transform and background color, plus whether it holds text
//! input focus.

use serde::{Deserialize, Serialize};

use crate::animation::transform::Transform2D;
use crate::animation::types::{Color, Rect};

/// Handle to a view in a [`ViewTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ViewId(pub u32);

/// Animatable properties of a view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewProps {
    pub frame: Rect,
    /// Opacity in [0, 1].
    pub alpha: f32,
    pub transform: Transform2D,
    pub background: Color,
}

impl Default for ViewProps {
    fn default() -> Self {
        Self {
            frame: Rect::default(),
            alpha: 1.0,
            transform: Transform2D::identity(),
            background: Color::CLEAR,
        }
    }
}

#[derive(Debug, Clone)]
struct ViewNode {
    name: String,
    props: ViewProps,
    parent: Option<ViewId>,
    /// Back to front.
    children: Vec<ViewId>,
    accepts_focus: bool,
}

/// Property values of every view in a tree, indexed by `ViewId`.
pub type ViewSnapshot = Vec<ViewProps>;

/// Arena of views forming one or more hierarchies.
#[derive(Debug, Default)]
pub struct ViewTree {
    nodes: Vec<ViewNode>,
    focused: Option<ViewId>,
}

impl ViewTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached view with the given frame.
    pub fn create_view(&mut self, name: impl Into<String>, frame: Rect) -> ViewId {
        let id = ViewId(self.nodes.len() as u32);
        self.nodes.push(ViewNode {
            name: name.into(),
            props: ViewProps {
                frame,
                ..ViewProps::default()
            },
            parent: None,
            children: Vec::new(),
            accepts_focus: false,
        });
        id
    }

    pub fn contains(&self, view: ViewId) -> bool {
        (view.0 as usize) < self.nodes.len()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn node(&self, view: ViewId) -> Option<&ViewNode> {
        self.nodes.get(view.0 as usize)
    }

    fn node_mut(&mut self, view: ViewId) -> Option<&mut ViewNode> {
        self.nodes.get_mut(view.0 as usize)
    }

    pub fn name(&self, view: ViewId) -> Option<&str> {
        self.node(view).map(|n| n.name.as_str())
    }

    // ---- hierarchy ----

    /// Attach `child` as the front-most subview of `parent`.
    ///
    /// A child that already has a parent is moved; re-adding a child to its
    /// current parent brings it to the front. Returns false for unknown views
    /// or when the move would create a cycle.
    pub fn add_subview(&mut self, parent: ViewId, child: ViewId) -> bool {
        if !self.contains(parent) || !self.contains(child) {
            return false;
        }
        if parent == child || self.is_descendant(parent, child) {
            return false;
        }
        self.unlink(child);
        if let Some(node) = self.node_mut(parent) {
            node.children.push(child);
        }
        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
        }
        true
    }

    /// Detach a view from its parent. Focus held anywhere in the detached
    /// subtree is resigned. Returns false when the view had no parent.
    pub fn remove_from_superview(&mut self, view: ViewId) -> bool {
        if self.superview(view).is_none() {
            return false;
        }
        self.end_editing(view);
        self.unlink(view);
        true
    }

    fn unlink(&mut self, child: ViewId) {
        let Some(parent) = self.node(child).and_then(|n| n.parent) else {
            return;
        };
        if let Some(node) = self.node_mut(parent) {
            node.children.retain(|c| *c != child);
        }
        if let Some(node) = self.node_mut(child) {
            node.parent = None;
        }
    }

    pub fn superview(&self, view: ViewId) -> Option<ViewId> {
        self.node(view).and_then(|n| n.parent)
    }

    /// Children of `view`, back to front.
    pub fn subviews(&self, view: ViewId) -> &[ViewId] {
        self.node(view).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// True if `view` is `ancestor` or lies anywhere below it.
    pub fn is_descendant(&self, view: ViewId, ancestor: ViewId) -> bool {
        let mut current = Some(view);
        while let Some(v) = current {
            if v == ancestor {
                return true;
            }
            current = self.superview(v);
        }
        false
    }

    /// True if `view` is a direct subview of `container`.
    pub fn is_attached_to(&self, view: ViewId, container: ViewId) -> bool {
        self.superview(view) == Some(container)
    }

    // ---- properties ----

    pub fn props(&self, view: ViewId) -> Option<ViewProps> {
        self.node(view).map(|n| n.props)
    }

    pub fn apply_props(&mut self, view: ViewId, props: ViewProps) {
        if let Some(node) = self.node_mut(view) {
            node.props = props;
        }
    }

    pub fn frame(&self, view: ViewId) -> Option<Rect> {
        self.node(view).map(|n| n.props.frame)
    }

    pub fn set_frame(&mut self, view: ViewId, frame: Rect) {
        if let Some(node) = self.node_mut(view) {
            node.props.frame = frame;
        }
    }

    pub fn set_origin_x(&mut self, view: ViewId, x: f32) {
        if let Some(node) = self.node_mut(view) {
            node.props.frame.x = x;
        }
    }

    /// The view's own coordinate space: its frame size at the origin.
    pub fn bounds(&self, view: ViewId) -> Option<Rect> {
        self.frame(view).map(|f| f.bounds())
    }

    pub fn alpha(&self, view: ViewId) -> Option<f32> {
        self.node(view).map(|n| n.props.alpha)
    }

    pub fn set_alpha(&mut self, view: ViewId, alpha: f32) {
        if let Some(node) = self.node_mut(view) {
            node.props.alpha = alpha.clamp(0.0, 1.0);
        }
    }

    pub fn transform(&self, view: ViewId) -> Option<Transform2D> {
        self.node(view).map(|n| n.props.transform)
    }

    pub fn set_transform(&mut self, view: ViewId, transform: Transform2D) {
        if let Some(node) = self.node_mut(view) {
            node.props.transform = transform;
        }
    }

    pub fn background(&self, view: ViewId) -> Option<Color> {
        self.node(view).map(|n| n.props.background)
    }

    pub fn set_background(&mut self, view: ViewId, color: Color) {
        if let Some(node) = self.node_mut(view) {
            node.props.background = color;
        }
    }

    // ---- text input focus ----

    pub fn set_accepts_focus(&mut self, view: ViewId, accepts: bool) {
        if let Some(node) = self.node_mut(view) {
            node.accepts_focus = accepts;
        }
        if !accepts && self.focused == Some(view) {
            self.focused = None;
        }
    }

    /// Give text input focus to `view`. Only views that accept focus can
    /// hold it.
    pub fn focus(&mut self, view: ViewId) -> bool {
        match self.node(view) {
            Some(node) if node.accepts_focus => {
                self.focused = Some(view);
                true
            }
            _ => false,
        }
    }

    pub fn focused_view(&self) -> Option<ViewId> {
        self.focused
    }

    /// Resign focus held by `view` or any view below it.
    /// Returns true if something resigned.
    pub fn end_editing(&mut self, view: ViewId) -> bool {
        match self.focused {
            Some(f) if self.is_descendant(f, view) => {
                self.focused = None;
                true
            }
            _ => false,
        }
    }

    // ---- snapshots ----

    /// Capture the properties of every view.
    pub fn snapshot(&self) -> ViewSnapshot {
        self.nodes.iter().map(|n| n.props).collect()
    }
}
