// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render node descriptors and the contexts passed to their hooks.

use alloc::boxed::Box;
use kurbo::Insets;

use crate::event::{EventCx, Handler, HandlerKey, HandlerMask, HandlerTable, InputEvent};
use crate::tree::RenderTree;
use crate::types::{Frame, NodeId};

/// Paint hook: draws the node's own content onto the canvas.
pub type DrawFn<C> = Box<dyn FnMut(&mut C, &PaintCx)>;

/// Layout hook: adjusts the node's frame and its children's frames.
pub type LayoutFn<C> = Box<dyn FnMut(&mut LayoutCx<'_, C>)>;

/// Everything a node carries apart from its place in the tree.
///
/// Build one with [`RenderNode::new`] and the `with_*`/`on_*` helpers, then
/// hand it to [`RenderTree::insert`] or [`RenderTree::set_root`].
pub struct RenderNode<C> {
    /// Bounds in parent-local coordinates.
    pub frame: Frame,
    /// Stacking order among siblings. Higher paints later and is hit first.
    pub z_index: i32,
    pub(crate) alpha: f64,
    /// Extra hit area around the frame. Does not affect painting.
    pub hit_outsets: Insets,
    pub(crate) on_draw: Option<DrawFn<C>>,
    pub(crate) on_layout: Option<LayoutFn<C>>,
    pub(crate) handlers: HandlerTable,
}

impl<C> core::fmt::Debug for RenderNode<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RenderNode")
            .field("frame", &self.frame)
            .field("z_index", &self.z_index)
            .field("alpha", &self.alpha)
            .field("hit_outsets", &self.hit_outsets)
            .field("has_draw", &self.on_draw.is_some())
            .field("has_layout", &self.on_layout.is_some())
            .field("handlers", &self.handlers.mask())
            .finish()
    }
}

impl<C> Default for RenderNode<C> {
    fn default() -> Self {
        Self::new(Frame::ZERO)
    }
}

impl<C> RenderNode<C> {
    /// A transparent container with the given frame and no hooks.
    pub fn new(frame: Frame) -> Self {
        Self {
            frame,
            z_index: 0,
            alpha: 1.0,
            hit_outsets: Insets::ZERO,
            on_draw: None,
            on_layout: None,
            handlers: HandlerTable::default(),
        }
    }

    /// Set the stacking order among siblings.
    #[must_use]
    pub fn with_z_index(mut self, z: i32) -> Self {
        self.z_index = z;
        self
    }

    /// Set the opacity, clamped to `[0, 1]`. NaN counts as fully transparent.
    ///
    /// Zero skips painting the subtree; below `0.01` the subtree is also
    /// skipped by hit testing.
    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = clamp_alpha(alpha);
        self
    }

    /// The opacity, always in `[0, 1]`.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Grow the hit area beyond the frame.
    #[must_use]
    pub fn with_hit_outsets(mut self, outsets: Insets) -> Self {
        self.hit_outsets = outsets;
        self
    }

    /// Set the paint hook.
    #[must_use]
    pub fn on_draw(mut self, f: impl FnMut(&mut C, &PaintCx) + 'static) -> Self {
        self.on_draw = Some(Box::new(f));
        self
    }

    /// Set the layout hook.
    #[must_use]
    pub fn on_layout(mut self, f: impl FnMut(&mut LayoutCx<'_, C>) + 'static) -> Self {
        self.on_layout = Some(Box::new(f));
        self
    }

    /// Declare a handler for `key`.
    #[must_use]
    pub fn with_handler(
        mut self,
        key: HandlerKey,
        f: impl FnMut(&InputEvent, &mut EventCx) + 'static,
    ) -> Self {
        self.handlers.set(key, Box::new(f));
        self
    }

    /// Declare `on_click`.
    #[must_use]
    pub fn on_click(self, f: impl FnMut(&InputEvent, &mut EventCx) + 'static) -> Self {
        self.with_handler(HandlerKey::Click, f)
    }

    /// Declare `on_touch_start`.
    #[must_use]
    pub fn on_touch_start(self, f: impl FnMut(&InputEvent, &mut EventCx) + 'static) -> Self {
        self.with_handler(HandlerKey::TouchStart, f)
    }

    /// Declare `on_touch_move`.
    #[must_use]
    pub fn on_touch_move(self, f: impl FnMut(&InputEvent, &mut EventCx) + 'static) -> Self {
        self.with_handler(HandlerKey::TouchMove, f)
    }

    /// Declare `on_touch_end`.
    #[must_use]
    pub fn on_touch_end(self, f: impl FnMut(&InputEvent, &mut EventCx) + 'static) -> Self {
        self.with_handler(HandlerKey::TouchEnd, f)
    }

    /// Declare `on_context_menu`.
    #[must_use]
    pub fn on_context_menu(self, f: impl FnMut(&InputEvent, &mut EventCx) + 'static) -> Self {
        self.with_handler(HandlerKey::ContextMenu, f)
    }

    /// Declare `on_double_click`.
    #[must_use]
    pub fn on_double_click(self, f: impl FnMut(&InputEvent, &mut EventCx) + 'static) -> Self {
        self.with_handler(HandlerKey::DoubleClick, f)
    }

    /// Handlers this node declares.
    pub fn handler_mask(&self) -> HandlerMask {
        self.handlers.mask()
    }

    pub(crate) fn set_handler(&mut self, key: HandlerKey, handler: Handler) {
        self.handlers.set(key, handler);
    }
}

pub(crate) fn clamp_alpha(alpha: f64) -> f64 {
    if alpha.is_nan() {
        0.0
    } else {
        alpha.clamp(0.0, 1.0)
    }
}

/// Context handed to a paint hook.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PaintCx {
    /// The node being painted.
    pub node: NodeId,
    /// The node's frame in surface coordinates (ancestor origins applied).
    pub frame: Frame,
    /// Product of the node's alpha and all of its ancestors'.
    pub alpha: f64,
}

/// Context handed to a layout hook.
///
/// A layout hook may move or resize its own node and its direct children.
/// It cannot change the structure of the tree.
pub struct LayoutCx<'a, C> {
    pub(crate) tree: &'a mut RenderTree<C>,
    pub(crate) node: NodeId,
}

impl<C> core::fmt::Debug for LayoutCx<'_, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LayoutCx")
            .field("node", &self.node)
            .finish_non_exhaustive()
    }
}

impl<C> LayoutCx<'_, C> {
    /// The node being laid out.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// The node's current frame.
    pub fn frame(&self) -> Frame {
        self.tree.frame(self.node).unwrap_or(Frame::ZERO)
    }

    /// Replace the node's frame.
    pub fn set_frame(&mut self, frame: Frame) {
        self.tree.set_frame(self.node, frame);
    }

    /// The node's children in insertion order.
    pub fn children(&self) -> &[NodeId] {
        self.tree.children(self.node)
    }

    /// The frame of a direct child, or `None` if `child` is not one.
    pub fn child_frame(&self, child: NodeId) -> Option<Frame> {
        if self.tree.parent(child) != Some(self.node) {
            return None;
        }
        self.tree.frame(child)
    }

    /// Replace the frame of a direct child.
    ///
    /// Returns `false` (and changes nothing) if `child` is not a direct child.
    pub fn set_child_frame(&mut self, child: NodeId, frame: Frame) -> bool {
        if self.tree.parent(child) != Some(self.node) {
            return false;
        }
        self.tree.set_frame(child, frame)
    }
}
