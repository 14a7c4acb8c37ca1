// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, updates, traversal, and queries.

use alloc::boxed::Box;
use alloc::vec::Vec;
use kurbo::{Insets, Point, Vec2};

use crate::event::{EventCx, EventKind, HandlerKey, HandlerMask, InputEvent};
use crate::node::{DrawFn, LayoutCx, LayoutFn, PaintCx, RenderNode, clamp_alpha};
use crate::types::{Frame, NodeId};

/// Nodes below this alpha are invisible to hit testing, together with their subtrees.
pub const MIN_HIT_ALPHA: f64 = 0.01;

impl<C> Default for RenderTree<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// A single-rooted, retained tree of [`RenderNode`]s.
///
/// The tree owns every node. Callers only hold [`NodeId`]s, which go stale
/// when the node is removed. `C` is the canvas type paint hooks draw onto.
pub struct RenderTree<C> {
    nodes: Vec<Option<Node<C>>>, // slots
    generations: Vec<u32>,       // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    root: Option<NodeId>,
}

impl<C> core::fmt::Debug for RenderTree<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.len();
        let free = self.free_list.len();
        f.debug_struct("RenderTree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

/// Result of a hit test.
#[derive(Clone, Debug, PartialEq)]
pub struct Hit {
    /// The matched node.
    pub node: NodeId,
    /// Path from root to node (inclusive).
    pub path: Vec<NodeId>,
    /// The node's frame in surface coordinates.
    pub frame: Frame,
}

/// Which nodes a hit test may return.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitFilter {
    /// Only nodes declaring the handler for this kind.
    Kind(EventKind),
    /// Nodes declaring at least one handler.
    AnyHandler,
    /// Every node, handlers or not.
    All,
}

impl HitFilter {
    fn accepts(self, mask: HandlerMask) -> bool {
        match self {
            Self::Kind(kind) => mask.contains(kind.handler_key().mask()),
            Self::AnyHandler => !mask.is_empty(),
            Self::All => true,
        }
    }
}

struct Node<C> {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    local: RenderNode<C>,
}

impl<C> Node<C> {
    fn new(generation: u32, local: RenderNode<C>) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            local,
        }
    }
}

impl<C> RenderTree<C> {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            root: None,
        }
    }

    /// The root node, if one is set.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free_list.len()
    }

    /// True if the tree holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Install `node` as the root, removing any previous root and its subtree.
    pub fn set_root(&mut self, node: RenderNode<C>) -> NodeId {
        self.clear();
        let id = self.alloc(node);
        self.root = Some(id);
        id
    }

    /// Remove the root and everything under it.
    pub fn clear(&mut self) {
        if let Some(root) = self.root.take() {
            self.remove(root);
        }
    }

    /// Append `node` as the last (topmost) child of `parent`.
    ///
    /// Returns `None` if `parent` is stale.
    pub fn insert(&mut self, parent: NodeId, node: RenderNode<C>) -> Option<NodeId> {
        let len = self.children(parent).len();
        self.insert_at(parent, len, node)
    }

    /// Insert `node` as a child of `parent` at `index` (clamped to the child count).
    ///
    /// Returns `None` if `parent` is stale.
    pub fn insert_at(
        &mut self,
        parent: NodeId,
        index: usize,
        node: RenderNode<C>,
    ) -> Option<NodeId> {
        if !self.is_alive(parent) {
            return None;
        }
        let id = self.alloc(node);
        self.link_parent(id, parent, index);
        Some(id)
    }

    /// Remove a node (and its subtree) from the tree.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        if self.root == Some(id) {
            self.root = None;
        }
        self.free_subtree(id);
    }

    /// Move `id` under `new_parent` at `index` (clamped).
    ///
    /// Returns `false` and leaves the tree unchanged if either id is stale, if
    /// `id` is the root, or if the move would make `id` its own ancestor.
    pub fn reparent(&mut self, id: NodeId, new_parent: NodeId, index: usize) -> bool {
        if !self.is_alive(id) || !self.is_alive(new_parent) || self.root == Some(id) {
            return false;
        }
        if self.is_ancestor_or_self(id, new_parent) {
            return false;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        self.link_parent(id, new_parent, index);
        true
    }

    /// Replace a node's frame. Returns `false` if `id` is stale.
    pub fn set_frame(&mut self, id: NodeId, frame: Frame) -> bool {
        self.with_local(id, |n| n.frame = frame)
    }

    /// Update the stacking order among siblings.
    pub fn set_z_index(&mut self, id: NodeId, z: i32) -> bool {
        self.with_local(id, |n| n.z_index = z)
    }

    /// Update opacity, clamped to `[0, 1]`.
    pub fn set_alpha(&mut self, id: NodeId, alpha: f64) -> bool {
        self.with_local(id, |n| n.alpha = clamp_alpha(alpha))
    }

    /// Update the extra hit area around the frame.
    pub fn set_hit_outsets(&mut self, id: NodeId, outsets: Insets) -> bool {
        self.with_local(id, |n| n.hit_outsets = outsets)
    }

    /// Replace (or clear) the paint hook.
    pub fn set_on_draw(&mut self, id: NodeId, f: Option<DrawFn<C>>) -> bool {
        self.with_local(id, |n| n.on_draw = f)
    }

    /// Replace (or clear) the layout hook.
    pub fn set_on_layout(&mut self, id: NodeId, f: Option<LayoutFn<C>>) -> bool {
        self.with_local(id, |n| n.on_layout = f)
    }

    /// Declare (or replace) the handler for `key`.
    pub fn set_handler(
        &mut self,
        id: NodeId,
        key: HandlerKey,
        f: impl FnMut(&InputEvent, &mut EventCx) + 'static,
    ) -> bool {
        self.with_local(id, |n| n.set_handler(key, Box::new(f)))
    }

    /// Stop declaring the handler for `key`.
    pub fn remove_handler(&mut self, id: NodeId, key: HandlerKey) -> bool {
        self.with_local(id, |n| {
            n.handlers.remove(key);
        })
    }

    /// Returns true if `id` refers to a live node.
    ///
    /// A `NodeId` is considered live if its slot exists and its generation matches
    /// the current generation stored in that slot.
    /// See [`NodeId`] docs for the generational semantics.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node_opt(id).is_some()
    }

    /// The parent of `id`, or `None` for the root and stale ids.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id)?.parent
    }

    /// Children of `id` in insertion order. Empty for stale ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node_opt(id).map_or(&[], |n| n.children.as_slice())
    }

    /// The node's frame in parent-local coordinates.
    pub fn frame(&self, id: NodeId) -> Option<Frame> {
        Some(self.node_opt(id)?.local.frame)
    }

    /// The node's frame in surface coordinates: its own frame moved by the
    /// origins of its ancestors below the root.
    ///
    /// The root's origin only places the surface within its host, so the root
    /// itself reports `(0, 0, width, height)`.
    pub fn absolute_frame(&self, id: NodeId) -> Option<Frame> {
        let mut frame = self.frame(id)?;
        let mut cur = id;
        while let Some(p) = self.parent(cur) {
            frame = frame.translate(self.node(p).local.frame.origin().to_vec2());
            cur = p;
        }
        Some(frame.translate(self.root_offset(cur)))
    }

    /// Returns the z-index of a node if the identifier is live.
    pub fn z_index(&self, id: NodeId) -> Option<i32> {
        Some(self.node_opt(id)?.local.z_index)
    }

    /// The node's own opacity, if the identifier is live.
    pub fn alpha(&self, id: NodeId) -> Option<f64> {
        Some(self.node_opt(id)?.local.alpha)
    }

    /// Handlers declared by a node, empty for stale ids.
    pub fn handler_mask(&self, id: NodeId) -> HandlerMask {
        self.node_opt(id)
            .map_or(HandlerMask::empty(), |n| n.local.handlers.mask())
    }

    /// Run every layout hook, parent before children.
    ///
    /// A node's child list is read after its own hook has run, so a parent may
    /// reposition children before they are visited.
    pub fn layout(&mut self) {
        if let Some(root) = self.root {
            self.layout_recursive(root);
        }
    }

    /// Paint the tree depth-first: each node's hook, then its children
    /// back-to-front (ascending z-index, insertion order among equals).
    ///
    /// Nodes without a paint hook are transparent containers. Subtrees with zero
    /// alpha are skipped. Returns the number of paint hooks invoked.
    pub fn paint(&mut self, canvas: &mut C) -> usize {
        let Some(root) = self.root else {
            return 0;
        };
        let mut painted = 0;
        let offset = self.root_offset(root);
        self.paint_recursive(root, offset, 1.0, canvas, &mut painted);
        painted
    }

    /// Hit test a surface-space point. Returns the topmost matching node.
    ///
    /// Children are visited before their parent, front-to-back (the reverse of
    /// paint order), so the deepest, visually topmost match wins. Frames are not
    /// clips: a child can be hit outside its parent's bounds.
    pub fn hit_test(&self, pt: Point, filter: HitFilter) -> Option<Hit> {
        let root = self.root?;
        let mut path = Vec::new();
        let offset = self.root_offset(root);
        let frame = self.hit_recursive(root, pt, offset, filter, &mut path)?;
        let node = *path.last()?;
        Some(Hit { node, path, frame })
    }

    /// Invoke the handler `target` declares for `event.kind`.
    ///
    /// Returns `false` if `target` is stale or does not declare that handler.
    pub fn dispatch(&mut self, target: NodeId, event: &InputEvent, cx: &mut EventCx) -> bool {
        let key = event.kind.handler_key();
        let Some(node) = self.node_opt_mut(target) else {
            return false;
        };
        let Some(handler) = node.local.handlers.get_mut(key) else {
            return false;
        };
        handler(event, cx);
        true
    }

    // --- internals ---

    /// Offset that moves the root to the surface origin.
    fn root_offset(&self, root: NodeId) -> Vec2 {
        self.node_opt(root)
            .map_or(Vec2::ZERO, |n| -n.local.frame.origin().to_vec2())
    }

    fn alloc(&mut self, local: RenderNode<C>) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, local));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId stores 32-bit slot indices."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, local)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId stores 32-bit slot indices."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        NodeId::new(idx, generation)
    }

    fn free_subtree(&mut self, id: NodeId) {
        let children = core::mem::take(&mut self.node_mut(id).children);
        for child in children {
            self.free_subtree(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    fn node_opt(&self, id: NodeId) -> Option<&Node<C>> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node<C>> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    /// Access a node; panics if `id` is stale.
    fn node(&self, id: NodeId) -> &Node<C> {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    /// Access a node mutably; panics if `id` is stale.
    fn node_mut(&mut self, id: NodeId) -> &mut Node<C> {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    fn with_local(&mut self, id: NodeId, f: impl FnOnce(&mut RenderNode<C>)) -> bool {
        match self.node_opt_mut(id) {
            Some(n) => {
                f(&mut n.local);
                true
            }
            None => false,
        }
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId, index: usize) {
        let parent_node = self.node_mut(parent);
        let index = index.min(parent_node.children.len());
        parent_node.children.insert(index, id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        let p = self.node_mut(parent);
        p.children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, mut id: NodeId) -> bool {
        loop {
            if id == ancestor {
                return true;
            }
            match self.parent(id) {
                Some(p) => id = p,
                None => return false,
            }
        }
    }

    /// Children in paint order: ascending z, stable on insertion order.
    fn paint_order(&self, id: NodeId) -> Vec<NodeId> {
        let mut children = self.children(id).to_vec();
        children.sort_by_key(|c| self.node(*c).local.z_index);
        children
    }

    fn layout_recursive(&mut self, id: NodeId) {
        let hook = match self.node_opt_mut(id) {
            Some(n) => n.local.on_layout.take(),
            None => return,
        };
        if let Some(mut hook) = hook {
            hook(&mut LayoutCx {
                tree: self,
                node: id,
            });
            if let Some(n) = self.node_opt_mut(id) {
                n.local.on_layout.get_or_insert(hook);
            }
        }
        let children = self.children(id).to_vec();
        for child in children {
            self.layout_recursive(child);
        }
    }

    fn paint_recursive(
        &mut self,
        id: NodeId,
        origin: Vec2,
        parent_alpha: f64,
        canvas: &mut C,
        painted: &mut usize,
    ) {
        let (frame, alpha) = {
            let Some(node) = self.node_opt_mut(id) else {
                return;
            };
            if node.local.alpha <= 0.0 {
                return;
            }
            let frame = node.local.frame.translate(origin);
            let alpha = parent_alpha * node.local.alpha;
            if let Some(draw) = node.local.on_draw.as_mut() {
                draw(canvas, &PaintCx {
                    node: id,
                    frame,
                    alpha,
                });
                *painted += 1;
            }
            (frame, alpha)
        };
        for child in self.paint_order(id) {
            self.paint_recursive(child, frame.origin().to_vec2(), alpha, canvas, painted);
        }
    }

    fn hit_recursive(
        &self,
        id: NodeId,
        pt: Point,
        origin: Vec2,
        filter: HitFilter,
        path: &mut Vec<NodeId>,
    ) -> Option<Frame> {
        let node = self.node_opt(id)?;
        if node.local.alpha < MIN_HIT_ALPHA {
            return None;
        }
        let frame = node.local.frame.translate(origin);
        path.push(id);
        for child in self.paint_order(id).into_iter().rev() {
            if let Some(hit) = self.hit_recursive(child, pt, frame.origin().to_vec2(), filter, path)
            {
                return Some(hit);
            }
        }
        if filter.accepts(node.local.handlers.mask())
            && frame.outset(node.local.hit_outsets).contains(pt)
        {
            return Some(frame);
        }
        path.pop();
        None
    }
}
