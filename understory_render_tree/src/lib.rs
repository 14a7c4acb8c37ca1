// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_render_tree --heading-base-level=0

//! Understory Render Tree: a Kurbo-native retained render tree.
//!
//! Understory Render Tree is the scene graph behind an imperative 2D drawing surface.
//!
//! - Represents a single-rooted hierarchy of frames with paint and layout hooks.
//! - Paints depth-first, back-to-front, onto any canvas type you choose.
//! - Resolves points back to the topmost node that declares a handler for an event kind.
//!
//! ## Where this fits: three-tree model
//!
//! - Widget tree: interaction/state, usually owned by a reconciler.
//! - Box tree: geometry/spatial indexing.
//! - Render tree: what gets painted, and who receives input (this crate).
//!
//! A reconciler mounts and updates nodes through a narrow mutation API; the
//! surface that owns the tree drives [`RenderTree::layout`], [`RenderTree::paint`],
//! [`RenderTree::hit_test`] and [`RenderTree::dispatch`].
//!
//! ## Coordinates
//!
//! Every [`Frame`] is relative to its parent's origin. The root's origin only
//! places the surface within its host: paint and hit testing work in surface
//! space, where the root sits at `(0, 0)`. A node's surface-space origin is the
//! sum of its ancestors' origins below the root. Frames do not clip: children
//! may paint, and be hit, outside their parent.
//!
//! ## Ordering
//!
//! Children paint in insertion order (back-to-front), ordered first by
//! [`RenderNode::z_index`]. Hit testing walks the exact reverse, children before
//! their parent, so the visually topmost and deepest match wins.
//!
//! ## API overview
//!
//! - [`RenderTree`]: arena owning the nodes.
//! - [`RenderNode`]: per-node data (frame, z-index, alpha, hit outsets) and hooks.
//! - [`NodeId`]: generational handle of a node; safe to hold after removal.
//! - [`Frame`]: immutable rectangle value.
//! - [`EventKind`] / [`HandlerKey`]: fixed table from event kinds to handler slots.
//! - [`HitFilter`]: restricts hit-test results.
//!
//! ### Minimal usage
//!
//! ```
//! use kurbo::Point;
//! use understory_render_tree::{EventKind, Frame, HitFilter, RenderNode, RenderTree};
//!
//! // Paint hooks append to a Vec<&str> standing in for a canvas.
//! let mut tree: RenderTree<Vec<&'static str>> = RenderTree::new();
//! let root = tree.set_root(RenderNode::new(Frame::new(0.0, 0.0, 300.0, 150.0)));
//!
//! let button = tree
//!     .insert(
//!         root,
//!         RenderNode::new(Frame::new(10.0, 10.0, 50.0, 50.0))
//!             .on_draw(|canvas: &mut Vec<&'static str>, _| canvas.push("button"))
//!             .on_click(|_, cx| cx.request_redraw()),
//!     )
//!     .unwrap();
//!
//! let mut canvas = Vec::new();
//! tree.paint(&mut canvas);
//! assert_eq!(canvas, ["button"]);
//!
//! let hit = tree
//!     .hit_test(Point::new(20.0, 20.0), HitFilter::Kind(EventKind::Click))
//!     .unwrap();
//! assert_eq!(hit.node, button);
//! assert_eq!(hit.path, [root, button]);
//!
//! assert!(tree
//!     .hit_test(Point::new(200.0, 100.0), HitFilter::Kind(EventKind::Click))
//!     .is_none());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod event;
mod node;
mod tree;
mod types;

pub use event::{
    EventCx, EventKind, Handler, HandlerKey, HandlerMask, InputEvent, Touch, TouchId,
};
pub use node::{DrawFn, LayoutCx, LayoutFn, PaintCx, RenderNode};
pub use tree::{Hit, HitFilter, MIN_HIT_ALPHA, RenderTree};
pub use types::{Frame, NodeId};
