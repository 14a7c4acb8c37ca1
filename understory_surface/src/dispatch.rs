// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Delivering input events to the nodes that declare handlers for them.

use alloc::vec::Vec;

use understory_render_tree::{EventCx, HitFilter, InputEvent, NodeId, RenderTree};

/// Outcome of delivering one input event.
///
/// Misses are not errors; this only reports what happened.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dispatch {
    /// Nodes whose handler ran, in delivery order.
    pub delivered: Vec<NodeId>,
    /// At least one handler asked for a redraw.
    pub redraw: bool,
}

impl Dispatch {
    /// The first node whose handler ran.
    pub fn target(&self) -> Option<NodeId> {
        self.delivered.first().copied()
    }

    /// True if no handler ran.
    pub fn is_miss(&self) -> bool {
        self.delivered.is_empty()
    }

    /// Run `target`'s handler for `event.kind`, recording the outcome.
    ///
    /// Returns `false` if `target` is gone or no longer declares the handler.
    pub(crate) fn deliver<C>(
        &mut self,
        tree: &mut RenderTree<C>,
        target: NodeId,
        event: &InputEvent,
    ) -> bool {
        let mut cx = EventCx::new(target);
        if !tree.dispatch(target, event, &mut cx) {
            log::trace!("{}: {target:?} has no handler", event.kind.name());
            return false;
        }
        self.delivered.push(target);
        self.redraw |= cx.redraw_requested();
        true
    }
}

/// The topmost node under the event's point declaring a handler for its kind.
pub fn resolve_target<C>(tree: &RenderTree<C>, event: &InputEvent) -> Option<NodeId> {
    let point = event.hit_point()?;
    tree.hit_test(point, HitFilter::Kind(event.kind)).map(|hit| hit.node)
}

/// Resolve a fresh target for `event` and deliver to it.
///
/// Used for every kind except touch start and end, which go through the
/// [`TouchTracker`](crate::TouchTracker).
pub fn dispatch_to_hit<C>(tree: &mut RenderTree<C>, event: &InputEvent) -> Dispatch {
    let mut out = Dispatch::default();
    match resolve_target(tree, event) {
        Some(target) => {
            out.deliver(tree, target, event);
        }
        None => log::trace!("{}: no target", event.kind.name()),
    }
    out
}
