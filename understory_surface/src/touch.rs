// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch capture: a touch keeps the target it started on until it ends.
//!
//! - Start resolves one target per event and records it for every touch that
//!   is active in that event.
//! - Move is never captured; it resolves afresh each time.
//! - End and cancel deliver to the captured target, never re-resolving, and
//!   forget the touch whether or not a handler ran.
//!
//! Targets are held as [`NodeId`]s, so a removed node is simply skipped.

use alloc::collections::BTreeMap;

use understory_render_tree::{InputEvent, NodeId, RenderTree, TouchId};

use crate::dispatch::{Dispatch, dispatch_to_hit, resolve_target};

/// Per-surface table from touch identifier to captured target.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TouchTracker {
    targets: BTreeMap<TouchId, NodeId>,
}

impl TouchTracker {
    /// An empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a touch start.
    pub fn start<C>(&mut self, tree: &mut RenderTree<C>, event: &InputEvent) -> Dispatch {
        let mut out = Dispatch::default();
        let Some(target) = resolve_target(tree, event) else {
            log::trace!("touchstart: no target, nothing captured");
            return out;
        };
        for touch in &event.touches {
            self.targets.insert(touch.identifier, target);
        }
        out.deliver(tree, target, event);
        out
    }

    /// Handle a touch move.
    pub fn moved<C>(&mut self, tree: &mut RenderTree<C>, event: &InputEvent) -> Dispatch {
        dispatch_to_hit(tree, event)
    }

    /// Handle a touch end or cancel.
    pub fn end<C>(&mut self, tree: &mut RenderTree<C>, event: &InputEvent) -> Dispatch {
        let mut out = Dispatch::default();
        for touch in &event.changed_touches {
            let Some(target) = self.targets.remove(&touch.identifier) else {
                log::trace!("{}: {:?} was not captured", event.kind.name(), touch.identifier);
                continue;
            };
            out.deliver(tree, target, event);
        }
        out
    }

    /// The target captured for `id`.
    pub fn target(&self, id: TouchId) -> Option<NodeId> {
        self.targets.get(&id).copied()
    }

    /// Number of captured touches.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// True if no touch is captured.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Forget every captured touch.
    pub fn clear(&mut self) {
        self.targets.clear();
    }
}
