// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_surface --heading-base-level=0

//! Understory Surface: a retained-mode drawing surface over a render tree.
//!
//! A [`Surface`] owns an [`understory_render_tree::RenderTree`] and connects it
//! to three collaborators through small traits:
//!
//! - a [`Reconciler`] that builds and updates the tree below the surface's root,
//! - a [`Canvas`] that the tree paints onto,
//! - a [`FrameHost`] that reports pixel density and calls back once per display
//!   refresh.
//!
//! ## Frames
//!
//! Every mount, prop change or handler-requested redraw calls
//! [`Surface::request_draw`]. The first request paints at once and asks the host
//! for a refresh callback; requests made before that callback are folded into a
//! single replay paint. See [`scheduler`] for the state machine.
//!
//! ## Input
//!
//! Pointer-style events (click, context menu, double click) and touch moves go
//! to the topmost node under the point that declares the matching handler.
//! Touches are captured on start and their end goes to the node they started
//! on; see [`TouchTracker`].
//!
//! ## Example
//!
//! ```
//! use kurbo::Point;
//! use understory_surface::recording::{ManualFrameHost, RecordingCanvas};
//! use understory_surface::{
//!     Frame, NodeId, Reconciler, RenderNode, RenderTree, Surface, SurfaceConfig,
//! };
//!
//! /// Mounts one button per label, side by side.
//! struct Buttons;
//!
//! impl Reconciler<RecordingCanvas> for Buttons {
//!     type Children = [&'static str];
//!     type Error = core::convert::Infallible;
//!
//!     fn mount(
//!         &mut self,
//!         tree: &mut RenderTree<RecordingCanvas>,
//!         root: NodeId,
//!         labels: &[&'static str],
//!     ) -> Result<(), Self::Error> {
//!         for (i, label) in labels.iter().copied().enumerate() {
//!             let node = RenderNode::new(Frame::new(i as f64 * 60.0, 0.0, 50.0, 50.0))
//!                 .on_draw(move |canvas: &mut RecordingCanvas, _| canvas.mark(label))
//!                 .on_click(|_, cx| cx.request_redraw());
//!             tree.insert(root, node);
//!         }
//!         Ok(())
//!     }
//!
//!     fn update(
//!         &mut self,
//!         tree: &mut RenderTree<RecordingCanvas>,
//!         root: NodeId,
//!         labels: &[&'static str],
//!     ) -> Result<(), Self::Error> {
//!         self.unmount(tree, root);
//!         self.mount(tree, root, labels)
//!     }
//!
//!     fn unmount(&mut self, tree: &mut RenderTree<RecordingCanvas>, root: NodeId) {
//!         for child in tree.children(root).to_vec() {
//!             tree.remove(child);
//!         }
//!     }
//! }
//!
//! let config = SurfaceConfig::new(300.0, 150.0);
//! let mut surface = Surface::new(config, RecordingCanvas::new(), ManualFrameHost::new()).unwrap();
//! surface.on_mount(&mut Buttons, &["ok", "cancel"]).unwrap();
//! assert_eq!(surface.canvas().marks(), ["ok", "cancel"]);
//!
//! // The click lands on "cancel" and asks for a redraw, which waits for the
//! // frame painted at mount time.
//! assert!(surface.handle_click(Point::new(70.0, 10.0)).redraw);
//! assert_eq!(surface.canvas().clear_count(), 1);
//! assert!(surface.host_mut().take_request());
//! surface.on_animation_frame();
//! assert_eq!(surface.canvas().clear_count(), 2);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod dispatch;
mod error;
mod host;
mod pipeline;
pub mod recording;
pub mod scheduler;
mod surface;
mod touch;

pub use config::SurfaceConfig;
pub use dispatch::{Dispatch, dispatch_to_hit, resolve_target};
pub use error::{ConfigError, SurfaceError};
pub use host::{Canvas, FrameHost, Reconciler};
pub use pipeline::DrawPipeline;
pub use surface::Surface;
pub use touch::TouchTracker;

pub use understory_render_tree::{
    EventCx, EventKind, Frame, Hit, HitFilter, InputEvent, NodeId, PaintCx, RenderNode,
    RenderTree, Touch, TouchId,
};
