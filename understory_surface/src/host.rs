// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Seams to the outside world: the drawing surface, the display host and the
//! reconciler that owns the tree's contents.

use kurbo::Rect;
use understory_render_tree::{NodeId, RenderTree};

/// The part of a 2D drawing context the surface itself needs.
///
/// Everything else (fills, strokes, text) is the concrete canvas type's own
/// API, used from inside paint hooks.
pub trait Canvas {
    /// Multiply the current transform by a uniform scale.
    fn scale(&mut self, factor: f64);

    /// Clear `rect` (logical units) to transparent.
    fn clear_rect(&mut self, rect: Rect);
}

/// The display host: next-frame scheduling and pixel density.
pub trait FrameHost {
    /// Ask for one call to [`Surface::on_animation_frame`] at the next display
    /// refresh.
    ///
    /// Single-shot: one request, one callback.
    ///
    /// [`Surface::on_animation_frame`]: crate::Surface::on_animation_frame
    fn request_animation_frame(&mut self);

    /// The device pixel ratio, if the host knows it.
    fn device_pixel_ratio(&self) -> Option<f64> {
        None
    }
}

/// Builds and maintains the subtree below the surface's root node.
///
/// The reconciler is the tree's only writer. `C` is the canvas type the tree
/// paints onto.
pub trait Reconciler<C> {
    /// Child descriptors, in whatever form the reconciler understands.
    type Children: ?Sized;
    /// Failure raised while mounting or updating.
    type Error;

    /// Build the initial subtree under `root`, which has no children yet.
    fn mount(
        &mut self,
        tree: &mut RenderTree<C>,
        root: NodeId,
        children: &Self::Children,
    ) -> Result<(), Self::Error>;

    /// Bring the subtree under `root` in line with new descriptors.
    fn update(
        &mut self,
        tree: &mut RenderTree<C>,
        root: NodeId,
        children: &Self::Children,
    ) -> Result<(), Self::Error>;

    /// Tear down the subtree under `root`.
    ///
    /// The surface drops the whole tree afterwards whatever this leaves behind.
    fn unmount(&mut self, tree: &mut RenderTree<C>, root: NodeId);
}
