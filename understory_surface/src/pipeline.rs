// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One frame's worth of drawing: clear, optional layout, paint.

use kurbo::Rect;
use understory_render_tree::RenderTree;

use crate::host::Canvas;

/// Draws a render tree onto a canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawPipeline {
    /// Logical area cleared before painting.
    pub viewport: Rect,
    /// Run layout hooks before painting.
    pub layout_enabled: bool,
}

impl DrawPipeline {
    /// A pipeline clearing `viewport`.
    pub fn new(viewport: Rect, layout_enabled: bool) -> Self {
        Self {
            viewport,
            layout_enabled,
        }
    }

    /// Draw `tree` onto `canvas`. Returns the number of paint hooks invoked.
    ///
    /// The viewport is always cleared, even when the tree has no root.
    pub fn draw<C: Canvas>(&self, canvas: &mut C, tree: &mut RenderTree<C>) -> usize {
        canvas.clear_rect(self.viewport);
        if tree.root().is_none() {
            log::trace!("draw: no root, cleared only");
            return 0;
        }
        if self.layout_enabled {
            tree.layout();
        }
        let painted = tree.paint(canvas);
        log::trace!("draw: {painted} node(s) painted");
        painted
    }
}
