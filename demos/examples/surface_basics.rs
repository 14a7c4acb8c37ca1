// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Surface basics.
//!
//! Mount a row of buttons, click one, watch the redraw wait for the next frame,
//! then resize the surface without re-mounting.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p understory_demos --example surface_basics`

use std::cell::Cell;
use std::rc::Rc;

use kurbo::Point;
use understory_surface::recording::{CanvasOp, ManualFrameHost, RecordingCanvas};
use understory_surface::{
    Frame, NodeId, Reconciler, RenderNode, RenderTree, Surface, SurfaceConfig,
};

/// One button per label. A click bumps the shared counter and asks for a redraw.
struct Toolbar {
    clicks: Rc<Cell<u32>>,
}

impl Reconciler<RecordingCanvas> for Toolbar {
    type Children = [&'static str];
    type Error = core::convert::Infallible;

    fn mount(
        &mut self,
        tree: &mut RenderTree<RecordingCanvas>,
        root: NodeId,
        labels: &[&'static str],
    ) -> Result<(), Self::Error> {
        for (i, label) in labels.iter().copied().enumerate() {
            let clicks = self.clicks.clone();
            let count = self.clicks.clone();
            let node = RenderNode::new(Frame::new(10.0 + i as f64 * 60.0, 10.0, 50.0, 30.0))
                .on_draw(move |canvas: &mut RecordingCanvas, cx| {
                    canvas.fill_rect(cx.frame.to_rect(), cx.alpha);
                    canvas.mark(format!("{label} ({})", count.get()));
                })
                .on_click(move |_, cx| {
                    clicks.set(clicks.get() + 1);
                    cx.request_redraw();
                });
            tree.insert(root, node);
        }
        log::info!("toolbar built with {} button(s)", labels.len());
        Ok(())
    }

    fn update(
        &mut self,
        tree: &mut RenderTree<RecordingCanvas>,
        root: NodeId,
        labels: &[&'static str],
    ) -> Result<(), Self::Error> {
        self.unmount(tree, root);
        self.mount(tree, root, labels)
    }

    fn unmount(&mut self, tree: &mut RenderTree<RecordingCanvas>, root: NodeId) {
        for child in tree.children(root).to_vec() {
            tree.remove(child);
        }
    }
}

fn print_frame(surface: &mut Surface<RecordingCanvas, ManualFrameHost>) {
    for op in surface.canvas_mut().take_ops() {
        match op {
            CanvasOp::Mark(label) => println!("  paint {label}"),
            other => println!("  {other:?}"),
        }
    }
}

fn main() {
    env_logger::init();

    let clicks = Rc::new(Cell::new(0));
    let mut toolbar = Toolbar {
        clicks: clicks.clone(),
    };
    let config = SurfaceConfig::new(300.0, 150.0);
    let mut surface = Surface::new(config, RecordingCanvas::new(), ManualFrameHost::with_ratio(2.0))
        .expect("valid config");

    surface
        .on_mount(&mut toolbar, &["open", "save", "quit"])
        .expect("mount");
    println!("mounted, backing store {:?}:", surface.backing_size());
    print_frame(&mut surface);

    // Three clicks in one frame: the first redraw waits, the rest fold into it.
    for _ in 0..3 {
        let out = surface.handle_click(Point::new(80.0, 20.0));
        println!("click -> {:?}", out.target());
    }
    assert!(surface.canvas().ops().is_empty(), "frame still in flight");

    while surface.host_mut().take_request() {
        println!("frame:");
        surface.on_animation_frame();
        print_frame(&mut surface);
    }
    assert_eq!(clicks.get(), 3);

    // A miss does nothing.
    assert!(surface.handle_click(Point::new(290.0, 140.0)).is_miss());

    // Wider surface: re-scaled, reconciled, never re-mounted.
    surface
        .on_props_changed(SurfaceConfig::new(400.0, 150.0), &mut toolbar, &["open", "save"])
        .expect("update");
    println!("resized, backing store {:?}:", surface.backing_size());
    print_frame(&mut surface);

    surface.on_unmount(&mut toolbar);
    println!("unmounted: {} node(s) left", surface.tree().len());
}
