// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch capture.
//!
//! Two pads side by side. A touch that starts on the left pad and slides onto
//! the right one still ends on the left pad, while its moves follow the finger.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p understory_demos --example surface_touch`

use kurbo::Point;
use understory_surface::recording::{ManualFrameHost, RecordingCanvas};
use understory_surface::{
    EventKind, Frame, InputEvent, NodeId, Reconciler, RenderNode, RenderTree, Surface,
    SurfaceConfig, Touch,
};

struct Pads;

impl Reconciler<RecordingCanvas> for Pads {
    type Children = ();
    type Error = core::convert::Infallible;

    fn mount(
        &mut self,
        tree: &mut RenderTree<RecordingCanvas>,
        root: NodeId,
        _: &(),
    ) -> Result<(), Self::Error> {
        for (name, x) in [("left", 0.0), ("right", 100.0)] {
            let node = RenderNode::new(Frame::new(x, 0.0, 100.0, 100.0))
                .on_touch_start(move |e, _| println!("{name}: start {:?}", e.hit_point()))
                .on_touch_move(move |e, _| println!("{name}: move {:?}", e.hit_point()))
                .on_touch_end(move |e, _| println!("{name}: {}", e.kind.name()));
            tree.insert(root, node);
        }
        Ok(())
    }

    fn update(
        &mut self,
        _: &mut RenderTree<RecordingCanvas>,
        _: NodeId,
        _: &(),
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn unmount(&mut self, tree: &mut RenderTree<RecordingCanvas>, root: NodeId) {
        for child in tree.children(root).to_vec() {
            tree.remove(child);
        }
    }
}

fn touch(id: u64, x: f64) -> Touch {
    Touch::new(id, Point::new(x, 50.0))
}

fn main() {
    env_logger::init();

    let config = SurfaceConfig::new(200.0, 100.0);
    let mut surface =
        Surface::new(config, RecordingCanvas::new(), ManualFrameHost::new()).expect("valid config");
    surface.on_mount(&mut Pads, &()).expect("mount");

    let events = [
        InputEvent::touch(EventKind::TouchStart, vec![touch(1, 20.0)], vec![touch(1, 20.0)]),
        InputEvent::touch(EventKind::TouchMove, vec![touch(1, 60.0)], vec![touch(1, 60.0)]),
        InputEvent::touch(EventKind::TouchMove, vec![touch(1, 150.0)], vec![touch(1, 150.0)]),
        InputEvent::touch(EventKind::TouchEnd, vec![], vec![touch(1, 150.0)]),
        // Already released: ignored.
        InputEvent::touch(EventKind::TouchEnd, vec![], vec![touch(1, 150.0)]),
    ];
    for event in &events {
        let out = surface.handle_event(event);
        println!(
            "  {} -> {:?}, {} touch(es) captured",
            event.kind.name(),
            out.target(),
            surface.active_touches()
        );
    }

    // Unknown names are not events.
    assert_eq!(EventKind::from_name("mouseover"), None);
    assert_eq!(EventKind::from_name("touchcancel"), Some(EventKind::TouchCancel));
}
