// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Point;
use understory_render_tree::{Frame, RenderNode, RenderTree};
use understory_surface::recording::{ManualFrameHost, RecordingCanvas};
use understory_surface::{NodeId, Reconciler, Surface, SurfaceConfig};

/// Canvas that only sums what it is asked to paint.
#[derive(Default)]
struct Tally {
    area: f64,
}

fn flat_tree(n: usize) -> RenderTree<Tally> {
    let mut tree = RenderTree::new();
    let root = tree.set_root(RenderNode::new(Frame::new(0.0, 0.0, 1000.0, 1000.0)));
    for i in 0..n {
        let frame = Frame::new((i % 100) as f64 * 10.0, (i / 100) as f64 * 10.0, 10.0, 10.0);
        let node = RenderNode::new(frame)
            .with_z_index((i % 3) as i32)
            .on_draw(|t: &mut Tally, cx| t.area += cx.frame.width() * cx.frame.height() * cx.alpha);
        tree.insert(root, node);
    }
    tree
}

fn bench_paint(c: &mut Criterion) {
    let mut group = c.benchmark_group("paint");
    for &n in &[100usize, 1_000, 10_000] {
        let mut tree = flat_tree(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("flat_n{}", n), |b| {
            b.iter(|| {
                let mut tally = Tally::default();
                let painted = tree.paint(&mut tally);
                black_box((painted, tally.area))
            });
        });
    }
    group.finish();
}

/// Mounts `n` marked cells under the root.
struct Cells(usize);

impl Reconciler<RecordingCanvas> for Cells {
    type Children = ();
    type Error = core::convert::Infallible;

    fn mount(
        &mut self,
        tree: &mut RenderTree<RecordingCanvas>,
        root: NodeId,
        _: &(),
    ) -> Result<(), Self::Error> {
        for i in 0..self.0 {
            tree.insert(
                root,
                RenderNode::new(Frame::new(i as f64, 0.0, 1.0, 1.0))
                    .on_draw(|c: &mut RecordingCanvas, cx| c.fill_rect(cx.frame.to_rect(), cx.alpha))
                    .on_click(|_, cx| cx.request_redraw()),
            );
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

    fn unmount(&mut self, _: &mut RenderTree<RecordingCanvas>, _: NodeId) {}
}

fn bench_coalesced_redraws(c: &mut Criterion) {
    let mut group = c.benchmark_group("surface");
    group.bench_function("click_burst_then_frame", |b| {
        b.iter_batched(
            || {
                let config = SurfaceConfig::new(100.0, 10.0);
                let mut surface =
                    Surface::new(config, RecordingCanvas::new(), ManualFrameHost::new()).unwrap();
                surface.on_mount(&mut Cells(100), &()).unwrap();
                surface
            },
            |mut surface| {
                for i in 0..64 {
                    surface.handle_click(Point::new(f64::from(i) + 0.5, 0.5));
                }
                while surface.host_mut().take_request() {
                    surface.on_animation_frame();
                }
                black_box(surface.canvas_mut().take_ops().len())
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_paint, bench_coalesced_redraws);
criterion_main!(benches);
