// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Insets, Point};
use understory_render_tree::{EventKind, Frame, HitFilter, NodeId, RenderNode, RenderTree};

/// An `n` x `n` grid of rows, each row holding `n` clickable cells.
fn grid_tree(n: usize, cell: f64) -> RenderTree<()> {
    let mut tree = RenderTree::new();
    let side = n as f64 * cell;
    let root = tree.set_root(RenderNode::new(Frame::new(0.0, 0.0, side, side)));
    for y in 0..n {
        let row = tree
            .insert(
                root,
                RenderNode::new(Frame::new(0.0, y as f64 * cell, side, cell)),
            )
            .unwrap();
        for x in 0..n {
            tree.insert(
                row,
                RenderNode::new(Frame::new(x as f64 * cell, 0.0, cell, cell))
                    .on_click(|_, _| {}),
            );
        }
    }
    tree
}

/// A single chain `depth` nodes deep; only the innermost node is clickable.
fn deep_chain(depth: usize) -> RenderTree<()> {
    let mut tree = RenderTree::new();
    let mut parent: NodeId = tree.set_root(RenderNode::new(Frame::new(0.0, 0.0, 1000.0, 1000.0)));
    for i in 0..depth {
        let node = RenderNode::new(Frame::new(1.0, 1.0, 900.0, 900.0));
        let node = if i + 1 == depth {
            node.on_click(|_, _| {}).with_hit_outsets(Insets::uniform(4.0))
        } else {
            node
        };
        parent = tree.insert(parent, node).unwrap();
    }
    tree
}

fn points(n: usize, extent: f64) -> Vec<Point> {
    // Deterministic LCG so runs are comparable.
    let mut state = 0x9E37_79B9_7F4A_7C15_u64;
    (0..n)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            let x = (state >> 11) as f64 / (1_u64 << 53) as f64 * extent;
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            let y = (state >> 11) as f64 / (1_u64 << 53) as f64 * extent;
            Point::new(x, y)
        })
        .collect()
}

fn bench_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("hit_test_grid");
    for &n in &[8usize, 32, 64] {
        let tree = grid_tree(n, 10.0);
        let pts = points(256, n as f64 * 10.0);
        group.throughput(Throughput::Elements(pts.len() as u64));
        group.bench_function(format!("click_n{}", n), |b| {
            b.iter(|| {
                let mut found = 0_usize;
                for &pt in &pts {
                    if tree.hit_test(pt, HitFilter::Kind(EventKind::Click)).is_some() {
                        found += 1;
                    }
                }
                black_box(found)
            });
        });
        group.bench_function(format!("miss_n{}", n), |b| {
            b.iter(|| {
                for &pt in &pts {
                    black_box(tree.hit_test(pt, HitFilter::Kind(EventKind::ContextMenu)));
                }
            });
        });
    }
    group.finish();
}

fn bench_deep(c: &mut Criterion) {
    let mut group = c.benchmark_group("hit_test_deep");
    for &depth in &[16usize, 128] {
        let tree = deep_chain(depth);
        group.bench_function(format!("chain_d{}", depth), |b| {
            b.iter(|| black_box(tree.hit_test(Point::new(50.0, 50.0), HitFilter::AnyHandler)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_grid, bench_deep);
criterion_main!(benches);
