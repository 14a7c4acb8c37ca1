// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The surface: owns the tree, schedules frames, routes input.

use kurbo::{Point, Size};
use understory_render_tree::{
    EventKind, Hit, HitFilter, InputEvent, NodeId, RenderNode, RenderTree, TouchId,
};

use crate::config::SurfaceConfig;
use crate::dispatch::{Dispatch, dispatch_to_hit};
use crate::error::{ConfigError, SurfaceError};
use crate::host::{Canvas, FrameHost, Reconciler};
use crate::pipeline::DrawPipeline;
use crate::scheduler::{DrawRequest, FrameScheduler};
use crate::touch::TouchTracker;

/// A retained-mode drawing surface.
///
/// The surface owns a [`RenderTree`] whose contents a [`Reconciler`] maintains,
/// paints it onto `C` at most once per display refresh of `H`, and routes input
/// events to the nodes that declare handlers for them.
///
/// A surface is mounted from the moment [`on_mount`](Self::on_mount) creates
/// the root until [`on_unmount`](Self::on_unmount) drops it.
pub struct Surface<C, H> {
    config: SurfaceConfig,
    canvas: C,
    host: H,
    tree: RenderTree<C>,
    scheduler: FrameScheduler,
    touches: TouchTracker,
    scale: f64,
}

impl<C, H: core::fmt::Debug> core::fmt::Debug for Surface<C, H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Surface")
            .field("config", &self.config)
            .field("host", &self.host)
            .field("tree", &self.tree)
            .field("scheduler", &self.scheduler)
            .field("touches", &self.touches.len())
            .field("scale", &self.scale)
            .finish_non_exhaustive()
    }
}

impl<C: Canvas, H: FrameHost> Surface<C, H> {
    /// Create an unmounted surface.
    pub fn new(config: SurfaceConfig, canvas: C, host: H) -> Result<Self, ConfigError> {
        config.validate()?;
        let scale = config.resolved_scale(host.device_pixel_ratio());
        Ok(Self {
            config,
            canvas,
            host,
            tree: RenderTree::new(),
            scheduler: FrameScheduler::new(),
            touches: TouchTracker::new(),
            scale,
        })
    }

    /// The configuration in force.
    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    /// The canvas.
    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    /// The canvas, mutably.
    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    /// The frame host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The frame host, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The render tree, read-only. Only the reconciler writes to it.
    pub fn tree(&self) -> &RenderTree<C> {
        &self.tree
    }

    /// True between mount and unmount.
    pub fn is_mounted(&self) -> bool {
        self.tree.root().is_some()
    }

    /// The device pixel ratio last applied to the canvas.
    pub fn scale_factor(&self) -> f64 {
        self.scale
    }

    /// Physical size of the backing store: logical size times scale.
    ///
    /// Hosts size their pixel buffer to this. Resizing a buffer typically
    /// resets its transform, which is why the surface re-applies the scale on
    /// every size change.
    pub fn backing_size(&self) -> Size {
        self.config.backing_size(self.scale)
    }

    // --- lifecycle ---

    /// Apply the scale, create the root, let `reconciler` build the subtree,
    /// then draw once.
    ///
    /// If the reconciler fails its error is returned and nothing is drawn;
    /// the root and whatever was built stay in place until
    /// [`on_unmount`](Self::on_unmount).
    pub fn on_mount<R: Reconciler<C>>(
        &mut self,
        reconciler: &mut R,
        children: &R::Children,
    ) -> Result<(), SurfaceError<R::Error>> {
        if self.is_mounted() {
            return Err(SurfaceError::AlreadyMounted);
        }
        self.config.validate()?;
        self.rescale();
        let root = self.tree.set_root(RenderNode::new(self.config.frame()));
        reconciler
            .mount(&mut self.tree, root, children)
            .map_err(SurfaceError::Reconciler)?;
        log::debug!("mounted {} node(s) at scale {}", self.tree.len(), self.scale);
        self.request_draw();
        Ok(())
    }

    /// Adopt `next`, reconcile children with `reconciler.update`, then draw.
    ///
    /// The root frame follows the new geometry. A width, height or scale change
    /// re-applies the scale; nothing is ever re-mounted. An invalid `next` is
    /// rejected and the current configuration stays in force.
    pub fn on_props_changed<R: Reconciler<C>>(
        &mut self,
        next: SurfaceConfig,
        reconciler: &mut R,
        children: &R::Children,
    ) -> Result<(), SurfaceError<R::Error>> {
        let Some(root) = self.tree.root() else {
            return Err(SurfaceError::NotMounted);
        };
        next.validate()?;
        let prev = core::mem::replace(&mut self.config, next);
        if prev.size_differs(&next) || prev.scale != next.scale {
            self.rescale();
        }
        self.tree.set_frame(root, next.frame());
        reconciler
            .update(&mut self.tree, root, children)
            .map_err(SurfaceError::Reconciler)?;
        self.request_draw();
        Ok(())
    }

    /// Let `reconciler` tear down the subtree, then drop the tree.
    ///
    /// Touch captures and any owed replay are discarded. The refresh callback
    /// of a frame already in flight is still expected and is harmless.
    pub fn on_unmount<R: Reconciler<C>>(&mut self, reconciler: &mut R) {
        let Some(root) = self.tree.root() else {
            return;
        };
        reconciler.unmount(&mut self.tree, root);
        self.tree.clear();
        self.touches.clear();
        if self.scheduler.cancel_pending() {
            log::trace!("unmount: dropped owed replay");
        }
        log::debug!("unmounted");
    }

    fn rescale(&mut self) {
        self.scale = self.config.resolved_scale(self.host.device_pixel_ratio());
        self.canvas.scale(self.scale);
        let backing = self.backing_size();
        log::debug!(
            "scale {} applied, backing store {}x{}",
            self.scale,
            backing.width,
            backing.height
        );
    }

    // --- frames ---

    /// Ask for the tree to be painted.
    ///
    /// Paints immediately unless a frame is in flight, in which case one paint
    /// runs after the next [`on_animation_frame`](Self::on_animation_frame)
    /// however many requests arrive in between. A no-op while unmounted.
    pub fn request_draw(&mut self) {
        if !self.is_mounted() {
            log::trace!("request_draw: not mounted");
            return;
        }
        match self.scheduler.request_draw() {
            DrawRequest::PaintNow => {
                DrawPipeline::new(self.config.viewport(), self.config.enable_css_layout)
                    .draw(&mut self.canvas, &mut self.tree);
                self.host.request_animation_frame();
            }
            DrawRequest::Deferred => log::trace!("request_draw: deferred to next frame"),
        }
    }

    /// The display refreshed. Call once per [`FrameHost::request_animation_frame`].
    pub fn on_animation_frame(&mut self) {
        if self.scheduler.after_tick() {
            self.request_draw();
        }
    }

    // --- input ---

    /// Route `event` to the matching hook by kind.
    pub fn handle_event(&mut self, event: &InputEvent) -> Dispatch {
        match event.kind {
            EventKind::TouchStart => self.handle_touch_start(event),
            EventKind::TouchMove => self.handle_touch_move(event),
            EventKind::TouchEnd | EventKind::TouchCancel => self.handle_touch_end(event),
            EventKind::Click | EventKind::ContextMenu | EventKind::DoubleClick => {
                self.dispatch_pointer(event)
            }
        }
    }

    /// A touch start: capture the touches for the target under the first
    /// changed touch and deliver `on_touch_start`.
    pub fn handle_touch_start(&mut self, event: &InputEvent) -> Dispatch {
        debug_assert_eq!(event.kind, EventKind::TouchStart);
        let out = self.touches.start(&mut self.tree, event);
        self.finish(out)
    }

    /// A touch move: deliver `on_touch_move` to whatever is under the touch now.
    pub fn handle_touch_move(&mut self, event: &InputEvent) -> Dispatch {
        debug_assert_eq!(event.kind, EventKind::TouchMove);
        let out = self.touches.moved(&mut self.tree, event);
        self.finish(out)
    }

    /// A touch end or cancel: deliver `on_touch_end` to each changed touch's
    /// captured target and release it.
    pub fn handle_touch_end(&mut self, event: &InputEvent) -> Dispatch {
        debug_assert!(matches!(
            event.kind,
            EventKind::TouchEnd | EventKind::TouchCancel
        ));
        let out = self.touches.end(&mut self.tree, event);
        self.finish(out)
    }

    /// A click at `point`.
    pub fn handle_click(&mut self, point: Point) -> Dispatch {
        self.dispatch_pointer(&InputEvent::pointer(EventKind::Click, point))
    }

    /// A context-menu request at `point`.
    pub fn handle_context_menu(&mut self, point: Point) -> Dispatch {
        self.dispatch_pointer(&InputEvent::pointer(EventKind::ContextMenu, point))
    }

    /// A double click at `point`.
    pub fn handle_double_click(&mut self, point: Point) -> Dispatch {
        self.dispatch_pointer(&InputEvent::pointer(EventKind::DoubleClick, point))
    }

    /// Hit test without dispatching.
    pub fn hit_test(&self, point: Point, filter: HitFilter) -> Option<Hit> {
        self.tree.hit_test(point, filter)
    }

    /// Number of touches currently captured.
    pub fn active_touches(&self) -> usize {
        self.touches.len()
    }

    /// The node a touch is captured by.
    pub fn touch_target(&self, id: TouchId) -> Option<NodeId> {
        self.touches.target(id)
    }

    fn dispatch_pointer(&mut self, event: &InputEvent) -> Dispatch {
        let out = dispatch_to_hit(&mut self.tree, event);
        self.finish(out)
    }

    fn finish(&mut self, out: Dispatch) -> Dispatch {
        if out.redraw {
            self.request_draw();
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{CanvasOp, ManualFrameHost, RecordingCanvas};
    use alloc::rc::Rc;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::Cell;
    use kurbo::Rect;
    use understory_render_tree::{Frame, Touch};

    type TestTree = RenderTree<RecordingCanvas>;

    /// Rebuilds the root's children from a closure on mount and on update.
    struct Scripted<F> {
        build: F,
        fail: bool,
        mounts: usize,
        updates: usize,
        unmounts: usize,
    }

    impl<F: FnMut(&mut TestTree, NodeId)> Scripted<F> {
        fn new(build: F) -> Self {
            Self {
                build,
                fail: false,
                mounts: 0,
                updates: 0,
                unmounts: 0,
            }
        }
    }

    fn drop_children(tree: &mut TestTree, root: NodeId) {
        for child in tree.children(root).to_vec() {
            tree.remove(child);
        }
    }

    impl<F: FnMut(&mut TestTree, NodeId)> Reconciler<RecordingCanvas> for Scripted<F> {
        type Children = ();
        type Error = &'static str;

        fn mount(&mut self, tree: &mut TestTree, root: NodeId, _: &()) -> Result<(), Self::Error> {
            self.mounts += 1;
            if self.fail {
                return Err("mount failed");
            }
            (self.build)(tree, root);
            Ok(())
        }

        fn update(&mut self, tree: &mut TestTree, root: NodeId, _: &()) -> Result<(), Self::Error> {
            self.updates += 1;
            drop_children(tree, root);
            (self.build)(tree, root);
            Ok(())
        }

        fn unmount(&mut self, tree: &mut TestTree, root: NodeId) {
            self.unmounts += 1;
            drop_children(tree, root);
        }
    }

    fn labelled(label: &'static str, frame: Frame) -> RenderNode<RecordingCanvas> {
        RenderNode::new(frame).on_draw(move |c: &mut RecordingCanvas, _| c.mark(label))
    }

    fn abc(tree: &mut TestTree, root: NodeId) {
        for label in ["A", "B", "C"] {
            tree.insert(root, labelled(label, Frame::new(0.0, 0.0, 10.0, 10.0)));
        }
    }

    fn surface(config: SurfaceConfig) -> Surface<RecordingCanvas, ManualFrameHost> {
        Surface::new(config, RecordingCanvas::new(), ManualFrameHost::new()).unwrap()
    }

    /// Fire every pending frame callback until the host is quiet.
    fn run_frames(surface: &mut Surface<RecordingCanvas, ManualFrameHost>) {
        while surface.host_mut().take_request() {
            surface.on_animation_frame();
        }
    }

    #[test]
    fn mount_scales_builds_and_draws_once() {
        let mut s = surface(SurfaceConfig::new(300.0, 150.0));
        let mut rec = Scripted::new(abc);
        s.on_mount(&mut rec, &()).unwrap();

        assert!(s.is_mounted());
        assert_eq!(rec.mounts, 1);
        assert_eq!(
            s.canvas().ops()[..2],
            [
                CanvasOp::Scale(1.0),
                CanvasOp::Clear(Rect::new(0.0, 0.0, 300.0, 150.0))
            ]
        );
        assert_eq!(s.canvas().marks(), ["A", "B", "C"]);
        assert_eq!(s.host().pending(), 1);
    }

    #[test]
    fn draw_requests_coalesce_per_frame() {
        let mut s = surface(SurfaceConfig::new(300.0, 150.0));
        s.on_mount(&mut Scripted::new(abc), &()).unwrap();
        assert_eq!(s.canvas().clear_count(), 1);

        for _ in 0..10 {
            s.request_draw();
        }
        assert_eq!(s.canvas().clear_count(), 1, "in flight: nothing painted");

        run_frames(&mut s);
        assert_eq!(s.canvas().clear_count(), 2, "exactly one replay");
        assert_eq!(s.host().total_requests(), 2);

        s.request_draw();
        assert_eq!(s.canvas().clear_count(), 3, "ready again: paints at once");
    }

    #[test]
    fn click_reaches_only_the_button_under_it() {
        let clicks = Rc::new(Cell::new(0));
        let counter = clicks.clone();
        let mut button = None;
        let mut s = surface(SurfaceConfig::new(300.0, 150.0));
        let mut rec = Scripted::new(|tree: &mut TestTree, root| {
            let counter = counter.clone();
            button = tree.insert(
                root,
                RenderNode::new(Frame::new(10.0, 10.0, 50.0, 50.0))
                    .on_click(move |_, _| counter.set(counter.get() + 1)),
            );
        });
        s.on_mount(&mut rec, &()).unwrap();
        drop(rec);

        let out = s.handle_click(Point::new(20.0, 20.0));
        assert_eq!(out.target(), button);
        assert_eq!(clicks.get(), 1);

        assert!(s.handle_click(Point::new(200.0, 100.0)).is_miss());
        assert!(s.handle_double_click(Point::new(20.0, 20.0)).is_miss());
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn resize_rescales_without_remounting() {
        let config = SurfaceConfig::new(300.0, 150.0);
        let mut s = Surface::new(config, RecordingCanvas::new(), ManualFrameHost::with_ratio(2.0))
            .unwrap();
        let mut rec = Scripted::new(abc);
        s.on_mount(&mut rec, &()).unwrap();
        assert_eq!(s.canvas().scales(), [2.0]);
        assert_eq!(s.backing_size(), Size::new(600.0, 300.0));

        run_frames(&mut s);
        s.on_props_changed(SurfaceConfig::new(400.0, 150.0), &mut rec, &())
            .unwrap();
        assert_eq!(s.canvas().scales(), [2.0, 2.0]);
        assert_eq!(s.backing_size(), Size::new(800.0, 300.0));
        assert_eq!((rec.mounts, rec.updates), (1, 1));
        assert_eq!(s.canvas().clear_count(), 2);

        // Moving or toggling layout does not re-scale.
        run_frames(&mut s);
        let moved = SurfaceConfig::new(400.0, 150.0)
            .with_position(5.0, 5.0)
            .with_css_layout(true);
        s.on_props_changed(moved, &mut rec, &()).unwrap();
        assert_eq!(s.canvas().scales(), [2.0, 2.0]);
        assert_eq!((rec.mounts, rec.updates), (1, 2));
        assert_eq!(s.config(), &moved);
    }

    #[test]
    fn position_moves_the_surface_not_its_contents() {
        let config = SurfaceConfig::new(300.0, 150.0).with_position(50.0, 20.0);
        let mut s = surface(config);
        let mut rec = Scripted::new(|tree: &mut TestTree, root| {
            tree.insert(
                root,
                RenderNode::new(Frame::new(290.0, 140.0, 10.0, 10.0))
                    .on_draw(|c: &mut RecordingCanvas, cx| {
                        c.fill_rect(cx.frame.to_rect(), cx.alpha);
                    })
                    .on_click(|_, _| {}),
            );
        });
        s.on_mount(&mut rec, &()).unwrap();

        let viewport = Rect::new(0.0, 0.0, 300.0, 150.0);
        let fill = Rect::new(290.0, 140.0, 300.0, 150.0);
        assert_eq!(
            s.canvas().ops()[1..],
            [
                CanvasOp::Clear(viewport),
                CanvasOp::FillRect {
                    rect: fill,
                    alpha: 1.0
                }
            ]
        );
        assert_eq!(viewport.union(fill), viewport, "paint stays inside the clear");
        assert_eq!(s.backing_size(), Size::new(300.0, 150.0));
        assert!(!s.handle_click(Point::new(295.0, 145.0)).is_miss());
        assert!(s.handle_click(Point::new(345.0, 165.0)).is_miss());
    }

    #[test]
    fn replay_paints_the_latest_tree() {
        const LABELS: [[&str; 2]; 3] = [["A", "B"], ["C", "D"], ["E", "F"]];
        let version = Rc::new(Cell::new(0));
        let current = version.clone();
        let config = SurfaceConfig::new(300.0, 150.0);
        let mut s = surface(config);
        let mut rec = Scripted::new(move |tree: &mut TestTree, root| {
            for label in LABELS[current.get()] {
                tree.insert(root, labelled(label, Frame::new(0.0, 0.0, 10.0, 10.0)));
            }
        });
        s.on_mount(&mut rec, &()).unwrap();
        assert_eq!(s.canvas_mut().take_ops().len(), 4);

        // Both updates land while the mount frame is in flight.
        version.set(1);
        s.on_props_changed(config, &mut rec, &()).unwrap();
        version.set(2);
        s.on_props_changed(config, &mut rec, &()).unwrap();
        assert_eq!(rec.updates, 2);
        assert!(s.canvas().ops().is_empty());

        run_frames(&mut s);
        assert_eq!(s.canvas().clear_count(), 1);
        assert_eq!(s.canvas().marks(), ["E", "F"]);
    }

    #[test]
    fn resize_picks_up_a_new_host_ratio() {
        let mut s = Surface::new(
            SurfaceConfig::new(100.0, 50.0),
            RecordingCanvas::new(),
            ManualFrameHost::with_ratio(1.0),
        )
        .unwrap();
        let mut rec = Scripted::new(abc);
        s.on_mount(&mut rec, &()).unwrap();

        // The ratio alone is not watched; the next size change applies it.
        s.host_mut().set_ratio(Some(3.0));
        s.on_props_changed(SurfaceConfig::new(100.0, 50.0), &mut rec, &())
            .unwrap();
        assert_eq!(s.scale_factor(), 1.0);

        s.on_props_changed(SurfaceConfig::new(120.0, 50.0), &mut rec, &())
            .unwrap();
        assert_eq!(s.canvas().scales(), [1.0, 3.0]);
        assert_eq!(s.backing_size(), Size::new(360.0, 150.0));
        assert_eq!(
            s.tree().absolute_frame(s.tree().root().unwrap()),
            Some(Frame::new(0.0, 0.0, 120.0, 50.0))
        );

        // An unusable ratio falls back to 1.
        s.host_mut().set_ratio(Some(f64::NAN));
        s.on_props_changed(SurfaceConfig::new(130.0, 50.0), &mut rec, &())
            .unwrap();
        assert_eq!(s.scale_factor(), 1.0);
    }

    #[test]
    fn invalid_props_keep_the_previous_config() {
        let mut s = surface(SurfaceConfig::new(300.0, 150.0));
        let mut rec = Scripted::new(abc);
        s.on_mount(&mut rec, &()).unwrap();

        let err = s
            .on_props_changed(SurfaceConfig::new(-1.0, 150.0), &mut rec, &())
            .unwrap_err();
        assert!(matches!(
            err,
            SurfaceError::InvalidConfig(ConfigError::NegativeSize { .. })
        ));
        assert_eq!(s.config(), &SurfaceConfig::new(300.0, 150.0));
        assert_eq!(rec.updates, 0);
    }

    #[test]
    fn lifecycle_misuse_is_reported() {
        let mut s = surface(SurfaceConfig::new(10.0, 10.0));
        let mut rec = Scripted::new(abc);
        assert!(matches!(
            s.on_props_changed(SurfaceConfig::new(10.0, 10.0), &mut rec, &()),
            Err(SurfaceError::NotMounted)
        ));
        s.on_mount(&mut rec, &()).unwrap();
        assert!(matches!(
            s.on_mount(&mut rec, &()),
            Err(SurfaceError::AlreadyMounted)
        ));
        assert_eq!(rec.mounts, 1);
        assert!(Surface::new(
            SurfaceConfig::new(f64::NAN, 1.0),
            RecordingCanvas::new(),
            ManualFrameHost::new()
        )
        .is_err());
    }

    #[test]
    fn unmount_mid_flight_drops_the_replay() {
        let mut s = surface(SurfaceConfig::new(300.0, 150.0));
        let mut rec = Scripted::new(abc);
        s.on_mount(&mut rec, &()).unwrap();
        s.request_draw();

        s.on_unmount(&mut rec);
        assert_eq!(rec.unmounts, 1);
        assert!(!s.is_mounted());
        assert!(s.tree().is_empty());

        run_frames(&mut s);
        s.request_draw();
        assert_eq!(s.canvas().clear_count(), 1);
        assert_eq!(s.host().total_requests(), 1);

        // A second unmount has nothing to tear down.
        s.on_unmount(&mut rec);
        assert_eq!(rec.unmounts, 1);
    }

    #[test]
    fn remount_after_unmount_draws_again() {
        let mut s = surface(SurfaceConfig::new(300.0, 150.0));
        let mut rec = Scripted::new(abc);
        s.on_mount(&mut rec, &()).unwrap();
        s.on_unmount(&mut rec);
        // The first frame is still in flight, so the mount draw waits for it.
        s.on_mount(&mut rec, &()).unwrap();
        assert_eq!(s.canvas().clear_count(), 1);
        run_frames(&mut s);
        assert_eq!(s.canvas().clear_count(), 2);
        assert_eq!(s.canvas().marks(), ["A", "B", "C", "A", "B", "C"]);
    }

    #[test]
    fn reconciler_failure_propagates_without_drawing() {
        let mut s = surface(SurfaceConfig::new(300.0, 150.0));
        let mut rec = Scripted::new(abc);
        rec.fail = true;
        let err = s.on_mount(&mut rec, &()).unwrap_err();
        assert!(matches!(err, SurfaceError::Reconciler("mount failed")));
        assert_eq!(s.canvas().clear_count(), 0);
        assert_eq!(s.host().total_requests(), 0);

        // The root stays until the host unmounts.
        assert!(s.is_mounted());
        s.on_unmount(&mut rec);
        assert!(!s.is_mounted());
    }

    #[test]
    fn handler_can_request_a_redraw() {
        let mut s = surface(SurfaceConfig::new(300.0, 150.0));
        let mut rec = Scripted::new(|tree: &mut TestTree, root| {
            tree.insert(
                root,
                labelled("button", Frame::new(0.0, 0.0, 100.0, 100.0))
                    .on_click(|_, cx| cx.request_redraw())
                    .on_context_menu(|_, _| {}),
            );
        });
        s.on_mount(&mut rec, &()).unwrap();
        run_frames(&mut s);

        let out = s.handle_click(Point::new(50.0, 50.0));
        assert!(out.redraw);
        assert_eq!(s.canvas().clear_count(), 2);

        let out = s.handle_context_menu(Point::new(50.0, 50.0));
        assert!(!out.redraw);
        assert_eq!(s.canvas().clear_count(), 2);
    }

    #[test]
    fn layout_runs_when_enabled() {
        let config = SurfaceConfig::new(300.0, 150.0).with_css_layout(true);
        let mut s = surface(config);
        let mut rec = Scripted::new(|tree: &mut TestTree, root| {
            tree.insert(
                root,
                RenderNode::new(Frame::ZERO)
                    .on_layout(|cx| cx.set_frame(Frame::new(10.0, 10.0, 20.0, 20.0)))
                    .on_click(|_, _| {}),
            );
        });
        s.on_mount(&mut rec, &()).unwrap();
        assert!(s
            .hit_test(Point::new(15.0, 15.0), HitFilter::Kind(EventKind::Click))
            .is_some());
    }

    #[test]
    fn events_route_by_kind_and_touches_are_captured() {
        let ends = Rc::new(Cell::new(0));
        let counter = ends.clone();
        let mut s = surface(SurfaceConfig::new(300.0, 150.0));
        let mut rec = Scripted::new(|tree: &mut TestTree, root| {
            let counter = counter.clone();
            tree.insert(
                root,
                RenderNode::new(Frame::new(0.0, 0.0, 100.0, 100.0))
                    .on_touch_start(|_, _| {})
                    .on_touch_end(move |_, _| counter.set(counter.get() + 1)),
            );
        });
        s.on_mount(&mut rec, &()).unwrap();

        let at = |id, x| Touch::new(id, Point::new(x, 10.0));
        let start = InputEvent::touch(
            EventKind::TouchStart,
            vec![at(1, 10.0), at(2, 20.0)],
            vec![at(2, 20.0)],
        );
        assert!(!s.handle_event(&start).is_miss());
        assert_eq!(s.active_touches(), 2);
        assert!(s.touch_target(TouchId(1)).is_some());

        let end = InputEvent::touch(EventKind::TouchEnd, vec![at(2, 250.0)], vec![at(1, 250.0)]);
        s.handle_event(&end);
        assert_eq!(s.active_touches(), 1);
        // Same identifier again: already released.
        s.handle_event(&end);
        let cancel = InputEvent::touch(EventKind::TouchCancel, Vec::new(), vec![at(2, 0.0)]);
        s.handle_event(&cancel);
        assert_eq!(s.active_touches(), 0);
        assert_eq!(ends.get(), 2);

        // Events after unmount are ignored.
        s.on_unmount(&mut rec);
        assert!(s.handle_event(&start).is_miss());
        assert_eq!(s.active_touches(), 0);
    }
}
