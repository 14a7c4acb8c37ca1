// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording doubles for the host seams.
//!
//! [`RecordingCanvas`] logs every call instead of drawing, and
//! [`ManualFrameHost`] holds frame requests until the caller fires them. Tests,
//! demos and benchmarks drive a [`Surface`](crate::Surface) with these.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;

use crate::host::{Canvas, FrameHost};

/// One recorded canvas call.
#[derive(Clone, Debug, PartialEq)]
pub enum CanvasOp {
    /// [`Canvas::scale`].
    Scale(f64),
    /// [`Canvas::clear_rect`].
    Clear(Rect),
    /// [`RecordingCanvas::mark`].
    Mark(String),
    /// [`RecordingCanvas::fill_rect`].
    FillRect {
        /// Rectangle in surface coordinates.
        rect: Rect,
        /// Effective alpha at the time of the fill.
        alpha: f64,
    },
}

/// A canvas that records calls.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordingCanvas {
    ops: Vec<CanvasOp>,
}

impl RecordingCanvas {
    /// An empty recording.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a labelled paint.
    pub fn mark(&mut self, label: impl Into<String>) {
        self.ops.push(CanvasOp::Mark(label.into()));
    }

    /// Record a filled rectangle.
    pub fn fill_rect(&mut self, rect: Rect, alpha: f64) {
        self.ops.push(CanvasOp::FillRect { rect, alpha });
    }

    /// Everything recorded so far.
    pub fn ops(&self) -> &[CanvasOp] {
        &self.ops
    }

    /// Drain the recording.
    pub fn take_ops(&mut self) -> Vec<CanvasOp> {
        core::mem::take(&mut self.ops)
    }

    /// Labels passed to [`mark`](Self::mark), in order.
    pub fn marks(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                CanvasOp::Mark(label) => Some(label.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Factors passed to [`Canvas::scale`], in order.
    pub fn scales(&self) -> Vec<f64> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                CanvasOp::Scale(factor) => Some(*factor),
                _ => None,
            })
            .collect()
    }

    /// Number of clears, which is the number of frames drawn.
    pub fn clear_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, CanvasOp::Clear(_)))
            .count()
    }
}

impl Canvas for RecordingCanvas {
    fn scale(&mut self, factor: f64) {
        self.ops.push(CanvasOp::Scale(factor));
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.ops.push(CanvasOp::Clear(rect));
    }
}

/// A frame host whose refresh callbacks fire only when asked.
///
/// Requests are counted; the caller takes one with
/// [`take_request`](Self::take_request) and then calls
/// [`Surface::on_animation_frame`](crate::Surface::on_animation_frame).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ManualFrameHost {
    pending: usize,
    total: usize,
    ratio: Option<f64>,
}

impl ManualFrameHost {
    /// A host with no pixel ratio of its own.
    pub fn new() -> Self {
        Self::default()
    }

    /// A host reporting `ratio` as its device pixel ratio.
    pub fn with_ratio(ratio: f64) -> Self {
        Self {
            ratio: Some(ratio),
            ..Self::default()
        }
    }

    /// Change the reported device pixel ratio.
    pub fn set_ratio(&mut self, ratio: Option<f64>) {
        self.ratio = ratio;
    }

    /// Requests not yet taken.
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Requests made over the host's lifetime.
    pub fn total_requests(&self) -> usize {
        self.total
    }

    /// Consume one pending request. Returns `false` if there was none.
    pub fn take_request(&mut self) -> bool {
        if self.pending == 0 {
            return false;
        }
        self.pending -= 1;
        true
    }
}

impl FrameHost for ManualFrameHost {
    fn request_animation_frame(&mut self) {
        self.pending += 1;
        self.total += 1;
    }

    fn device_pixel_ratio(&self) -> Option<f64> {
        self.ratio
    }
}
