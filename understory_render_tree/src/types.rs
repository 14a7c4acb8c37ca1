// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the render tree: node identifiers and frame geometry.

use kurbo::{Insets, Point, Rect, Size, Vec2};

/// Identifier for a node in the tree.
///
/// This is a small, copyable handle that stays stable across updates but becomes
/// invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `NodeId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
///
/// ### Liveness
///
/// Use [`RenderTree::is_alive`](crate::RenderTree::is_alive) to check whether a `NodeId` still
/// refers to a live node. Stale `NodeId`s never alias a different live node because the
/// generation must match. This makes a `NodeId` a safe non-owning reference: holding one
/// never keeps an unmounted node alive.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// An immutable rectangle `(x, y, width, height)` in parent-local coordinates.
///
/// Frames are values: a resize produces a new `Frame` instead of mutating one
/// in place. Negative sizes are clamped to zero on construction, so a `Frame`
/// never has a negative width or height.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "RawFrame")
)]
pub struct Frame {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

/// Wire shape of a [`Frame`]; decoding goes through [`Frame::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawFrame {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

#[cfg(feature = "serde")]
impl From<RawFrame> for Frame {
    fn from(raw: RawFrame) -> Self {
        Self::new(raw.x, raw.y, raw.width, raw.height)
    }
}

impl Frame {
    /// The empty frame at the origin.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Create a frame from its origin and size.
    ///
    /// Negative (or NaN) sizes become zero.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Create a frame covering `rect`.
    pub fn from_rect(rect: Rect) -> Self {
        let rect = rect.abs();
        Self::new(rect.x0, rect.y0, rect.width(), rect.height())
    }

    /// Horizontal origin.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Vertical origin.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Width, never negative.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Height, never negative.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// The top-left corner.
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// The size of the frame.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// The frame as a Kurbo rectangle.
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Returns this frame moved by `offset`.
    pub fn translate(&self, offset: Vec2) -> Self {
        Self {
            x: self.x + offset.x,
            y: self.y + offset.y,
            ..*self
        }
    }

    /// Returns this frame grown outward by `outsets` on each edge.
    pub fn outset(&self, outsets: Insets) -> Self {
        Self::new(
            self.x - outsets.x0,
            self.y - outsets.y0,
            self.width + outsets.x0 + outsets.x1,
            self.height + outsets.y0 + outsets.y1,
        )
    }

    /// Whether `pt` lies inside the frame.
    ///
    /// The test is half-open like [`Rect::contains`]: the leading edges are
    /// inside, the trailing edges are not.
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x
            && pt.x < self.x + self.width
            && pt.y >= self.y
            && pt.y < self.y + self.height
    }
}

impl From<Rect> for Frame {
    fn from(rect: Rect) -> Self {
        Self::from_rect(rect)
    }
}

impl From<Frame> for Rect {
    fn from(frame: Frame) -> Self {
        frame.to_rect()
    }
}
