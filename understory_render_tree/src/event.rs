// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input events, event kinds, and the handler table nodes carry.
//!
//! ## Overview
//!
//! Each recognized [`EventKind`] maps to exactly one [`HandlerKey`] through a
//! fixed table. Touch end and touch cancel share a handler.
//!
//! | event name    | kind                       | handler key                  |
//! |---------------|----------------------------|------------------------------|
//! | `touchstart`  | [`EventKind::TouchStart`]  | [`HandlerKey::TouchStart`]   |
//! | `touchmove`   | [`EventKind::TouchMove`]   | [`HandlerKey::TouchMove`]    |
//! | `touchend`    | [`EventKind::TouchEnd`]    | [`HandlerKey::TouchEnd`]     |
//! | `touchcancel` | [`EventKind::TouchCancel`] | [`HandlerKey::TouchEnd`]     |
//! | `click`       | [`EventKind::Click`]       | [`HandlerKey::Click`]        |
//! | `contextmenu` | [`EventKind::ContextMenu`] | [`HandlerKey::ContextMenu`]  |
//! | `dblclick`    | [`EventKind::DoubleClick`] | [`HandlerKey::DoubleClick`]  |
//!
//! Unrecognized names resolve to no kind, and therefore to no handler.

use alloc::boxed::Box;
use alloc::vec::Vec;
use kurbo::Point;

use crate::types::NodeId;

/// Kinds of input events the render tree can route.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum EventKind {
    /// One or more touch points began.
    TouchStart,
    /// One or more touch points moved.
    TouchMove,
    /// One or more touch points ended.
    TouchEnd,
    /// One or more touch points were cancelled by the platform.
    TouchCancel,
    /// Primary button click.
    Click,
    /// Secondary button / context menu request.
    ContextMenu,
    /// Double click.
    DoubleClick,
}

impl EventKind {
    /// Look up a kind by its platform event name (for example `"touchstart"`).
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "touchstart" => Self::TouchStart,
            "touchmove" => Self::TouchMove,
            "touchend" => Self::TouchEnd,
            "touchcancel" => Self::TouchCancel,
            "click" => Self::Click,
            "contextmenu" => Self::ContextMenu,
            "dblclick" => Self::DoubleClick,
            _ => return None,
        })
    }

    /// The platform event name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::TouchStart => "touchstart",
            Self::TouchMove => "touchmove",
            Self::TouchEnd => "touchend",
            Self::TouchCancel => "touchcancel",
            Self::Click => "click",
            Self::ContextMenu => "contextmenu",
            Self::DoubleClick => "dblclick",
        }
    }

    /// The handler a node must declare to receive this kind.
    pub const fn handler_key(self) -> HandlerKey {
        match self {
            Self::TouchStart => HandlerKey::TouchStart,
            Self::TouchMove => HandlerKey::TouchMove,
            Self::TouchEnd | Self::TouchCancel => HandlerKey::TouchEnd,
            Self::Click => HandlerKey::Click,
            Self::ContextMenu => HandlerKey::ContextMenu,
            Self::DoubleClick => HandlerKey::DoubleClick,
        }
    }

    /// True for the four touch kinds.
    pub const fn is_touch(self) -> bool {
        matches!(
            self,
            Self::TouchStart | Self::TouchMove | Self::TouchEnd | Self::TouchCancel
        )
    }
}

/// Slots in a node's handler table.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum HandlerKey {
    /// `on_touch_start`.
    TouchStart,
    /// `on_touch_move`.
    TouchMove,
    /// `on_touch_end`, also used for touch cancel.
    TouchEnd,
    /// `on_click`.
    Click,
    /// `on_context_menu`.
    ContextMenu,
    /// `on_double_click`.
    DoubleClick,
}

impl HandlerKey {
    /// Number of handler slots.
    pub const COUNT: usize = 6;

    /// Every handler key, in table order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::TouchStart,
        Self::TouchMove,
        Self::TouchEnd,
        Self::Click,
        Self::ContextMenu,
        Self::DoubleClick,
    ];

    /// The handler's property name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::TouchStart => "on_touch_start",
            Self::TouchMove => "on_touch_move",
            Self::TouchEnd => "on_touch_end",
            Self::Click => "on_click",
            Self::ContextMenu => "on_context_menu",
            Self::DoubleClick => "on_double_click",
        }
    }

    /// The single bit for this key in a [`HandlerMask`].
    pub const fn mask(self) -> HandlerMask {
        match self {
            Self::TouchStart => HandlerMask::TOUCH_START,
            Self::TouchMove => HandlerMask::TOUCH_MOVE,
            Self::TouchEnd => HandlerMask::TOUCH_END,
            Self::Click => HandlerMask::CLICK,
            Self::ContextMenu => HandlerMask::CONTEXT_MENU,
            Self::DoubleClick => HandlerMask::DOUBLE_CLICK,
        }
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

bitflags::bitflags! {
    /// The set of handlers a node declares.
    ///
    /// Hit testing consults this mask rather than the handler table itself.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct HandlerMask: u8 {
        /// Declares `on_touch_start`.
        const TOUCH_START  = 0b0000_0001;
        /// Declares `on_touch_move`.
        const TOUCH_MOVE   = 0b0000_0010;
        /// Declares `on_touch_end`.
        const TOUCH_END    = 0b0000_0100;
        /// Declares `on_click`.
        const CLICK        = 0b0000_1000;
        /// Declares `on_context_menu`.
        const CONTEXT_MENU = 0b0001_0000;
        /// Declares `on_double_click`.
        const DOUBLE_CLICK = 0b0010_0000;
    }
}

/// Identifier of a touch point, assigned by the input source.
///
/// Stable from the touch's start until its end or cancel.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct TouchId(pub u64);

/// A single touch point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Touch {
    /// Identifier of the touch.
    pub identifier: TouchId,
    /// Position in the surface's coordinate space.
    pub point: Point,
}

impl Touch {
    /// Create a touch point.
    pub fn new(identifier: u64, point: Point) -> Self {
        Self {
            identifier: TouchId(identifier),
            point,
        }
    }
}

/// A raw input event together with its derived coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct InputEvent {
    /// What happened.
    pub kind: EventKind,
    /// Pointer position for mouse-style events.
    pub point: Option<Point>,
    /// All touch points currently on the surface.
    pub touches: Vec<Touch>,
    /// The touch points that changed in this event.
    pub changed_touches: Vec<Touch>,
}

impl InputEvent {
    /// A mouse-style event at `point`.
    pub fn pointer(kind: EventKind, point: Point) -> Self {
        Self {
            kind,
            point: Some(point),
            touches: Vec::new(),
            changed_touches: Vec::new(),
        }
    }

    /// A touch event.
    pub fn touch(kind: EventKind, touches: Vec<Touch>, changed_touches: Vec<Touch>) -> Self {
        Self {
            kind,
            point: None,
            touches,
            changed_touches,
        }
    }

    /// The point used to resolve a hit target.
    ///
    /// The pointer position if present, else the first changed touch, else the
    /// first active touch. End events usually carry no usable point.
    pub fn hit_point(&self) -> Option<Point> {
        self.point
            .or_else(|| self.changed_touches.first().map(|t| t.point))
            .or_else(|| self.touches.first().map(|t| t.point))
    }
}

/// Context handed to an event handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EventCx {
    target: NodeId,
    redraw: bool,
}

impl EventCx {
    /// Context for a dispatch to `target`.
    pub fn new(target: NodeId) -> Self {
        Self {
            target,
            redraw: false,
        }
    }

    /// The node whose handler is running.
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Ask the owner of the tree to schedule a redraw once the handler returns.
    pub fn request_redraw(&mut self) {
        self.redraw = true;
    }

    /// Whether a handler asked for a redraw.
    pub fn redraw_requested(&self) -> bool {
        self.redraw
    }
}

/// An event handler stored on a node.
pub type Handler = Box<dyn FnMut(&InputEvent, &mut EventCx)>;

/// Enum-keyed table of optional handlers.
pub(crate) struct HandlerTable {
    slots: [Option<Handler>; HandlerKey::COUNT],
    mask: HandlerMask,
}

impl Default for HandlerTable {
    fn default() -> Self {
        Self {
            slots: [const { None }; HandlerKey::COUNT],
            mask: HandlerMask::empty(),
        }
    }
}

impl core::fmt::Debug for HandlerTable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HandlerTable")
            .field("mask", &self.mask)
            .finish_non_exhaustive()
    }
}

impl HandlerTable {
    pub(crate) fn mask(&self) -> HandlerMask {
        self.mask
    }

    pub(crate) fn set(&mut self, key: HandlerKey, handler: Handler) {
        self.slots[key.index()] = Some(handler);
        self.mask.insert(key.mask());
    }

    pub(crate) fn remove(&mut self, key: HandlerKey) -> Option<Handler> {
        self.mask.remove(key.mask());
        self.slots[key.index()].take()
    }

    pub(crate) fn get_mut(&mut self, key: HandlerKey) -> Option<&mut Handler> {
        self.slots[key.index()].as_mut()
    }
}
