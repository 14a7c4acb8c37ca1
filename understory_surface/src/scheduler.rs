// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame scheduler: at most one paint per display refresh.
//!
//! ## States
//!
//! - `Ready`: no paint is in flight. A draw request paints immediately.
//! - `InFlight`: a paint ran and its display refresh has not fired yet. Draw
//!   requests only set the pending flag.
//!
//! When the refresh fires ([`FrameScheduler::after_tick`]) the scheduler goes
//! back to `Ready` and reports whether a request arrived in the meantime, in
//! which case the owner replays exactly one draw. Any burst of requests thus
//! costs one immediate paint plus at most one trailing paint, and the trailing
//! paint reads the tree as it is when it runs.
//!
//! ```
//! use understory_surface::scheduler::{DrawRequest, FrameScheduler};
//!
//! let mut s = FrameScheduler::new();
//! assert_eq!(s.request_draw(), DrawRequest::PaintNow);
//! assert_eq!(s.request_draw(), DrawRequest::Deferred);
//! assert_eq!(s.request_draw(), DrawRequest::Deferred);
//! // The display refreshed: one replay is owed.
//! assert!(s.after_tick());
//! assert_eq!(s.request_draw(), DrawRequest::PaintNow);
//! assert!(!s.after_tick());
//! ```

/// What the owner should do with a draw request.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DrawRequest {
    /// Paint now, then ask the host for the next display refresh.
    PaintNow,
    /// A paint is in flight; the request was folded into the pending replay.
    Deferred,
}

/// Two-flag coalescing state machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameScheduler {
    frame_ready: bool,
    pending_draw: bool,
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScheduler {
    /// A scheduler in the `Ready` state with nothing pending.
    pub fn new() -> Self {
        Self {
            frame_ready: true,
            pending_draw: false,
        }
    }

    /// Register a draw request.
    pub fn request_draw(&mut self) -> DrawRequest {
        if self.frame_ready {
            self.frame_ready = false;
            DrawRequest::PaintNow
        } else {
            self.pending_draw = true;
            DrawRequest::Deferred
        }
    }

    /// The display refreshed. Returns `true` if a replayed draw is owed.
    pub fn after_tick(&mut self) -> bool {
        self.frame_ready = true;
        core::mem::take(&mut self.pending_draw)
    }

    /// Drop any owed replay. Returns whether one was pending.
    ///
    /// The in-flight state is left alone: the host's refresh callback is
    /// already scheduled and still has to flip it back.
    pub fn cancel_pending(&mut self) -> bool {
        core::mem::take(&mut self.pending_draw)
    }

    /// True when no paint is in flight.
    pub fn is_frame_ready(&self) -> bool {
        self.frame_ready
    }

    /// True when a replay is owed after the in-flight paint.
    pub fn has_pending_draw(&self) -> bool {
        self.pending_draw
    }
}
