// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Surface configuration.

use kurbo::{Rect, Size};
use understory_render_tree::Frame;

use crate::error::ConfigError;

/// Geometry and rendering options for a [`Surface`](crate::Surface).
///
/// `top`, `left`, `width` and `height` are logical (unscaled) units.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurfaceConfig {
    /// Vertical position of the surface.
    pub top: f64,
    /// Horizontal position of the surface.
    pub left: f64,
    /// Logical width.
    pub width: f64,
    /// Logical height.
    pub height: f64,
    /// Device pixel ratio. `None` uses the host's reported ratio, or 1.
    #[cfg_attr(feature = "serde", serde(default))]
    pub scale: Option<f64>,
    /// Run layout hooks before every paint.
    #[cfg_attr(feature = "serde", serde(default))]
    pub enable_css_layout: bool,
}

impl SurfaceConfig {
    /// A surface of the given logical size at the origin.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            top: 0.0,
            left: 0.0,
            width,
            height,
            scale: None,
            enable_css_layout: false,
        }
    }

    /// Place the surface at `(left, top)`.
    #[must_use]
    pub fn with_position(mut self, left: f64, top: f64) -> Self {
        self.left = left;
        self.top = top;
        self
    }

    /// Force a device pixel ratio instead of asking the host.
    #[must_use]
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Toggle the layout pass.
    #[must_use]
    pub fn with_css_layout(mut self, enabled: bool) -> Self {
        self.enable_css_layout = enabled;
        self
    }

    /// Check that the geometry is finite and non-negative and the scale positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("top", self.top),
            ("left", self.left),
            ("width", self.width),
            ("height", self.height),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }
        for (field, value) in [("width", self.width), ("height", self.height)] {
            if value < 0.0 {
                return Err(ConfigError::NegativeSize { field, value });
            }
        }
        match self.scale {
            Some(s) if !is_valid_scale(s) => Err(ConfigError::InvalidScale(s)),
            _ => Ok(()),
        }
    }

    /// The effective device pixel ratio.
    ///
    /// An explicit scale wins, then a usable host ratio, then 1.
    pub fn resolved_scale(&self, host_ratio: Option<f64>) -> f64 {
        self.scale
            .or(host_ratio.filter(|r| is_valid_scale(*r)))
            .unwrap_or(1.0)
    }

    /// The root frame: the surface's logical bounds at its position.
    pub fn frame(&self) -> Frame {
        Frame::new(self.left, self.top, self.width, self.height)
    }

    /// The logical drawing area cleared before each paint.
    pub fn viewport(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Size of the backing store in physical pixels for the given scale.
    pub fn backing_size(&self, scale: f64) -> Size {
        Size::new(self.width * scale, self.height * scale)
    }

    /// True if `other` differs in width or height.
    pub fn size_differs(&self, other: &Self) -> bool {
        self.width != other.width || self.height != other.height
    }
}

fn is_valid_scale(scale: f64) -> bool {
    scale.is_finite() && scale > 0.0
}
