// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.
//!
//! The surface recovers its own structural conditions locally: drawing with no
//! tree, or an input event that hits nothing, is never an error. What remains
//! is invalid configuration, lifecycle misuse, and failures raised by the
//! reconciler, which are passed through untouched.

/// Rejected [`SurfaceConfig`](crate::SurfaceConfig) values.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A geometry field was NaN or infinite.
    #[error("surface {field} must be finite, got {value}")]
    NonFinite {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// Width or height was negative.
    #[error("surface {field} must not be negative, got {value}")]
    NegativeSize {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// The explicit scale was not a finite, positive number.
    #[error("surface scale must be finite and positive, got {0}")]
    InvalidScale(f64),
}

/// Errors returned by [`Surface`](crate::Surface) lifecycle hooks.
///
/// `E` is the reconciler's own error type.
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError<E> {
    /// The new configuration was rejected; the previous one stays in force.
    #[error("invalid surface configuration")]
    InvalidConfig(#[from] ConfigError),
    /// `on_mount` was called on a surface that already has a tree.
    #[error("surface is already mounted")]
    AlreadyMounted,
    /// A hook that needs a tree was called before `on_mount`.
    #[error("surface is not mounted")]
    NotMounted,
    /// The reconciler failed; the tree holds whatever it managed to build.
    #[error("reconciler failed")]
    Reconciler(#[source] E),
}
