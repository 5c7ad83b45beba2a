// src/error.rs

//! Binding-boundary errors.
//!
//! Only conditions detected on *this* side of the boundary live here.
//! Errors the native library reports about its own operations never become
//! `Err`; they are delivered through the error callback while the failing
//! call returns a zeroed or none value.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Native initialization reported failure.
    #[error("native windowing library failed to initialize")]
    Init,

    /// The native library could not be loaded or a symbol was missing.
    #[error("could not load the native windowing library: {0}")]
    Library(#[from] libloading::Error),

    /// A text parameter contained an interior NUL and cannot cross the
    /// C string boundary.
    #[error("text parameter contains an interior NUL byte: {0}")]
    InvalidText(#[from] std::ffi::NulError),
}
