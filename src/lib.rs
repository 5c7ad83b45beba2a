// src/lib.rs

//! Binding to the GLFW 3 windowing and input library.
//!
//! The native library is loaded at runtime and every entry point sits
//! behind the [`NativeApi`] trait, so the whole marshaling surface — typed
//! opaque handles, array and struct decoding, hint encoding, callback
//! trampolines — runs identically against the real library
//! ([`LinkedApi`]) and against a scripted recording provider
//! ([`RecordingApi`]) in tests.
//!
//! ```no_run
//! use glfw_bind::{Session, WindowHint};
//!
//! # fn main() -> Result<(), glfw_bind::Error> {
//! let mut session = Session::init()?;
//! session.set_error_callback(|code, description| {
//!     eprintln!("windowing error {code:?}: {description}");
//! });
//! session.window_hint(WindowHint::Resizable(false));
//! let window = session.create_window(800, 600, "demo", None, None)?;
//! while !session.window_should_close(window) {
//!     session.poll_events();
//! }
//! session.destroy_window(window);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod callbacks;
pub mod config;
pub mod enums;
pub mod error;
pub mod ffi;
pub mod handle;
pub mod hints;
pub mod keys;
pub mod linked;
pub mod marshal;
pub mod mock;
pub mod session;

pub use api::NativeApi;
pub use callbacks::CallbackRegistry;
pub use config::{ContextConfig, WindowConfig};
pub use enums::{
    ClientApi, ContextReleaseBehavior, ContextRobustness, ErrorCode, MonitorEvent, OpenGlProfile,
    WindowAttrib,
};
pub use error::Error;
pub use handle::{MonitorHandle, WindowHandle};
pub use hints::WindowHint;
pub use keys::{Key, KeyAction, Modifiers};
pub use linked::LinkedApi;
pub use marshal::{GammaRamp, VideoMode, GAMMA_RAMP_SIZE};
pub use mock::RecordingApi;
pub use session::Session;
