// src/api.rs

//! The `NativeApi` trait: every native entry point the binding forwards to,
//! expressed at the raw ABI level.
//!
//! Keeping the seam this low means all of the interesting work — handle
//! wrapping, array and struct decoding, string encoding, trampoline
//! installation — lives *above* the trait and is exercised identically
//! whether the provider is the runtime-loaded library (`LinkedApi`) or the
//! recording mock (`RecordingApi`).
//!
//! All calls are synchronous and block the calling thread until the
//! provider returns; event delivery happens re-entrantly from inside
//! `poll_events` via the installed callback pointers.

use crate::ffi;
use libc::{c_char, c_int, c_void};

/// Provider of the native windowing entry points.
///
/// Methods mirror the native signatures, with two mechanical conveniences:
/// out-parameter pairs are returned as tuples, and array-returning queries
/// take the count out-parameter as `&mut c_int`.
///
/// # Safety
/// The `unsafe` methods forward raw addresses to the native side. Callers
/// must pass only null or addresses previously produced by the same
/// provider, and must not use a window address after `destroy_window` or
/// any address after `terminate`. Returned buffer pointers are only valid
/// until the next call into the provider.
pub trait NativeApi {
    // Lifecycle. Version queries are the only calls valid before `init`.
    fn init(&self) -> bool;
    fn terminate(&self);
    fn version(&self) -> (c_int, c_int, c_int);
    fn version_string(&self) -> *const c_char;

    // Monitors
    unsafe fn monitors(&self, count: &mut c_int) -> *const *mut ffi::GLFWmonitor;
    fn primary_monitor(&self) -> *mut ffi::GLFWmonitor;
    unsafe fn monitor_pos(&self, monitor: *mut ffi::GLFWmonitor) -> (c_int, c_int);
    unsafe fn monitor_physical_size(&self, monitor: *mut ffi::GLFWmonitor) -> (c_int, c_int);
    unsafe fn monitor_name(&self, monitor: *mut ffi::GLFWmonitor) -> *const c_char;
    unsafe fn video_modes(
        &self,
        monitor: *mut ffi::GLFWmonitor,
        count: &mut c_int,
    ) -> *const ffi::GLFWvidmode;
    unsafe fn video_mode(&self, monitor: *mut ffi::GLFWmonitor) -> *const ffi::GLFWvidmode;

    // Gamma
    unsafe fn set_gamma(&self, monitor: *mut ffi::GLFWmonitor, gamma: f32);
    unsafe fn gamma_ramp(&self, monitor: *mut ffi::GLFWmonitor) -> *const ffi::GLFWgammaramp;
    unsafe fn set_gamma_ramp(&self, monitor: *mut ffi::GLFWmonitor, ramp: *const ffi::GLFWgammaramp);

    // Window hints
    fn default_window_hints(&self);
    fn window_hint(&self, target: c_int, value: c_int);

    // Window lifecycle
    unsafe fn create_window(
        &self,
        width: c_int,
        height: c_int,
        title: *const c_char,
        monitor: *mut ffi::GLFWmonitor,
        share: *mut ffi::GLFWwindow,
    ) -> *mut ffi::GLFWwindow;
    unsafe fn destroy_window(&self, window: *mut ffi::GLFWwindow);
    unsafe fn window_should_close(&self, window: *mut ffi::GLFWwindow) -> c_int;
    unsafe fn set_window_should_close(&self, window: *mut ffi::GLFWwindow, value: c_int);
    unsafe fn set_window_title(&self, window: *mut ffi::GLFWwindow, title: *const c_char);

    // Window geometry
    unsafe fn window_pos(&self, window: *mut ffi::GLFWwindow) -> (c_int, c_int);
    unsafe fn set_window_pos(&self, window: *mut ffi::GLFWwindow, x: c_int, y: c_int);
    unsafe fn window_size(&self, window: *mut ffi::GLFWwindow) -> (c_int, c_int);
    unsafe fn set_window_size(&self, window: *mut ffi::GLFWwindow, width: c_int, height: c_int);
    unsafe fn framebuffer_size(&self, window: *mut ffi::GLFWwindow) -> (c_int, c_int);
    /// Returns (left, top, right, bottom) decoration extents.
    unsafe fn window_frame_size(
        &self,
        window: *mut ffi::GLFWwindow,
    ) -> (c_int, c_int, c_int, c_int);

    // Window state
    unsafe fn iconify_window(&self, window: *mut ffi::GLFWwindow);
    unsafe fn restore_window(&self, window: *mut ffi::GLFWwindow);
    unsafe fn show_window(&self, window: *mut ffi::GLFWwindow);
    unsafe fn hide_window(&self, window: *mut ffi::GLFWwindow);
    unsafe fn window_monitor(&self, window: *mut ffi::GLFWwindow) -> *mut ffi::GLFWmonitor;
    unsafe fn window_attrib(&self, window: *mut ffi::GLFWwindow, attrib: c_int) -> c_int;
    unsafe fn set_window_user_pointer(&self, window: *mut ffi::GLFWwindow, pointer: *mut c_void);
    unsafe fn window_user_pointer(&self, window: *mut ffi::GLFWwindow) -> *mut c_void;

    // Context and presentation
    unsafe fn make_context_current(&self, window: *mut ffi::GLFWwindow);
    unsafe fn swap_buffers(&self, window: *mut ffi::GLFWwindow);

    // Callback installation. Passing `None` uninstalls.
    fn set_error_callback(&self, callback: ffi::GLFWerrorfun);
    fn set_monitor_callback(&self, callback: ffi::GLFWmonitorfun);
    unsafe fn set_window_pos_callback(
        &self,
        window: *mut ffi::GLFWwindow,
        callback: ffi::GLFWwindowposfun,
    );
    unsafe fn set_window_size_callback(
        &self,
        window: *mut ffi::GLFWwindow,
        callback: ffi::GLFWwindowsizefun,
    );
    unsafe fn set_window_close_callback(
        &self,
        window: *mut ffi::GLFWwindow,
        callback: ffi::GLFWwindowclosefun,
    );
    unsafe fn set_key_callback(&self, window: *mut ffi::GLFWwindow, callback: ffi::GLFWkeyfun);

    // Event pump: drains pending events, invoking installed callbacks
    // synchronously on this thread before returning.
    fn poll_events(&self);
}
