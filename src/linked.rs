// src/linked.rs

//! The real provider: the native library resolved at runtime into a table
//! of function pointers.
//!
//! Loading at runtime instead of link time keeps the crate buildable and
//! testable on machines without the library installed, and turns "library
//! missing" into a reportable [`Error`](crate::error::Error) instead of a
//! process-start failure. The `Library` handle is kept alive for as long as
//! the table, which keeps every resolved pointer valid.

#![allow(non_snake_case)]

use crate::api::NativeApi;
use crate::error::Error;
use crate::ffi;
use libc::{c_char, c_int, c_void};
use libloading::Library;
use log::{debug, info};

/// Sonames probed in order. The versioned name comes first so an unversioned
/// development symlink is only a fallback.
const LIBRARY_CANDIDATES: &[&str] = &[
    "libglfw.so.3",
    "libglfw.so",
    "libglfw.3.dylib",
    "glfw3.dll",
];

macro_rules! resolve {
    ($lib:expr, $name:expr) => {{
        let symbol = unsafe { $lib.get($name) }?;
        *symbol
    }};
}

/// Function table over a loaded native library.
pub struct LinkedApi {
    glfwInit: unsafe extern "C" fn() -> c_int,
    glfwTerminate: unsafe extern "C" fn(),
    glfwGetVersion: unsafe extern "C" fn(*mut c_int, *mut c_int, *mut c_int),
    glfwGetVersionString: unsafe extern "C" fn() -> *const c_char,
    glfwGetMonitors: unsafe extern "C" fn(*mut c_int) -> *const *mut ffi::GLFWmonitor,
    glfwGetPrimaryMonitor: unsafe extern "C" fn() -> *mut ffi::GLFWmonitor,
    glfwGetMonitorPos: unsafe extern "C" fn(*mut ffi::GLFWmonitor, *mut c_int, *mut c_int),
    glfwGetMonitorPhysicalSize:
        unsafe extern "C" fn(*mut ffi::GLFWmonitor, *mut c_int, *mut c_int),
    glfwGetMonitorName: unsafe extern "C" fn(*mut ffi::GLFWmonitor) -> *const c_char,
    glfwGetVideoModes:
        unsafe extern "C" fn(*mut ffi::GLFWmonitor, *mut c_int) -> *const ffi::GLFWvidmode,
    glfwGetVideoMode: unsafe extern "C" fn(*mut ffi::GLFWmonitor) -> *const ffi::GLFWvidmode,
    glfwSetGamma: unsafe extern "C" fn(*mut ffi::GLFWmonitor, f32),
    glfwGetGammaRamp: unsafe extern "C" fn(*mut ffi::GLFWmonitor) -> *const ffi::GLFWgammaramp,
    glfwSetGammaRamp: unsafe extern "C" fn(*mut ffi::GLFWmonitor, *const ffi::GLFWgammaramp),
    glfwDefaultWindowHints: unsafe extern "C" fn(),
    glfwWindowHint: unsafe extern "C" fn(c_int, c_int),
    glfwCreateWindow: unsafe extern "C" fn(
        c_int,
        c_int,
        *const c_char,
        *mut ffi::GLFWmonitor,
        *mut ffi::GLFWwindow,
    ) -> *mut ffi::GLFWwindow,
    glfwDestroyWindow: unsafe extern "C" fn(*mut ffi::GLFWwindow),
    glfwWindowShouldClose: unsafe extern "C" fn(*mut ffi::GLFWwindow) -> c_int,
    glfwSetWindowShouldClose: unsafe extern "C" fn(*mut ffi::GLFWwindow, c_int),
    glfwSetWindowTitle: unsafe extern "C" fn(*mut ffi::GLFWwindow, *const c_char),
    glfwGetWindowPos: unsafe extern "C" fn(*mut ffi::GLFWwindow, *mut c_int, *mut c_int),
    glfwSetWindowPos: unsafe extern "C" fn(*mut ffi::GLFWwindow, c_int, c_int),
    glfwGetWindowSize: unsafe extern "C" fn(*mut ffi::GLFWwindow, *mut c_int, *mut c_int),
    glfwSetWindowSize: unsafe extern "C" fn(*mut ffi::GLFWwindow, c_int, c_int),
    glfwGetFramebufferSize: unsafe extern "C" fn(*mut ffi::GLFWwindow, *mut c_int, *mut c_int),
    glfwGetWindowFrameSize: unsafe extern "C" fn(
        *mut ffi::GLFWwindow,
        *mut c_int,
        *mut c_int,
        *mut c_int,
        *mut c_int,
    ),
    glfwIconifyWindow: unsafe extern "C" fn(*mut ffi::GLFWwindow),
    glfwRestoreWindow: unsafe extern "C" fn(*mut ffi::GLFWwindow),
    glfwShowWindow: unsafe extern "C" fn(*mut ffi::GLFWwindow),
    glfwHideWindow: unsafe extern "C" fn(*mut ffi::GLFWwindow),
    glfwGetWindowMonitor: unsafe extern "C" fn(*mut ffi::GLFWwindow) -> *mut ffi::GLFWmonitor,
    glfwGetWindowAttrib: unsafe extern "C" fn(*mut ffi::GLFWwindow, c_int) -> c_int,
    glfwSetWindowUserPointer: unsafe extern "C" fn(*mut ffi::GLFWwindow, *mut c_void),
    glfwGetWindowUserPointer: unsafe extern "C" fn(*mut ffi::GLFWwindow) -> *mut c_void,
    glfwMakeContextCurrent: unsafe extern "C" fn(*mut ffi::GLFWwindow),
    glfwSwapBuffers: unsafe extern "C" fn(*mut ffi::GLFWwindow),
    glfwSetErrorCallback: unsafe extern "C" fn(ffi::GLFWerrorfun) -> ffi::GLFWerrorfun,
    glfwSetMonitorCallback: unsafe extern "C" fn(ffi::GLFWmonitorfun) -> ffi::GLFWmonitorfun,
    glfwSetWindowPosCallback:
        unsafe extern "C" fn(*mut ffi::GLFWwindow, ffi::GLFWwindowposfun) -> ffi::GLFWwindowposfun,
    glfwSetWindowSizeCallback: unsafe extern "C" fn(
        *mut ffi::GLFWwindow,
        ffi::GLFWwindowsizefun,
    ) -> ffi::GLFWwindowsizefun,
    glfwSetWindowCloseCallback: unsafe extern "C" fn(
        *mut ffi::GLFWwindow,
        ffi::GLFWwindowclosefun,
    ) -> ffi::GLFWwindowclosefun,
    glfwSetKeyCallback:
        unsafe extern "C" fn(*mut ffi::GLFWwindow, ffi::GLFWkeyfun) -> ffi::GLFWkeyfun,
    glfwPollEvents: unsafe extern "C" fn(),
    // Dropping the library unmaps it; every pointer above borrows from it,
    // so this field must outlive them all.
    _lib: Library,
}

impl LinkedApi {
    /// Loads the first available library candidate and resolves the full
    /// entry-point table.
    pub fn open() -> Result<Self, Error> {
        let mut last_error = None;
        for candidate in LIBRARY_CANDIDATES {
            match Self::load(candidate) {
                Ok(api) => {
                    info!("loaded native windowing library '{candidate}'");
                    return Ok(api);
                }
                Err(e) => {
                    debug!("could not load '{candidate}': {e}");
                    last_error = Some(e);
                }
            }
        }
        // The candidate list is non-empty, so an error was recorded.
        Err(Error::Library(last_error.expect("no library candidates")))
    }

    fn load(name: &str) -> Result<Self, libloading::Error> {
        // SAFETY: loading runs arbitrary library initializers; GLFW's are
        // inert until glfwInit.
        let lib = unsafe { Library::new(name) }?;
        Ok(LinkedApi {
            glfwInit: resolve!(lib, b"glfwInit\0"),
            glfwTerminate: resolve!(lib, b"glfwTerminate\0"),
            glfwGetVersion: resolve!(lib, b"glfwGetVersion\0"),
            glfwGetVersionString: resolve!(lib, b"glfwGetVersionString\0"),
            glfwGetMonitors: resolve!(lib, b"glfwGetMonitors\0"),
            glfwGetPrimaryMonitor: resolve!(lib, b"glfwGetPrimaryMonitor\0"),
            glfwGetMonitorPos: resolve!(lib, b"glfwGetMonitorPos\0"),
            glfwGetMonitorPhysicalSize: resolve!(lib, b"glfwGetMonitorPhysicalSize\0"),
            glfwGetMonitorName: resolve!(lib, b"glfwGetMonitorName\0"),
            glfwGetVideoModes: resolve!(lib, b"glfwGetVideoModes\0"),
            glfwGetVideoMode: resolve!(lib, b"glfwGetVideoMode\0"),
            glfwSetGamma: resolve!(lib, b"glfwSetGamma\0"),
            glfwGetGammaRamp: resolve!(lib, b"glfwGetGammaRamp\0"),
            glfwSetGammaRamp: resolve!(lib, b"glfwSetGammaRamp\0"),
            glfwDefaultWindowHints: resolve!(lib, b"glfwDefaultWindowHints\0"),
            glfwWindowHint: resolve!(lib, b"glfwWindowHint\0"),
            glfwCreateWindow: resolve!(lib, b"glfwCreateWindow\0"),
            glfwDestroyWindow: resolve!(lib, b"glfwDestroyWindow\0"),
            glfwWindowShouldClose: resolve!(lib, b"glfwWindowShouldClose\0"),
            glfwSetWindowShouldClose: resolve!(lib, b"glfwSetWindowShouldClose\0"),
            glfwSetWindowTitle: resolve!(lib, b"glfwSetWindowTitle\0"),
            glfwGetWindowPos: resolve!(lib, b"glfwGetWindowPos\0"),
            glfwSetWindowPos: resolve!(lib, b"glfwSetWindowPos\0"),
            glfwGetWindowSize: resolve!(lib, b"glfwGetWindowSize\0"),
            glfwSetWindowSize: resolve!(lib, b"glfwSetWindowSize\0"),
            glfwGetFramebufferSize: resolve!(lib, b"glfwGetFramebufferSize\0"),
            glfwGetWindowFrameSize: resolve!(lib, b"glfwGetWindowFrameSize\0"),
            glfwIconifyWindow: resolve!(lib, b"glfwIconifyWindow\0"),
            glfwRestoreWindow: resolve!(lib, b"glfwRestoreWindow\0"),
            glfwShowWindow: resolve!(lib, b"glfwShowWindow\0"),
            glfwHideWindow: resolve!(lib, b"glfwHideWindow\0"),
            glfwGetWindowMonitor: resolve!(lib, b"glfwGetWindowMonitor\0"),
            glfwGetWindowAttrib: resolve!(lib, b"glfwGetWindowAttrib\0"),
            glfwSetWindowUserPointer: resolve!(lib, b"glfwSetWindowUserPointer\0"),
            glfwGetWindowUserPointer: resolve!(lib, b"glfwGetWindowUserPointer\0"),
            glfwMakeContextCurrent: resolve!(lib, b"glfwMakeContextCurrent\0"),
            glfwSwapBuffers: resolve!(lib, b"glfwSwapBuffers\0"),
            glfwSetErrorCallback: resolve!(lib, b"glfwSetErrorCallback\0"),
            glfwSetMonitorCallback: resolve!(lib, b"glfwSetMonitorCallback\0"),
            glfwSetWindowPosCallback: resolve!(lib, b"glfwSetWindowPosCallback\0"),
            glfwSetWindowSizeCallback: resolve!(lib, b"glfwSetWindowSizeCallback\0"),
            glfwSetWindowCloseCallback: resolve!(lib, b"glfwSetWindowCloseCallback\0"),
            glfwSetKeyCallback: resolve!(lib, b"glfwSetKeyCallback\0"),
            glfwPollEvents: resolve!(lib, b"glfwPollEvents\0"),
            _lib: lib,
        })
    }
}

impl NativeApi for LinkedApi {
    fn init(&self) -> bool {
        unsafe { (self.glfwInit)() == ffi::TRUE }
    }

    fn terminate(&self) {
        unsafe { (self.glfwTerminate)() }
    }

    fn version(&self) -> (c_int, c_int, c_int) {
        let (mut major, mut minor, mut rev) = (0, 0, 0);
        unsafe { (self.glfwGetVersion)(&mut major, &mut minor, &mut rev) };
        (major, minor, rev)
    }

    fn version_string(&self) -> *const c_char {
        unsafe { (self.glfwGetVersionString)() }
    }

    unsafe fn monitors(&self, count: &mut c_int) -> *const *mut ffi::GLFWmonitor {
        (self.glfwGetMonitors)(count)
    }

    fn primary_monitor(&self) -> *mut ffi::GLFWmonitor {
        unsafe { (self.glfwGetPrimaryMonitor)() }
    }

    unsafe fn monitor_pos(&self, monitor: *mut ffi::GLFWmonitor) -> (c_int, c_int) {
        let (mut x, mut y) = (0, 0);
        (self.glfwGetMonitorPos)(monitor, &mut x, &mut y);
        (x, y)
    }

    unsafe fn monitor_physical_size(&self, monitor: *mut ffi::GLFWmonitor) -> (c_int, c_int) {
        let (mut width, mut height) = (0, 0);
        (self.glfwGetMonitorPhysicalSize)(monitor, &mut width, &mut height);
        (width, height)
    }

    unsafe fn monitor_name(&self, monitor: *mut ffi::GLFWmonitor) -> *const c_char {
        (self.glfwGetMonitorName)(monitor)
    }

    unsafe fn video_modes(
        &self,
        monitor: *mut ffi::GLFWmonitor,
        count: &mut c_int,
    ) -> *const ffi::GLFWvidmode {
        (self.glfwGetVideoModes)(monitor, count)
    }

    unsafe fn video_mode(&self, monitor: *mut ffi::GLFWmonitor) -> *const ffi::GLFWvidmode {
        (self.glfwGetVideoMode)(monitor)
    }

    unsafe fn set_gamma(&self, monitor: *mut ffi::GLFWmonitor, gamma: f32) {
        (self.glfwSetGamma)(monitor, gamma)
    }

    unsafe fn gamma_ramp(&self, monitor: *mut ffi::GLFWmonitor) -> *const ffi::GLFWgammaramp {
        (self.glfwGetGammaRamp)(monitor)
    }

    unsafe fn set_gamma_ramp(
        &self,
        monitor: *mut ffi::GLFWmonitor,
        ramp: *const ffi::GLFWgammaramp,
    ) {
        (self.glfwSetGammaRamp)(monitor, ramp)
    }

    fn default_window_hints(&self) {
        unsafe { (self.glfwDefaultWindowHints)() }
    }

    fn window_hint(&self, target: c_int, value: c_int) {
        unsafe { (self.glfwWindowHint)(target, value) }
    }

    unsafe fn create_window(
        &self,
        width: c_int,
        height: c_int,
        title: *const c_char,
        monitor: *mut ffi::GLFWmonitor,
        share: *mut ffi::GLFWwindow,
    ) -> *mut ffi::GLFWwindow {
        (self.glfwCreateWindow)(width, height, title, monitor, share)
    }

    unsafe fn destroy_window(&self, window: *mut ffi::GLFWwindow) {
        (self.glfwDestroyWindow)(window)
    }

    unsafe fn window_should_close(&self, window: *mut ffi::GLFWwindow) -> c_int {
        (self.glfwWindowShouldClose)(window)
    }

    unsafe fn set_window_should_close(&self, window: *mut ffi::GLFWwindow, value: c_int) {
        (self.glfwSetWindowShouldClose)(window, value)
    }

    unsafe fn set_window_title(&self, window: *mut ffi::GLFWwindow, title: *const c_char) {
        (self.glfwSetWindowTitle)(window, title)
    }

    unsafe fn window_pos(&self, window: *mut ffi::GLFWwindow) -> (c_int, c_int) {
        let (mut x, mut y) = (0, 0);
        (self.glfwGetWindowPos)(window, &mut x, &mut y);
        (x, y)
    }

    unsafe fn set_window_pos(&self, window: *mut ffi::GLFWwindow, x: c_int, y: c_int) {
        (self.glfwSetWindowPos)(window, x, y)
    }

    unsafe fn window_size(&self, window: *mut ffi::GLFWwindow) -> (c_int, c_int) {
        let (mut width, mut height) = (0, 0);
        (self.glfwGetWindowSize)(window, &mut width, &mut height);
        (width, height)
    }

    unsafe fn set_window_size(&self, window: *mut ffi::GLFWwindow, width: c_int, height: c_int) {
        (self.glfwSetWindowSize)(window, width, height)
    }

    unsafe fn framebuffer_size(&self, window: *mut ffi::GLFWwindow) -> (c_int, c_int) {
        let (mut width, mut height) = (0, 0);
        (self.glfwGetFramebufferSize)(window, &mut width, &mut height);
        (width, height)
    }

    unsafe fn window_frame_size(
        &self,
        window: *mut ffi::GLFWwindow,
    ) -> (c_int, c_int, c_int, c_int) {
        let (mut left, mut top, mut right, mut bottom) = (0, 0, 0, 0);
        (self.glfwGetWindowFrameSize)(window, &mut left, &mut top, &mut right, &mut bottom);
        (left, top, right, bottom)
    }

    unsafe fn iconify_window(&self, window: *mut ffi::GLFWwindow) {
        (self.glfwIconifyWindow)(window)
    }

    unsafe fn restore_window(&self, window: *mut ffi::GLFWwindow) {
        (self.glfwRestoreWindow)(window)
    }

    unsafe fn show_window(&self, window: *mut ffi::GLFWwindow) {
        (self.glfwShowWindow)(window)
    }

    unsafe fn hide_window(&self, window: *mut ffi::GLFWwindow) {
        (self.glfwHideWindow)(window)
    }

    unsafe fn window_monitor(&self, window: *mut ffi::GLFWwindow) -> *mut ffi::GLFWmonitor {
        (self.glfwGetWindowMonitor)(window)
    }

    unsafe fn window_attrib(&self, window: *mut ffi::GLFWwindow, attrib: c_int) -> c_int {
        (self.glfwGetWindowAttrib)(window, attrib)
    }

    unsafe fn set_window_user_pointer(&self, window: *mut ffi::GLFWwindow, pointer: *mut c_void) {
        (self.glfwSetWindowUserPointer)(window, pointer)
    }

    unsafe fn window_user_pointer(&self, window: *mut ffi::GLFWwindow) -> *mut c_void {
        (self.glfwGetWindowUserPointer)(window)
    }

    unsafe fn make_context_current(&self, window: *mut ffi::GLFWwindow) {
        (self.glfwMakeContextCurrent)(window)
    }

    unsafe fn swap_buffers(&self, window: *mut ffi::GLFWwindow) {
        (self.glfwSwapBuffers)(window)
    }

    fn set_error_callback(&self, callback: ffi::GLFWerrorfun) {
        unsafe { (self.glfwSetErrorCallback)(callback) };
    }

    fn set_monitor_callback(&self, callback: ffi::GLFWmonitorfun) {
        unsafe { (self.glfwSetMonitorCallback)(callback) };
    }

    unsafe fn set_window_pos_callback(
        &self,
        window: *mut ffi::GLFWwindow,
        callback: ffi::GLFWwindowposfun,
    ) {
        (self.glfwSetWindowPosCallback)(window, callback);
    }

    unsafe fn set_window_size_callback(
        &self,
        window: *mut ffi::GLFWwindow,
        callback: ffi::GLFWwindowsizefun,
    ) {
        (self.glfwSetWindowSizeCallback)(window, callback);
    }

    unsafe fn set_window_close_callback(
        &self,
        window: *mut ffi::GLFWwindow,
        callback: ffi::GLFWwindowclosefun,
    ) {
        (self.glfwSetWindowCloseCallback)(window, callback);
    }

    unsafe fn set_key_callback(&self, window: *mut ffi::GLFWwindow, callback: ffi::GLFWkeyfun) {
        (self.glfwSetKeyCallback)(window, callback);
    }

    fn poll_events(&self) {
        unsafe { (self.glfwPollEvents)() }
    }
}
