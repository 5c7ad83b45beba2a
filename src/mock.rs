// src/mock.rs

//! Recording provider for exercising the binding without a native library.
//!
//! `RecordingApi` plays the native side of the contract: it hands out
//! fabricated addresses, backs array queries with owned buffers, echoes
//! gamma ramps, and "delivers" queued events by invoking whatever raw
//! callback pointers the binding installed — which means the real
//! trampolines and the real marshaling run in tests, only the bottom layer
//! is scripted.
//!
//! Every entry point is also recorded by name so tests can assert on what
//! crossed the boundary.

use crate::api::NativeApi;
use crate::enums::{ErrorCode, MonitorEvent};
use crate::ffi;
use crate::handle::{MonitorHandle, WindowHandle};
use crate::marshal::VideoMode;
use libc::{c_char, c_int, c_void};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::ffi::{CStr, CString};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

struct MonitorRecord {
    addr: usize,
    name: CString,
    pos: (c_int, c_int),
    physical_size: (c_int, c_int),
    modes: Box<[ffi::GLFWvidmode]>,
    current_mode: Option<Box<ffi::GLFWvidmode>>,
    gamma_ramp: Option<(Vec<u16>, Vec<u16>, Vec<u16>)>,
    last_gamma: Option<f32>,
}

struct WindowRecord {
    addr: usize,
    title: String,
    pos: (c_int, c_int),
    size: (c_int, c_int),
    frame: (c_int, c_int, c_int, c_int),
    monitor: *mut ffi::GLFWmonitor,
    user_pointer: *mut c_void,
    should_close: bool,
    visible: bool,
    iconified: bool,
    resizable: bool,
    decorated: bool,
    floating: bool,
    focused: bool,
    destroyed: bool,
    pos_callback: ffi::GLFWwindowposfun,
    size_callback: ffi::GLFWwindowsizefun,
    close_callback: ffi::GLFWwindowclosefun,
    key_callback: ffi::GLFWkeyfun,
}

enum Pending {
    Error {
        code: c_int,
        description: CString,
    },
    Monitor {
        monitor: *mut ffi::GLFWmonitor,
        event: c_int,
    },
    WindowPos {
        window: *mut ffi::GLFWwindow,
        x: c_int,
        y: c_int,
    },
    WindowSize {
        window: *mut ffi::GLFWwindow,
        width: c_int,
        height: c_int,
    },
    WindowClose {
        window: *mut ffi::GLFWwindow,
    },
    Key {
        window: *mut ffi::GLFWwindow,
        key: c_int,
        scancode: c_int,
        action: c_int,
        mods: c_int,
    },
}

#[derive(Default)]
struct MockState {
    init_result: bool,
    initialized: bool,
    terminated: bool,
    version: (c_int, c_int, c_int),
    version_string: Option<CString>,
    monitors: Vec<MonitorRecord>,
    // Backing buffer for the last monitors() reply; kept alive so the
    // returned pointer stays readable until the next call.
    monitor_array: Box<[*mut ffi::GLFWmonitor]>,
    // Backing storage for the last gamma_ramp() reply; written only to keep
    // the descriptor allocation alive until the next call.
    _ramp_keepalive: Option<Box<ffi::GLFWgammaramp>>,
    windows: Vec<WindowRecord>,
    next_window_addr: usize,
    fail_next_window: bool,
    pending_hints: Vec<(c_int, c_int)>,
    hint_log: Vec<(c_int, c_int)>,
    error_callback: ffi::GLFWerrorfun,
    monitor_callback: ffi::GLFWmonitorfun,
    queue: VecDeque<Pending>,
    calls: Vec<&'static str>,
}

/// Scripted, recording stand-in for the native library.
pub struct RecordingApi {
    state: RefCell<MockState>,
    // Shared so tests can observe termination after the owning session is
    // dropped.
    terminated: Arc<AtomicBool>,
}

impl Default for RecordingApi {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingApi {
    pub fn new() -> Self {
        let state = MockState {
            init_result: true,
            version: (3, 1, 0),
            version_string: Some(CString::new("3.1.0 recording mock").unwrap()),
            next_window_addr: 0x1000,
            ..MockState::default()
        };
        RecordingApi {
            state: RefCell::new(state),
            terminated: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Makes the next `init` report failure.
    pub fn fail_init(&self) {
        self.state.borrow_mut().init_result = false;
    }

    /// Makes the next window creation return the null handle.
    pub fn fail_next_window(&self) {
        self.state.borrow_mut().fail_next_window = true;
    }

    /// Registers a fabricated monitor. The first one becomes primary.
    pub fn add_monitor(&self, name: &str, modes: &[VideoMode]) -> MonitorHandle {
        let mut state = self.state.borrow_mut();
        let index = state.monitors.len();
        let addr = 0xA000 + index * 0x100;
        let raw_modes: Box<[ffi::GLFWvidmode]> =
            modes.iter().map(|m| m.to_raw()).collect();
        let current = modes.first().map(|m| Box::new(m.to_raw()));
        state.monitors.push(MonitorRecord {
            addr,
            name: CString::new(name).expect("monitor name with interior NUL"),
            pos: (index as c_int * 1920, 0),
            physical_size: (510, 290),
            modes: raw_modes,
            current_mode: current,
            gamma_ramp: None,
            last_gamma: None,
        });
        MonitorHandle::from_raw(addr as *mut ffi::GLFWmonitor)
    }

    pub fn queue_error(&self, code: ErrorCode, description: &str) {
        self.state.borrow_mut().queue.push_back(Pending::Error {
            code: code.to_native(),
            description: CString::new(description).expect("description with interior NUL"),
        });
    }

    /// Queues an error event with a raw native code, bypassing the typed
    /// table. Lets tests cover codes this binding does not know.
    pub fn queue_raw_error(&self, code: c_int, description: &str) {
        self.state.borrow_mut().queue.push_back(Pending::Error {
            code,
            description: CString::new(description).expect("description with interior NUL"),
        });
    }

    pub fn queue_monitor_event(&self, monitor: MonitorHandle, event: MonitorEvent) {
        self.state.borrow_mut().queue.push_back(Pending::Monitor {
            monitor: monitor.as_raw(),
            event: event.to_native(),
        });
    }

    pub fn queue_window_pos(&self, window: WindowHandle, x: i32, y: i32) {
        self.state.borrow_mut().queue.push_back(Pending::WindowPos {
            window: window.as_raw(),
            x,
            y,
        });
    }

    pub fn queue_window_size(&self, window: WindowHandle, width: i32, height: i32) {
        self.state.borrow_mut().queue.push_back(Pending::WindowSize {
            window: window.as_raw(),
            width,
            height,
        });
    }

    pub fn queue_window_close(&self, window: WindowHandle) {
        self.state
            .borrow_mut()
            .queue
            .push_back(Pending::WindowClose {
                window: window.as_raw(),
            });
    }

    pub fn queue_key(&self, window: WindowHandle, key: i32, scancode: i32, action: i32, mods: i32) {
        self.state.borrow_mut().queue.push_back(Pending::Key {
            window: window.as_raw(),
            key,
            scancode,
            action,
            mods,
        });
    }

    /// Names of every entry point hit so far, in call order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.state.borrow().calls.clone()
    }

    /// Every `(target, value)` pair forwarded through the hint entry point,
    /// cumulative across window creations.
    pub fn hint_log(&self) -> Vec<(i32, i32)> {
        self.state.borrow().hint_log.clone()
    }

    pub fn window_title(&self, window: WindowHandle) -> Option<String> {
        let state = self.state.borrow();
        state
            .windows
            .iter()
            .find(|w| w.addr == window.as_raw() as usize)
            .map(|w| w.title.clone())
    }

    pub fn is_destroyed(&self, window: WindowHandle) -> bool {
        let state = self.state.borrow();
        state
            .windows
            .iter()
            .find(|w| w.addr == window.as_raw() as usize)
            .is_some_and(|w| w.destroyed)
    }

    pub fn last_gamma(&self, monitor: MonitorHandle) -> Option<f32> {
        let state = self.state.borrow();
        state
            .monitors
            .iter()
            .find(|m| m.addr == monitor.as_raw() as usize)
            .and_then(|m| m.last_gamma)
    }

    pub fn is_initialized(&self) -> bool {
        self.state.borrow().initialized
    }

    pub fn was_terminated(&self) -> bool {
        self.state.borrow().terminated
    }

    /// A flag that flips when `terminate` runs; clone it out before handing
    /// this provider to a session.
    pub fn termination_flag(&self) -> Arc<AtomicBool> {
        self.terminated.clone()
    }

    fn record(&self, name: &'static str) {
        self.state.borrow_mut().calls.push(name);
    }

    fn hint_value(hints: &[(c_int, c_int)], target: c_int, default: c_int) -> c_int {
        hints
            .iter()
            .rev()
            .find(|(t, _)| *t == target)
            .map_or(default, |(_, v)| *v)
    }

    fn with_window<R>(
        &self,
        window: *mut ffi::GLFWwindow,
        access: impl FnOnce(&mut WindowRecord) -> R,
    ) -> Option<R> {
        let mut state = self.state.borrow_mut();
        let addr = window as usize;
        state
            .windows
            .iter_mut()
            .find(|w| w.addr == addr && !w.destroyed)
            .map(access)
    }

    fn with_monitor<R>(
        &self,
        monitor: *mut ffi::GLFWmonitor,
        access: impl FnOnce(&mut MonitorRecord) -> R,
    ) -> Option<R> {
        let mut state = self.state.borrow_mut();
        let addr = monitor as usize;
        state
            .monitors
            .iter_mut()
            .find(|m| m.addr == addr)
            .map(access)
    }
}

impl NativeApi for RecordingApi {
    fn init(&self) -> bool {
        self.record("init");
        let mut state = self.state.borrow_mut();
        state.initialized = state.init_result;
        state.init_result
    }

    fn terminate(&self) {
        self.record("terminate");
        let mut state = self.state.borrow_mut();
        state.initialized = false;
        state.terminated = true;
        self.terminated.store(true, Ordering::SeqCst);
    }

    fn version(&self) -> (c_int, c_int, c_int) {
        self.record("version");
        self.state.borrow().version
    }

    fn version_string(&self) -> *const c_char {
        self.record("version_string");
        let state = self.state.borrow();
        state
            .version_string
            .as_ref()
            .map_or(std::ptr::null(), |s| s.as_ptr())
    }

    unsafe fn monitors(&self, count: &mut c_int) -> *const *mut ffi::GLFWmonitor {
        self.record("monitors");
        let mut state = self.state.borrow_mut();
        let array: Box<[*mut ffi::GLFWmonitor]> = state
            .monitors
            .iter()
            .map(|m| m.addr as *mut ffi::GLFWmonitor)
            .collect();
        *count = array.len() as c_int;
        state.monitor_array = array;
        if state.monitor_array.is_empty() {
            std::ptr::null()
        } else {
            state.monitor_array.as_ptr()
        }
    }

    fn primary_monitor(&self) -> *mut ffi::GLFWmonitor {
        self.record("primary_monitor");
        let state = self.state.borrow();
        state
            .monitors
            .first()
            .map_or(std::ptr::null_mut(), |m| m.addr as *mut ffi::GLFWmonitor)
    }

    unsafe fn monitor_pos(&self, monitor: *mut ffi::GLFWmonitor) -> (c_int, c_int) {
        self.record("monitor_pos");
        self.with_monitor(monitor, |m| m.pos).unwrap_or((0, 0))
    }

    unsafe fn monitor_physical_size(&self, monitor: *mut ffi::GLFWmonitor) -> (c_int, c_int) {
        self.record("monitor_physical_size");
        self.with_monitor(monitor, |m| m.physical_size)
            .unwrap_or((0, 0))
    }

    unsafe fn monitor_name(&self, monitor: *mut ffi::GLFWmonitor) -> *const c_char {
        self.record("monitor_name");
        let state = self.state.borrow();
        let addr = monitor as usize;
        state
            .monitors
            .iter()
            .find(|m| m.addr == addr)
            .map_or(std::ptr::null(), |m| m.name.as_ptr())
    }

    unsafe fn video_modes(
        &self,
        monitor: *mut ffi::GLFWmonitor,
        count: &mut c_int,
    ) -> *const ffi::GLFWvidmode {
        self.record("video_modes");
        let state = self.state.borrow();
        let addr = monitor as usize;
        match state.monitors.iter().find(|m| m.addr == addr) {
            Some(m) if !m.modes.is_empty() => {
                *count = m.modes.len() as c_int;
                m.modes.as_ptr()
            }
            _ => {
                *count = 0;
                std::ptr::null()
            }
        }
    }

    unsafe fn video_mode(&self, monitor: *mut ffi::GLFWmonitor) -> *const ffi::GLFWvidmode {
        self.record("video_mode");
        let state = self.state.borrow();
        let addr = monitor as usize;
        state
            .monitors
            .iter()
            .find(|m| m.addr == addr)
            .and_then(|m| m.current_mode.as_deref())
            .map_or(std::ptr::null(), |mode| mode as *const _)
    }

    unsafe fn set_gamma(&self, monitor: *mut ffi::GLFWmonitor, gamma: f32) {
        self.record("set_gamma");
        self.with_monitor(monitor, |m| m.last_gamma = Some(gamma));
    }

    unsafe fn gamma_ramp(&self, monitor: *mut ffi::GLFWmonitor) -> *const ffi::GLFWgammaramp {
        self.record("gamma_ramp");
        let mut state = self.state.borrow_mut();
        let addr = monitor as usize;
        let Some(record) = state.monitors.iter().find(|m| m.addr == addr) else {
            return std::ptr::null();
        };
        let Some((red, green, blue)) = record.gamma_ramp.as_ref() else {
            return std::ptr::null();
        };
        let descriptor = Box::new(ffi::GLFWgammaramp {
            red: red.as_ptr() as *mut u16,
            green: green.as_ptr() as *mut u16,
            blue: blue.as_ptr() as *mut u16,
            size: red.len() as u32,
        });
        let pointer: *const ffi::GLFWgammaramp = &*descriptor;
        state._ramp_keepalive = Some(descriptor);
        pointer
    }

    unsafe fn set_gamma_ramp(
        &self,
        monitor: *mut ffi::GLFWmonitor,
        ramp: *const ffi::GLFWgammaramp,
    ) {
        self.record("set_gamma_ramp");
        if ramp.is_null() {
            return;
        }
        let descriptor = &*ramp;
        let size = descriptor.size as usize;
        let channels = (
            std::slice::from_raw_parts(descriptor.red, size).to_vec(),
            std::slice::from_raw_parts(descriptor.green, size).to_vec(),
            std::slice::from_raw_parts(descriptor.blue, size).to_vec(),
        );
        self.with_monitor(monitor, |m| m.gamma_ramp = Some(channels));
    }

    fn default_window_hints(&self) {
        self.record("default_window_hints");
        self.state.borrow_mut().pending_hints.clear();
    }

    fn window_hint(&self, target: c_int, value: c_int) {
        self.record("window_hint");
        let mut state = self.state.borrow_mut();
        state.pending_hints.push((target, value));
        state.hint_log.push((target, value));
    }

    unsafe fn create_window(
        &self,
        width: c_int,
        height: c_int,
        title: *const c_char,
        monitor: *mut ffi::GLFWmonitor,
        _share: *mut ffi::GLFWwindow,
    ) -> *mut ffi::GLFWwindow {
        self.record("create_window");
        let mut state = self.state.borrow_mut();
        if state.fail_next_window || title.is_null() {
            state.fail_next_window = false;
            return std::ptr::null_mut();
        }
        let title = CStr::from_ptr(title).to_string_lossy().into_owned();
        let addr = state.next_window_addr;
        state.next_window_addr += 0x10;
        let hints = std::mem::take(&mut state.pending_hints);
        state.windows.push(WindowRecord {
            addr,
            title,
            pos: (0, 0),
            size: (width, height),
            frame: (1, 24, 1, 1),
            monitor,
            user_pointer: std::ptr::null_mut(),
            should_close: false,
            visible: Self::hint_value(&hints, ffi::VISIBLE, ffi::TRUE) != 0,
            iconified: false,
            resizable: Self::hint_value(&hints, ffi::RESIZABLE, ffi::TRUE) != 0,
            decorated: Self::hint_value(&hints, ffi::DECORATED, ffi::TRUE) != 0,
            floating: Self::hint_value(&hints, ffi::FLOATING, ffi::FALSE) != 0,
            focused: Self::hint_value(&hints, ffi::FOCUSED, ffi::TRUE) != 0,
            destroyed: false,
            pos_callback: None,
            size_callback: None,
            close_callback: None,
            key_callback: None,
        });
        addr as *mut ffi::GLFWwindow
    }

    unsafe fn destroy_window(&self, window: *mut ffi::GLFWwindow) {
        self.record("destroy_window");
        self.with_window(window, |w| {
            w.destroyed = true;
            w.pos_callback = None;
            w.size_callback = None;
            w.close_callback = None;
            w.key_callback = None;
        });
    }

    unsafe fn window_should_close(&self, window: *mut ffi::GLFWwindow) -> c_int {
        self.record("window_should_close");
        self.with_window(window, |w| w.should_close as c_int)
            .unwrap_or(0)
    }

    unsafe fn set_window_should_close(&self, window: *mut ffi::GLFWwindow, value: c_int) {
        self.record("set_window_should_close");
        self.with_window(window, |w| w.should_close = value != 0);
    }

    unsafe fn set_window_title(&self, window: *mut ffi::GLFWwindow, title: *const c_char) {
        self.record("set_window_title");
        if title.is_null() {
            return;
        }
        let title = CStr::from_ptr(title).to_string_lossy().into_owned();
        self.with_window(window, |w| w.title = title);
    }

    unsafe fn window_pos(&self, window: *mut ffi::GLFWwindow) -> (c_int, c_int) {
        self.record("window_pos");
        self.with_window(window, |w| w.pos).unwrap_or((0, 0))
    }

    unsafe fn set_window_pos(&self, window: *mut ffi::GLFWwindow, x: c_int, y: c_int) {
        self.record("set_window_pos");
        self.with_window(window, |w| w.pos = (x, y));
    }

    unsafe fn window_size(&self, window: *mut ffi::GLFWwindow) -> (c_int, c_int) {
        self.record("window_size");
        self.with_window(window, |w| w.size).unwrap_or((0, 0))
    }

    unsafe fn set_window_size(&self, window: *mut ffi::GLFWwindow, width: c_int, height: c_int) {
        self.record("set_window_size");
        self.with_window(window, |w| w.size = (width, height));
    }

    unsafe fn framebuffer_size(&self, window: *mut ffi::GLFWwindow) -> (c_int, c_int) {
        self.record("framebuffer_size");
        self.with_window(window, |w| w.size).unwrap_or((0, 0))
    }

    unsafe fn window_frame_size(
        &self,
        window: *mut ffi::GLFWwindow,
    ) -> (c_int, c_int, c_int, c_int) {
        self.record("window_frame_size");
        self.with_window(window, |w| w.frame).unwrap_or((0, 0, 0, 0))
    }

    unsafe fn iconify_window(&self, window: *mut ffi::GLFWwindow) {
        self.record("iconify_window");
        self.with_window(window, |w| w.iconified = true);
    }

    unsafe fn restore_window(&self, window: *mut ffi::GLFWwindow) {
        self.record("restore_window");
        self.with_window(window, |w| w.iconified = false);
    }

    unsafe fn show_window(&self, window: *mut ffi::GLFWwindow) {
        self.record("show_window");
        self.with_window(window, |w| w.visible = true);
    }

    unsafe fn hide_window(&self, window: *mut ffi::GLFWwindow) {
        self.record("hide_window");
        self.with_window(window, |w| w.visible = false);
    }

    unsafe fn window_monitor(&self, window: *mut ffi::GLFWwindow) -> *mut ffi::GLFWmonitor {
        self.record("window_monitor");
        self.with_window(window, |w| w.monitor)
            .unwrap_or(std::ptr::null_mut())
    }

    unsafe fn window_attrib(&self, window: *mut ffi::GLFWwindow, attrib: c_int) -> c_int {
        self.record("window_attrib");
        self.with_window(window, |w| {
            let value = match attrib {
                ffi::FOCUSED => w.focused,
                ffi::ICONIFIED => w.iconified,
                ffi::RESIZABLE => w.resizable,
                ffi::VISIBLE => w.visible,
                ffi::DECORATED => w.decorated,
                ffi::FLOATING => w.floating,
                _ => false,
            };
            value as c_int
        })
        .unwrap_or(0)
    }

    unsafe fn set_window_user_pointer(&self, window: *mut ffi::GLFWwindow, pointer: *mut c_void) {
        self.record("set_window_user_pointer");
        self.with_window(window, |w| w.user_pointer = pointer);
    }

    unsafe fn window_user_pointer(&self, window: *mut ffi::GLFWwindow) -> *mut c_void {
        self.record("window_user_pointer");
        self.with_window(window, |w| w.user_pointer)
            .unwrap_or(std::ptr::null_mut())
    }

    unsafe fn make_context_current(&self, window: *mut ffi::GLFWwindow) {
        self.record("make_context_current");
        let _ = window;
    }

    unsafe fn swap_buffers(&self, window: *mut ffi::GLFWwindow) {
        self.record("swap_buffers");
        let _ = window;
    }

    fn set_error_callback(&self, callback: ffi::GLFWerrorfun) {
        self.record("set_error_callback");
        self.state.borrow_mut().error_callback = callback;
    }

    fn set_monitor_callback(&self, callback: ffi::GLFWmonitorfun) {
        self.record("set_monitor_callback");
        self.state.borrow_mut().monitor_callback = callback;
    }

    unsafe fn set_window_pos_callback(
        &self,
        window: *mut ffi::GLFWwindow,
        callback: ffi::GLFWwindowposfun,
    ) {
        self.record("set_window_pos_callback");
        self.with_window(window, |w| w.pos_callback = callback);
    }

    unsafe fn set_window_size_callback(
        &self,
        window: *mut ffi::GLFWwindow,
        callback: ffi::GLFWwindowsizefun,
    ) {
        self.record("set_window_size_callback");
        self.with_window(window, |w| w.size_callback = callback);
    }

    unsafe fn set_window_close_callback(
        &self,
        window: *mut ffi::GLFWwindow,
        callback: ffi::GLFWwindowclosefun,
    ) {
        self.record("set_window_close_callback");
        self.with_window(window, |w| w.close_callback = callback);
    }

    unsafe fn set_key_callback(&self, window: *mut ffi::GLFWwindow, callback: ffi::GLFWkeyfun) {
        self.record("set_key_callback");
        self.with_window(window, |w| w.key_callback = callback);
    }

    /// Drains the queue, invoking installed callback pointers synchronously
    /// on this thread, exactly like the native poll. Each event is popped
    /// before its callback runs so callbacks may re-enter this provider.
    fn poll_events(&self) {
        self.record("poll_events");
        loop {
            let event = match self.state.borrow_mut().queue.pop_front() {
                Some(event) => event,
                None => break,
            };
            match event {
                Pending::Error { code, description } => {
                    let callback = self.state.borrow().error_callback;
                    if let Some(callback) = callback {
                        unsafe { callback(code, description.as_ptr()) };
                    }
                }
                Pending::Monitor { monitor, event } => {
                    let callback = self.state.borrow().monitor_callback;
                    if let Some(callback) = callback {
                        unsafe { callback(monitor, event) };
                    }
                }
                Pending::WindowPos { window, x, y } => {
                    let callback = self.with_window(window, |w| w.pos_callback).flatten();
                    if let Some(callback) = callback {
                        unsafe { callback(window, x, y) };
                    }
                }
                Pending::WindowSize {
                    window,
                    width,
                    height,
                } => {
                    let callback = self.with_window(window, |w| w.size_callback).flatten();
                    if let Some(callback) = callback {
                        unsafe { callback(window, width, height) };
                    }
                }
                Pending::WindowClose { window } => {
                    let callback = self.with_window(window, |w| w.close_callback).flatten();
                    if let Some(callback) = callback {
                        unsafe { callback(window) };
                    }
                }
                Pending::Key {
                    window,
                    key,
                    scancode,
                    action,
                    mods,
                } => {
                    let callback = self.with_window(window, |w| w.key_callback).flatten();
                    if let Some(callback) = callback {
                        unsafe { callback(window, key, scancode, action, mods) };
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::NativeApi;

    #[test]
    fn records_calls_in_order() {
        let api = RecordingApi::new();
        assert!(api.init());
        assert!(api.is_initialized());
        api.version();
        api.terminate();
        assert_eq!(api.calls(), vec!["init", "version", "terminate"]);
        assert!(!api.is_initialized());
        assert!(api.was_terminated());
    }

    #[test]
    fn scripted_init_failure() {
        let api = RecordingApi::new();
        api.fail_init();
        assert!(!api.init());
    }

    #[test]
    fn monitor_array_reflects_registered_monitors() {
        let api = RecordingApi::new();
        let first = api.add_monitor("First", &[]);
        let second = api.add_monitor("Second", &[]);

        let mut count = 0;
        let base = unsafe { api.monitors(&mut count) };
        assert_eq!(count, 2);
        let decoded = unsafe { crate::marshal::monitor_array(base, count) };
        assert_eq!(decoded, vec![first, second]);
        assert_eq!(api.primary_monitor(), first.as_raw());
    }

    #[test]
    fn empty_monitor_list_is_null_and_zero() {
        let api = RecordingApi::new();
        let mut count = -1;
        let base = unsafe { api.monitors(&mut count) };
        assert_eq!(count, 0);
        assert!(base.is_null());
        assert!(api.primary_monitor().is_null());
    }

    #[test]
    fn gamma_ramp_echoes_what_was_set() {
        let api = RecordingApi::new();
        let monitor = api.add_monitor("M", &[]);

        // Nothing set yet.
        assert!(unsafe { api.gamma_ramp(monitor.as_raw()) }.is_null());

        let ramp = crate::marshal::GammaRamp::linear();
        ramp.with_raw(|raw| unsafe { api.set_gamma_ramp(monitor.as_raw(), raw) });
        let echoed =
            unsafe { crate::marshal::GammaRamp::from_raw(api.gamma_ramp(monitor.as_raw())) };
        assert_eq!(echoed, Some(ramp));
    }

    #[test]
    fn default_window_hints_resets_pending_state_only() {
        let api = RecordingApi::new();
        api.window_hint(ffi::RED_BITS, 10);
        api.default_window_hints();
        api.window_hint(ffi::VISIBLE, 0);
        assert_eq!(api.hint_log(), vec![(ffi::RED_BITS, 10), (ffi::VISIBLE, 0)]);
        assert!(api.state.borrow().pending_hints == vec![(ffi::VISIBLE, 0)]);
    }

    #[test]
    fn window_creation_consumes_pending_hints() {
        let api = RecordingApi::new();
        api.window_hint(ffi::VISIBLE, 0);
        let title = CString::new("w").unwrap();
        let window = unsafe {
            api.create_window(640, 480, title.as_ptr(), std::ptr::null_mut(), std::ptr::null_mut())
        };
        assert!(!window.is_null());
        assert_eq!(unsafe { api.window_attrib(window, ffi::VISIBLE) }, 0);

        // Hints were reset by creation; the next window is visible again.
        let window2 = unsafe {
            api.create_window(640, 480, title.as_ptr(), std::ptr::null_mut(), std::ptr::null_mut())
        };
        assert_eq!(unsafe { api.window_attrib(window2, ffi::VISIBLE) }, 1);
    }
}
