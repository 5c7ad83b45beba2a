// src/callbacks.rs

//! Callback slots and the native-callable trampolines that feed them.
//!
//! The native library invokes plain C function pointers with no user-data
//! argument, so the bridge from "C entry point" to "host closure" goes
//! through one process-wide slot per event kind. The trampolines installed
//! on the native side are `extern "C" fn` items and therefore live for the
//! whole process; the thing whose lifetime needs managing is the boxed host
//! closure, and that is owned by its slot until replaced or cleared.
//!
//! [`CallbackRegistry`] is the owning façade over the slots: one lives in
//! each session, its methods are the only writers, and dropping it clears
//! the slots it installed so no closure outlives the session that
//! registered it.
//!
//! Dispatch is synchronous and re-entrant-safe: the closure is lifted out of
//! its slot before invocation (no lock is held while host code runs), and a
//! generation counter decides afterwards whether to put it back or drop it
//! because the callback re-registered or cleared its own kind mid-flight.
//! Last registration always wins, including during dispatch.

use crate::enums::{ErrorCode, MonitorEvent};
use crate::ffi;
use crate::handle::{MonitorHandle, WindowHandle};
use crate::keys::{Key, KeyAction, Modifiers};
use libc::{c_char, c_int};
use log::{error, warn};
use once_cell::sync::Lazy;
use std::ffi::CStr;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Mutex, MutexGuard, PoisonError};

pub type ErrorFn = dyn FnMut(ErrorCode, &str) + Send;
pub type MonitorFn = dyn FnMut(MonitorHandle, MonitorEvent) + Send;
pub type WindowPosFn = dyn FnMut(WindowHandle, i32, i32) + Send;
pub type WindowSizeFn = dyn FnMut(WindowHandle, i32, i32) + Send;
pub type WindowCloseFn = dyn FnMut(WindowHandle) + Send;
pub type KeyFn = dyn FnMut(WindowHandle, Key, i32, KeyAction, Modifiers) + Send;

struct Slot<F: ?Sized> {
    closure: Option<Box<F>>,
    /// Bumped on every install; lets dispatch detect replacement that
    /// happened while the closure was lifted out for invocation.
    generation: u64,
}

impl<F: ?Sized> Slot<F> {
    const fn empty() -> Self {
        Slot {
            closure: None,
            generation: 0,
        }
    }
}

static ERROR_SLOT: Lazy<Mutex<Slot<ErrorFn>>> = Lazy::new(|| Mutex::new(Slot::empty()));
static MONITOR_SLOT: Lazy<Mutex<Slot<MonitorFn>>> = Lazy::new(|| Mutex::new(Slot::empty()));
static WINDOW_POS_SLOT: Lazy<Mutex<Slot<WindowPosFn>>> = Lazy::new(|| Mutex::new(Slot::empty()));
static WINDOW_SIZE_SLOT: Lazy<Mutex<Slot<WindowSizeFn>>> = Lazy::new(|| Mutex::new(Slot::empty()));
static WINDOW_CLOSE_SLOT: Lazy<Mutex<Slot<WindowCloseFn>>> =
    Lazy::new(|| Mutex::new(Slot::empty()));
static KEY_SLOT: Lazy<Mutex<Slot<KeyFn>>> = Lazy::new(|| Mutex::new(Slot::empty()));

fn lock<F: ?Sized>(slot: &Mutex<Slot<F>>) -> MutexGuard<'_, Slot<F>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

fn install<F: ?Sized>(slot: &Mutex<Slot<F>>, closure: Option<Box<F>>) {
    let mut guard = lock(slot);
    guard.generation = guard.generation.wrapping_add(1);
    guard.closure = closure;
}

/// Runs the slot's closure, if any, without holding the lock across the
/// invocation. Afterwards the closure is restored only if the slot was not
/// written to in the meantime; a replacement made from inside the callback
/// takes effect immediately and the old closure is dropped here.
fn dispatch<F: ?Sized>(slot: &Mutex<Slot<F>>, invoke: impl FnOnce(&mut F)) {
    let (taken, generation) = {
        let mut guard = lock(slot);
        (guard.closure.take(), guard.generation)
    };
    let Some(mut closure) = taken else { return };

    // Panics must not cross the C boundary.
    if panic::catch_unwind(AssertUnwindSafe(|| invoke(&mut *closure))).is_err() {
        error!("event callback panicked; continuing");
    }

    let mut guard = lock(slot);
    if guard.generation == generation && guard.closure.is_none() {
        guard.closure = Some(closure);
    }
}

// --- Native-callable trampolines ---
//
// Each one translates raw C arguments into typed values before touching the
// host closure. They run synchronously on whatever thread is inside the
// native poll call.

pub(crate) unsafe extern "C" fn error_trampoline(code: c_int, description: *const c_char) {
    let Some(code) = ErrorCode::from_native(code) else {
        warn!("dropping error event with unknown native code {code:#x}");
        return;
    };
    let description = if description.is_null() {
        String::new()
    } else {
        CStr::from_ptr(description).to_string_lossy().into_owned()
    };
    dispatch(&ERROR_SLOT, |callback| callback(code, &description));
}

pub(crate) unsafe extern "C" fn monitor_trampoline(monitor: *mut ffi::GLFWmonitor, event: c_int) {
    let Some(event) = MonitorEvent::from_native(event) else {
        warn!("dropping monitor event with unknown native code {event:#x}");
        return;
    };
    let monitor = MonitorHandle::from_raw(monitor);
    dispatch(&MONITOR_SLOT, |callback| callback(monitor, event));
}

pub(crate) unsafe extern "C" fn window_pos_trampoline(
    window: *mut ffi::GLFWwindow,
    x: c_int,
    y: c_int,
) {
    let window = WindowHandle::from_raw(window);
    dispatch(&WINDOW_POS_SLOT, |callback| callback(window, x, y));
}

pub(crate) unsafe extern "C" fn window_size_trampoline(
    window: *mut ffi::GLFWwindow,
    width: c_int,
    height: c_int,
) {
    let window = WindowHandle::from_raw(window);
    dispatch(&WINDOW_SIZE_SLOT, |callback| callback(window, width, height));
}

pub(crate) unsafe extern "C" fn window_close_trampoline(window: *mut ffi::GLFWwindow) {
    let window = WindowHandle::from_raw(window);
    dispatch(&WINDOW_CLOSE_SLOT, |callback| callback(window));
}

pub(crate) unsafe extern "C" fn key_trampoline(
    window: *mut ffi::GLFWwindow,
    key: c_int,
    scancode: c_int,
    action: c_int,
    mods: c_int,
) {
    let Some(action) = KeyAction::from_native(action) else {
        warn!("dropping key event with unknown native action {action}");
        return;
    };
    let window = WindowHandle::from_raw(window);
    let key = Key::from_native(key);
    let modifiers = Modifiers::from_native(mods);
    dispatch(&KEY_SLOT, |callback| {
        callback(window, key, scancode, action, modifiers)
    });
}

/// Owning façade over the callback slots.
///
/// The slots themselves are process-wide (the C entry points need somewhere
/// fixed to look), but all writes go through the registry owned by the
/// session. The registry remembers which kinds it currently has installed
/// and clears exactly those when dropped, so no closure outlives the
/// session that registered it and slots it never touched stay untouched.
/// Sessions are expected to be singletons, matching the native library's
/// own process-global nature.
#[derive(Debug, Default)]
pub struct CallbackRegistry {
    error: bool,
    monitor: bool,
    window_pos: bool,
    window_size: bool,
    window_close: bool,
    key: bool,
}

impl CallbackRegistry {
    pub(crate) fn new() -> Self {
        CallbackRegistry::default()
    }

    pub(crate) fn install_error(&mut self, closure: Option<Box<ErrorFn>>) {
        self.error = closure.is_some();
        install(&ERROR_SLOT, closure);
    }

    pub(crate) fn install_monitor(&mut self, closure: Option<Box<MonitorFn>>) {
        self.monitor = closure.is_some();
        install(&MONITOR_SLOT, closure);
    }

    pub(crate) fn install_window_pos(&mut self, closure: Option<Box<WindowPosFn>>) {
        self.window_pos = closure.is_some();
        install(&WINDOW_POS_SLOT, closure);
    }

    pub(crate) fn install_window_size(&mut self, closure: Option<Box<WindowSizeFn>>) {
        self.window_size = closure.is_some();
        install(&WINDOW_SIZE_SLOT, closure);
    }

    pub(crate) fn install_window_close(&mut self, closure: Option<Box<WindowCloseFn>>) {
        self.window_close = closure.is_some();
        install(&WINDOW_CLOSE_SLOT, closure);
    }

    pub(crate) fn install_key(&mut self, closure: Option<Box<KeyFn>>) {
        self.key = closure.is_some();
        install(&KEY_SLOT, closure);
    }
}

impl Drop for CallbackRegistry {
    fn drop(&mut self) {
        if self.error {
            install(&ERROR_SLOT, None);
        }
        if self.monitor {
            install(&MONITOR_SLOT, None);
        }
        if self.window_pos {
            install(&WINDOW_POS_SLOT, None);
        }
        if self.window_size {
            install(&WINDOW_SIZE_SLOT, None);
        }
        if self.window_close {
            install(&WINDOW_CLOSE_SLOT, None);
        }
        if self.key {
            install(&KEY_SLOT, None);
        }
    }
}

#[cfg(test)]
pub(crate) fn serial_guard() -> MutexGuard<'static, ()> {
    // The slots are process-wide; tests that touch them must not overlap.
    static GUARD: Mutex<()> = Mutex::new(());
    GUARD.lock().unwrap_or_else(PoisonError::into_inner)
}
