// src/handle.rs

//! Typed wrappers around the opaque addresses the native library hands out.
//!
//! A handle carries nothing but the address. Equality and hashing are
//! address identity, never structural content, and the null address is the
//! distinguished "none" value. Monitor and window handles wrap the same
//! primitive representation but are deliberately distinct types; mixing them
//! up is a compile error instead of a native-side crash.
//!
//! The native library owns the referenced objects. A handle whose object has
//! been destroyed is indistinguishable from a live one here; not reusing it
//! is the caller's side of the contract.

use crate::ffi;
use std::fmt;
use std::ptr;

/// Opaque reference to a connected monitor.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonitorHandle(*mut ffi::GLFWmonitor);

impl MonitorHandle {
    /// The "no monitor" sentinel.
    pub const NONE: MonitorHandle = MonitorHandle(ptr::null_mut());

    pub fn from_raw(raw: *mut ffi::GLFWmonitor) -> Self {
        MonitorHandle(raw)
    }

    pub fn as_raw(self) -> *mut ffi::GLFWmonitor {
        self.0
    }

    /// True iff this is the null sentinel.
    pub fn is_none(self) -> bool {
        self.0.is_null()
    }
}

impl fmt::Debug for MonitorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MonitorHandle({:p})", self.0)
    }
}

// A handle is an inert address, not an owning pointer: it dereferences nothing
// and frees nothing. Moving one between threads is sound, which the
// `Send`-bounded callback API relies on.
unsafe impl Send for MonitorHandle {}

/// Opaque reference to a window and its context.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(*mut ffi::GLFWwindow);

impl WindowHandle {
    /// The "no window" sentinel.
    pub const NONE: WindowHandle = WindowHandle(ptr::null_mut());

    pub fn from_raw(raw: *mut ffi::GLFWwindow) -> Self {
        WindowHandle(raw)
    }

    pub fn as_raw(self) -> *mut ffi::GLFWwindow {
        self.0
    }

    /// True iff this is the null sentinel.
    pub fn is_none(self) -> bool {
        self.0.is_null()
    }
}

impl fmt::Debug for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WindowHandle({:p})", self.0)
    }
}

// See the note on `MonitorHandle`: a window handle is an inert address, safe to
// move across threads, as the `Send`-bounded callback API requires.
unsafe impl Send for WindowHandle {}

#[cfg(test)]
mod tests {
    use super::*;

    fn monitor(addr: usize) -> MonitorHandle {
        MonitorHandle::from_raw(addr as *mut ffi::GLFWmonitor)
    }

    fn window(addr: usize) -> WindowHandle {
        WindowHandle::from_raw(addr as *mut ffi::GLFWwindow)
    }

    #[test]
    fn equality_is_address_identity() {
        assert_eq!(monitor(0x1000), monitor(0x1000));
        assert_ne!(monitor(0x1000), monitor(0x2000));
        assert_eq!(window(0xdead), window(0xdead));
        assert_ne!(window(0xdead), window(0xbeef));
    }

    #[test]
    fn null_address_is_none() {
        assert!(MonitorHandle::NONE.is_none());
        assert!(WindowHandle::NONE.is_none());
        assert!(monitor(0).is_none());
        assert!(window(0).is_none());
        assert!(!monitor(0x10).is_none());
        assert!(!window(0x10).is_none());
    }

    #[test]
    fn hashing_follows_address() {
        use std::collections::HashSet;

        let mut seen = HashSet::new();
        seen.insert(monitor(0x1000));
        seen.insert(monitor(0x1000));
        seen.insert(monitor(0x2000));
        assert_eq!(seen.len(), 2);
        assert!(seen.contains(&monitor(0x1000)));
    }

    #[test]
    fn round_trips_through_raw() {
        let raw = 0x4242 as *mut ffi::GLFWwindow;
        assert_eq!(WindowHandle::from_raw(raw).as_raw(), raw);
    }
}
