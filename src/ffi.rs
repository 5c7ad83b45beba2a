// src/ffi.rs

//! Raw ABI surface shared with the native GLFW 3.1 library.
//!
//! Everything in this module must match the native library's compiled
//! headers byte-for-byte: the integer constants, the struct layouts and the
//! callback calling convention. A mismatch here is not detectable at
//! runtime; it silently misconfigures the native side.
//!
//! No `extern` block lives here. The library is resolved at runtime into a
//! table of function pointers (see `linked.rs`), so this module only
//! declares the shapes those pointers share.

#![allow(non_camel_case_types)]
#![allow(non_snake_case)] // native field and symbol spellings

use libc::{c_char, c_int, c_uint, c_ushort};

// --- Opaque native objects ---
//
// The native library owns these; the binding only ever holds addresses.

#[repr(C)]
pub struct GLFWmonitor {
    _private: [u8; 0],
}

#[repr(C)]
pub struct GLFWwindow {
    _private: [u8; 0],
}

// --- Fixed-layout value structs ---

/// `GLFWvidmode`: six consecutive `int`s.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GLFWvidmode {
    pub width: c_int,
    pub height: c_int,
    pub redBits: c_int,
    pub greenBits: c_int,
    pub blueBits: c_int,
    pub refreshRate: c_int,
}

/// `GLFWgammaramp`: three channel pointers plus a shared sample count.
///
/// The pointed-to buffers are only guaranteed valid for the duration of the
/// call that produced or consumed them.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct GLFWgammaramp {
    pub red: *mut c_ushort,
    pub green: *mut c_ushort,
    pub blue: *mut c_ushort,
    pub size: c_uint,
}

// --- Callback entry-point shapes (cdecl on every supported platform) ---

pub type GLFWerrorfun = Option<unsafe extern "C" fn(c_int, *const c_char)>;
pub type GLFWmonitorfun = Option<unsafe extern "C" fn(*mut GLFWmonitor, c_int)>;
pub type GLFWwindowposfun = Option<unsafe extern "C" fn(*mut GLFWwindow, c_int, c_int)>;
pub type GLFWwindowsizefun = Option<unsafe extern "C" fn(*mut GLFWwindow, c_int, c_int)>;
pub type GLFWwindowclosefun = Option<unsafe extern "C" fn(*mut GLFWwindow)>;
pub type GLFWkeyfun = Option<unsafe extern "C" fn(*mut GLFWwindow, c_int, c_int, c_int, c_int)>;

// --- Boolean values ---

pub const TRUE: c_int = 1;
pub const FALSE: c_int = 0;

/// "Use whatever the platform picks" sentinel for integer hints.
pub const DONT_CARE: c_int = -1;

// --- Error codes (delivered through the error callback) ---

pub const NOT_INITIALIZED: c_int = 0x0001_0001;
pub const NO_CURRENT_CONTEXT: c_int = 0x0001_0002;
pub const INVALID_ENUM: c_int = 0x0001_0003;
pub const INVALID_VALUE: c_int = 0x0001_0004;
pub const OUT_OF_MEMORY: c_int = 0x0001_0005;
pub const API_UNAVAILABLE: c_int = 0x0001_0006;
pub const VERSION_UNAVAILABLE: c_int = 0x0001_0007;
pub const PLATFORM_ERROR: c_int = 0x0001_0008;
pub const FORMAT_UNAVAILABLE: c_int = 0x0001_0009;

// --- Window attributes / boolean window hints ---

pub const FOCUSED: c_int = 0x0002_0001;
pub const ICONIFIED: c_int = 0x0002_0002;
pub const RESIZABLE: c_int = 0x0002_0003;
pub const VISIBLE: c_int = 0x0002_0004;
pub const DECORATED: c_int = 0x0002_0005;
pub const AUTO_ICONIFY: c_int = 0x0002_0006;
pub const FLOATING: c_int = 0x0002_0007;

// --- Framebuffer and refresh hints ---

pub const RED_BITS: c_int = 0x0002_1001;
pub const GREEN_BITS: c_int = 0x0002_1002;
pub const BLUE_BITS: c_int = 0x0002_1003;
pub const ALPHA_BITS: c_int = 0x0002_1004;
pub const DEPTH_BITS: c_int = 0x0002_1005;
pub const STENCIL_BITS: c_int = 0x0002_1006;
pub const ACCUM_RED_BITS: c_int = 0x0002_1007;
pub const ACCUM_GREEN_BITS: c_int = 0x0002_1008;
pub const ACCUM_BLUE_BITS: c_int = 0x0002_1009;
pub const ACCUM_ALPHA_BITS: c_int = 0x0002_100A;
pub const AUX_BUFFERS: c_int = 0x0002_100B;
pub const STEREO: c_int = 0x0002_100C;
pub const SAMPLES: c_int = 0x0002_100D;
pub const SRGB_CAPABLE: c_int = 0x0002_100E;
pub const REFRESH_RATE: c_int = 0x0002_100F;
pub const DOUBLEBUFFER: c_int = 0x0002_1010;

// --- Context hints ---

pub const CLIENT_API: c_int = 0x0002_2001;
pub const CONTEXT_VERSION_MAJOR: c_int = 0x0002_2002;
pub const CONTEXT_VERSION_MINOR: c_int = 0x0002_2003;
pub const CONTEXT_REVISION: c_int = 0x0002_2004;
pub const CONTEXT_ROBUSTNESS: c_int = 0x0002_2005;
pub const OPENGL_FORWARD_COMPAT: c_int = 0x0002_2006;
pub const OPENGL_DEBUG_CONTEXT: c_int = 0x0002_2007;
pub const OPENGL_PROFILE: c_int = 0x0002_2008;
pub const CONTEXT_RELEASE_BEHAVIOR: c_int = 0x0002_2009;

// --- Context hint values ---

pub const NO_API: c_int = 0;
pub const OPENGL_API: c_int = 0x0003_0001;
pub const OPENGL_ES_API: c_int = 0x0003_0002;

pub const NO_ROBUSTNESS: c_int = 0;
pub const NO_RESET_NOTIFICATION: c_int = 0x0003_1001;
pub const LOSE_CONTEXT_ON_RESET: c_int = 0x0003_1002;

pub const OPENGL_ANY_PROFILE: c_int = 0;
pub const OPENGL_CORE_PROFILE: c_int = 0x0003_2001;
pub const OPENGL_COMPAT_PROFILE: c_int = 0x0003_2002;

pub const ANY_RELEASE_BEHAVIOR: c_int = 0;
pub const RELEASE_BEHAVIOR_FLUSH: c_int = 0x0003_5001;
pub const RELEASE_BEHAVIOR_NONE: c_int = 0x0003_5002;

// --- Monitor connection events ---

pub const CONNECTED: c_int = 0x0004_0001;
pub const DISCONNECTED: c_int = 0x0004_0002;

// --- Key actions ---

pub const RELEASE: c_int = 0;
pub const PRESS: c_int = 1;
pub const REPEAT: c_int = 2;

// --- Key modifier bits ---

pub const MOD_SHIFT: c_int = 0x0001;
pub const MOD_CONTROL: c_int = 0x0002;
pub const MOD_ALT: c_int = 0x0004;
pub const MOD_SUPER: c_int = 0x0008;
