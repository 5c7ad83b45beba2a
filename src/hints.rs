// src/hints.rs

//! Typed window hints and the normalization applied before forwarding.
//!
//! Hints accumulate in native pending state and are consumed by the next
//! window creation, which also resets them to defaults. The binding does not
//! track that reset; it only validates and normalizes each value on its way
//! across the boundary.
//!
//! Normalization policy for integer hints: the context-version hints have no
//! "don't care" value on the native side (their documented defaults are
//! major 1, minor 0), so negative inputs for those two normalize to 1 and 0
//! respectively. Every other integer hint clamps negative inputs to the
//! native `DONT_CARE` sentinel (-1). Boolean hints map to 1/0. Anything else
//! is forwarded unchanged; the native library is the validator of domain
//! correctness and reports violations through the error callback.

use crate::enums::{ClientApi, ContextReleaseBehavior, ContextRobustness, OpenGlProfile};
use crate::ffi;
use libc::c_int;

/// One pending-hint assignment, consumed by the next window creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowHint {
    // Window behavior
    Focused(bool),
    Resizable(bool),
    Visible(bool),
    Decorated(bool),
    AutoIconify(bool),
    Floating(bool),

    // Framebuffer
    RedBits(i32),
    GreenBits(i32),
    BlueBits(i32),
    AlphaBits(i32),
    DepthBits(i32),
    StencilBits(i32),
    AccumRedBits(i32),
    AccumGreenBits(i32),
    AccumBlueBits(i32),
    AccumAlphaBits(i32),
    AuxBuffers(i32),
    Stereo(bool),
    Samples(i32),
    SrgbCapable(bool),
    DoubleBuffer(bool),

    // Monitor
    RefreshRate(i32),

    // Context
    ClientApi(ClientApi),
    ContextVersionMajor(i32),
    ContextVersionMinor(i32),
    ContextRobustness(ContextRobustness),
    OpenGlForwardCompat(bool),
    OpenGlDebugContext(bool),
    OpenGlProfile(OpenGlProfile),
    ContextReleaseBehavior(ContextReleaseBehavior),
}

impl WindowHint {
    /// Encodes the hint into the `(target, value)` pair the native call
    /// expects, applying the normalization policy documented on this module.
    pub fn encode(self) -> (c_int, c_int) {
        match self {
            WindowHint::Focused(v) => (ffi::FOCUSED, bool_value(v)),
            WindowHint::Resizable(v) => (ffi::RESIZABLE, bool_value(v)),
            WindowHint::Visible(v) => (ffi::VISIBLE, bool_value(v)),
            WindowHint::Decorated(v) => (ffi::DECORATED, bool_value(v)),
            WindowHint::AutoIconify(v) => (ffi::AUTO_ICONIFY, bool_value(v)),
            WindowHint::Floating(v) => (ffi::FLOATING, bool_value(v)),

            WindowHint::RedBits(v) => (ffi::RED_BITS, clamp_dont_care(v)),
            WindowHint::GreenBits(v) => (ffi::GREEN_BITS, clamp_dont_care(v)),
            WindowHint::BlueBits(v) => (ffi::BLUE_BITS, clamp_dont_care(v)),
            WindowHint::AlphaBits(v) => (ffi::ALPHA_BITS, clamp_dont_care(v)),
            WindowHint::DepthBits(v) => (ffi::DEPTH_BITS, clamp_dont_care(v)),
            WindowHint::StencilBits(v) => (ffi::STENCIL_BITS, clamp_dont_care(v)),
            WindowHint::AccumRedBits(v) => (ffi::ACCUM_RED_BITS, clamp_dont_care(v)),
            WindowHint::AccumGreenBits(v) => (ffi::ACCUM_GREEN_BITS, clamp_dont_care(v)),
            WindowHint::AccumBlueBits(v) => (ffi::ACCUM_BLUE_BITS, clamp_dont_care(v)),
            WindowHint::AccumAlphaBits(v) => (ffi::ACCUM_ALPHA_BITS, clamp_dont_care(v)),
            WindowHint::AuxBuffers(v) => (ffi::AUX_BUFFERS, clamp_dont_care(v)),
            WindowHint::Stereo(v) => (ffi::STEREO, bool_value(v)),
            WindowHint::Samples(v) => (ffi::SAMPLES, clamp_dont_care(v)),
            WindowHint::SrgbCapable(v) => (ffi::SRGB_CAPABLE, bool_value(v)),
            WindowHint::DoubleBuffer(v) => (ffi::DOUBLEBUFFER, bool_value(v)),

            WindowHint::RefreshRate(v) => (ffi::REFRESH_RATE, clamp_dont_care(v)),

            WindowHint::ClientApi(v) => (ffi::CLIENT_API, v.to_native()),
            WindowHint::ContextVersionMajor(v) => {
                // No DONT_CARE for version hints; 1 is the native default.
                (ffi::CONTEXT_VERSION_MAJOR, if v < 0 { 1 } else { v })
            }
            WindowHint::ContextVersionMinor(v) => {
                (ffi::CONTEXT_VERSION_MINOR, if v < 0 { 0 } else { v })
            }
            WindowHint::ContextRobustness(v) => (ffi::CONTEXT_ROBUSTNESS, v.to_native()),
            WindowHint::OpenGlForwardCompat(v) => (ffi::OPENGL_FORWARD_COMPAT, bool_value(v)),
            WindowHint::OpenGlDebugContext(v) => (ffi::OPENGL_DEBUG_CONTEXT, bool_value(v)),
            WindowHint::OpenGlProfile(v) => (ffi::OPENGL_PROFILE, v.to_native()),
            WindowHint::ContextReleaseBehavior(v) => {
                (ffi::CONTEXT_RELEASE_BEHAVIOR, v.to_native())
            }
        }
    }
}

fn bool_value(v: bool) -> c_int {
    if v {
        ffi::TRUE
    } else {
        ffi::FALSE
    }
}

fn clamp_dont_care(v: i32) -> c_int {
    if v < 0 {
        ffi::DONT_CARE
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booleans_map_to_native_true_false() {
        assert_eq!(WindowHint::Resizable(true).encode(), (ffi::RESIZABLE, 1));
        assert_eq!(WindowHint::Resizable(false).encode(), (ffi::RESIZABLE, 0));
        assert_eq!(WindowHint::Stereo(true).encode(), (ffi::STEREO, 1));
    }

    #[test]
    fn negative_integers_clamp_to_dont_care() {
        assert_eq!(WindowHint::RedBits(-1).encode(), (ffi::RED_BITS, -1));
        assert_eq!(WindowHint::RedBits(-37).encode(), (ffi::RED_BITS, -1));
        assert_eq!(WindowHint::Samples(-2).encode(), (ffi::SAMPLES, -1));
        assert_eq!(
            WindowHint::RefreshRate(-100).encode(),
            (ffi::REFRESH_RATE, -1)
        );
    }

    #[test]
    fn nonnegative_integers_forward_unchanged() {
        assert_eq!(WindowHint::DepthBits(0).encode(), (ffi::DEPTH_BITS, 0));
        assert_eq!(WindowHint::DepthBits(24).encode(), (ffi::DEPTH_BITS, 24));
        // Out-of-domain positives are the native library's problem.
        assert_eq!(
            WindowHint::Samples(9999).encode(),
            (ffi::SAMPLES, 9999)
        );
    }

    #[test]
    fn context_version_hints_default_instead_of_dont_care() {
        assert_eq!(
            WindowHint::ContextVersionMajor(-1).encode(),
            (ffi::CONTEXT_VERSION_MAJOR, 1)
        );
        assert_eq!(
            WindowHint::ContextVersionMinor(-1).encode(),
            (ffi::CONTEXT_VERSION_MINOR, 0)
        );
        assert_eq!(
            WindowHint::ContextVersionMajor(4).encode(),
            (ffi::CONTEXT_VERSION_MAJOR, 4)
        );
        assert_eq!(
            WindowHint::ContextVersionMinor(5).encode(),
            (ffi::CONTEXT_VERSION_MINOR, 5)
        );
    }

    #[test]
    fn enum_hints_encode_through_their_tables() {
        assert_eq!(
            WindowHint::ClientApi(ClientApi::OpenGlEs).encode(),
            (ffi::CLIENT_API, ffi::OPENGL_ES_API)
        );
        assert_eq!(
            WindowHint::OpenGlProfile(OpenGlProfile::Core).encode(),
            (ffi::OPENGL_PROFILE, ffi::OPENGL_CORE_PROFILE)
        );
    }
}
