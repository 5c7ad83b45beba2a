// src/enums.rs

//! Symbolic enumerations and their native integer encodings.
//!
//! Each enum here is a typed view of one family of native constants from
//! `ffi.rs`. Encoding (`to_native`) is total; decoding (`from_native`) is
//! partial because the native side may be newer than this table, so decode
//! boundaries return `Option` and the caller decides whether to drop or log.

use crate::ffi;
use libc::c_int;
use serde::{Deserialize, Serialize};

/// Error kinds reported through the error callback.
///
/// These never arrive as return values; a failing call returns a zeroed or
/// none result and the diagnostic comes through the registered callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NotInitialized,
    NoCurrentContext,
    InvalidEnum,
    InvalidValue,
    OutOfMemory,
    ApiUnavailable,
    VersionUnavailable,
    PlatformError,
    FormatUnavailable,
}

impl ErrorCode {
    pub fn from_native(code: c_int) -> Option<Self> {
        match code {
            ffi::NOT_INITIALIZED => Some(ErrorCode::NotInitialized),
            ffi::NO_CURRENT_CONTEXT => Some(ErrorCode::NoCurrentContext),
            ffi::INVALID_ENUM => Some(ErrorCode::InvalidEnum),
            ffi::INVALID_VALUE => Some(ErrorCode::InvalidValue),
            ffi::OUT_OF_MEMORY => Some(ErrorCode::OutOfMemory),
            ffi::API_UNAVAILABLE => Some(ErrorCode::ApiUnavailable),
            ffi::VERSION_UNAVAILABLE => Some(ErrorCode::VersionUnavailable),
            ffi::PLATFORM_ERROR => Some(ErrorCode::PlatformError),
            ffi::FORMAT_UNAVAILABLE => Some(ErrorCode::FormatUnavailable),
            _ => None,
        }
    }

    pub fn to_native(self) -> c_int {
        match self {
            ErrorCode::NotInitialized => ffi::NOT_INITIALIZED,
            ErrorCode::NoCurrentContext => ffi::NO_CURRENT_CONTEXT,
            ErrorCode::InvalidEnum => ffi::INVALID_ENUM,
            ErrorCode::InvalidValue => ffi::INVALID_VALUE,
            ErrorCode::OutOfMemory => ffi::OUT_OF_MEMORY,
            ErrorCode::ApiUnavailable => ffi::API_UNAVAILABLE,
            ErrorCode::VersionUnavailable => ffi::VERSION_UNAVAILABLE,
            ErrorCode::PlatformError => ffi::PLATFORM_ERROR,
            ErrorCode::FormatUnavailable => ffi::FORMAT_UNAVAILABLE,
        }
    }
}

/// Monitor connection state changes delivered to the monitor callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonitorEvent {
    Connected,
    Disconnected,
}

impl MonitorEvent {
    pub fn from_native(event: c_int) -> Option<Self> {
        match event {
            ffi::CONNECTED => Some(MonitorEvent::Connected),
            ffi::DISCONNECTED => Some(MonitorEvent::Disconnected),
            _ => None,
        }
    }

    pub fn to_native(self) -> c_int {
        match self {
            MonitorEvent::Connected => ffi::CONNECTED,
            MonitorEvent::Disconnected => ffi::DISCONNECTED,
        }
    }
}

/// Which client API the created context should target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ClientApi {
    NoApi,
    #[default]
    OpenGl,
    OpenGlEs,
}

impl ClientApi {
    pub fn to_native(self) -> c_int {
        match self {
            ClientApi::NoApi => ffi::NO_API,
            ClientApi::OpenGl => ffi::OPENGL_API,
            ClientApi::OpenGlEs => ffi::OPENGL_ES_API,
        }
    }
}

/// Context robustness strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ContextRobustness {
    #[default]
    NoRobustness,
    NoResetNotification,
    LoseContextOnReset,
}

impl ContextRobustness {
    pub fn to_native(self) -> c_int {
        match self {
            ContextRobustness::NoRobustness => ffi::NO_ROBUSTNESS,
            ContextRobustness::NoResetNotification => ffi::NO_RESET_NOTIFICATION,
            ContextRobustness::LoseContextOnReset => ffi::LOSE_CONTEXT_ON_RESET,
        }
    }
}

/// OpenGL profile selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OpenGlProfile {
    #[default]
    Any,
    Core,
    Compat,
}

impl OpenGlProfile {
    pub fn to_native(self) -> c_int {
        match self {
            OpenGlProfile::Any => ffi::OPENGL_ANY_PROFILE,
            OpenGlProfile::Core => ffi::OPENGL_CORE_PROFILE,
            OpenGlProfile::Compat => ffi::OPENGL_COMPAT_PROFILE,
        }
    }
}

/// Context release behavior when a context is made non-current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ContextReleaseBehavior {
    #[default]
    Any,
    Flush,
    None,
}

impl ContextReleaseBehavior {
    pub fn to_native(self) -> c_int {
        match self {
            ContextReleaseBehavior::Any => ffi::ANY_RELEASE_BEHAVIOR,
            ContextReleaseBehavior::Flush => ffi::RELEASE_BEHAVIOR_FLUSH,
            ContextReleaseBehavior::None => ffi::RELEASE_BEHAVIOR_NONE,
        }
    }
}

/// Boolean window attributes readable through the attribute query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowAttrib {
    Focused,
    Iconified,
    Resizable,
    Visible,
    Decorated,
    Floating,
}

impl WindowAttrib {
    pub fn to_native(self) -> c_int {
        match self {
            WindowAttrib::Focused => ffi::FOCUSED,
            WindowAttrib::Iconified => ffi::ICONIFIED,
            WindowAttrib::Resizable => ffi::RESIZABLE,
            WindowAttrib::Visible => ffi::VISIBLE,
            WindowAttrib::Decorated => ffi::DECORATED,
            WindowAttrib::Floating => ffi::FLOATING,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_round_trip() {
        let all = [
            ErrorCode::NotInitialized,
            ErrorCode::NoCurrentContext,
            ErrorCode::InvalidEnum,
            ErrorCode::InvalidValue,
            ErrorCode::OutOfMemory,
            ErrorCode::ApiUnavailable,
            ErrorCode::VersionUnavailable,
            ErrorCode::PlatformError,
            ErrorCode::FormatUnavailable,
        ];
        for code in all {
            assert_eq!(ErrorCode::from_native(code.to_native()), Some(code));
        }
    }

    #[test]
    fn unknown_error_code_is_rejected() {
        assert_eq!(ErrorCode::from_native(0), None);
        assert_eq!(ErrorCode::from_native(0x0001_00FF), None);
    }

    #[test]
    fn monitor_events_decode() {
        assert_eq!(
            MonitorEvent::from_native(0x0004_0001),
            Some(MonitorEvent::Connected)
        );
        assert_eq!(
            MonitorEvent::from_native(0x0004_0002),
            Some(MonitorEvent::Disconnected)
        );
        assert_eq!(MonitorEvent::from_native(7), None);
    }

    #[test]
    fn client_api_encodes_published_constants() {
        assert_eq!(ClientApi::NoApi.to_native(), 0);
        assert_eq!(ClientApi::OpenGl.to_native(), 0x0003_0001);
        assert_eq!(ClientApi::OpenGlEs.to_native(), 0x0003_0002);
    }

    #[test]
    fn attrib_keys_encode_published_constants() {
        assert_eq!(WindowAttrib::Focused.to_native(), 0x0002_0001);
        assert_eq!(WindowAttrib::Iconified.to_native(), 0x0002_0002);
        assert_eq!(WindowAttrib::Floating.to_native(), 0x0002_0007);
    }
}
