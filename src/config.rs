// src/config.rs

//! Declarative window configuration.
//!
//! A [`WindowConfig`] captures the title, size and the hint values an
//! application wants, in a form that can be deserialized from a
//! configuration file (JSON here; any serde format works). Applying it
//! expands to a defaults reset followed by one hint call per field, so the
//! normalization rules in `hints.rs` still govern every value.

use crate::enums::{ClientApi, ContextRobustness, OpenGlProfile};
use crate::hints::WindowHint;
use serde::{Deserialize, Serialize};

/// Everything needed to describe the next window to create.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title.
    pub title: String,
    /// Client-area width in screen coordinates.
    pub width: i32,
    /// Client-area height in screen coordinates.
    pub height: i32,
    pub resizable: bool,
    pub visible: bool,
    pub decorated: bool,
    /// MSAA sample count; negative means "platform default".
    pub samples: i32,
    /// Fullscreen refresh rate; negative means "platform default".
    pub refresh_rate: i32,
    /// Context creation settings.
    pub context: ContextConfig,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            title: "window".to_string(),
            width: 800,
            height: 600,
            resizable: true,
            visible: true,
            decorated: true,
            samples: -1,
            refresh_rate: -1,
            context: ContextConfig::default(),
        }
    }
}

/// Context-related hint values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    pub client_api: ClientApi,
    pub version_major: i32,
    pub version_minor: i32,
    pub profile: OpenGlProfile,
    pub robustness: ContextRobustness,
    pub forward_compat: bool,
    pub debug: bool,
}

impl Default for ContextConfig {
    fn default() -> Self {
        ContextConfig {
            client_api: ClientApi::OpenGl,
            // The native defaults.
            version_major: 1,
            version_minor: 0,
            profile: OpenGlProfile::Any,
            robustness: ContextRobustness::NoRobustness,
            forward_compat: false,
            debug: false,
        }
    }
}

impl WindowConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// The hint assignments this configuration expands to, in forwarding
    /// order. Size and title are passed to window creation directly and do
    /// not appear here.
    pub fn hints(&self) -> Vec<WindowHint> {
        vec![
            WindowHint::Resizable(self.resizable),
            WindowHint::Visible(self.visible),
            WindowHint::Decorated(self.decorated),
            WindowHint::Samples(self.samples),
            WindowHint::RefreshRate(self.refresh_rate),
            WindowHint::ClientApi(self.context.client_api),
            WindowHint::ContextVersionMajor(self.context.version_major),
            WindowHint::ContextVersionMinor(self.context.version_minor),
            WindowHint::OpenGlProfile(self.context.profile),
            WindowHint::ContextRobustness(self.context.robustness),
            WindowHint::OpenGlForwardCompat(self.context.forward_compat),
            WindowHint::OpenGlDebugContext(self.context.debug),
        ]
    }
}
