//! Hook configuration.
//!
//! Every field has a default matching the markup rendered by the server, so
//! an empty options object (or none at all) is a valid configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::normalize::LOGICAL_GRID;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid hook configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Coordinate mapping for a drawing surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Side length of the logical grid.
    pub grid: u32,
    /// Clamp offsets into `[0, grid]` instead of passing them through.
    pub clamp: bool,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            grid: LOGICAL_GRID,
            clamp: false,
        }
    }
}

/// Copy event wiring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CopyConfig {
    /// Window event carrying copy requests.
    pub event: String,
    /// Attribute holding the script run after a successful copy.
    pub success_attribute: String,
    /// Attribute holding the script run after a failed copy.
    pub error_attribute: String,
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self {
            event: "phx:copy".to_string(),
            success_attribute: "data-copy-success".to_string(),
            error_attribute: "data-copy-error".to_string(),
        }
    }
}

/// Window-level helper events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HelpersConfig {
    pub toggle_aria_event: String,
    pub exec_timeout_event: String,
}

impl Default for HelpersConfig {
    fn default() -> Self {
        Self {
            toggle_aria_event: "gol:toggle-aria".to_string(),
            exec_timeout_event: "js:exec-timeout".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HookConfig {
    pub surface: SurfaceConfig,
    pub copy: CopyConfig,
    pub helpers: HelpersConfig,
}

impl HookConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}
