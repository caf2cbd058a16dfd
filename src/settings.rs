//! Wheel settings
//!
//! Animation parameters handed to the renderer plus the spin defaults. Stored as JSON;
//! every field falls back to its default when missing.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::spin::WheelGeometry;

/// Default easing, a fast start with a long soft stop
pub const DEFAULT_EASING: &str = "cubic-bezier(0.36, 0.95, 0.64, 1)";

/// Wheel settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelSettings {
    /// Spin animation length
    pub duration_ms: u32,
    /// Easing curve name for the renderer (not interpreted)
    pub easing: String,
    /// Full turns before settling; negative spins the wheel backward
    pub base_turns: i32,
    /// Canvas layout for renderers that draw the wheel themselves
    pub geometry: WheelGeometry,
}

impl Default for WheelSettings {
    fn default() -> Self {
        Self {
            duration_ms: 6000,
            easing: DEFAULT_EASING.to_string(),
            base_turns: 10,
            geometry: WheelGeometry::default(),
        }
    }
}

impl WheelSettings {
    pub fn with_duration_ms(mut self, duration_ms: u32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn with_easing(mut self, easing: impl Into<String>) -> Self {
        self.easing = easing.into();
        self
    }

    pub fn with_base_turns(mut self, base_turns: i32) -> Self {
        self.base_turns = base_turns;
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults if the file is missing or unreadable
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::info!("Using default settings ({})", e);
                Self::default()
            }
        }
    }
}
