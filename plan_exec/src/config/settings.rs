//! Editable display settings and their persisted form

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::warn;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{ConfigError, DrawStyle};
use crate::render::Rgba;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Default size of the position marker
///
/// Units: display frame units
pub const DEFAULT_MARKER_SIZE: f64 = 15.0;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Settings of the plan display.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanDisplaySettings {
    /// Topic plans are received on
    pub topic: String,

    /// Colour plans are drawn in
    pub color: Rgba,

    /// Topic plan positions are received on
    pub position_topic: String,

    /// Colour of the position marker
    pub position_color: Rgba,

    pub draw_style: DrawStyle,

    /// Size of the position marker, not persisted.
    ///
    /// Units: display frame units
    pub marker_size: f64,
}

/// Persisted form of [`PlanDisplaySettings`].
///
/// All keys are optional when loading. Values are kept as strings so that a single bad value does
/// not prevent the rest of the file from being applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postopic: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poscolor: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draw_style: Option<String>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for PlanDisplaySettings {
    fn default() -> Self {
        Self {
            topic: String::new(),
            color: Rgba::GREEN,
            position_topic: String::new(),
            position_color: Rgba::BLUE,
            draw_style: DrawStyle::default(),
            marker_size: DEFAULT_MARKER_SIZE,
        }
    }
}

impl PlanDisplaySettings {
    /// Apply the values present in the file over the current settings.
    ///
    /// Absent keys leave the current value untouched. Values which cannot be parsed are skipped
    /// with a warning.
    pub fn apply(&mut self, file: &SettingsFile) {
        if let Some(ref topic) = file.topic {
            self.topic = topic.trim().to_string();
        }

        if let Some(ref postopic) = file.postopic {
            self.position_topic = postopic.trim().to_string();
        }

        if let Some(ref color) = file.color {
            match color.parse() {
                Ok(c) => self.color = c,
                Err(e) => warn!("Ignoring invalid plan colour: {}", e),
            }
        }

        if let Some(ref poscolor) = file.poscolor {
            match poscolor.parse() {
                Ok(c) => self.position_color = c,
                Err(e) => warn!("Ignoring invalid position colour: {}", e),
            }
        }

        if let Some(ref style) = file.draw_style {
            match style.parse() {
                Ok(s) => self.draw_style = s,
                Err(e) => warn!("Ignoring invalid draw style: {}", e),
            }
        }
    }

    /// Apply settings from a TOML string.
    pub fn load_str(&mut self, settings_str: &str) -> Result<(), ConfigError> {
        let file: SettingsFile = util::params::from_str(settings_str)?;
        self.apply(&file);
        Ok(())
    }

    /// Apply settings from a TOML file.
    pub fn load_path<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        let file: SettingsFile = util::params::load_path(path)?;
        self.apply(&file);
        Ok(())
    }

    /// The persisted form of these settings, with every key present.
    pub fn to_file(&self) -> SettingsFile {
        SettingsFile {
            topic: Some(self.topic.clone()),
            color: Some(self.color.name()),
            postopic: Some(self.position_topic.clone()),
            poscolor: Some(self.position_color.name()),
            draw_style: Some(self.draw_style.to_string()),
        }
    }

    pub fn save_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(&self.to_file())?)
    }

    pub fn save_path<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        std::fs::write(path, self.save_string()?)?;
        Ok(())
    }
}
