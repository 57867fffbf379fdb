//! # Plan display configuration
//!
//! Editable display settings and their persisted form. Settings are saved as a flat TOML table
//! with the keys `topic`, `color`, `postopic`, `poscolor` and `draw_style`.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod draw_style;
mod settings;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

pub use draw_style::*;
pub use settings::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors which can occur while loading or saving settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not read the settings: {0}")]
    Load(#[from] util::params::LoadError),

    #[error("Could not serialise the settings: {0}")]
    Serialise(#[from] toml::ser::Error),

    #[error("Could not write the settings file: {0}")]
    Write(#[from] std::io::Error),

    #[error("Could not subscribe to a configured topic: {0}")]
    Subscribe(#[from] comms_if::bus::BusError),
}
