//! # Status reporting
//!
//! The plan display reports the outcome of each frame as a single line of text with a severity.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::debug;
use std::fmt;

use crate::render::Rgba;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Colour of warning status lines
pub const WARNING_COLOR: Rgba = Rgba::rgb(255, 165, 0);

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// Something which accepts status reports.
pub trait StatusSink {
    fn report(&mut self, level: StatusLevel, message: &str);
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A status sink which only keeps the latest report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusLine {
    level: StatusLevel,
    message: String,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for StatusLevel {
    fn default() -> Self {
        StatusLevel::Info
    }
}

impl fmt::Display for StatusLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StatusLevel::Info => "info",
            StatusLevel::Warning => "warning",
            StatusLevel::Error => "error",
        })
    }
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self) -> StatusLevel {
        self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Colour the line should be shown in.
    pub fn color(&self) -> Rgba {
        match self.level {
            StatusLevel::Info => Rgba::GREEN,
            StatusLevel::Warning => WARNING_COLOR,
            StatusLevel::Error => Rgba::RED,
        }
    }
}

impl StatusSink for StatusLine {
    fn report(&mut self, level: StatusLevel, message: &str) {
        if self.level != level || self.message != message {
            debug!("Status ({}): {}", level, message);
            self.level = level;
            self.message = message.to_string();
        }
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level, self.message)
    }
}
