//! Draw style selection

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::{collections::BTreeSet, fmt, str::FromStr};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The set of elements plans are drawn with. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawStyle(BTreeSet<DrawElement>);

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// An element of a drawn plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DrawElement {
    /// A dot at each waypoint
    Points,

    /// Lines between consecutive waypoints
    Lines,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DrawStyleParseError {
    #[error("Expected one of \"lines\", \"points\" or \"points and lines\", got \"{0}\"")]
    UnknownStyle(String),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl DrawStyle {
    pub fn lines() -> Self {
        Self(std::iter::once(DrawElement::Lines).collect())
    }

    pub fn points() -> Self {
        Self(std::iter::once(DrawElement::Points).collect())
    }

    pub fn points_and_lines() -> Self {
        Self(vec![DrawElement::Points, DrawElement::Lines].into_iter().collect())
    }

    /// Build a style from a set of elements, or `None` if there are none.
    pub fn from_elements<I: IntoIterator<Item = DrawElement>>(elements: I) -> Option<Self> {
        let set: BTreeSet<_> = elements.into_iter().collect();

        if set.is_empty() {
            None
        } else {
            Some(Self(set))
        }
    }

    pub fn contains(&self, element: DrawElement) -> bool {
        self.0.contains(&element)
    }

    /// A style drawing every element drawn by either style.
    pub fn union(&self, other: &DrawStyle) -> DrawStyle {
        Self(self.0.union(&other.0).copied().collect())
    }

    pub fn elements(&self) -> impl Iterator<Item = DrawElement> + '_ {
        self.0.iter().copied()
    }
}

impl Default for DrawStyle {
    fn default() -> Self {
        Self::lines()
    }
}

impl FromStr for DrawStyle {
    type Err = DrawStyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lines" => Ok(Self::lines()),
            "points" => Ok(Self::points()),
            "points and lines" => Ok(Self::points_and_lines()),
            _ => Err(DrawStyleParseError::UnknownStyle(s.to_string())),
        }
    }
}

impl fmt::Display for DrawStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match (self.contains(DrawElement::Points), self.contains(DrawElement::Lines)) {
            (true, true) => "points and lines",
            (true, false) => "points",
            _ => "lines",
        };

        f.write_str(s)
    }
}
