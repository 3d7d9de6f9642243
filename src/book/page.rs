//! Pages, display modes and display slots

use crate::error::{FlipError, Result};
use crate::render::RegionId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One page or a two-page spread at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    Single,
    #[default]
    Double,
}

impl DisplayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Single => "single",
            DisplayMode::Double => "double",
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayMode {
    type Err = FlipError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "single" => Ok(DisplayMode::Single),
            "double" => Ok(DisplayMode::Double),
            other => Err(FlipError::InvalidDisplay(other.to_string())),
        }
    }
}

/// Where a visible page sits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Single,
    Left,
    Right,
}

/// A page of the book
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// 1-based page number
    pub number: u32,
    /// Host-provided content region
    pub content: RegionId,
    /// Region created by the book to position and fold the content
    pub wrapper: RegionId,
    /// Shading overlay inside the wrapper, when gradients are enabled
    pub shadow: Option<RegionId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_mode_parse() {
        assert_eq!("single".parse::<DisplayMode>().unwrap(), DisplayMode::Single);
        assert_eq!("double".parse::<DisplayMode>().unwrap(), DisplayMode::Double);
        assert_eq!(
            "triple".parse::<DisplayMode>(),
            Err(FlipError::InvalidDisplay("triple".to_string()))
        );
        assert_eq!(DisplayMode::Single.to_string(), "single");
    }
}
