//! Engine options, deserialized from the host's options object

use crate::book::DisplayMode;
use crate::corner::CornerPolicy;
use crate::error::{FlipError, Result};
use crate::Size;
use serde::Deserialize;

/// Default active-zone size in pixels
pub const DEFAULT_CORNER_SIZE: f32 = 100.0;

/// Default settle animation length in milliseconds
pub const DEFAULT_DURATION_MS: u32 = 600;

/// Options for a single-surface flip
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlipOptions {
    /// Side of the square active zone at each corner.
    ///
    /// Zones must not overlap: keep this below half the surface width and
    /// half its height.
    pub corner_size: f32,
    pub corners: CornerPolicy,
    /// Render the shadow overlay
    pub gradients: bool,
    /// Settle animation length (ms)
    pub duration: u32,
    /// Prefer 3D-hinted transforms where supported
    pub acceleration: bool,
    pub width: Option<f32>,
    pub height: Option<f32>,
}

impl Default for FlipOptions {
    fn default() -> Self {
        Self {
            corner_size: DEFAULT_CORNER_SIZE,
            corners: CornerPolicy::Forward,
            gradients: true,
            duration: DEFAULT_DURATION_MS,
            acceleration: true,
            width: None,
            height: None,
        }
    }
}

impl FlipOptions {
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        validate_common(options.corner_size, options.width, options.height)?;
        Ok(options)
    }

    /// Explicit size override, if both dimensions are set
    pub fn size_override(&self) -> Option<Size> {
        Some(Size::new(self.width?, self.height?))
    }
}

/// Options for a paginated book
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookOptions {
    pub corner_size: f32,
    pub corners: CornerPolicy,
    pub gradients: bool,
    pub duration: u32,
    pub acceleration: bool,
    pub display: DisplayMode,
    /// Initial page (1-based)
    pub page: u32,
    /// Initial total page count; added pages can raise it
    pub pages: u32,
    pub width: Option<f32>,
    pub height: Option<f32>,
}

impl Default for BookOptions {
    fn default() -> Self {
        Self {
            corner_size: DEFAULT_CORNER_SIZE,
            corners: CornerPolicy::All,
            gradients: true,
            duration: DEFAULT_DURATION_MS,
            acceleration: true,
            display: DisplayMode::Double,
            page: 1,
            pages: 0,
            width: None,
            height: None,
        }
    }
}

impl BookOptions {
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        validate_common(options.corner_size, options.width, options.height)?;
        if options.page == 0 {
            return Err(FlipError::Config("page must be at least 1".to_string()));
        }
        Ok(options)
    }

    pub fn size_override(&self) -> Option<Size> {
        Some(Size::new(self.width?, self.height?))
    }
}

fn validate_common(corner_size: f32, width: Option<f32>, height: Option<f32>) -> Result<()> {
    if !(corner_size.is_finite() && corner_size > 0.0) {
        return Err(FlipError::Config(format!(
            "cornerSize must be positive, got {}",
            corner_size
        )));
    }
    for (name, value) in [("width", width), ("height", height)] {
        if let Some(v) = value {
            if !(v.is_finite() && v > 0.0) {
                return Err(FlipError::Config(format!("{} must be positive, got {}", name, v)));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flip_defaults() {
        let options = FlipOptions::from_json("{}").unwrap();
        assert_eq!(options, FlipOptions::default());
        assert_eq!(options.corners, CornerPolicy::Forward);
        assert_eq!(options.size_override(), None);
    }

    #[test]
    fn test_flip_options_from_json() {
        let options = FlipOptions::from_json(
            r#"{"cornerSize": 40, "corners": "backward", "gradients": false,
                "duration": 250, "acceleration": false, "width": 300, "height": 200}"#,
        )
        .unwrap();
        assert_eq!(options.corner_size, 40.0);
        assert_eq!(options.corners, CornerPolicy::Backward);
        assert!(!options.gradients);
        assert_eq!(options.duration, 250);
        assert_eq!(options.size_override(), Some(Size::new(300.0, 200.0)));
    }

    #[test]
    fn test_book_options_from_json() {
        let options =
            BookOptions::from_json(r#"{"display": "single", "page": 3, "pages": 8}"#).unwrap();
        assert_eq!(options.display, DisplayMode::Single);
        assert_eq!(options.page, 3);
        assert_eq!(options.pages, 8);
        assert_eq!(options.corners, CornerPolicy::All);
    }

    #[test]
    fn test_invalid_options() {
        assert!(matches!(
            BookOptions::from_json(r#"{"display": "triple"}"#),
            Err(FlipError::Config(_))
        ));
        assert!(matches!(
            BookOptions::from_json(r#"{"page": 0}"#),
            Err(FlipError::Config(_))
        ));
        assert!(matches!(
            FlipOptions::from_json(r#"{"cornerSize": -5}"#),
            Err(FlipError::Config(_))
        ));
        assert!(matches!(
            FlipOptions::from_json(r#"{"corners": "sideways"}"#),
            Err(FlipError::Config(_))
        ));
    }
}
