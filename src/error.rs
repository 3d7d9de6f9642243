//! Error taxonomy shared by both engines

use crate::render::RegionId;

/// Errors raised by the flip and pagination engines.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FlipError {
    #[error("Invalid display mode: {0:?} (expected \"single\" or \"double\")")]
    InvalidDisplay(String),
    #[error("Page {page} is out of range (1..={total})")]
    PageOutOfRange { page: u32, total: u32 },
    #[error("Container region {0:?} does not exist on the surface")]
    MissingContainer(RegionId),
    #[error("Invalid corner: {0:?}")]
    InvalidCorner(String),
    #[error("Invalid corner policy: {0:?}")]
    InvalidCornerPolicy(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for FlipError {
    fn from(err: serde_json::Error) -> Self {
        FlipError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FlipError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = FlipError::PageOutOfRange { page: 7, total: 4 };
        assert_eq!(err.to_string(), "Page 7 is out of range (1..=4)");

        let err = FlipError::InvalidDisplay("triple".to_string());
        assert!(err.to_string().contains("triple"));
    }

    #[test]
    fn test_json_error_maps_to_config() {
        let parse: std::result::Result<u32, _> = serde_json::from_str("nope");
        let err: FlipError = parse.unwrap_err().into();
        assert!(matches!(err, FlipError::Config(_)));
    }
}
