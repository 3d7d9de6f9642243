//! Rendering capability descriptor

use serde::{Deserialize, Serialize};

/// What the rendering surface can do, computed once by the host and handed
/// to each engine at construction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    /// Whether 3D transforms (`matrix3d`, `translate3d`) are supported
    pub transforms_3d: bool,
    /// Vendor prefix for style properties, e.g. `-webkit-`; empty if none
    pub vendor_prefix: String,
}

impl Capabilities {
    pub fn new(transforms_3d: bool) -> Self {
        Self {
            transforms_3d,
            vendor_prefix: String::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.vendor_prefix = prefix.into();
        self
    }

    /// Whether a 3D-hinted transform should be emitted
    pub fn accelerate(&self, requested: bool) -> bool {
        requested && self.transforms_3d
    }

    /// Prefixed style property name
    pub fn property(&self, name: &str) -> String {
        format!("{}{}", self.vendor_prefix, name)
    }
}
