//! Page-Flip: geometry and interaction core for page-turn effects
//!
//! This crate provides:
//! - Corner hit testing with allowed-corner policies
//! - Fold geometry (page-relative and corner-relative) and its transforms
//! - A single-surface flip state machine with shading and a settle animation
//! - A paginated book with single/double spreads and drag-to-turn
//!
//! Rendering, input and timers belong to the host: engines emit
//! [`RenderPatch`]es through a [`RenderSurface`] and report state changes as
//! [`FlipEvent`]s.

pub mod book;
pub mod config;
pub mod corner;
pub mod error;
pub mod events;
pub mod flip;
pub mod fold;
pub mod geometry;
pub mod render;
pub mod schedule;
pub mod wasm;

// Re-export WASM types for direct use
pub use wasm::{WasmBook, WasmFlip};

// Re-export primary types
pub use book::{view, Book, DisplayMode, Page, Slot, View};
pub use config::{BookOptions, FlipOptions};
pub use corner::{detect, Corner, CornerPolicy, CornerSet};
pub use error::{FlipError, Result};
pub use events::{EventBus, FlipEvent, SubscriptionId};
pub use flip::{FlipSession, FoldSession};
pub use fold::{Fold, FoldStrategy, Shade};
pub use geometry::{BezierCache, Capabilities, CubicBezier, Matrix2D, Transform};
pub use render::{RecordingSurface, RegionId, RenderPatch, RenderSurface};
pub use schedule::{SettleTimer, TimerToken};

use serde::{Deserialize, Serialize};

/// Surface-relative coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Layout dimensions of a region
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Length of the diagonal, `√(w² + h²)`
    pub fn diagonal(&self) -> f32 {
        self.width.hypot(self.height)
    }
}
