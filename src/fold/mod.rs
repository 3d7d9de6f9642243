//! Fold geometry: angle and origin of the crease for a dragged corner

mod shading;

pub use shading::{shade_intensity, Shade, MAX_SHADE};

use crate::corner::Corner;
use crate::geometry::Transform;
use crate::{Point, Size};
use std::f32::consts::PI;

/// How the fold origin is derived from the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldStrategy {
    /// Origin scaled against the page dimensions; rendered as a fold matrix
    PageRelative,
    /// Origin is the clamped pointer offset from the corner; rendered as a
    /// rotation about a transform origin
    CornerOffset,
}

/// Result of a fold computation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Fold {
    pub origin: Point,
    /// Radians
    pub angle: f32,
    pub strategy: Option<FoldStrategy>,
}

impl Fold {
    /// Zero fold returned for degenerate input
    pub const ZERO: Fold = Fold {
        origin: Point { x: 0.0, y: 0.0 },
        angle: 0.0,
        strategy: None,
    };

    /// Page-relative fold.
    ///
    /// The angle points from `reference` to `current`; for bottom corners it
    /// is turned by π so every corner opens toward itself.
    pub fn page_relative(
        corner: Option<Corner>,
        reference: Point,
        current: Point,
        size: Size,
    ) -> Fold {
        let Some(corner) = corner else {
            return Self::degenerate();
        };

        let mut angle = (current.y - reference.y).atan2(current.x - reference.x);
        if corner.is_bottom() {
            angle += PI;
        }

        let (sin, cos) = angle.sin_cos();
        let fold = Fold {
            origin: Point {
                x: size.width - cos * size.width,
                y: size.height - sin * size.height,
            },
            angle,
            strategy: Some(FoldStrategy::PageRelative),
        };
        tracing::trace!(corner = %corner, angle = fold.angle, "page-relative fold");
        fold
    }

    /// Corner-relative fold: the origin is the pointer's offset from the
    /// corner, with the pointer first clamped to the page bounds.
    pub fn corner_offset(corner: Option<Corner>, current: Point, size: Size) -> Fold {
        let Some(corner) = corner else {
            return Self::degenerate();
        };

        let anchor = corner.point_on(size);
        let clamped = Point {
            x: current.x.min(size.width).max(0.0),
            y: current.y.min(size.height).max(0.0),
        };
        let offset = Point {
            x: clamped.x - anchor.x,
            y: clamped.y - anchor.y,
        };

        let fold = Fold {
            origin: offset,
            angle: offset.y.atan2(offset.x),
            strategy: Some(FoldStrategy::CornerOffset),
        };
        tracing::trace!(corner = %corner, angle = fold.angle, "corner-offset fold");
        fold
    }

    fn degenerate() -> Fold {
        tracing::warn!("fold requested without a valid corner; using zero fold");
        Fold::ZERO
    }

    pub fn is_zero(&self) -> bool {
        self.strategy.is_none()
    }

    /// Distance of the fold origin from the corner, relative to `width`.
    ///
    /// Not clamped: with the pointer dragged diagonally this can exceed 1.
    pub fn progress(&self, width: f32) -> f32 {
        if width <= 0.0 {
            return 0.0;
        }
        self.origin.x.hypot(self.origin.y) / width
    }

    /// Visual transform for this fold
    pub fn transform(&self, accelerated: bool) -> Transform {
        match self.strategy {
            Some(FoldStrategy::PageRelative) => {
                Transform::fold_matrix(self.angle, self.origin, accelerated)
            }
            Some(FoldStrategy::CornerOffset) => {
                Transform::rotation(self.angle, self.origin, accelerated)
            }
            None => Transform::identity(),
        }
    }
}
