//! Shared geometry utilities: Bézier sampling, transform strings and
//! rendering capabilities

mod bezier;
mod capabilities;
mod transform;

pub use bezier::{BezierCache, CubicBezier, DEFAULT_BEZIER_CAPACITY};
pub use capabilities::Capabilities;
pub use transform::{Matrix2D, Transform, TransformOp};
