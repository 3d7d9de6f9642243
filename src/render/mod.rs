//! Rendering collaborator: the surface trait and the style patches the
//! engines emit

mod patch;
mod surface;

pub use patch::{RegionId, RenderPatch};
pub use surface::{RecordingSurface, RenderSurface};
