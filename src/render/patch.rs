//! Style patches sent to the renderer

use crate::schedule::TimerToken;
use crate::{Point, Size};
use serde::{Deserialize, Serialize};

/// Opaque handle to a region (element) on the rendering surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(pub u32);

/// A single style or structure change for the renderer.
///
/// The engines never read these back; only region dimensions flow the other
/// way, through [`RenderSurface::dimensions`](super::RenderSurface::dimensions).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum RenderPatch {
    /// A child region was created
    CreateRegion { region: RegionId, parent: RegionId },
    /// A region and its children were removed
    RemoveRegion { region: RegionId },
    /// Move `region` under `parent`
    Reparent { region: RegionId, parent: RegionId },
    SetSize { region: RegionId, size: Size },
    /// Offset from the parent's top-left corner
    SetPosition { region: RegionId, position: Point },
    /// `property` is the (possibly vendor-prefixed) transform property name
    SetTransform {
        region: RegionId,
        property: String,
        transform: String,
        origin: Option<String>,
    },
    /// Transition duration for transform changes; zero clears it
    SetTransition { region: RegionId, duration_ms: u32 },
    /// Shadow gradient; `None` removes it
    SetGradient { region: RegionId, css: Option<String> },
    SetZIndex { region: RegionId, z_index: i32 },
    SetVisible { region: RegionId, visible: bool },
    /// Ask the host to call back with `token` after `delay_ms`
    ScheduleTimer { token: TimerToken, delay_ms: u32 },
}

impl RenderPatch {
    /// The region this patch targets, if any
    pub fn region(&self) -> Option<RegionId> {
        match self {
            RenderPatch::CreateRegion { region, .. }
            | RenderPatch::RemoveRegion { region }
            | RenderPatch::Reparent { region, .. }
            | RenderPatch::SetSize { region, .. }
            | RenderPatch::SetPosition { region, .. }
            | RenderPatch::SetTransform { region, .. }
            | RenderPatch::SetTransition { region, .. }
            | RenderPatch::SetGradient { region, .. }
            | RenderPatch::SetZIndex { region, .. }
            | RenderPatch::SetVisible { region, .. } => Some(*region),
            RenderPatch::ScheduleTimer { .. } => None,
        }
    }
}
