//! The surface trait and an in-memory implementation that queues patches

use crate::geometry::Capabilities;
use crate::render::{RegionId, RenderPatch};
use crate::Size;
use rustc_hash::FxHashMap;

/// What the engines need from the host's rendering layer
pub trait RenderSurface {
    /// Current layout size of `region`; zero for unknown regions
    fn dimensions(&self, region: RegionId) -> Size;

    fn has_region(&self, region: RegionId) -> bool;

    /// Create an empty child region under `parent`
    fn create_region(&mut self, parent: RegionId) -> RegionId;

    fn remove_region(&mut self, region: RegionId);

    /// Capabilities of this surface, queried once per engine
    fn capabilities(&self) -> Capabilities;

    fn apply(&mut self, patch: RenderPatch);
}

#[derive(Debug, Clone)]
struct RegionRecord {
    parent: Option<RegionId>,
    size: Size,
}

/// Surface that tracks region structure and sizes and queues every patch for
/// the host to drain.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    regions: FxHashMap<RegionId, RegionRecord>,
    next_id: u32,
    capabilities: Capabilities,
    patches: Vec<RenderPatch>,
}

impl RecordingSurface {
    pub fn new(capabilities: Capabilities) -> Self {
        Self {
            capabilities,
            ..Self::default()
        }
    }

    /// Register a top-level region owned by the host
    pub fn add_root(&mut self, size: Size) -> RegionId {
        let id = self.allocate();
        self.regions.insert(id, RegionRecord { parent: None, size });
        id
    }

    /// Record a new layout size reported by the host
    pub fn set_dimensions(&mut self, region: RegionId, size: Size) {
        if let Some(record) = self.regions.get_mut(&region) {
            record.size = size;
        }
    }

    pub fn parent_of(&self, region: RegionId) -> Option<RegionId> {
        self.regions.get(&region).and_then(|r| r.parent)
    }

    /// Patches queued since the last drain
    pub fn patches(&self) -> &[RenderPatch] {
        &self.patches
    }

    pub fn take_patches(&mut self) -> Vec<RenderPatch> {
        std::mem::take(&mut self.patches)
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    fn allocate(&mut self) -> RegionId {
        let id = RegionId(self.next_id);
        self.next_id += 1;
        id
    }
}

impl RenderSurface for RecordingSurface {
    fn dimensions(&self, region: RegionId) -> Size {
        self.regions
            .get(&region)
            .map(|r| r.size)
            .unwrap_or_default()
    }

    fn has_region(&self, region: RegionId) -> bool {
        self.regions.contains_key(&region)
    }

    fn create_region(&mut self, parent: RegionId) -> RegionId {
        let region = self.allocate();
        self.regions.insert(
            region,
            RegionRecord {
                parent: Some(parent),
                size: Size::default(),
            },
        );
        self.patches
            .push(RenderPatch::CreateRegion { region, parent });
        region
    }

    fn remove_region(&mut self, region: RegionId) {
        if self.regions.remove(&region).is_none() {
            return;
        }

        // Drop descendants as well
        let mut orphans = vec![region];
        while let Some(parent) = orphans.pop() {
            let children: Vec<RegionId> = self
                .regions
                .iter()
                .filter(|(_, r)| r.parent == Some(parent))
                .map(|(id, _)| *id)
                .collect();
            for child in children {
                self.regions.remove(&child);
                orphans.push(child);
            }
        }

        self.patches.push(RenderPatch::RemoveRegion { region });
    }

    fn capabilities(&self) -> Capabilities {
        self.capabilities.clone()
    }

    fn apply(&mut self, patch: RenderPatch) {
        match &patch {
            RenderPatch::SetSize { region, size } => {
                if let Some(record) = self.regions.get_mut(region) {
                    record.size = *size;
                }
            }
            RenderPatch::Reparent { region, parent } => {
                if let Some(record) = self.regions.get_mut(region) {
                    record.parent = Some(*parent);
                }
            }
            _ => {}
        }
        self.patches.push(patch);
    }
}
