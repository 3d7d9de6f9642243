//! Engine notifications and per-engine subscriptions

use crate::book::DisplayMode;
use crate::corner::Corner;
use crate::Point;
use serde::Serialize;
use std::fmt;

/// A notification emitted by one of the engines.
///
/// Serialized with a `type` field holding the event name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum FlipEvent {
    /// Single surface: a turn started at `point` on `corner`
    #[serde(rename = "flipstart")]
    TurnStart { point: Point, corner: Corner },
    /// Single surface: the turn that started at `point` ended
    #[serde(rename = "flipend")]
    TurnEnd { point: Point, corner: Corner },
    /// Book: `page` started moving from `corner`
    #[serde(rename = "flipStart")]
    FlipStart { page: u32, corner: Corner },
    /// Book: fold progress of the moving page
    #[serde(rename = "flipMove")]
    FlipMove { page: u32, progress: f32 },
    /// Book: the drag on `page` was committed toward `target`
    #[serde(rename = "flipComplete")]
    FlipComplete { page: u32, target: u32 },
    #[serde(rename = "pageChanged")]
    PageChanged { previous: u32, current: u32 },
    #[serde(rename = "displayChanged")]
    DisplayChanged {
        previous: DisplayMode,
        current: DisplayMode,
    },
}

impl FlipEvent {
    /// Event name as seen by listeners
    pub fn name(&self) -> &'static str {
        match self {
            FlipEvent::TurnStart { .. } => "flipstart",
            FlipEvent::TurnEnd { .. } => "flipend",
            FlipEvent::FlipStart { .. } => "flipStart",
            FlipEvent::FlipMove { .. } => "flipMove",
            FlipEvent::FlipComplete { .. } => "flipComplete",
            FlipEvent::PageChanged { .. } => "pageChanged",
            FlipEvent::DisplayChanged { .. } => "displayChanged",
        }
    }
}

/// Handle returned by [`EventBus::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u32);

type Listener = Box<dyn FnMut(&FlipEvent)>;

/// Synchronous, in-order delivery of events to subscribed listeners
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u32,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&FlipEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn emit(&mut self, event: FlipEvent) {
        tracing::debug!(event = event.name(), "emit");
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}
