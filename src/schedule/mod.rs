//! Cancellable settle task

use crate::render::{RegionId, RenderPatch, RenderSurface};
use serde::{Deserialize, Serialize};

/// Identifies one scheduled callback; the host echoes it back when the
/// delay has elapsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimerToken(pub u32);

#[derive(Debug, Clone, Copy)]
struct PendingSettle {
    token: TimerToken,
    region: RegionId,
}

/// Owns at most one pending "clear the transition" task.
///
/// Scheduling a new task or starting a new interaction supersedes the
/// pending one: its region's transition is cleared right away and its
/// token turns into a no-op.
#[derive(Debug, Default)]
pub struct SettleTimer {
    next_token: u32,
    pending: Option<PendingSettle>,
}

impl SettleTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule clearing `region`'s transition after `delay_ms`
    pub fn schedule<S: RenderSurface>(
        &mut self,
        surface: &mut S,
        region: RegionId,
        delay_ms: u32,
    ) -> TimerToken {
        self.supersede(surface);

        let token = TimerToken(self.next_token);
        self.next_token = self.next_token.wrapping_add(1);
        self.pending = Some(PendingSettle { token, region });
        surface.apply(RenderPatch::ScheduleTimer { token, delay_ms });
        token
    }

    /// Drop the pending task, clearing its transition immediately
    pub fn supersede<S: RenderSurface>(&mut self, surface: &mut S) -> Option<RegionId> {
        let pending = self.pending.take()?;
        tracing::debug!(token = pending.token.0, "settle superseded");
        surface.apply(RenderPatch::SetTransition {
            region: pending.region,
            duration_ms: 0,
        });
        Some(pending.region)
    }

    /// Handle the host's callback; stale tokens are ignored
    pub fn fire<S: RenderSurface>(&mut self, surface: &mut S, token: TimerToken) -> bool {
        match self.pending {
            Some(pending) if pending.token == token => {
                self.pending = None;
                surface.apply(RenderPatch::SetTransition {
                    region: pending.region,
                    duration_ms: 0,
                });
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
