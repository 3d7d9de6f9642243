//! Visible-page computation

use super::page::{DisplayMode, Slot};
use smallvec::{smallvec, SmallVec};

/// Page numbers currently visible: one in single mode, an odd-first pair in
/// double mode
pub type View = SmallVec<[u32; 2]>;

/// Visible pages for `page` under `mode`.
///
/// Double-mode spreads pair as (1, 2), (3, 4), ... regardless of the total
/// page count, so the second number may name a page that does not exist.
pub fn view(page: u32, mode: DisplayMode) -> View {
    match mode {
        DisplayMode::Single => smallvec![page],
        DisplayMode::Double if page % 2 == 1 => smallvec![page, page.saturating_add(1)],
        DisplayMode::Double => smallvec![page.saturating_sub(1), page],
    }
}

/// Slot of `page` within `view`, or `None` if it is not visible
pub fn slot_in(view: &View, page: u32, mode: DisplayMode) -> Option<Slot> {
    let index = view.iter().position(|p| *p == page)?;
    Some(match (mode, index) {
        (DisplayMode::Single, _) => Slot::Single,
        (DisplayMode::Double, 0) => Slot::Left,
        (DisplayMode::Double, _) => Slot::Right,
    })
}
