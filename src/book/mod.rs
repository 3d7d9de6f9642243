//! Paginated book: page collection, current-page cursor, spreads and
//! drag-to-turn

mod page;
mod view;

pub use page::{DisplayMode, Page, Slot};
pub use view::{slot_in, view, View};

use crate::config::BookOptions;
use crate::corner::{self, Corner};
use crate::error::{FlipError, Result};
use crate::events::{EventBus, FlipEvent, SubscriptionId};
use crate::fold::{Fold, Shade};
use crate::geometry::{BezierCache, Capabilities, CubicBezier, Transform};
use crate::render::{RegionId, RenderPatch, RenderSurface};
use crate::schedule::{SettleTimer, TimerToken};
use crate::{Point, Size};
use rustc_hash::FxHashSet;
use std::collections::BTreeMap;

/// Stacking order of page wrappers
const Z_HIDDEN: i32 = 0;
const Z_VISIBLE: i32 = 1;
const Z_MOVING: i32 = 2;

/// The page currently being dragged
#[derive(Debug, Clone, Copy)]
struct Drag {
    page: u32,
    corner: Corner,
    fold: Fold,
}

/// Pagination engine: `idle -> dragging(page) -> idle`, one page at a time.
pub struct Book<S: RenderSurface> {
    surface: S,
    options: BookOptions,
    capabilities: Capabilities,
    container: RegionId,
    pages: BTreeMap<u32, Page>,
    total_pages: u32,
    current: u32,
    display: DisplayMode,
    /// Pages in motion; never more than one
    moving: FxHashSet<u32>,
    drag: Option<Drag>,
    /// Set once the initial layout is done; gates repositioning
    ready: bool,
    disabled: bool,
    settle: SettleTimer,
    events: EventBus,
    bezier: BezierCache,
}

impl<S: RenderSurface> Book<S> {
    pub fn new(surface: S, container: RegionId, options: BookOptions) -> Result<Self> {
        Self::with_pages(surface, container, options, std::iter::empty())
    }

    /// Build a book and add `contents` as pages 1, 2, ... before the first
    /// layout pass
    pub fn with_pages(
        surface: S,
        container: RegionId,
        options: BookOptions,
        contents: impl IntoIterator<Item = RegionId>,
    ) -> Result<Self> {
        if !surface.has_region(container) {
            return Err(FlipError::MissingContainer(container));
        }

        let capabilities = surface.capabilities();
        let mut book = Self {
            surface,
            capabilities,
            container,
            pages: BTreeMap::new(),
            total_pages: options.pages,
            current: options.page.max(1),
            display: options.display,
            options,
            moving: FxHashSet::default(),
            drag: None,
            ready: false,
            disabled: false,
            settle: SettleTimer::new(),
            events: EventBus::new(),
            bezier: BezierCache::default(),
        };

        for (number, content) in (1u32..).zip(contents) {
            book.add_page(content, Some(number))?;
        }
        if book.total_pages > 0 {
            book.current = book.current.min(book.total_pages);
        }

        book.ready = true;
        book.update_positions();
        tracing::debug!(
            pages = book.total_pages,
            page = book.current,
            display = %book.display,
            "book ready"
        );
        Ok(book)
    }

    /// Replace the Bézier cache used by [`Book::turn_path`]
    pub fn with_bezier_cache(mut self, cache: BezierCache) -> Self {
        self.bezier = cache;
        self
    }

    /// Add `content` as page `index`, or after the last page when `None`.
    ///
    /// An existing page with the same number is replaced. Returns the page
    /// number.
    pub fn add_page(&mut self, content: RegionId, index: Option<u32>) -> Result<u32> {
        let number = index.unwrap_or(self.total_pages.saturating_add(1));
        if number == 0 {
            return Err(FlipError::PageOutOfRange {
                page: number,
                total: self.total_pages,
            });
        }

        let wrapper = self.surface.create_region(self.container);
        self.surface.apply(RenderPatch::Reparent {
            region: content,
            parent: wrapper,
        });
        let shadow = self
            .options
            .gradients
            .then(|| self.surface.create_region(wrapper));

        let page_size = self.page_size();
        self.surface.apply(RenderPatch::SetSize {
            region: wrapper,
            size: page_size,
        });
        if let Some(shadow) = shadow {
            self.surface.apply(RenderPatch::SetSize {
                region: shadow,
                size: page_size,
            });
        }
        self.surface.apply(RenderPatch::SetVisible {
            region: wrapper,
            visible: false,
        });

        let page = Page {
            number,
            content,
            wrapper,
            shadow,
        };
        if let Some(old) = self.pages.insert(number, page) {
            self.surface.remove_region(old.wrapper);
        }
        if number > self.total_pages {
            self.total_pages = number;
        }

        tracing::debug!(page = number, total = self.total_pages, "page added");
        if self.ready {
            self.update_positions();
        }
        Ok(number)
    }

    /// Switch between single and double spreads; returns whether anything
    /// changed. Ignored while a page is moving.
    pub fn set_display(&mut self, mode: DisplayMode) -> bool {
        if mode == self.display || self.is_dragging() {
            return false;
        }

        let previous = self.display;
        self.display = mode;
        self.resize_wrappers();
        if self.ready {
            self.update_positions();
        }

        self.events.emit(FlipEvent::DisplayChanged {
            previous,
            current: mode,
        });
        true
    }

    /// Jump to page `page`.
    ///
    /// Out-of-range pages are an error. While a page is moving the request is
    /// accepted but the cursor stays put.
    pub fn set_page(&mut self, page: u32) -> Result<()> {
        if !self.in_range(page) {
            return Err(FlipError::PageOutOfRange {
                page,
                total: self.total_pages,
            });
        }
        if self.is_dragging() {
            tracing::debug!(page, "page change ignored mid-turn");
            return Ok(());
        }
        if page != self.current {
            self.go_to(page);
        }
        Ok(())
    }

    /// Visible page numbers for the current page and display mode
    pub fn view(&self) -> View {
        view(self.current, self.display)
    }

    /// Step to the page after the view; a no-op at the end or mid-turn
    pub fn next(&mut self) -> bool {
        if self.is_dragging() {
            return false;
        }
        let Some(last) = self.view().iter().max().copied() else {
            return false;
        };
        let Some(target) = last.checked_add(1).filter(|p| self.in_range(*p)) else {
            return false;
        };
        self.go_to(target);
        true
    }

    /// Step to the spread before the view; a no-op at the start or mid-turn.
    ///
    /// The target is the page just before the view; in double mode the
    /// cursor lands on the leading (odd) page of that spread.
    pub fn previous(&mut self) -> bool {
        if self.is_dragging() {
            return false;
        }
        let Some(first) = self.view().iter().min().copied() else {
            return false;
        };
        let Some(target) = first.checked_sub(1).filter(|p| self.in_range(*p)) else {
            return false;
        };
        let landing = view(target, self.display)
            .first()
            .copied()
            .filter(|p| self.in_range(*p))
            .unwrap_or(target);
        self.go_to(landing);
        true
    }

    /// Start dragging the page under `corner`.
    ///
    /// Right corners anchor the last page of the view and turn forward; left
    /// corners anchor the first and turn backward. Rejected while disabled,
    /// while another page is moving, or when there is no page to turn to.
    pub fn start_flip(&mut self, corner: Corner) -> bool {
        if self.disabled || !self.moving.is_empty() {
            return false;
        }

        let view = self.view();
        let anchored = if corner.is_right() {
            view[view.len() - 1]
        } else {
            view[0]
        };
        let adjacent = if corner.is_right() {
            anchored.checked_add(1)
        } else {
            anchored.checked_sub(1)
        };
        let Some(adjacent) = adjacent.filter(|p| self.in_range(*p)) else {
            return false;
        };
        let Some(wrapper) = self.pages.get(&anchored).map(|p| p.wrapper) else {
            return false;
        };

        self.settle.supersede(&mut self.surface);
        self.moving.insert(anchored);
        self.surface.apply(RenderPatch::SetZIndex {
            region: wrapper,
            z_index: Z_MOVING,
        });
        self.surface.apply(RenderPatch::SetVisible {
            region: wrapper,
            visible: true,
        });

        // Reveal the page being turned to beneath the anchored one
        let page_size = self.page_size();
        let slot_x = self.slot_x(anchored);
        if let Some(under) = self.pages.get(&adjacent).map(|p| p.wrapper) {
            self.surface.apply(RenderPatch::SetPosition {
                region: under,
                position: Point::new(slot_x, 0.0),
            });
            self.surface.apply(RenderPatch::SetZIndex {
                region: under,
                z_index: Z_HIDDEN,
            });
            self.surface.apply(RenderPatch::SetVisible {
                region: under,
                visible: true,
            });
        }

        let fold = Fold::corner_offset(Some(corner), corner.point_on(page_size), page_size);
        self.apply_fold(anchored, &fold);
        self.drag = Some(Drag {
            page: anchored,
            corner,
            fold,
        });

        tracing::debug!(page = anchored, corner = %corner, "flip started");
        self.events.emit(FlipEvent::FlipStart {
            page: anchored,
            corner,
        });
        true
    }

    /// Follow the pointer (book coordinates) with the moving page.
    ///
    /// The corner is detected again from `point` on every call; outside every
    /// zone the fold collapses to zero. Returns the fold progress.
    pub fn update_flip(&mut self, point: Point) -> Option<f32> {
        let page = self.drag.as_ref()?.page;
        let page_size = self.page_size();
        let local = Point::new(point.x - self.slot_x(page), point.y);

        let corner = corner::detect(
            local,
            page_size,
            self.options.corner_size,
            self.options.corners.allowed(),
        );
        let fold = Fold::corner_offset(corner, local, page_size);
        self.apply_fold(page, &fold);
        if let Some(drag) = self.drag.as_mut() {
            drag.fold = fold;
        }

        let progress = fold.progress(page_size.width);
        self.events.emit(FlipEvent::FlipMove { page, progress });
        Some(progress)
    }

    /// Release the moving page and commit the turn.
    ///
    /// Any drag commits: in double mode an even page lands on `page - 1` and
    /// an odd one on `page + 1`; in single mode the page stays. Returns the
    /// landing target.
    pub fn complete_flip(&mut self) -> Option<u32> {
        let drag = self.drag.take()?;
        let page = self.pages.get(&drag.page).cloned();

        if let Some(page) = &page {
            self.surface.apply(RenderPatch::SetTransition {
                region: page.wrapper,
                duration_ms: self.options.duration,
            });
            self.set_transform(page.wrapper, Transform::identity());
            if let Some(shadow) = page.shadow {
                self.surface.apply(RenderPatch::SetGradient {
                    region: shadow,
                    css: None,
                });
            }
        }

        let target = match self.display {
            DisplayMode::Double if drag.page % 2 == 0 => drag.page - 1,
            DisplayMode::Double => drag.page.saturating_add(1),
            DisplayMode::Single => drag.page,
        };

        self.moving.clear();
        if self.in_range(target) && target != self.current {
            self.go_to(target);
        } else if self.ready {
            self.update_positions();
        }

        if let Some(page) = &page {
            self.settle
                .schedule(&mut self.surface, page.wrapper, self.options.duration);
        }

        tracing::debug!(page = drag.page, corner = %drag.corner, landing = target, "flip completed");
        self.events.emit(FlipEvent::FlipComplete {
            page: drag.page,
            target,
        });
        Some(target)
    }

    /// Pointer path for an animated turn from `corner` across the spread,
    /// `steps + 1` points in book coordinates
    pub fn turn_path(&mut self, corner: Corner, steps: usize) -> Vec<Point> {
        let page_size = self.page_size();
        let start = corner.point_on(page_size);
        let span = if corner.is_right() {
            -2.0 * page_size.width
        } else {
            2.0 * page_size.width
        };
        let lift = if corner.is_bottom() {
            -0.25 * page_size.height
        } else {
            0.25 * page_size.height
        };

        let curve = CubicBezier::new(
            start,
            Point::new(start.x + span * 0.25, start.y + lift),
            Point::new(start.x + span * 0.75, start.y + lift),
            Point::new(start.x + span, start.y),
        );
        let offset_x = match self.display {
            DisplayMode::Double if corner.is_right() => page_size.width,
            _ => 0.0,
        };

        self.bezier
            .sample(&curve, steps)
            .into_iter()
            .map(|p| Point::new(p.x + offset_x, p.y))
            .collect()
    }

    /// Refresh page sizes from the container and reposition
    pub fn resize(&mut self) -> Size {
        let size = self.size();
        self.resize_wrappers();
        if self.ready {
            self.update_positions();
        }
        size
    }

    /// Block new drags; a drag in progress is left to finish
    pub fn disable(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Host callback for a scheduled settle timer
    pub fn timer_fired(&mut self, token: TimerToken) -> bool {
        self.settle.fire(&mut self.surface, token)
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&FlipEvent) + 'static) -> SubscriptionId {
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    pub fn current_page(&self) -> u32 {
        self.current
    }

    pub fn page_count(&self) -> u32 {
        self.total_pages
    }

    pub fn display(&self) -> DisplayMode {
        self.display
    }

    pub fn has_page(&self, page: u32) -> bool {
        self.pages.contains_key(&page)
    }

    pub fn page(&self, page: u32) -> Option<&Page> {
        self.pages.get(&page)
    }

    /// Pages in motion, in ascending order
    pub fn moving_pages(&self) -> Vec<u32> {
        let mut pages: Vec<u32> = self.moving.iter().copied().collect();
        pages.sort_unstable();
        pages
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Book size: the configured override or the container's live size
    pub fn size(&self) -> Size {
        self.options
            .size_override()
            .unwrap_or_else(|| self.surface.dimensions(self.container))
    }

    /// Size of one page: the whole book in single mode, half in double
    pub fn page_size(&self) -> Size {
        let size = self.size();
        match self.display {
            DisplayMode::Single => size,
            DisplayMode::Double => Size::new(size.width / 2.0, size.height),
        }
    }

    fn in_range(&self, page: u32) -> bool {
        (1..=self.total_pages).contains(&page)
    }

    fn go_to(&mut self, page: u32) {
        let previous = self.current;
        self.current = page;
        if self.ready {
            self.update_positions();
        }
        tracing::debug!(previous, current = page, "page changed");
        self.events.emit(FlipEvent::PageChanged {
            previous,
            current: page,
        });
    }

    /// Horizontal offset of `page`'s slot in the current view
    fn slot_x(&self, page: u32) -> f32 {
        match slot_in(&self.view(), page, self.display) {
            Some(Slot::Right) => self.page_size().width,
            _ => 0.0,
        }
    }

    fn resize_wrappers(&mut self) {
        let page_size = self.page_size();
        for page in self.pages.values() {
            self.surface.apply(RenderPatch::SetSize {
                region: page.wrapper,
                size: page_size,
            });
            if let Some(shadow) = page.shadow {
                self.surface.apply(RenderPatch::SetSize {
                    region: shadow,
                    size: page_size,
                });
            }
        }
    }

    /// Show and place the pages of the view, hide the rest
    fn update_positions(&mut self) {
        let view = self.view();
        let page_width = self.page_size().width;

        for page in self.pages.values() {
            match slot_in(&view, page.number, self.display) {
                Some(slot) => {
                    let x = if slot == Slot::Right { page_width } else { 0.0 };
                    self.surface.apply(RenderPatch::SetPosition {
                        region: page.wrapper,
                        position: Point::new(x, 0.0),
                    });
                    self.surface.apply(RenderPatch::SetZIndex {
                        region: page.wrapper,
                        z_index: Z_VISIBLE,
                    });
                    self.surface.apply(RenderPatch::SetVisible {
                        region: page.wrapper,
                        visible: true,
                    });
                }
                None => {
                    self.surface.apply(RenderPatch::SetZIndex {
                        region: page.wrapper,
                        z_index: Z_HIDDEN,
                    });
                    self.surface.apply(RenderPatch::SetVisible {
                        region: page.wrapper,
                        visible: false,
                    });
                }
            }
        }
    }

    fn apply_fold(&mut self, page: u32, fold: &Fold) {
        let Some((wrapper, shadow)) = self.pages.get(&page).map(|p| (p.wrapper, p.shadow)) else {
            return;
        };

        let accelerated = self.capabilities.accelerate(self.options.acceleration);
        self.set_transform(wrapper, fold.transform(accelerated));
        if let Some(shadow) = shadow {
            self.surface.apply(RenderPatch::SetGradient {
                region: shadow,
                css: Some(Shade::from_angle(fold.angle).to_css()),
            });
        }
    }

    fn set_transform(&mut self, region: RegionId, transform: Transform) {
        self.surface.apply(RenderPatch::SetTransform {
            region,
            property: self.capabilities.property("transform"),
            transform: transform.to_css(),
            origin: transform.origin_css(),
        });
    }
}
