//! WASM bindings for the flip and book engines
//!
//! Both wrappers run their engine over a [`RecordingSurface`]. The host
//! drains the queued patches as JSON after each call, applies them to its
//! elements, reports element sizes back through `resize`, and echoes
//! `scheduleTimer` tokens through `timerFired`.

use crate::book::{Book, DisplayMode};
use crate::config::{BookOptions, FlipOptions};
use crate::corner::Corner;
use crate::events::{FlipEvent, SubscriptionId};
use crate::flip::FlipSession;
use crate::geometry::Capabilities;
use crate::render::{RecordingSurface, RegionId, RenderPatch, RenderSurface};
use crate::schedule::TimerToken;
use crate::{Point, Size};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Ask the browser's `CSS.supports` what the surface can do.
///
/// Outside a browser (no `CSS` global) this reports no 3D support.
pub fn probe_capabilities() -> Capabilities {
    let Some(css) = js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str("CSS"))
        .ok()
        .filter(|v| v.is_object())
    else {
        return Capabilities::default();
    };

    let transforms_3d = css_supports(&css, "transform", "translate3d(0px, 0px, 0px)")
        || css_supports(&css, "-webkit-transform", "translate3d(0px, 0px, 0px)");
    let capabilities = Capabilities::new(transforms_3d);

    if !css_supports(&css, "transform", "none") {
        for prefix in ["-webkit-", "-moz-", "-ms-", "-o-"] {
            if css_supports(&css, &format!("{}transform", prefix), "none") {
                return capabilities.with_prefix(prefix);
            }
        }
    }
    capabilities
}

fn css_supports(css: &JsValue, property: &str, value: &str) -> bool {
    js_sys::Reflect::get(css, &JsValue::from_str("supports"))
        .ok()
        .and_then(|f| f.dyn_into::<js_sys::Function>().ok())
        .and_then(|supports| {
            supports
                .call2(css, &JsValue::from_str(property), &JsValue::from_str(value))
                .ok()
        })
        .and_then(|result| result.as_bool())
        .unwrap_or(false)
}

fn patches_json(patches: Vec<RenderPatch>) -> Result<String, JsError> {
    Ok(serde_json::to_string(&patches)?)
}

/// Forward events to a JS callback as JSON strings
fn js_listener(callback: js_sys::Function) -> impl FnMut(&FlipEvent) + 'static {
    move |event| {
        if let Ok(json) = serde_json::to_string(event) {
            let _ = callback.call1(&JsValue::NULL, &JsValue::from_str(&json));
        }
    }
}

/// WASM-exposed single-surface flip
#[wasm_bindgen]
pub struct WasmFlip {
    session: FlipSession<RecordingSurface>,
    container: RegionId,
}

#[wasm_bindgen]
impl WasmFlip {
    /// Create a flip over a container of the given size.
    ///
    /// `options` is a JSON options object (`"{}"` for defaults).
    #[wasm_bindgen(constructor)]
    pub fn new(options: &str, width: f32, height: f32) -> Result<WasmFlip, JsError> {
        let options = FlipOptions::from_json(options)?;
        let mut surface = RecordingSurface::new(probe_capabilities());
        let container = surface.add_root(Size::new(width, height));
        let session = FlipSession::new(surface, container, options)?;
        Ok(Self { session, container })
    }

    pub fn start(&mut self, x: f32, y: f32) -> bool {
        self.session.start(Point::new(x, y))
    }

    #[wasm_bindgen(js_name = "move")]
    pub fn move_to(&mut self, x: f32, y: f32) -> bool {
        self.session.move_to(Point::new(x, y))
    }

    pub fn end(&mut self) -> bool {
        self.session.end()
    }

    /// Programmatic flip to `"tl"`, `"tr"`, `"bl"` or `"br"`
    pub fn flip(&mut self, corner: &str) -> Result<bool, JsError> {
        let corner: Corner = corner.parse()?;
        Ok(self.session.flip(corner))
    }

    /// Report a new container size; returns the wrapper diagonal
    pub fn resize(&mut self, width: f32, height: f32) -> f32 {
        let container = self.container;
        self.session
            .surface_mut()
            .set_dimensions(container, Size::new(width, height));
        self.session.resize()
    }

    pub fn disable(&mut self, disabled: bool) {
        self.session.disable(disabled);
    }

    #[wasm_bindgen(js_name = timerFired)]
    pub fn timer_fired(&mut self, token: u32) -> bool {
        self.session.timer_fired(TimerToken(token))
    }

    #[wasm_bindgen(js_name = isTurning)]
    pub fn is_turning(&self) -> bool {
        self.session.is_turning()
    }

    /// Region the host should render its content into
    #[wasm_bindgen(js_name = pageRegion)]
    pub fn page_region(&self) -> u32 {
        self.session.page_region().0
    }

    /// Drain queued patches (JSON array)
    #[wasm_bindgen(js_name = takePatches)]
    pub fn take_patches(&mut self) -> Result<String, JsError> {
        patches_json(self.session.surface_mut().take_patches())
    }

    /// Subscribe to events; `callback` receives one JSON string per event
    pub fn on(&mut self, callback: js_sys::Function) -> u32 {
        self.session.subscribe(js_listener(callback)).0
    }

    pub fn off(&mut self, subscription: u32) -> bool {
        self.session.unsubscribe(SubscriptionId(subscription))
    }
}

/// WASM-exposed paginated book
#[wasm_bindgen]
pub struct WasmBook {
    book: Book<RecordingSurface>,
    container: RegionId,
}

#[wasm_bindgen]
impl WasmBook {
    #[wasm_bindgen(constructor)]
    pub fn new(options: &str, width: f32, height: f32) -> Result<WasmBook, JsError> {
        let options = BookOptions::from_json(options)?;
        let mut surface = RecordingSurface::new(probe_capabilities());
        let container = surface.add_root(Size::new(width, height));
        let book = Book::new(surface, container, options)?;
        Ok(Self { book, container })
    }

    /// Allocate a region for page content; pass it to `addPage`
    #[wasm_bindgen(js_name = createContent)]
    pub fn create_content(&mut self) -> u32 {
        let container = self.container;
        self.book.surface_mut().create_region(container).0
    }

    #[wasm_bindgen(js_name = addPage)]
    pub fn add_page(&mut self, content: u32, index: Option<u32>) -> Result<u32, JsError> {
        Ok(self.book.add_page(RegionId(content), index)?)
    }

    /// `"single"` or `"double"`; anything else is an error
    #[wasm_bindgen(js_name = setDisplay)]
    pub fn set_display(&mut self, mode: &str) -> Result<bool, JsError> {
        let mode: DisplayMode = mode.parse()?;
        Ok(self.book.set_display(mode))
    }

    #[wasm_bindgen(js_name = setPage)]
    pub fn set_page(&mut self, page: u32) -> Result<(), JsError> {
        Ok(self.book.set_page(page)?)
    }

    pub fn view(&self) -> Vec<u32> {
        self.book.view().to_vec()
    }

    pub fn next(&mut self) -> bool {
        self.book.next()
    }

    pub fn previous(&mut self) -> bool {
        self.book.previous()
    }

    #[wasm_bindgen(js_name = startFlip)]
    pub fn start_flip(&mut self, corner: &str) -> Result<bool, JsError> {
        let corner: Corner = corner.parse()?;
        Ok(self.book.start_flip(corner))
    }

    #[wasm_bindgen(js_name = updateFlip)]
    pub fn update_flip(&mut self, x: f32, y: f32) -> Option<f32> {
        self.book.update_flip(Point::new(x, y))
    }

    #[wasm_bindgen(js_name = completeFlip)]
    pub fn complete_flip(&mut self) -> Option<u32> {
        self.book.complete_flip()
    }

    /// Pointer path for an animated turn, as a flat `[x0, y0, x1, y1, ...]`
    #[wasm_bindgen(js_name = turnPath)]
    pub fn turn_path(&mut self, corner: &str, steps: usize) -> Result<Vec<f32>, JsError> {
        let corner: Corner = corner.parse()?;
        Ok(self
            .book
            .turn_path(corner, steps)
            .into_iter()
            .flat_map(|p| [p.x, p.y])
            .collect())
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        let container = self.container;
        self.book
            .surface_mut()
            .set_dimensions(container, Size::new(width, height));
        self.book.resize();
    }

    pub fn disable(&mut self, disabled: bool) {
        self.book.disable(disabled);
    }

    #[wasm_bindgen(js_name = timerFired)]
    pub fn timer_fired(&mut self, token: u32) -> bool {
        self.book.timer_fired(TimerToken(token))
    }

    #[wasm_bindgen(js_name = currentPage)]
    pub fn current_page(&self) -> u32 {
        self.book.current_page()
    }

    #[wasm_bindgen(js_name = pageCount)]
    pub fn page_count(&self) -> u32 {
        self.book.page_count()
    }

    pub fn display(&self) -> String {
        self.book.display().to_string()
    }

    #[wasm_bindgen(js_name = takePatches)]
    pub fn take_patches(&mut self) -> Result<String, JsError> {
        patches_json(self.book.surface_mut().take_patches())
    }

    pub fn on(&mut self, callback: js_sys::Function) -> u32 {
        self.book.subscribe(js_listener(callback)).0
    }

    pub fn off(&mut self, subscription: u32) -> bool {
        self.book.unsubscribe(SubscriptionId(subscription))
    }
}
