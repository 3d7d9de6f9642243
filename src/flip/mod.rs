//! Single-surface flip: one surface peeled from a corner and settled back

use crate::config::FlipOptions;
use crate::corner::{self, Corner};
use crate::error::{FlipError, Result};
use crate::events::{EventBus, FlipEvent, SubscriptionId};
use crate::fold::{Fold, Shade};
use crate::geometry::{Capabilities, Transform};
use crate::render::{RegionId, RenderPatch, RenderSurface};
use crate::schedule::{SettleTimer, TimerToken};
use crate::{Point, Size};

/// State of a turn in progress
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoldSession {
    /// Where the interaction started
    pub start: Point,
    pub corner: Corner,
    /// Current fold angle in radians
    pub angle: f32,
    /// Current fold origin
    pub origin: Point,
}

impl FoldSession {
    fn new(start: Point, corner: Corner) -> Self {
        Self {
            start,
            corner,
            angle: 0.0,
            origin: Point::default(),
        }
    }
}

/// Flip state machine for a single surface: `idle -> turning -> idle`.
///
/// Region layout under the host's container:
/// `container > wrapper (diagonal square) > page (folding surface) > shadow`.
pub struct FlipSession<S: RenderSurface> {
    surface: S,
    options: FlipOptions,
    capabilities: Capabilities,
    container: RegionId,
    wrapper: RegionId,
    page: RegionId,
    shadow: Option<RegionId>,
    session: Option<FoldSession>,
    disabled: bool,
    settle: SettleTimer,
    events: EventBus,
}

impl<S: RenderSurface> FlipSession<S> {
    /// Build the region tree under `container` and lay it out.
    ///
    /// Fails if the surface has no such container.
    pub fn new(mut surface: S, container: RegionId, options: FlipOptions) -> Result<Self> {
        if !surface.has_region(container) {
            return Err(FlipError::MissingContainer(container));
        }

        let capabilities = surface.capabilities();
        let wrapper = surface.create_region(container);
        let page = surface.create_region(wrapper);
        let shadow = options.gradients.then(|| surface.create_region(page));

        let mut flip = Self {
            surface,
            options,
            capabilities,
            container,
            wrapper,
            page,
            shadow,
            session: None,
            disabled: false,
            settle: SettleTimer::new(),
            events: EventBus::new(),
        };
        flip.resize();
        Ok(flip)
    }

    /// Begin a turn if `point` lies in an allowed corner zone
    pub fn start(&mut self, point: Point) -> bool {
        if self.disabled || self.session.is_some() {
            return false;
        }

        let size = self.size();
        let Some(corner) = corner::detect(
            point,
            size,
            self.options.corner_size,
            self.options.corners.allowed(),
        ) else {
            return false;
        };

        self.settle.supersede(&mut self.surface);
        self.session = Some(FoldSession::new(point, corner));
        tracing::debug!(corner = %corner, x = point.x, y = point.y, "turn started");
        self.events.emit(FlipEvent::TurnStart { point, corner });
        true
    }

    /// Follow the pointer while turning
    pub fn move_to(&mut self, point: Point) -> bool {
        let Some(session) = self.session else {
            return false;
        };

        let fold = Fold::page_relative(Some(session.corner), session.start, point, self.size());
        self.apply_fold(&fold);
        self.session = Some(FoldSession {
            angle: fold.angle,
            origin: fold.origin,
            ..session
        });
        true
    }

    /// Finish the turn and settle back to the neutral transform.
    ///
    /// The settle runs on the renderer; a new `start` is accepted right away.
    pub fn end(&mut self) -> bool {
        let Some(session) = self.session.take() else {
            return false;
        };

        self.settle();
        tracing::debug!(corner = %session.corner, "turn ended");
        self.events.emit(FlipEvent::TurnEnd {
            point: session.start,
            corner: session.corner,
        });
        true
    }

    /// Turn fully to `corner` without intermediate frames, then settle
    pub fn flip(&mut self, corner: Corner) -> bool {
        if self.disabled || self.session.is_some() {
            return false;
        }

        let size = self.size();
        let point = corner.point_on(size);
        self.settle.supersede(&mut self.surface);
        self.events.emit(FlipEvent::TurnStart { point, corner });

        let fold = Fold::page_relative(Some(corner), point, point, size);
        self.apply_fold(&fold);
        self.settle();

        self.events.emit(FlipEvent::TurnEnd { point, corner });
        true
    }

    /// Size the wrapper to the surface diagonal so a full rotation never
    /// clips; returns the diagonal
    pub fn resize(&mut self) -> f32 {
        let size = self.size();
        let diagonal = size.diagonal();

        self.surface.apply(RenderPatch::SetSize {
            region: self.wrapper,
            size: Size::new(diagonal, diagonal),
        });
        self.surface.apply(RenderPatch::SetPosition {
            region: self.wrapper,
            position: Point::new((size.width - diagonal) / 2.0, (size.height - diagonal) / 2.0),
        });

        // Keep the page where it was, inside the larger wrapper
        self.surface.apply(RenderPatch::SetSize {
            region: self.page,
            size,
        });
        self.surface.apply(RenderPatch::SetPosition {
            region: self.page,
            position: Point::new((diagonal - size.width) / 2.0, (diagonal - size.height) / 2.0),
        });
        if let Some(shadow) = self.shadow {
            self.surface.apply(RenderPatch::SetSize {
                region: shadow,
                size,
            });
        }

        diagonal
    }

    /// Block new turns; a turn in progress is left to finish
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

    pub fn is_turning(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn session(&self) -> Option<&FoldSession> {
        self.session.as_ref()
    }

    /// The folding surface; hosts place their content in it
    pub fn page_region(&self) -> RegionId {
        self.page
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Live surface size, or the configured override
    pub fn size(&self) -> Size {
        self.options
            .size_override()
            .unwrap_or_else(|| self.surface.dimensions(self.container))
    }

    fn apply_fold(&mut self, fold: &Fold) {
        let accelerated = self.capabilities.accelerate(self.options.acceleration);
        self.set_transform(fold.transform(accelerated));

        if let Some(shadow) = self.shadow {
            self.surface.apply(RenderPatch::SetGradient {
                region: shadow,
                css: Some(Shade::from_angle(fold.angle).to_css()),
            });
        }
    }

    fn settle(&mut self) {
        self.surface.apply(RenderPatch::SetTransition {
            region: self.page,
            duration_ms: self.options.duration,
        });
        self.set_transform(Transform::identity());
        if let Some(shadow) = self.shadow {
            self.surface.apply(RenderPatch::SetGradient {
                region: shadow,
                css: None,
            });
        }
        self.settle
            .schedule(&mut self.surface, self.page, self.options.duration);
    }

    fn set_transform(&mut self, transform: Transform) {
        self.surface.apply(RenderPatch::SetTransform {
            region: self.page,
            property: self.capabilities.property("transform"),
            transform: transform.to_css(),
            origin: transform.origin_css(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corner::CornerPolicy;
    use crate::render::RecordingSurface;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn setup(options: FlipOptions) -> FlipSession<RecordingSurface> {
        let mut surface = RecordingSurface::new(Capabilities::new(true));
        let container = surface.add_root(Size::new(400.0, 300.0));
        FlipSession::new(surface, container, options).unwrap()
    }

    fn options() -> FlipOptions {
        FlipOptions {
            corner_size: 50.0,
            ..FlipOptions::default()
        }
    }

    fn capture(flip: &mut FlipSession<RecordingSurface>) -> Rc<RefCell<Vec<FlipEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        flip.subscribe(move |e| sink.borrow_mut().push(e.clone()));
        events
    }

    fn last_transform(flip: &FlipSession<RecordingSurface>) -> Option<String> {
        flip.surface()
            .patches()
            .iter()
            .rev()
            .find_map(|p| match p {
                RenderPatch::SetTransform { transform, .. } => Some(transform.clone()),
                _ => None,
            })
    }

    #[test]
    fn test_missing_container() {
        let surface = RecordingSurface::default();
        let result = FlipSession::new(surface, RegionId(42), FlipOptions::default());
        assert!(matches!(result, Err(FlipError::MissingContainer(RegionId(42)))));
    }

    #[test]
    fn test_start_requires_allowed_corner() {
        let mut flip = setup(options());
        // Center of the surface
        assert!(!flip.start(Point::new(200.0, 150.0)));
        // Top-left is not a forward corner
        assert!(!flip.start(Point::new(10.0, 10.0)));
        assert!(!flip.is_turning());

        assert!(flip.start(Point::new(390.0, 10.0)));
        assert_eq!(flip.session().unwrap().corner, Corner::TopRight);
    }

    #[test]
    fn test_turn_cycle_events() {
        let mut flip = setup(options());
        let events = capture(&mut flip);

        assert!(flip.start(Point::new(390.0, 290.0)));
        // Second start while turning is ignored
        assert!(!flip.start(Point::new(390.0, 10.0)));
        assert!(flip.move_to(Point::new(300.0, 250.0)));
        assert!(flip.end());
        assert!(!flip.end());
        assert!(!flip.is_turning());

        let events = events.borrow();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0],
            FlipEvent::TurnStart {
                point: Point::new(390.0, 290.0),
                corner: Corner::BottomRight
            }
        );
        assert_eq!(events[1].name(), "flipend");
    }

    #[test]
    fn test_move_updates_session_and_shadow() {
        let mut flip = setup(options());
        assert!(!flip.move_to(Point::new(1.0, 1.0)));

        flip.start(Point::new(390.0, 10.0));
        flip.move_to(Point::new(390.0, 60.0));

        let session = flip.session().unwrap();
        assert!((session.angle - std::f32::consts::FRAC_PI_2).abs() < 1e-4);
        assert!(last_transform(&flip).unwrap().starts_with("matrix3d("));
        assert!(flip
            .surface()
            .patches()
            .iter()
            .any(|p| matches!(p, RenderPatch::SetGradient { css: Some(_), .. })));
    }

    #[test]
    fn test_end_settles_and_timer_clears_transition() {
        let mut flip = setup(options());
        flip.start(Point::new(390.0, 10.0));
        flip.move_to(Point::new(300.0, 40.0));
        flip.surface_mut().take_patches();
        flip.end();

        let patches = flip.surface_mut().take_patches();
        let page = flip.page_region();
        assert!(patches.contains(&RenderPatch::SetTransition {
            region: page,
            duration_ms: 600
        }));
        assert!(patches.iter().any(|p| matches!(
            p,
            RenderPatch::SetTransform { transform, .. } if transform == "none"
        )));
        let token = patches
            .iter()
            .find_map(|p| match p {
                RenderPatch::ScheduleTimer { token, .. } => Some(*token),
                _ => None,
            })
            .unwrap();

        assert!(flip.timer_fired(token));
        assert_eq!(
            flip.surface().patches(),
            &[RenderPatch::SetTransition {
                region: page,
                duration_ms: 0
            }]
        );
        assert!(!flip.timer_fired(token));
    }

    #[test]
    fn test_restart_supersedes_settle() {
        let mut flip = setup(options());
        flip.start(Point::new(390.0, 10.0));
        flip.end();
        let token = flip
            .surface()
            .patches()
            .iter()
            .find_map(|p| match p {
                RenderPatch::ScheduleTimer { token, .. } => Some(*token),
                _ => None,
            })
            .unwrap();

        // Accepted immediately, even while the settle is still in flight
        assert!(flip.start(Point::new(390.0, 10.0)));
        assert!(!flip.timer_fired(token));
    }

    #[test]
    fn test_disable_blocks_start_but_not_turn() {
        let mut flip = setup(options());
        flip.disable(true);
        assert!(flip.is_disabled());
        assert!(!flip.start(Point::new(390.0, 10.0)));
        assert!(!flip.flip(Corner::BottomRight));
        assert!(!flip.is_turning());

        flip.disable(false);
        assert!(flip.start(Point::new(390.0, 10.0)));
        flip.disable(true);
        assert!(flip.move_to(Point::new(380.0, 20.0)));
        assert!(flip.end());
    }

    #[test]
    fn test_programmatic_flip() {
        let mut flip = setup(options());
        let events = capture(&mut flip);

        assert!(flip.flip(Corner::BottomRight));
        assert!(!flip.is_turning());

        let events = events.borrow();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0],
            FlipEvent::TurnStart {
                point: Point::new(400.0, 300.0),
                corner: Corner::BottomRight
            }
        );
        assert_eq!(last_transform(&flip).as_deref(), Some("none"));
    }

    #[test]
    fn test_resize_uses_diagonal() {
        let mut surface = RecordingSurface::new(Capabilities::new(false));
        let container = surface.add_root(Size::new(300.0, 400.0));
        let mut flip = FlipSession::new(surface, container, FlipOptions::default()).unwrap();
        flip.surface_mut().take_patches();

        assert_eq!(flip.resize(), 500.0);
        let patches = flip.surface().patches();
        assert_eq!(
            patches[0],
            RenderPatch::SetSize {
                region: flip.wrapper,
                size: Size::new(500.0, 500.0)
            }
        );
        assert_eq!(
            patches[1],
            RenderPatch::SetPosition {
                region: flip.wrapper,
                position: Point::new(-100.0, -50.0)
            }
        );
    }

    #[test]
    fn test_size_override_and_policy() {
        let mut flip = setup(FlipOptions {
            corner_size: 20.0,
            corners: CornerPolicy::All,
            width: Some(100.0),
            height: Some(100.0),
            ..FlipOptions::default()
        });
        assert_eq!(flip.size(), Size::new(100.0, 100.0));
        assert!(flip.start(Point::new(5.0, 95.0)));
        assert_eq!(flip.session().unwrap().corner, Corner::BottomLeft);
    }

    #[test]
    fn test_no_shadow_without_gradients() {
        let mut flip = setup(FlipOptions {
            gradients: false,
            ..options()
        });
        flip.start(Point::new(390.0, 10.0));
        flip.move_to(Point::new(350.0, 30.0));
        assert!(!flip
            .surface()
            .patches()
            .iter()
            .any(|p| matches!(p, RenderPatch::SetGradient { .. })));
    }
}
