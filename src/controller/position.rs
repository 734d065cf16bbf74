//! PositionController: keeps one floating panel placed while it is open.
//!
//! The controller is a two-state machine. Opening subscribes to resize,
//! scroll and layout events on the [`EventHub`] and runs the first placement;
//! closing drops every subscription and clears the computed style. While
//! open, each event re-measures the mounted elements and re-invokes the
//! positioning engine. Elements that cannot be measured yet leave the
//! controller pending until a later event.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{debug, trace};

use super::element::{measurable, ElementRef, Measure};
use super::options::{PositionOptions, ScrollBehavior, Strategy};
use crate::event::{EventHub, HostEvent, ListenerKind, Subscription};
use crate::geometry::Offset;
use crate::placement::{calculate_optimal_position, Align, PlacementResult, Side};

// ---------------------------------------------------------------------------
// Exposed state
// ---------------------------------------------------------------------------

/// Whether the floating panel is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    #[default]
    Closed,
    Open,
}

/// Position to apply to the rendered floating panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FloatingStyle {
    pub strategy: Strategy,
    pub left: i32,
    pub top: i32,
}

impl FloatingStyle {
    #[inline]
    pub const fn offset(&self) -> Offset {
        Offset::new(self.left, self.top)
    }
}

/// Snapshot of everything a consumer renders from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PositionState {
    pub phase: Phase,
    /// `None` while closed and until the first placement. A later pending
    /// pass keeps the last style.
    pub style: Option<FloatingStyle>,
    /// Side actually used; the preferred side until a placement exists.
    pub resolved_side: Side,
    /// Alignment actually used; the preferred one until a placement exists.
    pub resolved_align: Align,
    /// Open but waiting for measurable elements.
    pub pending: bool,
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

struct Inner {
    hub: EventHub,
    viewport: Rc<dyn Measure>,
    options: PositionOptions,
    reference: ElementRef,
    floating: ElementRef,
    containing_block: ElementRef,
    phase: Phase,
    placement: Option<PlacementResult>,
    style: Option<FloatingStyle>,
    pending: bool,
    subscriptions: Vec<Subscription>,
    on_change: Option<Box<dyn FnMut(&PositionState)>>,
    on_close_request: Option<Box<dyn FnMut()>>,
}

impl Inner {
    fn snapshot(&self) -> PositionState {
        PositionState {
            phase: self.phase,
            style: self.style,
            resolved_side: self.placement.map_or(self.options.side, |p| p.side),
            resolved_align: self.placement.map_or(self.options.align, |p| p.align),
            pending: self.pending,
        }
    }
}

/// Everything a placement pass reads, cloned out so measuring runs unborrowed.
struct Inputs {
    viewport: Rc<dyn Measure>,
    reference: ElementRef,
    floating: ElementRef,
    containing_block: ElementRef,
    options: PositionOptions,
}

impl Inputs {
    /// Measure and place; `None` when something is not measurable yet.
    fn place(&self) -> Option<(PlacementResult, FloatingStyle)> {
        let viewport = measurable(self.viewport.measure())?;
        let reference = self.reference.measure()?;
        let floating = self.floating.measure()?;

        let request = self.options.request(reference, floating.size(), viewport);
        let result = calculate_optimal_position(&request);

        let origin = match self.options.strategy {
            Strategy::Fixed => Offset::default(),
            Strategy::Absolute => self
                .containing_block
                .measure()
                .map_or(viewport.offset(), |block| block.offset()),
        };
        let position = result.offset() - origin;
        let style = FloatingStyle {
            strategy: self.options.strategy,
            left: position.x,
            top: position.y,
        };
        Some((result, style))
    }
}

fn inputs(inner: &Rc<RefCell<Inner>>) -> Option<Inputs> {
    let this = inner.borrow();
    if this.phase != Phase::Open {
        return None;
    }
    Some(Inputs {
        viewport: Rc::clone(&this.viewport),
        reference: this.reference.clone(),
        floating: this.floating.clone(),
        containing_block: this.containing_block.clone(),
        options: this.options,
    })
}

fn reposition(inner: &Rc<RefCell<Inner>>) {
    let Some(inputs) = inputs(inner) else {
        return;
    };
    let outcome = inputs.place();

    let changed = {
        let mut this = inner.borrow_mut();
        // A callback inside measurement may have closed us.
        if this.phase != Phase::Open {
            return;
        }
        let before = this.snapshot();
        match outcome {
            Some((result, style)) => {
                this.placement = Some(result);
                this.style = Some(style);
                this.pending = false;
            }
            None => {
                trace!("floating element not measurable, deferring placement");
                this.pending = true;
            }
        }
        this.snapshot() != before
    };

    if changed {
        notify_change(inner);
    }
}

fn notify_change(inner: &Rc<RefCell<Inner>>) {
    let (callback, state) = {
        let mut this = inner.borrow_mut();
        (this.on_change.take(), this.snapshot())
    };
    if let Some(mut callback) = callback {
        callback(&state);
        let mut this = inner.borrow_mut();
        if this.on_change.is_none() {
            this.on_change = Some(callback);
        }
    }
}

fn request_close(inner: &Rc<RefCell<Inner>>) {
    debug!("scroll while open, requesting close");
    let callback = inner.borrow_mut().on_close_request.take();
    if let Some(mut callback) = callback {
        callback();
        let mut this = inner.borrow_mut();
        if this.on_close_request.is_none() {
            this.on_close_request = Some(callback);
        }
    }
}

fn handle_event(inner: &Rc<RefCell<Inner>>, event: &HostEvent) {
    match event.kind() {
        ListenerKind::Resize | ListenerKind::Layout => reposition(inner),
        ListenerKind::Scroll => {
            let behavior = inner.borrow().options.scroll_behavior;
            match behavior {
                ScrollBehavior::Reposition => reposition(inner),
                ScrollBehavior::Close => request_close(inner),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// PositionController
// ---------------------------------------------------------------------------

/// Measures a reference and a floating element and keeps the floating one
/// placed while open.
///
/// Each controller owns its own subscriptions; dropping it removes them.
pub struct PositionController {
    inner: Rc<RefCell<Inner>>,
}

impl PositionController {
    /// Create a closed controller.
    ///
    /// `viewport` is measured on every pass, so a shared cell or closure lets
    /// the host report resizes.
    pub fn new(hub: &EventHub, viewport: impl Measure + 'static, options: PositionOptions) -> Self {
        let inner = Inner {
            hub: hub.clone(),
            viewport: Rc::new(viewport),
            options,
            reference: ElementRef::new(),
            floating: ElementRef::new(),
            containing_block: ElementRef::new(),
            phase: Phase::Closed,
            placement: None,
            style: None,
            pending: false,
            subscriptions: Vec::new(),
            on_change: None,
            on_close_request: None,
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    // ── Element slots ────────────────────────────────────────────────

    /// Slot for the anchor element.
    pub fn reference_ref(&self) -> ElementRef {
        self.inner.borrow().reference.clone()
    }

    /// Slot for the floating panel.
    pub fn floating_ref(&self) -> ElementRef {
        self.inner.borrow().floating.clone()
    }

    /// Slot for the containing block used by [`Strategy::Absolute`].
    pub fn containing_block_ref(&self) -> ElementRef {
        self.inner.borrow().containing_block.clone()
    }

    // ── Configuration ────────────────────────────────────────────────

    pub fn options(&self) -> PositionOptions {
        self.inner.borrow().options
    }

    /// Replace the options; an open controller re-places immediately.
    pub fn set_options(&self, options: PositionOptions) {
        self.inner.borrow_mut().options = options;
        reposition(&self.inner);
    }

    /// Called with the new state whenever the exposed state changes.
    pub fn on_change(&self, callback: impl FnMut(&PositionState) + 'static) {
        self.inner.borrow_mut().on_change = Some(Box::new(callback));
    }

    /// Called when a scroll should close the panel ([`ScrollBehavior::Close`]).
    ///
    /// The controller stays open; closing is the consumer's decision.
    pub fn on_close_request(&self, callback: impl FnMut() + 'static) {
        self.inner.borrow_mut().on_close_request = Some(Box::new(callback));
    }

    // ── State machine ────────────────────────────────────────────────

    /// Drive the open flag. Repeating the current value is a no-op.
    pub fn set_open(&self, open: bool) {
        let phase = self.inner.borrow().phase;
        match (phase, open) {
            (Phase::Closed, true) => self.open(),
            (Phase::Open, false) => self.close(),
            _ => {}
        }
    }

    fn open(&self) {
        let hub = self.inner.borrow().hub.clone();
        let subscriptions: Vec<Subscription> = [
            ListenerKind::Resize,
            ListenerKind::Scroll,
            ListenerKind::Layout,
        ]
        .into_iter()
        .map(|kind| {
            let weak: Weak<RefCell<Inner>> = Rc::downgrade(&self.inner);
            hub.listen(kind, move |event| {
                if let Some(inner) = weak.upgrade() {
                    handle_event(&inner, event);
                }
            })
        })
        .collect();

        {
            let mut this = self.inner.borrow_mut();
            this.phase = Phase::Open;
            this.subscriptions = subscriptions;
        }
        debug!("floating element opened");

        // Closed state has no style and is never pending, so this first pass
        // always changes the exposed state and notifies.
        reposition(&self.inner);
    }

    fn close(&self) {
        let subscriptions = {
            let mut this = self.inner.borrow_mut();
            this.phase = Phase::Closed;
            this.placement = None;
            this.style = None;
            this.pending = false;
            std::mem::take(&mut this.subscriptions)
        };
        drop(subscriptions);
        debug!("floating element closed");
        notify_change(&self.inner);
    }

    /// Re-measure and re-place now (e.g. after the panel's content changed).
    pub fn update(&self) {
        reposition(&self.inner);
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn is_open(&self) -> bool {
        self.inner.borrow().phase == Phase::Open
    }

    pub fn is_pending(&self) -> bool {
        self.inner.borrow().pending
    }

    pub fn state(&self) -> PositionState {
        self.inner.borrow().snapshot()
    }

    pub fn style(&self) -> Option<FloatingStyle> {
        self.inner.borrow().style
    }

    /// The last engine result, if placed.
    pub fn placement(&self) -> Option<PlacementResult> {
        self.inner.borrow().placement
    }

    pub fn resolved_side(&self) -> Side {
        self.state().resolved_side
    }

    pub fn resolved_align(&self) -> Align {
        self.state().resolved_align
    }
}

impl fmt::Debug for PositionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let this = self.inner.borrow();
        f.debug_struct("PositionController")
            .field("phase", &this.phase)
            .field("style", &this.style)
            .field("pending", &this.pending)
            .field("subscriptions", &this.subscriptions.len())
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Region, Size};
    use pretty_assertions::assert_eq;
    use std::cell::Cell;

    const SCREEN: Region = Region::new(0, 0, 80, 24);

    fn controller(hub: &EventHub, options: PositionOptions) -> PositionController {
        let ctl = PositionController::new(hub, SCREEN, options);
        ctl.reference_ref().mount(Region::new(10, 10, 4, 2));
        ctl.floating_ref().mount(Region::new(0, 0, 6, 3));
        ctl
    }

    fn start_options() -> PositionOptions {
        PositionOptions::new()
            .with_align(Align::Start)
            .with_side_offset(1)
    }

    fn fixed(left: i32, top: i32) -> Option<FloatingStyle> {
        Some(FloatingStyle { strategy: Strategy::Fixed, left, top })
    }

    // ── Open / close ─────────────────────────────────────────────────

    #[test]
    fn starts_closed_without_listeners() {
        let hub = EventHub::new();
        let ctl = controller(&hub, start_options());
        assert!(!ctl.is_open());
        assert_eq!(ctl.style(), None);
        assert_eq!(hub.listener_count(), 0);
        assert_eq!(ctl.state(), PositionState {
            resolved_align: Align::Start,
            ..PositionState::default()
        });
    }

    #[test]
    fn opening_places_and_subscribes() {
        let hub = EventHub::new();
        let ctl = controller(&hub, start_options());
        ctl.set_open(true);

        assert!(ctl.is_open());
        assert_eq!(ctl.style(), fixed(10, 13));
        assert_eq!(ctl.resolved_side(), Side::Bottom);
        assert_eq!(ctl.resolved_align(), Align::Start);
        assert_eq!(hub.listener_count_of(ListenerKind::Resize), 1);
        assert_eq!(hub.listener_count_of(ListenerKind::Scroll), 1);
        assert_eq!(hub.listener_count_of(ListenerKind::Layout), 1);
    }

    #[test]
    fn closing_clears_style_and_listeners() {
        let hub = EventHub::new();
        let ctl = controller(&hub, start_options());
        ctl.set_open(true);
        ctl.set_open(false);

        assert!(!ctl.is_open());
        assert_eq!(ctl.style(), None);
        assert_eq!(ctl.placement(), None);
        assert_eq!(hub.listener_count(), 0);
    }

    #[test]
    fn repeated_open_is_idempotent() {
        let hub = EventHub::new();
        let ctl = controller(&hub, start_options());
        ctl.set_open(true);
        ctl.set_open(true);
        assert_eq!(hub.listener_count(), 3);
        ctl.set_open(false);
        ctl.set_open(false);
        assert_eq!(hub.listener_count(), 0);
    }

    #[test]
    fn reopening_resubscribes() {
        let hub = EventHub::new();
        let ctl = controller(&hub, start_options());
        for _ in 0..3 {
            ctl.set_open(true);
            assert_eq!(hub.listener_count(), 3);
            ctl.set_open(false);
            assert_eq!(hub.listener_count(), 0);
        }
    }

    #[test]
    fn dropping_controller_removes_listeners() {
        let hub = EventHub::new();
        let ctl = controller(&hub, start_options());
        ctl.set_open(true);
        drop(ctl);
        assert_eq!(hub.listener_count(), 0);
        // Events after drop reach nobody.
        assert_eq!(hub.emit(&HostEvent::Layout), 0);
    }

    // ── Events ───────────────────────────────────────────────────────

    #[test]
    fn resize_repositions() {
        let hub = EventHub::new();
        let viewport = Rc::new(Cell::new(SCREEN));
        let ctl = PositionController::new(&hub, viewport.clone(), start_options());
        ctl.reference_ref().mount(Region::new(10, 10, 4, 2));
        ctl.floating_ref().mount(Region::new(0, 0, 6, 3));
        ctl.set_open(true);
        assert_eq!(ctl.resolved_side(), Side::Bottom);

        // Only 14 rows left: 2 below the anchor, 10 above.
        viewport.set(Region::new(0, 0, 80, 14));
        hub.emit(&HostEvent::Resize(Size::new(80, 14)));
        assert_eq!(ctl.resolved_side(), Side::Top);
        assert_eq!(ctl.style(), fixed(10, 6));
    }

    #[test]
    fn scroll_repositions_by_default() {
        let hub = EventHub::new();
        let anchor = Rc::new(Cell::new(Region::new(10, 10, 4, 2)));
        let ctl = PositionController::new(&hub, SCREEN, start_options());
        ctl.reference_ref().mount(anchor.clone());
        ctl.floating_ref().mount(Region::new(0, 0, 6, 3));
        ctl.set_open(true);

        anchor.set(Region::new(10, 7, 4, 2));
        hub.emit(&HostEvent::Scroll { delta: Offset::new(0, 3) });
        assert_eq!(ctl.style(), fixed(10, 10));
    }

    #[test]
    fn scroll_requests_close_under_close_policy() {
        let hub = EventHub::new();
        let ctl = controller(
            &hub,
            start_options().with_scroll_behavior(ScrollBehavior::Close),
        );
        let requests = Rc::new(Cell::new(0));
        let requests_c = requests.clone();
        ctl.on_close_request(move || requests_c.set(requests_c.get() + 1));
        ctl.set_open(true);
        let before = ctl.state();

        hub.emit(&HostEvent::Scroll { delta: Offset::new(0, 1) });
        assert_eq!(requests.get(), 1);
        // Still open and unchanged: the consumer decides.
        assert_eq!(ctl.state(), before);

        ctl.set_open(false);
        hub.emit(&HostEvent::Scroll { delta: Offset::new(0, 1) });
        assert_eq!(requests.get(), 1);
    }

    #[test]
    fn close_request_may_close_synchronously() {
        let hub = EventHub::new();
        let ctl = Rc::new(controller(
            &hub,
            start_options().with_scroll_behavior(ScrollBehavior::Close),
        ));
        let weak = Rc::downgrade(&ctl);
        ctl.on_close_request(move || {
            if let Some(ctl) = weak.upgrade() {
                ctl.set_open(false);
            }
        });
        ctl.set_open(true);
        hub.emit(&HostEvent::Scroll { delta: Offset::new(0, 1) });
        assert!(!ctl.is_open());
        assert_eq!(hub.listener_count(), 0);
    }

    // ── Deferred measurement ─────────────────────────────────────────

    #[test]
    fn unmounted_floating_defers_until_layout() {
        let hub = EventHub::new();
        let ctl = PositionController::new(&hub, SCREEN, start_options());
        ctl.reference_ref().mount(Region::new(10, 10, 4, 2));
        ctl.set_open(true);

        assert!(ctl.is_open());
        assert!(ctl.is_pending());
        assert_eq!(ctl.style(), None);

        ctl.floating_ref().mount(Region::new(0, 0, 6, 3));
        hub.emit(&HostEvent::Layout);
        assert!(!ctl.is_pending());
        assert_eq!(ctl.style(), fixed(10, 13));
    }

    #[test]
    fn zero_rect_reference_defers() {
        let hub = EventHub::new();
        let ctl = PositionController::new(&hub, SCREEN, start_options());
        ctl.reference_ref().mount(Region::EMPTY);
        ctl.floating_ref().mount(Region::new(0, 0, 6, 3));
        ctl.set_open(true);
        assert!(ctl.is_pending());

        ctl.reference_ref().mount(Region::new(1, 1, 2, 1));
        ctl.update();
        assert_eq!(ctl.style(), fixed(1, 3));
    }

    #[test]
    fn unmounting_while_open_keeps_last_style() {
        let hub = EventHub::new();
        let ctl = controller(&hub, start_options());
        ctl.set_open(true);
        ctl.reference_ref().unmount();
        hub.emit(&HostEvent::Layout);
        assert!(ctl.is_pending());
        assert_eq!(ctl.style(), fixed(10, 13));
    }

    // ── Strategy / options ───────────────────────────────────────────

    #[test]
    fn absolute_strategy_is_relative_to_containing_block() {
        let hub = EventHub::new();
        let ctl = controller(&hub, start_options().with_strategy(Strategy::Absolute));
        ctl.containing_block_ref().mount(Region::new(5, 4, 40, 20));
        ctl.set_open(true);
        assert_eq!(
            ctl.style(),
            Some(FloatingStyle { strategy: Strategy::Absolute, left: 5, top: 9 })
        );
    }

    #[test]
    fn absolute_without_block_uses_viewport_origin() {
        let hub = EventHub::new();
        let ctl = PositionController::new(
            &hub,
            Region::new(2, 1, 80, 24),
            start_options().with_strategy(Strategy::Absolute),
        );
        ctl.reference_ref().mount(Region::new(10, 10, 4, 2));
        ctl.floating_ref().mount(Region::new(0, 0, 6, 3));
        ctl.set_open(true);
        assert_eq!(ctl.style().map(|s| s.offset()), Some(Offset::new(8, 12)));
    }

    #[test]
    fn set_options_repositions_when_open() {
        let hub = EventHub::new();
        let ctl = controller(&hub, start_options());
        ctl.set_open(true);
        ctl.set_options(start_options().with_side(Side::Top));
        assert_eq!(ctl.resolved_side(), Side::Top);
        assert_eq!(ctl.style(), fixed(10, 6));
    }

    // ── Change notification ──────────────────────────────────────────

    #[test]
    fn on_change_reports_transitions_and_moves_only() {
        let hub = EventHub::new();
        let anchor = Rc::new(Cell::new(Region::new(10, 10, 4, 2)));
        let ctl = PositionController::new(&hub, SCREEN, start_options());
        ctl.reference_ref().mount(anchor.clone());
        ctl.floating_ref().mount(Region::new(0, 0, 6, 3));

        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_c = seen.clone();
        ctl.on_change(move |state| seen_c.borrow_mut().push(state.style));

        ctl.set_open(true);
        hub.emit(&HostEvent::Layout); // nothing moved
        anchor.set(Region::new(12, 10, 4, 2));
        hub.emit(&HostEvent::Layout);
        ctl.set_open(false);

        assert_eq!(*seen.borrow(), vec![fixed(10, 13), fixed(12, 13), None]);
    }

    #[test]
    fn on_change_reports_pending_open() {
        let hub = EventHub::new();
        let ctl = PositionController::new(&hub, SCREEN, start_options());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_c = seen.clone();
        ctl.on_change(move |state| seen_c.borrow_mut().push((state.phase, state.pending)));
        ctl.set_open(true);
        assert_eq!(*seen.borrow(), vec![(Phase::Open, true)]);
    }

    #[test]
    fn independent_controllers_do_not_interact() {
        let hub = EventHub::new();
        let a = controller(&hub, start_options());
        let b = controller(&hub, start_options().with_side(Side::Right));
        a.set_open(true);
        b.set_open(true);
        assert_eq!(hub.listener_count(), 6);

        a.set_open(false);
        assert_eq!(hub.listener_count(), 3);
        assert!(b.is_open());
        assert_eq!(b.resolved_side(), Side::Right);
    }

    #[test]
    fn debug_format() {
        let hub = EventHub::new();
        let ctl = controller(&hub, start_options());
        ctl.set_open(true);
        let dbg = format!("{ctl:?}");
        assert!(dbg.contains("PositionController"));
        assert!(dbg.contains("subscriptions: 3"));
    }
}
