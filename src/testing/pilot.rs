//! Pilot: programmatic interaction with a headless positioning setup.
//!
//! The `Pilot` owns an [`EventHub`], a viewport, a reference element and a
//! floating element, all wired into one [`PositionController`]. It simulates
//! host events (resize, scroll, layout) and renders the current placement to
//! text for snapshot testing.

use std::cell::Cell;
use std::rc::Rc;

use crate::controller::{FloatingStyle, PositionController, PositionOptions, PositionState};
use crate::event::{EventHub, HostEvent};
use crate::geometry::{Offset, Region, Size};
use crate::placement::{Align, Side};

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless controller driver for testing.
///
/// Acts as the consumer of the controller: it closes the panel when the
/// controller requests it, and counts state changes.
///
/// # Examples
///
/// ```
/// use gilt_float::geometry::Region;
/// use gilt_float::testing::Pilot;
///
/// let pilot = Pilot::new(12, 6);
/// pilot.mount_reference(Region::new(4, 1, 2, 1));
/// pilot.mount_floating(4, 2);
/// pilot.open();
/// assert_eq!(pilot.floating_region(), Some(Region::new(3, 2, 4, 2)));
/// ```
pub struct Pilot {
    hub: EventHub,
    viewport: Rc<Cell<Region>>,
    reference: Rc<Cell<Region>>,
    floating: Rc<Cell<Region>>,
    controller: PositionController,
    changes: Rc<Cell<usize>>,
    close_requested: Rc<Cell<bool>>,
}

impl Pilot {
    /// Create a closed setup with a `width` x `height` viewport and default
    /// options. Neither element is mounted yet.
    pub fn new(width: i32, height: i32) -> Self {
        let hub = EventHub::new();
        let viewport = Rc::new(Cell::new(Region::new(0, 0, width, height)));
        let controller = PositionController::new(&hub, Rc::clone(&viewport), PositionOptions::default());

        let changes = Rc::new(Cell::new(0));
        let counter = Rc::clone(&changes);
        controller.on_change(move |_| counter.set(counter.get() + 1));

        let close_requested = Rc::new(Cell::new(false));
        let flag = Rc::clone(&close_requested);
        controller.on_close_request(move || flag.set(true));

        Self {
            hub,
            viewport,
            reference: Rc::new(Cell::new(Region::EMPTY)),
            floating: Rc::new(Cell::new(Region::EMPTY)),
            controller,
            changes,
            close_requested,
        }
    }

    /// Replace the controller options (builder).
    pub fn with_options(self, options: PositionOptions) -> Self {
        self.controller.set_options(options);
        self
    }

    // ── Elements ─────────────────────────────────────────────────────

    /// Mount the reference element at `region`.
    pub fn mount_reference(&self, region: Region) {
        self.reference.set(region);
        self.controller.reference_ref().mount(Rc::clone(&self.reference));
    }

    /// Mount a floating element of the given size.
    pub fn mount_floating(&self, width: i32, height: i32) {
        self.floating.set(Region::new(0, 0, width, height));
        self.controller.floating_ref().mount(Rc::clone(&self.floating));
    }

    /// Move the reference without telling anyone.
    pub fn move_reference(&self, region: Region) {
        self.reference.set(region);
    }

    /// Resize the floating element without telling anyone.
    pub fn resize_floating(&self, width: i32, height: i32) {
        self.floating.set(Region::new(0, 0, width, height));
    }

    // ── Host simulation ──────────────────────────────────────────────

    pub fn open(&self) {
        self.controller.set_open(true);
    }

    pub fn close(&self) {
        self.controller.set_open(false);
    }

    /// Resize the viewport and emit a resize event.
    pub fn resize(&self, width: i32, height: i32) {
        let viewport = self.viewport.get();
        self.viewport.set(Region::new(viewport.x, viewport.y, width, height));
        self.hub.emit(&HostEvent::Resize(Size::new(width, height)));
    }

    /// Scroll the content by `(dx, dy)`: the reference moves the opposite
    /// way, then a scroll event is emitted. A close request is honored
    /// immediately.
    pub fn scroll(&self, dx: i32, dy: i32) {
        let delta = Offset::new(dx, dy);
        self.reference.set(self.reference.get().translate(-delta));
        self.hub.emit(&HostEvent::Scroll { delta });
        if self.close_requested.replace(false) {
            self.close();
        }
    }

    /// Emit a layout event.
    pub fn layout(&self) {
        self.hub.emit(&HostEvent::Layout);
    }

    // ── Query ────────────────────────────────────────────────────────

    pub fn hub(&self) -> &EventHub {
        &self.hub
    }

    pub fn controller(&self) -> &PositionController {
        &self.controller
    }

    /// Listeners currently registered on the hub.
    pub fn listener_count(&self) -> usize {
        self.hub.listener_count()
    }

    /// Number of times the controller reported a state change.
    pub fn change_count(&self) -> usize {
        self.changes.get()
    }

    pub fn state(&self) -> PositionState {
        self.controller.state()
    }

    pub fn style(&self) -> Option<FloatingStyle> {
        self.controller.style()
    }

    pub fn resolved_side(&self) -> Side {
        self.controller.resolved_side()
    }

    pub fn resolved_align(&self) -> Align {
        self.controller.resolved_align()
    }

    /// Where the floating element currently renders, in viewport coordinates.
    pub fn floating_region(&self) -> Option<Region> {
        let placement = self.controller.placement()?;
        Some(placement.region(self.floating.get().size()))
    }

    // ── Render helpers ───────────────────────────────────────────────

    /// Render the viewport, reference and floating element to text.
    ///
    /// See [`render_placement`](super::snapshot::render_placement).
    pub fn render(&self) -> String {
        let reference = self
            .controller
            .reference_ref()
            .is_mounted()
            .then(|| self.reference.get());
        super::snapshot::render_placement(self.viewport.get(), reference, self.floating_region())
    }
}

// ===========================================================================
// Tests
// ===========================================================================
