//! Measurable elements and the mount slots consumers fill in.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::geometry::Region;

/// Something whose bounding box can be read in viewport coordinates.
///
/// `None` means "not laid out yet".
pub trait Measure {
    fn measure(&self) -> Option<Region>;
}

impl Measure for Region {
    fn measure(&self) -> Option<Region> {
        Some(*self)
    }
}

/// Shared, mutable geometry: the host moves the element by setting the cell.
impl Measure for Rc<Cell<Region>> {
    fn measure(&self) -> Option<Region> {
        Some(self.get())
    }
}

/// Adapter that measures by calling a closure.
pub struct MeasureFn<F>(pub F);

impl<F> Measure for MeasureFn<F>
where
    F: Fn() -> Option<Region>,
{
    fn measure(&self) -> Option<Region> {
        (self.0)()
    }
}

/// A mount slot for a reference or floating element.
///
/// Clones share the slot: the controller keeps one copy and hands the other to
/// the consumer, which mounts its element once it exists.
#[derive(Clone, Default)]
pub struct ElementRef {
    slot: Rc<RefCell<Option<Rc<dyn Measure>>>>,
}

impl ElementRef {
    /// An empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount `element`, replacing whatever was mounted before.
    pub fn mount(&self, element: impl Measure + 'static) {
        *self.slot.borrow_mut() = Some(Rc::new(element));
    }

    /// Mount a closure-measured element.
    pub fn mount_fn(&self, measure: impl Fn() -> Option<Region> + 'static) {
        self.mount(MeasureFn(measure));
    }

    /// Empty the slot.
    pub fn unmount(&self) {
        self.slot.borrow_mut().take();
    }

    pub fn is_mounted(&self) -> bool {
        self.slot.borrow().is_some()
    }

    /// Current bounding box.
    ///
    /// `None` when nothing is mounted or the element reports the all-zero
    /// rectangle of a detached element.
    pub fn measure(&self) -> Option<Region> {
        let element = self.slot.borrow().clone()?;
        measurable(element.measure())
    }
}

impl fmt::Debug for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementRef")
            .field("mounted", &self.is_mounted())
            .finish()
    }
}

/// Filter out the all-zero rectangle detached elements report.
pub(crate) fn measurable(region: Option<Region>) -> Option<Region> {
    region.filter(|r| *r != Region::EMPTY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_slot_is_unmeasurable() {
        let el = ElementRef::new();
        assert!(!el.is_mounted());
        assert_eq!(el.measure(), None);
    }

    #[test]
    fn mount_region() {
        let el = ElementRef::new();
        el.mount(Region::new(1, 2, 3, 4));
        assert!(el.is_mounted());
        assert_eq!(el.measure(), Some(Region::new(1, 2, 3, 4)));
        el.unmount();
        assert_eq!(el.measure(), None);
    }

    #[test]
    fn clones_share_the_slot() {
        let el = ElementRef::new();
        let handle = el.clone();
        handle.mount(Region::new(0, 0, 5, 5));
        assert!(el.is_mounted());
    }

    #[test]
    fn cell_tracks_moves() {
        let cell = Rc::new(Cell::new(Region::new(0, 0, 2, 2)));
        let el = ElementRef::new();
        el.mount(cell.clone());
        cell.set(Region::new(7, 7, 2, 2));
        assert_eq!(el.measure(), Some(Region::new(7, 7, 2, 2)));
    }

    #[test]
    fn zero_rect_is_unmeasurable_but_zero_size_elsewhere_is_not() {
        let el = ElementRef::new();
        el.mount(Region::EMPTY);
        assert_eq!(el.measure(), None);
        el.mount(Region::new(4, 4, 0, 0));
        assert_eq!(el.measure(), Some(Region::new(4, 4, 0, 0)));
    }

    #[test]
    fn mount_fn_defers_to_closure() {
        let el = ElementRef::new();
        el.mount_fn(|| None);
        assert!(el.is_mounted());
        assert_eq!(el.measure(), None);
        el.mount_fn(|| Some(Region::new(1, 1, 1, 1)));
        assert_eq!(el.measure(), Some(Region::new(1, 1, 1, 1)));
    }
}
