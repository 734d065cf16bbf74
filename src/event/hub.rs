//! Host event hub: listener registration and synchronous dispatch.
//!
//! [`EventHub`] is a cloneable, single-threaded handle around a slotmap of
//! listeners. [`EventHub::listen`] returns a [`Subscription`] guard; dropping
//! the guard removes the listener, so a component's subscriptions can never
//! outlive the component.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use slotmap::{new_key_type, SlotMap};
use tracing::trace;

use crate::geometry::{Offset, Size};

new_key_type! {
    /// Identifies a registered listener. Copy, lightweight (u64).
    pub struct ListenerId;
}

// ---------------------------------------------------------------------------
// HostEvent
// ---------------------------------------------------------------------------

/// Something happened in the host that may invalidate floating positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// The viewport changed size.
    Resize(Size),
    /// A scrollable container (or the whole screen) scrolled.
    Scroll { delta: Offset },
    /// A layout pass finished: elements may have mounted, moved or resized.
    Layout,
}

impl HostEvent {
    /// The listener kind this event is delivered to.
    pub fn kind(&self) -> ListenerKind {
        match self {
            HostEvent::Resize(_) => ListenerKind::Resize,
            HostEvent::Scroll { .. } => ListenerKind::Scroll,
            HostEvent::Layout => ListenerKind::Layout,
        }
    }
}

/// Which events a listener receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    Resize,
    Scroll,
    Layout,
}

// ---------------------------------------------------------------------------
// EventHub
// ---------------------------------------------------------------------------

type Callback = Rc<RefCell<dyn FnMut(&HostEvent)>>;

struct Listener {
    kind: ListenerKind,
    callback: Callback,
}

#[derive(Default)]
struct Registry {
    listeners: SlotMap<ListenerId, Listener>,
}

/// Shared registry of host event listeners.
///
/// Clones share the same registry. Dispatch is synchronous: [`emit`](Self::emit)
/// returns after every matching listener ran.
#[derive(Clone, Default)]
pub struct EventHub {
    registry: Rc<RefCell<Registry>>,
}

impl EventHub {
    /// Create a hub with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` for events of `kind`.
    ///
    /// The listener stays registered until the returned [`Subscription`] is
    /// dropped or cancelled.
    pub fn listen(
        &self,
        kind: ListenerKind,
        callback: impl FnMut(&HostEvent) + 'static,
    ) -> Subscription {
        let callback: Callback = Rc::new(RefCell::new(callback));
        let id = self
            .registry
            .borrow_mut()
            .listeners
            .insert(Listener { kind, callback });
        trace!(?kind, ?id, "listener added");
        Subscription {
            registry: Rc::downgrade(&self.registry),
            id,
        }
    }

    /// Deliver `event` to every listener of its kind, returning how many ran.
    ///
    /// Listeners may subscribe, unsubscribe or emit from inside their callback.
    /// A listener removed earlier in the same pass is skipped, and a listener
    /// that is already running is not re-entered.
    pub fn emit(&self, event: &HostEvent) -> usize {
        let kind = event.kind();
        let targets: Vec<(ListenerId, Callback)> = self
            .registry
            .borrow()
            .listeners
            .iter()
            .filter(|(_, listener)| listener.kind == kind)
            .map(|(id, listener)| (id, Rc::clone(&listener.callback)))
            .collect();

        let mut delivered = 0;
        for (id, callback) in targets {
            if !self.registry.borrow().listeners.contains_key(id) {
                continue;
            }
            match callback.try_borrow_mut() {
                Ok(mut f) => {
                    (&mut *f)(event);
                    delivered += 1;
                }
                Err(_) => trace!(?kind, ?id, "skipping re-entrant listener"),
            }
        }
        delivered
    }

    /// Total number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }

    /// Number of registered listeners of `kind`.
    pub fn listener_count_of(&self, kind: ListenerKind) -> usize {
        self.registry
            .borrow()
            .listeners
            .values()
            .filter(|listener| listener.kind == kind)
            .count()
    }
}

impl fmt::Debug for EventHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHub")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Subscription
// ---------------------------------------------------------------------------

/// Keeps a listener registered. Dropping it unsubscribes.
#[must_use = "dropping a Subscription immediately removes its listener"]
pub struct Subscription {
    registry: Weak<RefCell<Registry>>,
    id: ListenerId,
}

impl Subscription {
    /// The listener this guard owns.
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Whether the listener is still registered with a live hub.
    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.borrow().listeners.contains_key(self.id))
    }

    /// Remove the listener now.
    pub fn cancel(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        // Release the borrow before the callback drops: it may own guards too.
        let removed = registry.borrow_mut().listeners.remove(self.id);
        if removed.is_some() {
            trace!(id = ?self.id, "listener removed");
        }
        drop(removed);
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
