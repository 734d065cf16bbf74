//! Layer stack: z-ordering for overlapping floating panels and dialogs.
//!
//! [`LayerStack`] is an explicit service object, passed to whatever opens
//! overlays, rather than a process-wide registry. Layers are kept in
//! painter's order (last = frontmost) and each gets a z-index derived from
//! its position. Subscribers see the new order after every change.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use slotmap::{new_key_type, SlotMap};
use tracing::trace;

new_key_type! {
    /// Identifies one layer in a [`LayerStack`].
    pub struct LayerId;

    /// Identifies a stack subscriber.
    pub struct LayerListenerId;
}

/// z-index of the bottom-most layer.
pub const BASE_Z_INDEX: i32 = 1000;

/// z-index distance between adjacent layers.
pub const Z_INDEX_STEP: i32 = 10;

type Listener = Rc<RefCell<dyn FnMut(&[LayerId])>>;

struct Stack {
    layers: SlotMap<LayerId, ()>,
    /// Painter's order: last = frontmost.
    order: Vec<LayerId>,
    listeners: SlotMap<LayerListenerId, Listener>,
    base: i32,
    step: i32,
}

/// Ordered registry of open layers with change notification.
///
/// Clones share the same stack.
#[derive(Clone)]
pub struct LayerStack {
    stack: Rc<RefCell<Stack>>,
}

impl LayerStack {
    /// A stack using [`BASE_Z_INDEX`] and [`Z_INDEX_STEP`].
    pub fn new() -> Self {
        Self::with_base(BASE_Z_INDEX, Z_INDEX_STEP)
    }

    /// A stack with a custom z-index base and step.
    pub fn with_base(base: i32, step: i32) -> Self {
        Self {
            stack: Rc::new(RefCell::new(Stack {
                layers: SlotMap::with_key(),
                order: Vec::new(),
                listeners: SlotMap::with_key(),
                base,
                step,
            })),
        }
    }

    /// Add a new layer in front of all others.
    pub fn push(&self) -> LayerId {
        let id = {
            let mut stack = self.stack.borrow_mut();
            let id = stack.layers.insert(());
            stack.order.push(id);
            id
        };
        trace!(?id, "layer pushed");
        self.notify();
        id
    }

    /// Move `id` in front of all others.
    ///
    /// Returns `false` if the layer is unknown. Subscribers are only notified
    /// when the order actually changed.
    pub fn bring_to_front(&self, id: LayerId) -> bool {
        let moved = {
            let mut stack = self.stack.borrow_mut();
            let Some(index) = stack.order.iter().position(|&layer| layer == id) else {
                return false;
            };
            if index + 1 == stack.order.len() {
                false
            } else {
                stack.order.remove(index);
                stack.order.push(id);
                true
            }
        };
        if moved {
            trace!(?id, "layer raised");
            self.notify();
        }
        true
    }

    /// Remove a layer. Returns `false` if it was unknown.
    pub fn remove(&self, id: LayerId) -> bool {
        let removed = {
            let mut stack = self.stack.borrow_mut();
            if stack.layers.remove(id).is_some() {
                stack.order.retain(|&layer| layer != id);
                true
            } else {
                false
            }
        };
        if removed {
            trace!(?id, "layer removed");
            self.notify();
        }
        removed
    }

    /// z-index for `id`: `base + position * step`.
    pub fn z_index(&self, id: LayerId) -> Option<i32> {
        let stack = self.stack.borrow();
        let index = stack.order.iter().position(|&layer| layer == id)?;
        let index = i32::try_from(index).ok()?;
        Some(stack.base + index * stack.step)
    }

    /// Layers back to front.
    pub fn order(&self) -> Vec<LayerId> {
        self.stack.borrow().order.clone()
    }

    /// The frontmost layer.
    pub fn top(&self) -> Option<LayerId> {
        self.stack.borrow().order.last().copied()
    }

    pub fn contains(&self, id: LayerId) -> bool {
        self.stack.borrow().layers.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.stack.borrow().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.borrow().order.is_empty()
    }

    /// Be told the new back-to-front order after every change.
    pub fn subscribe(&self, listener: impl FnMut(&[LayerId]) + 'static) -> LayerSubscription {
        let listener: Listener = Rc::new(RefCell::new(listener));
        let id = self.stack.borrow_mut().listeners.insert(listener);
        LayerSubscription {
            stack: Rc::downgrade(&self.stack),
            id,
        }
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.stack.borrow().listeners.len()
    }

    fn notify(&self) {
        let (order, listeners): (Vec<LayerId>, Vec<(LayerListenerId, Listener)>) = {
            let stack = self.stack.borrow();
            (
                stack.order.clone(),
                stack
                    .listeners
                    .iter()
                    .map(|(id, listener)| (id, Rc::clone(listener)))
                    .collect(),
            )
        };
        for (id, listener) in listeners {
            // Unsubscribed by an earlier listener in this pass.
            if !self.stack.borrow().listeners.contains_key(id) {
                continue;
            }
            match listener.try_borrow_mut() {
                Ok(mut f) => (&mut *f)(&order),
                Err(_) => trace!(?id, "skipping re-entrant layer listener"),
            }
        }
    }
}

impl Default for LayerStack {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LayerStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stack = self.stack.borrow();
        f.debug_struct("LayerStack")
            .field("order", &stack.order)
            .field("base", &stack.base)
            .field("step", &stack.step)
            .finish()
    }
}

/// Keeps a stack subscriber registered. Dropping it unsubscribes.
#[must_use = "dropping a LayerSubscription immediately unsubscribes"]
pub struct LayerSubscription {
    stack: Weak<RefCell<Stack>>,
    id: LayerListenerId,
}

impl LayerSubscription {
    /// Unsubscribe now.
    pub fn unsubscribe(self) {}
}

impl Drop for LayerSubscription {
    fn drop(&mut self) {
        if let Some(stack) = self.stack.upgrade() {
            let removed = stack.borrow_mut().listeners.remove(self.id);
            drop(removed);
        }
    }
}

impl fmt::Debug for LayerSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayerSubscription").field("id", &self.id).finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
