//! Host events: the hub floating controllers subscribe to, and the
//! crossterm adapter that feeds it.

pub mod hub;
pub mod input;

pub use hub::{EventHub, HostEvent, ListenerId, ListenerKind, Subscription};
pub use input::{host_event_from_crossterm, terminal_viewport};
