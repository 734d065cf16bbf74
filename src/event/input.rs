//! Terminal input adapter: crossterm events to [`HostEvent`]s.
//!
//! Only the events that can move a floating panel are converted; everything
//! else (keys, clicks, focus, paste) maps to `None` so the rest of the crate
//! never depends on crossterm directly.

use std::io;

use crossterm::event::{Event, MouseEventKind};

use super::hub::HostEvent;
use crate::geometry::{Offset, Region, Size};

/// Convert a crossterm event into a [`HostEvent`].
///
/// Returns `None` for events that do not affect positioning.
pub fn host_event_from_crossterm(event: &Event) -> Option<HostEvent> {
    match event {
        Event::Resize(width, height) => Some(HostEvent::Resize(Size::new(
            i32::from(*width),
            i32::from(*height),
        ))),
        Event::Mouse(mouse) => {
            let delta = match mouse.kind {
                MouseEventKind::ScrollUp => Offset::new(0, -1),
                MouseEventKind::ScrollDown => Offset::new(0, 1),
                MouseEventKind::ScrollLeft => Offset::new(-1, 0),
                MouseEventKind::ScrollRight => Offset::new(1, 0),
                _ => return None,
            };
            Some(HostEvent::Scroll { delta })
        }
        _ => None,
    }
}

/// The current terminal as a viewport region anchored at the origin.
pub fn terminal_viewport() -> io::Result<Region> {
    let (width, height) = crossterm::terminal::size()?;
    Ok(Region::new(0, 0, i32::from(width), i32::from(height)))
}

// ===========================================================================
// Tests
// ===========================================================================
