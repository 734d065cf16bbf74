//! Headless testing framework: Pilot, snapshot helpers.
//!
//! Use the [`Pilot`] to drive a [`PositionController`](crate::controller::PositionController)
//! through simulated host events without a terminal. Use [`render_placement`]
//! and [`render_cascade`] to capture placements as plain text for
//! snapshot-style assertions.

pub mod pilot;
pub mod snapshot;

pub use pilot::Pilot;
pub use snapshot::{render_cascade, render_placement};
