//! Floating panel placement: value types and the pure positioning engine.
//!
//! - [`calculate_optimal_position`]: place a panel next to an anchor.
//! - [`PlacementRequest`] / [`PlacementResult`]: engine input and output.
//! - [`Side`], [`Align`], [`Placement`]: where the panel attaches.

pub mod engine;
pub mod request;
pub mod side;

pub use engine::{available_space, calculate_optimal_position, ALIGN_FLIP_THRESHOLD};
pub use request::{PlacementRequest, PlacementResult};
pub use side::{Align, ParseError, Placement, Side};
