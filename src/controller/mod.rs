//! Position controller: live measurement and event wiring around the engine.
//!
//! - [`PositionController`]: open/close state machine that keeps a panel placed.
//! - [`ElementRef`] / [`Measure`]: mount slots and measurement.
//! - [`PositionOptions`]: preferred placement, strategy and scroll policy.

pub mod element;
pub mod options;
pub mod position;

pub use element::{ElementRef, Measure, MeasureFn};
pub use options::{PositionOptions, ScrollBehavior, Strategy};
pub use position::{FloatingStyle, Phase, PositionController, PositionState};
