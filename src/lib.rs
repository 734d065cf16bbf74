//! # gilt-float
//!
//! Collision-aware placement of floating panels (popovers, dropdowns, menus,
//! tooltips) next to an anchor in a cell-based terminal UI.
//!
//! The engine is a pure function: given the anchor's rectangle, the panel's
//! size and the viewport, it picks a side, flips it or the alignment when the
//! panel would not fit, and clamps the result into the viewport. Around it, a
//! controller keeps an open panel placed while the host resizes, scrolls or
//! re-lays out.
//!
//! ## Core Systems
//!
//! - **[`placement`]**: Side/alignment types and the positioning engine
//! - **[`controller`]**: Open/close state machine, element measurement, options
//! - **[`event`]**: Host event hub with RAII subscriptions, crossterm adapter
//! - **[`layer`]**: Injectable z-order stack for overlapping panels
//! - **[`cascade`]**: Recursive placement of nested submenus
//! - **[`testing`]**: Headless pilot and text snapshots
//! - **[`geometry`]**: Offset, Size, Region, Spacing primitives
//!
//! ## Example
//!
//! ```
//! use gilt_float::geometry::{Region, Size};
//! use gilt_float::placement::{calculate_optimal_position, Align, PlacementRequest, Side};
//!
//! let request = PlacementRequest::new(
//!     Region::new(10, 0, 4, 1),
//!     Size::new(8, 3),
//!     Region::new(0, 0, 80, 24),
//! )
//! .with_side(Side::Top);
//!
//! // No room above the anchor: the panel flips below it.
//! let result = calculate_optimal_position(&request);
//! assert_eq!(result.side, Side::Bottom);
//! assert_eq!(result.align, Align::Center);
//! assert_eq!((result.x, result.y), (8, 1));
//! ```

// Foundation
pub mod geometry;

// Placement
pub mod placement;

// Live positioning
pub mod controller;
pub mod event;

// Overlay services
pub mod cascade;
pub mod layer;

// Testing
pub mod testing;

pub use cascade::{place_cascade, CascadeLayout, CascadePanel, OptionNode};
pub use controller::{
    ElementRef, FloatingStyle, Measure, Phase, PositionController, PositionOptions, PositionState,
    ScrollBehavior, Strategy,
};
pub use event::{EventHub, HostEvent, ListenerKind, Subscription};
pub use geometry::{Offset, Region, Size, Spacing};
pub use layer::{LayerId, LayerStack};
pub use placement::{
    calculate_optimal_position, Align, ParseError, Placement, PlacementRequest, PlacementResult, Side,
};
