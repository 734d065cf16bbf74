//! Controller configuration: placement preferences and policies.

use std::fmt;
use std::str::FromStr;

use crate::geometry::{Region, Size, Spacing};
use crate::placement::{Align, ParseError, Placement, PlacementRequest, Side};

// ---------------------------------------------------------------------------
// Strategy
// ---------------------------------------------------------------------------

/// How the computed coordinates are expressed in the exposed style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Viewport coordinates.
    #[default]
    Fixed,
    /// Relative to the containing block's top-left corner.
    Absolute,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strategy::Fixed => "fixed",
            Strategy::Absolute => "absolute",
        })
    }
}

impl FromStr for Strategy {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" => Ok(Strategy::Fixed),
            "absolute" => Ok(Strategy::Absolute),
            _ => Err(ParseError::UnknownStrategy(s.to_owned())),
        }
    }
}

// ---------------------------------------------------------------------------
// ScrollBehavior
// ---------------------------------------------------------------------------

/// What an open controller does when something scrolls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ScrollBehavior {
    /// Re-measure and follow the anchor.
    #[default]
    Reposition,
    /// Ask the consumer to close the panel.
    Close,
}

impl fmt::Display for ScrollBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ScrollBehavior::Reposition => "reposition",
            ScrollBehavior::Close => "close",
        })
    }
}

impl FromStr for ScrollBehavior {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reposition" => Ok(ScrollBehavior::Reposition),
            "close" => Ok(ScrollBehavior::Close),
            _ => Err(ParseError::UnknownScrollBehavior(s.to_owned())),
        }
    }
}

// ---------------------------------------------------------------------------
// PositionOptions
// ---------------------------------------------------------------------------

/// Configuration for a [`PositionController`](super::PositionController).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PositionOptions {
    /// Preferred side (default: bottom).
    pub side: Side,
    /// Preferred alignment (default: center).
    pub align: Align,
    /// Gap between anchor and panel.
    pub side_offset: i32,
    /// Cross-axis shift away from the aligned edge.
    pub align_offset: i32,
    /// Coordinate space of the exposed style.
    pub strategy: Strategy,
    /// Reaction to scroll events.
    pub scroll_behavior: ScrollBehavior,
    /// Collision padding inside the viewport.
    pub padding: Spacing,
}

impl PositionOptions {
    /// Create the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the preferred side (builder).
    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    /// Set the preferred alignment (builder).
    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Set side and alignment together (builder).
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.side = placement.side;
        self.align = placement.align;
        self
    }

    /// Set the main-axis gap (builder).
    pub fn with_side_offset(mut self, offset: i32) -> Self {
        self.side_offset = offset;
        self
    }

    /// Set the cross-axis shift (builder).
    pub fn with_align_offset(mut self, offset: i32) -> Self {
        self.align_offset = offset;
        self
    }

    /// Set the positioning strategy (builder).
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the scroll behavior (builder).
    pub fn with_scroll_behavior(mut self, behavior: ScrollBehavior) -> Self {
        self.scroll_behavior = behavior;
        self
    }

    /// Set the collision padding (builder).
    pub fn with_padding(mut self, padding: Spacing) -> Self {
        self.padding = padding;
        self
    }

    /// Build the engine request for one layout pass.
    pub fn request(&self, reference: Region, floating: Size, viewport: Region) -> PlacementRequest {
        PlacementRequest::new(reference, floating, viewport)
            .with_side(self.side)
            .with_align(self.align)
            .with_side_offset(self.side_offset)
            .with_align_offset(self.align_offset)
            .with_padding(self.padding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let opts = PositionOptions::new();
        assert_eq!(opts.side, Side::Bottom);
        assert_eq!(opts.align, Align::Center);
        assert_eq!(opts.strategy, Strategy::Fixed);
        assert_eq!(opts.scroll_behavior, ScrollBehavior::Reposition);
        assert_eq!(opts.padding, Spacing::ZERO);
    }

    #[test]
    fn builder_feeds_request() {
        let opts = PositionOptions::new()
            .with_placement("right-end".parse().unwrap())
            .with_side_offset(2)
            .with_align_offset(1)
            .with_padding(Spacing::all(1));
        let req = opts.request(Region::new(1, 1, 1, 1), Size::new(3, 3), Region::new(0, 0, 10, 10));
        assert_eq!(req.side, Side::Right);
        assert_eq!(req.align, Align::End);
        assert_eq!(req.side_offset, 2);
        assert_eq!(req.align_offset, 1);
        assert_eq!(req.padding, Spacing::all(1));
    }

    #[test]
    fn parse_strategy_and_scroll_behavior() {
        assert_eq!("Absolute".parse::<Strategy>(), Ok(Strategy::Absolute));
        assert_eq!("close".parse::<ScrollBehavior>(), Ok(ScrollBehavior::Close));
        assert_eq!(
            "sticky".parse::<Strategy>(),
            Err(ParseError::UnknownStrategy("sticky".into()))
        );
        assert_eq!(
            "ignore".parse::<ScrollBehavior>(),
            Err(ParseError::UnknownScrollBehavior("ignore".into()))
        );
        assert_eq!(Strategy::Fixed.to_string(), "fixed");
        assert_eq!(ScrollBehavior::Reposition.to_string(), "reposition");
    }
}
