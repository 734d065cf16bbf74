//! Engine input and output value types.

use crate::geometry::{Offset, Region, Size, Spacing};

use super::side::{Align, Placement, Side};

// ---------------------------------------------------------------------------
// PlacementRequest
// ---------------------------------------------------------------------------

/// Everything the engine needs to place one floating panel.
///
/// Requests are built fresh for every layout pass and never stored.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PlacementRequest {
    /// The anchor, in viewport coordinates.
    pub reference: Region,
    /// Measured size of the floating panel. Its position is irrelevant.
    pub floating: Size,
    /// Preferred side.
    pub side: Side,
    /// Preferred alignment.
    pub align: Align,
    /// Gap between anchor and panel along the main axis.
    pub side_offset: i32,
    /// Shift along the cross axis, away from the aligned edge.
    pub align_offset: i32,
    /// Area the panel should stay inside.
    pub viewport: Region,
    /// Collision padding subtracted from the viewport.
    pub padding: Spacing,
}

impl PlacementRequest {
    /// A request for `Bottom`/`Center` with no offsets or padding.
    pub fn new(reference: Region, floating: impl Into<Size>, viewport: Region) -> Self {
        Self {
            reference,
            floating: floating.into(),
            side: Side::default(),
            align: Align::default(),
            side_offset: 0,
            align_offset: 0,
            viewport,
            padding: Spacing::ZERO,
        }
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

    /// Set the collision padding (builder).
    pub fn with_padding(mut self, padding: Spacing) -> Self {
        self.padding = padding;
        self
    }

    /// The usable area: the viewport minus padding.
    #[inline]
    pub fn bounds(&self) -> Region {
        self.viewport.shrink(self.padding)
    }
}

// ---------------------------------------------------------------------------
// PlacementResult
// ---------------------------------------------------------------------------

/// The engine's decision: the side and alignment actually used, plus the
/// top-left corner of the floating panel.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PlacementResult {
    pub side: Side,
    pub align: Align,
    pub x: i32,
    pub y: i32,
}

impl PlacementResult {
    /// Top-left corner.
    #[inline]
    pub const fn offset(&self) -> Offset {
        Offset::new(self.x, self.y)
    }

    /// Resolved side and alignment.
    #[inline]
    pub const fn placement(&self) -> Placement {
        Placement::new(self.side, self.align)
    }

    /// The floating panel's rectangle at the computed position.
    #[inline]
    pub const fn region(&self, floating: Size) -> Region {
        floating.at(self.offset())
    }
}
