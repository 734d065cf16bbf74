//! The positioning engine: side flipping, alignment flipping, clamping.
//!
//! [`calculate_optimal_position`] is a pure function of its request. It never
//! fails; when no collision-free placement exists it returns the least-bad
//! clamped position, deterministically.

use tracing::{debug, trace};

use crate::geometry::{Axis, Region};

use super::request::{PlacementRequest, PlacementResult};
use super::side::{Align, Side};

/// Fraction of the panel's own cross-axis length that clamping may move it
/// before the opposite alignment is tried.
pub const ALIGN_FLIP_THRESHOLD: f64 = 0.5;

/// Compute where the floating panel should go.
///
/// 1. Keep the requested side if the panel fits there, else take the
///    opposite side if it fits, else the roomier of the two.
/// 2. Resolve the alignment, flipping `Start`/`End` when clamping would
///    distort the requested alignment by more than [`ALIGN_FLIP_THRESHOLD`].
/// 3. Clamp the panel into the padded viewport on both axes. On an axis where
///    the padding leaves too little room, clamp into the bare viewport.
///
/// All coordinate arithmetic saturates, so extreme inputs never overflow.
pub fn calculate_optimal_position(request: &PlacementRequest) -> PlacementResult {
    let bounds = request.bounds();
    let side = resolve_side(request, bounds);
    let align = resolve_align(request, side, bounds);

    let main_axis = side.axis();
    let cross_axis = side.cross_axis();
    let main = clamp_axis(
        main_anchor(request, side),
        request,
        bounds,
        main_axis,
        request.floating.length(main_axis),
    );
    let cross = clamp_axis(
        cross_anchor(request, cross_axis, align),
        request,
        bounds,
        cross_axis,
        request.floating.length(cross_axis),
    );

    let (x, y) = match main_axis {
        Axis::Vertical => (cross, main),
        Axis::Horizontal => (main, cross),
    };

    trace!(%side, %align, x, y, "placed floating element");
    PlacementResult { side, align, x, y }
}

/// Free cells between `reference` and the edge of `bounds` on `side`.
///
/// Negative when the reference itself pokes past that edge.
pub fn available_space(reference: Region, bounds: Region, side: Side) -> i32 {
    match side {
        Side::Top => reference.y.saturating_sub(bounds.y),
        Side::Bottom => bounds.bottom().saturating_sub(reference.bottom()),
        Side::Left => reference.x.saturating_sub(bounds.x),
        Side::Right => bounds.right().saturating_sub(reference.right()),
    }
}

fn resolve_side(request: &PlacementRequest, bounds: Region) -> Side {
    let requested = request.side;
    // A zero-area panel is a point: it fits anywhere.
    if request.floating.is_zero() {
        return requested;
    }

    let needed = request
        .floating
        .length(requested.axis())
        .saturating_add(request.side_offset);
    let space = available_space(request.reference, bounds, requested);
    if space >= needed {
        return requested;
    }

    let opposite = requested.opposite();
    let opposite_space = available_space(request.reference, bounds, opposite);
    if opposite_space >= needed || opposite_space > space {
        debug!(
            from = %requested,
            to = %opposite,
            space,
            opposite_space,
            needed,
            "flipping side"
        );
        opposite
    } else {
        requested
    }
}

fn resolve_align(request: &PlacementRequest, side: Side, bounds: Region) -> Align {
    let requested = request.align;
    if requested == Align::Center {
        return requested;
    }

    let axis = side.cross_axis();
    let length = request.floating.length(axis);
    let correction = |align: Align| {
        let anchor = cross_anchor(request, axis, align);
        clamp_axis(anchor, request, bounds, axis, length)
            .saturating_sub(anchor)
            .saturating_abs()
    };

    let current = correction(requested);
    if f64::from(current) <= f64::from(length) * ALIGN_FLIP_THRESHOLD {
        return requested;
    }

    let flipped = requested.flipped();
    let flipped_correction = correction(flipped);
    if flipped_correction < current {
        debug!(
            from = %requested,
            to = %flipped,
            current,
            flipped_correction,
            "flipping alignment"
        );
        flipped
    } else {
        requested
    }
}

/// Unclamped main-axis start of the panel for `side`.
fn main_anchor(request: &PlacementRequest, side: Side) -> i32 {
    let reference = request.reference;
    let floating = request.floating;
    match side {
        Side::Top => reference
            .y
            .saturating_sub(request.side_offset)
            .saturating_sub(floating.height),
        Side::Bottom => reference.bottom().saturating_add(request.side_offset),
        Side::Left => reference
            .x
            .saturating_sub(request.side_offset)
            .saturating_sub(floating.width),
        Side::Right => reference.right().saturating_add(request.side_offset),
    }
}

/// Unclamped cross-axis start of the panel for `align`.
fn cross_anchor(request: &PlacementRequest, axis: Axis, align: Align) -> i32 {
    let start = request.reference.start(axis);
    let reference_length = request.reference.length(axis);
    let length = request.floating.length(axis);
    match align {
        Align::Start => start.saturating_add(request.align_offset),
        Align::Center => start
            .saturating_add(reference_length.saturating_sub(length).div_euclid(2))
            .saturating_add(request.align_offset),
        Align::End => start
            .saturating_add(reference_length)
            .saturating_sub(length)
            .saturating_sub(request.align_offset),
    }
}

/// Clamp a start coordinate so `[position, position + length)` stays inside
/// `bounds` on `axis`, or inside the unpadded viewport when the panel is
/// longer than `bounds` there. Panels longer than the viewport align with
/// its start.
fn clamp_axis(position: i32, request: &PlacementRequest, bounds: Region, axis: Axis, length: i32) -> i32 {
    let area = if length <= bounds.length(axis) {
        bounds
    } else {
        request.viewport
    };
    let min = area.start(axis);
    let max = area.end(axis).saturating_sub(length);
    if max < min {
        min
    } else {
        position.clamp(min, max)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
