//! Snapshot rendering helpers.
//!
//! Functions for drawing placements as plain-text grids suitable for snapshot
//! testing and assertions.

use crate::cascade::CascadePanel;
use crate::geometry::Region;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Draw a reference and a floating panel inside a viewport.
///
/// The grid covers the viewport, one character per cell: `.` for empty
/// viewport cells, `R` for the reference, `F` for the floating panel. The
/// floating panel is drawn over the reference. Parts outside the viewport are
/// cut off. Rows are joined with `'\n'`, without a trailing newline.
///
/// # Examples
///
/// ```
/// use gilt_float::geometry::Region;
/// use gilt_float::testing::render_placement;
///
/// let out = render_placement(
///     Region::new(0, 0, 4, 2),
///     Some(Region::new(0, 0, 1, 1)),
///     Some(Region::new(1, 1, 2, 1)),
/// );
/// assert_eq!(out, "R...\n.FF.");
/// ```
pub fn render_placement(viewport: Region, reference: Option<Region>, floating: Option<Region>) -> String {
    let mut grid = Grid::new(viewport);
    if let Some(reference) = reference {
        grid.fill(reference, 'R');
    }
    if let Some(floating) = floating {
        grid.fill(floating, 'F');
    }
    grid.into_string()
}

/// Draw a cascade of panels below a trigger.
///
/// The trigger is drawn as `T`; each panel is filled with its depth digit
/// (`0` for the root panel), deeper panels over shallower ones.
pub fn render_cascade(viewport: Region, trigger: Region, panels: &[CascadePanel]) -> String {
    let mut grid = Grid::new(viewport);
    grid.fill(trigger, 'T');
    for panel in panels {
        let depth = u32::try_from(panel.depth % 36).unwrap_or(35);
        let ch = char::from_digit(depth, 36).unwrap_or('#');
        grid.fill(panel.region, ch);
    }
    grid.into_string()
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

struct Grid {
    origin: Region,
    cells: Vec<Vec<char>>,
}

impl Grid {
    fn new(viewport: Region) -> Self {
        let w = usize::try_from(viewport.width.max(0)).unwrap_or(0);
        let h = usize::try_from(viewport.height.max(0)).unwrap_or(0);
        Self {
            origin: viewport,
            cells: vec![vec!['.'; w]; h],
        }
    }

    fn fill(&mut self, region: Region, ch: char) {
        let visible = region.intersection(self.origin);
        if visible.is_empty() {
            return;
        }
        for y in visible.y..visible.bottom() {
            for x in visible.x..visible.right() {
                let row = usize::try_from(y - self.origin.y).unwrap_or(0);
                let col = usize::try_from(x - self.origin.x).unwrap_or(0);
                if let Some(cell) = self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
                    *cell = ch;
                }
            }
        }
    }

    fn into_string(self) -> String {
        self.cells
            .into_iter()
            .map(|row| row.into_iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// ===========================================================================
// Tests
// ===========================================================================
