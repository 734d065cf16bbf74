//! Cascading submenus: one placement routine for every nesting depth.
//!
//! Options form a tree of [`OptionNode`]s. Given the path of active indices,
//! [`place_cascade`] walks the tree and places one panel per depth: the root
//! panel below the trigger, each submenu beside the active row of its parent.
//! Submenus keep going in the direction their parent went, and flip through
//! the positioning engine when they run out of room.

use crate::geometry::{Region, Size, Spacing};
use crate::placement::{calculate_optimal_position, Align, PlacementRequest, PlacementResult, Side};

// ---------------------------------------------------------------------------
// OptionNode
// ---------------------------------------------------------------------------

/// One option and its nested options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionNode<T> {
    pub value: T,
    pub children: Vec<OptionNode<T>>,
}

impl<T> OptionNode<T> {
    /// An option without children.
    pub fn leaf(value: T) -> Self {
        Self { value, children: Vec::new() }
    }

    /// An option that opens a submenu.
    pub fn branch(value: T, children: Vec<OptionNode<T>>) -> Self {
        Self { value, children }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Layout parameters
// ---------------------------------------------------------------------------

/// Panel metrics shared by every depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CascadeLayout {
    /// Width of every panel.
    pub panel_width: i32,
    /// Height of one row.
    pub item_height: i32,
    /// Gap between a panel and its anchor.
    pub side_offset: i32,
    /// Collision padding inside the viewport.
    pub padding: Spacing,
}

impl Default for CascadeLayout {
    fn default() -> Self {
        Self {
            panel_width: 20,
            item_height: 1,
            side_offset: 0,
            padding: Spacing::ZERO,
        }
    }
}

impl CascadeLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the panel width (builder).
    pub fn with_panel_width(mut self, width: i32) -> Self {
        self.panel_width = width;
        self
    }

    /// Set the row height (builder).
    pub fn with_item_height(mut self, height: i32) -> Self {
        self.item_height = height;
        self
    }

    /// Set the anchor gap (builder).
    pub fn with_side_offset(mut self, offset: i32) -> Self {
        self.side_offset = offset;
        self
    }

    /// Set the collision padding (builder).
    pub fn with_padding(mut self, padding: Spacing) -> Self {
        self.padding = padding;
        self
    }

    fn panel_size(&self, len: usize) -> Size {
        let rows = i32::try_from(len).unwrap_or(i32::MAX);
        Size::new(self.panel_width, rows.saturating_mul(self.item_height))
    }
}

/// A placed panel at one depth of the cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CascadePanel {
    /// 0 for the root panel.
    pub depth: usize,
    /// Where the panel renders.
    pub region: Region,
    /// The engine's decision for this panel.
    pub placement: PlacementResult,
    /// Number of options shown.
    pub len: usize,
}

// ---------------------------------------------------------------------------
// Placement
// ---------------------------------------------------------------------------

/// Place the root panel and every open submenu along `active_path`.
///
/// `active_path[n]` is the active row of the panel at depth `n`. The walk
/// stops at the first leaf, out-of-range index or end of the path.
pub fn place_cascade<T>(
    roots: &[OptionNode<T>],
    active_path: &[usize],
    trigger: Region,
    viewport: Region,
    layout: &CascadeLayout,
) -> Vec<CascadePanel> {
    let mut cascade = Cascade {
        viewport,
        layout,
        panels: Vec::with_capacity(active_path.len() + 1),
    };
    cascade.place_level(roots, active_path, trigger, Side::Bottom);
    cascade.panels
}

struct Cascade<'a> {
    viewport: Region,
    layout: &'a CascadeLayout,
    panels: Vec<CascadePanel>,
}

impl Cascade<'_> {
    fn place_level<T>(&mut self, options: &[OptionNode<T>], path: &[usize], anchor: Region, side: Side) {
        if options.is_empty() {
            return;
        }

        let size = self.layout.panel_size(options.len());
        let request = PlacementRequest::new(anchor, size, self.viewport)
            .with_side(side)
            .with_align(Align::Start)
            .with_side_offset(self.layout.side_offset)
            .with_padding(self.layout.padding);
        let placement = calculate_optimal_position(&request);
        let region = placement.region(size);
        self.panels.push(CascadePanel {
            depth: self.panels.len(),
            region,
            placement,
            len: options.len(),
        });

        let Some((&active, rest)) = path.split_first() else {
            return;
        };
        let Some(node) = options.get(active) else {
            return;
        };
        if node.is_leaf() {
            return;
        }

        let row_offset = i32::try_from(active)
            .unwrap_or(i32::MAX)
            .saturating_mul(self.layout.item_height);
        let row = Region::new(
            region.x,
            region.y.saturating_add(row_offset),
            region.width,
            self.layout.item_height,
        );
        // The root opens downwards; submenus open sideways and keep the
        // direction their parent settled on.
        let next_side = match placement.side {
            Side::Left => Side::Left,
            _ => Side::Right,
        };
        self.place_level(&node.children, rest, row, next_side);
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SCREEN: Region = Region::new(0, 0, 80, 24);

    fn leaves(names: &[&'static str]) -> Vec<OptionNode<&'static str>> {
        names.iter().map(|n| OptionNode::leaf(*n)).collect()
    }

    /// ```text
    /// File
    /// Edit  > Undo  > a b c d
    ///         Redo
    /// View
    /// ```
    fn menu() -> Vec<OptionNode<&'static str>> {
        vec![
            OptionNode::leaf("File"),
            OptionNode::branch(
                "Edit",
                vec![
                    OptionNode::branch("Undo", leaves(&["a", "b", "c", "d"])),
                    OptionNode::leaf("Redo"),
                ],
            ),
            OptionNode::leaf("View"),
        ]
    }

    fn regions(panels: &[CascadePanel]) -> Vec<Region> {
        panels.iter().map(|p| p.region).collect()
    }

    #[test]
    fn empty_roots_place_nothing() {
        let roots: Vec<OptionNode<()>> = Vec::new();
        let panels = place_cascade(&roots, &[], Region::new(0, 0, 10, 1), SCREEN, &CascadeLayout::new());
        assert!(panels.is_empty());
    }

    #[test]
    fn root_only_without_path() {
        let panels = place_cascade(&menu(), &[], Region::new(0, 0, 10, 1), SCREEN, &CascadeLayout::new());
        assert_eq!(regions(&panels), vec![Region::new(0, 1, 20, 3)]);
        assert_eq!(panels[0].depth, 0);
        assert_eq!(panels[0].len, 3);
        assert_eq!(panels[0].placement.side, Side::Bottom);
    }

    #[test]
    fn nested_panels_open_to_the_right() {
        let panels = place_cascade(&menu(), &[1, 0], Region::new(0, 0, 10, 1), SCREEN, &CascadeLayout::new());
        assert_eq!(
            regions(&panels),
            vec![
                Region::new(0, 1, 20, 3),
                Region::new(20, 2, 20, 2),
                Region::new(40, 2, 20, 4),
            ]
        );
        assert_eq!(panels.iter().map(|p| p.depth).collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn submenus_flip_left_and_keep_going_left() {
        let panels = place_cascade(&menu(), &[1, 0], Region::new(60, 0, 10, 1), SCREEN, &CascadeLayout::new());
        assert_eq!(
            regions(&panels),
            vec![
                Region::new(60, 1, 20, 3),
                Region::new(40, 2, 20, 2),
                Region::new(20, 2, 20, 4),
            ]
        );
        assert_eq!(panels[1].placement.side, Side::Left);
        assert_eq!(panels[2].placement.side, Side::Left);
    }

    #[test]
    fn walk_stops_at_leaf_or_bad_index() {
        let trigger = Region::new(0, 0, 10, 1);
        let layout = CascadeLayout::new();
        assert_eq!(place_cascade(&menu(), &[0, 3], trigger, SCREEN, &layout).len(), 1);
        assert_eq!(place_cascade(&menu(), &[9], trigger, SCREEN, &layout).len(), 1);
        assert_eq!(place_cascade(&menu(), &[1, 1], trigger, SCREEN, &layout).len(), 2);
    }

    #[test]
    fn submenu_near_bottom_aligns_with_row_end() {
        let roots = vec![
            OptionNode::leaf("a"),
            OptionNode::leaf("b"),
            OptionNode::leaf("c"),
            OptionNode::leaf("d"),
            OptionNode::branch("e", leaves(&["x", "y", "z"])),
        ];
        let viewport = Region::new(0, 0, 80, 6);
        let panels = place_cascade(&roots, &[4], Region::new(0, 0, 10, 1), viewport, &CascadeLayout::new());
        assert_eq!(panels[0].region, Region::new(0, 1, 20, 5));
        assert_eq!(panels[1].region, Region::new(20, 3, 20, 3));
        assert_eq!(panels[1].placement.align, Align::End);
    }

    #[test]
    fn layout_metrics_apply() {
        let layout = CascadeLayout::new()
            .with_panel_width(12)
            .with_item_height(2)
            .with_side_offset(1);
        let panels = place_cascade(&menu(), &[1], Region::new(0, 0, 10, 1), SCREEN, &layout);
        assert_eq!(panels[0].region, Region::new(0, 2, 12, 6));
        // Row 1 of the root starts at y = 2 + 1 * 2.
        assert_eq!(panels[1].region, Region::new(13, 4, 12, 4));
    }
}
