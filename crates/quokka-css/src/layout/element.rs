//! Queries and geometry shared by all element boxes.
//!
//! [§ 8.1 Box dimensions](https://www.w3.org/TR/CSS2/box.html#box-dimensions)

use crate::style::{Float, Overflow, Position, Visibility};

use super::box_tree::{BoxId, BoxKind, BoxTree};
use super::geometry::{Dimension, Rect};

/// [§ 9.6 Absolute positioning](https://www.w3.org/TR/CSS2/visuren.html#absolute-positioning)
///
/// Absolutely positioned and fixed boxes. The viewport counts as
/// absolutely positioned at the origin.
#[must_use]
pub fn is_positioned(tree: &BoxTree, id: BoxId) -> bool {
    let b = &tree[id];
    b.kind == BoxKind::Viewport || (b.kind.is_block_like() && b.style.is_out_of_flow_positioned())
}

/// Boxes offset by `position: relative`.
#[must_use]
pub fn is_relative(tree: &BoxTree, id: BoxId) -> bool {
    tree[id].style.position == Position::Relative
}

/// [§ 9.4.3 Relative positioning](https://www.w3.org/TR/CSS2/visuren.html#relative-positioning)
///
/// "If neither 'left' nor 'right' is 'auto', the position is
/// over-constrained, and one of them has to be ignored."
///
/// The `(dx, dy)` shift of a relatively positioned box.
#[must_use]
pub fn relative_offset(tree: &BoxTree, id: BoxId) -> (f32, f32) {
    let b = &tree[id];
    let dx = if b.coords_set.left { b.coords.left } else { -b.coords.right };
    let dy = if b.coords_set.top { b.coords.top } else { -b.coords.bottom };
    (dx, dy)
}

/// Floating block boxes.
#[must_use]
pub fn is_floating(tree: &BoxTree, id: BoxId) -> bool {
    let b = &tree[id];
    b.kind.is_block_like() && !is_positioned(tree, id) && b.style.float != Float::None
}

/// [§ 9.3 Positioning schemes](https://www.w3.org/TR/CSS2/visuren.html#positioning-scheme)
///
/// "An element is called out of flow if it is floated, absolutely
/// positioned, or is the root element. An element is called in-flow if it
/// is not out-of-flow."
#[must_use]
pub fn is_in_flow(tree: &BoxTree, id: BoxId) -> bool {
    let b = &tree[id];
    b.displayed && !is_floating(tree, id) && !is_positioned(tree, id)
}

/// In-flow block-level boxes, the ones that stretch to their container.
#[must_use]
pub fn is_block_in_flow(tree: &BoxTree, id: BoxId) -> bool {
    tree[id].is_block && is_in_flow(tree, id)
}

/// [§ 9.4.1 Block formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#block-formatting)
///
/// "Floats, absolutely positioned elements, block containers (such as
/// inline-blocks, table-cells, and table-captions) that are not block
/// boxes, and block boxes with 'overflow' other than 'visible' (except when
/// that value has been propagated to the viewport) establish new block
/// formatting contexts for their contents."
#[must_use]
pub fn establishes_bfc(tree: &BoxTree, id: BoxId) -> bool {
    let b = &tree[id];
    is_floating(tree, id)
        || is_positioned(tree, id)
        || !b.is_block
        || b.style.overflow != Overflow::Visible
        || matches!(
            b.kind,
            BoxKind::TableCell
                | BoxKind::TableCaption
                | BoxKind::FlexItem
                | BoxKind::GridItem
                | BoxKind::BlockReplaced
                | BoxKind::TableWrapper
                | BoxKind::Table
                | BoxKind::Flex
                | BoxKind::Grid
        )
}

/// The content of an in-flow block may flow next to floats of the
/// surrounding context.
#[must_use]
pub fn may_overlap_floats(tree: &BoxTree, id: BoxId) -> bool {
    !establishes_bfc(tree, id)
}

/// The size of the rectangle percentages and the constraint equations of
/// a box resolve against.
///
/// [§ 10.1 Definition of "containing block"](https://www.w3.org/TR/CSS2/visudet.html#containing-block-details)
#[must_use]
pub fn containing_block_size(tree: &BoxTree, id: BoxId) -> Dimension {
    let visible = tree.viewport.visible_rect;
    let viewport_size = Dimension::new(visible.width, visible.height);
    let b = &tree[id];
    let Some(cb) = b.containing_block else {
        return viewport_size;
    };
    let cbb = &tree[cb];
    if cbb.kind == BoxKind::Viewport {
        return viewport_size;
    }
    match b.style.position {
        // "If the element has 'position: fixed', the containing block is
        // established by the viewport"
        Position::Fixed if b.kind.is_block_like() => viewport_size,
        // "the containing block is formed by the padding edge of the ancestor"
        Position::Absolute if b.kind.is_block_like() => Dimension::new(
            cbb.content.width + cbb.padding.horizontal(),
            cbb.content.height + cbb.padding.vertical(),
        ),
        _ => cbb.content,
    }
}

/// The containing block height is known before the box is laid out, so
/// percentage heights can be resolved.
#[must_use]
pub fn containing_block_has_fixed_height(tree: &BoxTree, id: BoxId) -> bool {
    let b = &tree[id];
    match b.containing_block {
        None => true,
        Some(cb) => {
            let cbb = &tree[cb];
            cbb.kind == BoxKind::Viewport
                || b.style.is_out_of_flow_positioned()
                || has_fixed_height(tree, cb)
        }
    }
}

/// The width does not depend on the content.
#[must_use]
pub fn has_fixed_width(tree: &BoxTree, id: BoxId) -> bool {
    let b = &tree[id];
    match b.kind {
        BoxKind::Viewport | BoxKind::BlockReplaced | BoxKind::InlineReplaced => true,
        BoxKind::Inline | BoxKind::Text => false,
        BoxKind::InlineBlock => b.block.wset,
        _ => {
            b.block.wset
                || is_block_in_flow(tree, id)
                || (is_positioned(tree, id)
                    && !b.style.margin.left.is_auto()
                    && !b.style.margin.right.is_auto()
                    && b.coords_set.left
                    && b.coords_set.right)
        }
    }
}

/// The height does not depend on the content.
#[must_use]
pub fn has_fixed_height(tree: &BoxTree, id: BoxId) -> bool {
    let b = &tree[id];
    match b.kind {
        BoxKind::Viewport | BoxKind::BlockReplaced | BoxKind::InlineReplaced => true,
        BoxKind::Inline | BoxKind::Text => false,
        _ => b.block.hset,
    }
}

/// Only the viewport may grow to fit a negative right margin.
#[must_use]
pub fn can_increase_width(tree: &BoxTree, id: BoxId) -> bool {
    tree[id].kind == BoxKind::Viewport
}

/// Width of the margin box.
#[must_use]
pub fn total_width(tree: &BoxTree, id: BoxId) -> f32 {
    let b = &tree[id];
    match b.kind {
        BoxKind::Text => b.content.width,
        _ => b.emargin.horizontal() + b.border_width(),
    }
}

/// Height of the margin box.
///
/// [§ 8.3.1 Collapsing margins](https://www.w3.org/TR/CSS2/box.html#collapsing-margins)
///
/// A block with no border, padding and content has its own top and bottom
/// margins collapsed into one.
#[must_use]
pub fn total_height(tree: &BoxTree, id: BoxId) -> f32 {
    let b = &tree[id];
    match b.kind {
        BoxKind::Text => b.content.height,
        BoxKind::Inline => b.border_height(),
        _ => {
            if b.border.vertical() == 0.0 && b.padding.vertical() == 0.0 && b.content.height == 0.0 {
                b.emargin.top.max(b.emargin.bottom)
            } else {
                b.emargin.vertical() + b.border_height()
            }
        }
    }
}

/// Set the box bounds to its total size.
pub fn set_size_to_total(tree: &mut BoxTree, id: BoxId) {
    let w = total_width(tree, id);
    let h = total_height(tree, id);
    tree[id].bounds.set_size(w, h);
}

/// [§ 8.3.1 Collapsing margins](https://www.w3.org/TR/CSS2/box.html#collapsing-margins)
///
/// "When two or more margins collapse, the resulting margin width is the
/// maximum of the collapsing margins' widths. In the case of negative
/// margins, the maximum of the absolute values of the negative adjoining
/// margins is deducted from the maximum of the positive adjoining margins.
/// If there are no positive margins, the maximum of the absolute values of
/// the adjoining margins is deducted from zero."
///
/// Margins of the same sign collapse to the one farthest from zero, margins
/// of opposite signs add up.
#[must_use]
pub fn collapsed_margin_height(m1: f32, m2: f32) -> f32 {
    if m1 >= 0.0 && m2 >= 0.0 {
        m1.max(m2)
    } else if m1 < 0.0 && m2 < 0.0 {
        m1.min(m2)
    } else {
        m1 + m2
    }
}

/// A set of adjoining margins that collapse into one.
///
/// Only the largest positive and the most negative margin of the set
/// matter, so those two are all that is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CollapsedMargin {
    positive: f32,
    negative: f32,
}

impl CollapsedMargin {
    /// A set holding a single margin.
    #[must_use]
    pub fn of(margin: f32) -> Self {
        let mut set = CollapsedMargin::default();
        set.add(margin);
        set
    }

    /// Add an adjoining margin to the set.
    pub fn add(&mut self, margin: f32) {
        if margin >= 0.0 {
            self.positive = self.positive.max(margin);
        } else {
            self.negative = self.negative.min(margin);
        }
    }

    /// Merge two sets that adjoin each other.
    pub fn merge(&mut self, other: CollapsedMargin) {
        self.positive = self.positive.max(other.positive);
        self.negative = self.negative.min(other.negative);
    }

    /// The resulting margin width.
    #[must_use]
    pub fn height(&self) -> f32 {
        collapsed_margin_height(self.positive, self.negative)
    }
}

/// The top margin of the box does not collapse with the top margin of its
/// first in-flow child.
#[must_use]
pub fn separated_from_top(tree: &BoxTree, id: BoxId) -> bool {
    let b = &tree[id];
    if b.kind == BoxKind::Viewport || b.kind.is_replaced() {
        return true;
    }
    b.border.top > 0.0 || b.padding.top > 0.0 || b.root || establishes_bfc(tree, id)
}

/// The bottom margin of the box does not collapse with the bottom margin
/// of its last in-flow child.
#[must_use]
pub fn separated_from_bottom(tree: &BoxTree, id: BoxId) -> bool {
    let b = &tree[id];
    if b.kind == BoxKind::Viewport || b.kind.is_replaced() {
        return true;
    }
    b.border.bottom > 0.0
        || b.padding.bottom > 0.0
        || b.root
        || b.block.hset
        || establishes_bfc(tree, id)
}

/// [§ 8.3.1 Collapsing margins](https://www.w3.org/TR/CSS2/box.html#collapsing-margins)
///
/// "top and bottom margins of a box that does not establish a new block
/// formatting context and that has zero computed 'min-height', zero or
/// 'auto' computed 'height', and no in-flow children" are adjoining.
#[must_use]
pub fn margins_adjoin(tree: &BoxTree, id: BoxId) -> bool {
    let b = &tree[id];
    match b.kind {
        BoxKind::Text => is_whitespace(tree, id),
        BoxKind::Inline => {
            b.padding.vertical() == 0.0
                && b.border.vertical() == 0.0
                && b.active_children()
                    .iter()
                    .all(|&c| margins_adjoin(tree, c))
        }
        BoxKind::Viewport | BoxKind::BlockReplaced | BoxKind::InlineReplaced => false,
        _ if !b.is_block || establishes_bfc(tree, id) => false,
        _ => {
            if b.padding.vertical() > 0.0
                || b.border.vertical() > 0.0
                || b.block.min_height.is_some_and(|m| m > 0.0)
            {
                return false;
            }
            if b.block.hset {
                return b.content.height == 0.0;
            }
            b.active_children().iter().all(|&c| {
                !tree[c].displayed || !is_in_flow(tree, c) || margins_adjoin(tree, c)
            })
        }
    }
}

/// A text box made of whitespace only.
#[must_use]
pub fn is_whitespace(tree: &BoxTree, id: BoxId) -> bool {
    let b = &tree[id];
    b.kind == BoxKind::Text && b.text.text.get(b.text.start..).is_none_or(|t| t.trim().is_empty())
}

/// Move the box to a new position within its parent.
pub fn set_position(tree: &mut BoxTree, id: BoxId, x: f32, y: f32) {
    tree[id].bounds.set_location(x, y);
}

/// Shift the box down.
pub fn move_down(tree: &mut BoxTree, id: BoxId, dy: f32) {
    tree[id].bounds.y += dy;
}

/// Shift the box right.
pub fn move_right(tree: &mut BoxTree, id: BoxId, dx: f32) {
    tree[id].bounds.x += dx;
}

/// [§ 11.2 Visibility](https://www.w3.org/TR/CSS2/visufx.html#visibility)
///
/// A box is visible when `visibility` is `visible` and it intersects its
/// clipping block.
#[must_use]
pub fn is_visible(tree: &BoxTree, id: BoxId) -> bool {
    let b = &tree[id];
    if b.style.visibility != Visibility::Visible && b.kind != BoxKind::Viewport {
        return false;
    }
    match b.clip_block {
        None => true,
        Some(clip) => {
            let clip_rect = clip_rect(tree, clip);
            let bounds = if b.kind == BoxKind::Text || b.kind == BoxKind::Inline {
                b.abs_bounds
            } else {
                b.abs_border_bounds()
            };
            if bounds.width <= 0.0 || bounds.height <= 0.0 {
                clip_rect.contains(bounds.x, bounds.y)
            } else {
                clip_rect.intersects(&bounds)
            }
        }
    }
}

/// The area a clipping block lets through.
#[must_use]
pub fn clip_rect(tree: &BoxTree, clip: BoxId) -> Rect {
    let c = &tree[clip];
    if c.kind == BoxKind::Viewport {
        let visible = tree.viewport.visible_rect;
        if visible.width > 0.0 {
            return if super::viewport::clips_content(tree) {
                visible
            } else {
                Rect::new(0.0, 0.0, f32::INFINITY, f32::INFINITY)
            };
        }
        return c.abs_bounds;
    }
    c.abs_padding_bounds()
}

/// The nearest block-like ancestor.
#[must_use]
pub fn enclosing_block(tree: &BoxTree, id: BoxId) -> Option<BoxId> {
    tree.ancestors(id).find(|&a| tree[a].kind.is_block_like())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn test_collapsed_margin_height_cases() {
        assert_eq!(collapsed_margin_height(20.0, 10.0), 20.0);
        assert_eq!(collapsed_margin_height(-20.0, -10.0), -20.0);
        assert_eq!(collapsed_margin_height(20.0, -5.0), 15.0);
        assert_eq!(collapsed_margin_height(0.0, 0.0), 0.0);
    }

    #[quickcheck]
    fn prop_collapsed_margin_is_symmetric(a: i16, b: i16) -> bool {
        let (a, b) = (f32::from(a), f32::from(b));
        collapsed_margin_height(a, b) == collapsed_margin_height(b, a)
    }

    #[test]
    fn test_collapsed_margin_set() {
        let mut set = CollapsedMargin::of(10.0);
        set.add(30.0);
        set.add(-5.0);
        set.add(-20.0);
        assert_eq!(set.height(), 10.0);
        let mut other = CollapsedMargin::of(-40.0);
        other.merge(set);
        assert_eq!(other.height(), -10.0);
        assert_eq!(CollapsedMargin::default().height(), 0.0);
    }

    #[quickcheck]
    fn prop_collapsed_margin_ignores_order(margins: Vec<i16>) -> bool {
        let mut forward = CollapsedMargin::default();
        let mut backward = CollapsedMargin::default();
        for &m in &margins {
            forward.add(f32::from(m));
        }
        for &m in margins.iter().rev() {
            backward.add(f32::from(m));
        }
        forward == backward
    }

    #[quickcheck]
    fn prop_collapsed_margin_of_positives_is_max(a: u16, b: u16) -> bool {
        let (a, b) = (f32::from(a), f32::from(b));
        collapsed_margin_height(a, b) == a.max(b)
    }
}
