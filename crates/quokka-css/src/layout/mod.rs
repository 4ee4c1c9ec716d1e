//! CSS Layout Engine
//!
//! This module implements the CSS visual formatting model over the box
//! tree produced by [`crate::builder`].
//!
//! # Relevant Specifications
//!
//! - [CSS 2.1 Visual Formatting Model](https://www.w3.org/TR/CSS2/visuren.html)
//! - [CSS 2.1 Visual Formatting Model Details](https://www.w3.org/TR/CSS2/visudet.html)
//! - [CSS 2.1 Tables](https://www.w3.org/TR/CSS2/tables.html)
//! - [CSS Flexible Box Layout Module Level 1](https://www.w3.org/TR/css-flexbox-1/)
//! - [CSS Grid Layout Module Level 1](https://www.w3.org/TR/css-grid-1/)
//!
//! # Module Structure
//!
//! - [`geometry`] - Rectangles, dimensions and edge sets
//! - [`decoder`] - Lengths to pixels, replaced object sizing
//! - [`box_tree`] - The box arena and per-kind state
//! - [`element`] - Queries shared by element boxes
//! - [`sizes`] - Used widths, heights, margins and offsets
//! - [`float_list`] - Float bookkeeping per formatting context
//! - [`block`] - Block container layout
//! - [`inline`], [`line`], [`text`] - Inline formatting
//! - [`replaced`] - Replaced elements
//! - [`list_item`] - List items and markers
//! - [`table`] - Tables
//! - [`flex`] - Flexbox
//! - [`grid`] - Grid
//! - [`positioning`] - Page coordinates
//! - [`stacking`] - Stacking contexts
//! - [`viewport`] - The layout driver
//! - [`visual_context`] - Font metrics

pub mod block;
pub mod box_tree;
pub mod decoder;
pub mod element;
pub mod flex;
pub mod float_list;
pub mod geometry;
pub mod grid;
pub mod inline;
pub mod line;
pub mod list_item;
pub mod positioning;
pub mod replaced;
pub mod sizes;
pub mod stacking;
pub mod table;
pub mod text;
pub mod viewport;
pub mod visual_context;

pub use box_tree::{BoxId, BoxKind, BoxTree, LayoutBox, LayoutContext, LayoutStrategy};
pub use geometry::{Dimension, LengthSet, Rect};
pub use stacking::StackingContext;
pub use visual_context::{ApproximateVisualContext, FontMetrics, FontSpec, VisualContext};

/// Lay out a box in `availw` pixels of horizontal space.
///
/// Returns false when the box did not fit and `force` is not set; inline
/// content may then be split. `linestart` tells inline content it starts a
/// line, so leading whitespace is dropped.
pub fn do_layout(
    tree: &mut BoxTree,
    ctx: &LayoutContext<'_>,
    id: BoxId,
    availw: f32,
    force: bool,
    linestart: bool,
) -> bool {
    match tree[id].kind.strategy() {
        LayoutStrategy::Viewport => viewport::do_layout(tree, ctx, id),
        LayoutStrategy::Block => block::do_layout(tree, ctx, id, availw, force),
        LayoutStrategy::Inline => inline::do_layout(tree, ctx, id, availw, force, linestart),
        LayoutStrategy::Text => text::do_layout(tree, ctx, id, availw, force, linestart),
        LayoutStrategy::Replaced => replaced::do_layout(tree, ctx, id, availw, force),
        LayoutStrategy::TableWrapper => table::layout_wrapper(tree, ctx, id, availw, force),
        LayoutStrategy::Table => table::layout_table(tree, ctx, id, availw),
        LayoutStrategy::Flex => flex::do_layout(tree, ctx, id, availw, force),
        LayoutStrategy::Grid => grid::do_layout(tree, ctx, id, availw, force),
        // laid out by their table
        LayoutStrategy::TableBody | LayoutStrategy::TableRow | LayoutStrategy::Column => true,
    }
}

/// [§ 10.3.5 Floating, non-replaced elements](https://www.w3.org/TR/CSS2/visudet.html#float-width)
///
/// "the preferred minimum width" of the margin box: the narrowest the box
/// gets without overflowing.
#[must_use]
pub fn minimal_width(tree: &BoxTree, ctx: &LayoutContext<'_>, id: BoxId) -> f32 {
    match tree[id].kind.strategy() {
        LayoutStrategy::Viewport | LayoutStrategy::Block => block::minimal_width(tree, ctx, id),
        LayoutStrategy::Inline => inline::minimal_width(tree, ctx, id),
        LayoutStrategy::Text => text::minimal_width(tree, ctx, id),
        LayoutStrategy::Replaced => replaced::width(tree, id),
        LayoutStrategy::TableWrapper => table::wrapper_minimal_width(tree, ctx, id),
        LayoutStrategy::Table => table::minimal_width(tree, ctx, id),
        LayoutStrategy::Flex => flex::minimal_width(tree, ctx, id),
        LayoutStrategy::Grid => grid::minimal_width(tree, ctx, id),
        LayoutStrategy::TableBody | LayoutStrategy::TableRow | LayoutStrategy::Column => 0.0,
    }
}

/// "the preferred width" of the margin box: the width without any line
/// breaks other than the forced ones.
#[must_use]
pub fn maximal_width(tree: &BoxTree, ctx: &LayoutContext<'_>, id: BoxId) -> f32 {
    match tree[id].kind.strategy() {
        LayoutStrategy::Viewport | LayoutStrategy::Block => block::maximal_width(tree, ctx, id),
        LayoutStrategy::Inline => inline::maximal_width(tree, ctx, id),
        LayoutStrategy::Text => text::maximal_width(tree, ctx, id),
        LayoutStrategy::Replaced => replaced::width(tree, id),
        LayoutStrategy::TableWrapper => table::wrapper_maximal_width(tree, ctx, id),
        LayoutStrategy::Table => table::maximal_width(tree, ctx, id),
        LayoutStrategy::Flex => flex::maximal_width(tree, ctx, id),
        LayoutStrategy::Grid => grid::maximal_width(tree, ctx, id),
        LayoutStrategy::TableBody | LayoutStrategy::TableRow | LayoutStrategy::Column => 0.0,
    }
}

/// Prepare a subtree for layout: used sizes top-down, then list numbers
/// and the collapsed margins bottom-up.
pub fn init_subtree(tree: &mut BoxTree, ctx: &LayoutContext<'_>, id: BoxId) {
    sizes::load_sizes(tree, ctx, id, false);
    element::set_size_to_total(tree, id);
    let children = tree[id].children.clone();
    for c in children {
        init_subtree(tree, ctx, c);
    }
    if tree[id].kind == BoxKind::ListItem {
        list_item::init_list_item(tree, id);
    }
    if tree[id].kind.is_block_like() {
        block::compute_efficient_margins(tree, id);
    }
}
