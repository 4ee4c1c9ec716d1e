//! Flex layout.
//!
//! [§ 9 Flex Layout Algorithm](https://www.w3.org/TR/css-flexbox-1/#layout-algorithm)
//!
//! Items are block containers. Their main size comes from the flex
//! algorithm and is assigned before the item is laid out, so the block
//! layout sees a fixed width (row) or height (column).

use std::ops::Range;

use log::trace;

use crate::style::{AlignContent, AlignItems, BoxSizing, FlexWrap, JustifyContent, Length, Overflow};

use super::block::{
    first_inline_box_baseline, layout_block_positioned, maximal_content_width, minimal_content_width,
    new_float_context,
};
use super::box_tree::{BoxId, BoxTree, LayoutContext};
use super::element::{has_fixed_width, is_positioned, set_position, set_size_to_total, total_width};
use super::geometry::Dimension;
use super::sizes::{decoder_for, load_sizes, set_content_height, set_content_width, update_child_sizes};

/// Per-item data of one layout.
///
/// [§ 9.2 Line Length Determination](https://www.w3.org/TR/css-flexbox-1/#algo-main-item)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct FlexEntry {
    pub(crate) id: Option<BoxId>,
    /// The flex base size of the content box.
    pub(crate) base_size: f32,
    /// The base size clamped by the min and max main sizes.
    pub(crate) hypothetical: f32,
    pub(crate) min_main: f32,
    pub(crate) max_main: Option<f32>,
    pub(crate) grow: f32,
    pub(crate) shrink: f32,
    /// The resolved main size.
    pub(crate) target: f32,
    pub(crate) frozen: bool,
    /// Margins, borders and padding along the main axis.
    pub(crate) outer_main: f32,
    /// Margin box size along the cross axis after layout.
    cross: f32,
    /// Baseline distance from the cross-start margin edge.
    baseline: f32,
}

impl FlexEntry {
    fn outer_hypothetical(&self) -> f32 {
        self.hypothetical + self.outer_main
    }

    fn outer_target(&self) -> f32 {
        self.target + self.outer_main
    }

    fn clamp(&self, size: f32) -> f32 {
        let size = self.max_main.map_or(size, |max| size.min(max));
        size.max(self.min_main).max(0.0)
    }
}

/// A line of items.
#[derive(Debug, Clone)]
struct FlexLine {
    items: Range<usize>,
    cross: f32,
    baseline: f32,
    offset: f32,
}

fn item_align(tree: &BoxTree, container: BoxId, item: BoxId) -> AlignItems {
    tree[item].style.align_self.unwrap_or(tree[container].style.align_items)
}

/// [§ 9.4 step 11](https://www.w3.org/TR/css-flexbox-1/#algo-stretch)
///
/// "If a flex item has align-self: stretch, its computed cross size
/// property is auto, and neither of its cross-axis margins are auto, the
/// used outer cross size is the used cross size of its flex line."
fn is_stretched(tree: &BoxTree, container: BoxId, item: BoxId, row: bool) -> bool {
    let style = &tree[item].style;
    let (size_auto, m1, m2) = if row {
        (style.height.is_auto(), style.margin.top, style.margin.bottom)
    } else {
        (style.width.is_auto(), style.margin.left, style.margin.right)
    };
    item_align(tree, container, item) == AlignItems::Stretch && size_auto && !m1.is_auto() && !m2.is_auto()
}

fn main_decoration(tree: &BoxTree, id: BoxId, row: bool) -> f32 {
    let b = &tree[id];
    if row {
        b.margin.horizontal() + b.border.horizontal() + b.padding.horizontal()
    } else {
        b.margin.vertical() + b.border.vertical() + b.padding.vertical()
    }
}

fn cross_decoration(tree: &BoxTree, id: BoxId, row: bool) -> f32 {
    main_decoration(tree, id, !row)
}

/// The gaps as `(main, cross)`.
///
/// [§ 8 Gaps Between Boxes](https://www.w3.org/TR/css-align-3/#gaps)
fn gaps(tree: &BoxTree, id: BoxId, row: bool) -> (f32, f32) {
    let dec = decoder_for(tree, id);
    let b = &tree[id];
    let column_gap = dec.px(b.style.column_gap, b.content.width).max(0.0);
    let row_gap = dec.px(b.style.row_gap, b.content.height).max(0.0);
    if row { (column_gap, row_gap) } else { (row_gap, column_gap) }
}

/// "A computed value of auto for margin-left or margin-right becomes a
/// used value of 0." Flex items do not collapse their margins either.
///
/// The block width equation may have widened a margin of an item with a
/// declared width. The item keeps its declared margins instead, the flex
/// algorithm distributes the free space.
fn reset_item_sizes(tree: &mut BoxTree, ctx: &LayoutContext<'_>, item: BoxId) {
    load_sizes(tree, ctx, item, false);
    let b = &mut tree[item];
    b.margin = b.decl_margin;
    b.emargin = b.margin;
}

/// Width of a column item before its main size is known.
fn column_item_width(tree: &BoxTree, ctx: &LayoutContext<'_>, container: BoxId, item: BoxId, stretch: bool) -> f32 {
    let b = &tree[item];
    if !b.style.width.is_auto() {
        return b.content.width;
    }
    let avail = (tree[container].content.width - cross_decoration(tree, item, false)).max(0.0);
    let w = if stretch {
        avail
    } else {
        // [§ 10.3.5](https://www.w3.org/TR/CSS2/visudet.html#float-width)
        // shrink-to-fit
        minimal_content_width(tree, ctx, item)
            .max(avail)
            .min(maximal_content_width(tree, ctx, item))
    };
    let w = b.block.max_width.map_or(w, |max| w.min(max));
    b.block.min_width.map_or(w, |min| w.max(min))
}

/// Fix the width of an item before its layout.
fn assign_width(tree: &mut BoxTree, ctx: &LayoutContext<'_>, item: BoxId, width: f32) {
    {
        let b = &mut tree[item];
        b.content.width = width.max(0.0);
        b.block.wset = true;
        b.block.width_computed = true;
    }
    update_child_sizes(tree, ctx, item);
}

fn layout_item(tree: &mut BoxTree, ctx: &LayoutContext<'_>, item: BoxId) {
    let availw = total_width(tree, item);
    new_float_context(tree, item);
    let _ = super::do_layout(tree, ctx, item, availw, true, true);
}

/// [§ 9.2 step 3](https://www.w3.org/TR/css-flexbox-1/#algo-main-item)
///
/// "Determine the flex base size and hypothetical main size of each item."
fn flex_base(
    tree: &mut BoxTree,
    ctx: &LayoutContext<'_>,
    container: BoxId,
    item: BoxId,
    row: bool,
    container_main: Option<f32>,
    single_line: bool,
) -> FlexEntry {
    reset_item_sizes(tree, ctx, item);
    if !row {
        let stretch = single_line && is_stretched(tree, container, item, row);
        let w = column_item_width(tree, ctx, container, item, stretch);
        assign_width(tree, ctx, item, w);
    }

    let dec = decoder_for(tree, item);
    let b = &tree[item];
    let style = &b.style;
    let deco = if row {
        b.border.horizontal() + b.padding.horizontal()
    } else {
        b.border.vertical() + b.padding.vertical()
    };
    let declared_main = if row {
        (!style.width.is_auto()).then_some(b.content.width)
    } else {
        b.block.hset.then_some(b.content.height)
    };

    // A. "If the item has a definite used flex basis, that's the flex base size."
    let basis = style.flex_basis.length().and_then(|l| match (l, container_main) {
        (Length::Percent(_), None) => None,
        (l, main) => {
            let px = dec.px(l, main.unwrap_or(0.0));
            Some(if style.box_sizing == BoxSizing::BorderBox { (px - deco).max(0.0) } else { px.max(0.0) })
        }
    });
    let (min_main, max_main) = if row {
        (b.block.min_width, b.block.max_width)
    } else {
        (b.block.min_height, b.block.max_height)
    };
    let (grow, shrink, outer_main) = (style.flex_grow.max(0.0), style.flex_shrink.max(0.0), main_decoration(tree, item, row));
    let overflow_visible = style.overflow == Overflow::Visible;

    let base_size = match (basis, declared_main) {
        (Some(basis), _) => basis,
        // B. "If flex-basis is auto and the item has a definite main size,
        // use that."
        (None, Some(main)) => main,
        // E. "Otherwise, size the item into the available space using its
        // used flex basis in place of its main size, treating a value of
        // content as max-content."
        (None, None) if row => maximal_content_width(tree, ctx, item),
        (None, None) => {
            layout_item(tree, ctx, item);
            tree[item].content.height
        }
    };

    // [§ 4.5 Automatic Minimum Size of Flex Items](https://www.w3.org/TR/css-flexbox-1/#min-size-auto)
    let min_main = min_main.unwrap_or_else(|| {
        if row && overflow_visible {
            let content_min = minimal_content_width(tree, ctx, item);
            declared_main.map_or(content_min, |main| content_min.min(main))
        } else {
            0.0
        }
    });
    let mut entry = FlexEntry {
        id: Some(item),
        base_size,
        min_main,
        max_main: max_main.map(|max| max.max(min_main)),
        grow,
        shrink,
        outer_main,
        ..FlexEntry::default()
    };
    entry.hypothetical = entry.clamp(base_size);
    entry
}

/// [§ 9.3 step 5](https://www.w3.org/TR/css-flexbox-1/#algo-line-break)
///
/// "Collect flex items into flex lines: [...] collect consecutive items
/// one by one until the first uncollected item could not fit into the flex
/// container's inner main size."
fn collect_lines(entries: &[FlexEntry], main: Option<f32>, wraps: bool, gap: f32) -> Vec<Range<usize>> {
    let (Some(main), true) = (main, wraps) else {
        return vec![0..entries.len()];
    };
    let mut lines = Vec::new();
    let mut start = 0;
    let mut sum = 0.0;
    for (i, entry) in entries.iter().enumerate() {
        let outer = entry.outer_hypothetical();
        if i > start && sum + gap + outer > main {
            lines.push(start..i);
            start = i;
            sum = outer;
        } else {
            sum += if i > start { gap + outer } else { outer };
        }
    }
    lines.push(start..entries.len());
    lines
}

/// [§ 9.7 Resolving Flexible Lengths](https://www.w3.org/TR/css-flexbox-1/#resolve-flexible-lengths)
///
/// The freeze loop over one line. `available` is the inner main size
/// left after the gaps.
pub(crate) fn resolve_flexible_lengths(items: &mut [FlexEntry], available: f32) {
    if items.is_empty() {
        return;
    }
    for item in items.iter_mut() {
        item.frozen = false;
    }

    // STEP 1: "Determine the used flex factor."
    let sum_hypo: f32 = items.iter().map(FlexEntry::outer_hypothetical).sum();
    let growing = sum_hypo < available;

    // STEP 2: "Size inflexible items."
    for item in items.iter_mut() {
        let factor = if growing { item.grow } else { item.shrink };
        if factor == 0.0
            || (growing && item.base_size > item.hypothetical)
            || (!growing && item.base_size < item.hypothetical)
        {
            item.frozen = true;
            item.target = item.hypothetical;
        }
    }

    // STEP 3: "Calculate initial free space."
    let used = |items: &[FlexEntry]| -> f32 {
        items
            .iter()
            .map(|i| if i.frozen { i.outer_target() } else { i.base_size + i.outer_main })
            .sum()
    };
    let initial_free = available - used(items);

    // STEP 4: "Loop". Every round freezes at least one item.
    for _ in 0..=items.len() {
        if items.iter().all(|i| i.frozen) {
            break;
        }
        let remaining = available - used(items);
        let factor_sum: f32 = items
            .iter()
            .filter(|i| !i.frozen)
            .map(|i| if growing { i.grow } else { i.shrink })
            .sum();
        let free = if factor_sum < 1.0 {
            let scaled = initial_free * factor_sum;
            if scaled.abs() < remaining.abs() { scaled } else { remaining }
        } else {
            remaining
        };

        // "Distribute free space proportional to the flex factors."
        if growing {
            for item in items.iter_mut().filter(|i| !i.frozen) {
                item.target = item.base_size + free * item.grow / factor_sum;
            }
        } else {
            let scaled_sum: f32 = items
                .iter()
                .filter(|i| !i.frozen)
                .map(|i| i.shrink * i.base_size)
                .sum();
            for item in items.iter_mut().filter(|i| !i.frozen) {
                item.target = if scaled_sum > 0.0 {
                    item.base_size - free.abs() * item.shrink * item.base_size / scaled_sum
                } else {
                    item.base_size
                };
            }
        }

        // "Fix min/max violations."
        let mut total = 0.0;
        let mut violations = vec![0.0_f32; items.len()];
        for (n, item) in items.iter_mut().enumerate() {
            if item.frozen {
                continue;
            }
            let clamped = item.clamp(item.target);
            violations[n] = clamped - item.target;
            total += violations[n];
            item.target = clamped;
        }

        // "Freeze over-flexed items."
        for (n, item) in items.iter_mut().enumerate() {
            if item.frozen {
                continue;
            }
            item.frozen = total.abs() < 0.01
                || (total > 0.0 && violations[n] > 0.0)
                || (total < 0.0 && violations[n] < 0.0);
        }
    }
    for item in items.iter_mut().filter(|i| !i.frozen) {
        item.target = item.clamp(item.target);
        item.frozen = true;
    }
}

/// [§ 8.2 Axis Alignment: the justify-content property](https://www.w3.org/TR/css-flexbox-1/#justify-content-property)
///
/// Returns `(initial_offset, extra_space_between_items)`.
fn justify_offsets(justify: JustifyContent, free: f32, count: usize) -> (f32, f32) {
    if count == 0 {
        return (0.0, 0.0);
    }
    let free = free.max(0.0);
    match justify {
        JustifyContent::FlexStart => (0.0, 0.0),
        // "Flex items are packed toward the end of the line."
        JustifyContent::FlexEnd => (free, 0.0),
        JustifyContent::Center => (free / 2.0, 0.0),
        // "If the leftover free-space is negative or there is only a single
        // flex item on the line, this value is identical to flex-start."
        JustifyContent::SpaceBetween if count > 1 => (0.0, free / (count - 1) as f32),
        JustifyContent::SpaceBetween => (0.0, 0.0),
        JustifyContent::SpaceAround => {
            let gap = free / count as f32;
            (gap / 2.0, gap)
        }
        JustifyContent::SpaceEvenly => {
            let gap = free / (count + 1) as f32;
            (gap, gap)
        }
    }
}

/// [§ 8.4 Packing Flex Lines: the align-content property](https://www.w3.org/TR/css-flexbox-1/#align-content-property)
///
/// Returns `(initial_offset, extra_space_between_lines, extra_size_per_line)`.
fn align_content_offsets(align: AlignContent, free: f32, count: usize) -> (f32, f32, f32) {
    if count == 0 || free <= 0.0 {
        return (0.0, 0.0, 0.0);
    }
    match align {
        AlignContent::Stretch => (0.0, 0.0, free / count as f32),
        AlignContent::FlexStart => (0.0, 0.0, 0.0),
        AlignContent::FlexEnd => (free, 0.0, 0.0),
        AlignContent::Center => (free / 2.0, 0.0, 0.0),
        AlignContent::SpaceBetween if count > 1 => (0.0, free / (count - 1) as f32, 0.0),
        AlignContent::SpaceBetween => (0.0, 0.0, 0.0),
        AlignContent::SpaceAround => {
            let gap = free / count as f32;
            (gap / 2.0, gap, 0.0)
        }
    }
}

/// Lay out the items at their resolved main size and measure their cross
/// size.
fn layout_items_at_main(tree: &mut BoxTree, ctx: &LayoutContext<'_>, entries: &mut [FlexEntry], row: bool) {
    for entry in entries.iter_mut() {
        let Some(item) = entry.id else { continue };
        if row {
            assign_width(tree, ctx, item, entry.target);
        } else {
            let b = &mut tree[item];
            b.content.height = entry.target;
            b.block.hset = true;
        }
        layout_item(tree, ctx, item);
        let b = &tree[item];
        entry.cross = if row { b.bounds.height } else { b.bounds.width };
        entry.baseline = first_inline_box_baseline(tree, item)
            .map_or(b.bounds.height, |base| base + b.content_offset_y());
        let state = &mut tree[item].item;
        state.main_size = entry.target;
    }
}

/// [§ 9.4 Cross Size Determination](https://www.w3.org/TR/css-flexbox-1/#cross-sizing)
fn line_cross_size(tree: &BoxTree, container: BoxId, entries: &[FlexEntry], row: bool) -> (f32, f32) {
    let mut above: f32 = 0.0;
    let mut below: f32 = 0.0;
    let mut max: f32 = 0.0;
    for entry in entries {
        let Some(item) = entry.id else { continue };
        if row && item_align(tree, container, item) == AlignItems::Baseline {
            above = above.max(entry.baseline);
            below = below.max(entry.cross - entry.baseline);
        } else {
            max = max.max(entry.cross);
        }
    }
    (max.max(above + below), above)
}

/// Stretch an item to the cross size of its line.
fn stretch_item(tree: &mut BoxTree, ctx: &LayoutContext<'_>, item: BoxId, cross: f32, row: bool) {
    let size = (cross - cross_decoration(tree, item, row)).max(0.0);
    if row {
        set_content_height(tree, item, size);
        tree[item].block.hset = true;
        update_child_sizes(tree, ctx, item);
        set_size_to_total(tree, item);
    } else {
        set_content_width(tree, item, size);
        let w = tree[item].content.width;
        assign_width(tree, ctx, item, w);
        layout_item(tree, ctx, item);
    }
}

/// Lay out a flex container in `availw` pixels.
///
/// An inline-level container that does not fit returns false unless the
/// layout is forced.
pub fn do_layout(tree: &mut BoxTree, ctx: &LayoutContext<'_>, id: BoxId, availw: f32, force: bool) -> bool {
    if !tree[id].displayed {
        let b = &mut tree[id];
        b.content = Dimension::default();
        b.bounds.set_size(0.0, 0.0);
        return true;
    }

    // STEP 1: The container width.
    if !has_fixed_width(tree, id) {
        let b = &tree[id];
        let availcont = availw - b.emargin.horizontal() - b.border.horizontal() - b.padding.horizontal();
        let pref = content_minimal_width(tree, ctx, id)
            .max(availcont)
            .min(content_maximal_width(tree, ctx, id));
        set_content_width(tree, id, pref);
        update_child_sizes(tree, ctx, id);
    }
    tree[id].block.width_computed = true;
    tree[id].avail_width = availw;
    if !tree[id].is_block && !force && availw < total_width(tree, id) {
        return false;
    }

    let style = tree[id].style.clone();
    let row = style.flex_direction.is_row();
    let reverse = style.flex_direction.is_reverse();
    let (main_gap, cross_gap) = gaps(tree, id, row);
    let container_main = if row {
        Some(tree[id].content.width)
    } else {
        tree[id].block.hset.then_some(tree[id].content.height)
    };
    let wraps = style.flex_wrap != FlexWrap::Nowrap;

    // STEP 2: Items in `order`, out-of-flow children aside.
    let mut items = Vec::new();
    let mut positioned = Vec::new();
    for &c in &tree[id].children {
        if !tree[c].displayed {
            continue;
        }
        if is_positioned(tree, c) {
            positioned.push(c);
        } else {
            items.push(c);
        }
    }
    // [§ 5.4 Display Order: the order property](https://www.w3.org/TR/css-flexbox-1/#order-property)
    //
    // "Flex items are, by default, displayed and laid out in the same order
    // as they appear in the source document."
    items.sort_by_key(|&c| tree[c].style.order);

    // STEP 3: Base sizes and lines.
    let single_line = !wraps || container_main.is_none();
    let mut entries: Vec<FlexEntry> = items
        .iter()
        .map(|&c| flex_base(tree, ctx, id, c, row, container_main, single_line))
        .collect();
    let ranges = collect_lines(&entries, container_main, wraps, main_gap);

    // STEP 4: Main sizes.
    for range in &ranges {
        let line = &mut entries[range.clone()];
        let gaps_total = main_gap * line.len().saturating_sub(1) as f32;
        match container_main {
            Some(main) => resolve_flexible_lengths(line, main - gaps_total),
            None => {
                for entry in line.iter_mut() {
                    entry.target = entry.hypothetical;
                }
            }
        }
    }
    layout_items_at_main(tree, ctx, &mut entries, row);

    // STEP 5: Cross sizes of the lines.
    let definite_cross = if row {
        tree[id].block.hset.then_some(tree[id].content.height)
    } else {
        Some(tree[id].content.width)
    };
    let mut lines: Vec<FlexLine> = ranges
        .iter()
        .map(|range| {
            let (cross, baseline) = line_cross_size(tree, id, &entries[range.clone()], row);
            FlexLine {
                items: range.clone(),
                cross,
                baseline,
                offset: 0.0,
            }
        })
        .collect();
    // "If the flex container is single-line and has a definite cross size,
    // the cross size of the flex line is the flex container's inner cross
    // size."
    if let (1, Some(cross)) = (lines.len(), definite_cross) {
        lines[0].cross = cross;
    }
    let lines_cross = |lines: &[FlexLine]| {
        lines.iter().map(|l| l.cross).sum::<f32>() + cross_gap * lines.len().saturating_sub(1) as f32
    };
    let (start, between) = match definite_cross {
        Some(cross) if lines.len() > 1 => {
            let free = cross - lines_cross(&lines);
            let (start, between, grow) = align_content_offsets(style.align_content, free, lines.len());
            for line in &mut lines {
                line.cross += grow;
            }
            (start, between)
        }
        _ => (0.0, 0.0),
    };
    let mut offset = start;
    for line in &mut lines {
        line.offset = offset;
        offset += line.cross + cross_gap + between;
    }
    let container_cross = definite_cross.unwrap_or_else(|| lines_cross(&lines));
    if style.flex_wrap == FlexWrap::WrapReverse {
        for line in &mut lines {
            line.offset = container_cross - line.offset - line.cross;
        }
    }

    // STEP 6: Stretch, then position along both axes.
    let mut used_main: f32 = 0.0;
    for (n, line) in lines.iter().enumerate() {
        for entry in &mut entries[line.items.clone()] {
            let Some(item) = entry.id else { continue };
            tree[item].item.flex_line = n;
            if is_stretched(tree, id, item, row) && (entry.cross - line.cross).abs() > f32::EPSILON {
                stretch_item(tree, ctx, item, line.cross, row);
                entry.cross = line.cross;
            }
        }
        let line_entries = &entries[line.items.clone()];
        let count = line_entries.len();
        let sum: f32 = line_entries.iter().map(FlexEntry::outer_target).sum::<f32>()
            + main_gap * count.saturating_sub(1) as f32;
        used_main = used_main.max(sum);
        let main_size = container_main.unwrap_or(sum);
        let (initial, extra) = justify_offsets(style.justify_content, main_size - sum, count);
        let mut pos = initial;
        for entry in line_entries {
            let Some(item) = entry.id else { continue };
            let outer = entry.outer_target();
            let main_pos = if reverse { main_size - pos - outer } else { pos };
            let cross_pos = line.offset
                + match item_align(tree, id, item) {
                    AlignItems::FlexEnd => line.cross - entry.cross,
                    AlignItems::Center => (line.cross - entry.cross) / 2.0,
                    AlignItems::Baseline if row => line.baseline - entry.baseline,
                    _ => 0.0,
                };
            if row {
                set_position(tree, item, main_pos, cross_pos);
            } else {
                set_position(tree, item, cross_pos, main_pos);
            }
            pos += outer + main_gap + extra;
        }
    }

    // STEP 7: Container height.
    //
    // [§ 9.6 step 15](https://www.w3.org/TR/css-flexbox-1/#algo-cross-container)
    //
    // "If the cross size property is a definite size, use that, clamped by
    // the used min and max cross sizes of the flex container. Otherwise, use
    // the sum of the flex lines' cross sizes."
    if !tree[id].block.hset {
        let height = if row { container_cross } else { used_main };
        set_content_height(tree, id, height);
    }
    update_child_sizes(tree, ctx, id);

    // STEP 8: Absolutely positioned children.
    //
    // [§ 4.1 Absolutely-Positioned Flex Children](https://www.w3.org/TR/css-flexbox-1/#abspos-items)
    //
    // "An absolutely-positioned child of a flex container does not
    // participate in flex layout."
    for c in positioned {
        layout_block_positioned(tree, ctx, c);
    }
    set_size_to_total(tree, id);
    trace!(
        target: "quokka::layout",
        "flex {id:?}: {} items in {} lines, {:?}",
        items.len(),
        lines.len(),
        tree[id].bounds
    );
    true
}

/// Intrinsic width contribution of an item.
pub(crate) fn item_width(tree: &BoxTree, ctx: &LayoutContext<'_>, item: BoxId, max: bool) -> f32 {
    let b = &tree[item];
    let declared = b.style.width.length().filter(|l| !l.is_percent()).map(|l| {
        let px = decoder_for(tree, item).px(l, 0.0);
        if b.style.box_sizing == BoxSizing::BorderBox {
            (px - b.border.horizontal() - b.padding.horizontal()).max(0.0)
        } else {
            px
        }
    });
    let mut w = declared.unwrap_or_else(|| {
        if max {
            maximal_content_width(tree, ctx, item)
        } else {
            minimal_content_width(tree, ctx, item)
        }
    });
    if let Some(mx) = b.block.max_width {
        w = w.min(mx);
    }
    if let Some(mn) = b.block.min_width {
        w = w.max(mn);
    }
    w + b.decl_margin.horizontal() + b.border.horizontal() + b.padding.horizontal()
}

fn content_width(tree: &BoxTree, ctx: &LayoutContext<'_>, id: BoxId, max: bool) -> f32 {
    let style = &tree[id].style;
    let row = style.flex_direction.is_row();
    let (main_gap, _) = gaps(tree, id, row);
    let widths: Vec<f32> = tree[id]
        .children
        .iter()
        .copied()
        .filter(|&c| tree[c].displayed && !is_positioned(tree, c))
        .map(|c| item_width(tree, ctx, c, max))
        .collect();
    // A single line needs the sum, a wrapping one the widest item.
    if row && (max || style.flex_wrap == FlexWrap::Nowrap) {
        widths.iter().sum::<f32>() + main_gap * widths.len().saturating_sub(1) as f32
    } else {
        widths.iter().copied().fold(0.0, f32::max)
    }
}

/// [§ 9.9.1 Flex Container Intrinsic Main Sizes](https://www.w3.org/TR/css-flexbox-1/#intrinsic-main-sizes)
///
/// Narrowest content width of a flex container.
#[must_use]
pub fn content_minimal_width(tree: &BoxTree, ctx: &LayoutContext<'_>, id: BoxId) -> f32 {
    content_width(tree, ctx, id, false)
}

/// Preferred content width of a flex container.
#[must_use]
pub fn content_maximal_width(tree: &BoxTree, ctx: &LayoutContext<'_>, id: BoxId) -> f32 {
    content_width(tree, ctx, id, true)
}

/// Margin box width of a container from its content width, honoring a
/// declared width and the min/max constraints.
pub(crate) fn outer_width(tree: &BoxTree, id: BoxId, content: f32) -> f32 {
    let b = &tree[id];
    let w = if b.block.wset && !b.block.wrelative { b.content.width } else { content };
    let w = b.block.max_width.map_or(w, |max| w.min(max));
    let w = b.block.min_width.map_or(w, |min| w.max(min));
    w + b.decl_margin.horizontal() + b.border.horizontal() + b.padding.horizontal()
}

/// Narrowest margin box of a flex container.
#[must_use]
pub fn minimal_width(tree: &BoxTree, ctx: &LayoutContext<'_>, id: BoxId) -> f32 {
    outer_width(tree, id, content_minimal_width(tree, ctx, id))
}

/// Preferred margin box width of a flex container.
#[must_use]
pub fn maximal_width(tree: &BoxTree, ctx: &LayoutContext<'_>, id: BoxId) -> f32 {
    outer_width(tree, id, content_maximal_width(tree, ctx, id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    fn entry(base: f32, grow: f32, shrink: f32) -> FlexEntry {
        let mut e = FlexEntry {
            base_size: base,
            grow,
            shrink,
            ..FlexEntry::default()
        };
        e.hypothetical = e.clamp(base);
        e
    }

    #[test]
    fn test_grow_splits_free_space_by_factor() {
        let mut items = vec![entry(100.0, 1.0, 1.0), entry(100.0, 3.0, 1.0)];
        resolve_flexible_lengths(&mut items, 600.0);
        assert!((items[0].target - 200.0).abs() < 0.01, "got {}", items[0].target);
        assert!((items[1].target - 400.0).abs() < 0.01, "got {}", items[1].target);
    }

    #[test]
    fn test_shrink_is_weighted_by_base_size() {
        let mut items = vec![entry(300.0, 0.0, 1.0), entry(100.0, 0.0, 1.0)];
        resolve_flexible_lengths(&mut items, 200.0);
        assert!((items[0].target - 150.0).abs() < 0.01, "got {}", items[0].target);
        assert!((items[1].target - 50.0).abs() < 0.01, "got {}", items[1].target);
    }

    #[test]
    fn test_max_violation_freezes_and_redistributes() {
        let mut items = vec![entry(0.0, 1.0, 1.0), entry(0.0, 1.0, 1.0)];
        items[0].max_main = Some(50.0);
        resolve_flexible_lengths(&mut items, 300.0);
        assert!((items[0].target - 50.0).abs() < 0.01);
        assert!((items[1].target - 250.0).abs() < 0.01);
    }

    #[test]
    fn test_zero_factors_do_not_flex() {
        let mut items = vec![entry(80.0, 0.0, 0.0), entry(20.0, 0.0, 0.0)];
        resolve_flexible_lengths(&mut items, 500.0);
        assert_eq!(items[0].target, 80.0);
        assert_eq!(items[1].target, 20.0);
    }

    #[test]
    fn test_lines_break_before_overflow() {
        let items = vec![entry(100.0, 0.0, 1.0), entry(100.0, 0.0, 1.0), entry(100.0, 0.0, 1.0)];
        let lines = collect_lines(&items, Some(250.0), true, 10.0);
        assert_eq!(lines, vec![0..2, 2..3]);
        assert_eq!(collect_lines(&items, Some(250.0), false, 10.0), vec![0..3]);
    }

    #[test]
    fn test_justify_offsets() {
        assert_eq!(justify_offsets(JustifyContent::Center, 100.0, 2), (50.0, 0.0));
        assert_eq!(justify_offsets(JustifyContent::SpaceBetween, 100.0, 3), (0.0, 50.0));
        assert_eq!(justify_offsets(JustifyContent::SpaceAround, 100.0, 2), (25.0, 50.0));
        assert_eq!(justify_offsets(JustifyContent::SpaceEvenly, 90.0, 2), (30.0, 30.0));
        assert_eq!(justify_offsets(JustifyContent::SpaceBetween, 100.0, 1), (0.0, 0.0));
    }

    #[quickcheck]
    fn prop_grow_deltas_sum_to_free_space(bases: Vec<u8>, grows: Vec<u8>, extra: u16) -> bool {
        let mut items: Vec<FlexEntry> = bases
            .iter()
            .zip(grows.iter())
            .take(16)
            .map(|(&b, &g)| entry(f32::from(b), f32::from(g % 5) + 1.0, 1.0))
            .collect();
        if items.is_empty() {
            return true;
        }
        let sum: f32 = items.iter().map(|e| e.base_size).sum();
        let free = f32::from(extra) + 1.0;
        resolve_flexible_lengths(&mut items, sum + free);
        let delta: f32 = items.iter().map(|e| e.target - e.base_size).sum();
        (delta - free).abs() < 0.1 + free * 1e-5
    }
}
