//! Block container layout.
//!
//! [§ 9.4.1 Block formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#block-formatting)
//!
//! "In a block formatting context, boxes are laid out one after the other,
//! vertically, beginning at the top of a containing block. The vertical
//! distance between two sibling boxes is determined by the 'margin'
//! properties. Vertical margins between adjacent block-level boxes in a
//! block formatting context collapse."
//!
//! [§ 9.4.2 Inline formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#inline-formatting)
//!
//! "In an inline formatting context, boxes are laid out horizontally, one
//! after the other, beginning at the top of a containing block."
//!
//! A block either contains block-level boxes only (`contblock`) and stacks
//! them, or contains inline-level content and breaks it into line boxes.
//! Floats and absolutely positioned boxes may appear in both.

use log::trace;

use crate::style::{Clear, Float, TextAlign};

use super::box_tree::{BoxId, BoxKind, BoxTree, FloatListId, LayoutContext, LineRef};
use super::element::{
    CollapsedMargin, establishes_bfc, has_fixed_height, has_fixed_width, is_floating,
    is_in_flow, is_positioned, is_relative, margins_adjoin, may_overlap_floats, move_right,
    relative_offset, separated_from_bottom, separated_from_top, set_position, set_size_to_total,
    total_width,
};
use super::float_list::{FloatEntry, FloatList};
use super::geometry::Dimension;
use super::inline;
use super::line::{LineBox, baseline_offset};
use super::sizes::{
    set_content_height, set_content_width, set_width_adjust, update_child_sizes, update_sizes,
};

/// [§ 9.5 Floats](https://www.w3.org/TR/CSS2/visuren.html#floats)
///
/// Narrowest line, in pixels, worth placing inline content on next to
/// floats. Narrower lines are skipped.
pub const INFLOW_SPACE_THRESHOLD: f32 = 15.0;

/// Progress of the layout of the children of one block.
#[derive(Debug, Clone, Copy, Default)]
struct BlockLayoutStatus {
    /// Width of the inline content already placed on the current line.
    inline_width: f32,
    /// Current y offset in the content box.
    y: f32,
    /// Widest child so far.
    maxw: f32,
    /// Tallest line so far.
    maxh: f32,
}

/// Lay out a block container in `availw` pixels.
///
/// Block layout always succeeds except for an inline-block that does not
/// fit its line when the layout is not forced.
pub fn do_layout(tree: &mut BoxTree, ctx: &LayoutContext<'_>, id: BoxId, availw: f32, force: bool) -> bool {
    if !tree[id].displayed {
        let b = &mut tree[id];
        b.content = Dimension::default();
        b.bounds.set_size(0.0, 0.0);
        return true;
    }
    let _ = float_lists(tree, id);

    // STEP 1: Drop the continuations of a previous layout.
    clear_splitted(tree, id);

    // STEP 2: Shrink-to-fit.
    //
    // [§ 10.3.5 Floating, non-replaced elements](https://www.w3.org/TR/CSS2/visudet.html#float-width)
    //
    // "the shrink-to-fit width is: min(max(preferred minimum width,
    // available width), preferred width)."
    if !has_fixed_width(tree, id) {
        let min = min_content_width_limit(tree, id).max(minimal_content_width(tree, ctx, id));
        let max = maximal_content_width(tree, ctx, id);
        let b = &tree[id];
        let availcont =
            availw - b.emargin.horizontal() - b.border.horizontal() - b.padding.horizontal();
        let pref = min.max(availcont).min(max);
        set_content_width(tree, id, pref);
        update_child_sizes(tree, ctx, id);
    }

    // STEP 3: The width is fixed from here on.
    tree[id].block.width_computed = true;
    tree[id].avail_width = availw;
    if tree[id].kind == BoxKind::InlineBlock {
        tree[id].block.last_layout = Some((availw, force));
        if !force && availw < total_width(tree, id) {
            return false;
        }
    }

    // STEP 4: Lay out the content.
    if tree[id].block.contblock {
        layout_blocks(tree, ctx, id);
    } else {
        layout_inline(tree, ctx, id);
    }
    trace!(
        target: "quokka::layout",
        "block {id:?} laid out in {availw}: {:?}",
        tree[id].bounds
    );
    true
}

/// Remove the continuation boxes created by a previous layout.
pub fn clear_splitted(tree: &mut BoxTree, id: BoxId) {
    let children = &tree[id].children;
    if children.iter().any(|&c| tree[c].splitted) {
        let kept: Vec<BoxId> = children.iter().copied().filter(|&c| !tree[c].splitted).collect();
        tree[id].set_children(kept);
    }
}

/// Give a box fresh float lists: it establishes a new block formatting
/// context for its content.
pub fn new_float_context(tree: &mut BoxTree, id: BoxId) {
    let left = tree.new_float_list(id);
    let right = tree.new_float_list(id);
    set_floats(tree, id, left, right, 0.0, 0.0, 0.0);
}

/// Attach a box to a pair of float lists at the given offsets from the
/// list owner's content box.
pub fn set_floats(
    tree: &mut BoxTree,
    id: BoxId,
    left: FloatListId,
    right: FloatListId,
    xl: f32,
    xr: f32,
    y: f32,
) {
    let block = &mut tree[id].block;
    block.fleft = Some(left);
    block.fright = Some(right);
    block.float_xl = xl;
    block.float_xr = xr;
    block.float_y = y;
}

/// The float lists of a box, created when the box has none yet.
fn float_lists(tree: &mut BoxTree, id: BoxId) -> (FloatListId, FloatListId) {
    if let (Some(left), Some(right)) = (tree[id].block.fleft, tree[id].block.fright) {
        return (left, right);
    }
    let left = tree.new_float_list(id);
    let right = tree.new_float_list(id);
    set_floats(tree, id, left, right, 0.0, 0.0, 0.0);
    (left, right)
}

/// Width of the content area the children may use.
#[must_use]
pub fn available_content_width(tree: &BoxTree, id: BoxId) -> f32 {
    let b = &tree[id];
    let mut ret = b.avail_width - b.margin.horizontal() - b.border.horizontal() - b.padding.horizontal();
    if let Some(max) = b.block.max_width {
        ret = ret.min(max);
    }
    if b.block.width_computed {
        ret = ret.min(b.content.width);
    }
    ret
}

/// Space taken by the floats of both lists at `y`, measured from the
/// content edges of `id`.
fn float_limits_at(tree: &BoxTree, id: BoxId, left: FloatListId, right: FloatListId, y: f32) -> (f32, f32) {
    let block = &tree[id].block;
    let fy = y + block.float_y;
    (
        (tree.float_list(left).width_at(fy) - block.float_xl).max(0.0),
        (tree.float_list(right).width_at(fy) - block.float_xr).max(0.0),
    )
}

/// [§ 9.5.2 Controlling flow next to floats: the 'clear' property](https://www.w3.org/TR/CSS2/visuren.html#flow-control)
///
/// "Computing the clearance of an element on which 'clear' is set is done
/// by first determining the hypothetical position of the element's top
/// border edge within its parent block."
///
/// The lowest y in the content box of `id` a clearing child may start at.
fn clearance_y(tree: &BoxTree, id: BoxId, child: BoxId) -> Option<f32> {
    let block = &tree[id].block;
    let (left, right) = (block.fleft?, block.fright?);
    let left_y = tree.float_list(left).max_y() - block.float_y;
    let right_y = tree.float_list(right).max_y() - block.float_y;
    match tree[child].style.clear {
        Clear::None => None,
        Clear::Left => Some(left_y),
        Clear::Right => Some(right_y),
        Clear::Both => Some(left_y.max(right_y)),
    }
}

fn layout_child(tree: &mut BoxTree, ctx: &LayoutContext<'_>, id: BoxId, availw: f32, force: bool, linestart: bool) -> bool {
    super::do_layout(tree, ctx, id, availw, force, linestart)
}

/// [§ 9.4.2 Inline formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#inline-formatting)
///
/// "When the total width of the inline boxes on a line is less than the
/// width of the line box containing them, their horizontal distribution
/// within the line box is determined by the 'text-align' property. When an
/// inline box exceeds the width of a line box, it is split into several
/// boxes and these boxes are distributed across several line boxes."
fn layout_inline(tree: &mut BoxTree, ctx: &LayoutContext<'_>, id: BoxId) {
    let (fleft, fright) = float_lists(tree, id);
    let (float_xl, float_xr, float_y) = {
        let block = &tree[id].block;
        (block.float_xl, block.float_xr, block.float_y)
    };
    let wlimit = available_content_width(tree, id);
    let line_height = tree[id].line_height;
    let wraps = inline::allows_wrapping(tree, id);

    // Line width without floats.
    let minx1 = (-float_xl).max(0.0);
    let minx2 = (-float_xr).max(0.0);
    let (mut x1, mut x2) = float_limits_at(tree, id, fleft, fright, 0.0);
    let mut x = x1 + tree[id].block.indent;
    let mut y = 0.0;
    // First child of the current line and the last break opportunity.
    let mut lnstr = 0;
    let mut lastbreak = 0;

    let mut lines: Vec<LineBox> = Vec::new();
    let mut curline = tree[id].block.first_line.clone().map_or_else(
        || LineBox::new(id, 0, 0.0),
        |mut line| {
            line.owner = Some(id);
            line
        },
    );

    let mut i = 0;
    while i < tree[id].children.len() {
        let sub = tree[id].children[i];

        // Floats and absolutely positioned boxes between the inline content.
        if tree[sub].is_block {
            let mut stat = BlockLayoutStatus {
                inline_width: x - x1,
                y,
                ..BlockLayoutStatus::default()
            };
            let atstart = x <= x1;
            if let Some(ny) = clearance_y(tree, id, sub) {
                stat.y = stat.y.max(ny);
            }
            if is_floating(tree, sub) {
                layout_block_floating(tree, ctx, id, sub, wlimit, &mut stat);
                // "If a shortened line box is too small to contain any
                // content, then the line box is shifted downward"; a left
                // float that fits shifts the content already on the line.
                if tree[sub].style.float == Float::Left && stat.inline_width > 0.0 && curline.start < i {
                    let w = tree[sub].bounds.width;
                    for j in curline.start..i {
                        let c = tree[id].children[j];
                        if !tree[c].is_block {
                            move_right(tree, c, w);
                        }
                    }
                    x += w;
                }
            } else {
                layout_block_positioned(tree, ctx, sub);
            }
            (x1, x2) = float_limits_at(tree, id, fleft, fright, y);
            if atstart && x < x1 {
                x = x1;
            }
            i += 1;
            continue;
        }

        if inline::can_split_before(tree, sub) {
            lastbreak = i;
        }
        loop {
            let mut split = false;
            let space = wlimit - x1 - x2;
            let narrowed = x1 > minx1 || x2 > minx2;
            let force = (x == x1 || lastbreak == lnstr || !wraps) && !narrowed;
            let fit = (space >= INFLOW_SPACE_THRESHOLD || !narrowed)
                && layout_child(tree, ctx, sub, wlimit - x - x2, force, x == x1);
            if fit {
                if is_in_flow(tree, sub) {
                    set_position(tree, sub, x, 0.0);
                    x += tree[sub].bounds.width;
                }
                curline.consider_box(tree, sub);
            }
            let over = x > wlimit - x2;
            let linebreak = inline::finished_by_line_break(tree, sub);
            let rest = tree[sub].rest;

            if !fit && narrowed && (x == x1 || lastbreak == lnstr) {
                // STEP 1: Nothing fits next to the floats, move below them.
                if lnstr < i {
                    lnstr = i;
                    curline.end = lnstr;
                    lines.push(std::mem::replace(&mut curline, LineBox::new(id, lnstr, y)));
                }
                y += line_height;
                curline.y = y;
                (x1, x2) = float_limits_at(tree, id, fleft, fright, y);
                x = x1;
                split = line_height > 0.0;
            } else if (!fit && lastbreak > lnstr) || (fit && (over || linebreak || rest.is_some())) {
                // STEP 2: Finish the line.
                curline.width = x - x1;
                curline.set_limits(x1, x2);
                y += curline.max_box_height;
                (x1, x2) = float_limits_at(tree, id, fleft, fright, y);
                x = x1;
                if fit {
                    if let Some(rest) = rest {
                        tree[id].insert_child(i + 1, rest);
                        tree[rest].parent = Some(id);
                    }
                    lnstr = i + 1;
                } else {
                    lnstr = i;
                    split = true;
                }
                curline.end = lnstr;
                lines.push(std::mem::replace(&mut curline, LineBox::new(id, lnstr, y)));
            }
            if !split {
                break;
            }
        }
        if inline::can_split_after(tree, sub) {
            lastbreak = i + 1;
        }
        i += 1;
    }

    // STEP 3: The height follows from the lines.
    if !has_fixed_height(tree, id) {
        y += curline.max_box_height;
        if encloses_floats(tree, id) {
            y = y.max(float_height(tree, id) - float_y);
        }
        set_content_height(tree, id, y);
        update_sizes(tree, ctx, id);
        update_child_sizes(tree, ctx, id);
    }
    set_size_to_total(tree, id);

    // STEP 4: Align the lines.
    curline.width = x - x1;
    curline.set_limits(x1, x2);
    curline.end = tree[id].children.len();
    lines.push(curline);
    let count = lines.len();
    for (n, line) in lines.iter().enumerate() {
        align_line_horizontally(tree, id, line, n + 1 == count);
        align_line_vertically(tree, id, line);
    }
}

/// [§ 16.2 Alignment: the 'text-align' property](https://www.w3.org/TR/CSS2/text.html#alignment-prop)
fn align_line_horizontally(tree: &mut BoxTree, id: BoxId, line: &LineBox, is_last: bool) {
    let dif = tree[id].content.width - line.limits() - line.width;
    if dif <= 0.0 {
        return;
    }
    let shift = match tree[id].style.text_align {
        TextAlign::Left => return,
        TextAlign::Justify => {
            // "If an element has a computed value for 'white-space' of 'pre'
            // or 'pre-wrap', then neither the glyphs of that element's text
            // content nor its white space may be altered by any
            // justification algorithm." The last line is left-aligned.
            if !is_last {
                let _ = extend_inline_child_widths(tree, id, dif, line.start, line.end, true, true);
            }
            return;
        }
        TextAlign::Right => dif,
        TextAlign::Center => dif / 2.0,
    };
    for i in line.start..line.end.min(tree[id].children.len()) {
        let c = tree[id].children[i];
        if !tree[c].is_block {
            move_right(tree, c, shift);
        }
    }
}

/// Spread `dif` pixels over the expansion points of the children
/// `start..end`.
pub(crate) fn extend_inline_child_widths(
    tree: &mut BoxTree,
    id: BoxId,
    dif: f32,
    start: usize,
    end: usize,
    at_start: bool,
    at_end: bool,
) -> f32 {
    let end = end.min(tree[id].children.len());
    if start >= end {
        return 0.0;
    }
    let children: Vec<BoxId> = tree[id].children[start..end].to_vec();
    let points: Vec<usize> = children
        .iter()
        .enumerate()
        .map(|(n, &c)| {
            if tree[c].is_block {
                0
            } else {
                inline::expansion_points(tree, c, at_start && n == 0, at_end && n + 1 == children.len())
            }
        })
        .collect();
    let total: usize = points.iter().sum();
    if total == 0 {
        return 0.0;
    }
    let mut ofsx = 0.0;
    let mut remain = dif;
    for (&c, &exp) in children.iter().zip(&points) {
        if tree[c].is_block {
            continue;
        }
        let toadd = (dif * exp as f32 / total as f32).min(remain);
        move_right(tree, c, ofsx);
        inline::extend_width(tree, c, toadd, at_start && c == children[0], at_end && Some(&c) == children.last());
        ofsx += toadd;
        remain -= toadd;
    }
    ofsx
}

/// [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
fn align_line_vertically(tree: &mut BoxTree, id: BoxId, line: &LineBox) {
    for i in line.start..line.end.min(tree[id].children.len()) {
        let c = tree[id].children[i];
        if tree[c].is_block {
            continue;
        }
        let mut dif = line.align_box(tree, c);
        if tree[c].kind == BoxKind::Inline {
            dif -= tree[c].content_offset_y();
        }
        inline::set_line_box(
            tree,
            c,
            LineRef {
                owner: Some(id),
                y: line.y,
                total_height: line.max_box_height,
            },
        );
        let dy = line.y + line.top_offset() + line.lead() / 2.0 + dif;
        super::element::move_down(tree, c, dy);
    }
}

/// [§ 9.4.1 Block formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#block-formatting)
fn layout_blocks(tree: &mut BoxTree, ctx: &LayoutContext<'_>, id: BoxId) {
    let _ = float_lists(tree, id);
    let wlimit = available_content_width(tree, id);
    let mut stat = BlockLayoutStatus::default();
    let separated_top = separated_from_top(tree, id);
    // Bottom border edge of the last child that separates margins, or the
    // content top.
    let mut edge_y: f32 = 0.0;
    // Margins adjoining `edge_y` that have not been used yet.
    let mut pending = CollapsedMargin::default();
    // No child has separated the margins yet.
    let mut at_top = true;

    let mut i = 0;
    while i < tree[id].children.len() {
        let sub = tree[id].children[i];
        if !tree[sub].displayed || !tree[sub].kind.is_block_like() {
            i += 1;
            continue;
        }
        let mut nexty = stat.y;

        if is_in_flow(tree, sub) {
            // STEP 1: Collapse the margins.
            //
            // [§ 8.3.1 Collapsing margins](https://www.w3.org/TR/CSS2/box.html#collapsing-margins)
            //
            // Margins collapsing through the top of a box that is not
            // separated from it belong to the box itself, so the first
            // children sit right at the content top.
            let boxempty = margins_adjoin(tree, sub);
            let (ctop, cbottom) = (tree[sub].emargin.top, tree[sub].emargin.bottom);
            pending.add(ctop);
            let mut border_y = if at_top && !separated_top {
                edge_y
            } else {
                edge_y + pending.height()
            };

            // STEP 2: Clearance.
            //
            // "Margins of elements that have clearance never collapse with
            // their parent block's bottom margin."
            let mut clearance = false;
            if let Some(ny) = clearance_y(tree, id, sub)
                && border_y < ny
            {
                border_y = ny;
                clearance = true;
            }

            // STEP 3: Lay out the child with its border edge at `border_y`.
            stat.y = border_y - ctop;
            if may_overlap_floats(tree, sub) {
                layout_block_in_flow(tree, ctx, id, sub, wlimit, &mut stat);
            } else {
                layout_block_in_flow_avoid_floats(tree, ctx, id, sub, wlimit, &mut stat);
            }
            if let Some(rest) = tree[sub].rest {
                tree[id].insert_child(i + 1, rest);
                tree[rest].parent = Some(id);
            }
            nexty = stat.y;

            // STEP 4: Remember what the next sibling collapses with.
            if boxempty && !clearance {
                pending.add(cbottom);
            } else {
                at_top = false;
                edge_y = if boxempty {
                    border_y
                } else {
                    let b = &tree[sub];
                    b.bounds.y + ctop + b.border_height()
                };
                pending = CollapsedMargin::of(cbottom);
            }
        } else if is_floating(tree, sub) {
            if let Some(ny) = clearance_y(tree, id, sub) {
                stat.y = stat.y.max(ny);
            }
            layout_block_floating(tree, ctx, id, sub, wlimit, &mut stat);
        } else {
            layout_block_positioned(tree, ctx, sub);
        }
        stat.y = nexty;
        i += 1;
    }

    // STEP 5: The last bottom margins stay inside a box separated from
    // them, and collapse through otherwise.
    stat.y = edge_y;
    if separated_from_bottom(tree, id) && (!at_top || separated_top) {
        stat.y += pending.height();
    }
    if !has_fixed_height(tree, id) {
        if encloses_floats(tree, id) {
            let float_y = tree[id].block.float_y;
            stat.y = stat.y.max(float_height(tree, id) - float_y);
        }
        set_content_height(tree, id, stat.y);
        update_sizes(tree, ctx, id);
        update_child_sizes(tree, ctx, id);
    }
    set_size_to_total(tree, id);
}

/// [§ 10.6.7 'Auto' heights for block formatting context roots](https://www.w3.org/TR/CSS2/visudet.html#root-height)
///
/// "In addition, if the element has any floating descendants whose bottom
/// margin edge is below the element's bottom content edge, then the height
/// is increased to include those edges."
fn encloses_floats(tree: &BoxTree, id: BoxId) -> bool {
    establishes_bfc(tree, id) || tree[id].kind == BoxKind::Viewport
}

/// A child that may overlap the floats of the surrounding context.
fn layout_block_in_flow(
    tree: &mut BoxTree,
    ctx: &LayoutContext<'_>,
    id: BoxId,
    sub: BoxId,
    wlimit: f32,
    stat: &mut BlockLayoutStatus,
) {
    let (fleft, fright) = float_lists(tree, id);
    let (mut xl, mut xr, mut fy) = {
        let parent = &tree[id].block;
        let s = &tree[sub];
        (
            parent.float_xl + s.margin.left + s.border.left + s.padding.left,
            parent.float_xr + s.margin.right + s.border.right + s.padding.right,
            parent.float_y + s.emargin.top + s.border.top + s.padding.top,
        )
    };
    if is_relative(tree, sub) {
        let (dx, dy) = relative_offset(tree, sub);
        xl += dx;
        xr -= dx;
        fy += dy;
    }
    set_floats(tree, sub, fleft, fright, xl.max(0.0), xr.max(0.0), stat.y + fy);
    set_position(tree, sub, 0.0, stat.y);
    let _ = layout_child(tree, ctx, sub, wlimit, true, true);
    stat.y += tree[sub].bounds.height;
    stat.maxw = stat.maxw.max(tree[sub].bounds.width);
}

/// [§ 9.5 Floats](https://www.w3.org/TR/CSS2/visuren.html#floats)
///
/// "The border box of a table, a block-level replaced element, or an
/// element in the normal flow that establishes a new block formatting
/// context (such as an element with 'overflow' other than 'visible') must
/// not overlap the margin box of any floats in the same block formatting
/// context as the element itself. If necessary, implementations should
/// clear the said element by placing it below any preceding floats, but
/// may place it adjacent to such floats if there is sufficient space."
fn layout_block_in_flow_avoid_floats(
    tree: &mut BoxTree,
    ctx: &LayoutContext<'_>,
    id: BoxId,
    sub: BoxId,
    wlimit: f32,
    stat: &mut BlockLayoutStatus,
) {
    let (fleft, fright) = float_lists(tree, id);
    let (float_xl, float_xr, float_y) = {
        let block = &tree[id].block;
        (block.float_xl, block.float_xr, block.float_y)
    };
    let line_height = tree[id].line_height;
    let minw = min_decoration_width(tree, sub);
    let limits = |tree: &BoxTree, fy: f32| {
        (
            (tree.float_list(fleft).width_at(fy) - float_xl).max(0.0),
            (tree.float_list(fright).width_at(fy) - float_xr).max(0.0),
        )
    };
    let next_change =
        |tree: &BoxTree, fy: f32| FloatList::next_y_change_both(tree.float_list(fleft), tree.float_list(fright), fy);

    let mut yoffset = Some(stat.y + float_y);
    while let Some(start) = yoffset {
        // STEP 1: Find the first y where the minimal width fits.
        let mut fy = start;
        let (mut flx, mut frx) = limits(tree, fy);
        let mut avail = wlimit - flx - frx;
        while (flx > float_xl || frx > float_xr) && minw > avail {
            let next = next_change(tree, fy).unwrap_or(fy + stat.maxh.max(line_height));
            if next <= fy {
                break;
            }
            fy = next;
            (flx, frx) = limits(tree, fy);
            avail = wlimit - flx - frx;
        }
        // The top margin may overlap the floats.
        let mtop = tree[sub].margin.top;
        if fy > start && mtop != 0.0 {
            fy = (fy - mtop).max(start);
        }

        // STEP 2: Lay the child out next to the floats.
        stat.y = fy - float_y;
        new_float_context(tree, sub);
        set_position(tree, sub, flx, stat.y);
        set_width_adjust(tree, ctx, sub, -flx - frx);
        let _ = layout_child(tree, ctx, sub, avail, true, true);

        // STEP 3: The floats along the whole height must leave room.
        let (lx, rx) = compute_float_limits(tree, id, fy, fy + tree[sub].bounds.height, (flx, frx));
        let availw = wlimit - lx - rx;
        yoffset = if minw > availw { next_change(tree, fy) } else { None };
    }
    stat.y += tree[sub].bounds.height;
    stat.maxw = stat.maxw.max(tree[sub].bounds.width);
}

/// [§ 9.5.1 Positioning the float: the 'float' property](https://www.w3.org/TR/CSS2/visuren.html#float-position)
///
/// "A floated box is shifted to the left or right until its outer edge
/// touches the containing block edge or the outer edge of another float.
/// If there is a line box, the outer top of the floated box is aligned
/// with the top of the current line box. If there is not enough horizontal
/// room for the float, it is shifted downward until either it fits or
/// there are no more floats present."
fn layout_block_floating(
    tree: &mut BoxTree,
    ctx: &LayoutContext<'_>,
    id: BoxId,
    sub: BoxId,
    wlimit: f32,
    stat: &mut BlockLayoutStatus,
) {
    new_float_context(tree, sub);
    let _ = layout_child(tree, ctx, sub, wlimit, true, true);

    let (fleft, fright) = float_lists(tree, id);
    let left = tree[sub].style.float == Float::Left;
    let (own, opposite) = if left { (fleft, fright) } else { (fright, fleft) };
    let (float_x, ofloat_x, float_y) = {
        let block = &tree[id].block;
        if left {
            (block.float_xl, block.float_xr, block.float_y)
        } else {
            (block.float_xr, block.float_xl, block.float_y)
        }
    };
    let line_height = tree[id].line_height;
    let edge = |width: f32, offset: f32| {
        let x = width.max(offset);
        if x == 0.0 && offset < 0.0 { offset } else { x }
    };

    // Rule 5: not above an earlier float.
    let mut fy = (stat.y + float_y).max(tree.float_list(own).last_y());
    let mut fx = edge(tree.float_list(own).width_at(fy), float_x);
    let mut ofx = edge(tree.float_list(opposite).width_at(fy), ofloat_x);
    let w = tree[sub].bounds.width;
    while (fx > float_x || ofx > ofloat_x || stat.inline_width > 0.0)
        && stat.inline_width + fx - float_x + ofx - ofloat_x + w > wlimit
    {
        let next = FloatList::next_y_change_both(tree.float_list(fleft), tree.float_list(fright), fy)
            .unwrap_or(fy + stat.maxh.max(line_height));
        if next <= fy {
            break;
        }
        fy = next;
        fx = edge(tree.float_list(own).width_at(fy), float_x);
        ofx = edge(tree.float_list(opposite).width_at(fy), ofloat_x);
        stat.inline_width = 0.0;
    }

    set_position(tree, sub, fx, fy);
    let bounds = tree[sub].bounds;
    tree.add_float(
        own,
        FloatEntry {
            id: sub,
            bounds,
            containing_block: Some(id),
        },
    );
    trace!(target: "quokka::layout", "float {sub:?} placed at ({fx}, {fy})");

    // A floating box encloses all the floats inside.
    let floatw = max_float_width(tree, id, fy, fy + bounds.height);
    stat.maxw = stat.maxw.max(floatw).min(wlimit);
}

/// [§ 10.3.8 Absolutely positioned, replaced elements](https://www.w3.org/TR/CSS2/visudet.html#abs-replaced-width)
///
/// The content of an absolutely positioned box is laid out in the width
/// left by its containing block and offsets. The position is resolved in
/// the positioning pass.
pub(crate) fn layout_block_positioned(tree: &mut BoxTree, ctx: &LayoutContext<'_>, sub: BoxId) {
    let mut wlimit = super::element::containing_block_size(tree, sub).width;
    let s = &tree[sub];
    if s.coords_set.left {
        wlimit -= s.coords.left;
    }
    if s.coords_set.right {
        wlimit -= s.coords.right;
    }
    new_float_context(tree, sub);
    let _ = layout_child(tree, ctx, sub, wlimit, true, true);
}

/// Widest extent of both float lists between `y1` and `y2`.
fn max_float_width(tree: &BoxTree, id: BoxId, y1: f32, y2: f32) -> f32 {
    let (Some(left), Some(right)) = (tree[id].block.fleft, tree[id].block.fright) else {
        return 0.0;
    };
    let (left, right) = (tree.float_list(left), tree.float_list(right));
    let mut ret: f32 = 0.0;
    let mut fy = y1;
    while fy < y2 {
        ret = ret.max(left.width_at(fy) + right.width_at(fy));
        match FloatList::next_y_change_both(left, right, fy) {
            Some(next) if next > fy => fy = next,
            _ => break,
        }
    }
    ret
}

/// The widest float limits on both sides between `y1` and `y2`, starting
/// from the limits at `y1`.
fn compute_float_limits(tree: &BoxTree, id: BoxId, y1: f32, y2: f32, start: (f32, f32)) -> (f32, f32) {
    let block = &tree[id].block;
    let (Some(left), Some(right)) = (block.fleft, block.fright) else {
        return start;
    };
    let (left, right) = (tree.float_list(left), tree.float_list(right));
    let (mut lx, mut rx) = start;
    let mut fy = y1;
    loop {
        match FloatList::next_y_change_both(left, right, fy) {
            Some(next) if next > fy => fy = next,
            _ => break,
        }
        if fy >= y2 {
            break;
        }
        lx = lx.max((left.width_at(fy) - block.float_xl).max(0.0));
        rx = rx.max((right.width_at(fy) - block.float_xr).max(0.0));
    }
    (lx, rx)
}

/// Lowest bottom edge of the floats placed by `id` and its in-flow
/// descendants sharing its float lists, in the float list coordinates.
#[must_use]
pub fn float_height(tree: &BoxTree, id: BoxId) -> f32 {
    let b = &tree[id];
    let (Some(left), Some(right)) = (b.block.fleft, b.block.fright) else {
        return 0.0;
    };
    let mut ret = tree
        .float_list(left)
        .max_y_for_owner(id)
        .max(tree.float_list(right).max_y_for_owner(id));
    if b.block.contblock {
        for &c in &b.children {
            let cb = &tree[c];
            if cb.kind.is_block_like() && cb.displayed && !is_positioned(tree, c) && cb.block.fleft == Some(left) {
                ret = ret.max(float_height(tree, c));
            }
        }
    }
    ret
}

/// [§ 8.3.1 Collapsing margins](https://www.w3.org/TR/CSS2/box.html#collapsing-margins)
///
/// "The top margin of a box is adjoining with the top margin of its first
/// in-flow child if the element has no top border, no top padding, and
/// the child has no clearance."
///
/// Computes `emargin` of `id` from its own margins and the collapsed
/// margins of its in-flow children, which must be up to date.
pub fn compute_efficient_margins(tree: &mut BoxTree, id: BoxId) {
    let mut top = CollapsedMargin::of(tree[id].margin.top);
    let mut bottom = CollapsedMargin::of(tree[id].margin.bottom);
    if tree[id].kind.is_block_like() && tree[id].block.contblock && tree[id].block.anyinflow {
        let separated_top = separated_from_top(tree, id);
        let mut firstseparated = false;
        // Margins adjoining the bottom border edge of the last child.
        let mut trailing = CollapsedMargin::default();
        let children = tree[id].children.clone();
        for c in children {
            if !tree[c].displayed || !is_in_flow(tree, c) || !tree[c].kind.is_block_like() {
                continue;
            }
            let boxempty = margins_adjoin(tree, c);
            let (ctop, cbottom) = (tree[c].emargin.top, tree[c].emargin.bottom);
            if !firstseparated && !separated_top {
                top.add(ctop);
            }
            if boxempty {
                trailing.add(ctop);
                trailing.add(cbottom);
            } else {
                trailing = CollapsedMargin::of(cbottom);
                firstseparated = true;
            }
        }
        if !separated_from_bottom(tree, id) {
            bottom.merge(trailing);
        }
    }
    // "If the top and bottom margins of a box are adjoining, then it is
    // possible for margins to collapse through it."
    if tree[id].kind.is_block_like() && margins_adjoin(tree, id) {
        top.merge(bottom);
        bottom = top;
    }
    let b = &mut tree[id];
    b.emargin.top = top.height();
    b.emargin.bottom = bottom.height();
}

/// [§ 10.4 Minimum and maximum widths](https://www.w3.org/TR/CSS2/visudet.html#min-max-widths)
fn clamp_width(tree: &BoxTree, id: BoxId, width: f32) -> f32 {
    let block = &tree[id].block;
    let mut w = width;
    if let Some(max) = block.max_width {
        w = w.min(max);
    }
    if let Some(min) = block.min_width {
        w = w.max(min);
    }
    w
}

fn horizontal_decoration(tree: &BoxTree, id: BoxId) -> f32 {
    let b = &tree[id];
    b.decl_margin.horizontal() + b.padding.horizontal() + b.border.horizontal()
}

/// Preferred minimum width of the margin box.
#[must_use]
pub fn minimal_width(tree: &BoxTree, ctx: &LayoutContext<'_>, id: BoxId) -> f32 {
    let b = &tree[id];
    let w = if b.block.wset && !b.block.wrelative {
        b.content.width
    } else {
        minimal_content_width(tree, ctx, id)
    };
    clamp_width(tree, id, w) + horizontal_decoration(tree, id)
}

/// Preferred width of the margin box.
#[must_use]
pub fn maximal_width(tree: &BoxTree, ctx: &LayoutContext<'_>, id: BoxId) -> f32 {
    let b = &tree[id];
    let w = if b.block.wset && !b.block.wrelative {
        b.content.width
    } else {
        maximal_content_width(tree, ctx, id)
    };
    clamp_width(tree, id, w) + horizontal_decoration(tree, id)
}

/// Narrowest the content can get: the widest unbreakable piece.
#[must_use]
pub fn minimal_content_width(tree: &BoxTree, ctx: &LayoutContext<'_>, id: BoxId) -> f32 {
    let mut ret: f32 = 0.0;
    let mut sum: f32 = 0.0;
    let mut max: f32 = 0.0;
    for &c in tree[id].active_children() {
        if !tree[c].displayed {
            continue;
        }
        if tree[c].is_block {
            if is_positioned(tree, c) {
                continue;
            }
            max = max.max(super::minimal_width(tree, ctx, c));
            sum = 0.0;
        } else {
            let wraps = inline::allows_wrapping(tree, c);
            if wraps && inline::can_split_before(tree, c) {
                sum = 0.0;
            }
            sum += super::minimal_width(tree, ctx, c);
            ret = ret.max(sum);
            if wraps && inline::can_split_after(tree, c) {
                sum = 0.0;
            }
        }
        ret = ret.max(sum).max(max);
    }
    ret
}

/// Width of the content without any line breaks other than forced ones.
#[must_use]
pub fn maximal_content_width(tree: &BoxTree, ctx: &LayoutContext<'_>, id: BoxId) -> f32 {
    let mut sum: f32 = 0.0;
    let mut max: f32 = 0.0;
    for &c in tree[id].active_children() {
        if !tree[c].displayed {
            continue;
        }
        if tree[c].is_block {
            if is_positioned(tree, c) {
                continue;
            }
            let w = super::maximal_width(tree, ctx, c);
            if is_floating(tree, c) {
                sum += w;
            } else {
                max = max.max(w).max(sum);
                sum = 0.0;
            }
        } else {
            let w = super::maximal_width(tree, ctx, c);
            if inline::contains_line_break(tree, c) {
                max = max.max(sum + inline::first_line_length(tree, ctx, c));
                sum = inline::last_line_length(tree, ctx, c);
                max = max.max(w);
            } else {
                sum += w;
            }
        }
    }
    max.max(sum)
}

/// The narrowest margin box an avoiding block can have: its declared width
/// or nothing, plus the decorations.
#[must_use]
pub fn min_decoration_width(tree: &BoxTree, id: BoxId) -> f32 {
    let b = &tree[id];
    let w = if b.block.wset { b.content.width } else { 0.0 };
    clamp_width(tree, id, w) + horizontal_decoration(tree, id)
}

/// Lower limit of the shrink-to-fit width coming from the box itself or
/// from the containing block.
#[must_use]
pub fn min_content_width_limit(tree: &BoxTree, id: BoxId) -> f32 {
    let b = &tree[id];
    if b.block.wset {
        return b.content.width;
    }
    if let Some(min) = b.block.min_width {
        return min;
    }
    if b.kind == BoxKind::Viewport {
        return tree.viewport.width;
    }
    if !b.is_block || b.kind == BoxKind::InlineBlock || !is_in_flow(tree, id) {
        return 0.0;
    }
    match b.containing_block {
        Some(cb) if tree[cb].kind.is_block_like() => {
            (min_content_width_limit(tree, cb) - horizontal_decoration(tree, id)).max(0.0)
        }
        _ => 0.0,
    }
}

/// Content y of a child in its parent's content box.
fn content_y(tree: &BoxTree, id: BoxId) -> f32 {
    tree[id].bounds.y + tree[id].content_offset_y()
}

/// [§ 10.8.1 'vertical-align'](https://www.w3.org/TR/CSS2/visudet.html#propdef-vertical-align)
///
/// Baseline of the first line box in the content of `id`, from the top of
/// its content box. `None` when there is no inline content.
#[must_use]
pub fn first_inline_box_baseline(tree: &BoxTree, id: BoxId) -> Option<f32> {
    let first = tree[id].active_children().iter().copied().find(|&c| is_in_flow(tree, c))?;
    if tree[first].is_block {
        if !tree[first].kind.is_block_like() {
            return None;
        }
        first_inline_box_baseline(tree, first).map(|b| b + content_y(tree, first))
    } else {
        Some(content_y(tree, first) + baseline_offset(tree, first))
    }
}

fn last_inline_box_baseline(tree: &BoxTree, id: BoxId) -> Option<f32> {
    let last = tree[id].active_children().iter().rev().copied().find(|&c| is_in_flow(tree, c))?;
    if tree[last].is_block {
        if !tree[last].kind.is_block_like() {
            return None;
        }
        last_inline_box_baseline(tree, last).map(|b| b + content_y(tree, last))
    } else {
        Some(content_y(tree, last) + baseline_offset(tree, last))
    }
}

/// "The baseline of an 'inline-block' is the baseline of its last line box
/// in the normal flow, unless it has either no in-flow line boxes or if its
/// 'overflow' property has a computed value other than 'visible', in which
/// case the baseline is the bottom margin edge."
#[must_use]
pub fn inline_block_baseline(tree: &BoxTree, id: BoxId) -> f32 {
    let b = &tree[id];
    if b.style.overflow != crate::style::Overflow::Visible {
        return b.bounds.height;
    }
    last_inline_box_baseline(tree, id)
        .map_or(b.bounds.height, |base| (base + b.content_offset_y()).min(b.bounds.height))
}

/// Seed the metrics of the first line of `id` and of its first in-flow
/// block descendants with the font of `source`.
pub fn init_first_line(tree: &mut BoxTree, id: BoxId, source: BoxId) {
    let mut line = tree[id].block.first_line.take().unwrap_or_else(|| LineBox::new(id, 0, 0.0));
    line.consider_box_properties(tree, source);
    tree[id].block.first_line = Some(line);
    let first = tree[id].active_children().iter().copied().find(|&c| is_in_flow(tree, c));
    if let Some(first) = first {
        if tree[first].is_block && tree[first].kind.is_block_like() {
            init_first_line(tree, first, source);
        }
    }
}
