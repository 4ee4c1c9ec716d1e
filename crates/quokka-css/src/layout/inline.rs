//! Inline boxes and the inline-level interface of all boxes.
//!
//! [§ 9.2.2 Inline-level elements and inline boxes](https://www.w3.org/TR/CSS2/visuren.html#inline-boxes)
//!
//! "Inline-level elements are those elements of the source document that
//! do not form new blocks of content; the content is distributed in lines."
//!
//! The free functions here answer the questions the line breaker asks
//! about any inline-level box: text boxes, inline boxes and atomic inlines
//! (inline blocks, inline replaced elements, inline tables, flex and grid
//! containers).

use log::trace;

use super::box_tree::{BoxId, BoxKind, BoxTree, LayoutContext, LineRef};
use super::element::{move_down, set_position, set_size_to_total};
use super::geometry::Dimension;
use super::line::{LineBox, collapsed_completely, linebox_offset};
use super::text;

/// Lines may be broken inside the box.
#[must_use]
pub fn allows_wrapping(tree: &BoxTree, id: BoxId) -> bool {
    tree[id].style.white_space.allows_wrapping()
}

/// Preserved newlines force line breaks inside the box.
#[must_use]
pub fn preserves_line_breaks(tree: &BoxTree, id: BoxId) -> bool {
    tree[id].style.white_space.preserves_line_breaks()
}

/// Sequences of spaces collapse inside the box.
#[must_use]
pub fn collapses_spaces(tree: &BoxTree, id: BoxId) -> bool {
    tree[id].style.white_space.collapses_spaces()
}

fn first_active(tree: &BoxTree, id: BoxId) -> Option<BoxId> {
    tree[id].active_children().first().copied()
}

fn last_active(tree: &BoxTree, id: BoxId) -> Option<BoxId> {
    tree[id].active_children().last().copied()
}

/// A line may be broken right before the box.
#[must_use]
pub fn can_split_before(tree: &BoxTree, id: BoxId) -> bool {
    match tree[id].kind {
        BoxKind::Text => text::can_split_before(tree, id),
        BoxKind::Inline => first_active(tree, id).is_some_and(|c| can_split_before(tree, c)),
        _ => true,
    }
}

/// A line may be broken right after the box.
#[must_use]
pub fn can_split_after(tree: &BoxTree, id: BoxId) -> bool {
    match tree[id].kind {
        BoxKind::Text => text::can_split_after(tree, id),
        BoxKind::Inline => last_active(tree, id).is_some_and(|c| can_split_after(tree, c)),
        _ => true,
    }
}

/// The content starts with white space.
#[must_use]
pub fn starts_with_whitespace(tree: &BoxTree, id: BoxId) -> bool {
    match tree[id].kind {
        BoxKind::Text => text::starts_with_whitespace(tree, id),
        BoxKind::Inline => first_active(tree, id).is_some_and(|c| starts_with_whitespace(tree, c)),
        _ => false,
    }
}

/// The content ends with white space.
#[must_use]
pub fn ends_with_whitespace(tree: &BoxTree, id: BoxId) -> bool {
    match tree[id].kind {
        BoxKind::Text => text::ends_with_whitespace(tree, id),
        BoxKind::Inline => last_active(tree, id).is_some_and(|c| ends_with_whitespace(tree, c)),
        _ => false,
    }
}

/// Make the box drop its leading collapsible white space: it follows
/// content ending with white space.
pub fn set_ignore_initial_ws(tree: &mut BoxTree, id: BoxId, ignore: bool) {
    match tree[id].kind {
        BoxKind::Text => tree[id].text.ignore_initial_ws = ignore,
        BoxKind::Inline => {
            if let Some(c) = first_active(tree, id) {
                set_ignore_initial_ws(tree, c, ignore);
            }
        }
        _ => {}
    }
}

/// The last layout stopped at a preserved line break.
#[must_use]
pub fn finished_by_line_break(tree: &BoxTree, id: BoxId) -> bool {
    match tree[id].kind {
        BoxKind::Text => tree[id].text.line_break_stop,
        BoxKind::Inline => tree[id].inline.line_break_stop,
        _ => false,
    }
}

/// The content contains a preserved line break.
#[must_use]
pub fn contains_line_break(tree: &BoxTree, id: BoxId) -> bool {
    match tree[id].kind {
        BoxKind::Text => text::contains_line_break(tree, id),
        BoxKind::Inline => tree[id].active_children().iter().any(|&c| contains_line_break(tree, c)),
        _ => false,
    }
}

/// Width of the content before the first preserved line break.
#[must_use]
pub fn first_line_length(tree: &BoxTree, ctx: &LayoutContext<'_>, id: BoxId) -> f32 {
    match tree[id].kind {
        BoxKind::Text => text::first_line_length(tree, ctx, id),
        BoxKind::Inline if preserves_line_breaks(tree, id) => {
            first_active(tree, id).map_or(0.0, |c| first_line_length(tree, ctx, c))
        }
        BoxKind::Inline => children_maximal_width(tree, ctx, id),
        _ => super::maximal_width(tree, ctx, id),
    }
}

/// Width of the content after the last preserved line break.
#[must_use]
pub fn last_line_length(tree: &BoxTree, ctx: &LayoutContext<'_>, id: BoxId) -> f32 {
    match tree[id].kind {
        BoxKind::Text => text::last_line_length(tree, ctx, id),
        BoxKind::Inline if preserves_line_breaks(tree, id) => {
            last_active(tree, id).map_or(0.0, |c| last_line_length(tree, ctx, c))
        }
        BoxKind::Inline => children_maximal_width(tree, ctx, id),
        _ => super::maximal_width(tree, ctx, id),
    }
}

/// Justification opportunities inside the box.
#[must_use]
pub fn expansion_points(tree: &BoxTree, id: BoxId, at_start: bool, at_end: bool) -> usize {
    match tree[id].kind {
        BoxKind::Text => text::expansion_points(tree, id, at_start, at_end),
        BoxKind::Inline => {
            let children = tree[id].active_children();
            let count = children.len();
            children
                .iter()
                .enumerate()
                .filter(|&(_, &c)| !tree[c].is_block)
                .map(|(n, &c)| expansion_points(tree, c, at_start && n == 0, at_end && n + 1 == count))
                .sum()
        }
        _ => 0,
    }
}

/// Widen the box by `dif` pixels for justification.
pub fn extend_width(tree: &mut BoxTree, id: BoxId, dif: f32, at_start: bool, at_end: bool) {
    match tree[id].kind {
        BoxKind::Text => text::extend_width(tree, id, dif),
        BoxKind::Inline => {
            let (start, end) = (tree[id].start_child(), tree[id].end_child());
            let added = super::block::extend_inline_child_widths(tree, id, dif, start, end, at_start, at_end);
            let b = &mut tree[id];
            b.content.width += added;
            b.bounds.width += added;
        }
        _ => {}
    }
}

/// Remember the line box the box was placed on. The positioning pass
/// aligns `top` and `bottom` boxes to it.
pub fn set_line_box(tree: &mut BoxTree, id: BoxId, line: LineRef) {
    match tree[id].kind {
        BoxKind::Text => {}
        BoxKind::Inline => {
            tree[id].inline.linebox = line;
            let children = tree[id].active_children().to_vec();
            for c in children {
                if !tree[c].is_block {
                    set_line_box(tree, c, line);
                }
            }
        }
        _ => tree[id].inline.linebox = line,
    }
}

/// [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
///
/// Lay out the children of an inline box on one line of `availw` pixels.
///
/// When the content does not fit, the box is split: the children that did
/// not fit move to a copy of the box stored in `rest`.
pub fn do_layout(
    tree: &mut BoxTree,
    ctx: &LayoutContext<'_>,
    id: BoxId,
    availw: f32,
    force: bool,
    linestart: bool,
) -> bool {
    tree[id].rest = None;
    tree[id].inline.line_break_stop = false;
    if !tree[id].displayed {
        let b = &mut tree[id];
        b.content = Dimension::default();
        b.bounds.set_size(0.0, 0.0);
        return true;
    }
    tree[id].avail_width = availw;

    // STEP 1: Take back the children a previous layout moved to a
    // continuation.
    let len = tree[id].children.len();
    tree[id].set_end_child(len);
    adopt_children(tree, id);

    let (start, end) = (tree[id].start_child(), tree[id].end_child());
    let mut curline = LineBox::new(id, start, 0.0);
    let wlimit = {
        let b = &tree[id];
        availw - b.margin.horizontal() - b.border.horizontal() - b.padding.horizontal()
    };
    let mut x = 0.0;
    let mut ret = true;
    let mut lastbreak = start;
    let mut lastwhite = false;

    // STEP 2: Place the children one after another.
    for i in start..end {
        let sub = tree[id].children[i];
        if can_split_before(tree, sub) {
            lastbreak = i;
        }
        let f = force && (i == start || lastbreak == start);
        if lastwhite {
            set_ignore_initial_ws(tree, sub, true);
        }
        let fit = super::do_layout(tree, ctx, sub, wlimit - x, f, linestart && i == start);
        if fit {
            set_position(tree, sub, x, 0.0);
            x += tree[sub].bounds.width;
            curline.consider_box(tree, sub);
            if finished_by_line_break(tree, sub) {
                tree[id].inline.line_break_stop = true;
            }
            if let Some(rest) = tree[sub].rest {
                let cont = continuation(tree, id, i);
                tree[cont].children[i] = rest;
                tree[rest].parent = Some(cont);
                tree[id].set_end_child(i + 1);
                break;
            }
            if tree[id].inline.line_break_stop {
                if i + 1 < end {
                    let _ = continuation(tree, id, i + 1);
                    tree[id].set_end_child(i + 1);
                }
                break;
            }
        } else if lastbreak == start {
            ret = false;
            break;
        } else {
            let _ = continuation(tree, id, lastbreak);
            tree[id].set_end_child(lastbreak);
            break;
        }
        if !tree[sub].empty {
            lastwhite = collapses_spaces(tree, sub) && ends_with_whitespace(tree, sub);
        }
        if can_split_after(tree, sub) {
            lastbreak = i + 1;
        }
    }

    // STEP 3: The size follows from the placed children and the font.
    let completely = tree[id]
        .active_children()
        .iter()
        .all(|&c| collapsed_completely(tree, c));
    {
        let b = &mut tree[id];
        b.content.width = x;
        b.content.height = b.metrics.height;
        b.inline.halflead = (b.content.height - b.metrics.height) / 2.0;
        b.inline.collapsed_completely =
            completely && b.padding.horizontal() == 0.0 && b.border.horizontal() == 0.0;
    }
    curline.end = tree[id].end_child();
    curline.width = x;
    let line = curline.clone();
    tree[id].inline.line = Some(curline);

    // STEP 4: Align the children vertically on the line.
    let children = tree[id].active_children().to_vec();
    let own_offset = linebox_offset(tree, id);
    for c in children {
        if tree[c].is_block {
            continue;
        }
        let mut dif = line.align_box(tree, c) - own_offset;
        if tree[c].kind == BoxKind::Inline {
            dif -= tree[c].content_offset_y();
        }
        if dif != 0.0 {
            move_down(tree, c, dif);
        }
    }
    set_size_to_total(tree, id);
    trace!(
        target: "quokka::layout",
        "inline {id:?} laid out in {availw}: width {x}, rest {:?}",
        tree[id].rest
    );
    ret
}

/// Make `id` the parent of its active children.
fn adopt_children(tree: &mut BoxTree, id: BoxId) {
    let children = tree[id].active_children().to_vec();
    for c in children {
        tree[c].parent = Some(id);
    }
}

/// Create the continuation of an inline box holding the children from
/// `from` on and store it as the rest of `id`.
fn continuation(tree: &mut BoxTree, id: BoxId, from: usize) -> BoxId {
    let cont = tree.copy_box(id);
    {
        let b = &mut tree[cont];
        b.splitted = true;
        b.split_id += 1;
        b.rest = None;
        b.inline.line = None;
        let len = b.children.len();
        b.set_end_child(len);
        b.set_start_child(from);
    }
    adopt_children(tree, cont);
    tree[id].rest = Some(cont);
    cont
}

fn children_maximal_width(tree: &BoxTree, ctx: &LayoutContext<'_>, id: BoxId) -> f32 {
    tree[id]
        .active_children()
        .iter()
        .map(|&c| super::maximal_width(tree, ctx, c))
        .sum()
}

/// Widest run between preserved line breaks.
fn line_lengths(tree: &BoxTree, ctx: &LayoutContext<'_>, id: BoxId, start: f32) -> f32 {
    let mut ret = start;
    let mut total = 0.0;
    for &c in tree[id].active_children() {
        total += first_line_length(tree, ctx, c);
        ret = f32::max(ret, total);
        if contains_line_break(tree, c) {
            total = 0.0;
        }
        total += last_line_length(tree, ctx, c);
        ret = f32::max(ret, total);
    }
    ret
}

fn decoration(tree: &BoxTree, id: BoxId) -> f32 {
    let b = &tree[id];
    b.margin.horizontal() + b.padding.horizontal() + b.border.horizontal()
}

/// Narrowest width the box can be broken to.
#[must_use]
pub fn minimal_width(tree: &BoxTree, ctx: &LayoutContext<'_>, id: BoxId) -> f32 {
    let children_min = || {
        tree[id]
            .active_children()
            .iter()
            .map(|&c| super::minimal_width(tree, ctx, c))
            .fold(0.0, f32::max)
    };
    let ret = if allows_wrapping(tree, id) {
        children_min()
    } else if preserves_line_breaks(tree, id) {
        line_lengths(tree, ctx, id, children_min())
    } else {
        children_maximal_width(tree, ctx, id)
    };
    ret + decoration(tree, id)
}

/// Width of the box without line breaks other than preserved ones.
#[must_use]
pub fn maximal_width(tree: &BoxTree, ctx: &LayoutContext<'_>, id: BoxId) -> f32 {
    let ret = if preserves_line_breaks(tree, id) {
        line_lengths(tree, ctx, id, 0.0)
    } else {
        children_maximal_width(tree, ctx, id)
    };
    ret + decoration(tree, id)
}
