//! Used values of widths, heights, margins, padding and offsets.
//!
//! [§ 10 Visual formatting model details](https://www.w3.org/TR/CSS2/visudet.html)
//!
//! `load_sizes` runs once before a box is laid out; `update_sizes` runs
//! again when the containing block changed, keeping the collapsed vertical
//! margins.

use log::trace;

use crate::style::{BoxSizing, Length, LengthOrAuto, Sides};

use super::box_tree::{BoxId, BoxKind, BoxTree, LayoutContext};
use super::decoder::{CssDecoder, ReplacedConstraints, compute_replaced_object_size};
use super::element::{
    can_increase_width, containing_block_has_fixed_height, containing_block_size,
    is_block_in_flow, is_positioned, set_size_to_total,
};
use super::geometry::{Dimension, LengthSet};

/// A decoder bound to the font of a box.
pub(crate) fn decoder_for(tree: &BoxTree, id: BoxId) -> CssDecoder<'_> {
    CssDecoder::new(
        &tree[id].metrics,
        tree.root_font_size,
        Dimension::new(tree.viewport.width, tree.viewport.height),
    )
}

/// [§ 8.5.1 Border width](https://www.w3.org/TR/CSS2/box.html#border-width-properties)
///
/// Used border widths. A visible border thinner than one pixel is drawn
/// one pixel wide.
fn border_widths(tree: &BoxTree, id: BoxId) -> LengthSet {
    let dec = decoder_for(tree, id);
    let widths = tree[id].style.used_border_width();
    let px = |l: Length| {
        let w = dec.px(l, 0.0).max(0.0);
        if w > 0.0 && w < 1.0 { 1.0 } else { w }
    };
    LengthSet::new(px(widths.top), px(widths.right), px(widths.bottom), px(widths.left))
}

/// Load the used sizes of a box from its style.
///
/// With `update` set the content size of boxes that do not depend on the
/// containing block and the collapsed vertical margins are kept.
pub fn load_sizes(tree: &mut BoxTree, ctx: &LayoutContext<'_>, id: BoxId, update: bool) {
    match tree[id].kind {
        BoxKind::Viewport | BoxKind::Text | BoxKind::TableColumn | BoxKind::TableColumnGroup => {}
        BoxKind::Inline => load_inline_sizes(tree, id),
        BoxKind::BlockReplaced | BoxKind::InlineReplaced => {
            load_block_sizes(tree, id, update);
            load_replaced_sizes(tree, ctx, id);
        }
        _ => load_block_sizes(tree, id, update),
    }
}

/// Boxes whose size is assigned by the layout of their parent: table parts
/// and flex and grid items keep it when the containing block changes.
const fn keeps_assigned_size(kind: BoxKind) -> bool {
    matches!(
        kind,
        BoxKind::TableWrapper
            | BoxKind::Table
            | BoxKind::TableBody
            | BoxKind::TableRow
            | BoxKind::TableCell
            | BoxKind::FlexItem
            | BoxKind::GridItem
    )
}

/// Recompute the sizes after the containing block changed.
pub fn update_sizes(tree: &mut BoxTree, ctx: &LayoutContext<'_>, id: BoxId) {
    if keeps_assigned_size(tree[id].kind) {
        return;
    }
    load_sizes(tree, ctx, id, true);
    let b = &mut tree[id];
    if b.kind.is_block_like() && b.block.width_adjust != 0.0 {
        let adjust = b.block.width_adjust;
        if !b.block.wset {
            b.content.width = (b.content.width + adjust).max(0.0);
        } else if b.style.margin.left.is_auto() {
            b.margin.left += adjust;
            b.emargin.left = b.margin.left;
        } else {
            b.margin.right += adjust;
            b.emargin.right = b.margin.right;
        }
    }
}

/// Update the sizes of the element children after the content size of
/// `id` changed. Block children are only descended into when their own
/// content size changed.
pub fn update_child_sizes(tree: &mut BoxTree, ctx: &LayoutContext<'_>, id: BoxId) {
    let children = tree[id].children.clone();
    for child in children {
        let kind = tree[child].kind;
        if !kind.is_element() {
            continue;
        }
        let old = tree[child].content;
        update_sizes(tree, ctx, child);
        set_size_to_total(tree, child);
        if !kind.is_block_like() || tree[child].content != old {
            update_child_sizes(tree, ctx, child);
        }
    }
}

/// Request a width change of a block that avoids floats. The width or the
/// auto margin absorbs the difference.
pub fn set_width_adjust(tree: &mut BoxTree, ctx: &LayoutContext<'_>, id: BoxId, adjust: f32) {
    let old = tree[id].block.width_adjust;
    tree[id].block.width_adjust = adjust;
    if !tree[id].block.wset {
        let w = tree[id].content.width - old + adjust;
        set_content_width(tree, id, w);
    } else {
        update_sizes(tree, ctx, id);
    }
}

/// Set the content width, clamped by `min-width` and `max-width`.
pub fn set_content_width(tree: &mut BoxTree, id: BoxId, width: f32) {
    let b = &mut tree[id];
    let mut w = width;
    if b.kind.is_block_like() {
        if let Some(max) = b.block.max_width {
            w = w.min(max);
        }
        if let Some(min) = b.block.min_width {
            w = w.max(min);
        }
    }
    b.content.width = w.max(0.0);
}

/// Set the content height, clamped by `min-height` and `max-height`.
pub fn set_content_height(tree: &mut BoxTree, id: BoxId, height: f32) {
    let b = &mut tree[id];
    let mut h = height;
    if b.kind.is_block_like() {
        if let Some(max) = b.block.max_height {
            h = h.min(max);
        }
        if let Some(min) = b.block.min_height {
            h = h.max(min);
        }
    }
    b.content.height = h.max(0.0);
}

fn load_inline_sizes(tree: &mut BoxTree, id: BoxId) {
    let cw = containing_block_size(tree, id).width;
    let border = border_widths(tree, id);
    let dec = decoder_for(tree, id);
    let style = tree[id].style.clone();
    let pad = |l: Length| dec.px(l, cw).max(0.0);
    let padding = LengthSet::new(
        pad(style.padding.top),
        pad(style.padding.right),
        pad(style.padding.bottom),
        pad(style.padding.left),
    );
    // [§ 10.3.1 Inline, non-replaced elements](https://www.w3.org/TR/CSS2/visudet.html#inline-width)
    //
    // "A computed value of 'auto' for 'margin-left' or 'margin-right'
    // becomes a used value of '0'."
    //
    // [§ 8.3 Margin properties](https://www.w3.org/TR/CSS2/box.html#margin-properties)
    //
    // "These properties have no effect on non-replaced inline elements."
    let margin = LengthSet::new(
        0.0,
        dec.length(Some(style.margin.right), 0.0, 0.0, cw),
        0.0,
        dec.length(Some(style.margin.left), 0.0, 0.0, cw),
    );
    let (coords, coords_set) = load_coords(tree, id);
    let b = &mut tree[id];
    b.border = border;
    b.padding = padding;
    b.margin = margin;
    b.emargin = margin;
    b.decl_margin = margin;
    b.coords = coords;
    b.coords_set = coords_set;
}

fn load_coords(tree: &BoxTree, id: BoxId) -> (LengthSet, Sides<bool>) {
    let size = containing_block_size(tree, id);
    let dec = decoder_for(tree, id);
    let inset = tree[id].style.inset;
    let set = Sides {
        top: !inset.top.is_auto(),
        right: !inset.right.is_auto(),
        bottom: !inset.bottom.is_auto(),
        left: !inset.left.is_auto(),
    };
    let coords = LengthSet::new(
        dec.length(Some(inset.top), 0.0, 0.0, size.height),
        dec.length(Some(inset.right), 0.0, 0.0, size.width),
        dec.length(Some(inset.bottom), 0.0, 0.0, size.height),
        dec.length(Some(inset.left), 0.0, 0.0, size.width),
    );
    (coords, set)
}

fn load_block_sizes(tree: &mut BoxTree, id: BoxId, update: bool) {
    let cb = containing_block_size(tree, id);
    let cb_fixed_height = containing_block_has_fixed_height(tree, id);
    let style = tree[id].style.clone();

    // STEP 1: Borders, padding and offsets.
    if !update {
        let border = border_widths(tree, id);
        tree[id].border = border;
    }
    let dec = decoder_for(tree, id);
    let pad = |l: Length| dec.px(l, cb.width).max(0.0);
    let padding = LengthSet::new(
        pad(style.padding.top),
        pad(style.padding.right),
        pad(style.padding.bottom),
        pad(style.padding.left),
    );
    let (coords, coords_set) = load_coords(tree, id);
    let indent = dec.px(style.text_indent, cb.width);

    // STEP 2: Minimum and maximum sizes.
    //
    // [§ 10.4 Minimum and maximum widths](https://www.w3.org/TR/CSS2/visudet.html#min-max-widths)
    // [§ 10.7 Minimum and maximum heights](https://www.w3.org/TR/CSS2/visudet.html#min-max-heights)
    //
    // "If the height of the containing block is not specified explicitly
    // (i.e., it depends on content height), and this element is not
    // absolutely positioned, the percentage value is treated as '0' (for
    // 'min-height') or 'none' (for 'max-height')."
    let border_box = style.box_sizing == BoxSizing::BorderBox;
    let decoration_w = tree[id].border.horizontal() + padding.horizontal();
    let decoration_h = tree[id].border.vertical() + padding.vertical();
    let to_content = |v: f32, deco: f32| if border_box { (v - deco).max(0.0) } else { v };
    let min_width = style
        .min_width
        .length()
        .map(|l| to_content(dec.px(l, cb.width), decoration_w));
    let max_width = style
        .max_width
        .length()
        .map(|l| to_content(dec.px(l, cb.width), decoration_w));
    let min_height = style
        .min_height
        .length()
        .filter(|l| !l.is_percent() || cb_fixed_height)
        .map(|l| to_content(dec.px(l, cb.height), decoration_h));
    let max_height = style
        .max_height
        .length()
        .filter(|l| !l.is_percent() || cb_fixed_height)
        .map(|l| to_content(dec.px(l, cb.height), decoration_h));
    let max_width = max_width.map(|m| m.max(min_width.unwrap_or(0.0)));
    let max_height = max_height.map(|m| m.max(min_height.unwrap_or(0.0)));

    {
        let b = &mut tree[id];
        b.padding = padding;
        b.coords = coords;
        b.coords_set = coords_set;
        b.block.indent = indent;
        b.block.min_width = min_width;
        b.block.max_width = max_width;
        b.block.min_height = min_height;
        b.block.max_height = max_height;
        if !update {
            b.content = Dimension::default();
            b.margin = LengthSet::ZERO;
            b.emargin = LengthSet::ZERO;
            b.decl_margin = LengthSet::ZERO;
            b.block.topstatic = false;
            b.block.leftstatic = false;
        }
    }

    // STEP 3: Widths.
    compute_widths(tree, id, style.width, true, cb.width, update);
    if let Some(max) = max_width {
        if tree[id].content.width > max {
            compute_widths(tree, id, px_value(max, border_box, decoration_w), false, cb.width, update);
        }
    }
    if let Some(min) = min_width {
        if tree[id].content.width < min {
            compute_widths(tree, id, px_value(min, border_box, decoration_w), false, cb.width, update);
        }
    }

    // STEP 4: Heights.
    let height = match style.height {
        LengthOrAuto::Length(l) if l.is_percent() && !cb_fixed_height => LengthOrAuto::Auto,
        other => other,
    };
    compute_heights(tree, id, height, true, cb, update);
    if let Some(max) = max_height {
        if tree[id].block.hset && tree[id].content.height > max {
            compute_heights(tree, id, px_value(max, border_box, decoration_h), false, cb, update);
        }
    }
    if let Some(min) = min_height {
        if tree[id].block.hset && tree[id].content.height < min {
            compute_heights(tree, id, px_value(min, border_box, decoration_h), false, cb, update);
        }
    }

    let b = &mut tree[id];
    b.emargin.left = b.margin.left;
    b.emargin.right = b.margin.right;
    if !update {
        b.emargin.top = b.margin.top;
        b.emargin.bottom = b.margin.bottom;
    }
    b.block.width_adjust = if update { b.block.width_adjust } else { 0.0 };
    trace!(
        target: "quokka::layout",
        "sizes of {id:?}: content {:?} margin {:?}",
        b.content,
        b.margin
    );
}

/// A content size expressed as a declared value, so that it passes back
/// through the border-box conversion unchanged.
fn px_value(content: f32, border_box: bool, decoration: f32) -> LengthOrAuto {
    let declared = if border_box { content + decoration } else { content };
    LengthOrAuto::Length(Length::Px(declared))
}

/// [§ 10.3 Calculating widths and margins](https://www.w3.org/TR/CSS2/visudet.html#Computing_widths_and_margins)
///
/// `exact` is false when the width is a min/max substitute: the
/// `wset`/`wrelative` flags then keep describing the declared `width`.
pub fn compute_widths(
    tree: &mut BoxTree,
    id: BoxId,
    width: LengthOrAuto,
    exact: bool,
    cw: f32,
    update: bool,
) {
    if is_positioned(tree, id) {
        compute_widths_absolute(tree, id, width, exact, cw, update);
    } else {
        compute_widths_in_flow(tree, id, width, exact, cw, update);
    }
}

fn declared_width(tree: &BoxTree, id: BoxId, width: Length, cw: f32) -> f32 {
    let b = &tree[id];
    let w = decoder_for(tree, id).px(width, cw);
    if b.style.box_sizing == BoxSizing::BorderBox {
        (w - b.border.horizontal() - b.padding.horizontal()).max(0.0)
    } else {
        w.max(0.0)
    }
}

fn declared_height(tree: &BoxTree, id: BoxId, height: Length, ch: f32) -> f32 {
    let b = &tree[id];
    let h = decoder_for(tree, id).px(height, ch);
    if b.style.box_sizing == BoxSizing::BorderBox {
        (h - b.border.vertical() - b.padding.vertical()).max(0.0)
    } else {
        h.max(0.0)
    }
}

/// [§ 10.3.3 Block-level, non-replaced elements in normal flow](https://www.w3.org/TR/CSS2/visudet.html#blockwidth)
///
/// "'margin-left' + 'border-left-width' + 'padding-left' + 'width' +
/// 'padding-right' + 'border-right-width' + 'margin-right' = width of
/// containing block"
fn compute_widths_in_flow(
    tree: &mut BoxTree,
    id: BoxId,
    width: LengthOrAuto,
    exact: bool,
    cw: f32,
    update: bool,
) {
    let in_flow = is_block_in_flow(tree, id);
    let cb_grows = tree[id].containing_block.is_some_and(|cb| can_increase_width(tree, cb));
    let dec = decoder_for(tree, id);
    let style = tree[id].style.clone();
    let mleft_auto = style.margin.left.is_auto();
    let mright_auto = style.margin.right.is_auto();
    let mleft = dec.length(Some(style.margin.left), 0.0, 0.0, cw);
    let mright = dec.length(Some(style.margin.right), 0.0, 0.0, cw);
    let mtop = dec.length(Some(style.margin.top), 0.0, 0.0, cw);
    let mbottom = dec.length(Some(style.margin.bottom), 0.0, 0.0, cw);
    let declared = match width {
        LengthOrAuto::Length(l) => Some(declared_width(tree, id, l, cw)),
        LengthOrAuto::Auto => None,
    };

    let b = &mut tree[id];
    b.margin.top = mtop;
    b.margin.bottom = mbottom;
    b.decl_margin.top = mtop;
    b.decl_margin.bottom = mbottom;
    let deco = b.border.horizontal() + b.padding.horizontal();
    match declared {
        None => {
            if exact {
                b.block.wset = false;
            }
            // "If 'width' is set to 'auto', any other 'auto' values become
            // '0' and 'width' follows from the resulting equality."
            b.margin.left = mleft;
            b.margin.right = mright;
            b.decl_margin.left = mleft;
            b.decl_margin.right = mright;
            if !update || in_flow {
                b.content.width = (cw - mleft - mright - deco).max(0.0);
            }
        }
        Some(w) => {
            if exact {
                b.block.wset = true;
                b.block.wrelative = width.is_percent();
            }
            b.content.width = w;
            b.margin.left = mleft;
            b.margin.right = mright;
            b.decl_margin.left = mleft;
            b.decl_margin.right = mright;
            if in_flow {
                let rest = cw - w - deco;
                if mleft_auto && mright_auto {
                    // "If both 'margin-left' and 'margin-right' are 'auto',
                    // their used values are equal. This horizontally centers
                    // the element with respect to the edges of the
                    // containing block."
                    if rest >= 0.0 {
                        b.margin.left = rest / 2.0;
                        b.margin.right = rest / 2.0;
                    } else {
                        b.margin.left = 0.0;
                        b.margin.right = rest;
                    }
                } else if mleft_auto {
                    b.margin.left = rest - mright;
                } else {
                    // "If all of the above have a computed value other than
                    // 'auto', the values are said to be "over-constrained"
                    // and one of the used values will have to be different
                    // from its computed value."
                    b.margin.right = rest - mleft;
                    if b.margin.right < 0.0 && cb_grows {
                        b.margin.right = 0.0;
                    }
                }
            }
        }
    }
}

/// [§ 10.3.7 Absolutely positioned, non-replaced elements](https://www.w3.org/TR/CSS2/visudet.html#abs-non-replaced-width)
///
/// "'left' + 'margin-left' + 'border-left-width' + 'padding-left' +
/// 'width' + 'padding-right' + 'border-right-width' + 'margin-right' +
/// 'right' = width of containing block"
fn compute_widths_absolute(
    tree: &mut BoxTree,
    id: BoxId,
    width: LengthOrAuto,
    exact: bool,
    cw: f32,
    update: bool,
) {
    let dec = decoder_for(tree, id);
    let style = tree[id].style.clone();
    let mleft_auto = style.margin.left.is_auto();
    let mright_auto = style.margin.right.is_auto();
    let mleft = dec.length(Some(style.margin.left), 0.0, 0.0, cw);
    let mright = dec.length(Some(style.margin.right), 0.0, 0.0, cw);
    let mtop = dec.length(Some(style.margin.top), 0.0, 0.0, cw);
    let mbottom = dec.length(Some(style.margin.bottom), 0.0, 0.0, cw);
    let declared = match width {
        LengthOrAuto::Length(l) => Some(declared_width(tree, id, l, cw)),
        LengthOrAuto::Auto => None,
    };

    let b = &mut tree[id];
    b.margin.top = mtop;
    b.margin.bottom = mbottom;
    b.decl_margin.top = mtop;
    b.decl_margin.bottom = mbottom;
    match declared {
        None => {
            if exact {
                b.block.wset = false;
            }
            if !update {
                b.content.width = 0.0;
            }
        }
        Some(w) => {
            if exact {
                b.block.wset = true;
                b.block.wrelative = width.is_percent();
            }
            b.content.width = w;
        }
    }
    let wset = declared.is_some();
    let (lset, rset) = (b.coords_set.left, b.coords_set.right);
    let deco = b.border.horizontal() + b.padding.horizontal();
    b.margin.left = mleft;
    b.margin.right = mright;
    if wset && lset && rset {
        let rest = cw - b.coords.left - b.coords.right - b.content.width - deco;
        if mleft_auto && mright_auto {
            // "If both 'margin-left' and 'margin-right' are 'auto', solve
            // the equation under the extra constraint that the two margins
            // get equal values"
            b.margin.left = rest / 2.0;
            b.margin.right = rest / 2.0;
        } else if mleft_auto {
            b.margin.left = rest - mright;
        } else if mright_auto {
            b.margin.right = rest - mleft;
        }
    }
    b.decl_margin.left = b.margin.left;
    b.decl_margin.right = b.margin.right;

    let horizontal = b.margin.horizontal() + deco;
    if !lset && !rset {
        // "set 'left' to the static position"
        b.block.leftstatic = true;
        b.coords.right = cw - b.coords.left - horizontal - b.content.width;
    } else if !lset {
        b.coords.left = cw - b.coords.right - horizontal - b.content.width;
    } else if !rset {
        b.coords.right = cw - b.coords.left - horizontal - b.content.width;
    } else if !wset {
        b.content.width = (cw - b.coords.left - b.coords.right - horizontal).max(0.0);
    } else {
        b.coords.right = cw - b.coords.left - horizontal - b.content.width;
    }
}

/// [§ 10.6 Calculating heights and margins](https://www.w3.org/TR/CSS2/visudet.html#Computing_heights_and_margins)
pub fn compute_heights(
    tree: &mut BoxTree,
    id: BoxId,
    height: LengthOrAuto,
    exact: bool,
    cb: Dimension,
    update: bool,
) {
    let declared = match height {
        LengthOrAuto::Length(l) => Some(declared_height(tree, id, l, cb.height)),
        LengthOrAuto::Auto => None,
    };
    let positioned = is_positioned(tree, id);
    let b = &mut tree[id];
    match declared {
        None => {
            if exact {
                b.block.hset = false;
            }
            if !update {
                b.content.height = 0.0;
            }
        }
        Some(h) => {
            if exact {
                b.block.hset = true;
            }
            b.content.height = h;
        }
    }
    if !positioned {
        return;
    }

    // [§ 10.6.4 Absolutely positioned, non-replaced elements](https://www.w3.org/TR/CSS2/visudet.html#abs-non-replaced-height)
    //
    // "'top' + 'margin-top' + 'border-top-width' + 'padding-top' + 'height'
    // + 'padding-bottom' + 'border-bottom-width' + 'margin-bottom' +
    // 'bottom' = height of containing block"
    let ch = cb.height;
    let (tset, bset) = (b.coords_set.top, b.coords_set.bottom);
    let hset = declared.is_some();
    let deco = b.border.vertical() + b.padding.vertical();
    let (mtop_auto, mbottom_auto) = (b.style.margin.top.is_auto(), b.style.margin.bottom.is_auto());
    if hset && tset && bset {
        let rest = ch - b.coords.top - b.coords.bottom - b.content.height - deco;
        if mtop_auto && mbottom_auto {
            b.margin.top = rest / 2.0;
            b.margin.bottom = rest / 2.0;
        } else if mtop_auto {
            b.margin.top = rest - b.margin.bottom;
        } else if mbottom_auto {
            b.margin.bottom = rest - b.margin.top;
        }
        b.decl_margin.top = b.margin.top;
        b.decl_margin.bottom = b.margin.bottom;
    }
    let (mtop, mbottom) = if update {
        (b.emargin.top, b.emargin.bottom)
    } else {
        (b.margin.top, b.margin.bottom)
    };
    let vertical = mtop + mbottom + deco;
    if !tset && !bset {
        b.block.topstatic = true;
        b.coords.bottom = ch - b.coords.top - vertical - b.content.height;
    } else if !tset {
        b.coords.top = ch - b.coords.bottom - vertical - b.content.height;
    } else if !bset {
        b.coords.bottom = ch - b.coords.top - vertical - b.content.height;
    } else if !hset {
        b.content.height = (ch - b.coords.top - b.coords.bottom - vertical).max(0.0);
        if exact {
            b.block.hset = true;
        }
    } else {
        b.coords.bottom = ch - b.coords.top - vertical - b.content.height;
    }
}

/// [§ 10.3.2 Inline, replaced elements](https://www.w3.org/TR/CSS2/visudet.html#inline-replaced-width)
///
/// Replaced boxes take their content size from the object and keep it.
fn load_replaced_sizes(tree: &mut BoxTree, ctx: &LayoutContext<'_>, id: BoxId) {
    let cb = containing_block_size(tree, id);
    let dec = decoder_for(tree, id);
    let style = tree[id].style.clone();
    let b = &tree[id];
    let deco_w = b.border.horizontal() + b.padding.horizontal();
    let deco_h = b.border.vertical() + b.padding.vertical();
    let border_box = style.box_sizing == BoxSizing::BorderBox;
    let to_content = |v: f32, deco: f32| if border_box { (v - deco).max(0.0) } else { v };
    let css = ReplacedConstraints {
        width: style.width.length().map(|l| to_content(dec.px(l, cb.width), deco_w)),
        height: style
            .height
            .length()
            .map(|l| to_content(dec.px(l, cb.height), deco_h)),
        min_width: style.min_width.length().map_or(0.0, |l| dec.px(l, cb.width)),
        max_width: style.max_width.length().map(|l| dec.px(l, cb.width)),
        min_height: style.min_height.length().map_or(0.0, |l| dec.px(l, cb.height)),
        max_height: style.max_height.length().map(|l| dec.px(l, cb.height)),
    };
    let intrinsic = if ctx.config.load_images {
        b.replaced.intrinsic
    } else {
        None
    };
    let size = compute_replaced_object_size(intrinsic, b.replaced.attr_size, &css);
    compute_widths(tree, id, LengthOrAuto::Length(Length::Px(size.width)), true, cb.width, false);
    let b = &mut tree[id];
    b.content = size;
    b.block.wset = true;
    b.block.hset = true;
    b.block.min_width = None;
    b.block.max_width = None;
    b.block.min_height = None;
    b.block.max_height = None;
    b.emargin.left = b.margin.left;
    b.emargin.right = b.margin.right;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_px_value_round_trips_border_box() {
        assert_eq!(px_value(80.0, true, 20.0), LengthOrAuto::Length(Length::Px(100.0)));
        assert_eq!(px_value(80.0, false, 20.0), LengthOrAuto::Length(Length::Px(80.0)));
    }
}
