//! The positioning pass: page coordinates of every box.
//!
//! [§ 9.3 Positioning schemes](https://www.w3.org/TR/CSS2/visuren.html#positioning-scheme)
//!
//! Layout leaves every box with `bounds` relative to the content box of
//! the box it was laid out in. This pass walks the tree top-down and turns
//! them into `abs_bounds`. Static positions of absolutely positioned boxes
//! depend on boxes that may be positioned later in the walk, so the pass
//! runs again when any such box was met.

use log::trace;
use quokka_common::warning::warn_once;

use crate::style::{Float, Position, VerticalAlign};

use super::box_tree::{BoxId, BoxKind, BoxTree};
use super::element::{clip_rect, is_floating, is_positioned, is_relative, is_visible, relative_offset};
use super::geometry::Rect;

/// Upper bound on the number of passes over the tree.
pub const MAX_POSITIONING_PASSES: usize = 2;

/// Compute `abs_bounds` of the whole tree and grow the canvas extent in
/// [`super::box_tree::ViewportState`] to enclose the visible boxes.
///
/// Returns the number of passes run.
pub fn absolute_positions(tree: &mut BoxTree) -> usize {
    let Some(root) = tree.root() else {
        return 0;
    };
    let mut passes = 0;
    while passes < MAX_POSITIONING_PASSES {
        passes += 1;
        tree.viewport.recompute = false;
        position_subtree(tree, root);
        if !tree.viewport.recompute {
            break;
        }
    }
    // A stale static position after the last pass is accepted.
    tree.viewport.recompute = false;
    trace!(target: "quokka::layout", "positioning done in {passes} passes");
    passes
}

fn position_subtree(tree: &mut BoxTree, id: BoxId) {
    let rect = absolute_rect(tree, id);
    {
        let b = &mut tree[id];
        b.abs_bounds = rect;
    }
    if !tree[id].displayed {
        return;
    }
    if is_visible(tree, id) {
        update_canvas_for(tree, id);
    }
    let children = tree[id].active_children().to_vec();
    for c in children {
        position_subtree(tree, c);
    }
}

/// The page position of the margin box of `id`. The ancestors must be
/// positioned already.
fn absolute_rect(tree: &mut BoxTree, id: BoxId) -> Rect {
    let (width, height) = (tree[id].bounds.width, tree[id].bounds.height);
    let Some(parent) = tree[id].parent else {
        // The viewport.
        return tree[id].bounds;
    };
    if !tree[id].displayed {
        let origin = tree[parent].abs_content_bounds();
        return Rect::new(origin.x, origin.y, 0.0, 0.0);
    }

    // STEP 1: Absolutely positioned and fixed boxes resolve against their
    // containing block.
    if is_positioned(tree, id) {
        if tree[id].block.topstatic || tree[id].block.leftstatic {
            update_static_position(tree, id);
        }
        let cb = absolute_containing_block(tree, id);
        let b = &tree[id];
        return Rect::new(cb.x + b.coords.left, cb.y + b.coords.top, width, height);
    }

    // STEP 2: Floats resolve against the owner of their float list.
    //
    // Right floats are measured from the right content edge of the owner.
    if is_floating(tree, id) {
        if let Some(list) = tree[id].block.fown {
            let owner = tree.float_list(list).owner();
            let oc = tree[owner].abs_content_bounds();
            let b = &tree[id];
            let x = if b.style.float == Float::Right {
                oc.x + oc.width - width - b.bounds.x
            } else {
                oc.x + b.bounds.x
            };
            return Rect::new(x, oc.y + b.bounds.y, width, height);
        }
    }

    // STEP 3: Everything else follows its parent's content box.
    let origin = tree[parent].abs_content_bounds();
    let b = &tree[id];
    let mut x = origin.x + b.bounds.x;
    let mut y = line_aligned_y(tree, id).unwrap_or(origin.y + b.bounds.y);

    // STEP 4: Relative offsets.
    if is_relative(tree, id) {
        let (dx, dy) = relative_offset(tree, id);
        x += dx;
        y += dy;
    }
    Rect::new(x, y, width, height)
}

/// [§ 10.8.1 'vertical-align'](https://www.w3.org/TR/CSS2/visudet.html#propdef-vertical-align)
///
/// "top: Align the top of the aligned subtree with the top of the line box."
///
/// "bottom: Align the bottom of the aligned subtree with the bottom of the
/// line box."
fn line_aligned_y(tree: &BoxTree, id: BoxId) -> Option<f32> {
    let b = &tree[id];
    if b.is_block || b.kind == BoxKind::Text || !b.style.vertical_align.is_line_relative() {
        return None;
    }
    let line = b.inline.linebox;
    let top = tree[line.owner?].abs_content_bounds().y + line.y;
    let (offset, height) = if b.kind == BoxKind::Inline {
        (b.content_offset_y(), b.content.height)
    } else {
        (0.0, b.bounds.height)
    };
    Some(match b.style.vertical_align {
        VerticalAlign::Bottom => top + line.total_height - height - offset,
        _ => top - offset,
    })
}

/// [§ 10.1 Definition of "containing block"](https://www.w3.org/TR/CSS2/visudet.html#containing-block-details)
///
/// "If the element has 'position: fixed', the containing block is
/// established by the viewport"; for 'position: absolute' "the containing
/// block is formed by the padding edge of the ancestor".
fn absolute_containing_block(tree: &BoxTree, id: BoxId) -> Rect {
    let visible = tree.viewport.visible_rect;
    let b = &tree[id];
    let cb = b.containing_block.or(b.parent);
    match (b.style.position, cb) {
        (Position::Fixed, _) | (_, None) => visible,
        (_, Some(cb)) if tree[cb].kind == BoxKind::Viewport => {
            let ab = tree[cb].abs_bounds;
            Rect::new(ab.x, ab.y, visible.width, visible.height)
        }
        (_, Some(cb)) => tree[cb].abs_padding_bounds(),
    }
}

/// [§ 10.3.7 Absolutely positioned, non-replaced elements](https://www.w3.org/TR/CSS2/visudet.html#abs-non-replaced-width)
///
/// "The static position for 'left' is the distance from the left edge of
/// the containing block to the left margin edge of a hypothetical box that
/// would have been the first box of the element if its specified
/// 'position' value had been 'static'"
///
/// The hypothetical box follows the last in-flow box preceding the element
/// or, without one, starts at the content edge of the element's parent in
/// the document. Both may move later in the walk, so another pass is
/// requested.
fn update_static_position(tree: &mut BoxTree, id: BoxId) {
    let Some(cb) = tree[id].containing_block.or(tree[id].parent) else {
        return;
    };
    let (topstatic, leftstatic) = (tree[id].block.topstatic, tree[id].block.leftstatic);
    let cbb = &tree[cb];
    let cb_abs = cbb.abs_bounds;
    let edge_x = cbb.emargin.left + cbb.border.left;
    let edge_y = cbb.emargin.top + cbb.border.top;
    let (padding_left, padding_top) = (cbb.padding.left, cbb.padding.top);

    let (mut top, mut left) = (None, None);
    if let Some(reference) = tree[id].block.abs_reference {
        let r = &tree[reference];
        let ab = r.abs_bounds;
        if topstatic {
            let y = ab.y - cb_abs.y;
            // Floats sit beside the box, in-flow boxes above it.
            top = Some(if r.is_block && is_floating(tree, reference) {
                y - edge_y
            } else {
                y + ab.height - edge_y
            });
        }
        if leftstatic {
            left = Some(
                r.containing_block
                    .map_or(0.0, |rcb| tree[rcb].abs_content_bounds().x - cb_abs.x - edge_x),
            );
        }
        tree.viewport.recompute = true;
    } else if let Some(mut dparent) = tree[id].block.dom_parent {
        // The nearest document ancestor that is part of the box tree.
        while tree[dparent].containing_block.is_none() {
            match tree[dparent].parent {
                Some(p) => dparent = p,
                None => break,
            }
        }
        let ab = tree[dparent].abs_content_bounds();
        if topstatic {
            top = Some(ab.y - cb_abs.y - edge_y);
        }
        if leftstatic {
            left = Some(ab.x - cb_abs.x - edge_x);
        }
        tree.viewport.recompute = true;
    } else {
        warn_once("positioning", "no static position available, using the containing block");
        if topstatic {
            top = Some(padding_top);
        }
        if leftstatic {
            left = Some(padding_left);
        }
    }
    let b = &mut tree[id];
    if let Some(top) = top {
        b.coords.top = top;
    }
    if let Some(left) = left {
        b.coords.left = left;
    }
}

/// Extend the canvas extent over a visible box, clipped by its clipping
/// block unless that is the viewport.
fn update_canvas_for(tree: &mut BoxTree, id: BoxId) {
    let b = &tree[id];
    if b.kind == BoxKind::Viewport {
        return;
    }
    let rect = match b.clip_block {
        Some(clip) if tree[clip].kind != BoxKind::Viewport => b.abs_bounds.intersection(&clip_rect(tree, clip)),
        _ => b.abs_bounds,
    };
    if rect.width <= 0.0 && rect.height <= 0.0 {
        return;
    }
    let vp = &mut tree.viewport;
    vp.maxx = vp.maxx.max(rect.right());
    vp.maxy = vp.maxy.max(rect.bottom());
}
