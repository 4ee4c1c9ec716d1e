//! The viewport: root of the box tree and the layout driver.
//!
//! [§ 9.1.1 The viewport](https://www.w3.org/TR/CSS2/visuren.html#viewport)
//!
//! "User agents for continuous media generally offer users a viewport (a
//! window or other viewing area on the screen) through which users consult
//! a document. User agents may change the document's layout when the
//! viewport is resized (see the initial containing block)."
//!
//! The viewport box is laid out as a block of the viewport width. After
//! the layout the canvas grows to enclose every visible box.

use log::debug;

use crate::style::Overflow;

use super::block;
use super::box_tree::{BoxId, BoxTree, LayoutContext};
use super::geometry::{Dimension, Rect};
use super::positioning::absolute_positions;
use super::sizes::{set_content_width, update_child_sizes};
use super::stacking;

/// The viewport clips its content to the visible area. Set up by the
/// builder from `LayoutConfig::clip_viewport`.
#[must_use]
pub fn clips_content(tree: &BoxTree) -> bool {
    tree.root()
        .is_some_and(|root| tree[root].style.overflow != Overflow::Visible)
}

/// Lay out the whole tree in a viewport of the given size.
///
/// The tree is restored to its state after building first, so repeated
/// calls with the same size produce the same geometry.
pub fn layout(tree: &mut BoxTree, ctx: &LayoutContext<'_>, width: f32, height: f32) {
    let Some(root) = tree.root() else {
        return;
    };

    // STEP 1: Forget the previous layout.
    tree.restore();
    tree.viewport.width = width;
    tree.viewport.height = height;
    let visible = tree.viewport.visible_rect;
    tree.viewport.visible_rect = Rect::new(visible.x, visible.y, width, height);
    {
        let b = &mut tree[root];
        b.content = Dimension::new(width, height);
        b.bounds = Rect::new(0.0, 0.0, width, height);
        b.block.wset = true;
        b.block.hset = true;
    }

    // STEP 2: Used sizes and margins of the whole tree.
    super::init_subtree(tree, ctx, root);

    // STEP 3: Layout.
    let _ = super::do_layout(tree, ctx, root, width, true, true);

    // STEP 4: Page coordinates and the canvas extent.
    update_bounds(tree, Dimension::new(width, height));

    // STEP 5: Stacking contexts.
    tree.stacking = stacking::build(tree);
    debug!(
        "layout of {} boxes done, canvas {}x{}",
        tree.len(),
        tree[root].content.width,
        tree[root].content.height
    );
}

/// Lay out the viewport box: a block at least as wide as the viewport.
pub fn do_layout(tree: &mut BoxTree, ctx: &LayoutContext<'_>, id: BoxId) -> bool {
    let min = block::minimal_content_width(tree, ctx, id);
    let pref = min.max(tree.viewport.width);
    set_content_width(tree, id, pref);
    tree[id].block.wset = true;
    update_child_sizes(tree, ctx, id);
    let availw = tree[id].content.width;
    block::do_layout(tree, ctx, id, availw, true)
}

/// Compute the page coordinates and grow the canvas to enclose all the
/// visible boxes, but never below `min`.
pub fn update_bounds(tree: &mut BoxTree, min: Dimension) {
    let Some(root) = tree.root() else {
        return;
    };
    tree.viewport.maxx = min.width;
    tree.viewport.maxy = min.height;
    let _ = absolute_positions(tree);

    let (maxx, maxy) = (tree.viewport.maxx, tree.viewport.maxy);
    let b = &mut tree[root];
    b.content.width = b.content.width.max(maxx);
    b.content.height = b.content.height.max(maxy);
    b.bounds.set_size(b.content.width, b.content.height);
    b.abs_bounds.set_size(b.content.width, b.content.height);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tree_does_not_clip() {
        let tree = BoxTree::new();
        assert!(!clips_content(&tree));
    }
}
