//! Painter - replays a laid out box tree in painting order
//!
//! [CSS 2.1 Appendix E.2 Painting order](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
//!
//! Every stacking context is painted back to front: its own background,
//! the contexts with negative levels, the block backgrounds, the floats,
//! the inline content and finally the positioned contexts with levels zero
//! and above.

use crate::layout::box_tree::{BoxId, BoxKind, BoxTree, LayoutContext};
use crate::layout::element::{is_floating, is_visible};
use crate::layout::list_item::{Marker, outside_marker};
use crate::layout::stacking::{StackingContext, forms_stacking_context};
use crate::style::Color;

use super::DisplayList;

/// Draws the boxes of a laid out tree.
///
/// The painter calls the methods in painting order; a renderer only has to
/// draw what it is told, where the box says.
pub trait BoxRenderer {
    /// Everything inside `id` follows until the matching
    /// [`BoxRenderer::finish_element_contents`]. Clipping starts here.
    fn start_element_contents(&mut self, tree: &BoxTree, id: BoxId);

    /// The content of `id` is done.
    fn finish_element_contents(&mut self, tree: &BoxTree, id: BoxId);

    /// Background and borders of an element box. `background` is the used
    /// background color, which differs from the style for the canvas and
    /// the element it was taken from.
    fn render_element_background(&mut self, tree: &BoxTree, id: BoxId, background: Color);

    /// The placed text of a text box.
    fn render_text_content(&mut self, tree: &BoxTree, id: BoxId);

    /// The content of a replaced box.
    fn render_replaced_content(&mut self, tree: &BoxTree, id: BoxId);

    /// The outside marker of a list item.
    fn render_marker(&mut self, tree: &BoxTree, id: BoxId, marker: &Marker);
}

/// Paint a laid out tree into a display list.
#[must_use]
pub fn paint(tree: &BoxTree, ctx: &LayoutContext<'_>) -> DisplayList {
    let mut list = DisplayList::new();
    if let Some(context) = &tree.stacking {
        draw_stacking_context(tree, ctx, context, &mut list);
    }
    list
}

/// What is drawn in the inline content layer.
#[derive(Debug, Clone, Copy)]
enum InlineItem {
    Background(BoxId),
    Text(BoxId),
    Replaced(BoxId),
    Marker(BoxId),
    /// Inline-blocks paint as if they formed a stacking context.
    Atomic(BoxId),
}

/// Descendants of a context sorted by the layer they paint in, tree order
/// within each layer.
#[derive(Debug, Default)]
struct Layers {
    blocks: Vec<BoxId>,
    floats: Vec<BoxId>,
    inlines: Vec<InlineItem>,
}

/// [CSS 2.1 Appendix E.2](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
///
/// "Within each stacking context, the following layers are painted in
/// back-to-front order"
pub fn draw_stacking_context(
    tree: &BoxTree,
    ctx: &LayoutContext<'_>,
    context: &StackingContext,
    renderer: &mut dyn BoxRenderer,
) {
    let owner = context.owner;
    if !tree[owner].displayed {
        return;
    }

    // STEP 1: "the background and borders of the element forming the
    // stacking context."
    draw_background(tree, ctx, owner, renderer);
    renderer.start_element_contents(tree, owner);

    let mut layers = Layers::default();
    push_content(tree, owner, &mut layers);
    collect(tree, owner, &mut layers);

    // STEP 2: "the child stacking contexts with negative stack levels"
    for c in context.negative() {
        draw_stacking_context(tree, ctx, c, renderer);
    }

    // STEP 3-5: blocks, floats and inline content
    draw_layers(tree, ctx, &layers, renderer);

    // STEP 6: "the child stacking contexts with stack level 0 and the
    // positioned descendants with stack level 0."
    // STEP 7: "the child stacking contexts with positive stack levels"
    for c in context.zero().chain(context.positive()) {
        draw_stacking_context(tree, ctx, c, renderer);
    }

    renderer.finish_element_contents(tree, owner);
}

fn draw_layers(tree: &BoxTree, ctx: &LayoutContext<'_>, layers: &Layers, renderer: &mut dyn BoxRenderer) {
    // "the in-flow, non-inline-level, non-positioned descendants"
    for &b in &layers.blocks {
        draw_background(tree, ctx, b, renderer);
    }
    // "the non-positioned floats"
    for &f in &layers.floats {
        draw_atomic(tree, ctx, f, renderer);
    }
    // "the in-flow, inline-level, non-positioned descendants, including
    // inline tables and replaced elements"
    for &item in &layers.inlines {
        match item {
            InlineItem::Background(id) => draw_background(tree, ctx, id, renderer),
            InlineItem::Text(id) => {
                if is_visible(tree, id) {
                    renderer.render_text_content(tree, id);
                }
            }
            InlineItem::Replaced(id) => {
                if is_visible(tree, id) {
                    renderer.render_replaced_content(tree, id);
                }
            }
            InlineItem::Marker(id) => {
                if is_visible(tree, id)
                    && let Some(marker) = outside_marker(tree, ctx, id)
                {
                    renderer.render_marker(tree, id, &marker);
                }
            }
            InlineItem::Atomic(id) => draw_atomic(tree, ctx, id, renderer),
        }
    }
}

/// "as if it generated a new stacking context, but any positioned
/// descendants and descendants which actually create a new stacking
/// context should be considered part of the parent stacking context"
fn draw_atomic(tree: &BoxTree, ctx: &LayoutContext<'_>, id: BoxId, renderer: &mut dyn BoxRenderer) {
    draw_background(tree, ctx, id, renderer);
    renderer.start_element_contents(tree, id);
    let mut layers = Layers::default();
    push_content(tree, id, &mut layers);
    collect(tree, id, &mut layers);
    draw_layers(tree, ctx, &layers, renderer);
    renderer.finish_element_contents(tree, id);
}

fn draw_background(tree: &BoxTree, ctx: &LayoutContext<'_>, id: BoxId, renderer: &mut dyn BoxRenderer) {
    if is_visible(tree, id) {
        renderer.render_element_background(tree, id, used_background(tree, ctx, id));
    }
}

/// Content painted with the inline layer that belongs to the box itself.
fn push_content(tree: &BoxTree, id: BoxId, layers: &mut Layers) {
    match tree[id].kind {
        BoxKind::BlockReplaced | BoxKind::InlineReplaced => layers.inlines.push(InlineItem::Replaced(id)),
        BoxKind::ListItem => layers.inlines.push(InlineItem::Marker(id)),
        _ => {}
    }
}

fn collect(tree: &BoxTree, id: BoxId, layers: &mut Layers) {
    for &c in tree[id].active_children() {
        let b = &tree[c];
        if !b.displayed || forms_stacking_context(tree, c) {
            continue;
        }
        if is_floating(tree, c) {
            layers.floats.push(c);
            continue;
        }
        if !b.is_block && b.kind.is_block_like() && !b.kind.is_replaced() {
            layers.inlines.push(InlineItem::Atomic(c));
            continue;
        }
        match b.kind {
            BoxKind::Text => layers.inlines.push(InlineItem::Text(c)),
            BoxKind::Inline | BoxKind::InlineReplaced => layers.inlines.push(InlineItem::Background(c)),
            BoxKind::TableColumn | BoxKind::TableColumnGroup => continue,
            _ => layers.blocks.push(c),
        }
        push_content(tree, c, layers);
        collect(tree, c, layers);
    }
}

/// [§ 14.2 The background](https://www.w3.org/TR/CSS2/colors.html#background)
///
/// "For HTML documents whose root HTML element has computed values of
/// 'transparent' for 'background-color' and 'none' for 'background-image',
/// user agents must instead use the computed value of the background
/// properties from that element's first BODY element child when painting
/// backgrounds for the canvas, and must not paint a background for that
/// BODY element."
fn background_source(tree: &BoxTree, ctx: &LayoutContext<'_>) -> Option<BoxId> {
    let root = tree.viewport.root_box?;
    if !ctx.config.use_html || !tree[root].style.background_color.is_transparent() {
        return Some(root);
    }
    let body = tree[root]
        .children
        .iter()
        .copied()
        .find(|&c| tree[c].tag.as_deref() == Some("body") && tree[c].split_id == 0);
    Some(body.unwrap_or(root))
}

/// "The background of the root element becomes the background of the
/// canvas and covers the entire canvas"
#[must_use]
pub fn canvas_background(tree: &BoxTree, ctx: &LayoutContext<'_>) -> Color {
    background_source(tree, ctx).map_or(Color::TRANSPARENT, |s| tree[s].style.background_color)
}

/// The background color a box paints: the canvas color for the viewport,
/// nothing for the element the canvas took its color from.
#[must_use]
pub fn used_background(tree: &BoxTree, ctx: &LayoutContext<'_>, id: BoxId) -> Color {
    if tree[id].kind == BoxKind::Viewport {
        return canvas_background(tree, ctx);
    }
    if background_source(tree, ctx) == Some(id) {
        return Color::TRANSPARENT;
    }
    tree[id].style.background_color
}
