//! Integration tests for the visual formatting model.

use quokka_css::layout::positioning::{MAX_POSITIONING_PASSES, absolute_positions};
use quokka_css::layout::viewport;
use quokka_css::{
    ApproximateVisualContext, BoxId, BoxTree, LayoutConfig, LayoutContext, StyleMap, dump_tree,
    layout_document,
};
use quokka_dom::{DomTree, NodeId};
use quickcheck_macros::quickcheck;

const EPSILON: f32 = 0.01;

fn approx(actual: f32, expected: f32) -> bool {
    (actual - expected).abs() < EPSILON
}

/// A document with `<html><body>` ready for content.
fn document() -> (DomTree, NodeId) {
    let mut dom = DomTree::new();
    let html = dom.append_element(NodeId::ROOT, "html", &[]);
    let body = dom.append_element(html, "body", &[]);
    (dom, body)
}

fn layout(dom: &DomTree, styles: &StyleMap, width: f32, height: f32) -> BoxTree {
    let config = LayoutConfig::default();
    let visual = ApproximateVisualContext::default();
    layout_document(dom, styles, &visual, &config, width, height).expect("layout")
}

fn principal(tree: &BoxTree, node: NodeId) -> BoxId {
    tree.box_for_node(node).expect("node should generate a box")
}

// ---------------------------------------------------------------------------
// Widths and margins
//
// [§ 10.3.3 Block-level, non-replaced elements in normal flow](https://www.w3.org/TR/CSS2/visudet.html#blockwidth)
// ---------------------------------------------------------------------------

#[test]
fn test_auto_margins_center_block() {
    let (mut dom, body) = document();
    let div = dom.append_element(body, "div", &[]);
    let mut styles = StyleMap::new(&LayoutConfig::default());
    styles.set_style(div, "width: 200px; height: 50px; margin: 0 auto").unwrap();
    let tree = layout(&dom, &styles, 600.0, 400.0);

    let b = &tree[principal(&tree, div)];
    assert!(approx(b.content.width, 200.0));
    assert!(approx(b.margin.left, 200.0));
    assert!(approx(b.margin.right, 200.0));
    assert!(approx(b.abs_content_bounds().x, 200.0));
}

#[test]
fn test_auto_width_fills_container() {
    let (mut dom, body) = document();
    let div = dom.append_element(body, "div", &[]);
    let mut styles = StyleMap::new(&LayoutConfig::default());
    styles.set_style(div, "margin: 0 30px; padding: 10px; border: 5px solid black").unwrap();
    let tree = layout(&dom, &styles, 600.0, 400.0);

    let b = &tree[principal(&tree, div)];
    assert!(approx(b.content.width, 600.0 - 60.0 - 20.0 - 10.0));
    assert!(approx(b.border.left, 5.0));
    assert!(approx(b.padding.right, 10.0));
}

#[test]
fn test_border_box_sizing() {
    let (mut dom, body) = document();
    let div = dom.append_element(body, "div", &[]);
    let mut styles = StyleMap::new(&LayoutConfig::default());
    styles
        .set_style(
            div,
            "box-sizing: border-box; width: 200px; height: 100px; padding: 20px; border: 5px solid black",
        )
        .unwrap();
    let tree = layout(&dom, &styles, 600.0, 400.0);

    let b = &tree[principal(&tree, div)];
    assert!(approx(b.content.width, 150.0));
    assert!(approx(b.content.height, 50.0));
    assert!(approx(b.abs_border_bounds().width, 200.0));
}

#[test]
fn test_percentage_width() {
    let (mut dom, body) = document();
    let outer = dom.append_element(body, "div", &[]);
    let inner = dom.append_element(outer, "div", &[]);
    let mut styles = StyleMap::new(&LayoutConfig::default());
    styles.set_style(outer, "width: 400px").unwrap();
    styles.set_style(inner, "width: 25%; height: 10px").unwrap();
    let tree = layout(&dom, &styles, 600.0, 400.0);

    assert!(approx(tree[principal(&tree, inner)].content.width, 100.0));
}

/// [§ 10.4 Minimum and maximum widths](https://www.w3.org/TR/CSS2/visudet.html#min-max-widths)
///
/// "If the resulting width is greater than 'max-width', the rules above
/// are applied again, but this time using the computed value of
/// 'max-width' as the computed value for 'width'."
#[quickcheck]
fn prop_width_is_clamped_by_min_and_max(width: u8, min: u8, max: u8) -> bool {
    let (mut dom, body) = document();
    let div = dom.append_element(body, "div", &[]);
    let mut styles = StyleMap::new(&LayoutConfig::default());
    let declarations = format!("width: {width}px; min-width: {min}px; max-width: {max}px; height: 1px");
    if styles.set_style(div, &declarations).is_err() {
        return false;
    }
    let tree = layout(&dom, &styles, 600.0, 400.0);

    let (w, lo, hi) = (f32::from(width), f32::from(min), f32::from(max));
    // min-width wins over a smaller max-width
    let expected = w.min(hi.max(lo)).max(lo);
    approx(tree[principal(&tree, div)].content.width, expected)
}

// ---------------------------------------------------------------------------
// Margin collapsing
//
// [§ 8.3.1 Collapsing margins](https://www.w3.org/TR/CSS2/box.html#collapsing-margins)
//
// "When two or more margins collapse, the resulting margin width is the
// maximum of the collapsing margins' widths."
// ---------------------------------------------------------------------------

#[test]
fn test_sibling_margins_collapse_to_larger() {
    let (mut dom, body) = document();
    let first = dom.append_element(body, "div", &[]);
    let second = dom.append_element(body, "div", &[]);
    let mut styles = StyleMap::new(&LayoutConfig::default());
    styles.set_style(first, "height: 50px; margin-bottom: 20px").unwrap();
    styles.set_style(second, "height: 50px; margin-top: 10px").unwrap();
    let tree = layout(&dom, &styles, 600.0, 400.0);

    let a = tree[principal(&tree, first)].abs_border_bounds();
    let b = tree[principal(&tree, second)].abs_border_bounds();
    assert!(approx(b.y - (a.y + a.height), 20.0));
}

#[test]
fn test_padding_separates_margins() {
    let (mut dom, body) = document();
    let first = dom.append_element(body, "div", &[]);
    let second = dom.append_element(body, "div", &[]);
    let mut styles = StyleMap::new(&LayoutConfig::default());
    styles.set_style(first, "height: 50px; margin-bottom: 20px").unwrap();
    styles.set_style(second, "height: 50px; margin-top: 30px").unwrap();
    let tree = layout(&dom, &styles, 600.0, 400.0);

    let a = tree[principal(&tree, first)].abs_border_bounds();
    let b = tree[principal(&tree, second)].abs_border_bounds();
    assert!(approx(b.y - (a.y + a.height), 30.0));
}

/// The gap between two bordered blocks separated by the given margins.
fn sibling_gap(bottom: &str, top: &str) -> f32 {
    let (mut dom, body) = document();
    let first = dom.append_element(body, "div", &[]);
    let second = dom.append_element(body, "div", &[]);
    let mut styles = StyleMap::new(&LayoutConfig::default());
    styles.set_style(first, &format!("height: 50px; margin-bottom: {bottom}")).unwrap();
    styles.set_style(second, &format!("height: 50px; margin-top: {top}")).unwrap();
    let tree = layout(&dom, &styles, 600.0, 400.0);

    let a = tree[principal(&tree, first)].abs_border_bounds();
    let b = tree[principal(&tree, second)].abs_border_bounds();
    b.y - (a.y + a.height)
}

// "If there are no positive margins, the maximum of the absolute values of
// the adjoining margins is deducted from zero."
#[test]
fn test_negative_margins_collapse_to_most_negative() {
    assert!(approx(sibling_gap("-20px", "-10px"), -20.0));
    assert!(approx(sibling_gap("-10px", "-20px"), -20.0));
}

// "In the case of negative margins, the maximum of the absolute values of
// the negative adjoining margins is deducted from the maximum of the
// positive adjoining margins."
#[test]
fn test_mixed_sign_margins_collapse_to_sum() {
    assert!(approx(sibling_gap("20px", "-10px"), 10.0));
    assert!(approx(sibling_gap("-30px", "5px"), -25.0));
}

#[test]
fn test_margins_collapse_through_empty_block() {
    let (mut dom, body) = document();
    let first = dom.append_element(body, "div", &[]);
    let empty = dom.append_element(body, "div", &[]);
    let second = dom.append_element(body, "div", &[]);
    let mut styles = StyleMap::new(&LayoutConfig::default());
    styles.set_style(first, "height: 50px; margin-bottom: 20px").unwrap();
    styles.set_style(empty, "margin: 10px 0 30px").unwrap();
    styles.set_style(second, "height: 50px; margin-top: 5px").unwrap();
    let tree = layout(&dom, &styles, 600.0, 400.0);

    let a = tree[principal(&tree, first)].abs_border_bounds();
    let b = tree[principal(&tree, second)].abs_border_bounds();
    assert!(approx(b.y - (a.y + a.height), 30.0));
    let e = &tree[principal(&tree, empty)];
    assert!(approx(e.emargin.top, e.emargin.bottom));
}

#[test]
fn test_first_child_margin_collapses_with_parents() {
    let (mut dom, body) = document();
    let div = dom.append_element(body, "div", &[]);
    let mut styles = StyleMap::new(&LayoutConfig::default());
    styles.set_style(div, "height: 10px; margin-top: 30px").unwrap();
    let tree = layout(&dom, &styles, 600.0, 400.0);

    // the body margin of 8px collapses with the larger child margin
    assert!(approx(tree[principal(&tree, div)].abs_border_bounds().y, 30.0));
    assert!(approx(tree[principal(&tree, body)].abs_content_bounds().y, 30.0));
}

// ---------------------------------------------------------------------------
// Floats
//
// [§ 9.5 Floats](https://www.w3.org/TR/CSS2/visuren.html#floats)
// ---------------------------------------------------------------------------

#[test]
fn test_text_flows_beside_left_float() {
    let (mut dom, body) = document();
    let float = dom.append_element(body, "div", &[]);
    let text = dom.append_text(body, "Hello");
    let mut styles = StyleMap::new(&LayoutConfig::default());
    styles.set_style(float, "float: left; width: 100px; height: 50px").unwrap();
    let tree = layout(&dom, &styles, 600.0, 400.0);

    let origin = tree[principal(&tree, body)].abs_content_bounds();
    let f = tree[principal(&tree, float)].abs_bounds;
    assert!(approx(f.x, origin.x));
    let t = tree[principal(&tree, text)].abs_bounds;
    assert!(approx(t.x - origin.x, 100.0));
}

#[test]
fn test_right_float_sits_at_right_edge() {
    let (mut dom, body) = document();
    let float = dom.append_element(body, "div", &[]);
    let mut styles = StyleMap::new(&LayoutConfig::default());
    styles.set_style(float, "float: right; width: 100px; height: 50px").unwrap();
    let tree = layout(&dom, &styles, 600.0, 400.0);

    let f = tree[principal(&tree, float)].abs_bounds;
    assert!(approx(f.x + f.width, 600.0));
}

#[test]
fn test_clear_moves_below_float() {
    let (mut dom, body) = document();
    let float = dom.append_element(body, "div", &[]);
    let cleared = dom.append_element(body, "div", &[]);
    let mut styles = StyleMap::new(&LayoutConfig::default());
    styles.set_style(float, "float: left; width: 100px; height: 50px").unwrap();
    styles.set_style(cleared, "clear: left; height: 10px").unwrap();
    let tree = layout(&dom, &styles, 600.0, 400.0);

    let f = tree[principal(&tree, float)].abs_bounds;
    let c = tree[principal(&tree, cleared)].abs_border_bounds();
    assert!(c.y >= f.y + f.height - EPSILON);
}

// ---------------------------------------------------------------------------
// Inline formatting
//
// [§ 9.4.2 Inline formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#inline-formatting)
// ---------------------------------------------------------------------------

#[test]
fn test_long_text_breaks_into_lines() {
    let (mut dom, body) = document();
    let div = dom.append_element(body, "div", &[]);
    let text = dom.append_text(div, "aaa bbb ccc ddd eee fff");
    let mut styles = StyleMap::new(&LayoutConfig::default());
    styles.set_style(div, "width: 100px").unwrap();
    let tree = layout(&dom, &styles, 600.0, 400.0);

    assert!(tree.boxes_for_node(text).len() > 1);
    let d = &tree[principal(&tree, div)];
    let line = d.line_height;
    assert!(d.content.height > line + EPSILON);
}

#[test]
fn test_center_aligned_line() {
    let (mut dom, body) = document();
    let div = dom.append_element(body, "div", &[]);
    let text = dom.append_text(div, "Hi");
    let mut styles = StyleMap::new(&LayoutConfig::default());
    styles.set_style(div, "text-align: center; font-size: 10px").unwrap();
    let tree = layout(&dom, &styles, 600.0, 400.0);

    // two glyphs of 6px
    let t = tree[principal(&tree, text)].abs_bounds;
    assert!(approx(t.x, (600.0 - 12.0) / 2.0));
}

// ---------------------------------------------------------------------------
// Positioning
//
// [§ 9.3 Positioning schemes](https://www.w3.org/TR/CSS2/visuren.html#positioning-scheme)
// ---------------------------------------------------------------------------

#[test]
fn test_relative_offset_keeps_flow() {
    let (mut dom, body) = document();
    let rel = dom.append_element(body, "div", &[]);
    let next = dom.append_element(body, "div", &[]);
    let mut styles = StyleMap::new(&LayoutConfig::default());
    styles.set_style(rel, "position: relative; left: 15px; top: 5px; height: 20px").unwrap();
    styles.set_style(next, "height: 20px").unwrap();
    let tree = layout(&dom, &styles, 600.0, 400.0);

    let origin = tree[principal(&tree, body)].abs_content_bounds();
    let r = tree[principal(&tree, rel)].abs_bounds;
    assert!(approx(r.x - origin.x, 15.0));
    assert!(approx(r.y - origin.y, 5.0));
    // the following box is placed as if no offset was applied
    let n = tree[principal(&tree, next)].abs_bounds;
    assert!(approx(n.y - origin.y, 20.0));
}

#[test]
fn test_absolute_box_uses_padding_edge_of_containing_block() {
    let (mut dom, body) = document();
    let container = dom.append_element(body, "div", &[]);
    let abs = dom.append_element(container, "div", &[]);
    let mut styles = StyleMap::new(&LayoutConfig::default());
    styles
        .set_style(container, "position: relative; margin-left: 50px; padding: 10px; height: 100px")
        .unwrap();
    styles
        .set_style(abs, "position: absolute; left: 10px; top: 20px; width: 30px; height: 30px")
        .unwrap();
    let tree = layout(&dom, &styles, 600.0, 400.0);

    let pad = tree[principal(&tree, container)].abs_padding_bounds();
    let a = tree[principal(&tree, abs)].abs_bounds;
    assert!(approx(a.x, pad.x + 10.0));
    assert!(approx(a.y, pad.y + 20.0));
    assert!(approx(tree[principal(&tree, abs)].content.width, 30.0));
}

#[test]
fn test_fixed_box_uses_viewport() {
    let (mut dom, body) = document();
    let spacer = dom.append_element(body, "div", &[]);
    let fixed = dom.append_element(body, "div", &[]);
    let mut styles = StyleMap::new(&LayoutConfig::default());
    styles.set_style(spacer, "height: 100px; margin-left: 40px").unwrap();
    styles
        .set_style(fixed, "position: fixed; left: 20px; top: 10px; width: 50px; height: 50px")
        .unwrap();
    let tree = layout(&dom, &styles, 600.0, 400.0);

    let f = tree[principal(&tree, fixed)].abs_bounds;
    assert!(approx(f.x, 20.0));
    assert!(approx(f.y, 10.0));
}

// [§ 10.3.7](https://www.w3.org/TR/CSS2/visudet.html#abs-non-replaced-width)
//
// "The static position for 'top' is the distance from the top edge of the
// containing block to the top margin edge of a hypothetical box that would
// have been the first box of the element if its specified 'position' value
// had been 'static'"
#[test]
fn test_static_position_follows_preceding_block() {
    let (mut dom, body) = document();
    let spacer = dom.append_element(body, "div", &[]);
    let abs = dom.append_element(body, "div", &[]);
    let mut styles = StyleMap::new(&LayoutConfig::default());
    styles.set_style(spacer, "height: 50px").unwrap();
    styles.set_style(abs, "position: absolute; width: 10px; height: 10px").unwrap();
    let mut tree = layout(&dom, &styles, 600.0, 400.0);

    let s = tree[principal(&tree, spacer)].abs_bounds;
    let a = tree[principal(&tree, abs)].abs_bounds;
    assert!(approx(a.y, s.y + s.height));
    // the static position is refined by a second pass
    assert_eq!(absolute_positions(&mut tree), MAX_POSITIONING_PASSES);
    let again = tree[principal(&tree, abs)].abs_bounds;
    assert!(approx(again.y, a.y));
    assert!(!tree.viewport.recompute);
}

#[test]
fn test_static_position_of_first_child_uses_parent_content() {
    let (mut dom, body) = document();
    let container = dom.append_element(body, "div", &[]);
    let abs = dom.append_element(container, "div", &[]);
    let mut styles = StyleMap::new(&LayoutConfig::default());
    styles.set_style(container, "margin-top: 40px; padding: 15px; height: 30px").unwrap();
    styles.set_style(abs, "position: absolute; width: 10px; height: 10px").unwrap();
    let tree = layout(&dom, &styles, 600.0, 400.0);

    let content = tree[principal(&tree, container)].abs_content_bounds();
    let a = tree[principal(&tree, abs)].abs_bounds;
    assert!(approx(a.y, content.y));
    assert!(approx(a.x, content.x));
}

// ---------------------------------------------------------------------------
// Flexbox and grid
// ---------------------------------------------------------------------------

#[test]
fn test_flex_items_share_free_space() {
    let (mut dom, body) = document();
    let flex = dom.append_element(body, "div", &[]);
    let mut styles = StyleMap::new(&LayoutConfig::default());
    styles.set_style(flex, "display: flex; width: 300px; height: 40px").unwrap();
    let mut items = Vec::new();
    for _ in 0..3 {
        let item = dom.append_element(flex, "div", &[]);
        styles.set_style(item, "flex: 1").unwrap();
        items.push(item);
    }
    let tree = layout(&dom, &styles, 600.0, 400.0);

    for (n, &item) in items.iter().enumerate() {
        let b = &tree[principal(&tree, item)];
        assert!(approx(b.content.width, 100.0));
        assert!(approx(b.bounds.x, 100.0 * n as f32));
    }
}

/// A row flex container holding `count` items styled by `item`.
fn flex_row(container: &str, item: &str, count: usize) -> (BoxTree, Vec<BoxId>) {
    let (mut dom, body) = document();
    let flex = dom.append_element(body, "div", &[]);
    let mut styles = StyleMap::new(&LayoutConfig::default());
    styles.set_style(flex, container).unwrap();
    let mut items = Vec::new();
    for _ in 0..count {
        let item_node = dom.append_element(flex, "div", &[]);
        styles.set_style(item_node, item).unwrap();
        items.push(item_node);
    }
    let tree = layout(&dom, &styles, 600.0, 400.0);
    let ids = items.iter().map(|&n| principal(&tree, n)).collect();
    (tree, ids)
}

#[test]
fn test_flex_items_keep_declared_width() {
    let (tree, items) = flex_row("display: flex; width: 300px", "width: 50px; height: 20px", 3);
    for (n, &item) in items.iter().enumerate() {
        let b = &tree[item];
        assert!(approx(b.content.width, 50.0));
        assert!(approx(b.margin.right, 0.0));
        assert!(approx(b.bounds.x, 50.0 * n as f32));
    }
}

// [§ 9.7 Resolving Flexible Lengths](https://www.w3.org/TR/css-flexbox-1/#resolve-flexible-lengths)
//
// Equal base sizes shrink by the same amount.
#[test]
fn test_flex_items_shrink_to_fit() {
    let (tree, items) = flex_row("display: flex; width: 300px", "width: 200px; height: 20px", 3);
    for (n, &item) in items.iter().enumerate() {
        let b = &tree[item];
        assert!(approx(b.content.width, 100.0));
        assert!(approx(b.bounds.x, 100.0 * n as f32));
    }
}

#[test]
fn test_flex_wrap_with_centered_lines() {
    let (tree, items) = flex_row(
        "display: flex; flex-wrap: wrap; justify-content: center; width: 300px",
        "width: 120px; height: 20px",
        3,
    );
    let b: Vec<_> = items.iter().map(|&i| &tree[i]).collect();
    for item in &b {
        assert!(approx(item.content.width, 120.0));
    }
    // two items fit on the first line, the free 60px split around them
    assert!(approx(b[0].bounds.x, 30.0));
    assert!(approx(b[1].bounds.x, 150.0));
    assert!(approx(b[0].bounds.y, 0.0));
    assert!(approx(b[1].bounds.y, 0.0));
    assert_eq!(b[2].item.flex_line, 1);
    assert!(approx(b[2].bounds.x, 90.0));
    assert!(approx(b[2].bounds.y, 20.0));
}

#[test]
fn test_flex_wrap_space_between() {
    let (tree, items) = flex_row(
        "display: flex; flex-wrap: wrap; justify-content: space-between; width: 300px",
        "width: 120px; height: 20px",
        3,
    );
    assert!(approx(tree[items[0]].bounds.x, 0.0));
    assert!(approx(tree[items[1]].bounds.x, 180.0));
    // a lone item stays at the start of its line
    assert!(approx(tree[items[2]].bounds.x, 0.0));
    assert!(approx(tree[items[2]].bounds.y, 20.0));
}

#[test]
fn test_grid_item_with_declared_width() {
    let (mut dom, body) = document();
    let grid = dom.append_element(body, "div", &[]);
    let a = dom.append_element(grid, "div", &[]);
    let b = dom.append_element(grid, "div", &[]);
    let mut styles = StyleMap::new(&LayoutConfig::default());
    styles.set_style(grid, "display: grid; grid-template-columns: 100px 100px").unwrap();
    styles.set_style(a, "width: 40px; height: 10px").unwrap();
    let tree = layout(&dom, &styles, 600.0, 400.0);

    let (ba, bb) = (&tree[principal(&tree, a)], &tree[principal(&tree, b)]);
    assert!(approx(ba.content.width, 40.0));
    assert!(approx(ba.margin.right, 0.0));
    assert!(ba.bounds.width <= 100.0 + EPSILON);
    assert!(approx(bb.bounds.x, 100.0));
    assert!(approx(bb.content.width, 100.0));
}

#[test]
fn test_grid_item_percentage_width_uses_area() {
    let (mut dom, body) = document();
    let grid = dom.append_element(body, "div", &[]);
    let a = dom.append_element(grid, "div", &[]);
    let mut styles = StyleMap::new(&LayoutConfig::default());
    styles.set_style(grid, "display: grid; grid-template-columns: 200px").unwrap();
    styles.set_style(a, "width: 50%; height: 10px").unwrap();
    let tree = layout(&dom, &styles, 600.0, 400.0);

    assert!(approx(tree[principal(&tree, a)].content.width, 100.0));
}

#[test]
fn test_grid_places_items_in_columns() {
    let (mut dom, body) = document();
    let grid = dom.append_element(body, "div", &[]);
    let a = dom.append_element(grid, "div", &[]);
    let b = dom.append_element(grid, "div", &[]);
    let mut styles = StyleMap::new(&LayoutConfig::default());
    styles
        .set_style(grid, "display: grid; grid-template-columns: 100px 200px; column-gap: 10px")
        .unwrap();
    let tree = layout(&dom, &styles, 600.0, 400.0);

    let (ba, bb) = (&tree[principal(&tree, a)], &tree[principal(&tree, b)]);
    assert!(approx(ba.bounds.x, 0.0));
    assert!(approx(ba.content.width, 100.0));
    assert!(approx(bb.bounds.x, 110.0));
    assert!(approx(bb.content.width, 200.0));
}

// ---------------------------------------------------------------------------
// Tables
//
// [§ 17.5 Visual layout of table contents](https://www.w3.org/TR/CSS2/tables.html#table-layout)
// ---------------------------------------------------------------------------

#[test]
fn test_colspan_cell_covers_two_columns() {
    let (mut dom, body) = document();
    let table = dom.append_element(body, "table", &[]);
    let tbody = dom.append_element(table, "tbody", &[]);
    let r1 = dom.append_element(tbody, "tr", &[]);
    let wide = dom.append_element(r1, "td", &[("colspan", "2")]);
    let _ = dom.append_text(wide, "wide");
    let r2 = dom.append_element(tbody, "tr", &[]);
    let c1 = dom.append_element(r2, "td", &[]);
    let _ = dom.append_text(c1, "a");
    let c2 = dom.append_element(r2, "td", &[]);
    let _ = dom.append_text(c2, "b");
    let styles = StyleMap::new(&LayoutConfig::default());
    let tree = layout(&dom, &styles, 600.0, 400.0);

    let w = &tree[principal(&tree, wide)];
    assert_eq!(w.cell.colspan, 2);
    assert_eq!((w.cell.column, w.cell.row), (0, 0));
    let (b1, b2) = (&tree[principal(&tree, c1)], &tree[principal(&tree, c2)]);
    assert_eq!((b1.cell.column, b1.cell.row), (0, 1));
    assert_eq!((b2.cell.column, b2.cell.row), (1, 1));
    assert!(b2.abs_bounds.x > b1.abs_bounds.x);
    assert!(b1.abs_bounds.y > w.abs_bounds.y);
}

// ---------------------------------------------------------------------------
// The viewport
// ---------------------------------------------------------------------------

#[test]
fn test_canvas_grows_to_enclose_content() {
    let (mut dom, body) = document();
    let tall = dom.append_element(body, "div", &[]);
    let mut styles = StyleMap::new(&LayoutConfig::default());
    styles.set_style(tall, "height: 1000px").unwrap();
    let tree = layout(&dom, &styles, 600.0, 400.0);

    let viewport = tree.root().expect("viewport");
    assert!(tree[viewport].content.height >= 1000.0 - EPSILON);
    assert!(approx(tree[viewport].content.width, 600.0));
}

#[test]
fn test_layout_twice_gives_same_result() {
    let (mut dom, body) = document();
    let div = dom.append_element(body, "div", &[]);
    let _ = dom.append_text(div, "some words that wrap in a narrow box");
    let mut styles = StyleMap::new(&LayoutConfig::default());
    styles.set_style(div, "width: 80px").unwrap();

    let config = LayoutConfig::default();
    let visual = ApproximateVisualContext::default();
    let mut tree = layout_document(&dom, &styles, &visual, &config, 600.0, 400.0).unwrap();
    let first = dump_tree(&tree);
    let boxes = tree.len();

    let ctx = LayoutContext::new(&visual, &config);
    viewport::layout(&mut tree, &ctx, 600.0, 400.0);
    assert_eq!(dump_tree(&tree), first);
    assert_eq!(tree.len(), boxes);
}

#[test]
fn test_relayout_at_new_width() {
    let (mut dom, body) = document();
    let div = dom.append_element(body, "div", &[]);
    let mut styles = StyleMap::new(&LayoutConfig::default());
    styles.set_style(div, "height: 10px").unwrap();

    let config = LayoutConfig::default();
    let visual = ApproximateVisualContext::default();
    let mut tree = layout_document(&dom, &styles, &visual, &config, 600.0, 400.0).unwrap();
    assert!(approx(tree[principal(&tree, div)].content.width, 600.0));

    let ctx = LayoutContext::new(&visual, &config);
    viewport::layout(&mut tree, &ctx, 300.0, 400.0);
    assert!(approx(tree[principal(&tree, div)].content.width, 300.0));
}
