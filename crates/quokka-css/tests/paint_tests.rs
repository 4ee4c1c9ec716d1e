//! Integration tests for painting order and the box tree dump.

use quokka_css::paint::paint;
use quokka_css::style::Color;
use quokka_css::{
    ApproximateVisualContext, BoxTree, LayoutConfig, LayoutContext, PaintCommand, StyleMap,
    dump_tree, layout_document,
};
use quokka_dom::{DomTree, NodeId};

fn document() -> (DomTree, NodeId) {
    let mut dom = DomTree::new();
    let html = dom.append_element(NodeId::ROOT, "html", &[]);
    let body = dom.append_element(html, "body", &[]);
    (dom, body)
}

fn layout(dom: &DomTree, styles: &StyleMap) -> BoxTree {
    let config = LayoutConfig::default();
    let visual = ApproximateVisualContext::default();
    layout_document(dom, styles, &visual, &config, 600.0, 400.0).expect("layout")
}

fn commands(tree: &BoxTree) -> Vec<PaintCommand> {
    let config = LayoutConfig::default();
    let visual = ApproximateVisualContext::default();
    paint(tree, &LayoutContext::new(&visual, &config)).commands().to_vec()
}

fn color(name: &str) -> Color {
    Color::from_named(name).expect("named color")
}

/// Index of the first rectangle filled with `fill`.
fn first_fill(commands: &[PaintCommand], fill: Color) -> Option<usize> {
    commands
        .iter()
        .position(|c| matches!(c, PaintCommand::FillRect { color, .. } if *color == fill))
}

#[test]
fn test_body_background_fills_canvas() {
    let (mut dom, body) = document();
    let _ = dom.append_text(body, "Hello");
    let mut styles = StyleMap::new(&LayoutConfig::default());
    styles.set_style(body, "background-color: yellow").unwrap();
    let tree = layout(&dom, &styles);

    let yellow = color("yellow");
    let commands = commands(&tree);
    let Some(PaintCommand::FillRect { x, y, width, color: fill, .. }) = commands.first() else {
        panic!("expected the canvas fill first, got {commands:?}");
    };
    assert_eq!((*x, *y), (0.0, 0.0));
    assert!((*width - 600.0).abs() < 0.01);
    assert_eq!(*fill, yellow);
    // the body itself does not paint the color a second time
    let fills = commands
        .iter()
        .filter(|c| matches!(c, PaintCommand::FillRect { color, .. } if *color == yellow))
        .count();
    assert_eq!(fills, 1);
}

#[test]
fn test_text_is_drawn() {
    let (mut dom, body) = document();
    let p = dom.append_element(body, "p", &[]);
    let _ = dom.append_text(p, "Hello");
    let styles = StyleMap::new(&LayoutConfig::default());
    let tree = layout(&dom, &styles);

    let commands = commands(&tree);
    assert!(
        commands
            .iter()
            .any(|c| matches!(c, PaintCommand::DrawText { text, .. } if text.contains("Hello")))
    );
}

// [CSS 2.1 Appendix E.2](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
//
// Negative stack levels paint below the in-flow blocks, positive ones
// above them.
#[test]
fn test_stack_levels_paint_in_order() {
    let (mut dom, body) = document();
    let red = dom.append_element(body, "div", &[]);
    let green = dom.append_element(body, "div", &[]);
    let blue = dom.append_element(body, "div", &[]);
    let mut styles = StyleMap::new(&LayoutConfig::default());
    styles
        .set_style(
            red,
            "position: absolute; z-index: 2; left: 0; top: 0; width: 50px; height: 50px; background-color: red",
        )
        .unwrap();
    styles.set_style(green, "height: 50px; background-color: green").unwrap();
    styles
        .set_style(
            blue,
            "position: absolute; z-index: -1; left: 0; top: 0; width: 50px; height: 50px; background-color: blue",
        )
        .unwrap();
    let tree = layout(&dom, &styles);

    let commands = commands(&tree);
    let b = first_fill(&commands, color("blue")).expect("blue painted");
    let g = first_fill(&commands, color("green")).expect("green painted");
    let r = first_fill(&commands, color("red")).expect("red painted");
    assert!(b < g);
    assert!(g < r);

    let stacking = tree.stacking.as_ref().expect("root stacking context");
    assert_eq!(Some(stacking.owner), tree.root());
    let order = stacking.paint_order();
    let pos = |node| {
        let id = tree.box_for_node(node).unwrap();
        order.iter().position(|&o| o == id).unwrap()
    };
    assert!(pos(blue) < pos(red));
    assert!(!order.contains(&tree.box_for_node(green).unwrap()));
}

#[test]
fn test_overflow_hidden_clips_contents() {
    let (mut dom, body) = document();
    let div = dom.append_element(body, "div", &[]);
    let _ = dom.append_text(div, "clipped");
    let mut styles = StyleMap::new(&LayoutConfig::default());
    styles.set_style(div, "position: relative; overflow: hidden; width: 20px; height: 10px").unwrap();
    let tree = layout(&dom, &styles);

    let commands = commands(&tree);
    let push = commands
        .iter()
        .position(|c| matches!(c, PaintCommand::PushClip { .. }))
        .expect("clip pushed");
    let text = commands
        .iter()
        .position(|c| matches!(c, PaintCommand::DrawText { .. }))
        .expect("text drawn");
    let pop = commands
        .iter()
        .position(|c| matches!(c, PaintCommand::PopClip))
        .expect("clip popped");
    assert!(push < text && text < pop);
}

#[test]
fn test_dump_starts_at_viewport() {
    let (mut dom, body) = document();
    let _ = dom.append_text(body, "Hello");
    let styles = StyleMap::new(&LayoutConfig::default());
    let tree = layout(&dom, &styles);

    let dump = dump_tree(&tree);
    assert_eq!(dump["kind"], "Viewport");
    let children = dump["children"].as_array().expect("children");
    assert_eq!(children.len(), 1);
    assert_eq!(children[0]["tag"], "html");
}
