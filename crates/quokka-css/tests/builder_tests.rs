//! Integration tests for box tree construction.

use quokka_css::layout::text::visible_text;
use quokka_css::{
    ApproximateVisualContext, BoxId, BoxKind, BoxTree, BoxTreeBuilder, LayoutConfig, LayoutError,
    PseudoElement, StyleMap,
};
use quokka_dom::{DomTree, NodeId, NodeType};

/// A document with `<html><body>` ready for content.
fn document() -> (DomTree, NodeId) {
    let mut dom = DomTree::new();
    let html = dom.append_element(NodeId::ROOT, "html", &[]);
    let body = dom.append_element(html, "body", &[]);
    (dom, body)
}

fn build(dom: &DomTree, styles: &StyleMap) -> BoxTree {
    let config = LayoutConfig::default();
    let visual = ApproximateVisualContext::default();
    BoxTreeBuilder::new(dom, styles, &visual, &config)
        .build()
        .expect("document has a root element")
}

fn principal(tree: &BoxTree, node: NodeId) -> BoxId {
    tree.box_for_node(node).expect("node should generate a box")
}

fn kinds(tree: &BoxTree, id: BoxId) -> Vec<BoxKind> {
    tree[id].children.iter().map(|&c| tree[c].kind).collect()
}

#[test]
fn test_empty_document_is_an_error() {
    let dom = DomTree::new();
    let config = LayoutConfig::default();
    let styles = StyleMap::new(&config);
    let visual = ApproximateVisualContext::default();
    let result = BoxTreeBuilder::new(&dom, &styles, &visual, &config).build();
    assert!(matches!(result, Err(LayoutError::MissingDocumentElement)));
}

#[test]
fn test_build_from_text_node_is_an_error() {
    let (mut dom, body) = document();
    let text = dom.append_text(body, "hello");
    let config = LayoutConfig::default();
    let styles = StyleMap::new(&config);
    let visual = ApproximateVisualContext::default();
    let result = BoxTreeBuilder::new(&dom, &styles, &visual, &config).build_from(text);
    assert!(matches!(result, Err(LayoutError::UnknownNode(_))));
}

#[test]
fn test_viewport_holds_root_box() {
    let (dom, _) = document();
    let styles = StyleMap::new(&LayoutConfig::default());
    let tree = build(&dom, &styles);

    let viewport = tree.root().expect("viewport");
    assert_eq!(tree[viewport].kind, BoxKind::Viewport);
    let html = dom.document_element().expect("html");
    let root = principal(&tree, html);
    assert_eq!(tree[viewport].children, vec![root]);
    assert!(tree[root].root);
    assert_eq!(tree.viewport.root_box, Some(root));
}

#[test]
fn test_display_none_generates_no_box() {
    let (mut dom, body) = document();
    let hidden = dom.append_element(body, "div", &[]);
    let _ = dom.append_text(hidden, "invisible");
    let script = dom.append_element(body, "script", &[]);
    let mut styles = StyleMap::new(&LayoutConfig::default());
    styles.set_style(hidden, "display: none").unwrap();
    let tree = build(&dom, &styles);

    assert!(tree.box_for_node(hidden).is_none());
    assert!(tree.box_for_node(script).is_none());
    assert!(tree[principal(&tree, body)].children.is_empty());
}

#[test]
fn test_comments_generate_no_box() {
    let (mut dom, body) = document();
    let comment = dom.alloc(NodeType::Comment(" note ".to_string()));
    dom.append_child(body, comment);
    let div = dom.append_element(body, "div", &[]);
    let styles = StyleMap::new(&LayoutConfig::default());
    let tree = build(&dom, &styles);

    assert!(tree.box_for_node(comment).is_none());
    assert_eq!(tree[principal(&tree, body)].children, vec![principal(&tree, div)]);
}

// ---------------------------------------------------------------------------
// Anonymous boxes
//
// [§ 9.2.1.1 Anonymous block boxes](https://www.w3.org/TR/CSS2/visuren.html#anonymous-block-level)
// ---------------------------------------------------------------------------

#[test]
fn test_text_before_block_gets_anonymous_block() {
    let (mut dom, body) = document();
    let div = dom.append_element(body, "div", &[]);
    let text = dom.append_text(div, "text");
    let p = dom.append_element(div, "p", &[]);
    let _ = dom.append_text(p, "block");
    let styles = StyleMap::new(&LayoutConfig::default());
    let tree = build(&dom, &styles);

    let d = principal(&tree, div);
    let children = tree[d].children.clone();
    assert_eq!(children.len(), 2);

    let anon = children[0];
    assert!(tree[anon].anonymous);
    assert_eq!(tree[anon].kind, BoxKind::Block);
    assert_eq!(tree[anon].children, vec![principal(&tree, text)]);
    assert_eq!(tree[anon].parent, Some(d));

    assert_eq!(children[1], principal(&tree, p));
    assert!(tree[d].block.contblock);
}

#[test]
fn test_whitespace_between_blocks_is_dropped() {
    let (mut dom, body) = document();
    let div = dom.append_element(body, "div", &[]);
    let _ = dom.append_text(div, "\n  ");
    let p1 = dom.append_element(div, "p", &[]);
    let _ = dom.append_text(p1, "a");
    let _ = dom.append_text(div, "  \n  ");
    let p2 = dom.append_element(div, "p", &[]);
    let _ = dom.append_text(p2, "b");
    let _ = dom.append_text(div, "  ");
    let styles = StyleMap::new(&LayoutConfig::default());
    let tree = build(&dom, &styles);

    let d = principal(&tree, div);
    assert_eq!(tree[d].children, vec![principal(&tree, p1), principal(&tree, p2)]);
}

#[test]
fn test_inline_is_split_around_block() {
    let (mut dom, body) = document();
    let div = dom.append_element(body, "div", &[]);
    let span = dom.append_element(div, "span", &[]);
    let _ = dom.append_text(span, "before");
    let p = dom.append_element(span, "p", &[]);
    let _ = dom.append_text(p, "block");
    let _ = dom.append_text(span, "after");
    let styles = StyleMap::new(&LayoutConfig::default());
    let tree = build(&dom, &styles);

    let d = principal(&tree, div);
    assert_eq!(kinds(&tree, d), vec![BoxKind::Block, BoxKind::Block, BoxKind::Block]);

    let pieces = tree.boxes_for_node(span);
    assert_eq!(pieces.len(), 2);
    let (first, second) = (pieces[0], pieces[1]);
    assert_eq!(tree[first].split_id, 0);
    assert_eq!(tree[second].split_id, 1);
    assert_eq!(tree[first].order, tree[second].order);

    let children = tree[d].children.clone();
    assert!(tree[children[0]].anonymous);
    assert_eq!(tree[children[0]].children, vec![first]);
    assert_eq!(children[1], principal(&tree, p));
    assert!(tree[children[2]].anonymous);
    assert_eq!(tree[children[2]].children, vec![second]);

    let after = tree[second].children[0];
    assert_eq!(visible_text(&tree, after), "after");
}

#[test]
fn test_text_beside_inline_gets_anonymous_inline() {
    let (mut dom, body) = document();
    let div = dom.append_element(body, "div", &[]);
    let _ = dom.append_text(div, "plain ");
    let em = dom.append_element(div, "em", &[]);
    let _ = dom.append_text(em, "emphasis");
    let styles = StyleMap::new(&LayoutConfig::default());
    let tree = build(&dom, &styles);

    let d = principal(&tree, div);
    assert_eq!(kinds(&tree, d), vec![BoxKind::Inline, BoxKind::Inline]);
    let anon = tree[d].children[0];
    assert!(tree[anon].anonymous);
    assert_eq!(kinds(&tree, anon), vec![BoxKind::Text]);
    assert_eq!(tree[d].children[1], principal(&tree, em));
}

// ---------------------------------------------------------------------------
// White space
//
// [§ 16.6.1 The 'white-space' processing model](https://www.w3.org/TR/CSS2/text.html#white-space-model)
// ---------------------------------------------------------------------------

#[test]
fn test_whitespace_collapses_across_inline_boundaries() {
    let (mut dom, body) = document();
    let p = dom.append_element(body, "p", &[]);
    let first = dom.append_text(p, "one   ");
    let em = dom.append_element(p, "em", &[]);
    let middle = dom.append_text(em, "two  ");
    let last = dom.append_text(p, "  three  ");
    let styles = StyleMap::new(&LayoutConfig::default());
    let tree = build(&dom, &styles);

    assert_eq!(visible_text(&tree, principal(&tree, first)), "one ");
    assert_eq!(visible_text(&tree, principal(&tree, middle)), "two ");
    assert!(tree[principal(&tree, middle)].text.ignore_initial_ws);

    // the trailing space of the block is removed
    let three = principal(&tree, last);
    assert_eq!(visible_text(&tree, three), " three");
    assert!(tree[three].text.ignore_initial_ws);
}

#[test]
fn test_pre_keeps_spaces() {
    let (mut dom, body) = document();
    let pre = dom.append_element(body, "pre", &[]);
    let text = dom.append_text(pre, "a   b  ");
    let mut styles = StyleMap::new(&LayoutConfig::default());
    styles.set_style(pre, "white-space: pre").unwrap();
    let tree = build(&dom, &styles);

    assert_eq!(visible_text(&tree, principal(&tree, text)), "a   b  ");
}

// ---------------------------------------------------------------------------
// Tables
//
// [§ 17.2.1 Anonymous table objects](https://www.w3.org/TR/CSS2/tables.html#anonymous-boxes)
// ---------------------------------------------------------------------------

#[test]
fn test_table_gets_wrapper_and_row_group() {
    let (mut dom, body) = document();
    let table = dom.append_element(body, "table", &[]);
    let tr = dom.append_element(table, "tr", &[]);
    let td = dom.append_element(tr, "td", &[]);
    let _ = dom.append_text(td, "cell");
    let styles = StyleMap::new(&LayoutConfig::default());
    let tree = build(&dom, &styles);

    let wrapper = principal(&tree, table);
    assert_eq!(tree[wrapper].kind, BoxKind::TableWrapper);
    assert_eq!(kinds(&tree, wrapper), vec![BoxKind::Table]);

    let t = tree[wrapper].children[0];
    assert_eq!(kinds(&tree, t), vec![BoxKind::TableBody]);
    let group = tree[t].children[0];
    assert!(tree[group].anonymous);
    assert_eq!(tree[group].children, vec![principal(&tree, tr)]);
    assert_eq!(tree[principal(&tree, tr)].children, vec![principal(&tree, td)]);
    assert_eq!(tree[principal(&tree, td)].kind, BoxKind::TableCell);
}

#[test]
fn test_lone_cell_gets_every_missing_parent() {
    let (mut dom, body) = document();
    let div = dom.append_element(body, "div", &[]);
    let cell = dom.append_element(div, "div", &[]);
    let _ = dom.append_text(cell, "cell");
    let mut styles = StyleMap::new(&LayoutConfig::default());
    styles.set_style(cell, "display: table-cell").unwrap();
    let tree = build(&dom, &styles);

    let c = principal(&tree, cell);
    assert_eq!(tree[c].kind, BoxKind::TableCell);
    let row = tree[c].parent.expect("row");
    assert_eq!(tree[row].kind, BoxKind::TableRow);
    let group = tree[row].parent.expect("row group");
    assert_eq!(tree[group].kind, BoxKind::TableBody);
    let t = tree[group].parent.expect("table");
    assert_eq!(tree[t].kind, BoxKind::Table);
    let wrapper = tree[t].parent.expect("wrapper");
    assert_eq!(tree[wrapper].kind, BoxKind::TableWrapper);
    assert_eq!(tree[wrapper].parent, Some(principal(&tree, div)));
    for id in [row, group, t, wrapper] {
        assert!(tree[id].anonymous);
    }
}

#[test]
fn test_caption_moves_to_wrapper() {
    let (mut dom, body) = document();
    let table = dom.append_element(body, "table", &[]);
    let caption = dom.append_element(table, "caption", &[]);
    let _ = dom.append_text(caption, "title");
    let tbody = dom.append_element(table, "tbody", &[]);
    let tr = dom.append_element(tbody, "tr", &[]);
    let td = dom.append_element(tr, "td", &[]);
    let _ = dom.append_text(td, "x");
    let styles = StyleMap::new(&LayoutConfig::default());
    let tree = build(&dom, &styles);

    let wrapper = principal(&tree, table);
    assert_eq!(kinds(&tree, wrapper), vec![BoxKind::Table, BoxKind::TableCaption]);
    let t = tree[wrapper].children[0];
    assert_eq!(tree[t].children, vec![principal(&tree, tbody)]);
}

// ---------------------------------------------------------------------------
// Generated content
//
// [§ 12.1 The :before and :after pseudo-elements](https://www.w3.org/TR/CSS2/generate.html#before-after-content)
// ---------------------------------------------------------------------------

fn generated(tree: &BoxTree, element: BoxId, pseudo: PseudoElement) -> String {
    let id = tree[element]
        .children
        .iter()
        .copied()
        .find(|&c| tree[c].pseudo == Some(pseudo))
        .expect("pseudo-element box");
    tree[id]
        .children
        .iter()
        .map(|&c| visible_text(tree, c))
        .collect()
}

#[test]
fn test_before_and_after_surround_content() {
    let (mut dom, body) = document();
    let a = dom.append_element(body, "a", &[("href", "page.html")]);
    let _ = dom.append_text(a, "link");
    let mut styles = StyleMap::new(&LayoutConfig::default());
    styles.set_pseudo_style(a, PseudoElement::Before, "content: \"[\"").unwrap();
    styles
        .set_pseudo_style(a, PseudoElement::After, "content: \"](\" attr(href) \")\"")
        .unwrap();
    let tree = build(&dom, &styles);

    let id = principal(&tree, a);
    let children = tree[id].children.clone();
    assert_eq!(children.len(), 3);
    assert_eq!(tree[children[0]].pseudo, Some(PseudoElement::Before));
    assert_eq!(tree[children[2]].pseudo, Some(PseudoElement::After));
    assert_eq!(generated(&tree, id, PseudoElement::Before), "[");
    assert_eq!(generated(&tree, id, PseudoElement::After), "](page.html)");
}

#[test]
fn test_pseudo_without_content_generates_nothing() {
    let (mut dom, body) = document();
    let div = dom.append_element(body, "div", &[]);
    let _ = dom.append_text(div, "x");
    let mut styles = StyleMap::new(&LayoutConfig::default());
    styles.set_pseudo_style(div, PseudoElement::Before, "color: red").unwrap();
    let tree = build(&dom, &styles);

    let id = principal(&tree, div);
    assert!(tree[id].children.iter().all(|&c| tree[c].pseudo.is_none()));
}

#[test]
fn test_counters_number_siblings() {
    let (mut dom, body) = document();
    let section = dom.append_element(body, "div", &[]);
    let mut styles = StyleMap::new(&LayoutConfig::default());
    styles.set_style(section, "counter-reset: item").unwrap();
    let mut heads = Vec::new();
    for title in ["first", "second", "third"] {
        let h = dom.append_element(section, "h2", &[]);
        let _ = dom.append_text(h, title);
        styles.set_style(h, "counter-increment: item").unwrap();
        styles
            .set_pseudo_style(h, PseudoElement::Before, "content: counter(item) \". \"")
            .unwrap();
        heads.push(h);
    }
    let tree = build(&dom, &styles);

    let numbers: Vec<String> = heads
        .iter()
        .map(|&h| generated(&tree, principal(&tree, h), PseudoElement::Before))
        .collect();
    assert_eq!(numbers, vec!["1. ", "2. ", "3. "]);
}

#[test]
fn test_inside_marker_is_first_child() {
    let (mut dom, body) = document();
    let ol = dom.append_element(body, "ol", &[]);
    let mut styles = StyleMap::new(&LayoutConfig::default());
    let mut items = Vec::new();
    for text in ["a", "b"] {
        let li = dom.append_element(ol, "li", &[]);
        let _ = dom.append_text(li, text);
        styles.set_style(li, "list-style-position: inside").unwrap();
        items.push(li);
    }
    let tree = build(&dom, &styles);

    let second = principal(&tree, items[1]);
    assert_eq!(tree[second].kind, BoxKind::ListItem);
    let marker = tree[second].list_item.inside_marker.expect("inside marker");
    assert_eq!(tree[second].children[0], marker);
    assert!(visible_text(&tree, marker).starts_with("2."));
}

// ---------------------------------------------------------------------------
// Positioning and blockification
//
// [§ 9.7 Relationships between 'display', 'position', and 'float'](https://www.w3.org/TR/CSS2/visuren.html#dis-pos-flo)
// ---------------------------------------------------------------------------

#[test]
fn test_floated_inline_becomes_block() {
    let (mut dom, body) = document();
    let p = dom.append_element(body, "p", &[]);
    let span = dom.append_element(p, "span", &[]);
    let _ = dom.append_text(span, "float");
    let _ = dom.append_text(p, "text");
    let mut styles = StyleMap::new(&LayoutConfig::default());
    styles.set_style(span, "float: left; width: 50px").unwrap();
    let tree = build(&dom, &styles);

    let s = principal(&tree, span);
    assert_eq!(tree[s].kind, BoxKind::Block);
    assert!(tree[s].is_block);
    assert!(tree[s].is_floating());
    // a float is out of flow, so no anonymous blocks are needed
    assert_eq!(tree[principal(&tree, p)].children[0], s);
}

#[test]
fn test_absolute_box_is_placed_in_containing_block() {
    let (mut dom, body) = document();
    let outer = dom.append_element(body, "div", &[]);
    let inner = dom.append_element(outer, "div", &[]);
    let abs = dom.append_element(inner, "span", &[]);
    let _ = dom.append_text(abs, "abs");
    let mut styles = StyleMap::new(&LayoutConfig::default());
    styles.set_style(outer, "position: relative").unwrap();
    styles.set_style(abs, "position: absolute; top: 0; left: 0").unwrap();
    let tree = build(&dom, &styles);

    let a = principal(&tree, abs);
    let o = principal(&tree, outer);
    assert_eq!(tree[a].kind, BoxKind::Block);
    assert_eq!(tree[a].containing_block, Some(o));
    assert_eq!(tree[a].parent, Some(o));
    assert_eq!(tree[a].block.dom_parent, Some(principal(&tree, inner)));
}

#[test]
fn test_fixed_box_belongs_to_viewport() {
    let (mut dom, body) = document();
    let outer = dom.append_element(body, "div", &[]);
    let fixed = dom.append_element(outer, "div", &[]);
    let mut styles = StyleMap::new(&LayoutConfig::default());
    styles.set_style(outer, "position: relative").unwrap();
    styles.set_style(fixed, "position: fixed; bottom: 0").unwrap();
    let tree = build(&dom, &styles);

    let f = principal(&tree, fixed);
    assert_eq!(tree[f].containing_block, tree.root());
    assert_eq!(tree[f].parent, tree.root());
}

#[test]
fn test_flex_children_become_items() {
    let (mut dom, body) = document();
    let flex = dom.append_element(body, "div", &[]);
    let a = dom.append_element(flex, "span", &[]);
    let _ = dom.append_text(a, "a");
    let _ = dom.append_text(flex, "loose text");
    let mut styles = StyleMap::new(&LayoutConfig::default());
    styles.set_style(flex, "display: flex").unwrap();
    let tree = build(&dom, &styles);

    let f = principal(&tree, flex);
    assert_eq!(tree[f].kind, BoxKind::Flex);
    assert_eq!(tree[principal(&tree, a)].kind, BoxKind::FlexItem);
    let children = tree[f].children.clone();
    assert_eq!(children.len(), 2);
    assert!(children.iter().all(|&c| tree[c].is_block));
    assert!(tree[children[1]].anonymous);
}

#[test]
fn test_overflow_of_body_moves_to_viewport() {
    let (dom, body) = document();
    let mut styles = StyleMap::new(&LayoutConfig::default());
    styles.set_style(body, "overflow: hidden").unwrap();
    let tree = build(&dom, &styles);

    let viewport = tree.root().expect("viewport");
    assert_eq!(tree[viewport].style.overflow, quokka_css::style::Overflow::Hidden);
    assert_eq!(
        tree[principal(&tree, body)].style.overflow,
        quokka_css::style::Overflow::Visible
    );
}

#[test]
fn test_img_with_alt_text_when_images_are_replaced() {
    let (mut dom, body) = document();
    let img = dom.append_element(body, "img", &[("src", "cat.png"), ("alt", "a cat")]);
    let config = LayoutConfig {
        replace_images_with_alt: true,
        ..LayoutConfig::default()
    };
    let styles = StyleMap::new(&config);
    let visual = ApproximateVisualContext::default();
    let tree = BoxTreeBuilder::new(&dom, &styles, &visual, &config).build().unwrap();

    let i = principal(&tree, img);
    assert_eq!(tree[i].kind, BoxKind::Inline);
    let text = tree[i].children[0];
    assert_eq!(visible_text(&tree, text), "a cat");
}

#[test]
fn test_img_is_replaced() {
    let (mut dom, body) = document();
    let img = dom.append_element(body, "img", &[("src", "cat.png"), ("width", "40"), ("height", "30")]);
    let styles = StyleMap::new(&LayoutConfig::default());
    let tree = build(&dom, &styles);

    let i = principal(&tree, img);
    assert_eq!(tree[i].kind, BoxKind::InlineReplaced);
    assert!(tree[i].children.is_empty());
    assert_eq!(tree[i].replaced.source.as_deref(), Some("cat.png"));
}
