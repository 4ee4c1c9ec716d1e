//! Tests for DOM tree construction helpers and traversal.

use quokka_dom::{DomTree, NodeId, NodeType};

#[test]
fn test_append_element_links_siblings() {
    let mut tree = DomTree::new();
    let html = tree.append_element(NodeId::ROOT, "HTML", &[]);
    let head = tree.append_element(html, "head", &[]);
    let body = tree.append_element(html, "body", &[("class", "main")]);

    assert_eq!(tree.children(html), &[head, body]);
    assert_eq!(tree.next_sibling(head), Some(body));
    assert_eq!(tree.prev_sibling(body), Some(head));
    assert_eq!(tree.parent(body), Some(html));
    assert_eq!(tree.tag_name(html), Some("html"), "tag names are lower-cased");
}

#[test]
fn test_document_element_and_body() {
    let mut tree = DomTree::new();
    let comment = tree.alloc(NodeType::Comment("x".to_string()));
    tree.append_child(NodeId::ROOT, comment);
    let html = tree.append_element(NodeId::ROOT, "html", &[]);
    let _head = tree.append_element(html, "head", &[]);
    let body = tree.append_element(html, "body", &[]);

    assert_eq!(tree.document_element(), Some(html));
    assert_eq!(tree.body(), Some(body));
}

#[test]
fn test_missing_document_element() {
    let tree = DomTree::new();
    assert_eq!(tree.document_element(), None);
    assert_eq!(tree.body(), None);
}

#[test]
fn test_text_content_in_document_order() {
    let mut tree = DomTree::new();
    let div = tree.append_element(NodeId::ROOT, "div", &[]);
    let _ = tree.append_text(div, "one ");
    let span = tree.append_element(div, "span", &[]);
    let _ = tree.append_text(span, "two");
    let _ = tree.append_text(div, " three");

    assert_eq!(tree.text_content(div), "one two three");
}

#[test]
fn test_set_attribute_replaces_value() {
    let mut tree = DomTree::new();
    let img = tree.append_element(NodeId::ROOT, "img", &[("src", "a.png")]);
    tree.set_attribute(img, "src", "b.png");
    tree.set_attribute(img, "alt", "picture");

    let data = tree.as_element(img).unwrap();
    assert_eq!(data.attr("src"), Some("b.png"));
    assert_eq!(data.attr("alt"), Some("picture"));
    assert!(data.has_attr("alt"));
    assert_eq!(data.id(), None);
}

#[test]
fn test_ancestors_walk_to_document() {
    let mut tree = DomTree::new();
    let html = tree.append_element(NodeId::ROOT, "html", &[]);
    let body = tree.append_element(html, "body", &[]);
    let p = tree.append_element(body, "p", &[]);

    let chain: Vec<NodeId> = tree.ancestors(p).collect();
    assert_eq!(chain, vec![body, html, NodeId::ROOT]);
}

#[test]
fn test_append_child_ignores_invalid_ids() {
    let mut tree = DomTree::new();
    let div = tree.append_element(NodeId::ROOT, "div", &[]);
    tree.append_child(div, NodeId(999));
    tree.append_child(div, div);
    assert!(tree.children(div).is_empty());
}
