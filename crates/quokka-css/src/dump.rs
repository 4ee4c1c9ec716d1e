//! JSON view of a box tree.
//!
//! The dump follows the active children of every box, so after layout it
//! shows the continuation boxes created by line breaking and leaves out the
//! boxes dropped during construction.

use serde_json::{Map, Value, json};

use crate::layout::box_tree::{BoxId, BoxKind, BoxTree};
use crate::layout::text::visible_text;

/// Dump the whole tree, starting at the viewport. `Value::Null` for an
/// empty tree.
#[must_use]
pub fn dump_tree(tree: &BoxTree) -> Value {
    tree.root().map_or(Value::Null, |root| dump_box(tree, root))
}

/// Dump a box and its descendants.
#[must_use]
pub fn dump_box(tree: &BoxTree, id: BoxId) -> Value {
    let b = &tree[id];
    let mut obj = Map::new();

    let _ = obj.insert("id".to_string(), json!(id.0));
    let _ = obj.insert("kind".to_string(), json!(b.kind));
    if let Some(tag) = &b.tag {
        let _ = obj.insert("tag".to_string(), json!(tag));
    }
    if let Some(pseudo) = b.pseudo {
        let _ = obj.insert("pseudo".to_string(), json!(pseudo.to_string()));
    }
    if b.anonymous {
        let _ = obj.insert("anonymous".to_string(), json!(true));
    }
    let _ = obj.insert("order".to_string(), json!(b.order));
    let _ = obj.insert("splitId".to_string(), json!(b.split_id));
    let _ = obj.insert("bounds".to_string(), json!(b.bounds));
    let _ = obj.insert("absBounds".to_string(), json!(b.abs_bounds));
    let _ = obj.insert("content".to_string(), json!(b.content));
    if b.kind == BoxKind::Text {
        let _ = obj.insert("text".to_string(), json!(visible_text(tree, id)));
    } else {
        let _ = obj.insert("margin".to_string(), json!(b.margin));
        let _ = obj.insert("border".to_string(), json!(b.border));
        let _ = obj.insert("padding".to_string(), json!(b.padding));
    }

    let children: Vec<Value> = b.active_children().iter().map(|&c| dump_box(tree, c)).collect();
    if !children.is_empty() {
        let _ = obj.insert("children".to_string(), Value::Array(children));
    }

    Value::Object(obj)
}
