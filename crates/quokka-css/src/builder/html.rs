//! HTML-specific box construction, enabled by `LayoutConfig::use_html`.
//!
//! [§ 15.4 Replaced elements](https://html.spec.whatwg.org/multipage/rendering.html#replaced-elements)
//!
//! `<img>` and `<object>` become replaced boxes; the table elements take
//! their spans from attributes.

use quokka_dom::ElementData;

use crate::config::LayoutConfig;
use crate::layout::box_tree::{BoxId, BoxKind, BoxTree, ReplacedKind};
use crate::layout::replaced::{ReplacedContentSource, load_intrinsic};

/// The replaced content an element stands for, if any.
///
/// With `replace_images_with_alt` images are not replaced: they render
/// their `alt` text instead.
#[must_use]
pub fn replaced_kind(element: &ElementData, config: &LayoutConfig) -> Option<ReplacedKind> {
    match element.tag_name.as_str() {
        "img" if !config.replace_images_with_alt => Some(ReplacedKind::Image),
        "object" if element.has_attr("data") => Some(ReplacedKind::Object),
        _ => None,
    }
}

/// The text shown instead of an image.
#[must_use]
pub fn alt_text(element: &ElementData) -> Option<&str> {
    if element.tag_name != "img" {
        return None;
    }
    element.attr("alt").filter(|alt| !alt.trim().is_empty())
}

/// [§ 15.4.3 Attributes for embedded content and images](https://html.spec.whatwg.org/multipage/rendering.html#attributes-for-embedded-content-and-images)
///
/// A non-negative pixel length of a dimension attribute, like
/// `width="120"` or `width="120px"`.
#[must_use]
pub fn parse_dimension(value: &str) -> Option<f32> {
    let value = value.trim();
    let value = value.strip_suffix("px").unwrap_or(value).trim();
    value.parse::<f32>().ok().filter(|v| v.is_finite() && *v >= 0.0)
}

/// A positive integer attribute, like `colspan`.
fn parse_span(value: Option<&str>) -> Option<usize> {
    value?.trim().parse::<usize>().ok().filter(|v| *v > 0)
}

/// Fill in the replaced state of a box from the element attributes and
/// ask the content source for the intrinsic size.
pub fn init_replaced(
    tree: &mut BoxTree,
    id: BoxId,
    kind: ReplacedKind,
    element: &ElementData,
    source: &dyn ReplacedContentSource,
    config: &LayoutConfig,
) {
    let src = match kind {
        ReplacedKind::Image => element.attr("src"),
        ReplacedKind::Object => element.attr("data"),
    };
    {
        let b = &mut tree[id];
        b.replaced.kind = kind;
        b.replaced.source = src.map(str::to_string);
        b.replaced.attr_size = (
            element.attr("width").and_then(parse_dimension),
            element.attr("height").and_then(parse_dimension),
        );
        b.empty = false;
    }
    if config.load_images {
        load_intrinsic(tree, id, source);
    }
}

/// [§ 4.9.11 The td element](https://html.spec.whatwg.org/multipage/tables.html#the-td-element)
///
/// `colspan` and `rowspan` of cells, `span` and `width` of columns.
pub fn apply_table_attributes(tree: &mut BoxTree, id: BoxId, element: &ElementData) {
    let b = &mut tree[id];
    match b.kind {
        BoxKind::TableCell => {
            b.cell.colspan = parse_span(element.attr("colspan")).unwrap_or(1);
            b.cell.rowspan = parse_span(element.attr("rowspan")).unwrap_or(1);
        }
        BoxKind::TableColumn | BoxKind::TableColumnGroup => {
            b.column.span = parse_span(element.attr("span")).unwrap_or(1);
            b.column.attr_width = element.attr("width").and_then(parse_dimension);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quokka_dom::{DomTree, NodeId};

    #[test]
    fn test_parse_dimension() {
        assert_eq!(parse_dimension("120"), Some(120.0));
        assert_eq!(parse_dimension(" 40px "), Some(40.0));
        assert_eq!(parse_dimension("-3"), None);
        assert_eq!(parse_dimension("50%"), None);
    }

    #[test]
    fn test_replaced_kinds() {
        let mut dom = DomTree::new();
        let img = dom.append_element(NodeId::ROOT, "img", &[("src", "a.png"), ("alt", "A")]);
        let object = dom.append_element(NodeId::ROOT, "object", &[]);
        let config = LayoutConfig::default();
        assert_eq!(replaced_kind(dom.as_element(img).unwrap(), &config), Some(ReplacedKind::Image));
        assert_eq!(replaced_kind(dom.as_element(object).unwrap(), &config), None);

        let alt = LayoutConfig {
            replace_images_with_alt: true,
            ..LayoutConfig::default()
        };
        assert_eq!(replaced_kind(dom.as_element(img).unwrap(), &alt), None);
        assert_eq!(alt_text(dom.as_element(img).unwrap()), Some("A"));
    }
}
