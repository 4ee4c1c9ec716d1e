//! Generated content of `::before` and `::after`.
//!
//! [§ 12.2 The 'content' property](https://www.w3.org/TR/CSS2/generate.html#content)
//!
//! "This property is used with the :before and :after pseudo-elements to
//! generate content in a document."

use quokka_dom::ElementData;

use crate::layout::list_item::format_number;
use crate::style::ContentItem;

use super::counters::Counters;

/// The text a `content` value generates for an element.
///
/// Strings are taken as they are, `attr()` reads the attribute of the
/// element (empty when missing) and `counter()`/`counters()` format the
/// counters in scope.
#[must_use]
pub fn generated_text(content: &[ContentItem], element: Option<&ElementData>, counters: &Counters) -> String {
    let mut ret = String::new();
    for item in content {
        match item {
            ContentItem::Text(text) => ret.push_str(text),
            // "If the subject of the selector doesn't have an attribute X,
            // an empty string is returned."
            ContentItem::Attr(name) => ret.push_str(element.and_then(|e| e.attr(name)).unwrap_or_default()),
            ContentItem::Counter(name, style) => ret.push_str(&format_number(counters.value(name), *style)),
            ContentItem::Counters(name, separator, style) => {
                let values: Vec<String> = counters
                    .values(name)
                    .into_iter()
                    .map(|v| format_number(v, *style))
                    .collect();
                ret.push_str(&values.join(separator));
            }
        }
    }
    ret
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{ListStyleType, parse_content};
    use quokka_dom::{DomTree, NodeId};

    #[test]
    fn test_strings_and_attributes() {
        let mut dom = DomTree::new();
        let a = dom.append_element(NodeId::ROOT, "a", &[("href", "x.html")]);
        let content = parse_content("\"(\" attr(href) attr(title) \")\"").unwrap();
        let text = generated_text(&content, dom.as_element(a), &Counters::new());
        assert_eq!(text, "(x.html)");
    }

    #[test]
    fn test_counter_styles() {
        let mut counters = Counters::new();
        counters.reset("ch", 3);
        let content = vec![
            ContentItem::Counter("ch".to_string(), ListStyleType::UpperRoman),
            ContentItem::Text(". ".to_string()),
        ];
        assert_eq!(generated_text(&content, None, &counters), "III. ");
    }

    #[test]
    fn test_nested_counters_join() {
        let mut counters = Counters::new();
        counters.reset("s", 2);
        counters.push_scope();
        counters.reset("s", 1);
        let content = vec![ContentItem::Counters(
            "s".to_string(),
            ".".to_string(),
            ListStyleType::Decimal,
        )];
        assert_eq!(generated_text(&content, None, &counters), "2.1");
    }
}
