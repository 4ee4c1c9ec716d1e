//! Style lookup for the box tree builder.
//!
//! The engine does not parse stylesheets or match selectors. The builder
//! asks a [`StyleResolver`] for the computed style of each element and of
//! its `::before`/`::after` pseudo-elements. [`StyleMap`] is a ready-made
//! resolver that stores declarations per node and performs inheritance.

use std::collections::HashMap;

use quokka_common::warning::warn_once;
use quokka_dom::{DomTree, NodeId};
use serde::Serialize;
use strum_macros::{Display as StrumDisplay, EnumString};

use crate::config::LayoutConfig;
use crate::error::{LayoutError, Result};

use super::computed::{
    ComputedStyle, FontStyle, FontWeight, ListStyleType, TextAlign, VerticalAlign, WhiteSpace,
};
use super::display::{Display, default_display_for_element};

/// [§ 12.1 The :before and :after pseudo-elements](https://www.w3.org/TR/CSS2/generate.html#before-after-content)
///
/// "Authors specify the style and location of generated content with the
/// :before and :after pseudo-elements."
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, StrumDisplay, EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum PseudoElement {
    /// Content inserted before the element's document content.
    Before,
    /// Content inserted after the element's document content.
    After,
}

/// Source of already cascaded and inherited styles.
pub trait StyleResolver {
    /// The computed style of an element, or `None` for nodes that are not
    /// elements.
    fn element_style(&self, dom: &DomTree, node: NodeId) -> Option<ComputedStyle>;

    /// The computed style of a pseudo-element, or `None` if the element has
    /// no such pseudo-element.
    fn pseudo_style(
        &self,
        dom: &DomTree,
        node: NodeId,
        pseudo: PseudoElement,
    ) -> Option<ComputedStyle>;
}

type Declarations = Vec<(String, String)>;

/// Declarations attached directly to DOM nodes.
///
/// Styles are computed on demand: the parent element's style is computed
/// first, the inherited properties are copied from it, the HTML defaults
/// are applied (when enabled) and finally the node's declarations in the
/// order they were set.
///
/// ```
/// use quokka_css::{LayoutConfig, StyleMap, StyleResolver};
/// use quokka_dom::{DomTree, NodeId};
///
/// let mut dom = DomTree::new();
/// let html = dom.append_element(NodeId::ROOT, "html", &[]);
/// let body = dom.append_element(html, "body", &[]);
/// let p = dom.append_element(body, "p", &[]);
///
/// let mut styles = StyleMap::new(&LayoutConfig::default());
/// styles.set_style(body, "font-size: 20px; width: 300px").unwrap();
///
/// let style = styles.element_style(&dom, p).unwrap();
/// assert_eq!(style.font_size, 20.0);
/// ```
#[derive(Debug, Clone)]
pub struct StyleMap {
    use_html: bool,
    font_family: String,
    font_size: f32,
    declarations: HashMap<NodeId, Declarations>,
    pseudo_declarations: HashMap<(NodeId, PseudoElement), Declarations>,
}

impl StyleMap {
    /// An empty map using the root font and HTML switch of `config`.
    #[must_use]
    pub fn new(config: &LayoutConfig) -> Self {
        StyleMap {
            use_html: config.use_html,
            font_family: config.default_font_family.clone(),
            font_size: config.default_font_size,
            declarations: HashMap::new(),
            pseudo_declarations: HashMap::new(),
        }
    }

    /// Attach one declaration to an element. Later declarations of the same
    /// property win.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidProperty`] if the property is unknown or
    /// the value does not parse.
    pub fn set_property(&mut self, node: NodeId, name: &str, value: &str) -> Result<()> {
        validate(name, value)?;
        self.declarations
            .entry(node)
            .or_default()
            .push((name.trim().to_string(), value.trim().to_string()));
        Ok(())
    }

    /// Attach a `name: value; name: value` declaration block to an element.
    ///
    /// # Errors
    ///
    /// Fails on the first invalid declaration. The declarations before it
    /// stay attached.
    pub fn set_style(&mut self, node: NodeId, block: &str) -> Result<()> {
        for (name, value) in split_block(block) {
            self.set_property(node, name, value)?;
        }
        Ok(())
    }

    /// Attach one declaration to a pseudo-element of an element.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidProperty`] for invalid declarations.
    pub fn set_pseudo_property(
        &mut self,
        node: NodeId,
        pseudo: PseudoElement,
        name: &str,
        value: &str,
    ) -> Result<()> {
        validate(name, value)?;
        self.pseudo_declarations
            .entry((node, pseudo))
            .or_default()
            .push((name.trim().to_string(), value.trim().to_string()));
        Ok(())
    }

    /// Attach a declaration block to a pseudo-element of an element.
    ///
    /// # Errors
    ///
    /// Fails on the first invalid declaration.
    pub fn set_pseudo_style(&mut self, node: NodeId, pseudo: PseudoElement, block: &str) -> Result<()> {
        for (name, value) in split_block(block) {
            self.set_pseudo_property(node, pseudo, name, value)?;
        }
        Ok(())
    }

    fn compute(&self, dom: &DomTree, node: NodeId, root_font_size: f32) -> Option<ComputedStyle> {
        let element = dom.as_element(node)?;
        let parent = dom
            .parent(node)
            .and_then(|p| self.compute(dom, p, root_font_size));
        let mut style = match &parent {
            Some(parent) => ComputedStyle::inherit_from(parent),
            None => ComputedStyle::initial(&self.font_family, self.font_size),
        };
        if self.use_html {
            apply_html_defaults(&mut style, &element.tag_name);
        }
        let parent_font_size = parent.as_ref().map_or(self.font_size, |p| p.font_size);
        if let Some(decls) = self.declarations.get(&node) {
            for (name, value) in decls {
                apply_or_warn(&mut style, name, value, parent_font_size, root_font_size);
            }
        }
        Some(style)
    }

    fn root_font_size(&self, dom: &DomTree) -> f32 {
        dom.document_element()
            .and_then(|root| self.compute(dom, root, self.font_size))
            .map_or(self.font_size, |s| s.font_size)
    }
}

impl StyleResolver for StyleMap {
    fn element_style(&self, dom: &DomTree, node: NodeId) -> Option<ComputedStyle> {
        let root_font_size = self.root_font_size(dom);
        self.compute(dom, node, root_font_size)
    }

    fn pseudo_style(
        &self,
        dom: &DomTree,
        node: NodeId,
        pseudo: PseudoElement,
    ) -> Option<ComputedStyle> {
        let decls = self.pseudo_declarations.get(&(node, pseudo))?;
        let root_font_size = self.root_font_size(dom);
        let element = self.compute(dom, node, root_font_size)?;
        // [§ 12.1](https://www.w3.org/TR/CSS2/generate.html#before-after-content)
        //
        // "The :before and :after pseudo-elements inherit any inheritable
        // properties from the element in the document tree to which they
        // are attached."
        let mut style = ComputedStyle::inherit_from(&element);
        style.display = Display::Inline;
        for (name, value) in decls {
            apply_or_warn(&mut style, name, value, element.font_size, root_font_size);
        }
        Some(style)
    }
}

/// Apply a stored declaration. One that no longer applies is skipped.
fn apply_or_warn(style: &mut ComputedStyle, name: &str, value: &str, parent_font_size: f32, root_font_size: f32) {
    if !style.apply_declaration(name, value, parent_font_size, root_font_size) {
        warn_once("style", &format!("ignoring declaration {name}: {value}"));
    }
}

fn validate(name: &str, value: &str) -> Result<()> {
    let mut scratch = ComputedStyle::default();
    if scratch.apply_declaration(name, value, scratch.font_size, scratch.font_size) {
        Ok(())
    } else {
        Err(LayoutError::InvalidProperty {
            name: name.to_string(),
            value: value.to_string(),
        })
    }
}

/// Split `a: b; c: d` into pairs, respecting quoted strings.
fn split_block(block: &str) -> Vec<(&str, &str)> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut quote = None;
    for (i, c) in block.char_indices() {
        match (quote, c) {
            (None, '"' | '\'') => quote = Some(c),
            (Some(q), _) if q == c => quote = None,
            (None, ';') => {
                out.extend(split_declaration(&block[start..i]));
                start = i + 1;
            }
            _ => {}
        }
    }
    out.extend(split_declaration(&block[start..]));
    out
}

fn split_declaration(decl: &str) -> Option<(&str, &str)> {
    let (name, value) = decl.split_once(':')?;
    let name = name.trim();
    (!name.is_empty()).then(|| (name, value.trim()))
}

/// [§ 15.3 Non-replaced elements](https://html.spec.whatwg.org/multipage/rendering.html#non-replaced-elements)
///
/// The subset of the user agent stylesheet that affects layout.
fn apply_html_defaults(style: &mut ComputedStyle, tag: &str) {
    style.display = default_display_for_element(tag);
    match tag {
        // [§ 15.3.4 Phrasing content](https://html.spec.whatwg.org/multipage/rendering.html#phrasing-content-3)
        "b" | "strong" => style.font_weight = FontWeight::Bold,
        "i" | "em" | "cite" | "var" | "dfn" => style.font_style = FontStyle::Italic,
        // [§ 15.3.9 Tables](https://html.spec.whatwg.org/multipage/rendering.html#tables-2)
        "td" => style.vertical_align = VerticalAlign::Middle,
        "th" => {
            style.font_weight = FontWeight::Bold;
            style.text_align = TextAlign::Center;
            style.vertical_align = VerticalAlign::Middle;
        }
        "center" => style.text_align = TextAlign::Center,
        "pre" | "listing" | "xmp" | "plaintext" => style.white_space = WhiteSpace::Pre,
        "nobr" => style.white_space = WhiteSpace::Nowrap,
        // [§ 15.3.8 Lists](https://html.spec.whatwg.org/multipage/rendering.html#lists)
        "ol" => style.list_style_type = ListStyleType::Decimal,
        "ul" | "menu" | "dir" => style.list_style_type = ListStyleType::Disc,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dom() -> (DomTree, NodeId, NodeId) {
        let mut dom = DomTree::new();
        let html = dom.append_element(NodeId::ROOT, "html", &[]);
        let body = dom.append_element(html, "body", &[]);
        let b = dom.append_element(body, "b", &[]);
        (dom, body, b)
    }

    #[test]
    fn test_split_block_respects_quotes() {
        let pairs = split_block("content: \"a;b\"; color: red;");
        assert_eq!(pairs, vec![("content", "\"a;b\""), ("color", "red")]);
    }

    #[test]
    fn test_html_defaults_and_inheritance() {
        let (dom, body, b) = dom();
        let mut styles = StyleMap::new(&LayoutConfig::default());
        styles.set_property(body, "font-size", "2em").unwrap();

        let style = styles.element_style(&dom, b).unwrap();
        assert_eq!(style.display, Display::Inline);
        assert_eq!(style.font_weight, FontWeight::Bold);
        assert_eq!(style.font_size, 32.0);
        assert_eq!(styles.element_style(&dom, body).unwrap().display, Display::Block);
    }

    #[test]
    fn test_without_html_everything_is_inline() {
        let (dom, body, _) = dom();
        let config = LayoutConfig {
            use_html: false,
            ..LayoutConfig::default()
        };
        let styles = StyleMap::new(&config);
        assert_eq!(styles.element_style(&dom, body).unwrap().display, Display::Inline);
    }

    #[test]
    fn test_unapplicable_declaration_is_reported() {
        let (dom, body, _) = dom();
        let mut styles = StyleMap::new(&LayoutConfig::default());
        styles
            .declarations
            .entry(body)
            .or_default()
            .push(("width".to_string(), "wide".to_string()));
        styles.set_property(body, "font-size", "20px").unwrap();

        let style = styles.element_style(&dom, body).unwrap();
        assert_eq!(style.font_size, 20.0);
        assert!(quokka_common::warning::was_warned("style", "ignoring declaration width: wide"));
    }

    #[test]
    fn test_invalid_property_is_rejected() {
        let (_, body, _) = dom();
        let mut styles = StyleMap::new(&LayoutConfig::default());
        let err = styles.set_property(body, "width", "wide").unwrap_err();
        assert!(matches!(err, LayoutError::InvalidProperty { .. }));
    }

    #[test]
    fn test_pseudo_style_requires_declarations() {
        let (dom, body, b) = dom();
        let mut styles = StyleMap::new(&LayoutConfig::default());
        styles
            .set_pseudo_style(b, PseudoElement::Before, "content: \"x\"")
            .unwrap();
        assert!(styles.pseudo_style(&dom, b, PseudoElement::Before).is_some());
        assert!(styles.pseudo_style(&dom, b, PseudoElement::After).is_none());
        assert!(styles.pseudo_style(&dom, body, PseudoElement::Before).is_none());

        let before = styles.pseudo_style(&dom, b, PseudoElement::Before).unwrap();
        assert_eq!(before.font_weight, FontWeight::Bold, "inherits from the element");
    }
}
