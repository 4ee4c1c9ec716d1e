//! Replaced elements.
//!
//! [§ 3.1 Definitions](https://www.w3.org/TR/CSS2/conform.html#replaced-element)
//!
//! "An element whose content is outside the scope of the CSS formatting
//! model, such as an image, embedded document, or applet."
//!
//! The engine never decodes the content. A [`ReplacedContentSource`]
//! reports the intrinsic size, and the used size follows from
//! [`super::decoder::compute_replaced_object_size`].

use std::collections::HashMap;

use log::debug;

use super::box_tree::{BoxId, BoxTree, LayoutContext, ReplacedKind};
use super::element::set_size_to_total;
use super::geometry::Dimension;

/// Supplies the intrinsic size of the content of `<img>` and `<object>`.
pub trait ReplacedContentSource {
    /// Intrinsic size of the resource named by `source`, or `None` when it
    /// cannot be loaded.
    fn intrinsic_size(&self, kind: ReplacedKind, source: &str) -> Option<Dimension>;
}

/// A source that knows no content: every replaced element is missing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoContent;

impl ReplacedContentSource for NoContent {
    fn intrinsic_size(&self, _kind: ReplacedKind, _source: &str) -> Option<Dimension> {
        None
    }
}

/// Intrinsic sizes registered up front by source name.
#[derive(Debug, Clone, Default)]
pub struct StaticContentSource {
    sizes: HashMap<String, Dimension>,
}

impl StaticContentSource {
    /// An empty source.
    #[must_use]
    pub fn new() -> Self {
        StaticContentSource::default()
    }

    /// Register the intrinsic size of a resource.
    #[must_use]
    pub fn with(mut self, source: &str, width: f32, height: f32) -> Self {
        let _ = self.sizes.insert(source.to_string(), Dimension::new(width, height));
        self
    }
}

impl ReplacedContentSource for StaticContentSource {
    fn intrinsic_size(&self, _kind: ReplacedKind, source: &str) -> Option<Dimension> {
        self.sizes.get(source).copied()
    }
}

/// Ask the content source for the intrinsic size of a replaced box.
pub fn load_intrinsic(tree: &mut BoxTree, id: BoxId, source: &dyn ReplacedContentSource) {
    let state = &tree[id].replaced;
    let intrinsic = state
        .source
        .as_deref()
        .and_then(|src| source.intrinsic_size(state.kind, src));
    debug!(
        target: "quokka::builder",
        "replaced {id:?} {:?}: intrinsic size {intrinsic:?}",
        state.source
    );
    tree[id].replaced.intrinsic = intrinsic;
}

/// [§ 10.3.2 Inline, replaced elements](https://www.w3.org/TR/CSS2/visudet.html#inline-replaced-width)
///
/// The size of a replaced box is known before layout. An inline replaced
/// box fits the line when its width does, or when the layout is forced.
pub fn do_layout(tree: &mut BoxTree, _ctx: &LayoutContext<'_>, id: BoxId, availw: f32, force: bool) -> bool {
    if !tree[id].displayed {
        let b = &mut tree[id];
        b.content = Dimension::default();
        b.bounds.set_size(0.0, 0.0);
        return true;
    }
    tree[id].avail_width = availw;
    set_size_to_total(tree, id);
    if tree[id].is_block {
        return true;
    }
    let b = &tree[id];
    let wlimit = availw - b.margin.horizontal() - b.border.horizontal() - b.padding.horizontal();
    b.content.width <= wlimit || force
}

/// Preferred widths of a replaced box: it cannot shrink or grow.
#[must_use]
pub fn width(tree: &BoxTree, id: BoxId) -> f32 {
    let b = &tree[id];
    b.content.width + b.margin.horizontal() + b.border.horizontal() + b.padding.horizontal()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_source_lookup() {
        let source = StaticContentSource::new().with("a.png", 40.0, 30.0);
        assert_eq!(
            source.intrinsic_size(ReplacedKind::Image, "a.png"),
            Some(Dimension::new(40.0, 30.0))
        );
        assert_eq!(source.intrinsic_size(ReplacedKind::Image, "b.png"), None);
        assert_eq!(NoContent.intrinsic_size(ReplacedKind::Object, "a.png"), None);
    }
}
