//! Box tree construction and CSS visual formatting model layout for Quokka.
//!
//! # Scope
//!
//! This crate implements:
//! - **Box tree construction** ([§ 9.2 Controlling box generation](https://www.w3.org/TR/CSS2/visuren.html#box-gen))
//!   - Principal boxes by `display`, anonymous block and inline boxes
//!   - Inline splitting around blocks
//!   - White space collapsing
//!   - Anonymous table objects
//!   - `::before`/`::after` content with counters, list markers
//!
//! - **Layout** ([CSS 2.1 Visual Formatting Model](https://www.w3.org/TR/CSS2/visuren.html))
//!   - Block and inline flow, line boxes, margin collapsing
//!   - Floats and clearance
//!   - Relative, absolute and fixed positioning
//!   - Tables, flexbox and grid
//!   - Stacking contexts
//!
//! - **Painting** ([CSS 2.1 Appendix E](https://www.w3.org/TR/CSS2/zindex.html))
//!   - A renderer interface driven in painting order, and a display list
//!
//! # Not Implemented
//!
//! - CSS parsing and selector matching: styles come from a [`StyleResolver`]
//! - Text shaping: text is measured through a [`VisualContext`]
//! - Image decoding: sizes come from a
//!   [`ReplacedContentSource`](layout::replaced::ReplacedContentSource)
//!
//! # Example
//!
//! ```
//! use quokka_css::{ApproximateVisualContext, LayoutConfig, StyleMap, layout_document};
//! use quokka_dom::{DomTree, NodeId};
//!
//! let mut dom = DomTree::new();
//! let html = dom.append_element(NodeId::ROOT, "html", &[]);
//! let body = dom.append_element(html, "body", &[]);
//! let div = dom.append_element(body, "div", &[]);
//!
//! let config = LayoutConfig::default();
//! let mut styles = StyleMap::new(&config);
//! styles.set_style(div, "width: 200px; height: 50px; margin: 0 auto").unwrap();
//!
//! let visual = ApproximateVisualContext::default();
//! let tree = layout_document(&dom, &styles, &visual, &config, 600.0, 400.0).unwrap();
//! let b = &tree[tree.box_for_node(div).unwrap()];
//! assert_eq!(b.margin.left, 200.0);
//! ```

/// Box tree construction per [§ 9.2](https://www.w3.org/TR/CSS2/visuren.html#box-gen).
pub mod builder;
/// Engine configuration.
pub mod config;
/// JSON dump of a box tree.
pub mod dump;
/// Errors of the fallible entry points.
pub mod error;
/// The visual formatting model per [CSS 2.1 § 9-10](https://www.w3.org/TR/CSS2/visuren.html).
pub mod layout;
/// Display list and painting per [CSS 2.1 Appendix E](https://www.w3.org/TR/CSS2/zindex.html).
pub mod paint;
/// Computed style representation.
pub mod style;

use quokka_dom::DomTree;

// Re-exports for convenience
pub use builder::BoxTreeBuilder;
pub use config::LayoutConfig;
pub use dump::dump_tree;
pub use error::{LayoutError, Result};
pub use layout::{
    ApproximateVisualContext, BoxId, BoxKind, BoxTree, Dimension, FontMetrics, FontSpec, LayoutBox,
    LayoutContext, LengthSet, Rect, StackingContext, VisualContext,
};
pub use paint::{BoxRenderer, DisplayList, PaintCommand};
pub use style::{ComputedStyle, Display, PseudoElement, StyleMap, StyleResolver};

/// Build the box tree of a document and lay it out in a viewport of the
/// given size.
///
/// # Errors
///
/// Returns [`LayoutError::MissingDocumentElement`] when the document has no
/// element.
pub fn layout_document(
    dom: &DomTree,
    styles: &dyn StyleResolver,
    visual: &dyn VisualContext,
    config: &LayoutConfig,
    width: f32,
    height: f32,
) -> Result<BoxTree> {
    let mut tree = BoxTreeBuilder::new(dom, styles, visual, config).build()?;
    let ctx = LayoutContext::new(visual, config);
    layout::viewport::layout(&mut tree, &ctx, width, height);
    Ok(tree)
}
