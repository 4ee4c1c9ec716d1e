//! Line boxes and the metrics of inline-level boxes placed on them.
//!
//! [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
//!
//! "The height of a line box is determined as follows:
//! 1. The height of each inline-level box in the line box is calculated.
//! 2. The inline-level boxes are aligned vertically according to their
//!    'vertical-align' property.
//! 3. The line box height is the distance between the uppermost box top and
//!    the lowermost box bottom."

use crate::style::VerticalAlign;

use super::box_tree::{BoxId, BoxKind, BoxTree};
use super::decoder::CssDecoder;

/// One line of inline content inside a block.
///
/// `above` and `below` are measured from the line baseline. The line keeps
/// the range `start..end` of the owner's children it covers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineBox {
    /// The box whose children are placed on the line.
    pub owner: Option<BoxId>,
    /// First child index on the line.
    pub start: usize,
    /// End child index (exclusive).
    pub end: usize,
    /// Top of the line in the owner's content coordinates.
    pub y: f32,
    /// Width taken by the boxes on the line.
    pub width: f32,
    /// Space taken by floats on the left.
    pub left: f32,
    /// Space taken by floats on the right.
    pub right: f32,
    /// Largest distance from the baseline to a box top.
    pub above: f32,
    /// Largest distance from the baseline to a box bottom.
    pub below: f32,
    /// Largest line height of the boxes aligned to the baseline.
    pub max_aligned_height: f32,
    /// Largest line height of all boxes on the line.
    pub max_box_height: f32,
    /// Largest line height of the `vertical-align: bottom` boxes.
    pub height_from_bottom: f32,
}

impl LineBox {
    /// An empty line starting at child `start`.
    #[must_use]
    pub fn new(owner: BoxId, start: usize, y: f32) -> Self {
        LineBox {
            owner: Some(owner),
            start,
            end: start,
            y,
            ..LineBox::default()
        }
    }

    /// Set the space taken by floats on both sides.
    pub const fn set_limits(&mut self, left: f32, right: f32) {
        self.left = left;
        self.right = right;
    }

    /// `left + right`.
    #[must_use]
    pub fn limits(&self) -> f32 {
        self.left + self.right
    }

    /// `above + below`.
    #[must_use]
    pub fn total_line_height(&self) -> f32 {
        self.above + self.below
    }

    /// Offset of the baseline-aligned content pushed down by taller
    /// bottom-aligned boxes.
    #[must_use]
    pub fn top_offset(&self) -> f32 {
        (self.height_from_bottom - self.max_aligned_height).max(0.0)
    }

    /// [§ 10.8 Leading](https://www.w3.org/TR/CSS2/visudet.html#leading)
    ///
    /// "the difference between A and D", spread around the content.
    #[must_use]
    pub fn lead(&self) -> f32 {
        self.max_aligned_height - self.total_line_height()
    }

    /// Update the line metrics with a newly placed box.
    pub fn consider_box(&mut self, tree: &BoxTree, id: BoxId) {
        let b = &tree[id];
        if !b.displayed || collapsed_completely(tree, id) {
            return;
        }
        let mut above = baseline_offset(tree, id);
        let mut below = below_baseline(tree, id);
        let max_lh = max_line_height(tree, id);
        if b.kind == BoxKind::Text {
            self.above = self.above.max(above);
            self.below = self.below.max(below);
            self.max_aligned_height = self.max_aligned_height.max(max_lh);
        } else {
            let va = b.style.vertical_align;
            if !va.is_line_relative() {
                let dif = self.baseline_difference(tree, id);
                above -= dif;
                below += dif;
                self.above = self.above.max(above);
                self.below = self.below.max(below);
                self.max_aligned_height = self.max_aligned_height.max(max_lh);
            } else if va == VerticalAlign::Bottom {
                self.height_from_bottom = self.height_from_bottom.max(max_lh);
            }
        }
        self.max_box_height = self.max_box_height.max(max_lh);
    }

    /// Start the metrics from the font of a box, as if an empty inline box
    /// with its font were on the line. Used for list markers.
    pub fn consider_box_properties(&mut self, tree: &BoxTree, id: BoxId) {
        let b = &tree[id];
        self.above = self.above.max(b.metrics.ascent);
        self.below = self.below.max(b.metrics.height - b.metrics.ascent);
        self.max_aligned_height = self.max_aligned_height.max(b.line_height);
    }

    /// The distance of the top content edge of a box from the top of the line.
    #[must_use]
    pub fn align_box(&self, tree: &BoxTree, id: BoxId) -> f32 {
        let b = &tree[id];
        if b.kind == BoxKind::Text {
            return self.above - baseline_offset(tree, id);
        }
        if b.style.vertical_align.is_line_relative() {
            // positioned against the line box in the positioning pass
            return 0.0;
        }
        self.above + self.baseline_difference(tree, id) - baseline_offset(tree, id)
            + linebox_offset(tree, id)
    }

    /// [§ 10.8.1 'vertical-align'](https://www.w3.org/TR/CSS2/visudet.html#propdef-vertical-align)
    ///
    /// How far the baseline of the box lies below the line baseline.
    fn baseline_difference(&self, tree: &BoxTree, id: BoxId) -> f32 {
        let b = &tree[id];
        let Some(owner) = self.owner.map(|o| &tree[o]) else {
            return 0.0;
        };
        let above = baseline_offset(tree, id);
        let below = below_baseline(tree, id);
        match b.style.vertical_align {
            VerticalAlign::Baseline | VerticalAlign::Top | VerticalAlign::Bottom => 0.0,
            // "Align the vertical midpoint of the box with the baseline of
            // the parent box plus half the x-height of the parent."
            VerticalAlign::Middle => (above - below) / 2.0 - owner.metrics.ex / 2.0,
            VerticalAlign::Sub => 0.3 * owner.line_height,
            VerticalAlign::Super => -0.3 * owner.line_height,
            // "Align the top of the box with the top of the parent's content area"
            VerticalAlign::TextTop => above - owner.metrics.ascent,
            VerticalAlign::TextBottom => {
                (owner.metrics.height - owner.metrics.ascent) - below
            }
            // "Percentages: refer to the 'line-height' of the element itself."
            VerticalAlign::Length(len) => {
                let dec = CssDecoder::new(&b.metrics, tree.root_font_size, viewport_size(tree));
                -dec.px(len, b.line_height)
            }
        }
    }
}

fn viewport_size(tree: &BoxTree) -> super::geometry::Dimension {
    super::geometry::Dimension::new(tree.viewport.width, tree.viewport.height)
}

/// True for inline-level boxes laid out as a single block inside a line.
#[must_use]
pub fn is_atomic_inline(tree: &BoxTree, id: BoxId) -> bool {
    let b = &tree[id];
    !b.is_block && !matches!(b.kind, BoxKind::Inline | BoxKind::Text)
}

/// Distance from the top of the box to its baseline.
#[must_use]
pub fn baseline_offset(tree: &BoxTree, id: BoxId) -> f32 {
    let b = &tree[id];
    match b.kind {
        BoxKind::Text => b.metrics.ascent,
        BoxKind::Inline => b.inline.line.as_ref().map_or(0.0, |l| l.above),
        BoxKind::InlineReplaced => b.bounds.height,
        _ if is_atomic_inline(tree, id) => super::block::inline_block_baseline(tree, id),
        _ => 0.0,
    }
}

/// Distance from the baseline to the bottom of the box.
#[must_use]
pub fn below_baseline(tree: &BoxTree, id: BoxId) -> f32 {
    let b = &tree[id];
    match b.kind {
        BoxKind::Text => b.metrics.height - b.metrics.ascent,
        BoxKind::Inline => b.inline.line.as_ref().map_or(0.0, |l| l.below),
        BoxKind::InlineReplaced => 0.0,
        _ if is_atomic_inline(tree, id) => b.bounds.height - baseline_offset(tree, id),
        _ => 0.0,
    }
}

/// The line height the box requires.
#[must_use]
pub fn max_line_height(tree: &BoxTree, id: BoxId) -> f32 {
    let b = &tree[id];
    match b.kind {
        BoxKind::Text => b.parent.map_or(b.line_height, |p| tree[p].line_height),
        BoxKind::Inline => b
            .inline
            .line
            .as_ref()
            .map_or(b.line_height, |l| b.line_height.max(l.max_aligned_height)),
        _ => b.bounds.height,
    }
}

/// Height of the line content of the box.
#[must_use]
pub fn total_line_height(tree: &BoxTree, id: BoxId) -> f32 {
    let b = &tree[id];
    match b.kind {
        BoxKind::Inline => b.inline.line.as_ref().map_or(0.0, LineBox::total_line_height),
        _ => max_line_height(tree, id),
    }
}

/// Offset of the content top of an inline box from the top of its own line box.
#[must_use]
pub fn linebox_offset(tree: &BoxTree, id: BoxId) -> f32 {
    let b = &tree[id];
    match (&b.kind, &b.inline.line) {
        (BoxKind::Inline, Some(line)) => line.above - b.metrics.ascent - b.inline.halflead,
        _ => 0.0,
    }
}

/// Whitespace processing removed everything from the box.
#[must_use]
pub fn collapsed_completely(tree: &BoxTree, id: BoxId) -> bool {
    let b = &tree[id];
    match b.kind {
        BoxKind::Text => b.text.end <= b.text.start && b.text.text[b.text.start..].trim().is_empty(),
        BoxKind::Inline => b.inline.collapsed_completely,
        _ => false,
    }
}
