//! Display List - a sequence of drawing commands
//!
//! [CSS 2.1 Appendix E](https://www.w3.org/TR/CSS2/zindex.html)
//!
//! The display list records the painter's calls in the order they were
//! made, so executing the commands front to back paints the page back to
//! front.

use crate::layout::box_tree::{BoxId, BoxKind, BoxTree};
use crate::layout::list_item::Marker;
use crate::layout::text::visible_text;
use crate::style::{Color, Overflow};

use super::BoxRenderer;

/// A single drawing command.
///
/// [CSS 2.1 Appendix E.2 Painting order](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    /// Fill a rectangle with a solid color. Used for backgrounds and
    /// borders.
    FillRect {
        /// X coordinate of the rectangle's top-left corner.
        x: f32,
        /// Y coordinate of the rectangle's top-left corner.
        y: f32,
        /// Width of the rectangle in pixels.
        width: f32,
        /// Height of the rectangle in pixels.
        height: f32,
        /// Fill color.
        color: Color,
    },

    /// Draw text starting at a baseline point.
    DrawText {
        /// X coordinate of the text start.
        x: f32,
        /// Y coordinate of the baseline.
        y: f32,
        /// The text to draw.
        text: String,
        /// Font size in pixels.
        font_size: f32,
        /// Text color.
        color: Color,
    },

    /// Draw replaced content into its content box.
    DrawImage {
        /// X coordinate of the content box.
        x: f32,
        /// Y coordinate of the content box.
        y: f32,
        /// Width of the content box.
        width: f32,
        /// Height of the content box.
        height: f32,
        /// The `src` or `data` the content comes from.
        src: String,
    },

    /// Draw a list item marker.
    DrawMarker {
        /// The marker and its position.
        marker: Marker,
        /// Marker color.
        color: Color,
    },

    /// [§ 11.1.1 overflow](https://www.w3.org/TR/CSS2/visufx.html#overflow)
    ///
    /// Clip everything up to the matching `PopClip` to a rectangle.
    PushClip {
        /// X coordinate of the clip rectangle.
        x: f32,
        /// Y coordinate of the clip rectangle.
        y: f32,
        /// Width of the clip rectangle.
        width: f32,
        /// Height of the clip rectangle.
        height: f32,
    },

    /// End the most recent clip.
    PopClip,
}

/// A list of drawing commands in painting order.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    commands: Vec<PaintCommand>,
}

impl DisplayList {
    /// Create an empty display list.
    #[must_use]
    pub const fn new() -> Self {
        Self { commands: Vec::new() }
    }

    /// Add a command to the display list.
    pub fn push(&mut self, command: PaintCommand) {
        self.commands.push(command);
    }

    /// Get the commands in painting order.
    #[must_use]
    pub fn commands(&self) -> &[PaintCommand] {
        &self.commands
    }

    /// Get the number of commands.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if the display list is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    fn fill(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        if width > 0.0 && height > 0.0 && !color.is_transparent() {
            self.push(PaintCommand::FillRect {
                x,
                y,
                width,
                height,
                color,
            });
        }
    }
}

/// Boxes whose content is clipped to their padding box.
fn clips(tree: &BoxTree, id: BoxId) -> bool {
    let b = &tree[id];
    b.kind != BoxKind::Viewport && b.kind.is_block_like() && b.style.overflow != Overflow::Visible
}

impl BoxRenderer for DisplayList {
    fn start_element_contents(&mut self, tree: &BoxTree, id: BoxId) {
        if clips(tree, id) {
            let r = tree[id].abs_padding_bounds();
            self.push(PaintCommand::PushClip {
                x: r.x,
                y: r.y,
                width: r.width,
                height: r.height,
            });
        }
    }

    fn finish_element_contents(&mut self, tree: &BoxTree, id: BoxId) {
        if clips(tree, id) {
            self.push(PaintCommand::PopClip);
        }
    }

    /// [§ 14.2 The background](https://www.w3.org/TR/CSS2/colors.html#background)
    ///
    /// "the background of an element is the total size of the padding and
    /// border areas". Borders are drawn as solid rectangles in the text
    /// color.
    fn render_element_background(&mut self, tree: &BoxTree, id: BoxId, background: Color) {
        let b = &tree[id];
        let r = if b.kind == BoxKind::Viewport {
            b.abs_bounds
        } else {
            b.abs_border_bounds()
        };
        self.fill(r.x, r.y, r.width, r.height, background);

        let (bw, color) = (b.border, b.style.color);
        self.fill(r.x, r.y, r.width, bw.top, color);
        self.fill(r.x, r.y + r.height - bw.bottom, r.width, bw.bottom, color);
        self.fill(r.x, r.y + bw.top, bw.left, r.height - bw.top - bw.bottom, color);
        self.fill(
            r.x + r.width - bw.right,
            r.y + bw.top,
            bw.right,
            r.height - bw.top - bw.bottom,
            color,
        );
    }

    fn render_text_content(&mut self, tree: &BoxTree, id: BoxId) {
        let text = visible_text(tree, id);
        if text.trim().is_empty() {
            return;
        }
        let b = &tree[id];
        let content = b.abs_content_bounds();
        self.push(PaintCommand::DrawText {
            x: content.x,
            y: content.y + b.metrics.ascent,
            text: text.to_string(),
            font_size: b.metrics.size,
            color: b.style.color,
        });
    }

    fn render_replaced_content(&mut self, tree: &BoxTree, id: BoxId) {
        let b = &tree[id];
        let Some(src) = &b.replaced.source else {
            return;
        };
        let r = b.abs_content_bounds();
        self.push(PaintCommand::DrawImage {
            x: r.x,
            y: r.y,
            width: r.width,
            height: r.height,
            src: src.clone(),
        });
    }

    fn render_marker(&mut self, tree: &BoxTree, id: BoxId, marker: &Marker) {
        self.push(PaintCommand::DrawMarker {
            marker: marker.clone(),
            color: tree[id].style.color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_skips_empty_and_transparent() {
        let mut list = DisplayList::new();
        list.fill(0.0, 0.0, 0.0, 10.0, Color::BLACK);
        list.fill(0.0, 0.0, 10.0, 10.0, Color::TRANSPARENT);
        assert!(list.is_empty());
        list.fill(0.0, 0.0, 10.0, 10.0, Color::BLACK);
        assert_eq!(list.len(), 1);
    }
}
