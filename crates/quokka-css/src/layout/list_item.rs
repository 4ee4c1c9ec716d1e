//! List items and their markers.
//!
//! [§ 12.5 Lists](https://www.w3.org/TR/CSS2/generate.html#lists)
//!
//! "An element with 'display: list-item' generates a principal block box
//! for the element's content and, depending on the values of
//! 'list-style-type' and 'list-style-image', possibly also a marker box as
//! a visual indication that the element is a list item."
//!
//! Outside markers are not boxes: the paint driver draws them to the left
//! of the first line. Inside markers are inserted by the builder as a text
//! box at the start of the content.

use crate::style::{ListStylePosition, ListStyleType};

use super::block::{first_inline_box_baseline, init_first_line};
use super::box_tree::{BoxId, BoxKind, BoxTree, LayoutContext};
use super::geometry::Rect;

const ROMAN: [(i32, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// Roman numeral of a number in `1..4000`.
#[must_use]
pub fn to_roman(mut value: i32) -> Option<String> {
    if !(1..4000).contains(&value) {
        return None;
    }
    let mut ret = String::new();
    for (n, code) in ROMAN {
        while value >= n {
            value -= n;
            ret.push_str(code);
        }
    }
    Some(ret)
}

/// Alphabetic numbering: `a`..`z`, then `aa`, `ab`, ...
#[must_use]
pub fn to_alpha(value: i32, upper: bool) -> Option<String> {
    if value < 1 {
        return None;
    }
    let base = if upper { b'A' } else { b'a' };
    let mut n = value;
    let mut ret = Vec::new();
    while n > 0 {
        n -= 1;
        ret.push(char::from(base + (n % 26) as u8));
        n /= 26;
    }
    Some(ret.into_iter().rev().collect())
}

/// [§ 12.6.2 Lists: the 'list-style-type' property](https://www.w3.org/TR/CSS2/generate.html#lists)
///
/// The number of a list item in the given style. Numbers out of range of
/// a numbering system fall back to decimal.
#[must_use]
pub fn format_number(value: i32, style: ListStyleType) -> String {
    let formatted = match style {
        ListStyleType::LowerAlpha => to_alpha(value, false),
        ListStyleType::UpperAlpha => to_alpha(value, true),
        ListStyleType::LowerRoman => to_roman(value).map(|r| r.to_lowercase()),
        ListStyleType::UpperRoman => to_roman(value),
        _ => None,
    };
    formatted.unwrap_or_else(|| value.to_string())
}

/// Text of a numbering marker, such as `"3. "`. Glyph markers and `none`
/// have no text.
#[must_use]
pub fn marker_text(value: i32, style: ListStyleType) -> Option<String> {
    if style.is_glyph() || style == ListStyleType::None {
        return None;
    }
    Some(format!("{}. ", format_number(value, style)))
}

/// Position of the list item among the list item siblings, starting at 1.
#[must_use]
pub fn find_item_number(tree: &BoxTree, id: BoxId) -> i32 {
    let Some(parent) = tree[id].parent else {
        return 1;
    };
    let mut count = 0;
    for &c in tree[parent].active_children() {
        if tree[c].kind == BoxKind::ListItem {
            count += 1;
        }
        if c == id {
            return count;
        }
    }
    1
}

/// The item shows a marker.
#[must_use]
pub fn has_visible_marker(tree: &BoxTree, id: BoxId) -> bool {
    tree[id].kind == BoxKind::ListItem && tree[id].style.list_style_type != ListStyleType::None
}

/// Number the list item and seed its first line with the marker font.
pub fn init_list_item(tree: &mut BoxTree, id: BoxId) {
    let number = find_item_number(tree, id);
    let style = tree[id].style.list_style_type;
    let state = &mut tree[id].list_item;
    state.item_number = number;
    state.marker_text = marker_text(number, style);
    if has_visible_marker(tree, id) {
        init_first_line(tree, id, id);
    }
}

/// A marker ready to be drawn.
#[derive(Debug, Clone, PartialEq)]
pub enum Marker {
    /// A disc, circle or square inside `rect`.
    Glyph {
        /// The glyph shape.
        style: ListStyleType,
        /// Bounds of the glyph in page coordinates.
        rect: Rect,
    },
    /// Numbering text ending at the content edge.
    Text {
        /// The marker text.
        text: String,
        /// Left end of the text.
        x: f32,
        /// Baseline of the text.
        baseline: f32,
    },
}

/// Where the outside marker of a list item is drawn. `None` for inside
/// markers, which are part of the content, and for invisible markers.
#[must_use]
pub fn outside_marker(tree: &BoxTree, ctx: &LayoutContext<'_>, id: BoxId) -> Option<Marker> {
    let b = &tree[id];
    if !has_visible_marker(tree, id)
        || b.style.list_style_position == ListStylePosition::Inside
        || b.list_item.inside_marker.is_some()
    {
        return None;
    }
    let content = b.abs_content_bounds();
    let em = b.metrics.size;
    let style = b.style.list_style_type;
    if style.is_glyph() {
        let r = 0.6 * em;
        return Some(Marker::Glyph {
            style,
            rect: Rect::new(content.x - 1.2 * em, content.y + 0.4 * em, r, r),
        });
    }
    let text = b.list_item.marker_text.clone()?;
    let width = ctx.visual.string_width(&b.font, &text);
    let baseline = first_inline_box_baseline(tree, id).unwrap_or(b.metrics.ascent);
    Some(Marker::Text {
        text,
        x: content.x - width,
        baseline: content.y + baseline,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roman_range() {
        assert_eq!(to_roman(1994).as_deref(), Some("MCMXCIV"));
        assert_eq!(to_roman(3999).as_deref(), Some("MMMCMXCIX"));
        assert_eq!(to_roman(0), None);
        assert_eq!(to_roman(4000), None);
    }

    #[test]
    fn test_alpha_wraps_after_z() {
        assert_eq!(to_alpha(1, false).as_deref(), Some("a"));
        assert_eq!(to_alpha(26, true).as_deref(), Some("Z"));
        assert_eq!(to_alpha(27, false).as_deref(), Some("aa"));
    }

    #[test]
    fn test_marker_text_formats() {
        assert_eq!(marker_text(4, ListStyleType::Decimal).as_deref(), Some("4. "));
        assert_eq!(marker_text(4, ListStyleType::LowerRoman).as_deref(), Some("iv. "));
        assert_eq!(marker_text(5000, ListStyleType::UpperRoman).as_deref(), Some("5000. "));
        assert_eq!(marker_text(1, ListStyleType::Disc), None);
        assert_eq!(marker_text(1, ListStyleType::None), None);
    }
}
