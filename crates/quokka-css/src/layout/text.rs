//! Text boxes.
//!
//! [§ 16.6 Whitespace: the 'white-space' property](https://www.w3.org/TR/CSS2/text.html#white-space-prop)
//!
//! A text box holds the whole collapsed text of one DOM text node and lays
//! out the part `start..end` that fits the line. The remainder continues in
//! a copy of the box stored in `rest`. Preserved line breaks are kept as
//! `'\r'` after collapsing.

use log::trace;

use crate::style::WhiteSpace;

use super::box_tree::{BoxId, BoxTree, LayoutContext};

/// Marker of a preserved line break in collapsed text.
pub const LINE_BREAK: char = '\r';

/// [§ 16.6.1 The 'white-space' processing model](https://www.w3.org/TR/CSS2/text.html#white-space-model)
///
/// White space characters the processing model operates on.
#[must_use]
pub const fn is_css_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r' | '\u{0c}')
}

/// [§ 16.6.1 The 'white-space' processing model](https://www.w3.org/TR/CSS2/text.html#white-space-model)
///
/// "If 'white-space' is set to 'normal', 'nowrap', or 'pre-line', every
/// tab is converted to a space, and any space immediately following
/// another space is removed."
///
/// Preserved line breaks (CR, LF or CRLF) become [`LINE_BREAK`].
#[must_use]
pub fn collapse_whitespace(text: &str, ws: WhiteSpace) -> String {
    let collapse = ws.collapses_spaces();
    let keep_breaks = ws.preserves_line_breaks();
    let mut ret = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut lastws = false;
    while let Some(ch) = chars.next() {
        if keep_breaks && (ch == '\n' || ch == '\r') {
            if ch == '\r' && chars.peek() == Some(&'\n') {
                let _ = chars.next();
            }
            // "remove any white space immediately before and after a line
            // feed" for the collapsing values
            if collapse && lastws && ret.ends_with(' ') {
                let _ = ret.pop();
            }
            ret.push(LINE_BREAK);
            lastws = collapse;
        } else if collapse && is_css_whitespace(ch) {
            if !lastws {
                ret.push(' ');
            }
            lastws = true;
        } else {
            ret.push(ch);
            lastws = false;
        }
    }
    ret
}

/// Truncate the trailing collapsible white space of a text box.
pub fn remove_trailing_whitespace(tree: &mut BoxTree, id: BoxId) {
    if !tree[id].style.white_space.collapses_spaces() {
        return;
    }
    let t = &mut tree[id].text;
    let trimmed = t.text.trim_end_matches(' ').len();
    t.text.truncate(trimmed);
    t.end = t.end.min(trimmed);
    t.start = t.start.min(trimmed);
    tree[id].empty = tree[id].text.text.trim().is_empty();
}

/// The text after the current start, as seen before layout.
fn pending(tree: &BoxTree, id: BoxId) -> &str {
    let t = &tree[id].text;
    t.text.get(t.start..).unwrap_or_default()
}

/// The text currently placed in the box.
#[must_use]
pub fn visible_text(tree: &BoxTree, id: BoxId) -> &str {
    let t = &tree[id].text;
    t.text.get(t.start..t.end.max(t.start)).unwrap_or_default()
}

fn string_width(tree: &BoxTree, ctx: &LayoutContext<'_>, id: BoxId, text: &str) -> f32 {
    ctx.visual.string_width(&tree[id].font, text)
}

/// Lay out as much of the text as fits in `widthlimit`.
///
/// The text is broken at the last space that fits. Without one, the whole
/// first word is placed when `force` is set, nothing otherwise. Returns
/// false when nothing was placed although something should have been.
pub fn do_layout(
    tree: &mut BoxTree,
    ctx: &LayoutContext<'_>,
    id: BoxId,
    widthlimit: f32,
    force: bool,
    linestart: bool,
) -> bool {
    tree[id].rest = None;
    tree[id].text.expansion = 0.0;
    tree[id].text.line_break_stop = false;
    if !tree[id].displayed {
        tree[id].bounds.set_size(0.0, 0.0);
        tree[id].content = super::geometry::Dimension::default();
        return true;
    }
    tree[id].avail_width = widthlimit;

    let ws = tree[id].style.white_space;
    let collapse = ws.collapses_spaces();
    let wrap = ws.allows_wrapping();
    let text = tree[id].text.text.clone();
    let bytes = text.as_bytes();
    let len = text.len();
    let height = tree[id].metrics.height;
    let mut start = tree[id].text.start.min(len);

    let empty = text.trim().is_empty();
    let mut end = len;
    let mut split = false;
    let mut allow = false;
    let mut lineend = None;
    if let Some(pos) = text[start..].find(LINE_BREAK) {
        end = start + pos;
        lineend = Some(end);
        split = true;
        allow = true;
    }

    let mut w = 0.0;
    let mut h = 0.0;
    if !empty || !linestart {
        // STEP 1: Collapsible white space at the line start is dropped.
        if (linestart || tree[id].text.ignore_initial_ws) && collapse {
            while start < end && bytes[start] == b' ' {
                start += 1;
            }
        }
        // STEP 2: Shorten the text to the last fitting break opportunity.
        loop {
            w = string_width(tree, ctx, id, &text[start..end]);
            h = height;
            if w <= widthlimit {
                break;
            }
            if empty {
                w = 0.0;
                h = 0.0;
                split = false;
                break;
            }
            let wordend = text[..end].rfind(' ').map(|mut pos| {
                while pos > 0 && bytes[pos - 1] == b' ' {
                    pos -= 1;
                }
                pos
            });
            match wordend {
                Some(pos) if pos > start && wrap => {
                    end = pos;
                    split = true;
                }
                _ => {
                    if force {
                        split = true;
                    } else {
                        end = start;
                        w = 0.0;
                        h = 0.0;
                        split = false;
                        allow = false;
                    }
                    break;
                }
            }
        }
    }

    let b = &mut tree[id];
    b.text.start = start;
    b.text.end = end;
    b.text.line_break_stop = lineend == Some(end) && end < len;
    b.bounds.set_size(w, h);
    b.content = super::geometry::Dimension::new(w, h);

    // STEP 3: The rest continues in a copy of the box.
    if split {
        let mut next = end;
        if lineend == Some(end) {
            next += LINE_BREAK.len_utf8();
        } else if collapse {
            while next < len && bytes[next] == b' ' {
                next += 1;
            }
        }
        if next < len {
            let rest = tree.copy_box(id);
            let r = &mut tree[rest];
            r.splitted = true;
            r.split_id += 1;
            r.rest = None;
            r.text.start = next;
            r.text.end = len;
            r.text.ignore_initial_ws = false;
            tree[id].rest = Some(rest);
            trace!(target: "quokka::layout", "text {id:?} split at {next}, rest {rest:?}");
        }
    }
    end > start || empty || allow
}

/// Narrowest width the text can be broken to: its longest word when
/// wrapping is allowed, its longest line otherwise.
#[must_use]
pub fn minimal_width(tree: &BoxTree, ctx: &LayoutContext<'_>, id: BoxId) -> f32 {
    let text = pending(tree, id);
    if text.trim().is_empty() {
        return 0.0;
    }
    if tree[id].style.white_space.allows_wrapping() {
        text.split([' ', LINE_BREAK])
            .map(|word| string_width(tree, ctx, id, word))
            .fold(0.0, f32::max)
    } else {
        longest_line(tree, ctx, id)
    }
}

/// Width of the text without breaks other than the preserved ones.
#[must_use]
pub fn maximal_width(tree: &BoxTree, ctx: &LayoutContext<'_>, id: BoxId) -> f32 {
    if tree[id].style.white_space.preserves_line_breaks() {
        longest_line(tree, ctx, id)
    } else {
        string_width(tree, ctx, id, pending(tree, id))
    }
}

fn longest_line(tree: &BoxTree, ctx: &LayoutContext<'_>, id: BoxId) -> f32 {
    pending(tree, id)
        .split(LINE_BREAK)
        .map(|line| string_width(tree, ctx, id, line))
        .fold(0.0, f32::max)
}

/// Width of the text up to the first preserved line break.
#[must_use]
pub fn first_line_length(tree: &BoxTree, ctx: &LayoutContext<'_>, id: BoxId) -> f32 {
    let text = pending(tree, id);
    let first = text.split(LINE_BREAK).next().unwrap_or(text);
    string_width(tree, ctx, id, first)
}

/// Width of the text after the last preserved line break.
#[must_use]
pub fn last_line_length(tree: &BoxTree, ctx: &LayoutContext<'_>, id: BoxId) -> f32 {
    let text = pending(tree, id);
    let last = text.rsplit(LINE_BREAK).next().unwrap_or(text);
    string_width(tree, ctx, id, last)
}

/// The remaining text contains a preserved line break.
#[must_use]
pub fn contains_line_break(tree: &BoxTree, id: BoxId) -> bool {
    tree[id].style.white_space.preserves_line_breaks() && pending(tree, id).contains(LINE_BREAK)
}

/// A line may be broken before the box: it starts with a space or follows one.
#[must_use]
pub fn can_split_before(tree: &BoxTree, id: BoxId) -> bool {
    let t = &tree[id].text;
    let bytes = t.text.as_bytes();
    t.start < bytes.len() && (bytes[t.start] == b' ' || (t.start > 0 && bytes[t.start - 1] == b' '))
}

/// A line may be broken after the box: it ends with a space or one follows.
#[must_use]
pub fn can_split_after(tree: &BoxTree, id: BoxId) -> bool {
    let t = &tree[id].text;
    let bytes = t.text.as_bytes();
    let end = t.end.min(bytes.len());
    (end > 0 && bytes[end - 1] == b' ') || (end < bytes.len() && bytes[end] == b' ')
}

/// The placed text starts with white space.
#[must_use]
pub fn starts_with_whitespace(tree: &BoxTree, id: BoxId) -> bool {
    visible_text(tree, id).starts_with(is_css_whitespace)
}

/// The placed text ends with white space.
#[must_use]
pub fn ends_with_whitespace(tree: &BoxTree, id: BoxId) -> bool {
    visible_text(tree, id).ends_with(is_css_whitespace)
}

/// [§ 16.2 Alignment](https://www.w3.org/TR/CSS2/text.html#alignment-prop)
///
/// Number of spaces justification may widen. Spaces at the line edges do
/// not count.
#[must_use]
pub fn expansion_points(tree: &BoxTree, id: BoxId, at_start: bool, at_end: bool) -> usize {
    if !tree[id].style.white_space.collapses_spaces() {
        return 0;
    }
    let mut text = visible_text(tree, id);
    if at_start {
        text = text.trim_start_matches(' ');
    }
    if at_end {
        text = text.trim_end_matches(' ');
    }
    text.bytes().filter(|&c| c == b' ').count()
}

/// Widen the box by `dif` pixels spread over its spaces.
pub fn extend_width(tree: &mut BoxTree, id: BoxId, dif: f32) {
    let b = &mut tree[id];
    b.bounds.width += dif;
    b.content.width += dif;
    b.text.expansion += dif;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_normal() {
        assert_eq!(collapse_whitespace("  a \t\n b  ", WhiteSpace::Normal), " a b ");
    }

    #[test]
    fn test_collapse_pre_keeps_spaces_and_breaks() {
        assert_eq!(collapse_whitespace("a  b\r\nc\nd", WhiteSpace::Pre), "a  b\rc\rd");
    }

    #[test]
    fn test_collapse_pre_line_trims_around_breaks() {
        assert_eq!(collapse_whitespace("a  \n  b", WhiteSpace::PreLine), "a\rb");
    }

    #[test]
    fn test_collapse_nowrap_turns_newlines_into_spaces() {
        assert_eq!(collapse_whitespace("a\n\nb", WhiteSpace::Nowrap), "a b");
    }
}
