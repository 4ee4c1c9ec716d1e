//! CSS value types and their parsing from declaration text.
//!
//! - [CSS Values and Units Level 4](https://www.w3.org/TR/css-values-4/)
//! - [CSS Color Level 4](https://www.w3.org/TR/css-color-4/)
//!
//! Values arrive already cascaded, as plain strings such as `"12px"`,
//! `"50%"` or `"auto"`. Parsing is deliberately small: one component value
//! per property, plus the few multi-value forms the layout needs
//! (edge shorthands, track lists, `content`, counters).

use serde::Serialize;

/// User agent default font size.
/// [§ 3.5 font-size](https://www.w3.org/TR/css-fonts-4/#font-size-prop)
/// "Initial: medium" - medium is 16px per common browser convention.
pub const DEFAULT_FONT_SIZE_PX: f32 = 16.0;

// ─────────────────────────────────────────────────────────────────────────────
// Length Values
// ─────────────────────────────────────────────────────────────────────────────

/// [§ 4.1 Lengths](https://www.w3.org/TR/css-values-4/#lengths)
/// "Lengths refer to distance measurements and are denoted by <length> in the
/// property definitions."
///
/// Percentages are carried alongside lengths since every length property the
/// layout reads accepts them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Length {
    /// "1px = 1/96th of 1in"
    Px(f32),
    /// "Equal to the computed value of the font-size property of the element"
    Em(f32),
    /// "Equal to the used x-height of the first available font"
    Ex(f32),
    /// "Equal to the used advance measure of the '0' glyph"
    Ch(f32),
    /// "Equal to the computed value of font-size on the root element"
    Rem(f32),
    /// "1% of the width of the initial containing block"
    Vw(f32),
    /// "1% of the height of the initial containing block"
    Vh(f32),
    /// "1% of the smaller of vw or vh"
    Vmin(f32),
    /// "1% of the larger of vw or vh"
    Vmax(f32),
    /// "1pt = 1/72nd of 1in"
    Pt(f32),
    /// "1pc = 1/6th of 1in"
    Pc(f32),
    /// "1in = 2.54cm = 96px"
    In(f32),
    /// "1cm = 96px/2.54"
    Cm(f32),
    /// "1mm = 1/10th of 1cm"
    Mm(f32),
    /// "1Q = 1/40th of 1cm"
    Q(f32),
    /// [§ 4.3 Percentages](https://www.w3.org/TR/css-values-4/#percentages)
    Percent(f32),
}

impl Length {
    /// Zero pixels.
    pub const ZERO: Length = Length::Px(0.0);

    /// Returns true for percentage values.
    #[must_use]
    pub const fn is_percent(&self) -> bool {
        matches!(self, Length::Percent(_))
    }

    /// Parse a single length or percentage. Unitless zero is accepted.
    #[must_use]
    pub fn parse(text: &str) -> Option<Length> {
        let text = text.trim().to_ascii_lowercase();
        if let Some(num) = text.strip_suffix('%') {
            return num.trim().parse().ok().map(Length::Percent);
        }
        let split = text
            .find(|c: char| c.is_ascii_alphabetic())
            .unwrap_or(text.len());
        let (num, unit) = text.split_at(split);
        let value: f32 = num.trim().parse().ok()?;
        let length = match unit {
            "" if value == 0.0 => Length::Px(0.0),
            "px" => Length::Px(value),
            "em" => Length::Em(value),
            "ex" => Length::Ex(value),
            "ch" => Length::Ch(value),
            "rem" => Length::Rem(value),
            "vw" => Length::Vw(value),
            "vh" => Length::Vh(value),
            "vmin" => Length::Vmin(value),
            "vmax" => Length::Vmax(value),
            "pt" => Length::Pt(value),
            "pc" => Length::Pc(value),
            "in" => Length::In(value),
            "cm" => Length::Cm(value),
            "mm" => Length::Mm(value),
            "q" => Length::Q(value),
            _ => return None,
        };
        Some(length)
    }
}

impl Default for Length {
    fn default() -> Self {
        Length::ZERO
    }
}

/// [§ 4.4 Automatic values](https://www.w3.org/TR/CSS2/cascade.html#value-def-auto)
///
/// "Some properties can take the keyword 'auto' as a value. This keyword
/// allows the user agent to compute the value based on other properties."
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub enum LengthOrAuto {
    /// The value is 'auto' and will be resolved during layout.
    #[default]
    Auto,
    /// A specific length or percentage.
    Length(Length),
}

impl LengthOrAuto {
    /// Check if the value is 'auto'.
    #[must_use]
    pub const fn is_auto(&self) -> bool {
        matches!(self, LengthOrAuto::Auto)
    }

    /// The length, when not 'auto'.
    #[must_use]
    pub const fn length(&self) -> Option<Length> {
        match self {
            LengthOrAuto::Auto => None,
            LengthOrAuto::Length(l) => Some(*l),
        }
    }

    /// Returns true for percentage values.
    #[must_use]
    pub const fn is_percent(&self) -> bool {
        matches!(self, LengthOrAuto::Length(Length::Percent(_)))
    }

    /// Parse `auto` or a length.
    #[must_use]
    pub fn parse(text: &str) -> Option<LengthOrAuto> {
        if text.trim().eq_ignore_ascii_case("auto") {
            Some(LengthOrAuto::Auto)
        } else {
            Length::parse(text).map(LengthOrAuto::Length)
        }
    }

    /// Parse a `max-width`/`max-height` value where `none` maps to `Auto`.
    #[must_use]
    pub fn parse_max(text: &str) -> Option<LengthOrAuto> {
        if text.trim().eq_ignore_ascii_case("none") {
            Some(LengthOrAuto::Auto)
        } else {
            Length::parse(text).map(LengthOrAuto::Length)
        }
    }
}

impl From<Length> for LengthOrAuto {
    fn from(value: Length) -> Self {
        LengthOrAuto::Length(value)
    }
}

/// Four values, one per box side.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Sides<T> {
    /// Top side.
    pub top: T,
    /// Right side.
    pub right: T,
    /// Bottom side.
    pub bottom: T,
    /// Left side.
    pub left: T,
}

impl<T: Copy> Sides<T> {
    /// The same value on all four sides.
    pub const fn all(value: T) -> Self {
        Sides {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// [§ 8.3 Margin properties](https://www.w3.org/TR/CSS2/box.html#margin-properties)
    ///
    /// "If there is only one component value, it applies to all sides. If there
    /// are two values, the top and bottom margins are set to the first value and
    /// the right and left margins are set to the second. If there are three
    /// values, the top is set to the first value, the left and right are set to
    /// the second, and the bottom is set to the third. If there are four values,
    /// they apply to the top, right, bottom, and left, respectively."
    pub fn from_shorthand(values: &[T]) -> Option<Self> {
        match *values {
            [a] => Some(Sides::all(a)),
            [v, h] => Some(Sides {
                top: v,
                right: h,
                bottom: v,
                left: h,
            }),
            [t, h, b] => Some(Sides {
                top: t,
                right: h,
                bottom: b,
                left: h,
            }),
            [t, r, b, l] => Some(Sides {
                top: t,
                right: r,
                bottom: b,
                left: l,
            }),
            _ => None,
        }
    }
}

/// Parse a whitespace separated shorthand of one to four component values.
pub fn parse_sides<T: Copy>(text: &str, parse: impl Fn(&str) -> Option<T>) -> Option<Sides<T>> {
    let values: Option<Vec<T>> = text.split_whitespace().map(parse).collect();
    Sides::from_shorthand(&values?)
}

// ─────────────────────────────────────────────────────────────────────────────
// Angles
// ─────────────────────────────────────────────────────────────────────────────

/// [§ 7.1 Angle Units](https://www.w3.org/TR/css-values-4/#angles)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Angle {
    /// "Degrees. There are 360 degrees in a full circle."
    Deg(f32),
    /// "Gradians. There are 400 gradians in a full circle."
    Grad(f32),
    /// "Radians. There are 2π radians in a full circle."
    Rad(f32),
    /// "Turns. There is 1 turn in a full circle."
    Turn(f32),
}

impl Angle {
    /// Parse an angle such as `45deg` or `0.25turn`.
    #[must_use]
    pub fn parse(text: &str) -> Option<Angle> {
        let text = text.trim().to_ascii_lowercase();
        let split = text.find(|c: char| c.is_ascii_alphabetic())?;
        let (num, unit) = text.split_at(split);
        let value: f32 = num.parse().ok()?;
        match unit {
            "deg" => Some(Angle::Deg(value)),
            "grad" => Some(Angle::Grad(value)),
            "rad" => Some(Angle::Rad(value)),
            "turn" => Some(Angle::Turn(value)),
            _ => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Colors
// ─────────────────────────────────────────────────────────────────────────────

/// [§ 4 Color syntax](https://www.w3.org/TR/css-color-4/#color-syntax)
/// sRGB color represented as RGBA components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Color {
    /// "the red color channel" (0-255)
    pub r: u8,
    /// "the green color channel" (0-255)
    pub g: u8,
    /// "the blue color channel" (0-255)
    pub b: u8,
    /// "the alpha channel" (0-255, 255 = fully opaque)
    pub a: u8,
}

impl Color {
    /// Fully transparent black, the initial `background-color`.
    pub const TRANSPARENT: Color = Color {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    /// Opaque black, the usual initial `color`.
    pub const BLACK: Color = Color {
        r: 0,
        g: 0,
        b: 0,
        a: 255,
    };

    /// Returns true if the color paints nothing.
    #[must_use]
    pub const fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// [§ 4.2 The RGB hexadecimal notations](https://www.w3.org/TR/css-color-4/#hex-notation)
    /// "The syntax of a <hex-color> is a <hash-token> token whose value consists of
    /// 3, 4, 6, or 8 hexadecimal digits."
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }
        let short = |i: usize| u8::from_str_radix(&hex[i..=i].repeat(2), 16).ok();
        let long = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            3 => Some(Color {
                r: short(0)?,
                g: short(1)?,
                b: short(2)?,
                a: 255,
            }),
            4 => Some(Color {
                r: short(0)?,
                g: short(1)?,
                b: short(2)?,
                a: short(3)?,
            }),
            6 => Some(Color {
                r: long(0)?,
                g: long(2)?,
                b: long(4)?,
                a: 255,
            }),
            8 => Some(Color {
                r: long(0)?,
                g: long(2)?,
                b: long(4)?,
                a: long(6)?,
            }),
            _ => None,
        }
    }

    /// [§ 6.1 Named Colors](https://www.w3.org/TR/css-color-4/#named-colors)
    ///
    /// Only the basic CSS 2.1 palette.
    #[must_use]
    pub fn from_named(name: &str) -> Option<Self> {
        let (r, g, b) = match name.to_ascii_lowercase().as_str() {
            "transparent" => return Some(Color::TRANSPARENT),
            "black" => (0, 0, 0),
            "white" => (255, 255, 255),
            "red" => (255, 0, 0),
            "green" => (0, 128, 0),
            "blue" => (0, 0, 255),
            "yellow" => (255, 255, 0),
            "gray" | "grey" => (128, 128, 128),
            "silver" => (192, 192, 192),
            "maroon" => (128, 0, 0),
            "purple" => (128, 0, 128),
            "fuchsia" => (255, 0, 255),
            "lime" => (0, 255, 0),
            "olive" => (128, 128, 0),
            "navy" => (0, 0, 128),
            "teal" => (0, 128, 128),
            "aqua" => (0, 255, 255),
            "orange" => (255, 165, 0),
            _ => return None,
        };
        Some(Color { r, g, b, a: 255 })
    }

    /// Parse a hex or named color.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.starts_with('#') {
            Self::from_hex(text)
        } else {
            Self::from_named(text)
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Generated content
// ─────────────────────────────────────────────────────────────────────────────

/// [§ 12.2 The 'content' property](https://www.w3.org/TR/CSS2/generate.html#content)
///
/// One component of a `content` value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ContentItem {
    /// "Text content."
    Text(String),
    /// `counter(name)` or `counter(name, style)`.
    Counter(String, super::ListStyleType),
    /// `counters(name, separator)` or `counters(name, separator, style)`.
    Counters(String, String, super::ListStyleType),
    /// "This function returns as a string the value of attribute X for the
    /// subject of the selector."
    Attr(String),
}

/// Parse a `content` value. Returns `None` for `normal`/`none`.
#[must_use]
pub fn parse_content(text: &str) -> Option<Vec<ContentItem>> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("normal") || text.eq_ignore_ascii_case("none") {
        return None;
    }
    let mut items = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        rest = rest.trim_start();
        if let Some(quote) = rest.chars().next().filter(|c| *c == '"' || *c == '\'') {
            let body = &rest[1..];
            let end = body.find(quote).unwrap_or(body.len());
            items.push(ContentItem::Text(body[..end].to_string()));
            rest = body.get(end + 1..).unwrap_or("");
        } else if let Some(open) = rest.find('(') {
            let name = rest[..open].trim().to_ascii_lowercase();
            let close = rest.find(')').unwrap_or(rest.len());
            let args: Vec<String> = rest[open + 1..close.max(open + 1)]
                .split(',')
                .map(|a| a.trim().trim_matches(['"', '\'']).to_string())
                .collect();
            let style = |arg: Option<&String>| {
                arg.and_then(|s| s.parse().ok())
                    .unwrap_or(super::ListStyleType::Decimal)
            };
            match name.as_str() {
                "counter" => items.push(ContentItem::Counter(args[0].clone(), style(args.get(1)))),
                "counters" => items.push(ContentItem::Counters(
                    args[0].clone(),
                    args.get(1).cloned().unwrap_or_default(),
                    style(args.get(2)),
                )),
                "attr" => items.push(ContentItem::Attr(args[0].clone())),
                _ => return None,
            }
            rest = rest.get(close + 1..).unwrap_or("");
        } else {
            return None;
        }
    }
    Some(items)
}

/// Parse a `counter-reset` / `counter-increment` value into `(name, value)`
/// pairs. A name without a number gets `default`.
#[must_use]
pub fn parse_counter_list(text: &str, default: i32) -> Option<Vec<(String, i32)>> {
    if text.trim().eq_ignore_ascii_case("none") {
        return Some(Vec::new());
    }
    let mut out: Vec<(String, i32)> = Vec::new();
    for token in text.split_whitespace() {
        if let Ok(value) = token.parse::<i32>() {
            let last = out.last_mut()?;
            last.1 = value;
        } else {
            out.push((token.to_string(), default));
        }
    }
    Some(out)
}

// ─────────────────────────────────────────────────────────────────────────────
// Grid values
// ─────────────────────────────────────────────────────────────────────────────

/// [§ 7.2 Explicit Track Sizing](https://www.w3.org/TR/css-grid-1/#track-sizing)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum TrackSize {
    /// A fixed length or percentage of the grid container.
    Length(Length),
    /// "A flexible length or <flex> is a dimension with the fr unit."
    Fr(f32),
    /// "As a maximum, identical to max-content. As a minimum, represents the
    /// largest minimum size of the grid items occupying the grid track."
    Auto,
}

impl TrackSize {
    /// Parse a single track size.
    #[must_use]
    pub fn parse(text: &str) -> Option<TrackSize> {
        let text = text.trim();
        if text.eq_ignore_ascii_case("auto") {
            return Some(TrackSize::Auto);
        }
        if let Some(fr) = text.strip_suffix("fr") {
            return fr.parse().ok().map(TrackSize::Fr);
        }
        Length::parse(text).map(TrackSize::Length)
    }
}

/// One entry of a track list before `repeat()` expansion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TrackListEntry {
    /// A single track.
    Track(TrackSize),
    /// [§ 7.2.3 Repeating Rows and Columns](https://www.w3.org/TR/css-grid-1/#repeat-notation)
    ///
    /// "The repeat() notation represents a repeated fragment of the track list."
    Repeat(u32, Vec<TrackSize>),
}

/// Parse a `grid-template-rows`/`grid-template-columns` track list.
#[must_use]
pub fn parse_track_list(text: &str) -> Option<Vec<TrackListEntry>> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("none") {
        return Some(Vec::new());
    }
    let mut entries = Vec::new();
    let mut rest = text;
    while !rest.trim_start().is_empty() {
        rest = rest.trim_start();
        if rest
            .get(..7)
            .is_some_and(|head| head.eq_ignore_ascii_case("repeat("))
        {
            let close = rest.find(')')?;
            let inner = &rest[7..close];
            let (count, tracks) = inner.split_once(',')?;
            let count: u32 = count.trim().parse().ok()?;
            let tracks: Option<Vec<TrackSize>> =
                tracks.split_whitespace().map(TrackSize::parse).collect();
            entries.push(TrackListEntry::Repeat(count, tracks?));
            rest = &rest[close + 1..];
        } else {
            let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            entries.push(TrackListEntry::Track(TrackSize::parse(&rest[..end])?));
            rest = &rest[end..];
        }
    }
    Some(entries)
}

/// [§ 8.3 Line-based Placement](https://www.w3.org/TR/css-grid-1/#line-placement)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum GridLine {
    /// "The property contributes nothing to the grid item's placement."
    #[default]
    Auto,
    /// A 1-based line number. Negative numbers count from the end.
    Line(i32),
    /// "Contributes a grid span to the grid item's placement."
    Span(u32),
}

impl GridLine {
    /// Parse `auto`, `<integer>` or `span <integer>`.
    #[must_use]
    pub fn parse(text: &str) -> Option<GridLine> {
        let text = text.trim();
        if text.eq_ignore_ascii_case("auto") {
            return Some(GridLine::Auto);
        }
        if let Some(span) = text.strip_prefix("span") {
            return span.trim().parse().ok().filter(|n| *n > 0).map(GridLine::Span);
        }
        text.parse().ok().filter(|n| *n != 0).map(GridLine::Line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lengths() {
        assert_eq!(Length::parse("12px"), Some(Length::Px(12.0)));
        assert_eq!(Length::parse("1.5em"), Some(Length::Em(1.5)));
        assert_eq!(Length::parse("50%"), Some(Length::Percent(50.0)));
        assert_eq!(Length::parse("0"), Some(Length::Px(0.0)));
        assert_eq!(Length::parse("12"), None);
        assert_eq!(Length::parse("3furlongs"), None);
    }

    #[test]
    fn test_shorthand_expansion() {
        let sides = parse_sides("1px 2px 3px", Length::parse).unwrap();
        assert_eq!(sides.top, Length::Px(1.0));
        assert_eq!(sides.right, Length::Px(2.0));
        assert_eq!(sides.bottom, Length::Px(3.0));
        assert_eq!(sides.left, Length::Px(2.0));
    }

    #[test]
    fn test_parse_content_with_counter() {
        let items = parse_content("\"Chapter \" counter(chapter, upper-roman) \": \"").unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0], ContentItem::Text("Chapter ".to_string()));
        assert_eq!(
            items[1],
            ContentItem::Counter("chapter".to_string(), super::super::ListStyleType::UpperRoman)
        );
        assert!(parse_content("none").is_none());
    }

    #[test]
    fn test_parse_track_list_with_repeat() {
        let list = parse_track_list("100px repeat(2, 1fr) auto").unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(
            list[1],
            TrackListEntry::Repeat(2, vec![TrackSize::Fr(1.0)])
        );
    }

    #[test]
    fn test_parse_colors() {
        assert_eq!(Color::parse("#f00"), Some(Color { r: 255, g: 0, b: 0, a: 255 }));
        assert_eq!(Color::parse("navy"), Some(Color { r: 0, g: 0, b: 128, a: 255 }));
        assert!(Color::parse("transparent").unwrap().is_transparent());
    }
}
