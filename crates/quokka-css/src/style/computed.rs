//! CSS Computed Style
//!
//! [§ 4.4 Computed Values](https://www.w3.org/TR/css-cascade-4/#computed)
//! "The computed value is the result of resolving the specified value..."
//!
//! Unlike a full cascade, every property here always carries a value: the
//! initial value, the inherited value, or the last declaration applied with
//! [`ComputedStyle::apply_declaration`].

use serde::Serialize;
use strum_macros::{Display as StrumDisplay, EnumString};

use super::display::Display;
use super::values::{
    Color, ContentItem, DEFAULT_FONT_SIZE_PX, GridLine, Length, LengthOrAuto, Sides,
    TrackListEntry, TrackSize, parse_content, parse_counter_list, parse_sides, parse_track_list,
};

/// [§ 9.3.1 Choosing a positioning scheme: 'position' property](https://www.w3.org/TR/CSS2/visuren.html#choose-position)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, StrumDisplay, EnumString,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Position {
    /// "The box is a normal box, laid out according to the normal flow."
    #[default]
    Static,
    /// "The box's position is calculated according to the normal flow. Then
    /// the box is offset relative to its normal position."
    Relative,
    /// "The box's position (and possibly size) is specified with the 'top',
    /// 'right', 'bottom', and 'left' properties."
    Absolute,
    /// "The box's position is calculated according to the 'absolute' model,
    /// but in addition, the box is fixed with respect to some reference."
    Fixed,
}

/// [§ 9.5.1 Positioning the float: the 'float' property](https://www.w3.org/TR/CSS2/visuren.html#float-position)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, StrumDisplay, EnumString,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Float {
    /// "The box is not floated."
    #[default]
    None,
    /// "The element generates a block box that is floated to the left."
    Left,
    /// "The element generates a block box that is floated to the right."
    Right,
}

/// [§ 9.5.2 Controlling flow next to floats: the 'clear' property](https://www.w3.org/TR/CSS2/visuren.html#flow-control)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, StrumDisplay, EnumString,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Clear {
    /// "No constraint on the box's position with respect to floats."
    #[default]
    None,
    /// Below any left-floating boxes.
    Left,
    /// Below any right-floating boxes.
    Right,
    /// Below any floating boxes.
    Both,
}

/// [§ 11.1.1 Overflow: the 'overflow' property](https://www.w3.org/TR/CSS2/visufx.html#overflow)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, StrumDisplay, EnumString,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Overflow {
    /// "Content is not clipped."
    #[default]
    Visible,
    /// "Content is clipped and no scrolling user interface should be provided."
    Hidden,
    /// "Content is clipped and a scrolling mechanism is always provided."
    Scroll,
    /// "Should cause a scrolling mechanism to be provided for overflowing boxes."
    Auto,
}

/// [§ 11.2 Visibility: the 'visibility' property](https://www.w3.org/TR/CSS2/visufx.html#visibility)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, StrumDisplay, EnumString,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Visibility {
    /// "The generated box is visible."
    #[default]
    Visible,
    /// "The generated box is invisible (fully transparent), but still affects layout."
    Hidden,
    /// Treated as `hidden` outside of tables.
    Collapse,
}

/// [§ 4.4 Box-sizing](https://www.w3.org/TR/css-sizing-3/#box-sizing)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, StrumDisplay, EnumString,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum BoxSizing {
    /// "This is the behavior of width and height as specified by CSS2.1."
    #[default]
    ContentBox,
    /// "The specified width and height on this element determine the border box."
    BorderBox,
}

/// [§ 8.5.3 Border style](https://www.w3.org/TR/CSS2/box.html#border-style-properties)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, StrumDisplay, EnumString,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum BorderStyle {
    /// "No border; the computed border width is zero."
    #[default]
    None,
    /// "Same as 'none', except in terms of border conflict resolution."
    Hidden,
    /// A series of dots.
    Dotted,
    /// A series of short line segments.
    Dashed,
    /// A single line segment.
    Solid,
    /// Two solid lines.
    Double,
    /// Looks as if carved into the canvas.
    Groove,
    /// The opposite of 'groove'.
    Ridge,
    /// Looks as if embedded in the canvas.
    Inset,
    /// The opposite of 'inset'.
    Outset,
}

impl BorderStyle {
    /// "The computed value of border-width is 0 if the border style is 'none' or 'hidden'."
    #[must_use]
    pub const fn has_width(self) -> bool {
        !matches!(self, BorderStyle::None | BorderStyle::Hidden)
    }
}

/// [§ 15.6 Font boldness: the 'font-weight' property](https://www.w3.org/TR/CSS2/fonts.html#font-boldness)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, StrumDisplay, EnumString,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum FontWeight {
    /// Weight 400.
    #[default]
    Normal,
    /// Weight 700.
    Bold,
}

/// [§ 15.7 Font styling: the 'font-style' property](https://www.w3.org/TR/CSS2/fonts.html#font-styling)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, StrumDisplay, EnumString,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum FontStyle {
    /// Upright face.
    #[default]
    Normal,
    /// Italic face.
    Italic,
    /// Slanted face.
    Oblique,
}

/// [§ 16.2 Alignment: the 'text-align' property](https://www.w3.org/TR/CSS2/text.html#alignment-prop)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, StrumDisplay, EnumString,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum TextAlign {
    /// Lines start at the left edge.
    #[default]
    Left,
    /// Lines end at the right edge.
    Right,
    /// Lines are centered.
    Center,
    /// "Text is justified according to the method specified by the
    /// 'text-justify' property."
    Justify,
}

/// [§ 16.6 Whitespace: the 'white-space' property](https://www.w3.org/TR/CSS2/text.html#white-space-prop)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, StrumDisplay, EnumString,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum WhiteSpace {
    /// "Collapse sequences of white space and break lines as necessary."
    #[default]
    Normal,
    /// "Prevents user agents from collapsing sequences of white space. Lines
    /// are only broken at preserved newline characters."
    Pre,
    /// "Collapses white space as for 'normal', but suppresses line breaks."
    Nowrap,
    /// "Prevents user agents from collapsing sequences of white space. Lines
    /// are broken at preserved newline characters, and as necessary."
    PreWrap,
    /// "Collapse sequences of white space. Lines are broken at preserved
    /// newline characters, and as necessary."
    PreLine,
}

impl WhiteSpace {
    /// Sequences of spaces collapse to one.
    #[must_use]
    pub const fn collapses_spaces(self) -> bool {
        matches!(self, WhiteSpace::Normal | WhiteSpace::Nowrap | WhiteSpace::PreLine)
    }

    /// Lines may be broken at spaces.
    #[must_use]
    pub const fn allows_wrapping(self) -> bool {
        matches!(
            self,
            WhiteSpace::Normal | WhiteSpace::PreWrap | WhiteSpace::PreLine
        )
    }

    /// Newlines in the source force line breaks.
    #[must_use]
    pub const fn preserves_line_breaks(self) -> bool {
        matches!(
            self,
            WhiteSpace::Pre | WhiteSpace::PreWrap | WhiteSpace::PreLine
        )
    }
}

/// [§ 12.6.2 Lists: the 'list-style-type' property](https://www.w3.org/TR/CSS2/generate.html#lists)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, StrumDisplay, EnumString,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum ListStyleType {
    /// A filled circle.
    #[default]
    Disc,
    /// A hollow circle.
    Circle,
    /// A filled square.
    Square,
    /// Decimal numbers, beginning with 1.
    Decimal,
    /// Lowercase ascii letters (a, b, c, ... z).
    #[strum(serialize = "lower-alpha", serialize = "lower-latin")]
    LowerAlpha,
    /// Uppercase ascii letters (A, B, C, ... Z).
    #[strum(serialize = "upper-alpha", serialize = "upper-latin")]
    UpperAlpha,
    /// Lowercase roman numerals (i, ii, iii, iv, v, etc.).
    LowerRoman,
    /// Uppercase roman numerals (I, II, III, IV, V, etc.).
    UpperRoman,
    /// No marker.
    None,
}

impl ListStyleType {
    /// Glyph markers (disc/circle/square) as opposed to numbering systems.
    #[must_use]
    pub const fn is_glyph(self) -> bool {
        matches!(
            self,
            ListStyleType::Disc | ListStyleType::Circle | ListStyleType::Square
        )
    }
}

/// [§ 12.6.2 'list-style-position'](https://www.w3.org/TR/CSS2/generate.html#propdef-list-style-position)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, StrumDisplay, EnumString,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum ListStylePosition {
    /// "The marker box is outside the principal block box."
    #[default]
    Outside,
    /// "The marker box is placed as the first inline box in the principal block box."
    Inside,
}

/// [§ 10.8.1 'vertical-align'](https://www.w3.org/TR/CSS2/visudet.html#propdef-vertical-align)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub enum VerticalAlign {
    /// "Align the baseline of the box with the baseline of the parent box."
    #[default]
    Baseline,
    /// "Align the vertical midpoint of the box with the baseline of the parent
    /// box plus half the x-height of the parent."
    Middle,
    /// "Lower the baseline of the box to the proper position for subscripts."
    Sub,
    /// "Raise the baseline of the box to the proper position for superscripts."
    Super,
    /// "Align the top of the box with the top of the parent's content area."
    TextTop,
    /// "Align the bottom of the box with the bottom of the parent's content area."
    TextBottom,
    /// "Align the top of the aligned subtree with the top of the line box."
    Top,
    /// "Align the bottom of the aligned subtree with the bottom of the line box."
    Bottom,
    /// "Raise (positive value) or lower (negative value) the box by this distance."
    Length(Length),
}

impl VerticalAlign {
    /// Parse a keyword or a length.
    #[must_use]
    pub fn parse(text: &str) -> Option<VerticalAlign> {
        let value = match text.trim().to_ascii_lowercase().as_str() {
            "baseline" => VerticalAlign::Baseline,
            "middle" => VerticalAlign::Middle,
            "sub" => VerticalAlign::Sub,
            "super" => VerticalAlign::Super,
            "text-top" => VerticalAlign::TextTop,
            "text-bottom" => VerticalAlign::TextBottom,
            "top" => VerticalAlign::Top,
            "bottom" => VerticalAlign::Bottom,
            other => VerticalAlign::Length(Length::parse(other)?),
        };
        Some(value)
    }

    /// `top` and `bottom` align to the line box instead of the parent baseline.
    #[must_use]
    pub const fn is_line_relative(self) -> bool {
        matches!(self, VerticalAlign::Top | VerticalAlign::Bottom)
    }
}

/// [§ 10.8.1 'line-height'](https://www.w3.org/TR/CSS2/visudet.html#propdef-line-height)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub enum LineHeight {
    /// "Tells user agents to set the used value to a 'reasonable' value based
    /// on the font of the element."
    #[default]
    Normal,
    /// "The used value of the property is this number multiplied by the
    /// element's font size."
    Number(f32),
    /// "The specified length is used in the calculation of the line box height."
    Length(Length),
}

impl LineHeight {
    /// Parse `normal`, a bare number, or a length.
    #[must_use]
    pub fn parse(text: &str) -> Option<LineHeight> {
        let text = text.trim();
        if text.eq_ignore_ascii_case("normal") {
            return Some(LineHeight::Normal);
        }
        if let Ok(n) = text.parse::<f32>() {
            return Some(LineHeight::Number(n));
        }
        Length::parse(text).map(LineHeight::Length)
    }
}

/// [§ 5.1 'flex-direction'](https://www.w3.org/TR/css-flexbox-1/#flex-direction-property)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, StrumDisplay, EnumString,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum FlexDirection {
    /// "The flex container's main axis has the same orientation as the inline axis."
    #[default]
    Row,
    /// "Same as row, except the main-start and main-end directions are swapped."
    RowReverse,
    /// "The flex container's main axis has the same orientation as the block axis."
    Column,
    /// "Same as column, except the main-start and main-end directions are swapped."
    ColumnReverse,
}

impl FlexDirection {
    /// Main axis is horizontal.
    #[must_use]
    pub const fn is_row(self) -> bool {
        matches!(self, FlexDirection::Row | FlexDirection::RowReverse)
    }

    /// Main-start and main-end are swapped.
    #[must_use]
    pub const fn is_reverse(self) -> bool {
        matches!(self, FlexDirection::RowReverse | FlexDirection::ColumnReverse)
    }
}

/// [§ 5.2 'flex-wrap'](https://www.w3.org/TR/css-flexbox-1/#flex-wrap-property)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, StrumDisplay, EnumString,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum FlexWrap {
    /// "The flex container is single-line."
    #[default]
    Nowrap,
    /// "The flex container is multi-line."
    Wrap,
    /// "Same as wrap, but cross-start and cross-end are swapped."
    WrapReverse,
}

/// [§ 8.2 'justify-content'](https://www.w3.org/TR/css-flexbox-1/#justify-content-property)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, StrumDisplay, EnumString,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum JustifyContent {
    /// "Flex items are packed toward the start of the line."
    #[default]
    #[strum(serialize = "flex-start", serialize = "start", serialize = "normal")]
    FlexStart,
    /// "Flex items are packed toward the end of the line."
    #[strum(serialize = "flex-end", serialize = "end")]
    FlexEnd,
    /// "Flex items are packed toward the center of the line."
    Center,
    /// "Flex items are evenly distributed in the line."
    SpaceBetween,
    /// "Flex items are evenly distributed in the line, with half-size spaces on either end."
    SpaceAround,
    /// Equal spaces between items and at both ends.
    SpaceEvenly,
}

/// [§ 8.3 'align-items'](https://www.w3.org/TR/css-flexbox-1/#align-items-property)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, StrumDisplay, EnumString,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum AlignItems {
    /// "The flex item is stretched to fill the line."
    #[default]
    #[strum(serialize = "stretch", serialize = "normal")]
    Stretch,
    /// "The cross-start margin edge of the flex item is placed flush with the
    /// cross-start edge of the line."
    #[strum(serialize = "flex-start", serialize = "start")]
    FlexStart,
    /// "The cross-end margin edge of the flex item is placed flush with the
    /// cross-end edge of the line."
    #[strum(serialize = "flex-end", serialize = "end")]
    FlexEnd,
    /// "The flex item's margin box is centered in the cross axis within the line."
    Center,
    /// "The flex item participates in baseline alignment."
    Baseline,
}

/// [§ 8.4 'align-content'](https://www.w3.org/TR/css-flexbox-1/#align-content-property)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, StrumDisplay, EnumString,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum AlignContent {
    /// "Lines stretch to take up the remaining space."
    #[default]
    #[strum(serialize = "stretch", serialize = "normal")]
    Stretch,
    /// "Lines are packed toward the start of the flex container."
    #[strum(serialize = "flex-start", serialize = "start")]
    FlexStart,
    /// "Lines are packed toward the end of the flex container."
    #[strum(serialize = "flex-end", serialize = "end")]
    FlexEnd,
    /// "Lines are packed toward the center of the flex container."
    Center,
    /// "Lines are evenly distributed in the flex container."
    SpaceBetween,
    /// "Lines are evenly distributed, with half-size spaces on either end."
    SpaceAround,
}

/// [§ 7.7 'grid-auto-flow'](https://www.w3.org/TR/css-grid-1/#grid-auto-flow-property)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, StrumDisplay, EnumString,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum GridAutoFlow {
    /// "The auto-placement algorithm places items by filling each row in turn."
    #[default]
    Row,
    /// "The auto-placement algorithm places items by filling each column in turn."
    Column,
}

/// [§ 17.4.1 'caption-side'](https://www.w3.org/TR/CSS2/tables.html#caption-position)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, StrumDisplay, EnumString,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum CaptionSide {
    /// "Positions the caption box above the table box."
    #[default]
    Top,
    /// "Positions the caption box below the table box."
    Bottom,
}

/// Computed styles for an element.
///
/// [§ 4.4 Computed Values](https://www.w3.org/TR/css-cascade-4/#computed)
/// "The computed value is the result of resolving the specified value..."
///
/// Lengths stay unresolved (percentages and font-relative units need the
/// containing block and font at layout time), except `font-size`, which is
/// resolved to pixels here so that descendants can inherit it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComputedStyle {
    /// [§ 9.2.4 'display'](https://www.w3.org/TR/CSS2/visuren.html#display-prop)
    pub display: Display,
    /// [§ 9.3.1 'position'](https://www.w3.org/TR/CSS2/visuren.html#choose-position)
    pub position: Position,
    /// [§ 9.5.1 'float'](https://www.w3.org/TR/CSS2/visuren.html#float-position)
    pub float: Float,
    /// [§ 9.5.2 'clear'](https://www.w3.org/TR/CSS2/visuren.html#flow-control)
    pub clear: Clear,
    /// [§ 11.1.1 'overflow'](https://www.w3.org/TR/CSS2/visufx.html#overflow)
    pub overflow: Overflow,
    /// [§ 11.2 'visibility'](https://www.w3.org/TR/CSS2/visufx.html#visibility)
    ///
    /// Inherited: yes
    pub visibility: Visibility,
    /// [§ 4.4 'box-sizing'](https://www.w3.org/TR/css-sizing-3/#box-sizing)
    pub box_sizing: BoxSizing,

    /// [§ 10.2 'width'](https://www.w3.org/TR/CSS2/visudet.html#the-width-property)
    pub width: LengthOrAuto,
    /// [§ 10.5 'height'](https://www.w3.org/TR/CSS2/visudet.html#the-height-property)
    pub height: LengthOrAuto,
    /// [§ 10.4 'min-width'](https://www.w3.org/TR/CSS2/visudet.html#min-max-widths)
    ///
    /// `Auto` means no constraint.
    pub min_width: LengthOrAuto,
    /// [§ 10.7 'min-height'](https://www.w3.org/TR/CSS2/visudet.html#min-max-heights)
    pub min_height: LengthOrAuto,
    /// 'max-width'; `Auto` stands for `none`.
    pub max_width: LengthOrAuto,
    /// 'max-height'; `Auto` stands for `none`.
    pub max_height: LengthOrAuto,

    /// [§ 8.3 Margin properties](https://www.w3.org/TR/CSS2/box.html#margin-properties)
    pub margin: Sides<LengthOrAuto>,
    /// [§ 8.4 Padding properties](https://www.w3.org/TR/CSS2/box.html#padding-properties)
    pub padding: Sides<Length>,
    /// [§ 8.5.1 Border width](https://www.w3.org/TR/CSS2/box.html#border-width-properties)
    pub border_width: Sides<Length>,
    /// [§ 8.5.3 Border style](https://www.w3.org/TR/CSS2/box.html#border-style-properties)
    pub border_style: Sides<BorderStyle>,
    /// [§ 9.3.2 Box offsets](https://www.w3.org/TR/CSS2/visuren.html#position-props)
    ///
    /// 'top', 'right', 'bottom' and 'left'.
    pub inset: Sides<LengthOrAuto>,
    /// [§ 9.9.1 'z-index'](https://www.w3.org/TR/CSS2/visuren.html#z-index)
    ///
    /// `None` is `auto`.
    pub z_index: Option<i32>,

    /// [§ 15.3 'font-family'](https://www.w3.org/TR/CSS2/fonts.html#font-family-prop)
    ///
    /// Inherited: yes
    pub font_family: String,
    /// [§ 15.7 'font-size'](https://www.w3.org/TR/CSS2/fonts.html#font-size-props)
    ///
    /// Resolved to pixels. Inherited: yes
    pub font_size: f32,
    /// 'font-weight'. Inherited: yes
    pub font_weight: FontWeight,
    /// 'font-style'. Inherited: yes
    pub font_style: FontStyle,
    /// 'line-height'. Inherited: yes
    pub line_height: LineHeight,
    /// 'text-align'. Inherited: yes
    pub text_align: TextAlign,
    /// [§ 16.1 'text-indent'](https://www.w3.org/TR/CSS2/text.html#indentation-prop)
    ///
    /// Inherited: yes
    pub text_indent: Length,
    /// 'vertical-align'
    pub vertical_align: VerticalAlign,
    /// 'white-space'. Inherited: yes
    pub white_space: WhiteSpace,
    /// 'color'. Inherited: yes
    pub color: Color,
    /// 'background-color'
    pub background_color: Color,

    /// 'list-style-type'. Inherited: yes
    pub list_style_type: ListStyleType,
    /// 'list-style-position'. Inherited: yes
    pub list_style_position: ListStylePosition,
    /// [§ 12.2 'content'](https://www.w3.org/TR/CSS2/generate.html#content)
    ///
    /// `None` for `normal`/`none`. Only meaningful on pseudo-elements.
    pub content: Option<Vec<ContentItem>>,
    /// [§ 12.4 'counter-reset'](https://www.w3.org/TR/CSS2/generate.html#counters)
    pub counter_reset: Vec<(String, i32)>,
    /// [§ 12.4 'counter-increment'](https://www.w3.org/TR/CSS2/generate.html#counters)
    pub counter_increment: Vec<(String, i32)>,

    /// 'flex-direction'
    pub flex_direction: FlexDirection,
    /// 'flex-wrap'
    pub flex_wrap: FlexWrap,
    /// 'justify-content'
    pub justify_content: JustifyContent,
    /// 'align-items'
    pub align_items: AlignItems,
    /// 'align-self'; `None` is `auto` (use the container's `align-items`).
    pub align_self: Option<AlignItems>,
    /// 'align-content'
    pub align_content: AlignContent,
    /// 'flex-grow'
    pub flex_grow: f32,
    /// 'flex-shrink'
    pub flex_shrink: f32,
    /// 'flex-basis'; `Auto` uses the main size property.
    pub flex_basis: LengthOrAuto,
    /// 'order'
    pub order: i32,
    /// 'row-gap'
    pub row_gap: Length,
    /// 'column-gap'
    pub column_gap: Length,

    /// 'grid-template-columns'
    pub grid_template_columns: Vec<TrackListEntry>,
    /// 'grid-template-rows'
    pub grid_template_rows: Vec<TrackListEntry>,
    /// 'grid-auto-columns'
    pub grid_auto_columns: TrackSize,
    /// 'grid-auto-rows'
    pub grid_auto_rows: TrackSize,
    /// 'grid-auto-flow'
    pub grid_auto_flow: GridAutoFlow,
    /// 'grid-column-start'
    pub grid_column_start: GridLine,
    /// 'grid-column-end'
    pub grid_column_end: GridLine,
    /// 'grid-row-start'
    pub grid_row_start: GridLine,
    /// 'grid-row-end'
    pub grid_row_end: GridLine,

    /// [§ 17.6.1 'border-spacing'](https://www.w3.org/TR/CSS2/tables.html#separated-borders)
    ///
    /// Inherited: yes
    pub border_spacing: Length,
    /// 'caption-side'. Inherited: yes
    pub caption_side: CaptionSide,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        ComputedStyle {
            display: Display::Inline,
            position: Position::Static,
            float: Float::None,
            clear: Clear::None,
            overflow: Overflow::Visible,
            visibility: Visibility::Visible,
            box_sizing: BoxSizing::ContentBox,
            width: LengthOrAuto::Auto,
            height: LengthOrAuto::Auto,
            min_width: LengthOrAuto::Auto,
            min_height: LengthOrAuto::Auto,
            max_width: LengthOrAuto::Auto,
            max_height: LengthOrAuto::Auto,
            margin: Sides::all(LengthOrAuto::Length(Length::ZERO)),
            padding: Sides::all(Length::ZERO),
            border_width: Sides::all(Length::Px(3.0)),
            border_style: Sides::all(BorderStyle::None),
            inset: Sides::all(LengthOrAuto::Auto),
            z_index: None,
            font_family: "serif".to_string(),
            font_size: DEFAULT_FONT_SIZE_PX,
            font_weight: FontWeight::Normal,
            font_style: FontStyle::Normal,
            line_height: LineHeight::Normal,
            text_align: TextAlign::Left,
            text_indent: Length::ZERO,
            vertical_align: VerticalAlign::Baseline,
            white_space: WhiteSpace::Normal,
            color: Color::BLACK,
            background_color: Color::TRANSPARENT,
            list_style_type: ListStyleType::Disc,
            list_style_position: ListStylePosition::Outside,
            content: None,
            counter_reset: Vec::new(),
            counter_increment: Vec::new(),
            flex_direction: FlexDirection::Row,
            flex_wrap: FlexWrap::Nowrap,
            justify_content: JustifyContent::FlexStart,
            align_items: AlignItems::Stretch,
            align_self: None,
            align_content: AlignContent::Stretch,
            flex_grow: 0.0,
            flex_shrink: 1.0,
            flex_basis: LengthOrAuto::Auto,
            order: 0,
            row_gap: Length::ZERO,
            column_gap: Length::ZERO,
            grid_template_columns: Vec::new(),
            grid_template_rows: Vec::new(),
            grid_auto_columns: TrackSize::Auto,
            grid_auto_rows: TrackSize::Auto,
            grid_auto_flow: GridAutoFlow::Row,
            grid_column_start: GridLine::Auto,
            grid_column_end: GridLine::Auto,
            grid_row_start: GridLine::Auto,
            grid_row_end: GridLine::Auto,
            border_spacing: Length::ZERO,
            caption_side: CaptionSide::Top,
        }
    }
}

/// Parse a keyword through its `EnumString` implementation.
fn keyword<T: std::str::FromStr>(value: &str) -> Option<T> {
    value.trim().parse().ok()
}

impl ComputedStyle {
    /// The initial style of the root with the given font settings.
    #[must_use]
    pub fn initial(font_family: &str, font_size: f32) -> Self {
        ComputedStyle {
            font_family: font_family.to_string(),
            font_size,
            ..ComputedStyle::default()
        }
    }

    /// [§ 7.2 Inheritance](https://www.w3.org/TR/css-cascade-4/#inheriting)
    ///
    /// "The inherited value of a property on an element is the computed value
    /// of the property on the element's parent element."
    ///
    /// Returns a style with the inherited properties copied from `parent` and
    /// every other property at its initial value.
    #[must_use]
    pub fn inherit_from(parent: &ComputedStyle) -> Self {
        ComputedStyle {
            visibility: parent.visibility,
            font_family: parent.font_family.clone(),
            font_size: parent.font_size,
            font_weight: parent.font_weight,
            font_style: parent.font_style,
            line_height: parent.line_height,
            text_align: parent.text_align,
            text_indent: parent.text_indent,
            white_space: parent.white_space,
            color: parent.color,
            list_style_type: parent.list_style_type,
            list_style_position: parent.list_style_position,
            border_spacing: parent.border_spacing,
            caption_side: parent.caption_side,
            ..ComputedStyle::default()
        }
    }

    /// Used border widths, zero on sides whose style draws nothing.
    #[must_use]
    pub fn used_border_width(&self) -> Sides<Length> {
        let pick = |w: Length, s: BorderStyle| if s.has_width() { w } else { Length::ZERO };
        Sides {
            top: pick(self.border_width.top, self.border_style.top),
            right: pick(self.border_width.right, self.border_style.right),
            bottom: pick(self.border_width.bottom, self.border_style.bottom),
            left: pick(self.border_width.left, self.border_style.left),
        }
    }

    /// Boxes with `position: absolute` or `fixed`.
    #[must_use]
    pub const fn is_out_of_flow_positioned(&self) -> bool {
        matches!(self.position, Position::Absolute | Position::Fixed)
    }

    /// Apply one declaration. `parent_font_size` and `root_font_size` resolve
    /// relative `font-size` values.
    ///
    /// Returns false if the property is unknown or the value does not parse;
    /// the style is left unchanged in that case.
    pub fn apply_declaration(
        &mut self,
        name: &str,
        value: &str,
        parent_font_size: f32,
        root_font_size: f32,
    ) -> bool {
        let value = value.trim();
        let name = name.trim().to_ascii_lowercase();
        macro_rules! set {
            ($field:expr, $parsed:expr) => {
                match $parsed {
                    Some(v) => {
                        $field = v;
                        true
                    }
                    None => false,
                }
            };
        }
        match name.as_str() {
            "display" => set!(self.display, keyword(value)),
            "position" => set!(self.position, keyword(value)),
            "float" => set!(self.float, keyword(value)),
            "clear" => set!(self.clear, keyword(value)),
            "overflow" | "overflow-x" | "overflow-y" => set!(self.overflow, keyword(value)),
            "visibility" => set!(self.visibility, keyword(value)),
            "box-sizing" => set!(self.box_sizing, keyword(value)),

            "width" => set!(self.width, LengthOrAuto::parse(value)),
            "height" => set!(self.height, LengthOrAuto::parse(value)),
            "min-width" => set!(self.min_width, LengthOrAuto::parse(value)),
            "min-height" => set!(self.min_height, LengthOrAuto::parse(value)),
            "max-width" => set!(self.max_width, LengthOrAuto::parse_max(value)),
            "max-height" => set!(self.max_height, LengthOrAuto::parse_max(value)),

            "margin" => set!(self.margin, parse_sides(value, LengthOrAuto::parse)),
            "margin-top" => set!(self.margin.top, LengthOrAuto::parse(value)),
            "margin-right" => set!(self.margin.right, LengthOrAuto::parse(value)),
            "margin-bottom" => set!(self.margin.bottom, LengthOrAuto::parse(value)),
            "margin-left" => set!(self.margin.left, LengthOrAuto::parse(value)),
            "padding" => set!(self.padding, parse_sides(value, Length::parse)),
            "padding-top" => set!(self.padding.top, Length::parse(value)),
            "padding-right" => set!(self.padding.right, Length::parse(value)),
            "padding-bottom" => set!(self.padding.bottom, Length::parse(value)),
            "padding-left" => set!(self.padding.left, Length::parse(value)),
            "border-width" => set!(self.border_width, parse_sides(value, parse_border_width)),
            "border-style" => set!(self.border_style, parse_sides(value, keyword)),
            "border" => self.apply_border_shorthand(value, None),
            "border-top" => self.apply_border_shorthand(value, Some(Side::Top)),
            "border-right" => self.apply_border_shorthand(value, Some(Side::Right)),
            "border-bottom" => self.apply_border_shorthand(value, Some(Side::Bottom)),
            "border-left" => self.apply_border_shorthand(value, Some(Side::Left)),
            "top" => set!(self.inset.top, LengthOrAuto::parse(value)),
            "right" => set!(self.inset.right, LengthOrAuto::parse(value)),
            "bottom" => set!(self.inset.bottom, LengthOrAuto::parse(value)),
            "left" => set!(self.inset.left, LengthOrAuto::parse(value)),
            "z-index" => {
                if value.eq_ignore_ascii_case("auto") {
                    self.z_index = None;
                    true
                } else {
                    set!(self.z_index, value.parse().ok().map(Some))
                }
            }

            "font-family" => {
                let family = value.split(',').next().unwrap_or("").trim();
                let family = family.trim_matches(['"', '\'']);
                if family.is_empty() {
                    false
                } else {
                    self.font_family = family.to_string();
                    true
                }
            }
            "font-size" => set!(
                self.font_size,
                parse_font_size(value, parent_font_size, root_font_size)
            ),
            "font-weight" => set!(self.font_weight, parse_font_weight(value)),
            "font-style" => set!(self.font_style, keyword(value)),
            "line-height" => set!(self.line_height, LineHeight::parse(value)),
            "text-align" => set!(self.text_align, keyword(value)),
            "text-indent" => set!(self.text_indent, Length::parse(value)),
            "vertical-align" => set!(self.vertical_align, VerticalAlign::parse(value)),
            "white-space" => set!(self.white_space, keyword(value)),
            "color" => set!(self.color, Color::parse(value)),
            "background-color" | "background" => set!(self.background_color, Color::parse(value)),

            "list-style-type" => set!(self.list_style_type, keyword(value)),
            "list-style-position" => set!(self.list_style_position, keyword(value)),
            "content" => {
                self.content = parse_content(value);
                self.content.is_some()
                    || value.eq_ignore_ascii_case("none")
                    || value.eq_ignore_ascii_case("normal")
            }
            "counter-reset" => set!(self.counter_reset, parse_counter_list(value, 0)),
            "counter-increment" => set!(self.counter_increment, parse_counter_list(value, 1)),

            "flex-direction" => set!(self.flex_direction, keyword(value)),
            "flex-wrap" => set!(self.flex_wrap, keyword(value)),
            "justify-content" => set!(self.justify_content, keyword(value)),
            "align-items" => set!(self.align_items, keyword(value)),
            "align-self" => {
                if value.eq_ignore_ascii_case("auto") {
                    self.align_self = None;
                    true
                } else {
                    set!(self.align_self, keyword(value).map(Some))
                }
            }
            "align-content" => set!(self.align_content, keyword(value)),
            "flex-grow" => set!(self.flex_grow, value.parse().ok().filter(|v: &f32| *v >= 0.0)),
            "flex-shrink" => set!(
                self.flex_shrink,
                value.parse().ok().filter(|v: &f32| *v >= 0.0)
            ),
            "flex-basis" => {
                if value.eq_ignore_ascii_case("content") {
                    self.flex_basis = LengthOrAuto::Auto;
                    true
                } else {
                    set!(self.flex_basis, LengthOrAuto::parse(value))
                }
            }
            "flex" => self.apply_flex_shorthand(value),
            "order" => set!(self.order, value.parse().ok()),
            "gap" => {
                let parts: Option<Vec<Length>> = value.split_whitespace().map(Length::parse).collect();
                match parts.as_deref() {
                    Some([both]) => {
                        self.row_gap = *both;
                        self.column_gap = *both;
                        true
                    }
                    Some([row, column]) => {
                        self.row_gap = *row;
                        self.column_gap = *column;
                        true
                    }
                    _ => false,
                }
            }
            "row-gap" => set!(self.row_gap, Length::parse(value)),
            "column-gap" => set!(self.column_gap, Length::parse(value)),

            "grid-template-columns" => set!(self.grid_template_columns, parse_track_list(value)),
            "grid-template-rows" => set!(self.grid_template_rows, parse_track_list(value)),
            "grid-auto-columns" => set!(self.grid_auto_columns, TrackSize::parse(value)),
            "grid-auto-rows" => set!(self.grid_auto_rows, TrackSize::parse(value)),
            "grid-auto-flow" => set!(
                self.grid_auto_flow,
                keyword(value.split_whitespace().next().unwrap_or(""))
            ),
            "grid-column-start" => set!(self.grid_column_start, GridLine::parse(value)),
            "grid-column-end" => set!(self.grid_column_end, GridLine::parse(value)),
            "grid-row-start" => set!(self.grid_row_start, GridLine::parse(value)),
            "grid-row-end" => set!(self.grid_row_end, GridLine::parse(value)),
            "grid-column" => match parse_grid_line_pair(value) {
                Some((start, end)) => {
                    self.grid_column_start = start;
                    self.grid_column_end = end;
                    true
                }
                None => false,
            },
            "grid-row" => match parse_grid_line_pair(value) {
                Some((start, end)) => {
                    self.grid_row_start = start;
                    self.grid_row_end = end;
                    true
                }
                None => false,
            },

            "border-spacing" => set!(
                self.border_spacing,
                value.split_whitespace().next().and_then(Length::parse)
            ),
            "caption-side" => set!(self.caption_side, keyword(value)),
            _ => false,
        }
    }

    /// `border`, `border-top`, ...: any order of width, style and color.
    fn apply_border_shorthand(&mut self, value: &str, side: Option<Side>) -> bool {
        let mut width = None;
        let mut style = None;
        for part in value.split_whitespace() {
            if let Some(w) = parse_border_width(part) {
                width = Some(w);
            } else if let Some(s) = keyword::<BorderStyle>(part) {
                style = Some(s);
            } else if Color::parse(part).is_none() {
                return false;
            }
        }
        // "border: 2px" keeps style none, which draws nothing.
        let width = width.unwrap_or(Length::Px(3.0));
        let style = style.unwrap_or(BorderStyle::None);
        match side {
            None => {
                self.border_width = Sides::all(width);
                self.border_style = Sides::all(style);
            }
            Some(Side::Top) => {
                self.border_width.top = width;
                self.border_style.top = style;
            }
            Some(Side::Right) => {
                self.border_width.right = width;
                self.border_style.right = style;
            }
            Some(Side::Bottom) => {
                self.border_width.bottom = width;
                self.border_style.bottom = style;
            }
            Some(Side::Left) => {
                self.border_width.left = width;
                self.border_style.left = style;
            }
        }
        true
    }

    /// [§ 7.1 The 'flex' Shorthand](https://www.w3.org/TR/css-flexbox-1/#flex-property)
    fn apply_flex_shorthand(&mut self, value: &str) -> bool {
        let parts: Vec<&str> = value.split_whitespace().collect();
        let (grow, shrink, basis) = match parts.as_slice() {
            ["none"] => (0.0, 0.0, LengthOrAuto::Auto),
            ["auto"] => (1.0, 1.0, LengthOrAuto::Auto),
            ["initial"] => (0.0, 1.0, LengthOrAuto::Auto),
            [single] => match single.parse::<f32>() {
                // "flex: <positive-number>" is "flex: <number> 1 0"
                Ok(g) => (g, 1.0, LengthOrAuto::Length(Length::ZERO)),
                Err(_) => match LengthOrAuto::parse(single) {
                    Some(b) => (1.0, 1.0, b),
                    None => return false,
                },
            },
            [g, second] => {
                let Ok(g) = g.parse::<f32>() else { return false };
                match second.parse::<f32>() {
                    Ok(s) => (g, s, LengthOrAuto::Length(Length::ZERO)),
                    Err(_) => match LengthOrAuto::parse(second) {
                        Some(b) => (g, 1.0, b),
                        None => return false,
                    },
                }
            }
            [g, s, b] => match (g.parse::<f32>(), s.parse::<f32>(), LengthOrAuto::parse(b)) {
                (Ok(g), Ok(s), Some(b)) => (g, s, b),
                _ => return false,
            },
            _ => return false,
        };
        self.flex_grow = grow;
        self.flex_shrink = shrink;
        self.flex_basis = basis;
        true
    }
}

#[derive(Clone, Copy)]
enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

/// [§ 8.5.1 'border-width'](https://www.w3.org/TR/CSS2/box.html#border-width-properties)
///
/// "thin <= medium <= thick". Browsers use 1px, 3px and 5px.
fn parse_border_width(value: &str) -> Option<Length> {
    match value.to_ascii_lowercase().as_str() {
        "thin" => Some(Length::Px(1.0)),
        "medium" => Some(Length::Px(3.0)),
        "thick" => Some(Length::Px(5.0)),
        other => Length::parse(other).filter(|l| !l.is_percent()),
    }
}

/// [§ 15.7 'font-size'](https://www.w3.org/TR/CSS2/fonts.html#font-size-props)
fn parse_font_size(value: &str, parent: f32, root: f32) -> Option<f32> {
    // "absolute-size: xx-small | x-small | small | medium | large | x-large | xx-large"
    let factor = match value.to_ascii_lowercase().as_str() {
        "xx-small" => Some(0.6),
        "x-small" => Some(0.75),
        "small" => Some(8.0 / 9.0),
        "medium" => Some(1.0),
        "large" => Some(1.2),
        "x-large" => Some(1.5),
        "xx-large" => Some(2.0),
        _ => None,
    };
    if let Some(factor) = factor {
        return Some(DEFAULT_FONT_SIZE_PX * factor);
    }
    if value.eq_ignore_ascii_case("larger") {
        return Some(parent * 1.2);
    }
    if value.eq_ignore_ascii_case("smaller") {
        return Some(parent / 1.2);
    }
    let size = match Length::parse(value)? {
        Length::Px(v) => v,
        Length::Em(v) => v * parent,
        Length::Ex(v) => v * parent * 0.5,
        Length::Ch(v) => v * parent * 0.5,
        Length::Rem(v) => v * root,
        Length::Percent(v) => v * parent / 100.0,
        Length::Pt(v) => v * 96.0 / 72.0,
        Length::Pc(v) => v * 16.0,
        Length::In(v) => v * 96.0,
        Length::Cm(v) => v * 96.0 / 2.54,
        Length::Mm(v) => v * 96.0 / 25.4,
        Length::Q(v) => v * 96.0 / 101.6,
        // viewport units are not known when styles are resolved
        Length::Vw(_) | Length::Vh(_) | Length::Vmin(_) | Length::Vmax(_) => return None,
    };
    (size >= 0.0).then_some(size)
}

fn parse_font_weight(value: &str) -> Option<FontWeight> {
    match value.parse::<u16>() {
        Ok(n) if n >= 600 => Some(FontWeight::Bold),
        Ok(_) => Some(FontWeight::Normal),
        Err(_) if value.eq_ignore_ascii_case("bolder") => Some(FontWeight::Bold),
        Err(_) if value.eq_ignore_ascii_case("lighter") => Some(FontWeight::Normal),
        Err(_) => keyword(value),
    }
}

/// `grid-column: 1 / 3`, `grid-row: 2`, `grid-column: span 2`.
fn parse_grid_line_pair(value: &str) -> Option<(GridLine, GridLine)> {
    match value.split_once('/') {
        Some((start, end)) => Some((GridLine::parse(start)?, GridLine::parse(end)?)),
        None => Some((GridLine::parse(value)?, GridLine::Auto)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inherited_properties_copy_from_parent() {
        let mut parent = ComputedStyle::default();
        assert!(parent.apply_declaration("font-size", "20px", 16.0, 16.0));
        assert!(parent.apply_declaration("text-align", "center", 16.0, 16.0));
        assert!(parent.apply_declaration("width", "100px", 16.0, 16.0));

        let child = ComputedStyle::inherit_from(&parent);
        assert_eq!(child.font_size, 20.0);
        assert_eq!(child.text_align, TextAlign::Center);
        assert_eq!(child.width, LengthOrAuto::Auto, "width is not inherited");
    }

    #[test]
    fn test_relative_font_sizes() {
        let mut style = ComputedStyle::default();
        assert!(style.apply_declaration("font-size", "1.5em", 20.0, 16.0));
        assert_eq!(style.font_size, 30.0);
        assert!(style.apply_declaration("font-size", "2rem", 20.0, 16.0));
        assert_eq!(style.font_size, 32.0);
        assert!(style.apply_declaration("font-size", "50%", 20.0, 16.0));
        assert_eq!(style.font_size, 10.0);
    }

    #[test]
    fn test_border_shorthand_and_used_width() {
        let mut style = ComputedStyle::default();
        assert_eq!(style.used_border_width().top, Length::ZERO);
        assert!(style.apply_declaration("border", "2px solid red", 16.0, 16.0));
        assert_eq!(style.used_border_width().left, Length::Px(2.0));
        assert!(style.apply_declaration("border-top", "none", 16.0, 16.0));
        assert_eq!(style.used_border_width().top, Length::ZERO);
    }

    #[test]
    fn test_flex_shorthand() {
        let mut style = ComputedStyle::default();
        assert!(style.apply_declaration("flex", "2", 16.0, 16.0));
        assert_eq!(style.flex_grow, 2.0);
        assert_eq!(style.flex_shrink, 1.0);
        assert_eq!(style.flex_basis, LengthOrAuto::Length(Length::ZERO));
        assert!(style.apply_declaration("flex", "none", 16.0, 16.0));
        assert_eq!(style.flex_shrink, 0.0);
    }

    #[test]
    fn test_unknown_values_are_rejected() {
        let mut style = ComputedStyle::default();
        assert!(!style.apply_declaration("display", "sideways", 16.0, 16.0));
        assert!(!style.apply_declaration("no-such-property", "1px", 16.0, 16.0));
        assert_eq!(style.display, Display::Inline);
    }
}
