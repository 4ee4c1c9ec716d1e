//! Computed style model consumed by the box tree builder and layout.
//!
//! - [CSS Cascading and Inheritance Level 4](https://www.w3.org/TR/css-cascade-4/)
//! - [CSS Values and Units Level 4](https://www.w3.org/TR/css-values-4/)
//! - [CSS 2.1 Visual Formatting Model](https://www.w3.org/TR/CSS2/visuren.html)

pub mod computed;
mod display;
mod resolver;
mod values;

// Re-export all public types
pub use computed::{
    AlignContent, AlignItems, BorderStyle, BoxSizing, CaptionSide, Clear, ComputedStyle, Float, FlexDirection,
    FlexWrap, FontStyle, FontWeight, GridAutoFlow, JustifyContent, LineHeight, ListStylePosition,
    ListStyleType, Overflow, Position, TextAlign, VerticalAlign, Visibility, WhiteSpace,
};
pub use display::{Display, default_display_for_element};
pub use resolver::{PseudoElement, StyleMap, StyleResolver};
pub use values::{
    Angle, Color, ContentItem, DEFAULT_FONT_SIZE_PX, GridLine, Length, LengthOrAuto, Sides,
    TrackListEntry, TrackSize, parse_content, parse_counter_list, parse_sides, parse_track_list,
};
