//! Font measurement interface used by text and line layout.
//!
//! [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
//!
//! "CSS assumes that every font has font metrics that specify a
//! characteristic height above the baseline and a depth below it."
//!
//! The engine never talks to a font backend directly. Everything it needs
//! comes through [`VisualContext`], so layout stays deterministic for a
//! given implementation.

use serde::Serialize;

use crate::style::{ComputedStyle, FontStyle, FontWeight};

/// The font selected for a box.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FontSpec {
    /// Family name as specified.
    pub family: String,
    /// Font size in pixels.
    pub size: f32,
    /// Bold face requested.
    pub bold: bool,
    /// Italic or oblique face requested.
    pub italic: bool,
}

impl FontSpec {
    /// The font described by a computed style.
    #[must_use]
    pub fn from_style(style: &ComputedStyle) -> Self {
        FontSpec {
            family: style.font_family.clone(),
            size: style.font_size,
            bold: style.font_weight == FontWeight::Bold,
            italic: style.font_style != FontStyle::Normal,
        }
    }
}

/// Vertical metrics of a font, all in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct FontMetrics {
    /// The font size the metrics were computed for.
    pub size: f32,
    /// Distance from the baseline to the top of the em box.
    pub ascent: f32,
    /// Distance from the baseline to the bottom of the em box.
    pub descent: f32,
    /// `ascent + descent`: the height of an inline text box.
    pub height: f32,
    /// The x-height, used by `ex` and by `vertical-align: middle`.
    pub ex: f32,
    /// Advance of the `0` glyph, used by `ch`.
    pub ch: f32,
}

/// Measures fonts and strings for the layout engine.
///
/// Implementations must return identical results for identical inputs.
pub trait VisualContext {
    /// Vertical metrics for a font.
    fn font_metrics(&self, font: &FontSpec) -> FontMetrics;

    /// Advance width of a string set in the given font.
    fn string_width(&self, font: &FontSpec, text: &str) -> f32;
}

/// Approximate metrics using fixed ratios.
///
/// Without access to real font data every glyph advances by a fixed
/// fraction of the font size. The average advance width of Latin glyphs in
/// a proportional font is about 0.6 times the font size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApproximateVisualContext {
    /// Advance width of every character as a fraction of the font size.
    pub advance_ratio: f32,
    /// Ascent as a fraction of the font size. The descent is the remainder.
    pub ascent_ratio: f32,
}

impl Default for ApproximateVisualContext {
    fn default() -> Self {
        ApproximateVisualContext {
            advance_ratio: 0.6,
            ascent_ratio: 0.8,
        }
    }
}

impl VisualContext for ApproximateVisualContext {
    fn font_metrics(&self, font: &FontSpec) -> FontMetrics {
        let ascent = font.size * self.ascent_ratio;
        FontMetrics {
            size: font.size,
            ascent,
            descent: font.size - ascent,
            height: font.size,
            ex: font.size * 0.5,
            ch: font.size * self.advance_ratio,
        }
    }

    fn string_width(&self, font: &FontSpec, text: &str) -> f32 {
        text.chars().count() as f32 * font.size * self.advance_ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approximate_metrics_are_proportional() {
        let ctx = ApproximateVisualContext::default();
        let font = FontSpec {
            family: "serif".to_string(),
            size: 10.0,
            ..FontSpec::default()
        };
        assert!((ctx.string_width(&font, "abcd") - 24.0).abs() < 0.001);
        let m = ctx.font_metrics(&font);
        assert_eq!(m.ascent + m.descent, m.height);
        assert_eq!(m.height, 10.0);
    }
}
