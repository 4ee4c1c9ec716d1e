//! Resolution of CSS values to pixels.
//!
//! [§ 6.1 Used Values](https://www.w3.org/TR/css-cascade-4/#used)
//!
//! "The used value is the result of taking the computed value and
//! completing any remaining calculations to make it the absolute
//! theoretical value used in the layout of the document."

use quokka_common::warning::warn_once;

use crate::style::{Angle, Length, LengthOrAuto};

use super::geometry::Dimension;
use super::visual_context::FontMetrics;

/// Resolves lengths against the font of one box and the viewport.
#[derive(Debug, Clone, Copy)]
pub struct CssDecoder<'a> {
    metrics: &'a FontMetrics,
    root_font_size: f32,
    viewport: Dimension,
}

impl<'a> CssDecoder<'a> {
    /// A decoder for a box with the given font metrics.
    #[must_use]
    pub const fn new(metrics: &'a FontMetrics, root_font_size: f32, viewport: Dimension) -> Self {
        CssDecoder {
            metrics,
            root_font_size,
            viewport,
        }
    }

    /// [§ 5 Distance Units](https://www.w3.org/TR/css-values-4/#lengths)
    ///
    /// Convert a length to pixels. Percentages resolve against `reference`.
    #[must_use]
    pub fn px(&self, length: Length, reference: f32) -> f32 {
        match length {
            Length::Px(v) => v,
            Length::Em(v) => v * self.metrics.size,
            Length::Ex(v) => v * self.metrics.ex,
            Length::Ch(v) => v * self.metrics.ch,
            Length::Rem(v) => v * self.root_font_size,
            Length::Vw(v) => v * self.viewport.width / 100.0,
            Length::Vh(v) => v * self.viewport.height / 100.0,
            Length::Vmin(v) => v * self.viewport.width.min(self.viewport.height) / 100.0,
            Length::Vmax(v) => v * self.viewport.width.max(self.viewport.height) / 100.0,
            Length::Pt(v) => v * 96.0 / 72.0,
            Length::Pc(v) => v * 16.0,
            Length::In(v) => v * 96.0,
            Length::Cm(v) => v * 96.0 / 2.54,
            Length::Mm(v) => v * 96.0 / 25.4,
            Length::Q(v) => v * 96.0 / 101.6,
            Length::Percent(p) => p * reference / 100.0,
        }
    }

    /// Resolve a possibly missing, possibly `auto` value.
    ///
    /// - `None` resolves to `default`.
    /// - `auto` resolves to `auto_value`.
    /// - percentages resolve against `reference`.
    #[must_use]
    pub fn length(
        &self,
        value: Option<LengthOrAuto>,
        default: f32,
        auto_value: f32,
        reference: f32,
    ) -> f32 {
        match value {
            None => default,
            Some(LengthOrAuto::Auto) => auto_value,
            Some(LengthOrAuto::Length(len)) => self.px(len, reference),
        }
    }
}

/// [§ 7.1 Angle Units](https://www.w3.org/TR/css-values-4/#angles)
///
/// Convert an angle to degrees.
#[must_use]
pub fn angle_degrees(angle: Angle) -> f32 {
    match angle {
        Angle::Deg(v) => v,
        Angle::Grad(v) => v * 360.0 / 400.0,
        Angle::Rad(v) => v.to_degrees(),
        Angle::Turn(v) => v * 360.0,
    }
}

/// Size constraints for a replaced element, resolved to pixels.
///
/// `width` and `height` are `None` when the computed value is `auto`.
/// Maximum sizes are `None` when the computed value is `none`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReplacedConstraints {
    /// Used `width`, or `None` for `auto`.
    pub width: Option<f32>,
    /// Used `height`, or `None` for `auto`.
    pub height: Option<f32>,
    /// Used `min-width`.
    pub min_width: f32,
    /// Used `max-width`.
    pub max_width: Option<f32>,
    /// Used `min-height`.
    pub min_height: f32,
    /// Used `max-height`.
    pub max_height: Option<f32>,
}

impl Default for ReplacedConstraints {
    fn default() -> Self {
        ReplacedConstraints {
            width: None,
            height: None,
            min_width: 0.0,
            max_width: None,
            min_height: 0.0,
            max_height: None,
        }
    }
}

/// Size of a replaced object when nothing can be loaded.
const MISSING_OBJECT_SIZE: f32 = 20.0;

/// [§ 10.3.2 Inline, replaced elements](https://www.w3.org/TR/CSS2/visudet.html#inline-replaced-width)
/// [§ 10.6.2 Inline replaced elements](https://www.w3.org/TR/CSS2/visudet.html#inline-replaced-height)
///
/// Compute the content size of a replaced element.
///
/// `intrinsic` is `None` when the object is missing. `attrs` holds the
/// HTML `width`/`height` attribute values; they are used first and then
/// overridden by the CSS values in `css`.
#[must_use]
pub fn compute_replaced_object_size(
    intrinsic: Option<Dimension>,
    attrs: (Option<f32>, Option<f32>),
    css: &ReplacedConstraints,
) -> Dimension {
    // STEP 1: Intrinsic dimensions and ratio.
    let (intw, inth) = match intrinsic {
        Some(size) if size.width <= 0.0 || size.height <= 0.0 => {
            warn_once(
                "layout",
                "replaced object reports a zero intrinsic size, using 1x1",
            );
            (1.0, 1.0)
        }
        Some(size) => (size.width, size.height),
        None => (MISSING_OBJECT_SIZE, MISSING_OBJECT_SIZE),
    };
    let mut ratio = intw / inth;

    // STEP 2: HTML attributes. Both present sets a new ratio.
    let (mut w, mut h) = match attrs {
        (None, None) => (intw, inth),
        (None, Some(ah)) => ((ratio * ah).round(), ah),
        (Some(aw), None) => (aw, (aw / ratio).round()),
        (Some(aw), Some(ah)) => {
            if aw > 0.0 && ah > 0.0 {
                ratio = aw / ah;
            }
            (aw, ah)
        }
    };

    // STEP 3: CSS width and height.
    //
    // "if 'height' and 'width' both have computed values of 'auto' and the
    // element also has an intrinsic width, then that intrinsic width is the
    // used value of 'width'."
    //
    // "Otherwise, if 'width' has a computed value of 'auto', and the element
    // has an intrinsic ratio then the used value of 'width' is:
    // (used height) * (intrinsic ratio)"
    match (css.width, css.height) {
        (None, Some(ch)) => {
            h = ch;
            w = (ratio * h).round();
        }
        (Some(cw), None) => {
            w = cw;
            h = (w / ratio).round();
        }
        (Some(cw), Some(ch)) => {
            w = cw;
            h = ch;
        }
        (None, None) => {}
    }

    // STEP 4: Minimum and maximum sizes.
    let both_auto = css.width.is_none() && css.height.is_none();
    let (w, h) = apply_replaced_min_max(w, h, css, both_auto);
    Dimension::new(w.max(0.0), h.max(0.0))
}

/// [§ 10.4 Minimum and maximum widths](https://www.w3.org/TR/CSS2/visudet.html#min-max-widths)
///
/// "for replaced elements with an intrinsic ratio and both 'width' and
/// 'height' specified as 'auto', the algorithm is as follows: Select from
/// the table the resolved height and width values for the appropriate
/// constraint violation."
fn apply_replaced_min_max(w: f32, h: f32, css: &ReplacedConstraints, both_auto: bool) -> (f32, f32) {
    let min_w = css.min_width.max(0.0);
    let min_h = css.min_height.max(0.0);
    // "take the max-width and max-height as max(min, max) so that min ≤ max holds true."
    let max_w = css.max_width.map_or(f32::INFINITY, |m| m.max(min_w));
    let max_h = css.max_height.map_or(f32::INFINITY, |m| m.max(min_h));

    if !both_auto || w <= 0.0 || h <= 0.0 {
        return (w.clamp(min_w, max_w), h.clamp(min_h, max_h));
    }

    let (wide, narrow, tall, short) = (w > max_w, w < min_w, h > max_h, h < min_h);
    if wide && tall {
        if max_w / w <= max_h / h {
            (max_w, min_h.max(max_w * h / w))
        } else {
            (min_w.max(max_h * w / h), max_h)
        }
    } else if narrow && short {
        if min_w / w <= min_h / h {
            (max_w.min(min_h * w / h), min_h)
        } else {
            (min_w, max_h.min(min_w * h / w))
        }
    } else if wide && short {
        (max_w, min_h)
    } else if narrow && tall {
        (min_w, max_h)
    } else if wide {
        (max_w, (max_w * h / w).max(min_h))
    } else if narrow {
        (min_w, (min_w * h / w).min(max_h))
    } else if tall {
        ((max_h * w / h).max(min_w), max_h)
    } else if short {
        ((min_h * w / h).min(max_w), min_h)
    } else {
        (w, h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> FontMetrics {
        FontMetrics {
            size: 16.0,
            ascent: 12.8,
            descent: 3.2,
            height: 16.0,
            ex: 8.0,
            ch: 9.6,
        }
    }

    #[test]
    fn test_length_auto_default_and_percent() {
        let m = metrics();
        let dec = CssDecoder::new(&m, 16.0, Dimension::new(800.0, 600.0));
        assert_eq!(dec.length(None, 7.0, 3.0, 200.0), 7.0);
        assert_eq!(dec.length(Some(LengthOrAuto::Auto), 7.0, 3.0, 200.0), 3.0);
        assert_eq!(
            dec.length(Some(LengthOrAuto::Length(Length::Percent(25.0))), 0.0, 0.0, 200.0),
            50.0
        );
        assert_eq!(dec.px(Length::Em(2.0), 0.0), 32.0);
        assert_eq!(dec.px(Length::Vw(10.0), 0.0), 80.0);
        assert_eq!(dec.px(Length::In(1.0), 0.0), 96.0);
    }

    #[test]
    fn test_angles() {
        assert_eq!(angle_degrees(Angle::Turn(0.5)), 180.0);
        assert_eq!(angle_degrees(Angle::Grad(100.0)), 90.0);
    }

    #[test]
    fn test_replaced_size_keeps_ratio() {
        let intrinsic = Some(Dimension::new(200.0, 100.0));
        let css = ReplacedConstraints {
            width: Some(100.0),
            ..ReplacedConstraints::default()
        };
        let size = compute_replaced_object_size(intrinsic, (None, None), &css);
        assert_eq!(size, Dimension::new(100.0, 50.0));

        let size = compute_replaced_object_size(intrinsic, (None, Some(50.0)), &ReplacedConstraints::default());
        assert_eq!(size, Dimension::new(100.0, 50.0));
    }

    #[test]
    fn test_missing_object_falls_back_to_twenty_pixels() {
        let size = compute_replaced_object_size(None, (None, None), &ReplacedConstraints::default());
        assert_eq!(size, Dimension::new(20.0, 20.0));
    }

    #[test]
    fn test_max_width_and_min_height_violation() {
        // wide and short at the same time resolves to (max-width, min-height)
        let css = ReplacedConstraints {
            max_width: Some(100.0),
            min_height: 80.0,
            ..ReplacedConstraints::default()
        };
        let size = compute_replaced_object_size(Some(Dimension::new(400.0, 40.0)), (None, None), &css);
        assert_eq!(size, Dimension::new(100.0, 80.0));
    }

    #[test]
    fn test_single_max_width_violation_scales_height() {
        let css = ReplacedConstraints {
            max_width: Some(100.0),
            ..ReplacedConstraints::default()
        };
        let size = compute_replaced_object_size(Some(Dimension::new(400.0, 200.0)), (None, None), &css);
        assert_eq!(size, Dimension::new(100.0, 50.0));
    }
}
