//! Layout engine configuration.

use serde::Deserialize;

use crate::error::Result;
use crate::style::DEFAULT_FONT_SIZE_PX;

/// Switches and defaults that shape box construction and layout.
///
/// Every field has a default, so a JSON document only needs to name the
/// fields it changes:
///
/// ```
/// use quokka_css::LayoutConfig;
///
/// let config = LayoutConfig::from_json(r#"{ "clip_viewport": true }"#).unwrap();
/// assert!(config.clip_viewport);
/// assert!(config.use_html);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Apply HTML-specific behavior: default display values for elements,
    /// `<img>`/`<object>` replaced boxes and the `body` background
    /// propagation to the viewport.
    pub use_html: bool,
    /// Clip all content to the initial viewport size instead of growing the
    /// canvas to enclose overflowing content.
    pub clip_viewport: bool,
    /// Render the `alt` text of images instead of the images themselves.
    pub replace_images_with_alt: bool,
    /// Ask the content source for intrinsic sizes of replaced elements.
    /// When off, every replaced element is treated as missing.
    pub load_images: bool,
    /// Font size of the root element in pixels.
    pub default_font_size: f32,
    /// Font family of the root element.
    pub default_font_family: String,
    /// Multiplier applied to the font height for `line-height: normal`.
    pub line_height_factor: f32,
    /// Generate marker boxes for `display: list-item`.
    pub generate_markers: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            use_html: true,
            clip_viewport: false,
            replace_images_with_alt: false,
            load_images: true,
            default_font_size: DEFAULT_FONT_SIZE_PX,
            default_font_family: "serif".to_string(),
            line_height_factor: 1.12,
            generate_markers: true,
        }
    }
}

impl LayoutConfig {
    /// Parse a configuration from JSON. Missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`crate::LayoutError::Config`] if the text is not valid JSON
    /// or a field has the wrong type.
    pub fn from_json(text: &str) -> Result<Self> {
        let config = serde_json::from_str(text)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LayoutError;

    #[test]
    fn test_empty_object_gives_defaults() {
        let config = LayoutConfig::from_json("{}").unwrap();
        assert_eq!(config, LayoutConfig::default());
    }

    #[test]
    fn test_fields_override_defaults() {
        let config =
            LayoutConfig::from_json(r#"{ "default_font_size": 12.0, "use_html": false }"#).unwrap();
        assert!((config.default_font_size - 12.0).abs() < f32::EPSILON);
        assert!(!config.use_html);
        assert_eq!(config.default_font_family, "serif");
    }

    #[test]
    fn test_wrong_type_is_config_error() {
        let err = LayoutConfig::from_json(r#"{ "clip_viewport": "yes" }"#).unwrap_err();
        assert!(matches!(err, LayoutError::Config(_)));
    }
}
