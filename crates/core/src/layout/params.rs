//! Layout parameters.
//!
//! Contains LayoutOptions for controlling run folding, line grouping and
//! fixed-width composition.

use serde::{Deserialize, Serialize};

/// Parameters for fixed-width layout.
///
/// Controls how runs fold into line groups, how groups collapse into
/// rendered lines, and how the page is laid out on a character grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Emit blank lines for large vertical gaps between rendered lines.
    pub preserve_vertical_whitespace: bool,

    /// Divisor applied to the font height when inferring how many blank
    /// lines a vertical gap represents.
    pub font_height_weight: f64,

    /// Multiplier applied to a group's character count when estimating the
    /// page character width. Larger values give narrower columns.
    pub scale_weight: f64,

    /// OCR page rotations smaller than this (in degrees) are ignored.
    pub min_rotation_degrees: f64,

    /// A run starts a new line group when its baseline moves by more than
    /// this many font heights from the group's first run.
    pub line_split_font_heights: f64,

    /// A run starts a new line group when it lands further than this many
    /// space widths from where the previous run ended.
    pub max_run_gap_space_widths: f64,

    /// OCR polygon coordinates are multiplied by this before layout.
    pub ocr_positioning_scale: f64,

    /// Pages longer than this many characters are discarded. 0 disables.
    pub max_chars_per_page: usize,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            preserve_vertical_whitespace: false,
            font_height_weight: 1.0,
            scale_weight: 1.25,
            min_rotation_degrees: 1e-5,
            line_split_font_heights: 1.0,
            max_run_gap_space_widths: 5.0,
            ocr_positioning_scale: 100.0,
            max_chars_per_page: 25_000,
        }
    }
}

impl LayoutOptions {
    pub fn with_preserve_vertical_whitespace(mut self, preserve: bool) -> Self {
        self.preserve_vertical_whitespace = preserve;
        self
    }

    pub fn with_font_height_weight(mut self, weight: f64) -> Self {
        self.font_height_weight = weight;
        self
    }

    pub fn with_scale_weight(mut self, weight: f64) -> Self {
        self.scale_weight = weight;
        self
    }

    pub fn with_min_rotation_degrees(mut self, degrees: f64) -> Self {
        self.min_rotation_degrees = degrees;
        self
    }

    pub fn with_line_split_font_heights(mut self, heights: f64) -> Self {
        self.line_split_font_heights = heights;
        self
    }

    pub fn with_max_run_gap_space_widths(mut self, widths: f64) -> Self {
        self.max_run_gap_space_widths = widths;
        self
    }

    pub fn with_ocr_positioning_scale(mut self, scale: f64) -> Self {
        self.ocr_positioning_scale = scale;
        self
    }

    pub fn with_max_chars_per_page(mut self, max_chars: usize) -> Self {
        self.max_chars_per_page = max_chars;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let opts: LayoutOptions =
            serde_json::from_str(r#"{"preserve_vertical_whitespace": true, "scale_weight": 2.0}"#)
                .unwrap();
        assert!(opts.preserve_vertical_whitespace);
        assert_eq!(opts.scale_weight, 2.0);
        assert_eq!(opts.font_height_weight, 1.0);
        assert_eq!(opts.max_chars_per_page, 25_000);
    }

    #[test]
    fn test_builder_setters() {
        let opts = LayoutOptions::default()
            .with_font_height_weight(0.5)
            .with_max_chars_per_page(0);
        assert_eq!(opts.font_height_weight, 0.5);
        assert_eq!(opts.max_chars_per_page, 0);
    }
}
