//! OCR line adapter.
//!
//! Converts OCR-recognized lines (text plus a four-point polygon in page
//! units, top-left origin) into [`LineGroup`]s so they go through the same
//! grouping and composition as embedded text.

use crate::layout::{LayoutOptions, LineGroup, layout_page};
use crate::utils::{apply_matrix_pt, mult_matrix, translation};
use serde::{Deserialize, Serialize};

/// Number of coordinates in a four-point polygon.
const POLYGON_LEN: usize = 8;

/// One recognized line of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrLine {
    pub text: String,
    /// Clockwise from top-left: x0 y0 x1 y1 x2 y2 x3 y3
    pub polygon: Vec<f64>,
}

impl OcrLine {
    pub fn new(text: impl Into<String>, polygon: Vec<f64>) -> Self {
        Self {
            text: text.into(),
            polygon,
        }
    }
}

/// Physical page size in the polygon's units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl Default for PageSize {
    /// US Letter, in inches.
    fn default() -> Self {
        Self {
            width: 8.5,
            height: 11.0,
        }
    }
}

/// Rotate every point of `polygon` by `angle` degrees about the page centre,
/// re-centred on the swapped page dimensions.
///
/// Angles smaller in magnitude than `min_degrees` leave the polygon as is.
pub fn rotate_polygon(polygon: &[f64], angle: f64, size: PageSize, min_degrees: f64) -> Vec<f64> {
    if angle.abs() < min_degrees {
        return polygon.to_vec();
    }
    let (sin, cos) = angle.to_radians().sin_cos();
    let (half_w, half_h) = (size.width / 2.0, size.height / 2.0);
    let rotate = mult_matrix(
        mult_matrix(translation(-half_w, -half_h), (cos, sin, -sin, cos, 0.0, 0.0)),
        translation(half_h, half_w),
    );
    polygon
        .chunks_exact(2)
        .flat_map(|pt| {
            let (x, y) = apply_matrix_pt(rotate, (pt[0], pt[1]));
            [x, y]
        })
        .collect()
}

/// Build line groups from one page of OCR lines.
///
/// `rotation` is the page angle reported by the OCR service; polygons are
/// rotated by its negation. Lines with no text or an incomplete polygon are
/// skipped.
pub fn ocr_line_groups(
    lines: &[OcrLine],
    rotation: f64,
    page_size: Option<PageSize>,
    opts: &LayoutOptions,
) -> Vec<LineGroup> {
    let size = page_size.unwrap_or_default();
    let scale = opts.ocr_positioning_scale;
    let mut groups: Vec<LineGroup> = lines
        .iter()
        .filter_map(|line| {
            if line.text.is_empty() || line.polygon.len() < POLYGON_LEN {
                tracing::debug!(
                    text = %line.text,
                    points = line.polygon.len(),
                    "skipping OCR line"
                );
                return None;
            }
            let p = rotate_polygon(&line.polygon, -rotation, size, opts.min_rotation_degrees);
            Some(LineGroup {
                x: p[0] * scale,
                y: p[1] * scale,
                font_height: (p[7] - p[1]).abs() * scale,
                text: line.text.clone(),
                displaced_x: p[2] * scale,
                flip_sort: -1,
            })
        })
        .collect();

    let min_x = groups.iter().map(|g| g.x).fold(f64::INFINITY, f64::min);
    if min_x.is_finite() {
        for group in &mut groups {
            group.x -= min_x;
            group.displaced_x -= min_x;
        }
    }
    groups
}

/// Render one page of OCR lines as fixed-width text. An empty page gives
/// an empty string.
pub fn render_ocr(
    lines: &[OcrLine],
    rotation: f64,
    page_size: Option<PageSize>,
    opts: &LayoutOptions,
) -> String {
    layout_page(ocr_line_groups(lines, rotation, page_size, opts), opts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_small_angle_not_rotated() {
        let poly = [1.0, 1.0, 3.0, 1.0, 3.0, 1.2, 1.0, 1.2];
        assert_eq!(rotate_polygon(&poly, 0.5, PageSize::default(), 1.0), poly);
    }

    #[test]
    fn test_quarter_turn() {
        let size = PageSize {
            width: 10.0,
            height: 20.0,
        };
        let rotated = rotate_polygon(&[2.0, 3.0], -90.0, size, 1e-5);
        // (x, y) -> (y, w - x)
        assert!(close(rotated[0], 3.0));
        assert!(close(rotated[1], 8.0));
    }

    #[test]
    fn test_short_polygons_and_empty_text_skipped() {
        let lines = [
            OcrLine::new("", vec![0.0; 8]),
            OcrLine::new("short", vec![0.0; 6]),
            OcrLine::new("ok", vec![1.0, 2.0, 1.5, 2.0, 1.5, 2.1, 1.0, 2.1]),
        ];
        let groups = ocr_line_groups(&lines, 0.0, None, &LayoutOptions::default());
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].x, 0.0);
        assert!(close(groups[0].displaced_x, 50.0));
        assert!(close(groups[0].font_height, 10.0));
        assert_eq!(groups[0].flip_sort, -1);
    }
}
