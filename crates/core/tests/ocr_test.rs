//! Tests for the OCR line adapter.

use pdfgrid_core::LayoutOptions;
use pdfgrid_core::ocr::{OcrLine, PageSize, ocr_line_groups, render_ocr, rotate_polygon};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

fn line(text: &str, x0: f64, y0: f64, x1: f64, y1: f64) -> OcrLine {
    OcrLine::new(text, vec![x0, y0, x1, y0, x1, y1, x0, y1])
}

#[test]
fn test_empty_page_is_empty_string() {
    assert_eq!(render_ocr(&[], 0.0, None, &LayoutOptions::default()), "");
    assert_eq!(
        render_ocr(&[], 90.0, Some(PageSize::default()), &LayoutOptions::default()),
        ""
    );
}

#[test]
fn test_lines_render_top_down() {
    let lines = [
        line("Second line", 1.0, 1.3, 2.1, 1.45),
        line("Hello world", 1.0, 1.0, 2.1, 1.15),
    ];
    let page = render_ocr(&lines, 0.0, None, &LayoutOptions::default());
    assert_eq!(page, "Hello world\nSecond line");
}

#[test]
fn test_rotation_below_threshold_ignored() {
    let opts = LayoutOptions::default().with_min_rotation_degrees(1.0);
    let lines = [line("tilted", 1.0, 2.0, 3.0, 2.2)];

    let groups = ocr_line_groups(&lines, 0.5, None, &opts);
    assert!(close(groups[0].y, 200.0));
    assert!(close(groups[0].font_height, 20.0));
    assert!(close(groups[0].displaced_x, 200.0));
}

#[test]
fn test_quarter_turn_rotates_about_centre() {
    let opts = LayoutOptions::default().with_min_rotation_degrees(1.0);
    let size = PageSize::default();
    let polygon = [1.0, 2.0, 3.0, 2.0, 3.0, 2.2, 1.0, 2.2];

    // a page reported at 90 degrees is turned back by -90: (x, y) -> (y, w - x)
    let rotated = rotate_polygon(&polygon, -90.0, size, opts.min_rotation_degrees);
    let expected = [2.0, 7.5, 2.0, 5.5, 2.2, 5.5, 2.2, 7.5];
    for (got, want) in rotated.iter().zip(expected) {
        assert!(close(*got, want), "{rotated:?}");
    }

    let lines = [OcrLine::new("turned", polygon.to_vec())];
    let groups = ocr_line_groups(&lines, 90.0, Some(size), &opts);
    assert!(close(groups[0].y, 750.0));
    assert_eq!(groups[0].x, 0.0);
}

#[test]
fn test_positions_scaled_and_shifted() {
    let opts = LayoutOptions::default().with_ocr_positioning_scale(10.0);
    let lines = [line("b", 3.0, 1.0, 3.5, 1.2), line("a", 1.0, 1.0, 1.5, 1.2)];
    let groups = ocr_line_groups(&lines, 0.0, None, &opts);
    let xs: Vec<_> = groups.iter().map(|g| g.x).collect();
    assert_eq!(xs, [20.0, 0.0]);
    assert!(groups.iter().all(|g| g.flip_sort == -1));
}
