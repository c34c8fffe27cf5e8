//! Tests for line grouping and fixed-width composition.

use pdfgrid_core::layout::{
    LayoutOptions, LineGroup, layout_page, normalize_groups, y_coordinate_groups,
};

/// Group whose glyphs are all 6 units wide.
fn group(text: &str, x: f64, y: f64, font_height: f64) -> LineGroup {
    LineGroup {
        x,
        y,
        font_height,
        text: text.to_string(),
        displaced_x: x + 6.0 * text.chars().count() as f64,
        flip_sort: 1,
    }
}

#[test]
fn test_leftmost_group_starts_at_zero() {
    let mut groups = vec![
        group("right", 300.0, 700.0, 10.0),
        group("left", 72.5, 650.0, 10.0),
        group("middle", 180.0, 600.0, 10.0),
    ];
    normalize_groups(&mut groups);
    let min_x = groups.iter().map(|g| g.x).fold(f64::INFINITY, f64::min);
    assert_eq!(min_x, 0.0);
    assert_eq!(groups[0].displaced_x, 300.0 - 72.5 + 30.0);
}

#[test]
fn test_lines_top_to_bottom() {
    let groups = vec![
        group("third", 0.0, 500.0, 10.0),
        group("first", 0.0, 700.0, 10.0),
        group("second", 0.0, 600.0, 10.0),
    ];
    let page = layout_page(groups, &LayoutOptions::default());
    assert_eq!(page, "first\nsecond\nthird");
}

#[test]
fn test_mixed_font_jitter_merges() {
    let label = group("Name:", 0.0, 700.0, 12.0);
    let value = LineGroup {
        displaced_x: 61.0,
        ..group("Smith", 36.0, 698.5, 9.0)
    };
    let buckets = y_coordinate_groups(vec![label.clone(), value.clone()]);
    assert_eq!(buckets.len(), 1);
    assert_eq!(buckets[0].groups, vec![label.clone(), value.clone()]);

    let page = layout_page(vec![value, label], &LayoutOptions::default());
    assert_eq!(page, "Name:   Smith");
}

#[test]
fn test_stacked_text_not_merged() {
    // close baselines starting in the same column: two visual lines
    let groups = vec![
        group("upper", 10.2, 700.0, 12.0),
        group("lower", 10.7, 695.0, 12.0),
    ];
    let page = layout_page(groups, &LayoutOptions::default());
    assert_eq!(page, "upper\nlower");
}

#[test]
fn test_offset_starts_merge_into_one_line() {
    let groups = vec![
        group("upper", 0.0, 700.0, 12.0),
        group("lower", 10.0, 695.0, 12.0),
    ];
    let buckets = y_coordinate_groups(groups.clone());
    assert_eq!(buckets.len(), 1);
    assert_eq!(layout_page(groups, &LayoutOptions::default()), "upperlower");
}

#[test]
fn test_blank_lines_from_vertical_gap() {
    let groups = || vec![group("a", 0.0, 700.0, 10.0), group("b", 0.0, 650.0, 10.0)];

    assert_eq!(layout_page(groups(), &LayoutOptions::default()), "a\nb");

    let opts = LayoutOptions::default().with_preserve_vertical_whitespace(true);
    assert_eq!(layout_page(groups(), &opts), "a\n\n\n\n\nb");
}

#[test]
fn test_columns_snapshot() {
    let groups = vec![
        group("Item", 0.0, 700.0, 10.0),
        group("Qty", 120.0, 700.0, 10.0),
        group("Widget", 0.0, 686.0, 10.0),
        group("4", 120.0, 686.0, 10.0),
        group("Gadget", 0.0, 672.0, 10.0),
        group("12", 120.0, 672.0, 10.0),
    ];
    let page = layout_page(groups, &LayoutOptions::default());
    insta::assert_snapshot!(page, @r"
Item                     Qty
Widget                   4
Gadget                   12
");
}

#[test]
fn test_scale_weight_narrows_columns() {
    let groups = || vec![group("Item", 0.0, 700.0, 10.0), group("Qty", 120.0, 700.0, 10.0)];
    let wide = layout_page(groups(), &LayoutOptions::default().with_scale_weight(1.0));
    let narrow = layout_page(groups(), &LayoutOptions::default().with_scale_weight(2.0));
    assert!(narrow.len() > wide.len());
}
