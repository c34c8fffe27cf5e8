//! Bucketing line groups into rendered lines.
//!
//! Groups are keyed by their quantized baseline and adjacent buckets are
//! merged when they sit within one font height of each other and no two of
//! their groups start in the same column. This absorbs baseline jitter between fonts
//! mixed on one visual line.

use super::line_group::LineGroup;
use rustc_hash::FxHashSet;
use std::cmp::Ordering;

/// Line groups sharing one quantized vertical key, ordered left to right.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLineBucket {
    /// floor(y x flip_sort) of the bucket's first group
    pub key: i64,
    pub groups: Vec<LineGroup>,
}

impl PageLineBucket {
    fn new(key: i64, group: LineGroup) -> Self {
        Self {
            key,
            groups: vec![group],
        }
    }

    /// Font height of the leftmost group.
    pub fn leading_font_height(&self) -> f64 {
        self.groups.first().map_or(0.0, |g| g.font_height)
    }

    fn sort_by_x(&mut self) {
        self.groups.sort_by(|a, b| a.x.total_cmp(&b.x));
    }

    /// Integer start columns of the non-blank groups of this bucket.
    fn start_columns(&self) -> FxHashSet<i64> {
        self.groups
            .iter()
            .filter(|g| g.has_text())
            .map(|g| g.x.trunc() as i64)
            .collect()
    }
}

/// Vertical distance between two bucket keys, without integer overflow.
pub(crate) fn key_distance(a: i64, b: i64) -> f64 {
    a.abs_diff(b) as f64
}

fn compare_reading_order(a: &LineGroup, b: &LineGroup) -> Ordering {
    b.sort_y()
        .total_cmp(&a.sort_y())
        .then_with(|| a.x.total_cmp(&b.x))
}

/// Order groups top to bottom then left to right, and shift every group so
/// the leftmost one starts at x = 0.
pub fn normalize_groups(groups: &mut [LineGroup]) {
    groups.sort_by(compare_reading_order);
    let min_x = groups.iter().map(|g| g.x).fold(f64::INFINITY, f64::min);
    if !min_x.is_finite() {
        return;
    }
    for group in groups.iter_mut() {
        group.x -= min_x;
        group.displaced_x -= min_x;
    }
}

/// Bucket reading-ordered groups by quantized baseline and merge adjacent
/// buckets that belong to the same visual line.
pub fn y_coordinate_groups(groups: Vec<LineGroup>) -> Vec<PageLineBucket> {
    let mut buckets: Vec<PageLineBucket> = Vec::new();
    for group in groups {
        let key = group.sort_y().floor() as i64;
        match buckets.last_mut() {
            Some(bucket) if bucket.key == key => bucket.groups.push(group),
            _ => buckets.push(PageLineBucket::new(key, group)),
        }
    }
    for bucket in &mut buckets {
        bucket.sort_by_x();
    }

    let mut merged: Vec<PageLineBucket> = Vec::with_capacity(buckets.len());
    let mut last_columns = FxHashSet::default();
    for bucket in buckets {
        let columns = bucket.start_columns();
        if let Some(last) = merged.last_mut() {
            let fsz = last.leading_font_height().min(bucket.leading_font_height());
            let no_overlap = columns.is_disjoint(&last_columns);
            if no_overlap && key_distance(bucket.key, last.key) < fsz {
                tracing::trace!(key = bucket.key, into = last.key, "merging line buckets");
                last.groups.extend(bucket.groups);
                last.sort_by_x();
                last_columns.extend(columns);
                continue;
            }
        }
        merged.push(bucket);
        last_columns = columns;
    }
    merged
}
