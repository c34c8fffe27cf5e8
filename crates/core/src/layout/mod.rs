//! Layout of line groups as fixed-width page text.
//!
//! This module contains:
//! - Layout parameters (LayoutOptions)
//! - Line groups and run folding
//! - Bucketing of groups into rendered lines
//! - Fixed-width composition
//!
//! Both producers (embedded text and OCR) hand their line groups to
//! [`layout_page`], which does not care where they came from.

pub mod fixed_width;
pub mod grouping;
pub mod line_group;
pub mod params;

pub use fixed_width::{fixed_char_width, fixed_width_page};
pub use grouping::{PageLineBucket, normalize_groups, y_coordinate_groups};
pub use line_group::{LineGroup, fold_runs};
pub use params::LayoutOptions;

/// Render one page's line groups as fixed-width text.
///
/// Returns an empty string when there are no groups, or when the rendered
/// page exceeds `max_chars_per_page`.
pub fn layout_page(mut groups: Vec<LineGroup>, opts: &LayoutOptions) -> String {
    groups.retain(LineGroup::has_text);
    if groups.is_empty() {
        return String::new();
    }
    normalize_groups(&mut groups);
    let char_width = fixed_char_width(&groups, opts.scale_weight);
    let buckets = y_coordinate_groups(groups);
    tracing::debug!(buckets = buckets.len(), char_width, "composing page");

    let page = fixed_width_page(&buckets, char_width, opts);
    if opts.max_chars_per_page > 0 {
        let chars = page.chars().count();
        if chars > opts.max_chars_per_page {
            tracing::warn!(
                chars,
                limit = opts.max_chars_per_page,
                "discarding page text over the character limit"
            );
            return String::new();
        }
    }
    page
}
