//! Fixed-width composition.
//!
//! Renders bucketed line groups onto a uniform character grid: every group
//! is placed at the column its x coordinate quantizes to, using one average
//! character width for the whole page.

use super::grouping::{PageLineBucket, key_distance};
use super::line_group::LineGroup;
use super::params::LayoutOptions;

/// Average character width weighted by each group's scaled text length.
///
/// Returns NaN when no group carries any text.
pub fn fixed_char_width<'a, I>(groups: I, scale_weight: f64) -> f64
where
    I: IntoIterator<Item = &'a LineGroup>,
{
    let mut weighted = 0.0;
    let mut total_len = 0.0;
    for group in groups {
        let len = group.text.chars().count() as f64 * scale_weight;
        if len == 0.0 {
            continue;
        }
        let width = (group.displaced_x - group.x) / len;
        weighted += width * len;
        total_len += len;
    }
    weighted / total_len
}

/// Replace control characters other than tab and newline with spaces.
fn sanitize(line: String) -> String {
    if !line.chars().any(is_blanked_control) {
        return line;
    }
    line.chars()
        .map(|c| if is_blanked_control(c) { ' ' } else { c })
        .collect()
}

fn is_blanked_control(c: char) -> bool {
    (c as u32) < 32 && c != '\t' && c != '\n'
}

/// Clamp a padding or blank-line count. With the character guard on, any
/// count past the limit already discards the page, so it stops one past it.
fn fill_count(count: i64, opts: &LayoutOptions) -> usize {
    let count = usize::try_from(count).unwrap_or(0);
    match opts.max_chars_per_page {
        0 => count,
        limit => count.min(limit.saturating_add(1)),
    }
}

/// Lay out buckets as fixed-width page text.
///
/// A `char_width` that is zero, negative or not finite places every group at
/// column 0.
pub fn fixed_width_page(
    buckets: &[PageLineBucket],
    char_width: f64,
    opts: &LayoutOptions,
) -> String {
    let usable_width = char_width.is_finite() && char_width > 0.0;
    if !usable_width {
        tracing::warn!(char_width, "degenerate character width, placing groups at column 0");
    }
    let half_char = if usable_width { char_width / 2.0 } else { 0.0 };

    let mut lines: Vec<String> = Vec::new();
    let mut last_key = 0i64;
    for bucket in buckets {
        if opts.preserve_vertical_whitespace && !lines.is_empty() {
            let line_height = bucket.leading_font_height() * opts.font_height_weight;
            if line_height > 0.0 {
                let gap = key_distance(bucket.key, last_key);
                let blank_lines = fill_count((gap / line_height).floor() as i64 - 1, opts);
                lines.extend(std::iter::repeat_n(String::new(), blank_lines));
            }
        }

        let mut line = String::new();
        let mut last_disp = 0.0;
        for group in &bucket.groups {
            let column = if usable_width {
                (group.x / char_width).floor() as i64
            } else {
                0
            };
            if (last_disp + half_char).round_ties_even() < group.x.round_ties_even() {
                let pad = fill_count(column - line.chars().count() as i64, opts);
                line.extend(std::iter::repeat_n(' ', pad));
            }
            line.push_str(&group.text);
            last_disp = group.displaced_x;
        }

        if !line.trim().is_empty() || !lines.is_empty() {
            lines.push(sanitize(line));
        }
        last_key = bucket.key;
    }

    lines
        .iter()
        .filter(|ln| opts.preserve_vertical_whitespace || !ln.trim().is_empty())
        .map(|ln| ln.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}
