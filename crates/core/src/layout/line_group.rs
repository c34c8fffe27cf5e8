//! Folding text runs into line groups.
//!
//! All runs shown inside one text object are folded left to right into
//! [`LineGroup`]s. A new group starts when a run leaves the current line
//! vertically or jumps horizontally by more than a few space widths; small
//! horizontal gaps become padding spaces.

use crate::interp::TextRun;
use crate::layout::LayoutOptions;
use crate::utils::round_to;
use serde::{Deserialize, Serialize};

/// One visual line fragment positioned on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineGroup {
    /// x of the first glyph
    pub x: f64,
    /// Baseline y
    pub y: f64,
    pub font_height: f64,
    /// Concatenated text, never blank
    pub text: String,
    /// x after the last glyph
    pub displaced_x: f64,
    /// -1 when the page is flipped vertically, +1 otherwise
    pub flip_sort: i8,
}

impl LineGroup {
    /// Group anchored at `anchor` carrying `text`, ending at `displaced_x`.
    fn from_run(anchor: &TextRun, text: String, displaced_x: f64) -> Self {
        Self {
            x: anchor.x(),
            y: anchor.y(),
            font_height: anchor.font_height,
            text,
            displaced_x,
            flip_sort: if anchor.flip_vertical { -1 } else { 1 },
        }
    }

    /// Key used to order groups top to bottom.
    pub fn sort_y(&self) -> f64 {
        self.y * f64::from(self.flip_sort)
    }

    /// True when the text has any non-whitespace character.
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

/// Fold the runs of one text object into line groups.
pub fn fold_runs(runs: &[TextRun], opts: &LayoutOptions) -> Vec<LineGroup> {
    let Some(first) = runs.first() else {
        return Vec::new();
    };
    let mut groups = Vec::new();
    let mut anchor = first;
    let mut text = String::new();
    let mut displaced_tx = first.x();

    let mut flush = |anchor: &TextRun, text: &mut String, displaced_tx: f64| {
        let taken = std::mem::take(text);
        if !taken.trim().is_empty() {
            groups.push(LineGroup::from_run(anchor, taken, displaced_tx));
        }
    };

    for run in runs {
        if (run.y() - anchor.y()).abs() > run.font_height * opts.line_split_font_heights {
            tracing::trace!(y = run.y(), anchor_y = anchor.y(), "run starts a new line");
            flush(anchor, &mut text, displaced_tx);
            anchor = run;
        }

        if (run.x() - displaced_tx).abs() > run.space_tx * opts.max_run_gap_space_widths {
            tracing::trace!(x = run.x(), displaced_tx, "run jumps horizontally");
            flush(anchor, &mut text, displaced_tx);
            anchor = run;
            displaced_tx = run.x();
        }

        let excess_tx = round_to(run.x() - displaced_tx, 3);

        // placeholder spaces in form fields
        if run.text == " " && text.ends_with(' ') && excess_tx <= run.space_tx {
            continue;
        }

        if run.space_tx > 0.0 {
            let pad = (excess_tx / run.space_tx).floor();
            if pad >= 1.0 {
                text.extend(std::iter::repeat_n(' ', pad as usize));
            }
        }
        text.push_str(&run.text);
        displaced_tx = run.displaced_x();
    }
    flush(anchor, &mut text, displaced_tx);
    groups
}
