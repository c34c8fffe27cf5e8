//! Placement of one decoded text run.
//!
//! A [`TextRun`] is created for every string shown by `Tj`, `TJ`, `'` or
//! `"`. It records where the run starts on the page, where the pen ends up
//! after it, and the scalars the folding heuristics need.

use crate::font::Font;
use crate::model::TextState;
use crate::utils::{FLIP_EPSILON, Matrix, mult_matrix, round_to, translation};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct TextRun {
    /// Decoded text
    pub text: String,
    /// Font the run was shown with
    pub font: Arc<Font>,
    /// Font size x text matrix (glyph origin in page space)
    pub render_matrix: Matrix,
    /// Text matrix after the run's own advance
    pub displaced_matrix: Matrix,
    /// Horizontal text-space advance of the run
    pub advance: f64,
    /// Page-space advance of one space glyph
    pub space_tx: f64,
    /// Effective font height in page space
    pub font_height: f64,
    /// True when the text matrix flips the page vertically
    pub flip_vertical: bool,
}

impl TextRun {
    /// Place `text` using the current text state and composed text matrix.
    pub fn new(text: String, font: Arc<Font>, state: &TextState, xform: Matrix) -> Self {
        let advance = word_tx(&text, &font, state);
        let font_size_matrix = (
            state.fontsize * state.hscale(),
            0.0,
            0.0,
            state.fontsize,
            0.0,
            state.rise,
        );
        let (a, b, _, d, _, _) = xform;
        Self {
            render_matrix: mult_matrix(font_size_matrix, xform),
            displaced_matrix: mult_matrix(translation(advance, 0.0), xform),
            space_tx: round_to(word_tx(" ", &font, state) * a, 3),
            font_height: state.fontsize * b.hypot(d),
            flip_vertical: d < -FLIP_EPSILON,
            advance,
            text,
            font,
        }
    }

    /// Page x of the first glyph.
    pub fn x(&self) -> f64 {
        self.render_matrix.4
    }

    /// Page y of the baseline.
    pub fn y(&self) -> f64 {
        self.render_matrix.5
    }

    /// Page x after the last glyph.
    pub fn displaced_x(&self) -> f64 {
        self.displaced_matrix.4
    }
}

/// Horizontal text-space displacement of `word` under the given state:
/// glyph widths scaled by font size, plus character spacing per glyph and
/// word spacing per space, all scaled horizontally.
pub fn word_tx(word: &str, font: &Font, state: &TextState) -> f64 {
    let glyphs = word.chars().count() as f64;
    let spaces = word.chars().filter(|&c| c == ' ').count() as f64;
    (state.fontsize * font.word_width(word) / 1000.0
        + state.charspace * glyphs
        + state.wordspace * spaces)
        * state.hscale()
}

/// Horizontal text-space displacement of a `TJ` kerning adjustment
/// (thousandths of an em, positive moves left).
pub fn kerning_tx(adjustment: f64, state: &TextState) -> f64 {
    -adjustment / 1000.0 * state.fontsize * state.hscale()
}
