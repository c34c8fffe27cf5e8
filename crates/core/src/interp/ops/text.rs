//! Text operators.
//!
//! Handles: BT, ET, Tc, Tw, Tz, TL, Tf, Ts, Td, TD, Tm, T*, Tj, TJ, ', "
//!
//! Text object:
//! - BT/ET: Begin/end text object
//!
//! Text state:
//! - Tc: Character spacing
//! - Tw: Word spacing
//! - Tz: Horizontal scaling
//! - TL: Leading
//! - Tf: Font and size
//! - Ts: Rise (baseline offset)
//!
//! Text positioning:
//! - Td/TD: Move to next line (TD also sets leading)
//! - Tm: Set the line matrix directly
//! - T*: Move to next line using current leading
//!
//! Text showing:
//! - Tj: Show string
//! - TJ: Show with individual glyph positioning
//! - ': Move to next line and show
//! - ": Set spacing, move to next line, and show

use crate::error::Result;
use crate::interp::interpreter::{ContentInterpreter, TextSeqItem};
use crate::interp::run::kerning_tx;
use crate::utils::Matrix;
use std::sync::Arc;

#[allow(non_snake_case)]
impl<'a> ContentInterpreter<'a> {
    // ========================================================================
    // Text Object Operators
    // ========================================================================

    /// BT - Begin text object.
    ///
    /// Resets the line matrix and run offset to identity.
    pub fn do_BT(&mut self) {
        self.open_text_frame();
    }

    /// ET - End text object.
    ///
    /// Folds the object's runs into line groups. Ignored unless the text
    /// object is the innermost open frame.
    pub fn do_ET(&mut self) {
        if !self.close_innermost(true) {
            tracing::debug!(
                depth = self.depth(),
                "ET does not close the innermost frame, ignoring"
            );
        }
    }

    // ========================================================================
    // Text State Operators
    // ========================================================================

    /// Tc - Set character spacing, added after every glyph.
    pub fn do_Tc(&mut self, charspace: f64) {
        self.textstate.charspace = charspace;
    }

    /// Tw - Set word spacing, added after every space.
    pub fn do_Tw(&mut self, wordspace: f64) {
        self.textstate.wordspace = wordspace;
    }

    /// Tz - Set horizontal scaling (percentage, 100 = normal width).
    pub fn do_Tz(&mut self, scaling: f64) {
        self.textstate.scaling = scaling;
    }

    /// TL - Set text leading, used by T*, ' and ".
    pub fn do_TL(&mut self, leading: f64) {
        self.textstate.leading = leading;
    }

    /// Tf - Set text font and size.
    ///
    /// An unknown resource name is remembered so the next show operator can
    /// report it.
    pub fn do_Tf(&mut self, fontid: &str, fontsize: f64) {
        let fontid = fontid.trim_start_matches('/');
        self.textstate.font = self.fonts.get(fontid).map(Arc::clone);
        if self.textstate.font.is_none() {
            tracing::debug!(font = fontid, "font resource not in page font map");
        }
        self.textstate.fontname = Some(fontid.to_string());
        self.textstate.fontsize = fontsize;
    }

    /// Ts - Set text rise (superscript/subscript offset).
    pub fn do_Ts(&mut self, rise: f64) {
        self.textstate.rise = rise;
    }

    // ========================================================================
    // Text Positioning Operators
    // ========================================================================

    /// Td - Move to the start of the next line, offset by (tx, ty).
    pub fn do_Td(&mut self, tx: f64, ty: f64) {
        self.xform.translate_line(tx, ty);
    }

    /// TD - Like Td, and set leading to -ty.
    pub fn do_TD(&mut self, tx: f64, ty: f64) {
        self.textstate.leading = -ty;
        self.xform.translate_line(tx, ty);
    }

    /// Tm - Replace the line matrix.
    pub fn do_Tm(&mut self, matrix: Matrix) {
        self.xform.set_line_matrix(matrix);
    }

    /// T* - Move to the start of the next line using the stored leading.
    pub fn do_T_star(&mut self) {
        let leading = self.textstate.leading;
        self.xform.translate_line(0.0, -leading);
    }

    // ========================================================================
    // Text Showing Operators
    // ========================================================================

    /// Tj - Show a string.
    pub fn do_Tj(&mut self, s: &[u8]) -> Result<()> {
        self.show_string("Tj", s)
    }

    /// TJ - Show strings with kerning adjustments.
    ///
    /// Each string becomes its own run; numbers move the pen left by
    /// thousandths of an em and are never rendered.
    pub fn do_TJ(&mut self, seq: Vec<TextSeqItem>) -> Result<()> {
        for item in seq {
            match item {
                TextSeqItem::Number(adjustment) => {
                    let tx = kerning_tx(adjustment, &self.textstate);
                    self.xform.advance(tx);
                }
                TextSeqItem::Bytes(s) => self.show_string("TJ", &s)?,
            }
        }
        Ok(())
    }

    /// ' - Move to the next line and show a string.
    pub fn do_quote(&mut self, s: &[u8]) -> Result<()> {
        self.do_T_star();
        self.show_string("'", s)
    }

    /// " - Set word and character spacing, move to the next line and show.
    pub fn do_doublequote(&mut self, aw: f64, ac: f64, s: &[u8]) -> Result<()> {
        self.textstate.wordspace = aw;
        self.textstate.charspace = ac;
        self.do_T_star();
        self.show_string("\"", s)
    }
}
