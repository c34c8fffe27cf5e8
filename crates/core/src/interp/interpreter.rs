//! Content stream interpreter.
//!
//! Walks a page's pre-tokenized operators, tracking graphics scopes (`q`/`Q`)
//! and text objects (`BT`/`ET`) on one explicit frame stack. Text runs
//! collected inside a text object are folded into line groups when that
//! object closes.
//!
//! `ET` and `Q` close only the innermost frame, and only when it is of their
//! kind; a closer that does not match is ignored. Whatever is still open
//! when the stream ends is closed in order.

use crate::error::{GridError, Result};
use crate::font::Font;
use crate::interp::run::TextRun;
use crate::interp::xform::TransformStack;
use crate::layout::{LayoutOptions, LineGroup, fold_runs};
use crate::model::{ContentOp, Operand, TextState};
use crate::utils::Matrix;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Page font map: resource name (without slash) -> resolved font.
pub type FontMap = FxHashMap<String, Arc<Font>>;

/// One element of a `TJ` array.
#[derive(Debug, Clone, PartialEq)]
pub enum TextSeqItem {
    /// Kerning adjustment in thousandths of an em
    Number(f64),
    /// String to show
    Bytes(Vec<u8>),
}

/// An open scope on the interpreter's frame stack.
#[derive(Debug)]
enum Frame {
    /// Graphics scope opened by `q`
    Graphics,
    /// Text object opened by `BT`, with the runs shown so far
    Text { runs: Vec<TextRun> },
}

impl Frame {
    const fn is_text(&self) -> bool {
        matches!(self, Frame::Text { .. })
    }
}

/// Interprets one page's content stream into line groups.
pub struct ContentInterpreter<'a> {
    /// Fonts available on the page
    pub(crate) fonts: &'a FontMap,
    /// Folding thresholds
    options: &'a LayoutOptions,
    /// Text state scalars and selected font
    pub textstate: TextState,
    /// Scope transforms and text positioning
    pub xform: TransformStack,
    frames: Vec<Frame>,
    groups: Vec<LineGroup>,
}

impl<'a> ContentInterpreter<'a> {
    pub fn new(fonts: &'a FontMap, options: &'a LayoutOptions) -> Self {
        Self {
            fonts,
            options,
            textstate: TextState::new(),
            xform: TransformStack::new(),
            frames: Vec::new(),
            groups: Vec::new(),
        }
    }

    fn reset(&mut self) {
        self.textstate = TextState::new();
        self.xform = TransformStack::new();
        self.frames.clear();
        self.groups.clear();
    }

    /// Interpret a full operator stream and return its line groups in
    /// the order their text objects closed.
    ///
    /// Each call starts from fresh state, so repeated calls on the same
    /// stream give identical results.
    pub fn execute(&mut self, ops: &[ContentOp]) -> Result<Vec<LineGroup>> {
        self.reset();
        for op in ops {
            let mut args = op.operands.clone();
            self.dispatch_operator(&op.operator, &mut args)?;
        }
        while let Some(frame) = self.frames.pop() {
            self.close_frame(frame);
        }
        tracing::debug!(groups = self.groups.len(), "content stream done");
        Ok(std::mem::take(&mut self.groups))
    }

    /// Number of open frames (graphics scopes and text objects).
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    // ========================================================================
    // Frame stack
    // ========================================================================

    pub(crate) fn open_graphics_frame(&mut self) {
        self.xform.push_scope();
        self.frames.push(Frame::Graphics);
    }

    pub(crate) fn open_text_frame(&mut self) {
        self.xform.reset_text();
        self.frames.push(Frame::Text { runs: Vec::new() });
    }

    /// Close the innermost frame if it is of the requested kind. Returns
    /// false, leaving the stack untouched, when it is not.
    pub(crate) fn close_innermost(&mut self, text: bool) -> bool {
        if !self.frames.last().is_some_and(|f| f.is_text() == text) {
            return false;
        }
        if let Some(frame) = self.frames.pop() {
            self.close_frame(frame);
        }
        true
    }

    fn close_frame(&mut self, frame: Frame) {
        match frame {
            Frame::Graphics => {
                self.xform.pop_scope();
            }
            Frame::Text { runs } => {
                tracing::trace!(runs = runs.len(), "folding text object");
                self.groups.extend(fold_runs(&runs, self.options));
                self.xform.reset_text();
            }
        }
    }

    /// Runs of the innermost open text object.
    fn current_runs(&mut self) -> Option<&mut Vec<TextRun>> {
        self.frames.iter_mut().rev().find_map(|frame| match frame {
            Frame::Text { runs } => Some(runs),
            Frame::Graphics => None,
        })
    }

    fn in_text_object(&self) -> bool {
        self.frames.iter().any(Frame::is_text)
    }

    /// The font to show text with, or why there is none.
    fn current_font(&self, operator: &'static str) -> Result<Arc<Font>> {
        match (&self.textstate.font, &self.textstate.fontname) {
            (Some(font), _) => Ok(Arc::clone(font)),
            (None, Some(name)) => Err(GridError::UnknownFont(name.clone())),
            (None, None) => Err(GridError::MissingFont(operator)),
        }
    }

    /// Decode and place one string, then advance past it.
    pub(crate) fn show_string(&mut self, operator: &'static str, bytes: &[u8]) -> Result<()> {
        if !self.in_text_object() {
            tracing::debug!(operator, "text shown outside a text object, ignoring");
            return Ok(());
        }
        let font = self.current_font(operator)?;
        let text = font.decode(bytes);
        let run = TextRun::new(text, font, &self.textstate, self.xform.text_matrix());
        tracing::trace!(text = %run.text, x = run.x(), y = run.y(), "text run");
        self.xform.advance(run.advance);
        if let Some(runs) = self.current_runs() {
            runs.push(run);
        }
        Ok(())
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    fn dispatch_operator(&mut self, op: &str, args: &mut Vec<Operand>) -> Result<()> {
        match op {
            // Graphics state
            "q" => self.do_q(),
            "Q" => self.do_Q(),
            "cm" => match Self::pop_matrix(args) {
                Some(m) => self.do_cm(m),
                None => Self::skip_malformed(op, args),
            },

            // Text objects
            "BT" => self.do_BT(),
            "ET" => self.do_ET(),

            // Text state
            "Tc" => match Self::pop_number(args) {
                Some(v) => self.do_Tc(v),
                None => Self::skip_malformed(op, args),
            },
            "Tw" => match Self::pop_number(args) {
                Some(v) => self.do_Tw(v),
                None => Self::skip_malformed(op, args),
            },
            "Tz" => match Self::pop_number(args) {
                Some(v) => self.do_Tz(v),
                None => Self::skip_malformed(op, args),
            },
            "TL" => match Self::pop_number(args) {
                Some(v) => self.do_TL(v),
                None => Self::skip_malformed(op, args),
            },
            "Ts" => match Self::pop_number(args) {
                Some(v) => self.do_Ts(v),
                None => Self::skip_malformed(op, args),
            },
            "Tf" => {
                let size = Self::pop_number(args);
                let name = Self::pop_name(args);
                match (name, size) {
                    (Some(name), Some(size)) => self.do_Tf(&name, size),
                    _ => Self::skip_malformed(op, args),
                }
            }

            // Text positioning
            "Td" => match Self::pop_point(args) {
                Some((tx, ty)) => self.do_Td(tx, ty),
                None => Self::skip_malformed(op, args),
            },
            "TD" => match Self::pop_point(args) {
                Some((tx, ty)) => self.do_TD(tx, ty),
                None => Self::skip_malformed(op, args),
            },
            "Tm" => match Self::pop_matrix(args) {
                Some(m) => self.do_Tm(m),
                None => Self::skip_malformed(op, args),
            },
            "T*" => self.do_T_star(),

            // Text showing
            "Tj" => match Self::pop_string(args) {
                Some(s) => self.do_Tj(&s)?,
                None => Self::skip_malformed(op, args),
            },
            "TJ" => match Self::pop_text_seq(args) {
                Some(seq) => self.do_TJ(seq)?,
                None => Self::skip_malformed(op, args),
            },
            "'" => match Self::pop_string(args) {
                Some(s) => self.do_quote(&s)?,
                None => Self::skip_malformed(op, args),
            },
            "\"" => {
                let s = Self::pop_string(args);
                let ac = Self::pop_number(args);
                let aw = Self::pop_number(args);
                match (aw, ac, s) {
                    (Some(aw), Some(ac), Some(s)) => self.do_doublequote(aw, ac, &s)?,
                    _ => Self::skip_malformed(op, args),
                }
            }

            // Rendering mode has no effect on placement.
            "Tr" => {}

            _ => {
                tracing::debug!(operator = op, "ignoring operator");
            }
        }
        Ok(())
    }

    fn skip_malformed(op: &str, args: &[Operand]) {
        tracing::debug!(operator = op, remaining = args.len(), "malformed operands, skipping");
    }

    // ========================================================================
    // Operand helpers
    // ========================================================================

    fn pop_number(args: &mut Vec<Operand>) -> Option<f64> {
        args.pop().and_then(|t| t.as_num().ok())
    }

    fn pop_string(args: &mut Vec<Operand>) -> Option<Vec<u8>> {
        args.pop().and_then(|t| match t {
            Operand::String(s) => Some(s),
            _ => None,
        })
    }

    fn pop_name(args: &mut Vec<Operand>) -> Option<String> {
        args.pop().and_then(|t| match t {
            Operand::Name(s) => Some(s),
            _ => None,
        })
    }

    fn pop_point(args: &mut Vec<Operand>) -> Option<(f64, f64)> {
        if args.len() >= 2 {
            let y = Self::pop_number(args)?;
            let x = Self::pop_number(args)?;
            Some((x, y))
        } else {
            None
        }
    }

    fn pop_matrix(args: &mut Vec<Operand>) -> Option<Matrix> {
        if args.len() >= 6 {
            let f = Self::pop_number(args)?;
            let e = Self::pop_number(args)?;
            let d = Self::pop_number(args)?;
            let c = Self::pop_number(args)?;
            let b = Self::pop_number(args)?;
            let a = Self::pop_number(args)?;
            Some((a, b, c, d, e, f))
        } else {
            None
        }
    }

    fn pop_text_seq(args: &mut Vec<Operand>) -> Option<Vec<TextSeqItem>> {
        args.pop().and_then(|t| match t {
            Operand::Array(arr) => Some(
                arr.into_iter()
                    .filter_map(|item| match item {
                        Operand::Int(n) => Some(TextSeqItem::Number(n as f64)),
                        Operand::Real(n) => Some(TextSeqItem::Number(n)),
                        Operand::String(s) => Some(TextSeqItem::Bytes(s)),
                        _ => None,
                    })
                    .collect(),
            ),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{FontSpec, page_fonts};
    use std::collections::HashMap;

    fn fonts() -> FontMap {
        let mut specs = HashMap::new();
        specs.insert("F1".to_string(), FontSpec::new("Type1", Some("Courier")));
        page_fonts(&specs)
    }

    fn op(operands: Vec<Operand>, operator: &str) -> ContentOp {
        ContentOp::new(operands, operator)
    }

    fn name(s: &str) -> Operand {
        Operand::Name(s.to_string())
    }

    fn string(s: &str) -> Operand {
        Operand::String(s.as_bytes().to_vec())
    }

    #[test]
    fn test_mismatched_closer_ignored() {
        let fonts = fonts();
        let options = LayoutOptions::default();
        let mut interp = ContentInterpreter::new(&fonts, &options);
        let ops = [
            ContentOp::bare("BT"),
            ContentOp::bare("q"),
            op([1, 0, 0, 1, 50, 50].map(Operand::Int).to_vec(), "cm"),
        ];
        for o in &ops {
            let mut args = o.operands.clone();
            interp.dispatch_operator(&o.operator, &mut args).unwrap();
        }
        assert_eq!(interp.depth(), 2);
        assert_eq!(interp.xform.depth(), 1);
        // the graphics scope is innermost, so ET has nothing to close
        assert!(!interp.close_innermost(true));
        assert_eq!(interp.depth(), 2);
        assert!(interp.close_innermost(false));
        assert_eq!(interp.xform.depth(), 0);
        assert_eq!(interp.xform.ctm(), (1.0, 0.0, 0.0, 1.0, 0.0, 0.0));
        assert!(interp.close_innermost(true));
        assert_eq!(interp.depth(), 0);
        assert!(!interp.close_innermost(false));
    }

    #[test]
    fn test_malformed_operands_skip_operator() {
        let fonts = fonts();
        let options = LayoutOptions::default();
        let mut interp = ContentInterpreter::new(&fonts, &options);
        let ops = [
            op(vec![name("F1"), Operand::Int(10)], "Tf"),
            op(vec![string("oops")], "Tc"),
            op(vec![Operand::Int(1)], "Td"),
        ];
        interp.execute(&ops).unwrap();
        assert_eq!(interp.textstate.charspace, 0.0);
        assert_eq!(interp.xform.line_matrix(), (1.0, 0.0, 0.0, 1.0, 0.0, 0.0));
    }

    #[test]
    fn test_show_outside_text_object_ignored() {
        let fonts = fonts();
        let options = LayoutOptions::default();
        let mut interp = ContentInterpreter::new(&fonts, &options);
        let groups = interp
            .execute(&[op(vec![string("stray")], "Tj")])
            .unwrap();
        assert!(groups.is_empty());
    }

    #[test]
    fn test_unknown_font_surfaces_on_show() {
        let fonts = fonts();
        let options = LayoutOptions::default();
        let mut interp = ContentInterpreter::new(&fonts, &options);
        let ops = [
            ContentOp::bare("BT"),
            op(vec![name("F9"), Operand::Int(10)], "Tf"),
            op(vec![string("x")], "Tj"),
        ];
        let err = interp.execute(&ops).unwrap_err();
        assert!(matches!(err, GridError::UnknownFont(ref n) if n == "F9"));
    }
}
