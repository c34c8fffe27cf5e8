//! Transform stack for graphics scopes and text positioning.
//!
//! Each `q` pushes a frame holding the composed transform inherited from the
//! enclosing scope; `cm` composes into the top frame only and is discarded
//! by the matching `Q`. Text positioning keeps a single line matrix plus a
//! per-run offset that accumulates glyph advances and kerning until the next
//! positioning operator invalidates it.

use crate::utils::{MATRIX_IDENTITY, Matrix, mult_matrix, translation};

#[derive(Debug, Clone)]
pub struct TransformStack {
    /// Composed transform per graphics scope; index 0 is the page root.
    scopes: Vec<Matrix>,
    /// Text line matrix (Tlm)
    line_matrix: Matrix,
    /// Advance accumulated since the last positioning operator.
    run_offset: Matrix,
}

impl TransformStack {
    pub fn new() -> Self {
        Self::with_root(MATRIX_IDENTITY)
    }

    /// Start from an initial page transform instead of identity.
    pub fn with_root(root: Matrix) -> Self {
        Self {
            scopes: vec![root],
            line_matrix: MATRIX_IDENTITY,
            run_offset: MATRIX_IDENTITY,
        }
    }

    /// Number of open graphics scopes above the page root.
    pub fn depth(&self) -> usize {
        self.scopes.len() - 1
    }

    /// Composed transform of the innermost scope.
    pub fn ctm(&self) -> Matrix {
        *self.scopes.last().unwrap_or(&MATRIX_IDENTITY)
    }

    pub fn line_matrix(&self) -> Matrix {
        self.line_matrix
    }

    /// Open a scope inheriting the current composed transform.
    pub fn push_scope(&mut self) {
        self.scopes.push(self.ctm());
    }

    /// Close the innermost scope. Returns false (and keeps the root) when
    /// there is nothing to close.
    pub fn pop_scope(&mut self) -> bool {
        if self.scopes.len() > 1 {
            self.scopes.pop();
            true
        } else {
            false
        }
    }

    /// Concatenate `m` onto the innermost scope.
    pub fn concat(&mut self, m: Matrix) {
        if let Some(top) = self.scopes.last_mut() {
            *top = mult_matrix(m, *top);
        }
    }

    /// Reset text positioning, as at the start or end of a text object.
    pub fn reset_text(&mut self) {
        self.line_matrix = MATRIX_IDENTITY;
        self.run_offset = MATRIX_IDENTITY;
    }

    /// Replace the line matrix outright.
    pub fn set_line_matrix(&mut self, m: Matrix) {
        self.line_matrix = m;
        self.invalidate_run();
    }

    /// Move the line matrix by an offset expressed in its own space.
    pub fn translate_line(&mut self, tx: f64, ty: f64) {
        self.line_matrix = mult_matrix(translation(tx, ty), self.line_matrix);
        self.invalidate_run();
    }

    /// Advance the pen horizontally (text space units, already scaled).
    pub fn advance(&mut self, tx: f64) {
        self.run_offset = mult_matrix(translation(tx, 0.0), self.run_offset);
    }

    /// Drop the accumulated run offset.
    pub fn invalidate_run(&mut self) {
        self.run_offset = MATRIX_IDENTITY;
    }

    /// Transform placing the next run: run offset x line matrix x scope.
    pub fn text_matrix(&self) -> Matrix {
        mult_matrix(self.run_offset, mult_matrix(self.line_matrix, self.ctm()))
    }
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cm_discarded_on_pop() {
        let mut stack = TransformStack::new();
        stack.concat((2.0, 0.0, 0.0, 2.0, 0.0, 0.0));
        stack.push_scope();
        stack.concat(translation(10.0, 20.0));
        assert_eq!(stack.ctm(), (2.0, 0.0, 0.0, 2.0, 20.0, 40.0));
        assert!(stack.pop_scope());
        assert_eq!(stack.ctm(), (2.0, 0.0, 0.0, 2.0, 0.0, 0.0));
        assert!(!stack.pop_scope());
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn test_translate_line_is_relative() {
        let mut stack = TransformStack::new();
        stack.set_line_matrix((2.0, 0.0, 0.0, 2.0, 100.0, 700.0));
        stack.translate_line(5.0, -10.0);
        assert_eq!(stack.line_matrix(), (2.0, 0.0, 0.0, 2.0, 110.0, 680.0));
    }

    #[test]
    fn test_positioning_invalidates_advance() {
        let mut stack = TransformStack::new();
        stack.advance(12.5);
        assert_eq!(stack.text_matrix().4, 12.5);
        stack.translate_line(0.0, -14.0);
        assert_eq!(stack.text_matrix(), (1.0, 0.0, 0.0, 1.0, 0.0, -14.0));
    }
}
