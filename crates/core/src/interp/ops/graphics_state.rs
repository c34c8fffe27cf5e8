//! Graphics state operators.
//!
//! Handles: q, Q, cm
//!
//! Only the transform is scoped by q/Q; text state scalars persist across
//! scopes.

use crate::interp::interpreter::ContentInterpreter;
use crate::utils::Matrix;

#[allow(non_snake_case)]
impl<'a> ContentInterpreter<'a> {
    /// Opens a graphics scope inheriting the current transform.
    ///
    /// PDF operator: `q`
    pub fn do_q(&mut self) {
        self.open_graphics_frame();
    }

    /// Closes the innermost frame when it is a graphics scope. Inside an
    /// open text object this is a no-op.
    ///
    /// PDF operator: `Q`
    pub fn do_Q(&mut self) {
        if !self.close_innermost(false) {
            tracing::debug!(
                depth = self.depth(),
                "Q does not close the innermost frame, ignoring"
            );
        }
    }

    /// Concatenates a matrix onto the current scope's transform.
    ///
    /// PDF operator: `cm`
    pub fn do_cm(&mut self, matrix: Matrix) {
        self.xform.concat(matrix);
    }
}
