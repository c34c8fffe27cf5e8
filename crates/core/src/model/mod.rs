//! Page model types - operands, operators, and text state.
//!
//! - `objects` - operand values and tokenized content operations
//! - `state` - text state scalars (Tc, Tw, Tz, TL, Ts, font)

pub mod objects;
pub mod state;

// Re-export main types for convenience
pub use objects::{ContentOp, Operand};
pub use state::TextState;
