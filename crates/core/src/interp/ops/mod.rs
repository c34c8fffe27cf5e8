//! Content stream operator implementations.
//!
//! Operators are grouped by category:
//! - `graphics_state` - Scope stack and transforms (q, Q, cm)
//! - `text` - Text state, positioning and showing (BT, ET, Tc, Tw, Tz, TL, Tf,
//!   Ts, Td, TD, Tm, T\*, Tj, TJ, ', ")

mod graphics_state;
mod text;
