//! Font handling for text placement.
//!
//! This module contains:
//! - `pdffont` - font specs from the page resources and resolved fonts
//! - `encoding` - byte string decoding through encodings and glyph maps
//! - `metrics` - built-in widths for the standard base families

pub mod encoding;
pub mod metrics;
pub mod pdffont;

// Re-export main types for convenience
pub use encoding::FontEncoding;
pub use pdffont::{Font, FontSpec, WidthEntry, get_widths, page_fonts};
