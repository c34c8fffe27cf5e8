//! High-level API module for fixed-width page rendering.
//!
//! # Example
//!
//! ```ignore
//! use pdfgrid_core::api::{PageInput, render_page};
//! use pdfgrid_core::LayoutOptions;
//!
//! let page = PageInput::from_json(&std::fs::read_to_string("page.json")?)?;
//! let text = render_page(&page, &LayoutOptions::default())?;
//! ```

pub mod high_level;

// Re-export for convenience
pub use high_level::{
    PageInput, embedded_line_groups, render_embedded, render_ocr, render_page,
};
