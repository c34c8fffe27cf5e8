//! pdfgrid - fixed-width text layout reconstruction for PDF pages.
//!
//! Interprets a page's content stream operators (or OCR-recognized lines)
//! and renders the text onto a character grid that mirrors its visual
//! placement on the page.

pub mod api;
pub mod error;
pub mod font;
pub mod interp;
pub mod layout;
pub mod model;
pub mod ocr;
pub mod utils;

pub use api::high_level;
pub use api::{PageInput, render_embedded, render_ocr, render_page};
pub use error::{GridError, Result};
pub use font::{Font, FontEncoding, FontSpec};
pub use layout::{LayoutOptions, LineGroup};
pub use model::{ContentOp, Operand};
pub use ocr::{OcrLine, PageSize};
