//! High-level page rendering API.
//!
//! Provides the main public entry points:
//! - `render_embedded()` - Lay out a page from its content stream operators
//! - `render_ocr()` - Lay out a page from OCR lines
//! - `render_page()` - Either of the above, from a deserialized page dump

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::font::{FontSpec, page_fonts};
use crate::interp::ContentInterpreter;
use crate::layout::{LayoutOptions, LineGroup, layout_page};
use crate::model::ContentOp;
use crate::ocr::{self, OcrLine, PageSize};

/// Interpret a page's operators into line groups without composing them.
pub fn embedded_line_groups(
    operators: &[ContentOp],
    fonts: &HashMap<String, FontSpec>,
    options: &LayoutOptions,
) -> Result<Vec<LineGroup>> {
    let fontmap = page_fonts(fonts);
    let mut interpreter = ContentInterpreter::new(&fontmap, options);
    interpreter.execute(operators)
}

/// Render a page's embedded text as fixed-width text.
///
/// # Errors
///
/// Fails when a text-show operator runs with no usable font selected
/// (`MissingFont` or `UnknownFont`). A page with no text gives `Ok("")`.
pub fn render_embedded(
    operators: &[ContentOp],
    fonts: &HashMap<String, FontSpec>,
    options: &LayoutOptions,
) -> Result<String> {
    let groups = embedded_line_groups(operators, fonts, options)?;
    Ok(layout_page(groups, options))
}

/// Render a page of OCR lines as fixed-width text. Never fails.
pub fn render_ocr(
    lines: &[OcrLine],
    rotation: f64,
    page_size: Option<PageSize>,
    options: &LayoutOptions,
) -> String {
    ocr::render_ocr(lines, rotation, page_size, options)
}

/// One page as handed over by a document parser or OCR service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum PageInput {
    /// Pre-tokenized content stream plus the page's font resources
    Embedded {
        operators: Vec<ContentOp>,
        #[serde(default)]
        fonts: HashMap<String, FontSpec>,
    },
    /// OCR-recognized lines
    Ocr {
        lines: Vec<OcrLine>,
        #[serde(default)]
        rotation: f64,
        #[serde(default)]
        page_size: Option<PageSize>,
    },
}

impl PageInput {
    /// Parse a page dump.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Line groups for this page, before grouping and composition.
    pub fn line_groups(&self, options: &LayoutOptions) -> Result<Vec<LineGroup>> {
        match self {
            PageInput::Embedded { operators, fonts } => {
                embedded_line_groups(operators, fonts, options)
            }
            PageInput::Ocr {
                lines,
                rotation,
                page_size,
            } => Ok(ocr::ocr_line_groups(lines, *rotation, *page_size, options)),
        }
    }
}

/// Render one page dump as fixed-width text.
pub fn render_page(page: &PageInput, options: &LayoutOptions) -> Result<String> {
    match page {
        PageInput::Embedded { operators, fonts } => render_embedded(operators, fonts, options),
        PageInput::Ocr {
            lines,
            rotation,
            page_size,
        } => Ok(render_ocr(lines, *rotation, *page_size, options)),
    }
}
