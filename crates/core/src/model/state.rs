//! Text state scalars.
//!
//! These are set by the text state operators and read whenever a text run
//! is placed. They are not saved or restored by `q`/`Q`; only transforms are
//! scoped (see [`crate::interp::xform::TransformStack`]).

use crate::font::Font;
use std::sync::Arc;

/// Text State - spacing, scaling, leading, rise and the selected font.
#[derive(Debug, Clone)]
pub struct TextState {
    /// Current font (None until the first `Tf`)
    pub font: Option<Arc<Font>>,
    /// Current font resource name (e.g., "F1")
    pub fontname: Option<String>,
    /// Font size in text space units
    pub fontsize: f64,
    /// Character spacing (Tc)
    pub charspace: f64,
    /// Word spacing (Tw), applied per space character
    pub wordspace: f64,
    /// Horizontal scaling percentage (100 = normal)
    pub scaling: f64,
    /// Text leading (TL) as given by the operator
    pub leading: f64,
    /// Text rise (Ts)
    pub rise: f64,
}

impl TextState {
    /// Create a new text state with default values.
    pub const fn new() -> Self {
        Self {
            font: None,
            fontname: None,
            fontsize: 0.0,
            charspace: 0.0,
            wordspace: 0.0,
            scaling: 100.0,
            leading: 0.0,
            rise: 0.0,
        }
    }

    /// Horizontal scale as a factor (Tz / 100).
    pub fn hscale(&self) -> f64 {
        self.scaling / 100.0
    }
}

impl Default for TextState {
    fn default() -> Self {
        Self::new()
    }
}
