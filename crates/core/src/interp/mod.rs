//! Content stream interpretation.
//!
//! This module contains:
//! - `interpreter`: operator dispatch and the scope/text-object frame stack
//! - `xform`: transform stack and text positioning
//! - `run`: placement of individual text runs
//! - `ops`: operator implementations by category

pub mod interpreter;
pub mod ops;
pub mod run;
pub mod xform;

pub use interpreter::{ContentInterpreter, FontMap, TextSeqItem};
pub use run::{TextRun, kerning_tx, word_tx};
pub use xform::TransformStack;
