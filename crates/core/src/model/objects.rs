//! Operand and operator types for pre-tokenized content streams.
//!
//! The document parser hands over each page as an ordered list of
//! `(operands, operator)` pairs; these are the value types it uses.

use crate::error::{GridError, Result};
use serde::{Deserialize, Serialize};

/// A single operand value preceding a content stream operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operand {
    /// Null object
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Real (floating point) value
    Real(f64),
    /// Name object without the leading slash (e.g. `F1`)
    Name(String),
    /// Byte string, exactly as stored in the content stream
    String(Vec<u8>),
    /// Array of operands (TJ arrays, width arrays)
    Array(Vec<Self>),
}

impl Operand {
    /// Get numeric value (int or real coerced to f64)
    pub const fn as_num(&self) -> Result<f64> {
        match self {
            Self::Int(n) => Ok(*n as f64),
            Self::Real(n) => Ok(*n),
            _ => Err(self.type_error("number")),
        }
    }

    /// Get as name string
    pub fn as_name(&self) -> Result<&str> {
        match self {
            Self::Name(s) => Ok(s),
            _ => Err(self.type_error("name")),
        }
    }

    /// Get as byte string
    pub fn as_string(&self) -> Result<&[u8]> {
        match self {
            Self::String(s) => Ok(s),
            _ => Err(self.type_error("string")),
        }
    }

    /// Get as array
    pub const fn as_array(&self) -> Result<&Vec<Self>> {
        match self {
            Self::Array(arr) => Ok(arr),
            _ => Err(self.type_error("array")),
        }
    }

    /// True for arrays, the "sequence" shape in width specifications.
    pub const fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    const fn type_error(&self, expected: &'static str) -> GridError {
        GridError::TypeError {
            expected,
            got: self.type_name(),
        }
    }

    /// Get type name for error messages
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Real(_) => "real",
            Self::Name(_) => "name",
            Self::String(_) => "string",
            Self::Array(_) => "array",
        }
    }
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<i64> for Operand {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&[u8]> for Operand {
    fn from(value: &[u8]) -> Self {
        Self::String(value.to_vec())
    }
}

/// One tokenized content stream instruction: operands followed by the
/// operator keyword (`Tj`, `cm`, `BT`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentOp {
    pub operands: Vec<Operand>,
    pub operator: String,
}

impl ContentOp {
    /// Create an operation from operands and an operator name.
    pub fn new(operands: Vec<Operand>, operator: impl Into<String>) -> Self {
        Self {
            operands,
            operator: operator.into(),
        }
    }

    /// An operation without operands (`q`, `BT`, `T*`, ...).
    pub fn bare(operator: impl Into<String>) -> Self {
        Self::new(Vec::new(), operator)
    }
}

impl<S: Into<String>> From<(Vec<Operand>, S)> for ContentOp {
    fn from((operands, operator): (Vec<Operand>, S)) -> Self {
        Self::new(operands, operator)
    }
}
