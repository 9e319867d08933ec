//! Syntax: the lowered data tree of a document and its source elements.
//!
//! [`lower`] turns the rowan CST into a [`Value`] tree plus one [`Element`]
//! for every key and array item, enforcing TOML's table semantics. Any
//! syntax or semantic error aborts lowering with a single [`ParseError`].

pub mod literal;
mod lower;
pub mod path;
pub mod value;

use rowan::TextRange;
use thiserror::Error;

use crate::parser::SyntaxError;

pub use lower::{LoweredDocument, lower};
pub use path::{ElementPath, Segment};
pub use value::{Table, Value};

/// Error for text that is not a well-formed document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
    pub range: TextRange,
}

impl ParseError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

impl From<SyntaxError> for ParseError {
    fn from(error: SyntaxError) -> Self {
        Self::new(error.message, error.range)
    }
}

/// A keyed or indexed value together with its source ranges.
///
/// For a key/value pair the key range covers the last key segment and the
/// value range covers the value. For a table header the key range is the last
/// header segment and the value range spans the whole section. Array items use
/// the item's range for both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub path: ElementPath,
    pub key_range: TextRange,
    pub value_range: TextRange,
}

impl Element {
    /// Smallest range covering both key and value.
    pub fn full_range(&self) -> TextRange {
        self.key_range.cover(self.value_range)
    }
}
