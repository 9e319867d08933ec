//! IDE feature tests
//!
//! Tests for:
//! - Hover information
//! - Go to definition
//! - Code completion
//! - Inlay hints

pub mod tests_completion;
pub mod tests_goto;
pub mod tests_hover;
pub mod tests_inlay_hints;
