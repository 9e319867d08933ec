//! HIR layer tests
//!
//! Tests for the validated model:
//! - Document view lookups
//! - Factory matching and structural diagnostics
//! - Argument validation
//! - Reference resolution

pub mod tests_diagnostics;
pub mod tests_document_view;
pub mod tests_references;
