//! Diagnostic assertion helpers.

use confit::hir::{Diagnostic, Severity};
use confit::ide::AnalysisHost;

use super::analysis_helpers::{TEST_URI, host};

/// Validate `source` with the fixture registry.
pub fn diagnostics_from_toml(source: &str) -> Vec<Diagnostic> {
    diagnostics_with(&host(), source)
}

pub fn diagnostics_with(host: &AnalysisHost, source: &str) -> Vec<Diagnostic> {
    host.validate(TEST_URI, source)
        .unwrap_or_else(|e| panic!("Parse error in test source: {}", e.message))
}

/// Only error-level diagnostics.
pub fn errors_from_toml(source: &str) -> Vec<Diagnostic> {
    diagnostics_from_toml(source)
        .into_iter()
        .filter(|d| d.severity == Severity::Error)
        .collect()
}

/// The codes of `diagnostics`, in order.
pub fn codes(diagnostics: &[Diagnostic]) -> Vec<&str> {
    diagnostics
        .iter()
        .map(|d| d.code.as_deref().unwrap_or("-"))
        .collect()
}

/// The source text each diagnostic covers.
pub fn covered<'s>(source: &'s str, diagnostics: &[Diagnostic]) -> Vec<&'s str> {
    diagnostics.iter().map(|d| &source[d.range]).collect()
}

/// Assert a source validates without any diagnostics.
pub fn assert_clean(source: &str) {
    let diagnostics = diagnostics_from_toml(source);
    assert!(
        diagnostics.is_empty(),
        "Expected no diagnostics, got {}:\n{}",
        diagnostics.len(),
        diagnostics
            .iter()
            .map(|d| format!("  Line {}: {}", d.span.start.line + 1, d.message))
            .collect::<Vec<_>>()
            .join("\n")
    );
}
