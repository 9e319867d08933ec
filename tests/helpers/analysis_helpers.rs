//! Helpers for setting up analysis hosts.

use std::sync::Arc;

use confit::base::TextSize;
use confit::hir::SchemaRegistry;
use confit::ide::{Analysis, AnalysisHost};
use confit::FactoryCatalog;

use super::source_fixtures::registry;

pub const TEST_URI: &str = "file:///test/config.toml";

/// A host over the fixture registry under the default marker.
pub fn host() -> AnalysisHost {
    host_with(registry())
}

pub fn host_with(registry: SchemaRegistry) -> AnalysisHost {
    AnalysisHost::new(FactoryCatalog::from(registry))
}

/// A host where `factory` and `validator` both select from the fixture registry.
pub fn two_marker_host() -> AnalysisHost {
    let registry = Arc::new(registry());
    AnalysisHost::new(
        FactoryCatalog::new()
            .with_marker("factory", registry.clone())
            .with_marker("validator", registry),
    )
}

/// Analyze `source` with the fixture registry, panicking on parse errors.
pub fn analysis_from_toml(source: &str) -> Analysis {
    analysis_with(&host(), source)
}

pub fn analysis_with(host: &AnalysisHost, source: &str) -> Analysis {
    match host.analysis(TEST_URI, source) {
        Ok(analysis) => analysis,
        Err(e) => panic!("Parse error in test source at {:?}: {}", e.range, e.message),
    }
}

/// Offset of the first occurrence of `needle`, plus `delta` bytes.
pub fn offset_of(source: &str, needle: &str, delta: u32) -> TextSize {
    let start = source
        .find(needle)
        .unwrap_or_else(|| panic!("`{needle}` not found in source"));
    TextSize::from(start as u32 + delta)
}
