//! Inlay hint tests.

use confit::base::{Position, TextRange, TextSize};
use confit::ide::InlayHintKind;

use crate::helpers::analysis_helpers::*;
use crate::helpers::source_fixtures::*;

#[test]
fn test_hints_follow_known_arguments() {
    let analysis = analysis_from_toml(ADD_UNKNOWN_Z);
    let hints = analysis.inlay_hints(TextRange::up_to(TextSize::of(ADD_UNKNOWN_Z)));

    let labels: Vec<_> = hints.iter().map(|h| h.label.as_str()).collect();
    assert_eq!(labels, vec![": number", ": number"]);
    assert_eq!(hints[0].position, Position::new(2, 5));
    assert_eq!(hints[1].position, Position::new(3, 5));
    assert!(hints.iter().all(|h| h.kind == InlayHintKind::Type));
    assert_eq!(hints[0].kind.to_lsp(), 1);
}

#[test]
fn test_hints_limited_to_requested_lines() {
    let analysis = analysis_from_toml(WRAP_REFERENCES_ADD);
    let hints = analysis.inlay_hints_between(Position::new(5, 0), Position::new(8, 0));
    assert_eq!(hints.len(), 1);
    assert_eq!(hints[0].label, ": number");
    assert_eq!(hints[0].position.line, 7);
}

#[test]
fn test_no_hints_without_bindings() {
    let analysis = analysis_from_toml(NO_MARKERS);
    assert!(analysis.inlay_hints_between(Position::new(0, 0), Position::new(99, 0)).is_empty());
}
