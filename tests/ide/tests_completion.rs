//! Completion tests.

use confit::base::Position;
use confit::ide::CompletionKind;

use crate::helpers::analysis_helpers::*;

#[test]
fn test_marker_value_lists_registered_factories() {
    let source = "[a]\nfactory = \"\"\n";
    let analysis = analysis_from_toml(source);
    let items = analysis.completions(offset_of(source, "\"\"", 1));

    let labels: Vec<_> = items.iter().map(|i| i.label.as_ref()).collect();
    assert_eq!(labels, vec!["add", "wrap", "scale"]);
    assert!(items.iter().all(|i| i.kind == CompletionKind::Factory));
    assert_eq!(items[0].detail.as_deref(), Some("Add two numbers together."));
    assert_eq!(items[2].detail.as_deref(), Some("N/A"));
    assert_eq!(items[2].documentation.as_deref(), Some("**scale**\n\nN/A"));
}

#[test]
fn test_completion_by_position() {
    let source = "[a]\nfactory = \"ad\"\n";
    let analysis = analysis_from_toml(source);
    assert_eq!(analysis.completions_at(Position::new(1, 12)).len(), 3);
    assert!(analysis.completions_at(Position::new(1, 2)).is_empty());
    assert!(analysis.completions_at(Position::new(40, 0)).is_empty());
}

#[test]
fn test_second_marker_uses_its_own_registry() {
    let source = "[a]\nvalidator = \"\"\n";
    let host = two_marker_host();
    let analysis = analysis_with(&host, source);
    assert_eq!(analysis.completions(offset_of(source, "\"\"", 1)).len(), 3);
    assert!(analysis_from_toml(source).completions(offset_of(source, "\"\"", 1)).is_empty());
}
