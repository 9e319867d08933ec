//! Hover feature tests for the IDE layer.

use confit::base::Position;

use crate::helpers::analysis_helpers::*;
use crate::helpers::source_fixtures::*;

const ADD_HOVER: &str = "**Factory: add**\n\nAdd two numbers together.\n\n- a: number\n- b: number\n\nReturns `number`";

#[test]
fn test_hover_on_marker_key_and_value() {
    let analysis = analysis_from_toml(WRAP_REFERENCES_ADD);

    let on_key = analysis.hover(offset_of(WRAP_REFERENCES_ADD, "factory", 2)).unwrap();
    assert_eq!(on_key.contents, ADD_HOVER);
    assert_eq!(&WRAP_REFERENCES_ADD[on_key.range], "factory");

    let on_value = analysis.hover(offset_of(WRAP_REFERENCES_ADD, "\"add\"", 1)).unwrap();
    assert_eq!(on_value.contents, ADD_HOVER);
    assert_eq!(&WRAP_REFERENCES_ADD[on_value.range], "\"add\"");
}

#[test]
fn test_hover_on_argument_shows_type() {
    let analysis = analysis_from_toml(WRAP_REFERENCES_ADD);
    let result = analysis.hover_at(Position::new(7, 1)).unwrap();
    assert_eq!(result.contents, "**Field: input**\n\nnumber");
    assert_eq!(result.span.start, Position::new(7, 0));
}

#[test]
fn test_hover_on_defaulted_argument() {
    let source = "[s]\nfactory = \"scale\"\nvalue = 1\n";
    let analysis = analysis_from_toml(source);
    let contents = analysis.hover(offset_of(source, "factory", 0)).unwrap().contents;
    assert!(contents.contains("- factor: number = 2"), "{contents}");
    assert!(!contents.contains("Returns"), "{contents}");
}

#[test]
fn test_no_hover_on_unbound_or_unknown_keys() {
    let analysis = analysis_from_toml(ADD_UNKNOWN_Z);
    assert!(analysis.hover(offset_of(ADD_UNKNOWN_Z, "z = 3", 0)).is_none());
    assert!(analysis.hover(offset_of(ADD_UNKNOWN_Z, "[a]", 1)).is_none());

    let plain = analysis_from_toml(NO_MARKERS);
    assert!(plain.hover(offset_of(NO_MARKERS, "port", 1)).is_none());
}
