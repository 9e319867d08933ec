//! Go-to-definition tests.

use confit::hir::SourceLocation;
use confit::ide::GotoTarget;

use crate::helpers::analysis_helpers::*;
use crate::helpers::source_fixtures::*;

#[test]
fn test_goto_reference_target() {
    let analysis = analysis_from_toml(WRAP_REFERENCES_ADD);
    let result = analysis.goto_definition(offset_of(WRAP_REFERENCES_ADD, "\"${a}\"", 2));
    match result.targets.as_slice() {
        [GotoTarget::Element { path, range, span }] => {
            assert_eq!(path.to_string(), "a");
            assert_eq!(&WRAP_REFERENCES_ADD[*range], "a");
            assert_eq!(span.start.line, 0);
        }
        other => panic!("expected one element target, got {other:?}"),
    }
}

#[test]
fn test_goto_factory_source() {
    let analysis = analysis_from_toml(ADD_MISSING_B);
    let result = analysis.goto_definition(offset_of(ADD_MISSING_B, "\"add\"", 1));
    assert_eq!(
        result.targets,
        vec![GotoTarget::Factory {
            name: "add".into(),
            location: SourceLocation::new("factories.py", 4),
        }]
    );
}

#[test]
fn test_no_goto_without_location_or_reference() {
    let source = "[w]\nfactory = \"wrap\"\ninput = \"${nowhere}\"\n";
    let analysis = analysis_from_toml(source);
    assert!(analysis.goto_definition(offset_of(source, "\"wrap\"", 1)).is_empty());
    assert!(analysis.goto_definition(offset_of(source, "\"${nowhere}\"", 1)).is_empty());
    assert!(analysis.goto_definition(offset_of(source, "input", 1)).is_empty());
}
