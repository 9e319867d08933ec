//! Diagnostic tests for the HIR layer.
//!
//! These tests verify that invalid factory bindings are reported, in order
//! and at the right place.

use confit::hir::{BarePath, FactorySchema, SchemaError, SchemaRegistry, Severity, TypeExpr, codes};
use rstest::rstest;

use crate::helpers::analysis_helpers::{host_with, two_marker_host};
use crate::helpers::diagnostic_helpers::*;
use crate::helpers::source_fixtures::*;

// =============================================================================
// STRUCTURE
// =============================================================================

#[test]
fn test_no_markers_no_diagnostics() {
    assert_clean(NO_MARKERS);
    assert_clean("");
}

#[test]
fn test_two_markers_reports_the_second() {
    let diagnostics = diagnostics_with(&two_marker_host(), TWO_MARKERS);
    assert_eq!(codes(&diagnostics), vec![codes::DUPLICATE_MARKER]);
    assert_eq!(covered(TWO_MARKERS, &diagnostics), vec!["validator"]);
    assert_eq!(
        diagnostics[0].message.as_ref(),
        "An object can reference a single factory element at most."
    );
}

#[test]
fn test_unknown_factory() {
    let source = "[a]\nfactory = \"subtract\"\nx = 1\n";
    let diagnostics = diagnostics_from_toml(source);
    assert_eq!(codes(&diagnostics), vec![codes::UNKNOWN_FACTORY]);
    assert_eq!(covered(source, &diagnostics), vec!["\"subtract\""]);
}

#[test]
fn test_factory_name_must_be_a_string() {
    let source = "[a]\nfactory = 3\n";
    let diagnostics = diagnostics_from_toml(source);
    assert_eq!(codes(&diagnostics), vec![codes::INVALID_FACTORY_NAME]);
    assert_eq!(diagnostics[0].message.as_ref(), "Factory name must be a string, got integer.");
}

#[test]
fn test_failing_schema_source() {
    let registry = SchemaRegistry::builder()
        .register("broken", || -> Result<FactorySchema, SchemaError> {
            Err(SchemaError::describe("import failed"))
        })
        .build();
    let source = "[a]\nfactory = \"broken\"\n\n[b]\nfactory = \"broken\"\n";
    let diagnostics = diagnostics_with(&host_with(registry), source);
    assert_eq!(codes(&diagnostics), vec![codes::SCHEMA_UNAVAILABLE, codes::SCHEMA_UNAVAILABLE]);
    assert!(diagnostics[0].message.contains("import failed"));
}

// =============================================================================
// ARGUMENTS
// =============================================================================

#[test]
fn test_missing_argument_at_marker() {
    let diagnostics = diagnostics_from_toml(ADD_MISSING_B);
    assert_eq!(codes(&diagnostics), vec![codes::MISSING_ARGUMENT]);
    assert_eq!(diagnostics[0].message.as_ref(), "Argument `b` is missing.");
    assert_eq!(covered(ADD_MISSING_B, &diagnostics), vec!["factory"]);
    assert_eq!(diagnostics[0].span.start.line, 1);
}

#[test]
fn test_one_error_per_missing_field_in_schema_order() {
    let source = "[a]\nfactory = \"add\"\n";
    let diagnostics = diagnostics_from_toml(source);
    let messages: Vec<_> = diagnostics.iter().map(|d| d.message.as_ref()).collect();
    assert_eq!(messages, vec!["Argument `a` is missing.", "Argument `b` is missing."]);
}

#[test]
fn test_defaulted_argument_may_be_omitted() {
    assert_clean("[s]\nfactory = \"scale\"\nvalue = 3\n");
}

#[test]
fn test_unknown_argument_warns_once() {
    let diagnostics = diagnostics_from_toml(ADD_UNKNOWN_Z);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, Severity::Warning);
    assert_eq!(diagnostics[0].code.as_deref(), Some(codes::UNKNOWN_ARGUMENT));
    assert_eq!(covered(ADD_UNKNOWN_Z, &diagnostics), vec!["z"]);
    assert!(errors_from_toml(ADD_UNKNOWN_Z).is_empty());
}

#[rstest]
#[case("value = \"big\"", "Input should be a valid number")]
#[case("value = true", "Input should be a valid number")]
#[case("value = [1]", "Input should be a valid number")]
fn test_type_mismatch_at_key(#[case] line: &str, #[case] expected: &str) {
    let source = format!("[s]\nfactory = \"scale\"\n{line}\n");
    let diagnostics = diagnostics_from_toml(&source);
    assert_eq!(codes(&diagnostics), vec![codes::TYPE_MISMATCH]);
    assert_eq!(
        diagnostics[0].message.as_ref(),
        format!("Argument `value` has incompatible type.\n{expected}")
    );
    assert_eq!(covered(&source, &diagnostics), vec!["value"]);
}

#[test]
fn test_array_item_violations() {
    let registry = SchemaRegistry::builder()
        .schema(
            FactorySchema::builder("sum")
                .param("values", TypeExpr::array(TypeExpr::Integer))
                .build(),
        )
        .build();
    let source = "[s]\nfactory = \"sum\"\nvalues = [1, \"two\", 3.5]\n";
    let diagnostics = diagnostics_with(&host_with(registry), source);
    let messages: Vec<_> = diagnostics.iter().map(|d| d.message.as_ref()).collect();
    assert_eq!(
        messages,
        vec![
            "Argument `values` has incompatible type.\n[1]: Input should be a valid integer",
            "Argument `values` has incompatible type.\n[2]: Input should be a valid integer",
        ]
    );
}

#[test]
fn test_checks_run_in_pipeline_order() {
    let source = "[a]\nfactory = \"add\"\nb = \"x\"\nz = 1\n\n[c]\nfactory = \"nope\"\n";
    let diagnostics = diagnostics_from_toml(source);
    assert_eq!(
        codes(&diagnostics),
        vec![
            codes::UNKNOWN_FACTORY,
            codes::UNKNOWN_ARGUMENT,
            codes::MISSING_ARGUMENT,
            codes::TYPE_MISMATCH,
        ]
    );
}

// =============================================================================
// REFERENCES
// =============================================================================

#[test]
fn test_unresolved_reference_skips_type_check() {
    let source = "[s]\nfactory = \"scale\"\nvalue = \"${missing}\"\n";
    let diagnostics = diagnostics_from_toml(source);
    assert_eq!(codes(&diagnostics), vec![codes::UNRESOLVED_REFERENCE]);
    assert_eq!(diagnostics[0].severity, Severity::Error);
    assert_eq!(diagnostics[0].message.as_ref(), "No element with this key exists.");
    assert_eq!(covered(source, &diagnostics), vec!["value"]);
}

#[rstest]
#[case("v = 3", vec![])]
#[case("v = \"s\"", vec![codes::TYPE_MISMATCH])]
fn test_reference_to_scalar_checks_target_value(#[case] line: &str, #[case] expected: Vec<&str>) {
    let source = format!("[d]\n{line}\n\n[s]\nfactory = \"scale\"\nvalue = \"${{d.v}}\"\n");
    let diagnostics = diagnostics_from_toml(&source);
    assert_eq!(codes(&diagnostics), expected);
    if let Some(diagnostic) = diagnostics.first() {
        assert_eq!(
            diagnostic.message.as_ref(),
            "Argument `value` has incompatible type.\nInput should be a valid number"
        );
        assert_eq!(covered(&source, &diagnostics), vec!["value"]);
    }
}

// =============================================================================
// NESTED FACTORIES
// =============================================================================

#[test]
fn test_reference_to_matching_factory_is_clean() {
    assert_clean(WRAP_REFERENCES_ADD);
}

#[test]
fn test_reference_to_mismatched_factory() {
    let host = host_with(registry_with_wrap(TypeExpr::String));
    let diagnostics = diagnostics_with(&host, WRAP_REFERENCES_ADD);
    assert_eq!(codes(&diagnostics), vec![codes::RETURN_TYPE_MISMATCH]);
    let message = diagnostics[0].message.as_ref();
    assert!(message.contains("`string`"), "{message}");
    assert!(message.contains("`number`"), "{message}");

    let second_marker = WRAP_REFERENCES_ADD.rfind("factory").unwrap();
    assert_eq!(usize::from(diagnostics[0].range.start()), second_marker);
}

#[rstest]
#[case(TypeExpr::Number, vec![])]
#[case(TypeExpr::String, vec![codes::RETURN_TYPE_MISMATCH])]
fn test_bare_path_reference_to_factory(#[case] input: TypeExpr, #[case] expected: Vec<&str>) {
    let source = "[a]\nfactory = \"add\"\na = 1\nb = 2\n\n[c]\nfactory = \"wrap\"\ninput = \"a\"\n";
    let host = host_with(registry_with_wrap(input)).with_reference_syntax(BarePath);
    let diagnostics = diagnostics_with(&host, source);
    assert_eq!(codes(&diagnostics), expected);
}

#[test]
fn test_inline_sub_factory() {
    let source = "[w]\nfactory = \"wrap\"\ninput = { factory = \"add\", a = 1, b = 2 }\n";
    assert_clean(source);

    let host = host_with(registry_with_wrap(TypeExpr::String));
    let diagnostics = diagnostics_with(&host, source);
    assert_eq!(codes(&diagnostics), vec![codes::RETURN_TYPE_MISMATCH]);
}

#[test]
fn test_sub_factory_errors_are_reported_on_the_inner_object() {
    let source = "[w]\nfactory = \"wrap\"\n\n[w.input]\nfactory = \"add\"\na = 1\n";
    let diagnostics = diagnostics_from_toml(source);
    assert_eq!(codes(&diagnostics), vec![codes::MISSING_ARGUMENT]);
    assert_eq!(diagnostics[0].span.start.line, 4);
}

#[test]
fn test_any_typed_field_accepts_any_provider() {
    let host = host_with(registry_with_wrap(TypeExpr::Any));
    assert!(diagnostics_with(&host, WRAP_REFERENCES_ADD).is_empty());
}

// =============================================================================
// PROPERTIES
// =============================================================================

#[test]
fn test_validation_is_idempotent() {
    let source = "[a]\nfactory = \"add\"\nz = 1\n\n[w]\nfactory = \"wrap\"\ninput = \"${missing}\"\n";
    let first = diagnostics_from_toml(source);
    let second = diagnostics_from_toml(source);
    assert_eq!(first, second);
    assert!(!first.is_empty());
}
