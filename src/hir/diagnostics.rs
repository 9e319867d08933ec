//! Diagnostics: structural and type errors for factory-bound documents.
//!
//! The [`SchemaChecker`] consumes the matcher's bindings and reports unknown,
//! missing and mistyped arguments. [`validate`] runs the whole pipeline.

use std::sync::Arc;

use super::factories::{FactoryBinding, FactoryMatcher, MatchResult};
use super::reference::{ReferenceResolver, ReferenceSyntax};
use super::registry::{FactoryCatalog, SchemaError};
use super::type_check::{TypeChecker, TypeViolation};
use super::view::DocumentView;
use crate::base::constants::DEFAULT_DIAGNOSTIC_SOURCE;
use crate::base::{Span, TextRange};
use crate::syntax::Element;

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

impl Severity {
    /// Convert to LSP severity number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            Severity::Error => 1,
            Severity::Warning => 2,
            Severity::Info => 3,
            Severity::Hint => 4,
        }
    }
}

/// A diagnostic message with location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// Byte range in the document.
    pub range: TextRange,
    /// The same range as editor positions.
    pub span: Span,
    /// Severity level.
    pub severity: Severity,
    /// Error/warning code (e.g., "E0201").
    pub code: Option<Arc<str>>,
    /// The diagnostic message.
    pub message: Arc<str>,
    /// Tool name shown by editors.
    pub source: Arc<str>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(range: TextRange, span: Span, message: impl Into<Arc<str>>) -> Self {
        Self::new(Severity::Error, range, span, message)
    }

    /// Create a new warning diagnostic.
    pub fn warning(range: TextRange, span: Span, message: impl Into<Arc<str>>) -> Self {
        Self::new(Severity::Warning, range, span, message)
    }

    fn new(severity: Severity, range: TextRange, span: Span, message: impl Into<Arc<str>>) -> Self {
        Self {
            range,
            span,
            severity,
            code: None,
            message: message.into(),
            source: Arc::from(DEFAULT_DIAGNOSTIC_SOURCE),
        }
    }

    /// Set the error code.
    pub fn with_code(mut self, code: impl Into<Arc<str>>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Set the source name.
    pub fn with_source(mut self, source: impl Into<Arc<str>>) -> Self {
        self.source = source.into();
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Standard diagnostic codes.
///
/// ## Error Code Ranges
///
/// - **E0101-E0199**: Structural errors (the object is excluded from field checks)
/// - **E0201-E0299**: Field errors
/// - **W0201-W0299**: Field warnings
pub mod codes {
    // ========================================================================
    // STRUCTURAL ERRORS (E0101-E0199)
    // ========================================================================

    /// More than one marker key in the same object.
    pub const DUPLICATE_MARKER: &str = "E0101";
    /// Marker value is not a string.
    pub const INVALID_FACTORY_NAME: &str = "E0102";
    /// Marker names a factory absent from the registry.
    pub const UNKNOWN_FACTORY: &str = "E0103";
    /// The factory's schema source failed.
    pub const SCHEMA_UNAVAILABLE: &str = "E0104";

    // ========================================================================
    // FIELD ERRORS (E0201-E0299)
    // ========================================================================

    /// Required argument absent.
    pub const MISSING_ARGUMENT: &str = "E0201";
    /// Value does not fit the declared type.
    pub const TYPE_MISMATCH: &str = "E0202";
    /// Nested factory returns a different type.
    pub const RETURN_TYPE_MISMATCH: &str = "E0203";
    /// Reference target does not exist.
    pub const UNRESOLVED_REFERENCE: &str = "E0204";

    // ========================================================================
    // WARNINGS (W0201-W0299)
    // ========================================================================

    /// Argument the factory does not accept.
    pub const UNKNOWN_ARGUMENT: &str = "W0201";
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

/// Collects diagnostics in the order they are reported.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    fn error_at(&mut self, view: &DocumentView, range: TextRange, code: &str, message: String) {
        self.add(Diagnostic::error(range, view.span(range), message).with_code(code));
    }

    /// Add a duplicate marker error at the second marker's key.
    pub fn duplicate_marker(&mut self, view: &DocumentView, marker: &Element) {
        self.error_at(
            view,
            marker.key_range,
            codes::DUPLICATE_MARKER,
            "An object can reference a single factory element at most.".to_string(),
        );
    }

    /// Add an error for a marker whose value is not a string.
    pub fn invalid_factory_name(&mut self, view: &DocumentView, marker: &Element, kind: &str) {
        self.error_at(
            view,
            marker.value_range,
            codes::INVALID_FACTORY_NAME,
            format!("Factory name must be a string, got {kind}."),
        );
    }

    /// Add an unknown factory error.
    pub fn unknown_factory(&mut self, view: &DocumentView, marker: &Element, name: &str) {
        self.error_at(
            view,
            marker.value_range,
            codes::UNKNOWN_FACTORY,
            format!("Factory `{name}` not found in the registry."),
        );
    }

    /// Add an error for a schema source that failed.
    pub fn schema_unavailable(
        &mut self,
        view: &DocumentView,
        marker: &Element,
        name: &str,
        error: &SchemaError,
    ) {
        self.error_at(
            view,
            marker.value_range,
            codes::SCHEMA_UNAVAILABLE,
            format!("Factory `{name}` could not be described: {error}"),
        );
    }

    /// Add an unknown argument warning at the argument's key.
    pub fn unknown_argument(&mut self, view: &DocumentView, field: &Element, key: &str, factory: &str) {
        let range = field.key_range;
        self.add(
            Diagnostic::warning(
                range,
                view.span(range),
                format!("Argument `{key}` is not recognized by `{factory}` and will be ignored."),
            )
            .with_code(codes::UNKNOWN_ARGUMENT),
        );
    }

    /// Add a missing argument error at the binding's marker key.
    pub fn missing_argument(&mut self, view: &DocumentView, marker: &Element, key: &str) {
        self.error_at(
            view,
            marker.key_range,
            codes::MISSING_ARGUMENT,
            format!("Argument `{key}` is missing."),
        );
    }

    /// Add an unresolved reference error at the field's key.
    pub fn unresolved_reference(&mut self, view: &DocumentView, field: &Element) {
        self.error_at(
            view,
            field.key_range,
            codes::UNRESOLVED_REFERENCE,
            "No element with this key exists.".to_string(),
        );
    }

    /// Add a nested factory return type mismatch at the binding's marker key.
    pub fn return_type_mismatch(
        &mut self,
        view: &DocumentView,
        marker: &Element,
        key: &str,
        expected: &str,
        found: &str,
    ) {
        self.error_at(
            view,
            marker.key_range,
            codes::RETURN_TYPE_MISMATCH,
            format!(
                "Argument `{key}` is provided by a factory with incompatible type.\nExpected `{expected}`, got `{found}`."
            ),
        );
    }

    /// Add a type mismatch error at the field's key.
    pub fn type_mismatch(
        &mut self,
        view: &DocumentView,
        field: &Element,
        key: &str,
        violation: &TypeViolation,
    ) {
        self.error_at(
            view,
            field.key_range,
            codes::TYPE_MISMATCH,
            format!("Argument `{key}` has incompatible type.\n{violation}"),
        );
    }

    /// Get all diagnostics.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Get the number of errors.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    /// Get the number of warnings.
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Take all diagnostics, leaving the collector empty.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Clear all diagnostics.
    pub fn clear(&mut self) {
        self.diagnostics.clear();
    }
}

impl Extend<Diagnostic> for DiagnosticCollector {
    fn extend<T: IntoIterator<Item = Diagnostic>>(&mut self, iter: T) {
        self.diagnostics.extend(iter);
    }
}

// ============================================================================
// SCHEMA CHECKER
// ============================================================================

/// Checks every bound object against its factory's schema.
pub struct SchemaChecker<'a> {
    view: &'a DocumentView,
    catalog: &'a FactoryCatalog,
    matches: &'a MatchResult,
    resolver: ReferenceResolver<'a>,
    checker: &'a dyn TypeChecker,
    collector: DiagnosticCollector,
}

impl<'a> SchemaChecker<'a> {
    /// Create a new schema checker.
    pub fn new(
        view: &'a DocumentView,
        catalog: &'a FactoryCatalog,
        matches: &'a MatchResult,
        resolver: ReferenceResolver<'a>,
        checker: &'a dyn TypeChecker,
    ) -> Self {
        Self {
            view,
            catalog,
            matches,
            resolver,
            checker,
            collector: DiagnosticCollector::new(),
        }
    }

    /// Check all bindings in document order.
    pub fn check_all(&mut self) {
        for binding in &self.matches.bindings {
            self.check_binding(binding);
        }
    }

    /// Run every check for one binding; no check short-circuits another.
    pub fn check_binding(&mut self, binding: &FactoryBinding) {
        let Ok(object) = self.view.object_at(&binding.object_path) else {
            return;
        };
        let Some(marker) = self.view.element(&binding.marker_path()) else {
            return;
        };
        let schema = &binding.schema;

        // Pass 1: arguments the factory does not know
        for key in object.keys() {
            if self.catalog.is_marker(key) || schema.field(key).is_some() {
                continue;
            }
            if let Some(field) = self.view.element(&binding.object_path.key(key.clone())) {
                self.collector
                    .unknown_argument(self.view, field, key, &binding.factory_name);
            }
        }

        // Pass 2: mandatory arguments that are absent, in declaration order
        for field in &schema.fields {
            if field.is_mandatory() && !object.contains_key(field.name.as_str()) {
                self.collector.missing_argument(self.view, marker, &field.name);
            }
        }

        // Pass 3: types of the arguments that are present
        for key in object.keys() {
            if self.catalog.is_marker(key) {
                continue;
            }
            let Some(field_schema) = schema.field(key) else {
                continue;
            };
            let field_path = binding.object_path.key(key.clone());
            let Some(field) = self.view.element(&field_path) else {
                continue;
            };

            let target = match self.resolver.reference_at(&field_path) {
                Some(target) => match self.resolver.resolve(&target) {
                    Ok(target) => target,
                    Err(_) => {
                        self.collector.unresolved_reference(self.view, field);
                        continue;
                    }
                },
                None => field_path.clone(),
            };

            if let Some(provider) = self.matches.binding_for(&target) {
                if field_schema.ty.is_any() {
                    continue;
                }
                match &provider.schema.return_type {
                    None => {}
                    Some(returned) if returned.is_any() || *returned == field_schema.ty => {}
                    Some(returned) => self.collector.return_type_mismatch(
                        self.view,
                        marker,
                        key,
                        &field_schema.ty.to_string(),
                        &returned.to_string(),
                    ),
                }
                continue;
            }

            if self.matches.is_marked(&target) {
                continue;
            }

            let Ok(value) = self.view.value_at(&target) else {
                continue;
            };
            for violation in self.checker.check(&field_schema.ty, value) {
                self.collector
                    .type_mismatch(self.view, field, key, &violation);
            }
        }
    }

    /// Get the collected diagnostics.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.collector.diagnostics()
    }

    /// Consume the checker and return diagnostics.
    pub fn finish(self) -> Vec<Diagnostic> {
        self.collector.diagnostics
    }
}

/// Validate a document: match factories, then check every binding.
///
/// Matcher diagnostics come first in document order, followed by each
/// binding's unknown, missing and type diagnostics.
pub fn validate(
    view: &DocumentView,
    catalog: &FactoryCatalog,
    syntax: &dyn ReferenceSyntax,
    checker: &dyn TypeChecker,
) -> Vec<Diagnostic> {
    let matches = FactoryMatcher::new(view, catalog).match_document();
    check_bindings(view, catalog, &matches, syntax, checker)
}

/// Run the schema checks for an existing match result.
pub fn check_bindings(
    view: &DocumentView,
    catalog: &FactoryCatalog,
    matches: &MatchResult,
    syntax: &dyn ReferenceSyntax,
    checker: &dyn TypeChecker,
) -> Vec<Diagnostic> {
    let resolver = ReferenceResolver::new(view, syntax);
    let mut schema_checker = SchemaChecker::new(view, catalog, matches, resolver, checker);
    schema_checker.check_all();

    let mut collector = DiagnosticCollector::new();
    collector.extend(matches.diagnostics.iter().cloned());
    collector.extend(schema_checker.finish());
    tracing::debug!(
        bindings = matches.bindings.len(),
        errors = collector.error_count(),
        warnings = collector.warning_count(),
        "validated document"
    );
    collector.take()
}
