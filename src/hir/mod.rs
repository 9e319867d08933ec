//! High-level IR (HIR): the validated model of a configuration document.
//!
//! ## Key Types
//!
//! - [`DocumentView`] - Path-indexed document with reverse offset lookup
//! - [`ReferenceResolver`] - Single-hop resolution of `${path}`-style references
//! - [`FactoryCatalog`] / [`SchemaRegistry`] - Marker key → factory schemas
//! - [`FactoryMatcher`] - Binds marked objects to their schemas
//! - [`SchemaChecker`] - Unknown, missing and mistyped arguments
//!
//! ## Pipeline
//!
//! ```text
//! DocumentView::from_source(text)   ← parse + lower + index
//!     │
//!     ▼
//! FactoryMatcher::match_document    ← bindings + structural diagnostics
//!     │
//!     ▼
//! SchemaChecker::check_all          ← field diagnostics (uses ReferenceResolver)
//! ```

mod diagnostics;
mod factories;
mod reference;
mod registry;
mod schema;
mod type_check;
mod view;

pub use diagnostics::{
    Diagnostic, DiagnosticCollector, SchemaChecker, Severity, check_bindings, codes, validate,
};
pub use factories::{FactoryBinding, FactoryMatcher, MatchResult};
pub use reference::{BarePath, Interpolation, ReferenceResolver, ReferenceSyntax, Unresolved};
pub use registry::{
    FactoryCatalog, SchemaError, SchemaRegistry, SchemaRegistryBuilder, SchemaSource,
};
pub use schema::{FactorySchema, FactorySchemaBuilder, FieldSchema, SourceLocation, TypeExpr};
pub use type_check::{BuiltinTypeChecker, TypeChecker, TypeViolation};
pub use view::{DocumentView, ElementHit, ElementPart, ViewError};
