//! # confit-base
//!
//! Core library for validating and navigating factory-bound TOML
//! configuration files.
//!
//! A configuration object becomes a *factory binding* when it carries a
//! marker key (`factory = "add"` by default). The engine checks every bound
//! object's arguments against the factory's schema, resolves `${path}`
//! references between objects, and answers editor queries over the result.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! project   → Settings, schema manifests, workspace validation
//!   ↓
//! ide       → Hover, goto-definition, completion, inlay hints
//!   ↓
//! hir       → Document view, factory matching, schema validation
//!   ↓
//! syntax    → Value tree, element paths, lowering
//!   ↓
//! parser    → Logos lexer, recursive-descent parser, typed AST
//!   ↓
//! base      → Primitives (TextRange, LineIndex, Position)
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → syntax → hir → ide → project)
// ============================================================================

/// Foundation types: TextRange, LineIndex, Position
pub mod base;

/// Parser: Logos lexer, recursive-descent parser, typed AST
pub mod parser;

/// Syntax: the lowered value tree and its elements
pub mod syntax;

/// Validated model: document view, factory bindings, diagnostics
pub mod hir;

/// IDE features: hover, goto-definition, completion, inlay hints
pub mod ide;

/// Project management: settings, manifests, workspace loading
pub mod project;

// Re-export foundation types
pub use base::{LineCol, LineIndex, Position, Span, TextRange, TextSize};

// Re-export the main entry points
pub use hir::{Diagnostic, DocumentView, FactoryCatalog, FactorySchema, SchemaRegistry, Severity, TypeExpr};
pub use ide::{Analysis, AnalysisHost};
pub use project::{Settings, WorkspaceLoader};
pub use syntax::{ElementPath, ParseError, Value};
