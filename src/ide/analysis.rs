//! AnalysisHost and Analysis: cached documents and per-request queries.
//!
//! The `AnalysisHost` owns the factory catalog, the reference syntax, the
//! type checker and a content-keyed cache of parsed documents. Each request
//! gets an `Analysis` snapshot that answers every query for one document
//! version.
//!
//! ## Usage
//!
//! ```ignore
//! let host = AnalysisHost::new(catalog);
//!
//! let diagnostics = host.validate("file:///config.toml", text)?;
//!
//! let analysis = host.analysis("file:///config.toml", text)?;
//! let hover = analysis.hover_at(Position::new(3, 4));
//! ```

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::{FxHashMap, FxHasher};

use crate::base::constants::DEFAULT_DIAGNOSTIC_SOURCE;
use crate::base::{Position, TextRange, TextSize};
use crate::hir::{
    BuiltinTypeChecker, Diagnostic, DocumentView, FactoryCatalog, FactoryMatcher, Interpolation,
    MatchResult, ReferenceResolver, ReferenceSyntax, TypeChecker, check_bindings,
};
use crate::syntax::ParseError;

use super::{CompletionItem, GotoResult, HoverResult, InlayHint};

struct CachedDocument {
    hash: u64,
    view: Arc<DocumentView>,
}

/// Owns the validation setup and the document cache.
///
/// The cache maps a document URI to the hash of the text it was built from.
/// A request with different text replaces the entry.
pub struct AnalysisHost {
    catalog: Arc<FactoryCatalog>,
    syntax: Arc<dyn ReferenceSyntax>,
    checker: Arc<dyn TypeChecker>,
    source: Arc<str>,
    cache: Mutex<FxHashMap<String, CachedDocument>>,
}

impl AnalysisHost {
    /// Create a host with `${path}` references and the built-in type checks.
    pub fn new(catalog: impl Into<Arc<FactoryCatalog>>) -> Self {
        Self {
            catalog: catalog.into(),
            syntax: Arc::new(Interpolation),
            checker: Arc::new(BuiltinTypeChecker),
            source: Arc::from(DEFAULT_DIAGNOSTIC_SOURCE),
            cache: Mutex::new(FxHashMap::default()),
        }
    }

    /// Set how references are recognized.
    pub fn with_reference_syntax(mut self, syntax: impl ReferenceSyntax + 'static) -> Self {
        self.syntax = Arc::new(syntax);
        self
    }

    /// Set the checker used for raw values.
    pub fn with_type_checker(mut self, checker: impl TypeChecker + 'static) -> Self {
        self.checker = Arc::new(checker);
        self
    }

    /// Set the `source` reported on every diagnostic.
    pub fn with_source(mut self, source: impl Into<Arc<str>>) -> Self {
        self.source = source.into();
        self
    }

    pub fn catalog(&self) -> &FactoryCatalog {
        &self.catalog
    }

    /// Validate a document and return its diagnostics.
    pub fn validate(&self, uri: &str, text: &str) -> Result<Vec<Diagnostic>, ParseError> {
        Ok(self.analysis(uri, text)?.diagnostics())
    }

    /// Get a snapshot for querying one document version.
    pub fn analysis(&self, uri: &str, text: &str) -> Result<Analysis, ParseError> {
        let view = self.document(uri, text)?;
        let matches = FactoryMatcher::new(&view, &self.catalog).match_document();
        Ok(Analysis {
            view,
            catalog: self.catalog.clone(),
            syntax: self.syntax.clone(),
            checker: self.checker.clone(),
            source: self.source.clone(),
            matches,
        })
    }

    /// The parsed document for `text`, from the cache when unchanged.
    fn document(&self, uri: &str, text: &str) -> Result<Arc<DocumentView>, ParseError> {
        let hash = content_hash(text);
        if let Some(cached) = self.cache.lock().get(uri) {
            if cached.hash == hash && cached.view.text() == text {
                tracing::debug!(uri, "document cache hit");
                return Ok(cached.view.clone());
            }
        }

        tracing::debug!(uri, "document cache miss");
        let view = Arc::new(DocumentView::from_source(text)?);
        self.cache.lock().insert(
            uri.to_string(),
            CachedDocument {
                hash,
                view: view.clone(),
            },
        );
        Ok(view)
    }

    /// Drop a document from the cache.
    pub fn remove(&self, uri: &str) {
        self.cache.lock().remove(uri);
    }

    /// Number of cached documents.
    pub fn cached_count(&self) -> usize {
        self.cache.lock().len()
    }
}

fn content_hash(text: &str) -> u64 {
    let mut hasher = FxHasher::default();
    text.hash(&mut hasher);
    hasher.finish()
}

/// Queries over one validated document version.
pub struct Analysis {
    view: Arc<DocumentView>,
    catalog: Arc<FactoryCatalog>,
    syntax: Arc<dyn ReferenceSyntax>,
    checker: Arc<dyn TypeChecker>,
    source: Arc<str>,
    matches: MatchResult,
}

impl Analysis {
    pub fn view(&self) -> &DocumentView {
        &self.view
    }

    pub fn matches(&self) -> &MatchResult {
        &self.matches
    }

    pub fn resolver(&self) -> ReferenceResolver<'_> {
        ReferenceResolver::new(&self.view, self.syntax.as_ref())
    }

    /// All diagnostics, in pipeline order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        check_bindings(
            &self.view,
            &self.catalog,
            &self.matches,
            self.syntax.as_ref(),
            self.checker.as_ref(),
        )
        .into_iter()
        .map(|d| d.with_source(self.source.clone()))
        .collect()
    }

    pub fn hover(&self, offset: TextSize) -> Option<HoverResult> {
        super::hover(&self.view, &self.matches, offset)
    }

    pub fn hover_at(&self, position: Position) -> Option<HoverResult> {
        self.hover(self.view.offset_at(position)?)
    }

    pub fn goto_definition(&self, offset: TextSize) -> GotoResult {
        super::goto_definition(&self.view, &self.matches, &self.resolver(), offset)
    }

    pub fn goto_definition_at(&self, position: Position) -> GotoResult {
        match self.view.offset_at(position) {
            Some(offset) => self.goto_definition(offset),
            None => GotoResult::empty(),
        }
    }

    pub fn completions(&self, offset: TextSize) -> Vec<CompletionItem> {
        super::completions(&self.view, &self.catalog, offset)
    }

    pub fn completions_at(&self, position: Position) -> Vec<CompletionItem> {
        self.view
            .offset_at(position)
            .map(|offset| self.completions(offset))
            .unwrap_or_default()
    }

    pub fn inlay_hints(&self, range: TextRange) -> Vec<InlayHint> {
        super::inlay_hints(&self.view, &self.matches, range)
    }

    /// Inlay hints between two editor positions; positions past the end clamp to it.
    pub fn inlay_hints_between(&self, start: Position, end: Position) -> Vec<InlayHint> {
        let len = TextSize::of(self.view.text());
        let start = self.view.offset_at(start).unwrap_or(len);
        let end = self.view.offset_at(end).unwrap_or(len).max(start);
        self.inlay_hints(TextRange::new(start, end))
    }
}
