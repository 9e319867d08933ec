//! Completion suggestions implementation.

use std::sync::Arc;

use crate::base::TextSize;
use crate::base::constants::COMPLETION_DETAIL_CHARS;
use crate::hir::{DocumentView, FactoryCatalog, SchemaRegistry};

/// Kind of completion item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionKind {
    Factory,
}

impl CompletionKind {
    /// Convert to LSP completion item kind number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            CompletionKind::Factory => 12, // Value
        }
    }
}

/// A completion suggestion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionItem {
    /// The text to insert.
    pub label: Arc<str>,
    /// The kind of completion.
    pub kind: CompletionKind,
    /// Detail text (shown after label).
    pub detail: Option<Arc<str>>,
    /// Documentation (markdown, shown in popup).
    pub documentation: Option<Arc<str>>,
    /// Text to insert (if different from label).
    pub insert_text: Option<Arc<str>>,
    /// Sort priority (lower = higher priority).
    pub sort_priority: u32,
}

impl CompletionItem {
    /// Create a new completion item.
    pub fn new(label: impl Into<Arc<str>>, kind: CompletionKind) -> Self {
        Self {
            label: label.into(),
            kind,
            detail: None,
            documentation: None,
            insert_text: None,
            sort_priority: 100,
        }
    }

    /// Set the detail text.
    pub fn with_detail(mut self, detail: impl Into<Arc<str>>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Set the documentation.
    pub fn with_documentation(mut self, doc: impl Into<Arc<str>>) -> Self {
        self.documentation = Some(doc.into());
        self
    }

    /// Set the insert text.
    pub fn with_insert_text(mut self, text: impl Into<Arc<str>>) -> Self {
        self.insert_text = Some(text.into());
        self
    }

    /// Set the sort priority.
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.sort_priority = priority;
        self
    }
}

/// Get completion suggestions at an offset.
///
/// Only the value of a marker key completes: every factory registered for
/// that marker, in registration order.
pub fn completions(view: &DocumentView, catalog: &FactoryCatalog, offset: TextSize) -> Vec<CompletionItem> {
    let Some(hit) = view.element_at(offset) else {
        return Vec::new();
    };
    if !hit.is_value() {
        return Vec::new();
    }
    let Some(registry) = hit.path().last_key().and_then(|key| catalog.registry(key)) else {
        return Vec::new();
    };
    factory_items(registry)
}

fn factory_items(registry: &SchemaRegistry) -> Vec<CompletionItem> {
    registry
        .names()
        .enumerate()
        .map(|(i, name)| {
            let docstring = registry
                .describe(name)
                .and_then(Result::ok)
                .and_then(|schema| schema.docstring.clone());
            let doc = docstring.as_deref().map(str::trim).unwrap_or("N/A");
            CompletionItem::new(name.as_str(), CompletionKind::Factory)
                .with_detail(truncate(doc))
                .with_documentation(format!("**{name}**\n\n{doc}"))
                .with_insert_text(name.as_str())
                .with_priority(i as u32)
        })
        .collect()
}

fn truncate(doc: &str) -> String {
    match doc.char_indices().nth(COMPLETION_DETAIL_CHARS) {
        Some((end, _)) => format!("{}...", &doc[..end]),
        None => doc.to_string(),
    }
}
