//! Inlay hints: declared argument types after their values.

use crate::base::{Position, TextRange, TextSize};
use crate::hir::{DocumentView, MatchResult};

/// An inlay hint to display in the editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlayHint {
    /// Offset the hint is displayed at
    pub offset: TextSize,
    /// The same offset as an editor position
    pub position: Position,
    /// The hint text to display
    pub label: String,
    /// The kind of hint
    pub kind: InlayHintKind,
    /// Whether padding should be added before/after the hint
    pub padding_left: bool,
    pub padding_right: bool,
}

/// The kind of inlay hint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlayHintKind {
    /// Type annotation (e.g., `: number`)
    Type,
}

impl InlayHintKind {
    /// Convert to LSP inlay hint kind number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            InlayHintKind::Type => 1,
        }
    }
}

/// Type hints for every known argument whose key intersects `range`.
///
/// Hints follow binding order, then key order within each object.
pub fn inlay_hints(view: &DocumentView, bindings: &MatchResult, range: TextRange) -> Vec<InlayHint> {
    let mut hints = Vec::new();
    for binding in &bindings.bindings {
        let Ok(object) = view.object_at(&binding.object_path) else {
            continue;
        };
        for key in object.keys() {
            if *key == binding.marker {
                continue;
            }
            let Some(field) = binding.schema.field(key) else {
                continue;
            };
            let Some(element) = view.element(&binding.object_path.key(key.clone())) else {
                continue;
            };
            if element.key_range.intersect(range).is_none() {
                continue;
            }
            let offset = element.value_range.end();
            hints.push(InlayHint {
                offset,
                position: view.line_index().position(offset),
                label: format!(": {}", field.ty),
                kind: InlayHintKind::Type,
                padding_left: false,
                padding_right: false,
            });
        }
    }
    hints
}
