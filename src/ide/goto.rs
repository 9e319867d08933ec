//! Go-to-definition implementation.

use smol_str::SmolStr;

use crate::base::{Span, TextRange, TextSize};
use crate::hir::{DocumentView, MatchResult, ReferenceResolver, SourceLocation};
use crate::syntax::ElementPath;

/// Result of a go-to-definition request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GotoResult {
    /// The targets to jump to.
    pub targets: Vec<GotoTarget>,
}

impl GotoResult {
    /// Create an empty result (no targets found).
    pub fn empty() -> Self {
        Self {
            targets: Vec::new(),
        }
    }

    /// Create a result with a single target.
    pub fn single(target: GotoTarget) -> Self {
        Self {
            targets: vec![target],
        }
    }

    /// Check if any targets were found.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// A target location for go-to-definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GotoTarget {
    /// The key of a referenced element in the same document.
    Element {
        path: ElementPath,
        range: TextRange,
        span: Span,
    },
    /// Where a factory is defined.
    Factory {
        name: SmolStr,
        location: SourceLocation,
    },
}

/// Find the definition of the value at `offset`.
///
/// A reference jumps to its target's key; a marker value jumps to the
/// factory's source location when the schema declares one.
pub fn goto_definition(
    view: &DocumentView,
    bindings: &MatchResult,
    resolver: &ReferenceResolver<'_>,
    offset: TextSize,
) -> GotoResult {
    let Some(hit) = view.element_at(offset) else {
        return GotoResult::empty();
    };
    if !hit.is_value() {
        return GotoResult::empty();
    }
    let path = hit.path();

    if let Some(Ok(target)) = resolver.resolve_at(path) {
        return match view.element(&target) {
            Some(element) => GotoResult::single(GotoTarget::Element {
                range: element.key_range,
                span: view.span(element.key_range),
                path: target,
            }),
            None => GotoResult::empty(),
        };
    }

    match bindings.field_owner(path) {
        Some((binding, key)) if key == binding.marker => {
            match &binding.schema.source_location {
                Some(location) => GotoResult::single(GotoTarget::Factory {
                    name: binding.factory_name.clone(),
                    location: location.clone(),
                }),
                None => GotoResult::empty(),
            }
        }
        _ => GotoResult::empty(),
    }
}
