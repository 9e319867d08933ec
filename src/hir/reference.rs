//! Cross-references between paths of the same document.
//!
//! Whether a string value points at another path is decided by a
//! [`ReferenceSyntax`]. Resolution is a single hop: the resolver checks that
//! the target exists and never follows a target that is itself a reference.

use thiserror::Error;

use super::view::DocumentView;
use crate::syntax::ElementPath;

/// Recognizes references inside string values.
pub trait ReferenceSyntax: Send + Sync {
    /// The target path if `text` is a reference, `None` for plain strings.
    fn parse_reference(&self, text: &str) -> Option<ElementPath>;
}

/// `"${model.encoder}"`: the whole string is a `${...}` interpolation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Interpolation;

impl ReferenceSyntax for Interpolation {
    fn parse_reference(&self, text: &str) -> Option<ElementPath> {
        let inner = text.strip_prefix("${")?.strip_suffix('}')?;
        ElementPath::parse(inner.trim())
    }
}

/// Any string that reads as a path, such as `"model.encoder"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BarePath;

impl ReferenceSyntax for BarePath {
    fn parse_reference(&self, text: &str) -> Option<ElementPath> {
        ElementPath::parse(text)
    }
}

impl<F> ReferenceSyntax for F
where
    F: Fn(&str) -> Option<ElementPath> + Send + Sync,
{
    fn parse_reference(&self, text: &str) -> Option<ElementPath> {
        self(text)
    }
}

/// A reference whose target does not exist in the document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no element with the key `{target}` exists")]
pub struct Unresolved {
    pub target: ElementPath,
}

/// Detects and resolves references over one document.
#[derive(Clone, Copy)]
pub struct ReferenceResolver<'a> {
    view: &'a DocumentView,
    syntax: &'a dyn ReferenceSyntax,
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(view: &'a DocumentView, syntax: &'a dyn ReferenceSyntax) -> Self {
        Self { view, syntax }
    }

    /// The target named by the string at `path`, if it is a reference.
    ///
    /// Non-string values are never references.
    pub fn reference_at(&self, path: &ElementPath) -> Option<ElementPath> {
        let text = self.view.value_at(path).ok()?.as_str()?;
        let target = self.syntax.parse_reference(text)?;
        tracing::trace!(from = %path, to = %target, "reference");
        Some(target)
    }

    /// Check that `target` exists.
    pub fn resolve(&self, target: &ElementPath) -> Result<ElementPath, Unresolved> {
        if self.view.value_at(target).is_ok() {
            Ok(target.clone())
        } else {
            Err(Unresolved {
                target: target.clone(),
            })
        }
    }

    /// Detect and resolve in one step.
    pub fn resolve_at(&self, path: &ElementPath) -> Option<Result<ElementPath, Unresolved>> {
        self.reference_at(path).map(|target| self.resolve(&target))
    }
}
