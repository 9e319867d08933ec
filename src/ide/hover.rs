//! Hover information implementation.

use crate::base::{Span, TextRange, TextSize};
use crate::hir::{DocumentView, FactoryBinding, FactorySchema, MatchResult};

/// Result of a hover request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoverResult {
    /// The hover content (markdown).
    pub contents: String,
    /// The hovered key or value.
    pub range: TextRange,
    /// The same range as editor positions.
    pub span: Span,
}

/// Get hover information at an offset.
///
/// A marker key or value describes the bound factory; the key or value of a
/// known argument shows the argument's declared type.
pub fn hover(view: &DocumentView, bindings: &MatchResult, offset: TextSize) -> Option<HoverResult> {
    let hit = view.element_at(offset)?;
    let (binding, key) = bindings.field_owner(hit.path())?;

    let contents = if key == binding.marker {
        factory_markdown(binding)
    } else {
        let field = binding.schema.field(key)?;
        format!("**Field: {key}**\n\n{}", field.ty)
    };

    let range = hit.range();
    Some(HoverResult {
        contents,
        range,
        span: view.span(range),
    })
}

fn factory_markdown(binding: &FactoryBinding) -> String {
    let schema: &FactorySchema = &binding.schema;
    let mut contents = format!("**Factory: {}**", binding.factory_name);
    if let Some(doc) = &schema.docstring {
        contents.push_str("\n\n");
        contents.push_str(doc.trim());
    }
    if !schema.fields.is_empty() {
        contents.push_str("\n\n");
        let lines: Vec<String> = schema
            .fields
            .iter()
            .map(|field| match &field.default {
                Some(default) => format!("- {}: {} = {default}", field.name, field.ty),
                None => format!("- {}: {}", field.name, field.ty),
            })
            .collect();
        contents.push_str(&lines.join("\n"));
    }
    if let Some(returns) = &schema.return_type {
        contents.push_str(&format!("\n\nReturns `{returns}`"));
    }
    contents
}
