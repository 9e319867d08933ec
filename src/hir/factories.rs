//! Factory matching: pair every marked object with its schema.

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;

use super::diagnostics::{Diagnostic, DiagnosticCollector};
use super::registry::FactoryCatalog;
use super::schema::FactorySchema;
use super::view::DocumentView;
use crate::syntax::{ElementPath, Value};

/// An object bound to a factory through a marker key.
#[derive(Debug, Clone)]
pub struct FactoryBinding {
    pub object_path: ElementPath,
    /// The marker key that named the factory.
    pub marker: SmolStr,
    pub factory_name: SmolStr,
    pub schema: Arc<FactorySchema>,
}

impl FactoryBinding {
    /// Path of the marker key/value pair.
    pub fn marker_path(&self) -> ElementPath {
        self.object_path.key(self.marker.clone())
    }
}

/// Output of [`FactoryMatcher::match_document`].
#[derive(Debug, Clone, Default)]
pub struct MatchResult {
    /// Valid bindings in document order.
    pub bindings: Vec<FactoryBinding>,
    /// Structural diagnostics in document order.
    pub diagnostics: Vec<Diagnostic>,
    /// Every object that declares a marker, bound or not.
    marked: FxHashSet<ElementPath>,
    by_object: FxHashMap<ElementPath, usize>,
}

impl MatchResult {
    /// The binding whose object lives at `path`.
    pub fn binding_for(&self, path: &ElementPath) -> Option<&FactoryBinding> {
        self.by_object.get(path).map(|&i| &self.bindings[i])
    }

    /// Whether the object at `path` declares a marker, valid or not.
    pub fn is_marked(&self, path: &ElementPath) -> bool {
        self.marked.contains(path)
    }

    /// The binding owning the field at `path`, with the field's key.
    pub fn field_owner<'p>(&self, path: &'p ElementPath) -> Option<(&FactoryBinding, &'p str)> {
        let key = path.last_key()?;
        let binding = self.binding_for(&path.parent()?)?;
        Some((binding, key))
    }
}

/// Finds marker keys and looks their factories up in the catalog.
pub struct FactoryMatcher<'a> {
    view: &'a DocumentView,
    catalog: &'a FactoryCatalog,
}

impl<'a> FactoryMatcher<'a> {
    pub fn new(view: &'a DocumentView, catalog: &'a FactoryCatalog) -> Self {
        Self { view, catalog }
    }

    /// Walk the document in order and bind every marked object.
    ///
    /// The first marker of an object wins; later ones are reported. Objects
    /// whose marker is invalid stay unbound, but their nested objects are
    /// still visited.
    pub fn match_document(&self) -> MatchResult {
        let mut result = MatchResult::default();
        let mut collector = DiagnosticCollector::new();

        for element in self.view.elements() {
            let Some(marker) = element.path.last_key() else {
                continue;
            };
            let Some(registry) = self.catalog.registry(marker) else {
                continue;
            };
            let Some(object_path) = element.path.parent() else {
                continue;
            };

            if !result.marked.insert(object_path.clone()) {
                collector.duplicate_marker(self.view, element);
                continue;
            }

            let name = match self.view.value_at(&element.path) {
                Ok(Value::String(name)) => name.as_str(),
                Ok(other) => {
                    collector.invalid_factory_name(self.view, element, other.kind_name());
                    continue;
                }
                Err(_) => continue,
            };

            match registry.describe(name) {
                None => collector.unknown_factory(self.view, element, name),
                Some(Err(error)) => {
                    tracing::warn!(factory = name, %error, "schema source failed");
                    collector.schema_unavailable(self.view, element, name, &error);
                }
                Some(Ok(schema)) => {
                    tracing::trace!(object = %object_path, factory = name, "bound factory");
                    result
                        .by_object
                        .insert(object_path.clone(), result.bindings.len());
                    result.bindings.push(FactoryBinding {
                        object_path,
                        marker: SmolStr::new(marker),
                        factory_name: SmolStr::new(name),
                        schema,
                    });
                }
            }
        }

        result.diagnostics = collector.take();
        result
    }
}
