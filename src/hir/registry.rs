//! Schema registries: factory name to schema source, per marker key.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use smol_str::SmolStr;
use thiserror::Error;

use super::schema::FactorySchema;
use crate::base::constants::DEFAULT_MARKER;

/// Errors produced while describing a factory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A type expression that does not parse.
    #[error("invalid type expression `{0}`")]
    InvalidType(String),

    /// The source could not produce a schema.
    #[error("{0}")]
    Describe(String),
}

impl SchemaError {
    pub fn describe(message: impl Into<String>) -> Self {
        Self::Describe(message.into())
    }
}

/// Something that can describe a factory as a [`FactorySchema`].
///
/// Failures are reported against the objects that use the factory and never
/// abort validation of the rest of the document.
pub trait SchemaSource: Send + Sync {
    fn describe(&self) -> Result<FactorySchema, SchemaError>;
}

impl SchemaSource for FactorySchema {
    fn describe(&self) -> Result<FactorySchema, SchemaError> {
        Ok(self.clone())
    }
}

impl<F> SchemaSource for F
where
    F: Fn() -> Result<FactorySchema, SchemaError> + Send + Sync,
{
    fn describe(&self) -> Result<FactorySchema, SchemaError> {
        self()
    }
}

/// Factories available under one marker key, in registration order.
#[derive(Clone, Default)]
pub struct SchemaRegistry {
    sources: IndexMap<SmolStr, Arc<dyn SchemaSource>>,
}

impl SchemaRegistry {
    pub fn builder() -> SchemaRegistryBuilder {
        SchemaRegistryBuilder::default()
    }

    /// Describe the factory registered as `name`.
    ///
    /// `None` when nothing is registered under that name.
    pub fn describe(&self, name: &str) -> Option<Result<Arc<FactorySchema>, SchemaError>> {
        let source = self.sources.get(name)?;
        Some(source.describe().map(Arc::new))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sources.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &SmolStr> + '_ {
        self.sources.keys()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl fmt::Debug for SchemaRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaRegistry")
            .field("factories", &self.sources.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for [`SchemaRegistry`].
#[derive(Default)]
pub struct SchemaRegistryBuilder {
    sources: IndexMap<SmolStr, Arc<dyn SchemaSource>>,
}

impl SchemaRegistryBuilder {
    /// Register `source` under `name`, replacing an earlier registration.
    pub fn register(mut self, name: impl Into<SmolStr>, source: impl SchemaSource + 'static) -> Self {
        self.sources.insert(name.into(), Arc::new(source));
        self
    }

    /// Register a schema under its own name.
    pub fn schema(self, schema: FactorySchema) -> Self {
        let name = schema.name.clone();
        self.register(name, schema)
    }

    pub fn build(self) -> SchemaRegistry {
        SchemaRegistry {
            sources: self.sources,
        }
    }
}

/// Marker keys and the registry each one selects from.
#[derive(Debug, Clone, Default)]
pub struct FactoryCatalog {
    registries: IndexMap<SmolStr, Arc<SchemaRegistry>>,
}

impl FactoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog with a single marker.
    pub fn single(marker: impl Into<SmolStr>, registry: impl Into<Arc<SchemaRegistry>>) -> Self {
        Self::new().with_marker(marker, registry)
    }

    pub fn with_marker(
        mut self,
        marker: impl Into<SmolStr>,
        registry: impl Into<Arc<SchemaRegistry>>,
    ) -> Self {
        self.registries.insert(marker.into(), registry.into());
        self
    }

    pub fn registry(&self, marker: &str) -> Option<&Arc<SchemaRegistry>> {
        self.registries.get(marker)
    }

    pub fn is_marker(&self, key: &str) -> bool {
        self.registries.contains_key(key)
    }

    pub fn markers(&self) -> impl Iterator<Item = &SmolStr> + '_ {
        self.registries.keys()
    }
}

impl From<SchemaRegistry> for FactoryCatalog {
    /// Use `registry` under the default marker key.
    fn from(registry: SchemaRegistry) -> Self {
        Self::single(DEFAULT_MARKER, registry)
    }
}
