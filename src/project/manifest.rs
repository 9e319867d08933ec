//! Schema manifests: factory schemas declared in a TOML file.
//!
//! ```toml
//! [factories.add]
//! doc = "Add two numbers together."
//! returns = "number"
//! location = { file = "factories.py", line = 12 }
//! params = { a = "number", b = { type = "number", default = 1.0 } }
//! ```
//!
//! A parameter is either a type expression or a table with `type` and an
//! optional `default` or `required = false`. Location lines are 1-based.

use std::io;
use std::path::{Path, PathBuf};

use smol_str::SmolStr;
use thiserror::Error;

use crate::hir::{FactorySchema, FieldSchema, SchemaRegistry, SourceLocation, TypeExpr};
use crate::syntax::{ElementPath, ParseError, Table, Value, lower};

const FACTORIES_TABLE: &str = "factories";

/// Errors raised while loading a schema manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("`{path}`: {message}")]
    Invalid { path: ElementPath, message: String },
}

impl ManifestError {
    fn invalid(path: &ElementPath, message: impl Into<String>) -> Self {
        Self::Invalid {
            path: path.clone(),
            message: message.into(),
        }
    }
}

/// Read and parse the manifest at `path`.
pub fn load_manifest(path: &Path) -> Result<SchemaRegistry, ManifestError> {
    let text = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let registry = parse_manifest(&text)?;
    tracing::debug!(path = %path.display(), factories = registry.len(), "loaded schema manifest");
    Ok(registry)
}

/// Build a registry from manifest text. Factories keep their declaration order.
pub fn parse_manifest(text: &str) -> Result<SchemaRegistry, ManifestError> {
    let document = lower(text)?;
    let root = ElementPath::root().key(FACTORIES_TABLE);
    let Some(factories) = document.root.get(FACTORIES_TABLE) else {
        return Ok(SchemaRegistry::default());
    };
    let factories = expect_table(&root, factories)?;

    let mut builder = SchemaRegistry::builder();
    for (name, entry) in factories {
        let path = root.key(name.clone());
        let schema = factory(name, &path, expect_table(&path, entry)?)?;
        builder = builder.schema(schema);
    }
    Ok(builder.build())
}

fn factory(name: &SmolStr, path: &ElementPath, entry: &Table) -> Result<FactorySchema, ManifestError> {
    let mut builder = FactorySchema::builder(name.clone());
    for (key, value) in entry {
        let path = path.key(key.clone());
        builder = match key.as_str() {
            "doc" => builder.doc(expect_str(&path, value)?),
            "returns" => builder.returns(type_expr(&path, value)?),
            "location" => builder.location(location(&path, value)?),
            "params" => {
                for (param, entry) in expect_table(&path, value)? {
                    let field = field(param, &path.key(param.clone()), entry)?;
                    builder = builder.field(field);
                }
                builder
            }
            other => {
                tracing::warn!(factory = %name, key = other, "ignoring unknown manifest key");
                builder
            }
        };
    }
    Ok(builder.build())
}

fn field(name: &SmolStr, path: &ElementPath, entry: &Value) -> Result<FieldSchema, ManifestError> {
    let Some(entry) = entry.as_table() else {
        return Ok(FieldSchema::required(name.clone(), type_expr(path, entry)?));
    };

    let ty_path = path.key("type");
    let ty = match entry.get("type") {
        Some(value) => type_expr(&ty_path, value)?,
        None => return Err(ManifestError::invalid(path, "a parameter table needs a `type`")),
    };
    let required = match entry.get("required") {
        Some(value) => value
            .as_bool()
            .ok_or_else(|| ManifestError::invalid(&path.key("required"), "expected a boolean"))?,
        None => true,
    };
    Ok(match entry.get("default") {
        Some(default) => FieldSchema::optional(name.clone(), ty, default.clone()),
        None => FieldSchema {
            required,
            ..FieldSchema::required(name.clone(), ty)
        },
    })
}

fn location(path: &ElementPath, value: &Value) -> Result<SourceLocation, ManifestError> {
    let table = expect_table(path, value)?;
    let file = match table.get("file") {
        Some(file) => expect_str(&path.key("file"), file)?,
        None => return Err(ManifestError::invalid(path, "a location needs a `file`")),
    };
    let line = match table.get("line") {
        Some(line) => one_based(&path.key("line"), line)?,
        None => 0,
    };
    let column = match table.get("column") {
        Some(column) => one_based(&path.key("column"), column)?,
        None => 0,
    };
    Ok(SourceLocation::new(file, line).with_column(column))
}

fn one_based(path: &ElementPath, value: &Value) -> Result<u32, ManifestError> {
    value
        .as_integer()
        .filter(|n| *n >= 1)
        .and_then(|n| u32::try_from(n - 1).ok())
        .ok_or_else(|| ManifestError::invalid(path, "expected a positive integer"))
}

fn type_expr(path: &ElementPath, value: &Value) -> Result<TypeExpr, ManifestError> {
    TypeExpr::parse(expect_str(path, value)?).map_err(|e| ManifestError::invalid(path, e.to_string()))
}

fn expect_str<'v>(path: &ElementPath, value: &'v Value) -> Result<&'v str, ManifestError> {
    value
        .as_str()
        .ok_or_else(|| ManifestError::invalid(path, format!("expected a string, found {}", value.kind_name())))
}

fn expect_table<'v>(path: &ElementPath, value: &'v Value) -> Result<&'v Table, ManifestError> {
    value
        .as_table()
        .ok_or_else(|| ManifestError::invalid(path, format!("expected a table, found {}", value.kind_name())))
}
