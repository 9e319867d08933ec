//! Factory schemas and the type expressions they declare.

use std::fmt;
use std::path::PathBuf;

use smol_str::SmolStr;

use super::registry::SchemaError;
use crate::syntax::Value;

/// Declared type of a factory parameter or return value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeExpr {
    Any,
    String,
    Integer,
    /// Integers or floats.
    Number,
    Boolean,
    Datetime,
    Table,
    Array(Box<TypeExpr>),
    Optional(Box<TypeExpr>),
    /// A host-defined type, checked only by a host-supplied checker.
    Named(SmolStr),
}

impl TypeExpr {
    pub fn array(item: TypeExpr) -> Self {
        TypeExpr::Array(Box::new(item))
    }

    pub fn optional(inner: TypeExpr) -> Self {
        TypeExpr::Optional(Box::new(inner))
    }

    pub fn named(name: impl Into<SmolStr>) -> Self {
        TypeExpr::Named(name.into())
    }

    pub fn is_any(&self) -> bool {
        matches!(self, TypeExpr::Any)
    }

    /// Parse the display form: `integer`, `array<string>`, `number?`, `Model`.
    ///
    /// The common Python spellings `int`, `float`, `str`, `bool`, `dict` and
    /// `list[T]` are accepted as aliases.
    pub fn parse(text: &str) -> Result<TypeExpr, SchemaError> {
        let text = text.trim();
        let invalid = || SchemaError::InvalidType(text.to_string());
        if let Some(inner) = text.strip_suffix('?') {
            return Ok(TypeExpr::optional(TypeExpr::parse(inner)?));
        }
        for (open, close) in [("array<", '>'), ("list[", ']')] {
            if let Some(inner) = text.strip_prefix(open) {
                let inner = inner.strip_suffix(close).ok_or_else(invalid)?;
                return Ok(TypeExpr::array(TypeExpr::parse(inner)?));
            }
        }
        let ty = match text {
            "any" | "Any" => TypeExpr::Any,
            "string" | "str" => TypeExpr::String,
            "integer" | "int" => TypeExpr::Integer,
            "number" | "float" => TypeExpr::Number,
            "boolean" | "bool" => TypeExpr::Boolean,
            "datetime" => TypeExpr::Datetime,
            "table" | "dict" => TypeExpr::Table,
            "array" | "list" => TypeExpr::array(TypeExpr::Any),
            name if is_type_name(name) => TypeExpr::named(name),
            _ => return Err(invalid()),
        };
        Ok(ty)
    }
}

fn is_type_name(text: &str) -> bool {
    let mut chars = text.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '.' | ':'))
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Any => f.write_str("any"),
            TypeExpr::String => f.write_str("string"),
            TypeExpr::Integer => f.write_str("integer"),
            TypeExpr::Number => f.write_str("number"),
            TypeExpr::Boolean => f.write_str("boolean"),
            TypeExpr::Datetime => f.write_str("datetime"),
            TypeExpr::Table => f.write_str("table"),
            TypeExpr::Array(item) => write!(f, "array<{item}>"),
            TypeExpr::Optional(inner) => write!(f, "{inner}?"),
            TypeExpr::Named(name) => f.write_str(name),
        }
    }
}

/// One parameter of a factory.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSchema {
    pub name: SmolStr,
    pub ty: TypeExpr,
    pub required: bool,
    pub default: Option<Value>,
}

impl FieldSchema {
    pub fn required(name: impl Into<SmolStr>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            ty,
            required: true,
            default: None,
        }
    }

    pub fn optional(name: impl Into<SmolStr>, ty: TypeExpr, default: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            ty,
            required: false,
            default: Some(default.into()),
        }
    }

    /// Whether leaving this field out of an object is an error.
    pub fn is_mandatory(&self) -> bool {
        self.required && self.default.is_none()
    }
}

/// Where a factory is defined, for go-to-definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub file: PathBuf,
    /// 0-indexed line.
    pub line: u32,
    /// 0-indexed column.
    pub column: u32,
}

impl SourceLocation {
    pub fn new(file: impl Into<PathBuf>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column: 0,
        }
    }

    pub fn with_column(mut self, column: u32) -> Self {
        self.column = column;
        self
    }
}

/// The structured description of a factory.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorySchema {
    pub name: SmolStr,
    pub docstring: Option<String>,
    /// Parameters in declaration order.
    pub fields: Vec<FieldSchema>,
    /// `None` when the factory does not declare what it returns.
    pub return_type: Option<TypeExpr>,
    pub source_location: Option<SourceLocation>,
}

impl FactorySchema {
    pub fn builder(name: impl Into<SmolStr>) -> FactorySchemaBuilder {
        FactorySchemaBuilder {
            schema: FactorySchema {
                name: name.into(),
                docstring: None,
                fields: Vec::new(),
                return_type: None,
                source_location: None,
            },
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Fluent construction of a [`FactorySchema`].
#[derive(Debug, Clone)]
pub struct FactorySchemaBuilder {
    schema: FactorySchema,
}

impl FactorySchemaBuilder {
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.schema.docstring = Some(doc.into());
        self
    }

    pub fn field(mut self, field: FieldSchema) -> Self {
        self.schema.fields.push(field);
        self
    }

    /// Add a required parameter.
    pub fn param(self, name: impl Into<SmolStr>, ty: TypeExpr) -> Self {
        self.field(FieldSchema::required(name, ty))
    }

    pub fn returns(mut self, ty: TypeExpr) -> Self {
        self.schema.return_type = Some(ty);
        self
    }

    pub fn location(mut self, location: SourceLocation) -> Self {
        self.schema.source_location = Some(location);
        self
    }

    pub fn build(self) -> FactorySchema {
        self.schema
    }
}
