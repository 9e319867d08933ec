//! Common configuration fixtures for tests.

use confit::hir::{FactorySchema, FieldSchema, SchemaRegistry, SourceLocation, TypeExpr};

/// `add(a: number, b: number) -> number`
pub fn add_schema() -> FactorySchema {
    FactorySchema::builder("add")
        .doc("Add two numbers together.")
        .param("a", TypeExpr::Number)
        .param("b", TypeExpr::Number)
        .returns(TypeExpr::Number)
        .location(SourceLocation::new("factories.py", 4))
        .build()
}

/// `wrap(input: <input>) -> string`
pub fn wrap_schema(input: TypeExpr) -> FactorySchema {
    FactorySchema::builder("wrap")
        .doc("Wrap a value.")
        .param("input", input)
        .returns(TypeExpr::String)
        .build()
}

/// `scale(value: number, factor: number = 2.0)`
pub fn scale_schema() -> FactorySchema {
    FactorySchema::builder("scale")
        .param("value", TypeExpr::Number)
        .field(FieldSchema::optional("factor", TypeExpr::Number, 2.0))
        .build()
}

/// `add`, `wrap(input: number)` and `scale`.
pub fn registry() -> SchemaRegistry {
    registry_with_wrap(TypeExpr::Number)
}

pub fn registry_with_wrap(input: TypeExpr) -> SchemaRegistry {
    SchemaRegistry::builder()
        .schema(add_schema())
        .schema(wrap_schema(input))
        .schema(scale_schema())
        .build()
}

pub const NO_MARKERS: &str = r#"
[server]
host = "localhost"
port = 8080

[server.tls]
enabled = false
"#;

pub const ADD_MISSING_B: &str = r#"[a]
factory = "add"
a = 1
"#;

pub const ADD_UNKNOWN_Z: &str = r#"[a]
factory = "add"
a = 1
b = 2
z = 3
"#;

pub const WRAP_REFERENCES_ADD: &str = r#"[a]
factory = "add"
a = 1
b = 2

[w]
factory = "wrap"
input = "${a}"
"#;

/// Needs a catalog with both `factory` and `validator` markers.
pub const TWO_MARKERS: &str = r#"[a]
factory = "add"
validator = "wrap"
a = 1
b = 2
"#;
