//! Checking raw values against declared types.

use std::fmt;

use super::schema::TypeExpr;
use crate::syntax::Value;

/// One reason a value does not fit a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeViolation {
    pub message: String,
}

impl TypeViolation {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    fn expected(ty: &str) -> Self {
        Self::new(format!("Input should be a valid {ty}"))
    }

    fn at_index(self, index: usize) -> Self {
        Self::new(format!("[{index}]: {}", self.message))
    }
}

impl fmt::Display for TypeViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Decides whether a value is acceptable for a declared type.
pub trait TypeChecker: Send + Sync {
    /// Every violation found; empty when the value fits.
    fn check(&self, ty: &TypeExpr, value: &Value) -> Vec<TypeViolation>;
}

/// Structural checks for the built-in types.
///
/// `Any` and named types accept everything; a host that knows its named
/// types wraps this checker in its own [`TypeChecker`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTypeChecker;

impl TypeChecker for BuiltinTypeChecker {
    fn check(&self, ty: &TypeExpr, value: &Value) -> Vec<TypeViolation> {
        let fits = match ty {
            TypeExpr::Any | TypeExpr::Named(_) => true,
            TypeExpr::Optional(inner) => return self.check(inner, value),
            TypeExpr::String => matches!(value, Value::String(_)),
            TypeExpr::Integer => matches!(value, Value::Integer(_)),
            TypeExpr::Number => matches!(value, Value::Integer(_) | Value::Float(_)),
            TypeExpr::Boolean => matches!(value, Value::Boolean(_)),
            TypeExpr::Datetime => matches!(value, Value::Datetime(_)),
            TypeExpr::Table => matches!(value, Value::Table(_)),
            TypeExpr::Array(item) => {
                let Value::Array(items) = value else {
                    return vec![TypeViolation::expected("array")];
                };
                return items
                    .iter()
                    .enumerate()
                    .flat_map(|(i, v)| {
                        self.check(item, v)
                            .into_iter()
                            .map(move |violation| violation.at_index(i))
                    })
                    .collect();
            }
        };
        if fits {
            Vec::new()
        } else {
            vec![TypeViolation::expected(&ty.to_string())]
        }
    }
}
