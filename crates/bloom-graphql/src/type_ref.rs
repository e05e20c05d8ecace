//! Introspected GraphQL type references

use std::fmt;

use serde::Deserialize;

/// The kind of an introspected type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
    NonNull,
    #[default]
    #[serde(other)]
    Other,
}

/// A possibly wrapped type, as returned by the `type` field of introspection
///
/// Wrapping kinds (`LIST`, `NON_NULL`) carry an `ofType`; named kinds carry a `name`. The
/// depth of `ofType` nesting is bounded by the introspection query that produced it, so a
/// wrapper may arrive with its inner type cut off, or as an empty object. A descriptor without
/// a `kind` renders as `Unknown`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRef {
    #[serde(default)]
    pub kind: TypeKind,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub of_type: Option<Box<TypeRef>>,
}

impl TypeRef {
    /// A named, unwrapped type
    pub fn named(kind: TypeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: Some(name.into()),
            of_type: None,
        }
    }

    /// A non-null wrapper around `inner`
    pub fn non_null(inner: TypeRef) -> Self {
        Self {
            kind: TypeKind::NonNull,
            name: None,
            of_type: Some(Box::new(inner)),
        }
    }

    /// A list wrapper around `inner`
    pub fn list(inner: TypeRef) -> Self {
        Self {
            kind: TypeKind::List,
            name: None,
            of_type: Some(Box::new(inner)),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TypeKind::NonNull => write!(f, "{}!", Inner(self.of_type.as_deref())),
            TypeKind::List => write!(f, "[{}]", Inner(self.of_type.as_deref())),
            _ => match self.name.as_deref() {
                Some(name) if !name.is_empty() => f.write_str(name),
                _ => f.write_str(UNKNOWN),
            },
        }
    }
}

const UNKNOWN: &str = "Unknown";

/// A wrapped type that may have been cut off
struct Inner<'a>(Option<&'a TypeRef>);

impl fmt::Display for Inner<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(type_ref) => fmt::Display::fmt(type_ref, f),
            None => f.write_str(UNKNOWN),
        }
    }
}

/// Format a type reference the way it would be written in SDL, e.g. `[ID!]`
pub fn format_type(type_ref: Option<&TypeRef>) -> String {
    Inner(type_ref).to_string()
}
