//! Normalized field type descriptors.

use std::fmt;
use serde::{Serialize, Serializer};

/// A reference to a named type with at most one level of pointer and
/// collection decoration.
///
/// Covers `T`, `pkg.T`, `*T`, `*pkg.T`, `[]T`, `[]pkg.T`, `[]*T` and `[]*pkg.T`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    /// Type identifier, e.g. `Time` in `*time.Time`.
    pub base: String,
    /// Package qualifier, e.g. `time` in `*time.Time`.
    pub qualifier: Option<String>,
    /// Pointer to the type, or a collection of pointers when `collection` is set.
    pub pointer: bool,
    /// Slice or fixed-size array of the type.
    pub collection: bool,
}

impl TypeRef {
    pub fn named(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            qualifier: None,
            pointer: false,
            collection: false,
        }
    }

    pub fn qualified(qualifier: impl Into<String>, base: impl Into<String>) -> Self {
        Self {
            qualifier: Some(qualifier.into()),
            ..Self::named(base)
        }
    }

    pub fn pointer(mut self) -> Self {
        self.pointer = true;
        self
    }

    pub fn collection(mut self) -> Self {
        self.collection = true;
        self
    }

    /// The type name with pointer and collection decoration removed.
    ///
    /// Qualified types keep their package prefix (`time.Time`).
    pub fn stripped_name(&self) -> String {
        match &self.qualifier {
            Some(qualifier) => format!("{}.{}", qualifier, self.base),
            None => self.base.clone(),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.collection {
            f.write_str("[]")?;
        }
        if self.pointer {
            f.write_str("*")?;
        }
        f.write_str(&self.stripped_name())
    }
}

/// The declared type of a field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldType {
    Named(TypeRef),
    /// Embedded fields and shapes outside [`TypeRef`] (maps, channels, funcs, generics...).
    #[default]
    Undetermined,
}

impl FieldType {
    pub fn type_ref(&self) -> Option<&TypeRef> {
        match self {
            FieldType::Named(type_ref) => Some(type_ref),
            FieldType::Undetermined => None,
        }
    }

    pub fn is_collection(&self) -> bool {
        self.type_ref().is_some_and(|t| t.collection)
    }

    pub fn stripped_name(&self) -> Option<String> {
        self.type_ref().map(TypeRef::stripped_name)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Named(type_ref) => type_ref.fmt(f),
            FieldType::Undetermined => Ok(()),
        }
    }
}

impl From<TypeRef> for FieldType {
    fn from(type_ref: TypeRef) -> Self {
        FieldType::Named(type_ref)
    }
}

impl Serialize for FieldType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_go_syntax() {
        assert_eq!(TypeRef::named("uint").to_string(), "uint");
        assert_eq!(TypeRef::qualified("time", "Time").pointer().to_string(), "*time.Time");
        assert_eq!(TypeRef::named("Email").pointer().collection().to_string(), "[]*Email");
        assert_eq!(TypeRef::qualified("sql", "NullString").collection().to_string(), "[]sql.NullString");
        assert_eq!(FieldType::Undetermined.to_string(), "");
    }

    #[test]
    fn stripped_name_keeps_qualifier() {
        let field_type = FieldType::from(TypeRef::qualified("time", "Time").pointer());
        assert_eq!(field_type.stripped_name().as_deref(), Some("time.Time"));
        assert!(!field_type.is_collection());
        assert_eq!(FieldType::Undetermined.stripped_name(), None);
    }
}
