//! Model intermediate representation.

use serde::Serialize;

use crate::diagnostic::Span;
use super::{Association, AssociationKind, FieldType};

/// IR representation of one declared struct.
#[derive(Debug, Clone, Serialize)]
pub struct Model {
    /// Struct name.
    pub name: String,

    /// Fields in declaration order.
    pub fields: Vec<Field>,

    /// Where the struct was declared.
    #[serde(skip)]
    pub span: Span,
}

impl Model {
    pub fn new(name: impl Into<String>, fields: Vec<Field>, span: Span) -> Self {
        Self {
            name: name.into(),
            fields,
            span,
        }
    }

    /// Whether the model declares a field with exactly this name.
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    /// The foreign key another model would declare to point back at this one.
    pub fn foreign_key_name(&self) -> String {
        format!("{}ID", self.name)
    }
}

/// One declared attribute of a model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    /// Identifier as declared.
    pub name: String,

    /// External (JSON) name.
    pub serialized_name: String,

    /// Normalized declared type.
    pub declared_type: FieldType,

    /// The tag literal as written, quotes included.
    pub raw_tag: Option<String>,

    /// Set by the association resolver.
    pub association: Option<Association>,
}

impl Field {
    pub fn new(name: impl Into<String>, declared_type: impl Into<FieldType>) -> Self {
        let name = name.into();
        Self {
            serialized_name: name.clone(),
            name,
            declared_type: declared_type.into(),
            raw_tag: None,
            association: None,
        }
    }

    pub fn with_serialized_name(mut self, serialized_name: impl Into<String>) -> Self {
        self.serialized_name = serialized_name.into();
        self
    }

    pub fn with_raw_tag(mut self, raw_tag: impl Into<String>) -> Self {
        self.raw_tag = Some(raw_tag.into());
        self
    }

    /// Association kind, `None` when the field has not been resolved yet.
    pub fn association_kind(&self) -> Option<AssociationKind> {
        self.association.as_ref().map(|a| a.kind)
    }
}
