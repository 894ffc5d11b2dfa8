//! Relationship metadata attached to model fields.

use serde::Serialize;

/// The inferred relationship between a field's model and the model it refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssociationKind {
    None,
    BelongsTo,
    HasOne,
    HasMany,
}

impl AssociationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssociationKind::None => "none",
            AssociationKind::BelongsTo => "belongs_to",
            AssociationKind::HasOne => "has_one",
            AssociationKind::HasMany => "has_many",
        }
    }
}

/// Association attached to a field by the resolver.
///
/// `target` is the name of the related model, a key into the model set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Association {
    pub kind: AssociationKind,
    pub target: Option<String>,
}

impl Association {
    pub fn none() -> Self {
        Self {
            kind: AssociationKind::None,
            target: None,
        }
    }

    pub fn new(kind: AssociationKind, target: impl Into<String>) -> Self {
        Self {
            kind,
            target: Some(target.into()),
        }
    }
}
