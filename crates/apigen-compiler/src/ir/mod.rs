//! Language-agnostic intermediate representation.
//!
//! The frontend produces one [`Model`] per struct declaration; the
//! association resolver annotates fields in place; code generation only reads.

mod association;
mod model;
mod set;
mod types;

pub use association::{Association, AssociationKind};
pub use model::{Field, Model};
pub use set::ModelSet;
pub use types::{FieldType, TypeRef};
