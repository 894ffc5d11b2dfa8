//! Association inference between models.
//!
//! A field whose type names another model is classified from naming
//! conventions alone:
//!
//! | field type | target declares `<Model>ID` | association |
//! |------------|-----------------------------|-------------|
//! | `[]T`, `[]*T` | yes | `HasMany` |
//! | `[]T`, `[]*T` | no  | `BelongsTo` |
//! | `T`, `*T`  | yes | `HasOne` |
//! | `T`, `*T`  | no  | `BelongsTo` |
//!
//! Every other field gets `None`. The walk resolves a target before
//! classifying the edge pointing at it, carrying the path of models being
//! resolved; an edge back onto that path is classified `None`.

use crate::ir::{Association, AssociationKind, ModelSet};

/// Resolves the associations of every model, in set order.
pub fn resolve_all(models: &mut ModelSet) {
    let mut ancestors = Vec::new();
    for idx in 0..models.len() {
        resolve(models, idx, &mut ancestors);
    }
}

/// Resolves the fields of the model at `idx` that have no association yet.
///
/// `ancestors` holds the models on the current resolution path; it is
/// restored before returning.
pub fn resolve(models: &mut ModelSet, idx: usize, ancestors: &mut Vec<usize>) {
    ancestors.push(idx);

    for f in 0..models[idx].fields.len() {
        let field = &models[idx].fields[f];
        if field.association.is_some() {
            continue;
        }

        let collection = field.declared_type.is_collection();
        let target = field
            .declared_type
            .stripped_name()
            .and_then(|name| models.position(&name))
            .filter(|target| !ancestors.contains(target));

        let association = match target {
            Some(target) => {
                resolve(models, target, ancestors);

                let back_reference = models[target].has_field(&models[idx].foreign_key_name());
                let kind = match (collection, back_reference) {
                    (true, true) => AssociationKind::HasMany,
                    (false, true) => AssociationKind::HasOne,
                    (_, false) => AssociationKind::BelongsTo,
                };
                Association::new(kind, models[target].name.clone())
            }
            None => Association::none(),
        };

        tracing::trace!(
            model = %models[idx].name,
            field = %models[idx].fields[f].name,
            kind = association.kind.as_str(),
            "resolved association"
        );
        models.models_mut()[idx].fields[f].association = Some(association);
    }

    ancestors.pop();
}
