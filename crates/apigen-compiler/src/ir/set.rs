//! The name-ordered collection of every model found in a run.

use std::collections::HashMap;

use serde::{Serialize, Serializer};

use crate::diagnostic::GeneratorError;
use super::Model;

/// All models of a run, sorted by name, with a name lookup.
#[derive(Debug, Clone, Default)]
pub struct ModelSet {
    models: Vec<Model>,
    index: HashMap<String, usize>,
}

impl ModelSet {
    /// Sorts the models by name and builds the lookup.
    ///
    /// Two models sharing a name are rejected, whatever files they came from.
    pub fn from_models(mut models: Vec<Model>) -> Result<Self, GeneratorError> {
        models.sort_by(|a, b| {
            a.name
                .cmp(&b.name)
                .then_with(|| a.span.file.cmp(&b.span.file))
        });

        if let Some(pair) = models.windows(2).find(|pair| pair[0].name == pair[1].name) {
            return Err(GeneratorError::DuplicateModel {
                name: pair[0].name.clone(),
                first: pair[0].span.file.clone(),
                second: pair[1].span.file.clone(),
            });
        }

        let index = models
            .iter()
            .enumerate()
            .map(|(i, m)| (m.name.clone(), i))
            .collect();

        Ok(Self { models, index })
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Model> {
        self.position(name).map(|i| &self.models[i])
    }

    /// Index of the named model in sorted order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Model> {
        self.models.iter()
    }

    pub(crate) fn models_mut(&mut self) -> &mut [Model] {
        &mut self.models
    }
}

impl std::ops::Index<usize> for ModelSet {
    type Output = Model;

    fn index(&self, index: usize) -> &Model {
        &self.models[index]
    }
}

impl<'a> IntoIterator for &'a ModelSet {
    type Item = &'a Model;
    type IntoIter = std::slice::Iter<'a, Model>;

    fn into_iter(self) -> Self::IntoIter {
        self.models.iter()
    }
}

impl Serialize for ModelSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.models.serialize(serializer)
    }
}
