mod builder;
pub use builder::Builder;

mod model;
pub use model::{Auto, Column, Model};

mod relation;
pub use relation::{Relation, RelationKind};

mod verify;

use indexmap::IndexMap;

/// The metadata registry.
///
/// Maps a model name (type token) to its table, columns and declared
/// polymorphic relations. Built once by [`Builder`] and immutable thereafter.
#[derive(Debug, Default)]
pub struct Schema {
    pub models: IndexMap<String, Model>,
}

impl Schema {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn models(&self) -> impl Iterator<Item = &Model> {
        self.models.values()
    }

    /// Get a model by name
    pub fn model(&self, name: &str) -> Option<&Model> {
        self.models.get(name)
    }

    /// Polymorphic relations declared on a model, empty if none or if the
    /// model is unknown.
    pub fn relations(&self, model: &str) -> &[Relation] {
        self.model(model)
            .map(|model| &model.relations[..])
            .unwrap_or_default()
    }

    /// Returns `true` if the model declares at least one polymorphic relation.
    pub fn is_polymorphic(&self, model: &str) -> bool {
        !self.relations(model).is_empty()
    }
}
