mod builder;
pub use builder::Builder;

use crate::{engine::Engine, PolymorphicRepository};

use polymorph_core::{
    driver::Repository,
    stmt::{Filter, Record},
    Error, Result, Schema,
};

use std::sync::Arc;

/// A database handle.
///
/// Cheap to clone; every clone shares the schema, the driver and the custom
/// repositories registered on the builder.
#[derive(Debug, Clone)]
pub struct Db {
    engine: Engine,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub(crate) fn new(engine: Engine) -> Db {
        Db { engine }
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.engine.schema
    }

    /// The polymorphic repository for `model`.
    ///
    /// Fails with a repository-not-found error when nothing can serve the
    /// model.
    pub fn repository(&self, model: &str) -> Result<PolymorphicRepository> {
        let inner = self.engine.resolver.resolve(model)?;
        Ok(PolymorphicRepository::new(self.engine.clone(), model, inner))
    }

    /// Execute a query, returning all matching, hydrated records
    pub async fn all(&self, model: &str, filter: &Filter) -> Result<Vec<Record>> {
        self.repository(model)?.find(filter).await
    }

    pub async fn first(&self, model: &str, filter: &Filter) -> Result<Option<Record>> {
        self.repository(model)?.find_one(filter).await
    }

    /// Like [`Db::first`], but a missing record is an error.
    pub async fn get(&self, model: &str, filter: &Filter) -> Result<Record> {
        match self.first(model, filter).await? {
            Some(record) => Ok(record),
            None => Err(Error::record_not_found(format!(
                "model={model} filter={filter:?}"
            ))),
        }
    }
}
