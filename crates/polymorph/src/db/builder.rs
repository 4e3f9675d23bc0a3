use super::Db;
use crate::engine::{Engine, Resolver};

use polymorph_core::{
    driver::{Driver, Repository},
    schema::{self, Model},
    Result,
};

use std::{collections::HashMap, sync::Arc};

#[derive(Debug, Default)]
pub struct Builder {
    /// Schema builder
    core: schema::Builder,

    /// Repositories overriding the driver's, by type token
    repositories: HashMap<String, Arc<dyn Repository>>,
}

impl Builder {
    pub fn register(&mut self, model: Model) -> &mut Self {
        self.core.register(model);
        self
    }

    /// Serve `model` with `repository` instead of the driver's generic one.
    pub fn repository(&mut self, model: &str, repository: Arc<dyn Repository>) -> &mut Self {
        self.repositories.insert(model.to_string(), repository);
        self
    }

    /// Set the table name prefix for all derived table names
    pub fn table_name_prefix(&mut self, prefix: &str) -> &mut Self {
        self.core.table_name_prefix(prefix);
        self
    }

    pub fn build_schema(&self) -> Result<schema::Schema> {
        self.core.build()
    }

    pub async fn build(&mut self, mut driver: impl Driver) -> Result<Db> {
        let schema = Arc::new(self.build_schema()?);

        driver.register_schema(&schema).await?;

        tracing::debug!(
            models = schema.models.len(),
            custom_repositories = self.repositories.len(),
            "polymorph schema registered"
        );

        let resolver = Resolver::new(
            schema.clone(),
            Arc::new(driver),
            std::mem::take(&mut self.repositories),
        );

        Ok(Db::new(Engine::new(schema, resolver)))
    }
}
