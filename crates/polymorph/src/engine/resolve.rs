use polymorph_core::{Driver, Error, Repository, Result, Schema};

use std::{collections::HashMap, sync::Arc};

/// Locates the repository serving a type token.
///
/// Custom repositories registered on the builder win; otherwise the driver
/// provides its generic repository for the model the token names.
#[derive(Debug, Clone)]
pub(crate) struct Resolver {
    schema: Arc<Schema>,
    driver: Arc<dyn Driver>,
    custom: Arc<HashMap<String, Arc<dyn Repository>>>,
}

impl Resolver {
    pub(crate) fn new(
        schema: Arc<Schema>,
        driver: Arc<dyn Driver>,
        custom: HashMap<String, Arc<dyn Repository>>,
    ) -> Resolver {
        Resolver {
            schema,
            driver,
            custom: Arc::new(custom),
        }
    }

    pub(crate) fn resolve(&self, model: &str) -> Result<Arc<dyn Repository>> {
        if let Some(repository) = self.custom.get(model) {
            tracing::trace!(model, "resolved custom repository");
            return Ok(repository.clone());
        }

        let Some(repository) = self
            .schema
            .model(model)
            .and_then(|model| self.driver.repository(model))
        else {
            tracing::debug!(model, "no repository for type token");
            return Err(Error::repository_not_found(model));
        };

        tracing::trace!(model, "resolved generic repository");
        Ok(repository)
    }
}
