mod repository;
pub use repository::{Repository, SaveOptions};

use crate::{async_trait, schema::Model, Schema};

use std::{fmt::Debug, sync::Arc};

/// A storage backend.
///
/// The driver hands out the generic, single-table repository for each
/// registered model. Anything smarter than filter-by-column lives above it.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Register the schema with the driver.
    async fn register_schema(&mut self, schema: &Schema) -> crate::Result<()>;

    /// Returns the generic repository for `model`, or `None` if the driver
    /// cannot serve it.
    fn repository(&self, model: &Model) -> Option<Arc<dyn Repository>>;
}
