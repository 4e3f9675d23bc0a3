use crate::{
    async_trait,
    stmt::{Filter, Record},
    Result,
};

use std::fmt::Debug;

/// Single-table data access for one model.
///
/// Implementations only ever persist a record's columns; associations
/// attached to a record are carried through `save` untouched.
#[async_trait]
pub trait Repository: Debug + Send + Sync {
    /// Name of the model this repository serves.
    fn model(&self) -> &str;

    /// All records matching `filter`, in storage order.
    async fn find(&self, filter: &Filter) -> Result<Vec<Record>>;

    /// The first record matching `filter`.
    async fn find_one(&self, filter: &Filter) -> Result<Option<Record>>;

    /// Insert or update one record, keyed by primary key.
    async fn save(&self, record: Record, options: &SaveOptions) -> Result<Record>;

    /// Insert or update a batch of records.
    async fn save_many(&self, records: Vec<Record>, options: &SaveOptions) -> Result<Vec<Record>>;

    /// Delete every record matching `filter`. Matching nothing is not an
    /// error.
    async fn delete(&self, filter: &Filter) -> Result<()>;

    /// Build an unsaved record from a partial one, keeping only the columns
    /// the model declares.
    fn create(&self, partial: Record) -> Record;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOptions {
    /// Return the stored columns (defaults and generated keys included)
    /// instead of the input columns.
    pub reload: bool,
}

impl SaveOptions {
    pub fn no_reload() -> SaveOptions {
        SaveOptions { reload: false }
    }
}

impl Default for SaveOptions {
    fn default() -> Self {
        SaveOptions { reload: true }
    }
}
