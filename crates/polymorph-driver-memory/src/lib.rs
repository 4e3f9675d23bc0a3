mod table;
use table::Table;

use polymorph_core::{
    async_trait,
    driver::{Driver, Repository, SaveOptions},
    err,
    schema::Model,
    stmt::{Filter, Record},
    Result, Schema,
};

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

type Tables = Arc<Mutex<HashMap<String, Table>>>;

/// A driver keeping one table per model in process memory.
#[derive(Debug, Default, Clone)]
pub struct Memory {
    tables: Tables,
}

impl Memory {
    pub fn new() -> Memory {
        Memory::default()
    }
}

#[async_trait]
impl Driver for Memory {
    async fn register_schema(&mut self, schema: &Schema) -> Result<()> {
        let mut tables = lock(&self.tables)?;

        for model in schema.models() {
            tracing::debug!(model = %model.name, table = model.resolved_table_name(), "creating table");
            tables
                .entry(model.name.clone())
                .or_insert_with(|| Table::new(model.clone()));
        }

        Ok(())
    }

    fn repository(&self, model: &Model) -> Option<Arc<dyn Repository>> {
        let tables = lock(&self.tables).ok()?;

        if !tables.contains_key(&model.name) {
            return None;
        }

        Some(Arc::new(MemoryRepository {
            model: model.clone(),
            tables: self.tables.clone(),
        }))
    }
}

/// Generic repository over one in-memory table.
#[derive(Debug)]
pub struct MemoryRepository {
    model: Model,
    tables: Tables,
}

impl MemoryRepository {
    fn with_table<R>(&self, f: impl FnOnce(&mut Table) -> Result<R>) -> Result<R> {
        let mut tables = lock(&self.tables)?;
        let table = tables
            .get_mut(&self.model.name)
            .ok_or_else(|| err!("table for `{}` was dropped", self.model.name))?;
        f(table)
    }
}

#[async_trait]
impl Repository for MemoryRepository {
    fn model(&self) -> &str {
        &self.model.name
    }

    async fn find(&self, filter: &Filter) -> Result<Vec<Record>> {
        self.with_table(|table| Ok(table.find(filter).cloned().collect()))
    }

    async fn find_one(&self, filter: &Filter) -> Result<Option<Record>> {
        self.with_table(|table| Ok(table.find(filter).next().cloned()))
    }

    async fn save(&self, record: Record, options: &SaveOptions) -> Result<Record> {
        self.with_table(|table| table.save(record, options))
    }

    async fn save_many(&self, records: Vec<Record>, options: &SaveOptions) -> Result<Vec<Record>> {
        self.with_table(|table| {
            records
                .into_iter()
                .map(|record| table.save(record, options))
                .collect()
        })
    }

    async fn delete(&self, filter: &Filter) -> Result<()> {
        self.with_table(|table| {
            let deleted = table.delete(filter);
            tracing::trace!(model = %self.model.name, deleted, "deleted rows");
            Ok(())
        })
    }

    fn create(&self, partial: Record) -> Record {
        let mut record = Record::new(&self.model.name[..]);

        for (column, value) in partial.columns() {
            if self.model.has_column(column) {
                record.set(column, value.clone());
            }
        }

        record
    }
}

fn lock(tables: &Tables) -> Result<MutexGuard<'_, HashMap<String, Table>>> {
    tables
        .lock()
        .map_err(|_| err!("memory driver lock poisoned"))
}
