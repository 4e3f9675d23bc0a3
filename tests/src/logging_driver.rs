use polymorph_core::{
    async_trait,
    driver::{Driver, Repository, SaveOptions},
    schema::Model,
    stmt::{Filter, Record},
    Error, Result, Schema,
};

use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};

/// A repository call, as seen by the driver.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Find(Filter),
    FindOne(Filter),
    Save(Record),
    SaveMany(Vec<Record>),
    Delete(Filter),
}

#[derive(Debug, Clone)]
pub struct DriverOp {
    /// Model whose repository received the call
    pub model: String,
    pub operation: Operation,
}

/// A driver wrapper that logs every repository operation and can be told to
/// fail operations for given models.
#[derive(Debug)]
pub struct LoggingDriver {
    inner: Box<dyn Driver>,

    /// Log of all operations executed through this driver
    /// Using Arc<Mutex> for thread-safe access from tests
    ops_log: Arc<Mutex<Vec<DriverOp>>>,

    /// Models whose operations fail
    failing: Arc<Mutex<HashSet<String>>>,
}

impl LoggingDriver {
    pub fn new(driver: Box<dyn Driver>) -> Self {
        Self {
            inner: driver,
            ops_log: Arc::new(Mutex::new(Vec::new())),
            failing: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Get a handle to access the operations log
    pub fn ops_log_handle(&self) -> Arc<Mutex<Vec<DriverOp>>> {
        self.ops_log.clone()
    }

    pub fn failing_handle(&self) -> Arc<Mutex<HashSet<String>>> {
        self.failing.clone()
    }
}

#[async_trait]
impl Driver for LoggingDriver {
    async fn register_schema(&mut self, schema: &Schema) -> Result<()> {
        self.inner.register_schema(schema).await
    }

    fn repository(&self, model: &Model) -> Option<Arc<dyn Repository>> {
        let inner = self.inner.repository(model)?;

        Some(Arc::new(LoggingRepository {
            inner,
            ops_log: self.ops_log.clone(),
            failing: self.failing.clone(),
        }))
    }
}

#[derive(Debug)]
struct LoggingRepository {
    inner: Arc<dyn Repository>,
    ops_log: Arc<Mutex<Vec<DriverOp>>>,
    failing: Arc<Mutex<HashSet<String>>>,
}

impl LoggingRepository {
    /// Records the operation, then fails it if the model is marked failing.
    fn log(&self, operation: Operation) -> Result<()> {
        let model = self.inner.model().to_string();

        self.ops_log
            .lock()
            .expect("Failed to acquire ops log lock")
            .push(DriverOp {
                model: model.clone(),
                operation,
            });

        if self
            .failing
            .lock()
            .expect("Failed to acquire failing lock")
            .contains(&model)
        {
            return Err(Error::driver_operation_failed(std::io::Error::other(
                format!("injected failure for `{model}`"),
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl Repository for LoggingRepository {
    fn model(&self) -> &str {
        self.inner.model()
    }

    async fn find(&self, filter: &Filter) -> Result<Vec<Record>> {
        self.log(Operation::Find(filter.clone()))?;
        self.inner.find(filter).await
    }

    async fn find_one(&self, filter: &Filter) -> Result<Option<Record>> {
        self.log(Operation::FindOne(filter.clone()))?;
        self.inner.find_one(filter).await
    }

    async fn save(&self, record: Record, options: &SaveOptions) -> Result<Record> {
        self.log(Operation::Save(record.clone()))?;
        self.inner.save(record, options).await
    }

    async fn save_many(&self, records: Vec<Record>, options: &SaveOptions) -> Result<Vec<Record>> {
        self.log(Operation::SaveMany(records.clone()))?;
        self.inner.save_many(records, options).await
    }

    async fn delete(&self, filter: &Filter) -> Result<()> {
        self.log(Operation::Delete(filter.clone()))?;
        self.inner.delete(filter).await
    }

    fn create(&self, partial: Record) -> Record {
        self.inner.create(partial)
    }
}
