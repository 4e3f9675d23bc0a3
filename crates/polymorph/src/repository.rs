use crate::engine::Engine;

use polymorph_core::{
    async_trait,
    driver::{Repository, SaveOptions},
    schema::Model,
    stmt::{Association, Filter, Record},
    Result,
};

use std::sync::Arc;

/// A repository that resolves polymorphic associations.
///
/// Wraps the repository serving one model and adds:
///
/// * hydration of every declared relation after `find` and `find_one`;
/// * discriminator and identifier derivation from attached parents, plus
///   cleanup of stale rows, before `save` and `save_many`;
/// * carrying declared association properties through `create`.
///
/// Models without polymorphic relations pass straight through.
#[derive(Debug, Clone)]
pub struct PolymorphicRepository {
    engine: Engine,
    model: String,
    inner: Arc<dyn Repository>,
}

impl PolymorphicRepository {
    pub(crate) fn new(engine: Engine, model: &str, inner: Arc<dyn Repository>) -> Self {
        PolymorphicRepository {
            engine,
            model: model.to_string(),
            inner,
        }
    }

    /// The wrapped repository.
    pub fn inner(&self) -> &Arc<dyn Repository> {
        &self.inner
    }

    /// Attaches the declared relations to records loaded elsewhere.
    pub async fn hydrate(&self, rows: Vec<Record>) -> Result<Vec<Record>> {
        match self.polymorphic_model() {
            Some(model) => self.engine.hydrate(model, rows).await,
            None => Ok(rows),
        }
    }

    pub async fn hydrate_one(&self, row: Record) -> Result<Record> {
        match self.polymorphic_model() {
            Some(model) => self.engine.hydrate_one(model, row).await,
            None => Ok(row),
        }
    }

    /// The model, if it declares any polymorphic relation.
    fn polymorphic_model(&self) -> Option<&Model> {
        if !self.engine.schema.is_polymorphic(&self.model) {
            return None;
        }
        self.engine.schema.model(&self.model)
    }
}

#[async_trait]
impl Repository for PolymorphicRepository {
    fn model(&self) -> &str {
        &self.model
    }

    async fn find(&self, filter: &Filter) -> Result<Vec<Record>> {
        let rows = self.inner.find(filter).await?;
        self.hydrate(rows).await
    }

    async fn find_one(&self, filter: &Filter) -> Result<Option<Record>> {
        let Some(row) = self.inner.find_one(filter).await? else {
            return Ok(None);
        };
        Ok(Some(self.hydrate_one(row).await?))
    }

    async fn save(&self, mut record: Record, options: &SaveOptions) -> Result<Record> {
        let Some(model) = self.polymorphic_model() else {
            return self.inner.save(record, options).await;
        };

        self.engine.normalize(model, &mut record);
        self.engine.delete_stale(model, &record).await?;
        self.inner.save(record, options).await
    }

    async fn save_many(&self, mut records: Vec<Record>, options: &SaveOptions) -> Result<Vec<Record>> {
        let Some(model) = self.polymorphic_model() else {
            return self.inner.save_many(records, options).await;
        };

        for record in &mut records {
            self.engine.normalize(model, record);
        }

        self.engine.delete_stale_many(model, &records).await?;
        self.inner.save_many(records, options).await
    }

    async fn delete(&self, filter: &Filter) -> Result<()> {
        self.inner.delete(filter).await
    }

    fn create(&self, mut partial: Record) -> Record {
        let carried: Vec<(String, Association)> = self
            .engine
            .schema
            .relations(&self.model)
            .iter()
            .filter_map(|relation| {
                partial
                    .take_association(&relation.property_key)
                    .map(|association| (relation.property_key.clone(), association))
            })
            .collect();

        let mut record = self.inner.create(partial);

        for (property_key, association) in carried {
            record.set_association(property_key, association);
        }

        record
    }
}
