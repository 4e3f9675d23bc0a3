use super::Engine;

use polymorph_core::{
    schema::Model,
    stmt::{Association, Filter, Record, Value},
    Result,
};

use futures::future::try_join_all;

impl Engine {
    /// Derives discriminator and identifier columns from attached parents.
    ///
    /// A column the caller already set (present and not `Null`) is left
    /// alone; each of the two columns is checked on its own.
    pub(crate) fn normalize(&self, owner: &Model, record: &mut Record) {
        for relation in owner.relations.iter().filter(|relation| relation.is_parent()) {
            let Some(parent) = record
                .association(&relation.property_key)
                .and_then(Association::as_one)
            else {
                continue;
            };

            let identifier = parent.value(&relation.primary_column).clone();
            let discriminator = Value::from(parent.model());

            if !identifier.is_null() && !record.is_set(&relation.identifier_column) {
                tracing::debug!(
                    owner = %owner.name,
                    property = %relation.property_key,
                    column = %relation.identifier_column,
                    %identifier,
                    "derived identifier from attached parent"
                );
                record.set(&relation.identifier_column[..], identifier);
            }

            if !record.is_set(&relation.discriminator_column) {
                tracing::debug!(
                    owner = %owner.name,
                    property = %relation.property_key,
                    column = %relation.discriminator_column,
                    %discriminator,
                    "derived discriminator from attached parent"
                );
                record.set(&relation.discriminator_column[..], discriminator);
            }
        }
    }

    /// Deletes the rows pointing at `record` through every relation flagged
    /// `delete_before_update`.
    ///
    /// One delete per candidate model, all issued concurrently, matching rows
    /// whose discriminator names that candidate and whose identifier holds
    /// the owner key. Deleting nothing is fine. A record without a key yet cannot be pointed at, so
    /// only its repositories are resolved.
    pub(crate) async fn delete_stale(&self, owner: &Model, record: &Record) -> Result<()> {
        let mut deletes = vec![];

        for relation in owner
            .relations
            .iter()
            .filter(|relation| relation.delete_before_update)
        {
            let key = record.value(&relation.primary_column);

            for target in &relation.targets {
                let repository = self.resolver.resolve(target)?;

                if key.is_null() {
                    continue;
                }

                let filter = Filter::eq(&relation.discriminator_column[..], &target[..])
                    .and_eq(&relation.identifier_column[..], key.clone());

                tracing::debug!(
                    owner = %owner.name,
                    property = %relation.property_key,
                    target = %target,
                    %key,
                    "deleting stale associations"
                );

                deletes.push(async move { repository.delete(&filter).await });
            }
        }

        try_join_all(deletes).await?;
        Ok(())
    }

    /// [`Engine::delete_stale`] for a batch, one concurrent branch per record.
    pub(crate) async fn delete_stale_many(&self, owner: &Model, records: &[Record]) -> Result<()> {
        try_join_all(
            records
                .iter()
                .map(|record| self.delete_stale(owner, record)),
        )
        .await?;
        Ok(())
    }
}
