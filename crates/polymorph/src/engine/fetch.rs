use super::{
    key::{AssociationIndex, AssociationKey},
    Engine,
};

use polymorph_core::{
    schema::{Model, Relation, RelationKind},
    stmt::{Filter, Record, Value},
    Result,
};

use futures::future::try_join_all;
use indexmap::IndexSet;

/// Everything fetched for one relation across a batch of owners.
#[derive(Debug)]
pub(crate) struct Fetched<'a> {
    pub(crate) relation: &'a Relation,
    pub(crate) index: AssociationIndex,
}

impl Engine {
    /// Loads the targets of `relation` for every owner in `rows`.
    ///
    /// Issues at most one repository call per target model, concurrently,
    /// and indexes the results by the key each owner will look up.
    pub(crate) async fn fetch<'a>(
        &self,
        owner: &Model,
        rows: &[Record],
        relation: &'a Relation,
    ) -> Result<Fetched<'a>> {
        let targets: Vec<&str> = match relation.kind {
            // Each discriminator value names a target model
            RelationKind::Parent => rows
                .iter()
                .filter_map(|row| row.value(&relation.discriminator_column).as_str())
                .collect::<IndexSet<_>>()
                .into_iter()
                .collect(),
            // The discriminator lives on the other side; ask every candidate
            RelationKind::Children => relation.targets.iter().map(String::as_str).collect(),
        };

        let results = try_join_all(
            targets
                .iter()
                .map(|target| self.fetch_target(owner, rows, relation, target)),
        )
        .await?;

        let mut index = AssociationIndex::new();

        for record in results.into_iter().flatten() {
            let key = AssociationKey::for_target(relation, &record);
            tracing::trace!(%key, "indexed association");
            index.entry(key).or_default().push(record);
        }

        Ok(Fetched { relation, index })
    }

    async fn fetch_target(
        &self,
        owner: &Model,
        rows: &[Record],
        relation: &Relation,
        target: &str,
    ) -> Result<Vec<Record>> {
        let repository = self.resolver.resolve(target)?;

        let eligible: Vec<&Record> = match relation.kind {
            RelationKind::Parent => rows
                .iter()
                .filter(|row| row.value(&relation.discriminator_column).as_str() == Some(target))
                .collect(),
            RelationKind::Children => rows.iter().collect(),
        };

        let (column, owner_column) = match relation.kind {
            RelationKind::Parent => (&relation.primary_column, &relation.identifier_column),
            RelationKind::Children => (&relation.identifier_column, &relation.primary_column),
        };

        let ids: IndexSet<Value> = eligible
            .iter()
            .map(|row| row.value(owner_column))
            .filter(|id| !id.is_null())
            .cloned()
            .collect();

        if ids.is_empty() {
            return Ok(vec![]);
        }

        let many = relation.is_many() || eligible.len() > 1;

        let mut filter = if many {
            Filter::any_of(&column[..], ids)
        } else {
            Filter::eq(&column[..], ids.into_iter().next().unwrap_or_default())
        };

        if relation.is_children() {
            filter = filter.and_eq(&relation.discriminator_column[..], &owner.name[..]);
        }

        tracing::debug!(
            owner = %owner.name,
            property = %relation.property_key,
            target,
            rows = eligible.len(),
            many,
            "fetching polymorphic association"
        );

        if many {
            repository.find(&filter).await
        } else {
            Ok(repository.find_one(&filter).await?.into_iter().collect())
        }
    }
}
