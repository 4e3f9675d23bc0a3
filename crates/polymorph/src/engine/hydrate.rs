use super::{fetch::Fetched, key::AssociationKey, Engine};

use polymorph_core::{
    schema::Model,
    stmt::{Association, Record},
    Result,
};

use futures::future::try_join_all;

impl Engine {
    /// Attaches every polymorphic relation of `owner` onto `rows`.
    ///
    /// Owners are left in input order. Unmatched keys become empty
    /// associations.
    pub(crate) async fn hydrate(&self, owner: &Model, mut rows: Vec<Record>) -> Result<Vec<Record>> {
        if rows.is_empty() {
            return Ok(rows);
        }

        let fetched = try_join_all(
            owner
                .relations
                .iter()
                .map(|relation| self.fetch(owner, &rows, relation)),
        )
        .await?;

        for row in &mut rows {
            for Fetched { relation, index } in &fetched {
                let key = AssociationKey::for_owner(owner, relation, row);
                let matched = index.get(&key);

                let association = if relation.is_many() {
                    Association::Many(matched.cloned().unwrap_or_default())
                } else {
                    Association::One(
                        matched
                            .and_then(|records| records.first())
                            .cloned()
                            .map(Box::new),
                    )
                };

                row.set_association(&relation.property_key[..], association);
            }
        }

        Ok(rows)
    }

    pub(crate) async fn hydrate_one(&self, owner: &Model, row: Record) -> Result<Record> {
        let mut rows = self.hydrate(owner, vec![row]).await?;
        Ok(rows.swap_remove(0))
    }
}
