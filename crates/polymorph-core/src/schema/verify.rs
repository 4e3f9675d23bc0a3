use super::{Model, Relation, Schema};
use crate::{Error, Result};

use std::collections::HashSet;

struct Verify<'a> {
    schema: &'a Schema,
}

impl Schema {
    pub(super) fn verify(&self) -> Result<()> {
        Verify { schema: self }.verify()
    }
}

impl Verify<'_> {
    fn verify(&self) -> Result<()> {
        for model in self.schema.models() {
            self.verify_columns_are_named(model)?;

            let mut property_keys = HashSet::new();

            for relation in &model.relations {
                // Hydration writes each relation's property concurrently, so
                // the keys must be disjoint.
                if !property_keys.insert(&relation.property_key[..]) {
                    return Err(Error::invalid_schema(format!(
                        "model `{}` declares property `{}` more than once",
                        model.name, relation.property_key
                    )));
                }

                self.verify_relation(model, relation)?;
            }
        }

        Ok(())
    }

    fn verify_columns_are_named(&self, model: &Model) -> Result<()> {
        if model.primary_key.is_empty() {
            return Err(Error::invalid_schema(format!(
                "model `{}` has an empty primary key column name",
                model.name
            )));
        }

        let mut seen = HashSet::new();
        seen.insert(&model.primary_key[..]);

        for column in &model.columns {
            if column.name.is_empty() {
                return Err(Error::invalid_schema(format!(
                    "model `{}` has a column with an empty name",
                    model.name
                )));
            }

            if !seen.insert(&column.name[..]) {
                return Err(Error::invalid_schema(format!(
                    "model `{}` declares column `{}` more than once",
                    model.name, column.name
                )));
            }
        }

        Ok(())
    }

    fn verify_relation(&self, model: &Model, relation: &Relation) -> Result<()> {
        if relation.property_key.is_empty() {
            return Err(Error::invalid_schema(format!(
                "model `{}` declares a relation with an empty property key",
                model.name
            )));
        }

        if model.has_column(&relation.property_key) {
            return Err(Error::invalid_schema(format!(
                "relation `{}.{}` shadows a column of the same name",
                model.name, relation.property_key
            )));
        }

        if relation.targets.is_empty() {
            return Err(Error::invalid_schema(format!(
                "relation `{}.{}` declares no target models",
                model.name, relation.property_key
            )));
        }

        for column in [
            &relation.discriminator_column,
            &relation.identifier_column,
            &relation.primary_column,
        ] {
            if column.is_empty() {
                return Err(Error::invalid_schema(format!(
                    "relation `{}.{}` has an empty column name",
                    model.name, relation.property_key
                )));
            }
        }

        // Unknown targets surface as `RepositoryNotFound` at resolution time.
        Ok(())
    }
}
