use polymorph_core::{
    bail,
    driver::SaveOptions,
    schema::{Auto, Model},
    stmt::{Filter, Record, Value},
    Result,
};

use indexmap::IndexMap;
use uuid::Uuid;

/// Rows of one model, keyed by primary key in insertion order.
#[derive(Debug)]
pub(crate) struct Table {
    model: Model,
    rows: IndexMap<Value, Record>,
    next_id: i64,
}

impl Table {
    pub(crate) fn new(model: Model) -> Table {
        Table {
            model,
            rows: IndexMap::new(),
            next_id: 1,
        }
    }

    pub(crate) fn find<'a>(&'a self, filter: &'a Filter) -> impl Iterator<Item = &'a Record> + 'a {
        self.rows.values().filter(move |row| filter.matches(row))
    }

    /// Inserts or updates `record`, returning it the way `options` asks.
    pub(crate) fn save(&mut self, mut record: Record, options: &SaveOptions) -> Result<Record> {
        if record.model() != self.model.name {
            bail!(
                "cannot save a `{}` record into the `{}` table",
                record.model(),
                self.model.name
            );
        }

        let key = match record.value(&self.model.primary_key) {
            Value::Null => {
                let key = self.generate_key()?;
                record.set(&self.model.primary_key[..], key.clone());
                key
            }
            key => {
                // Generated keys must stay clear of caller-supplied ones
                if let (Some(Auto::Increment), Value::I64(id)) = (self.model.auto, key) {
                    self.next_id = self.next_id.max(id.saturating_add(1));
                }
                key.clone()
            }
        };

        let mut stored = match self.rows.get(&key) {
            Some(existing) => existing.clone(),
            None => self.new_row(),
        };

        for (column, value) in record.columns() {
            if self.model.has_column(column) {
                stored.set(column, value.clone());
            }
        }

        self.rows.insert(key, stored.clone());

        if !options.reload {
            return Ok(record);
        }

        for (property_key, association) in record.associations() {
            stored.set_association(property_key, association.clone());
        }

        Ok(stored)
    }

    /// Removes every row matching `filter`, returning how many went.
    pub(crate) fn delete(&mut self, filter: &Filter) -> usize {
        let before = self.rows.len();
        self.rows.retain(|_, row| !filter.matches(row));
        before - self.rows.len()
    }

    fn new_row(&self) -> Record {
        let mut row = Record::new(&self.model.name[..]);

        for column in &self.model.columns {
            row.set(&column.name[..], column.default.clone().unwrap_or_default());
        }

        row
    }

    fn generate_key(&mut self) -> Result<Value> {
        match self.model.auto {
            Some(Auto::Increment) => {
                let id = self.next_id;
                self.next_id += 1;
                Ok(Value::I64(id))
            }
            Some(Auto::Uuid) => Ok(Value::Uuid(Uuid::new_v4())),
            None => bail!(
                "`{}` record has no `{}` and the key is not generated",
                self.model.name,
                self.model.primary_key
            ),
        }
    }
}
