use super::{Association, Value};

use indexmap::IndexMap;

static NULL: Value = Value::Null;

/// One entity instance.
///
/// A record knows the name of the model it belongs to (its type token), the
/// column values that are persisted, and any associations attached in
/// memory.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    model: String,
    columns: IndexMap<String, Value>,
    associations: IndexMap<String, Association>,
}

impl Record {
    pub fn new(model: impl Into<String>) -> Record {
        Record {
            model: model.into(),
            columns: IndexMap::new(),
            associations: IndexMap::new(),
        }
    }

    /// Name of the model this record belongs to.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Builder-style column assignment.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Record {
        self.set(column, value);
        self
    }

    /// Builder-style association assignment.
    pub fn with_association(
        mut self,
        property_key: impl Into<String>,
        association: impl Into<Association>,
    ) -> Record {
        self.set_association(property_key, association);
        self
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns.get(column)
    }

    /// Returns the column's value, `Null` when the column is absent.
    pub fn value(&self, column: &str) -> &Value {
        self.columns.get(column).unwrap_or(&NULL)
    }

    /// Returns `true` if the column is present and not `Null`.
    pub fn is_set(&self, column: &str) -> bool {
        !self.value(column).is_null()
    }

    pub fn set(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.columns.insert(column.into(), value.into());
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns.iter().map(|(name, value)| (&name[..], value))
    }

    pub fn association(&self, property_key: &str) -> Option<&Association> {
        self.associations.get(property_key)
    }

    pub fn set_association(
        &mut self,
        property_key: impl Into<String>,
        association: impl Into<Association>,
    ) {
        self.associations
            .insert(property_key.into(), association.into());
    }

    pub fn take_association(&mut self, property_key: &str) -> Option<Association> {
        self.associations.shift_remove(property_key)
    }

    pub fn associations(&self) -> impl Iterator<Item = (&str, &Association)> {
        self.associations
            .iter()
            .map(|(name, association)| (&name[..], association))
    }

    /// Drops every in-memory association, leaving only columns.
    pub fn without_associations(mut self) -> Record {
        self.associations.clear();
        self
    }
}
