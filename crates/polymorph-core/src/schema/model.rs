use super::Relation;
use crate::stmt::Value;

/// An entity type as the storage layer sees it.
#[derive(Debug, Clone)]
pub struct Model {
    /// Type token naming the model, e.g. `Comment`
    pub name: String,

    /// Explicit table name. When `None`, the schema builder derives one.
    pub table_name: Option<String>,

    /// Primary key column
    pub primary_key: String,

    /// How the primary key is populated on insert, if at all
    pub auto: Option<Auto>,

    /// Persisted columns, not including the primary key
    pub columns: Vec<Column>,

    /// Declared polymorphic relations
    pub relations: Vec<Relation>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,

    /// Value stored when an insert omits the column
    pub default: Option<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Auto {
    /// Per-table counter starting at 1
    Increment,

    /// Random v4 UUID
    Uuid,
}

impl Model {
    pub fn new(name: impl Into<String>) -> Model {
        Model {
            name: name.into(),
            table_name: None,
            primary_key: "id".to_string(),
            auto: None,
            columns: vec![],
            relations: vec![],
        }
    }

    pub fn table_name(mut self, table_name: impl Into<String>) -> Model {
        self.table_name = Some(table_name.into());
        self
    }

    pub fn primary_key(mut self, column: impl Into<String>) -> Model {
        self.primary_key = column.into();
        self
    }

    pub fn auto(mut self, auto: Auto) -> Model {
        self.auto = Some(auto);
        self
    }

    pub fn column(mut self, name: impl Into<String>) -> Model {
        self.columns.push(Column {
            name: name.into(),
            default: None,
        });
        self
    }

    pub fn column_with_default(mut self, name: impl Into<String>, default: impl Into<Value>) -> Model {
        self.columns.push(Column {
            name: name.into(),
            default: Some(default.into()),
        });
        self
    }

    pub fn relation(mut self, relation: Relation) -> Model {
        self.relations.push(relation);
        self
    }

    /// Returns `true` if the column is the primary key or a declared column.
    pub fn has_column(&self, name: &str) -> bool {
        self.primary_key == name || self.columns.iter().any(|column| column.name == name)
    }

    /// Table name after the schema builder resolved it.
    pub fn resolved_table_name(&self) -> &str {
        self.table_name.as_deref().unwrap_or(&self.name)
    }
}
