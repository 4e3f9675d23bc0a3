use super::{Record, Value};

/// A conjunction of column predicates.
///
/// This is the whole query surface the polymorphic layer needs from a
/// repository: equality and set membership on named columns.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Filter {
    predicates: Vec<Predicate>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `column = value`
    Eq { column: String, value: Value },

    /// `column IN (values)`
    In { column: String, values: Vec<Value> },
}

impl Filter {
    /// A filter that matches every record.
    pub fn all() -> Filter {
        Filter::default()
    }

    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Filter {
        Filter::all().and_eq(column, value)
    }

    pub fn any_of<V: Into<Value>>(
        column: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Filter {
        Filter::all().and_any_of(column, values)
    }

    pub fn and_eq(mut self, column: impl Into<String>, value: impl Into<Value>) -> Filter {
        self.predicates.push(Predicate::Eq {
            column: column.into(),
            value: value.into(),
        });
        self
    }

    pub fn and_any_of<V: Into<Value>>(
        mut self,
        column: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Filter {
        self.predicates.push(Predicate::In {
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Evaluates the filter against a record's columns.
    pub fn matches(&self, record: &Record) -> bool {
        self.predicates.iter().all(|predicate| predicate.matches(record))
    }
}

impl Predicate {
    pub fn column(&self) -> &str {
        match self {
            Predicate::Eq { column, .. } | Predicate::In { column, .. } => column,
        }
    }

    pub fn matches(&self, record: &Record) -> bool {
        let actual = record.value(self.column());

        // Null never compares equal, as in SQL.
        if actual.is_null() {
            return false;
        }

        match self {
            Predicate::Eq { value, .. } => actual == value,
            Predicate::In { values, .. } => values.contains(actual),
        }
    }
}
