use super::Record;

/// A resolved polymorphic association, as attached to an owner record.
///
/// Associations only ever live in memory. Repositories never persist them as
/// columns.
#[derive(Debug, Clone, PartialEq)]
pub enum Association {
    /// A single associated record, or none.
    One(Option<Box<Record>>),

    /// Every associated record, in fetch order.
    Many(Vec<Record>),
}

impl Association {
    pub fn one(record: Record) -> Association {
        Association::One(Some(Box::new(record)))
    }

    pub fn none() -> Association {
        Association::One(None)
    }

    /// Returns the single associated record, if any.
    ///
    /// For a `Many` association this is the first record.
    pub fn as_one(&self) -> Option<&Record> {
        match self {
            Association::One(record) => record.as_deref(),
            Association::Many(records) => records.first(),
        }
    }

    pub fn as_many(&self) -> &[Record] {
        match self {
            Association::One(Some(record)) => std::slice::from_ref(&**record),
            Association::One(None) => &[],
            Association::Many(records) => records,
        }
    }

    pub fn is_many(&self) -> bool {
        matches!(self, Association::Many(_))
    }
}

impl From<Record> for Association {
    fn from(value: Record) -> Self {
        Association::one(value)
    }
}

impl From<Vec<Record>> for Association {
    fn from(value: Vec<Record>) -> Self {
        Association::Many(value)
    }
}
