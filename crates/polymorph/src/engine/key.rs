use polymorph_core::{
    schema::{Model, Relation, RelationKind},
    stmt::{Record, Value},
};

use indexmap::IndexMap;
use std::fmt;

/// Fetched target records, grouped by the owner key they belong to.
///
/// Built fresh for every fetch and dropped once merged into the owners.
pub(crate) type AssociationIndex = IndexMap<AssociationKey, Vec<Record>>;

/// `<discriminator>:<identifier>` pair joining an owner to its targets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct AssociationKey {
    discriminator: Value,
    identifier: Value,
}

impl AssociationKey {
    pub(crate) fn new(discriminator: impl Into<Value>, identifier: impl Into<Value>) -> Self {
        AssociationKey {
            discriminator: discriminator.into(),
            identifier: identifier.into(),
        }
    }

    /// Key of a fetched target record.
    ///
    /// A parent is keyed by its own model name and primary key; a child by the
    /// discriminator and identifier it stores.
    pub(crate) fn for_target(relation: &Relation, target: &Record) -> Self {
        match relation.kind {
            RelationKind::Parent => AssociationKey::new(
                target.model(),
                target.value(&relation.primary_column).clone(),
            ),
            RelationKind::Children => AssociationKey::new(
                target.value(&relation.discriminator_column).clone(),
                target.value(&relation.identifier_column).clone(),
            ),
        }
    }

    /// Key an owner record looks itself up by.
    pub(crate) fn for_owner(owner: &Model, relation: &Relation, record: &Record) -> Self {
        match relation.kind {
            RelationKind::Parent => AssociationKey::new(
                record.value(&relation.discriminator_column).clone(),
                record.value(&relation.identifier_column).clone(),
            ),
            RelationKind::Children => AssociationKey::new(
                &owner.name[..],
                record.value(&relation.primary_column).clone(),
            ),
        }
    }
}

impl fmt::Display for AssociationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.discriminator, self.identifier)
    }
}
