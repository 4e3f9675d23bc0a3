/// Default name of the child-side column naming the target type.
pub const DEFAULT_DISCRIMINATOR_COLUMN: &str = "entityType";

/// Default name of the child-side column holding the target's key.
pub const DEFAULT_IDENTIFIER_COLUMN: &str = "entityId";

/// Default name of the parent-side primary key column.
pub const DEFAULT_PRIMARY_COLUMN: &str = "id";

/// One declared polymorphic relationship on an owner model.
///
/// Descriptors are inert: they are attached to a model when it is
/// registered and never change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Relation {
    /// Owner property holding the resolved association
    pub property_key: String,

    pub kind: RelationKind,

    /// Child-side column naming the target model
    pub discriminator_column: String,

    /// Child-side column holding the target's primary key value
    pub identifier_column: String,

    /// Parent-side primary key column
    pub primary_column: String,

    /// Candidate target models
    pub targets: Vec<String>,

    /// Only meaningful for `Children`
    pub has_many: bool,

    /// Purge existing target rows before the owner is written
    pub delete_before_update: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    /// The owner holds the discriminator and identifier and points at one
    /// row of a dynamically chosen model.
    Parent,

    /// Rows of the target models point back at the owner.
    Children,
}

impl Relation {
    /// Declares that the owner points at one of `targets`.
    pub fn parent<T: Into<String>>(
        property_key: impl Into<String>,
        targets: impl IntoIterator<Item = T>,
    ) -> Relation {
        Relation::new(property_key, RelationKind::Parent, targets)
    }

    /// Declares that rows of `targets` point back at the owner.
    pub fn children<T: Into<String>>(
        property_key: impl Into<String>,
        targets: impl IntoIterator<Item = T>,
    ) -> Relation {
        Relation::new(property_key, RelationKind::Children, targets)
    }

    fn new<T: Into<String>>(
        property_key: impl Into<String>,
        kind: RelationKind,
        targets: impl IntoIterator<Item = T>,
    ) -> Relation {
        Relation {
            property_key: property_key.into(),
            kind,
            discriminator_column: DEFAULT_DISCRIMINATOR_COLUMN.to_string(),
            identifier_column: DEFAULT_IDENTIFIER_COLUMN.to_string(),
            primary_column: DEFAULT_PRIMARY_COLUMN.to_string(),
            targets: targets.into_iter().map(Into::into).collect(),
            has_many: false,
            delete_before_update: false,
        }
    }

    pub fn discriminator_column(mut self, column: impl Into<String>) -> Relation {
        self.discriminator_column = column.into();
        self
    }

    pub fn identifier_column(mut self, column: impl Into<String>) -> Relation {
        self.identifier_column = column.into();
        self
    }

    pub fn primary_column(mut self, column: impl Into<String>) -> Relation {
        self.primary_column = column.into();
        self
    }

    pub fn has_many(mut self) -> Relation {
        self.has_many = true;
        self
    }

    pub fn delete_before_update(mut self) -> Relation {
        self.delete_before_update = true;
        self
    }

    pub fn is_parent(&self) -> bool {
        self.kind == RelationKind::Parent
    }

    pub fn is_children(&self) -> bool {
        self.kind == RelationKind::Children
    }

    /// Whether the relation resolves to a collection.
    ///
    /// A parent pointer is singular by construction, so `has_many` only
    /// counts for `Children`.
    pub fn is_many(&self) -> bool {
        self.has_many && self.is_children()
    }
}
