mod fetch;
mod hydrate;
mod key;
mod resolve;
mod write;

pub(crate) use resolve::Resolver;

use polymorph_core::Schema;

use std::sync::Arc;

/// Resolves and persists polymorphic associations on top of the generic
/// repositories.
#[derive(Debug, Clone)]
pub(crate) struct Engine {
    /// The metadata registry
    pub(crate) schema: Arc<Schema>,

    /// Type token -> repository
    pub(crate) resolver: Resolver,
}

impl Engine {
    pub(crate) fn new(schema: Arc<Schema>, resolver: Resolver) -> Engine {
        Engine { schema, resolver }
    }
}
