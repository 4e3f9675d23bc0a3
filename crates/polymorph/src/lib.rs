pub mod db;
pub use db::Db;

mod engine;

mod repository;
pub use repository::PolymorphicRepository;

pub use polymorph_core::{
    driver::{Driver, Repository, SaveOptions},
    schema::{Auto, Model, Relation, RelationKind, Schema},
    stmt::{Association, Filter, Record, Value},
    Error, Result,
};
