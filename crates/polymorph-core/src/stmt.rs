mod association;
pub use association::Association;

mod filter;
pub use filter::{Filter, Predicate};

mod record;
pub use record::Record;

mod value;
pub use value::Value;
