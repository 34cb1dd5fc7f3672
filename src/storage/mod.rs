// storage/mod.rs
// Database operations module

mod catalog;
mod crud;
pub mod database;
pub mod dialect;
pub(crate) mod executor;
pub mod pool;
pub mod position;
pub mod query;
pub mod value;

#[cfg(test)]
pub(crate) mod test_helpers;

// Re-export commonly used items
pub use database::Database;
pub use dialect::Dialect;
pub use pool::init_db_pool_with_url;
pub use position::{Direction, PositionManager, PositionScope};
pub use query::{CompareOp, Filter, OrderBy, SortOrder, Statement};
pub use value::{Row, Value};
