//! Structured SQL building.
//!
//! - [`Filter`]: structured row predicates in place of raw `WHERE` text
//! - [`OrderBy`]: ordering terms
//! - [`Statement`]: SQL text plus bind parameters, placeholders numbered per dialect

mod filter;
mod order;
mod statement;

pub use filter::{CompareOp, Filter};
pub use order::{OrderBy, SortOrder};
pub use statement::Statement;
