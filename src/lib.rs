//! pos_db library: relational-database helper with ordinal position management
//!
//! This library wraps a driver connection pool in an explicit [`Database`]
//! handle and offers CRUD shortcuts over flat key-value rows, plus a
//! [`PositionManager`] that keeps an integer ordering column dense (`1..N`)
//! inside a filtered scope of rows.
//!
//! # Example
//!
//! ```no_run
//! use pos_db::{Database, Direction, Filter, PositionScope};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("sqlite:./menu.db").await?;
//! let scope = PositionScope::new("menu_items").with_filter(Filter::eq("menu_id", 4));
//!
//! let positions = db.positions();
//! positions.rebuild_pos(&scope, None).await?;
//! positions.change_pos_from_to(&scope, 5, 1).await?;
//! positions.change_pos(&scope, 17, Direction::Up, None).await?;
//! println!("last position: {}", positions.max_pos(&scope).await?);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Every operation is a strictly ordered
//! sequence of awaited round-trips on one connection.

#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod error_handling;
pub mod initialization;
pub mod storage;

// Re-export public API
pub use config::{DbSettings, LogFormat, LogLevel};
pub use error_handling::{DatabaseError, InitializationError};
pub use storage::{
    CompareOp, Database, Dialect, Direction, Filter, OrderBy, PositionManager, PositionScope, Row,
    SortOrder, Statement, Value,
};
