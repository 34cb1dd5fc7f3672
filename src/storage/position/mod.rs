//! Ordinal position management for reorderable records.
//!
//! - [`PositionScope`]: which rows share one dense ordering
//! - [`PositionManager`]: rebuild, reset, move and swap operations
//! - [`Direction`]: reorder directions for `change_pos`

mod direction;
mod manager;
mod scope;

pub use direction::Direction;
pub use manager::PositionManager;
pub use scope::PositionScope;
