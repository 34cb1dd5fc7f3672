//! Error handling.
//!
//! Store-level failures are never translated: they surface unchanged inside
//! [`DatabaseError::SqlError`]. Expected no-ops (an unoccupied source position,
//! an empty scope) are reported through return values instead of errors.

mod types;

// Re-export public API
pub use types::{DatabaseError, InitializationError};
