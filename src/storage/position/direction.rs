//! Reorder directions accepted by `change_pos`.

use strum_macros::{Display, EnumIter, EnumString};

/// Where `change_pos` moves a row.
///
/// Parses from the short names `dup`, `ddown`, `up` and `down`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, clap::ValueEnum,
)]
pub enum Direction {
    /// Send to the front of the scope
    #[strum(to_string = "dup")]
    #[value(name = "dup")]
    Top,
    /// Send to the back of the scope
    #[strum(to_string = "ddown")]
    #[value(name = "ddown")]
    Bottom,
    /// Swap with the previous row
    #[strum(to_string = "up")]
    #[value(name = "up")]
    Up,
    /// Swap with the next row
    #[strum(to_string = "down")]
    #[value(name = "down")]
    Down,
}
