//! Dense integer display order over a uniquely-constrained, nullable column.
//!
//! The column is `UNIQUE` whenever it is non-null, and every operation here is
//! written so that each individual statement satisfies that constraint on its
//! own. Nothing is cached between requests: all coordination comes from the
//! surrounding transaction and the constraint itself.
//!
//! - [`next_slot`] finds the earliest free position (filling gaps first).
//! - [`create_with_order`] inserts at that position, retrying on conflict.
//! - [`move_to`] / [`move_entity`] relocate a row with the [`ParkingShift`]
//!   protocol.
//! - [`compact`] renumbers the occupied positions back to `1..=k`.
mod compact;
mod create;
mod error;
mod reorder;
mod slot;
mod store;
mod table;

pub use compact::compact;
pub use create::create_with_order;
pub use error::OrderError;
pub use reorder::{move_entity, move_to, Direction, MoveOutcome, MovePhase, ParkingShift};
pub use slot::{first_free_slot, next_slot};
pub use store::{OrderedStore, Placement};
pub use table::OrderedTable;

use serde::{Deserialize, Serialize};

/// Default number of insert attempts before giving up on a slot.
pub const MAX_ATTEMPTS: u32 = 3;

/// Default distance a shifted band is parked away from live positions.
pub const PARK_OFFSET: i64 = 100_000;

fn default_max_attempts() -> u32 {
    MAX_ATTEMPTS
}

fn default_park_offset() -> i64 {
    PARK_OFFSET
}

/// Tunables for slot assignment and reordering (`[ordering]` in config.toml).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct OrderingPolicy {
    /// Total insert attempts made by [`create_with_order`].
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Minimum parking distance used by [`move_to`] and [`compact`].
    #[serde(default = "default_park_offset")]
    pub park_offset: i64,
    /// Whether deactivating an entity also releases its position.
    #[serde(default)]
    pub clear_on_deactivate: bool,
}

impl Default for OrderingPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            park_offset: PARK_OFFSET,
            clear_on_deactivate: false,
        }
    }
}

#[cfg(test)]
#[path = "../ordering_tests.rs"]
mod ordering_tests;
