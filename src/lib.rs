// Allow panic/unwrap/expect in tests (denied globally via Cargo.toml lints)
#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        clippy::arithmetic_side_effects,
        clippy::indexing_slicing
    )
)]

pub mod db;
pub mod logging;
pub mod ordering;
pub mod user;
pub mod user_config;
pub mod utils;

// Re-export commonly used types
pub use db::{Database, DbError};
pub use ordering::{
    compact, create_with_order, move_entity, move_to, next_slot, MoveOutcome, MovePhase,
    OrderError, OrderedStore, OrderedTable, OrderingPolicy, ParkingShift,
};
pub use user::{
    compact_orders, create_user, deactivate_user, get_user, list_users, move_user,
    reactivate_user, update_user, CreateUserOptions, ListUsersFilter, MoveUserResult,
    UpdateUserOptions, UpdateUserResult, User, UserError,
};
pub use user_config::{load_user_config, UserConfig, UserConfigError};
