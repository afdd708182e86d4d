//! User CRUD operations.
mod create;
mod lifecycle;
mod order;
mod read;
mod update;

pub use create::create_user;
pub use lifecycle::{deactivate_user, reactivate_user};
pub use order::{compact_orders, move_user};
pub use read::{get_user, list_users};
pub use update::update_user;
