//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod account;
pub mod post;
pub mod user;

pub use account::Account;
pub use post::{sort_newest_first, Post, PostId};
pub use user::{User, UserId};
