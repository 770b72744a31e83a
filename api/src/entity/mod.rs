//! SeaORM entity definitions
//!
//! Mirrors `migrations/0001_init.sql`.

pub mod accounts;
pub mod posts;
pub mod users;
