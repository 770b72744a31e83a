//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod account_repo;
pub mod post_repo;
pub mod user_repo;


pub use account_repo::PostgresAccountRepository;
pub use post_repo::PostgresPostRepository;
pub use user_repo::PostgresUserRepository;
