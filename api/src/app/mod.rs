//! Application layer
//!
//! Use cases and service orchestration. Services coordinate between domain
//! entities and the repository ports.

pub mod account_service;
mod lookup;
pub mod post_service;
pub mod profile_service;
pub mod relationship_service;
pub mod timeline_service;
pub mod views;

pub use account_service::{AccountService, AuthService};
pub use profile_service::{AccountCreatedHandler, BlogService, ProfileService};
pub use views::{EditProfile, PostView, Profile, UserInfo};
