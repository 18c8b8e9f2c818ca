//! # rbac-api
//!
//! A user, role and permission service built around a role-based access
//! control core.
//!
//! ## Features
//!
//! - **Principals**: registration with argon2 password hashing and JWT login
//! - **Catalogs**: roles and permissions with case-insensitive unique names
//! - **Assignment graph**: idempotent user-role and role-permission grants
//! - **Evaluator**: role and permission checks used to gate HTTP routes
//! - **Storage**: sea-orm over SQLite or PostgreSQL, or an in-memory store
//!
//! ## Embedding the core
//!
//! ```rust,no_run
//! use rbac_api::{RbacSystem, config::RbacConfig, storage::Repositories};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let rbac = RbacSystem::new(&Repositories::in_memory(), &RbacConfig::default());
//!     let admin = rbac.bootstrap().await?;
//!
//!     let alice = rbac.directory.create("alice@example.com", "hash".into(), "Alice").await?;
//!     rbac.assignments.assign_role(alice.id, admin.id).await?;
//!
//!     assert!(rbac.evaluator.has_permission(alice.id, "users.read").await?);
//!     Ok(())
//! }
//! ```
//!
//! ## Server mode
//!
//! ```rust,no_run
//! use rbac_api::{Config, server::HttpServer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/rbac.yaml").await?;
//!     HttpServer::new(&config).await?.start().await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod auth;
pub mod config;
pub mod core;
pub mod server;
pub mod storage;
pub mod utils;

// Re-export main types
pub use auth::{AuthenticatedUser, Decision, RbacSystem};
pub use config::Config;
pub use utils::error::{ApiError, Result};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
