// Module declarations
mod connection;
mod permission_ops;
mod rbac_ops;
mod role_ops;
mod types;
mod user_ops;

// Re-export public types
pub use types::{DatabaseBackendType, SeaOrmDatabase};
