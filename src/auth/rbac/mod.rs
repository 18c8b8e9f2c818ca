//! Role-Based Access Control (RBAC) system
//!
//! Users hold roles, roles grant permissions. The catalogs own the three
//! entity kinds, the assignment graph owns the two edge kinds, and the
//! evaluator answers membership questions for request gating.

mod assignments;
mod directory;
mod evaluator;
mod helpers;
mod permissions;
mod roles;
mod system;

pub use assignments::AssignmentGraph;
pub use directory::PrincipalDirectory;
pub use evaluator::{AuthorizationEvaluator, Decision};
pub use permissions::PermissionCatalog;
pub use roles::RoleCatalog;
pub use system::RbacSystem;
