//! Core data models
//!
//! Identity records, catalog entries, assignment edges and the request
//! bodies that create or change them.

pub mod rbac;
pub mod user;


pub use rbac::*;
pub use user::*;
