//! Error handling for the service
//!
//! One error enum covers the whole crate. The RBAC core only ever produces
//! `NotFound`, `Conflict` or an infrastructure error (`Database`, `Timeout`,
//! `Internal`); the remaining variants belong to the HTTP, credential and
//! configuration layers around it.

mod helpers;
mod response;
mod types;

pub use response::{ErrorDetail, ErrorResponse};
pub use types::{ApiError, Result};
