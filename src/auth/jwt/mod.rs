//! JWT token handling
//!
//! HS256 access tokens whose `sub` claim carries the user id.

mod handler;
pub mod types;


pub use types::{Claims, JwtHandler, TOKEN_ISSUER};
