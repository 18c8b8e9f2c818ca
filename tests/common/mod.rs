//! Common test utilities for rbac-api
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::common::{TestDatabase, fixtures};
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let db = TestDatabase::new().await;
//!     let rbac = fixtures::rbac_system(&db.repositories());
//! }
//! ```

pub mod database;
pub mod fixtures;

pub use database::TestDatabase;

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is an `ApiError` of the given variant
#[macro_export]
macro_rules! assert_api_err {
    ($expr:expr, $variant:ident) => {
        match $expr {
            Err(rbac_api::ApiError::$variant(_)) => {}
            other => panic!(
                "Expected Err({}), got {:?}",
                stringify!($variant),
                other
            ),
        }
    };
}
