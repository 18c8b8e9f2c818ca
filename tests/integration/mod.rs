//! Integration tests for rbac-api

pub mod database_tests;
pub mod http_tests;
pub mod rbac_tests;
