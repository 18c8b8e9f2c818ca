//! Test suite for rbac-api
//!
//! ## Test Categories
//!
//! ### 1. Common Utilities (`common/`)
//! - In-memory SQLite database helpers
//! - Fixtures for configs, principals and RBAC systems
//!
//! ### 2. Integration Tests (`integration/`)
//! - RBAC properties against both storage backends
//! - Storage-level cascades and constraints
//! - HTTP flows through the full actix application
//!
//! ## Running Tests
//!
//! ```bash
//! # Run everything
//! cargo test
//!
//! # Run only integration tests
//! cargo test --test lib
//! ```

pub mod common;
pub mod integration;
