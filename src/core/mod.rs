//! Core domain types and storage capabilities

pub mod models;
pub mod traits;
