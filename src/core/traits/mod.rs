//! Storage capability traits
//!
//! One async trait per entity. The sea-orm store and the in-memory store both
//! implement all four; services only ever see `Arc<dyn ...>`.
//!
//! Implementations receive already-normalized keys. Lookups return `Ok(None)`
//! for a missing row and mutations report absence through `Option` or `bool`,
//! leaving the mapping to `NotFound` to the caller.

pub mod repository;

pub use repository::*;
