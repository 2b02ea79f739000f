//! Database layer - connection pool and repositories
//!
//! # Design Principles
//!
//! - One explicitly constructed pool per process, passed in as state
//! - Every statement is parameterized
//! - Rely on DB constraints (PK, FK, CHECK) - no check-then-insert
//! - Nested lookups use a second query, never a single-row JOIN

pub mod pool;
pub mod repos;

pub use pool::{Database, DatabaseConfig};
pub use repos::*;
