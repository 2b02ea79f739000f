//! biztime-server: HTTP API over companies and their invoices
//!
//! Exposes CRUD routes for the `companies` and `invoices` tables.
//! The database gateway is constructed by the caller and handed to
//! the router; nothing here holds a global connection.

pub mod db;
pub mod http;

pub use db::{Database, DatabaseConfig, DbError};
pub use http::{build_router, run_server, ApiError, ServerConfig};
