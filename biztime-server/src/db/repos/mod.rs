//! Repository implementations for database access
//!
//! Lookups return `Option` so callers decide how a missing key is reported.
//! Constraint violations raised by Postgres surface as `DbError::Constraint`.

pub mod companies;
pub mod error;
pub mod invoices;

pub use companies::{Company, CompanyRepo};
pub use error::DbError;
pub use invoices::{Invoice, InvoiceRepo, InvoiceSummary, InvoiceWithCompany};
