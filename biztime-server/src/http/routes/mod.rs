//! Route handlers organized by resource

pub mod companies;
pub mod health;
pub mod invoices;
