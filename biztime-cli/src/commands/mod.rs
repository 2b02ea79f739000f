//! Command implementations for the biztime CLI

pub mod serve;

pub use serve::run_serve;
