//! # Storage Module
//!
//! Storage abstractions and backends for the donation tracker. The domain
//! layer talks to the traits defined in [`traits`]; the [`csv`] module
//! provides the file-based implementation.

pub mod csv;
pub mod traits;

pub use traits::*;
