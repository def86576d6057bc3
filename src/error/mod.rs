//! Error handling
//!
//! Defines the error code taxonomies for the toolkit components.

pub mod types;

pub use types::*;
