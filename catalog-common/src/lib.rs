//! # Artist Catalog Common Library
//!
//! Shared code for the catalog service and its tooling:
//! - Error type
//! - Configuration resolution (CLI / environment / TOML / defaults)
//! - Database pool construction and schema creation
//! - Artist data model

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
