//! Service layer between HTTP handlers and storage

pub mod catalog;
pub mod upload;
pub mod upload_namer;

pub use catalog::CatalogService;
pub use upload::{StoredUpload, UploadService};
