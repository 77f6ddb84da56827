//! HTTP API handlers for catalog-api

pub mod artists;
pub mod health;
pub mod upload;

pub use artists::{create_artist, get_artist, list_artists};
pub use health::health_routes;
pub use upload::upload_audio;
