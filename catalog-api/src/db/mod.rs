//! Database access for catalog-api

pub mod artists;

pub use artists::{ArtistStore, ARTIST_NOT_FOUND};
