//! Catalog service: list, read and create artists

use catalog_common::db::Artist;
use serde_json::Value;
use tracing::info;

use crate::db::ArtistStore;
use crate::error::{ApiError, ApiResult};
use crate::validation::validate_artist_create;

/// Thin orchestration over [`ArtistStore`]
#[derive(Clone)]
pub struct CatalogService {
    store: ArtistStore,
}

impl CatalogService {
    pub fn new(store: ArtistStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &ArtistStore {
        &self.store
    }

    pub async fn list_artists(&self) -> ApiResult<Vec<Artist>> {
        Ok(self.store.list().await?)
    }

    /// Unknown and malformed ids both yield [`ApiError::NotFound`]
    pub async fn get_artist(&self, id: &str) -> ApiResult<Artist> {
        Ok(self.store.get(id).await?)
    }

    /// Validate a raw JSON payload and store it as a new artist
    pub async fn create_artist(&self, payload: &Value) -> ApiResult<Artist> {
        let input = validate_artist_create(payload).map_err(ApiError::Validation)?;
        let artist = self.store.create(input).await?;
        info!("Created artist {} ({})", artist.id, artist.creator_name);
        Ok(artist)
    }
}
