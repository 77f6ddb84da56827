//! Artist endpoints
//!
//! - `GET /artists` – every artist
//! - `GET /artists/:artist_id` – one artist, 404 when unknown
//! - `POST /artists` – create an artist from a JSON body

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use catalog_common::db::Artist;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// GET /artists
pub async fn list_artists(State(state): State<AppState>) -> ApiResult<Json<Vec<Artist>>> {
    let artists = state.catalog.list_artists().await?;
    Ok(Json(artists))
}

/// GET /artists/:artist_id
///
/// The id is taken as a raw string so malformed ids get the same 404 as
/// unknown ones.
pub async fn get_artist(
    State(state): State<AppState>,
    Path(artist_id): Path<String>,
) -> ApiResult<Json<Artist>> {
    let artist = state.catalog.get_artist(&artist_id).await?;
    Ok(Json(artist))
}

/// POST /artists
///
/// Bodies that are not JSON at all get 400; JSON that fails field
/// validation gets 422 with per-field detail.
pub async fn create_artist(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Artist>> {
    let Json(payload) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let artist = state.catalog.create_artist(&payload).await?;
    Ok(Json(artist))
}
