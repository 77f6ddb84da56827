//! Database models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalog entry for one content creator and their licensing metadata
///
/// Serialized field names are the public JSON contract. `id` serializes as
/// a hyphenated UUID string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: Uuid,
    pub creator_name: String,
    pub description: Option<String>,
    pub profile_image_url: Option<String>,
    pub tags: Vec<String>,
    pub dna_visibility: Option<String>,
    pub price: Option<f64>,
    pub license_type: Option<String>,
    pub tracks_visibility: Option<String>,
    pub become_partner: bool,
    pub audio_preview_url: Option<String>,
    pub sensitivity: Option<i64>,
    pub status: Option<String>,
}

/// Every Artist field except the server-generated `id`
///
/// Built by the request validator or by the seed data, never deserialized
/// directly.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArtistCreate {
    pub creator_name: String,
    pub description: Option<String>,
    pub profile_image_url: Option<String>,
    pub tags: Vec<String>,
    pub dna_visibility: Option<String>,
    pub price: Option<f64>,
    pub license_type: Option<String>,
    pub tracks_visibility: Option<String>,
    pub become_partner: bool,
    pub audio_preview_url: Option<String>,
    pub sensitivity: Option<i64>,
    pub status: Option<String>,
}

impl Artist {
    /// Attach an identifier to create-input fields
    pub fn from_create(id: Uuid, input: ArtistCreate) -> Self {
        Self {
            id,
            creator_name: input.creator_name,
            description: input.description,
            profile_image_url: input.profile_image_url,
            tags: input.tags,
            dna_visibility: input.dna_visibility,
            price: input.price,
            license_type: input.license_type,
            tracks_visibility: input.tracks_visibility,
            become_partner: input.become_partner,
            audio_preview_url: input.audio_preview_url,
            sensitivity: input.sensitivity,
            status: input.status,
        }
    }
}
