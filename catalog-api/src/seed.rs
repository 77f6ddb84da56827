//! Demo data bootstrap
//!
//! Inserts four fixed artists. Used by the `seed-artists` binary; runs
//! outside the request path.

use catalog_common::db::{create_artists_table, ArtistCreate};
use catalog_common::Result;
use tracing::info;

use crate::db::ArtistStore;

struct DemoArtist {
    creator_name: &'static str,
    description: &'static str,
    profile_image_url: &'static str,
    tags: [&'static str; 3],
    dna_visibility: &'static str,
    price: f64,
    license_type: &'static str,
    tracks_visibility: &'static str,
    become_partner: bool,
    audio_preview_url: &'static str,
    sensitivity: i64,
    status: &'static str,
}

const DEMO_ARTISTS: [DemoArtist; 4] = [
    DemoArtist {
        creator_name: "Alice DNA",
        description: "Experimental electronic artist blending AI and human creativity.",
        profile_image_url: "https://randomuser.me/api/portraits/women/1.jpg",
        tags: ["electronic", "ai", "experimental"],
        dna_visibility: "public",
        price: 9.99,
        license_type: "standard",
        tracks_visibility: "visible",
        become_partner: true,
        audio_preview_url: "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-1.mp3",
        sensitivity: 5,
        status: "complete",
    },
    DemoArtist {
        creator_name: "Bob Synth",
        description: "Synthwave and retro artist with a futuristic twist.",
        profile_image_url: "https://randomuser.me/api/portraits/men/2.jpg",
        tags: ["synthwave", "retro", "futuristic"],
        dna_visibility: "public",
        price: 14.99,
        license_type: "premium",
        tracks_visibility: "visible",
        become_partner: false,
        audio_preview_url: "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-2.mp3",
        sensitivity: 3,
        status: "processing",
    },
    DemoArtist {
        creator_name: "Chloe Beats",
        description: "Hip-hop producer merging classic and modern sounds.",
        profile_image_url: "https://randomuser.me/api/portraits/women/3.jpg",
        tags: ["hip-hop", "producer", "modern"],
        dna_visibility: "private",
        price: 7.50,
        license_type: "standard",
        tracks_visibility: "invisible",
        become_partner: true,
        audio_preview_url: "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-3.mp3",
        sensitivity: 7,
        status: "pending",
    },
    DemoArtist {
        creator_name: "Derek Flow",
        description: "Ambient and chillout artist, perfect for relaxation.",
        profile_image_url: "https://randomuser.me/api/portraits/men/4.jpg",
        tags: ["ambient", "chillout", "relax"],
        dna_visibility: "draft",
        price: 5.00,
        license_type: "free",
        tracks_visibility: "visible",
        become_partner: false,
        audio_preview_url: "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-4.mp3",
        sensitivity: 2,
        status: "pending",
    },
];

/// The demo rows as create inputs
pub fn demo_artists() -> Vec<ArtistCreate> {
    DEMO_ARTISTS
        .iter()
        .map(|demo| ArtistCreate {
            creator_name: demo.creator_name.to_string(),
            description: Some(demo.description.to_string()),
            profile_image_url: Some(demo.profile_image_url.to_string()),
            tags: demo.tags.iter().map(|t| t.to_string()).collect(),
            dna_visibility: Some(demo.dna_visibility.to_string()),
            price: Some(demo.price),
            license_type: Some(demo.license_type.to_string()),
            tracks_visibility: Some(demo.tracks_visibility.to_string()),
            become_partner: demo.become_partner,
            audio_preview_url: Some(demo.audio_preview_url.to_string()),
            sensitivity: Some(demo.sensitivity),
            status: Some(demo.status.to_string()),
        })
        .collect()
}

/// Ensure the schema exists, then insert the demo rows in one transaction
///
/// Returns the number of rows inserted.
pub async fn seed_artists(store: &ArtistStore) -> Result<usize> {
    create_artists_table(store.pool()).await?;

    let created = store.create_many(demo_artists()).await?;
    info!("Seeded {} artists", created.len());

    Ok(created.len())
}
