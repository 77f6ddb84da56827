//! Artist persistence
//!
//! `ArtistStore` wraps the connection pool built at startup. Each call
//! borrows a pooled connection for the duration of one statement (or one
//! transaction for batch inserts) and returns it when the call completes.

use catalog_common::db::{Artist, ArtistCreate};
use catalog_common::{Error, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite, SqlitePool};
use tracing::debug;
use uuid::Uuid;

/// Message used for every missing-artist condition
pub const ARTIST_NOT_FOUND: &str = "Artist not found";

const SELECT_COLUMNS: &str = r#"
    SELECT id, creator_name, description, profile_image_url, tags, dna_visibility,
           price, license_type, tracks_visibility, become_partner, audio_preview_url,
           sensitivity, status
    FROM artists
"#;

/// Persistence client for the artists table
#[derive(Clone)]
pub struct ArtistStore {
    pool: SqlitePool,
}

impl ArtistStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// All artists in insertion order
    pub async fn list(&self) -> Result<Vec<Artist>> {
        let rows = sqlx::query(&format!("{} ORDER BY rowid ASC", SELECT_COLUMNS))
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(artist_from_row).collect()
    }

    /// Artist by id
    ///
    /// Ids that are not well-formed UUIDs are reported as not found.
    pub async fn get(&self, id: &str) -> Result<Artist> {
        let Ok(id) = Uuid::parse_str(id) else {
            debug!("Rejecting malformed artist id: {}", id);
            return Err(Error::NotFound(ARTIST_NOT_FOUND.to_string()));
        };

        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => artist_from_row(&row),
            None => {
                debug!("Artist {} not found", id);
                Err(Error::NotFound(ARTIST_NOT_FOUND.to_string()))
            }
        }
    }

    /// Insert one artist under a freshly generated id
    pub async fn create(&self, input: ArtistCreate) -> Result<Artist> {
        let artist = Artist::from_create(Uuid::new_v4(), input);
        insert_artist(&self.pool, &artist).await?;
        Ok(artist)
    }

    /// Insert several artists in one transaction
    ///
    /// Either every row is stored or none is.
    pub async fn create_many(&self, inputs: Vec<ArtistCreate>) -> Result<Vec<Artist>> {
        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(inputs.len());

        for input in inputs {
            let artist = Artist::from_create(Uuid::new_v4(), input);
            insert_artist(&mut *tx, &artist).await?;
            created.push(artist);
        }

        tx.commit().await?;
        Ok(created)
    }
}

async fn insert_artist<'e, E>(executor: E, artist: &Artist) -> Result<()>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let tags = serde_json::to_string(&artist.tags)?;

    sqlx::query(
        r#"
        INSERT INTO artists (
            id, creator_name, description, profile_image_url, tags, dna_visibility,
            price, license_type, tracks_visibility, become_partner, audio_preview_url,
            sensitivity, status
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(artist.id.to_string())
    .bind(&artist.creator_name)
    .bind(&artist.description)
    .bind(&artist.profile_image_url)
    .bind(tags)
    .bind(&artist.dna_visibility)
    .bind(artist.price)
    .bind(&artist.license_type)
    .bind(&artist.tracks_visibility)
    .bind(artist.become_partner)
    .bind(&artist.audio_preview_url)
    .bind(artist.sensitivity)
    .bind(&artist.status)
    .execute(executor)
    .await?;

    Ok(())
}

fn artist_from_row(row: &SqliteRow) -> Result<Artist> {
    let id_str: String = row.try_get("id")?;
    let id = Uuid::parse_str(&id_str)
        .map_err(|e| Error::Internal(format!("Stored artist id '{}' is invalid: {}", id_str, e)))?;
    let tags_json: String = row.try_get("tags")?;
    let become_partner: i64 = row.try_get("become_partner")?;

    Ok(Artist {
        id,
        creator_name: row.try_get("creator_name")?,
        description: row.try_get("description")?,
        profile_image_url: row.try_get("profile_image_url")?,
        tags: serde_json::from_str(&tags_json)?,
        dna_visibility: row.try_get("dna_visibility")?,
        price: row.try_get("price")?,
        license_type: row.try_get("license_type")?,
        tracks_visibility: row.try_get("tracks_visibility")?,
        become_partner: become_partner != 0,
        audio_preview_url: row.try_get("audio_preview_url")?,
        sensitivity: row.try_get("sensitivity")?,
        status: row.try_get("status")?,
    })
}
