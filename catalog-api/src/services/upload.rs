//! Upload service: persist an uploaded file and report its public URL
//!
//! No file-type or size checks are applied. Stored files are not linked to
//! any artist; callers attach the returned URL themselves.

use axum::body::Bytes;
use futures::{Stream, TryStreamExt};
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{error, info, warn};

use super::upload_namer::{create_unique, public_url};
use crate::error::{ApiError, ApiResult};

/// Result of a successful upload
#[derive(Debug, Clone, PartialEq)]
pub struct StoredUpload {
    /// Location on disk
    pub path: PathBuf,
    /// Public URL (`/static/<file name>`)
    pub url: String,
}

/// Writes uploads into a fixed directory
#[derive(Clone)]
pub struct UploadService {
    static_dir: PathBuf,
}

impl UploadService {
    pub fn new(static_dir: impl Into<PathBuf>) -> Self {
        Self {
            static_dir: static_dir.into(),
        }
    }

    pub fn static_dir(&self) -> &Path {
        &self.static_dir
    }

    /// Create the upload directory if it does not exist yet
    pub fn ensure_directory_exists(&self) -> io::Result<()> {
        std::fs::create_dir_all(&self.static_dir)
    }

    /// Write every chunk of `chunks` into a new file named after `filename`
    ///
    /// `filename` must already be reduced to a bare file name. Errors yielded
    /// by `chunks` are returned unchanged; failures writing the file become
    /// [`ApiError::Storage`]. Either way the partially written file is removed.
    pub async fn store<S>(&self, filename: &str, chunks: S) -> ApiResult<StoredUpload>
    where
        S: Stream<Item = ApiResult<Bytes>>,
    {
        let (path, mut file) = create_unique(&self.static_dir, filename)
            .await
            .map_err(ApiError::Storage)?;

        let written = match write_chunks(chunks, &mut file).await {
            Ok(bytes) => bytes,
            Err(e) => {
                match &e {
                    ApiError::Storage(_) => error!("Failed writing upload {}: {}", path.display(), e),
                    _ => warn!("Upload {} aborted: {}", path.display(), e),
                }
                drop(file);
                if let Err(cleanup) = tokio::fs::remove_file(&path).await {
                    error!("Failed to remove partial upload {}: {}", path.display(), cleanup);
                }
                return Err(e);
            }
        };

        let url = public_url(&path);
        info!("Stored upload {} ({} bytes) at {}", filename, written, url);

        Ok(StoredUpload { path, url })
    }
}

async fn write_chunks<S>(chunks: S, file: &mut File) -> ApiResult<u64>
where
    S: Stream<Item = ApiResult<Bytes>>,
{
    futures::pin_mut!(chunks);

    let mut written = 0u64;
    while let Some(chunk) = chunks.try_next().await? {
        file.write_all(&chunk).await.map_err(ApiError::Storage)?;
        written += chunk.len() as u64;
    }

    file.flush().await.map_err(ApiError::Storage)?;
    file.sync_all().await.map_err(ApiError::Storage)?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    fn chunks(parts: &[&'static [u8]]) -> impl Stream<Item = ApiResult<Bytes>> {
        stream::iter(
            parts
                .iter()
                .map(|part| Ok::<_, ApiError>(Bytes::from_static(*part)))
                .collect::<Vec<_>>(),
        )
    }

    #[tokio::test]
    async fn test_store_writes_bytes_and_returns_url() {
        let dir = tempfile::tempdir().unwrap();
        let service = UploadService::new(dir.path());

        let stored = service
            .store("track.mp3", chunks(&[b"ID3 ", b"data"]))
            .await
            .unwrap();

        assert_eq!(stored.url, "/static/track.mp3");
        assert_eq!(std::fs::read(&stored.path).unwrap(), b"ID3 data");
    }

    #[tokio::test]
    async fn test_same_name_twice_gets_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let service = UploadService::new(dir.path());

        let first = service.store("track.mp3", chunks(&[b"one"])).await.unwrap();
        let second = service.store("track.mp3", chunks(&[b"two"])).await.unwrap();

        assert_ne!(first.path, second.path);
        assert_eq!(second.url, "/static/track_1.mp3");
        assert_eq!(std::fs::read(&first.path).unwrap(), b"one");
        assert_eq!(std::fs::read(&second.path).unwrap(), b"two");
    }

    #[tokio::test]
    async fn test_source_error_passes_through_and_removes_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let service = UploadService::new(dir.path());
        let source = stream::iter(vec![
            Ok(Bytes::from_static(b"partial")),
            Err(ApiError::BadRequest("client went away".to_string())),
        ]);

        let err = service.store("broken.mp3", source).await.unwrap_err();

        assert!(matches!(err, ApiError::BadRequest(ref m) if m == "client went away"));
        assert!(!dir.path().join("broken.mp3").exists());
    }

    #[tokio::test]
    async fn test_missing_directory_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let service = UploadService::new(dir.path().join("gone"));

        let err = service.store("a.mp3", chunks(&[])).await.unwrap_err();
        assert!(matches!(err, ApiError::Storage(_)));
    }

    #[test]
    fn test_ensure_directory_exists_creates_nested_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let service = UploadService::new(dir.path().join("a").join("b"));

        service.ensure_directory_exists().unwrap();
        assert!(service.static_dir().is_dir());
    }
}
