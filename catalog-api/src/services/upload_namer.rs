//! Collision-free naming for uploaded files
//!
//! A desired name `track.mp3` is tried first, then `track_1.mp3`,
//! `track_2.mp3`, ... until a free name is found.
//!
//! [`pick_path`] checks for existing files and returns the first free path.
//! The check and the later write are two separate steps, so two writers can
//! pick the same name. [`create_unique`] tries the same candidates with
//! exclusive-create opens instead, so a name is claimed when the file is
//! created and concurrent uploads never overwrite each other. The upload
//! service uses [`create_unique`].

use std::io;
use std::path::{Path, PathBuf};
use tokio::fs::{File, OpenOptions};

/// URL prefix under which the upload directory is served
pub const PUBLIC_PREFIX: &str = "/static";

/// Split a filename into base and extension
///
/// The extension starts at the last `.` and includes it. Leading dots belong
/// to the base, so `.hidden` has no extension.
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(dot) if !name[..dot].chars().all(|c| c == '.') => name.split_at(dot),
        _ => (name, ""),
    }
}

/// Candidate filename for the given attempt (`0` is the name itself)
pub fn candidate_name(name: &str, attempt: u32) -> String {
    if attempt == 0 {
        return name.to_string();
    }
    let (base, ext) = split_extension(name);
    format!("{}_{}{}", base, attempt, ext)
}

/// First candidate path that does not exist in `dir`
///
/// Existence check only; nothing is created. The upload path does not call
/// this and uses [`create_unique`]. Both yield the same name when a single
/// writer is active.
pub fn pick_path(dir: &Path, name: &str) -> PathBuf {
    (0..)
        .map(|attempt| dir.join(candidate_name(name, attempt)))
        .find(|path| !path.exists())
        .unwrap_or_else(|| dir.join(name))
}

/// Create the first free candidate in `dir` with create-exclusive semantics
///
/// Returns the claimed path and the opened (empty) file.
pub async fn create_unique(dir: &Path, name: &str) -> io::Result<(PathBuf, File)> {
    for attempt in 0..u32::MAX {
        let path = dir.join(candidate_name(name, attempt));
        match OpenOptions::new().write(true).create_new(true).open(&path).await {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e),
        }
    }

    Err(io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!("No free filename left for {}", name),
    ))
}

/// Reduce a client-supplied filename to its final path component
///
/// The component is otherwise kept as sent, surrounding whitespace
/// included. Returns `None` when nothing usable remains.
pub fn sanitize_filename(raw: &str) -> Option<String> {
    let name = raw.rsplit(['/', '\\']).next().unwrap_or(raw);
    match name {
        "" | "." | ".." => None,
        _ => Some(name.to_string()),
    }
}

/// Public URL for a stored file
pub fn public_url(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{}/{}", PUBLIC_PREFIX, file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_extension() {
        assert_eq!(split_extension("track.mp3"), ("track", ".mp3"));
        assert_eq!(split_extension("archive.tar.gz"), ("archive.tar", ".gz"));
        assert_eq!(split_extension("noext"), ("noext", ""));
        assert_eq!(split_extension(".hidden"), (".hidden", ""));
        assert_eq!(split_extension("..weird"), ("..weird", ""));
        assert_eq!(split_extension(".config.toml"), (".config", ".toml"));
        assert_eq!(split_extension("trailing."), ("trailing", "."));
    }

    #[test]
    fn test_candidate_names() {
        assert_eq!(candidate_name("track.mp3", 0), "track.mp3");
        assert_eq!(candidate_name("track.mp3", 1), "track_1.mp3");
        assert_eq!(candidate_name("track.mp3", 12), "track_12.mp3");
        assert_eq!(candidate_name("noext", 2), "noext_2");
    }

    #[test]
    fn test_pick_path_skips_existing_files() {
        let dir = tempfile::tempdir().unwrap();

        assert_eq!(pick_path(dir.path(), "track.mp3"), dir.path().join("track.mp3"));

        std::fs::write(dir.path().join("track.mp3"), b"one").unwrap();
        assert_eq!(pick_path(dir.path(), "track.mp3"), dir.path().join("track_1.mp3"));

        std::fs::write(dir.path().join("track_1.mp3"), b"two").unwrap();
        assert_eq!(pick_path(dir.path(), "track.mp3"), dir.path().join("track_2.mp3"));
    }

    #[tokio::test]
    async fn test_create_unique_never_reuses_a_name() {
        let dir = tempfile::tempdir().unwrap();

        let (first, _f1) = create_unique(dir.path(), "track.mp3").await.unwrap();
        let (second, _f2) = create_unique(dir.path(), "track.mp3").await.unwrap();
        let (third, _f3) = create_unique(dir.path(), "track.mp3").await.unwrap();

        assert_eq!(first, dir.path().join("track.mp3"));
        assert_eq!(second, dir.path().join("track_1.mp3"));
        assert_eq!(third, dir.path().join("track_2.mp3"));
    }

    #[tokio::test]
    async fn test_create_unique_agrees_with_pick_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("song.wav"), b"x").unwrap();
        std::fs::write(dir.path().join("song_1.wav"), b"y").unwrap();

        let expected = pick_path(dir.path(), "song.wav");
        let (claimed, _file) = create_unique(dir.path(), "song.wav").await.unwrap();
        assert_eq!(claimed, expected);
        assert_eq!(claimed, dir.path().join("song_2.wav"));
    }

    #[tokio::test]
    async fn test_create_unique_concurrent_claims_are_distinct() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().to_path_buf();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let base = base.clone();
            handles.push(tokio::spawn(async move {
                create_unique(&base, "same.wav").await.map(|(path, _)| path)
            }));
        }

        let mut paths = Vec::new();
        for handle in handles {
            paths.push(handle.await.unwrap().unwrap());
        }
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), 8);
    }

    #[tokio::test]
    async fn test_create_unique_missing_directory_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = create_unique(&missing, "a.mp3").await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("track.mp3").as_deref(), Some("track.mp3"));
        assert_eq!(sanitize_filename("../../etc/passwd").as_deref(), Some("passwd"));
        assert_eq!(sanitize_filename("C:\\music\\song.wav").as_deref(), Some("song.wav"));
        assert_eq!(sanitize_filename("dir/"), None);
        assert_eq!(sanitize_filename(".."), None);
        assert_eq!(sanitize_filename(""), None);
    }

    #[test]
    fn test_sanitize_filename_keeps_whitespace() {
        assert_eq!(
            sanitize_filename(" take two .mp3").as_deref(),
            Some(" take two .mp3")
        );
        assert_eq!(sanitize_filename("uploads/  ").as_deref(), Some("  "));
    }

    #[test]
    fn test_public_url() {
        assert_eq!(
            public_url(Path::new("/srv/static/track_1.mp3")),
            "/static/track_1.mp3"
        );
    }
}
