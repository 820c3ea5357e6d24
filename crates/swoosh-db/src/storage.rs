//! Local-disk storage for uploaded bot logos.
//!
//! Files land in a single flat directory and are served back under
//! `/uploads/<file>`. Names are `bot_<unix-millis>_<random hex>_<original name>`.

use std::io;
use std::path::PathBuf;

use chrono::Utc;
use swoosh_common::validation::sanitize_filename;

/// Public path prefix uploaded files are served under.
pub const UPLOADS_PREFIX: &str = "/uploads";

/// Logo file store rooted at one directory.
#[derive(Debug, Clone)]
pub struct LogoStorage {
    dir: PathBuf,
}

impl LogoStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    /// Create the upload directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        tracing::debug!(dir = %self.dir.display(), "Upload directory ready");
        Ok(())
    }

    /// Write logo bytes and return the public path they are served from.
    pub async fn put_logo(&self, original_name: &str, data: &[u8]) -> io::Result<String> {
        let mut safe = sanitize_filename(original_name);
        if safe.is_empty() {
            safe = "logo".into();
        }
        let file = format!(
            "bot_{}_{:08x}_{}",
            Utc::now().timestamp_millis(),
            rand::random::<u32>(),
            safe
        );

        self.ensure_dir().await?;
        tokio::fs::write(self.dir.join(&file), data).await?;
        tracing::info!(file = %file, bytes = data.len(), "Stored bot logo");

        Ok(format!("{UPLOADS_PREFIX}/{file}"))
    }

    /// Read a stored file by name, with a content type guessed from its extension.
    ///
    /// Returns `Ok(None)` for missing files and for names that try to leave
    /// the upload directory.
    pub async fn read(&self, file: &str) -> io::Result<Option<(Vec<u8>, String)>> {
        if !is_safe_name(file) {
            return Ok(None);
        }

        match tokio::fs::read(self.dir.join(file)).await {
            Ok(bytes) => {
                let content_type = mime_guess::from_path(file)
                    .first_or_octet_stream()
                    .to_string();
                Ok(Some((bytes, content_type)))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Delete a logo by the public path [`put_logo`](Self::put_logo) returned.
    /// Unknown or unsafe paths are ignored.
    pub async fn remove(&self, public_path: &str) -> io::Result<()> {
        let Some(file) = public_path
            .strip_prefix(UPLOADS_PREFIX)
            .and_then(|p| p.strip_prefix('/'))
        else {
            return Ok(());
        };
        if !is_safe_name(file) {
            return Ok(());
        }

        match tokio::fs::remove_file(self.dir.join(file)).await {
            Ok(()) => {
                tracing::debug!(file = %file, "Removed bot logo");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// A bare file name that stays inside the upload directory.
fn is_safe_name(file: &str) -> bool {
    !file.is_empty()
        && !file.contains(|c: char| matches!(c, '/' | '\\' | '\0'))
        && !file.contains("..")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn round_trips_a_logo() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = LogoStorage::new(tmp.path().join("uploads"));

        let path = storage.put_logo("my logo.png", b"\x89PNG").await.unwrap();
        assert!(path.starts_with("/uploads/bot_"));
        assert!(path.ends_with("_mylogo.png"));

        let file = path.trim_start_matches("/uploads/");
        let (bytes, content_type) = storage.read(file).await.unwrap().unwrap();
        assert_eq!(bytes, b"\x89PNG");
        assert_eq!(content_type, "image/png");
    }

    #[tokio::test]
    async fn refuses_traversal_and_missing_files() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = LogoStorage::new(tmp.path());
        assert!(storage.read("../secret").await.unwrap().is_none());
        assert!(storage.read("a/b.png").await.unwrap().is_none());
        assert!(storage.read("nope.png").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn dotted_names_stay_readable() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = LogoStorage::new(tmp.path());

        let path = storage.put_logo("my..logo.png", b"\x89PNG").await.unwrap();
        assert!(path.ends_with("_my.logo.png"));
        let file = path.trim_start_matches("/uploads/");
        assert!(storage.read(file).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn same_name_uploads_do_not_collide() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = LogoStorage::new(tmp.path());

        let a = storage.put_logo("owl.png", b"first").await.unwrap();
        let b = storage.put_logo("owl.png", b"second").await.unwrap();
        assert_ne!(a, b);

        let (bytes, _) = storage
            .read(a.trim_start_matches("/uploads/"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(bytes, b"first");
    }

    #[tokio::test]
    async fn remove_deletes_only_stored_logos() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = LogoStorage::new(tmp.path());

        let path = storage.put_logo("owl.png", b"\x89PNG").await.unwrap();
        storage.remove(&path).await.unwrap();
        let file = path.trim_start_matches("/uploads/");
        assert!(storage.read(file).await.unwrap().is_none());

        // Already gone, foreign or unsafe paths are a no-op.
        storage.remove(&path).await.unwrap();
        storage.remove("/elsewhere/owl.png").await.unwrap();
        storage.remove("/uploads/../owl.png").await.unwrap();
    }
}
