//! Local media storage
//!
//! Media is written below a root directory and addressed by its path
//! relative to that root, e.g. `assignments/images/1718000000_3f2a9c0b1d4e.png`.

use std::path::{Path, PathBuf};

use chrono::Utc;
use sha2::{Digest, Sha256};
use tokio::fs;
use tracing::debug;

use crate::{
    constants::{bulk_import::IMAGE_CONTENT_TYPES, IMAGE_UPLOAD_DIR, VIDEO_BLOCK_CONTENT_TYPES, VIDEO_UPLOAD_DIR},
    error::{AppError, AppResult},
};

/// Kind of stored media
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Directory, relative to the media root, holding this kind of media
    pub fn dir(&self) -> &'static str {
        match self {
            Self::Image => IMAGE_UPLOAD_DIR,
            Self::Video => VIDEO_UPLOAD_DIR,
        }
    }

    /// Whether an upload with this content type may be stored
    pub fn accepts_upload(&self, content_type: &str) -> bool {
        let allowed = match self {
            Self::Image => IMAGE_CONTENT_TYPES,
            Self::Video => VIDEO_BLOCK_CONTENT_TYPES,
        };
        allowed.contains(&content_type)
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "image" => Some(Self::Image),
            "video" => Some(Self::Video),
            _ => None,
        }
    }
}

/// Media store rooted at a local directory
#[derive(Debug, Clone)]
pub struct MediaStorage {
    root: PathBuf,
}

impl MediaStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `bytes` and return the stored relative path.
    ///
    /// The file name keeps the extension of `original_name` and is made
    /// unique by a timestamp and a content digest.
    pub async fn save(&self, kind: MediaKind, original_name: &str, bytes: &[u8]) -> AppResult<String> {
        let relative = format!("{}/{}", kind.dir(), stored_name(original_name, bytes));
        let path = self.root.join(&relative);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&path, bytes).await?;

        debug!(path = %relative, size = bytes.len(), "Media stored");
        Ok(relative)
    }

    /// Remove a stored file; missing files are ignored
    pub async fn remove(&self, relative: &str) -> AppResult<()> {
        let path = self.resolve(relative)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Absolute path of a stored file
    pub fn resolve(&self, relative: &str) -> AppResult<PathBuf> {
        let relative = Path::new(relative);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, std::path::Component::Normal(_)));
        if escapes {
            return Err(AppError::Storage(format!(
                "Refusing path outside media root: {}",
                relative.display()
            )));
        }
        Ok(self.root.join(relative))
    }
}

fn stored_name(original_name: &str, bytes: &[u8]) -> String {
    let digest = hex::encode(Sha256::digest(bytes));
    let extension = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_else(|| "bin".to_string());

    format!("{}_{}.{}", Utc::now().timestamp_millis(), &digest[..12], extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let storage = MediaStorage::new(dir.path());

        let relative = storage
            .save(MediaKind::Image, "tile.PNG", b"not really a png")
            .await
            .unwrap();

        assert!(relative.starts_with("assignments/images/"));
        assert!(relative.ends_with(".png"));

        let path = storage.resolve(&relative).unwrap();
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"not really a png");

        storage.remove(&relative).await.unwrap();
        assert!(!path.exists());
        // Second removal is a no-op.
        storage.remove(&relative).await.unwrap();
    }

    #[tokio::test]
    async fn test_video_directory_and_fallback_extension() {
        let dir = tempfile::tempdir().unwrap();
        let storage = MediaStorage::new(dir.path());

        let relative = storage
            .save(MediaKind::Video, "clip", b"frames")
            .await
            .unwrap();
        assert!(relative.starts_with("assignments/videos/"));
        assert!(relative.ends_with(".bin"));
    }

    #[test]
    fn test_resolve_rejects_escaping_paths() {
        let storage = MediaStorage::new("/srv/media");
        assert!(storage.resolve("../etc/passwd").is_err());
        assert!(storage.resolve("/etc/passwd").is_err());
        assert_eq!(
            storage.resolve("assignments/images/a.png").unwrap(),
            PathBuf::from("/srv/media/assignments/images/a.png")
        );
    }

    #[test]
    fn test_upload_content_types() {
        assert!(MediaKind::Video.accepts_upload("video/mp4"));
        assert!(!MediaKind::Video.accepts_upload("image/png"));
        assert!(MediaKind::Image.accepts_upload("image/webp"));
    }
}
