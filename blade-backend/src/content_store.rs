//! File-backed site content document.
//!
//! Reads always go to disk so that several server processes sharing one file
//! see the same document. Replacement writes a sibling temp file and renames
//! it over the target, so readers see either the old or the new document,
//! never a partial one.

use std::io;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::models::SiteContent;

pub struct ContentStore {
    path: PathBuf,
    /// Serializes writers within this process
    write_lock: Mutex<()>,
}

impl ContentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current document. Missing or invalid files read as an empty document.
    pub async fn read(&self) -> SiteContent {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(content) => content,
                Err(e) => {
                    log::warn!("Site content at {:?} is invalid, using empty document: {}", self.path, e);
                    SiteContent::default()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("No site content at {:?} yet", self.path);
                SiteContent::default()
            }
            Err(e) => {
                log::warn!("Failed to read site content at {:?}: {}", self.path, e);
                SiteContent::default()
            }
        }
    }

    /// Replace the whole document. Last writer wins.
    pub async fn replace(&self, content: &SiteContent) -> io::Result<()> {
        let json = serde_json::to_string_pretty(content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let _guard = self.write_lock.lock().await;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let tmp_path = self.temp_path();
        tokio::fs::write(&tmp_path, json.as_bytes()).await?;
        if let Err(e) = tokio::fs::rename(&tmp_path, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(e);
        }

        log::info!("Site content replaced ({} sections)", content.sections.len());
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "site-content.json".to_string());
        self.path
            .with_file_name(format!(".{}.{}.tmp", file_name, uuid::Uuid::new_v4()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Section;
    use tempfile::tempdir;

    fn sample() -> SiteContent {
        SiteContent {
            sections: vec![Section {
                id: "services".into(),
                title: "Services".into(),
                summary: "Cuts, fades, hot towel shaves.".into(),
                keywords: vec!["cut".into(), "shave".into()],
            }],
        }
    }

    #[tokio::test]
    async fn test_missing_file_reads_empty() {
        let dir = tempdir().unwrap();
        let store = ContentStore::new(dir.path().join("content.json"));
        assert_eq!(store.read().await, SiteContent::default());
    }

    #[tokio::test]
    async fn test_invalid_file_reads_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("content.json");
        std::fs::write(&path, "{not json").unwrap();
        let store = ContentStore::new(&path);
        assert!(store.read().await.sections.is_empty());
    }

    #[tokio::test]
    async fn test_replace_then_read() {
        let dir = tempdir().unwrap();
        let store = ContentStore::new(dir.path().join("nested").join("content.json"));
        store.replace(&sample()).await.unwrap();
        assert_eq!(store.read().await, sample());

        store.replace(&SiteContent::default()).await.unwrap();
        assert!(store.read().await.sections.is_empty());
    }

    #[tokio::test]
    async fn test_replace_leaves_no_temp_files() {
        let dir = tempdir().unwrap();
        let store = ContentStore::new(dir.path().join("content.json"));
        store.replace(&sample()).await.unwrap();
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn test_two_stores_share_one_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("content.json");
        let a = ContentStore::new(&path);
        let b = ContentStore::new(&path);
        a.replace(&sample()).await.unwrap();
        assert_eq!(b.read().await, sample());
    }
}
