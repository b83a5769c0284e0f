//! File-backed snapshot store.

use crate::ports::outbound::{SnapshotError, SnapshotStore};
use std::io::Write;
use std::path::{Path, PathBuf};
use stock_types::SnapshotDoc;
use tracing::{info, warn};

/// Persists the snapshot document as pretty-printed JSON at a fixed
/// path.
///
/// Writes go to a temp file first and are renamed over the target, so a
/// concurrent reader sees either the old document or the new one, never
/// a partial write.
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    /// Create a store backed by the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The path this store reads and writes.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self) -> Option<SnapshotDoc> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                info!(path = %self.path.display(), error = %e, "No snapshot to load");
                return None;
            }
        };

        match serde_json::from_str::<SnapshotDoc>(&raw) {
            Ok(doc) => {
                info!(
                    path = %self.path.display(),
                    goods = doc.goods.len(),
                    shares = doc.shares.len(),
                    audit = doc.audit.len(),
                    "Snapshot loaded"
                );
                Some(doc)
            }
            Err(e) => {
                // Corrupt snapshot is non-fatal: the caller seeds.
                warn!(path = %self.path.display(), error = %e, "Snapshot unreadable, falling back to seed");
                None
            }
        }
    }

    fn save(&self, doc: &SnapshotDoc) -> Result<(), SnapshotError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| SnapshotError::Io {
                    message: e.to_string(),
                })?;
            }
        }

        let bytes = serde_json::to_vec_pretty(doc).map_err(|e| SnapshotError::Encode {
            message: e.to_string(),
        })?;

        // Write atomically via temp file
        let temp_path = self.path.with_extension("tmp");
        let mut file = std::fs::File::create(&temp_path).map_err(|e| SnapshotError::Io {
            message: e.to_string(),
        })?;
        file.write_all(&bytes).map_err(|e| SnapshotError::Io {
            message: e.to_string(),
        })?;
        file.sync_all().map_err(|e| SnapshotError::Io {
            message: e.to_string(),
        })?;

        std::fs::rename(&temp_path, &self.path).map_err(|e| SnapshotError::Io {
            message: e.to_string(),
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stock_types::Good;

    fn temp_path(test_name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "stock_core_snapshot_{}_{}.json",
            test_name,
            std::process::id()
        ))
    }

    fn doc() -> SnapshotDoc {
        SnapshotDoc {
            goods: vec![Good {
                id: "SKU-1".to_string(),
                name: "Widget".to_string(),
                stock: 4,
                location: "A-1".to_string(),
            }],
            ..SnapshotDoc::default()
        }
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let path = temp_path("roundtrip");
        let store = FileSnapshotStore::new(&path);

        store.save(&doc()).expect("save");
        let loaded = store.load().expect("load");
        assert_eq!(loaded, doc());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let store = FileSnapshotStore::new(temp_path("missing_never_written"));
        assert!(store.load().is_none());
    }

    #[test]
    fn test_load_corrupt_file_is_none() {
        let path = temp_path("corrupt");
        std::fs::write(&path, b"{not json").unwrap();

        let store = FileSnapshotStore::new(&path);
        assert!(store.load().is_none());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let path = temp_path("no_temp");
        let store = FileSnapshotStore::new(&path);

        store.save(&doc()).expect("save");
        assert!(!path.with_extension("tmp").exists());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_save_overwrites_previous_document() {
        let path = temp_path("overwrite");
        let store = FileSnapshotStore::new(&path);

        store.save(&doc()).expect("first save");
        let empty = SnapshotDoc::default();
        store.save(&empty).expect("second save");

        assert_eq!(store.load().expect("load"), empty);
        let _ = std::fs::remove_file(&path);
    }
}
