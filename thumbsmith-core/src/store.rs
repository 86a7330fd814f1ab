//! Key-value persistence for project documents.
//!
//! The filesystem analog of browser-local storage: each key maps to one
//! JSON document inside a data directory. Hosts that live in a browser use
//! the same documents through the WASM bindings instead.

use std::path::PathBuf;

use crate::ProjectDocument;

/// The fixed key the editor saves under by default.
pub const DEFAULT_KEY: &str = "thumbsmith_save";

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No document saved under the requested key.
    #[error("No saved project under key: {0}")]
    NotFound(String),
    /// An I/O error occurred during persistence.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Filesystem-backed project storage.
#[derive(Debug, Clone)]
pub struct ProjectStore {
    data_dir: PathBuf,
}

impl ProjectStore {
    /// Create a store rooted at `data_dir`. The directory is created if it
    /// doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory cannot be created.
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    /// Save a document under `key`, overwriting any previous save.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file cannot be written, or
    /// [`StoreError::Serialization`] if the document cannot be encoded.
    pub fn save(&self, key: &str, document: &ProjectDocument) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(document)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        let path = self.path_for(key);
        std::fs::write(&path, json)?;
        tracing::debug!("Saved project {key} to {}", path.display());
        Ok(())
    }

    /// Load the document saved under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when nothing is saved under the
    /// key, or [`StoreError::Serialization`] when the stored JSON is
    /// malformed.
    pub fn load(&self, key: &str) -> Result<ProjectDocument, StoreError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Err(StoreError::NotFound(key.to_string()));
        }
        let contents = std::fs::read_to_string(&path)?;
        serde_json::from_str(&contents).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Remove the save under `key` from disk.
    ///
    /// No-op if the file doesn't exist; failures are logged, not raised.
    pub fn delete(&self, key: &str) {
        let path = self.path_for(key);
        if path.exists() {
            if let Err(e) = std::fs::remove_file(&path) {
                tracing::warn!("Failed to delete save {}: {e}", path.display());
            }
        }
    }

    /// List the keys with a saved document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the data directory can't be read.
    pub fn keys(&self) -> Result<Vec<String>, StoreError> {
        let mut keys = Vec::new();
        for entry in std::fs::read_dir(&self.data_dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    keys.push(stem.to_string());
                }
            }
        }
        Ok(keys)
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", sanitize_filename(key)))
    }
}

/// Sanitize a key for use as a filename.
///
/// Replaces any character that is not alphanumeric, `-`, or `_` with `_`.
fn sanitize_filename(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Editor, DEFAULT_KEY};

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ProjectStore::new(dir.path()).expect("store");

        let mut editor = Editor::default();
        editor.add_text();
        store
            .save(DEFAULT_KEY, &editor.save_document())
            .expect("save");

        let document = store.load(DEFAULT_KEY).expect("load");
        assert_eq!(document.elements.len(), 1);
    }

    #[test]
    fn test_load_missing_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ProjectStore::new(dir.path()).expect("store");
        assert!(matches!(
            store.load("nothing-here"),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_load_malformed_is_typed_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ProjectStore::new(dir.path()).expect("store");
        std::fs::write(dir.path().join("broken.json"), "{not json").expect("write");
        assert!(matches!(
            store.load("broken"),
            Err(StoreError::Serialization(_))
        ));
    }

    #[test]
    fn test_delete_and_keys() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ProjectStore::new(dir.path()).expect("store");

        store
            .save("one", &ProjectDocument::default())
            .expect("save");
        store
            .save("two", &ProjectDocument::default())
            .expect("save");

        let mut keys = store.keys().expect("keys");
        keys.sort();
        assert_eq!(keys, vec!["one", "two"]);

        store.delete("one");
        assert_eq!(store.keys().expect("keys"), vec!["two"]);
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("simple"), "simple");
        assert_eq!(sanitize_filename("with-dash"), "with-dash");
        assert_eq!(sanitize_filename("has/slash"), "has_slash");
        assert_eq!(sanitize_filename("has space"), "has_space");
    }
}
