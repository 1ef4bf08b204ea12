use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Conventional archive prefix for media entries.
pub const MEDIA_PREFIX: &str = "word/media/";

/// Archive-internal path → local file holding the image bytes.
///
/// When built from an archive the backing temp directory is owned here and
/// removed on drop, so extracted images never outlive the conversion.
#[derive(Debug, Default)]
pub struct ImageAssets {
    paths: HashMap<String, PathBuf>,
    dir: Option<TempDir>,
}

impl ImageAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_dir(dir: TempDir) -> Self {
        Self {
            paths: HashMap::new(),
            dir: Some(dir),
        }
    }

    /// Build a map over files the caller manages.
    pub fn from_paths<K, P>(entries: impl IntoIterator<Item = (K, P)>) -> Self
    where
        K: Into<String>,
        P: Into<PathBuf>,
    {
        Self {
            paths: entries
                .into_iter()
                .map(|(k, p)| (k.into(), p.into()))
                .collect(),
            dir: None,
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, path: impl Into<PathBuf>) {
        self.paths.insert(key.into(), path.into());
    }

    /// Insert only if `key` is not mapped yet. Returns whether it was inserted.
    pub(crate) fn insert_alias(&mut self, key: String, path: PathBuf) -> bool {
        if self.paths.contains_key(&key) {
            return false;
        }
        self.paths.insert(key, path);
        true
    }

    pub fn get(&self, key: &str) -> Option<&Path> {
        self.paths.get(key).map(PathBuf::as_path)
    }

    /// Resolve a drawing's embed identifier under the media prefix.
    pub fn lookup_embed(&self, embed_id: &str) -> Option<&Path> {
        self.get(&format!("{MEDIA_PREFIX}{embed_id}"))
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Directory holding extracted images, if this map owns one.
    pub fn storage_dir(&self) -> Option<&Path> {
        self.dir.as_ref().map(TempDir::path)
    }
}
