//! File persistence for exported layout pairs.

use crate::codec::MarkupStylePair;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Layout not found: {0}")]
    NotFound(String),
    #[error("IO error: {0}")]
    Io(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Stores exported layouts as `<name>.html` + `<name>.css` file pairs
/// in a base directory.
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    /// Create storage rooted at the given directory, creating it if it
    /// doesn't exist.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("Failed to create storage directory: {}", e))
            })?;
        }
        Ok(Self { base_path })
    }

    /// Create storage in the default location
    /// (`<data dir>/protoboard/exports`).
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("Could not determine home directory".to_string()))?;
        Self::new(base.join("protoboard").join("exports"))
    }

    /// The base directory.
    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }

    fn pair_paths(&self, name: &str) -> (PathBuf, PathBuf) {
        // Sanitize the name to be safe for filenames.
        let safe: String = name
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        (
            self.base_path.join(format!("{safe}.html")),
            self.base_path.join(format!("{safe}.css")),
        )
    }

    /// Write both artifacts of a layout.
    pub fn save(&self, name: &str, pair: &MarkupStylePair) -> StorageResult<()> {
        let (markup_path, style_path) = self.pair_paths(name);
        write_text(&markup_path, &pair.markup)?;
        write_text(&style_path, &pair.style)
    }

    /// Read back a layout saved under `name`. Both artifacts must
    /// exist.
    pub fn load(&self, name: &str) -> StorageResult<MarkupStylePair> {
        let (markup_path, style_path) = self.pair_paths(name);
        if !markup_path.exists() || !style_path.exists() {
            return Err(StorageError::NotFound(name.to_string()));
        }
        Ok(MarkupStylePair {
            markup: read_text(&markup_path)?,
            style: read_text(&style_path)?,
        })
    }

    /// Names that have both artifacts present.
    pub fn list(&self) -> StorageResult<Vec<String>> {
        let entries = fs::read_dir(&self.base_path)
            .map_err(|e| StorageError::Io(format!("Failed to read directory: {}", e)))?;

        let mut names = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().map(|e| e == "html").unwrap_or(false) {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    if path.with_extension("css").exists() {
                        names.push(stem.to_string());
                    }
                }
            }
        }
        Ok(names)
    }

    /// Remove both artifacts of a layout.
    pub fn delete(&self, name: &str) -> StorageResult<()> {
        let (markup_path, style_path) = self.pair_paths(name);
        for path in [markup_path, style_path] {
            if path.exists() {
                fs::remove_file(&path).map_err(|e| {
                    StorageError::Io(format!("Failed to delete {}: {}", path.display(), e))
                })?;
            }
        }
        Ok(())
    }
}

/// Load a pair from an arbitrary set of user-picked files, matching the
/// markup and style artifacts by filename suffix. Returns `Ok(None)`
/// when either artifact is missing; the caller treats that as a no-op
/// import with nothing cleared or replaced.
pub fn load_pair(paths: &[PathBuf]) -> StorageResult<Option<MarkupStylePair>> {
    let markup_path = paths
        .iter()
        .find(|p| p.extension().map(|e| e == "html").unwrap_or(false));
    let style_path = paths
        .iter()
        .find(|p| p.extension().map(|e| e == "css").unwrap_or(false));

    let (Some(markup_path), Some(style_path)) = (markup_path, style_path) else {
        log::debug!("load skipped: pair incomplete");
        return Ok(None);
    };
    Ok(Some(MarkupStylePair {
        markup: read_text(markup_path)?,
        style: read_text(style_path)?,
    }))
}

fn read_text(path: &Path) -> StorageResult<String> {
    fs::read_to_string(path)
        .map_err(|e| StorageError::Io(format!("Failed to read {}: {}", path.display(), e)))
}

fn write_text(path: &Path, text: &str) -> StorageResult<()> {
    fs::write(path, text)
        .map_err(|e| StorageError::Io(format!("Failed to write {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_pair() -> MarkupStylePair {
        MarkupStylePair {
            markup: "<div id=\"ui-container\"></div>".to_string(),
            style: "/* Generated Styles */\n".to_string(),
        }
    }

    #[test]
    fn test_save_load() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        storage.save("layout", &sample_pair()).unwrap();
        let loaded = storage.load("layout").unwrap();
        assert_eq!(loaded, sample_pair());
    }

    #[test]
    fn test_load_not_found() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        let result = storage.load("nonexistent");
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_load_incomplete_pair_is_not_found() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        storage.save("layout", &sample_pair()).unwrap();
        fs::remove_file(dir.path().join("layout.css")).unwrap();

        assert!(matches!(storage.load("layout"), Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_list_requires_both_artifacts() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        storage.save("a", &sample_pair()).unwrap();
        storage.save("b", &sample_pair()).unwrap();
        fs::remove_file(dir.path().join("b.css")).unwrap();

        let names = storage.list().unwrap();
        assert_eq!(names, vec!["a".to_string()]);
    }

    #[test]
    fn test_delete() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        storage.save("layout", &sample_pair()).unwrap();
        storage.delete("layout").unwrap();

        assert!(matches!(storage.load("layout"), Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_sanitizes_name() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        storage.save("my/layout:v2", &sample_pair()).unwrap();
        assert!(storage.load("my/layout:v2").is_ok());
    }

    #[test]
    fn test_load_pair_by_suffix() {
        let dir = tempdir().unwrap();
        let markup_path = dir.path().join("layout.html");
        let style_path = dir.path().join("style.css");
        fs::write(&markup_path, "<div></div>").unwrap();
        fs::write(&style_path, "/* */").unwrap();

        let pair = load_pair(&[style_path, markup_path]).unwrap().unwrap();
        assert_eq!(pair.markup, "<div></div>");
        assert_eq!(pair.style, "/* */");
    }

    #[test]
    fn test_load_pair_missing_artifact_is_none() {
        let dir = tempdir().unwrap();
        let markup_path = dir.path().join("layout.html");
        fs::write(&markup_path, "<div></div>").unwrap();

        assert!(load_pair(&[markup_path]).unwrap().is_none());
        assert!(load_pair(&[]).unwrap().is_none());
    }
}
