//! Vault directory walker.
//!
//! Note hierarchy lives in file names (`project.foo.md`), so only the top
//! level of a vault directory is scanned.

use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;
use walkdir::WalkDir;

const NOTE_EXT: &str = ".md";
const SCHEMA_EXT: &str = ".schema.yml";

#[derive(Debug, Error)]
pub enum VaultWalkerError {
    #[error("vault root does not exist: {0}")]
    MissingRoot(String),

    #[error("failed to walk vault directory {0}: {1}")]
    WalkError(String, #[source] walkdir::Error),

    #[error("failed to read file metadata {0}: {1}")]
    MetadataError(String, #[source] std::io::Error),
}

/// Kind of vault file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Note,
    Schema,
}

/// Information about a discovered vault file.
#[derive(Debug, Clone)]
pub struct WalkedFile {
    /// Absolute path to the file.
    pub absolute_path: PathBuf,
    /// File name without the `.md` / `.schema.yml` extension.
    pub fname: String,
    pub kind: FileKind,
    /// File modification time.
    pub modified: SystemTime,
}

/// Walker for discovering note and schema files in a vault.
#[derive(Debug)]
pub struct VaultWalker {
    root: PathBuf,
}

impl VaultWalker {
    /// Create a new walker for the given vault root.
    pub fn new(root: &Path) -> Result<Self, VaultWalkerError> {
        let root = root
            .canonicalize()
            .map_err(|_| VaultWalkerError::MissingRoot(root.display().to_string()))?;

        if !root.is_dir() {
            return Err(VaultWalkerError::MissingRoot(root.display().to_string()));
        }

        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the vault and return its note and schema files, sorted by fname.
    /// Hidden files are skipped.
    pub fn walk(&self) -> Result<Vec<WalkedFile>, VaultWalkerError> {
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.root).min_depth(1).max_depth(1).follow_links(false) {
            let entry = entry.map_err(|e| {
                VaultWalkerError::WalkError(self.root.display().to_string(), e)
            })?;

            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            if name.starts_with('.') {
                continue;
            }
            let Some((fname, kind)) = classify(&name) else {
                continue;
            };

            let metadata = path.metadata().map_err(|e| {
                VaultWalkerError::MetadataError(path.display().to_string(), e)
            })?;

            files.push(WalkedFile {
                absolute_path: path.to_path_buf(),
                fname: fname.to_string(),
                kind,
                modified: metadata.modified().unwrap_or(std::time::UNIX_EPOCH),
            });
        }

        files.sort_by(|a, b| a.fname.cmp(&b.fname));
        Ok(files)
    }
}

/// Split a file name into fname and kind, or `None` for unrelated files.
fn classify(name: &str) -> Option<(&str, FileKind)> {
    if let Some(fname) = name.strip_suffix(SCHEMA_EXT) {
        return (!fname.is_empty()).then_some((fname, FileKind::Schema));
    }
    if let Some(fname) = name.strip_suffix(NOTE_EXT) {
        return (!fname.is_empty()).then_some((fname, FileKind::Note));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_vault() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();

        fs::write(root.join("root.md"), "# Root").unwrap();
        fs::write(root.join("project.foo.md"), "# Foo").unwrap();
        fs::write(root.join("project.schema.yml"), "version: 1\nschemas: []").unwrap();
        fs::write(root.join("readme.txt"), "ignored").unwrap();
        fs::write(root.join(".hidden.md"), "ignored").unwrap();

        fs::create_dir(root.join("assets")).unwrap();
        fs::write(root.join("assets/nested.md"), "ignored").unwrap();

        dir
    }

    #[test]
    fn test_walk_finds_top_level_files() {
        let vault = create_test_vault();
        let walker = VaultWalker::new(vault.path()).unwrap();
        let files = walker.walk().unwrap();

        let found: Vec<(&str, FileKind)> =
            files.iter().map(|f| (f.fname.as_str(), f.kind)).collect();
        assert_eq!(
            found,
            vec![
                ("project", FileKind::Schema),
                ("project.foo", FileKind::Note),
                ("root", FileKind::Note),
            ]
        );
    }

    #[test]
    fn test_missing_root() {
        let result = VaultWalker::new(Path::new("/nonexistent/path/to/vault"));
        assert!(matches!(result, Err(VaultWalkerError::MissingRoot(_))));
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("a.b.md"), Some(("a.b", FileKind::Note)));
        assert_eq!(classify("a.schema.yml"), Some(("a", FileKind::Schema)));
        assert_eq!(classify(".md"), None);
        assert_eq!(classify("a.yml"), None);
    }
}
