//! Load notes and schema modules from a vault directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use super::walker::{FileKind, VaultWalker, VaultWalkerError};
use crate::frontmatter::{self, FrontmatterParseError};
use crate::ids::generate_note_id;
use crate::note::{Note, NoteDict, ROOT_FNAME, Schema, SchemaModule, SchemaModuleDict, Vault};

#[derive(Debug, Error)]
pub enum VaultError {
    #[error(transparent)]
    Walk(#[from] VaultWalkerError),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid frontmatter in {path}: {source}")]
    Frontmatter {
        path: PathBuf,
        #[source]
        source: FrontmatterParseError,
    },

    #[error("invalid schema file {path}: {source}")]
    Schema {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("schema file {0} defines no schemas")]
    EmptySchema(PathBuf),

    #[error("duplicate note id '{id}' ({first} and {second})")]
    DuplicateId { id: String, first: String, second: String },
}

/// Notes and schema modules read from one or more vaults.
///
/// Notes come back unlinked: parent/children are assembled by the engine.
#[derive(Debug, Default)]
pub struct LoadedVault {
    pub notes: NoteDict,
    pub schemas: SchemaModuleDict,
}

impl LoadedVault {
    /// Merge another vault's contents. Note ids must stay unique across vaults.
    pub fn merge(&mut self, other: LoadedVault) -> Result<(), VaultError> {
        for (id, note) in other.notes {
            if let Some(existing) = self.notes.get(&id) {
                return Err(VaultError::DuplicateId {
                    id,
                    first: format!("{}/{}", existing.vault.name, existing.fname),
                    second: format!("{}/{}", note.vault.name, note.fname),
                });
            }
            self.notes.insert(id, note);
        }
        // The first vault's module wins for a shared root id such as `root`.
        for (id, module) in other.schemas {
            self.schemas.entry(id).or_insert(module);
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct SchemaFile {
    #[serde(default = "default_version")]
    version: u32,
    #[serde(default)]
    schemas: Vec<SchemaEntry>,
}

fn default_version() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
struct SchemaEntry {
    id: String,
    title: Option<String>,
    desc: Option<String>,
    parent: Option<String>,
    #[serde(default)]
    children: Vec<String>,
    pattern: Option<String>,
}

/// Read every note and schema module in `vault`.
///
/// A vault without a `root` note gets one synthesised.
pub fn load_vault(vault: &Vault) -> Result<LoadedVault, VaultError> {
    let walker = VaultWalker::new(&vault.fs_path)?;
    let mut loaded = LoadedVault::default();

    for file in walker.walk()? {
        let content = fs::read_to_string(&file.absolute_path)
            .map_err(|source| VaultError::Read { path: file.absolute_path.clone(), source })?;

        match file.kind {
            FileKind::Note => {
                let note = parse_note(&content, &file.fname, vault, file.modified)
                    .map_err(|source| VaultError::Frontmatter {
                        path: file.absolute_path.clone(),
                        source,
                    })?;
                if let Some(existing) = loaded.notes.get(&note.id) {
                    return Err(VaultError::DuplicateId {
                        id: note.id,
                        first: existing.fname.clone(),
                        second: file.fname,
                    });
                }
                loaded.notes.insert(note.id.clone(), note);
            }
            FileKind::Schema => {
                let module =
                    parse_schema_module(&content, &file.fname, vault, &file.absolute_path)?;
                loaded.schemas.insert(module.root.clone(), module);
            }
        }
    }

    if !loaded.notes.values().any(Note::is_root) {
        warn!(vault = %vault.name, "vault has no root note, synthesising one");
        let id = generate_note_id(&vault.name, ROOT_FNAME);
        let mut root = Note::new(id, ROOT_FNAME, vault.clone());
        root.stub = true;
        loaded.notes.insert(root.id.clone(), root);
    }

    debug!(
        vault = %vault.name,
        notes = loaded.notes.len(),
        schemas = loaded.schemas.len(),
        "loaded vault"
    );
    Ok(loaded)
}

/// Build a note from file content.
///
/// Frontmatter supplies `id`, `title`, `desc`, `created`, `updated` (epoch
/// milliseconds) and `stub`; anything missing falls back to values derived
/// from the fname and `modified`.
pub fn parse_note(
    content: &str,
    fname: &str,
    vault: &Vault,
    modified: SystemTime,
) -> Result<Note, FrontmatterParseError> {
    let parsed = frontmatter::parse(content)?;
    let fm = parsed.frontmatter.unwrap_or_default();

    let id = fm
        .get_str("id")
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| generate_note_id(&vault.name, fname));

    let mut note = Note::new(id, fname, vault.clone());
    if let Some(title) = fm.get_str("title").filter(|t| !t.is_empty()) {
        note.title = title;
    }
    note.desc = fm.get_str("desc").unwrap_or_default();
    note.stub = fm.get_bool("stub").unwrap_or(false);

    let fallback = DateTime::<Utc>::from(modified);
    note.created = timestamp(fm.get_i64("created")).unwrap_or(fallback);
    note.updated = timestamp(fm.get_i64("updated")).unwrap_or(fallback);
    Ok(note)
}

fn timestamp(millis: Option<i64>) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis?)
}

/// Build a schema module from a `.schema.yml` file.
///
/// The module root is the schema whose parent is `root`, else the first one.
pub fn parse_schema_module(
    content: &str,
    fname: &str,
    vault: &Vault,
    path: &Path,
) -> Result<SchemaModule, VaultError> {
    let file: SchemaFile = serde_yaml::from_str(content)
        .map_err(|source| VaultError::Schema { path: path.to_path_buf(), source })?;
    if file.version != 1 {
        warn!(path = %path.display(), version = file.version, "unknown schema file version");
    }

    let root = file
        .schemas
        .iter()
        .find(|s| s.parent.as_deref() == Some(ROOT_FNAME))
        .or_else(|| file.schemas.first())
        .map(|s| s.id.clone())
        .ok_or_else(|| VaultError::EmptySchema(path.to_path_buf()))?;

    let schemas = file
        .schemas
        .into_iter()
        .map(|entry| {
            let schema = Schema {
                title: entry.title.unwrap_or_else(|| entry.id.clone()),
                id: entry.id,
                fname: fname.to_string(),
                desc: entry.desc.unwrap_or_default(),
                parent: entry.parent,
                children: entry.children,
                pattern: entry.pattern,
            };
            (schema.id.clone(), schema)
        })
        .collect();

    Ok(SchemaModule { fname: fname.to_string(), vault: vault.clone(), root, schemas })
}
