//! Note and schema data types.

use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::generate_note_id;

/// Fname of the hierarchy root in every vault.
pub const ROOT_FNAME: &str = "root";

/// A named container holding a subtree of notes.
///
/// Two vaults are the same vault when their names match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vault {
    /// Vault name (directory name unless configured otherwise).
    pub name: String,
    /// Directory the vault is read from.
    pub fs_path: PathBuf,
}

impl Vault {
    pub fn new(name: impl Into<String>, fs_path: impl Into<PathBuf>) -> Self {
        Self { name: name.into(), fs_path: fs_path.into() }
    }

    /// Create a vault named after the last component of its path.
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Self::new(name, path)
    }
}

impl PartialEq for Vault {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Vault {}

impl Hash for Vault {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// A note in the knowledge base.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    /// Stable, globally unique id.
    pub id: String,
    /// Dot-delimited hierarchical name, unique within a vault.
    pub fname: String,
    pub title: String,
    #[serde(default)]
    pub desc: String,
    pub vault: Vault,
    /// Parent note id; `None` only for a hierarchy root.
    #[serde(default)]
    pub parent: Option<String>,
    /// Direct children ids, in insertion order.
    #[serde(default)]
    pub children: Vec<String>,
    /// Structural placeholder with no authored content.
    #[serde(default)]
    pub stub: bool,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl Note {
    /// Create a detached note with a generated title.
    pub fn new(id: impl Into<String>, fname: impl Into<String>, vault: Vault) -> Self {
        let fname = fname.into();
        let now = Utc::now();
        Self {
            id: id.into(),
            title: generate_title(&fname),
            fname,
            desc: String::new(),
            vault,
            parent: None,
            children: Vec::new(),
            stub: false,
            created: now,
            updated: now,
        }
    }

    /// Create a stub placeholder for `fname`, with an id derived from vault and fname.
    pub fn new_stub(fname: &str, vault: &Vault) -> Self {
        let mut note = Self::new(generate_note_id(&vault.name, fname), fname, vault.clone());
        note.stub = true;
        note
    }

    pub fn is_root(&self) -> bool {
        self.fname == ROOT_FNAME
    }

    /// Hierarchy depth: `root` is 0, a top-level note is 1.
    pub fn depth(&self) -> usize {
        super::hierarchy::depth(&self.fname)
    }

    /// Top-level segment of the fname.
    pub fn domain(&self) -> &str {
        self.fname.split('.').next().unwrap_or(&self.fname)
    }
}

/// Notes keyed by id.
pub type NoteDict = BTreeMap<String, Note>;

/// Generate a display title from the last fname segment.
///
/// # Examples
/// ```
/// use notelookup_core::note::generate_title;
///
/// assert_eq!(generate_title("project.foo-bar"), "Foo-bar");
/// assert_eq!(generate_title("root"), "Root");
/// ```
pub fn generate_title(fname: &str) -> String {
    let last = fname.rsplit('.').next().unwrap_or(fname);
    let mut chars = last.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A node in a schema module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schema {
    pub id: String,
    /// Fname of the module this schema belongs to.
    pub fname: String,
    pub title: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub children: Vec<String>,
    /// Glob-style name pattern for notes matching this schema.
    #[serde(default)]
    pub pattern: Option<String>,
}

/// A schema module: a tree of schemas loaded from one `.schema.yml` file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaModule {
    /// Module name (file name without `.schema.yml`).
    pub fname: String,
    pub vault: Vault,
    /// Id of the module's root schema.
    pub root: String,
    /// Schemas in the module, keyed by id.
    pub schemas: BTreeMap<String, Schema>,
}

impl SchemaModule {
    /// The root schema of this module, if present.
    pub fn root_schema(&self) -> Option<&Schema> {
        self.schemas.get(&self.root)
    }

    /// The default `root` module every workspace has.
    pub fn root_module(vault: &Vault) -> Self {
        let root = Schema {
            id: ROOT_FNAME.to_string(),
            fname: ROOT_FNAME.to_string(),
            title: ROOT_FNAME.to_string(),
            desc: String::new(),
            parent: None,
            children: Vec::new(),
            pattern: None,
        };
        Self {
            fname: ROOT_FNAME.to_string(),
            vault: vault.clone(),
            root: ROOT_FNAME.to_string(),
            schemas: BTreeMap::from([(ROOT_FNAME.to_string(), root)]),
        }
    }
}

/// Schema modules keyed by their root schema id.
pub type SchemaModuleDict = BTreeMap<String, SchemaModule>;
