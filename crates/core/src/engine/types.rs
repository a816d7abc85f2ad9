//! Engine query contract, change records and errors.

use serde::Serialize;
use thiserror::Error;

use crate::index::IndexError;
use crate::note::{HierarchyError, Note, NoteDict, Vault};
use crate::vault::VaultError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),

    #[error(transparent)]
    Vault(#[from] VaultError),

    #[error("note not found: {0}")]
    NoteNotFound(String),

    #[error("schema not found: {0}")]
    SchemaNotFound(String),

    #[error("a note named '{fname}' already exists in vault '{vault}'")]
    DuplicateNote { fname: String, vault: String },

    #[error("cannot {0} the root note")]
    RootNote(&'static str),

    #[error("invalid note name: '{0}'")]
    InvalidFname(String),

    #[error("index returned unknown note id: {0}")]
    StaleIndexEntry(String),
}

/// Options for [`NoteQueryEngine::query_notes`].
#[derive(Debug, Clone, Default)]
pub struct QueryNotesOpts {
    pub qs: String,
    /// Keep only notes from this vault.
    pub vault: Option<Vault>,
}

impl QueryNotesOpts {
    pub fn new(qs: impl Into<String>) -> Self {
        Self { qs: qs.into(), vault: None }
    }
}

/// Full notes matching a query, best match first.
#[derive(Debug, Default)]
pub struct NoteQueryResp<'a> {
    pub data: Vec<&'a Note>,
}

/// The query surface hierarchical lookup needs from an engine.
pub trait NoteQueryEngine {
    /// Every note, keyed by id.
    fn notes(&self) -> &NoteDict;

    /// Fnames whose notes act as roots for lookup; `["root"]` means the
    /// hierarchy roots themselves.
    fn site_hierarchies(&self) -> &[String];

    /// Query the note index and resolve hits to full notes.
    fn query_notes(&self, opts: &QueryNotesOpts) -> Result<NoteQueryResp<'_>, EngineError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeStatus {
    Create,
    Update,
    Delete,
}

/// A note touched by a mutation.
#[derive(Debug, Clone, Serialize)]
pub struct NoteChange {
    pub status: ChangeStatus,
    pub note: Note,
}

impl NoteChange {
    pub fn create(note: Note) -> Self {
        Self { status: ChangeStatus::Create, note }
    }

    pub fn update(note: Note) -> Self {
        Self { status: ChangeStatus::Update, note }
    }

    pub fn delete(note: Note) -> Self {
        Self { status: ChangeStatus::Delete, note }
    }
}
