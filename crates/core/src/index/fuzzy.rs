//! Dual note/schema index with fuzzy or exact matching.

use tracing::{debug, trace};

use super::bitap::BitapOptions;
use super::search::SearchIndex;
use super::types::{IndexError, IndexMode, IndexedNote, IndexedSchema};
use crate::note::{Note, NoteDict, ROOT_FNAME, SchemaModule, SchemaModuleDict};

/// Query that lists every entry in insertion order.
pub const WILDCARD: &str = "*";

const NOTE_KEYS: &[&str] = &["fname"];
const SCHEMA_KEYS: &[&str] = &["fname", "id"];

fn options_for(mode: IndexMode) -> BitapOptions {
    BitapOptions {
        threshold: match mode {
            IndexMode::Exact => 0.0,
            IndexMode::Fuzzy => 0.5,
        },
        min_match_char_len: 2,
    }
}

/// In-memory search index over notes and schema modules.
///
/// Built once from the full collections with [`rebuild_notes`] and
/// [`rebuild_schemas`], then patched entry by entry as notes change.
///
/// [`rebuild_notes`]: FuzzyIndex::rebuild_notes
/// [`rebuild_schemas`]: FuzzyIndex::rebuild_schemas
#[derive(Debug, Clone)]
pub struct FuzzyIndex {
    mode: IndexMode,
    notes: SearchIndex<IndexedNote>,
    schemas: SearchIndex<IndexedSchema>,
}

impl Default for FuzzyIndex {
    fn default() -> Self {
        Self::new(IndexMode::default())
    }
}

impl FuzzyIndex {
    pub fn new(mode: IndexMode) -> Self {
        let options = options_for(mode);
        Self {
            mode,
            notes: SearchIndex::new(NOTE_KEYS, options),
            schemas: SearchIndex::new(SCHEMA_KEYS, options),
        }
    }

    pub fn mode(&self) -> IndexMode {
        self.mode
    }

    /// Replace the notes collection with projections of `notes`.
    ///
    /// Every note is projected before anything is replaced, so a failing
    /// projection leaves the previous collection in place.
    pub fn rebuild_notes(&mut self, notes: &NoteDict) -> Result<(), IndexError> {
        let docs = notes.values().map(IndexedNote::try_from).collect::<Result<Vec<_>, _>>()?;
        debug!(count = docs.len(), "rebuilt notes index");
        self.notes.set_collection(docs);
        Ok(())
    }

    /// Replace the schemas collection with the roots of `schemas`.
    pub fn rebuild_schemas(&mut self, schemas: &SchemaModuleDict) -> Result<(), IndexError> {
        let docs =
            schemas.values().map(IndexedSchema::try_from).collect::<Result<Vec<_>, _>>()?;
        debug!(count = docs.len(), "rebuilt schemas index");
        self.schemas.set_collection(docs);
        Ok(())
    }

    /// Add a note, replacing any entry with the same id.
    pub fn upsert_note(&mut self, note: &Note) -> Result<(), IndexError> {
        let doc = IndexedNote::try_from(note)?;
        self.notes.remove_id(&doc.id);
        trace!(id = %doc.id, fname = %doc.fname, "indexed note");
        self.notes.add(doc);
        Ok(())
    }

    /// Add a schema module root, replacing any entry with the same id.
    pub fn upsert_schema(&mut self, module: &SchemaModule) -> Result<(), IndexError> {
        let doc = IndexedSchema::try_from(module)?;
        self.schemas.remove_id(&doc.id);
        trace!(id = %doc.id, fname = %doc.fname, "indexed schema");
        self.schemas.add(doc);
        Ok(())
    }

    /// Remove every note entry with `id`. Absent ids are ignored.
    pub fn remove_note(&mut self, id: &str) {
        let removed = self.notes.remove_id(id);
        trace!(id, removed = removed.len(), "removed note from index");
    }

    /// Remove every schema entry whose module root has `id`. Absent ids are ignored.
    pub fn remove_schema(&mut self, id: &str) {
        let removed = self.schemas.remove_id(id);
        trace!(id, removed = removed.len(), "removed schema from index");
    }

    /// Every indexed note, in insertion order.
    pub fn all_notes(&self) -> &[IndexedNote] {
        self.notes.docs()
    }

    /// Every indexed schema, in insertion order.
    pub fn all_schemas(&self) -> &[IndexedSchema] {
        self.schemas.docs()
    }

    /// Query notes by fname.
    ///
    /// - `""` returns the note(s) named `root`
    /// - `"*"` returns every note in insertion order
    /// - anything else is matched against `fname`, best match first
    pub fn query_notes(&self, qs: &str) -> Vec<&IndexedNote> {
        let items: Vec<&IndexedNote> = match qs {
            "" => self.all_notes().iter().filter(|n| n.fname == ROOT_FNAME).collect(),
            WILDCARD => self.all_notes().iter().collect(),
            _ => self.notes.search(qs).into_iter().map(|hit| hit.item).collect(),
        };
        trace!(qs, hits = items.len(), "queried notes index");
        items
    }

    /// Query schema module roots by fname and id.
    ///
    /// `""` returns the single `root` schema and fails with
    /// [`IndexError::NoRootSchema`] if none is indexed.
    pub fn query_schemas(&self, qs: &str) -> Result<Vec<&IndexedSchema>, IndexError> {
        let items: Vec<&IndexedSchema> = match qs {
            "" => {
                let root = self
                    .all_schemas()
                    .iter()
                    .find(|s| s.fname == ROOT_FNAME)
                    .ok_or(IndexError::NoRootSchema)?;
                vec![root]
            }
            WILDCARD => self.all_schemas().iter().collect(),
            _ => self.schemas.search(qs).into_iter().map(|hit| hit.item).collect(),
        };
        trace!(qs, hits = items.len(), "queried schemas index");
        Ok(items)
    }
}
