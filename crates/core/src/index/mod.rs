//! In-memory search index for note lookup.
//!
//! This module provides:
//! - [`FuzzyIndex`]: one index for notes (keyed on `fname`) and one for
//!   schema module roots (keyed on `fname` and `id`)
//! - [`SearchIndex`]: the generic ordered collection both are built on
//! - a bitap scorer and an extended query syntax (`^prefix`, `suffix$`,
//!   `=exact`, `'include`, `!inverse`, `a | b`)
//!
//! # Example
//!
//! ```
//! use notelookup_core::index::{FuzzyIndex, IndexMode};
//! use notelookup_core::note::{Note, NoteDict, Vault};
//!
//! let vault = Vault::new("notes", "/tmp/notes");
//! let mut notes = NoteDict::new();
//! for (id, fname) in [("1", "root"), ("2", "project.foo"), ("3", "project.bar")] {
//!     notes.insert(id.to_string(), Note::new(id, fname, vault.clone()));
//! }
//!
//! let mut index = FuzzyIndex::new(IndexMode::Fuzzy);
//! index.rebuild_notes(&notes).unwrap();
//!
//! let hits = index.query_notes("project.foo");
//! assert_eq!(hits[0].fname, "project.foo");
//! ```

pub mod bitap;
pub mod extended;
pub mod fuzzy;
pub mod search;
pub mod types;

pub use bitap::{BitapMatch, BitapOptions, BitapPattern};
pub use extended::ExtendedQuery;
pub use fuzzy::{FuzzyIndex, WILDCARD};
pub use search::{SearchHit, SearchIndex, SearchKey};
pub use types::{IndexError, IndexMode, IndexedNote, IndexedSchema, Searchable};
