//! Index entry types and the projections that build them.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::note::{Note, SchemaModule, Vault};

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("cannot index {kind} '{key}': missing {field}")]
    Projection { kind: &'static str, key: String, field: &'static str },

    #[error("no root schema is indexed")]
    NoRootSchema,
}

/// Matching mode of a [`FuzzyIndex`](super::FuzzyIndex).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexMode {
    /// Only error-free matches; for programmatic callers.
    Exact,
    /// Tolerates typos; for interactive search-as-you-type.
    #[default]
    Fuzzy,
}

impl IndexMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Fuzzy => "fuzzy",
        }
    }
}

impl fmt::Display for IndexMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An entry that can be stored in a [`SearchIndex`](super::SearchIndex).
pub trait Searchable {
    fn id(&self) -> &str;

    /// Value of a searchable key, if the entry has it.
    fn field(&self, key: &str) -> Option<&str>;
}

/// Search projection of a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedNote {
    pub id: String,
    pub title: String,
    pub fname: String,
    pub vault: Vault,
}

impl TryFrom<&Note> for IndexedNote {
    type Error = IndexError;

    fn try_from(note: &Note) -> Result<Self, Self::Error> {
        if note.id.is_empty() {
            return Err(IndexError::Projection {
                kind: "note",
                key: note.fname.clone(),
                field: "id",
            });
        }
        if note.fname.is_empty() {
            return Err(IndexError::Projection {
                kind: "note",
                key: note.id.clone(),
                field: "fname",
            });
        }
        Ok(Self {
            id: note.id.clone(),
            title: note.title.clone(),
            fname: note.fname.clone(),
            vault: note.vault.clone(),
        })
    }
}

impl Searchable for IndexedNote {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, key: &str) -> Option<&str> {
        match key {
            "id" => Some(&self.id),
            "fname" => Some(&self.fname),
            "title" => Some(&self.title),
            _ => None,
        }
    }
}

/// Search projection of a schema module's root schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedSchema {
    pub id: String,
    pub fname: String,
}

impl TryFrom<&SchemaModule> for IndexedSchema {
    type Error = IndexError;

    fn try_from(module: &SchemaModule) -> Result<Self, Self::Error> {
        let root = module.root_schema().ok_or_else(|| IndexError::Projection {
            kind: "schema module",
            key: module.fname.clone(),
            field: "root schema",
        })?;
        if root.id.is_empty() {
            return Err(IndexError::Projection {
                kind: "schema module",
                key: module.fname.clone(),
                field: "id",
            });
        }
        if module.fname.is_empty() {
            return Err(IndexError::Projection {
                kind: "schema module",
                key: root.id.clone(),
                field: "fname",
            });
        }
        Ok(Self { id: root.id.clone(), fname: module.fname.clone() })
    }
}

impl Searchable for IndexedSchema {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, key: &str) -> Option<&str> {
        match key {
            "id" => Some(&self.id),
            "fname" => Some(&self.fname),
            _ => None,
        }
    }
}
