//! Notes, vaults and schema modules, plus helpers for the fname hierarchy.
//!
//! A note's place in the hierarchy is given by its dot-delimited `fname`
//! (`project.foo.bar`). The engine keeps `parent`/`children` links in sync
//! with the fnames, materialising stub notes for missing ancestors.

pub mod hierarchy;
pub mod types;

pub use hierarchy::HierarchyError;
pub use types::{
    Note, NoteDict, ROOT_FNAME, Schema, SchemaModule, SchemaModuleDict, Vault, generate_title,
};
