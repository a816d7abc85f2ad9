//! Vault file discovery and loading.
//!
//! This module walks vault directories and turns note files and schema
//! files into [`Note`](crate::note::Note)s and
//! [`SchemaModule`](crate::note::SchemaModule)s.

pub mod loader;
pub mod walker;

pub use loader::{LoadedVault, VaultError, load_vault, parse_note, parse_schema_module};
pub use walker::{FileKind, VaultWalker, VaultWalkerError, WalkedFile};
