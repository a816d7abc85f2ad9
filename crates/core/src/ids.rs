//! ID generation utilities for notes.
//!
//! Notes normally carry an `id` in their frontmatter. When they don't, and
//! for stub notes materialised by the engine, an id is derived from the
//! vault name and the note's fname so it stays stable across reloads.

use std::hash::{DefaultHasher, Hash, Hasher};

/// Derive a note id from a vault name and fname.
///
/// Format: 16 lowercase hex digits.
///
/// # Examples
/// ```
/// use notelookup_core::ids::generate_note_id;
///
/// let id = generate_note_id("vault", "project.foo");
/// assert_eq!(id.len(), 16);
/// assert_eq!(id, generate_note_id("vault", "project.foo"));
/// assert_ne!(id, generate_note_id("other", "project.foo"));
/// ```
pub fn generate_note_id(vault_name: &str, fname: &str) -> String {
    let mut hasher = DefaultHasher::new();
    vault_name.hash(&mut hasher);
    fname.to_lowercase().hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}
