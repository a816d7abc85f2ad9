//! Fname hierarchy helpers: depth, roots, parent/children linking and stubs.

use std::collections::HashMap;

use thiserror::Error;

use super::types::{Note, NoteDict, ROOT_FNAME, Vault};
use crate::ids::generate_note_id;

#[derive(Debug, Error)]
pub enum HierarchyError {
    #[error("vault '{0}' has no root note")]
    MissingRoot(String),

    #[error("note not found: {0}")]
    NoteNotFound(String),
}

/// Number of `.`-separated segments of `fname`; the root note has depth 0.
pub fn depth(fname: &str) -> usize {
    if fname == ROOT_FNAME { 0 } else { fname.split('.').count() }
}

/// Fname of the hierarchical parent. Top-level notes hang off `root`.
///
/// # Examples
/// ```
/// use notelookup_core::note::hierarchy::parent_fname;
///
/// assert_eq!(parent_fname("a.b.c").as_deref(), Some("a.b"));
/// assert_eq!(parent_fname("a").as_deref(), Some("root"));
/// assert_eq!(parent_fname("root"), None);
/// ```
pub fn parent_fname(fname: &str) -> Option<String> {
    if fname == ROOT_FNAME {
        return None;
    }
    match fname.rsplit_once('.') {
        Some((parent, _)) => Some(parent.to_string()),
        None => Some(ROOT_FNAME.to_string()),
    }
}

/// Notes without a parent, one per vault in a well-formed workspace.
pub fn roots(notes: &NoteDict) -> Vec<&Note> {
    notes.values().filter(|n| n.parent.is_none()).collect()
}

/// Notes whose fname matches case-insensitively, optionally restricted to a vault.
pub fn notes_by_fname<'a>(
    notes: &'a NoteDict,
    fname: &str,
    vault: Option<&Vault>,
) -> Vec<&'a Note> {
    let wanted = fname.to_lowercase();
    notes
        .values()
        .filter(|n| n.fname.to_lowercase() == wanted)
        .filter(|n| vault.is_none_or(|v| &n.vault == v))
        .collect()
}

/// The note with `fname` in `vault`, if any.
pub fn find_by_fname<'a>(notes: &'a NoteDict, fname: &str, vault: &Vault) -> Option<&'a Note> {
    notes_by_fname(notes, fname, Some(vault)).into_iter().next()
}

/// Create a stub for `fname` whose id is not yet taken in `notes`.
///
/// The id is derived from vault and fname; on collision (e.g. a renamed note
/// kept the derived id of its old fname) a counter is mixed in.
pub fn new_stub(notes: &NoteDict, fname: &str, vault: &Vault) -> Note {
    let mut stub = Note::new_stub(fname, vault);
    let mut n = 1;
    while notes.contains_key(&stub.id) {
        stub.id = generate_note_id(&vault.name, &format!("{fname}~{n}"));
        n += 1;
    }
    stub
}

/// Make `child_id` a child of `parent_id`.
pub fn link(notes: &mut NoteDict, parent_id: &str, child_id: &str) {
    if let Some(child) = notes.get_mut(child_id) {
        child.parent = Some(parent_id.to_string());
    }
    if let Some(parent) = notes.get_mut(parent_id)
        && !parent.children.iter().any(|c| c == child_id)
    {
        parent.children.push(child_id.to_string());
    }
}

/// Detach a note from its parent. Returns the former parent id.
pub fn unlink(notes: &mut NoteDict, child_id: &str) -> Option<String> {
    let parent_id = notes.get_mut(child_id)?.parent.take()?;
    if let Some(parent) = notes.get_mut(&parent_id) {
        parent.children.retain(|c| c != child_id);
    }
    Some(parent_id)
}

/// Link a single note under its nearest existing ancestor in the same vault,
/// creating stub notes for every missing level in between.
///
/// Returns the ids of the stubs that were created, nearest ancestor first.
pub fn attach(notes: &mut NoteDict, id: &str) -> Result<Vec<String>, HierarchyError> {
    let (fname, vault) = {
        let note = notes.get(id).ok_or_else(|| HierarchyError::NoteNotFound(id.to_string()))?;
        (note.fname.clone(), note.vault.clone())
    };

    let mut created = Vec::new();
    let mut child_id = id.to_string();
    let mut current = fname;

    while let Some(parent) = parent_fname(&current) {
        if let Some(existing) = find_by_fname(notes, &parent, &vault) {
            let parent_id = existing.id.clone();
            link(notes, &parent_id, &child_id);
            return Ok(created);
        }
        if parent == ROOT_FNAME {
            return Err(HierarchyError::MissingRoot(vault.name.clone()));
        }

        let stub = new_stub(notes, &parent, &vault);
        let stub_id = stub.id.clone();
        notes.insert(stub_id.clone(), stub);
        link(notes, &stub_id, &child_id);
        created.push(stub_id.clone());

        child_id = stub_id;
        current = parent;
    }

    Ok(created)
}

/// Link every note of a freshly loaded collection into its hierarchy.
///
/// Notes are processed shallowest first and in fname order, so children lists
/// come out sorted by fname. Returns the ids of created stubs.
pub fn assign_parents(notes: &mut NoteDict) -> Result<Vec<String>, HierarchyError> {
    let mut by_fname: HashMap<(String, String), String> = notes
        .values()
        .map(|n| ((n.vault.name.clone(), n.fname.to_lowercase()), n.id.clone()))
        .collect();

    let mut order: Vec<(usize, String, String)> = notes
        .values()
        .filter(|n| !n.is_root())
        .map(|n| (n.depth(), n.fname.to_lowercase(), n.id.clone()))
        .collect();
    order.sort();

    let mut created = Vec::new();
    for (_, _, id) in order {
        // Already linked as an ancestor of an earlier note.
        if notes.get(&id).is_none_or(|n| n.parent.is_some()) {
            continue;
        }
        let (fname, vault) = {
            let n = &notes[&id];
            (n.fname.clone(), n.vault.clone())
        };

        let mut child_id = id;
        let mut current = fname;
        while let Some(parent) = parent_fname(&current) {
            let key = (vault.name.clone(), parent.to_lowercase());
            if let Some(parent_id) = by_fname.get(&key) {
                let parent_id = parent_id.clone();
                link(notes, &parent_id, &child_id);
                break;
            }
            if parent == ROOT_FNAME {
                return Err(HierarchyError::MissingRoot(vault.name.clone()));
            }

            let stub = new_stub(notes, &parent, &vault);
            let stub_id = stub.id.clone();
            notes.insert(stub_id.clone(), stub);
            by_fname.insert(key, stub_id.clone());
            link(notes, &stub_id, &child_id);
            created.push(stub_id.clone());

            child_id = stub_id;
            current = parent;
        }
    }

    Ok(created)
}

/// Remove childless stub ancestors, walking up from `start_id`.
///
/// Stops at the first ancestor that is not a stub, still has children, or is
/// the root. Returns the removed notes.
pub fn prune_stub_ancestors(notes: &mut NoteDict, start_id: Option<String>) -> Vec<Note> {
    let mut removed = Vec::new();
    let mut next = start_id;

    while let Some(id) = next {
        let prunable =
            notes.get(&id).is_some_and(|n| n.stub && n.children.is_empty() && !n.is_root());
        if !prunable {
            break;
        }
        next = unlink(notes, &id);
        if let Some(note) = notes.remove(&id) {
            removed.push(note);
        }
    }

    removed
}
