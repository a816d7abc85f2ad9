//! Hierarchical note lookup on top of an engine's note query.

use thiserror::Error;
use tracing::trace;

use crate::engine::{EngineError, NoteQueryEngine, QueryNotesOpts};
use crate::note::hierarchy;
use crate::note::{Note, NoteDict, ROOT_FNAME};

/// Maximum number of notes a lookup returns.
pub const PAGINATE_LIMIT: usize = 50;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("note '{parent}' lists unknown child '{child}'")]
    DanglingChild { parent: String, child: String },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LookupOpts {
    /// Keep only non-stub notes exactly one level below the query.
    pub show_direct_children_only: bool,
}

/// Hierarchical lookup helpers.
pub struct NoteLookup;

impl NoteLookup {
    /// Prefix of `qs` up to and including its last `.`, or `""`.
    ///
    /// ```
    /// use notelookup_core::lookup::NoteLookup;
    ///
    /// assert_eq!(NoteLookup::qs_for_current_level("a.b.c"), "a.b.");
    /// assert_eq!(NoteLookup::qs_for_current_level("a"), "");
    /// ```
    pub fn qs_for_current_level(qs: &str) -> &str {
        match qs.rfind('.') {
            Some(pos) => &qs[..=pos],
            None => "",
        }
    }

    /// Treat `/` as a hierarchy separator.
    pub fn slash_to_dot(qs: &str) -> String {
        qs.replace('/', ".")
    }

    /// Notes shown for an empty query: the children of every site root,
    /// followed by the site roots themselves.
    ///
    /// With `site_hierarchies == ["root"]` the site roots are the hierarchy
    /// roots; otherwise every note whose fname matches one of the entries.
    pub fn fetch_root_results<'a>(
        notes: &'a NoteDict,
        site_hierarchies: &[String],
    ) -> Result<Vec<&'a Note>, LookupError> {
        let roots: Vec<&Note> = if site_hierarchies.len() == 1 && site_hierarchies[0] == ROOT_FNAME
        {
            hierarchy::roots(notes)
        } else {
            site_hierarchies
                .iter()
                .flat_map(|fname| hierarchy::notes_by_fname(notes, fname, None))
                .collect()
        };

        let mut results = Vec::new();
        for root in &roots {
            for child in &root.children {
                let note = notes.get(child).ok_or_else(|| LookupError::DanglingChild {
                    parent: root.id.clone(),
                    child: child.clone(),
                })?;
                results.push(note);
            }
        }
        results.extend(roots);
        Ok(results)
    }

    /// Look up notes matching `qs`.
    ///
    /// An empty query (after `/` → `.` normalisation) returns the root
    /// results and never touches the index. Otherwise the engine is queried,
    /// optionally narrowed to direct children of the query's level, and the
    /// result is capped at [`PAGINATE_LIMIT`].
    pub fn lookup<'a, E>(
        qs: &str,
        engine: &'a E,
        opts: LookupOpts,
    ) -> Result<Vec<&'a Note>, LookupError>
    where
        E: NoteQueryEngine + ?Sized,
    {
        let qs = Self::slash_to_dot(qs);
        if qs.is_empty() {
            return Self::fetch_root_results(engine.notes(), engine.site_hierarchies());
        }

        let resp = engine.query_notes(&QueryNotesOpts::new(qs.as_str()))?;
        let mut nodes = resp.data;
        if opts.show_direct_children_only {
            let depth = qs.split('.').count();
            nodes.retain(|n| n.depth() == depth && !n.stub);
        }
        nodes.truncate(PAGINATE_LIMIT);

        trace!(qs = %qs, results = nodes.len(), "lookup");
        Ok(nodes)
    }
}
