//! In-memory note store that keeps the search index in step with every change.

use chrono::Utc;
use tracing::debug;

use super::types::{EngineError, NoteChange, NoteQueryEngine, NoteQueryResp, QueryNotesOpts};
use crate::index::FuzzyIndex;
use crate::note::hierarchy::{self, HierarchyError};
use crate::note::{
    Note, NoteDict, ROOT_FNAME, SchemaModule, SchemaModuleDict, Vault, generate_title,
};
use crate::vault::{LoadedVault, load_vault};

/// Owner of the note and schema collections and their [`FuzzyIndex`].
#[derive(Debug, Clone)]
pub struct Engine {
    notes: NoteDict,
    schemas: SchemaModuleDict,
    index: FuzzyIndex,
    site_hierarchies: Vec<String>,
    vaults: Vec<Vault>,
}

impl Engine {
    /// Create an empty engine around `index`.
    pub fn new(index: FuzzyIndex, site_hierarchies: Vec<String>) -> Self {
        Self {
            notes: NoteDict::new(),
            schemas: SchemaModuleDict::new(),
            index,
            site_hierarchies,
            vaults: Vec::new(),
        }
    }

    /// Load every vault and build the indexes.
    pub fn from_vaults(
        vaults: Vec<Vault>,
        index: FuzzyIndex,
        site_hierarchies: Vec<String>,
    ) -> Result<Self, EngineError> {
        let mut loaded = LoadedVault::default();
        for vault in &vaults {
            loaded.merge(load_vault(vault)?)?;
        }

        let mut engine = Self::new(index, site_hierarchies);
        engine.vaults = vaults;
        engine.init(loaded.notes, loaded.schemas)?;
        Ok(engine)
    }

    /// Replace both collections, link the note hierarchy and rebuild the index.
    ///
    /// A default `root` schema module is added when none is present. On error
    /// the engine is left unchanged.
    pub fn init(
        &mut self,
        mut notes: NoteDict,
        mut schemas: SchemaModuleDict,
    ) -> Result<(), EngineError> {
        let stubs = hierarchy::assign_parents(&mut notes)?;

        if !schemas.contains_key(ROOT_FNAME) {
            let vault = self
                .vaults
                .first()
                .cloned()
                .or_else(|| notes.values().find(|n| n.is_root()).map(|n| n.vault.clone()))
                .unwrap_or_else(|| Vault::new(ROOT_FNAME, "."));
            schemas.insert(ROOT_FNAME.to_string(), SchemaModule::root_module(&vault));
        }

        let mut index = FuzzyIndex::new(self.index.mode());
        index.rebuild_notes(&notes)?;
        index.rebuild_schemas(&schemas)?;

        debug!(
            notes = notes.len(),
            stubs = stubs.len(),
            schemas = schemas.len(),
            mode = %index.mode(),
            "engine initialised"
        );
        self.notes = notes;
        self.schemas = schemas;
        self.index = index;
        Ok(())
    }

    pub fn index(&self) -> &FuzzyIndex {
        &self.index
    }

    pub fn schemas(&self) -> &SchemaModuleDict {
        &self.schemas
    }

    pub fn vaults(&self) -> &[Vault] {
        &self.vaults
    }

    pub fn get_note(&self, id: &str) -> Option<&Note> {
        self.notes.get(id)
    }

    /// Create or update a note.
    ///
    /// - a new note is linked under its nearest ancestor, with stubs created
    ///   for missing levels
    /// - a new note landing on a stub replaces it and adopts its children
    /// - an existing id with a different fname is renamed
    pub fn write_note(&mut self, note: Note) -> Result<Vec<NoteChange>, EngineError> {
        validate_fname(&note.fname)?;

        if !self.notes.contains_key(&note.id) {
            return self.create_note(note);
        }

        let fname_changed = self.note(&note.id)?.fname != note.fname;
        let new_fname = note.fname.clone();
        let id = note.id.clone();
        if fname_changed {
            self.rename_target(&id, &new_fname)?;
        }
        self.update_content(note)?;

        if fname_changed {
            return self.rename_note(&id, &new_fname);
        }
        let note = self.note(&id)?.clone();
        Ok(vec![NoteChange::update(note)])
    }

    fn create_note(&mut self, mut note: Note) -> Result<Vec<NoteChange>, EngineError> {
        note.parent = None;
        note.children.clear();

        let existing = hierarchy::find_by_fname(&self.notes, &note.fname, &note.vault)
            .map(|n| (n.id.clone(), n.stub));
        match existing {
            Some((stub_id, true)) => return self.replace_stub(&stub_id, note),
            Some(_) => {
                return Err(EngineError::DuplicateNote {
                    fname: note.fname,
                    vault: note.vault.name,
                });
            }
            None => {}
        }

        if !note.is_root()
            && hierarchy::find_by_fname(&self.notes, ROOT_FNAME, &note.vault).is_none()
        {
            return Err(HierarchyError::MissingRoot(note.vault.name).into());
        }

        let id = note.id.clone();
        self.notes.insert(id.clone(), note);
        let stubs = if self.note(&id)?.is_root() {
            Vec::new()
        } else {
            hierarchy::attach(&mut self.notes, &id)?
        };

        let mut changes = Vec::with_capacity(stubs.len() + 1);
        let note = self.note(&id)?.clone();
        self.index.upsert_note(&note)?;
        changes.push(NoteChange::create(note));
        for stub_id in stubs {
            let stub = self.note(&stub_id)?.clone();
            self.index.upsert_note(&stub)?;
            changes.push(NoteChange::create(stub));
        }

        debug!(id = %id, changes = changes.len(), "created note");
        Ok(changes)
    }

    /// Put `note` in place of the stub `stub_id`, taking over its links.
    fn replace_stub(
        &mut self,
        stub_id: &str,
        mut note: Note,
    ) -> Result<Vec<NoteChange>, EngineError> {
        let parent = hierarchy::unlink(&mut self.notes, stub_id);
        let stub = self
            .notes
            .remove(stub_id)
            .ok_or_else(|| EngineError::NoteNotFound(stub_id.to_string()))?;
        self.index.remove_note(stub_id);

        let id = note.id.clone();
        note.children = stub.children.clone();
        self.notes.insert(id.clone(), note);
        for child in &stub.children {
            hierarchy::link(&mut self.notes, &id, child);
        }
        if let Some(parent) = parent {
            hierarchy::link(&mut self.notes, &parent, &id);
        }

        let note = self.note(&id)?.clone();
        self.index.upsert_note(&note)?;
        debug!(id = %id, stub = %stub_id, "replaced stub");
        Ok(vec![NoteChange::delete(stub), NoteChange::create(note)])
    }

    /// Copy authored fields of `note` onto the stored note with the same id.
    fn update_content(&mut self, note: Note) -> Result<(), EngineError> {
        let stored = self
            .notes
            .get_mut(&note.id)
            .ok_or_else(|| EngineError::NoteNotFound(note.id.clone()))?;
        stored.title = note.title;
        stored.desc = note.desc;
        stored.stub = note.stub;
        stored.created = note.created;
        stored.updated = note.updated;

        let stored = stored.clone();
        self.index.upsert_note(&stored)?;
        Ok(())
    }

    /// Move a note to `new_fname` within its vault.
    ///
    /// A note with children leaves a stub behind so its children keep their
    /// place; otherwise childless stub ancestors at the old location are
    /// removed. A stub already at `new_fname` is absorbed.
    pub fn rename_note(
        &mut self,
        id: &str,
        new_fname: &str,
    ) -> Result<Vec<NoteChange>, EngineError> {
        let target_stub = self.rename_target(id, new_fname)?;
        let note = self.note(id)?;
        let old_fname = note.fname.clone();
        let vault = note.vault.clone();
        if old_fname == new_fname {
            return Ok(Vec::new());
        }
        if old_fname.to_lowercase() == new_fname.to_lowercase() {
            let note = self.set_fname(id, &old_fname, new_fname)?;
            return Ok(vec![NoteChange::update(note)]);
        }

        let mut changes = Vec::new();
        let old_parent = hierarchy::unlink(&mut self.notes, id);
        let children = std::mem::take(&mut self.note_mut(id)?.children);
        let had_children = !children.is_empty();

        if had_children {
            let mut stub = hierarchy::new_stub(&self.notes, &old_fname, &vault);
            stub.children = children;
            let stub_id = stub.id.clone();
            let child_ids = stub.children.clone();
            self.notes.insert(stub_id.clone(), stub);
            for child in &child_ids {
                hierarchy::link(&mut self.notes, &stub_id, child);
            }
            if let Some(parent) = &old_parent {
                hierarchy::link(&mut self.notes, parent, &stub_id);
            }
            let stub = self.note(&stub_id)?.clone();
            self.index.upsert_note(&stub)?;
            changes.push(NoteChange::create(stub));
        }

        self.set_fname(id, &old_fname, new_fname)?;

        if let Some(stub_id) = target_stub {
            hierarchy::unlink(&mut self.notes, &stub_id);
            let stub = self
                .notes
                .remove(&stub_id)
                .ok_or_else(|| EngineError::NoteNotFound(stub_id.clone()))?;
            for child in &stub.children {
                hierarchy::link(&mut self.notes, id, child);
            }
            self.index.remove_note(&stub_id);
            changes.push(NoteChange::delete(stub));
        }

        for stub_id in hierarchy::attach(&mut self.notes, id)? {
            let stub = self.note(&stub_id)?.clone();
            self.index.upsert_note(&stub)?;
            changes.push(NoteChange::create(stub));
        }

        let note = self.note(id)?.clone();
        self.index.upsert_note(&note)?;
        changes.push(NoteChange::update(note));

        if !had_children {
            for pruned in hierarchy::prune_stub_ancestors(&mut self.notes, old_parent) {
                self.index.remove_note(&pruned.id);
                changes.push(NoteChange::delete(pruned));
            }
        }

        debug!(id, from = %old_fname, to = new_fname, changes = changes.len(), "renamed note");
        Ok(changes)
    }

    /// Check that note `id` may move to `new_fname` without touching any
    /// state. Returns the id of a stub already at `new_fname`, if any.
    fn rename_target(&self, id: &str, new_fname: &str) -> Result<Option<String>, EngineError> {
        validate_fname(new_fname)?;
        let note = self.note(id)?;
        if note.is_root() {
            return Err(EngineError::RootNote("rename"));
        }
        if note.fname.to_lowercase() == new_fname.to_lowercase() {
            return Ok(None);
        }

        match hierarchy::find_by_fname(&self.notes, new_fname, &note.vault) {
            Some(target) if target.stub => Ok(Some(target.id.clone())),
            Some(_) => Err(EngineError::DuplicateNote {
                fname: new_fname.to_string(),
                vault: note.vault.name.clone(),
            }),
            None => Ok(None),
        }
    }

    /// Set the fname of a stored note and re-index it. A title that was
    /// generated from the old fname is regenerated.
    fn set_fname(
        &mut self,
        id: &str,
        old_fname: &str,
        new_fname: &str,
    ) -> Result<Note, EngineError> {
        let note = self.note_mut(id)?;
        if note.title == generate_title(old_fname) {
            note.title = generate_title(new_fname);
        }
        note.fname = new_fname.to_string();
        note.updated = Utc::now();
        let note = note.clone();
        self.index.upsert_note(&note)?;
        Ok(note)
    }

    /// Delete a note.
    ///
    /// A note with children is turned into a stub in place. Otherwise it is
    /// removed along with any childless stub ancestors.
    pub fn delete_note(&mut self, id: &str) -> Result<Vec<NoteChange>, EngineError> {
        let note = self.note(id)?;
        if note.is_root() {
            return Err(EngineError::RootNote("delete"));
        }

        if !note.children.is_empty() {
            let note = self.note_mut(id)?;
            note.stub = true;
            note.desc.clear();
            note.updated = Utc::now();
            let note = note.clone();
            self.index.upsert_note(&note)?;
            debug!(id, "deleted note became a stub");
            return Ok(vec![NoteChange::update(note)]);
        }

        let parent = hierarchy::unlink(&mut self.notes, id);
        let removed = self
            .notes
            .remove(id)
            .ok_or_else(|| EngineError::NoteNotFound(id.to_string()))?;
        self.index.remove_note(id);

        let mut changes = vec![NoteChange::delete(removed)];
        for pruned in hierarchy::prune_stub_ancestors(&mut self.notes, parent) {
            self.index.remove_note(&pruned.id);
            changes.push(NoteChange::delete(pruned));
        }

        debug!(id, changes = changes.len(), "deleted note");
        Ok(changes)
    }

    /// Add or replace a schema module, keyed by its root schema id.
    pub fn write_schema(&mut self, module: SchemaModule) -> Result<(), EngineError> {
        self.index.upsert_schema(&module)?;
        debug!(root = %module.root, fname = %module.fname, "wrote schema module");
        self.schemas.insert(module.root.clone(), module);
        Ok(())
    }

    /// Remove the schema module whose root schema has `id`.
    pub fn delete_schema(&mut self, id: &str) -> Result<SchemaModule, EngineError> {
        let module =
            self.schemas.remove(id).ok_or_else(|| EngineError::SchemaNotFound(id.to_string()))?;
        self.index.remove_schema(id);
        debug!(root = id, "deleted schema module");
        Ok(module)
    }

    /// Query schema modules by fname and root id.
    pub fn query_schemas(&self, qs: &str) -> Result<Vec<&SchemaModule>, EngineError> {
        self.index
            .query_schemas(qs)?
            .into_iter()
            .map(|hit| {
                self.schemas
                    .get(&hit.id)
                    .ok_or_else(|| EngineError::StaleIndexEntry(hit.id.clone()))
            })
            .collect()
    }

    fn note(&self, id: &str) -> Result<&Note, EngineError> {
        self.notes.get(id).ok_or_else(|| EngineError::NoteNotFound(id.to_string()))
    }

    fn note_mut(&mut self, id: &str) -> Result<&mut Note, EngineError> {
        self.notes.get_mut(id).ok_or_else(|| EngineError::NoteNotFound(id.to_string()))
    }
}

impl NoteQueryEngine for Engine {
    fn notes(&self) -> &NoteDict {
        &self.notes
    }

    fn site_hierarchies(&self) -> &[String] {
        &self.site_hierarchies
    }

    fn query_notes(&self, opts: &QueryNotesOpts) -> Result<NoteQueryResp<'_>, EngineError> {
        let mut data = Vec::new();
        for hit in self.index.query_notes(&opts.qs) {
            let note = self
                .notes
                .get(&hit.id)
                .ok_or_else(|| EngineError::StaleIndexEntry(hit.id.clone()))?;
            if opts.vault.as_ref().is_none_or(|v| &note.vault == v) {
                data.push(note);
            }
        }
        Ok(NoteQueryResp { data })
    }
}

/// Fnames are non-empty, dot-separated, with no empty segment.
fn validate_fname(fname: &str) -> Result<(), EngineError> {
    if fname.trim().is_empty() || fname.split('.').any(|segment| segment.trim().is_empty()) {
        return Err(EngineError::InvalidFname(fname.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ChangeStatus;
    use crate::index::IndexMode;

    fn vault() -> Vault {
        Vault::new("v", "/v")
    }

    fn note(id: &str, fname: &str) -> Note {
        Note::new(id, fname, vault())
    }

    fn engine(notes: &[(&str, &str)]) -> Engine {
        let mut dict: NoteDict =
            notes.iter().map(|(id, fname)| (id.to_string(), note(id, fname))).collect();
        dict.insert("root".into(), note("root", "root"));
        let mut engine = Engine::new(FuzzyIndex::new(IndexMode::Exact), vec!["root".into()]);
        engine.init(dict, SchemaModuleDict::new()).unwrap();
        engine
    }

    fn indexed_fnames(engine: &Engine) -> Vec<String> {
        let mut fnames: Vec<String> =
            engine.index().all_notes().iter().map(|n| n.fname.clone()).collect();
        fnames.sort();
        fnames
    }

    fn statuses(changes: &[NoteChange]) -> Vec<(ChangeStatus, String)> {
        changes.iter().map(|c| (c.status, c.note.fname.clone())).collect()
    }

    #[test]
    fn test_init_adds_root_schema() {
        let engine = engine(&[]);
        let schemas = engine.query_schemas("").unwrap();
        assert_eq!(schemas.len(), 1);
        assert_eq!(schemas[0].fname, "root");
    }

    #[test]
    fn test_create_materialises_stubs() {
        let mut engine = engine(&[]);
        let changes = engine.write_note(note("c", "a.b.c")).unwrap();

        assert_eq!(
            statuses(&changes),
            vec![
                (ChangeStatus::Create, "a.b.c".to_string()),
                (ChangeStatus::Create, "a.b".to_string()),
                (ChangeStatus::Create, "a".to_string()),
            ]
        );
        assert_eq!(indexed_fnames(&engine), vec!["a", "a.b", "a.b.c", "root"]);
        assert!(changes[1].note.stub);
    }

    #[test]
    fn test_delete_prunes_stubs() {
        let mut engine = engine(&[]);
        engine.write_note(note("c", "a.b.c")).unwrap();

        let changes = engine.delete_note("c").unwrap();
        assert_eq!(changes.len(), 3);
        assert!(changes.iter().all(|c| c.status == ChangeStatus::Delete));
        assert_eq!(indexed_fnames(&engine), vec!["root"]);
        assert!(engine.notes()["root"].children.is_empty());
    }

    #[test]
    fn test_delete_with_children_becomes_stub() {
        let mut engine = engine(&[("a", "a"), ("ab", "a.b")]);
        let changes = engine.delete_note("a").unwrap();

        assert_eq!(statuses(&changes), vec![(ChangeStatus::Update, "a".to_string())]);
        assert!(engine.get_note("a").unwrap().stub);
        assert_eq!(indexed_fnames(&engine), vec!["a", "a.b", "root"]);
    }

    #[test]
    fn test_delete_errors() {
        let mut engine = engine(&[]);
        assert!(matches!(engine.delete_note("root"), Err(EngineError::RootNote(_))));
        assert!(matches!(engine.delete_note("nope"), Err(EngineError::NoteNotFound(_))));
    }

    #[test]
    fn test_create_over_stub_adopts_children() {
        let mut engine = engine(&[]);
        engine.write_note(note("c", "a.b.c")).unwrap();

        let changes = engine.write_note(note("ab", "a.b")).unwrap();
        assert_eq!(
            statuses(&changes),
            vec![
                (ChangeStatus::Delete, "a.b".to_string()),
                (ChangeStatus::Create, "a.b".to_string())
            ]
        );
        assert_eq!(engine.get_note("ab").unwrap().children, vec!["c"]);
        assert_eq!(engine.get_note("c").unwrap().parent.as_deref(), Some("ab"));
        assert_eq!(engine.index().all_notes().len(), 4);
    }

    #[test]
    fn test_create_duplicate_fname() {
        let mut engine = engine(&[("a", "a")]);
        let err = engine.write_note(note("other", "a")).unwrap_err();
        assert!(matches!(err, EngineError::DuplicateNote { .. }));
    }

    #[test]
    fn test_create_without_root() {
        let mut engine = engine(&[]);
        let note = Note::new("x", "x", Vault::new("elsewhere", "/e"));
        assert!(matches!(
            engine.write_note(note),
            Err(EngineError::Hierarchy(HierarchyError::MissingRoot(_)))
        ));
        assert!(engine.get_note("x").is_none());
    }

    #[test]
    fn test_invalid_fname() {
        let mut engine = engine(&[]);
        assert!(matches!(engine.write_note(note("x", "a..b")), Err(EngineError::InvalidFname(_))));
        assert!(matches!(engine.write_note(note("x", "")), Err(EngineError::InvalidFname(_))));
    }

    #[test]
    fn test_update_keeps_links() {
        let mut engine = engine(&[("a", "a"), ("ab", "a.b")]);
        let mut edited = note("a", "a");
        edited.title = "Alpha".into();

        let changes = engine.write_note(edited).unwrap();
        assert_eq!(changes.len(), 1);
        let stored = engine.get_note("a").unwrap();
        assert_eq!(stored.title, "Alpha");
        assert_eq!(stored.children, vec!["ab"]);
        assert_eq!(stored.parent.as_deref(), Some("root"));
    }

    #[test]
    fn test_rename_moves_note_in_index() {
        let mut engine = engine(&[("foo", "foo")]);
        engine.rename_note("foo", "bar.baz").unwrap();

        let opts = QueryNotesOpts::new("foo");
        assert!(engine.query_notes(&opts).unwrap().data.is_empty());
        let hits = engine.query_notes(&QueryNotesOpts::new("bar.baz")).unwrap().data;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "foo");
        assert_eq!(hits[0].title, "Baz");
        assert_eq!(indexed_fnames(&engine), vec!["bar", "bar.baz", "root"]);
    }

    #[test]
    fn test_rename_with_children_leaves_stub() {
        let mut engine = engine(&[("a", "a"), ("ab", "a.b")]);
        let changes = engine.rename_note("a", "z").unwrap();

        assert_eq!(
            statuses(&changes),
            vec![(ChangeStatus::Create, "a".to_string()), (ChangeStatus::Update, "z".to_string())]
        );
        let stub_id = engine.get_note("ab").unwrap().parent.clone().unwrap();
        let stub = engine.get_note(&stub_id).unwrap();
        assert!(stub.stub);
        assert_eq!(stub.fname, "a");
        assert!(engine.get_note("a").unwrap().children.is_empty());
    }

    #[test]
    fn test_rename_prunes_old_stub_chain() {
        let mut engine = engine(&[]);
        engine.write_note(note("c", "a.b.c")).unwrap();
        engine.rename_note("c", "x").unwrap();
        assert_eq!(indexed_fnames(&engine), vec!["root", "x"]);
    }

    #[test]
    fn test_rename_onto_stub_absorbs_it() {
        let mut engine = engine(&[("c", "a.b.c"), ("d", "d")]);
        engine.rename_note("d", "a.b").unwrap();

        assert_eq!(engine.get_note("c").unwrap().parent.as_deref(), Some("d"));
        assert_eq!(indexed_fnames(&engine), vec!["a", "a.b", "a.b.c", "root"]);
    }

    #[test]
    fn test_update_with_new_fname_renames() {
        let mut engine = engine(&[("a", "a")]);
        let changes = engine.write_note(note("a", "b")).unwrap();
        assert_eq!(changes.last().map(|c| c.note.fname.as_str()), Some("b"));
        assert_eq!(indexed_fnames(&engine), vec!["b", "root"]);
    }

    #[test]
    fn test_rename_onto_existing_note_fails() {
        let mut engine = engine(&[("a", "a"), ("b", "b")]);
        assert!(matches!(engine.rename_note("a", "b"), Err(EngineError::DuplicateNote { .. })));
        assert_eq!(indexed_fnames(&engine), vec!["a", "b", "root"]);
    }

    #[test]
    fn test_failed_rename_leaves_note_untouched() {
        let mut engine = engine(&[("a", "a"), ("b", "b")]);
        let before = engine.get_note("a").unwrap().clone();

        let mut changed = note("a", "b");
        changed.title = "Changed".into();
        changed.desc = "new desc".into();
        let err = engine.write_note(changed).unwrap_err();
        assert!(matches!(err, EngineError::DuplicateNote { .. }));

        let stored = engine.get_note("a").unwrap();
        assert_eq!(stored.fname, "a");
        assert_eq!(stored.title, before.title);
        assert_eq!(stored.desc, before.desc);
        assert_eq!(stored.updated, before.updated);

        let indexed = engine.index().all_notes().iter().find(|n| n.id == "a").unwrap();
        assert_eq!(indexed.fname, "a");
        assert_eq!(indexed.title, before.title);
    }

    #[test]
    fn test_root_rename_via_write_is_rejected() {
        let mut engine = engine(&[]);
        let mut moved = note("root", "elsewhere");
        moved.title = "Changed".into();
        let err = engine.write_note(moved).unwrap_err();
        assert!(matches!(err, EngineError::RootNote(_)));
        assert_eq!(engine.get_note("root").unwrap().title, "Root");
        assert_eq!(indexed_fnames(&engine), vec!["root"]);
    }

    #[test]
    fn test_query_notes_filters_vault() {
        let engine = engine(&[("a", "alpha")]);
        let mut opts = QueryNotesOpts::new("alpha");
        assert_eq!(engine.query_notes(&opts).unwrap().data.len(), 1);
        opts.vault = Some(Vault::new("other", "/o"));
        assert!(engine.query_notes(&opts).unwrap().data.is_empty());
    }

    #[test]
    fn test_changes_serialize_lowercase_status() {
        let mut engine = engine(&[]);
        let changes = engine.write_note(note("x", "x")).unwrap();
        let json = serde_json::to_value(&changes[0]).unwrap();
        assert_eq!(json["status"], "create");
        assert_eq!(json["note"]["fname"], "x");
        assert_eq!(json["note"]["parent"], "root");
    }

    #[test]
    fn test_schema_mutations() {
        let mut engine = engine(&[]);
        let mut module = SchemaModule::root_module(&vault());
        module.fname = "daily".into();
        module.root = "journal".into();
        let mut schema = module.schemas.remove("root").unwrap();
        schema.id = "journal".into();
        module.schemas.insert("journal".into(), schema);

        engine.write_schema(module).unwrap();
        assert_eq!(engine.query_schemas("daily").unwrap()[0].root, "journal");

        engine.delete_schema("journal").unwrap();
        assert!(engine.query_schemas("daily").unwrap().is_empty());
        assert!(matches!(engine.delete_schema("journal"), Err(EngineError::SchemaNotFound(_))));
    }
}
