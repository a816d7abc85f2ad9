use notelookup_core::engine::{Engine, EngineError, NoteQueryEngine, QueryNotesOpts};
use notelookup_core::index::{FuzzyIndex, IndexMode};
use notelookup_core::lookup::{LookupOpts, NoteLookup, PAGINATE_LIMIT};
use notelookup_core::note::{Note, Vault};
use rstest::rstest;
use std::fs;
use std::path::Path;
use tempfile::{TempDir, tempdir};

fn write_note(dir: &Path, fname: &str, frontmatter: &str) {
    let content = if frontmatter.is_empty() {
        format!("# {fname}\n")
    } else {
        format!("---\n{frontmatter}\n---\n# {fname}\n")
    };
    fs::write(dir.join(format!("{fname}.md")), content).unwrap();
}

fn sample_vault() -> TempDir {
    let tmp = tempdir().unwrap();
    let dir = tmp.path();
    write_note(dir, "root", "id: root\ntitle: Root");
    write_note(dir, "project", "id: project");
    write_note(dir, "project.alpha", "id: alpha\ntitle: Alpha Project");
    write_note(dir, "project.alpha.tasks", "id: tasks");
    write_note(dir, "project.beta", "");
    write_note(dir, "journal.2024.01", "id: jan");
    fs::write(
        dir.join("daily.schema.yml"),
        "version: 1\nschemas:\n  - id: daily\n    parent: root\n    children: [day]\n  \
         - id: day\n    pattern: \"*\"\n",
    )
    .unwrap();
    tmp
}

fn load(tmp: &TempDir, mode: IndexMode) -> Engine {
    let vault = Vault::new("notes", tmp.path());
    Engine::from_vaults(vec![vault], FuzzyIndex::new(mode), vec!["root".into()]).unwrap()
}

fn fnames(notes: &[&Note]) -> Vec<String> {
    notes.iter().map(|n| n.fname.clone()).collect()
}

#[test]
fn vault_loads_into_a_linked_tree() {
    let tmp = sample_vault();
    let engine = load(&tmp, IndexMode::Fuzzy);

    // 6 files plus stubs for `journal` and `journal.2024`
    assert_eq!(engine.notes().len(), 8);
    assert_eq!(engine.index().all_notes().len(), 8);

    let jan = engine.get_note("jan").unwrap();
    let year = engine.get_note(jan.parent.as_ref().unwrap()).unwrap();
    assert_eq!(year.fname, "journal.2024");
    assert!(year.stub);

    let root = engine.get_note("root").unwrap();
    let mut top: Vec<String> =
        root.children.iter().map(|id| engine.get_note(id).unwrap().fname.clone()).collect();
    top.sort();
    assert_eq!(top, vec!["journal", "project"]);
}

#[test]
fn empty_lookup_lists_top_level_then_root() {
    let tmp = sample_vault();
    let engine = load(&tmp, IndexMode::Fuzzy);

    let results = NoteLookup::lookup("", &engine, LookupOpts::default()).unwrap();
    insta::assert_debug_snapshot!(fnames(&results), @r###"
    [
        "project",
        "journal",
        "root",
    ]
    "###);
}

#[test]
fn schemas_include_default_root() {
    let tmp = sample_vault();
    let engine = load(&tmp, IndexMode::Exact);

    let root = engine.query_schemas("").unwrap();
    assert_eq!(root[0].fname, "root");

    let daily = engine.query_schemas("daily").unwrap();
    assert_eq!(daily.len(), 1);
    assert_eq!(daily[0].root, "daily");
    assert_eq!(daily[0].schemas.len(), 2);
}

#[rstest]
#[case("project", vec!["project"])]
#[case("project.", vec!["project.alpha", "project.beta"])]
#[case("project/", vec!["project.alpha", "project.beta"])]
#[case("project.alpha.", vec!["project.alpha.tasks"])]
fn direct_children_lookup(#[case] qs: &str, #[case] expected: Vec<&str>) {
    let tmp = sample_vault();
    let engine = load(&tmp, IndexMode::Exact);

    let opts = LookupOpts { show_direct_children_only: true };
    let mut got = fnames(&NoteLookup::lookup(qs, &engine, opts).unwrap());
    got.sort();
    assert_eq!(got, expected);
}

#[test]
fn lookup_tracks_mutations_without_reload() {
    let tmp = sample_vault();
    let mut engine = load(&tmp, IndexMode::Exact);
    let vault = Vault::new("notes", tmp.path());

    engine.write_note(Note::new("gamma", "project.gamma.notes", vault)).unwrap();
    let hits = NoteLookup::lookup("gamma", &engine, LookupOpts::default()).unwrap();
    // Equal scores keep index order: the note is indexed before its new stub.
    assert_eq!(fnames(&hits), vec!["project.gamma.notes", "project.gamma"]);

    engine.rename_note("gamma", "archive.gamma").unwrap();
    let hits = NoteLookup::lookup("gamma", &engine, LookupOpts::default()).unwrap();
    assert_eq!(fnames(&hits), vec!["archive.gamma"]);

    engine.delete_note("gamma").unwrap();
    assert!(NoteLookup::lookup("gamma", &engine, LookupOpts::default()).unwrap().is_empty());
    assert_eq!(engine.notes().len(), engine.index().all_notes().len());
}

#[test]
fn pagination_applies_to_engine_results() {
    let tmp = sample_vault();
    let mut engine = load(&tmp, IndexMode::Exact);
    let vault = Vault::new("notes", tmp.path());
    for i in 0..60 {
        let fname = format!("bulk.item{i:02}");
        engine.write_note(Note::new(format!("bulk-{i}"), fname, vault.clone())).unwrap();
    }

    let all = engine.query_notes(&QueryNotesOpts::new("bulk")).unwrap().data;
    assert_eq!(all.len(), 61);
    let page = NoteLookup::lookup("bulk", &engine, LookupOpts::default()).unwrap();
    assert_eq!(page.len(), PAGINATE_LIMIT);
    for (i, (got, want)) in page.iter().zip(&all).enumerate() {
        assert_eq!(got.id, want.id, "page entry {i} out of match order");
    }
}

#[test]
fn missing_vault_directory_fails() {
    let vault = Vault::new("gone", "/nonexistent/notelookup/vault");
    let err = Engine::from_vaults(vec![vault], FuzzyIndex::default(), vec!["root".into()])
        .unwrap_err();
    assert!(matches!(err, EngineError::Vault(_)));
}

#[test]
fn two_vaults_keep_separate_roots() {
    let a = tempdir().unwrap();
    let b = tempdir().unwrap();
    write_note(a.path(), "shared", "");
    write_note(b.path(), "shared", "");

    let vaults = vec![Vault::new("a", a.path()), Vault::new("b", b.path())];
    let engine = Engine::from_vaults(vaults, FuzzyIndex::new(IndexMode::Exact), vec!["root".into()])
        .unwrap();

    let results = NoteLookup::lookup("", &engine, LookupOpts::default()).unwrap();
    assert_eq!(fnames(&results), vec!["shared", "shared", "root", "root"]);

    let only_b = QueryNotesOpts { qs: "shared".into(), vault: Some(Vault::new("b", b.path())) };
    let hits = engine.query_notes(&only_b).unwrap().data;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].vault.name, "b");
}
