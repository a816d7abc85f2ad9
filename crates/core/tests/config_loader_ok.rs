use notelookup_core::config::loader::ConfigLoader;
use notelookup_core::index::IndexMode;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn write_file(path: &PathBuf, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn load_default_profile_ok() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("config.toml");
    let toml = r#"
version = 1
profile = "default"

[profiles.default]
workspace_root = "/tmp/notes"
vaults = ["{{workspace_root}}/vault", { name = "work", path = "{{workspace_root}}/work" }]

[lookup]
mode = "exact"

[site]
site_hierarchies = ["blog", "wiki"]
"#;

    write_file(&cfg_path, toml);

    let rc = ConfigLoader::load(Some(&cfg_path), None).expect("should load");
    assert_eq!(rc.active_profile, "default");
    assert_eq!(rc.workspace_root.display().to_string(), "/tmp/notes");
    assert_eq!(rc.vaults.len(), 2);
    assert_eq!(rc.vaults[0].name, "vault");
    assert_eq!(rc.vaults[0].fs_path.display().to_string(), "/tmp/notes/vault");
    assert_eq!(rc.vaults[1].name, "work");
    assert_eq!(rc.lookup.mode, IndexMode::Exact);
    assert_eq!(rc.site.site_hierarchies, vec!["blog", "wiki"]);
}

#[test]
fn defaults_apply_when_sections_missing() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("config.toml");
    let toml = r#"
version = 1

[profiles.default]
workspace_root = "/tmp/notes"
vaults = ["/tmp/notes/vault"]
"#;
    write_file(&cfg_path, toml);

    let rc = ConfigLoader::load(Some(&cfg_path), None).expect("should load");
    assert_eq!(rc.lookup.mode, IndexMode::Fuzzy);
    assert_eq!(rc.site.site_hierarchies, vec!["root"]);
    assert_eq!(rc.logging.level, "info");
    assert!(rc.logging.file.is_none());
}

#[test]
fn load_with_profile_override_ok() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("notelookup/config.toml");
    let toml = r#"
version = 1
profile = "default"

[profiles.default]
workspace_root = "/tmp/def"
vaults = ["{{workspace_root}}/vault"]

[profiles.work]
workspace_root = "/tmp/work"
vaults = ["{{workspace_root}}/vault"]

[logging]
level = "debug"
file = "{{workspace_root}}/nlk.log"
"#;
    write_file(&cfg_path, toml);

    let rc = ConfigLoader::load(Some(&cfg_path), Some("work")).expect("should load");
    assert_eq!(rc.active_profile, "work");
    assert_eq!(rc.workspace_root.display().to_string(), "/tmp/work");
    assert_eq!(rc.logging.level, "debug");
    assert_eq!(rc.logging.file.unwrap().display().to_string(), "/tmp/work/nlk.log");
}
