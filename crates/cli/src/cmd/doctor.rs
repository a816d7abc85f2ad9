use notelookup_core::config::{ConfigLoader, default_config_path};
use notelookup_core::engine::{Engine, NoteQueryEngine};
use notelookup_core::index::FuzzyIndex;
use std::collections::BTreeMap;
use std::path::Path;

pub fn run(config: Option<&Path>, profile: Option<&str>) {
    let rc = match ConfigLoader::load(config, profile) {
        Ok(rc) => rc,
        Err(e) => {
            println!("FAIL nlk doctor");
            println!("{e}");
            if config.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            std::process::exit(1);
        }
    };
    if let Err(e) = crate::logging::init(&rc) {
        println!("FAIL nlk doctor");
        println!("Failed to open log file: {e}");
        std::process::exit(1);
    }

    println!(
        "path: {}",
        config.map_or_else(
            || default_config_path().display().to_string(),
            |p| p.display().to_string()
        )
    );
    println!("version: {}", notelookup_core::version());
    println!("profile: {}", rc.active_profile);
    println!("workspace_root: {}", rc.workspace_root.display());
    println!("lookup.mode: {}", rc.lookup.mode);
    println!("site.site_hierarchies: {}", rc.site.site_hierarchies.join(", "));
    for vault in &rc.vaults {
        println!("vault: {} ({})", vault.name, vault.fs_path.display());
    }

    let engine = match Engine::from_vaults(
        rc.vaults.clone(),
        FuzzyIndex::new(rc.lookup.mode),
        rc.site.site_hierarchies.clone(),
    ) {
        Ok(engine) => engine,
        Err(e) => {
            println!("FAIL nlk doctor");
            println!("{e}");
            crate::logging::flush();
            std::process::exit(1);
        }
    };

    let stubs = engine.notes().values().filter(|n| n.stub).count();
    println!("notes: {} ({} stubs)", engine.notes().len(), stubs);

    let mut domains: BTreeMap<&str, usize> = BTreeMap::new();
    for note in engine.notes().values().filter(|n| !n.is_root() && !n.stub) {
        *domains.entry(note.domain()).or_default() += 1;
    }
    if !domains.is_empty() {
        let counts: Vec<String> = domains.iter().map(|(d, n)| format!("{d} ({n})")).collect();
        println!("domains: {}", counts.join(", "));
    }
    println!("schemas: {}", engine.schemas().len());
    println!("OK   nlk doctor");
}
