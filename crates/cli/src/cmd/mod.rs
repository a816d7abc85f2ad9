pub mod doctor;
pub mod lookup;
pub mod output;
pub mod query;
pub mod schemas;

use notelookup_core::config::{ConfigLoader, ResolvedConfig};
use notelookup_core::engine::Engine;
use notelookup_core::index::{FuzzyIndex, IndexMode};
use std::path::Path;

/// Print `msg` to stderr and exit with status 1.
pub fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("{msg}");
    crate::logging::flush();
    std::process::exit(1);
}

/// Load config, start logging and build an engine over the profile's vaults.
pub fn load_engine(
    config: Option<&Path>,
    profile: Option<&str>,
    exact: bool,
) -> (ResolvedConfig, Engine) {
    let rc = match ConfigLoader::load(config, profile) {
        Ok(rc) => rc,
        Err(e) => fail(format!("Failed to load config: {e}")),
    };
    if let Err(e) = crate::logging::init(&rc) {
        fail(format!("Failed to open log file: {e}"));
    }

    let mode = if exact { IndexMode::Exact } else { rc.lookup.mode };
    let engine = match Engine::from_vaults(
        rc.vaults.clone(),
        FuzzyIndex::new(mode),
        rc.site.site_hierarchies.clone(),
    ) {
        Ok(engine) => engine,
        Err(e) => fail(format!("Failed to load vaults: {e}")),
    };
    (rc, engine)
}
