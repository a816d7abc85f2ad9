use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::index::IndexMode;
use crate::note::{ROOT_FNAME, Vault};

#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub version: u32,
    pub profile: Option<String>,
    pub profiles: HashMap<String, Profile>,
    #[serde(default)]
    pub lookup: LookupConfig,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct Profile {
    pub workspace_root: String,
    /// Vault directories; `{{workspace_root}}` is substituted.
    #[serde(default)]
    pub vaults: Vec<VaultEntry>,
}

/// A vault given either as a bare path or as a named table.
///
/// ```toml
/// vaults = ["{{workspace_root}}/notes", { name = "work", path = "~/work" }]
/// ```
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum VaultEntry {
    Path(String),
    Named { name: String, path: String },
}

#[derive(Debug, Deserialize, Default, Clone, Copy)]
pub struct LookupConfig {
    #[serde(default)]
    pub mode: IndexMode,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    /// Fnames whose notes are listed for an empty lookup.
    #[serde(default = "default_site_hierarchies")]
    pub site_hierarchies: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self { site_hierarchies: default_site_hierarchies() }
    }
}

fn default_site_hierarchies() -> Vec<String> {
    vec![ROOT_FNAME.to_string()]
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file_level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub active_profile: String,
    pub workspace_root: PathBuf,
    /// Vaults with expanded, absolute-or-as-given paths.
    pub vaults: Vec<Vault>,
    pub lookup: LookupConfig,
    pub site: SiteConfig,
    pub logging: LoggingConfig,
}
