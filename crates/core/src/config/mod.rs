//! TOML configuration with named profiles.

pub mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, default_config_path};
pub use types::{LoggingConfig, LookupConfig, ResolvedConfig, SiteConfig, VaultEntry};
