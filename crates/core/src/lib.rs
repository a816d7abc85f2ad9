#![allow(clippy::module_name_repetitions)]

//! Fuzzy note lookup over hierarchical, dot-delimited note vaults.
//!
//! The crate is organised bottom-up:
//! - [`index`]: the in-memory dual search index (notes and schemas)
//! - [`lookup`]: hierarchical queries, direct-children filtering, pagination
//! - [`engine`]: owner of the note/schema collections; keeps the index in sync
//! - [`vault`]: reads notes and schema modules from vault directories
//! - [`config`]: TOML configuration with profiles

pub mod config;
pub mod engine;
pub mod frontmatter;
pub mod ids;
pub mod index;
pub mod lookup;
pub mod note;
pub mod vault;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
