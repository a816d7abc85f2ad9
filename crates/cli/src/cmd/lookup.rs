//! `nlk lookup`: hierarchical lookup.

use std::path::Path;

use notelookup_core::lookup::{LookupOpts, NoteLookup};
use tracing::debug;

use super::output::{NoteOutput, print_notes};
use super::{fail, load_engine};
use crate::LookupArgs;

pub fn run(config: Option<&Path>, profile: Option<&str>, args: &LookupArgs) {
    let (_, engine) = load_engine(config, profile, args.exact);

    let opts = LookupOpts { show_direct_children_only: args.direct_children };
    let qs = args.query.as_deref().unwrap_or_default();
    let notes = match NoteLookup::lookup(qs, &engine, opts) {
        Ok(notes) => notes,
        Err(e) => fail(format!("Lookup failed: {e}")),
    };
    debug!(qs, results = notes.len(), "lookup finished");

    let output: Vec<NoteOutput> = notes.into_iter().map(NoteOutput::from).collect();
    print_notes(&output, args.out.format());
}
