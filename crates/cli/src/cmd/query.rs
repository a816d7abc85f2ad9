//! `nlk query`: raw note index query.

use std::path::Path;

use super::load_engine;
use super::output::{NoteOutput, print_notes};
use crate::QueryArgs;

pub fn run(config: Option<&Path>, profile: Option<&str>, args: &QueryArgs) {
    let (_, engine) = load_engine(config, profile, args.exact);

    let hits = engine.index().query_notes(&args.query);
    let limit = args.limit.unwrap_or(hits.len());
    let output: Vec<NoteOutput> = hits.into_iter().take(limit).map(NoteOutput::from).collect();
    print_notes(&output, args.out.format());
}
