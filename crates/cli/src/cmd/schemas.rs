//! `nlk schemas`: schema module query.

use std::path::Path;

use super::output::{SchemaOutput, print_schemas};
use super::{fail, load_engine};
use crate::SchemasArgs;

pub fn run(config: Option<&Path>, profile: Option<&str>, args: &SchemasArgs) {
    let (_, engine) = load_engine(config, profile, args.exact);

    let modules = match engine.query_schemas(args.query.as_deref().unwrap_or_default()) {
        Ok(modules) => modules,
        Err(e) => fail(format!("Schema query failed: {e}")),
    };
    let output: Vec<SchemaOutput> = modules.into_iter().map(SchemaOutput::from).collect();
    print_schemas(&output, args.out.format());
}
