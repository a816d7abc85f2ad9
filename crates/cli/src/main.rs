mod cmd;
mod logging;

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "nlk", version, about = "Hierarchical fuzzy lookup over note vaults")]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate configuration, load the vaults and print a summary
    Doctor,

    /// Look up notes by hierarchical name (empty query lists top-level notes)
    Lookup(LookupArgs),

    /// Query the note index directly, without hierarchy handling
    Query(QueryArgs),

    /// Query schema modules (empty query returns the root schema)
    Schemas(SchemasArgs),
}

/// Output format for query commands.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    /// Fnames only, one per line
    Quiet,
}

/// Flags shared by every query command.
#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Output format
    #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Shorthand for --output json
    #[arg(long)]
    pub json: bool,

    /// Shorthand for --output quiet
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

impl OutputArgs {
    pub fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else if self.quiet {
            OutputFormat::Quiet
        } else {
            self.output
        }
    }
}

#[derive(Debug, Args)]
pub struct LookupArgs {
    /// Dot- or slash-separated query, e.g. "project.foo" or "project/foo"
    pub query: Option<String>,

    /// Only notes exactly one level below the query, stubs excluded
    #[arg(long)]
    pub direct_children: bool,

    /// Error-free matches only (overrides [lookup] mode)
    #[arg(long)]
    pub exact: bool,

    #[command(flatten)]
    pub out: OutputArgs,
}

#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Index query; "" returns root notes and "*" every note
    pub query: String,

    /// Error-free matches only (overrides [lookup] mode)
    #[arg(long)]
    pub exact: bool,

    /// Maximum number of results
    #[arg(long)]
    pub limit: Option<usize>,

    #[command(flatten)]
    pub out: OutputArgs,
}

#[derive(Debug, Args)]
pub struct SchemasArgs {
    /// Matched against module names and root schema ids
    pub query: Option<String>,

    /// Error-free matches only (overrides [lookup] mode)
    #[arg(long)]
    pub exact: bool,

    #[command(flatten)]
    pub out: OutputArgs,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Doctor => cmd::doctor::run(cli.config.as_deref(), cli.profile.as_deref()),
        Commands::Lookup(args) => {
            cmd::lookup::run(cli.config.as_deref(), cli.profile.as_deref(), &args)
        }
        Commands::Query(args) => {
            cmd::query::run(cli.config.as_deref(), cli.profile.as_deref(), &args)
        }
        Commands::Schemas(args) => {
            cmd::schemas::run(cli.config.as_deref(), cli.profile.as_deref(), &args)
        }
    }

    logging::flush();
}
