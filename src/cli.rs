//! CLI argument parsing for list generation.
//!
//! The CLI is intentionally thin: it resolves directories and flags, then
//! hands off to `run`, so the generation logic stays reusable and testable
//! without a terminal.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "stimlist",
    version,
    about = "Counterbalanced stimulus list generator for rating experiments",
    after_help = "Commands:\n  generate --inputs <dir> --outputs <dir>  Produce every list, order log, and document\n  check --inputs <dir>                     Validate config, pools, ratio, and template\n\nExamples:\n  stimlist check --inputs inputs\n  stimlist check --inputs inputs --json\n  stimlist generate --inputs inputs --outputs outputs\n  stimlist generate --inputs inputs --outputs outputs --seed 42 --no-compile",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    Generate(GenerateArgs),
    Check(CheckArgs),
}

/// Generate command inputs for a full run.
#[derive(Parser, Debug)]
#[command(about = "Generate all presentation lists for an experiment")]
pub struct GenerateArgs {
    /// Directory containing config.txt and the files it names
    #[arg(long, value_name = "DIR", default_value = "inputs")]
    pub inputs: PathBuf,

    /// Directory to write per-list folders and the run report into
    #[arg(long, value_name = "DIR", default_value = "outputs")]
    pub outputs: PathBuf,

    /// Shuffle seed; overrides the config `seed` key
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Skip invoking the document compiler on rendered lists
    #[arg(long)]
    pub no_compile: bool,

    /// Emit a verbose transcript of the run
    #[arg(long)]
    pub verbose: bool,
}

/// Check command inputs for input validation without output.
#[derive(Parser, Debug)]
#[command(about = "Validate experiment inputs without writing anything")]
pub struct CheckArgs {
    /// Directory containing config.txt and the files it names
    #[arg(long, value_name = "DIR", default_value = "inputs")]
    pub inputs: PathBuf,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,

    /// Emit a verbose transcript of the checks
    #[arg(long)]
    pub verbose: bool,
}
