use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for the declgen binary.
#[derive(Parser, Debug)]
#[command(
    name = "declgen",
    version,
    about = "Derives typed API-surface declarations from component metadata"
)]
pub struct CliArgs {
    /// Project description files (JSON), or directories to scan for them.
    ///
    /// A project description carries the foundational-base registry, the
    /// type-resolution table, the normalizer configuration, and the module
    /// inputs.
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Write all declaration units into this directory instead of beside
    /// their sources.
    #[arg(long = "outDir", alias = "out-dir")]
    pub out_dir: Option<PathBuf>,

    /// Increase log verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
