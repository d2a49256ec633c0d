use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Restore QMC-obfuscated audio (.qmc0/.qmc3/.qmcogg/.qmcflac) to mp3/flac",
    long_about = None
)]
pub struct Cli {
    /// Files to decode; each output is written next to its input
    pub files: Vec<PathBuf>,

    /// Number of worker threads (default: available parallelism minus one)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Print the run summary as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Where per-file diagnostic lines go
    #[arg(long, value_enum, default_value_t = Diagnostics::Stdout)]
    pub diagnostics: Diagnostics,

    /// Raise log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Diagnostics {
    /// Plain lines on stdout
    Stdout,
    /// Structured log events on stderr
    Log,
}
