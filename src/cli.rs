//! Command-line arguments

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "hornlite")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Problem file: query count, queries, clause count, clauses
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Answers file (overrides the configured one)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Configuration file (TOML)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Fail goals this deep in the proof tree
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Also print the answers to stdout
    #[arg(long)]
    pub print: bool,
}
