// Horn-clause backward chainer.
//
// Behavior:
// - Reads a problem file: query count, queries, clause count, clauses.
// - Tells every clause to a knowledge base, in file order.
// - Asks every query and writes one TRUE/FALSE line per query.

mod cli;
mod config;

use std::fs::{self, File};
use std::io::{self, BufWriter};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use hornlite::{write_answers, Problem};

use cli::Cli;
use config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };
    if let Some(output) = &cli.output {
        config.output = output.clone();
    }
    if cli.max_depth.is_some() {
        config.max_depth = cli.max_depth;
    }

    init_tracing(&config.log_filter);

    let input = fs::read_to_string(&cli.input)
        .with_context(|| format!("Failed to read problem file: {}", cli.input.display()))?;
    let problem = Problem::parse(&input)
        .with_context(|| format!("Invalid problem file: {}", cli.input.display()))?;

    let kb = problem.knowledge_base(config.limits());
    info!(
        facts = kb.fact_count(),
        rules = kb.rule_count(),
        queries = problem.queries.len(),
        "knowledge base ready"
    );

    let answers = problem.solve(&kb);

    let file = File::create(&config.output)
        .with_context(|| format!("Failed to create answers file: {}", config.output.display()))?;
    write_answers(BufWriter::new(file), &answers)
        .with_context(|| format!("Failed to write answers file: {}", config.output.display()))?;

    if cli.print {
        write_answers(io::stdout().lock(), &answers)?;
    }

    info!(output = %config.output.display(), "done");
    Ok(())
}

/// `RUST_LOG` wins over the configured filter.
fn init_tracing(filter: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
