use anyhow::Context;
use clap::Parser;
use keyshuffle::cli::{execute_command, Cli};
use keyshuffle::env::RealVarEnv;
use std::io::{self, BufWriter};
use tracing::{debug, error, trace};

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    // stdout carries data only; all diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(io::stderr)
        .with_target(cli.verbose >= 2)
        .with_line_number(cli.verbose >= 2)
        .init();

    debug!("keyshuffle started with verbosity level: {}", cli.verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());

    if let Err(e) = run(&cli) {
        error!("Fatal error: {:#}", e);
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let stdin = io::stdin().lock();
    let stdout = BufWriter::new(io::stdout().lock());

    let summary = execute_command(&cli.command, &RealVarEnv::new(), stdin, stdout)
        .with_context(|| format!("{} stage failed", cli.command.name()))?;

    if cli.summary {
        let json = serde_json::to_string(&summary).context("Failed to render run summary")?;
        eprintln!("{json}");
    }
    Ok(())
}
