use anyhow::Result;
use aretheyallhere::cli::Cli;
use aretheyallhere::commands::{populate, report};
use aretheyallhere::store::RecordStore;
use aretheyallhere::{AppContext, output};
use clap::Parser;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    if let Err(e) = run(cli) {
        output::print_error(&format!("{e:#}"));
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let ctx = AppContext::new(cli.database, cli.checksum_type, cli.force);

    let mut store = RecordStore::open(&ctx.store_path)?;
    populate::execute(
        &ctx,
        &mut store,
        cli.source.as_deref(),
        cli.destination.as_deref(),
    )?;
    report::execute(&store)
}

/// Logging goes to stderr so the report and progress line own stdout.
fn init_logging(cli: &Cli) {
    let default_level = if cli.verbose {
        "aretheyallhere=debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
