// benchcoach entry point.
//
// Startup sequence:
// 1. Parse the command line
// 2. Load config (explicit path, ./config, user config dir, built-in)
// 3. Initialize tracing (stderr, filter from RUST_LOG or config)
// 4. Run the subcommand and write its output

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use benchcoach_app::cli::{Cli, Command};
use benchcoach_app::{commands, config, logging};
use clap::Parser;
use tracing::info;

fn main() -> anyhow::Result<()> {
    // 1. Parse the command line
    let cli = Cli::parse();

    // 2. Load config
    let config = config::load_config(cli.command.config_path().map(|p| p.as_path()))
        .context("failed to load configuration")?;

    // 3. Initialize tracing
    logging::init_tracing(config.logging.filter.as_deref())?;
    info!(
        league = %config.league.name,
        platform = %config.league.platform,
        teams = config.league.num_teams,
        slots = config.league.starting_slots(),
        source = ?config.source,
        "config loaded"
    );

    // 4. Run the subcommand
    let (output, destination) = match &cli.command {
        Command::Report(args) => (commands::run_report(args, &config)?, args.output.as_deref()),
        Command::Optimize(args) => (commands::run_optimize(args, &config)?, None),
        Command::FreeAgents(args) => (commands::run_free_agents(args, &config)?, None),
    };

    write_output(&output, destination)
}

fn write_output(text: &str, destination: Option<&Path>) -> anyhow::Result<()> {
    match destination {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "report written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .context("failed to write to stdout")?;
            stdout.flush().context("failed to flush stdout")?;
        }
    }
    Ok(())
}
