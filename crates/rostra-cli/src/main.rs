//! # rostra CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// Rostra Coverage Stack CLI — shift-coverage escalation tooling.
///
/// Validates tenant rule sets, simulates escalation timelines, and runs
/// the scheduler together with the read-only reporting API.
#[derive(Parser, Debug)]
#[command(name = "rostra", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Validate tenant escalation rule sets.
    Rules(rostra_cli::rules::RulesArgs),
    /// Simulate one broadcast's escalation timeline.
    Simulate(rostra_cli::simulate::SimulateArgs),
    /// Run the scheduler loop and the reporting API.
    Serve(rostra_cli::serve::ServeArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Rules(args) => rostra_cli::rules::run(args),
        Commands::Simulate(args) => rostra_cli::simulate::run(args),
        Commands::Serve(args) => rostra_cli::serve::run(args),
    }
}
