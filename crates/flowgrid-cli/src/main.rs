use clap::{Parser, Subcommand};

mod commands;
mod scenario;

#[derive(Parser)]
#[command(
    name = "flowgrid",
    about = "FlowGrid — greedy service chain placement over a substrate network",
    version,
    propagate_version = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deploy a scenario's request batch onto its topology
    Deploy {
        /// Path to the scenario TOML file
        #[arg(short, long)]
        scenario: String,
        /// Override the scenario's strategy (extend, vne)
        #[arg(long)]
        strategy: Option<String>,
        /// Skip unplaceable requests instead of aborting the batch
        #[arg(long)]
        skip_failed: bool,
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Parse and validate a scenario file without deploying
    Check {
        /// Path to the scenario TOML file
        #[arg(short, long)]
        scenario: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("flowgrid=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Deploy { scenario, strategy, skip_failed, format } => {
            commands::deploy::run(&scenario, strategy.as_deref(), skip_failed, &format)
        }
        Commands::Check { scenario } => commands::check::run(&scenario),
    }
}
