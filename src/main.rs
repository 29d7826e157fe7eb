use anyhow::Result;
use clap::{Parser, Subcommand};

use stockpot::cli;

/// stockpot - Kitchen inventory and recipe intake
#[derive(Parser)]
#[command(name = "stockpot")]
#[command(about = "Ingredient inventory, costing and recipe formatting", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
    /// Run the background formatting worker until interrupted
    Worker,
    /// Manage the ingredient inventory
    Ingredient {
        #[command(subcommand)]
        command: cli::ingredient::IngredientCommands,
    },
    /// Inspect and control the formatting queue
    Queue {
        #[command(subcommand)]
        command: cli::queue::QueueCommands,
    },
    /// Print the unit catalog grouped by family
    Units,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = stockpot::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    stockpot::observability::init_observability(
        "stockpot",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Migrate => cli::migrate::migrate(&config).await,
        Commands::Reset => cli::migrate::reset(&config).await,
        Commands::Worker => cli::worker::run(config).await,
        Commands::Ingredient { command } => cli::ingredient::run(config, command).await,
        Commands::Queue { command } => cli::queue::run(config, command).await,
        Commands::Units => cli::units::run(),
    }
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::CommandFactory;

    #[test]
    fn command_tree_is_consistent() {
        Cli::command().debug_assert();
    }
}
