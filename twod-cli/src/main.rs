mod commands;
mod config;

use anyhow::Context;
use clap::{Parser, Subcommand};
use config::CliConfig;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use twod_core::{TwoDClient, TwoDError};

#[derive(Parser)]
#[command(name = "twod")]
#[command(about = "2D lottery client - pick numbers, place bets, watch the live draw")]
#[command(version)]
struct Cli {
    /// Data directory for the local store and config.json
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Login, logout and session status
    #[command(subcommand)]
    Auth(commands::AuthCommands),

    /// Profile and wallet balance
    #[command(subcommand)]
    Profile(commands::ProfileCommands),

    /// Build and review the bet cart
    #[command(subcommand)]
    Cart(commands::CartCommands),

    /// Quick-pick rule catalog
    #[command(subcommand)]
    Rules(commands::RulesCommands),

    /// Submit the cart
    #[command(subcommand)]
    Bet(commands::BetCommands),

    /// Live draw board
    #[command(subcommand)]
    Live(commands::LiveCommands),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cli_config = CliConfig::new(cli.data_dir, cli.verbose);

    // Initialize logging
    let log_level = if cli_config.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "twod_cli={},twod_core={}",
            log_level, log_level
        )))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Ensure data directory exists
    tokio::fs::create_dir_all(cli_config.data_dir())
        .await
        .with_context(|| {
            format!(
                "Failed to create data directory {}",
                cli_config.data_dir().display()
            )
        })?;

    let client_config = cli_config.client_config().await.with_context(|| {
        format!(
            "Failed to load {}",
            cli_config.client_config_path().display()
        )
    })?;

    tracing::debug!("Using data directory {}", cli_config.data_dir().display());
    let client = TwoDClient::new(cli_config.data_dir(), client_config).await?;

    // Execute command
    let result = match cli.command {
        Commands::Auth(cmd) => commands::handle_auth_command(cmd, &client).await,
        Commands::Profile(cmd) => commands::handle_profile_command(cmd, &client).await,
        Commands::Cart(cmd) => commands::handle_cart_command(cmd, &client).await,
        Commands::Rules(cmd) => commands::handle_rules_command(cmd),
        Commands::Bet(cmd) => commands::handle_bet_command(cmd, &client).await,
        Commands::Live(cmd) => commands::handle_live_command(cmd, &client).await,
    };

    if let Err(e) = result {
        match e {
            TwoDError::SessionExpired => {
                eprintln!("Error: Session expired. Please login again.");
                eprintln!("Use 'twod auth login <user_name>' to sign in");
            }
            TwoDError::NotFound { number } => {
                eprintln!("Error: {} is not in the cart", number);
                eprintln!("Use 'twod cart show' to see the current cart");
            }
            TwoDError::Validation(msg) => {
                eprintln!("Error: {}", msg);
            }
            TwoDError::Network(msg) => {
                eprintln!("Error: Could not reach the server: {}", msg);
                eprintln!("Nothing was changed; you can try again");
            }
            _ => {
                eprintln!("Error: {}", e);
            }
        }
        std::process::exit(1);
    }

    Ok(())
}
