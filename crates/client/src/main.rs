//! CyberCity command-line client.
//!
//! ```bash
//! # Fight the default skirmish with a fixed seed
//! cybercity skirmish --seed 7
//!
//! # Inspect the campaign
//! cybercity status --save ./campaign.json
//! ```

use anyhow::Result;
use clap::Parser;
use cybercity_client::ClientConfig;
use cybercity_client::commands::{Allocate, Fund, Skirmish, Status};
use cybercity_client::logging;

/// Turn-based tactical combat in CyberCity
#[derive(Parser)]
#[command(name = "cybercity")]
#[command(about = "Headless CyberCity client", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    Skirmish(Skirmish),
    Status(Status),
    Allocate(Allocate),
    Fund(Fund),
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = ClientConfig::from_env();
    let _guard = logging::setup_logging(config.session_id.as_deref())?;

    match cli.command {
        Command::Skirmish(cmd) => cmd.execute(&config),
        Command::Status(cmd) => cmd.execute(&config),
        Command::Allocate(cmd) => cmd.execute(&config),
        Command::Fund(cmd) => cmd.execute(&config),
    }
}
