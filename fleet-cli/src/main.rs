//! fleet-cli entry point

mod api;
mod config;
mod import;
mod transfer;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;

use crate::api::FrappeClient;
use crate::config::Config;

#[derive(Parser)]
#[command(
    name = "fleet-cli",
    about = "Import vehicle registration data into ERPNext",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a registration spreadsheet into the Vehicle Data staging doctype
    Import {
        /// Path to the .xlsx export
        file: PathBuf,
    },
    /// Promote staged records into canonical Vehicle documents
    Transfer,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let client = FrappeClient::new(&config);

    let summary = match cli.command {
        Commands::Import { file } => {
            if !file.exists() {
                anyhow::bail!("Spreadsheet does not exist: {}", file.display());
            }
            import::import_vehicle_data(&client, &file).await?
        }
        Commands::Transfer => transfer::transfer_to_vehicle(&client).await?,
    };

    println!("{}", summary.green());
    Ok(())
}
