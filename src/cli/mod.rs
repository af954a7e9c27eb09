pub mod client;
pub mod commands;
pub mod utils;

use clap::Parser;
use serde::{Deserialize, Serialize};

pub use client::EmployeeClient;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

#[derive(Parser)]
#[command(name = "employees")]
#[command(about = "Command-line client for the Employee Records API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, env = "EMPLOYEES_API_URL", default_value = DEFAULT_API_URL, help = "Base API URL")]
    pub url: String,

    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: commands::employees::EmployeeCommands,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let client = EmployeeClient::new(&cli.url)?;
    commands::employees::handle(cli.command, &client, output_format).await
}
