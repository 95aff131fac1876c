pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "employee-directory")]
#[command(about = "Mock employee directory: server tier, api tier, and a client for both")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the server tier backed by the in-memory store")]
    Server(commands::serve::ServeArgs),

    #[command(about = "Run the api tier, proxying to an upstream server tier when given one")]
    Api {
        #[command(flatten)]
        bind: commands::serve::ServeArgs,
        #[arg(long, help = "Base URL of the server tier to proxy to")]
        upstream: Option<String>,
    },

    #[command(about = "Talk to a running tier")]
    Employee {
        #[arg(long, help = "Base URL of the tier to call (default: local api tier)")]
        url: Option<String>,
        #[command(subcommand)]
        cmd: commands::employee::EmployeeCommands,
    },
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
    let config = crate::config::config();

    match cli.command {
        Commands::Server(args) => commands::serve::server(config, args).await,
        Commands::Api { bind, upstream } => commands::serve::api(config, bind, upstream).await,
        Commands::Employee { url, cmd } => commands::employee::handle(config, url, cmd, output_format).await,
    }
}
