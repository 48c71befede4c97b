pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

/// Server used by remote commands when `--url` is omitted
pub const DEFAULT_URL: &str = "http://localhost:3000";

#[derive(Parser)]
#[command(name = "faculty")]
#[command(about = "Faculty CLI - Development helpers for the faculty reporting API")]
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
    #[command(about = "Mint a bearer token with the configured secret")]
    Token {
        #[arg(long, help = "User id placed in the token")]
        user_id: i64,
        #[arg(long, help = "Role placed in the token")]
        role: String,
        #[arg(long, help = "Email placed in the token")]
        email: Option<String>,
    },

    #[command(about = "Show the hierarchy rank of a role")]
    Rank {
        #[arg(help = "Role name, e.g. principal_lecturer")]
        role: String,
    },

    #[command(about = "Check server health from the /health endpoint")]
    Health {
        #[arg(long, default_value = DEFAULT_URL, help = "Server base URL")]
        url: String,
    },

    #[command(about = "Show the user a token resolves to")]
    Whoami {
        #[arg(long, help = "Bearer token")]
        token: String,
        #[arg(long, default_value = DEFAULT_URL, help = "Server base URL")]
        url: String,
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

    match cli.command {
        Commands::Token { user_id, role, email } => {
            commands::token::handle(user_id, &role, email, output_format)
        }
        Commands::Rank { role } => commands::token::rank(&role, output_format),
        Commands::Health { url } => commands::remote::health(&url, output_format).await,
        Commands::Whoami { token, url } => commands::remote::whoami(&url, &token, output_format).await,
    }
}
