pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";

#[derive(Parser)]
#[command(name = "notes")]
#[command(about = "Notes CLI - Command-line interface for the personal notes API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(
        long,
        global = true,
        env = "NOTES_API_URL",
        default_value = DEFAULT_SERVER_URL,
        help = "Base URL of the notes API"
    )]
    pub server: String,

    #[arg(long, global = true, env = "NOTES_TOKEN", hide_env_values = true, help = "Bearer token")]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "List your notes, newest first")]
    List,

    #[command(about = "Create a note")]
    Create {
        #[arg(long, help = "Note title (required, trimmed)")]
        title: String,
        #[arg(long, default_value = "", help = "Note body")]
        content: String,
    },

    #[command(about = "Edit a note; omitted fields keep their current value")]
    Edit {
        #[arg(help = "Note ID")]
        id: String,
        #[arg(long, help = "New title")]
        title: Option<String>,
        #[arg(long, help = "New body")]
        content: Option<String>,
    },

    #[command(about = "Permanently delete a note")]
    Delete {
        #[arg(help = "Note ID")]
        id: String,
        #[arg(long, short, help = "Skip the confirmation prompt")]
        yes: bool,
    },

    #[command(about = "Mint a bearer token with the local SECURITY_JWT_SECRET")]
    Token {
        #[arg(help = "Subject (user id) to embed in the token")]
        subject: String,
        #[arg(long, help = "Token lifetime in hours (defaults to configured expiry)")]
        hours: Option<u64>,
    },

    #[command(about = "Check server health status from API /health endpoint")]
    Health,
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
    let target = commands::Target {
        server: cli.server,
        token: cli.token,
    };

    match cli.command {
        Commands::List => commands::notes::list(&target, output_format).await,
        Commands::Create { title, content } => {
            commands::notes::create(&target, &title, &content, output_format).await
        }
        Commands::Edit { id, title, content } => {
            commands::notes::edit(&target, &id, title, content, output_format).await
        }
        Commands::Delete { id, yes } => {
            commands::notes::delete(&target, &id, yes, output_format).await
        }
        Commands::Token { subject, hours } => commands::token::handle(&subject, hours, output_format),
        Commands::Health => commands::health::handle(&target, output_format).await,
    }
}
