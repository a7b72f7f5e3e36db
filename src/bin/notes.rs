use clap::Parser;
use tracing_subscriber::EnvFilter;

use notes_api::cli::utils::output_error;
use notes_api::cli::{Cli, OutputFormat};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output_format = OutputFormat::from_cli(&cli);

    if let Err(e) = notes_api::cli::run(cli).await {
        match (&output_format, std::env::var("CLI_VERBOSE").as_deref()) {
            (_, Ok("true")) | (_, Ok("1")) => eprintln!("Error: {e:?}"),
            _ => output_error(&output_format, &e)?,
        }
        std::process::exit(1);
    }

    Ok(())
}
