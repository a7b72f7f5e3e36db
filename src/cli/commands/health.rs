use crate::cli::commands::Target;
use crate::cli::utils::output_message;
use crate::cli::OutputFormat;

pub async fn handle(target: &Target, output_format: OutputFormat) -> anyhow::Result<()> {
    let client = target.client()?;
    let data = client.health().await?;

    let store = data
        .get("store")
        .and_then(|s| s.as_str())
        .unwrap_or("unknown")
        .to_string();
    output_message(
        &output_format,
        &format!("{} is healthy (store: {})", client.base_url(), store),
        data,
    )
}
