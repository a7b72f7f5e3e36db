use serde_json::json;

use crate::auth::AuthKeys;
use crate::cli::utils::output_message;
use crate::cli::OutputFormat;
use crate::config::config;

/// Sign a token locally. Only useful when the server shares this secret.
pub fn handle(subject: &str, hours: Option<u64>, output_format: OutputFormat) -> anyhow::Result<()> {
    let security = &config().security;
    let hours = hours.unwrap_or(security.jwt_expiry_hours);
    let subject = subject.trim();
    if subject.is_empty() {
        anyhow::bail!("Subject must not be empty");
    }

    let keys = AuthKeys::new(&security.jwt_secret, hours)?;
    let token = keys.issue(subject)?;

    match output_format {
        OutputFormat::Text => println!("{}", token),
        OutputFormat::Json => output_message(
            &output_format,
            "Token issued",
            json!({ "token": token, "subject": subject, "expires_in_hours": hours }),
        )?,
    }
    Ok(())
}
