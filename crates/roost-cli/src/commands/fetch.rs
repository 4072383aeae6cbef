use anyhow::Result;
use roost_core::config::ClientConfig;
use roost_infrastructure::ApiClient;
use serde_json::Value;

/// Network failures are shown as an alert line, not propagated as a CLI
/// failure; the session is untouched either way.
pub async fn run(config: &ClientConfig, path: &str) -> Result<()> {
    let client = ApiClient::new(config)?;

    match client.get::<Value>(path).await {
        Ok(data) => println!("{}", serde_json::to_string_pretty(&data)?),
        Err(e) => {
            tracing::warn!("[Fetch] {} failed: {}", path, e);
            println!("alert: {}", e);
        }
    }
    Ok(())
}
