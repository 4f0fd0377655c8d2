//! Anonymous launch beacon (GA4 measurement protocol)

use anyhow::Result;
use serde_json::{json, Value};
use uuid::Uuid;

use super::config::{self, APP_NAME, APP_VERSION, GA_MEASUREMENT_ID};

/// Analytics is off until a real measurement id is configured
pub fn is_configured(measurement_id: &str) -> bool {
    !measurement_id.contains("XXXX")
}

/// Request body for an `app_launch` event
pub fn launch_payload(client_id: Uuid) -> Value {
    json!({
        "client_id": client_id.to_string(),
        "events": [{
            "name": "app_launch",
            "params": {
                "app_name": APP_NAME,
                "app_version": APP_VERSION,
                "platform": config::platform(),
            }
        }]
    })
}

async fn post_launch(client: &reqwest::Client, client_id: Uuid) -> Result<()> {
    client
        .post(config::ga_endpoint())
        .json(&launch_payload(client_id))
        .send()
        .await?
        .error_for_status()?;
    Ok(())
}

/// Report a launch; never fails
pub async fn track_launch(client: &reqwest::Client, client_id: Uuid) {
    if !is_configured(GA_MEASUREMENT_ID) {
        return;
    }
    if let Err(e) = post_launch(client, client_id).await {
        tracing::debug!("Launch beacon failed: {:#}", e);
    }
}
