//! Best-effort network services: update check and launch analytics
//!
//! Requests run on a background tokio runtime. Results come back over a
//! channel that the UI drains each frame.

pub mod analytics;
pub mod config;
pub mod update;

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::time::Duration;

use anyhow::{Context, Result};
use uuid::Uuid;

use update::UpdateInfo;

/// Message from a background task to the UI
#[derive(Debug, Clone)]
pub enum ServiceEvent {
    UpdateAvailable(UpdateInfo),
}

/// Owner of the background runtime
pub struct Services {
    runtime: Option<tokio::runtime::Runtime>,
    client: Option<reqwest::Client>,
    event_tx: Sender<ServiceEvent>,
    event_rx: Receiver<ServiceEvent>,
}

impl Services {
    /// Start the runtime; on failure every service is a no-op
    pub fn new() -> Self {
        let (event_tx, event_rx) = mpsc::channel();
        let (runtime, client) = match Self::build() {
            Ok((runtime, client)) => (Some(runtime), Some(client)),
            Err(e) => {
                tracing::warn!("Network services disabled: {:#}", e);
                (None, None)
            }
        };

        Self {
            runtime,
            client,
            event_tx,
            event_rx,
        }
    }

    fn build() -> Result<(tokio::runtime::Runtime, reqwest::Client)> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("thinkmine-net")
            .enable_all()
            .build()
            .context("Failed to start tokio runtime")?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config::REQUEST_TIMEOUT_SECS))
            .user_agent(format!("{}/{}", config::APP_NAME, config::APP_VERSION))
            .build()
            .context("Failed to build HTTP client")?;

        Ok((runtime, client))
    }

    /// Check for a newer release, calling `notify` when one is found
    pub fn spawn_update_check(&self, notify: impl Fn() + Send + 'static) {
        let (Some(runtime), Some(client)) = (&self.runtime, &self.client) else {
            return;
        };
        let client = client.clone();
        let tx = self.event_tx.clone();
        runtime.spawn(async move {
            if let Some(info) = update::check_for_update(&client, config::APP_VERSION).await {
                if tx.send(ServiceEvent::UpdateAvailable(info)).is_ok() {
                    notify();
                }
            }
        });
    }

    /// Fire-and-forget launch beacon
    pub fn spawn_launch_beacon(&self, client_id: Uuid) {
        let (Some(runtime), Some(client)) = (&self.runtime, &self.client) else {
            return;
        };
        let client = client.clone();
        runtime.spawn(async move {
            analytics::track_launch(&client, client_id).await;
        });
    }

    /// Drain events produced since the last poll (non-blocking)
    pub fn poll(&self) -> Vec<ServiceEvent> {
        let mut events = Vec::new();
        loop {
            match self.event_rx.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        events
    }
}

impl Default for Services {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Services {
    fn drop(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_drains_queued_events() {
        let services = Services::new();
        let info = UpdateInfo {
            version: "9.9.9".to_string(),
            notes: String::new(),
            url: String::new(),
        };
        services
            .event_tx
            .send(ServiceEvent::UpdateAvailable(info))
            .unwrap();

        let events = services.poll();
        assert_eq!(events.len(), 1);
        assert!(services.poll().is_empty());
    }
}
