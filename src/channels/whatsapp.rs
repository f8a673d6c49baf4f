use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use chrono::DateTime;
use reqwest::Client;
use serde_json::Value;
use tokio::time::sleep;
use tracing::warn;

use crate::relay::MediaFetcher;
use crate::types::{GroupInfo, MessageEvent, RawMessage, SourceEvent};

/// Client for the sidecar process that owns the WhatsApp session (pairing,
/// credential store, reconnects). The relay only reads events and downloads
/// media through it.
#[derive(Clone)]
pub struct WhatsAppClient {
    http: Client,
    base_url: String,
}

impl WhatsAppClient {
    pub fn new(http: Client, base_url: String) -> Self {
        Self { http, base_url }
    }

    /// Startup connectivity check. Failure here is fatal for the process.
    pub async fn check_health(&self) -> Result<()> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(anyhow::anyhow!(
                "whatsapp sidecar unhealthy: {}",
                resp.status()
            ));
        }
        Ok(())
    }

    /// Groups the paired account is joined to. Startup diagnostic only.
    pub async fn list_joined_groups(&self) -> Result<Vec<GroupInfo>> {
        let resp = self
            .http
            .get(format!("{}/groups", self.base_url))
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(anyhow::anyhow!(
                "whatsapp sidecar group listing failed: {}",
                resp.status()
            ));
        }
        let groups = resp.json::<Vec<GroupInfo>>().await?;
        Ok(groups)
    }
}

#[async_trait]
impl MediaFetcher for WhatsAppClient {
    async fn download_media(&self, message: &RawMessage) -> Result<Bytes> {
        let resp = self
            .http
            .post(format!("{}/media/download", self.base_url))
            .json(message)
            .send()
            .await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("media download failed: {} {}", status, body));
        }
        Ok(resp.bytes().await?)
    }
}

/// Long-poll the sidecar event feed and forward parsed events over `tx`.
/// The sequence cursor lives only in this loop; events delivered while the
/// relay is down are not replayed.
pub async fn start_event_poller(
    client: WhatsAppClient,
    tx: tokio::sync::mpsc::Sender<SourceEvent>,
    interval_seconds: u64,
) {
    let mut offset: i64 = 0;
    loop {
        let url = format!("{}/events", client.base_url);
        let resp = client
            .http
            .get(&url)
            .query(&[("timeout", "30"), ("offset", &offset.to_string())])
            .send()
            .await;
        match resp {
            Ok(resp) => {
                if let Ok(value) = resp.json::<Value>().await {
                    if let Some(events) = value.get("events").and_then(|v| v.as_array()) {
                        for envelope in events {
                            if let Some(seq) = envelope.get("seq").and_then(|v| v.as_i64()) {
                                offset = seq + 1;
                            }
                            if let Some(event) = parse_source_event(envelope) {
                                if tx.send(event).await.is_err() {
                                    return;
                                }
                            }
                        }
                    }
                }
            }
            Err(err) => {
                warn!("event poll failed: {err}");
            }
        }
        sleep(std::time::Duration::from_secs(interval_seconds)).await;
    }
}

/// Parse one event envelope from the sidecar feed. Returns `None` for
/// envelopes too malformed to carry a usable message.
pub fn parse_source_event(envelope: &Value) -> Option<SourceEvent> {
    let kind = envelope.get("type")?.as_str()?;
    if kind != "message" {
        return Some(SourceEvent::Other(kind.to_string()));
    }

    let chat = envelope.get("chat")?.as_str()?.to_string();
    let sender_name = envelope
        .get("sender_name")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    let timestamp = envelope
        .get("timestamp")
        .and_then(|v| v.as_i64())
        .and_then(|secs| DateTime::from_timestamp(secs, 0))?;
    let media_kind = envelope
        .get("media_kind")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    let message = envelope
        .get("message")
        .cloned()
        .and_then(|raw| serde_json::from_value::<RawMessage>(raw).ok())
        .unwrap_or_default();

    Some(SourceEvent::Message(MessageEvent {
        chat,
        sender_name,
        timestamp,
        media_kind,
        message,
    }))
}
