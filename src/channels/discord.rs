use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::info;

use crate::relay::RelaySink;
use crate::types::RelayMessage;

const DISCORD_API_BASE: &str = "https://discord.com/api/v10";

/// Discord REST sender. Receives nothing; the relay is one-directional.
#[derive(Clone)]
pub struct DiscordClient {
    http: Client,
    bot_token: String,
    api_base: String,
}

impl DiscordClient {
    pub fn new(http: Client, bot_token: String) -> Self {
        Self {
            http,
            bot_token,
            api_base: DISCORD_API_BASE.to_string(),
        }
    }

    /// Point the client at a different API base. Test hook.
    pub fn with_api_base(mut self, api_base: String) -> Self {
        self.api_base = api_base;
        self
    }

    /// Verify the bot credential before any event is handled. A rejected
    /// token is fatal at startup.
    pub async fn connect(&self) -> Result<()> {
        let resp = self
            .http
            .get(format!("{}/users/@me", self.api_base))
            .header("Authorization", format!("Bot {}", self.bot_token))
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(anyhow::anyhow!(
                "discord credential rejected: {}",
                resp.status()
            ));
        }
        let me: Value = resp.json().await?;
        let username = me.get("username").and_then(|v| v.as_str()).unwrap_or("?");
        info!(%username, "connected to discord");
        Ok(())
    }
}

/// Wire shape for one embed message.
pub fn embed_body(message: &RelayMessage) -> Value {
    json!({
        "embeds": [{
            "description": message.description,
            "timestamp": message.timestamp,
            "color": message.color,
            "author": {
                "name": message.author_name,
                "icon_url": message.author_icon_url,
            },
        }],
    })
}

#[async_trait]
impl RelaySink for DiscordClient {
    async fn send_text(&self, channel_id: &str, message: &RelayMessage) -> Result<()> {
        let resp = self
            .http
            .post(format!(
                "{}/channels/{}/messages",
                self.api_base, channel_id
            ))
            .header("Authorization", format!("Bot {}", self.bot_token))
            .json(&embed_body(message))
            .send()
            .await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("discord send failed: {} {}", status, body));
        }
        Ok(())
    }

    async fn send_file(&self, channel_id: &str, filename: &str, bytes: &[u8]) -> Result<()> {
        let form = reqwest::multipart::Form::new().part(
            "files[0]",
            reqwest::multipart::Part::bytes(bytes.to_vec()).file_name(filename.to_string()),
        );
        let resp = self
            .http
            .post(format!(
                "{}/channels/{}/messages",
                self.api_base, channel_id
            ))
            .header("Authorization", format!("Bot {}", self.bot_token))
            .multipart(form)
            .send()
            .await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("discord upload failed: {} {}", status, body));
        }
        Ok(())
    }
}
