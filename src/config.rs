use serde::{Deserialize, Serialize};
use std::env;

use crate::error::RelayError;

/// Process-wide configuration, read once at startup and immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub discord: DiscordConfig,
    pub whatsapp: WhatsAppConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordConfig {
    pub bot_token: String,
    pub channel_id: String,
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            channel_id: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhatsAppConfig {
    /// JID of the single conversation being mirrored.
    pub chat_id: String,
    /// Base URL of the sidecar that owns the WhatsApp session.
    pub sidecar_url: String,
    pub poll_interval_seconds: u64,
}

impl Default for WhatsAppConfig {
    fn default() -> Self {
        Self {
            chat_id: String::new(),
            sidecar_url: "http://127.0.0.1:4040".to_string(),
            poll_interval_seconds: 2,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            discord: DiscordConfig::default(),
            whatsapp: WhatsAppConfig::default(),
        }
    }
}

impl Config {
    /// The relay must not connect anywhere with an incomplete configuration.
    pub fn validate(&self) -> Result<(), RelayError> {
        if self.discord.bot_token.trim().is_empty() {
            return Err(RelayError::ConfigMissing("DISCORD_TOKEN"));
        }
        if self.discord.channel_id.trim().is_empty() {
            return Err(RelayError::ConfigMissing("DISCORD_CHANNEL_ID"));
        }
        if self.whatsapp.chat_id.trim().is_empty() {
            return Err(RelayError::ConfigMissing("WHATSAPP_CHANNEL_ID"));
        }
        Ok(())
    }
}

pub fn load_config() -> Config {
    let mut cfg = Config::default();

    if let Ok(token) = env::var("DISCORD_TOKEN") {
        if !token.trim().is_empty() {
            cfg.discord.bot_token = token;
        }
    }

    if let Ok(channel) = env::var("DISCORD_CHANNEL_ID") {
        if !channel.trim().is_empty() {
            cfg.discord.channel_id = channel;
        }
    }

    if let Ok(chat) = env::var("WHATSAPP_CHANNEL_ID") {
        if !chat.trim().is_empty() {
            cfg.whatsapp.chat_id = chat;
        }
    }

    if let Ok(url) = env::var("WA_RELAY_SIDECAR_URL") {
        if !url.trim().is_empty() {
            cfg.whatsapp.sidecar_url = url;
        }
    }

    if let Ok(seconds) = env::var("WA_RELAY_POLL_SECONDS") {
        if let Ok(parsed) = seconds.trim().parse::<u64>() {
            cfg.whatsapp.poll_interval_seconds = parsed;
        }
    }

    cfg
}
