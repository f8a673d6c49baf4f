use async_trait::async_trait;
use bytes::Bytes;
use tracing::{debug, warn};

use crate::classify::{classify, MediaContent};
use crate::compose::compose_text;
use crate::config::Config;
use crate::error::RelayError;
use crate::types::{RawMessage, RelayMessage, SourceEvent};

/// Retrieves the raw bytes of an attached media object from the source
/// platform. Download and decryption need the full raw message, not the
/// classified summary.
#[async_trait]
pub trait MediaFetcher: Send + Sync {
    async fn download_media(&self, message: &RawMessage) -> anyhow::Result<Bytes>;
}

/// Outbound side of the relay. One call per delivered message.
#[async_trait]
pub trait RelaySink: Send + Sync {
    async fn send_text(&self, channel_id: &str, message: &RelayMessage) -> anyhow::Result<()>;
    async fn send_file(
        &self,
        channel_id: &str,
        filename: &str,
        bytes: &[u8],
    ) -> anyhow::Result<()>;
}

/// How an event was resolved. `Ignored` is the normal outcome for anything
/// out of scope; failures surface as `RelayError` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    Forwarded { sends: usize },
    Ignored(&'static str),
}

/// Per-event orchestration: scope filter, classify, fetch where needed,
/// compose, send. Holds no state beyond the immutable configuration and the
/// two injected collaborators, so events can be handled concurrently.
pub struct Relay<F, S> {
    config: Config,
    fetcher: F,
    sink: S,
}

impl<F: MediaFetcher, S: RelaySink> Relay<F, S> {
    pub fn new(config: Config, fetcher: F, sink: S) -> Self {
        Self {
            config,
            fetcher,
            sink,
        }
    }

    /// Handle one inbound event. Errors are scoped to this event; the caller
    /// logs them and moves on.
    pub async fn handle_event(&self, event: SourceEvent) -> Result<Disposition, RelayError> {
        let SourceEvent::Message(msg) = event else {
            return Ok(Disposition::Ignored("non-message event"));
        };

        if msg.chat != self.config.whatsapp.chat_id {
            return Ok(Disposition::Ignored("other conversation"));
        }
        if msg.message.sender_key_distribution.is_some() {
            return Ok(Disposition::Ignored("sender key distribution"));
        }

        debug!(chat = %msg.chat, sender = %msg.sender_name, media_kind = %msg.media_kind, "received message");

        let channel_id = self.config.discord.channel_id.as_str();
        match classify(&msg)? {
            MediaContent::Text { body } => {
                if body.is_empty() {
                    // Discord rejects embeds with an empty description.
                    return Ok(Disposition::Ignored("empty text"));
                }
                let embed = compose_text(&body, &msg);
                self.sink
                    .send_text(channel_id, &embed)
                    .await
                    .map_err(RelayError::Send)?;
                Ok(Disposition::Forwarded { sends: 1 })
            }
            MediaContent::Unsupported { media_kind } => {
                warn!(%media_kind, "unsupported media kind, dropping");
                Ok(Disposition::Ignored("unsupported media kind"))
            }
            content => {
                let mut sends = 0;

                // Caption goes out first; a later fetch failure does not
                // retract it.
                if let Some(caption) = content.caption().filter(|c| !c.is_empty()) {
                    let embed = compose_text(caption, &msg);
                    self.sink
                        .send_text(channel_id, &embed)
                        .await
                        .map_err(RelayError::Send)?;
                    sends += 1;
                }

                let bytes = self
                    .fetcher
                    .download_media(&msg.message)
                    .await
                    .map_err(RelayError::Fetch)?;

                let filename = content
                    .attachment_name()
                    .unwrap_or("file");
                self.sink
                    .send_file(channel_id, filename, &bytes)
                    .await
                    .map_err(RelayError::Send)?;
                sends += 1;

                Ok(Disposition::Forwarded { sends })
            }
        }
    }
}
