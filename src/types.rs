use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One notification from the WhatsApp side. The relay only acts on the
/// `Message` variant; everything else (pairing, presence, receipts) is
/// connection noise owned by the sidecar.
#[derive(Debug, Clone)]
pub enum SourceEvent {
    Message(MessageEvent),
    Other(String),
}

/// A received message with its delivery metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageEvent {
    /// JID of the conversation the message arrived in.
    pub chat: String,
    /// Sender display name (push name).
    pub sender_name: String,
    pub timestamp: DateTime<Utc>,
    /// Media kind tag from the sidecar; empty string means plain text.
    #[serde(default)]
    pub media_kind: String,
    pub message: RawMessage,
}

/// The raw nested message payload as the sidecar serializes it. Which of the
/// optional sub-messages is populated depends on `media_kind`; validation
/// happens in `classify`, not here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawMessage {
    pub conversation: Option<String>,
    pub extended_text: Option<ExtendedText>,
    pub image: Option<ImageContent>,
    pub document: Option<DocumentContent>,
    pub document_with_caption: Option<CaptionedDocument>,
    /// Sender-key distribution is protocol housekeeping, not user content.
    pub sender_key_distribution: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtendedText {
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageContent {
    pub mime_type: Option<String>,
    pub caption: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentContent {
    pub title: Option<String>,
    pub mime_type: Option<String>,
    pub caption: Option<String>,
}

/// Documents sent with a caption arrive wrapped one level deeper than plain
/// documents. The wrapper never leaves this module; `classify` folds both
/// shapes into one `Document` variant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaptionedDocument {
    pub document: Option<DocumentContent>,
}

/// The Discord-facing representation of one forwarded message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelayMessage {
    pub description: String,
    pub author_name: String,
    pub author_icon_url: String,
    /// RFC 3339 with millisecond precision.
    pub timestamp: String,
    pub color: u32,
}

/// A joined group as reported by the sidecar. Startup diagnostic only.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupInfo {
    pub name: String,
    pub jid: String,
}
