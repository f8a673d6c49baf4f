use chrono::SecondsFormat;

use crate::types::{MessageEvent, RelayMessage};

/// WhatsApp brand green, used on every forwarded embed.
pub const EMBED_COLOR: u32 = 0x25D366;

/// WhatsApp avatars are not reachable from Discord, so every author gets the
/// same blank placeholder.
pub const AUTHOR_ICON_URL: &str = "http://s3.cri.epita.fr/cri-intranet/img/blank.jpg";

/// Build the embed for a text body (message text or a media caption),
/// carrying the sender identity and original timestamp.
pub fn compose_text(body: &str, event: &MessageEvent) -> RelayMessage {
    RelayMessage {
        description: body.to_string(),
        author_name: event.sender_name.clone(),
        author_icon_url: AUTHOR_ICON_URL.to_string(),
        timestamp: format_timestamp(event),
        color: EMBED_COLOR,
    }
}

/// RFC 3339 with millisecond precision, e.g. `2024-05-01T12:30:00.000Z`.
pub fn format_timestamp(event: &MessageEvent) -> String {
    event.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}
