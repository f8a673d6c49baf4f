use serde_json::json;
use wa_relay::channels::whatsapp::parse_source_event;
use wa_relay::types::SourceEvent;

#[test]
fn test_parse_text_message() {
    let envelope = json!({
        "seq": 41,
        "type": "message",
        "chat": "12036304@g.us",
        "sender_name": "Alice",
        "timestamp": 1714566600,
        "media_kind": "",
        "message": {"conversation": "hello"}
    });
    let event = parse_source_event(&envelope).unwrap();
    let SourceEvent::Message(msg) = event else {
        panic!("expected message event");
    };
    assert_eq!(msg.chat, "12036304@g.us");
    assert_eq!(msg.sender_name, "Alice");
    assert_eq!(msg.media_kind, "");
    assert_eq!(msg.message.conversation, Some("hello".to_string()));
    assert_eq!(msg.timestamp.timestamp(), 1714566600);
}

#[test]
fn test_parse_image_message() {
    let envelope = json!({
        "seq": 42,
        "type": "message",
        "chat": "12036304@g.us",
        "sender_name": "Alice",
        "timestamp": 1714566600,
        "media_kind": "image",
        "message": {"image": {"mime_type": "image/jpeg", "caption": "look"}}
    });
    let event = parse_source_event(&envelope).unwrap();
    let SourceEvent::Message(msg) = event else {
        panic!("expected message event");
    };
    assert_eq!(msg.media_kind, "image");
    let image = msg.message.image.unwrap();
    assert_eq!(image.mime_type, Some("image/jpeg".to_string()));
    assert_eq!(image.caption, Some("look".to_string()));
}

#[test]
fn test_parse_captioned_document_message() {
    let envelope = json!({
        "type": "message",
        "chat": "12036304@g.us",
        "sender_name": "Alice",
        "timestamp": 1714566600,
        "media_kind": "document",
        "message": {
            "document_with_caption": {
                "document": {
                    "title": "notes.pdf",
                    "mime_type": "application/pdf",
                    "caption": "meeting notes"
                }
            }
        }
    });
    let event = parse_source_event(&envelope).unwrap();
    let SourceEvent::Message(msg) = event else {
        panic!("expected message event");
    };
    let doc = msg
        .message
        .document_with_caption
        .unwrap()
        .document
        .unwrap();
    assert_eq!(doc.title, Some("notes.pdf".to_string()));
    assert_eq!(doc.caption, Some("meeting notes".to_string()));
}

#[test]
fn test_non_message_type_is_other() {
    let envelope = json!({"seq": 1, "type": "presence", "chat": "x@g.us"});
    let event = parse_source_event(&envelope).unwrap();
    match event {
        SourceEvent::Other(kind) => assert_eq!(kind, "presence"),
        SourceEvent::Message(_) => panic!("presence must not parse as message"),
    }
}

#[test]
fn test_missing_type_is_rejected() {
    let envelope = json!({"seq": 1, "chat": "x@g.us"});
    assert!(parse_source_event(&envelope).is_none());
}

#[test]
fn test_missing_chat_is_rejected() {
    let envelope = json!({
        "type": "message",
        "sender_name": "Alice",
        "timestamp": 1714566600,
        "message": {"conversation": "hello"}
    });
    assert!(parse_source_event(&envelope).is_none());
}

#[test]
fn test_missing_timestamp_is_rejected() {
    let envelope = json!({
        "type": "message",
        "chat": "12036304@g.us",
        "message": {"conversation": "hello"}
    });
    assert!(parse_source_event(&envelope).is_none());
}

#[test]
fn test_missing_message_body_defaults_empty() {
    let envelope = json!({
        "type": "message",
        "chat": "12036304@g.us",
        "timestamp": 1714566600
    });
    let event = parse_source_event(&envelope).unwrap();
    let SourceEvent::Message(msg) = event else {
        panic!("expected message event");
    };
    assert!(msg.sender_name.is_empty());
    assert!(msg.message.conversation.is_none());
    assert!(msg.message.image.is_none());
}

#[test]
fn test_sender_key_distribution_round_trips() {
    let envelope = json!({
        "type": "message",
        "chat": "12036304@g.us",
        "timestamp": 1714566600,
        "message": {"sender_key_distribution": {"group_id": "12036304@g.us"}}
    });
    let event = parse_source_event(&envelope).unwrap();
    let SourceEvent::Message(msg) = event else {
        panic!("expected message event");
    };
    assert!(msg.message.sender_key_distribution.is_some());
}
