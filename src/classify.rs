use crate::types::{DocumentContent, MessageEvent};

/// Classified message content. Constructed only through `classify`, so every
/// variant carries the fields its kind requires.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaContent {
    Text {
        body: String,
    },
    Image {
        mime_type: String,
        /// Synthesized attachment name, `image.<subtype>`.
        filename: String,
        caption: String,
    },
    Document {
        title: String,
        mime_type: String,
        caption: String,
    },
    Unsupported {
        media_kind: String,
    },
}

impl MediaContent {
    /// Caption to forward ahead of the attachment, if any.
    pub fn caption(&self) -> Option<&str> {
        match self {
            MediaContent::Image { caption, .. } | MediaContent::Document { caption, .. } => {
                Some(caption.as_str())
            }
            _ => None,
        }
    }

    /// Filename for the attachment upload, if this kind carries one.
    pub fn attachment_name(&self) -> Option<&str> {
        match self {
            MediaContent::Image { filename, .. } => Some(filename.as_str()),
            MediaContent::Document { title, .. } => Some(title.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassifyError {
    #[error("{media_kind} message missing required field {field}")]
    MissingField {
        media_kind: &'static str,
        field: &'static str,
    },
}

fn require(
    value: Option<&String>,
    media_kind: &'static str,
    field: &'static str,
) -> Result<String, ClassifyError> {
    value
        .cloned()
        .ok_or(ClassifyError::MissingField { media_kind, field })
}

/// Classify an inbound message by its media-kind tag.
///
/// An empty tag is plain text, with the extended-text sub-message overriding
/// the conversation text when it carries a non-empty value. Images and
/// documents must carry their mime type (plus title and caption where the
/// shape mandates them); anything else is `Unsupported`.
pub fn classify(event: &MessageEvent) -> Result<MediaContent, ClassifyError> {
    let raw = &event.message;

    match event.media_kind.as_str() {
        "" => {
            let mut body = raw.conversation.clone().unwrap_or_default();
            if let Some(extended) = raw.extended_text.as_ref() {
                if let Some(text) = extended.text.as_ref() {
                    if !text.is_empty() {
                        body = text.clone();
                    }
                }
            }
            Ok(MediaContent::Text { body })
        }
        "image" => {
            let image = raw.image.as_ref();
            let mime_type = require(
                image.and_then(|i| i.mime_type.as_ref()),
                "image",
                "mime_type",
            )?;
            let ext = mime_type.strip_prefix("image/").unwrap_or(&mime_type);
            let filename = format!("image.{ext}");
            let caption = image
                .and_then(|i| i.caption.clone())
                .unwrap_or_default();
            Ok(MediaContent::Image {
                mime_type,
                filename,
                caption,
            })
        }
        "document" => classify_document(raw.document_with_caption.as_ref(), raw.document.as_ref()),
        other => Ok(MediaContent::Unsupported {
            media_kind: other.to_string(),
        }),
    }
}

/// Fold the two upstream document shapes into the one `Document` variant.
/// The captioned wrapper requires title, mime type and caption; the plain
/// shape requires title and mime type and never carries a caption.
fn classify_document(
    captioned: Option<&crate::types::CaptionedDocument>,
    plain: Option<&DocumentContent>,
) -> Result<MediaContent, ClassifyError> {
    if let Some(wrapper) = captioned {
        let doc = wrapper.document.as_ref();
        let title = require(doc.and_then(|d| d.title.as_ref()), "document", "title")?;
        let mime_type = require(
            doc.and_then(|d| d.mime_type.as_ref()),
            "document",
            "mime_type",
        )?;
        let caption = require(
            doc.and_then(|d| d.caption.as_ref()),
            "document",
            "caption",
        )?;
        return Ok(MediaContent::Document {
            title,
            mime_type,
            caption,
        });
    }

    let doc = plain;
    let title = require(doc.and_then(|d| d.title.as_ref()), "document", "title")?;
    let mime_type = require(
        doc.and_then(|d| d.mime_type.as_ref()),
        "document",
        "mime_type",
    )?;
    Ok(MediaContent::Document {
        title,
        mime_type,
        caption: String::new(),
    })
}
