//! File attachments carried by chat messages.

/// Display category for an attachment.
///
/// Derived purely from the media type; it never affects behavior, only how
/// the attachment is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    Image,
    Document,
    Other,
}

/// A user-supplied file reference.
///
/// Owned by the session while pending, then by the message it was sent
/// with until explicitly removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub name: String,
    pub byte_size: u64,
    pub media_type: String,
    pub content: Vec<u8>,
}

impl Attachment {
    /// Create an attachment from raw file bytes; `byte_size` is taken from
    /// the content length.
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            byte_size: content.len() as u64,
            media_type: media_type.into(),
            content,
        }
    }

    /// Classify for display as image, document, or other.
    pub fn kind(&self) -> AttachmentKind {
        if self.media_type.starts_with("image/") {
            AttachmentKind::Image
        } else if self.media_type.starts_with("text/")
            || matches!(
                self.media_type.as_str(),
                "application/pdf"
                    | "application/msword"
                    | "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            )
        {
            AttachmentKind::Document
        } else {
            AttachmentKind::Other
        }
    }
}

/// Guess a media type from a file name's extension.
///
/// Covers the file types the chat accepts for upload; anything else is
/// `application/octet-stream`.
pub fn media_type_for_name(name: &str) -> &'static str {
    let extension = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "txt" => "text/plain",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        _ => "application/octet-stream",
    }
}
