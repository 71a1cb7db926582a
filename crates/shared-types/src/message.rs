//! # Protocol Messages
//!
//! The transport is external; these types model only what the trust layer
//! reads: the message id, its ordered content parts, and the metadata map
//! where envelopes travel.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// String-keyed JSON metadata attached to a protocol message.
pub type MessageMetadata = Map<String, Value>;

/// One typed content part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MessagePart {
    /// Plain text.
    Text {
        /// The text body.
        text: String,
        /// Optional per-part metadata.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        metadata: Option<MessageMetadata>,
    },
    /// Structured JSON data.
    Data {
        /// The data payload.
        data: Value,
        /// Optional per-part metadata.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        metadata: Option<MessageMetadata>,
    },
    /// A file, by reference or inline.
    File {
        /// File descriptor.
        file: FileContent,
        /// Optional per-part metadata.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        metadata: Option<MessageMetadata>,
    },
}

impl MessagePart {
    /// A text part without metadata.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            metadata: None,
        }
    }

    /// A data part without metadata.
    pub fn data(data: Value) -> Self {
        Self::Data {
            data,
            metadata: None,
        }
    }

    /// A file part without metadata.
    pub fn file(file: FileContent) -> Self {
        Self::File {
            file,
            metadata: None,
        }
    }
}

/// File reference or inline content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileContent {
    /// File name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// MIME type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Location of the file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    /// Inline content, base64.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytes: Option<String>,
}

/// A protocol message as seen by the trust layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Sender-assigned message id.
    pub message_id: String,
    /// Ordered content.
    pub parts: Vec<MessagePart>,
    /// Envelope-carrying metadata.
    #[serde(default)]
    pub metadata: MessageMetadata,
}

impl Message {
    /// A message with empty metadata.
    pub fn new(message_id: impl Into<String>, parts: Vec<MessagePart>) -> Self {
        Self {
            message_id: message_id.into(),
            parts,
            metadata: MessageMetadata::new(),
        }
    }
}
