//! Content digests.
//!
//! Each part becomes a JSON object tagged by `kind`; the ordered list of
//! parts is canonicalized and hashed with SHA-256.

use crate::domain::canonical::canonicalize;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use shared_crypto::sha256_hex;
use shared_types::{FileContent, MessagePart};
use std::fmt;

/// Lowercase hex SHA-256 of canonically encoded message content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentDigest(String);

impl ContentDigest {
    /// Accept an existing digest string if it is 64 lowercase hex chars.
    pub fn parse(hex: &str) -> Option<Self> {
        let well_formed = hex.len() == 64
            && hex
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        well_formed.then(|| Self(hex.to_owned()))
    }

    /// The hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Digest over an ordered sequence of parts.
///
/// Part order matters; key order inside `data` and `metadata` does not.
pub fn compute_digest(parts: &[MessagePart]) -> ContentDigest {
    let encoded = Value::Array(parts.iter().map(part_value).collect());
    ContentDigest(sha256_hex(canonicalize(&encoded).as_bytes()))
}

fn part_value(part: &MessagePart) -> Value {
    let mut obj = Map::new();
    let metadata = match part {
        MessagePart::Text { text, metadata } => {
            obj.insert("kind".into(), Value::from("text"));
            obj.insert("text".into(), Value::from(text.as_str()));
            metadata
        }
        MessagePart::Data { data, metadata } => {
            obj.insert("kind".into(), Value::from("data"));
            obj.insert("data".into(), data.clone());
            metadata
        }
        MessagePart::File { file, metadata } => {
            obj.insert("kind".into(), Value::from("file"));
            obj.insert("file".into(), file_value(file));
            metadata
        }
    };
    if let Some(metadata) = metadata {
        obj.insert("metadata".into(), Value::Object(metadata.clone()));
    }
    Value::Object(obj)
}

fn file_value(file: &FileContent) -> Value {
    let fields = [
        ("name", &file.name),
        ("mimeType", &file.mime_type),
        ("uri", &file.uri),
        ("bytes", &file.bytes),
    ];
    let obj: Map<String, Value> = fields
        .into_iter()
        .filter_map(|(key, value)| value.as_ref().map(|v| (key.to_owned(), Value::from(v.as_str()))))
        .collect();
    Value::Object(obj)
}
