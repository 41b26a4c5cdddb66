//! Core types for the remote object store.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// MIME type the store uses to mark folders.
pub const FOLDER_MIME: &str = "application/vnd.google-apps.folder";

/// Image MIME types the gallery shows.
pub const IMAGE_MIME_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/bmp",
    "image/webp",
];

/// Opaque store-assigned object identifier.
///
/// Identifiers are owned by the remote store; this type only carries
/// them around and never interprets their contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ObjectId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Metadata for an object held by the remote store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteObject {
    pub id: ObjectId,
    pub name: String,
    pub mime_type: String,
    pub size: Option<u64>,
    pub modified: Option<DateTime<Utc>>,
}

impl RemoteObject {
    pub fn is_folder(&self) -> bool {
        self.mime_type == FOLDER_MIME
    }

    pub fn is_image(&self) -> bool {
        IMAGE_MIME_TYPES.contains(&self.mime_type.as_str())
    }
}

/// Filter applied when listing the children of a folder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListFilter {
    /// Every non-trashed child
    #[default]
    All,
    /// Only children with a gallery-supported image MIME type
    ImagesOnly,
}
