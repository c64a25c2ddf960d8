//! Media references.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// An uploaded media file spooled to local disk.
///
/// The transport owns the backing file for the lifetime of the request;
/// `path` is only valid until the response is sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    /// Location of the spooled bytes
    pub path: PathBuf,

    /// Client-supplied filename
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,

    /// Client-supplied MIME type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    /// Number of bytes received
    pub size_bytes: u64,
}

/// The media being published: an uploaded file or a remote URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MediaRef {
    File(UploadedFile),
    Url { url: String },
}

impl MediaRef {
    /// Build a URL reference.
    pub fn url(url: impl Into<String>) -> Self {
        Self::Url { url: url.into() }
    }

    /// Filename of an uploaded file, if any.
    pub fn file_name(&self) -> Option<&str> {
        match self {
            MediaRef::File(file) => file.file_name.as_deref(),
            MediaRef::Url { .. } => None,
        }
    }

    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            MediaRef::File(_) => "file",
            MediaRef::Url { .. } => "url",
        }
    }
}

impl fmt::Display for MediaRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaRef::File(file) => write!(
                f,
                "file:{} ({} bytes)",
                file.file_name.as_deref().unwrap_or("<unnamed>"),
                file.size_bytes
            ),
            MediaRef::Url { url } => write!(f, "url:{}", url),
        }
    }
}
