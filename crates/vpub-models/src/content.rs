//! Generated SEO content.

use serde::{Deserialize, Serialize};

/// Promotional metadata produced for a single media item.
///
/// Built once per synthesis call and never mutated afterwards. The
/// synthesizer guarantees the bounds documented on each field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContent {
    /// Video title (at most 70 characters with default limits)
    pub title: String,

    /// Multi-section video description
    pub description: String,

    /// Hashtags, each prefixed with `#`, unique, at most 10 by default
    pub hashtags: Vec<String>,

    /// Search tags, unique, at most 15 by default
    pub tags: Vec<String>,

    /// Instruction text for a thumbnail image generator
    pub thumbnail_prompt: String,
}

impl GeneratedContent {
    /// Title length in characters (not bytes).
    pub fn title_chars(&self) -> usize {
        self.title.chars().count()
    }

    /// Check whether every field carries data.
    pub fn is_complete(&self) -> bool {
        !self.title.is_empty()
            && !self.description.is_empty()
            && !self.hashtags.is_empty()
            && !self.tags.is_empty()
            && !self.thumbnail_prompt.is_empty()
    }
}
