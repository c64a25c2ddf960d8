//! Output bounds for generated content.

use crate::error::{SeoError, SeoResult};

/// Marker appended to truncated titles.
pub const ELLIPSIS: &str = "...";

/// Size caps applied by the synthesizer.
///
/// The defaults mirror common video-platform limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentLimits {
    /// Maximum title length in characters, ellipsis included
    pub max_title_chars: usize,
    pub max_hashtags: usize,
    pub max_tags: usize,
    /// Profile keywords turned into hashtags
    pub hashtag_keywords: usize,
    /// Profile keywords listed in the description's hashtag line
    pub description_keywords: usize,
}

impl Default for ContentLimits {
    fn default() -> Self {
        Self {
            max_title_chars: 70,
            max_hashtags: 10,
            max_tags: 15,
            hashtag_keywords: 4,
            description_keywords: 5,
        }
    }
}

impl ContentLimits {
    /// Characters kept from an over-long title before the ellipsis.
    pub fn truncated_title_chars(&self) -> usize {
        self.max_title_chars.saturating_sub(ELLIPSIS.chars().count())
    }

    /// Reject limits that would break the non-empty output guarantee.
    pub fn validate(&self) -> SeoResult<()> {
        if self.max_title_chars <= ELLIPSIS.chars().count() {
            return Err(SeoError::invalid_limits(format!(
                "max_title_chars must exceed {}",
                ELLIPSIS.chars().count()
            )));
        }
        if self.max_hashtags == 0 {
            return Err(SeoError::invalid_limits("max_hashtags must be at least 1"));
        }
        if self.max_tags == 0 {
            return Err(SeoError::invalid_limits("max_tags must be at least 1"));
        }
        Ok(())
    }
}
