//! SEO error types.

use std::path::PathBuf;

use thiserror::Error;

pub type SeoResult<T> = Result<T, SeoError>;

#[derive(Debug, Error)]
pub enum SeoError {
    #[error("Failed to read catalog {path}: {source}")]
    CatalogIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid catalog JSON: {0}")]
    CatalogParse(#[from] serde_json::Error),

    #[error("Default category '{0}' is not defined")]
    MissingDefault(String),

    #[error("Category key must not be empty")]
    EmptyCategoryKey,

    #[error("Category '{0}' is defined more than once")]
    DuplicateCategory(String),

    #[error("Category '{0}' has no keywords")]
    NoKeywords(String),

    #[error("Category '{category}' has a blank keyword")]
    BlankKeyword { category: String },

    #[error("Category '{category}' repeats keyword '{keyword}'")]
    DuplicateKeyword { category: String, keyword: String },

    #[error("Default category '{0}' has no title templates")]
    NoTemplates(String),

    #[error("Category '{category}' has a blank title template")]
    BlankTemplate { category: String },

    #[error("Category '{category}' uses unknown placeholder '{{{placeholder}}}'")]
    UnknownPlaceholder { category: String, placeholder: String },

    #[error("Invalid content limits: {0}")]
    InvalidLimits(String),
}

impl SeoError {
    pub fn invalid_limits(msg: impl Into<String>) -> Self {
        Self::InvalidLimits(msg.into())
    }
}
