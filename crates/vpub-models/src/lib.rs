//! Shared data models for the vpub backend.
//!
//! This crate provides Serde-serializable types for:
//! - Generated SEO content (title, description, hashtags, tags, thumbnail prompt)
//! - Media references and publish requests/results
//! - Supported upload languages
//! - Randomness and clock ports injected into synthesis and publishing

pub mod content;
pub mod language;
pub mod media;
pub mod ports;
pub mod publish;

// Re-export common types
pub use content::GeneratedContent;
pub use language::{Language, SUPPORTED_LANGUAGES};
pub use media::{MediaRef, UploadedFile};
pub use ports::{Clock, FixedClock, FixedIndex, RandomSource, SeededRandom, SystemClock, ThreadRandom};
pub use publish::{
    PublishFailure, PublishId, PublishOptions, PublishOutcome, PublishRequest, PublishResult,
    PublishState, PublishStatus,
};
