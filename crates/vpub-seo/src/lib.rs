//! SEO content synthesis.
//!
//! This crate provides:
//! - An immutable category profile catalog (built-in or loaded from JSON)
//! - Title template expansion with placeholder substitution
//! - The content synthesizer that derives title, description, hashtags,
//!   tags and a thumbnail prompt from a category

pub mod catalog;
pub mod error;
pub mod limits;
pub mod synthesizer;
pub mod template;

pub use catalog::{
    normalize_key, CatalogDefinition, CategoryProfile, CategoryProfileCatalog, ProfileDefinition,
    DEFAULT_CATEGORY,
};
pub use error::{SeoError, SeoResult};
pub use limits::ContentLimits;
pub use synthesizer::{ContentSynthesizer, SynthesisRequest};
pub use template::Placeholder;
