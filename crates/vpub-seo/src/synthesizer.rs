//! Content synthesizer.
//!
//! Turns a category (plus language and optional filename) into a complete
//! [`GeneratedContent`]. The only sources of variation are the injected
//! [`RandomSource`] (template choice) and [`Clock`] (year), so a fixed
//! source and clock reproduce the output byte for byte.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Datelike;
use tracing::debug;

use vpub_models::{Clock, GeneratedContent, Language, RandomSource, SystemClock, ThreadRandom};

use crate::catalog::{normalize_key, CategoryProfile, CategoryProfileCatalog};
use crate::error::SeoResult;
use crate::limits::{ContentLimits, ELLIPSIS};
use crate::template::expand;

/// Hashtags appended after the category and keyword hashtags.
const TRAILING_HASHTAGS: [&str; 4] = ["#YouTube", "#Tutorial", "#HowTo", "#Learn"];

/// Generic tags following the keywords.
const GENERIC_TAGS: [&str; 4] = ["tutorial", "guide", "how to", "learn"];

/// Inputs for one synthesis call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SynthesisRequest<'a> {
    pub category: &'a str,
    pub language: &'a str,
    pub file_name: Option<&'a str>,
}

impl<'a> SynthesisRequest<'a> {
    pub fn new(category: &'a str, language: &'a str) -> Self {
        Self {
            category,
            language,
            file_name: None,
        }
    }

    pub fn with_file_name(mut self, file_name: Option<&'a str>) -> Self {
        self.file_name = file_name;
        self
    }
}

/// Generates SEO metadata from the category catalog.
#[derive(Clone)]
pub struct ContentSynthesizer {
    catalog: Arc<CategoryProfileCatalog>,
    random: Arc<dyn RandomSource>,
    clock: Arc<dyn Clock>,
    limits: ContentLimits,
}

impl ContentSynthesizer {
    /// Create a synthesizer using the thread RNG and the system clock.
    pub fn new(catalog: Arc<CategoryProfileCatalog>) -> Self {
        Self {
            catalog,
            random: Arc::new(ThreadRandom),
            clock: Arc::new(SystemClock),
            limits: ContentLimits::default(),
        }
    }

    pub fn with_random(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.random = random;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Override the output caps. Fails if they would allow empty output.
    pub fn with_limits(mut self, limits: ContentLimits) -> SeoResult<Self> {
        limits.validate()?;
        self.limits = limits;
        Ok(self)
    }

    pub fn catalog(&self) -> &CategoryProfileCatalog {
        &self.catalog
    }

    pub fn limits(&self) -> &ContentLimits {
        &self.limits
    }

    /// Generate content for a category and language.
    pub fn synthesize(&self, category: &str, language: &str) -> GeneratedContent {
        self.synthesize_request(&SynthesisRequest::new(category, language))
    }

    /// Generate content for a full request.
    ///
    /// Total over all inputs: unknown or empty categories use the default
    /// profile.
    pub fn synthesize_request(&self, request: &SynthesisRequest<'_>) -> GeneratedContent {
        let category = self.category_name(request.category);
        let profile = self.catalog.lookup(&category);
        let year = self.clock.now().year();

        let template_index = self.random.index(profile.title_templates().len());
        let title = self.title(&category, profile, template_index);
        let description = self.description(&category, profile, year);
        let hashtags = self.hashtags(&category, profile);
        let tags = self.tags(&category, profile, year);
        let thumbnail_prompt = thumbnail_prompt(&title, &category);

        let content = GeneratedContent {
            title,
            description,
            hashtags,
            tags,
            thumbnail_prompt,
        };

        debug!(
            category = %category,
            known_category = self.catalog.contains(&category),
            language = %request.language,
            language_name = Language::find(request.language).map(|l| l.name),
            file_name = ?request.file_name,
            template_index,
            title_chars = content.title_chars(),
            "Synthesized content"
        );

        content
    }

    /// Normalized category used in all generated text.
    fn category_name(&self, raw: &str) -> String {
        let normalized = normalize_key(raw);
        if normalized.is_empty() {
            self.catalog.default_key().to_string()
        } else {
            normalized
        }
    }

    fn title(&self, category: &str, profile: &CategoryProfile, index: usize) -> String {
        let template = profile
            .title_templates()
            .get(index)
            .map(String::as_str)
            .unwrap_or_default();
        truncate_title(&expand(template, category), &self.limits)
    }

    fn description(&self, category: &str, profile: &CategoryProfile, year: i32) -> String {
        let hashtag_line = profile
            .keywords()
            .iter()
            .take(self.limits.description_keywords)
            .map(|k| to_hashtag(k))
            .collect::<Vec<_>>()
            .join(" ");

        format!(
            "🎯 Welcome to this comprehensive {category} video!

In this video, you'll discover everything you need to know about {category}. Whether you're a beginner or looking to enhance your skills, this guide has you covered.

📌 What You'll Learn:
✅ Key concepts and fundamentals
✅ Step-by-step instructions
✅ Pro tips and best practices
✅ Real-world examples

🔔 Don't forget to SUBSCRIBE for more {category} content!
👍 Like this video if you found it helpful
💬 Comment below with your questions

📱 Follow Us:
Instagram: @yourchannel
Twitter: @yourchannel
Discord: discord.gg/yourchannel

{hashtag_line}

⏱️ Timestamps:
0:00 Introduction
0:30 Getting Started
2:00 Main Content
8:00 Conclusion

Music: Epidemic Sound
Edited with: Adobe Premiere Pro

© {year} All Rights Reserved"
        )
    }

    fn hashtags(&self, category: &str, profile: &CategoryProfile) -> Vec<String> {
        let candidates = std::iter::once(to_hashtag(category))
            .chain(
                profile
                    .keywords()
                    .iter()
                    .take(self.limits.hashtag_keywords)
                    .map(|k| to_hashtag(k)),
            )
            .chain(TRAILING_HASHTAGS.iter().map(|h| h.to_string()));

        dedup_capped(candidates, self.limits.max_hashtags)
    }

    fn tags(&self, category: &str, profile: &CategoryProfile, year: i32) -> Vec<String> {
        let candidates = std::iter::once(category.to_string())
            .chain(profile.keywords().iter().cloned())
            .chain(GENERIC_TAGS.iter().map(|t| t.to_string()))
            .chain([format!("{category} tutorial"), format!("{category} guide")])
            .chain([
                "beginner friendly".to_string(),
                year.to_string(),
                "educational".to_string(),
                "step by step".to_string(),
            ]);

        dedup_capped(candidates, self.limits.max_tags)
    }
}

/// Cut a title to the configured length, marking the cut with an ellipsis.
fn truncate_title(title: &str, limits: &ContentLimits) -> String {
    if title.chars().count() <= limits.max_title_chars {
        return title.to_string();
    }
    let mut truncated: String = title.chars().take(limits.truncated_title_chars()).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

/// `#` followed by the word with all whitespace removed.
fn to_hashtag(word: &str) -> String {
    let body: String = word.split_whitespace().collect();
    format!("#{body}")
}

/// Keep the first occurrence of each entry (case-insensitive), skip blank
/// or bare-`#` entries, and stop at `cap`.
fn dedup_capped(items: impl IntoIterator<Item = String>, cap: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| !item.trim().is_empty() && item != "#")
        .filter(|item| seen.insert(item.to_lowercase()))
        .take(cap)
        .collect()
}

fn thumbnail_prompt(title: &str, category: &str) -> String {
    let headline = title.split('|').next().unwrap_or_default().trim();
    format!(
        "Create a professional YouTube thumbnail with:
- Bold, eye-catching text: \"{headline}\"
- Vibrant colors (use red, yellow, or blue accents)
- High contrast background
- Modern, clean design
- {category} themed imagery
- Engaging visual elements
- Professional typography
- 1280x720 resolution
- Bright and attention-grabbing"
    )
}
