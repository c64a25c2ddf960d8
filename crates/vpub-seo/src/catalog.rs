//! Category profile catalog.
//!
//! Maps a category key to its keywords and title templates. The catalog is
//! built once at startup, either from the built-in table or from a JSON
//! definition, and is read-only afterwards. Lookups never fail: unknown or
//! empty keys resolve to the default profile.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{SeoError, SeoResult};
use crate::template::unknown_placeholders;

/// Key of the profile used for unknown categories.
pub const DEFAULT_CATEGORY: &str = "tech";

/// Keywords and title templates for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryProfile {
    keywords: Vec<String>,
    title_templates: Vec<String>,
}

impl CategoryProfile {
    /// Ordered, unique descriptive keywords.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Title templates; never empty.
    pub fn title_templates(&self) -> &[String] {
        &self.title_templates
    }
}

/// Serialized form of one profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileDefinition {
    pub keywords: Vec<String>,
    /// Empty means "inherit the default profile's templates"
    #[serde(default)]
    pub title_templates: Vec<String>,
}

/// Serialized form of the whole catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDefinition {
    #[serde(default = "default_category")]
    pub default_category: String,
    pub categories: BTreeMap<String, ProfileDefinition>,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// Immutable registry of category profiles.
#[derive(Debug, Clone)]
pub struct CategoryProfileCatalog {
    profiles: BTreeMap<String, CategoryProfile>,
    default_key: String,
}

/// Normalize a category for lookup: trimmed and ASCII-lowercased.
pub fn normalize_key(category: &str) -> String {
    category.trim().to_ascii_lowercase()
}

impl CategoryProfileCatalog {
    /// The catalog shipped with the service.
    pub fn builtin() -> Self {
        // The built-in table is constant data covered by tests.
        Self::from_definition(builtin_definition()).expect("built-in catalog is valid")
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: &Path) -> SeoResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| SeoError::CatalogIo {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&raw)?;
        info!(
            path = %path.display(),
            categories = catalog.len(),
            "Loaded category catalog"
        );
        Ok(catalog)
    }

    /// Parse and validate a JSON catalog definition.
    pub fn from_json(json: &str) -> SeoResult<Self> {
        let definition: CatalogDefinition = serde_json::from_str(json)?;
        Self::from_definition(definition)
    }

    /// Validate a definition and build the registry.
    pub fn from_definition(definition: CatalogDefinition) -> SeoResult<Self> {
        let default_key = normalize_key(&definition.default_category);
        if default_key.is_empty() {
            return Err(SeoError::EmptyCategoryKey);
        }

        let mut normalized: BTreeMap<String, ProfileDefinition> = BTreeMap::new();
        for (key, profile) in definition.categories {
            let key = normalize_key(&key);
            if key.is_empty() {
                return Err(SeoError::EmptyCategoryKey);
            }
            if normalized.contains_key(&key) {
                return Err(SeoError::DuplicateCategory(key));
            }
            validate_profile(&key, &profile)?;
            normalized.insert(key, profile);
        }

        let default_templates = match normalized.get(&default_key) {
            Some(profile) if profile.title_templates.is_empty() => {
                return Err(SeoError::NoTemplates(default_key));
            }
            Some(profile) => profile.title_templates.clone(),
            None => return Err(SeoError::MissingDefault(default_key)),
        };

        let profiles = normalized
            .into_iter()
            .map(|(key, profile)| {
                let title_templates = if profile.title_templates.is_empty() {
                    default_templates.clone()
                } else {
                    profile.title_templates
                };
                (
                    key,
                    CategoryProfile {
                        keywords: profile.keywords,
                        title_templates,
                    },
                )
            })
            .collect();

        Ok(Self {
            profiles,
            default_key,
        })
    }

    /// Resolve a category to its profile, falling back to the default.
    pub fn lookup(&self, category: &str) -> &CategoryProfile {
        self.profiles
            .get(&normalize_key(category))
            .unwrap_or_else(|| self.default_profile())
    }

    /// Whether the category has its own profile.
    pub fn contains(&self, category: &str) -> bool {
        self.profiles.contains_key(&normalize_key(category))
    }

    pub fn default_key(&self) -> &str {
        &self.default_key
    }

    pub fn default_profile(&self) -> &CategoryProfile {
        // Presence of the default key is checked in `from_definition`.
        &self.profiles[&self.default_key]
    }

    /// Known category keys in sorted order.
    pub fn categories(&self) -> Vec<&str> {
        self.profiles.keys().map(String::as_str).collect()
    }

    /// Iterate profiles in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategoryProfile)> {
        self.profiles.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl Default for CategoryProfileCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn validate_profile(key: &str, profile: &ProfileDefinition) -> SeoResult<()> {
    if profile.keywords.is_empty() {
        return Err(SeoError::NoKeywords(key.to_string()));
    }

    let mut seen = HashSet::new();
    for keyword in &profile.keywords {
        if keyword.trim().is_empty() {
            return Err(SeoError::BlankKeyword {
                category: key.to_string(),
            });
        }
        if !seen.insert(keyword.as_str()) {
            return Err(SeoError::DuplicateKeyword {
                category: key.to_string(),
                keyword: keyword.clone(),
            });
        }
    }

    for template in &profile.title_templates {
        if template.trim().is_empty() {
            return Err(SeoError::BlankTemplate {
                category: key.to_string(),
            });
        }
        if let Some(placeholder) = unknown_placeholders(template).into_iter().next() {
            return Err(SeoError::UnknownPlaceholder {
                category: key.to_string(),
                placeholder,
            });
        }
    }

    Ok(())
}

/// (key, keywords, title templates). Categories without templates inherit
/// the default profile's templates.
const BUILTIN_PROFILES: &[(&str, &[&str], &[&str])] = &[
    (
        "tech",
        &["technology", "tech", "software", "programming", "coding", "developer", "tutorial", "guide"],
        &[
            "Master {topic} in {time} | Complete Guide",
            "The Ultimate {topic} Tutorial for Beginners",
            "{topic} Explained: Everything You Need to Know",
            "How to Use {topic} Like a Pro | Step-by-Step",
            "{topic} Tutorial: From Zero to Hero",
        ],
    ),
    (
        "vlog",
        &["vlog", "daily", "lifestyle", "personal", "day in life", "vlogger", "content creator"],
        &[
            "A Day in My Life | {activity}",
            "Come With Me: {activity}",
            "Real Talk: {topic}",
            "Behind the Scenes: {activity}",
            "My {time} Routine | Real & Raw",
        ],
    ),
    (
        "shorts",
        &["shorts", "short video", "quick", "viral", "trending", "entertainment"],
        &[
            "{topic} in 60 Seconds",
            "Quick {topic} Hack You Need",
            "Wait for the End! {topic}",
            "Try This {topic} Trick",
            "Mind-Blowing {topic} Fact",
        ],
    ),
    (
        "gaming",
        &["gaming", "gameplay", "game", "playthrough", "walkthrough", "lets play", "gamer"],
        &[
            "{game} Gameplay | {achievement}",
            "Playing {game} Until {goal}",
            "{game} Tips & Tricks | Dominate the Game",
            "Epic {game} Moments | Highlights",
            "{game} Walkthrough: {level}",
        ],
    ),
    (
        "tutorial",
        &["tutorial", "how to", "guide", "learn", "course", "lesson", "step by step", "beginner"],
        &[
            "How to {skill} | Complete Tutorial",
            "Learn {skill} in {time} | Beginners Guide",
            "{skill} Tutorial: Step-by-Step Guide",
            "Master {skill} | Easy Tutorial",
            "Complete {skill} Course for Beginners",
        ],
    ),
    (
        "entertainment",
        &["entertainment", "fun", "funny", "comedy", "viral", "trending"],
        &[],
    ),
    (
        "education",
        &["education", "educational", "learn", "teaching", "knowledge", "explained"],
        &[],
    ),
    (
        "music",
        &["music", "song", "audio", "sound", "melody", "musical", "beat"],
        &[],
    ),
];

/// The built-in table as a definition, e.g. to export as a starting point
/// for a custom catalog file.
pub fn builtin_definition() -> CatalogDefinition {
    let categories = BUILTIN_PROFILES
        .iter()
        .map(|(key, keywords, templates)| {
            (
                key.to_string(),
                ProfileDefinition {
                    keywords: keywords.iter().map(|s| s.to_string()).collect(),
                    title_templates: templates.iter().map(|s| s.to_string()).collect(),
                },
            )
        })
        .collect();

    CatalogDefinition {
        default_category: default_category(),
        categories,
    }
}
