//! Theme identifiers and the keyword/phrase catalog.
//!
//! Themes are an enumerated type rather than free strings, so grouping
//! and lookups never compare substrings. The catalog is immutable
//! configuration: keyword and phrase tables per theme, compiled once
//! into matchers and injected into the detector.

use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use pulse_common::{Error, Result};

/// Topical label attached to a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Theme {
    Comfort,
    Durability,
    Appearance,
    /// Synthetic fallback for reviews matching no real theme.
    Other,
}

impl Theme {
    /// Real themes, in detector evaluation order. `Other` is never
    /// detected directly; it is the fallback when none of these match.
    pub const DETECTABLE: [Theme; 3] = [Theme::Comfort, Theme::Durability, Theme::Appearance];

    /// Stable display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Comfort => "Comfort",
            Self::Durability => "Durability",
            Self::Appearance => "Appearance",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Keyword and phrase configuration for one theme.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeDefinition {
    pub theme: Theme,
    /// Single words, matched on word boundaries.
    pub keywords: Vec<String>,
    /// Multi-word phrases, matched as case-insensitive substrings.
    pub phrases: Vec<String>,
}

#[derive(Clone)]
pub(crate) struct ThemeMatcher {
    pub(crate) theme: Theme,
    phrases: Option<AhoCorasick>,
    keywords: Option<Regex>,
}

impl ThemeMatcher {
    fn compile(definition: &ThemeDefinition) -> Result<Self> {
        let phrases = if definition.phrases.is_empty() {
            None
        } else {
            let searcher = AhoCorasick::builder()
                .ascii_case_insensitive(true)
                .build(&definition.phrases)
                .map_err(|e| {
                    Error::Config(format!("phrase matcher for {}: {e}", definition.theme))
                })?;
            Some(searcher)
        };

        let keywords = if definition.keywords.is_empty() {
            None
        } else {
            let alternation = definition
                .keywords
                .iter()
                .map(|k| regex::escape(&k.to_lowercase()))
                .collect::<Vec<_>>()
                .join("|");
            let pattern = format!(r"\b(?:{alternation})\b");
            let re = Regex::new(&pattern).map_err(|e| {
                Error::Config(format!("keyword matcher for {}: {e}", definition.theme))
            })?;
            Some(re)
        };

        Ok(Self {
            theme: definition.theme,
            phrases,
            keywords,
        })
    }

    /// Phrase match takes priority and is sufficient on its own; the
    /// keyword scan only runs when no phrase hits.
    pub(crate) fn matches(&self, lowercased_text: &str) -> bool {
        if let Some(phrases) = &self.phrases {
            if phrases.is_match(lowercased_text) {
                return true;
            }
        }

        self.keywords
            .as_ref()
            .is_some_and(|re| re.is_match(lowercased_text))
    }
}

/// Compiled catalog of all theme definitions, in evaluation order.
#[derive(Clone)]
pub struct ThemeCatalog {
    matchers: Vec<ThemeMatcher>,
}

impl ThemeCatalog {
    /// Compile a catalog from definitions. Definition order is the
    /// evaluation order.
    pub fn new(definitions: &[ThemeDefinition]) -> Result<Self> {
        let matchers = definitions
            .iter()
            .map(ThemeMatcher::compile)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { matchers })
    }

    /// The built-in production catalog, compiled once per process.
    pub fn builtin() -> &'static ThemeCatalog {
        static BUILTIN: Lazy<ThemeCatalog> = Lazy::new(|| {
            ThemeCatalog::new(&builtin_definitions())
                .expect("built-in theme catalog must compile")
        });
        &BUILTIN
    }

    pub(crate) fn matchers(&self) -> &[ThemeMatcher] {
        &self.matchers
    }
}

fn string_vec(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| (*w).to_string()).collect()
}

/// The production keyword/phrase tables.
pub fn builtin_definitions() -> Vec<ThemeDefinition> {
    vec![
        ThemeDefinition {
            theme: Theme::Comfort,
            keywords: string_vec(&[
                "light", "heavy", "fit", "fits", "fitting", "wearable", "comfortable",
                "uncomfortable", "weight", "weighs", "weighed", "feels", "feeling", "wear",
                "wearing",
            ]),
            phrases: string_vec(&[
                "easy to wear",
                "hard to wear",
                "comfortable to wear",
                "uncomfortable to wear",
                "feels good",
                "feels bad",
                "too heavy",
                "too light",
            ]),
        },
        ThemeDefinition {
            theme: Theme::Durability,
            keywords: string_vec(&[
                "broke",
                "broken",
                "break",
                "breaks",
                "strong",
                "strength",
                "quality",
                "fragile",
                "durable",
                "durability",
                "lasts",
                "lasting",
                "sturdy",
                "sturdiness",
                "weak",
                "weakness",
                "crack",
                "cracked",
                "damage",
                "damaged",
            ]),
            phrases: string_vec(&[
                "lasts long",
                "broke after",
                "high quality",
                "poor quality",
                "good quality",
                "bad quality",
                "falls apart",
                "well made",
            ]),
        },
        ThemeDefinition {
            theme: Theme::Appearance,
            keywords: string_vec(&[
                "shiny",
                "shine",
                "dull",
                "design",
                "designed",
                "polish",
                "polished",
                "beautiful",
                "elegant",
                "elegance",
                "ugly",
                "looks",
                "look",
                "appearance",
                "finish",
                "finished",
                "color",
                "colour",
                "sparkle",
                "sparkling",
            ]),
            phrases: string_vec(&[
                "looks good",
                "looks bad",
                "beautiful design",
                "nice finish",
                "poor finish",
                "elegant design",
                "ugly design",
            ]),
        },
    ]
}
