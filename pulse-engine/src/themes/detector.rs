//! Multi-label theme detection.

use tracing::debug;

use super::catalog::{Theme, ThemeCatalog};

/// Theme detector over an injected catalog.
///
/// Themes are evaluated independently in catalog order; a review may
/// carry several. A review matching nothing is tagged `Other`, so the
/// returned set is never empty. Detection never fails.
#[derive(Clone)]
pub struct ThemeDetector {
    catalog: ThemeCatalog,
}

impl ThemeDetector {
    /// Create a detector over the built-in catalog.
    pub fn new() -> Self {
        Self {
            catalog: ThemeCatalog::builtin().clone(),
        }
    }

    /// Create a detector over a substitute catalog.
    pub fn with_catalog(catalog: ThemeCatalog) -> Self {
        Self { catalog }
    }

    /// Detect all themes present in the review text.
    pub fn detect(&self, text: &str) -> Vec<Theme> {
        let lowercased = text.to_lowercase();

        let mut detected: Vec<Theme> = self
            .catalog
            .matchers()
            .iter()
            .filter(|matcher| matcher.matches(&lowercased))
            .map(|matcher| matcher.theme)
            .collect();

        if detected.is_empty() {
            detected.push(Theme::Other);
        }

        debug!(themes = ?detected, "detected themes");
        detected
    }
}

impl Default for ThemeDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> ThemeDetector {
        ThemeDetector::new()
    }

    #[test]
    fn test_comfort_theme() {
        let themes = detector().detect("The ring feels heavy and uncomfortable");
        assert!(themes.contains(&Theme::Comfort));
    }

    #[test]
    fn test_durability_theme() {
        let themes = detector().detect("The bracelet broke after a week. Poor quality.");
        assert!(themes.contains(&Theme::Durability));
    }

    #[test]
    fn test_appearance_theme() {
        let themes = detector().detect("Beautiful design and shiny finish");
        assert!(themes.contains(&Theme::Appearance));
    }

    #[test]
    fn test_multiple_themes() {
        let themes =
            detector().detect("Love the elegant design but it feels heavy and broke quickly");
        assert!(themes.contains(&Theme::Comfort));
        assert!(themes.contains(&Theme::Durability));
        assert!(themes.contains(&Theme::Appearance));
    }

    #[test]
    fn test_fallback_is_exactly_other() {
        let themes = detector().detect("This is a generic comment");
        assert_eq!(themes, vec![Theme::Other]);
    }

    #[test]
    fn test_never_empty() {
        for text in ["", "   ", "xyzzy"] {
            assert!(!detector().detect(text).is_empty());
        }
    }

    #[test]
    fn test_phrase_match_suffices_without_keyword() {
        // "too heavy" is a Comfort phrase; "heavyish" defeats the keyword
        // word-boundary match, so only the phrase assigns the theme.
        let themes = detector().detect("it was too heavyish for me");
        assert!(themes.contains(&Theme::Comfort));
    }

    #[test]
    fn test_substitute_catalog() {
        use super::super::catalog::ThemeDefinition;

        let catalog = ThemeCatalog::new(&[ThemeDefinition {
            theme: Theme::Durability,
            keywords: vec!["rust".to_string()],
            phrases: vec![],
        }])
        .unwrap();
        let detector = ThemeDetector::with_catalog(catalog);

        assert_eq!(detector.detect("rust spots everywhere"), vec![Theme::Durability]);
        assert_eq!(detector.detect("feels heavy"), vec![Theme::Other]);
    }

    #[test]
    fn test_phrase_match_case_insensitive() {
        let themes = detector().detect("FEELS GOOD on the wrist");
        assert!(themes.contains(&Theme::Comfort));
    }
}
