//! Language registry: Single source of truth for all supported site languages.
//!
//! The registry is ordered; its first entry is the default language, which is
//! never represented by a URL prefix. It uses a singleton pattern with
//! `OnceLock` so every component sees the same immutable set.

use std::fmt;
use std::sync::OnceLock;

/// Text flow of a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Direction {
    /// Value for the document's `dir` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for a supported language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// Short language code used in URLs and storage (e.g., "fa", "en")
    pub code: &'static str,

    /// Display name shown in the language dropdown, in the language itself
    pub name: &'static str,

    /// Text direction applied to the document root
    pub direction: Direction,
}

/// Global language registry singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its code.
    ///
    /// # Returns
    /// * `Some(&LanguageConfig)` if the language exists
    /// * `None` if the code is unknown
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Get a language configuration by its display name.
    ///
    /// Used to map a clicked dropdown label back to a code. If two languages
    /// ever shared a display name the first one would win.
    pub fn get_by_name(&self, name: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.name == name)
    }

    /// Get all languages in registry order.
    pub fn list_all(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().collect()
    }

    /// All language codes in registry order.
    pub fn codes(&self) -> Vec<&'static str> {
        self.languages.iter().map(|lang| lang.code).collect()
    }

    /// The default language (first registry entry).
    pub fn default_language(&self) -> &LanguageConfig {
        &self.languages[0]
    }

    /// Check if a language code is supported.
    pub fn is_supported(&self, code: &str) -> bool {
        self.get_by_code(code).is_some()
    }
}

/// Default language configurations.
///
/// Persian is first and therefore the default.
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "fa",
            name: "فارسی",
            direction: Direction::Rtl,
        },
        LanguageConfig {
            code: "en",
            name: "English",
            direction: Direction::Ltr,
        },
        LanguageConfig {
            code: "ar",
            name: "العربية",
            direction: Direction::Rtl,
        },
        LanguageConfig {
            code: "tr",
            name: "Türkçe",
            direction: Direction::Ltr,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_get_returns_singleton() {
        let registry1 = LanguageRegistry::get();
        let registry2 = LanguageRegistry::get();

        assert!(std::ptr::eq(registry1, registry2));
    }

    #[test]
    fn test_get_by_code_persian() {
        let config = LanguageRegistry::get()
            .get_by_code("fa")
            .expect("fa should be registered");

        assert_eq!(config.name, "فارسی");
        assert_eq!(config.direction, Direction::Rtl);
    }

    #[test]
    fn test_get_by_code_nonexistent() {
        assert!(LanguageRegistry::get().get_by_code("de").is_none());
        assert!(LanguageRegistry::get().get_by_code("").is_none());
    }

    #[test]
    fn test_get_by_name() {
        let registry = LanguageRegistry::get();
        assert_eq!(registry.get_by_name("Türkçe").unwrap().code, "tr");
        assert_eq!(registry.get_by_name("العربية").unwrap().code, "ar");
        assert!(registry.get_by_name("english").is_none());
    }

    #[test]
    fn test_default_language_is_first_entry() {
        let registry = LanguageRegistry::get();
        assert_eq!(registry.default_language().code, "fa");
        assert_eq!(registry.codes()[0], "fa");
    }

    #[test]
    fn test_codes_in_order() {
        assert_eq!(LanguageRegistry::get().codes(), vec!["fa", "en", "ar", "tr"]);
    }

    #[test]
    fn test_list_all_matches_codes() {
        let registry = LanguageRegistry::get();
        let listed: Vec<&str> = registry.list_all().iter().map(|lang| lang.code).collect();

        assert_eq!(listed, registry.codes());
        assert_eq!(registry.list_all()[2].direction, Direction::Rtl);
    }

    #[test]
    fn test_codes_are_unique() {
        let codes = LanguageRegistry::get().codes();
        let mut deduped = codes.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(codes.len(), deduped.len());
    }

    #[test]
    fn test_is_supported() {
        let registry = LanguageRegistry::get();
        assert!(registry.is_supported("en"));
        assert!(!registry.is_supported("EN"));
    }

    #[test]
    fn test_direction_strings() {
        assert_eq!(Direction::Ltr.as_str(), "ltr");
        assert_eq!(Direction::Rtl.to_string(), "rtl");
    }
}
