//! Language type: a registry-validated language handle.

use crate::i18n::{Direction, LanguageConfig, LanguageRegistry};
use std::fmt;

/// A validated language.
///
/// Only codes present in the registry can be turned into a `Language`, so
/// downstream code never has to re-check membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    code: &'static str,
}

impl Language {
    pub const PERSIAN: Language = Language { code: "fa" };
    pub const ENGLISH: Language = Language { code: "en" };
    pub const ARABIC: Language = Language { code: "ar" };
    pub const TURKISH: Language = Language { code: "tr" };

    /// Create a Language from a code, or `None` if the registry doesn't know it.
    pub fn from_code(code: &str) -> Option<Language> {
        LanguageRegistry::get()
            .get_by_code(code)
            .map(|config| Language { code: config.code })
    }

    /// Create a Language from its display name (surrounding whitespace ignored).
    pub fn from_name(name: &str) -> Option<Language> {
        LanguageRegistry::get()
            .get_by_name(name.trim())
            .map(|config| Language { code: config.code })
    }

    /// Look up `code`, falling back to the default language.
    pub fn resolve(code: &str) -> Language {
        Self::from_code(code).unwrap_or_default()
    }

    /// The default language (first registry entry).
    pub fn default_language() -> Language {
        Language {
            code: LanguageRegistry::get().default_language().code,
        }
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full language configuration from the registry.
    ///
    /// # Panics
    /// Panics if the code is not in the registry, which cannot happen for a
    /// `Language` built through this module.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    /// Display name shown in the language dropdown.
    pub fn name(&self) -> &'static str {
        self.config().name
    }

    pub fn direction(&self) -> Direction {
        self.config().direction
    }

    /// Whether this is the default language, which carries no URL prefix.
    pub fn is_default(&self) -> bool {
        *self == Self::default_language()
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::default_language()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}
