//! URL language codec: reads and writes the language prefix of a path.
//!
//! The default language never appears as a prefix, every other language does:
//! `/about` is Persian, `/en/about` is English.

use crate::i18n::{Language, LanguageRegistry};

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

/// Language encoded in `path`.
///
/// The first non-empty segment is taken as a candidate code; anything that is
/// not a registry code (including no segment at all) means the default.
pub fn decode(path: &str) -> Language {
    segments(path)
        .next()
        .and_then(Language::from_code)
        .unwrap_or_default()
}

/// Rewrite `path` so that it carries `language`'s prefix.
///
/// A leading segment naming any known language is replaced. Empty segments
/// are dropped, so the result never has a trailing slash except for the bare
/// root. Encoding is idempotent.
pub fn encode(path: &str, language: Language) -> String {
    let registry = LanguageRegistry::get();
    let mut parts: Vec<&str> = segments(path).collect();

    if parts
        .first()
        .is_some_and(|first| registry.is_supported(first))
    {
        parts.remove(0);
    }

    if !language.is_default() {
        parts.insert(0, language.code());
    }

    format!("/{}", parts.join("/"))
}
