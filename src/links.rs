//! Link rewriter: keeps site-internal anchors on the active language.

use crate::host::Document;
use crate::i18n::{Language, LanguageRegistry};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

// Built from the registry so adding a language needs no edit here
static LANGUAGE_PREFIX_REGEX: OnceLock<Regex> = OnceLock::new();

fn language_prefix_regex() -> &'static Regex {
    LANGUAGE_PREFIX_REGEX.get_or_init(|| {
        let alternation = LanguageRegistry::get()
            .codes()
            .into_iter()
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!("^/(?:{})(?:/|$)", alternation))
            .expect("language prefix pattern is valid")
    })
}

fn root_href(language: Language) -> String {
    if language.is_default() {
        "/".to_string()
    } else {
        format!("/{}", language.code())
    }
}

/// Rewrite one href for `language`.
///
/// Returns `None` for hrefs that are not site-absolute (`https://…`, `#top`,
/// `mailto:`, relative paths, protocol-relative `//host/…`); those are left
/// alone.
pub fn rewrite_href(href: &str, language: Language) -> Option<String> {
    if !href.starts_with('/') || href.starts_with("//") {
        return None;
    }

    if href == "/" {
        return Some(root_href(language));
    }

    let unprefixed = language_prefix_regex().replace(href, "/");
    let path = unprefixed.strip_suffix(".html").unwrap_or(&unprefixed);

    // A bare language link such as "/en" is a link to the home page
    if path == "/" || path.is_empty() {
        return Some(root_href(language));
    }

    if language.is_default() {
        Some(path.to_string())
    } else {
        Some(format!("/{}{}", language.code(), path))
    }
}

/// Rewrite every site-absolute anchor in `doc`. Returns how many were touched.
pub fn rewrite_links(doc: &mut impl Document, language: Language) -> usize {
    let mut rewritten = 0;

    for (id, href) in doc.anchors() {
        if let Some(new_href) = rewrite_href(&href, language) {
            doc.set_anchor_href(id, &new_href);
            rewritten += 1;
        }
    }

    debug!("Rewrote {} links for language {}", rewritten, language);
    rewritten
}
