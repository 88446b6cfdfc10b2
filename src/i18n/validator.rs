//! Translation table validation.
//!
//! Checks a loaded table for drift between languages: codes the registry
//! doesn't know, registry languages with no strings, pages or keys that exist
//! in one language but not another, and empty values (which the applier
//! treats as missing).

use crate::i18n::LanguageRegistry;
use crate::translations::TranslationStore;
use std::collections::BTreeSet;

/// Validation report containing errors and warnings about a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Problems that leave a language unusable
    pub errors: Vec<String>,

    /// Gaps that make some text fall back to the static page content
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for translation tables.
pub struct TranslationValidator;

impl TranslationValidator {
    /// Validate `store` against the language registry.
    ///
    /// Messages are emitted in a stable order (registry order, then sorted
    /// page and key names).
    pub fn validate(store: &TranslationStore) -> ValidationReport {
        let mut report = ValidationReport::new();
        let registry = LanguageRegistry::get();

        for code in store.languages() {
            if !registry.is_supported(code) {
                report
                    .errors
                    .push(format!("Unknown language '{}' in translations", code));
            }
        }

        let present: Vec<&str> = registry
            .codes()
            .into_iter()
            .filter(|code| {
                let found = store.pages(code).is_some();
                if !found {
                    report
                        .errors
                        .push(format!("No translations for language '{}'", code));
                }
                found
            })
            .collect();

        let all_pages: BTreeSet<&str> = present
            .iter()
            .filter_map(|code| store.pages(code))
            .flat_map(|pages| pages.keys().map(String::as_str))
            .collect();

        for page in all_pages {
            let entries: Vec<_> = present
                .iter()
                .map(|code| (*code, store.pages(code).and_then(|pages| pages.get(page))))
                .collect();

            for (code, entry) in &entries {
                if entry.is_none() {
                    report
                        .warnings
                        .push(format!("Page '{}' missing for language '{}'", page, code));
                }
            }

            let all_keys: BTreeSet<&str> = entries
                .iter()
                .filter_map(|(_, entry)| *entry)
                .flat_map(|entry| entry.keys())
                .collect();

            for (code, entry) in entries.iter().filter_map(|(c, e)| e.map(|e| (*c, e))) {
                for key in &all_keys {
                    match entry.get(key) {
                        None => report.warnings.push(format!(
                            "Key '{}' on page '{}' missing for language '{}'",
                            key, page, code
                        )),
                        Some("") => report.warnings.push(format!(
                            "Key '{}' on page '{}' is empty for language '{}'",
                            key, page, code
                        )),
                        Some(_) => {}
                    }
                }
            }
        }

        report
    }
}
