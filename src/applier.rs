//! Translation applier: writes resolved strings into the document.

use crate::host::Document;
use crate::i18n::Language;
use crate::page::PageId;
use crate::translations::TranslationStore;
use tracing::debug;

/// What [`apply_translations`] changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Whether the table had an entry for this language and page
    pub page_found: bool,
    pub title_updated: bool,
    pub description_updated: bool,
    pub elements_updated: usize,
    /// Tagged elements left untouched because their key had no value
    pub elements_missing: usize,
}

/// Apply `language`'s strings for `page`.
///
/// Without a table entry no text is substituted. Missing or empty keys keep
/// the element's current text. The language label is updated regardless.
pub fn apply_translations(
    doc: &mut impl Document,
    store: &TranslationStore,
    page: PageId,
    language: Language,
) -> ApplyReport {
    let mut report = ApplyReport::default();

    if let Some(entry) = store.page_entry(language, page) {
        report.page_found = true;

        if let Some(title) = entry.title() {
            doc.set_title(title);
            report.title_updated = true;
        }

        if let Some(description) = entry.description() {
            report.description_updated = doc.set_meta_description(description);
        }

        for (id, key) in doc.localizable_elements() {
            match entry.get_non_empty(&key) {
                Some(text) => {
                    doc.set_element_text(id, text);
                    report.elements_updated += 1;
                }
                None => report.elements_missing += 1,
            }
        }
    } else {
        debug!("No translations for {}/{}", language, page);
    }

    doc.set_language_label(language.name());

    debug!(
        "Applied {} translations for {}/{} ({} missing)",
        report.elements_updated, language, page, report.elements_missing
    );
    report
}
