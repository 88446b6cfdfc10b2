//! Translation store: `language → page → key → string`, loaded once per page.
//!
//! Loading never fails from the caller's point of view. A transport error, a
//! non-success status or malformed JSON is logged and leaves the store empty,
//! so every later lookup quietly finds nothing and the page keeps its static
//! text.

use crate::error::{LangSwitchError, Result};
use crate::i18n::Language;
use crate::page::PageId;
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::{debug, error, info};

/// Reserved key holding the document title.
pub const PAGE_TITLE_KEY: &str = "pageTitle";
/// Reserved key holding the meta description.
pub const PAGE_DESCRIPTION_KEY: &str = "pageDescription";

/// Localized strings for one page in one language.
///
/// Values that are not JSON strings are dropped while deserializing instead of
/// rejecting the whole table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "BTreeMap<String, Value>")]
pub struct PageEntry {
    strings: BTreeMap<String, String>,
}

impl From<BTreeMap<String, Value>> for PageEntry {
    fn from(raw: BTreeMap<String, Value>) -> Self {
        let strings = raw
            .into_iter()
            .filter_map(|(key, value)| match value {
                Value::String(s) => Some((key, s)),
                _ => None,
            })
            .collect();
        Self { strings }
    }
}

impl PageEntry {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.strings.get(key).map(String::as_str)
    }

    /// Non-empty value for `key`. Empty strings count as missing.
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|s| !s.is_empty())
    }

    pub fn title(&self) -> Option<&str> {
        self.get_non_empty(PAGE_TITLE_KEY)
    }

    pub fn description(&self) -> Option<&str> {
        self.get_non_empty(PAGE_DESCRIPTION_KEY)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.strings.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PageEntry {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            strings: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Page name → entry, for one language.
pub type PageTranslations = HashMap<String, PageEntry>;

/// Language code → pages, exactly as published in `translations.json`.
pub type TranslationTable = HashMap<String, PageTranslations>;

/// In-memory translation table.
#[derive(Debug, Clone, Default)]
pub struct TranslationStore {
    table: TranslationTable,
}

impl TranslationStore {
    /// An empty store; every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a translations document.
    ///
    /// The document itself must be a JSON object. Below that, language or page
    /// values that are not objects (a `"version"` field, a `"_comment"`) are
    /// skipped so the rest of the table still loads.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, Value> = serde_json::from_str(json)?;
        let mut table = TranslationTable::new();

        for (code, pages) in raw {
            let Value::Object(pages) = pages else {
                debug!("Skipping non-object translations entry '{}'", code);
                continue;
            };

            let mut entries = PageTranslations::new();
            for (page, entry) in pages {
                if !entry.is_object() {
                    debug!("Skipping non-object page '{}' for '{}'", page, code);
                    continue;
                }
                entries.insert(page, serde_json::from_value(entry)?);
            }
            table.insert(code, entries);
        }

        Ok(Self { table })
    }

    /// Fetch the table from `url`, returning the typed error on failure.
    pub async fn try_fetch(client: &reqwest::Client, url: &str) -> Result<Self> {
        let response = client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LangSwitchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        Self::from_json(&body)
    }

    /// Fetch the table from `url`; on any failure log it and return an empty store.
    ///
    /// There is no retry. Callers await this before applying translations.
    pub async fn load(client: &reqwest::Client, url: &str) -> Self {
        match Self::try_fetch(client, url).await {
            Ok(store) => {
                info!(
                    "Loaded translations for {} languages from {}",
                    store.table.len(),
                    url
                );
                store
            }
            Err(e) => {
                error!("Failed to load translations: {}", e);
                Self::empty()
            }
        }
    }

    /// Read the table from a local file, degrading to empty like [`Self::load`].
    pub async fn load_from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let result = match tokio::fs::read_to_string(path).await {
            Ok(content) => Self::from_json(&content),
            Err(e) => Err(LangSwitchError::from(e)),
        };

        match result {
            Ok(store) => {
                debug!("Loaded translations from {}", path.display());
                store
            }
            Err(e) => {
                error!("Failed to load translations from {}: {}", path.display(), e);
                Self::empty()
            }
        }
    }

    /// Entry for `page` in `language`, if the table has one.
    pub fn page_entry(&self, language: Language, page: PageId) -> Option<&PageEntry> {
        self.table
            .get(language.code())
            .and_then(|pages| pages.get(page.as_str()))
    }

    /// Language codes present in the table (sorted, may include unknown codes).
    pub fn languages(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.table.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    /// Pages published for a raw language code.
    pub fn pages(&self, code: &str) -> Option<&PageTranslations> {
        self.table.get(code)
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
