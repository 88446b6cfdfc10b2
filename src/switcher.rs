//! Page bootstrap and language switching.
//!
//! Everything a page needs lives in [`SiteContext`], built once per load and
//! handed the host surfaces on each call.

use crate::applier::{apply_translations, ApplyReport};
use crate::config::{Config, SwitchMode};
use crate::host::{Document, Location, Overlay};
use crate::i18n::Language;
use crate::links::rewrite_links;
use crate::loader::LoaderGate;
use crate::page::PageId;
use crate::preferences::{save_language, stored_language, PreferenceStore, SELECTED_LANGUAGE_KEY};
use crate::translations::TranslationStore;
use crate::url_codec;
use std::sync::Arc;
use tracing::{debug, info};

/// Result of [`SiteContext::bootstrap`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapOutcome {
    pub language: Language,
    pub page: PageId,
    /// Whether the address bar was rewritten to match `language`
    pub url_rewritten: bool,
    pub links_rewritten: usize,
    pub applied: ApplyReport,
}

/// Result of [`SiteContext::switch_language`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// The clicked label matched no registered language
    UnknownLabel,
    /// Already the stored language; only the dropdown was closed
    Unchanged(Language),
    /// Switched, then a full reload was requested
    Reloaded(Language),
    /// Switched and bootstrapped again in place
    Reapplied(BootstrapOutcome),
}

/// Effective language for a page load: the URL's language if its decoded code
/// is supported, else the stored preference, else the default.
///
/// Decoding already maps a missing or unknown prefix to the default language,
/// so an unprefixed URL resolves to the default even when another language is
/// stored.
pub fn resolve_language(path: &str, stored: Option<Language>) -> Language {
    let decoded = url_codec::decode(path);
    Language::from_code(decoded.code())
        .or(stored)
        .unwrap_or_default()
}

/// Set the root `dir` and `lang` attributes.
pub fn set_document_language(doc: &mut impl Document, language: Language) {
    doc.set_root_attribute("dir", language.direction().as_str());
    doc.set_root_attribute("lang", language.code());
}

/// Click on the dropdown toggle.
pub fn toggle_dropdown(doc: &mut impl Document) {
    let open = !doc.is_dropdown_open();
    doc.set_dropdown_open(open);
}

/// Click anywhere on the page; anything outside the toggle closes the list.
pub fn handle_document_click(doc: &mut impl Document, inside_toggle: bool) {
    if !inside_toggle {
        doc.set_dropdown_open(false);
    }
}

/// Per-page state: loaded translations, page identity and the loader gate.
#[derive(Debug)]
pub struct SiteContext {
    translations: TranslationStore,
    page: PageId,
    loader: LoaderGate,
    switch_mode: SwitchMode,
}

impl SiteContext {
    pub fn new(
        translations: TranslationStore,
        page: PageId,
        loader: LoaderGate,
        switch_mode: SwitchMode,
    ) -> Self {
        Self {
            translations,
            page,
            loader,
            switch_mode,
        }
    }

    /// Fetch translations and derive the page from `path`.
    ///
    /// A failed fetch yields an empty table; the page still bootstraps.
    pub async fn load(
        config: &Config,
        client: &reqwest::Client,
        path: &str,
        overlay: Arc<dyn Overlay>,
    ) -> Self {
        let translations = TranslationStore::load(client, &config.translations_url()).await;
        let page = PageId::from_path(path);
        info!("Page name: {}", page);

        Self::new(
            translations,
            page,
            LoaderGate::new(overlay, config.loader_min_duration),
            config.switch_mode,
        )
    }

    pub fn page(&self) -> PageId {
        self.page
    }

    pub fn translations(&self) -> &TranslationStore {
        &self.translations
    }

    pub fn loader_mut(&mut self) -> &mut LoaderGate {
        &mut self.loader
    }

    /// Page-load sequence.
    ///
    /// Resolves the language, sets `dir`/`lang`, persists the choice,
    /// reconciles the URL, rewrites links and applies translations behind the
    /// loader gate. Called outside a tokio runtime, the loader hides at once
    /// instead of waiting out its minimum.
    pub fn bootstrap(
        &mut self,
        doc: &mut impl Document,
        location: &mut impl Location,
        prefs: &mut impl PreferenceStore,
    ) -> BootstrapOutcome {
        let path = location.path();
        let url_language = url_codec::decode(&path);
        let language = resolve_language(&path, stored_language(&*prefs));
        info!("Final language: {}", language);

        set_document_language(doc, language);
        save_language(prefs, language);

        let url_rewritten = url_language != language;
        if url_rewritten {
            location.replace_path(&url_codec::encode(&path, language));
        }

        let links_rewritten = rewrite_links(doc, language);

        let translations = &self.translations;
        let page = self.page;
        let applied = self
            .loader
            .run(|| apply_translations(doc, translations, page, language));

        BootstrapOutcome {
            language,
            page,
            url_rewritten,
            links_rewritten,
            applied,
        }
    }

    /// Handle a click on a language option whose visible text is `label`.
    pub fn switch_language(
        &mut self,
        label: &str,
        doc: &mut impl Document,
        location: &mut impl Location,
        prefs: &mut impl PreferenceStore,
    ) -> SwitchOutcome {
        self.loader.hold();

        let Some(language) = Language::from_name(label) else {
            debug!("Ignoring click on unknown language label '{}'", label.trim());
            return SwitchOutcome::UnknownLabel;
        };

        let previous = prefs
            .get(SELECTED_LANGUAGE_KEY)
            .filter(|code| !code.is_empty())
            .unwrap_or_else(|| Language::default_language().code().to_string());

        if language.code() == previous {
            doc.set_dropdown_open(false);
            return SwitchOutcome::Unchanged(language);
        }

        info!("Switching language {} -> {}", previous, language);

        set_document_language(doc, language);
        save_language(prefs, language);
        doc.set_dropdown_open(false);

        let path = location.path();
        location.replace_path(&url_codec::encode(&path, language));
        rewrite_links(doc, language);
        apply_translations(doc, &self.translations, self.page, language);

        match self.switch_mode {
            SwitchMode::Reload => {
                location.reload();
                SwitchOutcome::Reloaded(language)
            }
            SwitchMode::InPlace => SwitchOutcome::Reapplied(self.bootstrap(doc, location, prefs)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{MemoryDocument, MemoryLocation, MemoryOverlay};
    use crate::loader::MIN_DURATION;
    use crate::preferences::MemoryPreferences;

    const TABLE: &str = r#"{
        "fa": { "contact": { "pageTitle": "تماس", "cta": "پیام بدهید" } },
        "en": { "contact": { "pageTitle": "Contact", "cta": "Write to us" } },
        "tr": { "contact": { "pageTitle": "İletişim", "cta": "Bize yazın" } }
    }"#;

    fn context(page: PageId, mode: SwitchMode) -> (SiteContext, Arc<MemoryOverlay>) {
        let overlay = Arc::new(MemoryOverlay::new());
        let ctx = SiteContext::new(
            TranslationStore::from_json(TABLE).unwrap(),
            page,
            LoaderGate::new(overlay.clone(), MIN_DURATION),
            mode,
        );
        (ctx, overlay)
    }

    fn document() -> MemoryDocument {
        MemoryDocument::new("تماس")
            .with_element("cta", "پیام بدهید")
            .with_link("/")
            .with_link("/contact.html")
            .with_language_label("فارسی")
    }

    // ==================== resolve_language Tests ====================

    #[test]
    fn test_resolve_prefers_url() {
        assert_eq!(resolve_language("/tr/contact", None), Language::TURKISH);
        assert_eq!(
            resolve_language("/tr/contact", Some(Language::ARABIC)),
            Language::TURKISH
        );
    }

    #[test]
    fn test_resolve_unprefixed_url_wins_over_stored() {
        assert_eq!(resolve_language("/", Some(Language::ARABIC)), Language::PERSIAN);
        assert_eq!(resolve_language("/xx/about", None), Language::PERSIAN);
    }

    // ==================== Dropdown Tests ====================

    #[test]
    fn test_toggle_and_outside_click() {
        let mut doc = document();
        toggle_dropdown(&mut doc);
        assert!(doc.dropdown_open);

        handle_document_click(&mut doc, true);
        assert!(doc.dropdown_open);

        handle_document_click(&mut doc, false);
        assert!(!doc.dropdown_open);

        toggle_dropdown(&mut doc);
        toggle_dropdown(&mut doc);
        assert!(!doc.dropdown_open);
    }

    // ==================== Bootstrap Tests ====================

    #[tokio::test(start_paused = true)]
    async fn test_bootstrap_prefixed_url() {
        let (mut ctx, overlay) = context(PageId::Contact, SwitchMode::Reload);
        let mut doc = document();
        let mut location = MemoryLocation::new("/tr/contact");
        let mut prefs = MemoryPreferences::new();

        let outcome = ctx.bootstrap(&mut doc, &mut location, &mut prefs);

        assert_eq!(outcome.language, Language::TURKISH);
        assert!(!outcome.url_rewritten);
        assert_eq!(outcome.links_rewritten, 2);
        assert_eq!(doc.dir.as_deref(), Some("ltr"));
        assert_eq!(doc.lang.as_deref(), Some("tr"));
        assert_eq!(stored_language(&prefs), Some(Language::TURKISH));
        assert_eq!(doc.links, vec!["/tr", "/tr/contact"]);
        assert_eq!(doc.title, "İletişim");
        assert_eq!(doc.language_label.as_deref(), Some("Türkçe"));
        assert!(location.replaced.is_empty());

        assert!(overlay.is_visible());
        ctx.loader_mut().wait().await;
        assert!(!overlay.is_visible());
    }

    #[test]
    fn test_bootstrap_outside_runtime() {
        let (mut ctx, overlay) = context(PageId::Contact, SwitchMode::Reload);
        let mut doc = document();
        let mut location = MemoryLocation::new("/en/contact");
        let mut prefs = MemoryPreferences::new();

        let outcome = ctx.bootstrap(&mut doc, &mut location, &mut prefs);

        assert_eq!(outcome.language, Language::ENGLISH);
        assert_eq!(doc.title, "Contact");
        assert_eq!(overlay.show_count(), 1);
        assert!(!overlay.is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn test_bootstrap_root_ignores_stored_preference() {
        let (mut ctx, _) = context(PageId::Home, SwitchMode::Reload);
        let mut doc = document();
        let mut location = MemoryLocation::new("/");
        let mut prefs = MemoryPreferences::new().with(SELECTED_LANGUAGE_KEY, "ar");

        let outcome = ctx.bootstrap(&mut doc, &mut location, &mut prefs);

        assert_eq!(outcome.language, Language::PERSIAN);
        assert_eq!(doc.dir.as_deref(), Some("rtl"));
        assert_eq!(prefs.get(SELECTED_LANGUAGE_KEY).as_deref(), Some("fa"));
        assert!(!outcome.applied.page_found);
    }

    // ==================== Switch Tests ====================

    #[tokio::test(start_paused = true)]
    async fn test_switch_to_current_language_only_closes_dropdown() {
        let (mut ctx, _) = context(PageId::Contact, SwitchMode::Reload);
        let mut doc = document();
        doc.dropdown_open = true;
        let mut location = MemoryLocation::new("/en/contact");
        let mut prefs = MemoryPreferences::new().with(SELECTED_LANGUAGE_KEY, "en");

        let outcome = ctx.switch_language("English", &mut doc, &mut location, &mut prefs);

        assert_eq!(outcome, SwitchOutcome::Unchanged(Language::ENGLISH));
        assert!(!doc.dropdown_open);
        assert!(location.replaced.is_empty());
        assert_eq!(location.reloads, 0);
        assert_eq!(doc.lang, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_stored_preference_counts_as_default() {
        let (mut ctx, _) = context(PageId::Contact, SwitchMode::Reload);
        let mut doc = document();
        let mut location = MemoryLocation::new("/contact");
        let mut prefs = MemoryPreferences::new().with(SELECTED_LANGUAGE_KEY, "");

        let outcome = ctx.switch_language("فارسی", &mut doc, &mut location, &mut prefs);

        assert_eq!(outcome, SwitchOutcome::Unchanged(Language::PERSIAN));
        assert_eq!(location.reloads, 0);
        assert!(location.replaced.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_switch_unknown_label_is_ignored() {
        let (mut ctx, overlay) = context(PageId::Contact, SwitchMode::Reload);
        let mut doc = document();
        doc.dropdown_open = true;
        let mut location = MemoryLocation::new("/contact");
        let mut prefs = MemoryPreferences::new();

        let outcome = ctx.switch_language("Deutsch", &mut doc, &mut location, &mut prefs);

        assert_eq!(outcome, SwitchOutcome::UnknownLabel);
        assert!(doc.dropdown_open);
        assert_eq!(prefs.get(SELECTED_LANGUAGE_KEY), None);

        // The overlay still runs its full minimum
        assert!(overlay.is_visible());
        ctx.loader_mut().wait().await;
        assert!(!overlay.is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn test_switch_with_reload() {
        let (mut ctx, _) = context(PageId::Contact, SwitchMode::Reload);
        let mut doc = document();
        doc.dropdown_open = true;
        let mut location = MemoryLocation::new("/contact");
        let mut prefs = MemoryPreferences::new().with(SELECTED_LANGUAGE_KEY, "fa");

        let outcome = ctx.switch_language(" English ", &mut doc, &mut location, &mut prefs);

        assert_eq!(outcome, SwitchOutcome::Reloaded(Language::ENGLISH));
        assert_eq!(location.path, "/en/contact");
        assert_eq!(location.reloads, 1);
        assert_eq!(doc.dir.as_deref(), Some("ltr"));
        assert_eq!(doc.element_text("cta"), Some("Write to us"));
        assert_eq!(doc.links, vec!["/en", "/en/contact"]);
        assert!(!doc.dropdown_open);
        assert_eq!(stored_language(&prefs), Some(Language::ENGLISH));
    }

    #[tokio::test(start_paused = true)]
    async fn test_switch_in_place_rebootstraps() {
        let (mut ctx, _) = context(PageId::Contact, SwitchMode::InPlace);
        let mut doc = document();
        let mut location = MemoryLocation::new("/en/contact");
        let mut prefs = MemoryPreferences::new().with(SELECTED_LANGUAGE_KEY, "en");

        let outcome = ctx.switch_language("فارسی", &mut doc, &mut location, &mut prefs);

        let SwitchOutcome::Reapplied(bootstrap) = outcome else {
            panic!("expected in-place bootstrap, got {:?}", outcome);
        };
        assert_eq!(bootstrap.language, Language::PERSIAN);
        assert!(!bootstrap.url_rewritten);
        assert_eq!(location.path, "/contact");
        assert_eq!(location.reloads, 0);
        assert_eq!(doc.links, vec!["/", "/contact"]);
        assert_eq!(doc.title, "تماس");
    }
}
