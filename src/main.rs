//! Preview binary - runs the page bootstrap (and optionally a language switch)
//! against an in-memory page and prints the resulting document state.
//!
//! Usage:
//!   site-lang-switcher                        # Bootstrap "/"
//!   site-lang-switcher /en/contact            # Bootstrap a specific path
//!   site-lang-switcher /about --switch Türkçe # Bootstrap, then click a language
//!   site-lang-switcher --validate             # Check translations.json for gaps
//!
//! Environment (all optional):
//! - SITE_BASE_URL (defaults to http://localhost:8080)
//! - TRANSLATIONS_PATH (defaults to /translations.json)
//! - LOADER_MIN_DURATION_MS (defaults to 800)
//! - PREFERENCES_FILE (defaults to data/preferences.json)
//! - SWITCH_MODE (reload or in-place, defaults to reload)

use anyhow::{bail, Context, Result};
use site_lang_switcher::{
    config::Config,
    host::{MemoryDocument, MemoryLocation, MemoryOverlay},
    i18n::{Language, TranslationValidator},
    page::PageId,
    preferences::FilePreferences,
    translations::TranslationStore,
    SiteContext, SwitchOutcome,
};
use std::sync::Arc;
use tracing::{info, warn};

struct Args {
    path: String,
    switch_to: Option<String>,
    validate: bool,
}

fn parse_args() -> Result<Args> {
    let mut args = std::env::args().skip(1);
    let mut parsed = Args {
        path: "/".to_string(),
        switch_to: None,
        validate: false,
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--switch" => {
                parsed.switch_to = Some(args.next().context("--switch needs a language name")?);
            }
            "--validate" => parsed.validate = true,
            flag if flag.starts_with("--") => bail!("Unknown option: {}", flag),
            path => parsed.path = path.to_string(),
        }
    }

    Ok(parsed)
}

/// Page chrome every site page shares: nav links, the language label and
/// a few tagged elements.
fn site_page(page: PageId) -> MemoryDocument {
    let mut doc = MemoryDocument::new(page.as_str())
        .with_meta_description("")
        .with_language_label(Language::default_language().name())
        .with_element("navHome", "خانه")
        .with_element("navAbout", "درباره ما")
        .with_element("navProducts", "محصولات")
        .with_element("navContact", "تماس")
        .with_link("/")
        .with_link("https://www.instagram.com/");

    for target in PageId::ALL.iter().skip(1) {
        doc = doc.with_link(format!("/{}.html", target));
    }
    doc
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("site_lang_switcher=info".parse()?),
        )
        .init();

    let args = parse_args()?;
    let config = Config::from_env()?;
    let client = reqwest::Client::new();

    if args.validate {
        let url = config.translations_url();
        let store = TranslationStore::try_fetch(&client, &url)
            .await
            .with_context(|| format!("Failed to fetch {}", url))?;
        let report = TranslationValidator::validate(&store);

        for warning in &report.warnings {
            warn!("{}", warning);
        }
        if report.has_errors() {
            bail!("Translations are invalid:\n{}", report.errors.join("\n"));
        }
        info!("✓ Translations OK ({} warnings)", report.warnings.len());
        return Ok(());
    }

    let overlay = Arc::new(MemoryOverlay::new());
    let mut ctx = SiteContext::load(&config, &client, &args.path, overlay.clone()).await;
    let mut doc = site_page(ctx.page());
    let mut location = MemoryLocation::new(args.path.clone());
    let mut prefs = FilePreferences::open(&config.preferences_file);

    let outcome = ctx.bootstrap(&mut doc, &mut location, &mut prefs);
    info!(
        "Bootstrapped {} as {} ({} links rewritten, {} strings applied)",
        outcome.page,
        outcome.language,
        outcome.links_rewritten,
        outcome.applied.elements_updated
    );

    if let Some(label) = &args.switch_to {
        match ctx.switch_language(label, &mut doc, &mut location, &mut prefs) {
            SwitchOutcome::UnknownLabel => warn!("No language is labelled '{}'", label),
            SwitchOutcome::Unchanged(language) => info!("Already showing {}", language),
            SwitchOutcome::Reloaded(language) => {
                info!("Switched to {}, page would reload", language)
            }
            SwitchOutcome::Reapplied(outcome) => {
                info!("Switched to {} in place", outcome.language)
            }
        }
    }

    ctx.loader_mut().wait().await;

    let state = serde_json::json!({
        "location": location,
        "document": doc,
        "overlayVisible": overlay.is_visible(),
        "preferencesFile": prefs.path(),
    });
    println!("{}", serde_json::to_string_pretty(&state)?);

    Ok(())
}
