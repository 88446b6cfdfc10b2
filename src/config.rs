use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// What happens after a successful language switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SwitchMode {
    /// Full page reload; the next load bootstraps from the rewritten URL.
    #[default]
    Reload,
    /// Run the bootstrap sequence again without reloading.
    InPlace,
}

impl FromStr for SwitchMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reload" => Ok(SwitchMode::Reload),
            "in-place" | "inplace" => Ok(SwitchMode::InPlace),
            other => bail!("Invalid switch mode: '{}'. Expected reload or in-place", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    // Site
    pub site_base_url: String,
    pub translations_path: String,

    // Loader overlay
    pub loader_min_duration: Duration,

    // Preference storage
    pub preferences_file: PathBuf,

    // Switching
    pub switch_mode: SwitchMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site_base_url: "http://localhost:8080".to_string(),
            translations_path: "/translations.json".to_string(),
            loader_min_duration: crate::loader::MIN_DURATION,
            preferences_file: PathBuf::from("data/preferences.json"),
            switch_mode: SwitchMode::Reload,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            // Site
            site_base_url: std::env::var("SITE_BASE_URL").unwrap_or(defaults.site_base_url),
            translations_path: std::env::var("TRANSLATIONS_PATH")
                .unwrap_or(defaults.translations_path),

            // Loader overlay; can be lengthened but never below MIN_DURATION
            loader_min_duration: std::env::var("LOADER_MIN_DURATION_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .map(|d| d.max(crate::loader::MIN_DURATION))
                .unwrap_or(defaults.loader_min_duration),

            // Preference storage
            preferences_file: std::env::var("PREFERENCES_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.preferences_file),

            // Switching
            switch_mode: match std::env::var("SWITCH_MODE") {
                Ok(value) => value.parse().context("SWITCH_MODE is invalid")?,
                Err(_) => defaults.switch_mode,
            },
        })
    }

    /// Absolute URL of the translations document.
    pub fn translations_url(&self) -> String {
        format!(
            "{}/{}",
            self.site_base_url.trim_end_matches('/'),
            self.translations_path.trim_start_matches('/')
        )
    }
}
