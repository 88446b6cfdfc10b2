use thiserror::Error;

/// Errors raised while loading translations.
///
/// Most of the switcher degrades silently (unknown codes fall back to the
/// default language, missing keys are skipped), so these only surface from
/// the few operations that can genuinely fail.
#[derive(Debug, Error)]
pub enum LangSwitchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("invalid translations JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LangSwitchError>;
