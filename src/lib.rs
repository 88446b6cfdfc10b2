//! Language switching for static multi-page sites.
//!
//! The active language lives in the URL prefix (`/en/about`; the default
//! language has none), is mirrored into client storage, and drives link
//! rewriting and translation of tagged page text.

pub mod applier;
pub mod config;
pub mod error;
pub mod host;
pub mod i18n;
pub mod links;
pub mod loader;
pub mod page;
pub mod preferences;
pub mod switcher;
pub mod translations;
pub mod url_codec;

pub use error::{LangSwitchError, Result};
pub use switcher::{BootstrapOutcome, SiteContext, SwitchOutcome};
