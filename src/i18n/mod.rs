//! Language registry and translation-table checks.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for supported languages, their display
//!   names and text direction. The first entry is the default language.
//! - `language`: `Language`, a `Copy` handle that can only hold registry codes
//! - `validator`: Consistency report over a loaded translation table
//!
//! # Example
//!
//! ```rust
//! use site_lang_switcher::i18n::{Direction, Language};
//!
//! let turkish = Language::from_code("tr").unwrap();
//! assert_eq!(turkish.direction(), Direction::Ltr);
//! assert_eq!(Language::resolve("xx"), Language::default_language());
//! ```

mod language;
mod registry;
mod validator;

pub use language::Language;
pub use registry::{Direction, LanguageConfig, LanguageRegistry};
pub use validator::{TranslationValidator, ValidationReport};
