//! Localization resolver for the bilingual directory.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for the supported display languages
//! - `language`: Validated `Language` selector (Spanish / Basque)
//! - `strings`: Enum labels and UI strings per language
//! - `validator`: Completeness checks over every language bundle
//!
//! Entry-level bilingual fields (`description`, `features`) are resolved on the
//! entry itself through `Localized::get`, not through this module.
//!
//! # Example
//!
//! ```rust,ignore
//! use edu_app_directory::catalog::Category;
//! use edu_app_directory::i18n::Language;
//!
//! let basque = Language::from_code("eu")?;
//! let label = basque.strings().category_label(Category::Assessment);
//! ```

mod language;
mod registry;
mod strings;
mod validator;

pub use language::Language;
pub use registry::{LanguageConfig, LanguageRegistry};
pub use strings::{AudienceLabels, CategoryLabels, LanguageStrings, PriceLabels, StageLabels};
pub use validator::{TranslationValidator, ValidationReport};
