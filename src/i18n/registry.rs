//! Language registry: Single source of truth for all supported display languages.
//!
//! The directory is bilingual. Every catalog entry carries its description and
//! feature list in each language listed here, and every enum label has a
//! translation in each `LanguageStrings` bundle. The registry is a `OnceLock`
//! singleton and is immutable after first access.

use super::strings::{BASQUE_STRINGS, SPANISH_STRINGS};
use super::LanguageStrings;
use std::sync::OnceLock;

/// Configuration for a supported language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// ISO 639-1 language code (e.g., "es", "eu")
    pub code: &'static str,

    /// English name of the language (e.g., "Spanish", "Basque")
    pub name: &'static str,

    /// Native name of the language (e.g., "Español", "Euskara")
    pub native_name: &'static str,

    /// Whether this is the default display language (only one should be true)
    pub is_canonical: bool,

    /// Labels and UI strings shown when this language is active
    pub strings: &'static LanguageStrings,
}

/// Global language registry singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its code.
    ///
    /// Codes are matched case-insensitively so `"EU"` and `"eu"` resolve to
    /// the same entry.
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages
            .iter()
            .find(|lang| lang.code.eq_ignore_ascii_case(code))
    }

    /// Get all supported languages, in selector order.
    pub fn list_all(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().collect()
    }

    /// Get the canonical (default) language configuration.
    ///
    /// # Panics
    /// Panics if the registry does not define exactly one canonical language.
    /// This is a configuration error caught by the unit tests below.
    pub fn canonical(&self) -> &LanguageConfig {
        let canonical_langs: Vec<_> = self
            .languages
            .iter()
            .filter(|lang| lang.is_canonical)
            .collect();

        match canonical_langs.len() {
            0 => panic!("No canonical language found in registry"),
            1 => canonical_langs[0],
            _ => panic!("Multiple canonical languages found in registry"),
        }
    }

    /// Check if a language code is supported.
    pub fn is_supported(&self, code: &str) -> bool {
        self.get_by_code(code).is_some()
    }
}

/// The two display languages of the directory: Spanish (default) and Basque.
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "es",
            name: "Spanish",
            native_name: "Español",
            is_canonical: true,
            strings: &SPANISH_STRINGS,
        },
        LanguageConfig {
            code: "eu",
            name: "Basque",
            native_name: "Euskara",
            is_canonical: false,
            strings: &BASQUE_STRINGS,
        },
    ]
}
