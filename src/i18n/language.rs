//! Language type: validated display-language selector.

use crate::i18n::{LanguageConfig, LanguageRegistry, LanguageStrings};
use anyhow::{bail, Result};
use std::fmt;
use std::str::FromStr;

/// A validated display language.
///
/// Only languages present in the registry can be constructed, so every
/// `Language` is guaranteed to have a complete `LanguageStrings` bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    /// ISO 639-1 language code (e.g., "es", "eu")
    code: &'static str,
}

impl Language {
    pub const SPANISH: Language = Language { code: "es" };

    pub const BASQUE: Language = Language { code: "eu" };

    /// Create a Language from a language code string.
    ///
    /// # Returns
    /// * `Ok(Language)` if the code is registered
    /// * `Err` if the code is unknown
    pub fn from_code(code: &str) -> Result<Language> {
        match LanguageRegistry::get().get_by_code(code.trim()) {
            Some(config) => Ok(Language { code: config.code }),
            None => bail!("Unknown language code: '{}'", code),
        }
    }

    /// The default display language.
    pub fn canonical() -> Language {
        let config = LanguageRegistry::get().canonical();
        Language { code: config.code }
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full language configuration from the registry.
    ///
    /// # Panics
    /// Panics if the code is not registered, which cannot happen for a
    /// `Language` built through `from_code` or the constants.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    pub fn name(&self) -> &'static str {
        self.config().name
    }

    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    pub fn is_canonical(&self) -> bool {
        self.config().is_canonical
    }

    /// Labels and UI strings for this language.
    pub fn strings(&self) -> &'static LanguageStrings {
        self.config().strings
    }

    /// The other side of the two-valued language selector.
    pub fn toggle(&self) -> Language {
        if *self == Language::SPANISH {
            Language::BASQUE
        } else {
            Language::SPANISH
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::canonical()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

impl FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Language::from_code(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Constant Tests ====================

    #[test]
    fn test_spanish_constant() {
        let spanish = Language::SPANISH;
        assert_eq!(spanish.code(), "es");
        assert_eq!(spanish.name(), "Spanish");
        assert!(spanish.is_canonical());
    }

    #[test]
    fn test_basque_constant() {
        let basque = Language::BASQUE;
        assert_eq!(basque.code(), "eu");
        assert_eq!(basque.native_name(), "Euskara");
        assert!(!basque.is_canonical());
    }

    // ==================== from_code Tests ====================

    #[test]
    fn test_from_code_basque() {
        let language = Language::from_code("eu").expect("Should succeed");
        assert_eq!(language, Language::BASQUE);
    }

    #[test]
    fn test_from_code_trims_and_ignores_case() {
        let language = Language::from_code(" ES ").expect("Should succeed");
        assert_eq!(language, Language::SPANISH);
    }

    #[test]
    fn test_from_code_invalid() {
        let result = Language::from_code("fr");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Unknown"));
    }

    #[test]
    fn test_from_code_empty() {
        assert!(Language::from_code("").is_err());
    }

    #[test]
    fn test_parse_via_from_str() {
        let language: Language = "eu".parse().expect("Should parse");
        assert_eq!(language, Language::BASQUE);
    }

    // ==================== Selector Tests ====================

    #[test]
    fn test_default_is_canonical() {
        assert_eq!(Language::default(), Language::SPANISH);
    }

    #[test]
    fn test_toggle_switches_between_both_languages() {
        assert_eq!(Language::SPANISH.toggle(), Language::BASQUE);
        assert_eq!(Language::BASQUE.toggle(), Language::SPANISH);
        assert_eq!(Language::SPANISH.toggle().toggle(), Language::SPANISH);
    }

    #[test]
    fn test_display_prints_code() {
        assert_eq!(Language::BASQUE.to_string(), "eu");
    }

    #[test]
    fn test_strings_follow_language() {
        assert!(std::ptr::eq(
            Language::BASQUE.strings(),
            Language::BASQUE.config().strings
        ));
    }
}
