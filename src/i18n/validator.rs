//! Localization completeness validation.
//!
//! Every enum value must have a non-empty label in every language, and every
//! UI string must carry the same `{placeholder}` set as its counterpart in the
//! canonical language. A language bundle that fails these checks is a
//! configuration error; the directory never falls back to another language
//! for a missing label.

use super::{LanguageRegistry, LanguageStrings};
use crate::catalog::{Audience, Category, PriceModel, Stage};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Validation report containing errors and warnings about a language bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Problems that make the bundle unusable (empty labels, placeholder drift)
    pub errors: Vec<String>,

    /// Suspicious but renderable content (untranslated copies of canonical text)
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }

    fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for language bundles.
pub struct TranslationValidator;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

// Strings that are legitimately identical across languages.
const SHARED_TERMS: &[&str] = &["Freemium"];

impl TranslationValidator {
    /// Validate one language bundle against the canonical bundle.
    pub fn validate(
        code: &str,
        canonical: &LanguageStrings,
        candidate: &LanguageStrings,
    ) -> ValidationReport {
        let mut report = ValidationReport::new();

        let is_canonical = LanguageRegistry::get().canonical().code == code;
        let canonical_table = string_table(canonical);
        let candidate_table = string_table(candidate);

        for ((key, original), (_, translated)) in canonical_table.iter().zip(&candidate_table) {
            if translated.trim().is_empty() {
                report
                    .errors
                    .push(format!("[{}] '{}' is empty", code, key));
                continue;
            }

            let expected = Self::extract_placeholders(original);
            let actual = Self::extract_placeholders(translated);
            if expected != actual {
                report.errors.push(format!(
                    "[{}] '{}' placeholder mismatch: expected {:?}, found {:?}",
                    code, key, expected, actual
                ));
            }

            if !is_canonical
                && original == translated
                && !SHARED_TERMS.contains(original)
            {
                report.warnings.push(format!(
                    "[{}] '{}' is identical to the canonical text",
                    code, key
                ));
            }
        }

        report
    }

    /// Validate every registered language against the canonical one.
    pub fn validate_registry() -> ValidationReport {
        let registry = LanguageRegistry::get();
        let canonical = registry.canonical().strings;

        let mut report = ValidationReport::new();
        for config in registry.list_all() {
            report.merge(Self::validate(config.code, canonical, config.strings));
        }
        report
    }

    /// Extract `{name}` placeholders from a template string.
    pub fn extract_placeholders(text: &str) -> BTreeSet<String> {
        let regex = PLACEHOLDER_REGEX
            .get_or_init(|| Regex::new(r"\{([a-z_]+)\}").expect("placeholder regex is valid"));
        regex
            .captures_iter(text)
            .map(|cap| cap[1].to_string())
            .collect()
    }
}

/// Flatten a bundle into `(key, value)` pairs in a stable order.
fn string_table(strings: &LanguageStrings) -> Vec<(String, &'static str)> {
    let mut table = Vec::new();

    for category in Category::ALL {
        table.push((
            format!("category.{}", category.as_str()),
            strings.category_label(category),
        ));
    }
    for stage in Stage::ALL {
        table.push((format!("stage.{}", stage.as_str()), strings.stage_label(stage)));
    }
    for audience in Audience::ALL {
        table.push((
            format!("audience.{}", audience.as_str()),
            strings.audience_label(audience),
        ));
    }
    for price in PriceModel::ALL {
        table.push((format!("price.{}", price.as_str()), strings.price_label(price)));
    }

    let ui = [
        ("app_title", strings.app_title),
        ("search_placeholder", strings.search_placeholder),
        ("clear_filters", strings.clear_filters),
        ("results_count", strings.results_count),
        ("no_results", strings.no_results),
        ("filter_category", strings.filter_category),
        ("filter_stage", strings.filter_stage),
        ("filter_role", strings.filter_role),
        ("filter_price", strings.filter_price),
        ("website_label", strings.website_label),
        ("features_title", strings.features_title),
        ("min_age", strings.min_age),
        ("no_age_restriction", strings.no_age_restriction),
        ("review_loading", strings.review_loading),
        ("review_error", strings.review_error),
        ("review_title", strings.review_title),
        ("summary_title", strings.summary_title),
        ("teacher_tip_title", strings.teacher_tip_title),
        ("student_activity_title", strings.student_activity_title),
        ("pros_title", strings.pros_title),
        ("cons_title", strings.cons_title),
        ("privacy_title", strings.privacy_title),
        ("gdpr_compliant", strings.gdpr_compliant),
        ("gdpr_not_compliant", strings.gdpr_not_compliant),
        ("data_collected_title", strings.data_collected_title),
        ("age_warning_title", strings.age_warning_title),
        ("export_button", strings.export_button),
        ("export_review_missing", strings.export_review_missing),
        ("export_failed", strings.export_failed),
        ("generated_on", strings.generated_on),
    ];
    table.extend(ui.into_iter().map(|(key, value)| (key.to_string(), value)));

    table
}
