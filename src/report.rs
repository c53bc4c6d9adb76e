//! Report exporter.
//!
//! Builds a downloadable document for one entry, optionally including its AI
//! review. Every piece of text passes through `sanitize_text` before it
//! reaches the layout, so the renderer only ever sees printable ASCII and
//! Latin-1 characters.

use crate::catalog::CatalogEntry;
use crate::i18n::{Language, LanguageStrings};
use crate::review::AiReview;
use chrono::{DateTime, Utc};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;
use tracing::info;

const FEATURE_LIMIT: usize = 6;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to create export directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write report {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Normalize typographic punctuation to ASCII and blank out anything the
/// renderer cannot draw.
///
/// Unsupported characters become a space rather than disappearing, so words
/// on either side never merge.
pub fn sanitize_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}' => result.push('\''),
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{2033}' => result.push('"'),
            '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2014}' | '\u{2015}'
            | '\u{2212}' => result.push('-'),
            '\u{2026}' => result.push_str("..."),
            '\u{00A0}' | '\t' => result.push(' '),
            '\n' => result.push('\n'),
            ' '..='~' | '\u{00A1}'..='\u{00FF}' => result.push(c),
            _ => result.push(' '),
        }
    }

    result
}

static WHITESPACE_REGEX: OnceLock<Regex> = OnceLock::new();

/// Deterministic file name for an entry's report.
///
/// Falls back to the entry id when nothing printable is left of the name.
pub fn report_file_name(entry_id: u32, entry_name: &str) -> String {
    let whitespace =
        WHITESPACE_REGEX.get_or_init(|| Regex::new(r"\s+").expect("whitespace regex is valid"));
    let sanitized = sanitize_text(entry_name.trim()).replace(['/', '\\'], " ");
    let stem = sanitized.trim();

    if stem.is_empty() {
        return format!("app_{}_report.txt", entry_id);
    }
    format!("{}_report.txt", whitespace.replace_all(stem, "_"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSection {
    pub title: String,
    pub lines: Vec<String>,
}

impl ReportSection {
    fn new(title: &str) -> Self {
        Self {
            title: sanitize_text(title),
            lines: Vec::new(),
        }
    }

    fn line(mut self, text: impl AsRef<str>) -> Self {
        self.lines.push(sanitize_text(text.as_ref()));
        self
    }

    fn labeled(self, label: &str, value: impl AsRef<str>) -> Self {
        self.line(format!("{}: {}", label, value.as_ref()))
    }

    fn bullets<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for item in items {
            self.lines.push(format!("- {}", sanitize_text(item.as_ref())));
        }
        self
    }
}

/// A rendered-ready report for one entry.
#[derive(Debug, Clone)]
pub struct Report {
    file_name: String,
    title: String,
    generated_on: String,
    sections: Vec<ReportSection>,
    has_review: bool,
}

impl Report {
    pub fn build(entry: &CatalogEntry, language: Language, review: Option<&AiReview>) -> Self {
        Self::build_at(entry, language, review, Utc::now())
    }

    pub fn build_at(
        entry: &CatalogEntry,
        language: Language,
        review: Option<&AiReview>,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let strings = language.strings();

        let mut sections = vec![overview_section(entry, language, strings)];

        let features = entry.features_preview(language, FEATURE_LIMIT);
        if !features.is_empty() {
            sections.push(ReportSection::new(strings.features_title).bullets(features));
        }

        match review {
            Some(review) => sections.extend(review_sections(review, strings)),
            None => sections.push(
                ReportSection::new(strings.review_title).line(strings.export_review_missing),
            ),
        }

        let date = generated_at.format("%Y-%m-%d %H:%M UTC").to_string();

        Self {
            file_name: report_file_name(entry.id, &entry.name),
            title: sanitize_text(&format!("{} - {}", entry.name, strings.app_title)),
            generated_on: sanitize_text(&strings.generated_on.replace("{date}", &date)),
            sections,
            has_review: review.is_some(),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn sections(&self) -> &[ReportSection] {
        &self.sections
    }

    pub fn has_review(&self) -> bool {
        self.has_review
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.title);
        out.push('\n');
        out.push_str(&"=".repeat(self.title.chars().count()));
        out.push('\n');
        out.push_str(&self.generated_on);
        out.push_str("\n\n");

        for section in &self.sections {
            out.push_str(&section.title);
            out.push('\n');
            out.push_str(&"-".repeat(section.title.chars().count()));
            out.push('\n');
            for line in &section.lines {
                out.push_str(line);
                out.push('\n');
            }
            out.push('\n');
        }

        out
    }

    /// Write the rendered report into `dir`, creating it if needed.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        std::fs::create_dir_all(dir).map_err(|source| ExportError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let path = dir.join(&self.file_name);
        std::fs::write(&path, self.render()).map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;

        info!("Report written to {}", path.display());
        Ok(path)
    }
}

fn overview_section(
    entry: &CatalogEntry,
    language: Language,
    strings: &LanguageStrings,
) -> ReportSection {
    let stages = entry
        .stages
        .iter()
        .map(|stage| strings.stage_label(*stage))
        .collect::<Vec<_>>()
        .join(", ");

    ReportSection::new(&entry.name)
        .line(entry.description(language))
        .labeled(strings.filter_category, strings.category_label(entry.category))
        .labeled(strings.filter_role, strings.audience_label(entry.target_audience))
        .labeled(strings.filter_stage, stages)
        .labeled(strings.filter_price, strings.price_label(entry.price_model))
        .labeled(strings.website_label, &entry.website)
        .line(strings.format_min_age(entry.min_age))
}

fn review_sections(review: &AiReview, strings: &LanguageStrings) -> Vec<ReportSection> {
    let privacy = &review.privacy;
    let gdpr = if privacy.gdpr_compliant {
        strings.gdpr_compliant
    } else {
        strings.gdpr_not_compliant
    };

    vec![
        ReportSection::new(strings.summary_title).line(&review.summary),
        ReportSection::new(strings.teacher_tip_title).line(&review.teacher_tip),
        ReportSection::new(strings.student_activity_title).line(&review.student_activity),
        ReportSection::new(strings.privacy_title)
            .line(gdpr)
            .labeled(strings.data_collected_title, &privacy.data_collected)
            .labeled(strings.age_warning_title, &privacy.age_warning)
            .line(&privacy.compliance_summary),
        ReportSection::new(strings.pros_title).bullets(&review.pros),
        ReportSection::new(strings.cons_title).bullets(&review.cons),
    ]
}
