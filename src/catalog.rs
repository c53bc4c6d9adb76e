//! Catalog store: the immutable list of educational apps.
//!
//! The catalog is loaded wholesale once at startup, either from the bundled
//! `data/catalog.json` or from a file named by configuration, validated, and
//! then only ever borrowed.

use crate::i18n::Language;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info};

const BUNDLED_CATALOG: &str = include_str!("../data/catalog.json");

// ==================== Enumerations ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Gamification,
    ContentCreation,
    Management,
    Assessment,
    Collaboration,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    EarlyChildhood,
    Primary,
    Secondary,
    UpperSecondary,
    Vocational,
    University,
}

/// Who an app is meant for. `Both` satisfies any role filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Audience {
    Teacher,
    Student,
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PriceModel {
    Free,
    Freemium,
    Paid,
}

/// A filter or catalog value that is not part of its closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct UnknownValueError {
    pub kind: &'static str,
    pub value: String,
    pub expected: String,
}

/// Wire names, `ALL`, `as_str` and `FromStr` for a closed enumeration.
macro_rules! closed_enum {
    ($ty:ident, $kind:literal, [$($variant:ident => $name:literal),+ $(,)?]) => {
        impl $ty {
            pub const ALL: [$ty; [$($name),+].len()] = [$($ty::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $name),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = UnknownValueError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_ascii_lowercase();
                $ty::ALL
                    .into_iter()
                    .find(|value| value.as_str() == wanted)
                    .ok_or_else(|| UnknownValueError {
                        kind: $kind,
                        value: s.to_string(),
                        expected: [$($name),+].join(", "),
                    })
            }
        }
    };
}

closed_enum!(Category, "category", [
    Gamification => "gamification",
    ContentCreation => "content-creation",
    Management => "management",
    Assessment => "assessment",
    Collaboration => "collaboration",
    Other => "other",
]);

closed_enum!(Stage, "stage", [
    EarlyChildhood => "early-childhood",
    Primary => "primary",
    Secondary => "secondary",
    UpperSecondary => "upper-secondary",
    Vocational => "vocational",
    University => "university",
]);

closed_enum!(Audience, "audience", [
    Teacher => "teacher",
    Student => "student",
    Both => "both",
]);

closed_enum!(PriceModel, "price model", [
    Free => "free",
    Freemium => "freemium",
    Paid => "paid",
]);

// ==================== Entries ====================

/// A value carried once per display language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localized<T> {
    pub es: T,
    pub eu: T,
}

impl<T> Localized<T> {
    pub fn get(&self, language: Language) -> &T {
        if language == Language::BASQUE {
            &self.eu
        } else {
            &self.es
        }
    }

    /// Both language values, canonical first.
    pub fn all(&self) -> [(Language, &T); 2] {
        [(Language::SPANISH, &self.es), (Language::BASQUE, &self.eu)]
    }
}

/// One educational application's metadata record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: u32,
    pub name: String,
    pub description: Localized<String>,
    pub category: Category,
    pub target_audience: Audience,
    pub stages: Vec<Stage>,
    pub price_model: PriceModel,
    pub website: String,
    pub icon_url: String,
    pub features: Localized<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_age: Option<u8>,
}

impl CatalogEntry {
    pub fn description(&self, language: Language) -> &str {
        self.description.get(language)
    }

    /// The first `limit` features in the given language.
    pub fn features_preview(&self, language: Language, limit: usize) -> &[String] {
        let features = self.features.get(language);
        &features[..features.len().min(limit)]
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::EmptyName { id: self.id });
        }

        if self.stages.is_empty() {
            return Err(CatalogError::EmptyStages { id: self.id });
        }

        let mut seen = HashSet::new();
        for stage in &self.stages {
            if !seen.insert(*stage) {
                return Err(CatalogError::DuplicateStage {
                    id: self.id,
                    stage: *stage,
                });
            }
        }

        for (language, description) in self.description.all() {
            if description.trim().is_empty() {
                return Err(CatalogError::MissingTranslation {
                    id: self.id,
                    field: "description",
                    language: language.code(),
                });
            }
        }

        Ok(())
    }
}

// ==================== Errors ====================

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog data is not valid JSON for the entry schema")]
    Json(#[from] serde_json::Error),

    #[error("entry id {0} appears more than once")]
    DuplicateId(u32),

    #[error("entry {id} has an empty name")]
    EmptyName { id: u32 },

    #[error("entry {id} has no education stages")]
    EmptyStages { id: u32 },

    #[error("entry {id} lists stage '{stage}' twice")]
    DuplicateStage { id: u32, stage: Stage },

    #[error("entry {id} has an empty {field} for language '{language}'")]
    MissingTranslation {
        id: u32,
        field: &'static str,
        language: &'static str,
    },
}

// ==================== Store ====================

/// The read-only catalog, in its original display order.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Build a catalog from already-deserialized entries, enforcing the
    /// entry invariants and id uniqueness.
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        let mut ids = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !ids.insert(entry.id) {
                return Err(CatalogError::DuplicateId(entry.id));
            }
            entry.validate()?;
        }

        debug!("Validated {} catalog entries", entries.len());
        Ok(Self { entries })
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
        Self::from_entries(entries)
    }

    /// The catalog compiled into the binary.
    pub fn bundled() -> Result<Self, CatalogError> {
        let catalog = Self::from_json(BUNDLED_CATALOG)?;
        info!("Loaded bundled catalog with {} entries", catalog.len());
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&json)?;
        info!(
            "Loaded catalog from {} with {} entries",
            path.display(),
            catalog.len()
        );
        Ok(catalog)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(&self, id: u32) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
