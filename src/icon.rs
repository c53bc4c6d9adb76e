//! Icon resolution chain for catalog entries.
//!
//! Each displayed entry walks a forward-only state machine:
//! `Primary` (the entry's own `icon_url`) → `Favicon` (a favicon service keyed
//! on the website host) → `Placeholder` (a static per-category visual). The
//! placeholder is terminal and never touches the network.
//!
//! Every stage a resolver enters gets a fresh `IconToken`. A load failure is
//! only honored when it carries the token of the stage currently shown, so a
//! late or repeated failure event can never skip a stage.

use crate::catalog::{CatalogEntry, Category};
use reqwest::Url;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Favicon service used when the configured template is absent.
pub const DEFAULT_FAVICON_SERVICE: &str =
    "https://www.google.com/s2/favicons?domain={domain}&sz=128";

/// Visual treatment for one category. This table is the only place that maps
/// categories to icons and styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryVisual {
    pub icon: &'static str,
    pub style: &'static str,
}

const GAMIFICATION_VISUAL: CategoryVisual = CategoryVisual {
    icon: "🎮",
    style: "bg-purple-100 text-purple-600",
};
const CONTENT_CREATION_VISUAL: CategoryVisual = CategoryVisual {
    icon: "🎨",
    style: "bg-pink-100 text-pink-600",
};
const MANAGEMENT_VISUAL: CategoryVisual = CategoryVisual {
    icon: "📋",
    style: "bg-blue-100 text-blue-600",
};
const ASSESSMENT_VISUAL: CategoryVisual = CategoryVisual {
    icon: "✅",
    style: "bg-green-100 text-green-600",
};
const COLLABORATION_VISUAL: CategoryVisual = CategoryVisual {
    icon: "🤝",
    style: "bg-orange-100 text-orange-600",
};
const OTHER_VISUAL: CategoryVisual = CategoryVisual {
    icon: "📦",
    style: "bg-gray-100 text-gray-600",
};

pub fn category_visual(category: Category) -> &'static CategoryVisual {
    match category {
        Category::Gamification => &GAMIFICATION_VISUAL,
        Category::ContentCreation => &CONTENT_CREATION_VISUAL,
        Category::Management => &MANAGEMENT_VISUAL,
        Category::Assessment => &ASSESSMENT_VISUAL,
        Category::Collaboration => &COLLABORATION_VISUAL,
        Category::Other => &OTHER_VISUAL,
    }
}

/// Build the favicon-service URL for a website.
///
/// Returns `None` when the website is not an absolute URL with a host, in
/// which case the favicon stage is skipped.
pub fn favicon_url(website: &str, template: &str) -> Option<String> {
    let parsed = Url::parse(website.trim()).ok()?;
    let host = parsed.host_str()?;
    Some(template.replace("{domain}", host))
}

/// Identity of one icon load: a stage of one resolver instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IconToken(u64);

static NEXT_ICON_TOKEN: AtomicU64 = AtomicU64::new(1);

impl IconToken {
    fn fresh() -> Self {
        IconToken(NEXT_ICON_TOKEN.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconStage {
    Primary,
    Favicon { url: String },
    Placeholder,
}

/// What the presentation layer should display right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconSource {
    Remote(String),
    Placeholder(&'static CategoryVisual),
}

/// Per-entry icon state, scoped to the entry currently on screen.
#[derive(Debug, Clone)]
pub struct IconResolver {
    entry_id: u32,
    icon_url: String,
    website: String,
    category: Category,
    favicon_template: String,
    stage: IconStage,
    token: IconToken,
    attempts: u8,
}

impl IconResolver {
    pub fn new(entry: &CatalogEntry, favicon_template: &str) -> Self {
        let mut resolver = Self {
            entry_id: entry.id,
            icon_url: entry.icon_url.clone(),
            website: entry.website.clone(),
            category: entry.category,
            favicon_template: favicon_template.to_string(),
            stage: IconStage::Primary,
            token: IconToken::fresh(),
            attempts: 1,
        };

        // A blank icon URL can only fail; go straight to the next stage.
        if resolver.icon_url.trim().is_empty() {
            resolver.attempts = 0;
            resolver.advance();
        }

        resolver
    }

    pub fn entry_id(&self) -> u32 {
        self.entry_id
    }

    pub fn stage(&self) -> &IconStage {
        &self.stage
    }

    /// Token of the source `current()` returns. Failure reports must carry it.
    pub fn token(&self) -> IconToken {
        self.token
    }

    /// Number of network loads issued for this entry so far (at most two).
    pub fn attempts(&self) -> u8 {
        self.attempts
    }

    pub fn is_terminal(&self) -> bool {
        self.stage == IconStage::Placeholder
    }

    pub fn current(&self) -> IconSource {
        match &self.stage {
            IconStage::Primary => IconSource::Remote(self.icon_url.clone()),
            IconStage::Favicon { url } => IconSource::Remote(url.clone()),
            IconStage::Placeholder => IconSource::Placeholder(category_visual(self.category)),
        }
    }

    /// Record a load failure for the source identified by `token`.
    ///
    /// Failures carrying any other token (an earlier stage, an earlier visit,
    /// another entry) are stale and ignored. Returns whether the resolver
    /// moved to a new stage.
    pub fn report_failure(&mut self, token: IconToken) -> bool {
        if token != self.token {
            debug!(
                "Ignoring stale icon failure {:?} for entry {} (current {:?})",
                token, self.entry_id, self.token
            );
            return false;
        }
        if self.is_terminal() {
            return false;
        }

        self.advance();
        true
    }

    /// Point the resolver at `entry`, restarting the chain only when the
    /// entry identity changed. Returns whether a restart happened.
    pub fn sync(&mut self, entry: &CatalogEntry) -> bool {
        if entry.id == self.entry_id {
            return false;
        }
        *self = Self::new(entry, &self.favicon_template);
        true
    }

    fn advance(&mut self) {
        self.stage = match self.stage {
            IconStage::Primary => match favicon_url(&self.website, &self.favicon_template) {
                Some(url) => {
                    self.attempts += 1;
                    IconStage::Favicon { url }
                }
                None => {
                    debug!(
                        "Entry {} website '{}' is not a valid URL, using placeholder",
                        self.entry_id, self.website
                    );
                    IconStage::Placeholder
                }
            },
            IconStage::Favicon { .. } | IconStage::Placeholder => IconStage::Placeholder,
        };
        self.token = IconToken::fresh();
        debug!("Entry {} icon stage is now {:?}", self.entry_id, self.stage);
    }
}
