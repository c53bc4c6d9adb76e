//! Directory controller: the single owner of session state.
//!
//! Holds the read-only catalog, the current filter selection, the display
//! language and the open detail view (if any). Review requests are tagged
//! with a monotonically increasing token; a response is only applied when its
//! token still belongs to the open detail view, so a slow answer for an entry
//! the user already left can never overwrite the current one.

use crate::catalog::{Catalog, CatalogEntry};
use crate::filter::{filter, FilterSelection};
use crate::i18n::Language;
use crate::icon::{IconResolver, IconToken};
use crate::metrics::ReviewMetrics;
use crate::report::Report;
use crate::review::{AiReview, ReviewError, ReviewProvider};
use tracing::{debug, info, warn};

/// Identity of one detail-view activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

/// A review request issued by `Directory::open_entry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewRequest {
    pub token: RequestToken,
    pub entry_id: u32,
    pub language: Language,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewState {
    Loading,
    Ready(AiReview),
    Failed(String),
}

impl ReviewState {
    pub fn review(&self) -> Option<&AiReview> {
        match self {
            ReviewState::Ready(review) => Some(review),
            _ => None,
        }
    }
}

/// What happened to a review response handed to `complete_review`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewOutcome {
    Applied,
    Discarded,
}

/// State of the open detail view.
#[derive(Debug, Clone)]
pub struct DetailView {
    entry_id: u32,
    token: RequestToken,
    review: ReviewState,
    icon: IconResolver,
}

impl DetailView {
    pub fn entry_id(&self) -> u32 {
        self.entry_id
    }

    pub fn token(&self) -> RequestToken {
        self.token
    }

    pub fn review(&self) -> &ReviewState {
        &self.review
    }

    pub fn icon(&self) -> &IconResolver {
        &self.icon
    }
}

pub struct Directory {
    catalog: Catalog,
    selection: FilterSelection,
    language: Language,
    favicon_template: String,
    detail: Option<DetailView>,
    next_token: u64,
    metrics: &'static ReviewMetrics,
}

impl Directory {
    pub fn new(catalog: Catalog, language: Language, favicon_template: impl Into<String>) -> Self {
        Self {
            catalog,
            selection: FilterSelection::default(),
            language,
            favicon_template: favicon_template.into(),
            detail: None,
            next_token: 0,
            metrics: ReviewMetrics::global(),
        }
    }

    /// Record review counters into `metrics` instead of the process-wide set.
    pub fn with_metrics(mut self, metrics: &'static ReviewMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    // ==================== Filtering ====================

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut FilterSelection {
        &mut self.selection
    }

    /// Entries passing the current selection, in catalog order.
    pub fn visible_entries(&self) -> Vec<&CatalogEntry> {
        filter(&self.catalog, &self.selection)
    }

    pub fn clear_filters(&mut self) {
        self.selection.reset();
    }

    // ==================== Language ====================

    pub fn language(&self) -> Language {
        self.language
    }

    /// Switch the display language. Labels and bilingual fields re-resolve on
    /// the next read; an in-flight review request is left alone.
    pub fn set_language(&mut self, language: Language) {
        if language != self.language {
            info!("Display language changed to {}", language.name());
            self.language = language;
        }
    }

    pub fn toggle_language(&mut self) {
        self.set_language(self.language.toggle());
    }

    // ==================== Detail View ====================

    pub fn detail(&self) -> Option<&DetailView> {
        self.detail.as_ref()
    }

    pub fn current_entry(&self) -> Option<&CatalogEntry> {
        self.detail
            .as_ref()
            .and_then(|detail| self.catalog.get(detail.entry_id))
    }

    /// Open the detail view for `entry_id` and issue a fresh review request.
    ///
    /// Every call issues a new token, including re-opening the entry that is
    /// already shown; reviews are never reused. Returns `None` for unknown ids.
    pub fn open_entry(&mut self, entry_id: u32) -> Option<ReviewRequest> {
        let entry = self.catalog.get(entry_id)?;

        self.next_token += 1;
        let token = RequestToken(self.next_token);

        let icon = match self.detail.take() {
            Some(previous) => {
                let mut icon = previous.icon;
                icon.sync(entry);
                icon
            }
            None => IconResolver::new(entry, &self.favicon_template),
        };

        self.detail = Some(DetailView {
            entry_id,
            token,
            review: ReviewState::Loading,
            icon,
        });

        debug!("Opened entry {} with review token {:?}", entry_id, token);

        Some(ReviewRequest {
            token,
            entry_id,
            language: self.language,
        })
    }

    /// Close the detail view; its review, if any, is dropped.
    pub fn close_entry(&mut self) {
        if let Some(detail) = self.detail.take() {
            debug!("Closed entry {}", detail.entry_id);
        }
    }

    /// Forward an icon load failure to the open detail view. Only a failure
    /// of the source currently shown advances the chain.
    pub fn report_icon_failure(&mut self, token: IconToken) -> bool {
        match self.detail.as_mut() {
            Some(detail) => detail.icon.report_failure(token),
            None => false,
        }
    }

    /// Deliver the result of a review request.
    ///
    /// The result is applied only if `token` belongs to the open detail view;
    /// otherwise it is dropped without touching any state.
    pub fn complete_review(
        &mut self,
        token: RequestToken,
        result: Result<AiReview, ReviewError>,
    ) -> ReviewOutcome {
        let metrics = self.metrics;

        let detail = match self.detail.as_mut() {
            Some(detail) if detail.token == token => detail,
            _ => {
                debug!("Discarding stale review response for token {:?}", token);
                metrics.record_stale_discard();
                return ReviewOutcome::Discarded;
            }
        };

        detail.review = match result {
            Ok(review) => {
                metrics.record_success();
                info!("Review ready for entry {}", detail.entry_id);
                ReviewState::Ready(review)
            }
            Err(e) => {
                metrics.record_failure();
                warn!("Review failed for entry {}: {}", detail.entry_id, e);
                ReviewState::Failed(e.to_string())
            }
        };

        ReviewOutcome::Applied
    }

    /// Run `request` against `provider` and deliver the result.
    pub async fn run_review<P>(&mut self, provider: &P, request: ReviewRequest) -> ReviewOutcome
    where
        P: ReviewProvider + ?Sized,
    {
        let Some(entry) = self.catalog.get(request.entry_id).cloned() else {
            return ReviewOutcome::Discarded;
        };

        self.metrics.record_request();
        let result = provider.generate(&entry, request.language).await;
        self.complete_review(request.token, result)
    }

    /// Report for the open entry, including the review only once it is ready.
    pub fn current_report(&self) -> Option<Report> {
        let detail = self.detail.as_ref()?;
        let entry = self.catalog.get(detail.entry_id)?;
        Some(Report::build(entry, self.language, detail.review.review()))
    }
}
