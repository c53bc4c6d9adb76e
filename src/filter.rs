//! Filter engine: multi-dimensional filtering over the resident catalog.
//!
//! Dimensions are combined with AND; the selected values inside one
//! dimension are combined with OR. An empty selection set never constrains.

use crate::catalog::{Audience, Catalog, CatalogEntry, Category, PriceModel, Stage};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Session-local filter state owned by the directory controller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub query: String,
    pub categories: BTreeSet<Category>,
    pub stages: BTreeSet<Stage>,
    pub roles: BTreeSet<Audience>,
    pub prices: BTreeSet<PriceModel>,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn toggle_category(&mut self, category: Category) {
        toggle(&mut self.categories, category);
    }

    pub fn toggle_stage(&mut self, stage: Stage) {
        toggle(&mut self.stages, stage);
    }

    pub fn toggle_role(&mut self, role: Audience) {
        toggle(&mut self.roles, role);
    }

    pub fn toggle_price(&mut self, price: PriceModel) {
        toggle(&mut self.prices, price);
    }

    /// Number of selected values across the four dimensions. The text query
    /// does not count.
    pub fn active_filter_count(&self) -> usize {
        self.categories.len() + self.stages.len() + self.roles.len() + self.prices.len()
    }

    /// Whether the "clear filters" affordance should be shown.
    pub fn has_active_filters(&self) -> bool {
        self.active_filter_count() > 0
    }

    /// True when nothing at all narrows the catalog.
    pub fn is_empty(&self) -> bool {
        self.normalized_query().is_empty() && !self.has_active_filters()
    }

    /// Clear the query and every selection set in one step.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn normalized_query(&self) -> String {
        self.query.to_lowercase()
    }

    /// Whether a single entry passes every predicate.
    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        self.passes(entry, &self.normalized_query())
    }

    fn passes(&self, entry: &CatalogEntry, query: &str) -> bool {
        matches_text(entry, query)
            && matches_category(entry, &self.categories)
            && matches_stage(entry, &self.stages)
            && matches_role(entry, &self.roles)
            && matches_price(entry, &self.prices)
    }
}

fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T) {
    if !set.remove(&value) {
        set.insert(value);
    }
}

/// Filter the catalog, keeping the catalog's relative order.
pub fn filter<'a>(catalog: &'a Catalog, selection: &FilterSelection) -> Vec<&'a CatalogEntry> {
    filter_entries(catalog.entries(), selection)
}

/// Filter an arbitrary entry slice, keeping its relative order.
pub fn filter_entries<'a>(
    entries: &'a [CatalogEntry],
    selection: &FilterSelection,
) -> Vec<&'a CatalogEntry> {
    let query = selection.normalized_query();
    entries
        .iter()
        .filter(|entry| selection.passes(entry, &query))
        .collect()
}

// `query` is already lowercased; surrounding whitespace is part of the match. Both descriptions are searched
// whatever the display language is.
fn matches_text(entry: &CatalogEntry, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    entry.name.to_lowercase().contains(query)
        || entry
            .description
            .all()
            .iter()
            .any(|(_, text)| text.to_lowercase().contains(query))
}

fn matches_category(entry: &CatalogEntry, selected: &BTreeSet<Category>) -> bool {
    selected.is_empty() || selected.contains(&entry.category)
}

// Intersection, not subset: one shared stage is enough.
fn matches_stage(entry: &CatalogEntry, selected: &BTreeSet<Stage>) -> bool {
    selected.is_empty() || entry.stages.iter().any(|stage| selected.contains(stage))
}

// `Both` satisfies any non-empty role filter; the reverse does not hold.
fn matches_role(entry: &CatalogEntry, selected: &BTreeSet<Audience>) -> bool {
    selected.is_empty()
        || entry.target_audience == Audience::Both
        || selected.contains(&entry.target_audience)
}

fn matches_price(entry: &CatalogEntry, selected: &BTreeSet<PriceModel>) -> bool {
    selected.is_empty() || selected.contains(&entry.price_model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::create_entry;

    // ==================== Helper Functions ====================

    fn sample_catalog() -> Catalog {
        let mut kahoot = create_entry(1, "Kahoot");
        kahoot.category = Category::Gamification;
        kahoot.target_audience = Audience::Both;
        kahoot.stages = vec![Stage::Primary, Stage::Secondary];
        kahoot.price_model = PriceModel::Freemium;

        let mut additio = create_entry(2, "Additio");
        additio.category = Category::Assessment;
        additio.target_audience = Audience::Teacher;
        additio.stages = vec![Stage::Secondary, Stage::Vocational];
        additio.price_model = PriceModel::Paid;
        additio.description.eu = "Irakaslearen koaderno digitala".to_string();

        let mut scratch = create_entry(3, "Scratch");
        scratch.category = Category::ContentCreation;
        scratch.target_audience = Audience::Student;
        scratch.stages = vec![Stage::Primary];
        scratch.price_model = PriceModel::Free;

        Catalog::from_entries(vec![kahoot, additio, scratch]).unwrap()
    }

    fn ids(entries: &[&CatalogEntry]) -> Vec<u32> {
        entries.iter().map(|e| e.id).collect()
    }

    // ==================== Empty Selection Tests ====================

    #[test]
    fn test_empty_selection_returns_full_catalog_in_order() {
        let catalog = sample_catalog();
        let result = filter(&catalog, &FilterSelection::new());
        assert_eq!(ids(&result), vec![1, 2, 3]);
    }

    #[test]
    fn test_whitespace_query_is_a_literal_constraint() {
        let catalog = sample_catalog();
        let selection = FilterSelection::new().with_query("   ");
        assert!(filter(&catalog, &selection).is_empty());
        assert!(!selection.is_empty());
    }

    // ==================== Text Search Tests ====================

    #[test]
    fn test_text_search_matches_name_case_insensitively() {
        let catalog = sample_catalog();
        let selection = FilterSelection::new().with_query("SCRATCH");
        assert_eq!(ids(&filter(&catalog, &selection)), vec![3]);
    }

    #[test]
    fn test_text_search_matches_basque_description_only() {
        let catalog = sample_catalog();
        // Only Additio's Basque description contains this word.
        let selection = FilterSelection::new().with_query("koaderno");
        assert_eq!(ids(&filter(&catalog, &selection)), vec![2]);
    }

    #[test]
    fn test_text_search_matches_spanish_description() {
        let catalog = sample_catalog();
        let selection = FilterSelection::new().with_query("descripción de kahoot");
        assert_eq!(ids(&filter(&catalog, &selection)), vec![1]);
    }

    #[test]
    fn test_text_search_keeps_surrounding_whitespace() {
        let catalog = sample_catalog();
        // "Irakaslearen" starts its description, so no space precedes it.
        let plain = FilterSelection::new().with_query("irakaslearen");
        let padded = FilterSelection::new().with_query(" irakaslearen");

        assert_eq!(ids(&filter(&catalog, &plain)), vec![2]);
        assert!(filter(&catalog, &padded).is_empty());
    }

    #[test]
    fn test_text_search_without_match_is_empty() {
        let catalog = sample_catalog();
        let selection = FilterSelection::new().with_query("blockchain");
        assert!(filter(&catalog, &selection).is_empty());
    }

    // ==================== Dimension Tests ====================

    #[test]
    fn test_category_filter_is_or_within_dimension() {
        let catalog = sample_catalog();
        let mut selection = FilterSelection::new();
        selection.toggle_category(Category::Gamification);
        selection.toggle_category(Category::ContentCreation);

        assert_eq!(ids(&filter(&catalog, &selection)), vec![1, 3]);
    }

    #[test]
    fn test_stage_filter_uses_intersection() {
        let catalog = sample_catalog();
        let mut selection = FilterSelection::new();
        selection.toggle_stage(Stage::Vocational);
        selection.toggle_stage(Stage::University);

        assert_eq!(ids(&filter(&catalog, &selection)), vec![2]);
    }

    #[test]
    fn test_stage_filter_without_shared_tag_excludes() {
        let catalog = sample_catalog();
        let mut selection = FilterSelection::new();
        selection.toggle_stage(Stage::EarlyChildhood);
        selection.toggle_stage(Stage::UpperSecondary);

        assert!(filter(&catalog, &selection).is_empty());
    }

    #[test]
    fn test_role_filter_student_includes_both_excludes_teacher() {
        let catalog = sample_catalog();
        let mut selection = FilterSelection::new();
        selection.toggle_role(Audience::Student);

        assert_eq!(ids(&filter(&catalog, &selection)), vec![1, 3]);
    }

    #[test]
    fn test_role_filter_teacher_includes_both() {
        let catalog = sample_catalog();
        let mut selection = FilterSelection::new();
        selection.toggle_role(Audience::Teacher);

        assert_eq!(ids(&filter(&catalog, &selection)), vec![1, 2]);
    }

    #[test]
    fn test_role_filter_both_only_matches_both_entries() {
        let catalog = sample_catalog();
        let mut selection = FilterSelection::new();
        selection.toggle_role(Audience::Both);

        assert_eq!(ids(&filter(&catalog, &selection)), vec![1]);
    }

    #[test]
    fn test_price_filter() {
        let catalog = sample_catalog();
        let mut selection = FilterSelection::new();
        selection.toggle_price(PriceModel::Free);
        selection.toggle_price(PriceModel::Paid);

        assert_eq!(ids(&filter(&catalog, &selection)), vec![2, 3]);
    }

    #[test]
    fn test_dimensions_combine_with_and() {
        let catalog = sample_catalog();
        let mut selection = FilterSelection::new().with_query("a");
        selection.toggle_stage(Stage::Primary);
        selection.toggle_price(PriceModel::Freemium);

        assert_eq!(ids(&filter(&catalog, &selection)), vec![1]);
    }

    #[test]
    fn test_matches_agrees_with_filter() {
        let catalog = sample_catalog();
        let mut selection = FilterSelection::new();
        selection.toggle_role(Audience::Student);

        let via_matches: Vec<u32> = catalog
            .entries()
            .iter()
            .filter(|e| selection.matches(e))
            .map(|e| e.id)
            .collect();
        assert_eq!(via_matches, ids(&filter(&catalog, &selection)));
    }

    // ==================== Selection State Tests ====================

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut selection = FilterSelection::new();
        selection.toggle_price(PriceModel::Free);
        assert!(selection.prices.contains(&PriceModel::Free));

        selection.toggle_price(PriceModel::Free);
        assert!(selection.prices.is_empty());
    }

    #[test]
    fn test_active_filter_count_sums_sets_and_ignores_query() {
        let mut selection = FilterSelection::new().with_query("kahoot");
        selection.toggle_category(Category::Gamification);
        selection.toggle_stage(Stage::Primary);
        selection.toggle_stage(Stage::Secondary);
        selection.toggle_role(Audience::Teacher);

        assert_eq!(selection.active_filter_count(), 4);
        assert!(selection.has_active_filters());
    }

    #[test]
    fn test_query_alone_is_not_an_active_filter() {
        let selection = FilterSelection::new().with_query("kahoot");
        assert_eq!(selection.active_filter_count(), 0);
        assert!(!selection.has_active_filters());
        assert!(!selection.is_empty());
    }

    #[test]
    fn test_reset_restores_full_catalog() {
        let catalog = sample_catalog();
        let mut selection = FilterSelection::new().with_query("scratch");
        selection.toggle_category(Category::Assessment);
        selection.toggle_price(PriceModel::Paid);

        selection.reset();

        assert_eq!(selection, FilterSelection::default());
        assert_eq!(selection.active_filter_count(), 0);
        assert_eq!(ids(&filter(&catalog, &selection)), vec![1, 2, 3]);
    }

    #[test]
    fn test_selection_round_trips_through_json() {
        let mut selection = FilterSelection::new().with_query("quiz");
        selection.toggle_stage(Stage::UpperSecondary);

        let json = serde_json::to_string(&selection).unwrap();
        assert!(json.contains("upper-secondary"));

        let restored: FilterSelection = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, selection);
    }
}
