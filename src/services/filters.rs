//! Stateless narrowing of wardrobe items and outfit batches.
//!
//! Every filter is a predicate applied with `retain`, so the relative order of
//! the input is preserved and filters can be combined in any order.

use std::collections::HashSet;

use crate::domain::item::ClothingItem;
use crate::domain::outfit::Outfit;
use crate::domain::types::{Category, Color, Occasion};

/// Category selection as submitted by a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// No narrowing.
    #[default]
    All,
    /// Keep items of one category.
    Only(Category),
    /// A category outside the known set; nothing matches.
    Unrecognized,
}

impl CategoryFilter {
    /// `None`, blank and `"all"` select everything.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => Self::All,
            Some(v) if v.eq_ignore_ascii_case("all") => Self::All,
            Some(v) => Category::try_from(v).map_or(Self::Unrecognized, Self::Only),
        }
    }

    pub fn matches(&self, item: &ClothingItem) -> bool {
        self.matches_with_needle(item, &normalize_search(&self.search))
    }

    pub fn apply(&self, mut items: Vec<ClothingItem>) -> Vec<ClothingItem> {
        let needle = normalize_search(&self.search);
        items.retain(|item| self.matches_with_needle(item, &needle));
        items
    }

    fn matches_with_needle(&self, item: &ClothingItem, needle: &str) -> bool {
        matches_search(item, needle)
            && self.category.matches(item)
            && matches_tags(item, &self.tags)
            && matches_color(item, self.color)
    }
}
