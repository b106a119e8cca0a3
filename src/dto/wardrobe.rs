use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::item::ClothingItem;
use crate::domain::types::{Category, Color, Tag};

/// Filtered wardrobe view together with the indices used to build filters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WardrobeDto {
    /// Number of items in the whole wardrobe, before filtering.
    pub total: usize,
    pub items: Vec<ClothingItem>,
    pub tags: Vec<Tag>,
    pub colors: Vec<Color>,
    pub categories: BTreeMap<Category, usize>,
}

/// Item returned after a mutation, with a confirmation message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemMutationDto {
    pub message: String,
    pub item: ClothingItem,
}
