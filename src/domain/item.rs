use serde::{Deserialize, Serialize};

use crate::domain::types::{Category, Color, ImageRef, ItemDescription, ItemId, ItemName, Tag};

/// A clothing item kept in the wardrobe.
///
/// Field names match the persisted `wardrobe` record exactly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClothingItem {
    pub id: ItemId,
    pub image: ImageRef,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<ItemName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<ItemDescription>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl ClothingItem {
    /// Attach an identifier to the supplied item fields.
    pub fn from_new(id: ItemId, item: NewClothingItem) -> Self {
        Self {
            id,
            image: item.image,
            category: item.category,
            name: item.name,
            description: item.description,
            color: item.color,
            tags: item.tags,
        }
    }

    /// Whether the item carries the given tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.as_str() == tag)
    }
}

/// Data required to insert a new [`ClothingItem`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewClothingItem {
    pub image: ImageRef,
    pub category: Category,
    pub name: Option<ItemName>,
    pub description: Option<ItemDescription>,
    pub color: Option<Color>,
    pub tags: Vec<Tag>,
}

impl NewClothingItem {
    /// Minimal item: an image and its category.
    pub fn new(image: ImageRef, category: Category) -> Self {
        Self {
            image,
            category,
            name: None,
            description: None,
            color: None,
            tags: Vec::new(),
        }
    }
}
