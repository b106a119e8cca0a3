use serde::{Deserialize, Serialize};

use crate::domain::item::ClothingItem;
use crate::domain::types::{Occasion, OutfitId};

/// A generated combination of wardrobe items.
///
/// Items are embedded by value: the outfit is a snapshot taken at generation
/// time and is not updated when the wardrobe changes afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Outfit {
    pub id: OutfitId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<ClothingItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<ClothingItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outerwear: Option<ClothingItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shoes: Option<ClothingItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub accessories: Vec<ClothingItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occasion: Option<Occasion>,
}
