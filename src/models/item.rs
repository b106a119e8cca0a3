use serde::Deserialize;

use crate::domain::item::ClothingItem;
use crate::domain::types::{
    Category, Color, ImageRef, ItemDescription, ItemId, ItemName, TypeConstraintError,
    normalize_tags,
};

/// One entry of the persisted `wardrobe` record as it was written, before any
/// domain constraint is applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoredClothingItem {
    pub id: String,
    pub image: String,
    pub category: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl TryFrom<StoredClothingItem> for ClothingItem {
    type Error = TypeConstraintError;

    /// Identity fields must be valid; blank text, blank tags and colours
    /// outside the palette are dropped.
    fn try_from(item: StoredClothingItem) -> Result<Self, Self::Error> {
        let id = ItemId::new(item.id)?;

        let color = non_blank(item.color).and_then(|raw| match Color::try_from(raw.as_str()) {
            Ok(color) => Some(color),
            Err(e) => {
                log::warn!("Dropping colour of item {id}: {e}");
                None
            }
        });

        Ok(Self {
            image: ImageRef::new(item.image)?,
            category: Category::try_from(item.category.as_str())?,
            name: non_blank(item.name).map(ItemName::new).transpose()?,
            description: non_blank(item.description)
                .map(ItemDescription::new)
                .transpose()?,
            color,
            tags: normalize_tags(item.tags),
            id,
        })
    }
}
