use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::item::NewClothingItem;
use crate::domain::types::{
    Category, Color, ImageRef, ItemDescription, ItemName, Tag, TypeConstraintError,
    normalize_tags,
};

/// Maximum number of tags accepted on a single item.
pub const MAX_TAGS: u64 = 20;

fn default_category() -> String {
    Category::Tops.as_str().to_string()
}

/// Treat blank optional text as absent.
fn optional_text<T, F>(value: Option<String>, build: F) -> Result<Option<T>, TypeConstraintError>
where
    F: FnOnce(String) -> Result<T, TypeConstraintError>,
{
    match value {
        Some(v) if !v.trim().is_empty() => build(v).map(Some),
        _ => Ok(None),
    }
}

/// Item metadata shared by JSON and multipart submissions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemDetails {
    pub category: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub tags: Vec<String>,
}

impl ItemDetails {
    /// Validate the metadata and attach it to an image reference.
    pub fn into_new_item(self, image: ImageRef) -> Result<NewClothingItem, TypeConstraintError> {
        let category = self.category.unwrap_or_else(default_category);
        Ok(NewClothingItem {
            image,
            category: Category::try_from(category.as_str())?,
            name: optional_text(self.name, ItemName::new)?,
            description: optional_text(self.description, ItemDescription::new)?,
            color: optional_text(self.color, |v| Color::try_from(v.as_str()))?,
            tags: normalize_tags(self.tags),
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct AddItemForm {
    #[validate(length(min = 1))]
    pub image: String,
    #[serde(default = "default_category")]
    pub category: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    #[serde(default)]
    #[validate(length(max = MAX_TAGS))]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddItemFormPayload {
    pub item: NewClothingItem,
}

#[derive(Debug, Error)]
pub enum AddItemFormError {
    #[error("Add item form validation failed: {0}")]
    Validation(String),
    #[error("Add item form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for AddItemFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for AddItemFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<AddItemForm> for AddItemFormPayload {
    type Error = AddItemFormError;

    fn try_from(value: AddItemForm) -> Result<Self, Self::Error> {
        value.validate()?;
        let image = ImageRef::new(value.image)?;
        let details = ItemDetails {
            category: Some(value.category),
            name: value.name,
            description: value.description,
            color: value.color,
            tags: value.tags,
        };
        Ok(Self {
            item: details.into_new_item(image)?,
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct UpdateTagsForm {
    #[validate(length(max = MAX_TAGS))]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateTagsFormPayload {
    pub tags: Vec<Tag>,
}

#[derive(Debug, Error)]
pub enum UpdateTagsFormError {
    #[error("Update tags form validation failed: {0}")]
    Validation(String),
}

impl From<ValidationErrors> for UpdateTagsFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl TryFrom<UpdateTagsForm> for UpdateTagsFormPayload {
    type Error = UpdateTagsFormError;

    fn try_from(value: UpdateTagsForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            tags: normalize_tags(value.tags),
        })
    }
}
