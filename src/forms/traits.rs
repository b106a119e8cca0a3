use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::traits::UserTraits;

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserTraitsForm {
    #[serde(default)]
    #[validate(length(max = 100))]
    pub color_preference: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub body_shape: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub style: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub season: String,
}

#[derive(Debug, Error)]
pub enum UserTraitsFormError {
    #[error("User traits form validation failed: {0}")]
    Validation(String),
}

impl From<ValidationErrors> for UserTraitsFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl TryFrom<UserTraitsForm> for UserTraits {
    type Error = UserTraitsFormError;

    fn try_from(value: UserTraitsForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            color_preference: value.color_preference.trim().to_string(),
            body_shape: value.body_shape.trim().to_string(),
            style: value.style.trim().to_string(),
            season: value.season.trim().to_string(),
        })
    }
}
