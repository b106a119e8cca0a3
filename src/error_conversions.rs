//! Error conversion glue between the domain, repository, form and service
//! layers.
//!
//! The domain layer must not depend on service/repository error types, so the
//! `From` implementations live here.

use crate::domain::types::TypeConstraintError;
use crate::forms::items::{AddItemFormError, UpdateTagsFormError};
use crate::forms::traits::UserTraitsFormError;
use crate::repository::errors::RepositoryError;
use crate::services::errors::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

impl From<AddItemFormError> for ServiceError {
    fn from(val: AddItemFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<UpdateTagsFormError> for ServiceError {
    fn from(val: UpdateTagsFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<UserTraitsFormError> for ServiceError {
    fn from(val: UserTraitsFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

#[cfg(feature = "server")]
impl From<crate::forms::upload::UploadItemFormError> for ServiceError {
    fn from(val: crate::forms::upload::UploadItemFormError) -> Self {
        use crate::forms::upload::UploadItemFormError;

        match val {
            UploadItemFormError::TypeConstraint(message) => ServiceError::Form(message),
            other => ServiceError::InvalidFile(other.to_string()),
        }
    }
}
