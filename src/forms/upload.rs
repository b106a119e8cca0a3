use std::io::{Read, Seek, SeekFrom};

use actix_multipart::MultipartError;
use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use actix_web::error::PayloadError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

use crate::domain::item::NewClothingItem;
use crate::domain::types::{ImageRef, TypeConstraintError};
use crate::forms::items::ItemDetails;

/// Largest image accepted by default: 5 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Room left for boundaries, headers and text fields on top of the image.
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

#[derive(MultipartForm)]
pub struct UploadItemForm {
    pub file: TempFile,
    pub category: Option<Text<String>>,
    pub name: Option<Text<String>>,
    pub description: Option<Text<String>>,
    pub color: Option<Text<String>>,
    /// Comma separated.
    pub tags: Option<Text<String>>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadItemFormError {
    #[error("Please upload an image file")]
    NotAnImage,
    #[error("Image size should be less than {max_mib}MB")]
    TooLarge { max_mib: usize },
    #[error("failed to read uploaded file")]
    ReadFailed,
    #[error("Invalid upload: {0}")]
    Malformed(String),
    #[error("Upload form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<std::io::Error> for UploadItemFormError {
    fn from(_: std::io::Error) -> Self {
        Self::ReadFailed
    }
}

impl From<TypeConstraintError> for UploadItemFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl UploadItemFormError {
    pub fn too_large(max_bytes: usize) -> Self {
        Self::TooLarge {
            max_mib: max_bytes.div_ceil(1024 * 1024),
        }
    }

    /// Classify a failure raised while the multipart body was being read.
    pub fn from_multipart(err: &MultipartError, max_bytes: usize) -> Self {
        match err {
            MultipartError::Payload(PayloadError::Overflow) => Self::too_large(max_bytes),
            MultipartError::MissingField(_) => Self::NotAnImage,
            other => Self::Malformed(other.to_string()),
        }
    }
}

/// Accept only `image/*` content no larger than `max_bytes`.
pub fn validate_image_meta(
    content_type: Option<&str>,
    size: usize,
    max_bytes: usize,
) -> Result<(), UploadItemFormError> {
    let is_image = content_type
        .and_then(|mime| mime.split('/').next())
        .is_some_and(|kind| kind.trim().eq_ignore_ascii_case("image"));
    if !is_image {
        return Err(UploadItemFormError::NotAnImage);
    }

    if size > max_bytes {
        return Err(UploadItemFormError::too_large(max_bytes));
    }

    Ok(())
}

/// Embed raw image bytes as a base64 data URI.
pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',').map(str::to_string).collect()
}

impl UploadItemForm {
    /// Validate the upload and turn it into a new wardrobe item.
    ///
    /// Nothing is read from the file unless its metadata passes validation.
    pub fn into_new_item(
        mut self,
        max_bytes: usize,
    ) -> Result<NewClothingItem, UploadItemFormError> {
        let mime = self
            .file
            .content_type
            .as_ref()
            .map(|m| m.essence_str().to_string());
        validate_image_meta(mime.as_deref(), self.file.size, max_bytes)?;

        let file = self.file.file.as_file_mut();
        file.seek(SeekFrom::Start(0))?;
        let mut bytes = Vec::with_capacity(self.file.size);
        file.read_to_end(&mut bytes)?;

        let mime = mime.unwrap_or_default();
        let image = ImageRef::new(encode_data_uri(&mime, &bytes))?;

        let details = ItemDetails {
            category: self.category.map(Text::into_inner),
            name: self.name.map(Text::into_inner),
            description: self.description.map(Text::into_inner),
            color: self.color.map(Text::into_inner),
            tags: self
                .tags
                .map(|t| split_tags(&t.into_inner()))
                .unwrap_or_default(),
        };
        Ok(details.into_new_item(image)?)
    }
}
