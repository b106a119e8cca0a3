//! JSON HTTP surface of the wardrobe service.

use actix_multipart::form::MultipartFormConfig;
use actix_web::error::InternalError;
use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::forms::upload::{MULTIPART_OVERHEAD_BYTES, UploadItemFormError};
use crate::services::ServiceError;

pub mod items;
pub mod outfits;
pub mod traits;

/// Body of every confirmation and error response.
#[derive(Debug, Serialize)]
pub struct MessageDto<'a> {
    pub message: &'a str,
}

pub fn message(message: &str) -> MessageDto<'_> {
    MessageDto { message }
}

/// Map a service failure onto an HTTP response.
pub fn error_response(err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::NotFound => HttpResponse::NotFound().json(message("Item not found")),
        ServiceError::InsufficientItems { .. } => HttpResponse::UnprocessableEntity().json(
            message("Add at least 2 items to your wardrobe to generate outfits."),
        ),
        ServiceError::InvalidFile(ref msg)
        | ServiceError::Form(ref msg)
        | ServiceError::TypeConstraint(ref msg) => {
            HttpResponse::UnprocessableEntity().json(message(msg))
        }
        ServiceError::Storage(_) => HttpResponse::ServiceUnavailable()
            .json(message("Your changes could not be saved. Please try again.")),
        ServiceError::Internal => HttpResponse::InternalServerError().finish(),
    }
}

/// Multipart limits for image uploads. Bodies beyond the limit are answered
/// with the same rejection notice as an oversized image.
pub fn upload_form_config(max_upload_bytes: usize) -> MultipartFormConfig {
    MultipartFormConfig::default()
        .total_limit(max_upload_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES))
        .error_handler(move |err, _req| {
            let rejection = UploadItemFormError::from_multipart(&err, max_upload_bytes);
            log::warn!("Rejected upload: {err}");
            InternalError::from_response(err, error_response(rejection.into())).into()
        })
}

/// Register every route under `/api/v1`.
pub fn configure(max_upload_bytes: usize) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.service(
            web::scope("/api/v1")
                .app_data(upload_form_config(max_upload_bytes))
                .service(items::list_items)
                .service(items::add_item)
                .service(items::upload_item)
                .service(items::remove_item)
                .service(items::update_item_tags)
                .service(outfits::list_outfits)
                .service(outfits::generate_outfits)
                .service(outfits::save_outfit)
                .service(traits::show_traits)
                .service(traits::update_traits),
        );
    }
}
