use actix_web::{HttpResponse, Responder, get, post, rt, web};
use serde::Deserialize;

use crate::domain::types::OutfitId;
use crate::dto::outfits::OutfitBatchDto;
use crate::routes::{error_response, message};
use crate::services::ServiceError;
use crate::services::filters::{OccasionFilter, filter_outfits_by_occasion};
use crate::state::AppState;

#[derive(Deserialize, Debug)]
struct OutfitsQueryParams {
    occasion: Option<String>,
}

#[get("/outfits")]
pub async fn list_outfits(
    params: web::Query<OutfitsQueryParams>,
    state: web::Data<AppState>,
) -> impl Responder {
    let filter = OccasionFilter::parse(params.occasion.as_deref());
    match state.outfits() {
        Ok(outfits) => HttpResponse::Ok().json(OutfitBatchDto {
            message: None,
            outfits: filter_outfits_by_occasion(outfits, filter),
        }),
        Err(err) => error_response(err),
    }
}

/// Regenerate the batch after the configured delay. A client that goes away
/// during the delay drops this future and the previous batch stays published.
#[post("/outfits/generate")]
pub async fn generate_outfits(state: web::Data<AppState>) -> impl Responder {
    if !state.generation_delay.is_zero() {
        rt::time::sleep(state.generation_delay).await;
    }

    match state.regenerate() {
        Ok(outfits) => HttpResponse::Ok().json(OutfitBatchDto {
            message: Some(format!(
                "{} outfit combinations created based on your wardrobe.",
                outfits.len()
            )),
            outfits,
        }),
        Err(err @ ServiceError::InsufficientItems { .. }) => error_response(err),
        Err(err) => {
            log::error!("Failed to generate outfits: {err}");
            error_response(err)
        }
    }
}

/// Acknowledge a save request for a published outfit. Saved outfits are not
/// persisted.
#[post("/outfits/{outfit_id}/save")]
pub async fn save_outfit(
    outfit_id: web::Path<String>,
    state: web::Data<AppState>,
) -> impl Responder {
    let id = match OutfitId::new(outfit_id.into_inner()) {
        Ok(id) => id,
        Err(err) => return error_response(err.into()),
    };

    match state.outfits() {
        Ok(outfits) if outfits.iter().any(|o| o.id == id) => HttpResponse::Ok().json(message(
            "This outfit has been saved to your collection.",
        )),
        Ok(_) => error_response(ServiceError::NotFound),
        Err(err) => error_response(err),
    }
}
