use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::domain::item::NewClothingItem;
use crate::domain::types::ItemId;
use crate::dto::wardrobe::ItemMutationDto;
use crate::forms::items::{
    AddItemForm, AddItemFormPayload, UpdateTagsForm, UpdateTagsFormPayload,
};
use crate::forms::upload::UploadItemForm;
use crate::routes::{error_response, message};
use crate::services::ServiceResult;
use crate::services::wardrobe::{ItemsQueryParams, show_wardrobe};
use crate::state::AppState;

fn parse_item_id(raw: String) -> ServiceResult<ItemId> {
    Ok(ItemId::new(raw)?)
}

fn store_new_item(state: &AppState, item: NewClothingItem) -> HttpResponse {
    let added = state
        .wardrobe()
        .and_then(|mut wardrobe| wardrobe.add(item, &mut rand::rng()));

    match added {
        Ok(item) => HttpResponse::Created().json(ItemMutationDto {
            message: format!("Your {} item has been added to your wardrobe.", item.category),
            item,
        }),
        Err(err) => {
            log::error!("Failed to add wardrobe item: {err}");
            error_response(err)
        }
    }
}

#[get("/items")]
pub async fn list_items(
    params: web::Query<ItemsQueryParams>,
    state: web::Data<AppState>,
) -> impl Responder {
    let result = state
        .wardrobe()
        .and_then(|wardrobe| show_wardrobe(&*wardrobe, params.into_inner()));

    match result {
        Ok(dto) => HttpResponse::Ok().json(dto),
        Err(err) => error_response(err),
    }
}

#[post("/items")]
pub async fn add_item(form: web::Json<AddItemForm>, state: web::Data<AppState>) -> impl Responder {
    let payload: AddItemFormPayload = match form.into_inner().try_into() {
        Ok(payload) => payload,
        Err(err) => return error_response(err.into()),
    };

    store_new_item(&state, payload.item)
}

#[post("/items/upload")]
pub async fn upload_item(
    MultipartForm(form): MultipartForm<UploadItemForm>,
    state: web::Data<AppState>,
) -> impl Responder {
    let item = match form.into_new_item(state.max_upload_bytes) {
        Ok(item) => item,
        Err(err) => {
            log::warn!("Rejected upload: {err}");
            return error_response(err.into());
        }
    };

    store_new_item(&state, item)
}

#[delete("/items/{item_id}")]
pub async fn remove_item(item_id: web::Path<String>, state: web::Data<AppState>) -> impl Responder {
    let result = parse_item_id(item_id.into_inner())
        .and_then(|id| state.wardrobe().and_then(|mut wardrobe| wardrobe.remove(&id)));

    match result {
        Ok(()) => HttpResponse::Ok().json(message(
            "The clothing item has been removed from your wardrobe.",
        )),
        Err(err) => error_response(err),
    }
}

#[put("/items/{item_id}/tags")]
pub async fn update_item_tags(
    item_id: web::Path<String>,
    form: web::Json<UpdateTagsForm>,
    state: web::Data<AppState>,
) -> impl Responder {
    let payload: UpdateTagsFormPayload = match form.into_inner().try_into() {
        Ok(payload) => payload,
        Err(err) => return error_response(err.into()),
    };

    let result = parse_item_id(item_id.into_inner()).and_then(|id| {
        state
            .wardrobe()
            .and_then(|mut wardrobe| wardrobe.update_tags(&id, payload.tags))
    });

    match result {
        Ok(item) => HttpResponse::Ok().json(ItemMutationDto {
            message: "Item tags have been updated.".to_string(),
            item,
        }),
        Err(err) => error_response(err),
    }
}
