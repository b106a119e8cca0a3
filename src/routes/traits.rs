use actix_web::{HttpResponse, Responder, get, put, web};

use crate::domain::traits::UserTraits;
use crate::forms::traits::UserTraitsForm;
use crate::routes::error_response;
use crate::services::ServiceResult;
use crate::services::traits::{load_user_traits, save_user_traits};
use crate::state::AppState;

#[get("/traits")]
pub async fn show_traits(state: web::Data<AppState>) -> impl Responder {
    match state.wardrobe() {
        Ok(wardrobe) => HttpResponse::Ok().json(load_user_traits(wardrobe.repo())),
        Err(err) => error_response(err),
    }
}

#[put("/traits")]
pub async fn update_traits(
    form: web::Json<UserTraitsForm>,
    state: web::Data<AppState>,
) -> impl Responder {
    let result: ServiceResult<UserTraits> = UserTraits::try_from(form.into_inner())
        .map_err(Into::into)
        .and_then(|traits| {
            let wardrobe = state.wardrobe()?;
            save_user_traits(&traits, wardrobe.repo())?;
            Ok(traits)
        });

    match result {
        Ok(traits) => HttpResponse::Ok().json(traits),
        Err(err) => error_response(err),
    }
}
