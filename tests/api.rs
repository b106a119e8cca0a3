use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use outfit_ai::models::config::ServerConfig;
use outfit_ai::repository::DieselRepository;
use outfit_ai::routes::configure;
use outfit_ai::state::AppState;
use serde_json::{Value, json};

mod common;

fn state_with_limit(test_db: &common::TestDb, max_upload_bytes: usize) -> web::Data<AppState> {
    let config = ServerConfig {
        generation_delay_ms: 0,
        max_upload_bytes,
        ..ServerConfig::default()
    };
    web::Data::new(AppState::new(DieselRepository::new(test_db.pool()), &config))
}

fn state(test_db: &common::TestDb) -> web::Data<AppState> {
    state_with_limit(test_db, ServerConfig::default().max_upload_bytes)
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data($state.clone())
                .configure(configure($state.max_upload_bytes)),
        )
        .await
    };
}

const BOUNDARY: &str = "wardrobe-upload-boundary";

/// Build a `multipart/form-data` body with one file part followed by text
/// fields.
fn multipart_body(content_type: &str, file: &[u8], fields: &[(&str, &str)]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; \
             filename=\"photo\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(file);
    body.extend_from_slice(b"\r\n");
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n\
                 {value}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload_request(body: Vec<u8>) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/items/upload")
        .insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(body)
}

#[actix_web::test]
async fn add_list_and_remove_items() {
    let test_db = common::TestDb::new();
    let state = state(&test_db);
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/items")
        .set_json(json!({
            "image": "data:image/png;base64,AA==",
            "category": "bottoms",
            "name": "Grey chinos",
            "color": "gray",
            "tags": ["work"]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["message"],
        "Your bottoms item has been added to your wardrobe."
    );
    let id = body["item"]["id"].as_str().unwrap().to_string();
    assert!(id.starts_with("item-"));

    let req = test::TestRequest::get()
        .uri("/api/v1/items?search=CHINOS&tags=work")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["colors"], json!(["gray"]));
    assert_eq!(body["categories"]["bottoms"], 1);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/items/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/items/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn invalid_item_data_is_rejected() {
    let test_db = common::TestDb::new();
    let state = state(&test_db);
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/items")
        .set_json(json!({"image": "/img/hat.png", "category": "hats"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let req = test::TestRequest::get()
        .uri("/api/v1/items?color=mauve")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[actix_web::test]
async fn update_tags_replaces_tag_list() {
    let test_db = common::TestDb::new();
    let state = state(&test_db);
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/items")
        .set_json(json!({"image": "/img/shirt.png", "tags": ["old"]}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let id = body["item"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/items/{id}/tags"))
        .set_json(json!({"tags": ["summer", "summer", " "]}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["item"]["tags"], json!(["summer"]));

    let req = test::TestRequest::put()
        .uri("/api/v1/items/item-0-0/tags")
        .set_json(json!({"tags": []}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn generation_requires_two_items() {
    let test_db = common::TestDb::new();
    let state = state(&test_db);
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/outfits/generate")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[actix_web::test]
async fn generate_publish_filter_and_save_outfits() {
    let test_db = common::TestDb::new();
    let state = state(&test_db);
    let app = app!(state);

    for category in ["tops", "bottoms"] {
        let req = test::TestRequest::post()
            .uri("/api/v1/items")
            .set_json(json!({"image": "/img/x.png", "category": category}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::post()
        .uri("/api/v1/outfits/generate")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let outfits = body["outfits"].as_array().unwrap();
    assert_eq!(outfits.len(), 1);
    assert_eq!(
        body["message"],
        "1 outfit combinations created based on your wardrobe."
    );
    let outfit_id = outfits[0]["id"].as_str().unwrap().to_string();
    let occasion = outfits[0]["occasion"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/outfits?occasion={occasion}"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["outfits"].as_array().unwrap().len(), 1);
    assert!(body.get("message").is_none());

    let req = test::TestRequest::get()
        .uri("/api/v1/outfits?occasion=party")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["outfits"].as_array().unwrap().is_empty());

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/outfits/{outfit_id}/save"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/v1/outfits/outfit-0-9/save")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn traits_are_stored_and_returned() {
    let test_db = common::TestDb::new();
    let state = state(&test_db);
    let app = app!(state);

    let req = test::TestRequest::get().uri("/api/v1/traits").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["style"], "");

    let req = test::TestRequest::put()
        .uri("/api/v1/traits")
        .set_json(json!({"colorPreference": " pastels ", "style": "boho"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["colorPreference"], "pastels");

    let req = test::TestRequest::get().uri("/api/v1/traits").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["style"], "boho");
    assert_eq!(body["season"], "");
}

#[actix_web::test]
async fn upload_embeds_image_with_default_category() {
    let test_db = common::TestDb::new();
    let state = state(&test_db);
    let app = app!(state);

    let body = multipart_body("image/png", &[0, 1, 2], &[("tags", "summer, beach,,summer")]);
    let resp = test::call_service(&app, upload_request(body).to_request()).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["item"]["category"], "tops");
    assert_eq!(body["item"]["image"], "data:image/png;base64,AAEC");
    assert_eq!(body["item"]["tags"], json!(["summer", "beach"]));
    assert_eq!(
        body["message"],
        "Your tops item has been added to your wardrobe."
    );
    assert_eq!(state.wardrobe().unwrap().len(), 1);
}

#[actix_web::test]
async fn upload_rejects_non_image_files() {
    let test_db = common::TestDb::new();
    let state = state(&test_db);
    let app = app!(state);

    let body = multipart_body("application/pdf", b"%PDF-1.7", &[("category", "shoes")]);
    let resp = test::call_service(&app, upload_request(body).to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Please upload an image file");
    assert!(state.wardrobe().unwrap().is_empty());
}

#[actix_web::test]
async fn upload_rejects_oversized_images() {
    let test_db = common::TestDb::new();
    let state = state_with_limit(&test_db, 1024 * 1024);
    let app = app!(state);

    // Just over the configured size: rejected after the body was read.
    let body = multipart_body("image/png", &vec![0; 1024 * 1024 + 1], &[]);
    let resp = test::call_service(&app, upload_request(body).to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Image size should be less than 1MB");

    // Far beyond the multipart limit: rejected while streaming.
    let body = multipart_body("image/png", &vec![0; 2 * 1024 * 1024], &[]);
    let resp = test::call_service(&app, upload_request(body).to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Image size should be less than 1MB");

    assert!(state.wardrobe().unwrap().is_empty());
}

#[actix_web::test]
async fn upload_accepts_images_above_default_limit_when_configured() {
    let test_db = common::TestDb::new();
    let state = state_with_limit(&test_db, 20 * 1024 * 1024);
    let app = app!(state);

    let image = vec![7; 17 * 1024 * 1024];
    let body = multipart_body("image/jpeg", &image, &[("category", "shoes")]);
    let resp = test::call_service(&app, upload_request(body).to_request()).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
}
