use axum::{body, http::StatusCode, response::IntoResponse};
use serde_json::json;
use uuid::Uuid;

use axum_restaurant_api::{
    dto::{auth::LoginResponse, menu::UpdateMenuItemRequest, orders::PlaceOrderRequest},
    error::AppError,
    models::UserProfile,
    services::auth_service,
};

async fn response_parts(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}

#[tokio::test]
async fn errors_map_to_statuses_and_error_body() {
    let (status, body) = response_parts(AppError::Conflict("Email already exists".into())).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, json!({ "error": "Email already exists" }));

    let (status, body) = response_parts(AppError::Unauthorized("Invalid credentials".into())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "Invalid credentials" }));

    let (status, body) = response_parts(AppError::Forbidden).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, json!({ "error": "Unauthorized" }));

    let (status, body) = response_parts(AppError::NotFound("Menu item not found".into())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Menu item not found" }));

    let (status, body) = response_parts(AppError::BadRequest("Invalid input".into())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid input" }));

    let (status, body) = response_parts(AppError::Internal(anyhow::anyhow!("boom"))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    // Internal details stay out of the response body.
    assert_eq!(body, json!({ "error": "Internal Server Error" }));
}

#[test]
fn quantity_accepts_numbers_and_numeric_strings() {
    let payload: PlaceOrderRequest =
        serde_json::from_value(json!({ "order": "Margherita Pizza", "quantity": 3 }))
            .expect("number quantity");
    assert_eq!(payload.quantity.unwrap().as_count(), Some(3));

    let payload: PlaceOrderRequest =
        serde_json::from_value(json!({ "order": "Margherita Pizza", "quantity": "3" }))
            .expect("string quantity");
    assert_eq!(payload.quantity.unwrap().as_count(), Some(3));

    let payload: PlaceOrderRequest =
        serde_json::from_value(json!({ "order": "Margherita Pizza", "quantity": " 2 " }))
            .expect("padded string quantity");
    assert_eq!(payload.quantity.unwrap().as_count(), Some(2));

    let payload: PlaceOrderRequest =
        serde_json::from_value(json!({ "order": "Margherita Pizza", "quantity": "plenty" }))
            .expect("still deserializes");
    assert_eq!(payload.quantity.unwrap().as_count(), None);
}

#[test]
fn order_payload_tolerates_extra_form_fields() {
    // The order form sends more fields than the backend reads.
    let payload: PlaceOrderRequest = serde_json::from_value(json!({
        "name": "Alice",
        "number": "555-0199",
        "order": "Margherita Pizza",
        "additional": "extra cheese",
        "quantity": "2",
        "order_time": "19:00"
    }))
    .expect("extra fields are ignored");

    assert_eq!(payload.order.as_deref(), Some("Margherita Pizza"));
    assert_eq!(payload.quantity.unwrap().as_count(), Some(2));
}

#[test]
fn menu_update_distinguishes_null_from_absent_image() {
    let payload: UpdateMenuItemRequest =
        serde_json::from_value(json!({ "price": 12.0 })).expect("absent image_url");
    assert_eq!(payload.image_url, None);

    let payload: UpdateMenuItemRequest =
        serde_json::from_value(json!({ "image_url": null })).expect("null image_url");
    assert_eq!(payload.image_url, Some(None));

    let payload: UpdateMenuItemRequest =
        serde_json::from_value(json!({ "image_url": "images/new.jpg" })).expect("new image_url");
    assert_eq!(payload.image_url, Some(Some("images/new.jpg".to_string())));
}

#[test]
fn password_hashing_roundtrip() {
    let hash = auth_service::hash_password("s3cret-pass").expect("hash");
    assert_ne!(hash, "s3cret-pass");

    assert!(auth_service::verify_password(&hash, "s3cret-pass").expect("verify"));
    assert!(!auth_service::verify_password(&hash, "wrong-pass").expect("verify"));
}

#[test]
fn login_response_exposes_profile_without_password() {
    let resp = LoginResponse {
        message: "Login successful".to_string(),
        user: UserProfile {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            is_admin: false,
        },
    };

    let value = serde_json::to_value(&resp).expect("serialize");
    assert_eq!(value["message"], "Login successful");
    assert_eq!(value["user"]["username"], "alice");
    assert_eq!(value["user"]["is_admin"], false);
    assert!(value["user"].get("password_hash").is_none());
    assert!(value["user"].get("email").is_none());
}
