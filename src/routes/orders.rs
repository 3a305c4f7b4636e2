use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
};
use uuid::Uuid;

use crate::{
    dto::orders::{OrderView, PlaceOrderRequest, PlaceOrderResponse, UpdateOrderStatusRequest},
    error::AppResult,
    middleware::auth::{AdminUser, AuthUser},
    response::MessageResponse,
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/order", post(place_order))
        .route("/order/view", get(view_orders))
        .route("/order/update_status/{id}", put(update_order_status))
}

#[utoipa::path(
    post,
    path = "/api/order",
    request_body = PlaceOrderRequest,
    responses(
        (status = 201, description = "Order placed", body = PlaceOrderResponse),
        (status = 400, description = "Missing order or quantity"),
        (status = 404, description = "Menu item not found")
    ),
    security(("session_cookie" = [])),
    tag = "Orders"
)]
pub async fn place_order(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<PlaceOrderRequest>,
) -> AppResult<(StatusCode, Json<PlaceOrderResponse>)> {
    let resp = order_service::place_order(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/order/view",
    responses(
        (status = 200, description = "Orders visible to the caller", body = Vec<OrderView>)
    ),
    security(("session_cookie" = [])),
    tag = "Orders"
)]
pub async fn view_orders(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<OrderView>>> {
    let orders = order_service::view_orders(&state, &user).await?;
    Ok(Json(orders))
}

#[utoipa::path(
    put,
    path = "/order/update_status/{id}",
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Status replaced", body = MessageResponse),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Order not found")
    ),
    security(("session_cookie" = [])),
    tag = "Orders"
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    AdminUser(user): AdminUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOrderStatusRequest>,
) -> AppResult<Json<MessageResponse>> {
    let resp = order_service::update_order_status(&state, &user, id, payload).await?;
    Ok(Json(resp))
}
