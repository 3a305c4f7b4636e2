use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
};
use uuid::Uuid;

use crate::{
    dto::menu::{CreateMenuItemRequest, UpdateMenuItemRequest},
    error::AppResult,
    middleware::auth::AdminUser,
    models::MenuItem,
    response::MessageResponse,
    services::menu_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/view", get(view_menu))
        .route("/add", post(add_menu_item))
        .route("/update/{id}", put(update_menu_item))
        .route("/delete/{id}", delete(delete_menu_item))
}

#[utoipa::path(
    get,
    path = "/menu/view",
    responses(
        (status = 200, description = "All menu items", body = Vec<MenuItem>)
    ),
    tag = "Menu"
)]
pub async fn view_menu(State(state): State<AppState>) -> AppResult<Json<Vec<MenuItem>>> {
    let items = menu_service::list_menu(&state).await?;
    Ok(Json(items))
}

#[utoipa::path(
    post,
    path = "/menu/add",
    request_body = CreateMenuItemRequest,
    responses(
        (status = 201, description = "Menu item created", body = MessageResponse),
        (status = 403, description = "Admin only")
    ),
    security(("session_cookie" = [])),
    tag = "Menu"
)]
pub async fn add_menu_item(
    State(state): State<AppState>,
    AdminUser(user): AdminUser,
    Json(payload): Json<CreateMenuItemRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let resp = menu_service::add_menu_item(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/menu/update/{id}",
    params(
        ("id" = Uuid, Path, description = "Menu item ID")
    ),
    request_body = UpdateMenuItemRequest,
    responses(
        (status = 200, description = "Menu item updated", body = MessageResponse),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Menu item not found")
    ),
    security(("session_cookie" = [])),
    tag = "Menu"
)]
pub async fn update_menu_item(
    State(state): State<AppState>,
    AdminUser(user): AdminUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateMenuItemRequest>,
) -> AppResult<Json<MessageResponse>> {
    let resp = menu_service::update_menu_item(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/menu/delete/{id}",
    params(
        ("id" = Uuid, Path, description = "Menu item ID")
    ),
    responses(
        (status = 200, description = "Menu item deleted", body = MessageResponse),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Menu item not found")
    ),
    security(("session_cookie" = [])),
    tag = "Menu"
)]
pub async fn delete_menu_item(
    State(state): State<AppState>,
    AdminUser(user): AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    let resp = menu_service::delete_menu_item(&state, &user, id).await?;
    Ok(Json(resp))
}
