use uuid::Uuid;

use crate::{
    dto::menu::{CreateMenuItemRequest, UpdateMenuItemRequest},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::MenuItem,
    response::MessageResponse,
    state::AppState,
};

pub async fn list_menu(state: &AppState) -> AppResult<Vec<MenuItem>> {
    let items = sqlx::query_as::<_, MenuItem>(
        "SELECT id, name, description, price, image_url FROM menu_items ORDER BY created_at",
    )
    .fetch_all(&state.pool)
    .await?;
    Ok(items)
}

pub async fn add_menu_item(
    state: &AppState,
    user: &AuthUser,
    payload: CreateMenuItemRequest,
) -> AppResult<MessageResponse> {
    ensure_admin(user)?;

    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO menu_items (id, name, description, price, image_url) VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(id)
    .bind(payload.name)
    .bind(payload.description)
    .bind(payload.price)
    .bind(payload.image_url)
    .execute(&state.pool)
    .await?;

    tracing::info!(menu_item_id = %id, user_id = %user.user_id, "menu item added");
    Ok(MessageResponse::new("Menu item added successfully"))
}

pub async fn update_menu_item(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateMenuItemRequest,
) -> AppResult<MessageResponse> {
    ensure_admin(user)?;

    let existing = sqlx::query_as::<_, MenuItem>(
        "SELECT id, name, description, price, image_url FROM menu_items WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(&state.pool)
    .await?;
    let existing = match existing {
        Some(item) => item,
        None => return Err(AppError::NotFound("Menu item not found".into())),
    };

    // Partial update: only fields present in the payload overwrite. For
    // image_url an explicit null clears the stored value.
    let name = payload.name.unwrap_or(existing.name);
    let description = payload.description.unwrap_or(existing.description);
    let price = payload.price.unwrap_or(existing.price);
    let image_url = match payload.image_url {
        Some(explicit) => explicit,
        None => existing.image_url,
    };

    sqlx::query(
        r#"
        UPDATE menu_items
        SET name = $2, description = $3, price = $4, image_url = $5
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(description)
    .bind(price)
    .bind(image_url)
    .execute(&state.pool)
    .await?;

    tracing::info!(menu_item_id = %id, user_id = %user.user_id, "menu item updated");
    Ok(MessageResponse::new("Menu item updated successfully"))
}

pub async fn delete_menu_item(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<MessageResponse> {
    ensure_admin(user)?;

    // Hard delete. order_items keep their menu_item_id, so orders placed
    // before the delete are unaffected.
    let result = sqlx::query("DELETE FROM menu_items WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Menu item not found".into()));
    }

    tracing::info!(menu_item_id = %id, user_id = %user.user_id, "menu item deleted");
    Ok(MessageResponse::new("Menu item deleted successfully"))
}
