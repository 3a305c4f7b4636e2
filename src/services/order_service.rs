use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    dto::orders::{
        OrderItemView, OrderView, PlaceOrderRequest, PlaceOrderResponse, UpdateOrderStatusRequest,
    },
    entity::{
        menu_items::{Column as MenuItemCol, Entity as MenuItems},
        order_items::{
            ActiveModel as OrderItemActive, Entity as OrderItems, Model as OrderItemModel,
        },
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    response::MessageResponse,
    state::AppState,
};

pub async fn place_order(
    state: &AppState,
    user: &AuthUser,
    payload: PlaceOrderRequest,
) -> AppResult<PlaceOrderResponse> {
    let name = payload
        .order
        .ok_or_else(|| AppError::BadRequest("Invalid input".into()))?;
    let quantity = payload
        .quantity
        .as_ref()
        .and_then(|q| q.as_count())
        .and_then(|q| i32::try_from(q).ok())
        .ok_or_else(|| AppError::BadRequest("Invalid input".into()))?;

    // Lookup is by item name; that is the wire contract of the order form.
    let item = MenuItems::find()
        .filter(MenuItemCol::Name.eq(name.as_str()))
        .one(&state.orm)
        .await?;
    let item = match item {
        Some(i) => i,
        None => return Err(AppError::NotFound("Menu item not found".into())),
    };

    let total_amount = item.price * f64::from(quantity);

    let txn = state.orm.begin().await?;

    let order = OrderActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        total_amount: Set(total_amount),
        status: Set("Pending".into()),
        order_time: NotSet,
    }
    .insert(&txn)
    .await?;

    OrderItemActive {
        id: Set(Uuid::new_v4()),
        order_id: Set(order.id),
        menu_item_id: Set(item.id),
        quantity: Set(quantity),
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    tracing::info!(order_id = %order.id, user_id = %user.user_id, total_amount, "order placed");

    Ok(PlaceOrderResponse {
        message: "Order placed successfully".to_string(),
        order_id: order.id,
    })
}

/// Admins see every order; everyone else sees only their own.
pub async fn view_orders(state: &AppState, user: &AuthUser) -> AppResult<Vec<OrderView>> {
    let mut finder = Orders::find();
    if !user.is_admin {
        finder = finder.filter(OrderCol::UserId.eq(user.user_id));
    }

    let rows = finder
        .order_by_desc(OrderCol::OrderTime)
        .find_with_related(OrderItems)
        .all(&state.orm)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(order, items)| order_view_from_entity(order, items))
        .collect())
}

pub async fn update_order_status(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateOrderStatusRequest,
) -> AppResult<MessageResponse> {
    ensure_admin(user)?;

    let existing = Orders::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(o) => o,
        None => return Err(AppError::NotFound("Order not found".into())),
    };

    // Status is free text; whatever the admin sends is stored verbatim.
    let mut active: OrderActive = existing.into();
    active.status = Set(payload.status);
    let order = active.update(&state.orm).await?;

    tracing::info!(order_id = %order.id, status = %order.status, "order status updated");
    Ok(MessageResponse::new("Order status updated successfully"))
}

fn order_view_from_entity(order: OrderModel, items: Vec<OrderItemModel>) -> OrderView {
    OrderView {
        id: order.id,
        user_id: order.user_id,
        status: order.status,
        order_time: order.order_time.with_timezone(&Utc),
        total_amount: order.total_amount,
        items: items
            .into_iter()
            .map(|item| OrderItemView {
                menu_item_id: item.menu_item_id,
                quantity: item.quantity,
            })
            .collect(),
    }
}
