use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{ApiKey, ApiKeyValue, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse, RegisterRequest},
        menu::{CreateMenuItemRequest, UpdateMenuItemRequest},
        orders::{
            OrderItemView, OrderView, PlaceOrderRequest, PlaceOrderResponse, Quantity,
            UpdateOrderStatusRequest,
        },
    },
    middleware::auth::SESSION_COOKIE,
    models::{MenuItem, UserProfile},
    response::MessageResponse,
    routes::{auth, health, menu, orders},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "session_cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register,
        auth::login,
        auth::logout,
        menu::view_menu,
        menu::add_menu_item,
        menu::update_menu_item,
        menu::delete_menu_item,
        orders::place_order,
        orders::view_orders,
        orders::update_order_status,
    ),
    components(
        schemas(
            health::HealthData,
            MenuItem,
            UserProfile,
            MessageResponse,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            CreateMenuItemRequest,
            UpdateMenuItemRequest,
            PlaceOrderRequest,
            PlaceOrderResponse,
            Quantity,
            OrderView,
            OrderItemView,
            UpdateOrderStatusRequest,
        )
    ),
    security(
        ("session_cookie" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Registration, login and logout"),
        (name = "Menu", description = "Menu browsing and admin management"),
        (name = "Orders", description = "Order placement and tracking"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
