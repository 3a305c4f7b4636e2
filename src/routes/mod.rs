use std::path::Path;

use axum::Router;

use crate::state::AppState;

pub mod assets;
pub mod auth;
pub mod doc;
pub mod health;
pub mod menu;
pub mod orders;

// Build the application router without binding state; it will be provided at the top level.
pub fn create_router(assets_dir: &Path) -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .nest("/menu", menu::router())
        .merge(orders::router())
        .merge(assets::router(assets_dir))
}
