use std::path::Path;

use axum::Router;
use tower_http::services::{ServeDir, ServeFile};

use crate::state::AppState;

/// Static front end: the index page plus the css/js/images trees, laid
/// out under the configured assets directory the way the site ships.
pub fn router(assets_dir: &Path) -> Router<AppState> {
    Router::new()
        .route_service("/", ServeFile::new(assets_dir.join("html/index.html")))
        .nest_service("/css", ServeDir::new(assets_dir.join("css")))
        .nest_service("/js", ServeDir::new(assets_dir.join("js")))
        .nest_service("/images", ServeDir::new(assets_dir.join("images")))
}
