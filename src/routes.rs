use std::sync::Arc;

use axum::{middleware::from_fn, routing::get, Extension, Router};
use tower_http::trace::TraceLayer;

use crate::{
    handlers::{health_check, users::users_handler},
    middleware::logging_middleware,
    AppState,
};

// -- 配置所有路由
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let api_route = Router::new().nest("/users", users_handler());

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_route)
        .layer(from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http().on_failure(()))
        .layer(Extension(app_state))
}
