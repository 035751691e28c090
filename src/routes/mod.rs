//! Route tables and the assembled application router.

mod auth;
mod common;
mod cookies;
mod items;

pub use auth::auth_routes;
pub use common::common_routes;
pub use cookies::cookie_routes;
pub use items::item_routes;

use crate::config::Config;
use crate::error::json_middleware_errors;
use crate::state::AppState;
use axum::http::{header, HeaderValue, Method};
use axum::{middleware, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// Full application: common + cookie routes at the root, auth and items under `/api`.
pub fn app_router(state: AppState, config: &Config) -> Router {
    let api = Router::new()
        .merge(auth_routes(state.clone()))
        .merge(item_routes(state.clone()));

    Router::new()
        .merge(common_routes(state))
        .merge(cookie_routes())
        .nest("/api", api)
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(middleware::map_response(json_middleware_errors))
        .layer(cors_layer(config.frontend_url.as_deref()))
        .layer(TraceLayer::new_for_http())
}

/// A configured frontend URL gets a credentialed allow-list; otherwise any origin is allowed.
pub fn cors_layer(frontend_url: Option<&str>) -> CorsLayer {
    let origin = frontend_url.and_then(|url| match HeaderValue::from_str(url.trim_end_matches('/')) {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(url = %url, "URL_FRONTEND is not a valid origin; allowing any origin");
            None
        }
    });
    match origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::PATCH,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE])
            .allow_credentials(true),
        None => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    }
}
