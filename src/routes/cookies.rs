use crate::handlers::cookies::{delete_cookie, get_cookies, set_cookie};
use axum::{routing::get, Router};

pub fn cookie_routes() -> Router {
    Router::new()
        .route("/setcookie", get(set_cookie))
        .route("/getcookies", get(get_cookies))
        .route("/deletecookie", get(delete_cookie))
}
