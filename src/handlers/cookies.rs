//! Standalone cookie set/get/clear endpoints.

use crate::response::{message, MessageBody};
use axum::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar};
use std::collections::BTreeMap;

pub const DEMO_COOKIE: &str = "datas";
pub const COOKIE_MAX_AGE: time::Duration = time::Duration::days(7);

/// GET /setcookie
pub async fn set_cookie(jar: CookieJar) -> (CookieJar, Json<MessageBody>) {
    let cookie = Cookie::build((DEMO_COOKIE, "mycookie"))
        .path("/")
        .http_only(true)
        .secure(true)
        .max_age(COOKIE_MAX_AGE);
    (jar.add(cookie), message("Cookie set successfully"))
}

/// GET /getcookies — every request cookie as `name -> value`.
pub async fn get_cookies(jar: CookieJar) -> Json<BTreeMap<String, String>> {
    Json(
        jar.iter()
            .map(|c| (c.name().to_string(), c.value().to_string()))
            .collect(),
    )
}

/// GET /deletecookie — always emits an expiring cookie, even if the client sent none.
pub async fn delete_cookie(jar: CookieJar) -> (CookieJar, Json<MessageBody>) {
    let mut removal = Cookie::build((DEMO_COOKIE, "")).path("/").build();
    removal.make_removal();
    (jar.add(removal), message("Cookie successfully deleted"))
}
