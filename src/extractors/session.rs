//! Extract the caller's user id from the `user_id` cookie set at login.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::CookieJar;

/// Cookie carrying the numeric user id issued by login.
pub const USER_ID_COOKIE: &str = "user_id";

/// User id from the `user_id` cookie. Missing or non-numeric cookies are rejected with 401.
///
/// The cookie is unsigned: it identifies, it does not authenticate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionUser(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let cookie = jar
            .get(USER_ID_COOKIE)
            .ok_or_else(|| AppError::Unauthorized("missing user_id cookie".into()))?;
        let id = cookie
            .value()
            .trim()
            .parse::<i64>()
            .map_err(|_| AppError::Unauthorized("invalid user_id cookie".into()))?;
        Ok(SessionUser(id))
    }
}
