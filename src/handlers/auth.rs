//! Registration and login.

use crate::error::AppError;
use crate::extractors::{ApiJson, USER_ID_COOKIE};
use crate::handlers::cookies::COOKIE_MAX_AGE;
use crate::model::{LoginRequest, NewUser, PublicUser, RegisterRequest};
use crate::password::{hash_password_blocking, verify_password_blocking};
use crate::response::{LoginBody, RegisterBody};
use crate::state::AppState;
use axum::{extract::State, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

const BAD_CREDENTIALS: &str = "Incorrect email or password";

/// POST /api/register — `status: 1` when the email is taken, `status: 2` when created.
pub async fn register(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RegisterRequest>,
) -> Result<Json<RegisterBody>, AppError> {
    if state.store.find_user_by_email(&body.email).await?.is_some() {
        return Ok(Json(RegisterBody::email_exists()));
    }
    let password_hash = hash_password_blocking(body.password).await?;
    let user = NewUser {
        name: body.name,
        email: body.email,
        password_hash,
    };
    // The unique constraint catches a concurrent registration that passed the check above.
    match state.store.insert_user(&user).await {
        Ok(id) => {
            tracing::info!(user_id = id, "user registered");
            Ok(Json(RegisterBody::created()))
        }
        Err(AppError::Conflict(_)) => Ok(Json(RegisterBody::email_exists())),
        Err(e) => Err(e),
    }
}

/// POST /api/login — returns the public user and sets the `user_id` cookie. No token is issued.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<(CookieJar, Json<LoginBody>), AppError> {
    let user = state.store.find_user_by_email(&body.email).await?;
    // Unknown emails still pay for one verification so timing does not reveal registered accounts.
    let stored_hash = user.as_ref().map(|u| u.password.clone());
    let verified = verify_password_blocking(body.password, stored_hash).await?;
    let user = match user {
        Some(user) if verified => user,
        _ => return Err(AppError::Unauthorized(BAD_CREDENTIALS.into())),
    };

    let cookie = Cookie::build((USER_ID_COOKIE, user.id.to_string()))
        .path("/")
        .http_only(true)
        .secure(state.cookie_secure)
        .same_site(SameSite::Lax)
        .max_age(COOKIE_MAX_AGE);
    let body = LoginBody {
        message: "Successful login",
        user: PublicUser::from(user),
    };
    Ok((jar.add(cookie), Json(body)))
}
