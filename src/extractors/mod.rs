//! Request extractors that reject with `AppError` so every failure is a JSON body.

pub mod json;
pub mod session;

pub use json::ApiJson;
pub use session::{SessionUser, USER_ID_COOKIE};
