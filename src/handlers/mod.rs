//! HTTP handlers for auth, items, and the cookie utilities.

pub mod auth;
pub mod cookies;
pub mod items;
