//! Caller identity.
//!
//! Authentication happens upstream; the gateway forwards the authenticated user's id in
//! the `x-tripshare-user` header and this extractor trusts it.

use axum::{extract::FromRequestParts, http::request::Parts};
use tripshare_storage::UserId;
use uuid::Uuid;

use crate::error::ApiError;

pub const USER_HEADER: &str = "x-tripshare-user";

#[derive(Clone, Debug)]
pub struct CurrentUser(pub UserId);

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_HEADER)
            .ok_or(ApiError::Unauthenticated("missing x-tripshare-user header"))?;
        let id = raw
            .to_str()
            .ok()
            .and_then(|s| Uuid::parse_str(s.trim()).ok())
            .ok_or(ApiError::Unauthenticated("invalid x-tripshare-user header"))?;
        Ok(CurrentUser(UserId(id)))
    }
}
