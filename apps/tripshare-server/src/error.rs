//! HTTP mapping for access errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;
use tripshare_access::AccessError;

#[derive(Debug)]
pub enum ApiError {
    Access(AccessError),
    Unauthenticated(&'static str),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        ApiError::Access(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ApiError::Access(err) => match err {
                AccessError::NotFound => StatusCode::NOT_FOUND,
                AccessError::Forbidden => StatusCode::FORBIDDEN,
                AccessError::Expired | AccessError::Exhausted => StatusCode::GONE,
                AccessError::AlreadyMember
                | AccessError::OwnerNotAllowed
                | AccessError::Conflict => StatusCode::CONFLICT,
                AccessError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
                AccessError::StorageUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Unauthenticated(reason) => reason.to_string(),
            ApiError::Access(AccessError::StorageUnavailable) => {
                error!("request failed: storage unavailable");
                "Internal Error".to_string()
            }
            ApiError::Access(err) => err.to_string(),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
