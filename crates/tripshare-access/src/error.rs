use thiserror::Error;
use tripshare_storage::StoreError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("not found")]
    NotFound,
    #[error("forbidden")]
    Forbidden,
    #[error("invitation has expired")]
    Expired,
    #[error("invitation has no uses left")]
    Exhausted,
    #[error("already a member of this trip")]
    AlreadyMember,
    /// The trip owner cannot be added, demoted or removed through membership.
    #[error("the trip owner cannot be managed as a member")]
    OwnerNotAllowed,
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("conflict")]
    Conflict,
    /// Storage failed. Details are logged, never returned.
    #[error("storage unavailable")]
    StorageUnavailable,
}

impl From<StoreError> for AccessError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => AccessError::NotFound,
            other => {
                tracing::error!(error = %other, "storage operation failed");
                AccessError::StorageUnavailable
            }
        }
    }
}
