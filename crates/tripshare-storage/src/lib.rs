//! Storage abstraction for tripshare.
//!
//! Backend crates (e.g., tripshare-store-sqlite) implement [`Store`] so the access-control
//! core doesn't depend on any specific database engine or schema details.

use thiserror::Error;

mod store;
pub mod types;

pub use store::Store;
#[cfg(feature = "test-support")]
pub use store::MockStore;
pub use types::*;

/// Uniform error type for all storage backends.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found")]
    NotFound,
    /// A uniqueness constraint rejected the write (invitation code, share token, email).
    #[error("already exists")]
    AlreadyExists,
    /// A conditional update matched no row (e.g. invitation has no remaining uses).
    #[error("conflict")]
    Conflict,
    #[error("backend error: {0}")]
    Backend(String),
}
