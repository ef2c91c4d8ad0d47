//! Trip types.

use chrono::{DateTime, Utc};

use super::{TripId, UserId};

/// Trip record
#[derive(Clone, Debug)]
pub struct Trip {
    pub id: TripId,
    pub name: String,
    pub owner_id: UserId,
    /// Retained after sharing is disabled so re-enabling reuses the same link.
    pub share_token: Option<String>,
    pub is_publicly_shared: bool,
    pub created_at: DateTime<Utc>,
}

impl Trip {
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        self.owner_id == *user_id
    }
}

/// Parameters for creating a trip
#[derive(Clone, Debug)]
pub struct CreateTripParams {
    pub name: String,
    pub owner_id: UserId,
}
