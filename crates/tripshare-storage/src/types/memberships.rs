//! Membership types.

use chrono::{DateTime, Utc};

use super::{MemberRole, TripId, UserId};

/// Explicit collaborator grant. Never exists for the trip owner.
#[derive(Clone, Debug)]
pub struct Membership {
    pub trip_id: TripId,
    pub user_id: UserId,
    pub role: MemberRole,
    pub invited_by: UserId,
    pub joined_at: DateTime<Utc>,
}

/// Parameters for inserting or overwriting a membership
#[derive(Clone, Debug)]
pub struct UpsertMembershipParams {
    pub trip_id: TripId,
    pub user_id: UserId,
    pub role: MemberRole,
    pub invited_by: UserId,
}
