//! Invitation types.

use chrono::{DateTime, Utc};

use super::{InvitationId, MemberRole, TripId, UserId};

/// Invitation record
#[derive(Clone, Debug)]
pub struct Invitation {
    pub id: InvitationId,
    pub trip_id: TripId,
    pub code: String,
    pub created_by: UserId,
    pub role: MemberRole,
    pub expires_at: Option<DateTime<Utc>>, // None = never expires
    pub max_uses: Option<u32>,             // None = unlimited
    pub current_uses: u32,
    pub created_at: DateTime<Utc>,
}

/// Lifecycle state of an invitation, evaluated at read time rather than stored.
///
/// Revoked invitations are deleted, so they never show up here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InvitationStatus {
    Active,
    Expired,
    Exhausted,
}

impl InvitationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvitationStatus::Active => "active",
            InvitationStatus::Expired => "expired",
            InvitationStatus::Exhausted => "exhausted",
        }
    }
}

impl Invitation {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }

    pub fn is_exhausted(&self) -> bool {
        self.max_uses.is_some_and(|max| self.current_uses >= max)
    }

    /// Expiry wins over exhaustion.
    pub fn status_at(&self, now: DateTime<Utc>) -> InvitationStatus {
        if self.is_expired_at(now) {
            InvitationStatus::Expired
        } else if self.is_exhausted() {
            InvitationStatus::Exhausted
        } else {
            InvitationStatus::Active
        }
    }

    /// Remaining redemptions, `None` when unlimited.
    pub fn remaining_uses(&self) -> Option<u32> {
        self.max_uses.map(|max| max.saturating_sub(self.current_uses))
    }
}

/// Parameters for creating an invitation
#[derive(Clone, Debug)]
pub struct CreateInvitationParams {
    pub trip_id: TripId,
    pub code: String,
    pub created_by: UserId,
    pub role: MemberRole,
    pub expires_at: Option<DateTime<Utc>>,
    pub max_uses: Option<u32>,
}

/// Parameters for the atomic redeem step: claim one use and upsert the membership.
#[derive(Clone, Debug)]
pub struct RedeemInvitationParams {
    pub invitation_id: InvitationId,
    pub user_id: UserId,
    pub now: DateTime<Utc>,
}
