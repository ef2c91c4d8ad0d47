//! Role resolution: the single place that decides owner vs member vs nobody.

use tripshare_storage::{MemberRole, Store, StoreError, Trip, TripId, UserId};

use crate::{AccessError, AccessService};

/// A caller's role on one trip. Ownership always wins over a membership row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EffectiveRole {
    Owner,
    Editor,
    Viewer,
    None,
}

impl EffectiveRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            EffectiveRole::Owner => "owner",
            EffectiveRole::Editor => "editor",
            EffectiveRole::Viewer => "viewer",
            EffectiveRole::None => "none",
        }
    }

    pub fn has_access(&self) -> bool {
        !matches!(self, EffectiveRole::None)
    }

    pub fn can_edit(&self) -> bool {
        matches!(self, EffectiveRole::Owner | EffectiveRole::Editor)
    }

    pub fn is_owner(&self) -> bool {
        matches!(self, EffectiveRole::Owner)
    }
}

impl From<MemberRole> for EffectiveRole {
    fn from(role: MemberRole) -> Self {
        match role {
            MemberRole::Editor => EffectiveRole::Editor,
            MemberRole::Viewer => EffectiveRole::Viewer,
        }
    }
}

impl std::fmt::Display for EffectiveRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<S: Store> AccessService<S> {
    /// Resolve the caller's role on a trip. A missing trip resolves to
    /// [`EffectiveRole::None`]; use [`AccessService::authorize`] to tell 404 from 403.
    pub async fn resolve_role(
        &self,
        trip_id: &TripId,
        user_id: &UserId,
    ) -> Result<EffectiveRole, AccessError> {
        let trip = match self.store.get_trip(trip_id).await {
            Ok(trip) => trip,
            Err(StoreError::NotFound) => return Ok(EffectiveRole::None),
            Err(e) => return Err(e.into()),
        };
        self.role_in(&trip, user_id).await
    }

    pub(crate) async fn role_in(
        &self,
        trip: &Trip,
        user_id: &UserId,
    ) -> Result<EffectiveRole, AccessError> {
        if trip.is_owned_by(user_id) {
            return Ok(EffectiveRole::Owner);
        }
        match self.store.get_membership(&trip.id, user_id).await {
            Ok(membership) => Ok(membership.role.into()),
            Err(StoreError::NotFound) => Ok(EffectiveRole::None),
            Err(e) => Err(e.into()),
        }
    }
}
