use chrono::{DateTime, Utc};
use tracing::{info, instrument};
use tripshare_storage::{
    MemberRole, Membership, Store, StoreError, TripId, UpsertMembershipParams, UserId,
};

use crate::{AccessError, AccessService, EffectiveRole, Requirement};

/// One entry of a trip's member list. The owner is synthesized from the trip itself and
/// has no inviter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Member {
    pub user_id: UserId,
    pub role: EffectiveRole,
    pub invited_by: Option<UserId>,
    pub joined_at: DateTime<Utc>,
}

impl From<Membership> for Member {
    fn from(m: Membership) -> Self {
        Member {
            user_id: m.user_id,
            role: m.role.into(),
            invited_by: Some(m.invited_by),
            joined_at: m.joined_at,
        }
    }
}

impl<S: Store> AccessService<S> {
    /// Grant or change a collaborator's role. Trusted: callers check authorization first.
    ///
    /// Re-adding an existing member overwrites the role and inviter and keeps `joined_at`.
    #[instrument(skip(self))]
    pub async fn add_or_update_member(
        &self,
        trip_id: &TripId,
        user_id: &UserId,
        role: MemberRole,
        invited_by: &UserId,
    ) -> Result<Membership, AccessError> {
        let trip = self.store.get_trip(trip_id).await?;
        if trip.is_owned_by(user_id) {
            return Err(AccessError::OwnerNotAllowed);
        }

        let membership = match self
            .store
            .upsert_membership(&UpsertMembershipParams {
                trip_id: trip_id.clone(),
                user_id: user_id.clone(),
                role,
                invited_by: invited_by.clone(),
            })
            .await
        {
            Ok(m) => m,
            Err(StoreError::Conflict) => return Err(AccessError::OwnerNotAllowed),
            Err(e) => return Err(e.into()),
        };

        info!(trip_id = %trip_id, user_id = %user_id, role = %role, "membership granted");
        Ok(membership)
    }

    /// Remove a collaborator. Absent memberships are a no-op.
    #[instrument(skip(self))]
    pub async fn remove_member(&self, trip_id: &TripId, user_id: &UserId) -> Result<(), AccessError> {
        let trip = self.store.get_trip(trip_id).await?;
        if trip.is_owned_by(user_id) {
            return Err(AccessError::OwnerNotAllowed);
        }

        if self.store.delete_membership(trip_id, user_id).await? {
            info!(trip_id = %trip_id, user_id = %user_id, "membership revoked");
        }
        Ok(())
    }

    /// Owner first, then collaborators in join order.
    pub async fn list_members(&self, trip_id: &TripId) -> Result<Vec<Member>, AccessError> {
        let trip = self.store.get_trip(trip_id).await?;
        let memberships = self.store.list_memberships(trip_id).await?;

        let mut members = Vec::with_capacity(memberships.len() + 1);
        members.push(Member {
            user_id: trip.owner_id.clone(),
            role: EffectiveRole::Owner,
            invited_by: None,
            joined_at: trip.created_at,
        });
        members.extend(memberships.into_iter().map(Member::from));
        Ok(members)
    }

    /// Member list for anyone who can see the trip.
    pub async fn members_for(
        &self,
        trip_id: &TripId,
        caller: &UserId,
    ) -> Result<Vec<Member>, AccessError> {
        self.authorize(trip_id, caller, Requirement::View).await?;
        self.list_members(trip_id).await
    }

    /// Change an existing collaborator's role. Owner only.
    #[instrument(skip(self))]
    pub async fn set_member_role(
        &self,
        trip_id: &TripId,
        caller: &UserId,
        user_id: &UserId,
        role: MemberRole,
    ) -> Result<Membership, AccessError> {
        let trip = self.authorize(trip_id, caller, Requirement::Owner).await?;
        if trip.is_owned_by(user_id) {
            return Err(AccessError::OwnerNotAllowed);
        }

        let existing = self.store.get_membership(trip_id, user_id).await?;
        self.add_or_update_member(trip_id, user_id, role, &existing.invited_by)
            .await
    }

    /// Remove someone else's membership. Owner only.
    pub async fn remove_collaborator(
        &self,
        trip_id: &TripId,
        caller: &UserId,
        user_id: &UserId,
    ) -> Result<(), AccessError> {
        self.authorize(trip_id, caller, Requirement::Owner).await?;
        self.remove_member(trip_id, user_id).await
    }

    /// Drop the caller's own membership.
    #[instrument(skip(self))]
    pub async fn leave_trip(&self, trip_id: &TripId, caller: &UserId) -> Result<(), AccessError> {
        let trip = self.store.get_trip(trip_id).await?;
        if trip.is_owned_by(caller) {
            return Err(AccessError::OwnerNotAllowed);
        }

        if !self.store.delete_membership(trip_id, caller).await? {
            return Err(AccessError::NotFound);
        }
        info!(trip_id = %trip_id, user_id = %caller, "member left trip");
        Ok(())
    }
}
