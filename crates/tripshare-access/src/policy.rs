//! Guards used by every trip, travel item and document operation.

use tracing::debug;
use tripshare_storage::{Document, DocumentId, Store, TravelItem, TravelItemId, Trip, TripId, UserId};

use crate::{AccessError, AccessService, EffectiveRole};

/// What an operation needs from the caller's role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Requirement {
    View,
    Edit,
    Owner,
}

impl Requirement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Requirement::View => "view",
            Requirement::Edit => "edit",
            Requirement::Owner => "owner",
        }
    }

    pub fn is_met_by(&self, role: EffectiveRole) -> bool {
        match self {
            Requirement::View => role.has_access(),
            Requirement::Edit => role.can_edit(),
            Requirement::Owner => role.is_owner(),
        }
    }
}

impl<S: Store> AccessService<S> {
    pub async fn has_access(&self, trip_id: &TripId, user_id: &UserId) -> Result<bool, AccessError> {
        Ok(self.resolve_role(trip_id, user_id).await?.has_access())
    }

    pub async fn can_edit(&self, trip_id: &TripId, user_id: &UserId) -> Result<bool, AccessError> {
        Ok(self.resolve_role(trip_id, user_id).await?.can_edit())
    }

    pub async fn is_owner(&self, trip_id: &TripId, user_id: &UserId) -> Result<bool, AccessError> {
        Ok(self.resolve_role(trip_id, user_id).await?.is_owner())
    }

    /// Load the trip and check the caller against `requirement`.
    ///
    /// `NotFound` when the trip does not exist, `Forbidden` when it does but the caller's
    /// role falls short.
    pub async fn authorize(
        &self,
        trip_id: &TripId,
        user_id: &UserId,
        requirement: Requirement,
    ) -> Result<Trip, AccessError> {
        let trip = self.store.get_trip(trip_id).await?;
        self.check(&trip, user_id, requirement).await?;
        Ok(trip)
    }

    /// Authorize against the travel item's parent trip.
    pub async fn authorize_item(
        &self,
        item_id: &TravelItemId,
        user_id: &UserId,
        requirement: Requirement,
    ) -> Result<(Trip, TravelItem), AccessError> {
        let item = self.store.get_travel_item(item_id).await?;
        let trip = self.authorize(&item.trip_id, user_id, requirement).await?;
        Ok((trip, item))
    }

    /// Authorize against the document's parent trip.
    pub async fn authorize_document(
        &self,
        document_id: &DocumentId,
        user_id: &UserId,
        requirement: Requirement,
    ) -> Result<(Trip, Document), AccessError> {
        let document = self.store.get_document(document_id).await?;
        let trip = self.authorize(&document.trip_id, user_id, requirement).await?;
        Ok((trip, document))
    }

    pub(crate) async fn check(
        &self,
        trip: &Trip,
        user_id: &UserId,
        requirement: Requirement,
    ) -> Result<EffectiveRole, AccessError> {
        let role = self.role_in(trip, user_id).await?;
        if requirement.is_met_by(role) {
            return Ok(role);
        }

        debug!(
            trip_id = %trip.id,
            user_id = %user_id,
            role = %role,
            requirement = requirement.as_str(),
            "access denied"
        );
        metrics::counter!(
            "tripshare_access_denied_total",
            "requirement" => requirement.as_str()
        )
        .increment(1);
        Err(AccessError::Forbidden)
    }
}
