//! Trip, travel item and document operations. Each one is a guard followed by a store call;
//! sub-resources are always authorized through their parent trip.

use chrono::{DateTime, Utc};
use tracing::{info, instrument};
use tripshare_storage::{
    CreateDocumentParams, CreateTravelItemParams, CreateTripParams, Document, DocumentId, Store,
    TravelItem, TravelItemId, Trip, TripId, UserId,
};

use crate::{AccessError, AccessService, EffectiveRole, Requirement};

/// A trip together with the caller's role on it.
#[derive(Clone, Debug)]
pub struct TripSummary {
    pub trip: Trip,
    pub role: EffectiveRole,
}

fn required_text<'a>(field: &str, value: &'a str) -> Result<&'a str, AccessError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AccessError::InvalidArgument(format!("{} must not be empty", field)));
    }
    Ok(value)
}

impl<S: Store> AccessService<S> {
    #[instrument(skip(self))]
    pub async fn create_trip(&self, name: &str, owner: &UserId) -> Result<Trip, AccessError> {
        let name = required_text("name", name)?;
        let trip = self
            .store
            .create_trip(&CreateTripParams {
                name: name.to_string(),
                owner_id: owner.clone(),
            })
            .await?;
        info!(trip_id = %trip.id, owner_id = %owner, "trip created");
        Ok(trip)
    }

    pub async fn get_trip(&self, trip_id: &TripId, caller: &UserId) -> Result<Trip, AccessError> {
        self.authorize(trip_id, caller, Requirement::View).await
    }

    /// Delete a trip and everything hanging off it. Owner only.
    #[instrument(skip(self))]
    pub async fn delete_trip(&self, trip_id: &TripId, caller: &UserId) -> Result<(), AccessError> {
        self.authorize(trip_id, caller, Requirement::Owner).await?;
        self.store.delete_trip(trip_id).await?;
        info!(trip_id = %trip_id, "trip deleted");
        Ok(())
    }

    /// Trips the user owns or collaborates on.
    pub async fn list_trips_for(&self, user_id: &UserId) -> Result<Vec<TripSummary>, AccessError> {
        let trips = self.store.list_trips_for_user(user_id).await?;
        let mut summaries = Vec::with_capacity(trips.len());
        for trip in trips {
            let role = self.role_in(&trip, user_id).await?;
            summaries.push(TripSummary { trip, role });
        }
        Ok(summaries)
    }

    // ───────────────────────────── Travel items ─────────────────────────────

    pub async fn add_travel_item(
        &self,
        trip_id: &TripId,
        caller: &UserId,
        title: &str,
        starts_at: Option<DateTime<Utc>>,
    ) -> Result<TravelItem, AccessError> {
        let title = required_text("title", title)?;
        self.authorize(trip_id, caller, Requirement::Edit).await?;
        Ok(self
            .store
            .create_travel_item(&CreateTravelItemParams {
                trip_id: trip_id.clone(),
                title: title.to_string(),
                starts_at,
            })
            .await?)
    }

    pub async fn list_travel_items(
        &self,
        trip_id: &TripId,
        caller: &UserId,
    ) -> Result<Vec<TravelItem>, AccessError> {
        self.authorize(trip_id, caller, Requirement::View).await?;
        Ok(self.store.list_travel_items(trip_id).await?)
    }

    pub async fn delete_travel_item(
        &self,
        item_id: &TravelItemId,
        caller: &UserId,
    ) -> Result<(), AccessError> {
        self.authorize_item(item_id, caller, Requirement::Edit).await?;
        Ok(self.store.delete_travel_item(item_id).await?)
    }

    // ───────────────────────────── Documents ─────────────────────────────

    pub async fn add_document(
        &self,
        trip_id: &TripId,
        caller: &UserId,
        file_name: &str,
    ) -> Result<Document, AccessError> {
        let file_name = required_text("file_name", file_name)?;
        self.authorize(trip_id, caller, Requirement::Edit).await?;
        Ok(self
            .store
            .create_document(&CreateDocumentParams {
                trip_id: trip_id.clone(),
                file_name: file_name.to_string(),
            })
            .await?)
    }

    pub async fn list_documents(
        &self,
        trip_id: &TripId,
        caller: &UserId,
    ) -> Result<Vec<Document>, AccessError> {
        self.authorize(trip_id, caller, Requirement::View).await?;
        Ok(self.store.list_documents(trip_id).await?)
    }

    pub async fn delete_document(
        &self,
        document_id: &DocumentId,
        caller: &UserId,
    ) -> Result<(), AccessError> {
        self.authorize_document(document_id, caller, Requirement::Edit)
            .await?;
        Ok(self.store.delete_document(document_id).await?)
    }
}
