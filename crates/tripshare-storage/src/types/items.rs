//! Trip sub-resources. These carry no permissions of their own; access is always decided
//! against the parent trip.

use chrono::{DateTime, Utc};

use super::{DocumentId, TravelItemId, TripId};

/// Dated travel item (flight, hotel, activity...)
#[derive(Clone, Debug)]
pub struct TravelItem {
    pub id: TravelItemId,
    pub trip_id: TripId,
    pub title: String,
    pub starts_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Parameters for creating a travel item
#[derive(Clone, Debug)]
pub struct CreateTravelItemParams {
    pub trip_id: TripId,
    pub title: String,
    pub starts_at: Option<DateTime<Utc>>,
}

/// Document metadata; the file body lives in external upload storage.
#[derive(Clone, Debug)]
pub struct Document {
    pub id: DocumentId,
    pub trip_id: TripId,
    pub file_name: String,
    pub created_at: DateTime<Utc>,
}

/// Parameters for creating a document
#[derive(Clone, Debug)]
pub struct CreateDocumentParams {
    pub trip_id: TripId,
    pub file_name: String,
}
