use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tripshare_access::TripSummary;
use tripshare_storage::{Trip, TripId};
use uuid::Uuid;

use crate::error::ApiResult;
use crate::identity::CurrentUser;
use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateTripRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct TripResponse {
    pub id: Uuid,
    pub name: String,
    pub owner_id: Uuid,
    pub is_publicly_shared: bool,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<&'static str>,
}

impl From<Trip> for TripResponse {
    fn from(trip: Trip) -> Self {
        Self {
            id: trip.id.0,
            name: trip.name,
            owner_id: trip.owner_id.0,
            is_publicly_shared: trip.is_publicly_shared,
            created_at: trip.created_at,
            role: None,
        }
    }
}

impl From<TripSummary> for TripResponse {
    fn from(summary: TripSummary) -> Self {
        Self {
            role: Some(summary.role.as_str()),
            ..summary.trip.into()
        }
    }
}

pub async fn create_trip(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<CreateTripRequest>,
) -> ApiResult<(StatusCode, Json<TripResponse>)> {
    let trip = state.access.create_trip(&body.name, &user).await?;
    Ok((StatusCode::CREATED, Json(trip.into())))
}

pub async fn list_trips(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Vec<TripResponse>>> {
    let trips = state.access.list_trips_for(&user).await?;
    Ok(Json(trips.into_iter().map(TripResponse::from).collect()))
}

pub async fn get_trip(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(trip_id): Path<Uuid>,
) -> ApiResult<Json<TripResponse>> {
    let trip_id = TripId(trip_id);
    let trip = state.access.get_trip(&trip_id, &user).await?;
    let role = state.access.resolve_role(&trip_id, &user).await?;
    Ok(Json(TripResponse {
        role: Some(role.as_str()),
        ..trip.into()
    }))
}

pub async fn delete_trip(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(trip_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.access.delete_trip(&TripId(trip_id), &user).await?;
    Ok(StatusCode::NO_CONTENT)
}
