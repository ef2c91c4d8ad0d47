use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use tripshare_access::{PublicTrip, ShareState};
use tripshare_storage::TripId;
use uuid::Uuid;

use super::items::ItemResponse;
use crate::error::ApiResult;
use crate::identity::CurrentUser;
use crate::server::AppState;

#[derive(Debug, Serialize)]
pub struct ShareResponse {
    pub trip_id: Uuid,
    pub enabled: bool,
    pub url: Option<String>,
}

impl From<ShareState> for ShareResponse {
    fn from(state: ShareState) -> Self {
        Self {
            trip_id: state.trip_id.0,
            enabled: state.enabled,
            url: state.url,
        }
    }
}

/// Read-only view for anonymous visitors. No owner, members or documents.
#[derive(Debug, Serialize)]
pub struct PublicTripResponse {
    pub name: String,
    pub items: Vec<ItemResponse>,
}

impl From<PublicTrip> for PublicTripResponse {
    fn from(public: PublicTrip) -> Self {
        Self {
            name: public.trip.name,
            items: public.items.into_iter().map(ItemResponse::from).collect(),
        }
    }
}

pub async fn sharing_status(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(trip_id): Path<Uuid>,
) -> ApiResult<Json<ShareResponse>> {
    let share = state.access.sharing_status(&TripId(trip_id), &user).await?;
    Ok(Json(share.into()))
}

pub async fn enable_sharing(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(trip_id): Path<Uuid>,
) -> ApiResult<Json<ShareResponse>> {
    let share = state.access.enable_sharing(&TripId(trip_id), &user).await?;
    Ok(Json(share.into()))
}

pub async fn disable_sharing(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(trip_id): Path<Uuid>,
) -> ApiResult<Json<ShareResponse>> {
    let share = state.access.disable_sharing(&TripId(trip_id), &user).await?;
    Ok(Json(share.into()))
}

pub async fn rotate_share_token(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(trip_id): Path<Uuid>,
) -> ApiResult<Json<ShareResponse>> {
    let share = state
        .access
        .rotate_share_token(&TripId(trip_id), &user)
        .await?;
    Ok(Json(share.into()))
}

pub async fn public_trip(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> ApiResult<Json<PublicTripResponse>> {
    let public = state.access.resolve_public_trip(&token).await?;
    Ok(Json(public.into()))
}
