use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tripshare_access::Member;
use tripshare_storage::{Membership, TripId, UserId};
use uuid::Uuid;

use super::parse_role;
use crate::error::ApiResult;
use crate::identity::CurrentUser;
use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct SetRoleRequest {
    pub role: String,
}

#[derive(Debug, Serialize)]
pub struct MemberResponse {
    pub user_id: Uuid,
    pub role: &'static str,
    pub invited_by: Option<Uuid>,
    pub joined_at: DateTime<Utc>,
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self {
            user_id: member.user_id.0,
            role: member.role.as_str(),
            invited_by: member.invited_by.map(|id| id.0),
            joined_at: member.joined_at,
        }
    }
}

impl From<Membership> for MemberResponse {
    fn from(membership: Membership) -> Self {
        Member::from(membership).into()
    }
}

pub async fn list_members(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(trip_id): Path<Uuid>,
) -> ApiResult<Json<Vec<MemberResponse>>> {
    let members = state.access.members_for(&TripId(trip_id), &user).await?;
    Ok(Json(members.into_iter().map(MemberResponse::from).collect()))
}

pub async fn set_member_role(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((trip_id, member_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<SetRoleRequest>,
) -> ApiResult<Json<MemberResponse>> {
    let role = parse_role(&body.role)?;
    let membership = state
        .access
        .set_member_role(&TripId(trip_id), &user, &UserId(member_id), role)
        .await?;
    Ok(Json(membership.into()))
}

pub async fn remove_member(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((trip_id, member_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<StatusCode> {
    state
        .access
        .remove_collaborator(&TripId(trip_id), &user, &UserId(member_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn leave_trip(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(trip_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.access.leave_trip(&TripId(trip_id), &user).await?;
    Ok(StatusCode::NO_CONTENT)
}
