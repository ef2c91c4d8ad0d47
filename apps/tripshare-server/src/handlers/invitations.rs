use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tripshare_access::{EmailInviteOutcome, InvitationView, IssuedInvitation, NewInvitation};
use tripshare_storage::{Invitation, InvitationId, TripId};
use uuid::Uuid;

use super::members::MemberResponse;
use super::parse_role;
use crate::error::ApiResult;
use crate::identity::CurrentUser;
use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateInvitationRequest {
    pub role: String,
    pub expires_in_days: Option<u32>,
    pub max_uses: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct EmailInvitationRequest {
    pub email: String,
    pub role: String,
    pub expires_in_days: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct InvitationResponse {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub code: String,
    pub role: &'static str,
    pub created_by: Uuid,
    pub expires_at: Option<DateTime<Utc>>,
    pub max_uses: Option<u32>,
    pub current_uses: u32,
    pub status: &'static str,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl InvitationResponse {
    fn new(invitation: Invitation, status: &'static str, url: Option<String>) -> Self {
        Self {
            id: invitation.id.0,
            trip_id: invitation.trip_id.0,
            code: invitation.code,
            role: invitation.role.as_str(),
            created_by: invitation.created_by.0,
            expires_at: invitation.expires_at,
            max_uses: invitation.max_uses,
            current_uses: invitation.current_uses,
            status,
            created_at: invitation.created_at,
            url,
        }
    }
}

impl From<IssuedInvitation> for InvitationResponse {
    fn from(issued: IssuedInvitation) -> Self {
        let status = issued.invitation.status_at(Utc::now()).as_str();
        Self::new(issued.invitation, status, Some(issued.url))
    }
}

impl From<InvitationView> for InvitationResponse {
    fn from(view: InvitationView) -> Self {
        Self::new(view.invitation, view.status.as_str(), None)
    }
}

/// What an invitee sees before accepting.
#[derive(Debug, Serialize)]
pub struct InvitationPreview {
    pub trip_id: Uuid,
    pub role: &'static str,
    pub status: &'static str,
    pub expires_at: Option<DateTime<Utc>>,
    pub remaining_uses: Option<u32>,
}

/// Result of a successful redemption.
#[derive(Debug, Serialize)]
pub struct RedeemResponse {
    pub trip_id: Uuid,
    pub user_id: Uuid,
    pub role: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum EmailInvitationResponse {
    AddedDirectly {
        member: MemberResponse,
        notified: bool,
    },
    Invited {
        invitation: InvitationResponse,
        email_sent: bool,
    },
}

impl From<EmailInviteOutcome> for EmailInvitationResponse {
    fn from(outcome: EmailInviteOutcome) -> Self {
        match outcome {
            EmailInviteOutcome::AddedDirectly {
                membership,
                notified,
            } => EmailInvitationResponse::AddedDirectly {
                member: membership.into(),
                notified,
            },
            EmailInviteOutcome::Invited { issued, email_sent } => {
                EmailInvitationResponse::Invited {
                    invitation: issued.into(),
                    email_sent,
                }
            }
        }
    }
}

pub async fn create_invitation(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(trip_id): Path<Uuid>,
    Json(body): Json<CreateInvitationRequest>,
) -> ApiResult<(StatusCode, Json<InvitationResponse>)> {
    let new = NewInvitation {
        role: parse_role(&body.role)?,
        expires_in_days: body.expires_in_days,
        max_uses: body.max_uses,
    };
    let issued = state
        .access
        .create_invitation(&TripId(trip_id), &user, &new)
        .await?;
    Ok((StatusCode::CREATED, Json(issued.into())))
}

pub async fn list_invitations(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(trip_id): Path<Uuid>,
) -> ApiResult<Json<Vec<InvitationResponse>>> {
    let views = state
        .access
        .list_invitations(&TripId(trip_id), &user)
        .await?;
    Ok(Json(
        views.into_iter().map(InvitationResponse::from).collect(),
    ))
}

pub async fn invite_by_email(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(trip_id): Path<Uuid>,
    Json(body): Json<EmailInvitationRequest>,
) -> ApiResult<(StatusCode, Json<EmailInvitationResponse>)> {
    let role = parse_role(&body.role)?;
    let outcome = state
        .access
        .invite_by_email(&TripId(trip_id), &user, &body.email, role, body.expires_in_days)
        .await?;
    Ok((StatusCode::CREATED, Json(outcome.into())))
}

pub async fn delete_invitation(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(invitation_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state
        .access
        .delete_invitation(&InvitationId(invitation_id), &user)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn lookup_invitation(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> ApiResult<Json<InvitationPreview>> {
    let invitation = state.access.lookup_invitation(&code).await?;
    Ok(Json(InvitationPreview {
        trip_id: invitation.trip_id.0,
        role: invitation.role.as_str(),
        status: invitation.status_at(Utc::now()).as_str(),
        expires_at: invitation.expires_at,
        remaining_uses: invitation.remaining_uses(),
    }))
}

pub async fn redeem_invitation(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(code): Path<String>,
) -> ApiResult<Json<RedeemResponse>> {
    let membership = state.access.redeem_invitation(&code, &user).await?;
    Ok(Json(RedeemResponse {
        trip_id: membership.trip_id.0,
        user_id: membership.user_id.0,
        role: membership.role.as_str(),
    }))
}
