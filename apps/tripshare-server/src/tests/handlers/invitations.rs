use super::super::common::*;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::handlers::invitations::{
    self, CreateInvitationRequest, EmailInvitationRequest, EmailInvitationResponse,
};
use crate::identity::CurrentUser;
use crate::server::AppState;
use tripshare_storage::UserId;

async fn create(
    state: &AppState,
    caller: &UserId,
    trip_id: Uuid,
    role: &str,
    max_uses: Option<u32>,
) -> Result<invitations::InvitationResponse, crate::error::ApiError> {
    invitations::create_invitation(
        State(state.clone()),
        CurrentUser(caller.clone()),
        Path(trip_id),
        Json(CreateInvitationRequest {
            role: role.to_string(),
            expires_in_days: Some(7),
            max_uses,
        }),
    )
    .await
    .map(|(_, Json(body))| body)
}

#[tokio::test]
async fn handler_create_lookup_and_redeem() {
    let state = create_test_state().await;
    let owner = create_test_user(&state, "owner@example.com").await;
    let guest = create_test_user(&state, "guest@example.com").await;
    let late = create_test_user(&state, "late@example.com").await;
    let trip_id = create_test_trip(&state, &owner, "Lisbon").await;

    let invitation = create(&state, &owner, trip_id, "editor", Some(1))
        .await
        .unwrap();
    assert_eq!(invitation.status, "active");
    assert_eq!(invitation.role, "editor");
    assert!(invitation.expires_at.is_some());
    let url = invitation.url.unwrap();
    assert!(url.starts_with(&format!("{}/invite/", BASE_URL)));
    let code = last_segment(&url);
    assert_eq!(invitation.code, code);

    let Json(preview) = invitations::lookup_invitation(State(state.clone()), Path(code.clone()))
        .await
        .unwrap();
    assert_eq!(preview.trip_id, trip_id);
    assert_eq!(preview.remaining_uses, Some(1));

    let Json(member) = invitations::redeem_invitation(
        State(state.clone()),
        CurrentUser(guest.clone()),
        Path(code.clone()),
    )
    .await
    .unwrap();
    assert_eq!(member.trip_id, trip_id);
    assert_eq!(member.user_id, guest.0);
    assert_eq!(member.role, "editor");

    let err = invitations::redeem_invitation(State(state.clone()), CurrentUser(late), Path(code.clone()))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::GONE);

    let Json(preview) = invitations::lookup_invitation(State(state.clone()), Path(code))
        .await
        .unwrap();
    assert_eq!(preview.status, "exhausted");
}

#[tokio::test]
async fn handler_invitation_validation() {
    let state = create_test_state().await;
    let owner = create_test_user(&state, "owner@example.com").await;
    let guest = create_test_user(&state, "guest@example.com").await;
    let trip_id = create_test_trip(&state, &owner, "Lisbon").await;

    let err = create(&state, &owner, trip_id, "admin", None).await.unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);

    let err = create(&state, &owner, trip_id, "viewer", Some(0)).await.unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);

    let err = create(&state, &guest, trip_id, "viewer", None).await.unwrap_err();
    assert_eq!(err.status(), StatusCode::FORBIDDEN);

    let err = invitations::lookup_invitation(State(state.clone()), Path("nope".to_string()))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn handler_owner_redeeming_own_invitation_conflicts() {
    let state = create_test_state().await;
    let owner = create_test_user(&state, "owner@example.com").await;
    let trip_id = create_test_trip(&state, &owner, "Lisbon").await;

    let invitation = create(&state, &owner, trip_id, "viewer", None).await.unwrap();
    let code = last_segment(&invitation.url.unwrap());

    let err = invitations::redeem_invitation(State(state.clone()), CurrentUser(owner), Path(code))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn handler_list_and_revoke_invitations() {
    let state = create_test_state().await;
    let owner = create_test_user(&state, "owner@example.com").await;
    let guest = create_test_user(&state, "guest@example.com").await;
    let trip_id = create_test_trip(&state, &owner, "Lisbon").await;

    let first = create(&state, &owner, trip_id, "viewer", Some(1)).await.unwrap();
    let second = create(&state, &owner, trip_id, "editor", None).await.unwrap();
    invitations::redeem_invitation(
        State(state.clone()),
        CurrentUser(guest.clone()),
        Path(last_segment(first.url.as_deref().unwrap())),
    )
    .await
    .unwrap();

    let Json(list) = invitations::list_invitations(State(state.clone()), CurrentUser(owner.clone()), Path(trip_id))
        .await
        .unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].id, second.id);
    assert_eq!(list[0].status, "active");
    assert_eq!(list[1].id, first.id);
    assert_eq!(list[1].status, "exhausted");
    assert_eq!(list[1].code, first.code);
    assert!(list.iter().all(|i| i.url.is_none()));

    let err = invitations::list_invitations(State(state.clone()), CurrentUser(guest.clone()), Path(trip_id))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::FORBIDDEN);

    let err = invitations::delete_invitation(State(state.clone()), CurrentUser(guest), Path(second.id))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::FORBIDDEN);

    let status = invitations::delete_invitation(State(state.clone()), CurrentUser(owner.clone()), Path(second.id))
        .await
        .unwrap();
    assert_eq!(status, StatusCode::NO_CONTENT);

    let err = invitations::redeem_invitation(
        State(state.clone()),
        CurrentUser(owner),
        Path(last_segment(second.url.as_deref().unwrap())),
    )
    .await
    .unwrap_err();
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn handler_invite_by_email() {
    let state = create_test_state().await;
    let owner = create_test_user(&state, "owner@example.com").await;
    let known = create_test_user(&state, "known@example.com").await;
    let trip_id = create_test_trip(&state, &owner, "Lisbon").await;

    let invite = |email: &str| {
        invitations::invite_by_email(
            State(state.clone()),
            CurrentUser(owner.clone()),
            Path(trip_id),
            Json(EmailInvitationRequest {
                email: email.to_string(),
                role: "viewer".to_string(),
                expires_in_days: None,
            }),
        )
    };

    let (status, Json(outcome)) = invite("known@example.com").await.unwrap();
    assert_eq!(status, StatusCode::CREATED);
    match outcome {
        EmailInvitationResponse::AddedDirectly { member, notified } => {
            assert_eq!(member.user_id, known.0);
            assert_eq!(member.role, "viewer");
            // No email provider is configured in tests.
            assert!(!notified);
        }
        other => panic!("expected direct add, got {:?}", other),
    }

    let (_, Json(outcome)) = invite("new@example.com").await.unwrap();
    match outcome {
        EmailInvitationResponse::Invited {
            invitation,
            email_sent,
        } => {
            assert_eq!(invitation.max_uses, Some(1));
            assert!(invitation.url.is_some());
            assert!(!email_sent);
        }
        other => panic!("expected invitation, got {:?}", other),
    }

    let err = invite("not-an-address").await.unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
}
