use super::super::common::*;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::handlers::members::{self, SetRoleRequest};
use crate::identity::CurrentUser;

#[tokio::test]
async fn handler_list_members_puts_owner_first() {
    let state = create_test_state().await;
    let owner = create_test_user(&state, "owner@example.com").await;
    let guest = create_test_user(&state, "guest@example.com").await;
    let trip_id = create_test_trip(&state, &owner, "Lisbon").await;
    join_trip(&state, trip_id, &owner, &guest, "viewer").await;

    let Json(list) = members::list_members(State(state.clone()), CurrentUser(guest.clone()), Path(trip_id))
        .await
        .unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].user_id, owner.0);
    assert_eq!(list[0].role, "owner");
    assert_eq!(list[0].invited_by, None);
    assert_eq!(list[1].user_id, guest.0);
    assert_eq!(list[1].role, "viewer");
    assert_eq!(list[1].invited_by, Some(owner.0));
}

#[tokio::test]
async fn handler_set_member_role() {
    let state = create_test_state().await;
    let owner = create_test_user(&state, "owner@example.com").await;
    let guest = create_test_user(&state, "guest@example.com").await;
    let stranger = create_test_user(&state, "stranger@example.com").await;
    let trip_id = create_test_trip(&state, &owner, "Lisbon").await;
    join_trip(&state, trip_id, &owner, &guest, "viewer").await;

    let Json(promoted) = members::set_member_role(
        State(state.clone()),
        CurrentUser(owner.clone()),
        Path((trip_id, guest.0)),
        Json(SetRoleRequest {
            role: "editor".to_string(),
        }),
    )
    .await
    .unwrap();
    assert_eq!(promoted.role, "editor");

    let err = members::set_member_role(
        State(state.clone()),
        CurrentUser(owner.clone()),
        Path((trip_id, stranger.0)),
        Json(SetRoleRequest {
            role: "viewer".to_string(),
        }),
    )
    .await
    .unwrap_err();
    assert_eq!(err.status(), StatusCode::NOT_FOUND);

    let err = members::set_member_role(
        State(state.clone()),
        CurrentUser(owner.clone()),
        Path((trip_id, guest.0)),
        Json(SetRoleRequest {
            role: "owner".to_string(),
        }),
    )
    .await
    .unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);

    let err = members::set_member_role(
        State(state.clone()),
        CurrentUser(guest.clone()),
        Path((trip_id, guest.0)),
        Json(SetRoleRequest {
            role: "viewer".to_string(),
        }),
    )
    .await
    .unwrap_err();
    assert_eq!(err.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn handler_owner_cannot_be_removed() {
    let state = create_test_state().await;
    let owner = create_test_user(&state, "owner@example.com").await;
    let trip_id = create_test_trip(&state, &owner, "Lisbon").await;

    let err = members::remove_member(
        State(state.clone()),
        CurrentUser(owner.clone()),
        Path((trip_id, owner.0)),
    )
    .await
    .unwrap_err();
    assert_eq!(err.status(), StatusCode::CONFLICT);

    let err = members::leave_trip(State(state.clone()), CurrentUser(owner.clone()), Path(trip_id))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn handler_remove_and_leave() {
    let state = create_test_state().await;
    let owner = create_test_user(&state, "owner@example.com").await;
    let bob = create_test_user(&state, "bob@example.com").await;
    let carol = create_test_user(&state, "carol@example.com").await;
    let trip_id = create_test_trip(&state, &owner, "Lisbon").await;
    join_trip(&state, trip_id, &owner, &bob, "editor").await;
    join_trip(&state, trip_id, &owner, &carol, "viewer").await;

    let status = members::remove_member(
        State(state.clone()),
        CurrentUser(owner.clone()),
        Path((trip_id, bob.0)),
    )
    .await
    .unwrap();
    assert_eq!(status, StatusCode::NO_CONTENT);

    let status = members::leave_trip(State(state.clone()), CurrentUser(carol.clone()), Path(trip_id))
        .await
        .unwrap();
    assert_eq!(status, StatusCode::NO_CONTENT);

    let Json(list) = members::list_members(State(state.clone()), CurrentUser(owner.clone()), Path(trip_id))
        .await
        .unwrap();
    assert_eq!(list.len(), 1);

    let err = members::list_members(State(state.clone()), CurrentUser(bob), Path(trip_id))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::FORBIDDEN);
}
