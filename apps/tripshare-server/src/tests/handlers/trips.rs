use super::super::common::*;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::handlers::trips::{self, CreateTripRequest};
use crate::identity::CurrentUser;

#[tokio::test]
async fn handler_create_and_list_trips() {
    let state = create_test_state().await;
    let owner = create_test_user(&state, "owner@example.com").await;
    let guest = create_test_user(&state, "guest@example.com").await;

    let trip_id = create_test_trip(&state, &owner, "Lisbon").await;
    join_trip(&state, trip_id, &owner, &guest, "viewer").await;

    let Json(owned) = trips::list_trips(State(state.clone()), CurrentUser(owner.clone()))
        .await
        .unwrap();
    assert_eq!(owned.len(), 1);
    assert_eq!(owned[0].id, trip_id);
    assert_eq!(owned[0].role, Some("owner"));

    let Json(shared) = trips::list_trips(State(state.clone()), CurrentUser(guest.clone()))
        .await
        .unwrap();
    assert_eq!(shared.len(), 1);
    assert_eq!(shared[0].role, Some("viewer"));
}

#[tokio::test]
async fn handler_create_trip_rejects_blank_name() {
    let state = create_test_state().await;
    let owner = create_test_user(&state, "owner@example.com").await;

    let err = trips::create_trip(
        State(state.clone()),
        CurrentUser(owner),
        Json(CreateTripRequest {
            name: "   ".to_string(),
        }),
    )
    .await
    .unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn handler_get_trip_requires_access() {
    let state = create_test_state().await;
    let owner = create_test_user(&state, "owner@example.com").await;
    let stranger = create_test_user(&state, "stranger@example.com").await;
    let trip_id = create_test_trip(&state, &owner, "Lisbon").await;

    let Json(trip) = trips::get_trip(State(state.clone()), CurrentUser(owner.clone()), Path(trip_id))
        .await
        .unwrap();
    assert_eq!(trip.name, "Lisbon");
    assert_eq!(trip.owner_id, owner.0);

    let err = trips::get_trip(State(state.clone()), CurrentUser(stranger), Path(trip_id))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::FORBIDDEN);

    let err = trips::get_trip(State(state.clone()), CurrentUser(owner), Path(Uuid::now_v7()))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn handler_only_owner_deletes_trip() {
    let state = create_test_state().await;
    let owner = create_test_user(&state, "owner@example.com").await;
    let editor = create_test_user(&state, "editor@example.com").await;
    let trip_id = create_test_trip(&state, &owner, "Lisbon").await;
    join_trip(&state, trip_id, &owner, &editor, "editor").await;

    let err = trips::delete_trip(State(state.clone()), CurrentUser(editor.clone()), Path(trip_id))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::FORBIDDEN);

    let status = trips::delete_trip(State(state.clone()), CurrentUser(owner.clone()), Path(trip_id))
        .await
        .unwrap();
    assert_eq!(status, StatusCode::NO_CONTENT);

    let err = trips::get_trip(State(state.clone()), CurrentUser(owner), Path(trip_id))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
}
