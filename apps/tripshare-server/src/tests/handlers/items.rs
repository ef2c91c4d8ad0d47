use super::super::common::*;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::handlers::items::{self, AddDocumentRequest, AddItemRequest};
use crate::identity::CurrentUser;

fn item(title: &str) -> Json<AddItemRequest> {
    Json(AddItemRequest {
        title: title.to_string(),
        starts_at: None,
    })
}

#[tokio::test]
async fn handler_items_follow_edit_rights() {
    let state = create_test_state().await;
    let owner = create_test_user(&state, "owner@example.com").await;
    let editor = create_test_user(&state, "editor@example.com").await;
    let viewer = create_test_user(&state, "viewer@example.com").await;
    let trip_id = create_test_trip(&state, &owner, "Lisbon").await;
    join_trip(&state, trip_id, &owner, &editor, "editor").await;
    join_trip(&state, trip_id, &owner, &viewer, "viewer").await;

    let (status, Json(added)) = items::add_item(
        State(state.clone()),
        CurrentUser(editor.clone()),
        Path(trip_id),
        item("Belem tower"),
    )
    .await
    .unwrap();
    assert_eq!(status, StatusCode::CREATED);

    let err = items::add_item(
        State(state.clone()),
        CurrentUser(viewer.clone()),
        Path(trip_id),
        item("Sintra"),
    )
    .await
    .unwrap_err();
    assert_eq!(err.status(), StatusCode::FORBIDDEN);

    let Json(list) = items::list_items(State(state.clone()), CurrentUser(viewer.clone()), Path(trip_id))
        .await
        .unwrap();
    assert_eq!(list.len(), 1);

    let err = items::delete_item(State(state.clone()), CurrentUser(viewer), Path(added.id))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::FORBIDDEN);

    let status = items::delete_item(State(state.clone()), CurrentUser(editor), Path(added.id))
        .await
        .unwrap();
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn handler_documents_are_members_only() {
    let state = create_test_state().await;
    let owner = create_test_user(&state, "owner@example.com").await;
    let stranger = create_test_user(&state, "stranger@example.com").await;
    let trip_id = create_test_trip(&state, &owner, "Lisbon").await;

    let (_, Json(doc)) = items::add_document(
        State(state.clone()),
        CurrentUser(owner.clone()),
        Path(trip_id),
        Json(AddDocumentRequest {
            file_name: "passport.pdf".to_string(),
        }),
    )
    .await
    .unwrap();
    assert_eq!(doc.file_name, "passport.pdf");

    let err = items::list_documents(State(state.clone()), CurrentUser(stranger.clone()), Path(trip_id))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::FORBIDDEN);

    let err = items::delete_document(State(state.clone()), CurrentUser(stranger), Path(doc.id))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::FORBIDDEN);

    items::delete_document(State(state.clone()), CurrentUser(owner.clone()), Path(doc.id))
        .await
        .unwrap();
    let Json(docs) = items::list_documents(State(state.clone()), CurrentUser(owner), Path(trip_id))
        .await
        .unwrap();
    assert!(docs.is_empty());
}
