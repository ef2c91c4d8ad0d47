use super::super::common::*;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::handlers::items::{self, AddItemRequest};
use crate::handlers::sharing;
use crate::identity::CurrentUser;

#[tokio::test]
async fn handler_share_link_lifecycle() {
    let state = create_test_state().await;
    let owner = create_test_user(&state, "owner@example.com").await;
    let trip_id = create_test_trip(&state, &owner, "Lisbon").await;
    items::add_item(
        State(state.clone()),
        CurrentUser(owner.clone()),
        Path(trip_id),
        Json(AddItemRequest {
            title: "Tram 28".to_string(),
            starts_at: None,
        }),
    )
    .await
    .unwrap();

    let Json(off) = sharing::sharing_status(State(state.clone()), CurrentUser(owner.clone()), Path(trip_id))
        .await
        .unwrap();
    assert!(!off.enabled);
    assert_eq!(off.url, None);

    let Json(on) = sharing::enable_sharing(State(state.clone()), CurrentUser(owner.clone()), Path(trip_id))
        .await
        .unwrap();
    assert!(on.enabled);
    let url = on.url.unwrap();
    assert!(url.starts_with(&format!("{}/share/", BASE_URL)));
    let token = last_segment(&url);

    let Json(public) = sharing::public_trip(State(state.clone()), Path(token.clone()))
        .await
        .unwrap();
    assert_eq!(public.name, "Lisbon");
    assert_eq!(public.items.len(), 1);
    assert_eq!(public.items[0].title, "Tram 28");

    sharing::disable_sharing(State(state.clone()), CurrentUser(owner.clone()), Path(trip_id))
        .await
        .unwrap();
    let err = sharing::public_trip(State(state.clone()), Path(token.clone()))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::NOT_FOUND);

    // Re-enabling revives the same link.
    let Json(again) = sharing::enable_sharing(State(state.clone()), CurrentUser(owner.clone()), Path(trip_id))
        .await
        .unwrap();
    assert_eq!(again.url, Some(url));

    let Json(rotated) = sharing::rotate_share_token(State(state.clone()), CurrentUser(owner), Path(trip_id))
        .await
        .unwrap();
    assert!(rotated.enabled);
    assert_ne!(last_segment(rotated.url.as_deref().unwrap()), token);
    let err = sharing::public_trip(State(state.clone()), Path(token))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn handler_sharing_is_owner_only() {
    let state = create_test_state().await;
    let owner = create_test_user(&state, "owner@example.com").await;
    let editor = create_test_user(&state, "editor@example.com").await;
    let trip_id = create_test_trip(&state, &owner, "Lisbon").await;
    join_trip(&state, trip_id, &owner, &editor, "editor").await;

    let err = sharing::enable_sharing(State(state.clone()), CurrentUser(editor.clone()), Path(trip_id))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::FORBIDDEN);

    let err = sharing::sharing_status(State(state.clone()), CurrentUser(editor), Path(trip_id))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::FORBIDDEN);
}
