//! Common test helpers for server tests.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use tokio::sync::watch;
use tripshare_access::{AccessConfig, AccessService, BaseUrlLinks, DisabledNotifier};
use tripshare_storage::{CreateUserParams, Store, UserId};
use tripshare_store_sqlite::SqliteStore;
use uuid::Uuid;

use crate::handlers::invitations::{self, CreateInvitationRequest};
use crate::handlers::trips::{self, CreateTripRequest};
use crate::identity::CurrentUser;
use crate::server::AppState;

pub const BASE_URL: &str = "https://trips.example.com";

/// Test helper: app state over an in-memory SQLite store, marked ready.
pub async fn create_test_state() -> AppState {
    let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
    let access = AccessService::new(
        store,
        Arc::new(BaseUrlLinks::new(BASE_URL).unwrap()),
        Arc::new(DisabledNotifier),
        AccessConfig::default(),
    );
    let (_tx, ready) = watch::channel(true);
    AppState {
        access,
        metrics: None,
        ready,
    }
}

pub async fn create_test_user(state: &AppState, email: &str) -> UserId {
    state
        .access
        .store()
        .create_user(&CreateUserParams {
            email: email.to_string(),
            first_name: email.split('@').next().unwrap_or_default().to_string(),
            last_name: "Tester".to_string(),
        })
        .await
        .unwrap()
        .id
}

pub async fn create_test_trip(state: &AppState, owner: &UserId, name: &str) -> Uuid {
    let (_, Json(trip)) = trips::create_trip(
        State(state.clone()),
        CurrentUser(owner.clone()),
        Json(CreateTripRequest {
            name: name.to_string(),
        }),
    )
    .await
    .unwrap();
    trip.id
}

/// Create a link invitation as `owner` and redeem it as `guest`.
pub async fn join_trip(state: &AppState, trip_id: Uuid, owner: &UserId, guest: &UserId, role: &str) {
    let (_, Json(invitation)) = invitations::create_invitation(
        State(state.clone()),
        CurrentUser(owner.clone()),
        Path(trip_id),
        Json(CreateInvitationRequest {
            role: role.to_string(),
            expires_in_days: None,
            max_uses: Some(1),
        }),
    )
    .await
    .unwrap();
    let code = last_segment(invitation.url.as_deref().unwrap());
    invitations::redeem_invitation(State(state.clone()), CurrentUser(guest.clone()), Path(code))
        .await
        .unwrap();
}

pub fn last_segment(url: &str) -> String {
    url.rsplit('/').next().unwrap().to_string()
}
