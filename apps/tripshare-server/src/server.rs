//! Router and shared state.

use axum::{
    extract::State,
    http::{header, StatusCode},
    middleware,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tokio::sync::watch;
use tripshare_access::AccessService;
use tripshare_store_sqlite::SqliteStore;

use crate::handlers;
use crate::metrics::track_requests;

#[derive(Clone)]
pub struct AppState {
    pub access: AccessService<SqliteStore>,
    pub metrics: Option<PrometheusHandle>,
    pub ready: watch::Receiver<bool>,
}

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/trips",
            post(handlers::trips::create_trip).get(handlers::trips::list_trips),
        )
        .route(
            "/trips/{trip_id}",
            get(handlers::trips::get_trip).delete(handlers::trips::delete_trip),
        )
        .route(
            "/trips/{trip_id}/members",
            get(handlers::members::list_members),
        )
        .route(
            "/trips/{trip_id}/members/{user_id}",
            put(handlers::members::set_member_role).delete(handlers::members::remove_member),
        )
        .route("/trips/{trip_id}/leave", post(handlers::members::leave_trip))
        .route(
            "/trips/{trip_id}/invitations",
            post(handlers::invitations::create_invitation)
                .get(handlers::invitations::list_invitations),
        )
        .route(
            "/trips/{trip_id}/invitations/email",
            post(handlers::invitations::invite_by_email),
        )
        .route(
            "/invitations/{invitation_id}",
            delete(handlers::invitations::delete_invitation),
        )
        .route(
            "/invite/{code}",
            get(handlers::invitations::lookup_invitation)
                .post(handlers::invitations::redeem_invitation),
        )
        .route(
            "/trips/{trip_id}/share",
            get(handlers::sharing::sharing_status)
                .post(handlers::sharing::enable_sharing)
                .delete(handlers::sharing::disable_sharing),
        )
        .route(
            "/trips/{trip_id}/share/rotate",
            post(handlers::sharing::rotate_share_token),
        )
        .route("/share/{token}", get(handlers::sharing::public_trip))
        .route(
            "/trips/{trip_id}/items",
            get(handlers::items::list_items).post(handlers::items::add_item),
        )
        .route("/items/{item_id}", delete(handlers::items::delete_item))
        .route(
            "/trips/{trip_id}/documents",
            get(handlers::items::list_documents).post(handlers::items::add_document),
        )
        .route(
            "/documents/{document_id}",
            delete(handlers::items::delete_document),
        )
        .route_layer(middleware::from_fn(track_requests));

    Router::new()
        .merge(api)
        .route("/healthz", get(health_handler))
        .route("/readyz", get(readiness_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

pub async fn health_handler() -> &'static str {
    "ok"
}

pub async fn readiness_handler(
    State(state): State<AppState>,
) -> Result<&'static str, StatusCode> {
    if *state.ready.borrow() {
        Ok("ok")
    } else {
        Err(StatusCode::SERVICE_UNAVAILABLE)
    }
}

pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
