use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tripshare_storage::{Document, DocumentId, TravelItem, TravelItemId, TripId};
use uuid::Uuid;

use crate::error::ApiResult;
use crate::identity::CurrentUser;
use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub title: String,
    pub starts_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub id: Uuid,
    pub title: String,
    pub starts_at: Option<DateTime<Utc>>,
}

impl From<TravelItem> for ItemResponse {
    fn from(item: TravelItem) -> Self {
        Self {
            id: item.id.0,
            title: item.title,
            starts_at: item.starts_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddDocumentRequest {
    pub file_name: String,
}

#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    pub id: Uuid,
    pub file_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<Document> for DocumentResponse {
    fn from(document: Document) -> Self {
        Self {
            id: document.id.0,
            file_name: document.file_name,
            created_at: document.created_at,
        }
    }
}

pub async fn list_items(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(trip_id): Path<Uuid>,
) -> ApiResult<Json<Vec<ItemResponse>>> {
    let items = state
        .access
        .list_travel_items(&TripId(trip_id), &user)
        .await?;
    Ok(Json(items.into_iter().map(ItemResponse::from).collect()))
}

pub async fn add_item(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(trip_id): Path<Uuid>,
    Json(body): Json<AddItemRequest>,
) -> ApiResult<(StatusCode, Json<ItemResponse>)> {
    let item = state
        .access
        .add_travel_item(&TripId(trip_id), &user, &body.title, body.starts_at)
        .await?;
    Ok((StatusCode::CREATED, Json(item.into())))
}

pub async fn delete_item(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(item_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state
        .access
        .delete_travel_item(&TravelItemId(item_id), &user)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_documents(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(trip_id): Path<Uuid>,
) -> ApiResult<Json<Vec<DocumentResponse>>> {
    let documents = state.access.list_documents(&TripId(trip_id), &user).await?;
    Ok(Json(
        documents.into_iter().map(DocumentResponse::from).collect(),
    ))
}

pub async fn add_document(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(trip_id): Path<Uuid>,
    Json(body): Json<AddDocumentRequest>,
) -> ApiResult<(StatusCode, Json<DocumentResponse>)> {
    let document = state
        .access
        .add_document(&TripId(trip_id), &user, &body.file_name)
        .await?;
    Ok((StatusCode::CREATED, Json(document.into())))
}

pub async fn delete_document(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(document_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state
        .access
        .delete_document(&DocumentId(document_id), &user)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
