use axum::{extract::Path, Json};
use serde_json::json;

use crate::domain::a004_reference;

/// GET /api/reference, ordered by orderIndex
pub async fn list_all() -> Result<
    Json<Vec<contracts::domain::a004_reference::aggregate::Reference>>,
    axum::http::StatusCode,
> {
    match a004_reference::service::list_all().await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Reference list failed: {}", e);
            Err(e.status_code())
        }
    }
}

/// GET /api/reference/:id
pub async fn get_by_id(
    Path(id): Path<String>,
) -> Result<Json<contracts::domain::a004_reference::aggregate::Reference>, axum::http::StatusCode>
{
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a004_reference::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Reference fetch failed: {}", e);
            Err(e.status_code())
        }
    }
}

/// POST /api/reference
pub async fn upsert(
    Json(dto): Json<contracts::domain::a004_reference::aggregate::ReferenceDto>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let result = if dto.id.is_some() {
        a004_reference::service::update(dto)
            .await
            .map(|_| uuid::Uuid::nil().to_string())
    } else {
        a004_reference::service::create(dto).await.map(|id| id.to_string())
    };

    match result {
        Ok(id) => Ok(Json(json!({"id": id}))),
        Err(e) => {
            tracing::error!("Reference upsert failed: {}", e);
            Err(e.status_code())
        }
    }
}

/// DELETE /api/reference/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a004_reference::service::delete(uuid).await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::error!("Reference delete failed: {}", e);
            Err(e.status_code())
        }
    }
}
