use axum::{extract::Path, Json};
use serde_json::json;

use crate::domain::a001_category;
use crate::shared::error::DomainError;

/// GET /api/category
pub async fn list_all() -> Result<
    Json<Vec<contracts::domain::a001_category::aggregate::Category>>,
    axum::http::StatusCode,
> {
    match a001_category::service::list_all().await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Category list failed: {}", e);
            Err(e.status_code())
        }
    }
}

/// GET /api/category/:id
pub async fn get_by_id(
    Path(id): Path<String>,
) -> Result<Json<contracts::domain::a001_category::aggregate::Category>, axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a001_category::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Category fetch failed: {}", e);
            Err(e.status_code())
        }
    }
}

/// POST /api/category: create without id, update with id
pub async fn upsert(
    Json(dto): Json<contracts::domain::a001_category::aggregate::CategoryDto>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let result = if dto.id.is_some() {
        a001_category::service::update(dto)
            .await
            .map(|_| uuid::Uuid::nil().to_string())
    } else {
        a001_category::service::create(dto).await.map(|id| id.to_string())
    };

    match result {
        Ok(id) => Ok(Json(json!({"id": id}))),
        Err(e) => {
            tracing::error!("Category upsert failed: {}", e);
            Err(e.status_code())
        }
    }
}

/// DELETE /api/category/:id; 409 while children or gear still reference it
pub async fn delete(Path(id): Path<String>) -> Result<(), axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a001_category::service::delete(uuid).await {
        Ok(()) => Ok(()),
        Err(e @ DomainError::Conflict(_)) => {
            tracing::warn!("Category delete rejected: {}", e);
            Err(e.status_code())
        }
        Err(e) => {
            tracing::error!("Category delete failed: {}", e);
            Err(e.status_code())
        }
    }
}
