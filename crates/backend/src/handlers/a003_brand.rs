use axum::{extract::Path, Json};
use serde_json::json;

use crate::domain::a003_brand;

/// GET /api/brand
pub async fn list_all(
) -> Result<Json<Vec<contracts::domain::a003_brand::aggregate::Brand>>, axum::http::StatusCode> {
    match a003_brand::service::list_all().await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Brand list failed: {}", e);
            Err(e.status_code())
        }
    }
}

/// GET /api/brand/:id
pub async fn get_by_id(
    Path(id): Path<String>,
) -> Result<Json<contracts::domain::a003_brand::aggregate::Brand>, axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a003_brand::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Brand fetch failed: {}", e);
            Err(e.status_code())
        }
    }
}

/// POST /api/brand; duplicate names answer 409
pub async fn upsert(
    Json(dto): Json<contracts::domain::a003_brand::aggregate::BrandDto>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let result = if dto.id.is_some() {
        a003_brand::service::update(dto)
            .await
            .map(|_| uuid::Uuid::nil().to_string())
    } else {
        a003_brand::service::create(dto).await.map(|id| id.to_string())
    };

    match result {
        Ok(id) => Ok(Json(json!({"id": id}))),
        Err(e) => {
            tracing::error!("Brand upsert failed: {}", e);
            Err(e.status_code())
        }
    }
}

/// DELETE /api/brand/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a003_brand::service::delete(uuid).await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::error!("Brand delete failed: {}", e);
            Err(e.status_code())
        }
    }
}
