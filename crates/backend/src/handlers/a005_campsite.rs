use axum::{extract::Path, Json};
use serde_json::json;

use crate::domain::a005_campsite;

/// GET /api/campsite, newest first
pub async fn list_all() -> Result<
    Json<Vec<contracts::domain::a005_campsite::aggregate::Campsite>>,
    axum::http::StatusCode,
> {
    match a005_campsite::service::list_all().await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Campsite list failed: {}", e);
            Err(e.status_code())
        }
    }
}

/// GET /api/campsite/:id
pub async fn get_by_id(
    Path(id): Path<String>,
) -> Result<Json<contracts::domain::a005_campsite::aggregate::Campsite>, axum::http::StatusCode>
{
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a005_campsite::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Campsite fetch failed: {}", e);
            Err(e.status_code())
        }
    }
}

/// POST /api/campsite
pub async fn upsert(
    Json(dto): Json<contracts::domain::a005_campsite::aggregate::CampsiteDto>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let result = if dto.id.is_some() {
        a005_campsite::service::update(dto)
            .await
            .map(|_| uuid::Uuid::nil().to_string())
    } else {
        a005_campsite::service::create(dto).await.map(|id| id.to_string())
    };

    match result {
        Ok(id) => Ok(Json(json!({"id": id}))),
        Err(e) => {
            tracing::error!("Campsite upsert failed: {}", e);
            Err(e.status_code())
        }
    }
}

/// DELETE /api/campsite/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a005_campsite::service::delete(uuid).await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::error!("Campsite delete failed: {}", e);
            Err(e.status_code())
        }
    }
}
