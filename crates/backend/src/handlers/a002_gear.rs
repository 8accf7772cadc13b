use axum::{
    extract::{Path, Query},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::catalog;
use crate::catalog::filter::filter_gear;
use crate::domain::a002_gear;

/// GET /api/gear; facet filters and sort run server-side
pub async fn list_all(
    Query(filters): Query<contracts::domain::a002_gear::filters::GearFilters>,
) -> Result<Json<Vec<contracts::domain::a002_gear::aggregate::Gear>>, axum::http::StatusCode> {
    let items = match a002_gear::service::list_all().await {
        Ok(v) => v,
        Err(e) => {
            tracing::error!("Gear list failed: {}", e);
            return Err(e.status_code());
        }
    };
    if filters.is_empty() {
        return Ok(Json(items));
    }
    let state = match catalog::current().await {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Catalog state unavailable: {}", e);
            return Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        }
    };
    Ok(Json(filter_gear(
        items,
        None,
        &filters,
        &state.snapshot,
        &state.backend_map,
    )))
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// GET /api/gear/search?q= for name/description substring search
pub async fn search(
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<contracts::domain::a002_gear::aggregate::Gear>>, axum::http::StatusCode> {
    let filters = contracts::domain::a002_gear::filters::GearFilters {
        search: Some(query.q),
        ..Default::default()
    };
    let items = match a002_gear::service::list_all().await {
        Ok(v) => v,
        Err(e) => {
            tracing::error!("Gear search failed: {}", e);
            return Err(e.status_code());
        }
    };
    let matched = items
        .into_iter()
        .filter(|gear| crate::catalog::filter::matches_facets(gear, &filters))
        .collect();
    Ok(Json(matched))
}

/// GET /api/gear/:id
pub async fn get_by_id(
    Path(id): Path<String>,
) -> Result<Json<contracts::domain::a002_gear::aggregate::Gear>, axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a002_gear::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Gear fetch failed: {}", e);
            Err(e.status_code())
        }
    }
}

/// POST /api/gear
pub async fn upsert(
    Json(dto): Json<contracts::domain::a002_gear::aggregate::GearDto>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let result = if dto.id.is_some() {
        a002_gear::service::update(dto)
            .await
            .map(|_| uuid::Uuid::nil().to_string())
    } else {
        a002_gear::service::create(dto).await.map(|id| id.to_string())
    };

    match result {
        Ok(id) => Ok(Json(json!({"id": id}))),
        Err(e) => {
            tracing::error!("Gear upsert failed: {}", e);
            Err(e.status_code())
        }
    }
}

/// DELETE /api/gear/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a002_gear::service::delete(uuid).await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::error!("Gear delete failed: {}", e);
            Err(e.status_code())
        }
    }
}
