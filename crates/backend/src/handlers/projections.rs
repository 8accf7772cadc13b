use axum::{
    extract::{Path, Query},
    Json,
};

use crate::projections::{p900_category_page, p901_admin_gear, p902_home};
use crate::shared::error::DomainError;

/// GET /api/p900/category/:slug
pub async fn category_page(
    Path(slug): Path<String>,
    Query(filters): Query<contracts::domain::a002_gear::filters::GearFilters>,
) -> Result<
    Json<contracts::projections::p900_category_page::dto::CategoryPageView>,
    axum::http::StatusCode,
> {
    match p900_category_page::load(&slug, &filters).await {
        Ok(view) => Ok(Json(view)),
        Err(DomainError::NotFound) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Category page projection failed: {}", e);
            Err(e.status_code())
        }
    }
}

/// GET /api/p901/admin-gear
pub async fn admin_gear_page(
    Query(query): Query<contracts::projections::p901_admin_gear::dto::AdminGearQuery>,
) -> Result<
    Json<contracts::projections::p901_admin_gear::dto::AdminGearView>,
    axum::http::StatusCode,
> {
    match p901_admin_gear::load(&query).await {
        Ok(view) => Ok(Json(view)),
        Err(e) => {
            tracing::error!("Admin gear projection failed: {}", e);
            Err(e.status_code())
        }
    }
}

/// GET /api/p902/home
pub async fn home_page(
) -> Result<Json<contracts::projections::p902_home::dto::HomeView>, axum::http::StatusCode> {
    match p902_home::load().await {
        Ok(view) => Ok(Json(view)),
        Err(e) => {
            tracing::error!("Home projection failed: {}", e);
            Err(e.status_code())
        }
    }
}
