use axum::{
    middleware,
    routing::get,
    Router,
};

use crate::handlers;
use crate::shared::cache;

/// All application routes
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // A001 Category
        // ========================================
        .route(
            "/api/category",
            get(handlers::a001_category::list_all).post(handlers::a001_category::upsert),
        )
        .route(
            "/api/category/:id",
            get(handlers::a001_category::get_by_id).delete(handlers::a001_category::delete),
        )
        // ========================================
        // A002 Gear
        // ========================================
        .route(
            "/api/gear",
            get(handlers::a002_gear::list_all).post(handlers::a002_gear::upsert),
        )
        .route("/api/gear/search", get(handlers::a002_gear::search))
        .route(
            "/api/gear/:id",
            get(handlers::a002_gear::get_by_id).delete(handlers::a002_gear::delete),
        )
        // ========================================
        // A003 Brand
        // ========================================
        .route(
            "/api/brand",
            get(handlers::a003_brand::list_all).post(handlers::a003_brand::upsert),
        )
        .route(
            "/api/brand/:id",
            get(handlers::a003_brand::get_by_id).delete(handlers::a003_brand::delete),
        )
        // ========================================
        // A004 Reference
        // ========================================
        .route(
            "/api/reference",
            get(handlers::a004_reference::list_all).post(handlers::a004_reference::upsert),
        )
        .route(
            "/api/reference/:id",
            get(handlers::a004_reference::get_by_id).delete(handlers::a004_reference::delete),
        )
        // ========================================
        // A005 Campsite
        // ========================================
        .route(
            "/api/campsite",
            get(handlers::a005_campsite::list_all).post(handlers::a005_campsite::upsert),
        )
        .route(
            "/api/campsite/:id",
            get(handlers::a005_campsite::get_by_id).delete(handlers::a005_campsite::delete),
        )
        // ========================================
        // Page projections
        // ========================================
        .route(
            "/api/p900/category/:slug",
            get(handlers::projections::category_page),
        )
        .route(
            "/api/p901/admin-gear",
            get(handlers::projections::admin_gear_page),
        )
        .route("/api/p902/home", get(handlers::projections::home_page))
        .layer(middleware::from_fn(cache::response_cache))
}
