//! Public category page read model

use crate::catalog::backend_map::BackendCategoryMap;
use crate::catalog::filter::filter_gear;
use crate::catalog::store::CategorySnapshot;
use crate::catalog;
use crate::domain::a002_gear;
use crate::shared::error::DomainError;
use contracts::domain::a001_category::aggregate::Category;
use contracts::domain::a002_gear::aggregate::Gear;
use contracts::domain::a002_gear::filters::GearFilters;
use contracts::projections::p900_category_page::dto::CategoryPageView;

pub fn build_view(
    category: Category,
    items: Vec<Gear>,
    filters: &GearFilters,
    snapshot: &CategorySnapshot,
    map: &BackendCategoryMap,
) -> CategoryPageView {
    let subcategories: Vec<Category> = snapshot
        .children(category.id)
        .into_iter()
        .cloned()
        .collect();
    let items = filter_gear(items, Some(&category), filters, snapshot, map);
    let total_matched = items.len();

    CategoryPageView {
        category,
        subcategories,
        items,
        total_matched,
    }
}

/// GET /api/p900/category/:slug; unknown slug is a 404
pub async fn load(slug: &str, filters: &GearFilters) -> Result<CategoryPageView, DomainError> {
    let state = catalog::current().await?;
    let category = state
        .snapshot
        .by_slug(slug)
        .cloned()
        .ok_or(DomainError::NotFound)?;
    let items = a002_gear::repository::list_all().await?;
    Ok(build_view(
        category,
        items,
        filters,
        &state.snapshot,
        &state.backend_map,
    ))
}
