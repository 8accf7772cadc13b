use crate::domain::a002_gear::aggregate::{Gear, GearStatus};
use serde::{Deserialize, Serialize};

/// Counters shown at the top of the admin gear page. `orderable` covers
/// the waiting/arrived/shipped statuses.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AdminGearStats {
    pub total: usize,
    #[serde(rename = "forSale")]
    pub for_sale: usize,
    pub orderable: usize,
    pub sold: usize,
    #[serde(rename = "averagePrice")]
    pub average_price: f64,
}

/// One category bucket of the grouped admin view. Unmatched items land in
/// the trailing "Kategorisiz" bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GearGroup {
    #[serde(rename = "categoryName")]
    pub category_name: String,
    pub items: Vec<Gear>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminGearView {
    pub stats: AdminGearStats,
    pub groups: Vec<GearGroup>,
    /// Flat list after the category/search/status filters and the admin sort
    pub items: Vec<Gear>,
}

/// Sort keys of the admin list; a narrower set than the storefront's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminSort {
    Name,
    Price,
    Status,
    Date,
}

impl Default for AdminSort {
    fn default() -> Self {
        AdminSort::Name
    }
}

/// Query parameters accepted by the admin gear projection
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AdminGearQuery {
    /// Selected category, by client id or slug; descendant closure semantics
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub status: Option<GearStatus>,
    #[serde(default)]
    pub sort: Option<AdminSort>,
}
