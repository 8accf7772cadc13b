use crate::domain::a001_category::aggregate::Category;
use crate::domain::a002_gear::aggregate::Gear;
use serde::{Deserialize, Serialize};

/// Read model for the public category page: the resolved category, its
/// direct children, and the gear list after category membership and facet
/// filtering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryPageView {
    pub category: Category,
    pub subcategories: Vec<Category>,
    pub items: Vec<Gear>,
    #[serde(rename = "totalMatched")]
    pub total_matched: usize,
}
