use super::aggregate::GearStatus;
use serde::{Deserialize, Serialize};

/// Facet filters for the gear list. All fields optional; absent fields do
/// not constrain the result. Deserializable from a query string.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GearFilters {
    #[serde(rename = "minPrice", default)]
    pub min_price: Option<f64>,
    #[serde(rename = "maxPrice", default)]
    pub max_price: Option<f64>,
    #[serde(default)]
    pub available: Option<bool>,
    #[serde(default)]
    pub status: Option<StatusFilter>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(rename = "minRating", default)]
    pub min_rating: Option<f64>,
    #[serde(rename = "sortBy", default)]
    pub sort_by: Option<GearSort>,
}

impl GearFilters {
    pub fn is_empty(&self) -> bool {
        self.min_price.is_none()
            && self.max_price.is_none()
            && self.available.is_none()
            && self.status.is_none()
            && self.search.is_none()
            && self.brand.is_none()
            && self.color.is_none()
            && self.min_rating.is_none()
            && self.sort_by.is_none()
    }
}

/// Status facet. `for-sale-or-sold` is a storefront special case matching
/// either of those two statuses; every other value is an exact match
/// against the item's effective status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusFilter {
    ForSaleOrSold,
    ForSale,
    Waiting,
    Arrived,
    Shipped,
    Sold,
}

impl StatusFilter {
    pub fn matches(&self, status: GearStatus) -> bool {
        match self {
            StatusFilter::ForSaleOrSold => {
                matches!(status, GearStatus::ForSale | GearStatus::Sold)
            }
            StatusFilter::ForSale => status == GearStatus::ForSale,
            StatusFilter::Waiting => status == GearStatus::Waiting,
            StatusFilter::Arrived => status == GearStatus::Arrived,
            StatusFilter::Shipped => status == GearStatus::Shipped,
            StatusFilter::Sold => status == GearStatus::Sold,
        }
    }
}

/// Sort keys for the storefront list. Name sorts use Turkish collation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GearSort {
    PriceAsc,
    PriceDesc,
    NameAsc,
    NameDesc,
    Newest,
    Oldest,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_sale_or_sold_matches_both() {
        let filter = StatusFilter::ForSaleOrSold;
        assert!(filter.matches(GearStatus::ForSale));
        assert!(filter.matches(GearStatus::Sold));
        assert!(!filter.matches(GearStatus::Waiting));
        assert!(!filter.matches(GearStatus::Arrived));
        assert!(!filter.matches(GearStatus::Shipped));
    }

    #[test]
    fn exact_status_filter() {
        assert!(StatusFilter::Waiting.matches(GearStatus::Waiting));
        assert!(!StatusFilter::Waiting.matches(GearStatus::Sold));
    }

    #[test]
    fn filters_deserialize_from_camel_case() {
        let filters: GearFilters = serde_json::from_str(
            r#"{"minPrice":10,"maxPrice":200,"status":"for-sale-or-sold","sortBy":"price-asc"}"#,
        )
        .unwrap();
        assert_eq!(filters.min_price, Some(10.0));
        assert_eq!(filters.max_price, Some(200.0));
        assert_eq!(filters.status, Some(StatusFilter::ForSaleOrSold));
        assert_eq!(filters.sort_by, Some(GearSort::PriceAsc));
    }

    #[test]
    fn empty_filters_report_empty() {
        assert!(GearFilters::default().is_empty());
        let filters = GearFilters {
            search: Some("çadır".into()),
            ..Default::default()
        };
        assert!(!filters.is_empty());
    }
}
