//! Gear filter pipeline: category membership, facet filters, sorting.
//!
//! Runs as three stages. Category membership uses the full descendant
//! closure of the selected category, so querying a root returns its whole
//! subtree. Facets are ANDed and independent of the category stage. Sorting
//! is stable and only applied when a sort key is requested.

use super::backend_map::BackendCategoryMap;
use super::collation::turkish_cmp;
use super::store::CategorySnapshot;
use contracts::domain::a001_category::aggregate::Category;
use contracts::domain::a002_gear::aggregate::Gear;
use contracts::domain::a002_gear::filters::{GearFilters, GearSort};

/// Whether a gear item belongs to the selected category or any of its
/// descendants. Three ways in, tried in order: its raw reference is a
/// client id inside the closure, its raw reference is a backend UUID the
/// mapper resolves into the closure, or its slug field names the selected
/// category directly.
pub fn matches_category(
    gear: &Gear,
    selected: &Category,
    snapshot: &CategorySnapshot,
    map: &BackendCategoryMap,
) -> bool {
    let closure = snapshot.descendant_closure(selected.id);

    if let Some(raw) = gear.category_ref.as_deref() {
        if let Some((_, id)) = map.classify(raw, snapshot) {
            if closure.contains(&id) {
                return true;
            }
        }
    }

    if let Some(slug) = gear.category_slug.as_deref() {
        if slug.trim().to_lowercase() == selected.slug.trim().to_lowercase() {
            return true;
        }
    }

    false
}

fn text_haystack(gear: &Gear) -> String {
    let mut haystack = format!("{} {}", gear.name, gear.description);
    for value in gear.specifications.values() {
        haystack.push(' ');
        haystack.push_str(value);
    }
    haystack.to_lowercase()
}

/// Facet filters, ANDed. An item with no rating counts as rating 0 for
/// the `minRating` facet.
pub fn matches_facets(gear: &Gear, filters: &GearFilters) -> bool {
    if let Some(min) = filters.min_price {
        if gear.price_per_day < min {
            return false;
        }
    }
    if let Some(max) = filters.max_price {
        if gear.price_per_day > max {
            return false;
        }
    }
    if let Some(available) = filters.available {
        if gear.available != available {
            return false;
        }
    }
    if let Some(status) = filters.status {
        if !status.matches(gear.effective_status()) {
            return false;
        }
    }
    if let Some(search) = filters.search.as_deref() {
        let needle = search.trim().to_lowercase();
        if !needle.is_empty() {
            let name = gear.name.to_lowercase();
            let description = gear.description.to_lowercase();
            if !name.contains(&needle) && !description.contains(&needle) {
                return false;
            }
        }
    }
    if let Some(brand) = filters.brand.as_deref() {
        let needle = brand.trim().to_lowercase();
        if !needle.is_empty() {
            let field_hit = gear
                .brand
                .as_deref()
                .is_some_and(|field| field.to_lowercase().contains(&needle));
            if !field_hit && !text_haystack(gear).contains(&needle) {
                return false;
            }
        }
    }
    if let Some(color) = filters.color.as_deref() {
        let needle = color.trim().to_lowercase();
        if !needle.is_empty() {
            let field_hit = gear
                .color
                .as_deref()
                .is_some_and(|field| field.to_lowercase().contains(&needle));
            if !field_hit && !text_haystack(gear).contains(&needle) {
                return false;
            }
        }
    }
    if let Some(min_rating) = filters.min_rating {
        if gear.rating.unwrap_or(0.0) < min_rating {
            return false;
        }
    }
    true
}

pub fn sort_gear(items: &mut [Gear], sort: GearSort) {
    match sort {
        GearSort::PriceAsc => {
            items.sort_by(|a, b| a.price_per_day.total_cmp(&b.price_per_day))
        }
        GearSort::PriceDesc => {
            items.sort_by(|a, b| b.price_per_day.total_cmp(&a.price_per_day))
        }
        GearSort::NameAsc => items.sort_by(|a, b| turkish_cmp(&a.name, &b.name)),
        GearSort::NameDesc => items.sort_by(|a, b| turkish_cmp(&b.name, &a.name)),
        GearSort::Newest => {
            items.sort_by(|a, b| b.metadata.created_at.cmp(&a.metadata.created_at))
        }
        GearSort::Oldest => {
            items.sort_by(|a, b| a.metadata.created_at.cmp(&b.metadata.created_at))
        }
    }
}

/// The whole pipeline. With no selected category and empty filters the
/// input comes back unchanged, in insertion order.
pub fn filter_gear(
    items: Vec<Gear>,
    selected: Option<&Category>,
    filters: &GearFilters,
    snapshot: &CategorySnapshot,
    map: &BackendCategoryMap,
) -> Vec<Gear> {
    let mut result: Vec<Gear> = items
        .into_iter()
        .filter(|gear| match selected {
            Some(category) => matches_category(gear, category, snapshot, map),
            None => true,
        })
        .filter(|gear| matches_facets(gear, filters))
        .collect();

    if let Some(sort) = filters.sort_by {
        sort_gear(&mut result, sort);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::backend_map::BackendCategoryRecord;
    use crate::catalog::store::test_fixtures::*;
    use contracts::domain::a002_gear::filters::StatusFilter;
    use contracts::domain::common::EntityMetadata;

    fn snapshot() -> CategorySnapshot {
        CategorySnapshot::build(vec![
            category(uuid(1), "tents", "Çadırlar", None, 0),
            category(uuid(2), "dome-tents", "Dome Çadırlar", Some(uuid(1)), 0),
            category(uuid(3), "family-dome", "Aile Tipi Dome", Some(uuid(2)), 0),
            category(uuid(4), "stoves", "Ocaklar", None, 1),
        ])
    }

    fn backend_map(snap: &CategorySnapshot) -> BackendCategoryMap {
        let records = vec![BackendCategoryRecord {
            id: uuid(100),
            slug: "dome-tents".into(),
            name: "Dome".into(),
        }];
        BackendCategoryMap::build(&records, snap)
    }

    fn gear(name: &str, category_ref: Option<&str>, price: f64) -> Gear {
        let mut item = Gear::new_for_insert(name.into());
        item.category_ref = category_ref.map(Into::into);
        item.price_per_day = price;
        item
    }

    #[test]
    fn root_selection_includes_whole_subtree() {
        let snap = snapshot();
        let map = BackendCategoryMap::empty();
        let tents = snap.by_slug("tents").unwrap();

        let leaf_item = gear("Aile Çadırı", Some(&uuid(3).to_string()), 100.0);
        assert!(matches_category(&leaf_item, tents, &snap, &map));

        let stove_item = gear("Kamp Ocağı", Some(&uuid(4).to_string()), 50.0);
        assert!(!matches_category(&stove_item, tents, &snap, &map));
    }

    #[test]
    fn parent_selection_returns_direct_and_closure_matches() {
        let snap = CategorySnapshot::build(vec![
            category(uuid(1), "tents", "Çadırlar", None, 0),
            category(uuid(2), "dome-tents", "Dome Çadırlar", Some(uuid(1)), 0),
        ]);
        let map = BackendCategoryMap::empty();
        let items = vec![
            gear("Dome Çadır", Some(&uuid(2).to_string()), 100.0),
            gear("Genel Çadır", Some(&uuid(1).to_string()), 50.0),
        ];

        let root = snap.by_slug("tents").unwrap().clone();
        let both = filter_gear(items.clone(), Some(&root), &GearFilters::default(), &snap, &map);
        assert_eq!(both.len(), 2);

        let child = snap.by_slug("dome-tents").unwrap().clone();
        let only_child = filter_gear(items, Some(&child), &GearFilters::default(), &snap, &map);
        assert_eq!(only_child.len(), 1);
        assert_eq!(only_child[0].name, "Dome Çadır");
    }

    #[test]
    fn backend_uuid_resolves_through_map() {
        let snap = snapshot();
        let map = backend_map(&snap);
        let tents = snap.by_slug("tents").unwrap();

        let item = gear("Dome Çadır", Some(&uuid(100).to_string()), 120.0);
        assert!(matches_category(&item, tents, &snap, &map));

        // Same UUID with an empty map is just an unresolved reference
        assert!(!matches_category(&item, tents, &snap, &BackendCategoryMap::empty()));
    }

    #[test]
    fn slug_field_matches_selected_category() {
        let snap = snapshot();
        let map = BackendCategoryMap::empty();
        let dome = snap.by_slug("dome-tents").unwrap();

        let mut item = gear("Çadır", None, 80.0);
        item.category_slug = Some(" Dome-Tents ".into());
        assert!(matches_category(&item, dome, &snap, &map));
    }

    #[test]
    fn uncategorized_item_never_matches_a_selection() {
        let snap = snapshot();
        let map = BackendCategoryMap::empty();
        let tents = snap.by_slug("tents").unwrap();
        assert!(!matches_category(&gear("Fener", None, 20.0), tents, &snap, &map));
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let filters = GearFilters {
            search: Some("çadır".into()),
            ..Default::default()
        };
        assert!(matches_facets(&gear("Büyük Çadır", None, 100.0), &filters));
        assert!(!matches_facets(&gear("Kamp Sandalyesi", None, 100.0), &filters));
    }

    #[test]
    fn for_sale_or_sold_spans_both_statuses() {
        let filters = GearFilters {
            status: Some(StatusFilter::ForSaleOrSold),
            ..Default::default()
        };
        let mut for_sale = gear("A", None, 10.0);
        for_sale.available = true;
        let mut sold = gear("B", None, 10.0);
        sold.available = false;
        let mut waiting = gear("C", None, 10.0);
        waiting.status = Some(
            contracts::domain::a002_gear::aggregate::GearStatus::Waiting,
        );

        assert!(matches_facets(&for_sale, &filters));
        assert!(matches_facets(&sold, &filters));
        assert!(!matches_facets(&waiting, &filters));
    }

    #[test]
    fn brand_matches_field_or_any_text_source() {
        let filters = GearFilters {
            brand: Some("nordkamp".into()),
            ..Default::default()
        };
        let mut branded = gear("Çadır", None, 10.0);
        branded.brand = Some("NordKamp".into());
        assert!(matches_facets(&branded, &filters));

        // A mismatching brand field does not veto a name hit
        let mut other_brand = gear("NordKamp Çadır", None, 10.0);
        other_brand.brand = Some("Festival".into());
        assert!(matches_facets(&other_brand, &filters));

        let in_description = {
            let mut g = gear("Çadır", None, 10.0);
            g.description = "NordKamp üretimi".into();
            g
        };
        assert!(matches_facets(&in_description, &filters));

        let mut no_hit = gear("Kamp Sandalyesi", None, 10.0);
        no_hit.brand = Some("Festival".into());
        assert!(!matches_facets(&no_hit, &filters));
    }

    #[test]
    fn missing_rating_counts_as_zero() {
        let filters = GearFilters {
            min_rating: Some(3.0),
            ..Default::default()
        };
        let unrated = gear("A", None, 10.0);
        assert!(!matches_facets(&unrated, &filters));
        let mut rated = gear("B", None, 10.0);
        rated.rating = Some(4.5);
        assert!(matches_facets(&rated, &filters));
    }

    #[test]
    fn category_and_facets_are_independent() {
        let snap = snapshot();
        let map = BackendCategoryMap::empty();
        let tents = snap.by_slug("tents").unwrap().clone();

        let items = vec![
            gear("Ucuz Çadır", Some(&uuid(2).to_string()), 50.0),
            gear("Pahalı Çadır", Some(&uuid(2).to_string()), 500.0),
            gear("Ucuz Ocak", Some(&uuid(4).to_string()), 40.0),
        ];
        let filters = GearFilters {
            max_price: Some(100.0),
            ..Default::default()
        };
        let result = filter_gear(items, Some(&tents), &filters, &snap, &map);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Ucuz Çadır");
    }

    #[test]
    fn name_sorts_use_turkish_collation() {
        let items = vec![
            gear("çanta", None, 10.0),
            gear("cibinlik", None, 10.0),
            gear("ırmak botu", None, 10.0),
            gear("iklim çadırı", None, 10.0),
        ];
        let filters = GearFilters {
            sort_by: Some(GearSort::NameAsc),
            ..Default::default()
        };
        let snap = CategorySnapshot::empty();
        let map = BackendCategoryMap::empty();
        let asc = filter_gear(items.clone(), None, &filters, &snap, &map);
        let names: Vec<&str> = asc.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["cibinlik", "çanta", "ırmak botu", "iklim çadırı"]);

        let filters = GearFilters {
            sort_by: Some(GearSort::NameDesc),
            ..Default::default()
        };
        let desc = filter_gear(items, None, &filters, &snap, &map);
        let names: Vec<&str> = desc.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["iklim çadırı", "ırmak botu", "çanta", "cibinlik"]);
    }

    #[test]
    fn newest_sorts_by_created_at() {
        let mut old = gear("Eski", None, 10.0);
        old.metadata = EntityMetadata {
            created_at: chrono::Utc::now() - chrono::Duration::days(2),
            ..EntityMetadata::new()
        };
        let new = gear("Yeni", None, 10.0);

        let filters = GearFilters {
            sort_by: Some(GearSort::Newest),
            ..Default::default()
        };
        let snap = CategorySnapshot::empty();
        let map = BackendCategoryMap::empty();
        let result = filter_gear(vec![old, new], None, &filters, &snap, &map);
        assert_eq!(result[0].name, "Yeni");
    }

    #[test]
    fn no_sort_preserves_input_order() {
        let items = vec![
            gear("Zula", None, 10.0),
            gear("Abajur", None, 10.0),
            gear("Masa", None, 10.0),
        ];
        let snap = CategorySnapshot::empty();
        let map = BackendCategoryMap::empty();
        let result = filter_gear(items, None, &GearFilters::default(), &snap, &map);
        let names: Vec<&str> = result.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Zula", "Abajur", "Masa"]);
    }
}
