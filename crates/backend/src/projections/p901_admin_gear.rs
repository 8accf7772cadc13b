//! Admin gear page read model: status counters plus the per-category
//! grouping of the whole inventory.

use crate::catalog::backend_map::BackendCategoryMap;
use crate::catalog::collation::turkish_cmp;
use crate::catalog::store::CategorySnapshot;
use crate::catalog;
use crate::domain::a002_gear;
use crate::shared::error::DomainError;
use contracts::domain::a001_category::aggregate::CategoryId;
use contracts::domain::a002_gear::aggregate::Gear;
use contracts::projections::p901_admin_gear::dto::{
    AdminGearQuery, AdminGearStats, AdminGearView, AdminSort, GearGroup,
};
use std::collections::HashMap;

const UNCATEGORIZED: &str = "Kategorisiz";

/// Status counters over the whole inventory, before any filter
pub fn compute_stats(items: &[Gear]) -> AdminGearStats {
    let mut stats = AdminGearStats {
        total: items.len(),
        ..Default::default()
    };
    for item in items {
        let status = item.effective_status();
        if status == contracts::domain::a002_gear::aggregate::GearStatus::ForSale {
            stats.for_sale += 1;
        }
        if status == contracts::domain::a002_gear::aggregate::GearStatus::Sold {
            stats.sold += 1;
        }
        if status.is_orderable() {
            stats.orderable += 1;
        }
    }
    if !items.is_empty() {
        let sum: f64 = items.iter().map(|g| g.price_per_day).sum();
        stats.average_price = sum / items.len() as f64;
    }
    stats
}

/// Which category a gear row belongs to for display purposes. Tries the
/// raw reference as a client id or slug, then the backend map, then the
/// slug field. None means the Kategorisiz bucket.
fn group_category(
    gear: &Gear,
    snapshot: &CategorySnapshot,
    map: &BackendCategoryMap,
) -> Option<CategoryId> {
    if let Some(raw) = gear.category_ref.as_deref() {
        if let Some(cat) = snapshot.by_id_or_slug(raw) {
            return Some(cat.id);
        }
        if let Some(id) = map.resolve(raw).resolved() {
            return Some(id);
        }
    }
    if let Some(slug) = gear.category_slug.as_deref() {
        if let Some(cat) = snapshot.by_slug(slug) {
            return Some(cat.id);
        }
    }
    None
}

/// Groups in display order: root categories by `order`, then the deeper
/// levels by `order`, the uncategorized bucket always last. Categories
/// without items produce no group.
pub fn build_groups(
    items: &[Gear],
    snapshot: &CategorySnapshot,
    map: &BackendCategoryMap,
) -> Vec<GearGroup> {
    let mut buckets: HashMap<Option<CategoryId>, Vec<Gear>> = HashMap::new();
    for item in items {
        buckets
            .entry(group_category(item, snapshot, map))
            .or_default()
            .push(item.clone());
    }

    let mut ordered: Vec<&contracts::domain::a001_category::aggregate::Category> =
        snapshot.roots();
    let mut deeper: Vec<_> = snapshot
        .all()
        .iter()
        .filter(|c| !c.is_root())
        .collect();
    deeper.sort_by_key(|c| c.order);
    ordered.extend(deeper);

    let mut groups = Vec::new();
    for cat in ordered {
        if let Some(bucket) = buckets.remove(&Some(cat.id)) {
            groups.push(GearGroup {
                category_name: cat.name.clone(),
                items: bucket,
            });
        }
    }
    if let Some(bucket) = buckets.remove(&None) {
        groups.push(GearGroup {
            category_name: UNCATEGORIZED.into(),
            items: bucket,
        });
    }
    groups
}

fn apply_filters(
    items: Vec<Gear>,
    query: &AdminGearQuery,
    snapshot: &CategorySnapshot,
    map: &BackendCategoryMap,
) -> Vec<Gear> {
    let selected = query
        .category
        .as_deref()
        .and_then(|selector| snapshot.by_id_or_slug(selector));

    items
        .into_iter()
        .filter(|gear| match selected {
            Some(cat) => crate::catalog::filter::matches_category(gear, cat, snapshot, map),
            None => true,
        })
        .filter(|gear| match query.search.as_deref() {
            Some(q) => {
                let needle = q.trim().to_lowercase();
                needle.is_empty()
                    || gear.name.to_lowercase().contains(&needle)
                    || gear.description.to_lowercase().contains(&needle)
                    || gear
                        .brand
                        .as_deref()
                        .is_some_and(|b| b.to_lowercase().contains(&needle))
            }
            None => true,
        })
        .filter(|gear| match query.status {
            Some(status) => gear.effective_status() == status,
            None => true,
        })
        .collect()
}

fn apply_sort(items: &mut [Gear], sort: AdminSort) {
    match sort {
        AdminSort::Name => items.sort_by(|a, b| turkish_cmp(&a.name, &b.name)),
        AdminSort::Price => {
            items.sort_by(|a, b| b.price_per_day.total_cmp(&a.price_per_day))
        }
        AdminSort::Status => {
            items.sort_by(|a, b| a.effective_status().as_str().cmp(b.effective_status().as_str()))
        }
        AdminSort::Date => {
            items.sort_by(|a, b| b.metadata.created_at.cmp(&a.metadata.created_at))
        }
    }
}

pub fn build_view(
    all_items: Vec<Gear>,
    query: &AdminGearQuery,
    snapshot: &CategorySnapshot,
    map: &BackendCategoryMap,
) -> AdminGearView {
    let stats = compute_stats(&all_items);

    let mut items = apply_filters(all_items, query, snapshot, map);
    apply_sort(&mut items, query.sort.unwrap_or_default());

    let groups = build_groups(&items, snapshot, map);

    AdminGearView {
        stats,
        groups,
        items,
    }
}

/// GET /api/p901/admin-gear
pub async fn load(query: &AdminGearQuery) -> Result<AdminGearView, DomainError> {
    let state = catalog::current().await?;
    let items = a002_gear::repository::list_all().await?;
    Ok(build_view(items, query, &state.snapshot, &state.backend_map))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::backend_map::BackendCategoryRecord;
    use crate::catalog::store::test_fixtures::*;
    use contracts::domain::a002_gear::aggregate::GearStatus;

    fn snapshot() -> CategorySnapshot {
        CategorySnapshot::build(vec![
            category(uuid(1), "tents", "Çadırlar", None, 1),
            category(uuid(2), "stoves", "Ocaklar", None, 0),
            category(uuid(3), "dome-tents", "Dome Çadırlar", Some(uuid(1)), 0),
        ])
    }

    fn gear(name: &str, category_ref: Option<&str>) -> Gear {
        let mut item = Gear::new_for_insert(name.into());
        item.category_ref = category_ref.map(Into::into);
        item
    }

    #[test]
    fn stats_use_effective_status() {
        let mut sold = gear("A", None);
        sold.available = false;
        let mut waiting = gear("B", None);
        waiting.status = Some(GearStatus::Waiting);
        let mut priced = gear("C", None);
        priced.price_per_day = 300.0;

        let stats = compute_stats(&[sold, waiting, priced]);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.for_sale, 1);
        assert_eq!(stats.sold, 1);
        assert_eq!(stats.orderable, 1);
        assert_eq!(stats.average_price, 100.0);
    }

    #[test]
    fn groups_follow_category_order_with_bucket_last() {
        let snap = snapshot();
        let map = BackendCategoryMap::empty();
        let items = vec![
            gear("Çadır", Some(&uuid(1).to_string())),
            gear("Ocak", Some(&uuid(2).to_string())),
            gear("Dome", Some(&uuid(3).to_string())),
            gear("Bilinmeyen", Some(&uuid(77).to_string())),
        ];
        let groups = build_groups(&items, &snap, &map);
        let names: Vec<&str> = groups.iter().map(|g| g.category_name.as_str()).collect();
        assert_eq!(names, vec!["Ocaklar", "Çadırlar", "Dome Çadırlar", "Kategorisiz"]);
    }

    #[test]
    fn backend_uuid_groups_through_map() {
        let snap = snapshot();
        let records = vec![BackendCategoryRecord {
            id: uuid(100),
            slug: "dome-tents".into(),
            name: String::new(),
        }];
        let map = BackendCategoryMap::build(&records, &snap);
        let items = vec![gear("Dome", Some(&uuid(100).to_string()))];
        let groups = build_groups(&items, &snap, &map);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].category_name, "Dome Çadırlar");
    }

    #[test]
    fn slug_field_is_the_last_resort() {
        let snap = snapshot();
        let map = BackendCategoryMap::empty();
        let mut item = gear("Ocak", None);
        item.category_slug = Some("stoves".into());
        let groups = build_groups(&[item], &snap, &map);
        assert_eq!(groups[0].category_name, "Ocaklar");
    }

    #[test]
    fn status_filter_and_name_sort() {
        let snap = snapshot();
        let map = BackendCategoryMap::empty();
        let mut a = gear("çanta", None);
        a.status = Some(GearStatus::Waiting);
        let mut b = gear("cibinlik", None);
        b.status = Some(GearStatus::Waiting);
        let c = gear("masa", None);

        let query = AdminGearQuery {
            status: Some(GearStatus::Waiting),
            ..Default::default()
        };
        let view = build_view(vec![a, b, c], &query, &snap, &map);
        assert_eq!(view.stats.total, 3);
        let names: Vec<&str> = view.items.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["cibinlik", "çanta"]);
    }
}
