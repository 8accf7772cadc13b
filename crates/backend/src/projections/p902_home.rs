//! Homepage category strip read model

use crate::catalog;
use crate::catalog::store::CategorySnapshot;
use crate::shared::error::DomainError;
use contracts::domain::a001_category::aggregate::Category;
use contracts::projections::p902_home::dto::{HomeView, SHOWCASE_LIMIT};

/// Leaf categories (grandchildren of roots) when the tree goes three
/// levels deep, otherwise the second level; capped at the showcase limit.
pub fn showcase(snapshot: &CategorySnapshot) -> Vec<Category> {
    let mut second_level = Vec::new();
    let mut third_level = Vec::new();

    for root in snapshot.roots() {
        for child in snapshot.children(root.id) {
            second_level.push(child.clone());
            for grandchild in snapshot.children(child.id) {
                third_level.push(grandchild.clone());
            }
        }
    }

    let mut picked = if third_level.is_empty() {
        second_level
    } else {
        third_level
    };
    picked.truncate(SHOWCASE_LIMIT);
    picked
}

/// GET /api/p902/home
pub async fn load() -> Result<HomeView, DomainError> {
    let state = catalog::current().await?;
    Ok(HomeView {
        showcase: showcase(&state.snapshot),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::store::test_fixtures::*;

    #[test]
    fn prefers_third_level_when_present() {
        let snap = CategorySnapshot::build(vec![
            category(uuid(1), "tents", "Çadırlar", None, 0),
            category(uuid(2), "dome-tents", "Dome", Some(uuid(1)), 0),
            category(uuid(3), "family-dome", "Aile Dome", Some(uuid(2)), 0),
        ]);
        let picked = showcase(&snap);
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].slug, "family-dome");
    }

    #[test]
    fn falls_back_to_second_level() {
        let snap = CategorySnapshot::build(vec![
            category(uuid(1), "tents", "Çadırlar", None, 0),
            category(uuid(2), "dome-tents", "Dome", Some(uuid(1)), 0),
            category(uuid(3), "tunnel-tents", "Tünel", Some(uuid(1)), 1),
        ]);
        let slugs: Vec<String> = showcase(&snap).into_iter().map(|c| c.slug).collect();
        assert_eq!(slugs, vec!["dome-tents", "tunnel-tents"]);
    }

    #[test]
    fn caps_at_showcase_limit() {
        let mut cats = vec![category(uuid(1), "root", "Kök", None, 0)];
        for n in 0..20u128 {
            cats.push(category(
                uuid(100 + n),
                &format!("sub-{}", n),
                &format!("Alt {}", n),
                Some(uuid(1)),
                n as i32,
            ));
        }
        let snap = CategorySnapshot::build(cats);
        assert_eq!(showcase(&snap).len(), SHOWCASE_LIMIT);
    }

    #[test]
    fn empty_tree_gives_empty_showcase() {
        assert!(showcase(&CategorySnapshot::empty()).is_empty());
    }
}
