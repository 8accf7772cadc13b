//! Immutable snapshot of the category tree.
//!
//! Built wholesale from the full category list; lookups and the adjacency
//! map are indexed once instead of rescanning the flat list per item.
//! Rebuilds are triggered by the catalog version counter, never by
//! incremental patching.

use contracts::domain::a001_category::aggregate::{Category, CategoryId};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

pub struct CategorySnapshot {
    categories: Vec<Category>,
    by_id: HashMap<CategoryId, usize>,
    by_slug: HashMap<String, usize>,
    children: HashMap<CategoryId, Vec<CategoryId>>,
    /// Descendant closures are memoized per root; the memo dies with the
    /// snapshot on rebuild.
    closure_memo: Mutex<HashMap<CategoryId, Arc<HashSet<CategoryId>>>>,
}

fn normalize_slug(slug: &str) -> String {
    slug.trim().to_lowercase()
}

impl CategorySnapshot {
    pub fn build(categories: Vec<Category>) -> Self {
        let mut by_id = HashMap::new();
        let mut by_slug = HashMap::new();
        let mut children: HashMap<CategoryId, Vec<CategoryId>> = HashMap::new();

        for (idx, cat) in categories.iter().enumerate() {
            by_id.insert(cat.id, idx);
            by_slug.entry(normalize_slug(&cat.slug)).or_insert(idx);
            if let Some(parent) = cat.parent_id {
                children.entry(parent).or_default().push(cat.id);
            }
        }

        // Sibling order within a parent follows the `order` field
        for ids in children.values_mut() {
            ids.sort_by_key(|id| {
                by_id
                    .get(id)
                    .map(|&i| categories[i].order)
                    .unwrap_or_default()
            });
        }

        Self {
            categories,
            by_id,
            by_slug,
            children,
            closure_memo: Mutex::new(HashMap::new()),
        }
    }

    pub fn empty() -> Self {
        Self::build(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// All categories in load order
    pub fn all(&self) -> &[Category] {
        &self.categories
    }

    pub fn by_id(&self, id: CategoryId) -> Option<&Category> {
        self.by_id.get(&id).map(|&i| &self.categories[i])
    }

    pub fn by_slug(&self, slug: &str) -> Option<&Category> {
        self.by_slug
            .get(&normalize_slug(slug))
            .map(|&i| &self.categories[i])
    }

    /// Resolve a raw selector that may be a client id or a slug
    pub fn by_id_or_slug(&self, selector: &str) -> Option<&Category> {
        use contracts::domain::common::AggregateId;
        if let Ok(id) = CategoryId::from_string(selector.trim()) {
            if let Some(cat) = self.by_id(id) {
                return Some(cat);
            }
        }
        self.by_slug(selector)
    }

    pub fn roots(&self) -> Vec<&Category> {
        let mut roots: Vec<&Category> = self
            .categories
            .iter()
            .filter(|c| c.parent_id.is_none())
            .collect();
        roots.sort_by_key(|c| c.order);
        roots
    }

    /// Exactly the categories whose parent_id equals `parent`, ordered
    pub fn children(&self, parent: CategoryId) -> Vec<&Category> {
        self.children
            .get(&parent)
            .map(|ids| ids.iter().filter_map(|id| self.by_id(*id)).collect())
            .unwrap_or_default()
    }

    /// The category plus everything reachable downward from it
    pub fn descendant_closure(&self, id: CategoryId) -> Arc<HashSet<CategoryId>> {
        if let Ok(memo) = self.closure_memo.lock() {
            if let Some(closure) = memo.get(&id) {
                return closure.clone();
            }
        }

        let mut closure = HashSet::new();
        let mut queue = vec![id];
        while let Some(current) = queue.pop() {
            if !closure.insert(current) {
                continue;
            }
            if let Some(kids) = self.children.get(&current) {
                queue.extend(kids.iter().copied());
            }
        }

        let closure = Arc::new(closure);
        if let Ok(mut memo) = self.closure_memo.lock() {
            memo.insert(id, closure.clone());
        }
        closure
    }

    /// Depth of a category: 1 for roots, parent depth + 1 otherwise.
    /// Unknown parents count as depth 1; cycles are cut at the list length.
    pub fn depth(&self, id: CategoryId) -> usize {
        let mut depth = 1;
        let mut current = self.by_id(id);
        while let Some(cat) = current {
            match cat.parent_id {
                None => break,
                Some(parent) => {
                    depth += 1;
                    if depth > self.categories.len() {
                        break;
                    }
                    current = self.by_id(parent);
                }
            }
        }
        depth
    }
}

#[cfg(test)]
pub(crate) mod test_fixtures {
    use super::*;
    use contracts::domain::common::EntityMetadata;
    use uuid::Uuid;

    pub fn category(
        id: Uuid,
        slug: &str,
        name: &str,
        parent: Option<Uuid>,
        order: i32,
    ) -> Category {
        Category {
            id: CategoryId(id),
            slug: slug.into(),
            name: name.into(),
            description: None,
            parent_id: parent.map(CategoryId),
            icon: None,
            order,
            metadata: EntityMetadata::new(),
        }
    }

    pub fn uuid(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }
}

#[cfg(test)]
mod tests {
    use super::test_fixtures::*;
    use super::*;

    fn three_level_snapshot() -> CategorySnapshot {
        // tents (root) -> dome-tents (column) -> family-dome (leaf)
        // stoves (root)
        CategorySnapshot::build(vec![
            category(uuid(1), "tents", "Çadırlar", None, 0),
            category(uuid(2), "dome-tents", "Dome Çadırlar", Some(uuid(1)), 0),
            category(uuid(3), "family-dome", "Aile Tipi Dome", Some(uuid(2)), 0),
            category(uuid(4), "stoves", "Ocaklar", None, 1),
        ])
    }

    #[test]
    fn children_contains_exactly_matching_parent() {
        let snap = three_level_snapshot();
        let kids = snap.children(CategoryId(uuid(1)));
        assert_eq!(kids.len(), 1);
        assert_eq!(kids[0].slug, "dome-tents");
        assert!(snap.children(CategoryId(uuid(4))).is_empty());
    }

    #[test]
    fn children_respect_sibling_order() {
        let snap = CategorySnapshot::build(vec![
            category(uuid(1), "tents", "Çadırlar", None, 0),
            category(uuid(2), "b-sub", "B", Some(uuid(1)), 2),
            category(uuid(3), "a-sub", "A", Some(uuid(1)), 1),
        ]);
        let kids = snap.children(CategoryId(uuid(1)));
        assert_eq!(kids[0].slug, "a-sub");
        assert_eq!(kids[1].slug, "b-sub");
    }

    #[test]
    fn roots_are_parentless() {
        let snap = three_level_snapshot();
        let roots = snap.roots();
        assert_eq!(roots.len(), 2);
        assert_eq!(roots[0].slug, "tents");
        assert_eq!(roots[1].slug, "stoves");
    }

    #[test]
    fn descendant_closure_covers_subtree() {
        let snap = three_level_snapshot();
        let closure = snap.descendant_closure(CategoryId(uuid(1)));
        assert_eq!(closure.len(), 3);
        assert!(closure.contains(&CategoryId(uuid(1))));
        assert!(closure.contains(&CategoryId(uuid(2))));
        assert!(closure.contains(&CategoryId(uuid(3))));
        assert!(!closure.contains(&CategoryId(uuid(4))));

        let leaf_closure = snap.descendant_closure(CategoryId(uuid(3)));
        assert_eq!(leaf_closure.len(), 1);
    }

    #[test]
    fn by_slug_is_case_insensitive_and_trimmed() {
        let snap = three_level_snapshot();
        assert!(snap.by_slug(" Tents ").is_some());
        assert!(snap.by_slug("unknown").is_none());
    }

    #[test]
    fn by_id_or_slug_resolves_both() {
        let snap = three_level_snapshot();
        assert_eq!(
            snap.by_id_or_slug(&uuid(2).to_string()).unwrap().slug,
            "dome-tents"
        );
        assert_eq!(snap.by_id_or_slug("dome-tents").unwrap().slug, "dome-tents");
    }

    #[test]
    fn depth_counts_levels() {
        let snap = three_level_snapshot();
        assert_eq!(snap.depth(CategoryId(uuid(1))), 1);
        assert_eq!(snap.depth(CategoryId(uuid(2))), 2);
        assert_eq!(snap.depth(CategoryId(uuid(3))), 3);
    }

    #[test]
    fn empty_snapshot_degrades_quietly() {
        let snap = CategorySnapshot::empty();
        assert!(snap.is_empty());
        assert!(snap.roots().is_empty());
        assert_eq!(snap.descendant_closure(CategoryId(uuid(9))).len(), 1);
    }
}
