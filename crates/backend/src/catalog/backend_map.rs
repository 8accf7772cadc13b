//! Mapping from backend-issued UUID category ids to client category ids.
//!
//! Gear rows reference categories in two unrelated id spaces (see
//! `contracts::domain::common::IdSpace`). This module bridges them: backend
//! category records are fetched from the legacy store and matched against
//! the client tree by slug/name, with word-overlap and substring fallbacks
//! for records whose slugs drifted apart over time.

use super::store::CategorySnapshot;
use async_trait::async_trait;
use contracts::domain::a001_category::aggregate::{Category, CategoryId};
use contracts::domain::common::{CategoryResolution, IdSpace};
use serde::Deserialize;
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
pub struct BackendCategoryRecord {
    pub id: Uuid,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub name: String,
}

/// Flat lookup `backend UUID -> client category id`. Never patched in
/// place; category changes require a full rebuild.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BackendCategoryMap {
    map: HashMap<Uuid, CategoryId>,
}

fn norm(s: &str) -> String {
    s.trim().to_lowercase()
}

// Matching rules in precedence order; the first rule that produces any
// match wins and later rules are not tried for that record.
fn slug_equals(backend_slug: &str, cat: &Category) -> bool {
    !backend_slug.is_empty() && backend_slug == norm(&cat.slug)
}

fn name_equals(backend_name: &str, cat: &Category) -> bool {
    !backend_name.is_empty() && backend_name == norm(&cat.name)
}

fn words_overlap(backend_name: &str, cat: &Category) -> bool {
    let client_name = norm(&cat.name);
    backend_name.split_whitespace().any(|bw| {
        client_name
            .split_whitespace()
            .any(|fw| fw.contains(bw) || bw.contains(fw))
    })
}

fn slug_contains(backend_slug: &str, cat: &Category) -> bool {
    let client_slug = norm(&cat.slug);
    if backend_slug.is_empty() || client_slug.is_empty() {
        return false;
    }
    backend_slug.contains(&client_slug) || client_slug.contains(&backend_slug)
}

impl BackendCategoryMap {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn build(records: &[BackendCategoryRecord], snapshot: &CategorySnapshot) -> Self {
        let mut map = HashMap::new();

        for record in records {
            let backend_slug = norm(&record.slug);
            let backend_name = norm(&record.name);

            let rules: [&dyn Fn(&Category) -> bool; 4] = [
                &|cat| slug_equals(&backend_slug, cat),
                &|cat| name_equals(&backend_name, cat),
                &|cat| words_overlap(&backend_name, cat),
                &|cat| slug_contains(&backend_slug, cat),
            ];

            let matched = rules
                .iter()
                .find_map(|rule| snapshot.all().iter().find(|cat| rule(cat)));

            match matched {
                Some(cat) => {
                    map.insert(record.id, cat.id);
                }
                None => {
                    tracing::debug!(
                        "Backend category {} ({}) has no client counterpart",
                        record.id,
                        record.slug
                    );
                }
            }
        }

        Self { map }
    }

    pub fn get(&self, backend_id: Uuid) -> Option<CategoryId> {
        self.map.get(&backend_id).copied()
    }

    /// Resolve a raw category reference from a gear row. Non-UUID strings
    /// live in the client id space and are Unresolved here by definition.
    pub fn resolve(&self, raw: &str) -> CategoryResolution {
        match Uuid::parse_str(raw.trim()) {
            Ok(uuid) => match self.get(uuid) {
                Some(id) => CategoryResolution::Resolved(id),
                None => CategoryResolution::Unresolved,
            },
            Err(_) => CategoryResolution::Unresolved,
        }
    }

    /// Classify a raw gear reference into its id space and the client
    /// category id it names. A reference that is neither a known client id
    /// nor a mapped backend id classifies as `None`.
    pub fn classify(
        &self,
        raw: &str,
        snapshot: &CategorySnapshot,
    ) -> Option<(IdSpace, CategoryId)> {
        let uuid = Uuid::parse_str(raw.trim()).ok()?;
        let id = CategoryId(uuid);
        if snapshot.by_id(id).is_some() {
            return Some((IdSpace::Client, id));
        }
        self.get(uuid).map(|mapped| (IdSpace::Backend, mapped))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Source of backend category records; a seam so the production HTTP
/// fetch can be swapped for fixtures in tests.
#[async_trait]
pub trait BackendCategorySource: Send + Sync {
    async fn fetch(&self) -> anyhow::Result<Vec<BackendCategoryRecord>>;
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    success: bool,
    #[serde(default)]
    data: Vec<BackendCategoryRecord>,
}

pub struct HttpBackendCategorySource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackendCategorySource {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl BackendCategorySource for HttpBackendCategorySource {
    async fn fetch(&self) -> anyhow::Result<Vec<BackendCategoryRecord>> {
        let url = format!("{}/api/categories", self.base_url);
        let envelope: ApiEnvelope = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        if !envelope.success {
            anyhow::bail!("backend category endpoint answered success=false");
        }
        Ok(envelope.data)
    }
}

/// Used when no legacy endpoint is configured; every backend-UUID-tagged
/// gear row then groups as uncategorized.
pub struct NullBackendCategorySource;

#[async_trait]
impl BackendCategorySource for NullBackendCategorySource {
    async fn fetch(&self) -> anyhow::Result<Vec<BackendCategoryRecord>> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::store::test_fixtures::*;

    fn snapshot() -> CategorySnapshot {
        CategorySnapshot::build(vec![
            category(uuid(1), "tents", "Çadırlar", None, 0),
            category(uuid(2), "dome-tents", "Dome Çadırlar", Some(uuid(1)), 0),
            category(uuid(3), "sleeping-bags", "Uyku Tulumları", None, 1),
        ])
    }

    fn record(id: Uuid, slug: &str, name: &str) -> BackendCategoryRecord {
        BackendCategoryRecord {
            id,
            slug: slug.into(),
            name: name.into(),
        }
    }

    #[test]
    fn exact_slug_match_wins() {
        let snap = snapshot();
        let records = vec![record(uuid(100), "dome-tents", "Başka Bir İsim")];
        let map = BackendCategoryMap::build(&records, &snap);
        assert_eq!(map.get(uuid(100)), Some(CategoryId(uuid(2))));
    }

    #[test]
    fn name_match_when_slug_differs() {
        let snap = snapshot();
        let records = vec![record(uuid(100), "legacy-bags", "uyku tulumları")];
        let map = BackendCategoryMap::build(&records, &snap);
        assert_eq!(map.get(uuid(100)), Some(CategoryId(uuid(3))));
    }

    #[test]
    fn word_overlap_fallback() {
        // "tulum" is a substring of the client word "tulumları"
        let snap = snapshot();
        let records = vec![record(uuid(100), "legacy", "tulum modelleri")];
        let map = BackendCategoryMap::build(&records, &snap);
        assert_eq!(map.get(uuid(100)), Some(CategoryId(uuid(3))));
    }

    #[test]
    fn slug_substring_fallback() {
        let snap = snapshot();
        let records = vec![record(uuid(100), "xx-sleeping-bags-yy", "zzzz")];
        let map = BackendCategoryMap::build(&records, &snap);
        assert_eq!(map.get(uuid(100)), Some(CategoryId(uuid(3))));
    }

    #[test]
    fn unmatched_record_stays_unmapped() {
        let snap = snapshot();
        let records = vec![record(uuid(100), "kayak", "Kayak Takımı")];
        let map = BackendCategoryMap::build(&records, &snap);
        assert!(map.is_empty());
        assert_eq!(map.resolve(&uuid(100).to_string()), CategoryResolution::Unresolved);
    }

    #[test]
    fn build_is_idempotent() {
        let snap = snapshot();
        let records = vec![
            record(uuid(100), "dome-tents", "Dome Çadırlar"),
            record(uuid(101), "legacy-bags", "uyku tulumları"),
        ];
        let first = BackendCategoryMap::build(&records, &snap);
        let second = BackendCategoryMap::build(&records, &snap);
        assert_eq!(first, second);
    }

    #[test]
    fn resolve_rejects_non_uuid() {
        let map = BackendCategoryMap::empty();
        assert_eq!(map.resolve("dome-tents"), CategoryResolution::Unresolved);
    }

    #[test]
    fn resolve_returns_client_id() {
        let snap = snapshot();
        let records = vec![record(uuid(100), "dome-tents", "")];
        let map = BackendCategoryMap::build(&records, &snap);
        assert_eq!(
            map.resolve(&uuid(100).to_string()),
            CategoryResolution::Resolved(CategoryId(uuid(2)))
        );
    }

    #[test]
    fn classify_tags_each_id_space() {
        let snap = snapshot();
        let records = vec![record(uuid(100), "dome-tents", "")];
        let map = BackendCategoryMap::build(&records, &snap);

        assert_eq!(
            map.classify(&uuid(2).to_string(), &snap),
            Some((IdSpace::Client, CategoryId(uuid(2))))
        );
        assert_eq!(
            map.classify(&uuid(100).to_string(), &snap),
            Some((IdSpace::Backend, CategoryId(uuid(2))))
        );
        assert_eq!(map.classify(&uuid(999).to_string(), &snap), None);
        assert_eq!(map.classify("dome-tents", &snap), None);
    }
}
