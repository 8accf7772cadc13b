//! Catalog state: category snapshot plus backend-id map, rebuilt on demand.
//!
//! Mutating services bump a global version counter instead of patching the
//! derived structures; the next reader notices the mismatch and rebuilds
//! from the database. A time cap forces a periodic rebuild even without
//! local writes, so categories edited through the legacy store surface too.

pub mod backend_map;
pub mod collation;
pub mod filter;
pub mod store;

use anyhow::Result;
use backend_map::{BackendCategoryMap, BackendCategorySource};
use contracts::domain::a001_category::aggregate::Category;
use once_cell::sync::{Lazy, OnceCell};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use store::CategorySnapshot;
use tokio::sync::RwLock;

const MAX_STATE_AGE: Duration = Duration::from_secs(300);

static CATALOG_VERSION: AtomicU64 = AtomicU64::new(0);
static BACKEND_SOURCE: OnceCell<Box<dyn BackendCategorySource>> = OnceCell::new();
static STATE: Lazy<RwLock<Option<Arc<CatalogState>>>> = Lazy::new(|| RwLock::new(None));

pub struct CatalogState {
    pub version: u64,
    pub snapshot: CategorySnapshot,
    pub backend_map: BackendCategoryMap,
    built_at: Instant,
}

impl CatalogState {
    fn is_current(&self, version: u64) -> bool {
        self.version == version && self.built_at.elapsed() < MAX_STATE_AGE
    }
}

/// Install the backend category source once at startup. Later calls are
/// ignored, which keeps tests that set a fixture source deterministic.
pub fn set_backend_source(source: Box<dyn BackendCategorySource>) {
    let _ = BACKEND_SOURCE.set(source);
}

/// Invalidate the derived catalog state after a category or gear mutation
pub fn bump_version() {
    CATALOG_VERSION.fetch_add(1, Ordering::SeqCst);
}

pub async fn current() -> Result<Arc<CatalogState>> {
    let version = CATALOG_VERSION.load(Ordering::SeqCst);
    {
        let guard = STATE.read().await;
        if let Some(state) = guard.as_ref() {
            if state.is_current(version) {
                return Ok(state.clone());
            }
        }
    }
    rebuild(version).await
}

async fn rebuild(version: u64) -> Result<Arc<CatalogState>> {
    let mut guard = STATE.write().await;
    // Another request may have rebuilt while we waited on the lock
    if let Some(state) = guard.as_ref() {
        if state.is_current(version) {
            return Ok(state.clone());
        }
    }

    let snapshot =
        snapshot_or_empty(crate::domain::a001_category::repository::list_all().await);

    let records = match BACKEND_SOURCE.get() {
        Some(source) => match source.fetch().await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("Backend category fetch failed, mapping disabled: {}", e);
                Vec::new()
            }
        },
        None => Vec::new(),
    };
    let backend_map = BackendCategoryMap::build(&records, &snapshot);

    tracing::info!(
        "Catalog rebuilt: {} categories, {} backend mappings (v{})",
        snapshot.len(),
        backend_map.len(),
        version
    );

    let state = Arc::new(CatalogState {
        version,
        snapshot,
        backend_map,
        built_at: Instant::now(),
    });
    *guard = Some(state.clone());
    Ok(state)
}

/// A category read failure degrades to an empty catalog instead of turning
/// every page load into a server error.
fn snapshot_or_empty(categories: Result<Vec<Category>>) -> CategorySnapshot {
    match categories {
        Ok(categories) => CategorySnapshot::build(categories),
        Err(e) => {
            tracing::warn!("Category load failed, serving empty catalog: {}", e);
            CategorySnapshot::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::store::test_fixtures::{category, uuid};

    #[test]
    fn snapshot_is_built_from_loaded_categories() {
        let snapshot = snapshot_or_empty(Ok(vec![category(uuid(1), "tents", "Çadırlar", None, 0)]));
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.by_slug("tents").is_some());
    }

    #[test]
    fn load_failure_degrades_to_empty_snapshot() {
        let snapshot = snapshot_or_empty(Err(anyhow::anyhow!("database unavailable")));
        assert_eq!(snapshot.len(), 0);
        assert!(snapshot.roots().is_empty());
    }
}
