use crate::domain::a001_category::aggregate::CategoryId;
use serde::{Deserialize, Serialize};

/// The two identifier spaces a gear row may reference a category in.
///
/// Client ids are issued by the category management service; backend ids are
/// UUIDs issued by the legacy relational store. The two spaces are not
/// normalized, which is why the catalog carries an explicit mapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdSpace {
    Client,
    Backend,
}

/// Outcome of resolving a raw category reference into the client id space.
///
/// An explicit variant instead of `Option` so call sites cannot conflate
/// "this item has no category" with "this item's category is unmapped".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryResolution {
    Resolved(CategoryId),
    Unresolved,
}

impl CategoryResolution {
    pub fn resolved(&self) -> Option<CategoryId> {
        match self {
            CategoryResolution::Resolved(id) => Some(*id),
            CategoryResolution::Unresolved => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, CategoryResolution::Resolved(_))
    }
}
