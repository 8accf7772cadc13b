use crate::domain::common::{AggregateId, AggregateRoot, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum hierarchy depth by product convention: root -> column -> leaf.
/// Validated when records are written, never enforced structurally.
pub const MAX_DEPTH: usize = 3;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryId(pub Uuid);

impl CategoryId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for CategoryId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(CategoryId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,

    /// URL-safe identifier, unique among siblings in practice
    pub slug: String,

    pub name: String,

    pub description: Option<String>,

    /// None for root categories ("Ana Başlık" entries)
    #[serde(rename = "parentId")]
    pub parent_id: Option<CategoryId>,

    /// Optional display glyph
    pub icon: Option<String>,

    /// Sibling ordering, defaults to 0
    #[serde(rename = "order", default)]
    pub order: i32,

    pub metadata: EntityMetadata,
}

impl Category {
    pub fn new_for_insert(
        slug: String,
        name: String,
        description: Option<String>,
        parent_id: Option<CategoryId>,
        icon: Option<String>,
        order: i32,
    ) -> Self {
        Self {
            id: CategoryId::new_v4(),
            slug,
            name,
            description,
            parent_id,
            icon,
            order,
            metadata: EntityMetadata::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn to_string_id(&self) -> String {
        self.id.as_string()
    }

    pub fn update(&mut self, dto: &CategoryDto) {
        self.slug = dto.slug.clone();
        self.name = dto.name.clone();
        self.description = dto.description.clone();
        self.parent_id = dto.parent_id;
        self.icon = dto.icon.clone();
        self.order = dto.order;
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Kategori adı boş olamaz".into());
        }
        let slug = self.slug.trim();
        if slug.is_empty() {
            return Err("Slug boş olamaz".into());
        }
        if !slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err("Slug yalnızca harf, rakam ve tire içerebilir".into());
        }
        if self.parent_id == Some(self.id) {
            return Err("Kategori kendi üst kategorisi olamaz".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.metadata.touch();
    }
}

impl AggregateRoot for Category {
    type Id = CategoryId;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.metadata
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "category"
    }

    fn element_name() -> &'static str {
        "Kategori"
    }

    fn list_name() -> &'static str {
        "Kategoriler"
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CategoryDto {
    pub id: Option<String>,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "parentId")]
    pub parent_id: Option<CategoryId>,
    pub icon: Option<String>,
    #[serde(rename = "order", default)]
    pub order: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_empty_slug() {
        let mut cat = Category::new_for_insert(
            "tents".into(),
            "Çadırlar".into(),
            None,
            None,
            None,
            0,
        );
        assert!(cat.validate().is_ok());
        cat.slug = "  ".into();
        assert!(cat.validate().is_err());
    }

    #[test]
    fn validate_rejects_self_parent() {
        let mut cat =
            Category::new_for_insert("tents".into(), "Çadırlar".into(), None, None, None, 0);
        cat.parent_id = Some(cat.id);
        assert!(cat.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_url_safe_slug() {
        let mut cat =
            Category::new_for_insert("tents".into(), "Çadırlar".into(), None, None, None, 0);
        cat.slug = "çadırlar".into();
        assert!(cat.validate().is_err());
    }
}
