use crate::domain::common::{AggregateId, AggregateRoot, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BrandId(pub Uuid);

impl BrandId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for BrandId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(BrandId)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// Gear manufacturer. Names are unique; creation with an existing name is
/// rejected with a conflict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brand {
    pub id: BrandId,
    pub name: String,
    pub logo: Option<String>,
    pub metadata: EntityMetadata,
}

impl Brand {
    pub fn new_for_insert(name: String, logo: Option<String>) -> Self {
        Self {
            id: BrandId::new_v4(),
            name,
            logo,
            metadata: EntityMetadata::new(),
        }
    }

    pub fn update(&mut self, dto: &BrandDto) {
        self.name = dto.name.clone();
        self.logo = dto.logo.clone();
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Marka adı boş olamaz".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.metadata.touch();
    }
}

impl AggregateRoot for Brand {
    type Id = BrandId;

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
        "a003"
    }

    fn collection_name() -> &'static str {
        "brand"
    }

    fn element_name() -> &'static str {
        "Marka"
    }

    fn list_name() -> &'static str {
        "Markalar"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BrandDto {
    pub id: Option<String>,
    pub name: String,
    pub logo: Option<String>,
}
