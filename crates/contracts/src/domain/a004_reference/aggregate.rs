use crate::domain::common::{AggregateId, AggregateRoot, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReferenceId(pub Uuid);

impl ReferenceId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for ReferenceId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ReferenceId)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// Customer showcase entry displayed on the landing page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reference {
    pub id: ReferenceId,
    pub title: String,
    pub image: String,
    pub location: Option<String>,
    pub year: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "orderIndex", default)]
    pub order_index: i32,
    pub metadata: EntityMetadata,
}

impl Reference {
    pub fn new_for_insert(title: String, image: String) -> Self {
        Self {
            id: ReferenceId::new_v4(),
            title,
            image,
            location: None,
            year: None,
            description: None,
            order_index: 0,
            metadata: EntityMetadata::new(),
        }
    }

    pub fn update(&mut self, dto: &ReferenceDto) {
        self.title = dto.title.clone();
        self.image = dto.image.clone();
        self.location = dto.location.clone();
        self.year = dto.year.clone();
        self.description = dto.description.clone();
        self.order_index = dto.order_index;
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Başlık boş olamaz".into());
        }
        if self.image.trim().is_empty() {
            return Err("Görsel boş olamaz".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.metadata.touch();
    }
}

impl AggregateRoot for Reference {
    type Id = ReferenceId;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.metadata
    }

    fn aggregate_index() -> &'static str {
        "a004"
    }

    fn collection_name() -> &'static str {
        "reference"
    }

    fn element_name() -> &'static str {
        "Referans"
    }

    fn list_name() -> &'static str {
        "Referanslar"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ReferenceDto {
    pub id: Option<String>,
    pub title: String,
    pub image: String,
    pub location: Option<String>,
    pub year: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "orderIndex", alias = "order_index", default)]
    pub order_index: i32,
}
