use crate::domain::a002_gear::aggregate::lenient_f64;
use crate::domain::common::{AggregateId, AggregateRoot, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CampsiteId(pub Uuid);

impl CampsiteId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for CampsiteId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(CampsiteId)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub region: String,
}

/// Rentable camping pitch with nightly pricing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campsite {
    pub id: CampsiteId,

    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(rename = "pricePerNight", deserialize_with = "lenient_f64", default)]
    pub price_per_night: f64,

    #[serde(default)]
    pub location: Location,

    #[serde(default)]
    pub amenities: Vec<String>,

    #[serde(default)]
    pub rules: Vec<String>,

    #[serde(default)]
    pub images: Vec<String>,

    #[serde(default = "default_true")]
    pub available: bool,

    pub metadata: EntityMetadata,
}

fn default_true() -> bool {
    true
}

impl Campsite {
    pub fn new_for_insert(name: String) -> Self {
        Self {
            id: CampsiteId::new_v4(),
            name,
            description: String::new(),
            price_per_night: 0.0,
            location: Location::default(),
            amenities: Vec::new(),
            rules: Vec::new(),
            images: Vec::new(),
            available: true,
            metadata: EntityMetadata::new(),
        }
    }

    pub fn update(&mut self, dto: &CampsiteDto) {
        self.name = dto.name.clone();
        self.description = dto.description.clone();
        self.price_per_night = dto.price_per_night;
        self.location = dto.location.clone();
        self.amenities = dto.amenities.clone();
        self.rules = dto.rules.clone();
        self.images = dto.images.clone();
        self.available = dto.available;
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Kamp alanı adı boş olamaz".into());
        }
        if self.price_per_night < 0.0 {
            return Err("Gece fiyatı negatif olamaz".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.metadata.touch();
    }
}

impl AggregateRoot for Campsite {
    type Id = CampsiteId;

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
        "a005"
    }

    fn collection_name() -> &'static str {
        "campsite"
    }

    fn element_name() -> &'static str {
        "Kamp Alanı"
    }

    fn list_name() -> &'static str {
        "Kamp Alanları"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CampsiteDto {
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(
        rename = "pricePerNight",
        alias = "price_per_night",
        deserialize_with = "lenient_f64",
        default
    )]
    pub price_per_night: f64,
    #[serde(default)]
    pub location: Location,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub rules: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default = "default_true")]
    pub available: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_string_price_and_nested_location() {
        let json = r#"{
            "id": null,
            "name": "Olympos Orman Kampı",
            "description": "Deniz kenarı",
            "pricePerNight": "450.5",
            "location": {"city": "Antalya", "region": "Kumluca"},
            "amenities": ["duş", "elektrik"],
            "rules": ["Ateş yakmak yasak"]
        }"#;
        let dto: CampsiteDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.price_per_night, 450.5);
        assert_eq!(dto.location.city, "Antalya");
        assert_eq!(dto.amenities.len(), 2);
        assert!(dto.available);
    }

    #[test]
    fn validate_rejects_blank_name_and_negative_price() {
        let mut site = Campsite::new_for_insert("Olympos".into());
        assert!(site.validate().is_ok());

        site.price_per_night = -1.0;
        assert!(site.validate().is_err());

        site.price_per_night = 100.0;
        site.name = "  ".into();
        assert!(site.validate().is_err());
    }

    #[test]
    fn serializes_price_in_camel_case() {
        let site = Campsite::new_for_insert("Kazdağı Kamp".into());
        let value = serde_json::to_value(&site).unwrap();
        assert!(value.get("pricePerNight").is_some());
        assert!(value.get("price_per_night").is_none());
    }
}
