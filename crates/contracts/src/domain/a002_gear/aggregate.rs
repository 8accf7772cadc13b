use crate::domain::common::{AggregateId, AggregateRoot, EntityMetadata};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GearId(pub Uuid);

impl GearId {
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

impl AggregateId for GearId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(GearId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Status
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GearStatus {
    ForSale,
    Waiting,
    Arrived,
    Shipped,
    Sold,
}

impl GearStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GearStatus::ForSale => "for-sale",
            GearStatus::Waiting => "waiting",
            GearStatus::Arrived => "arrived",
            GearStatus::Shipped => "shipped",
            GearStatus::Sold => "sold",
        }
    }

    /// Statuses shown to buyers as "sipariş edilebilir" (orderable)
    pub fn is_orderable(&self) -> bool {
        matches!(
            self,
            GearStatus::Waiting | GearStatus::Arrived | GearStatus::Shipped
        )
    }
}

/// Accepts a JSON number, a numeric string, or null; anything malformed
/// coerces to 0 instead of failing the whole record.
pub(crate) fn lenient_f64<'de, D>(de: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(de)?;
    Ok(coerce_f64(&value).unwrap_or(0.0))
}

fn lenient_opt_f64<'de, D>(de: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(de)?;
    Ok(coerce_f64(&value))
}

fn coerce_f64(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gear {
    pub id: GearId,

    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(rename = "pricePerDay", deserialize_with = "lenient_f64", default)]
    pub price_per_day: f64,

    #[serde(deserialize_with = "lenient_opt_f64", default)]
    pub deposit: Option<f64>,

    #[serde(default = "default_true")]
    pub available: bool,

    /// Absent on legacy rows; effective status falls back to `available`
    #[serde(default)]
    pub status: Option<GearStatus>,

    #[serde(default)]
    pub images: Vec<String>,

    #[serde(default)]
    pub brand: Option<String>,

    #[serde(default)]
    pub color: Option<String>,

    #[serde(default)]
    pub specifications: BTreeMap<String, String>,

    /// Raw category reference: either a client category id/slug or a
    /// backend-issued UUID. The two id spaces are not normalized.
    #[serde(rename = "categoryId", alias = "category_id", default)]
    pub category_ref: Option<String>,

    /// Category slug carried by some rows next to the raw reference
    #[serde(rename = "category", alias = "category_slug", default)]
    pub category_slug: Option<String>,

    #[serde(deserialize_with = "lenient_opt_f64", default)]
    pub rating: Option<f64>,

    pub metadata: EntityMetadata,
}

fn default_true() -> bool {
    true
}

impl Gear {
    pub fn new_for_insert(name: String) -> Self {
        Self {
            id: GearId::new_v4(),
            name,
            description: String::new(),
            price_per_day: 0.0,
            deposit: None,
            available: true,
            status: None,
            images: Vec::new(),
            brand: None,
            color: None,
            specifications: BTreeMap::new(),
            category_ref: None,
            category_slug: None,
            rating: None,
            metadata: EntityMetadata::new(),
        }
    }

    /// Effective status: the explicit field when present, otherwise derived
    /// from `available` for rows written before the status column existed.
    pub fn effective_status(&self) -> GearStatus {
        self.status.unwrap_or(if self.available {
            GearStatus::ForSale
        } else {
            GearStatus::Sold
        })
    }

    pub fn to_string_id(&self) -> String {
        self.id.as_string()
    }

    pub fn update(&mut self, dto: &GearDto) {
        self.name = dto.name.clone();
        self.description = dto.description.clone().unwrap_or_default();
        self.price_per_day = dto.price_per_day;
        self.deposit = dto.deposit;
        self.available = dto.available;
        self.status = dto.status;
        self.images = dto.images.clone();
        self.brand = dto.brand.clone();
        self.color = dto.color.clone();
        self.specifications = dto.specifications.clone();
        self.category_ref = dto.category_ref.clone();
        self.category_slug = dto.category_slug.clone();
        self.rating = dto.rating;
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Ürün adı boş olamaz".into());
        }
        if self.price_per_day < 0.0 {
            return Err("Günlük fiyat negatif olamaz".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.metadata.touch();
    }
}

impl AggregateRoot for Gear {
    type Id = GearId;

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
        "a002"
    }

    fn collection_name() -> &'static str {
        "gear"
    }

    fn element_name() -> &'static str {
        "Malzeme"
    }

    fn list_name() -> &'static str {
        "Malzemeler"
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GearDto {
    pub id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    #[serde(
        rename = "pricePerDay",
        alias = "price_per_day",
        deserialize_with = "lenient_f64",
        default
    )]
    pub price_per_day: f64,
    #[serde(deserialize_with = "lenient_opt_f64", default)]
    pub deposit: Option<f64>,
    #[serde(default = "default_true")]
    pub available: bool,
    #[serde(default)]
    pub status: Option<GearStatus>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub specifications: BTreeMap<String, String>,
    #[serde(rename = "categoryId", alias = "category_id", default)]
    pub category_ref: Option<String>,
    #[serde(rename = "category", alias = "category_slug", default)]
    pub category_slug: Option<String>,
    #[serde(deserialize_with = "lenient_opt_f64", default)]
    pub rating: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_status_falls_back_to_available() {
        let mut gear = Gear::new_for_insert("3 Kişilik Çadır".into());
        assert_eq!(gear.effective_status(), GearStatus::ForSale);
        gear.available = false;
        assert_eq!(gear.effective_status(), GearStatus::Sold);
        gear.status = Some(GearStatus::Waiting);
        assert_eq!(gear.effective_status(), GearStatus::Waiting);
    }

    #[test]
    fn status_serializes_kebab_case() {
        let json = serde_json::to_string(&GearStatus::ForSale).unwrap();
        assert_eq!(json, "\"for-sale\"");
        let parsed: GearStatus = serde_json::from_str("\"sold\"").unwrap();
        assert_eq!(parsed, GearStatus::Sold);
    }

    #[test]
    fn price_accepts_string_and_number() {
        let dto: GearDto =
            serde_json::from_str(r#"{"name":"Çadır","pricePerDay":"120.5"}"#).unwrap();
        assert_eq!(dto.price_per_day, 120.5);
        let dto: GearDto = serde_json::from_str(r#"{"name":"Çadır","pricePerDay":80}"#).unwrap();
        assert_eq!(dto.price_per_day, 80.0);
    }

    #[test]
    fn malformed_price_coerces_to_zero() {
        let dto: GearDto =
            serde_json::from_str(r#"{"name":"Çadır","pricePerDay":"abc"}"#).unwrap();
        assert_eq!(dto.price_per_day, 0.0);
        let dto: GearDto = serde_json::from_str(r#"{"name":"Çadır"}"#).unwrap();
        assert_eq!(dto.price_per_day, 0.0);
    }

    #[test]
    fn category_ref_accepts_snake_case_alias() {
        let dto: GearDto =
            serde_json::from_str(r#"{"name":"Çadır","category_id":"uuid-1"}"#).unwrap();
        assert_eq!(dto.category_ref.as_deref(), Some("uuid-1"));
        let dto: GearDto =
            serde_json::from_str(r#"{"name":"Çadır","categoryId":"dome-tents"}"#).unwrap();
        assert_eq!(dto.category_ref.as_deref(), Some("dome-tents"));
    }
}
