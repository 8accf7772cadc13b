use chrono::Utc;
use contracts::domain::a005_campsite::aggregate::{Campsite, CampsiteId, Location};
use contracts::domain::common::EntityMetadata;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;

use sea_orm::Set;

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a005_campsite")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub description: String,
    pub price_per_night: f64,
    /// JSON object {"city", "region"}
    pub location: String,
    /// JSON array of amenity labels
    pub amenities: String,
    /// JSON array of campsite rules
    pub rules: String,
    /// JSON array of image URLs
    pub images: String,
    pub available: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Campsite {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());
        let location: Location = serde_json::from_str(&m.location).unwrap_or_default();
        let amenities: Vec<String> = serde_json::from_str(&m.amenities).unwrap_or_default();
        let rules: Vec<String> = serde_json::from_str(&m.rules).unwrap_or_default();
        let images: Vec<String> = serde_json::from_str(&m.images).unwrap_or_default();

        Campsite {
            id: CampsiteId(uuid),
            name: m.name,
            description: m.description,
            price_per_night: m.price_per_night,
            location,
            amenities,
            rules,
            images,
            available: m.available,
            metadata,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(aggregate: &Campsite, keep_created_at: bool) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.id.value().to_string()),
        name: Set(aggregate.name.clone()),
        description: Set(aggregate.description.clone()),
        price_per_night: Set(aggregate.price_per_night),
        location: Set(serde_json::to_string(&aggregate.location).unwrap_or_else(|_| "{}".into())),
        amenities: Set(serde_json::to_string(&aggregate.amenities).unwrap_or_else(|_| "[]".into())),
        rules: Set(serde_json::to_string(&aggregate.rules).unwrap_or_else(|_| "[]".into())),
        images: Set(serde_json::to_string(&aggregate.images).unwrap_or_else(|_| "[]".into())),
        available: Set(aggregate.available),
        created_at: if keep_created_at {
            sea_orm::ActiveValue::NotSet
        } else {
            Set(Some(aggregate.metadata.created_at))
        },
        updated_at: Set(Some(aggregate.metadata.updated_at)),
        version: Set(aggregate.metadata.version),
    }
}

/// All campsites, newest first
pub async fn list_all() -> anyhow::Result<Vec<Campsite>> {
    let mut items: Vec<Campsite> = Entity::find()
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    items.sort_by(|a, b| b.metadata.created_at.cmp(&a.metadata.created_at));
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Campsite>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn insert(aggregate: &Campsite) -> anyhow::Result<Uuid> {
    to_active(aggregate, false).insert(conn()).await?;
    Ok(aggregate.id.value())
}

pub async fn update(aggregate: &Campsite) -> anyhow::Result<()> {
    to_active(aggregate, true).update(conn()).await?;
    Ok(())
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    let result = Entity::delete_by_id(id.to_string()).exec(conn()).await?;
    Ok(result.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_round_trips_json_columns() {
        let model = Model {
            id: Uuid::nil().to_string(),
            name: "Olympos Orman Kampı".into(),
            description: "Deniz kenarı".into(),
            price_per_night: 450.0,
            location: r#"{"city":"Antalya","region":"Kumluca"}"#.into(),
            amenities: r#"["duş","elektrik"]"#.into(),
            rules: r#"["Ateş yakmak yasak"]"#.into(),
            images: "[]".into(),
            available: true,
            created_at: None,
            updated_at: None,
            version: 1,
        };
        let site: Campsite = model.into();
        assert_eq!(site.location.city, "Antalya");
        assert_eq!(site.amenities, vec!["duş", "elektrik"]);
        assert_eq!(site.rules.len(), 1);
        assert!(site.images.is_empty());
    }

    #[test]
    fn malformed_json_columns_degrade_to_empty() {
        let model = Model {
            id: "not-a-uuid".into(),
            name: "Kazdağı Kamp".into(),
            description: String::new(),
            price_per_night: 0.0,
            location: "oops".into(),
            amenities: "oops".into(),
            rules: String::new(),
            images: String::new(),
            available: false,
            created_at: None,
            updated_at: None,
            version: 1,
        };
        let site: Campsite = model.into();
        assert_eq!(site.location, Location::default());
        assert!(site.amenities.is_empty());
        assert!(!site.available);
    }
}
