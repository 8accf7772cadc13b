use chrono::Utc;
use contracts::domain::a002_gear::aggregate::{Gear, GearId, GearStatus};
use contracts::domain::common::EntityMetadata;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use sea_orm::entity::prelude::*;

use sea_orm::{ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_gear")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub description: String,
    pub price_per_day: f64,
    pub deposit: Option<f64>,
    pub available: bool,
    pub status: Option<String>,
    /// JSON array of image URLs
    pub images: String,
    pub brand: Option<String>,
    pub color: Option<String>,
    /// JSON object of free-form key/value specs
    pub specifications: String,
    pub category_ref: Option<String>,
    pub category_slug: Option<String>,
    pub rating: Option<f64>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn parse_status(s: &str) -> Option<GearStatus> {
    match s {
        "for-sale" => Some(GearStatus::ForSale),
        "waiting" => Some(GearStatus::Waiting),
        "arrived" => Some(GearStatus::Arrived),
        "shipped" => Some(GearStatus::Shipped),
        "sold" => Some(GearStatus::Sold),
        _ => None,
    }
}

impl From<Model> for Gear {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());
        let images: Vec<String> = serde_json::from_str(&m.images).unwrap_or_default();
        let specifications: BTreeMap<String, String> =
            serde_json::from_str(&m.specifications).unwrap_or_default();

        Gear {
            id: GearId(uuid),
            name: m.name,
            description: m.description,
            price_per_day: m.price_per_day,
            deposit: m.deposit,
            available: m.available,
            status: m.status.as_deref().and_then(parse_status),
            images,
            brand: m.brand,
            color: m.color,
            specifications,
            category_ref: m.category_ref,
            category_slug: m.category_slug,
            rating: m.rating,
            metadata,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(aggregate: &Gear, keep_created_at: bool) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.id.value().to_string()),
        name: Set(aggregate.name.clone()),
        description: Set(aggregate.description.clone()),
        price_per_day: Set(aggregate.price_per_day),
        deposit: Set(aggregate.deposit),
        available: Set(aggregate.available),
        status: Set(aggregate.status.map(|s| s.as_str().to_string())),
        images: Set(serde_json::to_string(&aggregate.images).unwrap_or_else(|_| "[]".into())),
        brand: Set(aggregate.brand.clone()),
        color: Set(aggregate.color.clone()),
        specifications: Set(serde_json::to_string(&aggregate.specifications)
            .unwrap_or_else(|_| "{}".into())),
        category_ref: Set(aggregate.category_ref.clone()),
        category_slug: Set(aggregate.category_slug.clone()),
        rating: Set(aggregate.rating),
        created_at: if keep_created_at {
            sea_orm::ActiveValue::NotSet
        } else {
            Set(Some(aggregate.metadata.created_at))
        },
        updated_at: Set(Some(aggregate.metadata.updated_at)),
        version: Set(aggregate.metadata.version),
    }
}

/// All gear in insertion order (oldest first)
pub async fn list_all() -> anyhow::Result<Vec<Gear>> {
    let mut items: Vec<Gear> = Entity::find()
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    items.sort_by(|a, b| a.metadata.created_at.cmp(&b.metadata.created_at));
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Gear>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

/// Rows that point at a category by raw reference or by slug. Some older
/// rows carry the slug in the raw reference column, so the slug is checked
/// against both columns.
fn referencing_condition(category_id: &str, slug: &str) -> Condition {
    Condition::any()
        .add(Column::CategoryRef.eq(category_id))
        .add(Column::CategoryRef.eq(slug))
        .add(Column::CategorySlug.eq(slug))
}

pub async fn count_referencing(category_id: &str, slug: &str) -> anyhow::Result<u64> {
    let count = Entity::find()
        .filter(referencing_condition(category_id, slug))
        .count(conn())
        .await?;
    Ok(count)
}

pub async fn insert(aggregate: &Gear) -> anyhow::Result<Uuid> {
    to_active(aggregate, false).insert(conn()).await?;
    Ok(aggregate.id.value())
}

pub async fn update(aggregate: &Gear) -> anyhow::Result<()> {
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
    use sea_orm::{DbBackend, QueryTrait};

    #[test]
    fn referencing_condition_checks_slug_in_both_columns() {
        let id = "7f000001-0000-0000-0000-000000000001";
        let sql = Entity::find()
            .filter(referencing_condition(id, "tents"))
            .build(DbBackend::Sqlite)
            .to_string();
        assert!(sql.contains(&format!(r#""category_ref" = '{}'"#, id)));
        assert!(sql.contains(r#""category_ref" = 'tents'"#));
        assert!(sql.contains(r#""category_slug" = 'tents'"#));
    }
}
