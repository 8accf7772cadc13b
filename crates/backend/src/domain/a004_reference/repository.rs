use chrono::Utc;
use contracts::domain::a004_reference::aggregate::{Reference, ReferenceId};
use contracts::domain::common::EntityMetadata;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;

use sea_orm::Set;

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a004_reference")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    pub image: String,
    pub location: Option<String>,
    pub year: Option<String>,
    pub description: Option<String>,
    pub order_index: i32,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Reference {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        Reference {
            id: ReferenceId(uuid),
            title: m.title,
            image: m.image,
            location: m.location,
            year: m.year,
            description: m.description,
            order_index: m.order_index,
            metadata,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// Showcase entries in display order
pub async fn list_all() -> anyhow::Result<Vec<Reference>> {
    let mut items: Vec<Reference> = Entity::find()
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    items.sort_by_key(|r| r.order_index);
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Reference>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn insert(aggregate: &Reference) -> anyhow::Result<Uuid> {
    let uuid = aggregate.id.value();
    let active = ActiveModel {
        id: Set(uuid.to_string()),
        title: Set(aggregate.title.clone()),
        image: Set(aggregate.image.clone()),
        location: Set(aggregate.location.clone()),
        year: Set(aggregate.year.clone()),
        description: Set(aggregate.description.clone()),
        order_index: Set(aggregate.order_index),
        created_at: Set(Some(aggregate.metadata.created_at)),
        updated_at: Set(Some(aggregate.metadata.updated_at)),
        version: Set(aggregate.metadata.version),
    };
    active.insert(conn()).await?;
    Ok(uuid)
}

pub async fn update(aggregate: &Reference) -> anyhow::Result<()> {
    let active = ActiveModel {
        id: Set(aggregate.id.value().to_string()),
        title: Set(aggregate.title.clone()),
        image: Set(aggregate.image.clone()),
        location: Set(aggregate.location.clone()),
        year: Set(aggregate.year.clone()),
        description: Set(aggregate.description.clone()),
        order_index: Set(aggregate.order_index),
        updated_at: Set(Some(aggregate.metadata.updated_at)),
        version: Set(aggregate.metadata.version),
        created_at: sea_orm::ActiveValue::NotSet,
    };
    active.update(conn()).await?;
    Ok(())
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    let result = Entity::delete_by_id(id.to_string()).exec(conn()).await?;
    Ok(result.rows_affected > 0)
}
