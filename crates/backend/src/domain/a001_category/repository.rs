use chrono::Utc;
use contracts::domain::a001_category::aggregate::{Category, CategoryId};
use contracts::domain::common::EntityMetadata;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;

use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_category")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<String>,
    pub icon: Option<String>,
    /// `order` is reserved in SQL, stored as sort_order
    pub sort_order: i32,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Category {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());
        let parent_id = m
            .parent_id
            .as_deref()
            .and_then(|s| Uuid::parse_str(s).ok())
            .map(CategoryId);

        Category {
            id: CategoryId(uuid),
            slug: m.slug,
            name: m.name,
            description: m.description,
            parent_id,
            icon: m.icon,
            order: m.sort_order,
            metadata,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn list_all() -> anyhow::Result<Vec<Category>> {
    let mut items: Vec<Category> = Entity::find()
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    items.sort_by_key(|c| c.order);
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Category>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn count_children(parent: Uuid) -> anyhow::Result<u64> {
    let count = Entity::find()
        .filter(Column::ParentId.eq(parent.to_string()))
        .count(conn())
        .await?;
    Ok(count)
}

pub async fn insert(aggregate: &Category) -> anyhow::Result<Uuid> {
    let uuid = aggregate.id.value();
    let active = ActiveModel {
        id: Set(uuid.to_string()),
        slug: Set(aggregate.slug.clone()),
        name: Set(aggregate.name.clone()),
        description: Set(aggregate.description.clone()),
        parent_id: Set(aggregate.parent_id.map(|p| p.value().to_string())),
        icon: Set(aggregate.icon.clone()),
        sort_order: Set(aggregate.order),
        created_at: Set(Some(aggregate.metadata.created_at)),
        updated_at: Set(Some(aggregate.metadata.updated_at)),
        version: Set(aggregate.metadata.version),
    };
    active.insert(conn()).await?;
    Ok(uuid)
}

pub async fn update(aggregate: &Category) -> anyhow::Result<()> {
    let active = ActiveModel {
        id: Set(aggregate.id.value().to_string()),
        slug: Set(aggregate.slug.clone()),
        name: Set(aggregate.name.clone()),
        description: Set(aggregate.description.clone()),
        parent_id: Set(aggregate.parent_id.map(|p| p.value().to_string())),
        icon: Set(aggregate.icon.clone()),
        sort_order: Set(aggregate.order),
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
