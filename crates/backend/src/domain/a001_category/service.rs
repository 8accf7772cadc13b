use super::repository;
use crate::catalog;
use crate::domain::a002_gear;
use crate::shared::cache;
use crate::shared::error::DomainError;
use contracts::domain::a001_category::aggregate::{Category, CategoryDto, MAX_DEPTH};
use uuid::Uuid;

/// Create a new category. The parent must exist and the result may not
/// exceed the three-level hierarchy.
pub async fn create(dto: CategoryDto) -> Result<Uuid, DomainError> {
    let aggregate = Category::new_for_insert(
        dto.slug.clone(),
        dto.name.clone(),
        dto.description.clone(),
        dto.parent_id,
        dto.icon.clone(),
        dto.order,
    );

    aggregate.validate().map_err(DomainError::Validation)?;
    check_depth(&aggregate).await?;

    let mut aggregate = aggregate;
    aggregate.before_write();
    let id = repository::insert(&aggregate).await?;

    invalidate();
    Ok(id)
}

pub async fn update(dto: CategoryDto) -> Result<(), DomainError> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| DomainError::Validation("Geçersiz kategori id".into()))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or(DomainError::NotFound)?;

    aggregate.update(&dto);
    aggregate.validate().map_err(DomainError::Validation)?;
    check_depth(&aggregate).await?;
    check_no_cycle(&aggregate).await?;

    aggregate.before_write();
    repository::update(&aggregate).await?;

    invalidate();
    Ok(())
}

/// Delete a category. Rejected while children or referencing gear exist,
/// so the tree and the gear rows never point at a missing record.
pub async fn delete(id: Uuid) -> Result<(), DomainError> {
    let category = repository::get_by_id(id)
        .await?
        .ok_or(DomainError::NotFound)?;

    if repository::count_children(id).await? > 0 {
        return Err(DomainError::Conflict(
            "Alt kategorileri olan kategori silinemez".into(),
        ));
    }
    let referencing =
        a002_gear::repository::count_referencing(&id.to_string(), &category.slug).await?;
    if referencing > 0 {
        return Err(DomainError::Conflict(
            "Bu kategoriye bağlı malzemeler var, önce onları taşıyın".into(),
        ));
    }

    if !repository::delete(id).await? {
        return Err(DomainError::NotFound);
    }

    invalidate();
    Ok(())
}

pub async fn get_by_id(id: Uuid) -> Result<Option<Category>, DomainError> {
    Ok(repository::get_by_id(id).await?)
}

pub async fn list_all() -> Result<Vec<Category>, DomainError> {
    Ok(repository::list_all().await?)
}

async fn check_depth(aggregate: &Category) -> Result<(), DomainError> {
    let Some(parent_id) = aggregate.parent_id else {
        return Ok(());
    };
    let state = catalog::current().await?;
    if state.snapshot.by_id(parent_id).is_none() {
        return Err(DomainError::Validation("Üst kategori bulunamadı".into()));
    }
    if state.snapshot.depth(parent_id) + 1 > MAX_DEPTH {
        return Err(DomainError::Validation(
            "Kategori hiyerarşisi en fazla üç seviye olabilir".into(),
        ));
    }
    Ok(())
}

/// A category may not be moved under its own subtree
async fn check_no_cycle(aggregate: &Category) -> Result<(), DomainError> {
    let Some(parent_id) = aggregate.parent_id else {
        return Ok(());
    };
    let state = catalog::current().await?;
    if state.snapshot.descendant_closure(aggregate.id).contains(&parent_id) {
        return Err(DomainError::Validation(
            "Kategori kendi alt kategorisine taşınamaz".into(),
        ));
    }
    Ok(())
}

fn invalidate() {
    catalog::bump_version();
    cache::clear_all();
}
