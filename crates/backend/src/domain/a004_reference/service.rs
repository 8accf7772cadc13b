use super::repository;
use crate::shared::cache;
use crate::shared::error::DomainError;
use contracts::domain::a004_reference::aggregate::{Reference, ReferenceDto};
use uuid::Uuid;

pub async fn create(dto: ReferenceDto) -> Result<Uuid, DomainError> {
    let mut aggregate = Reference::new_for_insert(dto.title.clone(), dto.image.clone());
    aggregate.update(&dto);

    aggregate.validate().map_err(DomainError::Validation)?;
    aggregate.before_write();

    let id = repository::insert(&aggregate).await?;
    cache::clear_all();
    Ok(id)
}

pub async fn update(dto: ReferenceDto) -> Result<(), DomainError> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| DomainError::Validation("Geçersiz referans id".into()))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or(DomainError::NotFound)?;

    aggregate.update(&dto);
    aggregate.validate().map_err(DomainError::Validation)?;
    aggregate.before_write();

    repository::update(&aggregate).await?;
    cache::clear_all();
    Ok(())
}

pub async fn delete(id: Uuid) -> Result<(), DomainError> {
    if !repository::delete(id).await? {
        return Err(DomainError::NotFound);
    }
    cache::clear_all();
    Ok(())
}

pub async fn get_by_id(id: Uuid) -> Result<Option<Reference>, DomainError> {
    Ok(repository::get_by_id(id).await?)
}

pub async fn list_all() -> Result<Vec<Reference>, DomainError> {
    Ok(repository::list_all().await?)
}
