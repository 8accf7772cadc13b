use super::repository;
use crate::shared::cache;
use crate::shared::error::DomainError;
use contracts::domain::a003_brand::aggregate::{Brand, BrandDto};
use uuid::Uuid;

pub async fn create(dto: BrandDto) -> Result<Uuid, DomainError> {
    let aggregate = Brand::new_for_insert(dto.name.clone(), dto.logo.clone());
    aggregate.validate().map_err(DomainError::Validation)?;

    if repository::get_by_name(aggregate.name.trim()).await?.is_some() {
        return Err(DomainError::Conflict("Bu marka zaten kayıtlı".into()));
    }

    let mut aggregate = aggregate;
    aggregate.before_write();
    let id = repository::insert(&aggregate).await?;
    cache::clear_all();
    Ok(id)
}

pub async fn update(dto: BrandDto) -> Result<(), DomainError> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| DomainError::Validation("Geçersiz marka id".into()))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or(DomainError::NotFound)?;

    aggregate.update(&dto);
    aggregate.validate().map_err(DomainError::Validation)?;

    // Name stays unique across brands
    if let Some(existing) = repository::get_by_name(aggregate.name.trim()).await? {
        if existing.id != aggregate.id {
            return Err(DomainError::Conflict("Bu marka zaten kayıtlı".into()));
        }
    }

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

pub async fn get_by_id(id: Uuid) -> Result<Option<Brand>, DomainError> {
    Ok(repository::get_by_id(id).await?)
}

pub async fn list_all() -> Result<Vec<Brand>, DomainError> {
    Ok(repository::list_all().await?)
}
