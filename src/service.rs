use std::sync::Arc;

use sea_orm::Order;

use crate::errors::ApiError;
use crate::filtering::{FilterSet, PageWindow, build_predicate};
use crate::models::{Property, PropertyCreate, PropertyUpdate};
use crate::repository::PropertyRepository;
use crate::validation::Validatable;

pub const RESOURCE_NAME: &str = "Property";

/// Property use cases on top of a [`PropertyRepository`].
///
/// Constructed once at startup and cloned into each request; clones share the
/// same repository.
#[derive(Clone)]
pub struct PropertyService {
    repository: Arc<dyn PropertyRepository>,
}

impl PropertyService {
    #[must_use]
    pub fn new(repository: Arc<dyn PropertyRepository>) -> Self {
        Self { repository }
    }

    /// Matching records in ascending id order, sliced by `window`. No match is
    /// an empty list, not an error.
    ///
    /// # Errors
    ///
    /// Propagates persistence faults.
    pub async fn get_all(
        &self,
        window: PageWindow,
        filters: &FilterSet,
    ) -> Result<Vec<Property>, ApiError> {
        let predicate = build_predicate(filters);
        let properties = self
            .repository
            .find(&predicate, Order::Asc, window)
            .await?;
        Ok(properties)
    }

    /// # Errors
    ///
    /// Propagates persistence faults; a missing id is `Ok(None)`.
    pub async fn get_by_id(&self, id: i32) -> Result<Option<Property>, ApiError> {
        Ok(self.repository.find_one(id).await?)
    }

    /// Validate and store a new record, returning it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `ValidationFailed` for an invalid payload and propagates
    /// persistence faults.
    pub async fn create(&self, property: PropertyCreate) -> Result<Property, ApiError> {
        property.validate()?;
        let created = self.repository.save(property).await?;
        tracing::debug!(id = created.id, "Created property");
        Ok(created)
    }

    /// Overwrite the supplied fields of record `id`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no row was affected, `ValidationFailed` for an
    /// invalid payload, and propagates persistence faults.
    pub async fn update(&self, id: i32, changes: PropertyUpdate) -> Result<i32, ApiError> {
        changes.validate()?;
        let affected = self.repository.update(id, changes).await?;
        if affected == 0 {
            tracing::debug!(id, "Update matched no property");
            return Err(ApiError::not_found(RESOURCE_NAME));
        }
        tracing::debug!(id, "Updated property");
        Ok(id)
    }

    /// Remove record `id`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no row was affected and propagates persistence
    /// faults.
    pub async fn delete(&self, id: i32) -> Result<i32, ApiError> {
        let affected = self.repository.delete(id).await?;
        if affected == 0 {
            tracing::debug!(id, "Delete matched no property");
            return Err(ApiError::not_found(RESOURCE_NAME));
        }
        tracing::debug!(id, "Deleted property");
        Ok(id)
    }
}
