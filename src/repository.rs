//! Persistence seam for the property service.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, Order, QueryFilter,
    QueryOrder, QuerySelect,
};

use crate::entity::property;
use crate::filtering::{PageWindow, Predicate, to_condition};
use crate::models::{Property, PropertyCreate, PropertyUpdate};

/// Storage operations the service relies on.
///
/// `update` and `delete` report the number of affected rows; interpreting a
/// zero count is the caller's job.
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    /// Records matching `predicate`, ordered by id in `order`, sliced by `window`.
    async fn find(
        &self,
        predicate: &Predicate,
        order: Order,
        window: PageWindow,
    ) -> Result<Vec<Property>, DbErr>;

    async fn find_one(&self, id: i32) -> Result<Option<Property>, DbErr>;

    /// Insert a new record; the store assigns the id.
    async fn save(&self, property: PropertyCreate) -> Result<Property, DbErr>;

    async fn update(&self, id: i32, changes: PropertyUpdate) -> Result<u64, DbErr>;

    async fn delete(&self, id: i32) -> Result<u64, DbErr>;
}

/// [`PropertyRepository`] over a Sea-ORM connection pool.
#[derive(Clone, Debug)]
pub struct SeaOrmPropertyRepository {
    db: DatabaseConnection,
}

impl SeaOrmPropertyRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PropertyRepository for SeaOrmPropertyRepository {
    async fn find(
        &self,
        predicate: &Predicate,
        order: Order,
        window: PageWindow,
    ) -> Result<Vec<Property>, DbErr> {
        let models = property::Entity::find()
            .filter(to_condition(predicate))
            .order_by(property::Column::Id, order)
            .offset(window.offset)
            .limit(window.limit)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Property::from).collect())
    }

    async fn find_one(&self, id: i32) -> Result<Option<Property>, DbErr> {
        let model = property::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Property::from))
    }

    async fn save(&self, property: PropertyCreate) -> Result<Property, DbErr> {
        let active_model: property::ActiveModel = property.into();
        let model = active_model.insert(&self.db).await?;
        Ok(Property::from(model))
    }

    async fn update(&self, id: i32, changes: PropertyUpdate) -> Result<u64, DbErr> {
        if changes.is_empty() {
            // nothing to write; report whether the row exists
            let exists = self.find_one(id).await?.is_some();
            return Ok(u64::from(exists));
        }
        let result = property::Entity::update_many()
            .set(changes.into_active_model())
            .filter(property::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }

    async fn delete(&self, id: i32) -> Result<u64, DbErr> {
        let result = property::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected)
    }
}
