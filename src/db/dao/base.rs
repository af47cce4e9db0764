use chrono::{SubsecRound, Utc};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait,
    FromQueryResult, IntoActiveModel, PrimaryKeyTrait, QueryOrder, Select,
    entity::prelude::DateTimeWithTimeZone,
};
use uuid::Uuid;

use super::base_traits::{HasCreatedAtColumn, HasIdActiveModel, TimestampedActiveModel};
use super::error::{DaoLayerError, DaoResult};

/// Store timestamps are kept at microsecond precision so every backend
/// returns exactly what was written.
pub fn store_now() -> DateTimeWithTimeZone {
    Utc::now().trunc_subsecs(6).fixed_offset()
}

#[async_trait::async_trait]
pub trait DaoBase: Clone + Send + Sync + Sized
where
    <Self::Entity as EntityTrait>::Model:
        FromQueryResult + IntoActiveModel<<Self::Entity as EntityTrait>::ActiveModel> + Send + Sync,
    <Self::Entity as EntityTrait>::ActiveModel:
        ActiveModelTrait<Entity = Self::Entity>
            + ActiveModelBehavior
            + HasIdActiveModel
            + TimestampedActiveModel
            + Send,
    <<Self::Entity as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType:
        From<Uuid> + Send + Sync,
    Self::Entity: HasCreatedAtColumn,
{
    type Entity: EntityTrait + Send + Sync;

    fn from_db(db: DatabaseConnection) -> Self;

    fn new(db: &DatabaseConnection) -> Self {
        Self::from_db(db.clone())
    }

    fn db(&self) -> &DatabaseConnection;

    /// Inserts a new row with a fresh v4 id and both timestamps set to now.
    async fn create(
        &self,
        data: <Self::Entity as EntityTrait>::ActiveModel,
    ) -> DaoResult<<Self::Entity as EntityTrait>::Model> {
        let now = store_now();
        let mut active = data;
        active.set_id(Uuid::new_v4());
        active.set_created_at(now);
        active.set_updated_at(now);
        active.insert(self.db()).await.map_err(DaoLayerError::Db)
    }

    async fn find_by_id(&self, id: Uuid) -> DaoResult<<Self::Entity as EntityTrait>::Model> {
        let model = Self::Entity::find_by_id(id)
            .one(self.db())
            .await
            .map_err(DaoLayerError::Db)?;

        model.ok_or_else(|| DaoLayerError::not_found::<Self::Entity>(id))
    }

    /// Every row, oldest first. Rows sharing a timestamp are ordered by id.
    fn list_query() -> Select<Self::Entity> {
        Self::Entity::find()
            .order_by_asc(Self::Entity::created_at_column())
            .order_by_asc(Self::Entity::id_column())
    }

    async fn find_all(&self) -> DaoResult<Vec<<Self::Entity as EntityTrait>::Model>> {
        Self::list_query()
            .all(self.db())
            .await
            .map_err(DaoLayerError::Db)
    }

    /// Read-merge-write: `apply` only touches the columns it sets, every
    /// other column keeps its stored value.
    async fn update<F>(&self, id: Uuid, apply: F) -> DaoResult<<Self::Entity as EntityTrait>::Model>
    where
        F: for<'a> FnOnce(&'a mut <Self::Entity as EntityTrait>::ActiveModel) + Send,
    {
        let model = self.find_by_id(id).await?;

        let mut active = model.into_active_model();
        apply(&mut active);
        active.set_updated_at(store_now());

        // the row can vanish between the read and the write
        active.update(self.db()).await.map_err(|err| match err {
            DbErr::RecordNotUpdated => DaoLayerError::not_found::<Self::Entity>(id),
            other => DaoLayerError::Db(other),
        })
    }

    /// Removes the row and hands back what was stored.
    async fn delete(&self, id: Uuid) -> DaoResult<<Self::Entity as EntityTrait>::Model> {
        let model = self.find_by_id(id).await?;

        let result = Self::Entity::delete_by_id(id)
            .exec(self.db())
            .await
            .map_err(DaoLayerError::Db)?;

        if result.rows_affected == 0 {
            return Err(DaoLayerError::not_found::<Self::Entity>(id));
        }

        Ok(model)
    }
}
