//! SQLite adapter for CarRepository

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder, TransactionTrait};

use super::{graph, map_db_err};
use crate::domain::entities::{Car, CarId, CarInput, CarSort};
use crate::domain::ports::CarRepository;
use crate::entity::cars;
use crate::error::DomainError;

/// SQLite implementation of CarRepository
pub struct SqliteCarRepository {
    db: DatabaseConnection,
}

impl SqliteCarRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn sort_column(sort: CarSort) -> cars::Column {
    match sort {
        CarSort::Id => cars::Column::Id,
        CarSort::Registration => cars::Column::Registration,
        CarSort::SerialNumber => cars::Column::SerialNumber,
        CarSort::Owner => cars::Column::Owner,
        CarSort::Brand => cars::Column::Brand,
        CarSort::Model => cars::Column::Model,
        CarSort::ReleaseDate => cars::Column::ReleaseDate,
    }
}

#[async_trait]
impl CarRepository for SqliteCarRepository {
    async fn find_all(&self, sort: CarSort) -> Result<Vec<Car>, DomainError> {
        let rows = cars::Entity::find()
            .order_by_asc(sort_column(sort))
            .order_by_asc(cars::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        graph::assemble_cars(&self.db, rows).await
    }

    async fn find_by_id(&self, id: &CarId) -> Result<Option<Car>, DomainError> {
        graph::load_car(&self.db, *id).await
    }

    async fn create(&self, car: &CarInput) -> Result<Car, DomainError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let id = graph::insert_car(&txn, car).await?;
        let created = graph::load_car(&txn, id)
            .await?
            .ok_or_else(|| DomainError::Internal(format!("Car {} vanished after insert", id)))?;

        txn.commit().await.map_err(map_db_err)?;

        Ok(created)
    }

    async fn update(&self, id: &CarId, car: &CarInput) -> Result<Car, DomainError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        if cars::Entity::find_by_id(id.0)
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .is_none()
        {
            return Err(DomainError::NotFound(format!("Car {} not found", id)));
        }

        graph::update_car(&txn, *id, car).await?;
        let updated = graph::load_car(&txn, *id)
            .await?
            .ok_or_else(|| DomainError::Internal(format!("Car {} vanished after update", id)))?;

        txn.commit().await.map_err(map_db_err)?;

        Ok(updated)
    }

    async fn delete(&self, id: &CarId) -> Result<(), DomainError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        if cars::Entity::find_by_id(id.0)
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .is_none()
        {
            return Err(DomainError::NotFound(format!("Car {} not found", id)));
        }

        graph::delete_car_tree(&txn, *id).await?;

        txn.commit().await.map_err(map_db_err)?;

        Ok(())
    }
}
