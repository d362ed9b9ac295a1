//! SQLite adapter for InterventionRepository

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};

use super::{graph, map_db_err};
use crate::domain::entities::{CarId, Intervention, InterventionId, InterventionInput};
use crate::domain::ports::InterventionRepository;
use crate::entity::{cars, interventions};
use crate::error::DomainError;

/// SQLite implementation of InterventionRepository
pub struct SqliteInterventionRepository {
    db: DatabaseConnection,
}

impl SqliteInterventionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl InterventionRepository for SqliteInterventionRepository {
    async fn find_by_id(&self, id: &InterventionId) -> Result<Option<Intervention>, DomainError> {
        graph::load_intervention(&self.db, *id).await
    }

    async fn find_by_car(&self, car_id: &CarId) -> Result<Vec<Intervention>, DomainError> {
        if cars::Entity::find_by_id(car_id.0)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .is_none()
        {
            return Err(DomainError::NotFound(format!("Car {} not found", car_id)));
        }

        let rows = interventions::Entity::find()
            .filter(interventions::Column::CarId.eq(car_id.0))
            .order_by_asc(interventions::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        graph::assemble_interventions(&self.db, rows).await
    }

    async fn create(
        &self,
        car_id: &CarId,
        intervention: &InterventionInput,
    ) -> Result<Intervention, DomainError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        if cars::Entity::find_by_id(car_id.0)
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .is_none()
        {
            return Err(DomainError::NotFound(format!("Car {} not found", car_id)));
        }

        let id = graph::insert_intervention(&txn, *car_id, intervention).await?;
        let created = graph::load_intervention(&txn, id).await?.ok_or_else(|| {
            DomainError::Internal(format!("Intervention {} vanished after insert", id))
        })?;

        txn.commit().await.map_err(map_db_err)?;

        Ok(created)
    }

    async fn update(
        &self,
        id: &InterventionId,
        intervention: &InterventionInput,
    ) -> Result<Intervention, DomainError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        if interventions::Entity::find_by_id(id.0)
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .is_none()
        {
            return Err(DomainError::NotFound(format!(
                "Intervention {} not found",
                id
            )));
        }

        graph::update_intervention(&txn, *id, intervention).await?;
        let updated = graph::load_intervention(&txn, *id).await?.ok_or_else(|| {
            DomainError::Internal(format!("Intervention {} vanished after update", id))
        })?;

        txn.commit().await.map_err(map_db_err)?;

        Ok(updated)
    }

    async fn delete(&self, id: &InterventionId) -> Result<(), DomainError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        if interventions::Entity::find_by_id(id.0)
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .is_none()
        {
            return Err(DomainError::NotFound(format!(
                "Intervention {} not found",
                id
            )));
        }

        graph::delete_intervention_trees(&txn, &[id.0]).await?;

        txn.commit().await.map_err(map_db_err)?;

        Ok(())
    }
}
