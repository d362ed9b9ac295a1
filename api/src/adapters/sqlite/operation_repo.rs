//! SQLite adapter for OperationRepository

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};

use super::{graph, map_db_err};
use crate::domain::entities::{InterventionId, Operation, OperationId, OperationInput};
use crate::domain::ports::OperationRepository;
use crate::entity::{interventions, operations};
use crate::error::DomainError;

/// SQLite implementation of OperationRepository
pub struct SqliteOperationRepository {
    db: DatabaseConnection,
}

impl SqliteOperationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OperationRepository for SqliteOperationRepository {
    async fn find_by_id(&self, id: &OperationId) -> Result<Option<Operation>, DomainError> {
        graph::load_operation(&self.db, *id).await
    }

    async fn find_by_intervention(
        &self,
        intervention_id: &InterventionId,
    ) -> Result<Vec<Operation>, DomainError> {
        if interventions::Entity::find_by_id(intervention_id.0)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .is_none()
        {
            return Err(DomainError::NotFound(format!(
                "Intervention {} not found",
                intervention_id
            )));
        }

        let rows = operations::Entity::find()
            .filter(operations::Column::InterventionId.eq(intervention_id.0))
            .order_by_asc(operations::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        graph::assemble_operations(&self.db, rows).await
    }

    async fn create(
        &self,
        intervention_id: &InterventionId,
        operation: &OperationInput,
    ) -> Result<Operation, DomainError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        if interventions::Entity::find_by_id(intervention_id.0)
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .is_none()
        {
            return Err(DomainError::NotFound(format!(
                "Intervention {} not found",
                intervention_id
            )));
        }

        let id = graph::insert_operation(&txn, *intervention_id, operation).await?;
        let created = graph::load_operation(&txn, id).await?.ok_or_else(|| {
            DomainError::Internal(format!("Operation {} vanished after insert", id))
        })?;

        txn.commit().await.map_err(map_db_err)?;

        Ok(created)
    }

    async fn update(
        &self,
        id: &OperationId,
        operation: &OperationInput,
    ) -> Result<Operation, DomainError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        if operations::Entity::find_by_id(id.0)
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .is_none()
        {
            return Err(DomainError::NotFound(format!("Operation {} not found", id)));
        }

        graph::update_operation(&txn, *id, operation).await?;
        let updated = graph::load_operation(&txn, *id).await?.ok_or_else(|| {
            DomainError::Internal(format!("Operation {} vanished after update", id))
        })?;

        txn.commit().await.map_err(map_db_err)?;

        Ok(updated)
    }

    async fn delete(&self, id: &OperationId) -> Result<(), DomainError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let operation = operations::Entity::find_by_id(id.0)
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| DomainError::NotFound(format!("Operation {} not found", id)))?;

        // The reference to the intervention cascades: the whole intervention goes.
        graph::delete_intervention_trees(&txn, &[operation.intervention_id]).await?;

        txn.commit().await.map_err(map_db_err)?;

        Ok(())
    }
}
