//! SQLite adapter for OperationLineRepository

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};

use super::{graph, map_db_err};
use crate::domain::entities::{OperationId, OperationLine, OperationLineId, OperationLineInput};
use crate::domain::ports::OperationLineRepository;
use crate::entity::{operation_lines, operations};
use crate::error::DomainError;

/// SQLite implementation of OperationLineRepository
pub struct SqliteOperationLineRepository {
    db: DatabaseConnection,
}

impl SqliteOperationLineRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn require_operation(&self, id: &OperationId) -> Result<(), DomainError> {
        operations::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .map(|_| ())
            .ok_or_else(|| DomainError::NotFound(format!("Operation {} not found", id)))
    }
}

#[async_trait]
impl OperationLineRepository for SqliteOperationLineRepository {
    async fn find_by_id(&self, id: &OperationLineId) -> Result<Option<OperationLine>, DomainError> {
        let result = operation_lines::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_operation(
        &self,
        operation_id: &OperationId,
    ) -> Result<Vec<OperationLine>, DomainError> {
        self.require_operation(operation_id).await?;

        let results = operation_lines::Entity::find()
            .filter(operation_lines::Column::OperationId.eq(operation_id.0))
            .order_by_asc(operation_lines::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn create(
        &self,
        operation_id: &OperationId,
        line: &OperationLineInput,
    ) -> Result<OperationLine, DomainError> {
        self.require_operation(operation_id).await?;

        let txn = self.db.begin().await.map_err(map_db_err)?;
        let id = graph::insert_line(&txn, *operation_id, line).await?;
        txn.commit().await.map_err(map_db_err)?;

        self.find_by_id(&id)
            .await?
            .ok_or_else(|| DomainError::Internal(format!("Operation line {} vanished", id)))
    }

    async fn update(
        &self,
        id: &OperationLineId,
        line: &OperationLineInput,
    ) -> Result<OperationLine, DomainError> {
        if self.find_by_id(id).await?.is_none() {
            return Err(DomainError::NotFound(format!(
                "Operation line {} not found",
                id
            )));
        }

        graph::update_line(&self.db, *id, line).await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::Internal(format!("Operation line {} vanished", id)))
    }

    async fn delete(&self, id: &OperationLineId) -> Result<(), DomainError> {
        let result = operation_lines::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound(format!(
                "Operation line {} not found",
                id
            )));
        }

        Ok(())
    }
}
