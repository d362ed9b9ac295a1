//! Operation service
//!
//! Operations and their lines. Deleting an operation takes its whole
//! intervention with it; deleting a line only removes the line.

use std::sync::Arc;

use crate::domain::entities::{
    InterventionId, Operation, OperationId, OperationInput, OperationLine, OperationLineId,
    OperationLineInput,
};
use crate::domain::ports::{OperationLineRepository, OperationRepository};
use crate::error::AppError;
use crate::loggable::{Loggable, MethodLogger};

/// Service for managing operations and operation lines
pub struct OperationService<OR, LR>
where
    OR: OperationRepository,
    LR: OperationLineRepository,
{
    operations: Arc<OR>,
    lines: Arc<LR>,
    logger: MethodLogger,
}

impl<OR, LR> OperationService<OR, LR>
where
    OR: OperationRepository,
    LR: OperationLineRepository,
{
    pub fn new(operations: Arc<OR>, lines: Arc<LR>, logger: MethodLogger) -> Self {
        Self {
            operations,
            lines,
            logger,
        }
    }

    // ========================================================================
    // Operations
    // ========================================================================

    pub async fn list_for_intervention(
        &self,
        intervention_id: &InterventionId,
    ) -> Result<Vec<Operation>, AppError> {
        let operations = self
            .logger
            .try_call(Loggable::debug("list_operations"), intervention_id, || {
                self.operations.find_by_intervention(intervention_id)
            })
            .await?;
        Ok(operations)
    }

    pub async fn get(&self, id: &OperationId) -> Result<Option<Operation>, AppError> {
        let operation = self
            .logger
            .try_call(Loggable::debug("get_operation"), id, || {
                self.operations.find_by_id(id)
            })
            .await?;
        Ok(operation)
    }

    pub async fn add(
        &self,
        intervention_id: &InterventionId,
        input: &OperationInput,
    ) -> Result<Operation, AppError> {
        let operation = self
            .logger
            .try_call(
                Loggable::info("add_operation"),
                &(intervention_id, input),
                || async {
                    input.validate()?;
                    input.ensure_new()?;
                    self.operations.create(intervention_id, input).await
                },
            )
            .await?;
        Ok(operation)
    }

    pub async fn update(
        &self,
        id: &OperationId,
        input: &OperationInput,
    ) -> Result<Operation, AppError> {
        let operation = self
            .logger
            .try_call(
                Loggable::info("update_operation"),
                &(id, input),
                || async {
                    input.validate()?;
                    self.operations.update(id, input).await
                },
            )
            .await?;
        Ok(operation)
    }

    /// Delete an operation and, with it, its owning intervention
    pub async fn delete(&self, id: &OperationId) -> Result<(), AppError> {
        self.logger
            .try_call(Loggable::info("delete_operation"), id, || {
                self.operations.delete(id)
            })
            .await?;
        Ok(())
    }

    // ========================================================================
    // Operation lines
    // ========================================================================

    pub async fn list_lines(
        &self,
        operation_id: &OperationId,
    ) -> Result<Vec<OperationLine>, AppError> {
        let lines = self
            .logger
            .try_call(Loggable::debug("list_operation_lines"), operation_id, || {
                self.lines.find_by_operation(operation_id)
            })
            .await?;
        Ok(lines)
    }

    pub async fn get_line(&self, id: &OperationLineId) -> Result<Option<OperationLine>, AppError> {
        let line = self
            .logger
            .try_call(Loggable::debug("get_operation_line"), id, || {
                self.lines.find_by_id(id)
            })
            .await?;
        Ok(line)
    }

    pub async fn add_line(
        &self,
        operation_id: &OperationId,
        input: &OperationLineInput,
    ) -> Result<OperationLine, AppError> {
        let line = self
            .logger
            .try_call(
                Loggable::info("add_operation_line"),
                &(operation_id, input),
                || async {
                    input.validate()?;
                    input.ensure_new()?;
                    self.lines.create(operation_id, input).await
                },
            )
            .await?;
        Ok(line)
    }

    pub async fn update_line(
        &self,
        id: &OperationLineId,
        input: &OperationLineInput,
    ) -> Result<OperationLine, AppError> {
        let line = self
            .logger
            .try_call(
                Loggable::info("update_operation_line"),
                &(id, input),
                || async {
                    input.validate()?;
                    self.lines.update(id, input).await
                },
            )
            .await?;
        Ok(line)
    }

    pub async fn delete_line(&self, id: &OperationLineId) -> Result<(), AppError> {
        self.logger
            .try_call(Loggable::info("delete_operation_line"), id, || {
                self.lines.delete(id)
            })
            .await?;
        Ok(())
    }
}
