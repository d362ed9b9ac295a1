//! Intervention service

use std::sync::Arc;

use crate::domain::entities::{CarId, Intervention, InterventionId, InterventionInput};
use crate::domain::ports::InterventionRepository;
use crate::error::AppError;
use crate::loggable::{Loggable, MethodLogger};

/// Service for managing the interventions of a car
pub struct InterventionService<IR>
where
    IR: InterventionRepository,
{
    interventions: Arc<IR>,
    logger: MethodLogger,
}

impl<IR> InterventionService<IR>
where
    IR: InterventionRepository,
{
    pub fn new(interventions: Arc<IR>, logger: MethodLogger) -> Self {
        Self {
            interventions,
            logger,
        }
    }

    pub async fn list_for_car(&self, car_id: &CarId) -> Result<Vec<Intervention>, AppError> {
        let interventions = self
            .logger
            .try_call(Loggable::debug("list_interventions"), car_id, || {
                self.interventions.find_by_car(car_id)
            })
            .await?;
        Ok(interventions)
    }

    pub async fn get(&self, id: &InterventionId) -> Result<Option<Intervention>, AppError> {
        let intervention = self
            .logger
            .try_call(Loggable::debug("get_intervention"), id, || {
                self.interventions.find_by_id(id)
            })
            .await?;
        Ok(intervention)
    }

    /// Open a new intervention on a car; year and number are assigned here
    pub async fn add(
        &self,
        car_id: &CarId,
        input: &InterventionInput,
    ) -> Result<Intervention, AppError> {
        let intervention = self
            .logger
            .try_call(
                Loggable::info("add_intervention"),
                &(car_id, input),
                || async {
                    input.validate()?;
                    input.ensure_new()?;
                    self.interventions.create(car_id, input).await
                },
            )
            .await?;

        tracing::debug!(
            "Intervention {}-{} opened on car {}",
            intervention.year,
            intervention.number,
            car_id
        );
        Ok(intervention)
    }

    pub async fn update(
        &self,
        id: &InterventionId,
        input: &InterventionInput,
    ) -> Result<Intervention, AppError> {
        let intervention = self
            .logger
            .try_call(
                Loggable::info("update_intervention"),
                &(id, input),
                || async {
                    input.validate()?;
                    self.interventions.update(id, input).await
                },
            )
            .await?;
        Ok(intervention)
    }

    pub async fn delete(&self, id: &InterventionId) -> Result<(), AppError> {
        self.logger
            .try_call(Loggable::info("delete_intervention"), id, || {
                self.interventions.delete(id)
            })
            .await?;
        Ok(())
    }
}
