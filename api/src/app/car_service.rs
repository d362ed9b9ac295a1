//! Car service
//!
//! Use cases on the car aggregate. Every operation runs under the method
//! logger: reads are flagged debug, mutations are not.

use std::sync::Arc;

use crate::domain::entities::{Car, CarId, CarInput, CarSort};
use crate::domain::ports::CarRepository;
use crate::error::AppError;
use crate::loggable::{Loggable, MethodLogger};

/// Service for managing cars
pub struct CarService<CR>
where
    CR: CarRepository,
{
    cars: Arc<CR>,
    logger: MethodLogger,
}

impl<CR> CarService<CR>
where
    CR: CarRepository,
{
    pub fn new(cars: Arc<CR>, logger: MethodLogger) -> Self {
        Self { cars, logger }
    }

    /// List every car with its interventions
    pub async fn list(&self, sort: CarSort) -> Result<Vec<Car>, AppError> {
        let cars = self
            .logger
            .try_call(Loggable::debug("list_cars"), &sort, || {
                self.cars.find_all(sort)
            })
            .await?;
        Ok(cars)
    }

    /// Get a car by ID
    pub async fn get(&self, id: &CarId) -> Result<Option<Car>, AppError> {
        let car = self
            .logger
            .try_call(Loggable::debug("get_car"), id, || self.cars.find_by_id(id))
            .await?;
        Ok(car)
    }

    /// Create a car along with any nested (new) interventions
    pub async fn save(&self, input: &CarInput) -> Result<Car, AppError> {
        let car = self
            .logger
            .try_call(
                Loggable::info("save_car"),
                input,
                || async {
                    input.validate()?;
                    input.ensure_new()?;
                    self.cars.create(input).await
                },
            )
            .await?;

        tracing::debug!("Car {} saved as {}", car.registration, car.id);
        Ok(car)
    }

    /// Update a car; a provided interventions list replaces the stored one
    pub async fn update(&self, id: &CarId, input: &CarInput) -> Result<Car, AppError> {
        let car = self
            .logger
            .try_call(
                Loggable::info("update_car"),
                &(id, input),
                || async {
                    input.validate()?;
                    self.cars.update(id, input).await
                },
            )
            .await?;
        Ok(car)
    }

    /// Delete a car with everything below it
    pub async fn delete(&self, id: &CarId) -> Result<(), AppError> {
        self.logger
            .try_call(Loggable::info("delete_car"), id, || self.cars.delete(id))
            .await?;
        Ok(())
    }
}
