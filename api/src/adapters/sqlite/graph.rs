//! Aggregate graph walks
//!
//! Loading, cascading inserts, collection synchronisation and cascading
//! deletes for the car -> intervention -> operation -> line tree. Rows
//! reference their parent through a foreign key only, so every walk goes
//! parent to child, one query per level, and rows are regrouped in memory
//! by parent id.
//!
//! Nothing here opens a transaction: repositories call these helpers with
//! a `DatabaseTransaction` whenever they mutate.

use std::collections::{HashMap, HashSet};

use chrono::{Datelike, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use super::map_db_err;
use crate::domain::entities::{
    Car, CarId, CarInput, Intervention, InterventionId, InterventionInput, Operation, OperationId,
    OperationInput, OperationLine, OperationLineId, OperationLineInput,
};
use crate::entity::{cars, interventions, operation_lines, operations};
use crate::error::DomainError;

// ============================================================================
// Loading
// ============================================================================

pub async fn load_car<C>(conn: &C, id: CarId) -> Result<Option<Car>, DomainError>
where
    C: ConnectionTrait,
{
    let Some(row) = cars::Entity::find_by_id(id.0)
        .one(conn)
        .await
        .map_err(map_db_err)?
    else {
        return Ok(None);
    };

    Ok(assemble_cars(conn, vec![row]).await?.pop())
}

pub async fn load_intervention<C>(
    conn: &C,
    id: InterventionId,
) -> Result<Option<Intervention>, DomainError>
where
    C: ConnectionTrait,
{
    let Some(row) = interventions::Entity::find_by_id(id.0)
        .one(conn)
        .await
        .map_err(map_db_err)?
    else {
        return Ok(None);
    };

    Ok(assemble_interventions(conn, vec![row]).await?.pop())
}

pub async fn load_operation<C>(conn: &C, id: OperationId) -> Result<Option<Operation>, DomainError>
where
    C: ConnectionTrait,
{
    let Some(row) = operations::Entity::find_by_id(id.0)
        .one(conn)
        .await
        .map_err(map_db_err)?
    else {
        return Ok(None);
    };

    Ok(assemble_operations(conn, vec![row]).await?.pop())
}

pub async fn assemble_cars<C>(conn: &C, rows: Vec<cars::Model>) -> Result<Vec<Car>, DomainError>
where
    C: ConnectionTrait,
{
    let car_ids: Vec<i32> = rows.iter().map(|r| r.id).collect();
    let intervention_rows = if car_ids.is_empty() {
        Vec::new()
    } else {
        interventions::Entity::find()
            .filter(interventions::Column::CarId.is_in(car_ids))
            .order_by_asc(interventions::Column::Id)
            .all(conn)
            .await
            .map_err(map_db_err)?
    };

    let mut by_car: HashMap<CarId, Vec<Intervention>> = HashMap::new();
    for intervention in assemble_interventions(conn, intervention_rows).await? {
        by_car
            .entry(intervention.car_id)
            .or_default()
            .push(intervention);
    }

    Ok(rows
        .into_iter()
        .map(|row| {
            let interventions = by_car.remove(&CarId(row.id)).unwrap_or_default();
            car_from_row(row, interventions)
        })
        .collect())
}

pub async fn assemble_interventions<C>(
    conn: &C,
    rows: Vec<interventions::Model>,
) -> Result<Vec<Intervention>, DomainError>
where
    C: ConnectionTrait,
{
    let intervention_ids: Vec<i32> = rows.iter().map(|r| r.id).collect();
    let operation_rows = if intervention_ids.is_empty() {
        Vec::new()
    } else {
        operations::Entity::find()
            .filter(operations::Column::InterventionId.is_in(intervention_ids))
            .order_by_asc(operations::Column::Id)
            .all(conn)
            .await
            .map_err(map_db_err)?
    };

    let mut by_intervention: HashMap<InterventionId, Vec<Operation>> = HashMap::new();
    for operation in assemble_operations(conn, operation_rows).await? {
        by_intervention
            .entry(operation.intervention_id)
            .or_default()
            .push(operation);
    }

    Ok(rows
        .into_iter()
        .map(|row| {
            let operations = by_intervention
                .remove(&InterventionId(row.id))
                .unwrap_or_default();
            intervention_from_row(row, operations)
        })
        .collect())
}

pub async fn assemble_operations<C>(
    conn: &C,
    rows: Vec<operations::Model>,
) -> Result<Vec<Operation>, DomainError>
where
    C: ConnectionTrait,
{
    let operation_ids: Vec<i32> = rows.iter().map(|r| r.id).collect();
    let line_rows = if operation_ids.is_empty() {
        Vec::new()
    } else {
        operation_lines::Entity::find()
            .filter(operation_lines::Column::OperationId.is_in(operation_ids))
            .order_by_asc(operation_lines::Column::Id)
            .all(conn)
            .await
            .map_err(map_db_err)?
    };

    let mut by_operation: HashMap<OperationId, Vec<OperationLine>> = HashMap::new();
    for line in line_rows.into_iter().map(OperationLine::from) {
        by_operation.entry(line.operation_id).or_default().push(line);
    }

    Ok(rows
        .into_iter()
        .map(|row| Operation {
            id: OperationId(row.id),
            intervention_id: InterventionId(row.intervention_id),
            label: row.label,
            operation_lines: by_operation.remove(&OperationId(row.id)).unwrap_or_default(),
        })
        .collect())
}

fn car_from_row(row: cars::Model, interventions: Vec<Intervention>) -> Car {
    Car {
        id: CarId(row.id),
        registration: row.registration,
        serial_number: row.serial_number,
        owner: row.owner,
        brand: row.brand,
        model: row.model,
        motorization: row.motorization,
        engine_code: row.engine_code,
        release_date: row.release_date,
        comments: row.comments,
        certificate: row.certificate,
        picture: row.picture,
        interventions,
    }
}

fn intervention_from_row(row: interventions::Model, operations: Vec<Operation>) -> Intervention {
    Intervention {
        id: InterventionId(row.id),
        car_id: CarId(row.car_id),
        year: row.year,
        number: row.number,
        status: row.status,
        description: row.description,
        mileage: row.mileage,
        estimated_time: row.estimated_time,
        real_time: row.real_time,
        amount: row.amount,
        paid_amount: row.paid_amount,
        comments: row.comments,
        operations,
    }
}

/// Convert SeaORM model to domain entity
impl From<operation_lines::Model> for OperationLine {
    fn from(model: operation_lines::Model) -> Self {
        OperationLine {
            id: OperationLineId(model.id),
            operation_id: OperationId(model.operation_id),
            label: model.label,
            quantity: model.quantity,
            done: model.done,
        }
    }
}

// ============================================================================
// Cascading inserts
// ============================================================================

fn car_model(input: &CarInput) -> cars::ActiveModel {
    cars::ActiveModel {
        id: NotSet,
        registration: Set(input.registration.clone()),
        serial_number: Set(input.serial_number.clone()),
        owner: Set(input.owner.clone()),
        brand: Set(input.brand.clone()),
        model: Set(input.model.clone()),
        motorization: Set(input.motorization.clone()),
        engine_code: Set(input.engine_code.clone()),
        release_date: Set(input.release_date),
        comments: Set(input.comments.clone()),
        certificate: Set(input.certificate.clone()),
        picture: Set(input.picture.clone()),
    }
}

/// Insert a car with every nested intervention, operation and line
pub async fn insert_car<C>(conn: &C, input: &CarInput) -> Result<CarId, DomainError>
where
    C: ConnectionTrait,
{
    let row = car_model(input).insert(conn).await.map_err(map_db_err)?;
    let car_id = CarId(row.id);

    for intervention in input.interventions.iter().flatten() {
        insert_intervention(conn, car_id, intervention).await?;
    }

    Ok(car_id)
}

/// Insert an intervention below `car_id`, numbering it within the current year
pub async fn insert_intervention<C>(
    conn: &C,
    car_id: CarId,
    input: &InterventionInput,
) -> Result<InterventionId, DomainError>
where
    C: ConnectionTrait,
{
    let year = Utc::now().year();
    let number = next_intervention_number(conn, year).await?;

    let row = interventions::ActiveModel {
        id: NotSet,
        car_id: Set(car_id.0),
        year: Set(year),
        number: Set(number),
        status: Set(input.status.clone()),
        description: Set(input.description.clone()),
        mileage: Set(input.mileage),
        estimated_time: Set(input.estimated_time),
        real_time: Set(input.real_time),
        amount: Set(input.amount),
        paid_amount: Set(input.paid_amount),
        comments: Set(input.comments.clone()),
    }
    .insert(conn)
    .await
    .map_err(map_db_err)?;
    let intervention_id = InterventionId(row.id);

    for operation in input.operations.iter().flatten() {
        insert_operation(conn, intervention_id, operation).await?;
    }

    Ok(intervention_id)
}

async fn next_intervention_number<C>(conn: &C, year: i32) -> Result<i32, DomainError>
where
    C: ConnectionTrait,
{
    let last = interventions::Entity::find()
        .filter(interventions::Column::Year.eq(year))
        .order_by_desc(interventions::Column::Number)
        .one(conn)
        .await
        .map_err(map_db_err)?;

    Ok(last.map(|row| row.number + 1).unwrap_or(1))
}

/// Insert an operation below `intervention_id` together with its lines
pub async fn insert_operation<C>(
    conn: &C,
    intervention_id: InterventionId,
    input: &OperationInput,
) -> Result<OperationId, DomainError>
where
    C: ConnectionTrait,
{
    let row = operations::ActiveModel {
        id: NotSet,
        intervention_id: Set(intervention_id.0),
        label: Set(input.label.clone()),
    }
    .insert(conn)
    .await
    .map_err(map_db_err)?;
    let operation_id = OperationId(row.id);

    for line in input.operation_lines.iter().flatten() {
        insert_line(conn, operation_id, line).await?;
    }

    Ok(operation_id)
}

pub async fn insert_line<C>(
    conn: &C,
    operation_id: OperationId,
    input: &OperationLineInput,
) -> Result<OperationLineId, DomainError>
where
    C: ConnectionTrait,
{
    let row = operation_lines::ActiveModel {
        id: NotSet,
        operation_id: Set(operation_id.0),
        label: Set(input.label.clone()),
        quantity: Set(input.quantity),
        done: Set(input.is_done()),
    }
    .insert(conn)
    .await
    .map_err(map_db_err)?;

    Ok(OperationLineId(row.id))
}

// ============================================================================
// Updates and collection synchronisation
// ============================================================================

/// Overwrite the car's own columns and synchronise its interventions if given
pub async fn update_car<C>(conn: &C, id: CarId, input: &CarInput) -> Result<(), DomainError>
where
    C: ConnectionTrait,
{
    let mut model = car_model(input);
    model.id = Set(id.0);
    model.update(conn).await.map_err(map_db_err)?;

    if let Some(interventions) = &input.interventions {
        sync_interventions(conn, id, interventions).await?;
    }

    Ok(())
}

/// Make the car's interventions match `inputs`
///
/// Listed ids are updated, id-less entries inserted, and every stored
/// intervention missing from the list is deleted with its subtree.
async fn sync_interventions<C>(
    conn: &C,
    car_id: CarId,
    inputs: &[InterventionInput],
) -> Result<(), DomainError>
where
    C: ConnectionTrait,
{
    let stored: HashSet<i32> = interventions::Entity::find()
        .filter(interventions::Column::CarId.eq(car_id.0))
        .all(conn)
        .await
        .map_err(map_db_err)?
        .into_iter()
        .map(|row| row.id)
        .collect();
    let listed = listed_ids(inputs.iter().map(|i| i.id.map(|id| id.0)));

    if let Some(unknown) = listed.difference(&stored).next() {
        return Err(DomainError::NotFound(format!(
            "Intervention {} not found on car {}",
            unknown, car_id
        )));
    }

    let orphans: Vec<i32> = stored.difference(&listed).copied().collect();
    delete_intervention_trees(conn, &orphans).await?;

    for input in inputs {
        match input.id {
            Some(id) => update_intervention(conn, id, input).await?,
            None => {
                insert_intervention(conn, car_id, input).await?;
            }
        }
    }

    Ok(())
}

/// Overwrite the mutable intervention columns and synchronise its operations if given
///
/// The id, the year/number pair and the owning car are left alone.
pub async fn update_intervention<C>(
    conn: &C,
    id: InterventionId,
    input: &InterventionInput,
) -> Result<(), DomainError>
where
    C: ConnectionTrait,
{
    interventions::ActiveModel {
        id: Set(id.0),
        status: Set(input.status.clone()),
        description: Set(input.description.clone()),
        mileage: Set(input.mileage),
        estimated_time: Set(input.estimated_time),
        real_time: Set(input.real_time),
        amount: Set(input.amount),
        paid_amount: Set(input.paid_amount),
        comments: Set(input.comments.clone()),
        ..Default::default()
    }
    .update(conn)
    .await
    .map_err(map_db_err)?;

    if let Some(operations) = &input.operations {
        sync_operations(conn, id, operations).await?;
    }

    Ok(())
}

/// Make the intervention's operations match `inputs` (with orphan removal)
async fn sync_operations<C>(
    conn: &C,
    intervention_id: InterventionId,
    inputs: &[OperationInput],
) -> Result<(), DomainError>
where
    C: ConnectionTrait,
{
    let stored: HashSet<i32> = operations::Entity::find()
        .filter(operations::Column::InterventionId.eq(intervention_id.0))
        .all(conn)
        .await
        .map_err(map_db_err)?
        .into_iter()
        .map(|row| row.id)
        .collect();
    let listed = listed_ids(inputs.iter().map(|o| o.id.map(|id| id.0)));

    if let Some(unknown) = listed.difference(&stored).next() {
        return Err(DomainError::NotFound(format!(
            "Operation {} not found on intervention {}",
            unknown, intervention_id
        )));
    }

    let orphans: Vec<i32> = stored.difference(&listed).copied().collect();
    delete_operation_trees(conn, &orphans).await?;

    for input in inputs {
        match input.id {
            Some(id) => update_operation(conn, id, input).await?,
            None => {
                insert_operation(conn, intervention_id, input).await?;
            }
        }
    }

    Ok(())
}

/// Overwrite the operation label and upsert the given lines
pub async fn update_operation<C>(
    conn: &C,
    id: OperationId,
    input: &OperationInput,
) -> Result<(), DomainError>
where
    C: ConnectionTrait,
{
    operations::ActiveModel {
        id: Set(id.0),
        label: Set(input.label.clone()),
        ..Default::default()
    }
    .update(conn)
    .await
    .map_err(map_db_err)?;

    if let Some(lines) = &input.operation_lines {
        upsert_lines(conn, id, lines).await?;
    }

    Ok(())
}

/// Insert or update the given lines; stored lines that are not listed stay
async fn upsert_lines<C>(
    conn: &C,
    operation_id: OperationId,
    inputs: &[OperationLineInput],
) -> Result<(), DomainError>
where
    C: ConnectionTrait,
{
    let stored: HashSet<i32> = operation_lines::Entity::find()
        .filter(operation_lines::Column::OperationId.eq(operation_id.0))
        .all(conn)
        .await
        .map_err(map_db_err)?
        .into_iter()
        .map(|row| row.id)
        .collect();

    for input in inputs {
        match input.id {
            Some(id) if stored.contains(&id.0) => update_line(conn, id, input).await?,
            Some(id) => {
                return Err(DomainError::NotFound(format!(
                    "Operation line {} not found on operation {}",
                    id, operation_id
                )))
            }
            None => {
                insert_line(conn, operation_id, input).await?;
            }
        }
    }

    Ok(())
}

pub async fn update_line<C>(
    conn: &C,
    id: OperationLineId,
    input: &OperationLineInput,
) -> Result<(), DomainError>
where
    C: ConnectionTrait,
{
    operation_lines::ActiveModel {
        id: Set(id.0),
        label: Set(input.label.clone()),
        quantity: Set(input.quantity),
        done: Set(input.is_done()),
        ..Default::default()
    }
    .update(conn)
    .await
    .map_err(map_db_err)?;

    Ok(())
}

fn listed_ids(ids: impl Iterator<Item = Option<i32>>) -> HashSet<i32> {
    ids.flatten().collect()
}

// ============================================================================
// Cascading deletes (children first)
// ============================================================================

/// Delete a car and everything below it
pub async fn delete_car_tree<C>(conn: &C, id: CarId) -> Result<(), DomainError>
where
    C: ConnectionTrait,
{
    let intervention_ids: Vec<i32> = interventions::Entity::find()
        .filter(interventions::Column::CarId.eq(id.0))
        .all(conn)
        .await
        .map_err(map_db_err)?
        .into_iter()
        .map(|row| row.id)
        .collect();

    delete_intervention_trees(conn, &intervention_ids).await?;

    cars::Entity::delete_by_id(id.0)
        .exec(conn)
        .await
        .map_err(map_db_err)?;

    Ok(())
}

/// Delete interventions with their operations and lines
pub async fn delete_intervention_trees<C>(conn: &C, ids: &[i32]) -> Result<(), DomainError>
where
    C: ConnectionTrait,
{
    if ids.is_empty() {
        return Ok(());
    }

    let operation_ids: Vec<i32> = operations::Entity::find()
        .filter(operations::Column::InterventionId.is_in(ids.iter().copied()))
        .all(conn)
        .await
        .map_err(map_db_err)?
        .into_iter()
        .map(|row| row.id)
        .collect();

    delete_operation_trees(conn, &operation_ids).await?;

    interventions::Entity::delete_many()
        .filter(interventions::Column::Id.is_in(ids.iter().copied()))
        .exec(conn)
        .await
        .map_err(map_db_err)?;

    Ok(())
}

/// Delete operations with their lines
pub async fn delete_operation_trees<C>(conn: &C, ids: &[i32]) -> Result<(), DomainError>
where
    C: ConnectionTrait,
{
    if ids.is_empty() {
        return Ok(());
    }

    operation_lines::Entity::delete_many()
        .filter(operation_lines::Column::OperationId.is_in(ids.iter().copied()))
        .exec(conn)
        .await
        .map_err(map_db_err)?;

    operations::Entity::delete_many()
        .filter(operations::Column::Id.is_in(ids.iter().copied()))
        .exec(conn)
        .await
        .map_err(map_db_err)?;

    Ok(())
}
