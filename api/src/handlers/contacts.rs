//! Contact handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::entities::{Contact, ContactId, ContactInput};
use crate::error::AppError;
use crate::AppState;

/// GET /contacts/all
pub async fn list_contacts(State(state): State<AppState>) -> Result<Response, AppError> {
    let contacts = state.contact_service.list().await?;
    if contacts.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    Ok(Json(contacts).into_response())
}

/// GET /contacts/:id
pub async fn get_contact(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Contact>, AppError> {
    let contact = state
        .contact_service
        .get(&ContactId(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Contact {} not found", id)))?;

    Ok(Json(contact))
}

/// POST /contacts/save
///
/// Contacts carry their own id; saving an existing id is a conflict.
pub async fn save_contact(
    State(state): State<AppState>,
    Json(input): Json<ContactInput>,
) -> Result<(StatusCode, Json<Contact>), AppError> {
    let contact = state.contact_service.save(input).await?;
    Ok((StatusCode::CREATED, Json(contact)))
}

/// PUT /contacts/:id/update
pub async fn update_contact(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<ContactInput>,
) -> Result<Json<Contact>, AppError> {
    let contact = state
        .contact_service
        .update(&ContactId(id), input)
        .await?;
    Ok(Json(contact))
}

/// DELETE /contacts/:id/delete
pub async fn delete_contact(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    state.contact_service.delete(&ContactId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
