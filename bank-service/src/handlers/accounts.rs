use super::rejected;
use crate::dtos::{CreateAccountRequest, MessageResponse, UpdateAccountRequest};
use crate::services::metrics::{record_client_created, record_client_deleted};
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;
use service_core::extract::JsonBody;

/// Every client, statements included.
pub async fn list_accounts(State(state): State<AppState>) -> impl IntoResponse {
    let repository = state.repository.lock().await;
    Json(repository.clients().to_vec())
}

pub async fn create_account(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateAccountRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut repository = state.repository.lock().await;

    let client = repository
        .create(req.tax_id.as_str(), req.name)
        .map_err(|err| rejected(&req.tax_id, err))?;

    tracing::info!(tax_id = %client.tax_id, client_id = %client.id, "Client created");
    record_client_created();

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Client added with success!")),
    ))
}

pub async fn get_account(
    State(state): State<AppState>,
    Path(tax_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let repository = state.repository.lock().await;

    let client = repository
        .get(&tax_id)
        .map_err(|err| rejected(&tax_id, err))?;

    Ok(Json(client.clone()))
}

pub async fn update_account(
    State(state): State<AppState>,
    Path(tax_id): Path<String>,
    JsonBody(req): JsonBody<UpdateAccountRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut repository = state.repository.lock().await;

    repository
        .update(&tax_id, req.name)
        .map_err(|err| rejected(&tax_id, err))?;

    tracing::info!(tax_id = %tax_id, "Client updated");

    Ok(Json(MessageResponse::new("Client data updated with success!")))
}

pub async fn delete_account(
    State(state): State<AppState>,
    Path(tax_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut repository = state.repository.lock().await;

    let client = repository
        .delete(&tax_id)
        .map_err(|err| rejected(&tax_id, err))?;

    tracing::info!(tax_id = %tax_id, client_id = %client.id, "Client deleted");
    record_client_deleted();

    Ok(Json(MessageResponse::new("Client deleted with success!")))
}
