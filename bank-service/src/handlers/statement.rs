use super::rejected;
use crate::services::{filter_by_date, parse_statement_date};
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;

pub async fn get_statement(
    State(state): State<AppState>,
    Path(tax_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let repository = state.repository.lock().await;

    let client = repository
        .get(&tax_id)
        .map_err(|err| rejected(&tax_id, err))?;

    Ok(Json(client.statement.clone()))
}

/// Statement restricted to one calendar day (`YYYY-MM-DD`) in the server timezone.
pub async fn get_statement_by_date(
    State(state): State<AppState>,
    Path((tax_id, date)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let repository = state.repository.lock().await;

    let client = repository
        .get(&tax_id)
        .map_err(|err| rejected(&tax_id, err))?;
    let day = parse_statement_date(&date).map_err(|err| rejected(&tax_id, err))?;

    let operations: Vec<_> = filter_by_date(&client.statement, day, state.statement_timezone)
        .cloned()
        .collect();

    Ok(Json(operations))
}

pub async fn get_balance(
    State(state): State<AppState>,
    Path(tax_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let repository = state.repository.lock().await;

    let balance = repository
        .balance(&tax_id)
        .map_err(|err| rejected(&tax_id, err))?;

    Ok(Json(balance))
}
