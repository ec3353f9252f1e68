use super::rejected;
use crate::dtos::{DepositRequest, MessageResponse, WithdrawRequest};
use crate::models::OperationKind;
use crate::services::metrics::record_operation;
use crate::startup::AppState;
use axum::{
    body::Bytes,
    extract::{MatchedPath, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use service_core::error::AppError;
use service_core::extract::JsonBody;

pub async fn deposit(
    State(state): State<AppState>,
    Path(tax_id): Path<String>,
    JsonBody(req): JsonBody<DepositRequest>,
) -> Result<Response, AppError> {
    record_deposit(&state, &tax_id, req).await
}

/// Debit the client if the current balance covers the amount.
///
/// The balance check and the append happen under the same repository lock.
pub async fn withdraw(
    State(state): State<AppState>,
    Path(tax_id): Path<String>,
    JsonBody(req): JsonBody<WithdrawRequest>,
) -> Result<Response, AppError> {
    record_withdrawal(&state, &tax_id, req).await
}

/// `POST /{account,statement,balance}/:action`.
///
/// Those static prefixes shadow `/:tax_id/deposit` and `/:tax_id/withdraw`, so
/// a client whose tax id equals the prefix is routed here instead.
pub async fn shadowed_operation(
    State(state): State<AppState>,
    matched: MatchedPath,
    Path(action): Path<String>,
    body: Bytes,
) -> Result<Response, AppError> {
    let tax_id = matched
        .as_str()
        .trim_start_matches('/')
        .split('/')
        .next()
        .unwrap_or_default()
        .to_string();

    match action.as_str() {
        "deposit" => {
            let Json(req) = Json::<DepositRequest>::from_bytes(&body)?;
            record_deposit(&state, &tax_id, req).await
        }
        "withdraw" => {
            let Json(req) = Json::<WithdrawRequest>::from_bytes(&body)?;
            record_withdrawal(&state, &tax_id, req).await
        }
        _ => Ok(StatusCode::METHOD_NOT_ALLOWED.into_response()),
    }
}

async fn record_deposit(
    state: &AppState,
    tax_id: &str,
    req: DepositRequest,
) -> Result<Response, AppError> {
    let mut repository = state.repository.lock().await;

    repository
        .deposit(tax_id, req.description, req.amount, Utc::now())
        .map_err(|err| rejected(tax_id, err))?;

    tracing::info!(tax_id = %tax_id, amount = %req.amount, "Deposit recorded");
    record_operation(OperationKind::Credit);

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Statement added with success!")),
    )
        .into_response())
}

async fn record_withdrawal(
    state: &AppState,
    tax_id: &str,
    req: WithdrawRequest,
) -> Result<Response, AppError> {
    let mut repository = state.repository.lock().await;

    repository
        .withdraw(tax_id, req.amount, Utc::now())
        .map_err(|err| rejected(tax_id, err))?;

    tracing::info!(tax_id = %tax_id, amount = %req.amount, "Withdrawal recorded");
    record_operation(OperationKind::Debit);

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Withdraw complete!")),
    )
        .into_response())
}
