use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::Value;
use std::sync::Arc;

use crate::application::{
    FundingHistoryReportUseCase, OrderHistoryReportUseCase, RegisterWalletError,
    RegisterWalletUseCase,
};
use crate::domain::Clock;
use crate::presentation::export::{self, ReportKind};
use crate::presentation::rest::{ApiError, dto::*};

use super::AppState;

/// GET /health
pub async fn health<C: Clock>(State(state): State<Arc<AppState<C>>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        server_time: state.clock.now_millis(),
    })
}

/// POST /management/wallet-address
///
/// Echoes the accepted payload back under `data.attributes`.
pub async fn register_wallet<C: Clock>(
    State(state): State<Arc<AppState<C>>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<DataResponse<Value>>), ApiError> {
    let Json(payload) = payload.map_err(|rejection| {
        tracing::debug!(%rejection, "Rejected wallet registration body");
        ApiError::invalid_payload()
    })?;
    let request: RegisterWalletRequest =
        serde_json::from_value(payload.clone()).map_err(|_| ApiError::invalid_payload())?;

    let use_case = RegisterWalletUseCase::new(Arc::clone(&state.wallets));
    use_case
        .execute(&request.address, request.provider)
        .await
        .map_err(|e| match e {
            RegisterWalletError::EmptyAddress => ApiError::invalid_payload(),
        })?;

    state.persist().map_err(|e| {
        tracing::error!(error = %e, "Failed to persist store snapshot");
        ApiError::internal()
    })?;

    Ok((StatusCode::CREATED, Json(DataResponse::new(payload))))
}

/// GET /accountant/trades/export
pub async fn export_trades<C: Clock>(
    State(state): State<Arc<AppState<C>>>,
    query: Result<Query<ExportQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let query = parse_export_query(query)?;

    let use_case = OrderHistoryReportUseCase::new(
        Arc::clone(&state.wallets),
        Arc::clone(&state.orders),
        Arc::clone(&state.order_fills),
        Arc::clone(&state.positions),
    );
    let rows = use_case.execute(&query.report_query()).await?;
    let body = export::write_order_history(Vec::new(), &rows).map_err(csv_failure)?;

    Ok(csv_attachment(ReportKind::OrderHistory, &query, body))
}

/// GET /accountant/fundings/export
pub async fn export_fundings<C: Clock>(
    State(state): State<Arc<AppState<C>>>,
    query: Result<Query<ExportQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let query = parse_export_query(query)?;

    let use_case = FundingHistoryReportUseCase::new(
        Arc::clone(&state.wallets),
        Arc::clone(&state.funding_payments),
    );
    let rows = use_case.execute(&query.report_query()).await?;
    let body = export::write_funding_history(Vec::new(), &rows).map_err(csv_failure)?;

    Ok(csv_attachment(ReportKind::PositionFundingHistory, &query, body))
}

fn parse_export_query(
    query: Result<Query<ExportQuery>, QueryRejection>,
) -> Result<ExportQuery, ApiError> {
    let Query(query) = query.map_err(|rejection| ApiError::invalid_query(rejection.body_text()))?;
    if query.from_date > query.to_date {
        return Err(ApiError::invalid_query("from_date is after to_date"));
    }
    Ok(query)
}

fn csv_failure(err: csv::Error) -> ApiError {
    tracing::error!(error = %err, "Failed to render CSV export");
    ApiError::internal()
}

fn csv_attachment(kind: ReportKind, query: &ExportQuery, body: Vec<u8>) -> Response {
    let file_name = export::export_file_name(
        kind,
        query.provider,
        &query.wallet_address,
        query.from_date,
        query.to_date,
    );
    (
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", file_name),
            ),
        ],
        body,
    )
        .into_response()
}
