use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use tally_core::TransactionId;
use tally_ledger::LedgerError;

use crate::app::dto::AmountRequest;
use crate::app::errors::ApiError;
use crate::app::extract::ApiJson;
use crate::app::services::AppServices;
use crate::context::UserContext;

pub fn router() -> Router {
    Router::new()
        .route("/balance", get(show_balance))
        .route("/deposit", post(create_deposit))
        .route("/withdraw", post(create_withdraw))
        .route("/:statement_id", get(show_statement))
}

pub async fn show_balance(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<UserContext>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(services.balance(user.user_id())?))
}

pub async fn create_deposit(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<UserContext>,
    ApiJson(body): ApiJson<AmountRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let tx = services.deposit(user.user_id(), body.minor_units()?, body.description)?;
    Ok((StatusCode::CREATED, Json(tx)))
}

pub async fn create_withdraw(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<UserContext>,
    ApiJson(body): ApiJson<AmountRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let tx = services.withdraw(user.user_id(), body.minor_units()?, body.description)?;
    Ok((StatusCode::CREATED, Json(tx)))
}

pub async fn show_statement(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<UserContext>,
    Path(statement_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    // An id that does not parse cannot name anything the user owns.
    let id: TransactionId = statement_id
        .parse()
        .map_err(|_| LedgerError::StatementNotFound)?;
    Ok(Json(services.statement(user.user_id(), id)?))
}
