use std::sync::Arc;

use axum::{Json, extract::Extension, response::IntoResponse};

use crate::app::dto::{CreateSessionRequest, SessionResponse};
use crate::app::errors::ApiError;
use crate::app::extract::ApiJson;
use crate::app::services::AppServices;

pub async fn create_session(
    Extension(services): Extension<Arc<AppServices>>,
    ApiJson(body): ApiJson<CreateSessionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let session = tokio::task::spawn_blocking(move || services.login(&body.email, &body.password))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    Ok(Json(SessionResponse::from(session)))
}
