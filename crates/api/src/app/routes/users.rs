use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use tally_auth::NewUser;

use crate::app::errors::ApiError;
use crate::app::extract::ApiJson;
use crate::app::services::AppServices;
use crate::context::UserContext;

pub async fn create_user(
    Extension(services): Extension<Arc<AppServices>>,
    ApiJson(body): ApiJson<NewUser>,
) -> Result<impl IntoResponse, ApiError> {
    // Argon2 is deliberately slow; keep it off the async workers.
    let profile = tokio::task::spawn_blocking(move || services.register(body))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    Ok((StatusCode::CREATED, Json(profile)))
}

pub async fn show_profile(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<UserContext>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = services.profile(user.user_id())?;
    Ok(Json(profile))
}
