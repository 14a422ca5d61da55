use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json, Response},
    Extension,
};
use serde_json::json;

use crate::dto::user_dto::UserView;
use crate::error::{Error, Result};
use crate::middleware::auth::Claims;
use crate::AppState;

#[axum::debug_handler]
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Response> {
    let user_id = uuid::Uuid::parse_str(&claims.sub)
        .map_err(|_| Error::Unauthorized("invalid_subject".to_string()))?;
    let user = state.user_service.get_user_by_id(user_id).await?;
    Ok(Json(UserView::from(user)).into_response())
}

#[axum::debug_handler]
pub async fn list_users(State(state): State<AppState>) -> Result<Response> {
    let users = state.user_service.list_users().await?;
    let views: Vec<UserView> = users.into_iter().map(UserView::from).collect();
    Ok(Json(views).into_response())
}

#[axum::debug_handler]
pub async fn reset_device(
    State(state): State<AppState>,
    Path(user_id): Path<uuid::Uuid>,
) -> Result<Response> {
    state.user_service.reset_device(user_id).await?;
    Ok(Json(json!({ "message": "Device ID reset successfully" })).into_response())
}
