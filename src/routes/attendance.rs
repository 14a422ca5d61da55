use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    Extension,
};
use validator::Validate;

use crate::dto::attendance_dto::{
    DailyAttendanceQuery, DailyAttendanceResponse, DailyUserSummary, ListAttendanceQuery,
    ListAttendanceResponse, MarkAttendanceRequest, MarkAttendanceResponse,
};
use crate::error::{Error, Result};
use crate::middleware::auth::Claims;
use crate::services::working_hours;
use crate::utils::time::format_hours_minutes;
use crate::AppState;

fn authenticated_user_id(claims: &Claims) -> Result<uuid::Uuid> {
    uuid::Uuid::parse_str(&claims.sub)
        .map_err(|_| Error::Unauthorized("invalid_subject".to_string()))
}

fn client_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[axum::debug_handler]
pub async fn mark_attendance(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    headers: HeaderMap,
    Json(req): Json<MarkAttendanceRequest>,
) -> Result<Response> {
    req.validate()?;
    let user_id = authenticated_user_id(&claims)?;
    let ip = client_ip(&headers);

    let outcome = state
        .attendance_service
        .mark_attendance(user_id, req, ip)
        .await?;

    let response = MarkAttendanceResponse {
        message: outcome.message,
        inside_office: outcome.inside_office,
        data: outcome.event,
    };
    Ok((StatusCode::CREATED, Json(response)).into_response())
}

#[axum::debug_handler]
pub async fn list_attendance(
    State(state): State<AppState>,
    Query(query): Query<ListAttendanceQuery>,
) -> Result<Response> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(20).clamp(1, 100);

    let (records, total) = state.attendance_service.list_events(page, limit).await?;
    Ok(Json(ListAttendanceResponse {
        total,
        page,
        limit,
        records,
    })
    .into_response())
}

#[axum::debug_handler]
pub async fn daily_attendance(
    State(state): State<AppState>,
    Path(user_id): Path<uuid::Uuid>,
    Query(query): Query<DailyAttendanceQuery>,
) -> Result<Response> {
    let user = state.user_service.get_user_by_id(user_id).await?;
    let (in_event, out_event) = state
        .attendance_service
        .daily_pair(user_id, query.date)
        .await?;

    let total_hours = match (&in_event, &out_event) {
        (Some(i), Some(o)) => {
            let duration = working_hours::elapsed(i.device_time, o.device_time);
            Some(format_hours_minutes(duration.hours))
        }
        _ => None,
    };

    Ok(Json(DailyAttendanceResponse {
        date: query.date,
        user: DailyUserSummary {
            name: user.name,
            email: user.email,
        },
        in_event,
        out_event,
        total_hours,
    })
    .into_response())
}
