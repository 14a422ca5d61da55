use crate::models::attendance::{AttendanceEvent, AttendanceType};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of POST /api/attendance/mark. `device_time` is advisory telemetry;
/// the server clock is authoritative for everything stored.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MarkAttendanceRequest {
    pub attendance_type: AttendanceType,
    pub latitude: f64,
    pub longitude: f64,
    #[validate(length(min = 1, max = 128))]
    pub device_id: String,
    pub device_time: Option<chrono::DateTime<chrono::Utc>>,
    pub location_accuracy: Option<f64>,
    #[validate(length(max = 512))]
    pub address: Option<String>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub battery_percentage: Option<f64>,
    #[validate(length(max = 64))]
    pub network_type: Option<String>,
    #[validate(length(max = 1024))]
    pub remarks: Option<String>,
    /// Early-checkout escape hatch: creates the OUT event before the minimum
    /// work duration, with status forced to "Absent".
    pub bypass_time_check: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkAttendanceResponse {
    pub message: String,
    pub inside_office: bool,
    pub data: AttendanceEvent,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListAttendanceQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListAttendanceResponse {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub records: Vec<AttendanceEvent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailyAttendanceQuery {
    /// YYYY-MM-DD
    pub date: chrono::NaiveDate,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyAttendanceResponse {
    pub date: chrono::NaiveDate,
    pub user: DailyUserSummary,
    #[serde(rename = "in")]
    pub in_event: Option<AttendanceEvent>,
    #[serde(rename = "out")]
    pub out_event: Option<AttendanceEvent>,
    /// "Xh Ym" when both events exist.
    pub total_hours: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyUserSummary {
    pub name: String,
    pub email: String,
}
