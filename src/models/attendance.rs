use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A single check-in or check-out, append-only once accepted by the gate.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AttendanceEvent {
    pub id: Uuid,
    pub user_id: Uuid,
    pub event_type: String,
    pub latitude: f64,
    pub longitude: f64,
    pub location_accuracy: Option<f64>,
    /// Server-corrected instant. The client's own claim, if any, lives in
    /// `client_reported_time` and carries no authority.
    pub device_time: DateTime<Utc>,
    pub client_reported_time: Option<DateTime<Utc>>,
    pub server_time: DateTime<Utc>,
    pub device_id: String,
    pub address: Option<String>,
    pub battery_percentage: Option<f64>,
    pub network_type: Option<String>,
    pub remarks: Option<String>,
    pub inside_geofence: bool,
    pub working_hours: Option<f64>,
    pub status: Option<String>,
    pub ip_address: Option<String>,
    /// Calendar day in the configured reference offset; IN/OUT uniqueness
    /// is enforced per (user_id, event_type, attendance_date).
    pub attendance_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AttendanceType {
    In,
    Out,
}

impl AttendanceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceType::In => "IN",
            AttendanceType::Out => "OUT",
        }
    }
}

impl std::fmt::Display for AttendanceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification written onto OUT events only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Present,
    HalfDay,
    FullDay,
    Absent,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::HalfDay => "Half Day",
            AttendanceStatus::FullDay => "Full Day",
            AttendanceStatus::Absent => "Absent",
        }
    }
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
