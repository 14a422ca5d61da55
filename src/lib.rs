pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::services::attendance_service::{AttendanceService, GatePolicy};
use crate::services::geofence_service::GeofenceService;
use crate::services::user_service::UserService;
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub attendance_service: AttendanceService,
    pub user_service: UserService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let config = crate::config::get_config();

        let geofence = GeofenceService::new(
            config.office_latitude,
            config.office_longitude,
            config.geofence_radius_meters,
        );
        let policy = GatePolicy {
            checkin_cutoff: config.checkin_cutoff,
            min_work_hours: config.min_work_hours,
            timezone_offset_minutes: config.timezone_offset_minutes,
        };

        let attendance_service = AttendanceService::new(pool.clone(), policy, geofence);
        let user_service = UserService::new(pool.clone());

        Self {
            pool,
            attendance_service,
            user_service,
        }
    }
}
