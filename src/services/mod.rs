pub mod attendance_service;
pub mod geofence_service;
pub mod user_service;
pub mod working_hours;
