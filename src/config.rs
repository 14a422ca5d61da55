use crate::error::{Error, Result};
use chrono::NaiveTime;
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: String,
    pub jwt_secret: String,
    pub office_latitude: f64,
    pub office_longitude: f64,
    pub geofence_radius_meters: f64,
    pub checkin_cutoff: NaiveTime,
    pub min_work_hours: f64,
    pub timezone_offset_minutes: i32,
    pub employee_rps: u32,
    pub admin_rps: u32,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_address: get_env("SERVER_ADDRESS")?,
            database_url: get_env("DATABASE_URL")?,
            jwt_secret: get_env("JWT_SECRET")?,
            office_latitude: get_env_parse("OFFICE_LATITUDE")?,
            office_longitude: get_env_parse("OFFICE_LONGITUDE")?,
            geofence_radius_meters: get_env_parse("GEOFENCE_RADIUS_METERS")?,
            checkin_cutoff: parse_cutoff(&get_env("CHECKIN_CUTOFF")?)?,
            min_work_hours: get_env_parse("MIN_WORK_HOURS")?,
            timezone_offset_minutes: get_env_parse("TIMEZONE_OFFSET_MINUTES")?,
            employee_rps: get_env_parse("EMPLOYEE_RPS")?,
            admin_rps: get_env_parse("ADMIN_RPS")?,
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_parse<T>(name: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = get_env(name)?;
    raw.parse()
        .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e)))
}

fn parse_cutoff(raw: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .map_err(|e| Error::Config(format!("Invalid value for CHECKIN_CUTOFF: {}", e)))
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cutoff_parses_hours_and_minutes() {
        let t = parse_cutoff("12:30").unwrap();
        assert_eq!(t, NaiveTime::from_hms_opt(12, 30, 0).unwrap());
    }

    #[test]
    fn cutoff_rejects_garbage() {
        assert!(parse_cutoff("half past noon").is_err());
    }
}
