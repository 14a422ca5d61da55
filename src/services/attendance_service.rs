use crate::dto::attendance_dto::MarkAttendanceRequest;
use crate::error::{Error, Result};
use crate::models::attendance::{AttendanceEvent, AttendanceStatus, AttendanceType};
use crate::services::geofence_service::GeofenceService;
use crate::services::user_service::UserService;
use crate::services::working_hours;
use crate::utils::time::{format_hours_minutes, local_date, local_time};
use chrono::{NaiveDate, NaiveTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Policy knobs for the mark-attendance pipeline, all sourced from config.
#[derive(Debug, Clone)]
pub struct GatePolicy {
    /// Latest local wall-clock time at which a check-in is still accepted.
    pub checkin_cutoff: NaiveTime,
    /// Hours that must elapse between IN and OUT unless bypassed.
    pub min_work_hours: f64,
    /// Reference offset for "calendar day" and cutoff comparisons.
    pub timezone_offset_minutes: i32,
}

/// Outcome of the duplicate-IN resolution step. A second IN on the same day
/// is treated as the user forgetting they checked in and becomes an OUT; the
/// reclassification is reported rather than silently rewriting the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeResolution {
    pub final_type: AttendanceType,
    pub reclassified: bool,
}

#[derive(Debug, Clone)]
pub struct MarkOutcome {
    pub event: AttendanceEvent,
    pub inside_office: bool,
    pub reclassified: bool,
    pub message: String,
}

#[derive(Clone)]
pub struct AttendanceService {
    pool: PgPool,
    policy: GatePolicy,
    geofence: GeofenceService,
}

impl AttendanceService {
    pub fn new(pool: PgPool, policy: GatePolicy, geofence: GeofenceService) -> Self {
        Self {
            pool,
            policy,
            geofence,
        }
    }

    /// The attendance gate. Checks run in a fixed order and the first failure
    /// rejects the request with no state change, with one deliberate
    /// exception: a first-use device binding sticks even if a later check
    /// rejects the mark.
    pub async fn mark_attendance(
        &self,
        user_id: Uuid,
        req: MarkAttendanceRequest,
        ip_address: Option<String>,
    ) -> Result<MarkOutcome> {
        let now = Utc::now();
        let device_id = req.device_id.trim().to_string();

        ensure_mandatory(&req, &device_id)?;

        let local_now = local_time(now, self.policy.timezone_offset_minutes);
        check_in_window(req.attendance_type, local_now, self.policy.checkin_cutoff)?;

        let today = local_date(now, self.policy.timezone_offset_minutes);
        let in_event = self.find_event(user_id, AttendanceType::In, today).await?;
        let out_event = self.find_event(user_id, AttendanceType::Out, today).await?;

        let resolution = resolve_event_type(
            req.attendance_type,
            in_event.is_some(),
            out_event.is_some(),
        )?;
        if resolution.reclassified {
            tracing::info!(%user_id, "duplicate IN reclassified to OUT");
        }

        let users = UserService::new(self.pool.clone());
        let user = users.get_user_by_id(user_id).await?;
        let bound_device = match user.device_id {
            Some(existing) => existing,
            None => users.bind_device_if_unset(user_id, &device_id).await?,
        };
        if bound_device != device_id {
            return Err(Error::Forbidden(
                "This device does not match the one registered to your account. Contact an admin to reset it.".to_string(),
            ));
        }

        let proxy_uses = self
            .device_used_by_other_today(&device_id, user_id, today)
            .await?;
        if proxy_uses > 0 {
            return Err(Error::Forbidden(
                "This device has already marked attendance for another account today".to_string(),
            ));
        }

        let inside_office = self.geofence.is_inside(req.latitude, req.longitude);

        let bypass = req.bypass_time_check.unwrap_or(false);
        let (hours, status) = match resolution.final_type {
            AttendanceType::In => (None, None),
            AttendanceType::Out => {
                let anchor = in_event.as_ref().ok_or_else(|| {
                    Error::Internal("IN record missing for OUT computation".to_string())
                })?;
                let duration = working_hours::elapsed(anchor.device_time, now);
                if duration.clamped {
                    tracing::warn!(
                        %user_id,
                        in_event_id = %anchor.id,
                        "OUT precedes stored IN, clamping working hours to zero for review"
                    );
                }
                if duration.hours < self.policy.min_work_hours && !bypass {
                    let remaining = self.policy.min_work_hours - duration.hours;
                    return Err(Error::BadRequest(format!(
                        "Minimum work duration is {} hours. You can check out in {}, or resubmit with the early-checkout override.",
                        self.policy.min_work_hours,
                        format_hours_minutes(remaining),
                    )));
                }
                let status = if duration.hours < self.policy.min_work_hours {
                    // Early checkout via override is created but penalized.
                    AttendanceStatus::Absent
                } else {
                    working_hours::classify(duration.hours)
                };
                (Some(duration.hours), Some(status))
            }
        };

        let event = AttendanceEvent {
            id: Uuid::new_v4(),
            user_id,
            event_type: resolution.final_type.as_str().to_string(),
            latitude: req.latitude,
            longitude: req.longitude,
            location_accuracy: req.location_accuracy,
            device_time: now,
            client_reported_time: req.device_time,
            server_time: now,
            device_id,
            address: req.address,
            battery_percentage: req.battery_percentage,
            network_type: req.network_type,
            remarks: req.remarks,
            inside_geofence: inside_office,
            working_hours: hours,
            status: status.map(|s| s.as_str().to_string()),
            ip_address,
            attendance_date: today,
            created_at: now,
        };

        let inserted = self.insert_event(&event).await?;
        tracing::info!(
            %user_id,
            event_id = %inserted.id,
            event_type = %inserted.event_type,
            inside_office,
            "attendance accepted"
        );

        let message = if resolution.reclassified {
            "Already checked in today, marked OUT instead".to_string()
        } else {
            format!("{} marked successfully", resolution.final_type)
        };

        Ok(MarkOutcome {
            event: inserted,
            inside_office,
            reclassified: resolution.reclassified,
            message,
        })
    }

    pub async fn find_event(
        &self,
        user_id: Uuid,
        event_type: AttendanceType,
        day: NaiveDate,
    ) -> Result<Option<AttendanceEvent>> {
        let event = sqlx::query_as::<_, AttendanceEvent>(
            r#"SELECT * FROM attendance_events
               WHERE user_id = $1 AND event_type = $2 AND attendance_date = $3"#,
        )
        .bind(user_id)
        .bind(event_type.as_str())
        .bind(day)
        .fetch_optional(&self.pool)
        .await?;
        Ok(event)
    }

    pub async fn daily_pair(
        &self,
        user_id: Uuid,
        day: NaiveDate,
    ) -> Result<(Option<AttendanceEvent>, Option<AttendanceEvent>)> {
        let in_event = self.find_event(user_id, AttendanceType::In, day).await?;
        let out_event = self.find_event(user_id, AttendanceType::Out, day).await?;
        Ok((in_event, out_event))
    }

    pub async fn list_events(&self, page: i64, limit: i64) -> Result<(Vec<AttendanceEvent>, i64)> {
        let offset = (page - 1) * limit;
        let rows = sqlx::query_as::<_, AttendanceEvent>(
            r#"SELECT * FROM attendance_events
               ORDER BY created_at DESC
               LIMIT $1 OFFSET $2"#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM attendance_events"#)
            .fetch_one(&self.pool)
            .await?;

        Ok((rows, total))
    }

    async fn device_used_by_other_today(
        &self,
        device_id: &str,
        user_id: Uuid,
        day: NaiveDate,
    ) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM attendance_events
               WHERE device_id = $1 AND user_id <> $2 AND attendance_date = $3"#,
        )
        .bind(device_id)
        .bind(user_id)
        .bind(day)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// The unique index on (user_id, event_type, attendance_date) is the
    /// concurrency backstop for the duplicate checks: a racing insert loses
    /// here and surfaces as the same duplicate rejection.
    async fn insert_event(&self, event: &AttendanceEvent) -> Result<AttendanceEvent> {
        let result = sqlx::query_as::<_, AttendanceEvent>(
            r#"
            INSERT INTO attendance_events (
                id, user_id, event_type, latitude, longitude, location_accuracy,
                device_time, client_reported_time, server_time, device_id,
                address, battery_percentage, network_type, remarks,
                inside_geofence, working_hours, status, ip_address,
                attendance_date, created_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                $11, $12, $13, $14, $15, $16, $17, $18, $19, $20
            )
            RETURNING *
            "#,
        )
        .bind(event.id)
        .bind(event.user_id)
        .bind(&event.event_type)
        .bind(event.latitude)
        .bind(event.longitude)
        .bind(event.location_accuracy)
        .bind(event.device_time)
        .bind(event.client_reported_time)
        .bind(event.server_time)
        .bind(&event.device_id)
        .bind(&event.address)
        .bind(event.battery_percentage)
        .bind(&event.network_type)
        .bind(&event.remarks)
        .bind(event.inside_geofence)
        .bind(event.working_hours)
        .bind(&event.status)
        .bind(&event.ip_address)
        .bind(event.attendance_date)
        .bind(event.created_at)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(row),
            Err(err) => {
                if let sqlx::Error::Database(db_err) = &err {
                    if db_err.code().as_deref() == Some("23505") {
                        let message = if event.event_type == AttendanceType::In.as_str() {
                            "Already checked in today"
                        } else {
                            "Already checked out for today"
                        };
                        return Err(Error::BadRequest(message.to_string()));
                    }
                }
                Err(err.into())
            }
        }
    }
}

fn ensure_mandatory(req: &MarkAttendanceRequest, device_id: &str) -> Result<()> {
    if !req.latitude.is_finite() || !req.longitude.is_finite() {
        return Err(Error::BadRequest("Mandatory fields missing".to_string()));
    }
    if device_id.is_empty() {
        return Err(Error::BadRequest("Mandatory fields missing".to_string()));
    }
    Ok(())
}

fn check_in_window(
    requested: AttendanceType,
    local_now: NaiveTime,
    cutoff: NaiveTime,
) -> Result<()> {
    if requested == AttendanceType::In && local_now > cutoff {
        return Err(Error::BadRequest(format!(
            "Check-in is closed after {} for today",
            cutoff.format("%H:%M"),
        )));
    }
    Ok(())
}

fn resolve_event_type(
    requested: AttendanceType,
    has_in: bool,
    has_out: bool,
) -> Result<TypeResolution> {
    let resolution = match requested {
        AttendanceType::In if has_in => TypeResolution {
            final_type: AttendanceType::Out,
            reclassified: true,
        },
        other => TypeResolution {
            final_type: other,
            reclassified: false,
        },
    };

    if resolution.final_type == AttendanceType::Out {
        if !has_in {
            return Err(Error::BadRequest(
                "You must check IN before OUT".to_string(),
            ));
        }
        if has_out {
            return Err(Error::BadRequest(
                "Already checked out for today".to_string(),
            ));
        }
    }

    Ok(resolution)
}
