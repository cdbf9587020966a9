use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::MySqlPool;
use utoipa::{IntoParams, ToSchema};

use crate::config::Config;
use crate::engine::hours::month_range;
use crate::engine::resolver::{FieldUpdate, resolve};
use crate::model::attendance::AttendanceRecord;

#[derive(Deserialize, ToSchema)]
pub struct AttendanceEdit {
    #[schema(example = "2026-08-01", value_type = String, format = "date")]
    pub date: NaiveDate,

    #[schema(example = 1001)]
    pub personnel_id: u64,

    #[schema(example = json!({ "field": "entry_time", "value": "09:15" }))]
    pub update: FieldUpdate,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct AttendanceQuery {
    #[schema(example = 1001)]
    pub personnel_id: u64,

    #[schema(example = "2026-08")]
    pub month: String,
}

/// Apply a single-field attendance edit
#[utoipa::path(
    post,
    path = "/api/v1/attendance",
    request_body = AttendanceEdit,
    responses(
        (status = 200, description = "Resolved attendance record", body = AttendanceRecord),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn edit_attendance(
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
    payload: web::Json<AttendanceEdit>,
) -> actix_web::Result<impl Responder> {
    let existing = sqlx::query_as::<_, AttendanceRecord>(
        r#"
        SELECT date, personnel_id, status, entry_time, exit_time, is_late
        FROM attendance
        WHERE date = ? AND personnel_id = ?
        "#,
    )
    .bind(payload.date)
    .bind(payload.personnel_id)
    .fetch_optional(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, personnel_id = payload.personnel_id, "Failed to fetch attendance record");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let record = resolve(
        existing.as_ref(),
        payload.date,
        payload.personnel_id,
        &payload.update,
        &config.engine.late_threshold,
    );

    // One row per (date, personnel); the edit is a merge, last write wins.
    sqlx::query(
        r#"
        INSERT INTO attendance (date, personnel_id, status, entry_time, exit_time, is_late)
        VALUES (?, ?, ?, ?, ?, ?)
        ON DUPLICATE KEY UPDATE
            status = VALUES(status),
            entry_time = VALUES(entry_time),
            exit_time = VALUES(exit_time),
            is_late = VALUES(is_late)
        "#,
    )
    .bind(record.date)
    .bind(record.personnel_id)
    .bind(record.status)
    .bind(&record.entry_time)
    .bind(&record.exit_time)
    .bind(record.is_late)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, personnel_id = record.personnel_id, "Failed to store attendance record");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    tracing::debug!(
        date = %record.date,
        personnel_id = record.personnel_id,
        status = %record.status,
        is_late = record.is_late,
        "Attendance record resolved"
    );

    Ok(HttpResponse::Ok().json(record))
}

/// List a personnel's attendance for one month
#[utoipa::path(
    get,
    path = "/api/v1/attendance",
    params(AttendanceQuery),
    responses(
        (status = 200, description = "Attendance records for the month", body = Vec<AttendanceRecord>),
        (status = 400, description = "Malformed month"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(
    pool: web::Data<MySqlPool>,
    query: web::Query<AttendanceQuery>,
) -> actix_web::Result<impl Responder> {
    let Some((start, end)) = month_range(&query.month) else {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": "month must be formatted as YYYY-MM"
        })));
    };

    let records = sqlx::query_as::<_, AttendanceRecord>(
        r#"
        SELECT date, personnel_id, status, entry_time, exit_time, is_late
        FROM attendance
        WHERE personnel_id = ? AND date BETWEEN ? AND ?
        ORDER BY date
        "#,
    )
    .bind(query.personnel_id)
    .bind(start)
    .bind(end)
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, personnel_id = query.personnel_id, "Failed to fetch attendance list");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(records))
}
