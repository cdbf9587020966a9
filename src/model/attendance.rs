use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Display, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    #[default]
    Absent,
}

/// One attendance document per (date, personnel). Times are "HH:MM" strings,
/// empty when not recorded yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct AttendanceRecord {
    #[schema(example = "2026-08-01", value_type = String, format = "date")]
    pub date: NaiveDate,

    #[schema(example = 1001)]
    pub personnel_id: u64,

    #[schema(example = "present")]
    pub status: AttendanceStatus,

    #[schema(example = "09:15")]
    pub entry_time: String,

    #[schema(example = "17:30")]
    pub exit_time: String,

    #[schema(example = true)]
    pub is_late: bool,
}

impl AttendanceRecord {
    /// Blank record for a day nobody has touched yet.
    pub fn blank(date: NaiveDate, personnel_id: u64) -> Self {
        Self {
            date,
            personnel_id,
            status: AttendanceStatus::Absent,
            entry_time: String::new(),
            exit_time: String::new(),
            is_late: false,
        }
    }
}
