use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::attendance::{AttendanceRecord, AttendanceStatus};

/// A single-field attendance edit. The edit surface sends one of these per
/// keystroke-level change; the resolver folds it into a consistent record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum FieldUpdate {
    Status(AttendanceStatus),
    EntryTime(String),
    ExitTime(String),
}

/// Folds one field edit into the day's record.
///
/// A non-empty entry or exit time marks the day present; marking the day
/// absent wipes both times and the late flag. Lateness is recomputed on
/// entry edits only, by plain string comparison against the "HH:MM"
/// threshold (strictly greater means late), so a malformed value is stored
/// verbatim and never aborts the edit.
pub fn resolve(
    existing: Option<&AttendanceRecord>,
    date: NaiveDate,
    personnel_id: u64,
    update: &FieldUpdate,
    late_threshold: &str,
) -> AttendanceRecord {
    let mut record = existing
        .cloned()
        .unwrap_or_else(|| AttendanceRecord::blank(date, personnel_id));

    match update {
        FieldUpdate::Status(status) => {
            record.status = *status;
            if *status == AttendanceStatus::Absent {
                record.entry_time.clear();
                record.exit_time.clear();
                record.is_late = false;
            }
        }
        FieldUpdate::EntryTime(value) => {
            record.entry_time = value.clone();
            if !value.is_empty() {
                record.status = AttendanceStatus::Present;
            }
            record.is_late = record.entry_time.as_str() > late_threshold;
        }
        FieldUpdate::ExitTime(value) => {
            record.exit_time = value.clone();
            if !value.is_empty() {
                record.status = AttendanceStatus::Present;
            }
        }
    }

    record
}
