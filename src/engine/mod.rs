pub mod hours;
pub mod payslip;
pub mod resolver;
pub mod rules;

use thiserror::Error;

pub const DEFAULT_LATE_THRESHOLD: &str = "09:00";
pub const DEFAULT_WORK_HOURS_PER_MONTH: f64 = 192.0;
pub const DEFAULT_OVERTIME_MULTIPLIER: f64 = 1.4;

/// Policy knobs for the attendance and payroll computations. Built once from
/// the environment and handed to the engine per request, so tests can swap
/// any of them without touching globals.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// "HH:MM" cutoff; an entry strictly later than this flags the day late.
    pub late_threshold: String,
    /// Baseline worked hours in a month; everything above is overtime.
    pub work_hours_per_month: f64,
    /// Premium applied to the hourly rate for overtime hours.
    pub overtime_multiplier: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            late_threshold: DEFAULT_LATE_THRESHOLD.to_string(),
            work_hours_per_month: DEFAULT_WORK_HOURS_PER_MONTH,
            overtime_multiplier: DEFAULT_OVERTIME_MULTIPLIER,
        }
    }
}

/// Payroll computation failures. A missing dependency aborts the whole run;
/// nothing is persisted for it.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    #[error("Personnel profile not found")]
    MissingPersonnel,

    #[error("Payroll settings have not been configured")]
    MissingSettings,
}
