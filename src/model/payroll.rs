use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A computed payroll document. Immutable once created; recomputation for
/// the same month inserts a new row with a fresh reference.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Payroll {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "7f0f2a34-9f1d-4a9e-8d1c-1f1d9b5a2c77")]
    pub reference: String,

    #[schema(example = 1001)]
    pub personnel_id: u64,

    #[schema(example = "2026-08")]
    pub month: String,

    #[schema(example = 9600000.0)]
    pub base_salary: f64,

    #[schema(example = 900000.0)]
    pub housing_allowance: f64,

    #[schema(example = 1100000.0)]
    pub food_allowance: f64,

    #[schema(example = 900000.0)]
    pub child_allowance: f64,

    #[schema(example = 300000.0)]
    pub marriage_allowance: f64,

    #[schema(example = 210000.0)]
    pub seniority_pay: f64,

    #[schema(example = 8.0)]
    pub overtime_hours: f64,

    #[schema(example = 560000.0)]
    pub overtime_pay: f64,

    #[schema(example = 13570000.0)]
    pub total_earnings: f64,

    #[schema(example = 949900.0)]
    pub insurance_deduction: f64,

    #[schema(example = 380000.0)]
    pub tax_deduction: f64,

    #[schema(example = 1329900.0)]
    pub total_deductions: f64,

    #[schema(example = 12240100.0)]
    pub net_pay: f64,

    #[schema(example = "2026-09-01T08:00:00Z", value_type = String, format = "date-time")]
    pub pay_date: DateTime<Utc>,
}
