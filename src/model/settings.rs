use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use utoipa::ToSchema;

/// One income range of the progressive tax table. `to = null` marks the
/// unbounded top bracket; it absorbs all income above `from`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TaxBracket {
    #[schema(example = 0.0)]
    pub from: f64,

    #[schema(example = 120000000.0, nullable = true)]
    pub to: Option<f64>,

    #[schema(example = 10.0)]
    pub rate: f64,
}

impl TaxBracket {
    pub fn is_unbounded(&self) -> bool {
        self.to.is_none()
    }
}

/// The single payroll configuration document. Mutable through the settings
/// endpoint, but every computation works on the snapshot it fetched — a
/// settings edit mid-run cannot produce a mixed result.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct PayrollSettings {
    #[schema(example = 7.0)]
    pub insurance_rate: f64,

    #[schema(example = 900000.0)]
    pub monthly_housing_allowance: f64,

    #[schema(example = 1100000.0)]
    pub monthly_food_allowance: f64,

    #[schema(example = 450000.0)]
    pub per_child_allowance: f64,

    #[schema(example = 300000.0)]
    pub marriage_allowance: f64,

    #[schema(example = 210000.0)]
    pub monthly_seniority_base: f64,

    #[schema(value_type = Vec<TaxBracket>)]
    pub tax_brackets: Json<Vec<TaxBracket>>,
}
