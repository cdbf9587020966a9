use actix_web::{HttpResponse, Responder, web};
use sqlx::MySqlPool;

use crate::model::settings::PayrollSettings;

/// Get the payroll settings document
#[utoipa::path(
    get,
    path = "/api/v1/settings",
    responses(
        (status = 200, body = PayrollSettings),
        (status = 404, description = "Settings not configured yet")
    ),
    tag = "Settings"
)]
pub async fn get_settings(pool: web::Data<MySqlPool>) -> actix_web::Result<impl Responder> {
    let settings = sqlx::query_as::<_, PayrollSettings>(
        r#"
        SELECT insurance_rate, monthly_housing_allowance, monthly_food_allowance,
               per_child_allowance, marriage_allowance, monthly_seniority_base, tax_brackets
        FROM payroll_settings
        WHERE id = 1
        "#,
    )
    .fetch_optional(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "Failed to fetch payroll settings");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    match settings {
        Some(s) => Ok(HttpResponse::Ok().json(s)),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({
            "message": "Payroll settings have not been configured"
        }))),
    }
}

/// Replace the payroll settings document
#[utoipa::path(
    put,
    path = "/api/v1/settings",
    request_body = PayrollSettings,
    responses(
        (status = 200, description = "Settings saved"),
        (status = 400, description = "Invalid settings"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Settings"
)]
pub async fn update_settings(
    pool: web::Data<MySqlPool>,
    payload: web::Json<PayrollSettings>,
) -> actix_web::Result<impl Responder> {
    if let Err(message) = validate(&payload) {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": message
        })));
    }

    sqlx::query(
        r#"
        INSERT INTO payroll_settings
        (id, insurance_rate, monthly_housing_allowance, monthly_food_allowance,
         per_child_allowance, marriage_allowance, monthly_seniority_base, tax_brackets)
        VALUES (1, ?, ?, ?, ?, ?, ?, ?)
        ON DUPLICATE KEY UPDATE
            insurance_rate = VALUES(insurance_rate),
            monthly_housing_allowance = VALUES(monthly_housing_allowance),
            monthly_food_allowance = VALUES(monthly_food_allowance),
            per_child_allowance = VALUES(per_child_allowance),
            marriage_allowance = VALUES(marriage_allowance),
            monthly_seniority_base = VALUES(monthly_seniority_base),
            tax_brackets = VALUES(tax_brackets)
        "#,
    )
    .bind(payload.insurance_rate)
    .bind(payload.monthly_housing_allowance)
    .bind(payload.monthly_food_allowance)
    .bind(payload.per_child_allowance)
    .bind(payload.marriage_allowance)
    .bind(payload.monthly_seniority_base)
    .bind(payload.tax_brackets.clone())
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "Failed to store payroll settings");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Settings saved successfully"
    })))
}

fn validate(settings: &PayrollSettings) -> Result<(), String> {
    if !(0.0..=100.0).contains(&settings.insurance_rate) {
        return Err("insurance_rate must be between 0 and 100".to_string());
    }

    let amounts = [
        ("monthly_housing_allowance", settings.monthly_housing_allowance),
        ("monthly_food_allowance", settings.monthly_food_allowance),
        ("per_child_allowance", settings.per_child_allowance),
        ("marriage_allowance", settings.marriage_allowance),
        ("monthly_seniority_base", settings.monthly_seniority_base),
    ];
    for (name, amount) in amounts {
        if amount < 0.0 {
            return Err(format!("{name} must not be negative"));
        }
    }

    for bracket in settings.tax_brackets.iter() {
        if bracket.from < 0.0 {
            return Err("tax bracket lower bound must not be negative".to_string());
        }
        if bracket.rate < 0.0 {
            return Err("tax bracket rate must not be negative".to_string());
        }
        if let Some(to) = bracket.to {
            if to < bracket.from {
                return Err(
                    "tax bracket upper bound must not be below its lower bound".to_string()
                );
            }
        }
    }

    Ok(())
}

/// Startup probe: payroll computation fails until a settings document is
/// saved, so say so in the log instead of waiting for the first 404.
pub async fn warn_if_unconfigured(pool: &MySqlPool) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM payroll_settings")
        .fetch_one(pool)
        .await?;

    if count == 0 {
        tracing::warn!("No payroll settings document found; save one before computing payrolls");
    } else {
        tracing::info!("Payroll settings present");
    }

    Ok(())
}
