use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;
use utoipa::{IntoParams, ToSchema};

use crate::config::Config;
use crate::engine::hours::{aggregate_hours, month_range};
use crate::engine::payslip::{Payslip, PayrollDocument, assemble, render_payslip};
use crate::engine::rules::compute_payroll;
use crate::model::attendance::AttendanceRecord;
use crate::model::payroll::Payroll;
use crate::model::personnel::Personnel;
use crate::model::settings::PayrollSettings;

#[derive(Deserialize, ToSchema)]
pub struct ComputePayroll {
    #[schema(example = 1001)]
    pub personnel_id: u64,

    #[schema(example = "2026-08")]
    pub month: String,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct PayrollQuery {
    #[schema(example = 1)]
    pub page: Option<u32>,

    #[schema(example = 10)]
    pub per_page: Option<u32>,

    #[schema(example = 1001)]
    pub personnel_id: Option<u64>,

    #[schema(example = "2026-08")]
    pub month: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct PaginatedPayrollResponse {
    pub data: Vec<Payroll>,
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
}

/// Compute and persist a payroll document for one personnel-month
#[utoipa::path(
    post,
    path = "/api/v1/payroll",
    request_body = ComputePayroll,
    responses(
        (status = 201, description = "Payroll document created", body = PayrollDocument),
        (status = 400, description = "Malformed month"),
        (status = 404, description = "Personnel profile or payroll settings missing"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Payroll"
)]
pub async fn create_payroll(
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
    payload: web::Json<ComputePayroll>,
) -> actix_web::Result<impl Responder> {
    let Some((start, end)) = month_range(&payload.month) else {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": "month must be formatted as YYYY-MM"
        })));
    };

    let personnel = sqlx::query_as::<_, Personnel>("SELECT * FROM personnel WHERE id = ?")
        .bind(payload.personnel_id)
        .fetch_optional(pool.get_ref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, personnel_id = payload.personnel_id, "Failed to fetch personnel profile");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

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

    let records = sqlx::query_as::<_, AttendanceRecord>(
        r#"
        SELECT date, personnel_id, status, entry_time, exit_time, is_late
        FROM attendance
        WHERE personnel_id = ? AND date BETWEEN ? AND ?
        "#,
    )
    .bind(payload.personnel_id)
    .bind(start)
    .bind(end)
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, personnel_id = payload.personnel_id, "Failed to fetch attendance range");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let hours = aggregate_hours(&records, start, end);

    let breakdown = match compute_payroll(
        hours,
        personnel.as_ref(),
        settings.as_ref(),
        &config.engine,
    ) {
        Ok(breakdown) => breakdown,
        Err(e) => {
            tracing::warn!(
                error = %e,
                personnel_id = payload.personnel_id,
                month = %payload.month,
                "Payroll computation aborted"
            );
            return Ok(HttpResponse::NotFound().json(serde_json::json!({
                "message": e.to_string()
            })));
        }
    };

    let document = assemble(breakdown, payload.personnel_id, &payload.month);

    sqlx::query(
        r#"
        INSERT INTO payroll
        (reference, personnel_id, month, base_salary, housing_allowance, food_allowance,
         child_allowance, marriage_allowance, seniority_pay, overtime_hours, overtime_pay,
         total_earnings, insurance_deduction, tax_deduction, total_deductions, net_pay, pay_date)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&document.reference)
    .bind(document.personnel_id)
    .bind(&document.month)
    .bind(document.breakdown.base_salary)
    .bind(document.breakdown.housing_allowance)
    .bind(document.breakdown.food_allowance)
    .bind(document.breakdown.child_allowance)
    .bind(document.breakdown.marriage_allowance)
    .bind(document.breakdown.seniority_pay)
    .bind(document.breakdown.overtime_hours)
    .bind(document.breakdown.overtime_pay)
    .bind(document.breakdown.total_earnings)
    .bind(document.breakdown.insurance_deduction)
    .bind(document.breakdown.tax_deduction)
    .bind(document.breakdown.total_deductions)
    .bind(document.breakdown.net_pay)
    .bind(document.pay_date)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, personnel_id = document.personnel_id, "Failed to store payroll document");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    tracing::info!(
        reference = %document.reference,
        personnel_id = document.personnel_id,
        month = %document.month,
        net_pay = document.breakdown.net_pay,
        "Payroll document created"
    );

    Ok(HttpResponse::Created().json(document))
}

/// Get one payroll document
#[utoipa::path(
    get,
    path = "/api/v1/payroll/{payroll_id}",
    params(
        ("payroll_id", description = "Payroll ID")
    ),
    responses(
        (status = 200, body = Payroll),
        (status = 404, description = "Payroll not found")
    ),
    tag = "Payroll"
)]
pub async fn get_payroll(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let payroll_id = path.into_inner();

    let payroll = sqlx::query_as::<_, Payroll>("SELECT * FROM payroll WHERE id = ?")
        .bind(payroll_id)
        .fetch_optional(pool.get_ref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, payroll_id, "Failed to fetch payroll");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    match payroll {
        Some(p) => Ok(HttpResponse::Ok().json(p)),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({
            "message": "Payroll not found"
        }))),
    }
}

/// List payroll documents
#[utoipa::path(
    get,
    path = "/api/v1/payroll",
    params(PayrollQuery),
    responses(
        (status = 200, body = PaginatedPayrollResponse)
    ),
    tag = "Payroll"
)]
pub async fn list_payrolls(
    pool: web::Data<MySqlPool>,
    query: web::Query<PayrollQuery>,
) -> actix_web::Result<impl Responder> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(10).clamp(1, 100);
    let offset = (page - 1) * per_page;

    let mut conditions = Vec::new();
    if query.personnel_id.is_some() {
        conditions.push("personnel_id = ?");
    }
    if query.month.is_some() {
        conditions.push("month = ?");
    }
    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    let count_sql = format!("SELECT COUNT(*) FROM payroll {}", where_clause);
    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
    if let Some(personnel_id) = query.personnel_id {
        count_query = count_query.bind(personnel_id);
    }
    if let Some(month) = &query.month {
        count_query = count_query.bind(month.clone());
    }
    let total = count_query.fetch_one(pool.get_ref()).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to count payrolls");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    // Latest computation first; superseded runs for the same month follow.
    let data_sql = format!(
        "SELECT * FROM payroll {} ORDER BY pay_date DESC LIMIT ? OFFSET ?",
        where_clause
    );
    let mut data_query = sqlx::query_as::<_, Payroll>(&data_sql);
    if let Some(personnel_id) = query.personnel_id {
        data_query = data_query.bind(personnel_id);
    }
    if let Some(month) = &query.month {
        data_query = data_query.bind(month.clone());
    }
    let data = data_query
        .bind(per_page as i64)
        .bind(offset as i64)
        .fetch_all(pool.get_ref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to fetch payroll list");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(PaginatedPayrollResponse {
        data,
        page,
        per_page,
        total,
    }))
}

/// Render the payslip view of a payroll document
#[utoipa::path(
    get,
    path = "/api/v1/payroll/{payroll_id}/payslip",
    params(
        ("payroll_id", description = "Payroll ID")
    ),
    responses(
        (status = 200, body = Payslip),
        (status = 404, description = "Payroll not found")
    ),
    tag = "Payroll"
)]
pub async fn get_payslip(
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let payroll_id = path.into_inner();

    let payroll = sqlx::query_as::<_, Payroll>("SELECT * FROM payroll WHERE id = ?")
        .bind(payroll_id)
        .fetch_optional(pool.get_ref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, payroll_id, "Failed to fetch payroll");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    let Some(payroll) = payroll else {
        return Ok(HttpResponse::NotFound().json(serde_json::json!({
            "message": "Payroll not found"
        })));
    };

    let personnel_name = sqlx::query_as::<_, (String, String)>(
        "SELECT first_name, last_name FROM personnel WHERE id = ?",
    )
    .bind(payroll.personnel_id)
    .fetch_optional(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, payroll_id, "Failed to fetch personnel name");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?
    .map(|(first, last)| format!("{} {}", first, last));

    let payslip = render_payslip(&payroll, personnel_name, &config.currency_label);

    Ok(HttpResponse::Ok().json(payslip))
}
