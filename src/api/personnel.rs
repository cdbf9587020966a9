use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;
use tracing::error;
use utoipa::{IntoParams, ToSchema};

use crate::model::personnel::Personnel;

#[derive(Deserialize, ToSchema)]
pub struct CreatePersonnel {
    #[schema(example = "Sara")]
    pub first_name: String,

    #[schema(example = "Moradi")]
    pub last_name: String,

    #[schema(example = "+989121234567", nullable = true)]
    pub phone: Option<String>,

    #[schema(example = "housekeeper")]
    pub duty: String,

    #[schema(example = 3, nullable = true)]
    pub villa_id: Option<u64>,

    #[schema(example = 9600000.0)]
    pub base_salary: f64,

    #[serde(default)]
    #[schema(example = 2)]
    pub number_of_children: u32,

    #[serde(default)]
    #[schema(example = true)]
    pub is_married: bool,

    #[schema(example = "2024-03-01", value_type = String, format = "date")]
    pub hire_date: NaiveDate,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdatePersonnel {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub duty: Option<String>,
    pub villa_id: Option<u64>,
    pub base_salary: Option<f64>,
    pub number_of_children: Option<u32>,
    pub is_married: Option<bool>,
    #[schema(example = "2024-03-01", value_type = String, format = "date")]
    pub hire_date: Option<NaiveDate>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct PersonnelQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub duty: Option<String>,
    pub villa_id: Option<u64>,
    pub status: Option<String>,
    pub search: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct PersonnelListResponse {
    pub data: Vec<Personnel>,
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
}

/// Create a personnel profile
#[utoipa::path(
    post,
    path = "/api/v1/personnel",
    request_body = CreatePersonnel,
    responses(
        (status = 201, description = "Personnel created"),
        (status = 400, description = "Invalid profile"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Personnel"
)]
pub async fn create_personnel(
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreatePersonnel>,
) -> actix_web::Result<impl Responder> {
    if payload.base_salary < 0.0 {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": "base_salary must not be negative"
        })));
    }

    let result = sqlx::query(
        r#"
        INSERT INTO personnel
        (first_name, last_name, phone, duty, villa_id, base_salary,
         number_of_children, is_married, hire_date, status)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 'active')
        "#,
    )
    .bind(&payload.first_name)
    .bind(&payload.last_name)
    .bind(&payload.phone)
    .bind(&payload.duty)
    .bind(payload.villa_id)
    .bind(payload.base_salary)
    .bind(payload.number_of_children)
    .bind(payload.is_married)
    .bind(payload.hire_date)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to create personnel");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "Personnel created successfully",
        "id": result.last_insert_id()
    })))
}

/// List personnel
#[utoipa::path(
    get,
    path = "/api/v1/personnel",
    params(PersonnelQuery),
    responses(
        (status = 200, description = "Paginated personnel list", body = PersonnelListResponse)
    ),
    tag = "Personnel"
)]
pub async fn list_personnel(
    pool: web::Data<MySqlPool>,
    query: web::Query<PersonnelQuery>,
) -> actix_web::Result<impl Responder> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
    let offset = (page - 1) * per_page;

    let mut conditions = Vec::new();
    if query.duty.is_some() {
        conditions.push("duty = ?");
    }
    if query.villa_id.is_some() {
        conditions.push("villa_id = ?");
    }
    if query.status.is_some() {
        conditions.push("status = ?");
    }
    if query.search.is_some() {
        conditions.push("(first_name LIKE ? OR last_name LIKE ?)");
    }
    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };
    let like = query.search.as_ref().map(|s| format!("%{}%", s));

    let count_sql = format!("SELECT COUNT(*) FROM personnel {}", where_clause);
    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
    if let Some(duty) = &query.duty {
        count_query = count_query.bind(duty.clone());
    }
    if let Some(villa_id) = query.villa_id {
        count_query = count_query.bind(villa_id);
    }
    if let Some(status) = &query.status {
        count_query = count_query.bind(status.clone());
    }
    if let Some(like) = &like {
        count_query = count_query.bind(like.clone()).bind(like.clone());
    }
    let total = count_query.fetch_one(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, "Failed to count personnel");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let data_sql = format!(
        "SELECT * FROM personnel {} ORDER BY id DESC LIMIT ? OFFSET ?",
        where_clause
    );
    let mut data_query = sqlx::query_as::<_, Personnel>(&data_sql);
    if let Some(duty) = &query.duty {
        data_query = data_query.bind(duty.clone());
    }
    if let Some(villa_id) = query.villa_id {
        data_query = data_query.bind(villa_id);
    }
    if let Some(status) = &query.status {
        data_query = data_query.bind(status.clone());
    }
    if let Some(like) = &like {
        data_query = data_query.bind(like.clone()).bind(like.clone());
    }
    let data = data_query
        .bind(per_page as i64)
        .bind(offset as i64)
        .fetch_all(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to fetch personnel list");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(PersonnelListResponse {
        data,
        page,
        per_page,
        total,
    }))
}

/// Get a personnel profile
#[utoipa::path(
    get,
    path = "/api/v1/personnel/{personnel_id}",
    params(
        ("personnel_id", description = "Personnel ID")
    ),
    responses(
        (status = 200, body = Personnel),
        (status = 404, description = "Personnel not found")
    ),
    tag = "Personnel"
)]
pub async fn get_personnel(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let personnel_id = path.into_inner();

    let personnel = sqlx::query_as::<_, Personnel>("SELECT * FROM personnel WHERE id = ?")
        .bind(personnel_id)
        .fetch_optional(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, personnel_id, "Failed to fetch personnel");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    match personnel {
        Some(p) => Ok(HttpResponse::Ok().json(p)),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({
            "message": "Personnel not found"
        }))),
    }
}

/// Update a personnel profile
#[utoipa::path(
    put,
    path = "/api/v1/personnel/{personnel_id}",
    params(
        ("personnel_id", description = "Personnel ID")
    ),
    request_body = UpdatePersonnel,
    responses(
        (status = 200, description = "Personnel updated"),
        (status = 400, description = "Invalid profile"),
        (status = 404, description = "Personnel not found")
    ),
    tag = "Personnel"
)]
pub async fn update_personnel(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    body: web::Json<UpdatePersonnel>,
) -> actix_web::Result<impl Responder> {
    let personnel_id = path.into_inner();

    let current = sqlx::query_as::<_, Personnel>("SELECT * FROM personnel WHERE id = ?")
        .bind(personnel_id)
        .fetch_optional(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, personnel_id, "Failed to fetch personnel");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    let Some(current) = current else {
        return Ok(HttpResponse::NotFound().json(serde_json::json!({
            "message": "Personnel not found"
        })));
    };

    let base_salary = body.base_salary.unwrap_or(current.base_salary);
    if base_salary < 0.0 {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": "base_salary must not be negative"
        })));
    }

    let first_name = body.first_name.clone().unwrap_or(current.first_name);
    let last_name = body.last_name.clone().unwrap_or(current.last_name);
    let phone = body.phone.clone().or(current.phone);
    let duty = body.duty.clone().unwrap_or(current.duty);
    let villa_id = body.villa_id.or(current.villa_id);
    let number_of_children = body.number_of_children.unwrap_or(current.number_of_children);
    let is_married = body.is_married.unwrap_or(current.is_married);
    let hire_date = body.hire_date.unwrap_or(current.hire_date);
    let status = body.status.clone().unwrap_or(current.status);

    sqlx::query(
        r#"
        UPDATE personnel
        SET first_name = ?, last_name = ?, phone = ?, duty = ?, villa_id = ?,
            base_salary = ?, number_of_children = ?, is_married = ?, hire_date = ?, status = ?
        WHERE id = ?
        "#,
    )
    .bind(first_name)
    .bind(last_name)
    .bind(phone)
    .bind(duty)
    .bind(villa_id)
    .bind(base_salary)
    .bind(number_of_children)
    .bind(is_married)
    .bind(hire_date)
    .bind(status)
    .bind(personnel_id)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, personnel_id, "Failed to update personnel");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Personnel updated successfully"
    })))
}

/// Delete a personnel profile
#[utoipa::path(
    delete,
    path = "/api/v1/personnel/{personnel_id}",
    params(
        ("personnel_id", description = "Personnel ID")
    ),
    responses(
        (status = 200, description = "Successfully deleted"),
        (status = 404, description = "Personnel not found")
    ),
    tag = "Personnel"
)]
pub async fn delete_personnel(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let personnel_id = path.into_inner();

    let result = sqlx::query("DELETE FROM personnel WHERE id = ?")
        .bind(personnel_id)
        .execute(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, personnel_id, "Failed to delete personnel");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    if result.rows_affected() == 0 {
        return Ok(HttpResponse::NotFound().json(serde_json::json!({
            "message": "Personnel not found"
        })));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Successfully deleted"
    })))
}
