use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use sqlx::MySqlPool;
use tracing::error;
use utoipa::ToSchema;

use crate::model::stakeholder::Stakeholder;

#[derive(Deserialize, ToSchema)]
pub struct CreateStakeholder {
    #[schema(example = "Dariush Khan")]
    pub full_name: String,

    #[schema(example = "owner")]
    pub relation: String,

    #[schema(example = "+989121234567", nullable = true)]
    pub phone: Option<String>,

    #[schema(example = "dariush@example.com", nullable = true)]
    pub email: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateStakeholder {
    pub full_name: Option<String>,
    pub relation: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Register a stakeholder
#[utoipa::path(
    post,
    path = "/api/v1/stakeholders",
    request_body = CreateStakeholder,
    responses(
        (status = 201, description = "Stakeholder created"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Stakeholder"
)]
pub async fn create_stakeholder(
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateStakeholder>,
) -> actix_web::Result<impl Responder> {
    let result = sqlx::query(
        "INSERT INTO stakeholders (full_name, relation, phone, email) VALUES (?, ?, ?, ?)",
    )
    .bind(&payload.full_name)
    .bind(&payload.relation)
    .bind(&payload.phone)
    .bind(&payload.email)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to create stakeholder");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "Stakeholder created successfully",
        "id": result.last_insert_id()
    })))
}

/// List stakeholders
#[utoipa::path(
    get,
    path = "/api/v1/stakeholders",
    responses(
        (status = 200, body = Vec<Stakeholder>)
    ),
    tag = "Stakeholder"
)]
pub async fn list_stakeholders(pool: web::Data<MySqlPool>) -> actix_web::Result<impl Responder> {
    let stakeholders = sqlx::query_as::<_, Stakeholder>("SELECT * FROM stakeholders ORDER BY id")
        .fetch_all(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to fetch stakeholder list");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(stakeholders))
}

/// Get a stakeholder
#[utoipa::path(
    get,
    path = "/api/v1/stakeholders/{stakeholder_id}",
    params(
        ("stakeholder_id", description = "Stakeholder ID")
    ),
    responses(
        (status = 200, body = Stakeholder),
        (status = 404, description = "Stakeholder not found")
    ),
    tag = "Stakeholder"
)]
pub async fn get_stakeholder(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let stakeholder_id = path.into_inner();

    let stakeholder = sqlx::query_as::<_, Stakeholder>("SELECT * FROM stakeholders WHERE id = ?")
        .bind(stakeholder_id)
        .fetch_optional(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, stakeholder_id, "Failed to fetch stakeholder");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    match stakeholder {
        Some(s) => Ok(HttpResponse::Ok().json(s)),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({
            "message": "Stakeholder not found"
        }))),
    }
}

/// Update a stakeholder
#[utoipa::path(
    put,
    path = "/api/v1/stakeholders/{stakeholder_id}",
    params(
        ("stakeholder_id", description = "Stakeholder ID")
    ),
    request_body = UpdateStakeholder,
    responses(
        (status = 200, description = "Stakeholder updated"),
        (status = 404, description = "Stakeholder not found")
    ),
    tag = "Stakeholder"
)]
pub async fn update_stakeholder(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    body: web::Json<UpdateStakeholder>,
) -> actix_web::Result<impl Responder> {
    let stakeholder_id = path.into_inner();

    let current = sqlx::query_as::<_, Stakeholder>("SELECT * FROM stakeholders WHERE id = ?")
        .bind(stakeholder_id)
        .fetch_optional(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, stakeholder_id, "Failed to fetch stakeholder");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    let Some(current) = current else {
        return Ok(HttpResponse::NotFound().json(serde_json::json!({
            "message": "Stakeholder not found"
        })));
    };

    let full_name = body.full_name.clone().unwrap_or(current.full_name);
    let relation = body.relation.clone().unwrap_or(current.relation);
    let phone = body.phone.clone().or(current.phone);
    let email = body.email.clone().or(current.email);

    sqlx::query(
        "UPDATE stakeholders SET full_name = ?, relation = ?, phone = ?, email = ? WHERE id = ?",
    )
    .bind(full_name)
    .bind(relation)
    .bind(phone)
    .bind(email)
    .bind(stakeholder_id)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, stakeholder_id, "Failed to update stakeholder");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Stakeholder updated successfully"
    })))
}

/// Delete a stakeholder
#[utoipa::path(
    delete,
    path = "/api/v1/stakeholders/{stakeholder_id}",
    params(
        ("stakeholder_id", description = "Stakeholder ID")
    ),
    responses(
        (status = 200, description = "Successfully deleted"),
        (status = 404, description = "Stakeholder not found")
    ),
    tag = "Stakeholder"
)]
pub async fn delete_stakeholder(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let stakeholder_id = path.into_inner();

    let result = sqlx::query("DELETE FROM stakeholders WHERE id = ?")
        .bind(stakeholder_id)
        .execute(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, stakeholder_id, "Failed to delete stakeholder");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    if result.rows_affected() == 0 {
        return Ok(HttpResponse::NotFound().json(serde_json::json!({
            "message": "Stakeholder not found"
        })));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Successfully deleted"
    })))
}
