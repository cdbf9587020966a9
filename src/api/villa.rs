use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use sqlx::MySqlPool;
use tracing::error;
use utoipa::ToSchema;

use crate::model::villa::Villa;

#[derive(Deserialize, ToSchema)]
pub struct CreateVilla {
    #[schema(example = "Rose Villa")]
    pub name: String,

    #[schema(example = "12 Orchard Lane")]
    pub address: String,

    #[schema(example = "pool heating under repair", nullable = true)]
    pub notes: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateVilla {
    pub name: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

/// Create a villa
#[utoipa::path(
    post,
    path = "/api/v1/villas",
    request_body = CreateVilla,
    responses(
        (status = 201, description = "Villa created"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Villa"
)]
pub async fn create_villa(
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateVilla>,
) -> actix_web::Result<impl Responder> {
    let result = sqlx::query("INSERT INTO villas (name, address, notes) VALUES (?, ?, ?)")
        .bind(&payload.name)
        .bind(&payload.address)
        .bind(&payload.notes)
        .execute(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to create villa");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "Villa created successfully",
        "id": result.last_insert_id()
    })))
}

/// List villas
#[utoipa::path(
    get,
    path = "/api/v1/villas",
    responses(
        (status = 200, body = Vec<Villa>)
    ),
    tag = "Villa"
)]
pub async fn list_villas(pool: web::Data<MySqlPool>) -> actix_web::Result<impl Responder> {
    let villas = sqlx::query_as::<_, Villa>("SELECT * FROM villas ORDER BY id")
        .fetch_all(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to fetch villa list");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(villas))
}

/// Get a villa
#[utoipa::path(
    get,
    path = "/api/v1/villas/{villa_id}",
    params(
        ("villa_id", description = "Villa ID")
    ),
    responses(
        (status = 200, body = Villa),
        (status = 404, description = "Villa not found")
    ),
    tag = "Villa"
)]
pub async fn get_villa(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let villa_id = path.into_inner();

    let villa = sqlx::query_as::<_, Villa>("SELECT * FROM villas WHERE id = ?")
        .bind(villa_id)
        .fetch_optional(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, villa_id, "Failed to fetch villa");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    match villa {
        Some(v) => Ok(HttpResponse::Ok().json(v)),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({
            "message": "Villa not found"
        }))),
    }
}

/// Update a villa
#[utoipa::path(
    put,
    path = "/api/v1/villas/{villa_id}",
    params(
        ("villa_id", description = "Villa ID")
    ),
    request_body = UpdateVilla,
    responses(
        (status = 200, description = "Villa updated"),
        (status = 404, description = "Villa not found")
    ),
    tag = "Villa"
)]
pub async fn update_villa(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    body: web::Json<UpdateVilla>,
) -> actix_web::Result<impl Responder> {
    let villa_id = path.into_inner();

    let current = sqlx::query_as::<_, Villa>("SELECT * FROM villas WHERE id = ?")
        .bind(villa_id)
        .fetch_optional(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, villa_id, "Failed to fetch villa");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    let Some(current) = current else {
        return Ok(HttpResponse::NotFound().json(serde_json::json!({
            "message": "Villa not found"
        })));
    };

    let name = body.name.clone().unwrap_or(current.name);
    let address = body.address.clone().unwrap_or(current.address);
    let notes = body.notes.clone().or(current.notes);

    sqlx::query("UPDATE villas SET name = ?, address = ?, notes = ? WHERE id = ?")
        .bind(name)
        .bind(address)
        .bind(notes)
        .bind(villa_id)
        .execute(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, villa_id, "Failed to update villa");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Villa updated successfully"
    })))
}

/// Delete a villa
#[utoipa::path(
    delete,
    path = "/api/v1/villas/{villa_id}",
    params(
        ("villa_id", description = "Villa ID")
    ),
    responses(
        (status = 200, description = "Successfully deleted"),
        (status = 404, description = "Villa not found")
    ),
    tag = "Villa"
)]
pub async fn delete_villa(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let villa_id = path.into_inner();

    let result = sqlx::query("DELETE FROM villas WHERE id = ?")
        .bind(villa_id)
        .execute(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, villa_id, "Failed to delete villa");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    if result.rows_affected() == 0 {
        return Ok(HttpResponse::NotFound().json(serde_json::json!({
            "message": "Villa not found"
        })));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Successfully deleted"
    })))
}
