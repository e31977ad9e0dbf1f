//! Dog registry endpoints.
//!
//! `POST /api/dogs` — register a dog so clearances can reference it.
//! `GET  /api/dogs/:id/clearances` — a dog's clearances, newest first.
//!
//! Full dog CRUD belongs to the owning dashboard; only registration and
//! the clearance listing are needed here.

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository::{clearance, dog};
use crate::models::Dog;

#[derive(Deserialize)]
pub struct RegisterDogRequest {
    pub name: Option<String>,
    pub breed: Option<String>,
    pub color: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDogResponse {
    pub dog_id: String,
    pub name: String,
    pub breed: String,
}

/// `POST /api/dogs` — register a dog.
pub async fn register(
    State(ctx): State<ApiContext>,
    Json(req): Json<RegisterDogRequest>,
) -> Result<Json<RegisterDogResponse>, ApiError> {
    let (Some(name), Some(breed)) = (blank_to_none(&req.name), blank_to_none(&req.breed)) else {
        return Err(ApiError::BadRequest("Missing required fields".into()));
    };

    let record = Dog {
        id: Uuid::new_v4(),
        name: name.to_string(),
        breed: breed.to_string(),
        color: req.color.clone().filter(|c| !c.trim().is_empty()),
        created_at: Utc::now(),
    };

    let conn = ctx.lock_db()?;
    dog::insert_dog(&conn, &record)?;
    tracing::info!(dog_id = %record.id, "Dog registered");

    Ok(Json(RegisterDogResponse {
        dog_id: record.id.to_string(),
        name: record.name,
        breed: record.breed,
    }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearanceListItem {
    pub id: String,
    pub test: String,
    pub date: String,
    pub result: String,
    pub status: String,
    pub expiry_date: Option<String>,
    pub verification_number: String,
    pub is_expired: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearanceListResponse {
    pub dog_id: String,
    pub dog_name: String,
    pub clearances: Vec<ClearanceListItem>,
    pub total: usize,
}

/// `GET /api/dogs/:id/clearances` — list a dog's clearances.
pub async fn clearances(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<ClearanceListResponse>, ApiError> {
    let dog_id = Uuid::parse_str(&id)
        .map_err(|_| ApiError::BadRequest(format!("Invalid dog id: {id}")))?;

    let conn = ctx.lock_db()?;
    let found = dog::get_dog(&conn, dog_id)?
        .ok_or_else(|| ApiError::NotFound("Dog not found".into()))?;

    let today = Utc::now().date_naive();
    let items: Vec<ClearanceListItem> = clearance::list_for_dog(&conn, dog_id)?
        .into_iter()
        .map(|c| ClearanceListItem {
            id: c.id.to_string(),
            test: c.test.clone(),
            date: c.date.to_string(),
            result: c.result.clone(),
            status: c.status.as_str().to_string(),
            expiry_date: c.expiry_date.map(|d| d.to_string()),
            verification_number: c.verification_number.clone(),
            is_expired: c.is_expired(today),
        })
        .collect();

    let total = items.len();
    Ok(Json(ClearanceListResponse {
        dog_id: dog_id.to_string(),
        dog_name: found.name,
        clearances: items,
        total,
    }))
}

fn blank_to_none(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
