//! Public clearance verification endpoint.
//!
//! `GET  /api/verification?verificationNumber=<code>` — look up a
//! clearance by certificate number.
//! `POST /api/verification` — submit (create or update) a clearance;
//! status and expiry are derived server-side.

use axum::extract::{Query, State};
use axum::Json;
use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::clearances::{self, NewClearance, VerifiedClearance};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyQuery {
    pub verification_number: Option<String>,
}

#[derive(Serialize)]
pub struct VerifyResponse {
    pub verified: bool,
    pub clearance: ClearanceView,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearanceView {
    pub id: String,
    pub dog_id: String,
    pub dog_name: String,
    pub dog_breed: String,
    pub dog_color: Option<String>,
    pub test: String,
    pub date: String,
    pub result: String,
    pub status: String,
    pub expiry_date: Option<String>,
    pub verification_number: String,
    pub is_expired: bool,
    pub verified_at: String,
}

impl From<VerifiedClearance> for ClearanceView {
    fn from(v: VerifiedClearance) -> Self {
        let c = v.clearance;
        Self {
            id: c.id.to_string(),
            dog_id: c.dog_id.to_string(),
            dog_name: v.dog_name,
            dog_breed: v.dog_breed,
            dog_color: v.dog_color,
            test: c.test,
            date: c.date.to_string(),
            result: c.result,
            status: c.status.as_str().to_string(),
            expiry_date: c.expiry_date.map(|d| d.to_string()),
            verification_number: c.verification_number,
            is_expired: v.is_expired,
            verified_at: v.verified_at.to_rfc3339(),
        }
    }
}

/// `GET /api/verification` — public certificate lookup.
pub async fn lookup(
    State(ctx): State<ApiContext>,
    Query(query): Query<VerifyQuery>,
) -> Result<Json<VerifyResponse>, ApiError> {
    let number = query
        .verification_number
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Verification number is required".into()))?;

    let conn = ctx.lock_db()?;
    let verified = clearances::verify_clearance(&conn, number, Utc::now())?
        .ok_or_else(|| ApiError::NotFound("Health clearance not found".into()))?;

    Ok(Json(VerifyResponse {
        verified: true,
        clearance: verified.into(),
    }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    pub dog_id: Option<String>,
    pub test: Option<String>,
    pub date: Option<String>,
    pub result: Option<String>,
    pub verification_number: Option<String>,
    pub notes: Option<String>,
    pub documents: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub success: bool,
    pub message: String,
    pub clearance_id: String,
    pub status: String,
    pub expiry_date: Option<String>,
    pub operation: String,
}

/// `POST /api/verification` — submit a clearance.
pub async fn submit(
    State(ctx): State<ApiContext>,
    Json(req): Json<SubmitRequest>,
) -> Result<Json<SubmitResponse>, ApiError> {
    let input = parse_submission(&req)?;

    let conn = ctx.lock_db()?;
    let outcome = clearances::submit_clearance(&conn, &input)?;

    Ok(Json(SubmitResponse {
        success: true,
        message: format!("Health clearance {}", outcome.operation.as_str()),
        clearance_id: outcome.clearance_id.to_string(),
        status: outcome.status.as_str().to_string(),
        expiry_date: outcome.expiry_date.map(|d| d.to_string()),
        operation: outcome.operation.as_str().to_string(),
    }))
}

fn parse_submission(req: &SubmitRequest) -> Result<NewClearance, ApiError> {
    // All five required fields or a single 400; blank strings count as missing
    let (Some(dog_id), Some(test), Some(date), Some(result), Some(number)) = (
        non_blank(&req.dog_id),
        non_blank(&req.test),
        non_blank(&req.date),
        non_blank(&req.result),
        non_blank(&req.verification_number),
    ) else {
        return Err(ApiError::BadRequest("Missing required fields".into()));
    };

    let dog_id = Uuid::parse_str(dog_id)
        .map_err(|_| ApiError::BadRequest(format!("Invalid dog id: {dog_id}")))?;
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| ApiError::BadRequest(format!("Invalid date (expected YYYY-MM-DD): {date}")))?;
    // %Y accepts signed five-plus-digit years; no plausible test was
    // performed outside this window, and it keeps year arithmetic far
    // from the calendar ceiling
    if !(1900..=9999).contains(&date.year()) {
        return Err(ApiError::BadRequest(format!(
            "Date out of range (expected year 1900-9999): {date}"
        )));
    }

    Ok(NewClearance {
        dog_id,
        test: test.to_string(),
        date,
        result: result.to_string(),
        verification_number: number.to_string(),
        notes: req.notes.clone(),
        documents: req.documents.clone(),
    })
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
