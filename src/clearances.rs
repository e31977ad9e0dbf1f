//! Clearance operations — submission upsert and public verification.
//!
//! Submission always recomputes status and expiry from the submitted
//! (test, result, date) via the rule engine; a caller can never store a
//! self-reported status. The verification number is the upsert business
//! key: resubmission updates the existing row instead of duplicating it.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::Connection;
use uuid::Uuid;

use crate::db::repository::{clearance, dog};
use crate::db::DatabaseError;
use crate::models::enums::{ClearanceStatus, Operation};
use crate::models::HealthClearance;
use crate::rules;

/// A validated submission. Field presence is enforced at the API layer;
/// status/expiry are intentionally absent — they are derived here.
#[derive(Debug, Clone)]
pub struct NewClearance {
    pub dog_id: Uuid,
    pub test: String,
    pub date: NaiveDate,
    pub result: String,
    pub verification_number: String,
    pub notes: Option<String>,
    pub documents: Option<String>,
}

/// What a submission did, plus the derived fields the caller gets back.
#[derive(Debug, Clone)]
pub struct SubmissionOutcome {
    pub clearance_id: Uuid,
    pub status: ClearanceStatus,
    pub expiry_date: Option<NaiveDate>,
    pub operation: Operation,
}

/// A stored clearance joined with its dog for public display, plus the
/// lookup-time derived fields.
#[derive(Debug, Clone)]
pub struct VerifiedClearance {
    pub clearance: HealthClearance,
    pub dog_name: String,
    pub dog_breed: String,
    pub dog_color: Option<String>,
    pub is_expired: bool,
    /// Time of this lookup, not of the original submission. Fresh on
    /// every call so callers can record "last checked".
    pub verified_at: DateTime<Utc>,
}

/// Insert or update a clearance keyed by its verification number.
///
/// Lookup-then-branch rather than SQL upsert, so the rule-engine
/// recomputation stays explicit and auditable. Concurrent submissions
/// for the same number are last-write-wins.
pub fn submit_clearance(
    conn: &Connection,
    input: &NewClearance,
) -> Result<SubmissionOutcome, DatabaseError> {
    dog::get_dog(conn, input.dog_id)?.ok_or_else(|| DatabaseError::NotFound {
        entity_type: "Dog".into(),
        id: input.dog_id.to_string(),
    })?;

    let status = rules::classify(&input.test, &input.result);
    let expiry_date = rules::expiry_of(&input.test, input.date);
    let now = Utc::now();

    let existing = clearance::get_by_verification_number(conn, &input.verification_number)?;

    let outcome = match existing {
        Some(mut record) => {
            record.test = input.test.clone();
            record.date = input.date;
            record.result = input.result.clone();
            record.status = status;
            record.expiry_date = expiry_date;
            record.notes = input.notes.clone();
            record.documents = input.documents.clone();
            record.updated_at = now;
            clearance::update_clearance(conn, &record)?;

            tracing::info!(
                verification_number = %input.verification_number,
                status = status.as_str(),
                "Clearance updated"
            );
            SubmissionOutcome {
                clearance_id: record.id,
                status,
                expiry_date,
                operation: Operation::Updated,
            }
        }
        None => {
            let record = HealthClearance {
                id: Uuid::new_v4(),
                dog_id: input.dog_id,
                test: input.test.clone(),
                date: input.date,
                result: input.result.clone(),
                status,
                expiry_date,
                verification_number: input.verification_number.clone(),
                notes: input.notes.clone(),
                documents: input.documents.clone(),
                created_at: now,
                updated_at: now,
            };
            clearance::insert_clearance(conn, &record)?;

            tracing::info!(
                verification_number = %input.verification_number,
                status = status.as_str(),
                "Clearance created"
            );
            SubmissionOutcome {
                clearance_id: record.id,
                status,
                expiry_date,
                operation: Operation::Created,
            }
        }
    };

    Ok(outcome)
}

/// Look up a clearance by certificate number. Read-only; returns `None`
/// when no record matches (callers distinguish that from storage errors).
pub fn verify_clearance(
    conn: &Connection,
    verification_number: &str,
    now: DateTime<Utc>,
) -> Result<Option<VerifiedClearance>, DatabaseError> {
    let Some(record) = clearance::get_by_verification_number(conn, verification_number)? else {
        return Ok(None);
    };

    // The schema's foreign key guarantees the dog row exists
    let dog = dog::get_dog(conn, record.dog_id)?.ok_or_else(|| DatabaseError::NotFound {
        entity_type: "Dog".into(),
        id: record.dog_id.to_string(),
    })?;

    let is_expired = record.is_expired(now.date_naive());

    Ok(Some(VerifiedClearance {
        clearance: record,
        dog_name: dog.name,
        dog_breed: dog.breed,
        dog_color: dog.color,
        is_expired,
        verified_at: now,
    }))
}
