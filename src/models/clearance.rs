use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::ClearanceStatus;

/// A recorded health test/certification result for a dog.
///
/// `status` and `expiry_date` are always derived from (test, result, date)
/// by the rule engine at write time — never accepted from a caller. A
/// resubmission with the same `verification_number` updates the existing
/// row in place; the record models "latest known truth", not a workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthClearance {
    pub id: Uuid,
    pub dog_id: Uuid,
    pub test: String,
    pub date: NaiveDate,
    pub result: String,
    pub status: ClearanceStatus,
    pub expiry_date: Option<NaiveDate>,
    /// Externally issued certificate code; unique public lookup key.
    pub verification_number: String,
    pub notes: Option<String>,
    pub documents: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl HealthClearance {
    /// Whether the clearance has lapsed as of `today`.
    /// `None` expiry means lifetime validity (DNA/genetic tests).
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expiry_date.is_some_and(|expiry| expiry < today)
    }
}
