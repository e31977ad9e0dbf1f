use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered dog. Clearances reference dogs by id; name/breed/color
/// are joined read-only into verification responses for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dog {
    pub id: Uuid,
    pub name: String,
    pub breed: String,
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
}
