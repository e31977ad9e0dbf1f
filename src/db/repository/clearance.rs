use std::str::FromStr;

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::db::repository::dog::parse_timestamp;
use crate::db::DatabaseError;
use crate::models::enums::ClearanceStatus;
use crate::models::HealthClearance;

const CLEARANCE_COLUMNS: &str =
    "id, dog_id, test, date, result, status, expiry_date, verification_number,
     notes, documents, created_at, updated_at";

pub fn insert_clearance(
    conn: &Connection,
    clearance: &HealthClearance,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO health_clearances
         (id, dog_id, test, date, result, status, expiry_date, verification_number,
          notes, documents, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            clearance.id.to_string(),
            clearance.dog_id.to_string(),
            clearance.test,
            clearance.date.to_string(),
            clearance.result,
            clearance.status.as_str(),
            clearance.expiry_date.map(|d| d.to_string()),
            clearance.verification_number,
            clearance.notes,
            clearance.documents,
            clearance.created_at.to_rfc3339(),
            clearance.updated_at.to_rfc3339(),
        ],
    )?;
    Ok(())
}

/// Replace the mutable fields of an existing clearance. Identity
/// (id, dog_id, verification_number, created_at) is preserved.
pub fn update_clearance(
    conn: &Connection,
    clearance: &HealthClearance,
) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "UPDATE health_clearances
         SET test = ?2, date = ?3, result = ?4, status = ?5, expiry_date = ?6,
             notes = ?7, documents = ?8, updated_at = ?9
         WHERE id = ?1",
        params![
            clearance.id.to_string(),
            clearance.test,
            clearance.date.to_string(),
            clearance.result,
            clearance.status.as_str(),
            clearance.expiry_date.map(|d| d.to_string()),
            clearance.notes,
            clearance.documents,
            clearance.updated_at.to_rfc3339(),
        ],
    )?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "HealthClearance".into(),
            id: clearance.id.to_string(),
        });
    }
    Ok(())
}

pub fn get_by_verification_number(
    conn: &Connection,
    verification_number: &str,
) -> Result<Option<HealthClearance>, DatabaseError> {
    let row = conn
        .query_row(
            &format!(
                "SELECT {CLEARANCE_COLUMNS} FROM health_clearances
                 WHERE verification_number = ?1"
            ),
            params![verification_number],
            |row| Ok(clearance_row_from_rusqlite(row)),
        )
        .optional()?;

    row.map(|r| clearance_from_row(r?)).transpose()
}

pub fn list_for_dog(
    conn: &Connection,
    dog_id: Uuid,
) -> Result<Vec<HealthClearance>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {CLEARANCE_COLUMNS} FROM health_clearances
         WHERE dog_id = ?1 ORDER BY date DESC, updated_at DESC"
    ))?;

    let rows = stmt.query_map(params![dog_id.to_string()], |row| {
        Ok(clearance_row_from_rusqlite(row))
    })?;

    let mut clearances = Vec::new();
    for row in rows {
        clearances.push(clearance_from_row(row??)?);
    }
    Ok(clearances)
}

// Internal row type for HealthClearance mapping
struct ClearanceRow {
    id: String,
    dog_id: String,
    test: String,
    date: String,
    result: String,
    status: String,
    expiry_date: Option<String>,
    verification_number: String,
    notes: Option<String>,
    documents: Option<String>,
    created_at: String,
    updated_at: String,
}

fn clearance_row_from_rusqlite(row: &rusqlite::Row<'_>) -> Result<ClearanceRow, rusqlite::Error> {
    Ok(ClearanceRow {
        id: row.get(0)?,
        dog_id: row.get(1)?,
        test: row.get(2)?,
        date: row.get(3)?,
        result: row.get(4)?,
        status: row.get(5)?,
        expiry_date: row.get(6)?,
        verification_number: row.get(7)?,
        notes: row.get(8)?,
        documents: row.get(9)?,
        created_at: row.get(10)?,
        updated_at: row.get(11)?,
    })
}

fn clearance_from_row(row: ClearanceRow) -> Result<HealthClearance, DatabaseError> {
    Ok(HealthClearance {
        id: Uuid::parse_str(&row.id)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        dog_id: Uuid::parse_str(&row.dog_id)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        test: row.test,
        date: parse_date(&row.date)?,
        result: row.result,
        status: ClearanceStatus::from_str(&row.status)?,
        expiry_date: row.expiry_date.as_deref().map(parse_date).transpose()?,
        verification_number: row.verification_number,
        notes: row.notes,
        documents: row.documents,
        created_at: parse_timestamp(&row.created_at)?,
        updated_at: parse_timestamp(&row.updated_at)?,
    })
}

fn parse_date(s: &str) -> Result<NaiveDate, DatabaseError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| DatabaseError::ConstraintViolation(format!("bad date {s:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::db::repository::dog::insert_dog;
    use crate::db::sqlite::open_memory_database;
    use crate::models::Dog;

    fn seeded_dog(conn: &Connection) -> Uuid {
        let dog = Dog {
            id: Uuid::new_v4(),
            name: "Bella".into(),
            breed: "English Bulldog".into(),
            color: None,
            created_at: Utc::now(),
        };
        insert_dog(conn, &dog).unwrap();
        dog.id
    }

    fn sample_clearance(dog_id: Uuid, verification_number: &str) -> HealthClearance {
        HealthClearance {
            id: Uuid::new_v4(),
            dog_id,
            test: "Hip Evaluation".into(),
            date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            result: "OFA Good".into(),
            status: ClearanceStatus::Passed,
            expiry_date: NaiveDate::from_ymd_opt(2025, 1, 1),
            verification_number: verification_number.into(),
            notes: None,
            documents: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn insert_and_lookup_by_verification_number() {
        let conn = open_memory_database().unwrap();
        let dog_id = seeded_dog(&conn);
        let clearance = sample_clearance(dog_id, "OFA-HP-0001");
        insert_clearance(&conn, &clearance).unwrap();

        let found = get_by_verification_number(&conn, "OFA-HP-0001")
            .unwrap()
            .expect("clearance should exist");
        assert_eq!(found.id, clearance.id);
        assert_eq!(found.status, ClearanceStatus::Passed);
        assert_eq!(found.expiry_date, clearance.expiry_date);
        assert_eq!(found.date, clearance.date);
    }

    #[test]
    fn unknown_verification_number_is_none() {
        let conn = open_memory_database().unwrap();
        assert!(get_by_verification_number(&conn, "NOPE").unwrap().is_none());
    }

    #[test]
    fn update_replaces_mutable_fields_only() {
        let conn = open_memory_database().unwrap();
        let dog_id = seeded_dog(&conn);
        let mut clearance = sample_clearance(dog_id, "OFA-HP-0002");
        insert_clearance(&conn, &clearance).unwrap();

        clearance.result = "OFA Poor".into();
        clearance.status = ClearanceStatus::Failed;
        clearance.notes = Some("retested".into());
        update_clearance(&conn, &clearance).unwrap();

        let found = get_by_verification_number(&conn, "OFA-HP-0002")
            .unwrap()
            .unwrap();
        assert_eq!(found.id, clearance.id);
        assert_eq!(found.result, "OFA Poor");
        assert_eq!(found.status, ClearanceStatus::Failed);
        assert_eq!(found.notes.as_deref(), Some("retested"));
    }

    #[test]
    fn update_of_missing_clearance_errors() {
        let conn = open_memory_database().unwrap();
        let dog_id = seeded_dog(&conn);
        let clearance = sample_clearance(dog_id, "OFA-HP-0003");
        let err = update_clearance(&conn, &clearance).unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound { .. }));
    }

    #[test]
    fn list_for_dog_is_newest_first() {
        let conn = open_memory_database().unwrap();
        let dog_id = seeded_dog(&conn);

        let mut older = sample_clearance(dog_id, "OFA-HP-0004");
        older.date = NaiveDate::from_ymd_opt(2022, 6, 1).unwrap();
        let newer = sample_clearance(dog_id, "OFA-CA-0005");
        insert_clearance(&conn, &older).unwrap();
        insert_clearance(&conn, &newer).unwrap();

        let listed = list_for_dog(&conn, dog_id).unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].verification_number, "OFA-CA-0005");
        assert_eq!(listed[1].verification_number, "OFA-HP-0004");
    }

    #[test]
    fn clearance_for_unknown_dog_violates_foreign_key() {
        let conn = open_memory_database().unwrap();
        let clearance = sample_clearance(Uuid::new_v4(), "OFA-HP-0006");
        assert!(insert_clearance(&conn, &clearance).is_err());
    }
}
