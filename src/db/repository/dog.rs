use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::Dog;

pub fn insert_dog(conn: &Connection, dog: &Dog) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO dogs (id, name, breed, color, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            dog.id.to_string(),
            dog.name,
            dog.breed,
            dog.color,
            dog.created_at.to_rfc3339(),
        ],
    )?;
    Ok(())
}

pub fn get_dog(conn: &Connection, id: Uuid) -> Result<Option<Dog>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT id, name, breed, color, created_at FROM dogs WHERE id = ?1",
            params![id.to_string()],
            |row| {
                Ok(DogRow {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    breed: row.get(2)?,
                    color: row.get(3)?,
                    created_at: row.get(4)?,
                })
            },
        )
        .optional()?;

    row.map(dog_from_row).transpose()
}

struct DogRow {
    id: String,
    name: String,
    breed: String,
    color: Option<String>,
    created_at: String,
}

fn dog_from_row(row: DogRow) -> Result<Dog, DatabaseError> {
    Ok(Dog {
        id: Uuid::parse_str(&row.id)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        name: row.name,
        breed: row.breed,
        color: row.color,
        created_at: parse_timestamp(&row.created_at)?,
    })
}

pub(crate) fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DatabaseError::ConstraintViolation(format!("bad timestamp {s:?}: {e}")))
}
