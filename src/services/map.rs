//! Map service — CRUD for course modules edited from the dashboard.
//!
//! DESIGN
//! ======
//! Maps are plain rows; every write validates its input first so a blank
//! title or description never reaches the database. Updates are full
//! replacements of the editable fields, matching the dashboard's edit form.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("map not found: {0}")]
    NotFound(Uuid),
    #[error("field must not be empty: {0}")]
    EmptyField(&'static str),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// A course module. Mirrors the `maps` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Map {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub order: i32,
}

/// Editable fields of a map.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MapInput {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub order: i32,
}

impl MapInput {
    /// Reject whitespace-only titles and descriptions.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::EmptyField`] naming the first blank field.
    pub fn validate(&self) -> Result<(), MapError> {
        if self.title.trim().is_empty() {
            return Err(MapError::EmptyField("title"));
        }
        if self.description.trim().is_empty() {
            return Err(MapError::EmptyField("description"));
        }
        Ok(())
    }
}

// =============================================================================
// CRUD
// =============================================================================

/// List all maps in display order.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_maps(pool: &PgPool) -> Result<Vec<Map>, MapError> {
    let rows = sqlx::query_as::<_, Map>(
        r#"SELECT id, title, description, "order" FROM maps ORDER BY "order" ASC, title ASC"#,
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Fetch one map.
///
/// # Errors
///
/// Returns `NotFound` if no map has this id, or a database error.
pub async fn get_map(pool: &PgPool, map_id: Uuid) -> Result<Map, MapError> {
    sqlx::query_as::<_, Map>(r#"SELECT id, title, description, "order" FROM maps WHERE id = $1"#)
        .bind(map_id)
        .fetch_optional(pool)
        .await?
        .ok_or(MapError::NotFound(map_id))
}

/// Create a new map.
///
/// # Errors
///
/// Returns `EmptyField` for invalid input, or a database error.
pub async fn create_map(pool: &PgPool, input: &MapInput) -> Result<Map, MapError> {
    input.validate()?;

    let id = Uuid::new_v4();
    sqlx::query(r#"INSERT INTO maps (id, title, description, "order") VALUES ($1, $2, $3, $4)"#)
        .bind(id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.order)
        .execute(pool)
        .await?;

    Ok(Map { id, title: input.title.clone(), description: input.description.clone(), order: input.order })
}

/// Replace the editable fields of a map and return the stored row.
///
/// # Errors
///
/// Returns `EmptyField` for invalid input, `NotFound` when no row matched,
/// or a database error.
pub async fn update_map(pool: &PgPool, map_id: Uuid, input: &MapInput) -> Result<Map, MapError> {
    input.validate()?;

    sqlx::query_as::<_, Map>(
        r#"UPDATE maps
           SET title = $2, description = $3, "order" = $4, updated_at = now()
           WHERE id = $1
           RETURNING id, title, description, "order""#,
    )
    .bind(map_id)
    .bind(&input.title)
    .bind(&input.description)
    .bind(input.order)
    .fetch_optional(pool)
    .await?
    .ok_or(MapError::NotFound(map_id))
}

#[cfg(test)]
#[path = "map_test.rs"]
mod tests;
