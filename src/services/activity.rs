//! Activity service — repositories for activities, options, code slots and tips.
//!
//! DESIGN
//! ======
//! One create function per table, mirroring the repository objects the
//! seed routine and the authoring backend write through. Enum columns are
//! stored as snake_case text guarded by `CHECK` constraints and decoded
//! here, so a bad value surfaces as `ActivityError::InvalidEnum` instead
//! of a panic.
//!
//! The read side (`list_phase_activities`, `load_activity_detail`) serves
//! the mobile viewer: one activity with everything needed to render it.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ActivityError {
    #[error("activity not found: {0}")]
    NotFound(Uuid),
    #[error("invalid {column} value: {value}")]
    InvalidEnum { column: &'static str, value: String },
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    BlockActivity,
    Quiz,
}

impl ActivityType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BlockActivity => "block_activity",
            Self::Quiz => "quiz",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "block_activity" => Some(Self::BlockActivity),
            "quiz" => Some(Self::Quiz),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionType {
    JsFunction,
    Command,
}

impl OptionType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::JsFunction => "js_function",
            Self::Command => "command",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "js_function" => Some(Self::JsFunction),
            "command" => Some(Self::Command),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Activity {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub order: i32,
    #[serde(rename = "type")]
    pub kind: ActivityType,
    pub phase_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct NewActivity {
    pub title: String,
    pub description: String,
    pub order: i32,
    pub kind: ActivityType,
    pub phase_id: Uuid,
}

/// A selectable code block inside an activity. Mirrors the `options` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityOption {
    pub id: Uuid,
    pub activity_id: Uuid,
    pub name: String,
    pub hexadecimal_color: String,
    #[serde(rename = "type")]
    pub kind: OptionType,
}

#[derive(Debug, Clone)]
pub struct NewOption {
    pub activity_id: Uuid,
    pub name: String,
    pub hexadecimal_color: String,
    pub kind: OptionType,
}

/// Option placed at a position. Rows of both `activities_default_code`
/// and `activities_answers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct CodeSlot {
    pub id: Uuid,
    pub activity_id: Uuid,
    pub option_id: Uuid,
    pub order: i32,
}

#[derive(Debug, Clone, Copy)]
pub struct NewCodeSlot {
    pub activity_id: Uuid,
    pub option_id: Uuid,
    pub order: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Tip {
    pub id: Uuid,
    pub activity_id: Uuid,
    pub tip: String,
}

/// Everything the viewer needs to render one activity.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityDetail {
    pub activity: Activity,
    pub options: Vec<ActivityOption>,
    pub default_code: Vec<CodeSlot>,
    pub answers: Vec<CodeSlot>,
    pub tips: Vec<Tip>,
}

type ActivityRow = (Uuid, String, String, i32, String, Uuid);
type OptionRow = (Uuid, Uuid, String, String, String);

fn activity_from_row((id, title, description, order, kind, phase_id): ActivityRow) -> Result<Activity, ActivityError> {
    let kind = ActivityType::parse(&kind).ok_or(ActivityError::InvalidEnum { column: "activities.type", value: kind })?;
    Ok(Activity { id, title, description, order, kind, phase_id })
}

fn option_from_row((id, activity_id, name, hexadecimal_color, kind): OptionRow) -> Result<ActivityOption, ActivityError> {
    let kind = OptionType::parse(&kind).ok_or(ActivityError::InvalidEnum { column: "options.type", value: kind })?;
    Ok(ActivityOption { id, activity_id, name, hexadecimal_color, kind })
}

// =============================================================================
// CREATE
// =============================================================================

/// Insert an activity.
///
/// # Errors
///
/// Returns a database error if the insert fails (e.g. unknown phase).
pub async fn create_activity(pool: &PgPool, new: &NewActivity) -> Result<Activity, ActivityError> {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"INSERT INTO activities (id, title, description, "order", type, phase_id)
           VALUES ($1, $2, $3, $4, $5, $6)"#,
    )
    .bind(id)
    .bind(&new.title)
    .bind(&new.description)
    .bind(new.order)
    .bind(new.kind.as_str())
    .bind(new.phase_id)
    .execute(pool)
    .await?;

    Ok(Activity {
        id,
        title: new.title.clone(),
        description: new.description.clone(),
        order: new.order,
        kind: new.kind,
        phase_id: new.phase_id,
    })
}

/// Insert an option belonging to an activity.
///
/// # Errors
///
/// Returns a database error if the insert fails.
pub async fn create_option(pool: &PgPool, new: &NewOption) -> Result<ActivityOption, ActivityError> {
    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO options (id, activity_id, name, hexadecimal_color, type) VALUES ($1, $2, $3, $4, $5)")
        .bind(id)
        .bind(new.activity_id)
        .bind(&new.name)
        .bind(&new.hexadecimal_color)
        .bind(new.kind.as_str())
        .execute(pool)
        .await?;

    Ok(ActivityOption {
        id,
        activity_id: new.activity_id,
        name: new.name.clone(),
        hexadecimal_color: new.hexadecimal_color.clone(),
        kind: new.kind,
    })
}

async fn insert_code_slot(pool: &PgPool, table: &str, new: NewCodeSlot) -> Result<CodeSlot, ActivityError> {
    let id = Uuid::new_v4();
    let sql = format!(r#"INSERT INTO {table} (id, activity_id, option_id, "order") VALUES ($1, $2, $3, $4)"#);
    sqlx::query(&sql)
        .bind(id)
        .bind(new.activity_id)
        .bind(new.option_id)
        .bind(new.order)
        .execute(pool)
        .await?;

    Ok(CodeSlot { id, activity_id: new.activity_id, option_id: new.option_id, order: new.order })
}

/// Place an option in the activity's starter code.
///
/// # Errors
///
/// Returns a database error if the insert fails.
pub async fn create_default_code(pool: &PgPool, new: NewCodeSlot) -> Result<CodeSlot, ActivityError> {
    insert_code_slot(pool, "activities_default_code", new).await
}

/// Place an option in the activity's correct answer.
///
/// # Errors
///
/// Returns a database error if the insert fails.
pub async fn create_answer(pool: &PgPool, new: NewCodeSlot) -> Result<CodeSlot, ActivityError> {
    insert_code_slot(pool, "activities_answers", new).await
}

/// Attach a hint to an activity.
///
/// # Errors
///
/// Returns a database error if the insert fails.
pub async fn create_tip(pool: &PgPool, tip: &str, activity_id: Uuid) -> Result<Tip, ActivityError> {
    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO tips (id, activity_id, tip) VALUES ($1, $2, $3)")
        .bind(id)
        .bind(activity_id)
        .bind(tip)
        .execute(pool)
        .await?;

    Ok(Tip { id, activity_id, tip: tip.to_owned() })
}

// =============================================================================
// READ
// =============================================================================

/// List a phase's activities in lesson order.
///
/// # Errors
///
/// Returns a database error, or `InvalidEnum` for a corrupt `type` column.
pub async fn list_phase_activities(pool: &PgPool, phase_id: Uuid) -> Result<Vec<Activity>, ActivityError> {
    let rows = sqlx::query_as::<_, ActivityRow>(
        r#"SELECT id, title, description, "order", type, phase_id
           FROM activities
           WHERE phase_id = $1
           ORDER BY "order" ASC, created_at ASC"#,
    )
    .bind(phase_id)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(activity_from_row).collect()
}

async fn load_code_slots(pool: &PgPool, table: &str, activity_id: Uuid) -> Result<Vec<CodeSlot>, ActivityError> {
    let sql = format!(r#"SELECT id, activity_id, option_id, "order" FROM {table} WHERE activity_id = $1 ORDER BY "order" ASC"#);
    let rows = sqlx::query_as::<_, CodeSlot>(&sql)
        .bind(activity_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Load an activity with its options, code slots and tips.
///
/// # Errors
///
/// Returns `NotFound` if the activity does not exist, or a database error.
pub async fn load_activity_detail(pool: &PgPool, activity_id: Uuid) -> Result<ActivityDetail, ActivityError> {
    let row = sqlx::query_as::<_, ActivityRow>(
        r#"SELECT id, title, description, "order", type, phase_id FROM activities WHERE id = $1"#,
    )
    .bind(activity_id)
    .fetch_optional(pool)
    .await?
    .ok_or(ActivityError::NotFound(activity_id))?;
    let activity = activity_from_row(row)?;

    let options = sqlx::query_as::<_, OptionRow>(
        "SELECT id, activity_id, name, hexadecimal_color, type
         FROM options
         WHERE activity_id = $1
         ORDER BY created_at ASC, id ASC",
    )
    .bind(activity_id)
    .fetch_all(pool)
    .await?
    .into_iter()
    .map(option_from_row)
    .collect::<Result<Vec<_>, _>>()?;

    let default_code = load_code_slots(pool, "activities_default_code", activity_id).await?;
    let answers = load_code_slots(pool, "activities_answers", activity_id).await?;

    let tips = sqlx::query_as::<_, Tip>("SELECT id, activity_id, tip FROM tips WHERE activity_id = $1 ORDER BY created_at ASC")
        .bind(activity_id)
        .fetch_all(pool)
        .await?;

    Ok(ActivityDetail { activity, options, default_code, answers, tips })
}

#[cfg(test)]
#[path = "activity_test.rs"]
mod tests;
