//! Seed service — populates a phase with the demo block activities.
//!
//! DESIGN
//! ======
//! Each fixture becomes one activity with two identical options, a
//! one-slot starter code, a two-slot answer and a tip. Steps run strictly
//! in sequence and the first failure aborts the whole run; rows written
//! before the failure stay in place.
//!
//! There is no uniqueness check. Running the seed twice duplicates every
//! row.
//!
//! Writes go through [`SeedStore`] so the flow can be exercised without a
//! database.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::services::activity::{
    self, ActivityError, ActivityType, NewActivity, NewCodeSlot, NewOption, OptionType,
};

/// Phase the demo activities are attached to unless overridden.
pub const DEFAULT_SEED_PHASE_ID: Uuid = Uuid::from_u128(0x2895_a53e_b43f_43fb_8ae8_ef7b_f4da_1f00);

const SEED_DESCRIPTION: &str = "Activity test";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedActivity {
    pub title: &'static str,
    pub order: i32,
    pub option_name: &'static str,
    pub hexadecimal_color: &'static str,
}

pub const SEED_ACTIVITIES: [SeedActivity; 6] = [
    SeedActivity { title: "Atividade Vermelha", order: 0, option_name: "drawRedBox", hexadecimal_color: "#ff0000" },
    SeedActivity { title: "Atividade Azul", order: 1, option_name: "drawBlueBox", hexadecimal_color: "#0000FF" },
    SeedActivity { title: "Atividade Roxa", order: 2, option_name: "drawBlueBox", hexadecimal_color: "#6A0DAD" },
    SeedActivity { title: "Atividade Verde", order: 3, option_name: "drawGreenBox", hexadecimal_color: "#67E3BB" },
    SeedActivity {
        title: "Atividade Verde Escura",
        order: 4,
        option_name: "drawGreenBox",
        hexadecimal_color: "#025105",
    },
    SeedActivity { title: "Atividade Amarela", order: 5, option_name: "drawYellowBox", hexadecimal_color: "#FFFF00" },
];

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("seeding {title} failed: {source}")]
    Step {
        title: &'static str,
        #[source]
        source: ActivityError,
    },
}

/// Row counts written by a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub activities: usize,
    pub options: usize,
    pub default_code: usize,
    pub answers: usize,
    pub tips: usize,
}

/// Write side of the activity repositories, as used by the seed.
#[async_trait::async_trait]
pub trait SeedStore: Send + Sync {
    async fn create_activity(&self, new: &NewActivity) -> Result<Uuid, ActivityError>;
    async fn create_option(&self, new: &NewOption) -> Result<Uuid, ActivityError>;
    async fn create_default_code(&self, new: NewCodeSlot) -> Result<(), ActivityError>;
    async fn create_answer(&self, new: NewCodeSlot) -> Result<(), ActivityError>;
    async fn create_tip(&self, tip: &str, activity_id: Uuid) -> Result<(), ActivityError>;
}

/// [`SeedStore`] backed by Postgres.
pub struct PgSeedStore {
    pool: PgPool,
}

impl PgSeedStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl SeedStore for PgSeedStore {
    async fn create_activity(&self, new: &NewActivity) -> Result<Uuid, ActivityError> {
        Ok(activity::create_activity(&self.pool, new).await?.id)
    }

    async fn create_option(&self, new: &NewOption) -> Result<Uuid, ActivityError> {
        Ok(activity::create_option(&self.pool, new).await?.id)
    }

    async fn create_default_code(&self, new: NewCodeSlot) -> Result<(), ActivityError> {
        activity::create_default_code(&self.pool, new).await.map(|_| ())
    }

    async fn create_answer(&self, new: NewCodeSlot) -> Result<(), ActivityError> {
        activity::create_answer(&self.pool, new).await.map(|_| ())
    }

    async fn create_tip(&self, tip: &str, activity_id: Uuid) -> Result<(), ActivityError> {
        activity::create_tip(&self.pool, tip, activity_id).await.map(|_| ())
    }
}

/// Hint text attached to a seeded activity.
#[must_use]
pub fn tip_text(option_name: &str) -> String {
    format!("Use a opção {option_name} para desenha uma quadrado")
}

/// Seed one fixture: activity, two options, starter code, answer, tip.
///
/// # Errors
///
/// Returns the first repository error; later steps are not attempted.
pub async fn seed_activity(
    store: &dyn SeedStore,
    fixture: &SeedActivity,
    phase_id: Uuid,
    report: &mut SeedReport,
) -> Result<Uuid, ActivityError> {
    let activity_id = store
        .create_activity(&NewActivity {
            title: fixture.title.to_owned(),
            description: SEED_DESCRIPTION.to_owned(),
            order: fixture.order,
            kind: ActivityType::BlockActivity,
            phase_id,
        })
        .await?;
    report.activities += 1;

    let new_option = NewOption {
        activity_id,
        name: fixture.option_name.to_owned(),
        hexadecimal_color: fixture.hexadecimal_color.to_owned(),
        kind: OptionType::JsFunction,
    };
    let option1 = store.create_option(&new_option).await?;
    report.options += 1;
    let option2 = store.create_option(&new_option).await?;
    report.options += 1;

    store
        .create_default_code(NewCodeSlot { activity_id, option_id: option1, order: 0 })
        .await?;
    report.default_code += 1;

    store.create_answer(NewCodeSlot { activity_id, option_id: option1, order: 0 }).await?;
    report.answers += 1;
    store.create_answer(NewCodeSlot { activity_id, option_id: option2, order: 1 }).await?;
    report.answers += 1;

    store.create_tip(&tip_text(fixture.option_name), activity_id).await?;
    report.tips += 1;

    Ok(activity_id)
}

/// Seed every fixture in [`SEED_ACTIVITIES`] under `phase_id`.
///
/// # Errors
///
/// Returns [`SeedError::Step`] naming the fixture that failed. Fixtures
/// after it are skipped.
pub async fn run_seed(store: &dyn SeedStore, phase_id: Uuid) -> Result<SeedReport, SeedError> {
    let mut report = SeedReport::default();

    for fixture in &SEED_ACTIVITIES {
        let activity_id = seed_activity(store, fixture, phase_id, &mut report)
            .await
            .map_err(|source| SeedError::Step { title: fixture.title, source })?;
        info!(%activity_id, title = fixture.title, order = fixture.order, "seeded activity");
    }

    Ok(report)
}

#[cfg(test)]
#[path = "seed_test.rs"]
mod tests;
