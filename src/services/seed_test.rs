use super::*;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Activity { id: Uuid, title: String, order: i32, phase_id: Uuid },
    Option { id: Uuid, activity_id: Uuid, name: String, color: String },
    DefaultCode { activity_id: Uuid, option_id: Uuid, order: i32 },
    Answer { activity_id: Uuid, option_id: Uuid, order: i32 },
    Tip { activity_id: Uuid, tip: String },
}

/// Records every write; fails the `fail_at`-th call (0-based) when set.
#[derive(Default)]
struct RecordingStore {
    calls: Mutex<Vec<Call>>,
    fail_at: Option<usize>,
}

impl RecordingStore {
    fn failing_at(n: usize) -> Self {
        Self { calls: Mutex::new(Vec::new()), fail_at: Some(n) }
    }

    fn record(&self, call: Call) -> Result<(), ActivityError> {
        let mut calls = self.calls.lock().expect("mock mutex should lock");
        if self.fail_at == Some(calls.len()) {
            return Err(ActivityError::Database(sqlx::Error::RowNotFound));
        }
        calls.push(call);
        Ok(())
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("mock mutex should lock").clone()
    }
}

#[async_trait::async_trait]
impl SeedStore for RecordingStore {
    async fn create_activity(&self, new: &NewActivity) -> Result<Uuid, ActivityError> {
        assert_eq!(new.kind, ActivityType::BlockActivity);
        assert_eq!(new.description, "Activity test");
        let id = Uuid::new_v4();
        self.record(Call::Activity { id, title: new.title.clone(), order: new.order, phase_id: new.phase_id })?;
        Ok(id)
    }

    async fn create_option(&self, new: &NewOption) -> Result<Uuid, ActivityError> {
        assert_eq!(new.kind, OptionType::JsFunction);
        let id = Uuid::new_v4();
        self.record(Call::Option {
            id,
            activity_id: new.activity_id,
            name: new.name.clone(),
            color: new.hexadecimal_color.clone(),
        })?;
        Ok(id)
    }

    async fn create_default_code(&self, new: NewCodeSlot) -> Result<(), ActivityError> {
        self.record(Call::DefaultCode { activity_id: new.activity_id, option_id: new.option_id, order: new.order })
    }

    async fn create_answer(&self, new: NewCodeSlot) -> Result<(), ActivityError> {
        self.record(Call::Answer { activity_id: new.activity_id, option_id: new.option_id, order: new.order })
    }

    async fn create_tip(&self, tip: &str, activity_id: Uuid) -> Result<(), ActivityError> {
        self.record(Call::Tip { activity_id, tip: tip.to_owned() })
    }
}

const CALLS_PER_ACTIVITY: usize = 7;

#[test]
fn default_phase_id_matches_demo_phase() {
    assert_eq!(DEFAULT_SEED_PHASE_ID.to_string(), "2895a53e-b43f-43fb-8ae8-ef7bf4da1f00");
}

#[test]
fn fixtures_are_ordered_zero_to_five() {
    let orders: Vec<i32> = SEED_ACTIVITIES.iter().map(|f| f.order).collect();
    assert_eq!(orders, vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(SEED_ACTIVITIES[2].option_name, "drawBlueBox");
    assert_eq!(SEED_ACTIVITIES[2].hexadecimal_color, "#6A0DAD");
}

#[test]
fn tip_text_names_the_option() {
    assert_eq!(tip_text("drawRedBox"), "Use a opção drawRedBox para desenha uma quadrado");
}

#[tokio::test]
async fn seed_activity_writes_rows_in_sequence() {
    let store = RecordingStore::default();
    let phase_id = Uuid::new_v4();
    let mut report = SeedReport::default();

    let activity_id = seed_activity(&store, &SEED_ACTIVITIES[0], phase_id, &mut report).await.unwrap();
    let calls = store.calls();
    assert_eq!(calls.len(), CALLS_PER_ACTIVITY);

    let Call::Activity { id, ref title, order, phase_id: recorded_phase } = calls[0] else {
        panic!("expected activity first, got {:?}", calls[0]);
    };
    assert_eq!(id, activity_id);
    assert_eq!(title, "Atividade Vermelha");
    assert_eq!(order, 0);
    assert_eq!(recorded_phase, phase_id);

    let option_ids: Vec<Uuid> = calls[1..3]
        .iter()
        .map(|c| match c {
            Call::Option { id, activity_id: a, name, color } => {
                assert_eq!(*a, activity_id);
                assert_eq!(name, "drawRedBox");
                assert_eq!(color, "#ff0000");
                *id
            }
            other => panic!("expected option, got {other:?}"),
        })
        .collect();
    assert_ne!(option_ids[0], option_ids[1]);

    assert_eq!(calls[3], Call::DefaultCode { activity_id, option_id: option_ids[0], order: 0 });
    assert_eq!(calls[4], Call::Answer { activity_id, option_id: option_ids[0], order: 0 });
    assert_eq!(calls[5], Call::Answer { activity_id, option_id: option_ids[1], order: 1 });
    assert_eq!(calls[6], Call::Tip { activity_id, tip: tip_text("drawRedBox") });
}

#[tokio::test]
async fn run_seed_creates_every_fixture() {
    let store = RecordingStore::default();
    let report = run_seed(&store, DEFAULT_SEED_PHASE_ID).await.unwrap();

    assert_eq!(report, SeedReport { activities: 6, options: 12, default_code: 6, answers: 12, tips: 6 });

    let titles: Vec<String> = store
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            Call::Activity { title, .. } => Some(title),
            _ => None,
        })
        .collect();
    assert_eq!(
        titles,
        vec![
            "Atividade Vermelha",
            "Atividade Azul",
            "Atividade Roxa",
            "Atividade Verde",
            "Atividade Verde Escura",
            "Atividade Amarela",
        ]
    );
}

#[tokio::test]
async fn run_seed_is_not_idempotent() {
    let store = RecordingStore::default();
    run_seed(&store, DEFAULT_SEED_PHASE_ID).await.unwrap();
    run_seed(&store, DEFAULT_SEED_PHASE_ID).await.unwrap();
    assert_eq!(store.calls().len(), 2 * SEED_ACTIVITIES.len() * CALLS_PER_ACTIVITY);
}

#[tokio::test]
async fn run_seed_aborts_on_first_failure() {
    // Fail the second option of the third fixture.
    let store = RecordingStore::failing_at(2 * CALLS_PER_ACTIVITY + 2);
    let err = run_seed(&store, DEFAULT_SEED_PHASE_ID).await.unwrap_err();

    let SeedError::Step { title, .. } = err;
    assert_eq!(title, "Atividade Roxa");
    assert_eq!(store.calls().len(), 2 * CALLS_PER_ACTIVITY + 2);
}

#[tokio::test]
async fn run_seed_failing_first_write_writes_nothing() {
    let store = RecordingStore::failing_at(0);
    assert!(run_seed(&store, DEFAULT_SEED_PHASE_ID).await.is_err());
    assert!(store.calls().is_empty());
}

#[cfg(feature = "live-db-tests")]
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL/live Postgres"]
async fn run_seed_against_postgres() {
    let pool = crate::state::test_helpers::integration_pool().await;
    let phase_id = crate::state::test_helpers::insert_phase(&pool, DEFAULT_SEED_PHASE_ID).await;

    let report = run_seed(&PgSeedStore::new(pool.clone()), phase_id).await.unwrap();
    assert_eq!(report.activities, 6);

    let activities = activity::list_phase_activities(&pool, phase_id).await.unwrap();
    assert_eq!(activities.len(), 6);
    let detail = activity::load_activity_detail(&pool, activities[0].id).await.unwrap();
    assert_eq!(detail.options.len(), 2);
    assert_eq!(detail.answers.len(), 2);
    assert_eq!(detail.default_code.len(), 1);
    assert_eq!(detail.tips.len(), 1);
}

#[cfg(feature = "live-db-tests")]
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL/live Postgres"]
async fn run_seed_without_phase_fails() {
    let pool = crate::state::test_helpers::integration_pool().await;
    let err = run_seed(&PgSeedStore::new(pool), Uuid::new_v4()).await.unwrap_err();
    let SeedError::Step { title, .. } = err;
    assert_eq!(title, "Atividade Vermelha");
}
