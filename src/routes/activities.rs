//! Activity routes consumed by the mobile lesson viewer.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

use crate::lesson::{self, LessonProgress, StatusModal};
use crate::services::activity::{self, Activity, ActivityDetail, ActivityError};
use crate::state::AppState;
use crate::terminal::TerminalFrame;

pub(crate) fn activity_error_to_status(err: ActivityError) -> StatusCode {
    match err {
        ActivityError::NotFound(_) => StatusCode::NOT_FOUND,
        ActivityError::InvalidEnum { column, value } => {
            error!(column, %value, "corrupt enum column");
            StatusCode::INTERNAL_SERVER_ERROR
        }
        ActivityError::Database(e) => {
            error!(error = %e, "activity query failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// `GET /phases/:id/activities` — a phase's activities in lesson order.
pub async fn list_phase_activities(
    State(state): State<AppState>,
    Path(phase_id): Path<Uuid>,
) -> Result<Json<Vec<Activity>>, StatusCode> {
    let rows = activity::list_phase_activities(&state.pool, phase_id)
        .await
        .map_err(activity_error_to_status)?;
    Ok(Json(rows))
}

#[derive(Serialize)]
pub struct ActivityResponse {
    #[serde(flatten)]
    pub detail: ActivityDetail,
    pub terminal: TerminalFrame,
}

/// `GET /activities/:id` — one activity with options, code slots, tips and
/// the terminal frame listing its commands.
pub async fn get_activity(
    State(state): State<AppState>,
    Path(activity_id): Path<Uuid>,
) -> Result<Json<ActivityResponse>, StatusCode> {
    let detail = activity::load_activity_detail(&state.pool, activity_id)
        .await
        .map_err(activity_error_to_status)?;
    let terminal = TerminalFrame::from_options(&detail.options);
    Ok(Json(ActivityResponse { detail, terminal }))
}

#[derive(Debug, Deserialize)]
pub struct AnswerBody {
    pub option_ids: Vec<Uuid>,
    #[serde(default = "default_is_user_answer")]
    pub is_user_answer: bool,
}

fn default_is_user_answer() -> bool {
    true
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct AnswerResponse {
    pub correct: bool,
    /// Present only when the answer is correct.
    pub status: Option<StatusModal>,
    /// Activity the sheet's action leads to; `None` at the end of the phase.
    pub next_activity_id: Option<Uuid>,
}

/// Grade a submission against a loaded activity and the ordered ids of
/// its phase.
pub(crate) fn grade(detail: &ActivityDetail, phase_activity_ids: Vec<Uuid>, body: &AnswerBody) -> AnswerResponse {
    let correct = lesson::check_answer(&body.option_ids, &detail.answers, &detail.options);
    let Some(mut progress) = LessonProgress::starting_at(phase_activity_ids, detail.activity.id) else {
        let status = correct.then(|| StatusModal::new(body.is_user_answer));
        return AnswerResponse { correct, status, next_activity_id: None };
    };

    let status = progress.submit(correct, body.is_user_answer).ok().flatten();
    let next_activity_id = if progress.is_modal_visible() && progress.next_activity().is_ok() { progress.current() } else { None };

    AnswerResponse { correct, status, next_activity_id }
}

/// `POST /activities/:id/answer` — check an ordered list of option ids.
pub async fn check_answer(
    State(state): State<AppState>,
    Path(activity_id): Path<Uuid>,
    Json(body): Json<AnswerBody>,
) -> Result<Json<AnswerResponse>, StatusCode> {
    let detail = activity::load_activity_detail(&state.pool, activity_id)
        .await
        .map_err(activity_error_to_status)?;
    let siblings = activity::list_phase_activities(&state.pool, detail.activity.phase_id)
        .await
        .map_err(activity_error_to_status)?;

    let ids = siblings.into_iter().map(|a| a.id).collect();
    Ok(Json(grade(&detail, ids, &body)))
}

#[cfg(test)]
#[path = "activities_test.rs"]
mod tests;
