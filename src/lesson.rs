//! Lesson flow — answer checking and the status sheet between activities.
//!
//! DESIGN
//! ======
//! The viewer shows a bottom sheet once the learner's code is right and
//! moves on when its action is pressed. Instead of toggling a modal
//! handle imperatively, progress is an explicit state machine:
//!
//! ```text
//! Solving --correct--> Reviewing { modal } --next_activity--> Solving | Finished
//!    ^  |
//!    +--+ wrong
//! ```

use serde::Serialize;
use uuid::Uuid;

use crate::services::activity::{ActivityOption, CodeSlot};

pub const STATUS_TITLE: &str = "Ótimo código!";
pub const STATUS_ACTION: &str = "Continuar";
/// Height in points the sheet stays open at.
pub const STATUS_SHEET_HEIGHT: u32 = 130;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LessonError {
    #[error("no status sheet is open")]
    NotReviewing,
    #[error("lesson already finished")]
    Finished,
}

/// True when the submitted option sequence matches the answer slots in
/// `order`.
///
/// Options that look the same to the learner (same name, color and type)
/// are interchangeable, so swapping two identical blocks is still right.
/// Ids missing from `options` only match themselves.
#[must_use]
pub fn check_answer(submitted: &[Uuid], answers: &[CodeSlot], options: &[ActivityOption]) -> bool {
    let mut expected: Vec<&CodeSlot> = answers.iter().collect();
    expected.sort_by_key(|slot| slot.order);

    submitted.len() == expected.len()
        && submitted.iter().zip(expected).all(|(id, slot)| same_option(*id, slot.option_id, options))
}

fn same_option(a: Uuid, b: Uuid, options: &[ActivityOption]) -> bool {
    if a == b {
        return true;
    }
    let find = |id: Uuid| options.iter().find(|o| o.id == id);
    match (find(a), find(b)) {
        (Some(x), Some(y)) => x.name == y.name && x.hexadecimal_color == y.hexadecimal_color && x.kind == y.kind,
        _ => false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusModal {
    pub title: &'static str,
    pub action: &'static str,
    pub sheet_height: u32,
    /// Forwarded unchanged when the action advances the lesson.
    pub is_user_answer: bool,
}

impl StatusModal {
    #[must_use]
    pub fn new(is_user_answer: bool) -> Self {
        Self { title: STATUS_TITLE, action: STATUS_ACTION, sheet_height: STATUS_SHEET_HEIGHT, is_user_answer }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum LessonState {
    Solving { index: usize },
    Reviewing { index: usize, modal: StatusModal },
    Finished,
}

/// Progress through an ordered list of activities.
#[derive(Debug, Clone)]
pub struct LessonProgress {
    activities: Vec<Uuid>,
    state: LessonState,
}

impl LessonProgress {
    /// Resume at `current`. `None` when it is not in `activities`.
    #[must_use]
    pub fn starting_at(activities: Vec<Uuid>, current: Uuid) -> Option<Self> {
        let index = activities.iter().position(|id| *id == current)?;
        Some(Self { activities, state: LessonState::Solving { index } })
    }

    #[must_use]
    pub fn current(&self) -> Option<Uuid> {
        match self.state {
            LessonState::Solving { index } | LessonState::Reviewing { index, .. } => self.activities.get(index).copied(),
            LessonState::Finished => None,
        }
    }

    /// Whether the status sheet is showing.
    #[must_use]
    pub fn is_modal_visible(&self) -> bool {
        matches!(self.state, LessonState::Reviewing { .. })
    }

    /// Record a checked submission. A correct one opens the status sheet;
    /// a wrong one leaves the learner solving.
    ///
    /// # Errors
    ///
    /// Returns [`LessonError::Finished`] once every activity is done.
    pub fn submit(&mut self, correct: bool, is_user_answer: bool) -> Result<Option<StatusModal>, LessonError> {
        let index = match self.state {
            LessonState::Solving { index } | LessonState::Reviewing { index, .. } => index,
            LessonState::Finished => return Err(LessonError::Finished),
        };

        if !correct {
            self.state = LessonState::Solving { index };
            return Ok(None);
        }

        let modal = StatusModal::new(is_user_answer);
        self.state = LessonState::Reviewing { index, modal: modal.clone() };
        Ok(Some(modal))
    }

    /// Press the sheet's action: close it and move to the next activity.
    /// Returns the forwarded `is_user_answer` flag.
    ///
    /// # Errors
    ///
    /// Returns [`LessonError::NotReviewing`] when no sheet is open.
    pub fn next_activity(&mut self) -> Result<bool, LessonError> {
        let LessonState::Reviewing { index, ref modal } = self.state else {
            return Err(LessonError::NotReviewing);
        };
        let is_user_answer = modal.is_user_answer;

        let next = index + 1;
        self.state = if next < self.activities.len() { LessonState::Solving { index: next } } else { LessonState::Finished };
        Ok(is_user_answer)
    }
}

#[cfg(test)]
#[path = "lesson_test.rs"]
mod tests;
