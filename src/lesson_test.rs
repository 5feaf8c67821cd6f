use super::*;
use crate::services::activity::OptionType;

fn slot(option_id: Uuid, order: i32) -> CodeSlot {
    CodeSlot { id: Uuid::new_v4(), activity_id: Uuid::nil(), option_id, order }
}

fn option(id: Uuid, name: &str, color: &str) -> ActivityOption {
    ActivityOption {
        id,
        activity_id: Uuid::nil(),
        name: name.into(),
        hexadecimal_color: color.into(),
        kind: OptionType::JsFunction,
    }
}

// =============================================================================
// check_answer
// =============================================================================

#[test]
fn check_answer_accepts_exact_sequence() {
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    assert!(check_answer(&[a, b], &[slot(a, 0), slot(b, 1)], &[]));
}

#[test]
fn check_answer_sorts_slots_by_order() {
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    assert!(check_answer(&[a, b], &[slot(b, 1), slot(a, 0)], &[]));
    assert!(!check_answer(&[b, a], &[slot(b, 1), slot(a, 0)], &[]));
}

#[test]
fn check_answer_rejects_prefix_and_extra() {
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    let answers = [slot(a, 0), slot(b, 1)];
    assert!(!check_answer(&[a], &answers, &[]));
    assert!(!check_answer(&[a, b, b], &answers, &[]));
}

#[test]
fn check_answer_empty_matches_empty() {
    assert!(check_answer(&[], &[], &[]));
    assert!(!check_answer(&[Uuid::new_v4()], &[], &[]));
}

#[test]
fn check_answer_treats_identical_options_as_interchangeable() {
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    let options = [option(a, "drawRedBox", "#ff0000"), option(b, "drawRedBox", "#ff0000")];
    assert!(check_answer(&[b, a], &[slot(a, 0), slot(b, 1)], &options));
    assert!(check_answer(&[a, a], &[slot(a, 0), slot(b, 1)], &options));
}

#[test]
fn check_answer_keeps_distinct_options_apart() {
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    let answers = [slot(a, 0), slot(b, 1)];

    let by_name = [option(a, "drawRedBox", "#ff0000"), option(b, "drawBlueBox", "#ff0000")];
    assert!(!check_answer(&[b, a], &answers, &by_name));

    let by_color = [option(a, "drawBlueBox", "#0000FF"), option(b, "drawBlueBox", "#6A0DAD")];
    assert!(!check_answer(&[b, a], &answers, &by_color));
}

#[test]
fn check_answer_unknown_id_never_matches_by_content() {
    let (a, stranger) = (Uuid::new_v4(), Uuid::new_v4());
    let options = [option(a, "drawRedBox", "#ff0000")];
    assert!(!check_answer(&[stranger], &[slot(a, 0)], &options));
}

// =============================================================================
// LessonProgress
// =============================================================================

#[test]
fn status_modal_carries_sheet_copy() {
    let modal = StatusModal::new(true);
    assert_eq!(modal.title, "Ótimo código!");
    assert_eq!(modal.action, "Continuar");
    assert_eq!(modal.sheet_height, 130);
    assert!(modal.is_user_answer);
}

#[test]
fn wrong_submission_keeps_solving() {
    let ids = vec![Uuid::new_v4(), Uuid::new_v4()];
    let mut progress = LessonProgress::starting_at(ids.clone(), ids[0]).unwrap();

    assert_eq!(progress.submit(false, true).unwrap(), None);
    assert!(!progress.is_modal_visible());
    assert_eq!(progress.current(), Some(ids[0]));
}

#[test]
fn correct_submission_opens_sheet_then_advances() {
    let ids = vec![Uuid::new_v4(), Uuid::new_v4()];
    let mut progress = LessonProgress::starting_at(ids.clone(), ids[0]).unwrap();

    let modal = progress.submit(true, false).unwrap().unwrap();
    assert!(!modal.is_user_answer);
    assert!(progress.is_modal_visible());

    assert_eq!(progress.next_activity(), Ok(false));
    assert!(!progress.is_modal_visible());
    assert_eq!(progress.current(), Some(ids[1]));
}

#[test]
fn next_activity_without_sheet_is_rejected() {
    let id = Uuid::new_v4();
    let mut progress = LessonProgress::starting_at(vec![id], id).unwrap();
    assert_eq!(progress.next_activity(), Err(LessonError::NotReviewing));
}

#[test]
fn last_activity_finishes_lesson() {
    let id = Uuid::new_v4();
    let mut progress = LessonProgress::starting_at(vec![id], id).unwrap();
    progress.submit(true, true).unwrap();
    assert_eq!(progress.next_activity(), Ok(true));
    assert_eq!(progress.current(), None);
    assert!(!progress.is_modal_visible());
    assert_eq!(progress.submit(true, true), Err(LessonError::Finished));
}

#[test]
fn starting_at_resumes_mid_lesson() {
    let ids = vec![Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];
    let mut progress = LessonProgress::starting_at(ids.clone(), ids[1]).unwrap();
    assert_eq!(progress.current(), Some(ids[1]));

    progress.submit(true, true).unwrap();
    progress.next_activity().unwrap();
    assert_eq!(progress.current(), Some(ids[2]));
}

#[test]
fn starting_at_unknown_activity_is_none() {
    assert!(LessonProgress::starting_at(vec![Uuid::new_v4()], Uuid::new_v4()).is_none());
}
