use super::*;
use shared::{
    error::{INVALID_FILE_TYPE_MESSAGE, NETWORK_ERROR_MESSAGE},
    protocol::ClassProbability,
};

fn wav(name: &str, size: usize) -> StagedFile {
    StagedFile::from_parts(name, Some("audio/wav".to_string()), vec![7_u8; size])
}

fn cat_result() -> PredictionResult {
    PredictionResult {
        predicted_label: "Cat".to_string(),
        confidence: 87.5,
        probabilities: vec![
            ClassProbability {
                label: "Cat".to_string(),
                probability: 87.5,
            },
            ClassProbability {
                label: "Dog".to_string(),
                probability: 12.5,
            },
        ],
    }
}

fn staged_session(file: StagedFile) -> PageSession {
    let mut session = PageSession::new();
    session.dispatch(Action::FileDropped(file));
    session
}

#[test]
fn starts_with_upload_zone_and_disabled_submit() {
    let session = PageSession::new();
    let panels = session.panels();
    assert!(panels.upload_zone);
    assert!(!panels.file_info);
    assert!(panels.submit_visible);
    assert!(!panels.submit_enabled);
    assert!(!panels.results && !panels.error && !panels.loading);
    assert_eq!(session.phase(), Phase::Idle);
    assert!(!session.can_submit());
}

#[test]
fn valid_selection_stages_file_and_shows_chip() {
    let session = staged_session(wav("cat.wav", 10_240));

    let label = session.file_label().expect("label");
    assert_eq!(label.name, "cat.wav");
    assert_eq!(label.size_text, "10 KB");
    let panels = session.panels();
    assert!(!panels.upload_zone);
    assert!(panels.file_info);
    assert!(panels.submit_enabled);
    assert!(session.can_submit());
}

#[test]
fn invalid_selection_keeps_previous_file() {
    let mut session = staged_session(wav("cat.wav", 10_240));

    let effects = session.dispatch(Action::FileDropped(StagedFile::from_parts(
        "clip.txt",
        Some("text/plain".to_string()),
        b"hello".to_vec(),
    )));

    assert_eq!(
        effects,
        vec![Effect::ScrollIntoView {
            panel: Panel::Error,
            after: SCROLL_SETTLE_DELAY
        }]
    );
    assert_eq!(session.error_message(), Some(INVALID_FILE_TYPE_MESSAGE));
    assert!(session.panels().error);
    assert_eq!(
        session.selected_file().map(|file| file.name.as_str()),
        Some("cat.wav")
    );
    assert!(session.panels().file_info);
    assert!(session.panels().submit_enabled);
}

#[test]
fn selection_by_mime_or_uppercase_extension_is_accepted() {
    let session = staged_session(StagedFile::from_parts("clip.MP3", None, vec![1_u8; 4]));
    assert!(session.selected_file().is_some());

    let session = staged_session(StagedFile::from_parts(
        "recording",
        Some("audio/mpeg".to_string()),
        vec![1_u8; 4],
    ));
    assert!(session.selected_file().is_some());
}

#[test]
fn new_selection_hides_stale_results() {
    let mut session = staged_session(wav("cat.wav", 10));
    session.dispatch(Action::Submit);
    session.dispatch(Action::PredictionFinished(PredictionOutcome::Success(
        cat_result(),
    )));
    assert!(session.panels().results);

    session.dispatch(Action::FileDropped(wav("dog.wav", 20)));
    assert!(!session.panels().results);
    assert!(!session.panels().error);
    assert_eq!(session.phase(), Phase::Idle);
}

#[test]
fn submit_without_file_is_a_no_op() {
    let mut session = PageSession::new();
    assert!(session.dispatch(Action::Submit).is_empty());
    assert_eq!(session.phase(), Phase::Idle);
    assert!(!session.panels().loading);
}

#[test]
fn submit_enters_loading_state_and_requests_prediction() {
    let file = wav("cat.wav", 10_240);
    let mut session = staged_session(file.clone());

    let effects = session.dispatch(Action::Submit);

    assert_eq!(effects, vec![Effect::SendPrediction(file)]);
    assert_eq!(session.phase(), Phase::Submitting);
    let panels = session.panels();
    assert!(panels.loading);
    assert!(!panels.submit_visible);
    assert!(!panels.results && !panels.error);
}

#[test]
fn second_submit_while_in_flight_is_ignored() {
    let mut session = staged_session(wav("cat.wav", 10));
    session.dispatch(Action::Submit);
    assert!(session.dispatch(Action::Submit).is_empty());
    assert!(!session.can_submit());
}

#[test]
fn success_renders_results_in_server_order() {
    let mut session = staged_session(wav("cat.wav", 10_240));
    session.dispatch(Action::Submit);

    let effects = session.dispatch(Action::PredictionFinished(PredictionOutcome::Success(
        cat_result(),
    )));

    assert_eq!(
        effects,
        vec![Effect::ScrollIntoView {
            panel: Panel::Results,
            after: SCROLL_SETTLE_DELAY
        }]
    );
    assert_eq!(session.phase(), Phase::Succeeded);
    let panels = session.panels();
    assert!(!panels.loading);
    assert!(panels.submit_visible);
    assert!(panels.results);
    assert!(!panels.error);

    let view = session.results().expect("results");
    assert_eq!(view.label, "Cat");
    assert_eq!(view.confidence_text, "87.50%");
    assert_eq!(view.confidence_fill, 0.875);
    assert_eq!(view.tier, ConfidenceTier::High);
    let rows: Vec<_> = view
        .rows
        .iter()
        .map(|row| (row.label.as_str(), row.value_text.as_str()))
        .collect();
    assert_eq!(rows, [("Cat", "87.5%"), ("Dog", "12.5%")]);
    assert_eq!(view.rows[1].entrance_delay, Duration::from_millis(50));
}

#[test]
fn results_are_rebuilt_from_scratch() {
    let mut session = staged_session(wav("cat.wav", 10));
    session.dispatch(Action::Submit);
    session.dispatch(Action::PredictionFinished(PredictionOutcome::Success(
        cat_result(),
    )));

    session.dispatch(Action::Submit);
    session.dispatch(Action::PredictionFinished(PredictionOutcome::Success(
        PredictionResult {
            predicted_label: "Bird".to_string(),
            confidence: 51.0,
            probabilities: vec![ClassProbability {
                label: "Bird".to_string(),
                probability: 51.0,
            }],
        },
    )));

    let view = session.results().expect("results");
    assert_eq!(view.label, "Bird");
    assert_eq!(view.tier, ConfidenceTier::Medium);
    assert_eq!(view.rows.len(), 1);
}

#[test]
fn failure_shows_server_message_and_hides_results() {
    let mut session = staged_session(wav("cat.wav", 10));
    session.dispatch(Action::Submit);

    session.dispatch(Action::PredictionFinished(PredictionOutcome::Failure(
        "File too short".to_string(),
    )));

    assert_eq!(session.phase(), Phase::Failed);
    assert_eq!(session.error_message(), Some("File too short"));
    let panels = session.panels();
    assert!(panels.error);
    assert!(!panels.results);
    assert!(!panels.loading);
    assert!(panels.submit_visible);
}

#[test]
fn retry_resubmits_staged_file() {
    let file = wav("cat.wav", 10);
    let mut session = staged_session(file.clone());
    session.dispatch(Action::Submit);
    session.dispatch(Action::PredictionFinished(PredictionOutcome::Failure(
        NETWORK_ERROR_MESSAGE.to_string(),
    )));

    let effects = session.dispatch(Action::Retry);

    assert_eq!(effects, vec![Effect::SendPrediction(file)]);
    assert!(!session.panels().error);
    assert_eq!(session.phase(), Phase::Submitting);
}

#[test]
fn retry_without_file_resets() {
    let mut session = PageSession::new();
    session.dispatch(Action::SelectionFailed("unreadable".to_string()));
    assert!(session.panels().error);

    assert!(session.dispatch(Action::Retry).is_empty());
    assert_eq!(session.panels(), Panels::default());
}

#[test]
fn remove_file_restores_initial_panels() {
    let mut session = staged_session(wav("cat.wav", 10));
    session.dispatch(Action::RemoveFile);

    assert!(session.selected_file().is_none());
    assert!(session.file_label().is_none());
    assert_eq!(session.panels(), Panels::default());
}

#[test]
fn new_prediction_resets_and_scrolls_to_top() {
    let mut session = staged_session(wav("cat.wav", 10));
    session.dispatch(Action::Submit);
    session.dispatch(Action::PredictionFinished(PredictionOutcome::Success(
        cat_result(),
    )));

    let effects = session.dispatch(Action::NewPrediction);

    assert_eq!(effects, vec![Effect::ScrollToTop]);
    assert_eq!(session.phase(), Phase::Idle);
    assert_eq!(session.panels(), Panels::default());
}

#[test]
fn picking_the_same_path_twice_is_suppressed_until_reset() {
    let path = PathBuf::from("/music/cat.wav");
    let mut session = PageSession::new();
    session.dispatch(Action::FilePicked {
        path: path.clone(),
        file: wav("cat.wav", 10),
    });
    assert!(session.selected_file().is_some());

    session.dispatch(Action::RemoveFile);
    assert!(session.file_input().value().is_none());

    session.dispatch(Action::FilePicked {
        path: path.clone(),
        file: wav("cat.wav", 10),
    });
    assert!(session.selected_file().is_some());

    // Without a reset the input value is unchanged, so nothing happens.
    session.dispatch(Action::Submit);
    session.dispatch(Action::PredictionFinished(PredictionOutcome::Failure(
        "boom".to_string(),
    )));
    session.dispatch(Action::FilePicked {
        path,
        file: wav("cat.wav", 10),
    });
    assert!(session.panels().error);
}

#[test]
fn drag_highlight_clears_on_drop() {
    let mut session = PageSession::new();
    session.dispatch(Action::DragEnter);
    assert!(session.panels().drag_over);
    session.dispatch(Action::DragLeave);
    assert!(!session.panels().drag_over);

    session.dispatch(Action::DragEnter);
    session.dispatch(Action::FileDropped(wav("cat.wav", 10)));
    assert!(!session.panels().drag_over);
}

#[test]
fn completion_after_reset_still_clears_loading() {
    let mut session = staged_session(wav("cat.wav", 10));
    session.dispatch(Action::Submit);
    session.dispatch(Action::RemoveFile);
    assert_eq!(session.phase(), Phase::Submitting);
    assert!(session.panels().loading);

    session.dispatch(Action::PredictionFinished(PredictionOutcome::Failure(
        "late".to_string(),
    )));
    assert!(!session.panels().loading);
    assert!(session.panels().submit_visible);
    assert!(!session.panels().submit_enabled);
}
