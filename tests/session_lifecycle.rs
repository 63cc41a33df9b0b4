//! End-to-end tests of the query lifecycle against a stub provider
//!
//! These drive `QueryController` the way the CLI does and check the
//! session counters, history, ratings, and exported files.

mod common;

use common::StubProvider;
use lexqa::error::QaError;
use lexqa::export::ResultExporter;
use lexqa::session::SessionStore;
use lexqa::{Outcome, QueryController};
use tempfile::TempDir;

fn controller_with(provider: StubProvider, dir: &TempDir) -> QueryController {
    let session = SessionStore::new("gpt-3.5-turbo", provider.supported()).unwrap();
    QueryController::new(
        Box::new(provider),
        session,
        0.7,
        ResultExporter::new(dir.path().join("output")),
    )
}

#[tokio::test]
async fn test_question_completes_and_is_recorded() {
    let dir = TempDir::new().unwrap();
    let provider = StubProvider::new().reply(Ok("依道路交通管理處罰條例第35條處罰。"));
    let calls = provider.calls();
    let mut controller = controller_with(provider, &dir);

    let outcome = controller.submit("  酒後開車會受到什麼處罰？ ").await;

    match outcome {
        Outcome::Completed { record, export } => {
            assert_eq!(record.query(), "酒後開車會受到什麼處罰？");
            assert_eq!(record.response(), "依道路交通管理處罰條例第35條處罰。");
            assert_eq!(record.model(), "gpt-3.5-turbo");
            assert!(export.is_none());
        }
        other => panic!("expected Completed, got {:?}", other),
    }

    assert_eq!(controller.session().history().len(), 1);
    assert_eq!(controller.session().total_queries(), 1);

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "酒後開車會受到什麼處罰？");
    assert_eq!(calls[0].2, 0.7);
}

#[tokio::test]
async fn test_speeding_fine_question_completes() {
    let dir = TempDir::new().unwrap();
    let provider = StubProvider::new().reply(Ok("依規定處罰鍇..."));
    let mut controller = controller_with(provider, &dir);

    let outcome = controller.submit("超速會被罰多少錢？").await;

    assert!(outcome.is_completed());
    let history = controller.session().history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].query(), "超速會被罰多少錢？");
    assert_eq!(history[0].response(), "依規定處罰鍇...");
    assert_eq!(controller.session().total_queries(), 1);
}

#[tokio::test]
async fn test_empty_input_is_rejected_without_side_effects() {
    let dir = TempDir::new().unwrap();
    let provider = StubProvider::new();
    let calls = provider.calls();
    let mut controller = controller_with(provider, &dir);

    for input in ["", "   ", "\n\t"] {
        let outcome = controller.submit(input).await;
        assert!(matches!(outcome, Outcome::Rejected(QaError::EmptyInput)));
    }

    assert_eq!(controller.session().total_queries(), 0);
    assert!(controller.session().history().is_empty());
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_question_is_counted_but_not_recorded() {
    let dir = TempDir::new().unwrap();
    let provider =
        StubProvider::new().reply(Err(QaError::Upstream("connection reset".to_string())));
    let mut controller = controller_with(provider, &dir);

    let outcome = controller.submit("超速會被罰多少錢？").await;

    assert!(matches!(outcome, Outcome::Failed(QaError::Upstream(_))));
    assert_eq!(controller.session().total_queries(), 1);
    assert!(controller.session().history().is_empty());
}

#[tokio::test]
async fn test_counter_tracks_every_accepted_submission() {
    let dir = TempDir::new().unwrap();
    let provider = StubProvider::new()
        .reply(Ok("first"))
        .reply(Err(QaError::Authentication("401".to_string())))
        .reply(Ok("third"));
    let mut controller = controller_with(provider, &dir);

    controller.submit("one").await;
    controller.submit("").await;
    controller.submit("two").await;
    controller.submit("three").await;

    let session = controller.session();
    assert_eq!(session.total_queries(), 3);
    assert_eq!(session.history().len(), 2);
    assert!(session.total_queries() >= session.history().len() as u64);
    assert_eq!(session.latest().unwrap().response(), "third");
}

#[tokio::test]
async fn test_clear_history_keeps_counter() {
    let dir = TempDir::new().unwrap();
    let mut controller = controller_with(StubProvider::new(), &dir);

    controller.submit("考駕照需要哪些條件？").await;
    controller.submit("駕照被吊銷後如何恢復？").await;
    controller.clear_history();

    assert!(controller.session().is_empty());
    assert_eq!(controller.session().total_queries(), 2);
}

#[tokio::test]
async fn test_model_switch_applies_to_next_question() {
    let dir = TempDir::new().unwrap();
    let provider = StubProvider::new();
    let calls = provider.calls();
    let mut controller = controller_with(provider, &dir);

    controller.set_model("gpt-4").unwrap();
    let outcome = controller.submit("車輛年檢的規定是什麼？").await;

    assert_eq!(outcome.record().unwrap().model(), "gpt-4");
    assert_eq!(calls.lock().unwrap()[0].1, "gpt-4");

    let err = controller.set_model("gpt-9").unwrap_err();
    assert!(matches!(err, QaError::InvalidModel(_)));
    assert_eq!(controller.session().selected_model(), "gpt-4");
}

#[test]
fn test_rating_bounds() {
    let mut session = SessionStore::new("gpt-4", vec!["gpt-4".to_string()]).unwrap();

    for score in 1..=5 {
        session.set_rating(score).unwrap();
        assert_eq!(session.last_rating(), Some(score as u8));
    }

    for score in [0, 6, -1, 100] {
        assert!(matches!(
            session.set_rating(score),
            Err(QaError::InvalidRating(s)) if s == score
        ));
        assert_eq!(session.last_rating(), Some(5));
    }
}

#[tokio::test]
async fn test_auto_export_writes_question_and_answer() {
    let dir = TempDir::new().unwrap();
    let provider = StubProvider::new().reply(Ok("需備妥行照與身分證件。\n第二行"));
    let mut controller = controller_with(provider, &dir).with_auto_export(true);

    let outcome = controller.submit("如何辦理車輛過戶？").await;

    let path = match outcome {
        Outcome::Completed {
            export: Some(Ok(path)),
            ..
        } => path,
        other => panic!("expected exported completion, got {:?}", other),
    };

    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("qa_result_"));
    assert!(name.ends_with(".txt"));
    assert_eq!(name.len(), "qa_result_YYYYMMDD_HHMMSS.txt".len());

    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        contents,
        "[Question]\n如何辦理車輛過戶？\n\n[Answer]\n需備妥行照與身分證件。\n第二行\n"
    );
}

#[tokio::test]
async fn test_export_failure_keeps_completed_record() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("blocked");
    std::fs::write(&blocker, "not a directory").unwrap();

    let provider = StubProvider::new();
    let session = SessionStore::new("gpt-3.5-turbo", provider.supported()).unwrap();
    let mut controller = QueryController::new(
        Box::new(provider),
        session,
        0.7,
        ResultExporter::new(blocker.join("output")),
    )
    .with_auto_export(true);

    let outcome = controller.submit("車輛報廢的標準是什麼？").await;

    assert!(matches!(
        outcome,
        Outcome::Completed {
            export: Some(Err(QaError::Io(_))),
            ..
        }
    ));
    assert_eq!(controller.session().history().len(), 1);
}
