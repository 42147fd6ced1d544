use std::path::PathBuf;

use wizi_quiz::api::{OfflineQuizApi, QuizApi};
use wizi_quiz::load_quiz_from_json;
use wizi_quiz::models::{AnswerValue, QuestionType, Quiz};
use wizi_quiz::notify::Notifier;
use wizi_quiz::session::{FileStore, QuizSession, SessionOptions, SessionOrigin, SessionStore};

fn demo_quiz() -> Quiz {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos/quiz.json");
    load_quiz_from_json(path).unwrap()
}

fn correct_answer(question_id: &str) -> AnswerValue {
    match question_id {
        "101" => AnswerValue::many(["1", "2"]),
        "102" => AnswerValue::single("4"),
        "103" => AnswerValue::single("c"),
        "104" => AnswerValue::pairs([("7", "9"), ("8", "Tableur")]),
        "105" => AnswerValue::many(["12", "13", "11"]),
        "106" => AnswerValue::many(["15", "14"]),
        other => panic!("unexpected question {other}"),
    }
}

async fn open(api: &OfflineQuizApi, dir: &std::path::Path) -> QuizSession<FileStore> {
    let store = SessionStore::new(FileStore::open(dir).unwrap());
    QuizSession::open(api.quiz().clone(), api, store, SessionOptions::default()).await
}

#[test]
fn test_demo_quiz_parses_every_type() {
    let quiz = demo_quiz();
    assert_eq!(quiz.id, "12");
    assert_eq!(quiz.title, "Bureautique : les bases");

    let kinds: Vec<QuestionType> = quiz.questions.iter().map(|q| q.kind).collect();
    assert_eq!(
        kinds,
        [
            QuestionType::MultipleChoice,
            QuestionType::TrueFalse,
            QuestionType::FillInBlank,
            QuestionType::Matching,
            QuestionType::Reorder,
            QuestionType::WordBank,
        ]
    );
    assert!(quiz.questions[5].options[1].is_correct);
}

#[tokio::test]
async fn test_offline_attempt_survives_restart_and_scores() {
    let dir = tempfile::tempdir().unwrap();
    let api = OfflineQuizApi::new(demo_quiz());
    assert!(api.fetch_quiz("12").await.is_ok());
    assert!(api.fetch_quiz("13").await.is_err());

    let ids = {
        let mut session = open(&api, dir.path()).await;
        assert_eq!(session.origin(), SessionOrigin::Fresh);
        assert_eq!(session.question_ids().len(), 5);

        let first = session.question_ids()[0].clone();
        session.answer(correct_answer(&first));
        session.next();
        session.question_ids().to_vec()
    };

    // A new process picks the attempt up from disk.
    let mut session = open(&api, dir.path()).await;
    assert_eq!(session.origin(), SessionOrigin::Local);
    assert_eq!(session.question_ids(), ids.as_slice());
    assert_eq!(session.navigation().index(), 1);
    assert_eq!(session.ledger().answered_count(), 1);

    for id in &ids {
        session.answer_question(id, correct_answer(id));
        assert_eq!(session.feedback(id), Some(true), "question {id}");
    }

    let notifier = Notifier::new();
    notifier.start();
    let outcome = session.finish(&api, &notifier).await.unwrap();
    assert_eq!(outcome.result.correct_answers, Some(5));
    assert_eq!(outcome.result.score, 10.0);
    assert_eq!(outcome.total_points(), 10);

    let store = SessionStore::new(FileStore::open(dir.path()).unwrap());
    assert!(store.load("12").unwrap().is_none());
}
