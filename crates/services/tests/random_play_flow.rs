//! Full random-play rounds driven the way the web layer drives them: load
//! the session value for a token, run one operation, persist the successor.

use quiz_core::model::RandomPlaySession;
use services::{PlayOutcome, RandomPlayService};
use storage::repository::{PlaySessionStore as _, QuizRepository as _, Storage};

async fn seed(storage: &Storage, count: u64) {
    for n in 1..=count {
        let draft =
            quiz_core::model::QuizDraft::new(format!("Question {n}?"), format!("Answer {n}"))
                .unwrap();
        storage
            .quizzes
            .insert(&draft, quiz_core::time::fixed_now())
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn a_round_survives_session_store_round_trips() {
    let storage = Storage::in_memory();
    seed(&storage, 3).await;
    let service = RandomPlayService::new(storage.quizzes.clone()).with_rng_seed(21);
    let token = "browser-a";

    let mut answered = 0;
    loop {
        let session = storage.sessions.load(token).await.unwrap();
        let (next, outcome) = service.next_prompt(session).await.unwrap();
        storage.sessions.save(token, &next).await.unwrap();

        let quiz = match outcome {
            PlayOutcome::Prompt { quiz, .. } => quiz,
            PlayOutcome::Exhausted { score } => {
                assert_eq!(score, 3);
                break;
            }
        };

        let session = storage.sessions.load(token).await.unwrap();
        let (next, verdict) = service
            .check_answer(session, quiz.id(), quiz.answer())
            .await
            .unwrap();
        assert!(verdict.correct);
        storage.sessions.save(token, &next).await.unwrap();
        answered += 1;
    }

    assert_eq!(answered, 3);
    // The finished round was persisted; the next request starts fresh.
    let session = storage.sessions.load(token).await.unwrap();
    assert_eq!(session, RandomPlaySession::Finished);
    let (_next, outcome) = service.next_prompt(session).await.unwrap();
    assert!(matches!(outcome, PlayOutcome::Prompt { score: 0, .. }));
}

#[tokio::test]
async fn tokens_keep_independent_rounds() {
    let storage = Storage::in_memory();
    seed(&storage, 2).await;
    let service = RandomPlayService::new(storage.quizzes.clone()).with_rng_seed(5);

    let session_a = storage.sessions.load("a").await.unwrap();
    let (next_a, _) = service.next_prompt(session_a).await.unwrap();
    storage.sessions.save("a", &next_a).await.unwrap();

    // Browser B has never played; its state is untouched by A's round.
    let session_b = storage.sessions.load("b").await.unwrap();
    assert_eq!(session_b, RandomPlaySession::NotStarted);

    let stored_a = storage.sessions.load("a").await.unwrap();
    assert_eq!(stored_a.remaining().len(), 1);
}

#[tokio::test]
async fn a_wrong_answer_resets_only_that_token() {
    let storage = Storage::in_memory();
    seed(&storage, 3).await;
    let service = RandomPlayService::new(storage.quizzes.clone()).with_rng_seed(33);

    for token in ["a", "b"] {
        let session = storage.sessions.load(token).await.unwrap();
        let (next, _) = service.next_prompt(session).await.unwrap();
        storage.sessions.save(token, &next).await.unwrap();
    }

    let session_a = storage.sessions.load("a").await.unwrap();
    let quiz_id = session_a.remaining()[0];
    let (next_a, verdict) = service
        .check_answer(session_a, quiz_id, "wrong")
        .await
        .unwrap();
    assert!(!verdict.correct);
    storage.sessions.save("a", &next_a).await.unwrap();

    assert_eq!(
        storage.sessions.load("a").await.unwrap(),
        RandomPlaySession::NotStarted
    );
    assert!(storage.sessions.load("b").await.unwrap().is_in_progress());
}
