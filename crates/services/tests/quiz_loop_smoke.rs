use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use services::{
    Advance, AnonymousIdentity, Clock, ProgressService, QuizLoopService, QuizSession,
    SessionError, StaticIdentity,
};
use storage::repository::{
    InMemoryRepository, NewWordRecord, QuizHistoryRepository, QuizHistoryRow, Storage,
    StorageError, WordRepository,
};
use storage::seed::seed_default_words;
use vocab_core::model::{PoolError, QuizMode, SessionResult, UserId, WordEntry, WordId};
use vocab_core::time::fixed_now;

const WORDS: [(&str, &str); 10] = [
    ("Hello", "Salom"),
    ("Thank you", "Rahmat"),
    ("Goodbye", "Xayr"),
    ("Please", "Iltimos"),
    ("Yes", "Ha"),
    ("No", "Yo'q"),
    ("Water", "Suv"),
    ("Food", "Ovqat"),
    ("House", "Uy"),
    ("Car", "Mashina"),
];

async fn seeded_repo() -> InMemoryRepository {
    let repo = InMemoryRepository::new();
    for (i, (front, back)) in WORDS.iter().enumerate() {
        let word = WordEntry::new(WordId::new(i as u64 + 1), *front, *back).unwrap();
        repo.upsert_word(&word).await.unwrap();
    }
    repo
}

/// Answers the first `wrong` questions wrongly and the rest correctly.
async fn play(service: &QuizLoopService, session: &mut QuizSession, wrong: u32) {
    let mut round = 0;
    while !session.is_finished() {
        let question = session.current_question().unwrap();
        let pick = if round < wrong {
            question
                .options()
                .iter()
                .find(|o| *o != question.correct_answer())
                .unwrap()
                .clone()
        } else {
            question.correct_answer().to_owned()
        };
        assert!(session.select_option(&pick));
        session.confirm_answer().unwrap();
        round += 1;

        if service.advance(session).await == Advance::Finished {
            break;
        }
    }
}

struct FailingWords;

#[async_trait::async_trait]
impl WordRepository for FailingWords {
    async fn insert_new_word(&self, _word: NewWordRecord) -> Result<WordId, StorageError> {
        Err(StorageError::Connection("offline".into()))
    }

    async fn upsert_word(&self, _word: &WordEntry) -> Result<(), StorageError> {
        Err(StorageError::Connection("offline".into()))
    }

    async fn list_words(&self, _limit: u32) -> Result<Vec<WordEntry>, StorageError> {
        Err(StorageError::Connection("offline".into()))
    }

    async fn count_words(&self) -> Result<u64, StorageError> {
        Err(StorageError::Connection("offline".into()))
    }
}

/// Supplier that lists every word twice.
struct DuplicatingWords(InMemoryRepository);

#[async_trait::async_trait]
impl WordRepository for DuplicatingWords {
    async fn insert_new_word(&self, word: NewWordRecord) -> Result<WordId, StorageError> {
        self.0.insert_new_word(word).await
    }

    async fn upsert_word(&self, word: &WordEntry) -> Result<(), StorageError> {
        self.0.upsert_word(word).await
    }

    async fn list_words(&self, limit: u32) -> Result<Vec<WordEntry>, StorageError> {
        let words = self.0.list_words(limit).await?;
        Ok(words.iter().chain(&words).cloned().collect())
    }

    async fn count_words(&self) -> Result<u64, StorageError> {
        self.0.count_words().await
    }
}

struct FailingHistory;

#[async_trait::async_trait]
impl QuizHistoryRepository for FailingHistory {
    async fn append_result(
        &self,
        _user_id: UserId,
        _result: &SessionResult,
    ) -> Result<i64, StorageError> {
        Err(StorageError::Connection("offline".into()))
    }

    async fn get_result(&self, _id: i64) -> Result<QuizHistoryRow, StorageError> {
        Err(StorageError::NotFound)
    }

    async fn recent_results(
        &self,
        _user_id: UserId,
        _limit: u32,
    ) -> Result<Vec<QuizHistoryRow>, StorageError> {
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn quiz_loop_submits_result_for_signed_in_user() {
    let repo = seeded_repo().await;
    let user = UserId::random();
    let service = QuizLoopService::new(
        Clock::fixed(fixed_now()),
        Arc::new(repo.clone()),
        Arc::new(repo.clone()),
        Arc::new(StaticIdentity(user)),
    )
    .with_seed(42);

    let mut session = service.start_session(QuizMode::FrontToBack).await.unwrap();
    play(&service, &mut session, 2).await;

    assert!(session.is_finished());
    assert_eq!(session.total_answered(), 10);
    assert_eq!(session.correct_count(), 8);

    let result_id = session.result_id().expect("result submitted");
    let row = repo.get_result(result_id).await.unwrap();
    assert_eq!(row.user_id, user);
    assert_eq!(row.result.correct_count(), 8);
    assert_eq!(row.result.mistakes().len(), 2);
    assert_eq!(row.result.accuracy_percent(), 80);

    let progress_service = ProgressService::new(Arc::new(repo.clone()), Arc::new(repo));
    let progress = progress_service.progress(user).await.unwrap().unwrap();
    assert_eq!(progress.total_games(), 1);
    assert_eq!(progress.total_score(), 8);

    let recent = progress_service
        .recent(user, ProgressService::DEFAULT_RECENT_LIMIT)
        .await
        .unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].id, result_id);
    assert_eq!(recent[0].mode, QuizMode::FrontToBack);
}

#[tokio::test]
async fn quiz_loop_skips_submission_when_anonymous() {
    let repo = seeded_repo().await;
    let service = QuizLoopService::new(
        Clock::fixed(fixed_now()),
        Arc::new(repo.clone()),
        Arc::new(repo.clone()),
        Arc::new(AnonymousIdentity),
    );

    let mut session = service.start_session(QuizMode::BackToFront).await.unwrap();
    play(&service, &mut session, 0).await;

    assert!(session.is_finished());
    assert_eq!(session.result_id(), None);
    assert_eq!(service.finalize_result(&mut session).await.unwrap(), None);
    assert!(matches!(
        repo.get_result(1).await,
        Err(StorageError::NotFound)
    ));
}

#[tokio::test]
async fn quiz_loop_failing_sink_still_finishes() {
    let repo = seeded_repo().await;
    let service = QuizLoopService::new(
        Clock::fixed(fixed_now()),
        Arc::new(repo),
        Arc::new(FailingHistory),
        Arc::new(StaticIdentity(UserId::random())),
    )
    .with_seed(1);

    let mut session = service.start_session(QuizMode::FrontToBack).await.unwrap();
    play(&service, &mut session, 3).await;

    assert!(session.is_finished());
    assert_eq!(session.result_id(), None);
    assert_eq!(session.mistakes().len(), 3);
    assert!(matches!(
        service.finalize_result(&mut session).await,
        Err(SessionError::Storage(_))
    ));
    assert!(session.is_finished());
}

#[tokio::test]
async fn quiz_loop_reports_empty_pool() {
    let repo = InMemoryRepository::new();
    let service = QuizLoopService::new(
        Clock::fixed(fixed_now()),
        Arc::new(repo.clone()),
        Arc::new(repo),
        Arc::new(AnonymousIdentity),
    );

    let err = service
        .start_session(QuizMode::FrontToBack)
        .await
        .unwrap_err();
    assert!(matches!(err, SessionError::EmptyPool));
}

#[tokio::test]
async fn quiz_loop_reports_pool_fetch_failure() {
    let repo = InMemoryRepository::new();
    let service = QuizLoopService::new(
        Clock::fixed(fixed_now()),
        Arc::new(FailingWords),
        Arc::new(repo),
        Arc::new(AnonymousIdentity),
    );

    let err = service
        .start_session(QuizMode::FrontToBack)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SessionError::PoolFetch(StorageError::Connection(_))
    ));
}

#[tokio::test]
async fn quiz_loop_runs_against_sqlite() {
    let storage = Storage::sqlite("sqlite:file:memdb_quiz_loop?mode=memory&cache=shared")
        .await
        .expect("connect sqlite");
    for (front, back) in &WORDS[..4] {
        storage
            .words
            .insert_new_word(NewWordRecord {
                front: (*front).to_string(),
                back: (*back).to_string(),
                category: Some("basics".into()),
                created_at: Utc::now(),
            })
            .await
            .unwrap();
    }

    let user = UserId::random();
    let service = QuizLoopService::from_storage(
        Clock::fixed(fixed_now()),
        &storage,
        Arc::new(StaticIdentity(user)),
    )
    .with_seed(9);

    let mut session = service.start_session(QuizMode::BackToFront).await.unwrap();
    assert_eq!(session.pool().len(), 4);
    assert_eq!(session.current_question().unwrap().options().len(), 4);
    play(&service, &mut session, 1).await;

    assert_eq!(session.total_answered(), 4);
    let id = session.result_id().expect("result submitted");

    let progress = ProgressService::from_storage(&storage);
    let recent = progress.recent(user, 5).await.unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].id, id);
    assert_eq!(recent[0].score, 3);
    assert_eq!(recent[0].mode, QuizMode::BackToFront);

    let totals = progress.progress(user).await.unwrap().unwrap();
    assert_eq!(totals.total_score(), 3);
}

#[tokio::test]
async fn quiz_loop_rejects_duplicate_word_ids() {
    let repo = seeded_repo().await;
    let service = QuizLoopService::new(
        Clock::fixed(fixed_now()),
        Arc::new(DuplicatingWords(repo.clone())),
        Arc::new(repo),
        Arc::new(AnonymousIdentity),
    );

    let err = service
        .start_session(QuizMode::FrontToBack)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SessionError::InvalidPool(PoolError::DuplicateId(id)) if id == WordId::new(1)
    ));
}

#[tokio::test]
async fn reseeded_store_never_repeats_a_prompt() {
    let storage = Storage::in_memory();
    seed_default_words(storage.words.as_ref()).await.unwrap();
    seed_default_words(storage.words.as_ref()).await.unwrap();
    assert_eq!(storage.words.count_words().await.unwrap(), 10);

    for seed in 0..20 {
        let service = QuizLoopService::from_storage(
            Clock::fixed(fixed_now()),
            &storage,
            Arc::new(AnonymousIdentity),
        )
        .with_seed(seed);
        let mut session = service.start_session(QuizMode::FrontToBack).await.unwrap();

        let mut prompts = HashSet::new();
        while let Some(question) = session.current_question() {
            assert!(
                prompts.insert(question.prompt().to_owned()),
                "prompt repeated with seed {seed}"
            );
            let pick = question.correct_answer().to_owned();
            session.select_option(&pick);
            session.confirm_answer();
            service.advance(&mut session).await;
        }
        assert_eq!(prompts.len(), 10);
    }
}
