use prep_core::model::{ProgressMap, Question, QuestionDraft, QuestionId};
use serde_json::{Map, Value};
use storage::repository::{ProgressRepository, QuestionRepository, Storage};
use storage::sqlite::SqliteRepository;

fn build_question(id: u64, category: &str) -> Question {
    Question::new(
        QuestionId::new(id),
        QuestionDraft::new(format!("Q{id}"))
            .with_category(category)
            .with_hint(format!("hint {id}")),
    )
}

#[tokio::test]
async fn sqlite_roundtrip_preserves_order_and_extras() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_questions?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let mut extra = Map::new();
    extra.insert("difficulty".into(), Value::from("medium"));
    let with_extra = Question::from_persisted(
        QuestionId::new(7),
        Some("Trees".into()),
        Some("Invert a binary tree".into()),
        None,
        extra,
    );
    let questions = vec![build_question(5, "DP"), with_extra, build_question(2, "Graphs")];
    QuestionRepository::save_all(&repo, &questions)
        .await
        .expect("save");

    let loaded = QuestionRepository::load_all(&repo).await.expect("load");
    assert_eq!(loaded, questions);

    // shrinking the set replaces rather than merges
    QuestionRepository::save_all(&repo, &questions[..1])
        .await
        .expect("save");
    let loaded = QuestionRepository::load_all(&repo).await.expect("load");
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id(), QuestionId::new(5));
}

#[tokio::test]
async fn sqlite_progress_replaces_whole_mapping() {
    let storage = Storage::sqlite("sqlite:file:memdb_progress?mode=memory&cache=shared")
        .await
        .expect("storage");

    let mut progress = ProgressMap::new();
    progress.set(QuestionId::new(1), true);
    progress.set(QuestionId::new(2), false);
    storage.progress.save_all(&progress).await.expect("save");

    let loaded = storage.progress.load_all().await.expect("load");
    assert_eq!(loaded, progress);

    storage
        .progress
        .save_all(&ProgressMap::new())
        .await
        .expect("reset");
    assert!(storage.progress.load_all().await.expect("load").is_empty());
}

#[tokio::test]
async fn sqlite_migrations_are_idempotent() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_migrate?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("first");
    repo.migrate().await.expect("second");
    assert!(QuestionRepository::load_all(&repo).await.unwrap().is_empty());
}

#[tokio::test]
async fn plain_memory_database_keeps_data_between_calls() {
    let storage = Storage::sqlite("sqlite::memory:").await.expect("open");
    storage
        .questions
        .save_all(&[build_question(1, "DP"), build_question(2, "Graphs")])
        .await
        .expect("save");
    let mut progress = ProgressMap::new();
    progress.set(QuestionId::new(2), true);
    storage.progress.save_all(&progress).await.expect("save progress");

    let ids: Vec<u64> = storage
        .questions
        .load_all()
        .await
        .expect("load")
        .iter()
        .map(|q| q.id().value())
        .collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(storage.progress.load_all().await.expect("load"), progress);
}

#[tokio::test]
async fn missing_database_file_is_created() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("prep.sqlite3");
    assert!(!path.exists());

    let url = format!("sqlite://{}", path.display());
    let storage = Storage::sqlite(&url).await.expect("open");
    storage
        .questions
        .save_all(&[build_question(3, "Trees")])
        .await
        .expect("save");
    assert!(path.exists());

    let reopened = SqliteRepository::connect(&url).await.expect("reopen");
    let loaded = QuestionRepository::load_all(&reopened).await.expect("load");
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].category().as_str(), "Trees");
}
