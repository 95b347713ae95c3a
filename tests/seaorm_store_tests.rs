#![cfg(feature = "migration")]

use std::time::Duration;

use quiz_session_engine::entity::quiz_session;
use quiz_session_engine::migration::{Migrator, MigratorTrait};
use quiz_session_engine::{QuizAttemptSession, SeaOrmStore, SessionStore};
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, EntityTrait, Set};
use time::OffsetDateTime;

async fn setup_store() -> SeaOrmStore {
    let conn: DatabaseConnection = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&conn, None).await.unwrap();
    SeaOrmStore::new(conn)
}

fn sample_session() -> QuizAttemptSession {
    let mut session = QuizAttemptSession::new("daily", 180, 1_700_000_000_000);
    session.record_answer("1b", true, 12);
    session
}

#[tokio::test]
async fn save_and_load() {
    let store = setup_store().await;
    let session = sample_session();

    store.save("daily", &session).await.unwrap();

    let loaded = store.load("daily").await.unwrap();
    assert_eq!(loaded, Some(session));
    assert_eq!(store.load("morning-meeting").await.unwrap(), None);
}

#[tokio::test]
async fn save_replaces_existing_slot() {
    let store = setup_store().await;
    let mut session = sample_session();
    store.save("daily", &session).await.unwrap();

    session.record_answer("2a", false, 3);
    store.save("daily", &session).await.unwrap();

    let loaded = store.load("daily").await.unwrap().unwrap();
    assert_eq!(loaded.current_question_index, 2);

    let rows = quiz_session::Entity::find()
        .all(store.connection())
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn clear_removes_only_that_slot() {
    let store = setup_store().await;
    let session = sample_session();
    store.save("daily", &session).await.unwrap();
    store
        .save(
            "estate-planning",
            &QuizAttemptSession::new("estate-planning", 180, 1_700_000_000_000),
        )
        .await
        .unwrap();

    store.clear("daily").await.unwrap();
    store.clear("daily").await.unwrap();

    assert!(store.load("daily").await.unwrap().is_none());
    assert!(store.load("estate-planning").await.unwrap().is_some());
}

#[tokio::test]
async fn undecodable_row_loads_as_none() {
    let store = setup_store().await;

    quiz_session::ActiveModel {
        quiz_type_key: Set("daily".to_string()),
        data: Set(b"not messagepack at all".to_vec()),
        updated_at: Set(chrono::Utc::now().into()),
    }
    .insert(store.connection())
    .await
    .unwrap();

    assert_eq!(store.load("daily").await.unwrap(), None);

    // A fresh save overwrites the garbage.
    store.save("daily", &sample_session()).await.unwrap();
    assert!(store.load("daily").await.unwrap().is_some());
}

#[tokio::test]
async fn delete_untouched_since_purges_old_slots() {
    let store = setup_store().await;

    quiz_session::ActiveModel {
        quiz_type_key: Set("structured-products".to_string()),
        data: Set(rmp_serde::to_vec(&sample_session()).unwrap()),
        updated_at: Set((chrono::Utc::now() - chrono::Duration::days(2)).into()),
    }
    .insert(store.connection())
    .await
    .unwrap();
    store.save("daily", &sample_session()).await.unwrap();

    let cutoff = OffsetDateTime::now_utc() - Duration::from_secs(24 * 60 * 60);
    let removed = store.delete_untouched_since(cutoff).await.unwrap();

    assert_eq!(removed, 1);
    assert!(store.load("structured-products").await.unwrap().is_none());
    assert!(store.load("daily").await.unwrap().is_some());
}
