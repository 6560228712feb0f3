//! Postgres store tests. Need a reachable server:
//! `DATABASE_URL=postgres://... cargo test --test postgres_store -- --ignored`

use sqlx::postgres::PgPoolOptions;
use student_api::{ensure_database_exists, ensure_students_table, AppError, PgStudentStore, Student, StudentStore};

/// Each test owns distinct ids so tests can share the table.
async fn store(ids: &[i32]) -> PgStudentStore {
    let url = std::env::var("DATABASE_URL").unwrap_or_else(|_| "postgres://localhost/students_test".into());
    ensure_database_exists(&url).await.unwrap();
    let pool = PgPoolOptions::new().max_connections(2).connect(&url).await.unwrap();
    ensure_students_table(&pool).await.unwrap();
    sqlx::query("DELETE FROM students WHERE id = ANY($1)")
        .bind(ids)
        .execute(&pool)
        .await
        .unwrap();
    PgStudentStore::new(pool)
}

#[tokio::test]
#[ignore]
async fn insert_update_delete_roundtrip() {
    let store = store(&[1]).await;

    let mut session = store.begin().await.unwrap();
    session.insert(&Student::new(1, "John", "Doe", 22)).await.unwrap();
    session.commit().await.unwrap();

    let mut session = store.begin().await.unwrap();
    assert!(session.update(1, &Student::new(1, "Johnny", "Doe", 23)).await.unwrap());
    session.commit().await.unwrap();

    let mut session = store.begin().await.unwrap();
    assert_eq!(
        session.get_by_id(1).await.unwrap(),
        Some(Student::new(1, "Johnny", "Doe", 23))
    );
    assert!(session.delete(1).await.unwrap());
    assert!(!session.delete(1).await.unwrap());
    session.commit().await.unwrap();

    let mut session = store.begin().await.unwrap();
    assert_eq!(session.get_by_id(1).await.unwrap(), None);
    assert!(session.list().await.unwrap().iter().all(|s| s.id != 1));
}

#[tokio::test]
#[ignore]
async fn duplicate_insert_is_conflict() {
    let store = store(&[2]).await;
    let mut session = store.begin().await.unwrap();
    session.insert(&Student::new(2, "Maija", "Meikäläinen", 20)).await.unwrap();
    session.commit().await.unwrap();

    let mut session = store.begin().await.unwrap();
    let err = session
        .insert(&Student::new(2, "Matti", "Meikäläinen", 22))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
#[ignore]
async fn uncommitted_session_is_rolled_back() {
    let store = store(&[3]).await;
    {
        let mut session = store.begin().await.unwrap();
        session.insert(&Student::new(3, "Matti", "Meikäläinen", 22)).await.unwrap();
    }
    let mut session = store.begin().await.unwrap();
    assert_eq!(session.get_by_id(3).await.unwrap(), None);
    store.ping().await.unwrap();
}
